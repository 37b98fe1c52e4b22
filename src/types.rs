// Copyright (c) 2023 Lithic (lithic.com)
// This file is part of the Lithic Rust client.

// This program is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
// You should have received a copy of the GNU General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Types shared between requests and responses.

use crate::fields::Field;
use fmt::Formatter;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How long a card's spend limit applies for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpendLimitDuration {
    /// Up to the spend limit in a calendar year.
    Annually,
    /// Up to the spend limit for the lifetime of the card.
    Forever,
    /// Up to the spend limit over the trailing month.
    Monthly,
    /// Any number of transactions, each under the spend limit.
    Transaction,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub address1: String,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub address2: Field<String>,
    pub city: String,
    /// Uppercase ISO 3166-1 alpha-3 country code.
    pub country: String,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub email: Field<String>,
    pub first_name: String,
    pub last_name: String,
    /// Text printed on the second line of the card, such as a business name.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub line2_text: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub phone_number: Field<String>,
    pub postal_code: String,
    pub state: String,
}

// Display implementation for types which serialize to JSON. Displays as a valid JSON object.
pub fn fmt_as_json<T: Serialize>(v: &T, f: &mut Formatter<'_>) -> fmt::Result {
    let string = serde_json::to_string(v).map_err(|_| fmt::Error)?;
    write!(f, "{}", string)
}

macro_rules! display_as_json {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ::std::fmt::Display for $ty {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    $crate::types::fmt_as_json(self, f)
                }
            }
        )*
    };
}

pub(crate) use display_as_json;

display_as_json!(ShippingAddress);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_renders_json_without_absent_fields() {
        let address = ShippingAddress {
            address1: "5 Broadway".into(),
            city: "New York".into(),
            country: "USA".into(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            postal_code: "10004".into(),
            state: "NY".into(),
            phone_number: Field::null(),
            ..Default::default()
        };
        let rendered = address.to_string();
        assert!(rendered.starts_with(r#"{"address1":"5 Broadway","city":"New York""#));
        assert!(rendered.contains(r#""phone_number":null"#));
        assert!(!rendered.contains("address2"));
    }
}
