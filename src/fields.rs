// Copyright (c) 2023 Lithic (lithic.com)
// This file is part of the Lithic Rust client.

// This program is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
// You should have received a copy of the GNU General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.

use crate::query::{Format, QueryValue, Value};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An optional request parameter.
///
/// Unlike [Option], this distinguishes a parameter that was never set ([Field::Absent]) from one
/// that was explicitly set to `null` ([Field::Null]), which matters for update requests where
/// `null` clears a value on the server. Both states are omitted from query strings; only
/// [Field::Present] values are encoded.
///
/// Request structs should mark fields with `#[serde(skip_serializing_if = "Field::is_absent")]`
/// so absent fields are left out of JSON bodies entirely.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Field<T> {
    Absent,
    Null,
    Present(T),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Absent
    }
}

impl<T> Field<T> {
    pub fn new(value: T) -> Self {
        Field::Present(value)
    }

    pub fn null() -> Self {
        Field::Null
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Field::Null)
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Field::Present(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Field::Present(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_ref(&self) -> Field<&T> {
        match self {
            Field::Absent => Field::Absent,
            Field::Null => Field::Null,
            Field::Present(value) => Field::Present(value),
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Field::Present(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> From<T> for Field<T> {
    fn from(value: T) -> Self {
        Field::Present(value)
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Field::Present(value),
            None => Field::Absent,
        }
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Present(value) => value.serialize(serializer),
            // Absent fields should be skipped by the containing struct; if one is not, `null` is
            // the only representation available.
            Field::Absent | Field::Null => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Field::Present(value),
            None => Field::Null,
        })
    }
}

impl<T: QueryValue> QueryValue for Field<T> {
    fn query_value(&self, format: Format) -> Value {
        match self {
            Field::Present(value) => value.query_value(format),
            Field::Absent | Field::Null => Value::Absent,
        }
    }

    fn is_zero(&self) -> bool {
        match self {
            Field::Present(value) => value.is_zero(),
            Field::Absent | Field::Null => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Update {
        #[serde(default, skip_serializing_if = "Field::is_absent")]
        memo: Field<String>,
        #[serde(default, skip_serializing_if = "Field::is_absent")]
        spend_limit: Field<i64>,
    }

    #[test]
    fn absent_is_skipped_and_null_is_explicit() {
        let update = Update {
            memo: Field::null(),
            spend_limit: Field::Absent,
        };
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({ "memo": null }));

        let update = Update {
            memo: "groceries".to_string().into(),
            spend_limit: Field::new(0),
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({ "memo": "groceries", "spend_limit": 0 })
        );
    }

    #[test]
    fn deserialize_distinguishes_missing_from_null() {
        let update: Update = serde_json::from_value(json!({ "memo": null })).unwrap();
        assert_eq!(update.memo, Field::Null);
        assert_eq!(update.spend_limit, Field::Absent);

        let update: Update = serde_json::from_value(json!({ "spend_limit": 10 })).unwrap();
        assert_eq!(update.spend_limit, Field::new(10));
    }

    #[test]
    fn only_present_values_are_encoded() {
        assert!(Field::<bool>::Absent.query_value(Format::Default).is_absent());
        assert!(Field::<bool>::Null.query_value(Format::Default).is_absent());
        assert_eq!(
            Field::new(false).query_value(Format::Default),
            Value::scalar("false")
        );
        assert_eq!(
            Field::new(String::new()).query_value(Format::Default),
            Value::scalar("")
        );
    }
}
