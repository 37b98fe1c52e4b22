// Copyright (c) 2023 Lithic (lithic.com)
// This file is part of the Lithic Rust client.

// This program is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
// You should have received a copy of the GNU General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.

use crate::error::{JsonSnafu, Result};
use crate::fields::Field;
use crate::types::{display_as_json, ShippingAddress, SpendLimitDuration};
use crate::QueryValue;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use snafu::ResultExt;

/// Card state on creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardNewState {
    /// Approve authorizations that match card and account parameters.
    Open,
    /// Decline authorizations until resumed.
    Paused,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardType {
    /// Authorizes at any merchant and can be added to a digital wallet.
    Virtual,
    /// Manufactured and sent to the cardholder.
    Physical,
    /// Deprecated. Locked to the first merchant that authorizes the card.
    MerchantLocked,
    /// Deprecated. Closed after the first successful authorization.
    SingleUse,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShippingMethod {
    Standard,
    StandardWithTracking,
    Expedited,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardNewParams {
    #[serde(rename = "type")]
    pub card_type: CardType,
    /// Account the card is associated with. Required for programs enrolling users through the
    /// account holders endpoint.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub account_token: Field<String>,
    /// Card program (BIN range) to issue under, for programs with more than one.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub card_program_token: Field<String>,
    /// Two digit (MM) expiry month. Generated if neither month nor year is given.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub exp_month: Field<String>,
    /// Four digit (yyyy) expiry year.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub exp_year: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub funding_token: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub memo: Field<String>,
    /// Amount in cents. Zero means no limit.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub spend_limit: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub spend_limit_duration: Field<SpendLimitDuration>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub state: Field<CardNewState>,
    /// Encrypted PIN block, base64. Only for physical and virtual cards.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub pin: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub digital_card_art_token: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub product_id: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub shipping_address: Field<ShippingAddress>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub shipping_method: Field<ShippingMethod>,
}

impl CardNewParams {
    pub fn new(card_type: CardType) -> Self {
        Self {
            card_type,
            account_token: Field::Absent,
            card_program_token: Field::Absent,
            exp_month: Field::Absent,
            exp_year: Field::Absent,
            funding_token: Field::Absent,
            memo: Field::Absent,
            spend_limit: Field::Absent,
            spend_limit_duration: Field::Absent,
            state: Field::Absent,
            pin: Field::Absent,
            digital_card_art_token: Field::Absent,
            product_id: Field::Absent,
            shipping_address: Field::Absent,
            shipping_method: Field::Absent,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardUpdateState {
    /// Closing a card cannot be undone.
    Closed,
    Open,
    Paused,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardUpdateParams {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub funding_token: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub memo: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub spend_limit: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub spend_limit_duration: Field<SpendLimitDuration>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub auth_rule_token: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub state: Field<CardUpdateState>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub pin: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub digital_card_art_token: Field<String>,
}

/// Query parameters for listing cards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, QueryValue)]
pub struct CardListParams {
    /// Only cards belonging to this account.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub account_token: Field<String>,
    /// Only cards created after this time.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    #[query(format = "date-time")]
    pub begin: Field<DateTime<Utc>>,
    /// Only cards created before this time.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    #[query(format = "date-time")]
    pub end: Field<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub page: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub page_size: Field<i64>,
}

/// Query parameters for the hosted card embed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, QueryValue)]
pub struct CardEmbedParams {
    /// Base64 encoded JSON of an [EmbedRequestParams], see [EmbedRequestParams::encode].
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub embed_request: Field<String>,
    /// SHA256 HMAC of `embed_request`, base64.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub hmac: Field<String>,
}

/// Which card an embed displays, and how.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedRequestParams {
    /// Card to display.
    pub token: String,
    /// Publicly available stylesheet for the embedded card element.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub css: Field<String>,
    /// When the request expires. Requests without an expiration never expire.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub expiration: Field<DateTime<Utc>>,
    /// Origin of the parent frame, required to receive click events.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub target_origin: Field<String>,
}

impl EmbedRequestParams {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            css: Field::Absent,
            expiration: Field::Absent,
            target_origin: Field::Absent,
        }
    }

    /// The `embed_request` query value: this request as base64 encoded JSON.
    pub fn encode(&self) -> Result<String> {
        let json = serde_json::to_vec(self).context(JsonSnafu)?;
        Ok(STANDARD.encode(json))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DigitalWallet {
    ApplePay,
    GooglePay,
    SamsungPay,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardProvisionParams {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub digital_wallet: Field<DigitalWallet>,
    /// Base64 nonce from the device's wallet. Required for Apple Pay.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub nonce: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub nonce_signature: Field<String>,
    /// Apple's public leaf certificate, base64 PEM without headers or trailers.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub certificate: Field<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardReissueParams {
    /// Defaults to the previous shipping address.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub shipping_address: Field<ShippingAddress>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub shipping_method: Field<ShippingMethod>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub product_id: Field<String>,
}

display_as_json!(
    CardNewParams,
    CardUpdateParams,
    CardListParams,
    CardEmbedParams,
    EmbedRequestParams,
    CardProvisionParams,
    CardReissueParams,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn list_params_encode_present_fields_only() {
        let params = CardListParams {
            account_token: Field::new("abc".into()),
            page: Field::new(2),
            ..Default::default()
        };
        let pairs = query::marshal(&params);
        assert_eq!(
            pairs.iter().collect::<Vec<_>>(),
            vec![("account_token", "abc"), ("page", "2")]
        );
    }

    #[test]
    fn list_params_format_timestamps_as_rfc3339() {
        let params = CardListParams {
            begin: Field::new(Utc.with_ymd_and_hms(2023, 1, 31, 12, 0, 0).unwrap()),
            ..Default::default()
        };
        assert_eq!(query::marshal(&params).encode(), "begin=2023-01-31T12%3A00%3A00Z");
    }

    #[test]
    fn new_params_serialize_type_and_skip_absent() {
        let mut params = CardNewParams::new(CardType::Virtual);
        params.memo = Field::new("travel".into());
        params.shipping_method = Field::new(ShippingMethod::StandardWithTracking);
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({
                "type": "VIRTUAL",
                "memo": "travel",
                "shipping_method": "STANDARD_WITH_TRACKING",
            })
        );
    }

    #[test]
    fn update_params_can_clear_values() {
        let params = CardUpdateParams {
            memo: Field::null(),
            state: Field::new(CardUpdateState::Paused),
            ..Default::default()
        };
        assert_eq!(params.to_string(), r#"{"memo":null,"state":"PAUSED"}"#);
    }

    #[test]
    fn embed_request_encodes_as_base64_json() {
        let encoded = EmbedRequestParams::new("card_1").encode().unwrap();
        let decoded = STANDARD.decode(encoded).unwrap();
        assert_eq!(
            serde_json::from_slice::<serde_json::Value>(&decoded).unwrap(),
            json!({ "token": "card_1" })
        );
    }
}
