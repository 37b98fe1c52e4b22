// Copyright (c) 2023 Lithic (lithic.com)
// This file is part of the Lithic Rust client.

// This program is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
// You should have received a copy of the GNU General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.

use crate::fields::Field;
use crate::types::display_as_json;
use crate::QueryValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Filter for [TransactionListParams::result].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, QueryValue)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[query(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionResult {
    Approved,
    Declined,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, QueryValue)]
pub struct TransactionListParams {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub account_token: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub card_token: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub result: Field<TransactionResult>,
    /// Only transactions created after this time.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    #[query(format = "date-time")]
    pub begin: Field<DateTime<Utc>>,
    /// Only transactions created before this time.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    #[query(format = "date-time")]
    pub end: Field<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub page: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub page_size: Field<i64>,
}

/// Kind of authorization to simulate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SimulateAuthorizationStatus {
    Authorization,
    BalanceInquiry,
    CreditAuthorization,
    FinancialAuthorization,
    FinancialCreditAuthorization,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSimulateAuthorizationParams {
    /// Amount in the smallest unit of the card's currency.
    pub amount: i64,
    /// Merchant descriptor.
    pub descriptor: String,
    /// Sixteen digit card number.
    pub pan: String,
    /// Merchant category code.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub mcc: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub merchant_acceptor_id: Field<String>,
    /// Amount in the merchant's currency, for cross-currency authorizations.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub merchant_amount: Field<i64>,
    /// ISO 4217 currency of `merchant_amount`.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub merchant_currency: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub partial_approval_capable: Field<bool>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub status: Field<SimulateAuthorizationStatus>,
}

impl TransactionSimulateAuthorizationParams {
    pub fn new(amount: i64, descriptor: impl Into<String>, pan: impl Into<String>) -> Self {
        Self {
            amount,
            descriptor: descriptor.into(),
            pan: pan.into(),
            mcc: Field::Absent,
            merchant_acceptor_id: Field::Absent,
            merchant_amount: Field::Absent,
            merchant_currency: Field::Absent,
            partial_approval_capable: Field::Absent,
            status: Field::Absent,
        }
    }
}

/// Changes the amount of an existing authorization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSimulateAuthorizationAdviceParams {
    pub token: String,
    pub amount: i64,
}

/// Clears an authorization. Without an amount, the full authorized amount is captured.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSimulateClearingParams {
    pub token: String,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub amount: Field<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSimulateCreditAuthorizationParams {
    pub amount: i64,
    pub descriptor: String,
    pub pan: String,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub mcc: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub merchant_acceptor_id: Field<String>,
}

/// Returns an amount to a card. Returns clear immediately.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSimulateReturnParams {
    pub amount: i64,
    pub descriptor: String,
    pub pan: String,
}

/// Voids a settled credit transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSimulateReturnReversalParams {
    pub token: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SimulateVoidType {
    AuthorizationExpiry,
    AuthorizationReversal,
}

/// Voids a pending authorization. Without an amount, the full amount is voided.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSimulateVoidParams {
    pub token: String,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub amount: Field<i64>,
    #[serde(rename = "type", default, skip_serializing_if = "Field::is_absent")]
    pub void_type: Field<SimulateVoidType>,
}

display_as_json!(
    TransactionListParams,
    TransactionSimulateAuthorizationParams,
    TransactionSimulateAuthorizationAdviceParams,
    TransactionSimulateClearingParams,
    TransactionSimulateCreditAuthorizationParams,
    TransactionSimulateReturnParams,
    TransactionSimulateReturnReversalParams,
    TransactionSimulateVoidParams,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{self, ArrayFormat, NestedFormat, QuerySettings};
    use serde_json::json;

    #[test]
    fn result_filter_encodes_as_variant_name() {
        let params = TransactionListParams {
            card_token: Field::new("card_1".into()),
            result: Field::new(TransactionResult::Declined),
            ..Default::default()
        };
        assert_eq!(
            query::marshal(&params).encode(),
            "card_token=card_1&result=DECLINED"
        );
    }

    #[test]
    fn list_params_ignore_settings_without_nesting() {
        let params = TransactionListParams {
            page_size: Field::new(50),
            ..Default::default()
        };
        let settings = QuerySettings::new(NestedFormat::Dots, ArrayFormat::Indices);
        assert_eq!(
            query::marshal_with_settings(&params, settings).encode(),
            "page_size=50"
        );
    }

    #[test]
    fn void_serializes_type_key() {
        let params = TransactionSimulateVoidParams {
            token: "txn_1".into(),
            amount: Field::Absent,
            void_type: Field::new(SimulateVoidType::AuthorizationReversal),
        };
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({ "token": "txn_1", "type": "AUTHORIZATION_REVERSAL" })
        );
    }
}
