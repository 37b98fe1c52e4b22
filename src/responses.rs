// Copyright (c) 2023 Lithic (lithic.com)
// This file is part of the Lithic Rust client.

// This program is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
// You should have received a copy of the GNU General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Response bodies.
//!
//! Enumerations carry an `Unknown` variant so values added to the API later still decode.

use crate::types::SpendLimitDuration;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardState {
    Closed,
    Open,
    Paused,
    PendingActivation,
    PendingFulfillment,
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardKind {
    Virtual,
    Physical,
    MerchantLocked,
    SingleUse,
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundingAccount {
    pub token: String,
    pub created: DateTime<Utc>,
    pub last_four: String,
    #[serde(default)]
    pub account_name: Option<String>,
    pub state: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub nickname: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub token: String,
    #[serde(default)]
    pub account_token: Option<String>,
    #[serde(default)]
    pub card_program_token: Option<String>,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub funding: Option<FundingAccount>,
    pub last_four: String,
    pub spend_limit: i64,
    pub spend_limit_duration: SpendLimitDuration,
    pub state: CardState,
    #[serde(rename = "type")]
    pub kind: CardKind,
    #[serde(default)]
    pub auth_rule_tokens: Vec<String>,
    /// Only returned to PCI compliant programs.
    #[serde(default)]
    pub cvv: Option<String>,
    #[serde(default)]
    pub digital_card_art_token: Option<String>,
    #[serde(default)]
    pub exp_month: Option<String>,
    #[serde(default)]
    pub exp_year: Option<String>,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub memo: Option<String>,
    /// Only returned to PCI compliant programs.
    #[serde(default)]
    pub pan: Option<String>,
    #[serde(default)]
    pub product_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardProvisionResponse {
    /// Payload to hand to the device's digital wallet.
    pub provisioning_payload: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Bounced,
    Declined,
    Expired,
    Pending,
    Settled,
    Settling,
    Voided,
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Merchant {
    #[serde(default)]
    pub acceptor_id: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub descriptor: String,
    #[serde(default)]
    pub mcc: String,
    #[serde(default)]
    pub state: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionEvent {
    pub token: String,
    pub amount: i64,
    pub created: DateTime<Utc>,
    /// Approval or decline reason.
    pub result: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub token: String,
    #[serde(default)]
    pub account_token: Option<String>,
    /// Authorization amount less any reversals, in the card's currency.
    pub amount: i64,
    #[serde(default)]
    pub authorization_amount: i64,
    #[serde(default)]
    pub authorization_code: Option<String>,
    pub card_token: String,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub events: Vec<TransactionEvent>,
    #[serde(default)]
    pub merchant: Merchant,
    #[serde(default)]
    pub network: Option<String>,
    /// Approval or decline reason.
    pub result: String,
    #[serde(default)]
    pub settled_amount: i64,
    pub status: TransactionStatus,
}

/// Result of simulations which create a new transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatedTransaction {
    /// Token of the simulated transaction.
    pub token: String,
    #[serde(default)]
    pub debugging_request_id: Option<String>,
}

/// Result of simulations which act on an existing transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResponse {
    #[serde(default)]
    pub debugging_request_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn card_decodes_with_unknown_state() {
        let card: Card = serde_json::from_value(json!({
            "token": "card_1",
            "created": "2023-01-31T12:00:00Z",
            "last_four": "4242",
            "spend_limit": 1000,
            "spend_limit_duration": "MONTHLY",
            "state": "SOMETHING_NEW",
            "type": "VIRTUAL",
        }))
        .unwrap();
        assert_eq!(card.state, CardState::Unknown);
        assert_eq!(card.kind, CardKind::Virtual);
        assert!(card.auth_rule_tokens.is_empty());
        assert_eq!(card.memo, None);
    }

    #[test]
    fn transaction_decodes_events() {
        let txn: Transaction = serde_json::from_value(json!({
            "token": "txn_1",
            "amount": 500,
            "card_token": "card_1",
            "created": "2023-01-31T12:00:00Z",
            "result": "APPROVED",
            "status": "PENDING",
            "events": [{
                "token": "evt_1",
                "amount": 500,
                "created": "2023-01-31T12:00:00Z",
                "result": "APPROVED",
                "type": "AUTHORIZATION",
            }],
        }))
        .unwrap();
        assert_eq!(txn.status, TransactionStatus::Pending);
        assert_eq!(txn.events[0].kind, "AUTHORIZATION");
        assert_eq!(txn.merchant, Merchant::default());
    }
}
