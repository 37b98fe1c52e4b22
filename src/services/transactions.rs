// Copyright (c) 2023 Lithic (lithic.com)
// This file is part of the Lithic Rust client.

// This program is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
// You should have received a copy of the GNU General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.

use crate::client::{Client, RequestOptions};
use crate::error::Result;
use crate::pagination::Page;
use crate::query::{self, QueryPairs};
use crate::requests::{
    TransactionListParams, TransactionSimulateAuthorizationAdviceParams,
    TransactionSimulateAuthorizationParams, TransactionSimulateClearingParams,
    TransactionSimulateCreditAuthorizationParams, TransactionSimulateReturnParams,
    TransactionSimulateReturnReversalParams, TransactionSimulateVoidParams,
};
use crate::responses::{SimulatedTransaction, SimulationResponse, Transaction};
use tracing::{event, Level};

/// Operations on transactions, including sandbox simulations.
#[derive(Clone, Debug)]
pub struct TransactionService {
    client: Client,
    options: RequestOptions,
}

impl TransactionService {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            options: RequestOptions::default(),
        }
    }

    pub fn with_options(&self, options: &RequestOptions) -> Self {
        Self {
            client: self.client.clone(),
            options: self.options.merge(options),
        }
    }

    pub async fn get(&self, transaction_token: &str) -> Result<Transaction> {
        self.client
            .get(
                &format!("transactions/{}", transaction_token),
                &QueryPairs::new(),
                &self.options,
            )
            .await
    }

    pub async fn list(&self, params: &TransactionListParams) -> Result<Page<Transaction>> {
        Page::fetch(
            self.client.clone(),
            "transactions".to_string(),
            query::marshal(params),
            self.options.clone(),
        )
        .await
    }

    /// Simulate an authorization request from the payment network as if it came from a
    /// merchant acquirer.
    ///
    /// Programs configured for ASA need their ASA endpoint set up to answer simulated requests.
    /// Otherwise a default daily limit of $5000 USD applies.
    pub async fn simulate_authorization(
        &self,
        params: &TransactionSimulateAuthorizationParams,
    ) -> Result<SimulatedTransaction> {
        self.simulate("simulate/authorize", params).await
    }

    /// Simulate an authorization advice request, which changes the amount of a transaction.
    pub async fn simulate_authorization_advice(
        &self,
        params: &TransactionSimulateAuthorizationAdviceParams,
    ) -> Result<SimulatedTransaction> {
        self.simulate("simulate/authorization_advice", params).await
    }

    /// Clear an existing authorization, after which the transaction is no longer pending.
    pub async fn simulate_clearing(
        &self,
        params: &TransactionSimulateClearingParams,
    ) -> Result<SimulationResponse> {
        self.simulate("simulate/clearing", params).await
    }

    /// Simulate a credit authorization advice message from the payment network.
    pub async fn simulate_credit_authorization(
        &self,
        params: &TransactionSimulateCreditAuthorizationParams,
    ) -> Result<SimulatedTransaction> {
        self.simulate("simulate/credit_authorization_advice", params)
            .await
    }

    /// Return (refund) an amount back to a card.
    pub async fn simulate_return(
        &self,
        params: &TransactionSimulateReturnParams,
    ) -> Result<SimulatedTransaction> {
        self.simulate("simulate/return", params).await
    }

    /// Void a settled credit transaction.
    pub async fn simulate_return_reversal(
        &self,
        params: &TransactionSimulateReturnReversalParams,
    ) -> Result<SimulationResponse> {
        self.simulate("simulate/return_reversal", params).await
    }

    /// Void a pending authorization. Partially completed transactions cannot be voided.
    pub async fn simulate_void(
        &self,
        params: &TransactionSimulateVoidParams,
    ) -> Result<SimulationResponse> {
        self.simulate("simulate/void", params).await
    }

    async fn simulate<B, T>(&self, path: &str, params: &B) -> Result<T>
    where
        B: serde::Serialize,
        T: serde::de::DeserializeOwned,
    {
        // Bodies carry card numbers, so only the endpoint is logged.
        event!(Level::DEBUG, "running simulation {}", path);
        self.client.post(path, params, &self.options).await
    }
}
