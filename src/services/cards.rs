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
    CardEmbedParams, CardListParams, CardNewParams, CardProvisionParams, CardReissueParams,
    CardUpdateParams,
};
use crate::responses::{Card, CardProvisionResponse};
use tracing::{event, Level};
use url::Url;

/// Operations on cards.
#[derive(Clone, Debug)]
pub struct CardService {
    client: Client,
    options: RequestOptions,
}

impl CardService {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            options: RequestOptions::default(),
        }
    }

    /// A copy of this service which applies `options` to every request, after its own.
    pub fn with_options(&self, options: &RequestOptions) -> Self {
        Self {
            client: self.client.clone(),
            options: self.options.merge(options),
        }
    }

    /// Create a new virtual or physical card.
    pub async fn create(&self, params: &CardNewParams) -> Result<Card> {
        event!(Level::DEBUG, "creating {:?} card", params.card_type);
        self.client.post("cards", params, &self.options).await
    }

    pub async fn get(&self, card_token: &str) -> Result<Card> {
        self.client
            .get(&format!("cards/{}", card_token), &QueryPairs::new(), &self.options)
            .await
    }

    /// Update the specified properties of a card. Absent properties are left unchanged.
    pub async fn update(&self, card_token: &str, params: &CardUpdateParams) -> Result<Card> {
        self.client
            .patch(&format!("cards/{}", card_token), params, &self.options)
            .await
    }

    pub async fn list(&self, params: &CardListParams) -> Result<Page<Card>> {
        Page::fetch(
            self.client.clone(),
            "cards".to_string(),
            query::marshal(params),
            self.options.clone(),
        )
        .await
    }

    /// The HTML document for a hosted card embed, with sensitive card data.
    pub async fn embed(&self, params: &CardEmbedParams) -> Result<String> {
        self.client
            .get_text("embed/card", &query::marshal(params), &self.options)
            .await
    }

    /// The URL of a hosted card embed, for use as an iframe source.
    pub fn embed_url(&self, params: &CardEmbedParams) -> Result<Url> {
        self.client
            .url_for("embed/card", &query::marshal(params), &self.options)
    }

    /// Provision a card into a digital wallet.
    pub async fn provision(
        &self,
        card_token: &str,
        params: &CardProvisionParams,
    ) -> Result<CardProvisionResponse> {
        self.client
            .post(&format!("cards/{}/provision", card_token), params, &self.options)
            .await
    }

    /// Reissue a physical card with a new PAN.
    pub async fn reissue(&self, card_token: &str, params: &CardReissueParams) -> Result<Card> {
        self.client
            .post(&format!("cards/{}/reissue", card_token), params, &self.options)
            .await
    }
}
