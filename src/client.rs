// Copyright (c) 2023 Lithic (lithic.com)
// This file is part of the Lithic Rust client.

// This program is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
// You should have received a copy of the GNU General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.

use crate::config::ClientConfig;
use crate::error::{
    client_error, ApiError, ClientError, Error, InvalidUrlSnafu, JsonSnafu, Result,
};
use crate::query::QueryPairs;
use crate::services::{CardService, TransactionService};
use futures::future::BoxFuture;
use futures::prelude::*;
use serde::{de::DeserializeOwned, Serialize};
use snafu::ResultExt;
use std::convert::TryFrom;
use std::sync::Arc;
use surf::http::{mime, Method};
use surf::{middleware::Next, Body, Request, RequestBuilder, Response, StatusCode};
use tracing::{event, Level};
use url::Url;

/// Deserialize the body of a response.
///
/// The Content-Type header is used to determine the serialization format. The API only speaks
/// JSON, so anything else is an error.
pub async fn response_body<T: DeserializeOwned>(res: &mut Response) -> surf::Result<T> {
    match res.content_type() {
        Some(content_type) if content_type.essence() == mime::JSON.essence() => {
            res.body_json().await
        }
        Some(content_type) => Err(surf::Error::from_str(
            StatusCode::UnsupportedMediaType,
            format!("unsupported content type {}", content_type),
        )),
        None => Err(surf::Error::from_str(
            StatusCode::UnsupportedMediaType,
            "unspecified content type in response",
        )),
    }
}

/// Turn a response with a non-success status into an error carrying the decoded [ApiError].
///
/// Bodies that are not a JSON error object are kept verbatim as the error message.
pub async fn response_to_result(mut res: Response) -> surf::Result<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let text = res.body_string().await.unwrap_or_default();
    let mut err = match serde_json::from_str::<ApiError>(&text) {
        Ok(err) => err,
        Err(_) => ApiError {
            message: text,
            ..Default::default()
        },
    };
    if err.message.is_empty() {
        err.message = status.canonical_reason().to_string();
    }
    err.status = status.into();
    event!(Level::WARN, "request failed: {}", err);
    Err(client_error(err))
}

/// Client middleware which turns responses with non-success statuses into errors.
///
/// If the status code of the response is a success, the response is passed through unchanged.
/// Otherwise, the body of the response is decoded as an [ApiError] which is lifted into a
/// [surf::Error]. This can then be converted into [Error] using [Error::from_client_error].
///
/// If the request fails without producing a response at all, the [surf::Error] from the failed
/// request is passed through.
pub fn parse_error_body(
    req: Request,
    client: surf::Client,
    next: Next<'_>,
) -> BoxFuture<surf::Result<Response>> {
    Box::pin(
        next.run(req, client)
            .and_then(|res| async { response_to_result(res).await }),
    )
}

/// Client middleware which logs requests and responses.
pub fn trace(
    req: Request,
    client: surf::Client,
    next: Next<'_>,
) -> BoxFuture<surf::Result<Response>> {
    Box::pin(async move {
        event!(
            Level::DEBUG,
            "--> sending request {{method: {}, url: {}}}",
            req.method(),
            req.url(),
        );
        let res = next.run(req, client).await;
        match &res {
            Ok(res) => event!(
                Level::DEBUG,
                "<-- received response {{status: {}, content-type: {:?}}}",
                res.status(),
                res.content_type(),
            ),
            Err(err) => event!(Level::DEBUG, "<-- request failed {{error: {}}}", err),
        }
        res
    })
}

/// Extra headers and query parameters applied to every request made through a service.
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
    pub headers: Vec<(String, String)>,
    pub query: QueryPairs,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.add(key, value);
        self
    }

    /// Options from `self` followed by those from `other`.
    pub fn merge(&self, other: &RequestOptions) -> RequestOptions {
        let mut merged = self.clone();
        merged.headers.extend(other.headers.iter().cloned());
        merged.query.extend(other.query.iter());
        merged
    }
}

/// An authenticated connection to the API.
///
/// Cloning is cheap; clones share the underlying HTTP client and configuration.
#[derive(Clone, Debug)]
pub struct Client {
    http: surf::Client,
    base_url: Url,
    config: Arc<ClientConfig>,
}

impl Client {
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let base_url = config.resolved_base_url()?;
        let http = surf::Client::try_from(surf::Config::new().set_timeout(config.timeout))
            .map_err(|err| Error::Config {
                message: err.to_string(),
            })?
            .with(trace)
            .with(parse_error_body);
        Ok(Self {
            http,
            base_url,
            config: Arc::new(config),
        })
    }

    /// Build a client from `LITHIC_API_KEY` and related variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn cards(&self) -> CardService {
        CardService::new(self.clone())
    }

    pub fn transactions(&self) -> TransactionService {
        TransactionService::new(self.clone())
    }

    /// Resolve `path` against the base URL and append the query parameters.
    ///
    /// This is where pairs produced by the query encoder are percent-encoded.
    pub fn url_for(&self, path: &str, query: &QueryPairs, options: &RequestOptions) -> Result<Url> {
        let mut url = self.base_url.join(path).context(InvalidUrlSnafu)?;
        if !query.is_empty() || !options.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().chain(options.query.iter()));
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url, options: &RequestOptions) -> RequestBuilder {
        let mut req = RequestBuilder::new(method, url)
            .header("Authorization", self.config.api_key.as_str())
            .header("Accept", "application/json");
        for (name, value) in self.config.default_headers.iter().chain(&options.headers) {
            req = req.header(name.as_str(), value.as_str());
        }
        req
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T> {
        let mut res = self.http.send(req).await.context(ClientError)?;
        response_body(&mut res).await.context(ClientError)
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &QueryPairs,
        options: &RequestOptions,
    ) -> Result<T> {
        let url = self.url_for(path, query, options)?;
        self.send(self.request(Method::Get, url, options)).await
    }

    /// GET a resource whose body is not JSON.
    pub(crate) async fn get_text(
        &self,
        path: &str,
        query: &QueryPairs,
        options: &RequestOptions,
    ) -> Result<String> {
        let url = self.url_for(path, query, options)?;
        let mut res = self
            .http
            .send(self.request(Method::Get, url, options))
            .await
            .context(ClientError)?;
        res.body_string().await.context(ClientError)
    }

    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<T> {
        let url = self.url_for(path, &QueryPairs::new(), options)?;
        let body = serde_json::to_string(body).context(JsonSnafu)?;
        let req = self
            .request(method, url, options)
            .body(Body::from_string(body))
            .content_type(mime::JSON);
        self.send(req).await
    }

    pub(crate) async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<T> {
        self.send_json(Method::Post, path, body, options).await
    }

    pub(crate) async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<T> {
        self.send_json(Method::Patch, path, body, options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> Client {
        Client::new(
            ClientConfig::new("test-key")
                .base_url("http://localhost:4010/v1")
                .unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn url_for_percent_encodes_query_pairs() {
        let query: QueryPairs = [("account_token", "abc"), ("filter[state]", "OPEN,PAUSED")]
            .into_iter()
            .collect();
        let options = RequestOptions::new().query_param("debug", "true");
        let url = client().url_for("cards", &query, &options).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:4010/v1/cards?account_token=abc&filter%5Bstate%5D=OPEN%2CPAUSED&debug=true"
        );
    }

    #[test]
    fn url_for_without_query_has_no_question_mark() {
        let url = client()
            .url_for("transactions/txn_1", &QueryPairs::new(), &RequestOptions::new())
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:4010/v1/transactions/txn_1");
    }

    #[test]
    fn merge_keeps_both_sets_of_options() {
        let base = RequestOptions::new().header("X-A", "1").query_param("a", "1");
        let extra = RequestOptions::new().header("X-B", "2").query_param("a", "2");
        let merged = base.merge(&extra);
        assert_eq!(merged.headers.len(), 2);
        assert_eq!(merged.query.get_all("a").collect::<Vec<_>>(), vec!["1", "2"]);
    }

    #[test]
    fn services_do_not_print_api_key() {
        let out = format!("{:?}", client().cards());
        assert!(out.contains("ClientConfig"));
        assert!(!out.contains("test-key"));
    }

    #[test]
    fn empty_api_key_is_a_config_error() {
        assert!(matches!(
            Client::new(ClientConfig::new("")),
            Err(Error::Config { .. })
        ));
    }
}
