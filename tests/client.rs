// Copyright (c) 2023 Lithic (lithic.com)
// This file is part of the Lithic Rust client.

// This program is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
// You should have received a copy of the GNU General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.

use async_std::task;
use futures::TryStreamExt;
use lithic::fields::Field;
use lithic::requests::{CardListParams, TransactionSimulateAuthorizationParams};
use lithic::responses::{CardKind, CardState};
use lithic::{Client, ClientConfig, Error, RequestOptions};
use serde_json::{json, Value};
use std::net::TcpListener;
use tide::{Body, Request, Response, StatusCode};

const API_KEY: &str = "test-key";

fn json_response(status: StatusCode, body: Value) -> tide::Result {
    Ok(Response::builder(status)
        .body(Body::from_json(&body)?)
        .build())
}

fn card(token: &str, memo: &str) -> Value {
    json!({
        "token": token,
        "created": "2023-03-01T12:00:00Z",
        "last_four": "4242",
        "spend_limit": 1000,
        "spend_limit_duration": "MONTHLY",
        "state": "OPEN",
        "type": "VIRTUAL",
        "memo": memo,
    })
}

fn authorized(req: &Request<()>) -> bool {
    req.header("Authorization").map(|h| h.as_str()) == Some(API_KEY)
}

fn unauthorized() -> tide::Result {
    json_response(
        StatusCode::Unauthorized,
        json!({ "message": "invalid API key", "debug_request_id": "req_401" }),
    )
}

/// Start a mock API and return a client pointed at it.
fn mock_api(api_key: &str) -> Client {
    let mut app = tide::new();

    // Two pages of cards. Each card's memo records the query string of the request for it.
    app.at("/v1/cards").get(|req: Request<()>| async move {
        if !authorized(&req) {
            return unauthorized();
        }
        let query = req.url().query().unwrap_or("").to_string();
        let page = req
            .url()
            .query_pairs()
            .find(|(k, _)| k == "page")
            .and_then(|(_, v)| v.parse::<i64>().ok())
            .unwrap_or(1);
        let data = match page {
            1 => vec![card("card_1", &query), card("card_2", &query)],
            2 => vec![card("card_3", &query)],
            _ => vec![],
        };
        json_response(
            StatusCode::Ok,
            json!({ "data": data, "page": page, "total_entries": 3, "total_pages": 2 }),
        )
    });
    app.at("/v1/cards/:token").get(|req: Request<()>| async move {
        if !authorized(&req) {
            return unauthorized();
        }
        match req.param("token")? {
            "card_1" => json_response(StatusCode::Ok, card("card_1", "")),
            _ => json_response(
                StatusCode::NotFound,
                json!({ "message": "card not found", "debug_request_id": "req_404" }),
            ),
        }
    });
    app.at("/v1/embed/card").get(|req: Request<()>| async move {
        let query = req.url().query().unwrap_or("").to_string();
        Ok(Response::builder(StatusCode::Ok)
            .body(format!("<html>{}</html>", query))
            .content_type(tide::http::mime::HTML)
            .build())
    });
    app.at("/v1/transactions/:token")
        .get(|_req: Request<()>| async move {
            Ok(Response::builder(StatusCode::BadGateway)
                .body("upstream unavailable")
                .content_type(tide::http::mime::PLAIN)
                .build())
        });
    // Echoes the simulated transaction's body back so the test can inspect it.
    app.at("/v1/simulate/authorize")
        .post(|mut req: Request<()>| async move {
            if !authorized(&req) {
                return unauthorized();
            }
            let body: Value = req.body_json().await?;
            json_response(
                StatusCode::Created,
                json!({ "token": "txn_1", "debugging_request_id": body.to_string() }),
            )
        });

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    task::spawn(app.listen(listener));

    Client::new(
        ClientConfig::new(api_key)
            .base_url(&format!("http://127.0.0.1:{}/v1", port))
            .unwrap(),
    )
    .unwrap()
}

#[async_std::test]
async fn test_list_pages_through_results() {
    let client = mock_api(API_KEY);
    let params = CardListParams {
        page_size: Field::new(2),
        ..Default::default()
    };

    let first = client.cards().list(&params).await.unwrap();
    assert_eq!(first.page, 1);
    assert_eq!(first.data.len(), 2);
    assert_eq!(first.data[0].state, CardState::Open);
    assert_eq!(first.data[0].kind, CardKind::Virtual);
    assert_eq!(first.data[0].memo.as_deref(), Some("page_size=2"));
    assert!(first.has_next_page());

    let second = first.next_page().await.unwrap().unwrap();
    assert_eq!(second.page, 2);
    assert_eq!(second.data[0].token, "card_3");
    assert_eq!(second.data[0].memo.as_deref(), Some("page_size=2&page=2"));
    assert!(!second.has_next_page());
    assert!(second.next_page().await.unwrap().is_none());
}

#[async_std::test]
async fn test_stream_visits_every_item() {
    let client = mock_api(API_KEY);
    let page = client
        .cards()
        .list(&CardListParams::default())
        .await
        .unwrap();
    let tokens: Vec<String> = page
        .into_stream()
        .map_ok(|card| card.token)
        .try_collect()
        .await
        .unwrap();
    assert_eq!(tokens, vec!["card_1", "card_2", "card_3"]);
}

#[async_std::test]
async fn test_get_and_api_errors() {
    let client = mock_api(API_KEY);
    let card = client.cards().get("card_1").await.unwrap();
    assert_eq!(card.token, "card_1");
    assert_eq!(card.last_four, "4242");

    match client.cards().get("card_404").await {
        Err(Error::Api { source }) => {
            assert_eq!(source.status, 404);
            assert_eq!(source.message, "card not found");
            assert_eq!(source.debug_request_id.as_deref(), Some("req_404"));
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[async_std::test]
async fn test_error_without_json_body() {
    let client = mock_api(API_KEY);
    let err = client.transactions().get("txn_1").await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::BadGateway));
    match err {
        Error::Api { source } => assert_eq!(source.message, "upstream unavailable"),
        other => panic!("expected API error, got {:?}", other),
    }
}

#[async_std::test]
async fn test_bad_credentials() {
    let client = mock_api("wrong-key");
    let err = client
        .cards()
        .list(&CardListParams::default())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::Unauthorized));
}

#[async_std::test]
async fn test_simulate_authorization_omits_absent_fields() {
    let client = mock_api(API_KEY);
    let mut params =
        TransactionSimulateAuthorizationParams::new(3831, "COFFEE SHOP", "4111111289144142");
    params.merchant_currency = Field::new("USD".into());
    let txn = client
        .transactions()
        .simulate_authorization(&params)
        .await
        .unwrap();
    assert_eq!(txn.token, "txn_1");

    let echoed: Value = serde_json::from_str(&txn.debugging_request_id.unwrap()).unwrap();
    assert_eq!(
        echoed,
        json!({
            "amount": 3831,
            "descriptor": "COFFEE SHOP",
            "pan": "4111111289144142",
            "merchant_currency": "USD",
        })
    );
}

#[async_std::test]
async fn test_options_add_query_params() {
    let client = mock_api(API_KEY);
    let options = RequestOptions::new().query_param("target_origin", "https://example.com");
    let html = client
        .cards()
        .with_options(&options)
        .embed(&lithic::requests::CardEmbedParams {
            embed_request: Field::new("e30=".into()),
            hmac: Field::Absent,
        })
        .await
        .unwrap();
    assert_eq!(
        html,
        "<html>embed_request=e30%3D&target_origin=https%3A%2F%2Fexample.com</html>"
    );
}
