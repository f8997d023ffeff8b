//! Mock upstream and in-process router shared by the integration tests.
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use poa_aggregator::aggregation::Aggregator;
use poa_aggregator::config::UpstreamConfig;
use poa_aggregator::services::HttpPowerOfAttorneyClient;
use poa_aggregator::startup::build_router;
use poa_aggregator::AppState;
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const POA_LIST: &str =
    r#"[ { "id": "giveserror" }, { "id": "isnotfound" }, { "id": "single" }, { "id": "endedAccount" } ]"#;

pub const POA_SINGLE: &str = r#"{
  "id": "single",
  "grantor": "Super duper company",
  "grantee": "Fellowship of the ring",
  "account": "openAccount",
  "direction": "GIVEN",
  "authorizations": [
    "DEBIT_CARD",
    "VIEW",
    "PAYMENT"
  ],
  "cards": [
    { "id": "dddd", "type": "DEBIT_CARD" },
    { "id": "error", "type": "DEBIT_CARD" },
    { "id": "notFound", "type": "DEBIT_CARD" },
    { "id": "cccc", "type": "CREDIT_CARD" },
    { "id": "error", "type": "CREDIT_CARD" },
    { "id": "notFound", "type": "CREDIT_CARD" }
  ]
}"#;

pub const POA_ENDED_ACCOUNT: &str = r#"{
  "id": "endedAccount",
  "grantor": "endedAccount",
  "grantee": "endedAccount",
  "account": "endedAccount",
  "direction": "GIVEN",
  "authorizations": [ ],
  "cards": [
    { "id": "dddd", "type": "DEBIT_CARD" },
    { "id": "2222", "type": "DEBIT_CARD" },
    { "id": "3333", "type": "CREDIT_CARD" }
  ]
}"#;

pub const DEBIT_CARD: &str = "{
\t\"id\": \"dddd\",
\t\"status\": \"ACTIVE\",
\t\"cardNumber\": 6527,
\t\"sequenceNumber\": 1,
\t\"cardHolder\": \"Aragorn\",
\t\"atmLimit\": {
\t\t\"limit\": 100,
\t\t\"periodUnit\": \"PER_DAY\"
\t},
\t\"posLimit\": {
\t\t\"limit\": 10000,
\t\t\"periodUnit\": \"PER_MONTH\"
\t},
\t\"contactless\" : true
}";

pub const CREDIT_CARD: &str = r#"{
	"id": "cccc",
	"status": "ACTIVE",
	"cardNumber": 5075,
	"sequenceNumber": 1,
	"cardHolder": "Boromir",
	"monthlyLimit": 3000
}"#;

pub const OPEN_ACCOUNT: &str = r#"{
  "owner": "Geronima",
  "balance": 0.12,
  "created": "31-10-2003",
  "ended": "01-12-2111"
}"#;

pub const ENDED_ACCOUNT: &str = r#"{
  "owner": "Geronima",
  "balance": 0.12,
  "created": "31-10-0003",
  "ended": "01-12-2001"
}"#;

pub const SINGLE_AGGREGATION: &str = r#"{
  "id": "single",
  "grantor": "Super duper company",
  "grantee": "Fellowship of the ring",
  "account": "openAccount",
  "direction": "GIVEN",
  "authorizations": [
    "DEBIT_CARD",
    "VIEW",
    "PAYMENT"
  ],
  "creditCards": [
    {
      "id": "cccc",
      "cardNumber": 5075,
      "sequenceNumber": 1,
      "cardHolder": "Boromir",
      "monthlyLimit": 3000,
      "status": "ACTIVE"
    }
  ],
  "debitCards": [
    {
      "id": "dddd",
      "cardNumber": 6527,
      "sequenceNumber": 1,
      "cardHolder": "Aragorn",
      "atmLimit": { "limit": 100, "periodUnit": "PER_DAY" },
      "posLimit": { "limit": 10000, "periodUnit": "PER_MONTH" },
      "contactless": true,
      "status": "ACTIVE"
    }
  ],
  "accountDetails": {
    "owner": "Geronima",
    "balance": 0.12,
    "created": "31-10-2003",
    "ended": "01-12-2111"
  }
}"#;

pub const ENDED_ACCOUNT_AGGREGATION: &str = r#"{
  "id": "endedAccount",
  "grantor": "endedAccount",
  "grantee": "endedAccount",
  "account": "endedAccount",
  "direction": "GIVEN",
  "authorizations": [],
  "creditCards": [],
  "debitCards": [
    {
      "id": "dddd",
      "cardNumber": 6527,
      "sequenceNumber": 1,
      "cardHolder": "Aragorn",
      "atmLimit": { "limit": 100, "periodUnit": "PER_DAY" },
      "posLimit": { "limit": 10000, "periodUnit": "PER_MONTH" },
      "contactless": true,
      "status": "ACTIVE"
    }
  ]
}"#;

async fn respond_json(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .mount(server)
        .await;
}

async fn respond_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_string("oops"))
        .mount(server)
        .await;
}

/// Upstream serving the fixture records. Ids ending in `error` answer 500,
/// ids ending in `notFound` answer 404; anything unmatched is a 404 as well.
pub async fn spawn_upstream() -> MockServer {
    let server = MockServer::start().await;

    respond_json(&server, "/power-of-attorneys", POA_LIST).await;
    respond_json(&server, "/power-of-attorneys/single", POA_SINGLE).await;
    respond_json(&server, "/power-of-attorneys/endedAccount", POA_ENDED_ACCOUNT).await;
    respond_json(&server, "/debit-cards/dddd", DEBIT_CARD).await;
    respond_json(&server, "/credit-cards/cccc", CREDIT_CARD).await;
    respond_json(&server, "/accounts/enAccount", OPEN_ACCOUNT).await;
    respond_json(&server, "/accounts/edAccount", ENDED_ACCOUNT).await;

    respond_status(&server, "/power-of-attorneys/giveserror", 500).await;
    respond_status(&server, "/power-of-attorneys/isnotfound", 404).await;
    respond_status(&server, "/debit-cards/error", 500).await;
    respond_status(&server, "/debit-cards/notFound", 404).await;
    respond_status(&server, "/credit-cards/error", 500).await;
    respond_status(&server, "/credit-cards/notFound", 404).await;

    server
}

pub fn router_for(base_url: &str) -> Router {
    let client = HttpPowerOfAttorneyClient::new(&UpstreamConfig::new(base_url))
        .expect("Failed to build upstream client");
    build_router(AppState::new(Aggregator::new(Arc::new(client))))
}

pub async fn get(router: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .expect("Failed to execute request");

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");

    (status, body.to_vec())
}

pub async fn get_json(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, body) = get(router, uri).await;
    let json = serde_json::from_slice(&body).expect("Failed to parse JSON");
    (status, json)
}

pub fn parse(fixture: &str) -> serde_json::Value {
    serde_json::from_str(fixture).expect("Fixture is not valid JSON")
}
