//! Client for the downstream power of attorney lookup services.
//!
//! The aggregation engine only depends on the [`PowerOfAttorneyClient`] trait;
//! [`HttpPowerOfAttorneyClient`] is the production implementation over one
//! shared, pooled `reqwest` client.

use crate::config::UpstreamConfig;
use crate::models::{Account, CreditCard, DebitCard, PowerOfAttorney, PowerOfAttorneyReference};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use service_core::observability::TracedClientExt;
use thiserror::Error;

/// Failure of a single downstream lookup.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("{resource} returned status {status}")]
    Status {
        resource: String,
        status: StatusCode,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode {resource}: {source}")]
    Decode {
        resource: String,
        #[source]
        source: serde_json::Error,
    },
}

impl UpstreamError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, UpstreamError::NotFound { .. })
    }
}

/// Lookups the aggregation engine fans out over.
///
/// Implementations are shared by every concurrently running lookup and must
/// not hold mutable state.
#[async_trait]
pub trait PowerOfAttorneyClient: Send + Sync {
    async fn list_power_of_attorneys(&self) -> Result<Vec<PowerOfAttorneyReference>, UpstreamError>;

    async fn power_of_attorney_detail(&self, id: &str) -> Result<PowerOfAttorney, UpstreamError>;

    async fn account_detail(&self, account_key: &str) -> Result<Account, UpstreamError>;

    async fn credit_card_detail(&self, id: &str) -> Result<CreditCard, UpstreamError>;

    async fn debit_card_detail(&self, id: &str) -> Result<DebitCard, UpstreamError>;
}

/// HTTP implementation of [`PowerOfAttorneyClient`].
#[derive(Clone)]
pub struct HttpPowerOfAttorneyClient {
    client: Client,
    base_url: String,
}

impl HttpPowerOfAttorneyClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, collection: &str, id: Option<&str>) -> String {
        match id {
            Some(id) => format!(
                "{}/{}/{}",
                self.base_url,
                collection,
                urlencoding::encode(id)
            ),
            None => format!("{}/{}", self.base_url, collection),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: Option<&str>,
    ) -> Result<T, UpstreamError> {
        let url = self.url(collection, id);
        let resource = match id {
            Some(id) => format!("{}/{}", collection, id),
            None => collection.to_string(),
        };

        let response = self
            .client
            .traced_get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        tracing::trace!(resource = %resource, status = %status, "Upstream response");

        if status == StatusCode::NOT_FOUND {
            return Err(UpstreamError::NotFound { resource });
        }
        if !status.is_success() {
            return Err(UpstreamError::Status { resource, status });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| UpstreamError::Decode { resource, source })
    }
}

#[async_trait]
impl PowerOfAttorneyClient for HttpPowerOfAttorneyClient {
    async fn list_power_of_attorneys(&self) -> Result<Vec<PowerOfAttorneyReference>, UpstreamError> {
        self.get_json("power-of-attorneys", None).await
    }

    async fn power_of_attorney_detail(&self, id: &str) -> Result<PowerOfAttorney, UpstreamError> {
        self.get_json("power-of-attorneys", Some(id)).await
    }

    async fn account_detail(&self, account_key: &str) -> Result<Account, UpstreamError> {
        self.get_json("accounts", Some(account_key)).await
    }

    async fn credit_card_detail(&self, id: &str) -> Result<CreditCard, UpstreamError> {
        self.get_json("credit-cards", Some(id)).await
    }

    async fn debit_card_detail(&self, id: &str) -> Result<DebitCard, UpstreamError> {
        self.get_json("debit-cards", Some(id)).await
    }
}
