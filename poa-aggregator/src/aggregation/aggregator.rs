use super::{gather_successful, spawn_isolated, AggregationError, FanOut};
use crate::models::{Card, CardReference, CardType, PowerOfAttorney};
use crate::services::{PowerOfAttorneyClient, UpstreamError};
use chrono::NaiveDate;
use std::future::Future;
use std::sync::Arc;

/// Builds denormalized power of attorney records from the downstream lookups.
///
/// Cheap to clone; clones share the client.
#[derive(Clone)]
pub struct Aggregator {
    client: Arc<dyn PowerOfAttorneyClient>,
    today: fn() -> NaiveDate,
}

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

impl Aggregator {
    pub fn new(client: Arc<dyn PowerOfAttorneyClient>) -> Self {
        Self {
            client,
            today: local_today,
        }
    }

    /// Overrides the date accounts are checked against.
    pub fn with_today(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Aggregates every listed power of attorney concurrently.
    ///
    /// Records whose detail lookup fails are left out. Returns `None` only
    /// when the listing itself fails.
    pub async fn aggregate_all(&self) -> Option<Vec<PowerOfAttorney>> {
        let client = Arc::clone(&self.client);
        let references = spawn_isolated("references", "all".to_string(), async move {
            client.list_power_of_attorneys().await
        })
        .await?;

        tracing::debug!(count = references.len(), "Aggregating powers of attorney");

        let aggregated = gather_successful(references, |reference| {
            let aggregator = self.clone();
            spawn_isolated("detail", reference.id.clone(), async move {
                aggregator.aggregate_one(&reference.id).await
            })
        })
        .await;

        Some(aggregated)
    }

    /// Aggregates a single power of attorney.
    ///
    /// Fails only when the detail lookup fails. Account and card lookups that
    /// fail leave the corresponding part out of the record.
    pub async fn aggregate_one(&self, id: &str) -> Result<PowerOfAttorney, AggregationError> {
        let detail = self
            .client
            .power_of_attorney_detail(id)
            .await
            .map_err(|source| AggregationError::DetailUnavailable {
                id: id.to_string(),
                source,
            })?;

        Ok(self.resolve(detail).await)
    }

    async fn resolve(&self, detail: PowerOfAttorney) -> PowerOfAttorney {
        // All three branches are in flight before any is awaited.
        let account = {
            let client = Arc::clone(&self.client);
            let key = detail.account_key().to_string();
            spawn_isolated("account", key.clone(), async move {
                client.account_detail(&key).await
            })
        };
        let credit_cards = detail.card_references().map(|references| {
            self.launch_cards(references, CardType::CreditCard, |client, id| async move {
                client.credit_card_detail(&id).await
            })
        });
        let debit_cards = detail.card_references().map(|references| {
            self.launch_cards(references, CardType::DebitCard, |client, id| async move {
                client.debit_card_detail(&id).await
            })
        });

        tracing::trace!(
            id = %detail.id,
            credit_lookups = ?credit_cards.as_ref().map(FanOut::len),
            debit_lookups = ?debit_cards.as_ref().map(FanOut::len),
            "Card lookups launched"
        );

        let today = (self.today)();
        let account_details = account.await.filter(|account| account.is_open_on(today));
        let credit_cards = match credit_cards {
            Some(fan_out) => Some(active_only(fan_out.successful().await)),
            None => None,
        };
        let debit_cards = match debit_cards {
            Some(fan_out) => Some(active_only(fan_out.successful().await)),
            None => None,
        };

        tracing::debug!(
            id = %detail.id,
            credit_cards = ?credit_cards.as_ref().map(Vec::len),
            debit_cards = ?debit_cards.as_ref().map(Vec::len),
            account = account_details.is_some(),
            "Resolved power of attorney"
        );

        detail.resolve(credit_cards, debit_cards, account_details)
    }

    fn launch_cards<C, F, Fut>(
        &self,
        references: &[CardReference],
        card_type: CardType,
        lookup: F,
    ) -> FanOut<C>
    where
        C: Send + 'static,
        F: Fn(Arc<dyn PowerOfAttorneyClient>, String) -> Fut,
        Fut: Future<Output = Result<C, UpstreamError>> + Send + 'static,
    {
        let branch = match card_type {
            CardType::CreditCard => "credit_card",
            CardType::DebitCard => "debit_card",
        };

        FanOut::launch(
            references
                .iter()
                .filter(|reference| reference.card_type == card_type),
            |reference| {
                spawn_isolated(
                    branch,
                    reference.id.clone(),
                    lookup(Arc::clone(&self.client), reference.id.clone()),
                )
            },
        )
    }
}

fn active_only<C: Card>(cards: Vec<C>) -> Vec<C> {
    cards.into_iter().filter(|card| card.is_active()).collect()
}
