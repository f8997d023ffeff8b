pub mod aggregation;
pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

use aggregation::Aggregator;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Aggregator,
}

impl AppState {
    pub fn new(aggregator: Aggregator) -> Self {
        Self { aggregator }
    }
}
