use axum::{
    extract::{Path, State},
    Json,
};
use service_core::error::AppError;

use crate::{
    models::{AggregationResponse, PowerOfAttorney},
    AppState,
};

/// Every power of attorney with its accounts and cards. Records that could not
/// be fetched are left out rather than failing the request.
pub async fn list_powers_of_attorney(State(state): State<AppState>) -> Json<AggregationResponse> {
    let powers_of_attorney = state.aggregator.aggregate_all().await;

    tracing::info!(
        count = ?powers_of_attorney.as_ref().map(Vec::len),
        "Aggregated powers of attorney"
    );

    Json(AggregationResponse { powers_of_attorney })
}

/// One power of attorney; 404 when the upstream does not know the id.
pub async fn get_power_of_attorney(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PowerOfAttorney>, AppError> {
    tracing::info!(poa_id = %id, "Aggregating power of attorney");

    let poa = state.aggregator.aggregate_one(&id).await?;

    Ok(Json(poa))
}
