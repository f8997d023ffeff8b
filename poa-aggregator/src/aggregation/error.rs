use crate::services::UpstreamError;
use service_core::error::AppError;
use thiserror::Error;

/// Failure of a single-record aggregation. Only the detail lookup can fail a
/// record; every other lookup degrades to a gap in the result.
#[derive(Debug, Error)]
pub enum AggregationError {
    #[error("Power of attorney {id} is unavailable: {source}")]
    DetailUnavailable {
        id: String,
        #[source]
        source: UpstreamError,
    },
}

impl AggregationError {
    pub fn is_not_found(&self) -> bool {
        match self {
            AggregationError::DetailUnavailable { source, .. } => source.is_not_found(),
        }
    }
}

impl From<AggregationError> for AppError {
    fn from(err: AggregationError) -> Self {
        if err.is_not_found() {
            AppError::NotFound(anyhow::Error::new(err))
        } else {
            AppError::InternalError(anyhow::Error::new(err))
        }
    }
}
