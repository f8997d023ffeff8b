//! Concurrent aggregation of power of attorney records.
//!
//! Every downstream lookup runs as an [`IsolatedTask`]: a spawned task whose
//! failure is logged and turned into `None`. [`FanOut`] launches one such task
//! per input and keeps the successful results in input order. The
//! [`Aggregator`] builds record and batch aggregation on top of both.

mod aggregator;
mod error;
mod fan_out;
mod isolated;

pub use aggregator::Aggregator;
pub use error::AggregationError;
pub use fan_out::{gather_successful, FanOut};
pub use isolated::{spawn_isolated, IsolatedTask};
