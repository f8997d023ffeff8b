pub mod metrics;
pub mod poa_client;

pub use metrics::{get_metrics, init_metrics};
pub use poa_client::{HttpPowerOfAttorneyClient, PowerOfAttorneyClient, UpstreamError};
