//! service-core: Shared infrastructure for the power-of-attorney services.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;

