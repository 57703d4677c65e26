//! Start-up, shutdown and observability of the Local API.

pub mod local_api;
pub mod seed;
pub mod tracing;

pub use local_api::*;
pub use tracing::setup_tracing;
