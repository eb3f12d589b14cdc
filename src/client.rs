//! API client for the physiotherapy backend.
//!
//! Keep the public surface small and predictable. Implementation details are
//! split into submodules under `src/client/`.

pub mod builder;
pub mod core;
pub(crate) mod execution;
mod policy;
pub mod query;

pub use builder::ApiClientBuilder;
pub use core::{ApiClient, ApiResponse};
pub use query::to_query_pairs;
