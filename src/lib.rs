//! # physio-client
//!
//! Async client for the physiotherapy platform's REST backend: the API-access
//! layer behind patient and physiotherapist dashboards, booking, exercise
//! tracking, the book library and user management.
//!
//! ## Overview
//!
//! Every call goes through one executor that
//!
//! - attaches `Authorization: Token <access>` from the injected [`Session`],
//! - on a 401 refreshes the access token once, with concurrent 401s sharing a
//!   single in-flight refresh,
//! - retries calls that got no response at all with linear backoff,
//! - normalizes failures into an [`ApiError`] with an [`ApiErrorKind`].
//!
//! Typed handles (`client.appointments()`, `client.books()`, ...) sit on top.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use physio_client::auth::LoginCredentials;
//! use physio_client::{ApiClientBuilder, ApiErrorKind};
//!
//! #[tokio::main]
//! async fn main() -> physio_client::Result<()> {
//!     let client = ApiClientBuilder::new()
//!         .base_url("http://localhost:12000/api")
//!         .build()?;
//!
//!     client
//!         .login(&LoginCredentials::with_username("pat", "secret"))
//!         .await?;
//!
//!     match client.appointments().upcoming().await {
//!         Ok(list) => println!("{} upcoming", list.total()),
//!         Err(e) if e.api_kind() == Some(ApiErrorKind::AuthenticationRequired) => {
//!             println!("please log in again");
//!         }
//!         Err(e) => return Err(e),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | [`ApiClient`], builder, request executor |
//! | [`session`] | token pair, credential stores, refresh coordinator, login hook |
//! | [`auth`] | ordered login strategies, logout, registration |
//! | [`resources`] | typed handles per backend resource group |
//! | [`types`] | request and response models |
//! | [`transport`] | single-attempt HTTP |
//! | [`config`] | env and YAML configuration |

pub mod auth;
pub mod client;
pub mod config;
pub mod error_kind;
pub mod resources;
pub mod session;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use client::{ApiClient, ApiClientBuilder, ApiResponse};
pub use config::{ClientConfig, RetryConfig};
pub use error_kind::ApiErrorKind;
pub use session::{
    CredentialStore, Credentials, LoginNavigator, LoginReason, RefreshCoordinator, Session,
};
pub use transport::{MultipartPayload, RequestBody};
pub use types::{Id, ListResponse};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{ApiError, Error, ErrorContext};
