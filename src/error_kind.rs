//! Uniform error kinds produced by the request executor.
//!
//! Every failure that leaves [`ApiClient::execute`](crate::ApiClient::execute)
//! is classified into exactly one [`ApiErrorKind`]. UI code branches on the
//! kind (re-login prompt, "not found" screen, inline field errors) instead of
//! inspecting raw HTTP status codes.
//!
//! | Kind                     | Trigger                                   |
//! |--------------------------|-------------------------------------------|
//! | `AuthenticationRequired` | 401 that could not be resolved by refresh |
//! | `AccessDenied`           | 403                                       |
//! | `NotFound`               | 404                                       |
//! | `ValidationFailed`       | 400 / 422, carries field-level detail     |
//! | `ServerError`            | 5xx                                       |
//! | `NetworkError`           | no HTTP response after all retries        |
//! | `UnknownError`           | anything else                             |
//!
//! ## Example
//!
//! ```rust
//! use physio_client::error_kind::ApiErrorKind;
//!
//! let kind = ApiErrorKind::from_http_status(422);
//! assert_eq!(kind, ApiErrorKind::ValidationFailed);
//! assert_eq!(kind.name(), "validation_failed");
//! assert!(!kind.is_transient());
//! ```

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// Missing, expired or revoked credentials that refresh could not fix.
    AuthenticationRequired,
    /// Authenticated, but the backend refused access to the resource.
    AccessDenied,
    /// Resource or endpoint does not exist.
    NotFound,
    /// Request rejected by backend validation; details hold per-field messages.
    ValidationFailed,
    /// Backend failure (5xx).
    ServerError,
    /// The request never produced an HTTP response.
    NetworkError,
    /// Unclassified failure.
    UnknownError,
}

impl ApiErrorKind {
    /// Stable snake_case name, used in logs.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::AuthenticationRequired => "authentication_required",
            Self::AccessDenied => "access_denied",
            Self::NotFound => "not_found",
            Self::ValidationFailed => "validation_failed",
            Self::ServerError => "server_error",
            Self::NetworkError => "network_error",
            Self::UnknownError => "unknown_error",
        }
    }

    /// Whether the same request might succeed if issued again later.
    #[inline]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::ServerError | Self::NetworkError)
    }

    /// Whether the UI should send the user back to the login view.
    #[inline]
    pub fn requires_login(&self) -> bool {
        matches!(self, Self::AuthenticationRequired)
    }

    /// Maps an HTTP status code to its kind.
    ///
    /// DRF reports serializer errors as 400, other stacks use 422; both carry
    /// field-level detail and map to `ValidationFailed`.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            401 => Self::AuthenticationRequired,
            403 => Self::AccessDenied,
            404 => Self::NotFound,
            400 | 422 => Self::ValidationFailed,
            500..=599 => Self::ServerError,
            _ => Self::UnknownError,
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
