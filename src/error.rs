use crate::error_kind::ApiErrorKind;
use std::collections::BTreeMap;
use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field path or configuration key that caused the error (e.g., "base_url")
    pub field_path: Option<String>,
    /// Endpoint path the request was sent to (e.g., "/appointments/")
    pub endpoint: Option<String>,
    /// Client-generated correlation id sent as `X-Request-Id`
    pub request_id: Option<String>,
    /// Additional free-form context
    pub details: Option<String>,
    /// Source of the error (e.g., "executor", "refresh", "keyring_store")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Normalized failure of one logical API call.
///
/// `Clone` so that a single refresh outcome can be handed to every queued caller.
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}{}", format_context(.context))]
pub struct ApiError {
    pub kind: ApiErrorKind,
    /// HTTP status, absent for network failures.
    pub status: Option<u16>,
    pub message: String,
    /// Parsed JSON error body, when the backend sent one.
    pub details: Option<serde_json::Value>,
    pub context: ErrorContext,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            message: message.into(),
            details: None,
            context: ErrorContext::new(),
        }
    }

    /// Build an error from a non-success response.
    ///
    /// A body that is not valid JSON degrades to the generic
    /// `HTTP error! status: N` message instead of a secondary parse error.
    pub fn from_response(status: u16, body: &str) -> Self {
        let details: Option<serde_json::Value> = serde_json::from_str(body).ok();
        let message = details
            .as_ref()
            .and_then(message_from_body)
            .unwrap_or_else(|| format!("HTTP error! status: {}", status));
        Self {
            kind: ApiErrorKind::from_http_status(status),
            status: Some(status),
            message,
            details,
            context: ErrorContext::new(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::NetworkError, message)
    }

    pub fn authentication_required(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::AuthenticationRequired, message)
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = context;
        self
    }

    /// Field-level validation messages from a DRF-style body
    /// (`{"email": ["already taken"], "non_field_errors": [...]}`).
    pub fn field_errors(&self) -> BTreeMap<String, Vec<String>> {
        let mut out = BTreeMap::new();
        let Some(serde_json::Value::Object(map)) = &self.details else {
            return out;
        };
        for (field, value) in map {
            let messages: Vec<String> = match value {
                serde_json::Value::String(s) => vec![s.clone()],
                serde_json::Value::Array(items) => items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect(),
                _ => Vec::new(),
            };
            if !messages.is_empty() {
                out.insert(field.clone(), messages);
            }
        }
        out
    }
}

fn message_from_body(body: &serde_json::Value) -> Option<String> {
    ["detail", "error", "message"]
        .iter()
        .find_map(|key| body.get(*key).and_then(|v| v.as_str()))
        .map(str::to_string)
}

/// Unified error type for the client library.
#[derive(Debug, Error)]
pub enum Error {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Credential storage error: {message}{}", format_context(.context))]
    Storage {
        message: String,
        context: ErrorContext,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref endpoint) = ctx.endpoint {
        parts.push(format!("endpoint: {}", endpoint));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::configuration_with_context(msg, ErrorContext::new())
    }

    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    pub fn storage_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Storage {
            message: msg.into(),
            context,
        }
    }

    /// The API error, if this failure came from a backend call.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(e) => Some(e),
            _ => None,
        }
    }

    pub fn api_kind(&self) -> Option<ApiErrorKind> {
        self.as_api().map(|e| e.kind)
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Api(e) => Some(&e.context),
            Error::Configuration { context, .. } | Error::Storage { context, .. } => Some(context),
            Error::Serialization(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_response_prefers_detail() {
        let err = ApiError::from_response(403, r#"{"detail":"Not allowed","error":"x"}"#);
        assert_eq!(err.kind, ApiErrorKind::AccessDenied);
        assert_eq!(err.status, Some(403));
        assert_eq!(err.message, "Not allowed");
        assert!(err.details.is_some());
    }

    #[test]
    fn test_from_response_falls_back_to_error_key() {
        let err = ApiError::from_response(404, r#"{"error":"No feedback found for this appointment"}"#);
        assert_eq!(err.kind, ApiErrorKind::NotFound);
        assert_eq!(err.message, "No feedback found for this appointment");
    }

    #[test]
    fn test_malformed_body_degrades_to_generic_message() {
        let err = ApiError::from_response(502, "<html>Bad Gateway</html>");
        assert_eq!(err.kind, ApiErrorKind::ServerError);
        assert_eq!(err.message, "HTTP error! status: 502");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_field_errors() {
        let err = ApiError::from_response(
            400,
            &json!({
                "email": ["user with this email already exists."],
                "password": "too short",
                "non_field_errors": ["Passwords don't match"],
                "count": 3
            })
            .to_string(),
        );
        assert_eq!(err.kind, ApiErrorKind::ValidationFailed);
        assert_eq!(err.message, "HTTP error! status: 400");
        let fields = err.field_errors();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields["password"], vec!["too short".to_string()]);
        assert_eq!(
            fields["non_field_errors"],
            vec!["Passwords don't match".to_string()]
        );
    }

    #[test]
    fn test_display_includes_context() {
        let err = ApiError::network("connection refused").with_context(
            ErrorContext::new()
                .with_endpoint("/users/me/")
                .with_source("executor"),
        );
        let text = Error::from(err).to_string();
        assert!(text.contains("network_error: connection refused"));
        assert!(text.contains("endpoint: /users/me/"));
        assert!(text.contains("source: executor"));
    }
}
