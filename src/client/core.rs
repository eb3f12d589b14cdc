use crate::auth::AuthStrategy;
use crate::config::ClientConfig;
use crate::session::{LoginNavigator, Session};
use crate::transport::{HttpTransport, MultipartPayload, RequestBody};
use crate::types::Acknowledgement;
use crate::{ApiError, Error, ErrorContext, Result};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use super::policy::RetryPolicy;
use super::query::to_query_pairs;

/// Client for the healthcare backend.
///
/// Cheap to clone; clones share the transport, the session and the refresh gate.
#[derive(Clone)]
pub struct ApiClient {
    pub(crate) config: Arc<ClientConfig>,
    pub(crate) transport: Arc<HttpTransport>,
    pub(crate) session: Arc<Session>,
    pub(crate) policy: RetryPolicy,
    pub(crate) navigator: Arc<dyn LoginNavigator>,
    pub(crate) strategies: Arc<Vec<Arc<dyn AuthStrategy>>>,
}

/// Successful result of one logical call.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// 204, or a success with an empty body.
    NoContent,
    Json(serde_json::Value),
}

impl ApiResponse {
    pub fn is_no_content(&self) -> bool {
        matches!(self, ApiResponse::NoContent)
    }

    /// The JSON body, `Value::Null` for no content.
    pub fn into_json(self) -> serde_json::Value {
        match self {
            ApiResponse::NoContent => serde_json::Value::Null,
            ApiResponse::Json(v) => v,
        }
    }

    /// Deserialize the body. Bodies that do not match `T` are reported as
    /// `UnknownError` carrying the raw JSON.
    pub fn decode<T: DeserializeOwned>(self) -> std::result::Result<T, ApiError> {
        let value = self.into_json();
        serde_json::from_value(value.clone()).map_err(|e| {
            ApiError::new(
                crate::ApiErrorKind::UnknownError,
                format!("Failed to decode response: {}", e),
            )
            .with_details(value)
        })
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.base_url)
            .field("store", &self.session.store_name())
            .field("authenticated", &self.session.is_authenticated())
            .finish()
    }
}

impl ApiClient {
    /// Client with configuration from the environment and an in-memory session.
    pub fn new() -> Result<Self> {
        super::builder::ApiClientBuilder::new().build()
    }

    pub fn builder() -> super::builder::ApiClientBuilder {
        super::builder::ApiClientBuilder::new()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    // Generic verbs. Resource handles are built on these; they are public so
    // callers can reach endpoints the typed surface does not cover yet.

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        self.call(endpoint, Method::GET, &[], RequestBody::Empty).await
    }

    pub async fn get_with<Q, T>(&self, endpoint: &str, params: &Q) -> Result<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let query = to_query_pairs(params)?;
        self.call(endpoint, Method::GET, &query, RequestBody::Empty)
            .await
    }

    pub async fn post<B, T>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.call(endpoint, Method::POST, &[], RequestBody::json(body)?)
            .await
    }

    pub async fn put<B, T>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.call(endpoint, Method::PUT, &[], RequestBody::json(body)?)
            .await
    }

    pub async fn patch<B, T>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.call(endpoint, Method::PATCH, &[], RequestBody::json(body)?)
            .await
    }

    pub async fn delete(&self, endpoint: &str) -> Result<()> {
        self.execute(endpoint, Method::DELETE, RequestBody::Empty)
            .await
            .map(|_| ())
    }

    /// POST with no payload.
    pub(crate) async fn post_action(&self, endpoint: &str) -> Result<ApiResponse> {
        self.execute(endpoint, Method::POST, RequestBody::Empty).await
    }

    /// POST to an action endpoint (`mark_read/`, `cancel/`). Any object body
    /// or no content counts as an acknowledgement.
    pub(crate) async fn post_ack(&self, endpoint: &str) -> Result<Acknowledgement> {
        match self.post_action(endpoint).await? {
            ApiResponse::NoContent => Ok(Acknowledgement::default()),
            body => body.decode().map_err(Error::from),
        }
    }

    pub(crate) async fn upload<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        payload: MultipartPayload,
    ) -> Result<T> {
        self.call(endpoint, Method::POST, &[], RequestBody::Multipart(payload))
            .await
    }

    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        method: Method,
        query: &[(String, String)],
        body: RequestBody,
    ) -> Result<T> {
        let response = self.execute_with_query(endpoint, method, query, body).await?;
        response.decode().map_err(|e| {
            Error::Api(e.with_context(
                ErrorContext::new()
                    .with_endpoint(endpoint)
                    .with_source("decode"),
            ))
        })
    }
}
