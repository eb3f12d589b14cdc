//! Request execution: network retry, 401 recovery and response normalization.

use crate::error_kind::ApiErrorKind;
use crate::session::{LoginReason, RefreshOutcome};
use crate::transport::{Outgoing, RequestBody};
use crate::{ApiError, Error, ErrorContext, Result};
use reqwest::{Method, StatusCode};
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::core::{ApiClient, ApiResponse};
use super::policy::{AuthDecision, Decision};

pub(crate) const REFRESH_ENDPOINT: &str = "/auth/refresh/";

/// One logical call; shared by every attempt it makes.
struct Call<'a> {
    endpoint: &'a str,
    method: &'a Method,
    query: &'a [(String, String)],
    body: &'a RequestBody,
    request_id: String,
    start: Instant,
}

impl<'a> Call<'a> {
    fn new(
        endpoint: &'a str,
        method: &'a Method,
        query: &'a [(String, String)],
        body: &'a RequestBody,
    ) -> Self {
        Self {
            endpoint,
            method,
            query,
            body,
            request_id: Uuid::new_v4().to_string(),
            start: Instant::now(),
        }
    }

    fn outgoing<'b>(&'b self, access_token: Option<&'b str>) -> Outgoing<'b> {
        Outgoing {
            method: self.method,
            endpoint: self.endpoint,
            query: self.query,
            body: self.body,
            access_token,
            request_id: &self.request_id,
        }
    }

    fn context(&self, source: &str) -> ErrorContext {
        ErrorContext::new()
            .with_endpoint(self.endpoint)
            .with_request_id(self.request_id.clone())
            .with_source(source)
    }

    fn elapsed_ms(&self) -> u128 {
        self.start.elapsed().as_millis()
    }
}

impl ApiClient {
    /// Execute one logical request against `endpoint`.
    ///
    /// Attaches the current access token, recovers from a 401 at most once per
    /// call (refresh or resend with a token someone else refreshed), and retries
    /// network failures with linear backoff.
    pub async fn execute(
        &self,
        endpoint: &str,
        method: Method,
        body: RequestBody,
    ) -> Result<ApiResponse> {
        self.execute_with_query(endpoint, method, &[], body).await
    }

    pub async fn execute_with_query(
        &self,
        endpoint: &str,
        method: Method,
        query: &[(String, String)],
        body: RequestBody,
    ) -> Result<ApiResponse> {
        let call = Call::new(endpoint, &method, query, &body);
        debug!(
            endpoint,
            method = %method,
            request_id = call.request_id.as_str(),
            "request started"
        );

        let mut auth_recovered = false;
        loop {
            // Token before generation: a refresh stores the token, then settles.
            let sent_with = self.session.current_access_token();
            let generation = self.session.refresh_coordinator().generation();
            let resp = self
                .send_with_network_retry(&call, sent_with.as_deref())
                .await?;

            if resp.status() != StatusCode::UNAUTHORIZED {
                return self.read_response(&call, resp).await.map_err(Error::from);
            }

            let current = self.session.current_access_token();
            let decision = self.policy.on_unauthorized(
                auth_recovered,
                sent_with.as_deref(),
                current.as_deref(),
                self.session.refresh_token().is_some(),
            );
            match decision {
                AuthDecision::Resend => {
                    debug!(
                        endpoint,
                        request_id = call.request_id.as_str(),
                        "401 with a superseded token, resending"
                    );
                    auth_recovered = true;
                }
                AuthDecision::Refresh => {
                    debug!(
                        endpoint,
                        request_id = call.request_id.as_str(),
                        "401, refreshing access token"
                    );
                    self.refresh_access_token(generation)
                        .await
                        .map_err(|e| e.with_context(call.context("refresh")))?;
                    auth_recovered = true;
                }
                AuthDecision::Fail { end_session } => {
                    let err = self.read_response(&call, resp).await.err().unwrap_or_else(|| {
                        ApiError::authentication_required("Authentication required")
                            .with_status(401)
                            .with_context(call.context("executor"))
                    });
                    if end_session {
                        self.end_session(LoginReason::NoRefreshToken);
                    }
                    return Err(err.into());
                }
            }
        }
    }

    /// Execute without attaching credentials and without 401 recovery.
    ///
    /// Used for login, registration and the refresh exchange itself, where a
    /// 401 means "bad credentials" rather than "token expired".
    pub async fn execute_anonymous(
        &self,
        endpoint: &str,
        method: Method,
        body: RequestBody,
    ) -> Result<ApiResponse> {
        let call = Call::new(endpoint, &method, &[], &body);
        debug!(
            endpoint,
            method = %method,
            request_id = call.request_id.as_str(),
            "anonymous request started"
        );
        let resp = self.send_with_network_retry(&call, None).await?;
        self.read_response(&call, resp).await.map_err(Error::from)
    }

    async fn send_with_network_retry(
        &self,
        call: &Call<'_>,
        access_token: Option<&str>,
    ) -> std::result::Result<reqwest::Response, ApiError> {
        let mut failures = 0u32;
        loop {
            let err = match self.transport.send(call.outgoing(access_token)).await {
                Ok(resp) => return Ok(resp),
                Err(e) => e,
            };

            if !err.is_network() {
                return Err(ApiError::new(ApiErrorKind::UnknownError, err.to_string())
                    .with_context(call.context("transport")));
            }

            failures += 1;
            match self.policy.on_network_failure(failures) {
                Decision::Retry { delay } => {
                    warn!(
                        endpoint = call.endpoint,
                        method = %call.method,
                        attempt = failures,
                        delay_ms = delay.as_millis(),
                        request_id = call.request_id.as_str(),
                        error = %err,
                        "network failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Decision::Fail => {
                    info!(
                        endpoint = call.endpoint,
                        method = %call.method,
                        attempt = failures,
                        request_id = call.request_id.as_str(),
                        duration_ms = call.elapsed_ms(),
                        "request failed without a response"
                    );
                    return Err(ApiError::network(format!(
                        "no response after {} attempts: {}",
                        failures, err
                    ))
                    .with_context(call.context("executor")));
                }
            }
        }
    }

    async fn read_response(
        &self,
        call: &Call<'_>,
        resp: reqwest::Response,
    ) -> std::result::Result<ApiResponse, ApiError> {
        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            ApiError::network(format!("failed to read response body: {}", e))
                .with_status(status.as_u16())
                .with_context(call.context("executor"))
        })?;

        if !status.is_success() {
            let err = ApiError::from_response(status.as_u16(), &body)
                .with_context(call.context("executor"));
            info!(
                endpoint = call.endpoint,
                method = %call.method,
                http_status = status.as_u16(),
                error_kind = err.kind.name(),
                request_id = call.request_id.as_str(),
                duration_ms = call.elapsed_ms(),
                "request failed"
            );
            return Err(err);
        }

        debug!(
            endpoint = call.endpoint,
            http_status = status.as_u16(),
            request_id = call.request_id.as_str(),
            duration_ms = call.elapsed_ms(),
            "request completed"
        );

        if status == StatusCode::NO_CONTENT || body.trim().is_empty() {
            return Ok(ApiResponse::NoContent);
        }
        serde_json::from_str(&body)
            .map(ApiResponse::Json)
            .map_err(|e| {
                ApiError::new(
                    ApiErrorKind::UnknownError,
                    format!("Response body is not valid JSON: {}", e),
                )
                .with_status(status.as_u16())
                .with_context(call.context("executor"))
            })
    }

    /// Obtain a fresh access token, sharing one exchange among all concurrent callers.
    ///
    /// `seen_generation` is the coordinator generation read before the rejected
    /// attempt was sent; an exchange that settled since then is not repeated.
    pub(crate) async fn refresh_access_token(&self, seen_generation: u64) -> RefreshOutcome {
        self.session
            .refresh_coordinator()
            .run(seen_generation, || self.exchange_refresh_token())
            .await
    }

    async fn exchange_refresh_token(&self) -> RefreshOutcome {
        let outcome = match self.session.refresh_token() {
            Some(refresh) => self.post_refresh(&refresh).await,
            None => Err(ApiError::authentication_required("No refresh token available")),
        };

        match outcome {
            Ok((access, refresh)) => {
                if let Err(e) = self.session.set_credentials(access.clone(), refresh) {
                    warn!(error = %e, "refreshed tokens could not be persisted");
                }
                debug!("access token refreshed");
                Ok(access)
            }
            Err(cause) => {
                warn!(
                    error_kind = cause.kind.name(),
                    http_status = ?cause.status,
                    "token refresh failed, ending session"
                );
                self.end_session(LoginReason::RefreshFailed);
                let mut err = ApiError::authentication_required(format!(
                    "Session expired: {}",
                    cause.message
                ));
                err.status = cause.status;
                err.details = cause.details;
                Err(err)
            }
        }
    }

    async fn post_refresh(
        &self,
        refresh: &str,
    ) -> std::result::Result<(String, Option<String>), ApiError> {
        let body = RequestBody::Json(serde_json::json!({ "refresh": refresh }));
        let resp = self
            .execute_anonymous(REFRESH_ENDPOINT, Method::POST, body)
            .await
            .map_err(into_api_error)?
            .into_json();

        let access = token_field(&resp, &["access", "access_token", "token"]).ok_or_else(|| {
            ApiError::new(
                ApiErrorKind::UnknownError,
                "Refresh response did not contain an access token",
            )
            .with_details(resp.clone())
        })?;
        Ok((access, token_field(&resp, &["refresh", "refresh_token"])))
    }

    /// Clear credentials and ask the UI shell for the login view.
    pub(crate) fn end_session(&self, reason: LoginReason) {
        if let Err(e) = self.session.clear_credentials() {
            warn!(error = %e, "failed to clear stored credentials");
        }
        info!(reason = ?reason, "session ended, navigating to login");
        self.navigator.navigate_to_login(reason);
    }
}

pub(crate) fn token_field(body: &serde_json::Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|k| body.get(*k).and_then(|v| v.as_str()))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub(crate) fn into_api_error(err: Error) -> ApiError {
    match err {
        Error::Api(e) => e,
        other => ApiError::new(ApiErrorKind::UnknownError, other.to_string()),
    }
}
