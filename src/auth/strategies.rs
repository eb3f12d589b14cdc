use super::{AuthStrategy, IssuedCredentials, LoginCredentials};
use crate::client::execution::token_field;
use crate::client::ApiClient;
use crate::error_kind::ApiErrorKind;
use crate::transport::RequestBody;
use crate::{ApiError, Error, ErrorContext, Result};
use async_trait::async_trait;
use reqwest::Method;

pub const LOGIN_ENDPOINT: &str = "/auth/login/";

/// `POST /auth/login/` with the form fields as given.
///
/// Accepts `token`, `access` or `access_token` in the response, plus an
/// optional `refresh` token and `user` object.
#[derive(Debug, Default, Clone, Copy)]
pub struct PrimaryLogin;

#[async_trait]
impl AuthStrategy for PrimaryLogin {
    fn name(&self) -> &'static str {
        "primary_login"
    }

    async fn authenticate(
        &self,
        client: &ApiClient,
        credentials: &LoginCredentials,
    ) -> Result<IssuedCredentials> {
        let body = client
            .execute_anonymous(LOGIN_ENDPOINT, Method::POST, RequestBody::json(credentials)?)
            .await?
            .into_json();
        issued_from(self.name(), LOGIN_ENDPOINT, body)
    }
}

/// DRF `obtain_auth_token`: `{"username", "password"}` in, `{"token"}` out.
///
/// The endpoint only knows `username`, so an email is sent in its place.
#[derive(Debug, Default, Clone, Copy)]
pub struct LegacyTokenAuth;

#[async_trait]
impl AuthStrategy for LegacyTokenAuth {
    fn name(&self) -> &'static str {
        "legacy_token_auth"
    }

    async fn authenticate(
        &self,
        client: &ApiClient,
        credentials: &LoginCredentials,
    ) -> Result<IssuedCredentials> {
        let url = client.config().resolved_legacy_token_url();
        let username = credentials.identifier().unwrap_or_default();
        let payload = serde_json::json!({
            "username": username,
            "password": credentials.password,
        });
        let body = client
            .execute_anonymous(&url, Method::POST, RequestBody::Json(payload))
            .await?
            .into_json();
        issued_from(self.name(), &url, body)
    }
}

fn issued_from(
    strategy: &'static str,
    endpoint: &str,
    body: serde_json::Value,
) -> Result<IssuedCredentials> {
    let Some(access_token) = token_field(&body, &["token", "access", "access_token"]) else {
        return Err(Error::Api(
            ApiError::new(
                ApiErrorKind::UnknownError,
                "Login response did not contain a token",
            )
            .with_details(body)
            .with_context(
                ErrorContext::new()
                    .with_endpoint(endpoint)
                    .with_source(strategy),
            ),
        ));
    };
    let user = body
        .get("user")
        .cloned()
        .and_then(|u| serde_json::from_value(u).ok());
    Ok(IssuedCredentials {
        access_token,
        refresh_token: token_field(&body, &["refresh", "refresh_token"]),
        user,
        strategy,
        raw: body,
    })
}
