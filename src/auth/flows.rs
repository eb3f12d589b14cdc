use super::{IssuedCredentials, LoginCredentials};
use crate::client::ApiClient;
use crate::session::Credentials;
use crate::transport::RequestBody;
use crate::types::user::{PasswordChange, Registration, RegistrationResponse};
use crate::types::Acknowledgement;
use crate::{Error, Result};
use reqwest::Method;
use tracing::{info, warn};

pub const REGISTER_ENDPOINT: &str = "/auth/register/";
pub const LOGOUT_ENDPOINT: &str = "/auth/logout/";
pub const CHANGE_PASSWORD_ENDPOINT: &str = "/auth/change-password/";

impl ApiClient {
    /// Try each configured strategy in order and store the first token issued.
    ///
    /// When every strategy fails the first strategy's error is returned, so a
    /// wrong password surfaces as the primary endpoint reported it.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<IssuedCredentials> {
        let mut first_error: Option<Error> = None;

        for strategy in self.strategies.iter() {
            match strategy.authenticate(self, credentials).await {
                Ok(issued) => {
                    let pair =
                        Credentials::new(issued.access_token.clone(), issued.refresh_token.clone());
                    if let Err(e) = self.session.replace_credentials(pair) {
                        warn!(error = %e, "login tokens could not be persisted");
                    }
                    info!(
                        strategy = issued.strategy,
                        has_refresh_token = issued.refresh_token.is_some(),
                        "login succeeded"
                    );
                    return Ok(issued);
                }
                Err(e) => {
                    warn!(strategy = strategy.name(), error = %e, "login strategy failed");
                    first_error.get_or_insert(e);
                }
            }
        }

        Err(first_error
            .unwrap_or_else(|| Error::configuration("No authentication strategies configured")))
    }

    /// Tell the backend to drop the token, then clear the local session
    /// whether or not that call succeeded.
    pub async fn logout(&self) -> Result<()> {
        let remote = self.post_action(LOGOUT_ENDPOINT).await;
        if let Err(e) = self.session.clear_credentials() {
            warn!(error = %e, "failed to clear stored credentials on logout");
        }
        match &remote {
            Ok(_) => info!("logged out"),
            Err(e) => warn!(error = %e, "logout request failed; local session cleared"),
        }
        remote.map(|_| ())
    }

    /// Create an account. The session is left untouched; call
    /// [`login`](Self::login) afterwards.
    pub async fn register(&self, registration: &Registration) -> Result<RegistrationResponse> {
        self.execute_anonymous(
            REGISTER_ENDPOINT,
            Method::POST,
            RequestBody::json(registration)?,
        )
        .await?
        .decode()
        .map_err(Error::from)
    }

    pub async fn change_password(&self, change: &PasswordChange) -> Result<Acknowledgement> {
        self.post(CHANGE_PASSWORD_ENDPOINT, change).await
    }
}
