use crate::config::RetryConfig;
use std::time::Duration;

/// What to do after an attempt produced no response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Decision {
    /// Send the same request again after `delay`.
    Retry { delay: Duration },
    Fail,
}

/// What to do after a 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AuthDecision {
    /// The token used for the attempt is no longer current; send again with
    /// the current one without refreshing.
    Resend,
    /// Exchange the refresh token, then send again.
    Refresh,
    /// Surface the failure. `end_session` asks for credentials to be cleared
    /// and the login view to be shown.
    Fail { end_session: bool },
}

/// Internal policy engine for network retries and 401 handling.
///
/// Keep this deterministic and explainable: linear backoff, at most one
/// auth recovery per logical call.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RetryPolicy {
    pub max_network_retries: u32,
    pub backoff_step: Duration,
}

impl RetryPolicy {
    pub fn new(cfg: &RetryConfig) -> Self {
        Self {
            max_network_retries: cfg.max_network_retries,
            backoff_step: cfg.backoff_step(),
        }
    }

    /// Delay before retry number `retry` (1-based): 1x, 2x, 3x ... the step.
    fn backoff_delay(&self, retry: u32) -> Duration {
        self.backoff_step.saturating_mul(retry)
    }

    /// Decide after attempt `failures` (1-based count of failures so far)
    /// produced no response.
    pub fn on_network_failure(&self, failures: u32) -> Decision {
        if failures <= self.max_network_retries {
            Decision::Retry {
                delay: self.backoff_delay(failures),
            }
        } else {
            Decision::Fail
        }
    }

    /// Decide after a 401.
    ///
    /// - `auth_recovered`: this logical call already went through a refresh or resend.
    /// - `sent_with`: the access token attached to the rejected attempt.
    /// - `current`: the session's access token now.
    pub fn on_unauthorized(
        &self,
        auth_recovered: bool,
        sent_with: Option<&str>,
        current: Option<&str>,
        has_refresh_token: bool,
    ) -> AuthDecision {
        if auth_recovered {
            return AuthDecision::Fail { end_session: false };
        }
        if sent_with != current {
            // Someone refreshed or logged out while this request was in flight.
            return match current {
                Some(_) => AuthDecision::Resend,
                None => AuthDecision::Fail { end_session: false },
            };
        }
        if has_refresh_token {
            AuthDecision::Refresh
        } else {
            AuthDecision::Fail { end_session: true }
        }
    }
}
