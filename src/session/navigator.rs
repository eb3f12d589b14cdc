//! Login navigation hook.
//!
//! The client never renders anything. When authentication is irrecoverable it
//! asks the hosting UI shell to show the login view through this trait and
//! leaves presentation to the shell.

use std::sync::{Arc, Mutex};

/// Why the session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoginReason {
    /// A request was rejected with 401 and no refresh token was stored.
    NoRefreshToken,
    /// The refresh token exchange failed; credentials were cleared.
    RefreshFailed,
}

/// "Navigate to the login view" capability provided by the UI shell.
pub trait LoginNavigator: Send + Sync {
    fn navigate_to_login(&self, reason: LoginReason);
}

/// Default navigator: does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNavigator;

impl LoginNavigator for NoopNavigator {
    fn navigate_to_login(&self, _reason: LoginReason) {}
}

pub fn noop_navigator() -> Arc<dyn LoginNavigator> {
    Arc::new(NoopNavigator)
}

/// Records every navigation request. Handy in tests.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    events: Mutex<Vec<LoginReason>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<LoginReason> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn count(&self) -> usize {
        self.events.lock().map(|e| e.len()).unwrap_or(0)
    }
}

impl LoginNavigator for RecordingNavigator {
    fn navigate_to_login(&self, reason: LoginReason) {
        if let Ok(mut events) = self.events.lock() {
            events.push(reason);
        }
    }
}

/// Forwards navigation requests to an async UI event loop.
pub struct ChannelNavigator {
    tx: tokio::sync::mpsc::UnboundedSender<LoginReason>,
}

impl ChannelNavigator {
    pub fn new() -> (Self, tokio::sync::mpsc::UnboundedReceiver<LoginReason>) {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl LoginNavigator for ChannelNavigator {
    fn navigate_to_login(&self, reason: LoginReason) {
        // Receiver gone means the shell shut down.
        let _ = self.tx.send(reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_navigator() {
        let nav = RecordingNavigator::new();
        nav.navigate_to_login(LoginReason::RefreshFailed);
        nav.navigate_to_login(LoginReason::NoRefreshToken);
        assert_eq!(
            nav.events(),
            vec![LoginReason::RefreshFailed, LoginReason::NoRefreshToken]
        );
    }

    #[tokio::test]
    async fn test_channel_navigator() {
        let (nav, mut rx) = ChannelNavigator::new();
        nav.navigate_to_login(LoginReason::RefreshFailed);
        assert_eq!(rx.recv().await, Some(LoginReason::RefreshFailed));
        drop(rx);
        nav.navigate_to_login(LoginReason::RefreshFailed);
    }
}
