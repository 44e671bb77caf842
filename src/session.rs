//! Reconciled session state.
//!
//! The guard's local expiry check gates navigation immediately; the
//! server round trip here is advisory and can force a later transition to
//! unauthenticated (revocation the local check cannot see). The two may
//! briefly disagree, which the design tolerates.

use std::sync::Arc;
use tokio::sync::watch;
use tracing::warn;

use crate::upstream::{AuthApi, UpstreamError};

/// UI-facing view of authentication validity. `Unknown` is the initial
/// loading state and must never be treated as either terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unknown,
    Authenticated,
    Unauthenticated,
}

/// What subscribers observe: the state plus a non-fatal error, if any.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub error: Option<String>,
}

impl SessionSnapshot {
    /// Consumers must show a loading affordance while this is true.
    pub fn loading(&self) -> bool {
        self.state == SessionState::Unknown
    }
}

/// Owned session state. Consumers subscribe here instead of reading the
/// credential cookie themselves.
#[derive(Clone)]
pub struct Session {
    tx: Arc<watch::Sender<SessionSnapshot>>,
}

impl Session {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionSnapshot {
            state: SessionState::Unknown,
            error: None,
        });
        Self { tx: Arc::new(tx) }
    }

    /// The reactive seam the rest of the application binds to.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.tx.borrow().clone()
    }

    /// Confirm server-side validity once at startup. Observers see the
    /// loading state until this resolves.
    pub async fn initialize(&self, api: &AuthApi, token: Option<&str>) {
        let result = api.check_status(token).await;
        self.apply_status(result);
    }

    /// Reconcile local belief with the server's answer. A failed check
    /// never counts as logged-in; an expected-unauthenticated answer is
    /// silent, anything else surfaces a non-fatal error.
    pub fn apply_status(&self, result: Result<bool, UpstreamError>) {
        let snapshot = match result {
            Ok(true) => SessionSnapshot {
                state: SessionState::Authenticated,
                error: None,
            },
            Ok(false) => SessionSnapshot {
                state: SessionState::Unauthenticated,
                error: None,
            },
            Err(e) => {
                warn!(error = %e, "Auth status check failed");
                SessionSnapshot {
                    state: SessionState::Unauthenticated,
                    error: Some("Failed to verify authentication".to_string()),
                }
            }
        };
        self.tx.send_replace(snapshot);
    }

    pub fn set_authenticated(&self) {
        self.tx.send_replace(SessionSnapshot {
            state: SessionState::Authenticated,
            error: None,
        });
    }

    pub fn set_unauthenticated(&self) {
        self.tx.send_replace(SessionSnapshot {
            state: SessionState::Unauthenticated,
            error: None,
        });
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_loading() {
        let session = Session::new();
        let snapshot = session.snapshot();
        assert_eq!(snapshot.state, SessionState::Unknown);
        assert!(snapshot.loading());
        assert!(snapshot.error.is_none());
    }

    #[test]
    fn test_server_confirmation_resolves_to_authenticated() {
        let session = Session::new();
        session.apply_status(Ok(true));

        let snapshot = session.snapshot();
        assert_eq!(snapshot.state, SessionState::Authenticated);
        assert!(!snapshot.loading());
        assert!(snapshot.error.is_none());
    }

    #[test]
    fn test_expected_unauthenticated_is_silent() {
        let session = Session::new();
        session.apply_status(Ok(false));

        let snapshot = session.snapshot();
        assert_eq!(snapshot.state, SessionState::Unauthenticated);
        assert!(snapshot.error.is_none());
    }

    #[test]
    fn test_unexpected_failure_surfaces_error_but_not_logged_in() {
        let session = Session::new();
        session.apply_status(Err(UpstreamError::UnexpectedStatus(500)));

        let snapshot = session.snapshot();
        assert_eq!(snapshot.state, SessionState::Unauthenticated);
        assert_eq!(
            snapshot.error.as_deref(),
            Some("Failed to verify authentication")
        );
    }

    #[test]
    fn test_logout_clears_error_and_state() {
        let session = Session::new();
        session.apply_status(Err(UpstreamError::UnexpectedStatus(500)));
        session.set_unauthenticated();

        let snapshot = session.snapshot();
        assert_eq!(snapshot.state, SessionState::Unauthenticated);
        assert!(snapshot.error.is_none());
    }

    #[test]
    fn test_subscribers_observe_transitions() {
        let session = Session::new();
        let mut rx = session.subscribe();

        assert_eq!(rx.borrow().state, SessionState::Unknown);

        session.set_authenticated();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().state, SessionState::Authenticated);

        session.set_unauthenticated();
        assert_eq!(rx.borrow_and_update().state, SessionState::Unauthenticated);
    }
}
