//! Session lifecycle state machine.
//!
//! One store per application lifetime, and the only writer of session state.
//! Auth-adjacent failures never escape this module as errors: they are folded
//! into the state, which converges to `Anonymous`. The exceptions are the two
//! login outcomes the UI must tell apart (bad credentials vs. unreachable
//! backend), which `login` surfaces to its caller while leaving state alone.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::error::ApiResult;
use crate::model::Identity;
use crate::transport::Transport;

/// The client's belief about the current user. Identity travels inside the
/// `Authenticated` variant, so "identity present iff authenticated" holds by
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// Not yet resolved; nothing has been asked of the server.
    #[default]
    Unknown,
    Authenticated(Identity),
    Anonymous,
}

impl SessionStatus {
    /// False only before the first identity resolution completes.
    pub fn is_settled(&self) -> bool {
        !matches!(self, SessionStatus::Unknown)
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            SessionStatus::Authenticated(identity) => Some(identity),
            _ => None,
        }
    }
}

pub struct SessionStore {
    transport: Arc<dyn Transport>,
    state: RwLock<SessionStatus>,
}

impl SessionStore {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport, state: RwLock::new(SessionStatus::Unknown) }
    }

    /// Cheap snapshot for gates and UI reads.
    pub fn status(&self) -> SessionStatus {
        self.state.read().clone()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.state.read().identity().cloned()
    }

    /// Resolve who the current session belongs to. Success stores the
    /// identity; any failure (no session, expired cookie, network down) lands
    /// on `Anonymous`. Never errors outward.
    pub async fn fetch_identity(&self) {
        match self.transport.fetch_identity().await {
            Ok(identity) => {
                info!(target: "arenda::session", "session resolved for {}", identity.email);
                *self.state.write() = SessionStatus::Authenticated(identity);
            }
            Err(e) => {
                debug!(target: "arenda::session", "identity fetch failed: {e}");
                *self.state.write() = SessionStatus::Anonymous;
            }
        }
    }

    /// Submit credentials, then resolve identity. On failure the current
    /// state is left untouched and the error goes back to the caller for
    /// display (`InvalidCredentials` vs. `Transport`).
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<()> {
        self.transport.login(email, password).await?;
        self.fetch_identity().await;
        Ok(())
    }

    /// Best-effort server-side revoke; local state becomes `Anonymous`
    /// unconditionally. Once the user asked to leave, the local answer is
    /// authoritative whatever the server said.
    pub async fn logout(&self) {
        if let Err(e) = self.transport.logout().await {
            warn!(target: "arenda::session", "logout revoke failed: {e}");
        }
        *self.state.write() = SessionStatus::Anonymous;
        info!(target: "arenda::session", "logged out");
    }

    /// One renewal cycle: refresh the credential, then re-resolve identity.
    /// A failed refresh converges to `Anonymous`; the next scheduler tick is
    /// the retry.
    pub async fn renew(&self) {
        match self.transport.refresh().await {
            Ok(()) => self.fetch_identity().await,
            Err(e) => {
                debug!(target: "arenda::session", "refresh failed: {e}");
                *self.state.write() = SessionStatus::Anonymous;
            }
        }
    }
}
