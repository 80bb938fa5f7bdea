//! Render gating for protected views.

use crate::session::SessionStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// First resolution still pending: show a placeholder. Never redirect
    /// here, or an already-valid session flashes a false denial on startup.
    Pending,
    /// No session: send the user to the login entry point.
    SignIn,
    /// Render the guarded content.
    Allow,
}

/// Pure decision over the session snapshot; owns no state and is re-evaluated
/// on every protected render.
pub fn evaluate(status: &SessionStatus) -> GateDecision {
    match status {
        SessionStatus::Unknown => GateDecision::Pending,
        SessionStatus::Anonymous => GateDecision::SignIn,
        SessionStatus::Authenticated(_) => GateDecision::Allow,
    }
}
