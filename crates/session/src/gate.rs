//! Content gate for member-only pages.
//!
//! A pure transition function derives the gate state from a session
//! snapshot; [`GateController`] applies snapshots and dispatches the
//! redirect side effects, exactly once per transition into a redirecting
//! state.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::api::Navigator;
use crate::entitlement::has_access;
use crate::store::SessionState;

/// Outcome of gating a session snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateState {
    /// Session fetch still in flight; render a placeholder.
    Loading,
    /// No member; hand off to the login flow.
    Unauthenticated,
    /// Member without an active entitlement; hand off to the upsell page.
    Denied,
    /// Member may see the content.
    Granted,
}

impl std::fmt::Display for GateState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loading => write!(f, "loading"),
            Self::Unauthenticated => write!(f, "unauthenticated"),
            Self::Denied => write!(f, "denied"),
            Self::Granted => write!(f, "granted"),
        }
    }
}

/// Derive the gate state for a session snapshot at `now`.
pub fn evaluate(session: &SessionState, now: DateTime<Utc>) -> GateState {
    if session.is_loading {
        return GateState::Loading;
    }

    match &session.user {
        None => GateState::Unauthenticated,
        Some(user) if has_access(Some(user), now) => GateState::Granted,
        Some(_) => GateState::Denied,
    }
}

/// Applies gate transitions and dispatches their redirects.
pub struct GateController {
    navigator: Arc<dyn Navigator>,
    upsell_path: String,
    state: Option<GateState>,
}

impl GateController {
    /// Create a controller that sends entitled-less members to `upsell_path`.
    pub fn new(navigator: Arc<dyn Navigator>, upsell_path: impl Into<String>) -> Self {
        Self {
            navigator,
            upsell_path: upsell_path.into(),
            state: None,
        }
    }

    /// The most recently applied state, if any snapshot has been seen.
    pub fn state(&self) -> Option<GateState> {
        self.state
    }

    /// Re-evaluate against a snapshot.
    ///
    /// Redirects fire only on the transition into `Unauthenticated` or
    /// `Denied`. Re-applying the same state is a no-op; leaving and
    /// re-entering a redirecting state fires again.
    pub fn apply(&mut self, session: &SessionState, now: DateTime<Utc>) -> GateState {
        let next = evaluate(session, now);

        if self.state != Some(next) {
            self.state = Some(next);
            match next {
                GateState::Unauthenticated => self.navigator.redirect_to_login(),
                GateState::Denied => self.navigator.redirect_to(&self.upsell_path),
                GateState::Loading | GateState::Granted => {}
            }
        }

        next
    }

    /// Drive the controller from a session subscription.
    ///
    /// Applies the current snapshot immediately, then re-applies on every
    /// change notification until the store side is dropped. Returns the
    /// last applied state.
    pub async fn run(mut self, mut session: watch::Receiver<SessionState>) -> Option<GateState> {
        let snapshot = session.borrow_and_update().clone();
        self.apply(&snapshot, Utc::now());

        while session.changed().await.is_ok() {
            let snapshot = session.borrow_and_update().clone();
            self.apply(&snapshot, Utc::now());
        }

        self.state
    }
}
