//! Session state: who is logged in, derived from credential verification.
//!
//! STATE MACHINE
//! =============
//! Unresolved (`loading`) -> Authenticated (`user` set) or Anonymous
//! (`user` empty), exactly once at startup. Authenticated -> Anonymous via
//! logout or an observed 401. Anonymous -> Authenticated via login/signup.
//!
//! The session operations in [`crate::net::auth`] are the single writer;
//! components read through a shared `RwSignal<SessionState>`. In-flight
//! requests are never cancelled, so every transition out of Authenticated
//! bumps `epoch` and async results are applied through [`SessionState::
//! apply_if_live`] to keep a late response from resurrecting a session.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::types::{Post, User};

/// Client-side session: the current user and the startup loading flag.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionState {
    pub user: Option<User>,
    /// True only during the startup verification window.
    pub loading: bool,
    /// Session generation, bumped whenever the session is torn down.
    pub epoch: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
            epoch: 0,
        }
    }
}

impl SessionState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Ownership verdict for author-only pages.
    ///
    /// `None` while the startup verification is still pending — an
    /// unsettled session is not anonymous, so callers must wait rather
    /// than treat it as a non-author. Once settled, whether the current
    /// user wrote the post.
    #[must_use]
    pub fn owns(&self, post: &Post) -> Option<bool> {
        if self.loading {
            return None;
        }
        Some(
            self.user
                .as_ref()
                .is_some_and(|u| post.is_authored_by(u)),
        )
    }

    /// Settle the startup window with a verified identity.
    pub fn resolve_user(&mut self, user: User) {
        self.user = Some(user);
        self.loading = false;
    }

    /// Settle the startup window with no session.
    pub fn resolve_anonymous(&mut self) {
        self.user = None;
        self.loading = false;
    }

    /// Enter the authenticated state after a successful login or signup.
    pub fn set_user(&mut self, user: User) {
        self.user = Some(user);
    }

    /// Tear the session down: logout, or a 401 observed by the transport.
    pub fn sign_out(&mut self) {
        self.user = None;
        self.epoch += 1;
    }

    /// Apply `f` only if the session generation still matches `epoch`.
    ///
    /// Callers capture the epoch before awaiting a request and route the
    /// result through here, so a response that lands after a sign-out is
    /// dropped instead of reviving the old session.
    pub fn apply_if_live(&mut self, epoch: u64, f: impl FnOnce(&mut Self)) {
        if self.epoch == epoch {
            f(self);
        }
    }
}
