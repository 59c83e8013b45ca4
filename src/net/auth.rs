//! Session operations: startup resolution, signup, login, logout.
//!
//! These are the single writer for the session lifecycle. Each operation
//! updates the credential store before the caller applies the in-memory
//! transition, so a consumer observing a state change never sees a stale
//! store. Every operation resolves to a tagged value — nothing here throws
//! past the caller.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::client::{ApiClient, Body, Method, Transport};
use crate::net::types::{AuthSuccess, User, VerifyResponse};
use crate::util::credentials::CredentialStore;

/// Outcome of the one-shot startup verification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionResolution {
    /// The stored credential was accepted; this is the current identity.
    Identified(User),
    /// No credential, or the server rejected it. The store is empty.
    Anonymous,
}

/// Outcome of a login or signup attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthAttempt {
    Success { user: User },
    Failure { message: String },
}

/// Login form payload.
#[derive(Clone, Debug, Default)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

/// Signup payload sent to the server (confirmation field already checked).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignupData {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Raw signup form input, validated client-side before any network call.
#[derive(Clone, Debug, Default)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    /// Validate the form and produce the payload to send.
    ///
    /// # Errors
    ///
    /// A user-facing message when a field is missing, the passwords do not
    /// match, or the password is shorter than 6 characters.
    pub fn validate(&self) -> Result<SignupData, String> {
        if self.username.is_empty() || self.email.is_empty() || self.password.is_empty() {
            return Err("Please fill in all fields".to_owned());
        }
        if self.password != self.confirm_password {
            return Err("Passwords do not match".to_owned());
        }
        if self.password.chars().count() < 6 {
            return Err("Password should be at least 6 characters".to_owned());
        }
        Ok(SignupData {
            username: self.username.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }
}

/// Resolve the session once at startup.
///
/// With no stored credential this returns immediately without touching the
/// network. Otherwise the credential is verified against the server; any
/// failure converges to [`SessionResolution::Anonymous`] with the store
/// cleared.
pub async fn resolve_session<T: Transport, S: CredentialStore>(
    client: &ApiClient<T, S>,
) -> SessionResolution {
    if client.store().get().is_none() {
        return SessionResolution::Anonymous;
    }

    match client.request(Method::Get, "/api/auth/verify", Body::Empty).await {
        Ok(resp) => match resp.json::<VerifyResponse>() {
            Ok(verified) => SessionResolution::Identified(verified.user),
            Err(err) => {
                leptos::logging::warn!("session verify returned an unexpected body: {err}");
                client.store().clear();
                SessionResolution::Anonymous
            }
        },
        Err(err) => {
            // Expired or invalid token; a 401 has already cleared the store
            // through the transport hook, other failures clear it here.
            leptos::logging::log!("session verify failed: {err}");
            client.store().clear();
            SessionResolution::Anonymous
        }
    }
}

/// Create an account via `POST /api/auth/signup`.
///
/// On success the fresh credential is persisted before the user is handed
/// back to the caller.
pub async fn signup<T: Transport, S: CredentialStore>(
    client: &ApiClient<T, S>,
    data: &SignupData,
) -> AuthAttempt {
    let payload = serde_json::json!({
        "username": data.username,
        "email": data.email,
        "password": data.password,
    });
    authenticate(client, "/api/auth/signup", payload, "Something went wrong during signup").await
}

/// Log in via `POST /api/auth/login`.
pub async fn login<T: Transport, S: CredentialStore>(
    client: &ApiClient<T, S>,
    credentials: &LoginCredentials,
) -> AuthAttempt {
    let payload = serde_json::json!({
        "email": credentials.email,
        "password": credentials.password,
    });
    authenticate(
        client,
        "/api/auth/login",
        payload,
        "Login failed. Please check your credentials.",
    )
    .await
}

async fn authenticate<T: Transport, S: CredentialStore>(
    client: &ApiClient<T, S>,
    path: &str,
    payload: serde_json::Value,
    fallback: &str,
) -> AuthAttempt {
    match client.request(Method::Post, path, Body::Json(payload)).await {
        Ok(resp) => match resp.json::<AuthSuccess>() {
            Ok(AuthSuccess { token, user }) => {
                // Store write precedes the caller's in-memory update.
                client.store().set(&token);
                AuthAttempt::Success { user }
            }
            Err(err) => AuthAttempt::Failure {
                message: err.user_message(fallback),
            },
        },
        Err(err) => AuthAttempt::Failure {
            message: err.user_message(fallback),
        },
    }
}

/// Log out: best-effort server notification, unconditional local teardown.
///
/// A failed logout call is logged and swallowed — the local session must
/// end regardless of server reachability. The caller applies
/// [`crate::state::session::SessionState::sign_out`] afterwards.
pub async fn logout<T: Transport, S: CredentialStore>(client: &ApiClient<T, S>) {
    if let Err(err) = client
        .request(Method::Post, "/api/auth/logout", Body::Empty)
        .await
    {
        leptos::logging::warn!("logout request failed: {err}");
    }
    client.store().clear();
}
