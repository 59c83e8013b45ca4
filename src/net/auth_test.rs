use std::cell::RefCell;
use std::collections::VecDeque;

use futures::executor::block_on;

use super::*;
use crate::net::client::{ApiError, ApiRequest, RawResponse};
use crate::state::session::SessionState;
use crate::util::credentials::MemoryCredentialStore;

/// Scripted transport handing out queued responses.
#[derive(Default)]
struct FakeTransport {
    responses: RefCell<VecDeque<Result<RawResponse, ApiError>>>,
    requests: RefCell<Vec<ApiRequest>>,
}

impl FakeTransport {
    fn respond(self, status: u16, body: &str) -> Self {
        self.responses.borrow_mut().push_back(Ok(RawResponse {
            status,
            body: body.to_owned(),
        }));
        self
    }

    fn fail(self, err: ApiError) -> Self {
        self.responses.borrow_mut().push_back(Err(err));
        self
    }

    fn dispatched(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl Transport for FakeTransport {
    async fn dispatch(&self, req: &ApiRequest) -> Result<RawResponse, ApiError> {
        self.requests.borrow_mut().push(req.clone());
        self.responses.borrow_mut().pop_front().unwrap_or(Ok(RawResponse {
            status: 200,
            body: "{}".to_owned(),
        }))
    }
}

fn client(
    transport: FakeTransport,
    token: Option<&str>,
) -> ApiClient<FakeTransport, MemoryCredentialStore> {
    ApiClient::new(
        "http://api.test",
        transport,
        MemoryCredentialStore::new(token),
    )
}

fn user_json() -> &'static str {
    r#"{"id":"u-1","username":"alice","email":"a@b.com"}"#
}

// =============================================================
// Startup resolution
// =============================================================

#[test]
fn empty_store_resolves_anonymous_without_network() {
    let api = client(FakeTransport::default(), None);
    let resolution = block_on(resolve_session(&api));

    assert_eq!(resolution, SessionResolution::Anonymous);
    assert_eq!(api.transport().dispatched(), 0);
}

#[test]
fn accepted_credential_resolves_identity() {
    let api = client(
        FakeTransport::default().respond(200, &format!(r#"{{"user":{}}}"#, user_json())),
        Some("stored-token"),
    );
    let resolution = block_on(resolve_session(&api));

    match resolution {
        SessionResolution::Identified(user) => assert_eq!(user.username, "alice"),
        SessionResolution::Anonymous => panic!("expected identified session"),
    }
    assert_eq!(api.store().get(), Some("stored-token".to_owned()));
}

#[test]
fn rejected_credential_resolves_anonymous_and_empties_store() {
    let api = client(
        FakeTransport::default().respond(401, r#"{"message":"Token expired"}"#),
        Some("stale-token"),
    );
    let resolution = block_on(resolve_session(&api));

    assert_eq!(resolution, SessionResolution::Anonymous);
    assert_eq!(api.store().get(), None);
}

#[test]
fn verify_network_failure_also_converges_to_anonymous() {
    let api = client(
        FakeTransport::default().fail(ApiError::Timeout),
        Some("token"),
    );
    let resolution = block_on(resolve_session(&api));

    assert_eq!(resolution, SessionResolution::Anonymous);
    assert_eq!(api.store().get(), None);
}

// =============================================================
// Login / signup
// =============================================================

#[test]
fn login_success_persists_token_and_returns_user() {
    let api = client(
        FakeTransport::default()
            .respond(200, &format!(r#"{{"token":"fresh-tok","user":{}}}"#, user_json())),
        None,
    );
    let credentials = LoginCredentials {
        email: "a@b.com".to_owned(),
        password: "secret".to_owned(),
    };
    let attempt = block_on(login(&api, &credentials));

    let AuthAttempt::Success { user } = attempt else {
        panic!("expected success");
    };
    assert_eq!(user.username, "alice");
    assert_eq!(api.store().get(), Some("fresh-tok".to_owned()));

    let mut state = SessionState::default();
    state.resolve_anonymous();
    state.set_user(user);
    assert!(state.is_authenticated());
}

#[test]
fn login_failure_surfaces_server_message_verbatim() {
    let api = client(
        FakeTransport::default().respond(
            401,
            r#"{"message":"Login failed. Please check your credentials."}"#,
        ),
        None,
    );
    let credentials = LoginCredentials {
        email: "a@b.com".to_owned(),
        password: "wrong".to_owned(),
    };
    let attempt = block_on(login(&api, &credentials));

    assert_eq!(
        attempt,
        AuthAttempt::Failure {
            message: "Login failed. Please check your credentials.".to_owned()
        }
    );
    // Nothing was stored and the caller never updates the user on failure.
    assert_eq!(api.store().get(), None);
}

#[test]
fn login_network_failure_uses_fallback_message() {
    let api = client(
        FakeTransport::default().fail(ApiError::Network("refused".to_owned())),
        None,
    );
    let attempt = block_on(login(&api, &LoginCredentials::default()));

    assert_eq!(
        attempt,
        AuthAttempt::Failure {
            message: "Login failed. Please check your credentials.".to_owned()
        }
    );
}

#[test]
fn signup_success_persists_token() {
    let api = client(
        FakeTransport::default()
            .respond(201, &format!(r#"{{"token":"signup-tok","user":{}}}"#, user_json())),
        None,
    );
    let data = SignupData {
        username: "alice".to_owned(),
        email: "a@b.com".to_owned(),
        password: "secret".to_owned(),
    };
    let attempt = block_on(signup(&api, &data));

    assert!(matches!(attempt, AuthAttempt::Success { .. }));
    assert_eq!(api.store().get(), Some("signup-tok".to_owned()));
}

#[test]
fn signup_failure_without_server_message_uses_fallback() {
    let api = client(FakeTransport::default().respond(500, "{}"), None);
    let data = SignupData {
        username: "alice".to_owned(),
        email: "a@b.com".to_owned(),
        password: "secret".to_owned(),
    };
    let attempt = block_on(signup(&api, &data));

    assert_eq!(
        attempt,
        AuthAttempt::Failure {
            message: "Something went wrong during signup".to_owned()
        }
    );
}

#[test]
fn malformed_success_body_is_a_failure() {
    let api = client(FakeTransport::default().respond(200, r#"{"ok":true}"#), None);
    let attempt = block_on(login(&api, &LoginCredentials::default()));
    assert!(matches!(attempt, AuthAttempt::Failure { .. }));
    assert_eq!(api.store().get(), None);
}

// =============================================================
// Logout
// =============================================================

#[test]
fn logout_clears_store_even_when_server_is_unreachable() {
    let api = client(
        FakeTransport::default().fail(ApiError::Network("refused".to_owned())),
        Some("tok"),
    );
    block_on(logout(&api));

    assert_eq!(api.store().get(), None);

    let mut state = SessionState::default();
    state.resolve_user(crate::net::types::User {
        id: "u-1".to_owned(),
        username: "alice".to_owned(),
        email: "a@b.com".to_owned(),
    });
    state.sign_out();
    assert!(!state.is_authenticated());
}

#[test]
fn logout_notifies_server_when_reachable() {
    let api = client(FakeTransport::default().respond(200, "{}"), Some("tok"));
    block_on(logout(&api));

    assert_eq!(api.transport().dispatched(), 1);
    assert_eq!(api.store().get(), None);
}

// =============================================================
// Signup form validation (before any network call)
// =============================================================

#[test]
fn mismatched_confirmation_is_rejected_locally() {
    let form = SignupForm {
        username: "alice".to_owned(),
        email: "a@b.com".to_owned(),
        password: "abc".to_owned(),
        confirm_password: "abcd".to_owned(),
    };
    assert_eq!(form.validate(), Err("Passwords do not match".to_owned()));
}

#[test]
fn short_password_is_rejected_locally() {
    let form = SignupForm {
        username: "alice".to_owned(),
        email: "a@b.com".to_owned(),
        password: "abc".to_owned(),
        confirm_password: "abc".to_owned(),
    };
    assert_eq!(
        form.validate(),
        Err("Password should be at least 6 characters".to_owned())
    );
}

#[test]
fn missing_fields_are_rejected_locally() {
    let form = SignupForm {
        username: String::new(),
        email: "a@b.com".to_owned(),
        password: "secret".to_owned(),
        confirm_password: "secret".to_owned(),
    };
    assert_eq!(form.validate(), Err("Please fill in all fields".to_owned()));
}

#[test]
fn rejected_form_never_reaches_the_network() {
    // The validate-then-signup sequence the signup page runs.
    let api = client(FakeTransport::default(), None);
    let form = SignupForm {
        username: "alice".to_owned(),
        email: "a@b.com".to_owned(),
        password: "abc".to_owned(),
        confirm_password: "abcd".to_owned(),
    };

    if let Ok(data) = form.validate() {
        let _ = block_on(signup(&api, &data));
    }

    assert_eq!(api.transport().dispatched(), 0);
    assert_eq!(api.store().get(), None);
}

#[test]
fn valid_form_produces_signup_payload() {
    let form = SignupForm {
        username: "alice".to_owned(),
        email: "a@b.com".to_owned(),
        password: "secret".to_owned(),
        confirm_password: "secret".to_owned(),
    };
    let data = form.validate().expect("valid form");
    assert_eq!(data.username, "alice");
    assert_eq!(data.email, "a@b.com");
}
