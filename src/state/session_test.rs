use super::*;

use crate::net::types::{Post, PostAuthor};

fn user(name: &str) -> User {
    User {
        id: "u-1".to_owned(),
        username: name.to_owned(),
        email: format!("{name}@example.com"),
    }
}

fn post_by(author_id: &str) -> Post {
    Post {
        id: "p-1".to_owned(),
        title: "First".to_owned(),
        subtitle: None,
        content: "Body".to_owned(),
        image_url: None,
        created_at: "2024-01-01T00:00:00.000Z".to_owned(),
        author: PostAuthor {
            id: author_id.to_owned(),
            username: "someone".to_owned(),
        },
    }
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn session_starts_unresolved() {
    let state = SessionState::default();
    assert!(state.loading);
    assert!(state.user.is_none());
    assert!(!state.is_authenticated());
}

// =============================================================
// Startup resolution
// =============================================================

#[test]
fn resolve_user_settles_authenticated() {
    let mut state = SessionState::default();
    state.resolve_user(user("alice"));
    assert!(!state.loading);
    assert!(state.is_authenticated());
}

#[test]
fn resolve_anonymous_settles_logged_out() {
    let mut state = SessionState::default();
    state.resolve_anonymous();
    assert!(!state.loading);
    assert!(!state.is_authenticated());
}

// =============================================================
// Ownership verdict
// =============================================================

#[test]
fn owns_gives_no_verdict_while_unsettled() {
    // A direct load of an author-only page can see the post arrive before
    // the startup verification finishes; that must not read as non-author.
    let state = SessionState::default();
    assert_eq!(state.owns(&post_by("u-1")), None);
}

#[test]
fn owns_is_false_for_settled_anonymous() {
    let mut state = SessionState::default();
    state.resolve_anonymous();
    assert_eq!(state.owns(&post_by("u-1")), Some(false));
}

#[test]
fn owns_follows_authorship_once_settled() {
    let mut state = SessionState::default();
    state.resolve_user(user("alice"));
    assert_eq!(state.owns(&post_by("u-1")), Some(true));
    assert_eq!(state.owns(&post_by("u-2")), Some(false));
}

// =============================================================
// Sign-in / sign-out transitions
// =============================================================

#[test]
fn set_user_enters_authenticated() {
    let mut state = SessionState::default();
    state.resolve_anonymous();
    state.set_user(user("alice"));
    assert!(state.is_authenticated());
}

#[test]
fn sign_out_clears_user_and_bumps_epoch() {
    let mut state = SessionState::default();
    state.resolve_user(user("alice"));
    let before = state.epoch;
    state.sign_out();
    assert!(!state.is_authenticated());
    assert_eq!(state.epoch, before + 1);
}

// =============================================================
// Epoch guard
// =============================================================

#[test]
fn apply_if_live_runs_for_current_epoch() {
    let mut state = SessionState::default();
    let epoch = state.epoch;
    state.apply_if_live(epoch, |s| s.set_user(user("alice")));
    assert!(state.is_authenticated());
}

#[test]
fn stale_response_does_not_resurrect_session() {
    let mut state = SessionState::default();
    state.resolve_user(user("alice"));

    // A login response captured before this sign-out must be dropped.
    let stale_epoch = state.epoch;
    state.sign_out();
    state.apply_if_live(stale_epoch, |s| s.set_user(user("alice")));

    assert!(!state.is_authenticated());
}

#[test]
fn stale_startup_verify_settles_anonymous() {
    let mut state = SessionState::default();
    let epoch = state.epoch;

    // A 401 observed while the verify was in flight tears the session down.
    state.sign_out();

    // The late verify result is dropped, but the startup window still ends.
    state.apply_if_live(epoch, |s| s.resolve_user(user("alice")));
    state.loading = false;

    assert!(!state.is_authenticated());
    assert!(!state.loading);
}
