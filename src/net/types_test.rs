use super::*;

fn post_json() -> serde_json::Value {
    serde_json::json!({
        "_id": "p-1",
        "title": "Hello",
        "subtitle": "A greeting",
        "content": "Body text",
        "imageUrl": "/uploads/p-1.png",
        "createdAt": "2024-05-01T12:00:00.000Z",
        "author": { "_id": "u-1", "username": "alice" }
    })
}

// =============================================================
// Deserialization against server field names
// =============================================================

#[test]
fn post_deserializes_server_shape() {
    let post: Post = serde_json::from_value(post_json()).expect("post");
    assert_eq!(post.id, "p-1");
    assert_eq!(post.subtitle.as_deref(), Some("A greeting"));
    assert_eq!(post.image_url.as_deref(), Some("/uploads/p-1.png"));
    assert_eq!(post.author.id, "u-1");
}

#[test]
fn post_optional_fields_default_to_none() {
    let mut value = post_json();
    let obj = value.as_object_mut().expect("object");
    obj.remove("subtitle");
    obj.remove("imageUrl");

    let post: Post = serde_json::from_value(value).expect("post");
    assert_eq!(post.subtitle, None);
    assert_eq!(post.image_url, None);
}

#[test]
fn auth_success_carries_token_and_user() {
    let payload: AuthSuccess = serde_json::from_value(serde_json::json!({
        "token": "jwt-abc",
        "user": { "id": "u-1", "username": "alice", "email": "a@b.com" }
    }))
    .expect("auth payload");
    assert_eq!(payload.token, "jwt-abc");
    assert_eq!(payload.user.username, "alice");
}

#[test]
fn error_body_message_is_optional() {
    let body: ErrorBody = serde_json::from_str("{}").expect("empty body");
    assert_eq!(body.message, None);

    let body: ErrorBody = serde_json::from_str(r#"{"message":"nope"}"#).expect("body");
    assert_eq!(body.message.as_deref(), Some("nope"));
}

// =============================================================
// Post helpers
// =============================================================

#[test]
fn excerpt_truncates_long_content() {
    let mut post: Post = serde_json::from_value(post_json()).expect("post");
    post.content = "x".repeat(200);
    let excerpt = post.excerpt();
    assert_eq!(excerpt.chars().count(), 153);
    assert!(excerpt.ends_with("..."));
}

#[test]
fn excerpt_keeps_short_content_whole() {
    let post: Post = serde_json::from_value(post_json()).expect("post");
    assert_eq!(post.excerpt(), "Body text");
}

#[test]
fn created_date_strips_the_time_component() {
    let post: Post = serde_json::from_value(post_json()).expect("post");
    assert_eq!(post.created_date(), "2024-05-01");

    let mut bare = post;
    bare.created_at = "2024-05-01".to_owned();
    assert_eq!(bare.created_date(), "2024-05-01");
}

#[test]
fn is_authored_by_compares_author_id() {
    let post: Post = serde_json::from_value(post_json()).expect("post");
    let author = User {
        id: "u-1".to_owned(),
        username: "alice".to_owned(),
        email: "a@b.com".to_owned(),
    };
    let other = User {
        id: "u-2".to_owned(),
        username: "bob".to_owned(),
        email: "b@b.com".to_owned(),
    };
    assert!(post.is_authored_by(&author));
    assert!(!post.is_authored_by(&other));
}
