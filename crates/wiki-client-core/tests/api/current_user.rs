use serde_json::json;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use wiki_api_test_helper::StubResponse;
use wiki_shared::{
    errors::CurrentUserError,
    user::{AccountKind, AnonymousPolicy},
};

use crate::helpers::{
    build_client, no_cb, spawn_app, spawn_app_with_policy, unreachable_site, userinfo_body,
    TEST_USER_AGENT,
};

#[tokio::test]
async fn fetch_registered_user() {
    // Arrange
    let app = spawn_app(StubResponse::ok(userinfo_body(json!({
        "id": 1001,
        "name": "Alice",
        "editcount": 57,
        "registrationdate": "2019-07-01T12:00:00Z",
        "groups": ["*", "user", "autoconfirmed"]
    }))))
    .await;

    // Act
    let actual = app
        .core_client
        .fetch_current_user(&app.site(), no_cb)
        .await
        .expect("failed to receive on rx")
        .expect("failed to extract result");

    // Assert
    assert_eq!(u64::from(actual.user_id), 1001);
    assert_eq!(actual.name, "Alice");
    assert_eq!(actual.kind, AccountKind::Registered);
    assert_eq!(actual.edit_count, 57);
    assert_eq!(
        actual.registration_date.as_deref(),
        Some("2019-07-01T12:00:00Z")
    );
    assert!(actual.is_in_group("autoconfirmed"));
    assert_eq!(actual.groups.len(), 3);
    assert!(!actual.is_blocked);
}

#[tokio::test]
async fn request_asks_for_userinfo_properties() {
    // Arrange
    let app = spawn_app(StubResponse::ok(userinfo_body(
        json!({"id": 1, "name": "Alice"}),
    )))
    .await;

    // Act
    app.core_client
        .fetch_current_user(&app.site(), no_cb)
        .await
        .expect("failed to receive on rx")
        .expect("failed to extract result");

    // Assert
    let received = app.stub.received_requests();
    assert_eq!(received.len(), 1, "expected exactly one request");
    let request = &received[0];
    assert_eq!(request.form.len(), 4, "unexpected parameters: {request:?}");
    assert_eq!(request.form["action"], "query");
    assert_eq!(request.form["meta"], "userinfo");
    assert_eq!(
        request.form["uiprop"],
        "groups|blockinfo|editcount|registrationdate"
    );
    assert_eq!(request.form["format"], "json");
    assert_eq!(request.user_agent.as_deref(), Some(TEST_USER_AGENT));
}

#[tokio::test]
async fn sitewide_block_is_blocked() {
    // Arrange
    let app = spawn_app(StubResponse::ok(userinfo_body(json!({
        "id": 5,
        "name": "Mallory",
        "blockid": 8812,
        "blockedby": "Admin",
        "blockreason": "Vandalism"
    }))))
    .await;

    // Act
    let actual = app
        .core_client
        .fetch_current_user(&app.site(), no_cb)
        .await
        .expect("failed to receive on rx")
        .expect("failed to extract result");

    // Assert
    assert!(actual.is_blocked);
}

#[tokio::test]
async fn partial_block_is_not_blocked() {
    // Arrange
    let app = spawn_app(StubResponse::ok(userinfo_body(json!({
        "id": 5,
        "name": "Mallory",
        "blockid": 8812,
        "blockpartial": true
    }))))
    .await;

    // Act
    let actual = app
        .core_client
        .fetch_current_user(&app.site(), no_cb)
        .await
        .expect("failed to receive on rx")
        .expect("failed to extract result");

    // Assert
    assert!(!actual.is_blocked);
}

#[tokio::test]
async fn missing_id_cannot_extract_user_info() {
    // Arrange
    let app = spawn_app(StubResponse::ok(userinfo_body(json!({"name": "Alice"})))).await;

    // Act
    let actual = app
        .core_client
        .fetch_current_user(&app.site(), no_cb)
        .await
        .expect("failed to receive on rx");

    // Assert
    assert!(
        actual.as_ref().unwrap_err().is_cannot_extract_user_info(),
        "got {actual:?}"
    );
}

#[tokio::test]
async fn permissive_policy_reports_ip_user() {
    // Arrange
    let app = spawn_app(StubResponse::ok(userinfo_body(json!({
        "id": 0,
        "name": "192.0.2.7",
        "anon": ""
    }))))
    .await;

    // Act
    let actual = app
        .core_client
        .fetch_current_user(&app.site(), no_cb)
        .await
        .expect("failed to receive on rx")
        .expect("failed to extract result");

    // Assert
    assert!(actual.is_ip());
    assert!(!actual.is_temp());
}

#[tokio::test]
async fn strict_policy_rejects_ip_user() {
    // Arrange
    let app = spawn_app_with_policy(
        StubResponse::ok(userinfo_body(json!({
            "id": 0,
            "name": "192.0.2.7",
            "anon": ""
        }))),
        AnonymousPolicy::Strict,
    )
    .await;

    // Act
    let actual = app
        .core_client
        .fetch_current_user(&app.site(), no_cb)
        .await
        .expect("failed to receive on rx");

    // Assert
    assert!(
        actual.as_ref().unwrap_err().is_user_is_anonymous(),
        "got {actual:?}"
    );
}

#[tokio::test]
async fn error_status_is_reported_with_body() {
    // Arrange
    let app = spawn_app(StubResponse::with_status(503, "maintenance")).await;

    // Act
    let actual = app
        .core_client
        .fetch_current_user(&app.site(), no_cb)
        .await
        .expect("failed to receive on rx");

    // Assert
    match actual {
        Err(CurrentUserError::UnexpectedStatus { status, body }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("expected unexpected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn api_error_is_reported() {
    // Arrange
    let app = spawn_app(StubResponse::ok(
        json!({
            "error": {
                "code": "readapidenied",
                "info": "You need read permission to use this module."
            }
        })
        .to_string(),
    ))
    .await;

    // Act
    let actual = app
        .core_client
        .fetch_current_user(&app.site(), no_cb)
        .await
        .expect("failed to receive on rx");

    // Assert
    match actual {
        Err(CurrentUserError::Api { code, .. }) => assert_eq!(code, "readapidenied"),
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn transport_error_is_passed_through() {
    // Arrange
    let client = build_client(AnonymousPolicy::Permissive);
    let site = unreachable_site();

    // Act
    let actual = client
        .fetch_current_user(&site, no_cb)
        .await
        .expect("failed to receive on rx");

    // Assert
    let err = actual.as_ref().expect_err("fetch should fail");
    assert!(err.is_transport(), "got {err:?}");
    match actual {
        Err(CurrentUserError::Transport(err)) => assert!(err.is_connect(), "got {err:?}"),
        other => panic!("expected transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn ui_notified_once_after_result() {
    // Arrange
    let app = spawn_app(StubResponse::ok(userinfo_body(
        json!({"id": 1, "name": "Alice"}),
    )))
    .await;
    let notify_count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&notify_count);

    // Act
    let actual = app
        .core_client
        .fetch_current_user(&app.site(), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .await
        .expect("failed to receive on rx");

    // Assert
    actual.unwrap();
    // The notification runs right after the send so give it a moment to land
    for _ in 0..50 {
        if notify_count.load(Ordering::SeqCst) > 0 {
            break;
        }
        tokio::task::yield_now().await;
    }
    assert_eq!(notify_count.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn concurrent_fetches_are_independent() {
    // Arrange
    let app = spawn_app(StubResponse::ok(userinfo_body(
        json!({"id": 9, "name": "Carol"}),
    )))
    .await;
    let site = app.site();

    // Act
    let (first, second) = tokio::join!(
        app.core_client.fetch_current_user(&site, no_cb),
        app.core_client.clone().fetch_current_user(&site, no_cb),
    );

    // Assert
    let first = first.unwrap().unwrap();
    let second = second.unwrap().unwrap();
    assert_eq!(first, second);
    assert_eq!(app.stub.received_requests().len(), 2);
}
