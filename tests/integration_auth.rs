mod common;

use axum::http::StatusCode;
use common::{TEST_PASSWORD, TestApp, generate_unique_email};
use learnhub_auth::verify_token;
use learnhub_models::users::{Role, UserChanges, UserStatus};
use serde_json::json;

#[tokio::test]
async fn test_register_creates_plain_user_and_token() {
    let app = TestApp::new();
    let email = generate_unique_email();

    let (status, body) = app
        .post(
            "/api/auth/register",
            None,
            json!({ "name": "Ada", "email": email.to_uppercase(), "password": "password123" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["email"], email);
    assert_eq!(body["user"]["role"], "user");
    assert!(body["user"].get("password_hash").is_none());

    let claims = verify_token(body["token"].as_str().unwrap(), &app.jwt_config).unwrap();
    assert_eq!(claims.sub.to_string(), body["user"]["id"].as_str().unwrap());
}

#[tokio::test]
async fn test_register_ignores_requested_role() {
    let app = TestApp::new();

    let (_, body) = app
        .post(
            "/api/auth/register",
            None,
            json!({
                "name": "Mallory",
                "email": generate_unique_email(),
                "password": "password123",
                "role": "admin"
            }),
        )
        .await;

    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["role"], "user");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::new();
    let existing = app.create_user(Role::User).await;

    let (status, body) = app
        .post(
            "/api/auth/register",
            None,
            json!({ "name": "Again", "email": existing.email, "password": "password123" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Email already registered");
}

#[tokio::test]
async fn test_register_short_password_is_validation_failure() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/api/auth/register",
            None,
            json!({ "name": "Ada", "email": generate_unique_email(), "password": "short" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_register_malformed_body_is_bad_request() {
    let app = TestApp::new();

    let (status, body) = app
        .post("/api/auth/register", None, json!({ "name": 42 }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new();
    let user = app.create_user(Role::Educator).await;

    let (status, body) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "email": user.email, "password": TEST_PASSWORD }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["role"], "educator");
    assert!(body["token"].as_str().is_some());
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let app = TestApp::new();
    let user = app.create_user(Role::User).await;

    let (status, body) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "email": user.email, "password": "wrong-password" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid email or password");

    let (_, body) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "email": "nobody@test.com", "password": TEST_PASSWORD }),
        )
        .await;
    assert_eq!(body["message"], "Invalid email or password");
}

#[tokio::test]
async fn test_login_inactive_account_rejected() {
    let app = TestApp::new();
    let user = app.create_user(Role::User).await;
    app.stores
        .identities
        .update_user(
            user.id,
            UserChanges {
                status: Some(UserStatus::Inactive),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let (_, body) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "email": user.email, "password": TEST_PASSWORD }),
        )
        .await;

    assert_eq!(body["success"], false);
    assert_eq!(
        body["message"],
        "Account is inactive. Please contact an administrator."
    );
}

#[tokio::test]
async fn test_me_returns_current_identity() {
    let app = TestApp::new();
    let user = app.create_user(Role::User).await;

    let (status, body) = app.get("/api/auth/me", Some(&user.token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["email"], user.email);
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_me_reflects_role_change_without_new_token() {
    let app = TestApp::new();
    let user = app.create_user(Role::User).await;
    app.stores
        .identities
        .update_user(
            user.id,
            UserChanges {
                role: Some(Role::Educator),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let (_, body) = app.get("/api/auth/me", Some(&user.token)).await;
    assert_eq!(body["user"]["role"], "educator");
}
