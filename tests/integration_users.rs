mod common;

use axum::http::StatusCode;
use common::{TEST_PASSWORD, TestApp, generate_unique_email};
use learnhub_models::users::Role;
use serde_json::json;

#[tokio::test]
async fn test_update_profile_changes_only_self_service_fields() {
    let app = TestApp::new();
    let user = app.create_user(Role::User).await;

    let (status, body) = app
        .put(
            "/api/users/profile",
            Some(&user.token),
            json!({
                "name": "Ada Lovelace",
                "bio": "Analytical engines",
                "avatar_url": "https://cdn.example.com/ada.png",
                "role": "admin"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["name"], "Ada Lovelace");
    assert_eq!(body["user"]["bio"], "Analytical engines");
    assert_eq!(body["user"]["role"], "user");
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_update_profile_rejects_bad_avatar_url() {
    let app = TestApp::new();
    let user = app.create_user(Role::User).await;

    let (status, body) = app
        .put(
            "/api/users/profile",
            Some(&user.token),
            json!({ "avatar_url": "not a url" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_update_profile_requires_token() {
    let app = TestApp::new();

    let (status, _) = app
        .put("/api/users/profile", None, json!({ "name": "Nobody" }))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_creates_user_with_role() {
    let app = TestApp::new();
    let admin = app.create_user(Role::Admin).await;
    let email = generate_unique_email();

    let (status, body) = app
        .post(
            "/api/admin/users",
            Some(&admin.token),
            json!({
                "name": "New Educator",
                "email": email,
                "password": TEST_PASSWORD,
                "role": "educator"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["role"], "educator");

    let (_, login) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "email": email, "password": TEST_PASSWORD }),
        )
        .await;
    assert_eq!(login["success"], true);
    assert_eq!(login["user"]["role"], "educator");
}

#[tokio::test]
async fn test_admin_create_defaults_to_user_role() {
    let app = TestApp::new();
    let admin = app.create_user(Role::Admin).await;

    let (_, body) = app
        .post(
            "/api/admin/users",
            Some(&admin.token),
            json!({
                "name": "Plain",
                "email": generate_unique_email(),
                "password": TEST_PASSWORD
            }),
        )
        .await;

    assert_eq!(body["user"]["role"], "user");
    assert_eq!(body["user"]["status"], "active");
}

#[tokio::test]
async fn test_admin_create_rejects_duplicate_email() {
    let app = TestApp::new();
    let admin = app.create_user(Role::Admin).await;
    let existing = app.create_user(Role::User).await;

    let (status, body) = app
        .post(
            "/api/admin/users",
            Some(&admin.token),
            json!({
                "name": "Copy",
                "email": existing.email,
                "password": TEST_PASSWORD
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_admin_lists_users_by_role() {
    let app = TestApp::new();
    let admin = app.create_user(Role::Admin).await;
    app.create_user(Role::Educator).await;
    app.create_user(Role::Educator).await;
    app.create_user(Role::User).await;

    let (status, body) = app
        .get("/api/admin/users?role=educator&limit=1", Some(&admin.token))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["users"].as_array().unwrap().len(), 1);
    assert_eq!(body["users"][0]["role"], "educator");
    assert_eq!(body["meta"]["total"], 2);
    assert_eq!(body["meta"]["has_more"], true);
}

#[tokio::test]
async fn test_admin_demotion_applies_on_next_request() {
    let app = TestApp::new();
    let admin = app.create_user(Role::Admin).await;
    let educator = app.create_user(Role::Educator).await;

    let (status, _) = app
        .get("/api/educator/courses", Some(&educator.token))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app
        .put(
            &format!("/api/admin/users/{}", educator.id),
            Some(&admin.token),
            json!({ "role": "user" }),
        )
        .await;
    assert_eq!(body["user"]["role"], "user");

    let (status, _) = app
        .get("/api/educator/courses", Some(&educator.token))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_deactivated_user_cannot_log_in() {
    let app = TestApp::new();
    let admin = app.create_user(Role::Admin).await;
    let user = app.create_user(Role::User).await;

    app.put(
        &format!("/api/admin/users/{}", user.id),
        Some(&admin.token),
        json!({ "status": "inactive" }),
    )
    .await;

    let (status, body) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "email": user.email, "password": user.password }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_admin_get_missing_user_uses_envelope() {
    let app = TestApp::new();
    let admin = app.create_user(Role::Admin).await;

    let (status, body) = app
        .get(
            &format!("/api/admin/users/{}", uuid::Uuid::new_v4()),
            Some(&admin.token),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn test_admin_delete_user_invalidates_their_token() {
    let app = TestApp::new();
    let admin = app.create_user(Role::Admin).await;
    let user = app.create_user(Role::User).await;

    let (status, body) = app
        .delete(&format!("/api/admin/users/{}", user.id), Some(&admin.token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, body) = app.get("/api/auth/me", Some(&user.token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn test_admin_cannot_delete_self() {
    let app = TestApp::new();
    let admin = app.create_user(Role::Admin).await;

    let (status, body) = app
        .delete(&format!("/api/admin/users/{}", admin.id), Some(&admin.token))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "You cannot delete your own account");

    let (status, _) = app.get("/api/auth/me", Some(&admin.token)).await;
    assert_eq!(status, StatusCode::OK);
}
