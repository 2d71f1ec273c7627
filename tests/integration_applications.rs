mod common;

use axum::http::StatusCode;
use common::{TestApp, application_message};
use learnhub_models::applications::ApplicationStatus;
use learnhub_models::users::Role;
use serde_json::json;

async fn apply(app: &TestApp, token: &str) -> serde_json::Value {
    let (status, body) = app
        .post(
            "/api/educator/apply",
            Some(token),
            json!({ "message": application_message() }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    body
}

#[tokio::test]
async fn test_apply_then_approve_promotes_applicant() {
    let app = TestApp::new();
    let admin = app.create_user(Role::Admin).await;

    let (_, registered) = app
        .post(
            "/api/auth/register",
            None,
            json!({ "name": "Grace", "email": "grace@test.com", "password": "password123" }),
        )
        .await;
    let token = registered["token"].as_str().unwrap().to_string();

    let body = apply(&app, &token).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["application"]["status"], "pending");
    let application_id = body["application"]["id"].as_str().unwrap().to_string();

    let (_, me) = app.get("/api/auth/me", Some(&token)).await;
    assert_eq!(me["user"]["role"], "user");

    let (status, body) = app
        .put(
            &format!("/api/admin/educator-applications/{application_id}/approve"),
            Some(&admin.token),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["application"]["status"], "approved");
    assert_eq!(body["application"]["reviewed_by"], admin.id.to_string());
    assert!(body["application"]["reviewed_at"].is_string());

    let (_, me) = app.get("/api/auth/me", Some(&token)).await;
    assert_eq!(me["user"]["role"], "educator");

    // The same token now passes the educator gate.
    let (status, _) = app.get("/api/educator/courses", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_second_approve_is_already_processed() {
    let app = TestApp::new();
    let admin = app.create_user(Role::Admin).await;
    let other_admin = app.create_user(Role::Admin).await;
    let applicant = app.create_user(Role::User).await;

    let body = apply(&app, &applicant.token).await;
    let id = body["application"]["id"].as_str().unwrap().to_string();
    let approve = format!("/api/admin/educator-applications/{id}/approve");

    let (_, first) = app.put(&approve, Some(&admin.token), json!({})).await;
    assert_eq!(first["success"], true);

    let (status, second) = app.put(&approve, Some(&other_admin.token), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["success"], false);
    assert_eq!(second["message"], "Application already processed");

    let (_, reject) = app
        .put(
            &format!("/api/admin/educator-applications/{id}/reject"),
            Some(&other_admin.token),
            json!({}),
        )
        .await;
    assert_eq!(reject["message"], "Application already processed");

    let stored = app
        .stores
        .applications
        .find_application(id.parse::<uuid::Uuid>().unwrap().into())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, ApplicationStatus::Approved);
    assert_eq!(stored.reviewed_by, Some(admin.id));
    let first_reviewed_at: chrono::DateTime<chrono::Utc> =
        serde_json::from_value(first["application"]["reviewed_at"].clone()).unwrap();
    assert_eq!(stored.reviewed_at, Some(first_reviewed_at));

    let user = app.stores.identities.find_user(applicant.id).await.unwrap().unwrap();
    assert_eq!(user.role, Role::Educator);
}

#[tokio::test]
async fn test_reject_keeps_role() {
    let app = TestApp::new();
    let admin = app.create_user(Role::Admin).await;
    let applicant = app.create_user(Role::User).await;

    let body = apply(&app, &applicant.token).await;
    let id = body["application"]["id"].as_str().unwrap().to_string();

    let (_, body) = app
        .put(
            &format!("/api/admin/educator-applications/{id}/reject"),
            Some(&admin.token),
            json!({}),
        )
        .await;
    assert_eq!(body["application"]["status"], "rejected");

    let user = app.stores.identities.find_user(applicant.id).await.unwrap().unwrap();
    assert_eq!(user.role, Role::User);
}

#[tokio::test]
async fn test_one_pending_application_then_reapply_after_review() {
    let app = TestApp::new();
    let admin = app.create_user(Role::Admin).await;
    let applicant = app.create_user(Role::User).await;

    let first = apply(&app, &applicant.token).await;
    assert_eq!(first["success"], true);

    let second = apply(&app, &applicant.token).await;
    assert_eq!(second["success"], false);
    assert_eq!(second["message"], "You already have a pending application");

    let id = first["application"]["id"].as_str().unwrap();
    app.put(
        &format!("/api/admin/educator-applications/{id}/reject"),
        Some(&admin.token),
        json!({}),
    )
    .await;

    let third = apply(&app, &applicant.token).await;
    assert_eq!(third["success"], true);
    assert_eq!(third["application"]["status"], "pending");

    let (_, mine) = app.get("/api/educator/applications", Some(&applicant.token)).await;
    assert_eq!(mine["applications"].as_array().unwrap().len(), 2);
    assert_eq!(mine["meta"]["total"], 2);
}

#[tokio::test]
async fn test_short_message_is_validation_failure() {
    let app = TestApp::new();
    let applicant = app.create_user(Role::User).await;

    let (status, body) = app
        .post(
            "/api/educator/apply",
            Some(&applicant.token),
            json!({ "message": "   too short, sorry     " }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(
        body["message"],
        "Application message must be at least 20 characters"
    );
}

#[tokio::test]
async fn test_educators_and_admins_cannot_apply() {
    let app = TestApp::new();

    for role in [Role::Educator, Role::Admin] {
        let caller = app.create_user(role).await;
        let body = apply(&app, &caller.token).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "You are already an educator");
    }
}

#[tokio::test]
async fn test_admin_edit_bypasses_state_machine() {
    let app = TestApp::new();
    let admin = app.create_user(Role::Admin).await;
    let applicant = app.create_user(Role::User).await;

    let body = apply(&app, &applicant.token).await;
    let id = body["application"]["id"].as_str().unwrap().to_string();

    let (_, edited) = app
        .put(
            &format!("/api/admin/educator-applications/{id}"),
            Some(&admin.token),
            json!({ "status": "approved" }),
        )
        .await;
    assert_eq!(edited["success"], true);
    assert_eq!(edited["application"]["status"], "approved");
    assert!(edited["application"]["reviewed_by"].is_null());

    // No promotion on this path.
    let user = app.stores.identities.find_user(applicant.id).await.unwrap().unwrap();
    assert_eq!(user.role, Role::User);

    // And it can move a processed application back.
    let (_, edited) = app
        .put(
            &format!("/api/admin/educator-applications/{id}"),
            Some(&admin.token),
            json!({ "status": "pending" }),
        )
        .await;
    assert_eq!(edited["application"]["status"], "pending");
}

#[tokio::test]
async fn test_admin_list_filters_by_status_and_deletes() {
    let app = TestApp::new();
    let admin = app.create_user(Role::Admin).await;
    let first = app.create_user(Role::User).await;
    let second = app.create_user(Role::User).await;

    let pending = apply(&app, &first.token).await;
    let approved = apply(&app, &second.token).await;
    let approved_id = approved["application"]["id"].as_str().unwrap();
    app.put(
        &format!("/api/admin/educator-applications/{approved_id}/approve"),
        Some(&admin.token),
        json!({}),
    )
    .await;

    let (_, body) = app
        .get("/api/admin/educator-applications?status=pending", Some(&admin.token))
        .await;
    let listed = body["applications"].as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], pending["application"]["id"]);

    let (_, body) = app
        .get("/api/admin/educator-applications", Some(&admin.token))
        .await;
    assert_eq!(body["meta"]["total"], 2);

    let pending_id = pending["application"]["id"].as_str().unwrap();
    let (_, body) = app
        .delete(
            &format!("/api/admin/educator-applications/{pending_id}"),
            Some(&admin.token),
        )
        .await;
    assert_eq!(body["success"], true);

    let (_, body) = app
        .delete(
            &format!("/api/admin/educator-applications/{pending_id}"),
            Some(&admin.token),
        )
        .await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Application not found");
}

#[tokio::test]
async fn test_review_unknown_application() {
    let app = TestApp::new();
    let admin = app.create_user(Role::Admin).await;

    let (status, body) = app
        .put(
            &format!(
                "/api/admin/educator-applications/{}/approve",
                uuid::Uuid::new_v4()
            ),
            Some(&admin.token),
            json!({}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Application not found");
}
