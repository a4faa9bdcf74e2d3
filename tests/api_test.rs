//! Integration tests for API endpoints.
//!
//! The full router runs against in-memory repositories and the shared-secret
//! verifier, so no database or identity provider is needed.

mod common;

use axum::http::StatusCode;
use bson::oid::ObjectId;
use serde_json::json;

use common::{inserted_id, MemoryStore, TestApp};

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn root_reports_liveness() {
    let app = TestApp::new();
    let (status, body) = app.get("/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("Server Properly Running"));
}

#[tokio::test]
async fn health_reflects_database_ping() {
    let (status, body) = TestApp::new().get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["services"]["database"]["status"], "healthy");

    let (status, body) = TestApp::with_store(MemoryStore::new(false))
        .get("/health")
        .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let (status, body) = TestApp::new().get("/api-docs/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/volunteers/{id}/status"].is_object());
}

// =============================================================================
// Aid requests
// =============================================================================

#[tokio::test]
async fn new_request_is_pending_with_server_fields() {
    let app = TestApp::new();
    let (status, body) = app
        .post(
            "/requests",
            json!({ "email": "a@x.com", "item": "food", "status": "completed" }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["acknowledged"], true);
    let id = inserted_id(&body);

    let (_, requests) = app.get("/requests").await;
    let stored = &requests[0];
    assert_eq!(stored["_id"], id);
    assert_eq!(stored["status"], "pending");
    assert_eq!(stored["item"], "food");
    assert!(stored["createdAt"].is_string());

    let (_, pending) = app.get("/pending-requests").await;
    assert_eq!(pending.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn request_without_email_is_stored_and_listed() {
    let app = TestApp::new();
    let (status, body) = app.post("/requests", json!({ "item": "food" })).await;

    assert_eq!(status, StatusCode::CREATED);
    let id = inserted_id(&body);

    let (status, requests) = app.get("/requests").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(requests[0]["_id"], id);
    assert!(requests[0].get("email").is_none());

    let (status, pending) = app.get("/pending-requests").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pending.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn valid_status_update_is_persisted() {
    let app = TestApp::new();
    let (_, body) = app.post("/requests", json!({ "email": "a@x.com" })).await;
    let id = inserted_id(&body);

    let (status, _) = app
        .patch(&format!("/requests/{}/status", id), json!({ "status": "matched" }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, requests) = app.get("/requests").await;
    assert_eq!(requests[0]["status"], "matched");

    let (_, pending) = app.get("/pending-requests").await;
    assert!(pending.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn out_of_set_status_leaves_request_unchanged() {
    let app = TestApp::new();
    let (_, body) = app.post("/requests", json!({ "email": "a@x.com" })).await;
    let id = inserted_id(&body);

    for bad in [json!({ "status": "pending" }), json!({ "status": "lost" }), json!({})] {
        let (status, body) = app
            .patch(&format!("/requests/{}/status", id), bad)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains("approved, rejected, matched, completed"));
    }

    let (_, requests) = app.get("/requests").await;
    assert_eq!(requests[0]["status"], "pending");
}

#[tokio::test]
async fn unknown_or_malformed_request_id_is_not_found() {
    let app = TestApp::new();
    let missing = ObjectId::new().to_hex();

    let (status, _) = app
        .patch(&format!("/requests/{}/status", missing), json!({ "status": "approved" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .patch("/requests/not-an-id/status", json!({ "status": "approved" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.delete(&format!("/requests/{}", missing)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.delete("/requests/xyz").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleted_request_is_gone() {
    let app = TestApp::new();
    let (_, body) = app.post("/requests", json!({ "email": "a@x.com" })).await;
    let id = inserted_id(&body);

    let (status, _) = app.delete(&format!("/requests/{}", id)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.delete(&format!("/requests/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, requests) = app.get("/requests").await;
    assert!(requests.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn approved_requests_are_newest_first() {
    let app = TestApp::new();
    let mut ids = Vec::new();
    for item in ["first", "second", "third"] {
        let (_, body) = app
            .post("/requests", json!({ "email": "a@x.com", "item": item }))
            .await;
        ids.push(inserted_id(&body));
    }

    for id in &ids[..2] {
        app.patch(&format!("/requests/{}/status", id), json!({ "status": "approved" }))
            .await;
    }

    let (status, approved) = app.get("/requests/approved").await;
    assert_eq!(status, StatusCode::OK);
    let items: Vec<&str> = approved
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["item"].as_str().unwrap())
        .collect();
    assert_eq!(items, vec!["second", "first"]);
}

// =============================================================================
// Owner-only request listing
// =============================================================================

#[tokio::test]
async fn own_requests_require_bearer_token() {
    let app = TestApp::new();
    let (status, body) = app.get("/requests/email?email=a@x.com").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn invalid_token_is_forbidden() {
    let app = TestApp::new();
    let (status, _) = app
        .get_with_token("/requests/email?email=a@x.com", "not-a-token")
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn other_users_requests_are_forbidden() {
    let app = TestApp::new();
    let token = app.token_for("a@x.com");
    let (status, _) = app
        .get_with_token("/requests/email?email=b@x.com", &token)
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn own_requests_need_an_email() {
    let app = TestApp::new();
    let token = app.token_for("a@x.com");
    let (status, _) = app.get_with_token("/requests/email", &token).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn own_requests_are_filtered_and_sorted() {
    let app = TestApp::new();
    app.post("/requests", json!({ "email": "a@x.com", "item": "old" }))
        .await;
    app.post("/requests", json!({ "email": "b@x.com", "item": "other" }))
        .await;
    app.post("/requests", json!({ "email": "a@x.com", "item": "new" }))
        .await;

    let token = app.token_for("a@x.com");
    let (status, body) = app
        .get_with_token("/requests/email?email=a@x.com", &token)
        .await;

    assert_eq!(status, StatusCode::OK);
    let items: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["item"].as_str().unwrap())
        .collect();
    assert_eq!(items, vec!["new", "old"]);
}

// =============================================================================
// Users
// =============================================================================

#[tokio::test]
async fn registration_is_idempotent() {
    let app = TestApp::new();
    let (status, body) = app
        .post("/users", json!({ "email": "u@x.com", "name": "U", "role": "admin" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["insertedId"].is_string());

    let (status, body) = app
        .post("/users", json!({ "email": "u@x.com", "name": "Again" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "User already exists", "insertedId": null }));

    let (_, role) = app.get("/users/role?email=u@x.com").await;
    assert_eq!(role, json!({ "role": "user" }));
}

#[tokio::test]
async fn unknown_user_defaults_to_user_role() {
    let (status, body) = TestApp::new().get("/users/role?email=ghost@x.com").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "user");
}

#[tokio::test]
async fn role_lookup_requires_email() {
    let app = TestApp::new();
    let (status, _) = app.get("/users/role").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.get("/users/role?email=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn role_update_round_trip() {
    let app = TestApp::new();
    app.post("/users", json!({ "email": "u@x.com" })).await;

    let (status, _) = app
        .patch("/users/u@x.com/role", json!({ "role": "admin" }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, role) = app.get("/users/role?email=u@x.com").await;
    assert_eq!(role["role"], "admin");

    let (status, _) = app.patch("/users/u@x.com/role", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .patch("/users/ghost@x.com/role", json!({ "role": "admin" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Volunteers
// =============================================================================

#[tokio::test]
async fn duplicate_volunteer_application_conflicts() {
    let app = TestApp::new();
    let (status, _) = app
        .post("/volunteers", json!({ "email": "v@x.com", "skills": "driving" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.post("/volunteers", json!({ "email": "v@x.com" })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");

    let (_, pending) = app.get("/volunteers/pending").await;
    assert_eq!(pending.as_array().unwrap().len(), 1);
    assert_eq!(pending[0]["status"], "pending");
}

#[tokio::test]
async fn approval_cascades_to_user_role() {
    let app = TestApp::new();
    app.post("/users", json!({ "email": "v@x.com" })).await;
    let (_, body) = app.post("/volunteers", json!({ "email": "v@x.com" })).await;
    let id = inserted_id(&body);

    let (status, body) = app
        .patch(
            &format!("/volunteers/{}/status", id),
            json!({ "status": "approved", "email": "v@x.com" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["userRoleUpdated"], true);

    let (_, role) = app.get("/users/role?email=v@x.com").await;
    assert_eq!(role["role"], "volunteer");

    let (_, approved) = app.get("/volunteers/approved").await;
    assert_eq!(approved[0]["_id"], id);

    let (_, body) = app
        .patch(
            &format!("/volunteers/{}/status", id),
            json!({ "status": "rejected", "email": "v@x.com" }),
        )
        .await;
    assert_eq!(body["userRoleUpdated"], true);

    let (_, role) = app.get("/users/role?email=v@x.com").await;
    assert_eq!(role["role"], "user");
}

#[tokio::test]
async fn cascade_without_matching_user_reports_no_update() {
    let app = TestApp::new();
    let (_, body) = app.post("/volunteers", json!({ "email": "v@x.com" })).await;
    let id = inserted_id(&body);

    let (status, body) = app
        .patch(
            &format!("/volunteers/{}/status", id),
            json!({ "status": "approved", "email": "v@x.com" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["userRoleUpdated"], false);
}

#[tokio::test]
async fn invalid_volunteer_decision_is_rejected() {
    let app = TestApp::new();
    let (_, body) = app.post("/volunteers", json!({ "email": "v@x.com" })).await;
    let id = inserted_id(&body);

    let (status, _) = app
        .patch(
            &format!("/volunteers/{}/status", id),
            json!({ "status": "matched", "email": "v@x.com" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .patch(
            &format!("/volunteers/{}/status", ObjectId::new().to_hex()),
            json!({ "status": "approved", "email": "v@x.com" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn volunteer_application_can_be_deleted() {
    let app = TestApp::new();
    let (_, body) = app.post("/volunteers", json!({ "email": "v@x.com" })).await;
    let id = inserted_id(&body);

    let (status, _) = app.delete(&format!("/volunteers/{}", id)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.delete(&format!("/volunteers/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Campaigns
// =============================================================================

#[tokio::test]
async fn campaign_moderation_sets_status_and_update_time() {
    let app = TestApp::new();
    let (status, body) = app
        .post("/campaigns", json!({ "title": "Winter coats", "goal": 500 }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = inserted_id(&body);

    let (_, all) = app.get("/campaigns").await;
    assert_eq!(all[0]["_id"], id);
    assert!(all[0].get("status").is_none());
    assert!(all[0].get("updatedAt").is_none());

    let (_, approved) = app.get("/campaigns?status=approved").await;
    assert!(approved.as_array().unwrap().is_empty());

    let (status, _) = app
        .patch(&format!("/campaigns/{}/status", id), json!({ "status": "approved" }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, approved) = app.get("/campaigns?status=approved").await;
    assert_eq!(approved[0]["status"], "approved");
    assert!(approved[0]["updatedAt"].is_string());

    let (_, rejected) = app.get("/campaigns?status=rejected").await;
    assert!(rejected.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn campaign_listing_without_filter_returns_all_newest_first() {
    let app = TestApp::new();
    app.post("/campaigns", json!({ "title": "a" })).await;
    app.post("/campaigns", json!({ "title": "b" })).await;

    let (status, body) = app.get("/campaigns").await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["b", "a"]);
}

#[tokio::test]
async fn campaign_status_errors() {
    let app = TestApp::new();
    let (_, body) = app.post("/campaigns", json!({ "title": "a" })).await;
    let id = inserted_id(&body);

    let (status, body) = app
        .patch(&format!("/campaigns/{}/status", id), json!({ "status": "pending" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid status value");

    let (status, _) = app
        .patch(
            &format!("/campaigns/{}/status", ObjectId::new().to_hex()),
            json!({ "status": "approved" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    for unknown in ["archived", "pending"] {
        let (status, _) = app.get(&format!("/campaigns?status={}", unknown)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
