//! Upload-log endpoint contract tests.

mod helpers;

use helpers::setup_test_app;
use serde_json::{json, Value};

fn full_body() -> Value {
    json!({
        "image_url": "https://res.example.com/image/upload/v1/party.jpg",
        "username": "Megan",
        "user_email": "megan@example.com",
        "file_type": "image",
        "file_size": 2048,
        "cloudinary_public_id": "party"
    })
}

#[tokio::test]
async fn post_with_all_fields_returns_generated_id() {
    let app = setup_test_app();

    let response = app.server.post("/api/log-upload").json(&full_body()).await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["id"], json!(1));
    assert_eq!(body["message"], json!("Upload logged successfully"));

    let rows = app.store.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].image_url, "https://res.example.com/image/upload/v1/party.jpg");
    assert_eq!(rows[0].username, "Megan");
    assert_eq!(rows[0].user_email, "megan@example.com");
    assert_eq!(rows[0].file_type, "image");
    assert_eq!(rows[0].file_size, 2048);
    assert_eq!(rows[0].cloudinary_public_id, "party");
}

#[tokio::test]
async fn ids_increment_per_insert() {
    let app = setup_test_app();

    let first = app.server.post("/api/log-upload").json(&full_body()).await;
    let second = app.server.post("/api/log-upload").json(&full_body()).await;

    assert_eq!(first.json::<Value>()["id"], json!(1));
    assert_eq!(second.json::<Value>()["id"], json!(2));
    assert_eq!(app.store.insert_count(), 2);
}

#[tokio::test]
async fn missing_any_required_field_is_rejected_without_insert() {
    for field in ["image_url", "username", "user_email", "cloudinary_public_id"] {
        let app = setup_test_app();
        let mut body = full_body();
        body.as_object_mut().unwrap().remove(field);

        let response = app.server.post("/api/log-upload").json(&body).await;

        assert_eq!(response.status_code(), 400, "field: {}", field);
        let error: Value = response.json();
        assert_eq!(
            error["error"],
            json!("Missing required fields: image_url, username, user_email, cloudinary_public_id")
        );
        assert_eq!(app.store.insert_count(), 0, "field: {}", field);
    }
}

#[tokio::test]
async fn empty_required_field_counts_as_missing() {
    let app = setup_test_app();
    let mut body = full_body();
    body["username"] = json!("");

    let response = app.server.post("/api/log-upload").json(&body).await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(app.store.insert_count(), 0);
}

#[tokio::test]
async fn optional_fields_default_server_side() {
    let app = setup_test_app();
    let mut body = full_body();
    body.as_object_mut().unwrap().remove("file_type");
    body.as_object_mut().unwrap().remove("file_size");

    let response = app.server.post("/api/log-upload").json(&body).await;

    assert_eq!(response.status_code(), 200);
    let rows = app.store.rows();
    assert_eq!(rows[0].file_type, "unknown");
    assert_eq!(rows[0].file_size, 0);
}

#[tokio::test]
async fn non_post_methods_are_rejected_without_insert() {
    let app = setup_test_app();

    let get = app.server.get("/api/log-upload").await;
    assert_eq!(get.status_code(), 405);
    assert_eq!(get.json::<Value>()["error"], json!("Method not allowed"));

    let put = app.server.put("/api/log-upload").json(&full_body()).await;
    assert_eq!(put.status_code(), 405);

    let delete = app.server.delete("/api/log-upload").await;
    assert_eq!(delete.status_code(), 405);

    assert_eq!(app.store.insert_count(), 0);
}

#[tokio::test]
async fn persistence_failure_returns_500_with_details() {
    let app = setup_test_app();
    app.store.fail_next_inserts();

    let response = app.server.post("/api/log-upload").json(&full_body()).await;

    assert_eq!(response.status_code(), 500);
    let error: Value = response.json();
    assert_eq!(error["error"], json!("Failed to log upload to database"));
    assert!(error["details"].is_string());
    assert_eq!(app.store.insert_count(), 0);
}

#[tokio::test]
async fn malformed_json_body_is_a_bad_request() {
    let app = setup_test_app();

    let response = app
        .server
        .post("/api/log-upload")
        .add_header("Content-Type", "application/json")
        .bytes("not json".into())
        .await;

    assert_eq!(response.status_code(), 400);
    assert!(response.json::<Value>()["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request body"));
    assert_eq!(app.store.insert_count(), 0);
}

#[tokio::test]
async fn liveness_probe_is_alive() {
    let app = setup_test_app();

    let response = app.server.get("/health/live").await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>()["status"], json!("alive"));
}
