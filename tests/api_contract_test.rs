//! HTTP contract tests for the `/api` routes.
//!
//! Drives the router in-process with `tower::ServiceExt::oneshot` against the
//! in-memory store, so no database or open port is needed.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use jobtrack::{routes, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    routes::router(AppState::in_memory())
}

async fn call(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    send(app, method, uri, body.map(|body| body.to_string())).await
}

/// Like [`call`] but with a raw body, which need not be valid JSON.
async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<String>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

async fn create_application(app: &Router, body: Value) -> Value {
    let (status, created) = call(app, Method::POST, "/api/applications", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    created
}

async fn create_contact(app: &Router, body: Value) -> Value {
    let (status, created) = call(app, Method::POST, "/api/contacts", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    created
}

fn id_of(value: &Value) -> String {
    value["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_endpoints() {
    let app = app();
    let (status, body) = call(&app, Method::GET, "/health/live", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");

    let (status, body) = call(&app, Method::GET, "/health/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["backend"], "memory");
    assert_eq!(body["store"], "connected");
}

#[tokio::test]
async fn create_then_read_back_application() {
    let app = app();
    let created = create_application(
        &app,
        json!({
            "company": "Acme",
            "position": "Backend Engineer",
            "location": "Remote",
            "status": "Applied",
            "applicationDate": "2024-03-01"
        }),
    )
    .await;

    assert_eq!(created["company"], "Acme");
    assert_eq!(created["status"], "Applied");
    assert!(created["createdAt"].is_string());
    assert_eq!(created["createdAt"], created["updatedAt"]);

    let uri = format!("/api/applications/{}", id_of(&created));
    let (status, fetched) = call(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn create_defaults_status_and_date() {
    let app = app();
    let created = create_application(&app, json!({ "company": "Acme", "position": "SRE" })).await;
    assert_eq!(created["status"], "Bookmarked");
    assert!(created["applicationDate"].is_string());
    assert!(created.get("location").is_none());
}

#[tokio::test]
async fn create_without_required_fields_is_rejected() {
    let app = app();
    for body in [
        json!({ "position": "Engineer" }),
        json!({ "company": "Acme" }),
        json!({ "company": "   ", "position": "Engineer" }),
    ] {
        let (status, error) = call(&app, Method::POST, "/api/applications", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["message"], "Validation failed");
        assert!(error["fields"].as_array().is_some_and(|f| !f.is_empty()));
    }

    let (_, all) = call(&app, Method::GET, "/api/applications", None).await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn invalid_enum_values_are_rejected() {
    let app = app();
    let (status, error) = call(
        &app,
        Method::POST,
        "/api/applications",
        Some(json!({ "company": "Acme", "position": "Engineer", "status": "Ghosted" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["fields"][0]["field"], "status");

    let (status, error) = call(
        &app,
        Method::POST,
        "/api/contacts",
        Some(json!({ "name": "Ada", "relationship": "Friend" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["fields"][0]["field"], "relationship");
}

#[tokio::test]
async fn malformed_json_body_is_a_client_error() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/contacts")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn partial_update_changes_only_supplied_fields() {
    let app = app();
    let created = create_application(
        &app,
        json!({
            "company": "Acme",
            "position": "Engineer",
            "location": "Berlin",
            "notes": "Reached out on LinkedIn"
        }),
    )
    .await;
    let uri = format!("/api/applications/{}", id_of(&created));

    let patch = json!({ "status": "Interview", "notes": null });
    let (status, updated) = call(&app, Method::PUT, &uri, Some(patch)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "Interview");
    assert!(updated.get("notes").is_none());
    assert_eq!(updated["location"], "Berlin");
    assert_eq!(updated["company"], "Acme");
    assert_eq!(updated["createdAt"], created["createdAt"]);

    let updated_at = |value: &Value| {
        chrono::DateTime::parse_from_rfc3339(value["updatedAt"].as_str().unwrap()).unwrap()
    };
    assert!(updated_at(&updated) > updated_at(&created));
}

#[tokio::test]
async fn update_is_validated_after_merge() {
    let app = app();
    let created =
        create_application(&app, json!({ "company": "Acme", "position": "Engineer" })).await;
    let uri = format!("/api/applications/{}", id_of(&created));

    let (status, _) = call(&app, Method::PUT, &uri, Some(json!({ "company": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, unchanged) = call(&app, Method::GET, &uri, None).await;
    assert_eq!(unchanged["company"], "Acme");
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let app = app();
    let created =
        create_application(&app, json!({ "company": "Acme", "position": "Engineer" })).await;
    let uri = format!("/api/applications/{}", id_of(&created));

    let (status, body) = call(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Application removed" }));

    let (status, body) = call(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Application not found");

    let (status, _) = call(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_ids_are_not_found() {
    let app = app();
    for (method, uri, body) in [
        (Method::GET, "/api/applications/not-an-id", None),
        (Method::PUT, "/api/applications/123", Some(json!({ "company": "X" }))),
        (Method::DELETE, "/api/applications/zzz", None),
        (Method::GET, "/api/contacts/not-an-id", None),
        (Method::DELETE, "/api/contacts/42", None),
    ] {
        let (status, error) = call(&app, method, uri, body).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert!(error["message"].as_str().unwrap().ends_with("not found"));
    }
}

#[tokio::test]
async fn unknown_id_wins_over_malformed_update_body() {
    let app = app();
    for uri in [
        "/api/applications/not-an-id",
        "/api/applications/00000000-0000-0000-0000-000000000000",
        "/api/contacts/not-an-id",
    ] {
        let (status, error) = send(&app, Method::PUT, uri, Some("{not json".to_string())).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert!(error["message"].as_str().unwrap().ends_with("not found"));
    }

    let created = create_contact(&app, json!({ "name": "Ada" })).await;
    let uri = format!("/api/contacts/{}", id_of(&created));
    let (status, _) = send(&app, Method::PUT, &uri, Some("{not json".to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, unchanged) = call(&app, Method::GET, &uri, None).await;
    assert_eq!(unchanged, created);
}

#[tokio::test]
async fn deleting_a_contact_keeps_the_reference_on_applications() {
    let app = app();
    let contact = create_contact(
        &app,
        json!({ "name": "Grace Hopper", "relationship": "Recruiter" }),
    )
    .await;
    let application = create_application(
        &app,
        json!({ "company": "Acme", "position": "Engineer", "contactId": id_of(&contact) }),
    )
    .await;

    let contact_uri = format!("/api/contacts/{}", id_of(&contact));
    let (status, body) = call(&app, Method::DELETE, &contact_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Contact removed");

    let application_uri = format!("/api/applications/{}", id_of(&application));
    let (status, reloaded) = call(&app, Method::GET, &application_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reloaded["contactId"], contact["id"]);
}

#[tokio::test]
async fn contacts_crud_and_email_rules() {
    let app = app();
    let created = create_contact(
        &app,
        json!({
            "name": "Ada Lovelace",
            "email": "Ada@Example.COM",
            "linkedIn": "https://linkedin.com/in/ada"
        }),
    )
    .await;
    assert_eq!(created["email"], "ada@example.com");
    assert_eq!(created["relationship"], "Other");
    assert_eq!(created["linkedIn"], "https://linkedin.com/in/ada");

    let uri = format!("/api/contacts/{}", id_of(&created));
    let (status, error) = call(&app, Method::PUT, &uri, Some(json!({ "email": "nope" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["fields"][0]["message"], "Please provide a valid email address");

    let patch = json!({ "email": "", "company": "Analytical Engines" });
    let (status, updated) = call(&app, Method::PUT, &uri, Some(patch)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(updated.get("email").is_none());
    assert_eq!(updated["company"], "Analytical Engines");

    let body = json!({ "company": "Acme" });
    let (status, error) = call(&app, Method::POST, "/api/contacts", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["fields"][0]["message"], "Contact name is required");
}

#[tokio::test]
async fn list_orders() {
    let app = app();
    for (company, date) in [("Old", "2024-01-01"), ("New", "2024-06-01")] {
        create_application(
            &app,
            json!({ "company": company, "position": "Engineer", "applicationDate": date }),
        )
        .await;
    }
    create_contact(&app, json!({ "name": "Zed" })).await;
    create_contact(&app, json!({ "name": "Amy" })).await;

    let (_, applications) = call(&app, Method::GET, "/api/applications", None).await;
    let companies: Vec<_> = applications
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["company"].clone())
        .collect();
    assert_eq!(companies, [json!("New"), json!("Old")]);

    let (_, contacts) = call(&app, Method::GET, "/api/contacts", None).await;
    let names: Vec<_> = contacts
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].clone())
        .collect();
    assert_eq!(names, [json!("Amy"), json!("Zed")]);
}

#[tokio::test]
async fn dashboard_stats_for_known_fixture() {
    let app = app();
    for (company, status, date) in [
        ("A", "Applied", "2024-05-01"),
        ("B", "Applied", "2024-05-02"),
        ("C", "Interview", "2024-05-03"),
        ("D", "Offer", "2024-05-04"),
        ("E", "Bookmarked", "2024-05-05"),
    ] {
        create_application(
            &app,
            json!({
                "company": company,
                "position": "Engineer",
                "status": status,
                "applicationDate": date
            }),
        )
        .await;
    }

    let (status, dashboard) = call(&app, Method::GET, "/api/dashboard/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        dashboard["stats"],
        json!({
            "totalApplications": 5,
            "applied": 2,
            "interviews": 1,
            "offers": 1,
            "bookmarked": 1
        })
    );
    let recent: Vec<_> = dashboard["recentApplications"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["company"].clone())
        .collect();
    assert_eq!(recent, [json!("E"), json!("D"), json!("C")]);
}
