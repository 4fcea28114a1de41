#![allow(clippy::unwrap_used)]
// Live-mode dashboard tests against a wiremock server.

use std::time::Duration;

use pretty_assertions::assert_eq;
use secrecy::ExposeSecret;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use civictranslate_core::store::FETCH_FAILED;
use civictranslate_core::{
    CoreError, Dashboard, DashboardConfig, DataMode, RequestId, RequestStatus, Role, Route,
    Severity, TokenSource,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup(token: Option<&str>) -> (MockServer, Dashboard) {
    let server = MockServer::start().await;
    let config = DashboardConfig {
        mode: DataMode::Live,
        api_url: Url::parse(&format!("{}/api", server.uri())).unwrap(),
        timeout: Duration::from_secs(2),
        token: TokenSource::Memory(token.map(|t| t.to_owned().into())),
        ..DashboardConfig::default()
    };
    let dash = Dashboard::new(config).unwrap();
    dash.session().login_as(Role::Admin);
    (server, dash)
}

fn record(id: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": "School Enrollment Package 2025",
        "sourceLanguage": "English",
        "targetLanguage": "Haitian Creole",
        "status": status,
        "priority": "medium",
        "description": "K-12 enrollment forms.",
        "createdBy": "Rosa Fernandez",
        "createdAt": "2025-01-16",
        "updatedAt": "2025-01-16"
    })
}

// ── Fetch ───────────────────────────────────────────────────────────

#[tokio::test]
async fn fetch_loads_records_with_bearer_token() {
    let (server, dash) = setup(Some("tok-live")).await;

    Mock::given(method("GET"))
        .and(path("/api/requests"))
        .and(header("authorization", "Bearer tok-live"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            record("TRQ-005", "in-progress"),
            record("TRQ-007", "pending"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    dash.store().fetch_requests().await;

    assert_eq!(dash.store().len(), 2);
    assert_eq!(dash.store().stats().in_progress, 1);
    assert_eq!(dash.store().error(), None);
}

#[tokio::test]
async fn fetch_failure_sets_error_and_keeps_collection() {
    let (server, dash) = setup(None).await;

    Mock::given(method("GET"))
        .and(path("/api/requests"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    dash.store().fetch_requests().await;

    assert!(dash.store().is_empty());
    assert!(!dash.store().is_loading());
    assert_eq!(dash.store().error().as_deref(), Some(FETCH_FAILED));
    assert!(matches!(
        dash.store().last_failure(),
        Some(CoreError::Api { status: 500, .. })
    ));

    let notes = dash.notifier().snapshot();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].message, "Failed to load requests");
    assert_eq!(notes[0].severity, Severity::Error);
}

// ── Mutations ───────────────────────────────────────────────────────

#[tokio::test]
async fn update_status_patches_and_replaces() {
    let (server, dash) = setup(None).await;

    Mock::given(method("GET"))
        .and(path("/api/requests"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([record("TRQ-005", "in-progress")])))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/requests/TRQ-005"))
        .and(body_partial_json(json!({ "status": "completed" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(record("TRQ-005", "completed")))
        .expect(1)
        .mount(&server)
        .await;

    dash.store().fetch_requests().await;
    let updated = dash
        .store()
        .update_status(&RequestId::from("TRQ-005"), RequestStatus::Completed)
        .await
        .unwrap();

    assert_eq!(updated.status, RequestStatus::Completed);
    assert_eq!(dash.store().stats().completed, 1);
}

#[tokio::test]
async fn delete_404_surfaces_not_found() {
    let (server, dash) = setup(None).await;

    Mock::given(method("DELETE"))
        .and(path("/api/requests/TRQ-404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = dash
        .store()
        .delete_request(&RequestId::from("TRQ-404"))
        .await
        .unwrap_err();

    assert_eq!(err, CoreError::NotFound { id: "TRQ-404".into() });
    assert_eq!(dash.notifier().snapshot()[0].message, "Failed to delete request");
}

#[tokio::test]
async fn update_404_names_the_unencoded_id() {
    let (server, dash) = setup(None).await;

    Mock::given(method("PATCH"))
        .and(path("/api/requests/TRQ%20404"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let err = dash
        .store()
        .update_status(&RequestId::from("TRQ 404"), RequestStatus::Completed)
        .await
        .unwrap_err();

    assert_eq!(err, CoreError::NotFound { id: "TRQ 404".into() });
}

// ── Session expiry ──────────────────────────────────────────────────

#[tokio::test]
async fn unauthorized_clears_token_and_session() {
    let (server, dash) = setup(Some("stale")).await;
    assert_eq!(dash.navigator().current(), Route::Dashboard);

    Mock::given(method("GET"))
        .and(path("/api/requests"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    dash.store().fetch_requests().await;

    assert!(!dash.session().is_logged_in());
    assert_eq!(dash.navigator().current(), Route::Login);
    assert!(dash.tokens().unwrap().load().is_none());
    assert_eq!(dash.store().last_failure(), Some(CoreError::Unauthorized));
}

#[tokio::test]
async fn file_token_source_is_read_per_request() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let token_path = dir.path().join("token");
    std::fs::write(&token_path, "from-file\n").unwrap();

    let config = DashboardConfig {
        mode: DataMode::Live,
        api_url: Url::parse(&format!("{}/api", server.uri())).unwrap(),
        token: TokenSource::File(token_path),
        ..DashboardConfig::default()
    };
    let dash = Dashboard::new(config).unwrap();

    Mock::given(method("GET"))
        .and(path("/api/requests"))
        .and(header("authorization", "Bearer from-file"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    dash.store().fetch_requests().await;
    assert_eq!(dash.store().error(), None);
    assert_eq!(
        dash.tokens().unwrap().load().unwrap().expose_secret(),
        "from-file"
    );
}
