mod common;

use common::TestApp;
use mongodb::bson::{doc, oid::ObjectId};
use portfolio_service::models::{fallback_projects, Project};
use portfolio_service::services::{init_metrics, InMemoryStore};
use std::sync::Arc;

async fn fetch_projects(app: &TestApp) -> Vec<Project> {
    let response = app.get("/api/projects").await;
    assert_eq!(response.status(), 200);
    response.json().await.expect("Failed to parse projects")
}

#[tokio::test]
async fn no_database_serves_three_fallback_projects() {
    let app = TestApp::spawn().await;

    let projects = fetch_projects(&app).await;

    assert_eq!(projects.len(), 3);
    assert!(projects.iter().all(|p| !p.title.is_empty()));
    assert_eq!(projects, fallback_projects());
    assert_eq!(projects[0].title, "Realtime Chat App");
}

#[tokio::test]
async fn stored_projects_are_mapped_with_defaults() {
    let store = Arc::new(InMemoryStore::new("portfolio_test"));
    store.seed(
        "project",
        vec![
            doc! {
                "_id": ObjectId::new(),
                "title": "Ray Tracer",
                "description": "Weekend ray tracer",
                "tags": ["Rust", "Graphics"],
                "repo": "https://github.com/me/rt",
                "demo": "https://rt.example.com",
            },
            doc! { "_id": ObjectId::new(), "description": "No title here" },
        ],
    );
    let app = TestApp::spawn_with_store(store).await;

    let projects = fetch_projects(&app).await;

    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0].title, "Ray Tracer");
    assert_eq!(projects[0].tags, vec!["Rust", "Graphics"]);
    assert_eq!(projects[0].demo.as_deref(), Some("https://rt.example.com"));
    assert_eq!(projects[1].title, "Untitled");
    assert!(projects[1].tags.is_empty());
    assert!(projects[1].repo.is_none());
}

#[tokio::test]
async fn empty_collection_returns_empty_list() {
    let app = TestApp::spawn_with_store(Arc::new(InMemoryStore::new("portfolio_test"))).await;

    let projects = fetch_projects(&app).await;

    assert!(projects.is_empty());
}

#[tokio::test]
async fn listing_is_capped_at_fifty() {
    let store = Arc::new(InMemoryStore::new("portfolio_test"));
    store.seed(
        "project",
        (0..75).map(|i| doc! { "title": format!("Project {}", i) }),
    );
    let app = TestApp::spawn_with_store(store).await;

    let projects = fetch_projects(&app).await;

    assert_eq!(projects.len(), 50);
    assert_eq!(projects[0].title, "Project 0");
    assert_eq!(projects[49].title, "Project 49");
}

#[tokio::test]
async fn repeated_listing_is_stable() {
    let store = Arc::new(InMemoryStore::new("portfolio_test"));
    store.seed(
        "project",
        (0..10).map(|i| doc! { "title": format!("Project {}", i), "tags": ["t"] }),
    );
    let app = TestApp::spawn_with_store(store).await;

    let first = fetch_projects(&app).await;
    let second = fetch_projects(&app).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn storage_failure_serves_fallback_projects() {
    let store = Arc::new(InMemoryStore::failing("portfolio_test", "connection refused"));
    let app = TestApp::spawn_with_store(store).await;

    let projects = fetch_projects(&app).await;

    assert_eq!(projects, fallback_projects());
}

#[tokio::test]
async fn malformed_record_serves_fallback_projects() {
    let store = Arc::new(InMemoryStore::new("portfolio_test"));
    store.seed(
        "project",
        vec![
            doc! { "title": "Fine" },
            doc! { "title": "Broken", "tags": "not-a-list" },
        ],
    );
    let app = TestApp::spawn_with_store(store).await;

    let projects = fetch_projects(&app).await;

    assert_eq!(projects.len(), 3);
    assert_eq!(projects, fallback_projects());
}

#[tokio::test]
async fn missing_optionals_serialize_as_null() {
    let store = Arc::new(InMemoryStore::new("portfolio_test"));
    store.seed("project", vec![doc! { "title": "Bare" }]);
    let app = TestApp::spawn_with_store(store).await;

    let body: serde_json::Value = app.get("/api/projects").await.json().await.unwrap();

    assert_eq!(
        body,
        serde_json::json!([{
            "title": "Bare",
            "description": null,
            "tags": [],
            "repo": null,
            "demo": null
        }])
    );
}

#[tokio::test]
async fn fallback_reasons_are_counted_in_metrics() {
    init_metrics();

    let failing = Arc::new(InMemoryStore::failing("portfolio_test", "connection refused"));
    let app = TestApp::spawn_with_store(failing).await;
    assert_eq!(fetch_projects(&app).await, fallback_projects());

    let malformed = Arc::new(InMemoryStore::new("portfolio_test"));
    malformed.seed("project", vec![doc! { "title": "Broken", "tags": 7 }]);
    let app = TestApp::spawn_with_store(malformed).await;
    assert_eq!(fetch_projects(&app).await, fallback_projects());

    let body = app
        .get("/metrics")
        .await
        .text()
        .await
        .expect("Failed to get response body");
    assert!(
        body.contains("portfolio_projects_fallback_total{reason=\"database\"}"),
        "Missing database fallback counter: {}",
        body
    );
    assert!(
        body.contains("portfolio_projects_fallback_total{reason=\"decode\"}"),
        "Missing decode fallback counter: {}",
        body
    );
}
