use accessible_platform::{
    AppConfig, AppState, auth, create_router,
    models::{ContentItem, LoginResponse},
    repository::{Repository, RepositoryState, SqliteRepository},
};
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use tokio::net::TcpListener;

pub struct TestApp {
    pub address: String,
    pub repo: RepositoryState,
}

async fn spawn_app() -> TestApp {
    // One connection keeps the in-memory database alive and shared for the whole test.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite in tests");

    let repo = Arc::new(SqliteRepository::new(pool)) as RepositoryState;
    repo.init_schema().await.expect("schema init failed");

    let password_hash = auth::hash_password("admin123").expect("hash failed");
    repo.create_admin_if_missing("admin", &password_hash, "admin@example.com")
        .await
        .expect("bootstrap failed");

    let config = AppConfig::default();
    let state = AppState {
        repo: repo.clone(),
        config,
    };
    let router = create_router(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestApp { address, repo }
}

async fn login(client: &reqwest::Client, address: &str) -> String {
    let response = client
        .post(format!("{}/api/auth/login", address))
        .json(&serde_json::json!({ "username": "admin", "password": "admin123" }))
        .send()
        .await
        .expect("login request failed");
    assert_eq!(response.status(), 200);
    let body: LoginResponse = response.json().await.unwrap();
    body.token
}

#[tokio::test]
async fn test_health_check() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/api/health", app.address))
        .send()
        .await
        .expect("req fail");
    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_unknown_route_returns_json_404() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/api/nope", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Not found");
}

#[tokio::test]
async fn test_content_lifecycle() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let token = login(&client, &app.address).await;

    // Create
    let response = client
        .post(format!("{}/api/content", app.address))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "title": "Welcome", "body": "Accessible content body"
        }))
        .send()
        .await
        .expect("post fail");
    assert_eq!(response.status(), 201);
    let created: serde_json::Value = response.json().await.unwrap();
    let id = created["id"].as_i64().unwrap();

    // Public read: title/body round-trip, category defaulted
    let response = client
        .get(format!("{}/api/content/{}", app.address, id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let item: ContentItem = response.json().await.unwrap();
    assert_eq!(item.title, "Welcome");
    assert_eq!(item.body, "Accessible content body");
    assert_eq!(item.category, "general");
    assert_eq!(item.alt_text.as_deref(), Some(""));

    // Update
    let response = client
        .put(format!("{}/api/content/{}", app.address, id))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "title": "Welcome!", "body": "Updated body", "category": "features"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let updated = app.repo.get_content(id).await.unwrap().unwrap();
    assert_eq!(updated.title, "Welcome!");
    assert_eq!(updated.category, "features");
    assert!(updated.updated_at >= updated.created_at);

    // Delete, then the id no longer resolves
    let response = client
        .delete(format!("{}/api/content/{}", app.address, id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let response = client
        .get(format!("{}/api/content/{}", app.address, id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_content_mutation_requires_token() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    // No token at all -> 401
    let response = client
        .post(format!("{}/api/content", app.address))
        .json(&serde_json::json!({ "title": "T", "body": "B" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);

    // Forged token -> 403
    let response = client
        .post(format!("{}/api/content", app.address))
        .bearer_auth("deadbeef.not.ajwt")
        .json(&serde_json::json!({ "title": "T", "body": "B" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 403);

    // Nothing was written either way
    assert!(app.repo.list_content().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_content_validation_rejected_before_store() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let token = login(&client, &app.address).await;

    for payload in [
        serde_json::json!({ "body": "B" }),
        serde_json::json!({ "title": "", "body": "B" }),
        serde_json::json!({ "title": "T", "body": "   " }),
    ] {
        let response = client
            .post(format!("{}/api/content", app.address))
            .bearer_auth(&token)
            .json(&payload)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 400);
    }
    assert!(app.repo.list_content().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_contact_submission_and_gated_listing() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    // Valid submission
    let response = client
        .post(format!("{}/api/contact", app.address))
        .json(&serde_json::json!({
            "name": "Ada", "email": "a@b.co", "message": "Hello"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);

    // Malformed email
    let response = client
        .post(format!("{}/api/contact", app.address))
        .json(&serde_json::json!({
            "name": "Eve", "email": "not-an-email", "message": "Hi"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    // The listing carries PII and is admin-only
    let response = client
        .get(format!("{}/api/contact", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);

    let token = login(&client, &app.address).await;
    let response = client
        .get(format!("{}/api/contact", app.address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let messages: serde_json::Value = response.json().await.unwrap();
    assert_eq!(messages.as_array().unwrap().len(), 1);
    assert_eq!(messages[0]["name"], "Ada");
    assert_eq!(messages[0]["read"], false);
}
