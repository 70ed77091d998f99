use crate::{AppState, handlers};
use axum::{
    Json, Router,
    routing::{get, post},
};
use serde_json::json;

/// Public Router Module
///
/// Defines endpoints that are **unauthenticated** and accessible to any client.
/// These routes cover the public site's read path (content), the contact-form
/// submission, and the login gateway into the admin surface.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /api/health
        // A simple, unauthenticated endpoint used for monitoring and load balancer checks.
        .route(
            "/api/health",
            get(|| async { Json(json!({ "status": "ok", "message": "Server is running" })) }),
        )
        // POST /api/auth/login
        // Exchanges admin credentials for a signed bearer token.
        .route("/api/auth/login", post(handlers::login))
        // GET /api/content
        // Lists all published content items, newest first.
        .route("/api/content", get(handlers::list_content))
        // GET /api/content/{id}
        // Retrieves a single content item.
        .route("/api/content/{id}", get(handlers::get_content_item))
        // POST /api/contact
        // Accepts a contact-form submission after shape and email validation.
        .route("/api/contact", post(handlers::submit_contact))
}
