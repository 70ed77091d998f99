use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post, put},
};

/// Admin Router Module
///
/// Defines the routes exclusively accessible with a valid admin bearer token:
/// all content mutations, the token verify endpoint, and the contact-message
/// listing (which carries submitter PII).
///
/// Access Control:
/// This entire router is wrapped in a middleware layer that runs the `AuthAdmin`
/// extractor before any handler executes. A missing token is rejected with 401,
/// a present-but-invalid token with 403. Handlers additionally take `AuthAdmin`
/// as an argument, so none of them can be wired up unprotected by mistake.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // GET /api/auth/verify
        // Confirms the presented token is still valid and returns its identity.
        .route("/api/auth/verify", get(handlers::verify_session))
        // POST /api/content
        // Creates a new content item.
        .route("/api/content", post(handlers::create_content))
        // PUT/DELETE /api/content/{id}
        // Full replace or irreversible removal of an existing item.
        .route(
            "/api/content/{id}",
            put(handlers::update_content).delete(handlers::delete_content),
        )
        // GET /api/contact
        // Lists all contact submissions, newest first.
        .route("/api/contact", get(handlers::list_contact_messages))
}
