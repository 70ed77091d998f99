use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// ApiError
///
/// The single error taxonomy for the HTTP surface. Every failure a handler can
/// produce maps onto exactly one variant, and every variant maps onto exactly one
/// status code plus a short human-readable message. Internal detail (SQL errors,
/// token parse errors) is logged, never exposed in the response body.
#[derive(Debug, PartialEq)]
pub enum ApiError {
    /// A required field is missing or malformed. Detected at the handler boundary
    /// before any store access. 400.
    Validation(String),
    /// No credential was supplied on a protected route. 401.
    Unauthenticated,
    /// Login attempt with an unknown username or wrong password. 401.
    InvalidCredentials,
    /// A credential was supplied but failed verification (bad signature, malformed
    /// structure, or expired). 403.
    Forbidden,
    /// The requested id does not resolve to a row. 404.
    NotFound(&'static str),
    /// A uniqueness constraint was violated. 409.
    Conflict(String),
    /// The underlying store failed. Fatal for this request, not systemic. 500.
    Store,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, "No token provided".to_string())
            }
            ApiError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string())
            }
            ApiError::Forbidden => (StatusCode::FORBIDDEN, "Invalid token".to_string()),
            ApiError::NotFound(what) => (StatusCode::NOT_FOUND, what.to_string()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Store => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database error".to_string(),
            ),
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        // Unique violations carry meaning (duplicate username); everything else is an
        // opaque persistence failure.
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return ApiError::Conflict("Already exists".to_string());
            }
        }
        tracing::error!("store error: {:?}", err);
        ApiError::Store
    }
}
