/// Router Module Index
///
/// Organizes the application's routing logic into security-segregated modules.
/// Access control is applied explicitly at the module level (via Axum layers),
/// preventing accidental exposure of protected endpoints.

/// Routes accessible to all clients (anonymous, plus the login gateway).
pub mod public;

/// Routes protected by the `AuthAdmin` extractor middleware.
/// Requires a validated bearer token.
pub mod admin;
