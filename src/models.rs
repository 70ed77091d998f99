use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::error::ApiError;

// --- Core Application Schemas (Mapped to Database) ---

/// Admin
///
/// The single privileged identity record stored in the `admins` table.
/// Exactly one row is created at bootstrap; it is immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, FromRow, Default)]
pub struct Admin {
    pub id: i64,
    // Unique across the table, enforced by the store.
    pub username: String,
    /// Bcrypt hash of the admin password. Never serialized into a response body.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// AdminInfo
///
/// Public identity info (no sensitive data). This is the `user` object embedded in
/// login and verify responses.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default, PartialEq)]
pub struct AdminInfo {
    pub id: i64,
    pub username: String,
}

impl From<&Admin> for AdminInfo {
    fn from(admin: &Admin) -> Self {
        Self {
            id: admin.id,
            username: admin.username.clone(),
        }
    }
}

/// ContentItem
///
/// A unit of published material shown on the public site, from the `content` table.
/// This is the primary data structure for the core business logic.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, FromRow, Default)]
pub struct ContentItem {
    pub id: i64,
    pub title: String,
    pub body: String,
    // Screen-reader text for any media attached to the item. Stored as "" when omitted.
    pub alt_text: Option<String>,
    // Defaults to "general" when omitted on write.
    pub category: String,
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation.
    pub updated_at: DateTime<Utc>,
}

/// ContactMessage
///
/// A contact-form submission from the `contact_messages` table. Created by an
/// unauthenticated public submission and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, FromRow, Default)]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    // Part of the persisted shape, unused by current flows.
    pub read: bool,
}

// --- Request Payloads (Input Schemas) ---
//
// Every field arrives as Option<String> so that an absent field and an empty field
// fail validation identically with a 400, instead of surfacing as a deserialization
// rejection. Shape checks run before any business logic.

/// LoginRequest
///
/// Input payload for POST /api/auth/login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    /// Rejects missing/empty credentials before the store is consulted. The
    /// username is trimmed; the password is passed through untouched, since
    /// whitespace in a password is significant.
    pub fn validate(&self) -> Result<(&str, &str), ApiError> {
        let username = non_empty(&self.username);
        let password = self.password.as_deref().filter(|p| !p.is_empty());
        match (username, password) {
            (Some(username), Some(password)) => Ok((username, password)),
            _ => Err(ApiError::Validation(
                "Username and password required".to_string(),
            )),
        }
    }
}

/// ContentPayload
///
/// Input payload shared by POST /api/content and PUT /api/content/{id}.
/// Title and body are mandatory; alt_text and category carry write-time defaults.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct ContentPayload {
    pub title: Option<String>,
    pub body: Option<String>,
    pub alt_text: Option<String>,
    pub category: Option<String>,
}

/// NewContent
///
/// A validated, fully-defaulted content write. Produced only by
/// `ContentPayload::validate`, so the repository never sees an unchecked shape.
#[derive(Debug, Clone)]
pub struct NewContent {
    pub title: String,
    pub body: String,
    pub alt_text: String,
    pub category: String,
}

impl ContentPayload {
    pub fn validate(&self) -> Result<NewContent, ApiError> {
        let (Some(title), Some(body)) = (non_empty(&self.title), non_empty(&self.body)) else {
            return Err(ApiError::Validation("Title and body required".to_string()));
        };
        Ok(NewContent {
            title: title.to_string(),
            body: body.to_string(),
            alt_text: self.alt_text.clone().unwrap_or_default(),
            category: self
                .category
                .clone()
                .unwrap_or_else(|| "general".to_string()),
        })
    }
}

/// ContactPayload
///
/// Input payload for POST /api/contact. All three fields are mandatory and the
/// email must pass a basic syntactic check.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct ContactPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

/// NewMessage
///
/// A validated contact submission ready for insertion.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactPayload {
    pub fn validate(&self) -> Result<NewMessage, ApiError> {
        let (Some(name), Some(email), Some(message)) = (
            non_empty(&self.name),
            non_empty(&self.email),
            non_empty(&self.message),
        ) else {
            return Err(ApiError::Validation("All fields are required".to_string()));
        };
        if !is_valid_email(email) {
            return Err(ApiError::Validation("Invalid email address".to_string()));
        }
        Ok(NewMessage {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        })
    }
}

// --- Response Schemas (Output) ---

/// LoginResponse
///
/// Output schema for a successful login: the signed bearer token plus the admin
/// identity the client should display.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: AdminInfo,
}

/// VerifyResponse
///
/// Output schema for GET /api/auth/verify.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct VerifyResponse {
    pub valid: bool,
    pub user: AdminInfo,
}

/// CreatedResponse
///
/// Output schema for creation endpoints: the new row id plus a confirmation message.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct CreatedResponse {
    pub id: i64,
    pub message: String,
}

/// MessageResponse
///
/// Output schema for mutations that return no body beyond a confirmation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct MessageResponse {
    pub message: String,
}

// --- Validation Helpers ---

/// Treats None, "" and whitespace-only values identically as absent.
fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Basic syntactic email check: a non-empty local part, a single `@`, and a domain
/// containing a dot, with no whitespace anywhere. No full RFC validation, only
/// rejection of obviously malformed addresses.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.split_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}
