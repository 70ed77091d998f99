use crate::{
    AppState,
    auth::{self, AuthAdmin},
    error::ApiError,
    models::{
        AdminInfo, ContactMessage, ContactPayload, ContentItem, ContentPayload, CreatedResponse,
        LoginRequest, LoginResponse, MessageResponse, VerifyResponse,
    },
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

// --- Auth Handlers ---

/// login
///
/// [Public Route] Exchanges admin credentials for a signed 24-hour bearer token.
///
/// *Security*: unknown usernames and wrong passwords are indistinguishable in the
/// response, both returning 401 "Invalid credentials".
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing fields"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let (username, password) = payload.validate()?;

    let admin = state
        .repo
        .find_admin_by_username(username)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    if !auth::verify_password(password, &admin.password_hash) {
        return Err(ApiError::InvalidCredentials);
    }

    let token = auth::issue_token(admin.id, &admin.username, &state.config.jwt_secret)?;

    tracing::info!(admin = %admin.username, "admin login");

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
        user: AdminInfo::from(&admin),
    }))
}

/// verify_session
///
/// [Protected Route] Confirms that the presented bearer token is still valid and
/// echoes back the identity encoded in it. The `AuthAdmin` extractor performs the
/// actual verification; reaching the handler body means the token passed.
#[utoipa::path(
    get,
    path = "/api/auth/verify",
    responses(
        (status = 200, description = "Token valid", body = VerifyResponse),
        (status = 401, description = "No token provided"),
        (status = 403, description = "Invalid token")
    )
)]
pub async fn verify_session(AuthAdmin { id, username }: AuthAdmin) -> Json<VerifyResponse> {
    Json(VerifyResponse {
        valid: true,
        user: AdminInfo { id, username },
    })
}

// --- Content Handlers ---

/// list_content
///
/// [Public Route] Lists every content item, newest first.
#[utoipa::path(
    get,
    path = "/api/content",
    responses((status = 200, description = "All content items", body = [ContentItem]))
)]
pub async fn list_content(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContentItem>>, ApiError> {
    let items = state.repo.list_content().await?;
    Ok(Json(items))
}

/// get_content_item
///
/// [Public Route] Retrieves a single content item by id.
#[utoipa::path(
    get,
    path = "/api/content/{id}",
    params(("id" = i64, Path, description = "Content ID")),
    responses(
        (status = 200, description = "Found", body = ContentItem),
        (status = 404, description = "Content not found")
    )
)]
pub async fn get_content_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ContentItem>, ApiError> {
    match state.repo.get_content(id).await? {
        Some(item) => Ok(Json(item)),
        None => Err(ApiError::NotFound("Content not found")),
    }
}

/// create_content
///
/// [Protected Route] Creates a new content item. Title and body are mandatory;
/// alt_text defaults to "" and category to "general" when omitted.
#[utoipa::path(
    post,
    path = "/api/content",
    request_body = ContentPayload,
    responses(
        (status = 201, description = "Created", body = CreatedResponse),
        (status = 400, description = "Title and body required")
    )
)]
pub async fn create_content(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    Json(payload): Json<ContentPayload>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let new = payload.validate()?;
    let id = state.repo.create_content(&new).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id,
            message: "Content created successfully".to_string(),
        }),
    ))
}

/// update_content
///
/// [Protected Route] Full replace of an existing content item; refreshes
/// updated_at. Validation matches create.
#[utoipa::path(
    put,
    path = "/api/content/{id}",
    params(("id" = i64, Path, description = "Content ID")),
    request_body = ContentPayload,
    responses(
        (status = 200, description = "Updated", body = MessageResponse),
        (status = 400, description = "Title and body required"),
        (status = 404, description = "Content not found")
    )
)]
pub async fn update_content(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ContentPayload>,
) -> Result<Json<MessageResponse>, ApiError> {
    let new = payload.validate()?;
    if state.repo.update_content(id, &new).await? {
        Ok(Json(MessageResponse {
            message: "Content updated successfully".to_string(),
        }))
    } else {
        Err(ApiError::NotFound("Content not found"))
    }
}

/// delete_content
///
/// [Protected Route] Irreversibly deletes a content item by id.
#[utoipa::path(
    delete,
    path = "/api/content/{id}",
    params(("id" = i64, Path, description = "Content ID")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 404, description = "Content not found")
    )
)]
pub async fn delete_content(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    if state.repo.delete_content(id).await? {
        Ok(Json(MessageResponse {
            message: "Content deleted successfully".to_string(),
        }))
    } else {
        Err(ApiError::NotFound("Content not found"))
    }
}

// --- Contact Handlers ---

/// submit_contact
///
/// [Public Route] Records a contact-form submission. All fields are mandatory and
/// the email must pass a basic syntactic check before anything touches the store.
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactPayload,
    responses(
        (status = 201, description = "Message received", body = CreatedResponse),
        (status = 400, description = "Validation failure")
    )
)]
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(payload): Json<ContactPayload>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let new = payload.validate()?;
    let id = state.repo.create_message(&new).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id,
            message: "Message received successfully".to_string(),
        }),
    ))
}

/// list_contact_messages
///
/// [Protected Route] Lists every contact submission, newest first. Submissions
/// carry PII (names and email addresses), so this listing is admin-only.
#[utoipa::path(
    get,
    path = "/api/contact",
    responses(
        (status = 200, description = "All messages", body = [ContactMessage]),
        (status = 401, description = "No token provided"),
        (status = 403, description = "Invalid token")
    )
)]
pub async fn list_contact_messages(
    _admin: AuthAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<ContactMessage>>, ApiError> {
    let messages = state.repo.list_messages().await?;
    Ok(Json(messages))
}
