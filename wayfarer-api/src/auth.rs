use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use wayfarer_core::accounts::{AuthSession, Registration};
use wayfarer_core::models::{AccountProfile, PublicAccount};
use wayfarer_shared::Masked;

use crate::{
    error::AppError,
    middleware::{require_account, AuthenticatedAccount},
    payload::{require_fields, AppJson, MessageResponse},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: Masked<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: Masked<String>,
}

#[derive(Debug, Serialize)]
struct AuthResponse {
    message: &'static str,
    token: String,
    user: PublicAccount,
}

impl AuthResponse {
    fn new(message: &'static str, session: AuthSession) -> Self {
        Self {
            message,
            token: session.token,
            user: session.user,
        }
    }
}

#[derive(Debug, Serialize)]
struct ProfileResponse {
    user: AccountProfile,
}

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/profile",
            get(profile).route_layer(middleware::from_fn_with_state(state, require_account)),
        )
        .route("/api/register", post(register))
        .route("/api/login", post(login))
        .route("/api/logout", post(logout))
}

/// POST /api/register
async fn register(
    State(state): State<AppState>,
    AppJson(req): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    require_fields(&[
        ("name", req.name.as_str()),
        ("email", req.email.as_str()),
        ("password", req.password.expose().as_str()),
    ])?;

    let session = state
        .accounts
        .register(Registration {
            name: req.name,
            email: req.email,
            password: req.password,
            phone: req.phone,
        })
        .await
        .map_err(|e| AppError::from_core(e, "Server error during registration"))?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse::new("User registered successfully", session)),
    ))
}

/// POST /api/login
async fn login(
    State(state): State<AppState>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    require_fields(&[("email", req.email.as_str()), ("password", req.password.expose().as_str())])?;

    let session = state
        .accounts
        .login(&req.email, &req.password)
        .await
        .map_err(|e| AppError::from_core(e, "Server error during login"))?;

    Ok(Json(AuthResponse::new("Login successful", session)))
}

/// GET /api/profile
async fn profile(
    State(state): State<AppState>,
    Extension(account): Extension<AuthenticatedAccount>,
) -> Result<Json<ProfileResponse>, AppError> {
    let user = state
        .accounts
        .profile(account.account_id)
        .await
        .map_err(|e| AppError::from_core(e, "Server error"))?;

    Ok(Json(ProfileResponse { user }))
}

/// POST /api/logout
///
/// Tokens are stateless, so there is nothing to revoke server side.
async fn logout() -> Json<MessageResponse> {
    Json(MessageResponse::new("Logged out successfully"))
}
