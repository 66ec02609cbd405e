use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{error::AppError, state::AppState};

/// Inserted into request extensions once the bearer token has been verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedAccount {
    pub account_id: Uuid,
}

// ============================================================================
// Account Authentication Middleware
// ============================================================================

pub async fn require_account(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // 1. Extract token from Authorization header
    let token = bearer_token(&req);

    // 2. Verify signature and expiry, resolve the subject
    let account_id = state
        .credentials
        .authenticate(token)
        .map_err(|e| AppError::from_core(e, "Server error"))?;

    // 3. Inject the account into request extensions
    req.extensions_mut().insert(AuthenticatedAccount { account_id });

    Ok(next.run(req).await)
}

/// The auth scheme is matched case-insensitively.
fn bearer_token(req: &Request) -> Option<&str> {
    let (scheme, token) = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())?
        .split_once(' ')?;

    scheme.eq_ignore_ascii_case("bearer").then_some(token)
}
