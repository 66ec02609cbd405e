use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::Deserialize;
use wayfarer_core::models::ContactDraft;

use crate::{
    error::AppError,
    payload::{require_fields, AppJson, MessageResponse},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    pub email: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/contact", post(submit_contact))
        .route("/api/subscribe", post(subscribe))
}

/// POST /api/contact
async fn submit_contact(
    State(state): State<AppState>,
    AppJson(req): AppJson<ContactRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    require_fields(&[
        ("name", req.name.as_str()),
        ("email", req.email.as_str()),
        ("message", req.message.as_str()),
    ])?;

    state
        .contact
        .submit(ContactDraft {
            name: req.name,
            email: req.email,
            phone: req.phone,
            message: req.message,
        })
        .await
        .map_err(|e| AppError::from_core(e, "Server error during message submission"))?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(
            "Message sent successfully. We will contact you soon!",
        )),
    ))
}

/// POST /api/subscribe
// TODO: persist to a newsletter collection once product signs off on the subscription flow.
async fn subscribe(
    State(state): State<AppState>,
    AppJson(req): AppJson<SubscribeRequest>,
) -> Json<MessageResponse> {
    Json(MessageResponse::new(state.contact.subscribe(&req.email)))
}
