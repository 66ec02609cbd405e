use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use wayfarer_core::models::{Booking, BookingDraft};

use crate::{
    error::AppError,
    middleware::{require_account, AuthenticatedAccount},
    payload::{self, require_fields, AppJson},
    state::AppState,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub package_name: String,
    pub price: f64,
    #[serde(deserialize_with = "payload::travel_date")]
    pub travel_date: DateTime<Utc>,
    pub number_of_travelers: i32,
    pub special_requests: Option<String>,
}

impl From<CreateBookingRequest> for BookingDraft {
    fn from(req: CreateBookingRequest) -> Self {
        BookingDraft {
            package_name: req.package_name,
            price: req.price,
            travel_date: req.travel_date,
            number_of_travelers: req.number_of_travelers,
            special_requests: req.special_requests,
        }
    }
}

#[derive(Debug, Serialize)]
struct BookingResponse {
    message: &'static str,
    booking: Booking,
}

#[derive(Debug, Serialize)]
struct BookingListResponse {
    bookings: Vec<Booking>,
}

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/bookings",
            get(list_bookings)
                .post(create_booking)
                .route_layer(middleware::from_fn_with_state(state, require_account)),
        )
}

/// POST /api/bookings
async fn create_booking(
    State(state): State<AppState>,
    Extension(account): Extension<AuthenticatedAccount>,
    AppJson(req): AppJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), AppError> {
    require_fields(&[("packageName", req.package_name.as_str())])?;

    let booking = state
        .bookings
        .create(account.account_id, req.into())
        .await
        .map_err(|e| AppError::from_core(e, "Server error during booking"))?;

    Ok((
        StatusCode::CREATED,
        Json(BookingResponse {
            message: "Booking created successfully",
            booking,
        }),
    ))
}

/// GET /api/bookings
/// Newest booking first.
async fn list_bookings(
    State(state): State<AppState>,
    Extension(account): Extension<AuthenticatedAccount>,
) -> Result<Json<BookingListResponse>, AppError> {
    let bookings = state
        .bookings
        .list(account.account_id)
        .await
        .map_err(|e| AppError::from_core(e, "Server error"))?;

    Ok(Json(BookingListResponse { bookings }))
}
