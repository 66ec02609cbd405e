use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use wayfarer_core::models::{Booking, BookingStatus};
use wayfarer_core::repository::BookingRepository;
use wayfarer_core::{CoreError, CoreResult};

use crate::database::storage_error;

pub struct StoreBookingRepository {
    pool: PgPool,
}

impl StoreBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    account_id: Uuid,
    package_name: String,
    price: f64,
    travel_date: DateTime<Utc>,
    number_of_travelers: i32,
    special_requests: Option<String>,
    status: String,
    booking_date: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = CoreError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        Ok(Booking {
            id: row.id,
            user_id: row.account_id,
            package_name: row.package_name,
            price: row.price,
            travel_date: row.travel_date,
            number_of_travelers: row.number_of_travelers,
            special_requests: row.special_requests,
            status: row.status.parse::<BookingStatus>().map_err(CoreError::Storage)?,
            booking_date: row.booking_date,
        })
    }
}

#[async_trait]
impl BookingRepository for StoreBookingRepository {
    async fn create_booking(&self, booking: &Booking) -> CoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO bookings (id, account_id, package_name, price, travel_date, number_of_travelers, special_requests, status, booking_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(booking.id)
        .bind(booking.user_id)
        .bind(&booking.package_name)
        .bind(booking.price)
        .bind(booking.travel_date)
        .bind(booking.number_of_travelers)
        .bind(&booking.special_requests)
        .bind(booking.status.as_str())
        .bind(booking.booking_date)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(())
    }

    async fn list_bookings(&self, user_id: Uuid) -> CoreResult<Vec<Booking>> {
        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT id, account_id, package_name, price, travel_date, number_of_travelers, special_requests, status, booking_date
            FROM bookings
            WHERE account_id = $1
            ORDER BY booking_date DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        rows.into_iter().map(Booking::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: &str) -> BookingRow {
        BookingRow {
            id: Uuid::new_v4(),
            account_id: Uuid::new_v4(),
            package_name: "Kyoto in Autumn".into(),
            price: 2450.5,
            travel_date: Utc::now(),
            number_of_travelers: 3,
            special_requests: Some("Vegetarian meals".into()),
            status: status.into(),
            booking_date: Utc::now(),
        }
    }

    #[test]
    fn row_account_becomes_user_id() {
        let row = row("confirmed");
        let account_id = row.account_id;
        let booking = Booking::try_from(row).unwrap();

        assert_eq!(booking.user_id, account_id);
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.number_of_travelers, 3);
    }

    #[test]
    fn unknown_status_is_a_storage_error() {
        assert!(matches!(Booking::try_from(row("refunded")), Err(CoreError::Storage(_))));
    }
}
