use async_trait::async_trait;
use uuid::Uuid;
use crate::models::{Account, Booking, ContactMessage};
use crate::CoreResult;

/// Repository trait for account data access
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Persist a new account. Fails with `CoreError::DuplicateEmail` when the email is taken.
    async fn create_account(&self, account: &Account) -> CoreResult<()>;

    /// Exact, case-sensitive email match.
    async fn find_by_email(&self, email: &str) -> CoreResult<Option<Account>>;

    async fn find_by_id(&self, id: Uuid) -> CoreResult<Option<Account>>;
}

/// Repository trait for booking data access
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create_booking(&self, booking: &Booking) -> CoreResult<()>;

    /// All bookings owned by `user_id`, newest `booking_date` first.
    async fn list_bookings(&self, user_id: Uuid) -> CoreResult<Vec<Booking>>;
}

/// Repository trait for contact-form submissions
#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn save_message(&self, message: &ContactMessage) -> CoreResult<()>;
}
