pub mod models;
pub mod repository;
pub mod credentials;
pub mod accounts;
pub mod bookings;
pub mod contact;
pub mod memory;

pub use accounts::AccountService;
pub use bookings::BookingService;
pub use contact::ContactService;
pub use credentials::{AuthConfig, Credentials};
pub use memory::InMemoryStore;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("User already exists with this email")]
    DuplicateEmail,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("No token provided")]
    MissingToken,
    #[error("Invalid token: {0}")]
    InvalidToken(String),
    #[error("User not found")]
    NotFound,
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Internal service error: {0}")]
    InternalError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
