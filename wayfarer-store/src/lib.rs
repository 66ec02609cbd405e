pub mod app_config;
pub mod database;
pub mod account_repo;
pub mod booking_repo;
pub mod contact_repo;

pub use account_repo::StoreAccountRepository;
pub use booking_repo::StoreBookingRepository;
pub use contact_repo::StoreContactRepository;
pub use database::DbClient;
