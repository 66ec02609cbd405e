use std::sync::Arc;
use wayfarer_core::repository::{AccountRepository, BookingRepository, ContactRepository};
use wayfarer_core::{AccountService, AuthConfig, BookingService, ContactService, Credentials, InMemoryStore};

#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountService,
    pub bookings: BookingService,
    pub contact: ContactService,
    pub credentials: Arc<Credentials>,
}

impl AppState {
    pub fn new(
        account_repo: Arc<dyn AccountRepository>,
        booking_repo: Arc<dyn BookingRepository>,
        contact_repo: Arc<dyn ContactRepository>,
        auth: &AuthConfig,
    ) -> Self {
        let credentials = Arc::new(Credentials::new(auth));
        Self {
            accounts: AccountService::new(account_repo, credentials.clone()),
            bookings: BookingService::new(booking_repo),
            contact: ContactService::new(contact_repo),
            credentials,
        }
    }

    pub fn in_memory(store: InMemoryStore, auth: &AuthConfig) -> Self {
        Self::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store),
            auth,
        )
    }
}
