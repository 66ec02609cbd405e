use std::sync::Arc;
use uuid::Uuid;

use crate::models::{Booking, BookingDraft};
use crate::repository::BookingRepository;
use crate::CoreResult;

#[derive(Clone)]
pub struct BookingService {
    repo: Arc<dyn BookingRepository>,
}

impl BookingService {
    pub fn new(repo: Arc<dyn BookingRepository>) -> Self {
        Self { repo }
    }

    /// Store the draft as-is for `user_id`. Price, traveler count and travel date are not
    /// range-checked.
    pub async fn create(&self, user_id: Uuid, draft: BookingDraft) -> CoreResult<Booking> {
        let booking = Booking::new(user_id, draft);
        self.repo.create_booking(&booking).await?;
        tracing::info!("Booking confirmed: {} for account {}", booking.id, user_id);
        Ok(booking)
    }

    pub async fn list(&self, user_id: Uuid) -> CoreResult<Vec<Booking>> {
        self.repo.list_bookings(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryStore;
    use crate::models::BookingStatus;
    use chrono::{TimeZone, Utc};

    fn draft(name: &str) -> BookingDraft {
        BookingDraft {
            package_name: name.into(),
            price: -5.0,
            travel_date: Utc.with_ymd_and_hms(2001, 1, 1, 0, 0, 0).unwrap(),
            number_of_travelers: 0,
            special_requests: Some("Window seat".into()),
        }
    }

    #[tokio::test]
    async fn values_are_stored_unvalidated() {
        let store = InMemoryStore::new();
        let service = BookingService::new(Arc::new(store.clone()));
        let owner = Uuid::new_v4();

        let booking = service.create(owner, draft("Past Trip")).await.unwrap();
        assert_eq!(booking.price, -5.0);
        assert_eq!(booking.number_of_travelers, 0);
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(service.list(owner).await.unwrap(), vec![booking]);
    }

    #[tokio::test]
    async fn accounts_never_see_each_others_bookings() {
        let service = BookingService::new(Arc::new(InMemoryStore::new()));
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        service.create(a, draft("Alps")).await.unwrap();
        service.create(b, draft("Andes")).await.unwrap();

        let for_b = service.list(b).await.unwrap();
        assert_eq!(for_b.len(), 1);
        assert!(for_b.iter().all(|booking| booking.user_id == b));
    }
}
