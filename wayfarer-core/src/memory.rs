use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{Account, Booking, ContactMessage};
use crate::repository::{AccountRepository, BookingRepository, ContactRepository};
use crate::{CoreError, CoreResult};

#[derive(Debug, Default)]
struct Collections {
    accounts: HashMap<Uuid, Account>,
    bookings: Vec<Booking>,
    contact_messages: Vec<ContactMessage>,
}

/// Process-local store implementing every repository trait.
///
/// Used when no database URL is configured and by the test suites. Clones share the same
/// underlying collections.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<Collections>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn account_count(&self) -> usize {
        self.inner.read().await.accounts.len()
    }

    pub async fn booking_count(&self) -> usize {
        self.inner.read().await.bookings.len()
    }

    pub async fn contact_message_count(&self) -> usize {
        self.inner.read().await.contact_messages.len()
    }

    /// Drop an account without touching its bookings, leaving them dangling.
    pub async fn remove_account(&self, id: Uuid) -> Option<Account> {
        self.inner.write().await.accounts.remove(&id)
    }
}

#[async_trait]
impl AccountRepository for InMemoryStore {
    async fn create_account(&self, account: &Account) -> CoreResult<()> {
        let mut guard = self.inner.write().await;
        if guard.accounts.values().any(|a| a.email == account.email) {
            return Err(CoreError::DuplicateEmail);
        }
        guard.accounts.insert(account.id, account.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> CoreResult<Option<Account>> {
        let guard = self.inner.read().await;
        Ok(guard.accounts.values().find(|a| a.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> CoreResult<Option<Account>> {
        Ok(self.inner.read().await.accounts.get(&id).cloned())
    }
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn create_booking(&self, booking: &Booking) -> CoreResult<()> {
        self.inner.write().await.bookings.push(booking.clone());
        Ok(())
    }

    async fn list_bookings(&self, user_id: Uuid) -> CoreResult<Vec<Booking>> {
        let guard = self.inner.read().await;
        let mut bookings: Vec<Booking> = guard
            .bookings
            .iter()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        bookings.sort_by(|a, b| b.booking_date.cmp(&a.booking_date));
        Ok(bookings)
    }
}

#[async_trait]
impl ContactRepository for InMemoryStore {
    async fn save_message(&self, message: &ContactMessage) -> CoreResult<()> {
        self.inner.write().await.contact_messages.push(message.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn account(email: &str) -> Account {
        Account {
            id: Uuid::new_v4(),
            name: "Ann".into(),
            email: email.into(),
            password_hash: "hash".into(),
            phone: None,
            created_at: Utc::now(),
        }
    }

    fn booking(user_id: Uuid, offset_minutes: i64) -> Booking {
        let now = Utc::now();
        Booking {
            id: Uuid::new_v4(),
            user_id,
            package_name: format!("Package {}", offset_minutes),
            price: 100.0,
            travel_date: now + Duration::days(30),
            number_of_travelers: 1,
            special_requests: None,
            status: Default::default(),
            booking_date: now + Duration::minutes(offset_minutes),
        }
    }

    #[tokio::test]
    async fn email_is_unique_and_case_sensitive() {
        let store = InMemoryStore::new();
        store.create_account(&account("ann@x.com")).await.unwrap();

        let dup = store.create_account(&account("ann@x.com")).await;
        assert!(matches!(dup, Err(CoreError::DuplicateEmail)));

        store.create_account(&account("Ann@x.com")).await.unwrap();
        assert_eq!(store.account_count().await, 2);
        assert!(store.find_by_email("ANN@X.COM").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn bookings_are_scoped_and_newest_first() {
        let store = InMemoryStore::new();
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();

        store.create_booking(&booking(owner, 1)).await.unwrap();
        store.create_booking(&booking(owner, 3)).await.unwrap();
        store.create_booking(&booking(other, 5)).await.unwrap();
        store.create_booking(&booking(owner, 2)).await.unwrap();

        let listed = store.list_bookings(owner).await.unwrap();
        let names: Vec<&str> = listed.iter().map(|b| b.package_name.as_str()).collect();
        assert_eq!(names, vec!["Package 3", "Package 2", "Package 1"]);
        assert!(store.list_bookings(Uuid::new_v4()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = InMemoryStore::new();
        let handle = store.clone();
        let acct = account("bob@x.com");
        handle.create_account(&acct).await.unwrap();

        assert_eq!(store.find_by_id(acct.id).await.unwrap(), Some(acct.clone()));
        assert!(store.remove_account(acct.id).await.is_some());
        assert!(handle.find_by_id(acct.id).await.unwrap().is_none());
    }
}
