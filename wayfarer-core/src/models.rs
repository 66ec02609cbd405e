use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// Accounts
// ============================================================================

/// A registered user as stored. Deliberately not `Serialize`: only the projections below
/// ever leave the service.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Projection returned alongside a freshly issued token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicAccount {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Projection returned by the profile lookup: everything except the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for PublicAccount {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            name: account.name.clone(),
            email: account.email.clone(),
        }
    }
}

impl From<Account> for AccountProfile {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            name: account.name,
            email: account.email,
            phone: account.phone,
            created_at: account.created_at,
        }
    }
}

// ============================================================================
// Bookings
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Confirmed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirmed" => Ok(BookingStatus::Confirmed),
            other => Err(format!("unknown booking status: {}", other)),
        }
    }
}

/// Fields a caller supplies when booking a package.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDraft {
    pub package_name: String,
    pub price: f64,
    pub travel_date: DateTime<Utc>,
    pub number_of_travelers: i32,
    pub special_requests: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub package_name: String,
    pub price: f64,
    pub travel_date: DateTime<Utc>,
    pub number_of_travelers: i32,
    pub special_requests: Option<String>,
    pub status: BookingStatus,
    pub booking_date: DateTime<Utc>,
}

impl Booking {
    pub fn new(user_id: Uuid, draft: BookingDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            package_name: draft.package_name,
            price: draft.price,
            travel_date: draft.travel_date,
            number_of_travelers: draft.number_of_travelers,
            special_requests: draft.special_requests,
            status: BookingStatus::default(),
            booking_date: stored_now(),
        }
    }
}

// ============================================================================
// Contact messages
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl ContactMessage {
    pub fn new(draft: ContactDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            message: draft.message,
            created_at: stored_now(),
        }
    }
}

/// Current time at the microsecond precision PostgreSQL keeps, so a record returned on
/// creation matches the one read back later.
pub fn stored_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
