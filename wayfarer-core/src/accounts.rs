use std::sync::Arc;
use uuid::Uuid;
use wayfarer_shared::Masked;

use crate::credentials::Credentials;
use crate::models::{stored_now, Account, AccountProfile, PublicAccount};
use crate::repository::AccountRepository;
use crate::{CoreError, CoreResult};

#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: Masked<String>,
    pub phone: Option<String>,
}

/// A signed token plus the public projection of the account it was issued for.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user: PublicAccount,
}

#[derive(Clone)]
pub struct AccountService {
    repo: Arc<dyn AccountRepository>,
    credentials: Arc<Credentials>,
}

impl AccountService {
    pub fn new(repo: Arc<dyn AccountRepository>, credentials: Arc<Credentials>) -> Self {
        Self { repo, credentials }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub async fn register(&self, registration: Registration) -> CoreResult<AuthSession> {
        if self.repo.find_by_email(&registration.email).await?.is_some() {
            return Err(CoreError::DuplicateEmail);
        }

        let password_hash = self
            .credentials
            .hash_password(registration.password.expose())
            .await?;

        let account = Account {
            id: Uuid::new_v4(),
            name: registration.name,
            email: registration.email,
            password_hash,
            phone: registration.phone,
            created_at: stored_now(),
        };

        // The unique index still guards against a concurrent registration slipping in here.
        self.repo.create_account(&account).await?;
        tracing::info!("Account registered: {}", account.id);

        self.session_for(&account)
    }

    pub async fn login(&self, email: &str, password: &Masked<String>) -> CoreResult<AuthSession> {
        let account = self
            .repo
            .find_by_email(email)
            .await?
            .ok_or(CoreError::InvalidCredentials)?;

        if !self
            .credentials
            .verify_password(password.expose(), &account.password_hash)
            .await?
        {
            tracing::debug!("Password mismatch for account {}", account.id);
            return Err(CoreError::InvalidCredentials);
        }

        self.session_for(&account)
    }

    pub async fn profile(&self, account_id: Uuid) -> CoreResult<AccountProfile> {
        self.repo
            .find_by_id(account_id)
            .await?
            .map(AccountProfile::from)
            .ok_or(CoreError::NotFound)
    }

    fn session_for(&self, account: &Account) -> CoreResult<AuthSession> {
        Ok(AuthSession {
            token: self.credentials.issue_token(account.id)?,
            user: PublicAccount::from(account),
        })
    }
}
