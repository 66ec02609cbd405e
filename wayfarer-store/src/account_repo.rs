use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use wayfarer_core::models::Account;
use wayfarer_core::repository::AccountRepository;
use wayfarer_core::CoreResult;

use crate::database::storage_error;

pub struct StoreAccountRepository {
    pool: PgPool,
}

impl StoreAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    phone: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Account {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            phone: row.phone,
            created_at: row.created_at,
        }
    }
}

const SELECT_ACCOUNT: &str =
    "SELECT id, name, email, password_hash, phone, created_at FROM accounts";

#[async_trait]
impl AccountRepository for StoreAccountRepository {
    async fn create_account(&self, account: &Account) -> CoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO accounts (id, name, email, password_hash, phone, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(account.id)
        .bind(&account.name)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(&account.phone)
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> CoreResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(&format!("{} WHERE email = $1", SELECT_ACCOUNT))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(row.map(Account::from))
    }

    async fn find_by_id(&self, id: Uuid) -> CoreResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(&format!("{} WHERE id = $1", SELECT_ACCOUNT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(row.map(Account::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_maps_every_column() {
        let id = Uuid::new_v4();
        let created_at = Utc::now();
        let account = Account::from(AccountRow {
            id,
            name: "Ann".into(),
            email: "ann@x.com".into(),
            password_hash: "$2b$10$hash".into(),
            phone: None,
            created_at,
        });

        assert_eq!(account.id, id);
        assert_eq!(account.email, "ann@x.com");
        assert_eq!(account.password_hash, "$2b$10$hash");
        assert_eq!(account.created_at, created_at);
    }
}
