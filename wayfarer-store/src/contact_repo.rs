use async_trait::async_trait;
use sqlx::PgPool;
use wayfarer_core::models::ContactMessage;
use wayfarer_core::repository::ContactRepository;
use wayfarer_core::CoreResult;

use crate::database::storage_error;

pub struct StoreContactRepository {
    pool: PgPool,
}

impl StoreContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactRepository for StoreContactRepository {
    async fn save_message(&self, message: &ContactMessage) -> CoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO contact_messages (id, name, email, phone, message, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(message.id)
        .bind(&message.name)
        .bind(&message.email)
        .bind(&message.phone)
        .bind(&message.message)
        .bind(message.created_at)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(())
    }
}
