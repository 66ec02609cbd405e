use std::sync::Arc;
use wayfarer_shared::Masked;

use crate::models::{ContactDraft, ContactMessage};
use crate::repository::ContactRepository;
use crate::CoreResult;

#[derive(Clone)]
pub struct ContactService {
    repo: Arc<dyn ContactRepository>,
}

impl ContactService {
    pub fn new(repo: Arc<dyn ContactRepository>) -> Self {
        Self { repo }
    }

    /// Persist a contact-form message. No deduplication and no email format check.
    pub async fn submit(&self, draft: ContactDraft) -> CoreResult<ContactMessage> {
        let message = ContactMessage::new(draft);
        self.repo.save_message(&message).await?;
        tracing::info!("Contact message received: {}", message.id);
        Ok(message)
    }

    /// Newsletter sign-up. Nothing is persisted; the caller only gets an acknowledgement.
    pub fn subscribe(&self, email: &str) -> String {
        tracing::info!("Newsletter subscription: {}", Masked::new(email));
        format!(
            "Thank you for subscribing with {}! You'll receive our next newsletter soon.",
            email
        )
    }
}
