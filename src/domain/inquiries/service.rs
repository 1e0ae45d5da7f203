//! Inquiries service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::{
    auth::Actor,
    notifications::{NotificationSink, format},
};

use super::{
    errors::InquiriesServiceError,
    models::{Inquiry, InquiryStats, InquiryStatus, InquiryUpdate, InquiryUuid, NewInquiry},
    repository::InquiriesRepository,
};

/// Contact inquiry service over an injected store.
#[derive(Clone)]
pub struct StoreInquiriesService {
    repository: Arc<dyn InquiriesRepository>,
    notifications: Arc<dyn NotificationSink>,
}

impl std::fmt::Debug for StoreInquiriesService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreInquiriesService").finish_non_exhaustive()
    }
}

impl StoreInquiriesService {
    #[must_use]
    pub fn new(
        repository: Arc<dyn InquiriesRepository>,
        notifications: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            repository,
            notifications,
        }
    }
}

#[async_trait]
impl InquiriesService for StoreInquiriesService {
    async fn submit_inquiry(
        &self,
        inquiry: NewInquiry,
    ) -> Result<Inquiry, InquiriesServiceError> {
        let mut errors = Vec::new();

        if inquiry.name.trim().is_empty() {
            errors.push("Name is required".to_string());
        }

        if inquiry.email.trim().is_empty() || !inquiry.email.contains('@') {
            errors.push("A valid email is required".to_string());
        }

        if inquiry.message.trim().is_empty() {
            errors.push("Message is required".to_string());
        }

        if !errors.is_empty() {
            return Err(InquiriesServiceError::Validation(errors));
        }

        let now = Timestamp::now();

        let record = Inquiry {
            uuid: inquiry.uuid,
            name: inquiry.name,
            email: inquiry.email.to_lowercase(),
            phone: inquiry.phone,
            service: inquiry.service,
            message: inquiry.message,
            status: InquiryStatus::New,
            admin_notes: None,
            created_at: now,
            updated_at: now,
        };

        self.repository.insert_inquiry(&record).await?;

        self.notifications.send(&format::new_inquiry(&record)).await;

        Ok(record)
    }

    async fn list_inquiries(&self, actor: &Actor) -> Result<Vec<Inquiry>, InquiriesServiceError> {
        if !actor.is_admin() {
            return Err(InquiriesServiceError::Forbidden);
        }

        self.repository.list_inquiries().await
    }

    async fn update_inquiry(
        &self,
        actor: &Actor,
        inquiry: InquiryUuid,
        update: InquiryUpdate,
    ) -> Result<Inquiry, InquiriesServiceError> {
        if !actor.is_admin() {
            return Err(InquiriesServiceError::Forbidden);
        }

        self.repository
            .update_inquiry(inquiry, &update, Timestamp::now())
            .await
    }

    async fn delete_inquiry(
        &self,
        actor: &Actor,
        inquiry: InquiryUuid,
    ) -> Result<(), InquiriesServiceError> {
        if !actor.is_admin() {
            return Err(InquiriesServiceError::Forbidden);
        }

        let rows_affected = self.repository.delete_inquiry(inquiry).await?;

        if rows_affected == 0 {
            return Err(InquiriesServiceError::NotFound);
        }

        Ok(())
    }

    async fn inquiry_stats(&self, actor: &Actor) -> Result<InquiryStats, InquiriesServiceError> {
        if !actor.is_admin() {
            return Err(InquiriesServiceError::Forbidden);
        }

        self.repository.inquiry_stats().await
    }
}

#[automock]
#[async_trait]
pub trait InquiriesService: Send + Sync {
    /// Record a contact form submission; public.
    async fn submit_inquiry(&self, inquiry: NewInquiry)
    -> Result<Inquiry, InquiriesServiceError>;

    /// List inquiries, newest first; admin only.
    async fn list_inquiries(&self, actor: &Actor) -> Result<Vec<Inquiry>, InquiriesServiceError>;

    /// Update triage status and notes; admin only.
    async fn update_inquiry(
        &self,
        actor: &Actor,
        inquiry: InquiryUuid,
        update: InquiryUpdate,
    ) -> Result<Inquiry, InquiriesServiceError>;

    /// Remove an inquiry; admin only.
    async fn delete_inquiry(
        &self,
        actor: &Actor,
        inquiry: InquiryUuid,
    ) -> Result<(), InquiriesServiceError>;

    /// Inquiry counters for the back office; admin only.
    async fn inquiry_stats(&self, actor: &Actor) -> Result<InquiryStats, InquiriesServiceError>;
}
