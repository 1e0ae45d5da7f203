//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        inquiries::{InquiriesService, StoreInquiriesService, repository::PgInquiriesRepository},
        orders::{OrdersService, StoreOrdersService, repository::PgOrdersRepository},
        products::{ProductsService, StoreProductsService, repository::PgProductsRepository},
    },
    notifications::{NotificationSink, TracingNotificationSink},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub orders: Arc<dyn OrdersService>,
    pub products: Arc<dyn ProductsService>,
    pub inquiries: Arc<dyn InquiriesService>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::wire(Db::new(pool), Arc::new(TracingNotificationSink)))
    }

    /// Wire the Postgres-backed services over the given pool and sink.
    #[must_use]
    pub fn wire(db: Db, notifications: Arc<dyn NotificationSink>) -> Self {
        Self {
            orders: Arc::new(StoreOrdersService::new(
                Arc::new(PgOrdersRepository::new(db.clone())),
                notifications.clone(),
            )),
            products: Arc::new(StoreProductsService::new(
                Arc::new(PgProductsRepository::new(db.clone())),
                notifications.clone(),
            )),
            inquiries: Arc::new(StoreInquiriesService::new(
                Arc::new(PgInquiriesRepository::new(db)),
                notifications,
            )),
        }
    }
}
