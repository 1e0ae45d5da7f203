//! Test context for service-level tests.

use std::sync::Arc;

use crate::domain::{
    inquiries::StoreInquiriesService, orders::StoreOrdersService, products::StoreProductsService,
};

use super::stores::{
    InMemoryInquiriesRepository, InMemoryOrdersRepository, InMemoryProductsRepository,
    RecordingNotificationSink,
};

pub(crate) struct TestContext {
    pub(crate) orders: StoreOrdersService,
    pub(crate) products: StoreProductsService,
    pub(crate) inquiries: StoreInquiriesService,
    pub(crate) notifications: Arc<RecordingNotificationSink>,
}

impl TestContext {
    pub(crate) fn new() -> Self {
        let notifications = Arc::new(RecordingNotificationSink::default());

        Self {
            orders: StoreOrdersService::new(
                Arc::new(InMemoryOrdersRepository::default()),
                notifications.clone(),
            ),
            products: StoreProductsService::new(
                Arc::new(InMemoryProductsRepository::default()),
                notifications.clone(),
            ),
            inquiries: StoreInquiriesService::new(
                Arc::new(InMemoryInquiriesRepository::default()),
                notifications.clone(),
            ),
            notifications,
        }
    }
}
