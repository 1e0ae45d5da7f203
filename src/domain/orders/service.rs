//! Orders service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::{
    auth::Actor,
    notifications::{NotificationSink, format},
};

use super::{
    address,
    errors::OrdersServiceError,
    lifecycle,
    models::{
        NewOrder, Order, OrderFilter, OrderStatus, OrderStatusStats, OrderUpdate, OrderUuid,
        PaymentStatus, order_total,
    },
    repository::OrdersRepository,
};

/// Order lifecycle service over an injected store.
///
/// All decision logic (validation, transition rules, totals) lives in the
/// pure modules of this domain; this type only sequences store round-trips
/// and notification sends.
#[derive(Clone)]
pub struct StoreOrdersService {
    repository: Arc<dyn OrdersRepository>,
    notifications: Arc<dyn NotificationSink>,
}

impl std::fmt::Debug for StoreOrdersService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreOrdersService").finish_non_exhaustive()
    }
}

impl StoreOrdersService {
    #[must_use]
    pub fn new(
        repository: Arc<dyn OrdersRepository>,
        notifications: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            repository,
            notifications,
        }
    }
}

#[async_trait]
impl OrdersService for StoreOrdersService {
    async fn create_order(
        &self,
        actor: &Actor,
        order: NewOrder,
    ) -> Result<Order, OrdersServiceError> {
        let mut errors = Vec::new();

        if order.items.is_empty() {
            errors.push("Order items are required".to_string());
        }

        if order.items.iter().any(|line| line.quantity == 0) {
            errors.push("Line quantities must be at least 1".to_string());
        }

        if let Err(address_errors) = address::validate(&order.shipping_address) {
            errors.extend(address_errors);
        }

        if !errors.is_empty() {
            return Err(OrdersServiceError::Validation(errors));
        }

        // The total is always recomputed from the line snapshots; any
        // client-supplied figure never reaches this point.
        let total_amount = order_total(&order.items);
        let now = Timestamp::now();

        let record = Order {
            uuid: order.uuid,
            owner_id: actor.user_id.clone(),
            items: order.items,
            total_amount,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            shipping_address: order.shipping_address,
            tracking_number: None,
            notes: order.notes,
            created_at: now,
            updated_at: now,
        };

        self.repository.insert_order(&record).await?;

        self.notifications.send(&format::new_order(&record)).await;

        Ok(record)
    }

    async fn get_order(
        &self,
        actor: &Actor,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError> {
        let found = self.repository.get_order(order).await?;

        if !actor.may_manage(&found.owner_id) {
            return Err(OrdersServiceError::Forbidden);
        }

        Ok(found)
    }

    async fn list_orders(
        &self,
        actor: &Actor,
        mut filter: OrderFilter,
    ) -> Result<Vec<Order>, OrdersServiceError> {
        if !actor.is_admin() {
            filter.owner_id = Some(actor.user_id.clone());
        }

        self.repository.list_orders(&filter).await
    }

    async fn update_order(
        &self,
        actor: &Actor,
        order: OrderUuid,
        update: OrderUpdate,
    ) -> Result<Order, OrdersServiceError> {
        if !actor.is_admin() {
            return Err(OrdersServiceError::Forbidden);
        }

        let current = self.repository.get_order(order).await?;

        if let Some(next) = update.status {
            if !lifecycle::is_valid_status_transition(current.status, next) {
                return Err(OrdersServiceError::InvalidState {
                    current: current.status,
                    attempted: next,
                });
            }
        }

        // A tracking number may ride along with the update that marks the
        // order shipped, but never earlier.
        let effective_status = update.status.unwrap_or(current.status);
        if update.tracking_number.is_some() && !tracking_available(effective_status) {
            return Err(OrdersServiceError::TrackingUnavailable {
                current: current.status,
            });
        }

        self.repository
            .update_order(order, &update, Timestamp::now())
            .await
    }

    async fn cancel_order(
        &self,
        actor: &Actor,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError> {
        let current = self.repository.get_order(order).await?;

        if !actor.may_manage(&current.owner_id) {
            return Err(OrdersServiceError::Forbidden);
        }

        if !lifecycle::can_cancel(current.status) {
            return Err(OrdersServiceError::InvalidState {
                current: current.status,
                attempted: OrderStatus::Cancelled,
            });
        }

        let update = OrderUpdate {
            status: Some(OrderStatus::Cancelled),
            ..OrderUpdate::default()
        };

        let cancelled = self
            .repository
            .update_order(order, &update, Timestamp::now())
            .await?;

        self.notifications
            .send(&format::order_cancelled(&cancelled))
            .await;

        Ok(cancelled)
    }

    async fn set_tracking(
        &self,
        actor: &Actor,
        order: OrderUuid,
        tracking_number: String,
    ) -> Result<Order, OrdersServiceError> {
        if !actor.is_admin() {
            return Err(OrdersServiceError::Forbidden);
        }

        let current = self.repository.get_order(order).await?;

        if !tracking_available(current.status) {
            return Err(OrdersServiceError::TrackingUnavailable {
                current: current.status,
            });
        }

        let update = OrderUpdate {
            tracking_number: Some(tracking_number),
            ..OrderUpdate::default()
        };

        self.repository
            .update_order(order, &update, Timestamp::now())
            .await
    }

    async fn order_stats(&self, actor: &Actor) -> Result<Vec<OrderStatusStats>, OrdersServiceError> {
        if !actor.is_admin() {
            return Err(OrdersServiceError::Forbidden);
        }

        self.repository.order_stats().await
    }
}

fn tracking_available(status: OrderStatus) -> bool {
    matches!(status, OrderStatus::Shipped | OrderStatus::Delivered)
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Create an order from a checkout snapshot, owned by `actor`.
    async fn create_order(
        &self,
        actor: &Actor,
        order: NewOrder,
    ) -> Result<Order, OrdersServiceError>;

    /// Fetch a single order; owner or admin only.
    async fn get_order(&self, actor: &Actor, order: OrderUuid)
    -> Result<Order, OrdersServiceError>;

    /// List orders, newest first. Non-admin actors only see their own.
    async fn list_orders(
        &self,
        actor: &Actor,
        filter: OrderFilter,
    ) -> Result<Vec<Order>, OrdersServiceError>;

    /// Apply an admin update (status, payment status, tracking, notes).
    async fn update_order(
        &self,
        actor: &Actor,
        order: OrderUuid,
        update: OrderUpdate,
    ) -> Result<Order, OrdersServiceError>;

    /// Cancel an order while it is still pending or processing.
    async fn cancel_order(
        &self,
        actor: &Actor,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError>;

    /// Record the carrier tracking number once the order has shipped.
    async fn set_tracking(
        &self,
        actor: &Actor,
        order: OrderUuid,
        tracking_number: String,
    ) -> Result<Order, OrdersServiceError>;

    /// Per-status counts and revenue for the back office.
    async fn order_stats(&self, actor: &Actor)
    -> Result<Vec<OrderStatusStats>, OrdersServiceError>;
}
