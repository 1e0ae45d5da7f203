//! Orders Repository

use async_trait::async_trait;
use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query, query_as, types::Json};

use crate::database::Db;

use super::{
    errors::OrdersServiceError,
    models::{
        Order, OrderFilter, OrderLine, OrderStatusStats, OrderUpdate, OrderUuid, ShippingAddress,
    },
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const UPDATE_ORDER_SQL: &str = include_str!("sql/update_order.sql");
const ORDER_STATS_SQL: &str = include_str!("sql/order_stats.sql");

/// Storage port for orders.
///
/// One call is one atomic store operation; the adapter's transaction is the
/// unit of consistency. Concurrent updates to the same order are not fenced
/// beyond that — last write wins.
#[async_trait]
pub trait OrdersRepository: Send + Sync {
    async fn insert_order(&self, order: &Order) -> Result<(), OrdersServiceError>;

    async fn get_order(&self, order: OrderUuid) -> Result<Order, OrdersServiceError>;

    async fn list_orders(&self, filter: &OrderFilter) -> Result<Vec<Order>, OrdersServiceError>;

    /// Apply the populated fields of `update`, leaving the rest untouched.
    async fn update_order(
        &self,
        order: OrderUuid,
        update: &OrderUpdate,
        updated_at: Timestamp,
    ) -> Result<Order, OrdersServiceError>;

    async fn order_stats(&self) -> Result<Vec<OrderStatusStats>, OrdersServiceError>;
}

#[derive(Debug, Clone)]
pub struct PgOrdersRepository {
    db: Db,
}

impl PgOrdersRepository {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrdersRepository for PgOrdersRepository {
    async fn insert_order(&self, order: &Order) -> Result<(), OrdersServiceError> {
        let total_amount = bind_amount(order.total_amount, "total_amount")?;

        let mut tx = self.db.begin().await?;

        query(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(&order.owner_id)
            .bind(Json(&order.items))
            .bind(total_amount)
            .bind(order.status.as_str())
            .bind(order.payment_status.as_str())
            .bind(Json(&order.shipping_address))
            .bind(order.tracking_number.as_deref())
            .bind(order.notes.as_deref())
            .bind(SqlxTimestamp::from(order.created_at))
            .bind(SqlxTimestamp::from(order.updated_at))
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn get_order(&self, order: OrderUuid) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let found = query_as::<Postgres, Order>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(found)
    }

    async fn list_orders(&self, filter: &OrderFilter) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = query_as::<Postgres, Order>(LIST_ORDERS_SQL)
            .bind(filter.owner_id.as_deref())
            .bind(filter.status.map(|s| s.as_str()))
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn update_order(
        &self,
        order: OrderUuid,
        update: &OrderUpdate,
        updated_at: Timestamp,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = query_as::<Postgres, Order>(UPDATE_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(update.status.map(|s| s.as_str()))
            .bind(update.payment_status.map(|s| s.as_str()))
            .bind(update.tracking_number.as_deref())
            .bind(update.notes.as_deref())
            .bind(SqlxTimestamp::from(updated_at))
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn order_stats(&self) -> Result<Vec<OrderStatusStats>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let rows = query(ORDER_STATS_SQL).fetch_all(&mut *tx).await?;

        tx.commit().await?;

        rows.iter()
            .map(|row| {
                Ok(OrderStatusStats {
                    status: try_get_status(row, "status")?,
                    count: try_get_amount_row(row, "count")?,
                    revenue: try_get_amount_row(row, "revenue")?,
                })
            })
            .collect()
    }
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let Json(items): Json<Vec<OrderLine>> = row.try_get("items")?;
        let Json(shipping_address): Json<ShippingAddress> = row.try_get("shipping_address")?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            owner_id: row.try_get("owner_id")?,
            items,
            total_amount: try_get_amount(row, "total_amount")?,
            status: try_get_status(row, "status")?,
            payment_status: {
                let raw: String = row.try_get("payment_status")?;
                raw.parse().map_err(|e| decode_error("payment_status", e))?
            },
            shipping_address,
            tracking_number: row.try_get("tracking_number")?,
            notes: row.try_get("notes")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

fn try_get_status(row: &PgRow, col: &str) -> Result<super::models::OrderStatus, sqlx::Error> {
    let raw: String = row.try_get(col)?;
    raw.parse().map_err(|e| decode_error(col, e))
}

fn try_get_amount(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    let amount_i64: i64 = row.try_get(col)?;

    u64::try_from(amount_i64).map_err(|e| decode_error(col, e))
}

fn try_get_amount_row(row: &PgRow, col: &str) -> Result<u64, OrdersServiceError> {
    try_get_amount(row, col).map_err(Into::into)
}

fn bind_amount(amount: u64, col: &str) -> Result<i64, OrdersServiceError> {
    i64::try_from(amount)
        .map_err(|e| decode_error(col, e))
        .map_err(Into::into)
}

fn decode_error(
    col: &str,
    source: impl std::error::Error + Send + Sync + 'static,
) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(source),
    }
}
