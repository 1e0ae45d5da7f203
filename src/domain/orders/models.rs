//! Order Models

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    domain::{carts::models::CartLine, products::models::ProductUuid},
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<Order>;

/// Fulfilment status of an order.
///
/// Forward progress follows `pending → processing → shipped → delivered`;
/// `cancelled` is absorbing. See [`lifecycle`](super::lifecycle) for the
/// transition rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a status keyword.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised order status `{0}`")]
pub struct ParseOrderStatusError(String);

impl FromStr for OrderStatus {
    type Err = ParseOrderStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(ParseOrderStatusError(other.to_string())),
        }
    }
}

/// Payment status, tracked independently of fulfilment status.
///
/// No automatic coupling: a cancelled order may still read `pending` or
/// `paid` here; refunds are handled outside this core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
}

impl PaymentStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a payment status keyword.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised payment status `{0}`")]
pub struct ParsePaymentStatusError(String);

impl FromStr for PaymentStatus {
    type Err = ParsePaymentStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "failed" => Ok(Self::Failed),
            "refunded" => Ok(Self::Refunded),
            other => Err(ParsePaymentStatusError(other.to_string())),
        }
    }
}

/// One product+variant+quantity entry within an order.
///
/// Name and unit price are snapshots taken at order creation; a later
/// catalogue change never rewrites them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_uuid: ProductUuid,
    pub product_name: String,
    /// Unit price in minor units, snapshotted at creation.
    pub unit_price: u64,
    pub quantity: u32,
    pub size: Option<String>,
    pub color: Option<String>,
}

impl OrderLine {
    /// `unit_price × quantity` for this line.
    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.unit_price * u64::from(self.quantity)
    }
}

/// What checkout copies out of the cart snapshot.
impl From<CartLine> for OrderLine {
    fn from(line: CartLine) -> Self {
        Self {
            product_uuid: line.product_uuid,
            product_name: line.product_name,
            unit_price: line.unit_price,
            quantity: line.quantity,
            size: Some(line.size),
            color: Some(line.color),
        }
    }
}

/// Shipping destination captured at order creation.
///
/// A snapshot: never re-synced to later changes in the customer's saved
/// address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub full_name: String,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub phone: String,
}

/// Order Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub uuid: OrderUuid,
    /// Opaque identity of the owning customer.
    pub owner_id: String,
    pub items: Vec<OrderLine>,
    /// Sum of line subtotals at creation time, in minor units.
    pub total_amount: u64,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub shipping_address: ShippingAddress,
    pub tracking_number: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Order Model
///
/// Carries no total: [`order_total`] recomputes it server-side from the
/// line snapshots, never trusting a client-supplied figure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub items: Vec<OrderLine>,
    pub shipping_address: ShippingAddress,
    pub notes: Option<String>,
}

/// Order Update Model
///
/// Absent fields are left untouched by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderUpdate {
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub tracking_number: Option<String>,
    pub notes: Option<String>,
}

/// Filter for order listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub owner_id: Option<String>,
    pub status: Option<OrderStatus>,
}

/// Per-status order count and revenue, for the back office.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderStatusStats {
    pub status: OrderStatus,
    pub count: u64,
    /// Summed `total_amount` of orders in this status, in minor units.
    pub revenue: u64,
}

/// Sum of `unit_price × quantity` over all lines.
#[must_use]
pub fn order_total(items: &[OrderLine]) -> u64 {
    items.iter().map(OrderLine::subtotal).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(unit_price: u64, quantity: u32) -> OrderLine {
        OrderLine {
            product_uuid: ProductUuid::new(),
            product_name: "Tailored Suit".to_string(),
            unit_price,
            quantity,
            size: Some("M".to_string()),
            color: Some("Black".to_string()),
        }
    }

    #[test]
    fn order_total_sums_line_subtotals() {
        let items = [line(100, 2), line(50, 1)];

        assert_eq!(order_total(&items), 250);
    }

    #[test]
    fn order_total_of_no_lines_is_zero() {
        assert_eq!(order_total(&[]), 0);
    }

    #[test]
    fn checkout_conversion_preserves_the_cart_snapshot() {
        let cart_line = CartLine {
            product_uuid: ProductUuid::new(),
            product_name: "Silk Dress - Pearl White".to_string(),
            unit_price: 2_899_00,
            image: "/collection_womenswear.png".to_string(),
            size: "S".to_string(),
            color: "Ivory".to_string(),
            quantity: 2,
        };

        let order_line = OrderLine::from(cart_line.clone());

        assert_eq!(order_line.product_uuid, cart_line.product_uuid);
        assert_eq!(order_line.product_name, cart_line.product_name);
        assert_eq!(order_line.unit_price, cart_line.unit_price);
        assert_eq!(order_line.quantity, 2);
        assert_eq!(order_line.size.as_deref(), Some("S"));
        assert_eq!(order_line.color.as_deref(), Some("Ivory"));
        assert_eq!(order_line.subtotal(), 2 * 2_899_00);
    }

    #[test]
    fn status_round_trips_through_str() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
        }
    }

    #[test]
    fn unknown_status_keyword_is_rejected() {
        let result = "shippedd".parse::<OrderStatus>();

        assert!(result.is_err(), "expected parse failure, got {result:?}");
    }
}
