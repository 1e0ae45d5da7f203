//! Admin summary formatters.
//!
//! Plain-text summaries in the storefront's house style, ready for a
//! messaging channel. Timestamps render in UTC.

use std::fmt::Write as _;

use uuid::Uuid;

use crate::domain::{inquiries::models::Inquiry, orders::models::Order, products::models::Product};

const CURRENCY_SYMBOL: &str = "₹";

/// Render minor units as a display amount.
fn amount(minor: u64) -> String {
    let units = minor / 100;
    let cents = minor % 100;

    if cents == 0 {
        format!("{CURRENCY_SYMBOL}{units}")
    } else {
        format!("{CURRENCY_SYMBOL}{units}.{cents:02}")
    }
}

/// Short human-friendly reference: the last eight hex digits, uppercased.
fn short_code(uuid: Uuid) -> String {
    let simple = uuid.simple().to_string();
    let tail = simple.get(simple.len().saturating_sub(8)..).unwrap_or("");
    tail.to_ascii_uppercase()
}

fn timestamp(ts: jiff::Timestamp) -> String {
    ts.strftime("%d/%m/%Y %H:%M").to_string()
}

/// Summary for a freshly placed order.
#[must_use]
pub fn new_order(order: &Order) -> String {
    let mut lines = String::new();

    for line in &order.items {
        let _ = writeln!(
            lines,
            "• {} ({}, {}) x{} - {}",
            line.product_name,
            line.size.as_deref().unwrap_or("-"),
            line.color.as_deref().unwrap_or("-"),
            line.quantity,
            amount(line.subtotal()),
        );
    }

    format!(
        "🛍️ *NEW ORDER RECEIVED!*\n\
         \n\
         📦 Order ID: #{code}\n\
         💰 Total Amount: {total}\n\
         \n\
         *Items:*\n\
         {lines}\
         \n\
         *Shipping Address:*\n\
         {name}\n\
         {address}\n\
         {city}, {state} {postal}\n\
         📞 {phone}\n\
         \n\
         💳 Payment: Cash on Delivery\n\
         \n\
         ⏰ Ordered: {ordered}\n\
         \n\
         Please process this order promptly!",
        code = short_code(order.uuid.into_uuid()),
        total = amount(order.total_amount),
        lines = lines,
        name = order.shipping_address.full_name,
        address = order.shipping_address.address_line1,
        city = order.shipping_address.city,
        state = order.shipping_address.state,
        postal = order.shipping_address.postal_code,
        phone = order.shipping_address.phone,
        ordered = timestamp(order.created_at),
    )
}

/// Summary for a cancelled order.
#[must_use]
pub fn order_cancelled(order: &Order) -> String {
    format!(
        "❌ *ORDER CANCELLED*\n\
         \n\
         📦 Order ID: #{code}\n\
         💰 Amount: {total}\n\
         \n\
         *Customer:*\n\
         {name}\n\
         📞 {phone}\n\
         \n\
         ⏰ Cancelled: {cancelled}\n\
         \n\
         Please review and process refund if applicable.",
        code = short_code(order.uuid.into_uuid()),
        total = amount(order.total_amount),
        name = order.shipping_address.full_name,
        phone = order.shipping_address.phone,
        cancelled = timestamp(order.updated_at),
    )
}

/// Summary for a new contact inquiry.
#[must_use]
pub fn new_inquiry(inquiry: &Inquiry) -> String {
    format!(
        "📧 *NEW CONTACT INQUIRY*\n\
         \n\
         👤 Name: {name}\n\
         📧 Email: {email}\n\
         📞 Phone: {phone}\n\
         🧵 Service: {service}\n\
         \n\
         *Message:*\n\
         {message}\n\
         \n\
         ⏰ Received: {received}\n\
         \n\
         Please respond promptly!",
        name = inquiry.name,
        email = inquiry.email,
        phone = inquiry.phone.as_deref().unwrap_or("Not provided"),
        service = inquiry.service,
        message = inquiry.message,
        received = timestamp(inquiry.created_at),
    )
}

/// Alert raised when a listing goes out of stock.
#[must_use]
pub fn low_stock(product: &Product) -> String {
    format!(
        "⚠️ *LOW STOCK ALERT*\n\
         \n\
         📦 Product: {name}\n\
         🏷️ Category: {category}\n\
         💰 Price: {price}\n\
         \n\
         Stock is running low. Please restock soon!",
        name = product.name,
        category = product.category,
        price = amount(product.price),
    )
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use testresult::TestResult;

    use crate::domain::{
        orders::models::{
            OrderLine, OrderStatus, OrderUuid, PaymentStatus, ShippingAddress,
        },
        products::models::ProductUuid,
    };

    use super::*;

    fn sample_order() -> Result<Order, jiff::Error> {
        let created_at: Timestamp = "2026-03-10T09:30:00Z".parse()?;

        Ok(Order {
            uuid: OrderUuid::from_uuid(uuid::uuid!("0191f1e2-5f2a-7c81-b0ce-7e3996a1d2aa")),
            owner_id: "user-1".to_string(),
            items: vec![OrderLine {
                product_uuid: ProductUuid::new(),
                product_name: "Tailored Suit - Midnight Black".to_string(),
                unit_price: 2_499_00,
                quantity: 2,
                size: Some("M".to_string()),
                color: Some("Black".to_string()),
            }],
            total_amount: 4_998_00,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            shipping_address: ShippingAddress {
                full_name: "Priya Sharma".to_string(),
                address_line1: "14 Marine Drive".to_string(),
                address_line2: None,
                city: "Mumbai".to_string(),
                state: "Maharashtra".to_string(),
                postal_code: "400020".to_string(),
                country: "India".to_string(),
                phone: "+918812345678".to_string(),
            },
            tracking_number: None,
            notes: None,
            created_at,
            updated_at: created_at,
        })
    }

    #[test]
    fn amounts_render_in_major_units() {
        assert_eq!(amount(2_499_00), "₹2499");
        assert_eq!(amount(1_50), "₹1.50");
        assert_eq!(amount(0), "₹0");
    }

    #[test]
    fn short_codes_are_the_uppercased_tail() {
        let code = short_code(uuid::uuid!("0191f1e2-5f2a-7c81-b0ce-7e3996a1d2aa"));

        assert_eq!(code, "96A1D2AA");
    }

    #[test]
    fn new_order_summary_carries_reference_total_and_address() -> TestResult {
        let summary = new_order(&sample_order()?);

        assert!(summary.contains("NEW ORDER RECEIVED"));
        assert!(summary.contains("#96A1D2AA"));
        assert!(summary.contains("Total Amount: ₹4998"));
        assert!(summary.contains("• Tailored Suit - Midnight Black (M, Black) x2 - ₹4998"));
        assert!(summary.contains("Mumbai, Maharashtra 400020"));
        assert!(summary.contains("Ordered: 10/03/2026 09:30"));

        Ok(())
    }

    #[test]
    fn cancellation_summary_names_the_customer() -> TestResult {
        let summary = order_cancelled(&sample_order()?);

        assert!(summary.contains("ORDER CANCELLED"));
        assert!(summary.contains("Priya Sharma"));
        assert!(summary.contains("₹4998"));

        Ok(())
    }
}
