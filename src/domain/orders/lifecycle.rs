//! Order lifecycle state machine.
//!
//! Forward progress follows the fixed sequence
//! `pending → processing → shipped → delivered`. Cancellation is an
//! absorbing side exit: permitted as a *transition* from any non-terminal
//! status, while the customer-facing cancel *operation* is held to the
//! stricter pending/processing window enforced in the service layer.
//! `delivered` and `cancelled` are terminal; nothing moves out of them.

use jiff::{SignedDuration, Timestamp};

use super::models::OrderStatus;

/// The forward (non-cancelled) status sequence, in order.
pub const FORWARD_SEQUENCE: [OrderStatus; 4] = [
    OrderStatus::Pending,
    OrderStatus::Processing,
    OrderStatus::Shipped,
    OrderStatus::Delivered,
];

/// Standard fulfilment window used for the customer-facing estimate.
const DELIVERY_WINDOW: SignedDuration = SignedDuration::from_hours(5 * 24);

/// Position of a status in [`FORWARD_SEQUENCE`]; `None` for `cancelled`.
#[must_use]
pub fn forward_index(status: OrderStatus) -> Option<usize> {
    FORWARD_SEQUENCE.iter().position(|s| *s == status)
}

/// Returns `true` if no further transitions are possible.
#[must_use]
pub fn is_terminal(status: OrderStatus) -> bool {
    matches!(status, OrderStatus::Delivered | OrderStatus::Cancelled)
}

/// Whether an admin status change from `current` to `next` is legal.
///
/// Terminal states are checked first, so a delivered or already-cancelled
/// order cannot be cancelled again. From any live status, cancellation is
/// always legal and forward movement must be monotonic (staying in place
/// is permitted).
#[must_use]
pub fn is_valid_status_transition(current: OrderStatus, next: OrderStatus) -> bool {
    if is_terminal(current) {
        return false;
    }

    if next == OrderStatus::Cancelled {
        return true;
    }

    match (forward_index(current), forward_index(next)) {
        (Some(from), Some(to)) => to >= from,
        _ => false,
    }
}

/// Whether the customer-facing cancel operation is still open.
///
/// Stricter than [`is_valid_status_transition`]: once the parcel has left
/// the atelier, cancellation goes through support, not the storefront.
#[must_use]
pub fn can_cancel(status: OrderStatus) -> bool {
    matches!(status, OrderStatus::Pending | OrderStatus::Processing)
}

/// Where an order sits on the fulfilment timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelinePosition {
    /// Zero-based step within [`FORWARD_SEQUENCE`].
    Step(usize),
    /// Off the timeline entirely.
    Cancelled,
}

/// Map a status to its rendering position on the order timeline.
#[must_use]
pub fn timeline_position(status: OrderStatus) -> TimelinePosition {
    forward_index(status).map_or(TimelinePosition::Cancelled, TimelinePosition::Step)
}

/// Customer-facing delivery estimate.
///
/// Display-only and never persisted: `created_at` plus the standard window,
/// or a delivered marker. Dates render in UTC.
#[must_use]
pub fn estimate_delivery(created_at: Timestamp, status: OrderStatus) -> String {
    if status == OrderStatus::Delivered {
        return "Delivered".to_string();
    }

    let estimated = created_at.saturating_add(DELIVERY_WINDOW).unwrap_or(created_at);
    format!("Est. {}", estimated.strftime("%b %-d"))
}
