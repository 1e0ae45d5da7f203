//! Cart Models
//!
//! The cart is ephemeral, client-local state: a value object mutated by
//! pure operations, with persistence layered on separately in
//! [`storage`](super::storage). It is never stored server-side as its own
//! entity.

use serde::{Deserialize, Serialize};

use crate::domain::products::models::ProductUuid;

/// The (product, size, color) triple that distinguishes otherwise-identical
/// selections.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariantKey {
    pub product_uuid: ProductUuid,
    pub size: String,
    pub color: String,
}

/// One product+variant+quantity entry in the cart.
///
/// Name, price, and image are snapshots taken when the line was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_uuid: ProductUuid,
    pub product_name: String,
    /// Unit price in minor units, snapshotted at add time.
    pub unit_price: u64,
    pub image: String,
    pub size: String,
    pub color: String,
    pub quantity: u32,
}

impl CartLine {
    /// The variant identity of this line.
    #[must_use]
    pub fn variant(&self) -> VariantKey {
        VariantKey {
            product_uuid: self.product_uuid,
            size: self.size.clone(),
            color: self.color.clone(),
        }
    }

    fn matches(&self, key: &VariantKey) -> bool {
        self.product_uuid == key.product_uuid && self.size == key.size && self.color == key.color
    }

    /// `unit_price × quantity` for this line.
    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.unit_price * u64::from(self.quantity)
    }
}

/// Cart Model
///
/// Lines keep insertion order; repeat additions of the same variant merge
/// into the existing line instead of appending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add a line, merging quantities when the variant already exists.
    ///
    /// Merged quantities have no enforced upper bound.
    pub fn add_line(&mut self, line: CartLine) {
        let key = line.variant();

        if let Some(existing) = self.lines.iter_mut().find(|l| l.matches(&key)) {
            existing.quantity += line.quantity;
        } else {
            self.lines.push(line);
        }
    }

    /// Remove the line with the given variant identity; no-op if absent.
    pub fn remove_line(&mut self, key: &VariantKey) {
        self.lines.retain(|line| !line.matches(key));
    }

    /// Replace a line's quantity.
    ///
    /// A quantity below 1 is a no-op — the line is neither removed nor
    /// clamped; the UI disables decrementing past 1.
    pub fn update_quantity(&mut self, key: &VariantKey, quantity: u32) {
        if quantity < 1 {
            return;
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.matches(key)) {
            line.quantity = quantity;
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of `unit_price × quantity` over all lines, in minor units.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suit_line(size: &str, color: &str, quantity: u32) -> CartLine {
        CartLine {
            product_uuid: ProductUuid::from_uuid(uuid::uuid!(
                "0191f1e2-5f2a-7c81-b0ce-7e3996a1d2aa"
            )),
            product_name: "Tailored Suit - Midnight Black".to_string(),
            unit_price: 2_499_00,
            image: "/collection_menswear.png".to_string(),
            size: size.to_string(),
            color: color.to_string(),
            quantity,
        }
    }

    #[test]
    fn repeat_addition_of_same_variant_merges_quantities() {
        let mut cart = Cart::new();

        cart.add_line(suit_line("M", "Black", 1));
        cart.add_line(suit_line("M", "Black", 1));

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn different_sizes_of_same_product_stay_distinct_lines() {
        let mut cart = Cart::new();

        cart.add_line(suit_line("M", "Black", 1));
        cart.add_line(suit_line("L", "Black", 1));

        assert_eq!(cart.lines().len(), 2);
    }

    #[test]
    fn lines_keep_insertion_order_across_merges() {
        let mut cart = Cart::new();

        cart.add_line(suit_line("M", "Black", 1));
        cart.add_line(suit_line("L", "Navy", 1));
        cart.add_line(suit_line("M", "Black", 2));

        let sizes: Vec<&str> = cart.lines().iter().map(|l| l.size.as_str()).collect();
        assert_eq!(sizes, ["M", "L"]);
        assert_eq!(cart.lines()[0].quantity, 3);
    }

    #[test]
    fn remove_line_targets_only_the_matching_variant() {
        let mut cart = Cart::new();

        cart.add_line(suit_line("M", "Black", 1));
        cart.add_line(suit_line("L", "Black", 1));

        cart.remove_line(&suit_line("M", "Black", 1).variant());

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].size, "L");
    }

    #[test]
    fn removing_an_absent_variant_is_a_noop() {
        let mut cart = Cart::new();
        cart.add_line(suit_line("M", "Black", 1));

        cart.remove_line(&suit_line("XL", "Camel", 1).variant());

        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn update_quantity_replaces_the_line_quantity() {
        let mut cart = Cart::new();
        cart.add_line(suit_line("M", "Black", 1));

        cart.update_quantity(&suit_line("M", "Black", 1).variant(), 4);

        assert_eq!(cart.lines()[0].quantity, 4);
    }

    #[test]
    fn update_quantity_below_one_is_a_noop_not_a_removal() {
        let mut cart = Cart::new();
        cart.add_line(suit_line("M", "Black", 3));

        cart.update_quantity(&suit_line("M", "Black", 3).variant(), 0);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 3);
    }

    #[test]
    fn totals_and_counts_stay_consistent_through_mutations() {
        let mut cart = Cart::new();

        cart.add_line(suit_line("M", "Black", 2));
        cart.add_line(suit_line("L", "Navy", 1));
        cart.update_quantity(&suit_line("L", "Navy", 1).variant(), 3);
        cart.remove_line(&suit_line("M", "Black", 1).variant());
        cart.add_line(suit_line("S", "Charcoal", 1));

        let expected_total: u64 = cart.lines().iter().map(CartLine::subtotal).sum();
        let expected_count: u64 = cart.lines().iter().map(|l| u64::from(l.quantity)).sum();

        assert_eq!(cart.total(), expected_total);
        assert_eq!(cart.total(), 4 * 2_499_00);
        assert_eq!(cart.count(), expected_count);
        assert_eq!(cart.count(), 4);
    }

    #[test]
    fn cleared_cart_is_empty_with_zero_totals() {
        let mut cart = Cart::new();
        cart.add_line(suit_line("M", "Black", 2));

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total(), 0);
        assert_eq!(cart.count(), 0);
    }
}
