//! The cart read model.

use serde::{Deserialize, Serialize};

use crate::value_objects::{Money, ProductId};

use super::line::{LineId, LineItem};

/// Immutable cart snapshot: the line items plus derived totals.
///
/// `total` and `item_count` are derived values. They are recomputed from
/// `items` whenever a state is constructed — never patched incrementally —
/// so they cannot drift from the line list. Items keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartState {
    items: Vec<LineItem>,
    total: Money,
    item_count: u32,
}

impl CartState {
    /// Returns the empty cart.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a state from line items, recomputing the derived totals.
    pub fn from_items(items: Vec<LineItem>) -> Self {
        let total = items
            .iter()
            .fold(Money::zero(), |acc, line| acc + line.line_total());
        let item_count = items.iter().map(|line| line.quantity).sum();

        Self {
            items,
            total,
            item_count,
        }
    }

    /// Returns the line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Consumes the state, returning its line items.
    pub fn into_items(self) -> Vec<LineItem> {
        self.items
    }

    /// Returns the sum of line totals.
    pub fn total(&self) -> Money {
        self.total
    }

    /// Returns the sum of line quantities.
    pub fn item_count(&self) -> u32 {
        self.item_count
    }

    /// Returns true if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up a line by its merge key.
    pub fn line(&self, line_id: &LineId) -> Option<&LineItem> {
        self.items.iter().find(|line| &line.line_id == line_id)
    }

    /// Returns true if any line carries the given product.
    pub fn has_product(&self, product_id: &ProductId) -> bool {
        self.items.iter().any(|line| &line.product.id == product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Product, VariantSelection};

    fn line(id: &str, cents: i64, quantity: u32) -> LineItem {
        LineItem::new(
            Product::new(id, format!("Product {id}"), Money::from_cents(cents)),
            quantity,
            VariantSelection::new(),
        )
    }

    #[test]
    fn empty_cart_has_zero_totals() {
        let state = CartState::empty();
        assert!(state.is_empty());
        assert_eq!(state.total(), Money::zero());
        assert_eq!(state.item_count(), 0);
    }

    #[test]
    fn from_items_recomputes_totals() {
        let state = CartState::from_items(vec![line("a", 1000, 2), line("b", 500, 3)]);

        assert_eq!(state.total(), Money::from_cents(3500));
        assert_eq!(state.item_count(), 5);
        assert_eq!(state.items().len(), 2);
    }

    #[test]
    fn lookup_by_line_id_and_product() {
        let first = line("a", 1000, 1);
        let line_id = first.line_id.clone();
        let state = CartState::from_items(vec![first, line("b", 500, 1)]);

        assert!(state.line(&line_id).is_some());
        assert!(state.has_product(&ProductId::new("b")));
        assert!(!state.has_product(&ProductId::new("c")));
    }

    #[test]
    fn restored_totals_are_rebuilt_from_items_not_trusted() {
        // A persisted snapshot with stale totals must come back consistent
        // once rebuilt through from_items.
        let state = CartState::from_items(vec![line("a", 1000, 2)]);
        let mut value = serde_json::to_value(&state).unwrap();
        value["total"] = serde_json::json!({ "cents": 1 });
        value["item_count"] = serde_json::json!(99);

        let tampered: CartState = serde_json::from_value(value).unwrap();
        let rebuilt = CartState::from_items(tampered.into_items());

        assert_eq!(rebuilt.total(), Money::from_cents(2000));
        assert_eq!(rebuilt.item_count(), 2);
    }
}
