//! Cart mutations.

use crate::catalog::{Product, VariantSelection};
use crate::value_objects::ProductId;

/// A mutation applied to the cart state.
///
/// Quantities cross the boundary as `i64` so callers can hand over
/// whatever the UI produced; the reducer clamps or removes as the
/// operation requires.
#[derive(Debug, Clone)]
pub enum CartAction {
    /// Add a product (with an optional variant selection) to the cart.
    ///
    /// Merges into an existing line when the product + selection already
    /// has one. A quantity below 1 is clamped to 1.
    Add {
        product: Product,
        quantity: i64,
        selected_variants: VariantSelection,
    },

    /// Remove every line carrying the given product id.
    ///
    /// Deliberately coarser than line identity: all variant lines of the
    /// product go at once.
    Remove { product_id: ProductId },

    /// Set the quantity on every line carrying the given product id.
    ///
    /// A quantity of 0 or less behaves like [`CartAction::Remove`].
    SetQuantity { product_id: ProductId, quantity: i64 },

    /// Reset the cart to empty.
    Clear,
}

impl CartAction {
    /// Returns the action name, used for logs and metrics labels.
    pub fn kind(&self) -> &'static str {
        match self {
            CartAction::Add { .. } => "add",
            CartAction::Remove { .. } => "remove",
            CartAction::SetQuantity { .. } => "set_quantity",
            CartAction::Clear => "clear",
        }
    }
}
