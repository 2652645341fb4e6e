//! Line items and their identity.

use serde::{Deserialize, Serialize};

use crate::catalog::{Product, VariantSelection};
use crate::value_objects::{Money, ProductId};

/// Identity of a cart line: product plus canonical variant-selection
/// signature.
///
/// Two adds with the same product and the same selection land on the
/// same line; any difference in selection opens a new line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(String);

/// Sentinel signature for a base-product line (empty selection).
const BASE_SIGNATURE: &str = "base";

impl LineId {
    /// Derives the line id for a product and variant selection.
    ///
    /// The selection serializes in kind order (the map is ordered), so
    /// the same selection always produces the same signature.
    pub fn derive(product_id: &ProductId, selection: &VariantSelection) -> Self {
        if selection.is_empty() {
            return Self(format!("{product_id}::{BASE_SIGNATURE}"));
        }

        let signature = selection
            .iter()
            .map(|(kind, variant_id)| format!("{kind}={variant_id}"))
            .collect::<Vec<_>>()
            .join(",");

        Self(format!("{product_id}::{signature}"))
    }

    /// Returns the line id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One row in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Merge key: product id plus variant signature.
    pub line_id: LineId,

    /// Product snapshot captured at add time.
    pub product: Product,

    /// Quantity, always at least 1.
    pub quantity: u32,

    /// The variant selection this line was added with.
    pub selected_variants: VariantSelection,
}

impl LineItem {
    /// Creates a new line item, deriving its id from product and selection.
    pub fn new(product: Product, quantity: u32, selected_variants: VariantSelection) -> Self {
        let line_id = LineId::derive(&product.id, &selected_variants);
        Self {
            line_id,
            product,
            quantity,
            selected_variants,
        }
    }

    /// Returns the total price for this line (base price × quantity).
    pub fn line_total(&self) -> Money {
        self.product.price.multiply(self.quantity)
    }
}
