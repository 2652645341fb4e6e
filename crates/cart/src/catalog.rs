//! Catalog input types.
//!
//! The cart consumes [`Product`] values handed over by the surrounding
//! catalog/UI layer. They are snapshots, not live references: once a
//! product lands in a line item, later catalog changes do not affect it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::value_objects::{Money, ProductId, VariantId};

/// Mapping from variant kind (e.g. "size", "color") to the chosen
/// variant id. The ordered map gives the canonical key order the line
/// identity signature relies on.
pub type VariantSelection = BTreeMap<String, VariantId>;

/// Errors raised by boundary validation of incoming products.
///
/// These never reach the caller of a cart operation; an invalid product
/// degrades the operation to a logged no-op.
#[derive(Debug, Error)]
pub enum ProductError {
    /// Product id is empty.
    #[error("product id is empty")]
    EmptyId,

    /// Product name is empty.
    #[error("product name is empty")]
    EmptyName,

    /// Product price is negative.
    #[error("product price is negative: {0}")]
    NegativePrice(Money),
}

/// A purchasable option of a product.
///
/// The kind tag is an open set ("size", "color", "material", "style",
/// ...), so it stays a plain string rather than a closed enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Variant identifier, unique within its product.
    pub id: VariantId,

    /// Human-readable variant name (e.g. "Medium").
    pub name: String,

    /// Variant kind tag (e.g. "size").
    pub kind: String,

    /// Price override; falls back to the product's base price.
    #[serde(default)]
    pub price: Option<Money>,

    /// List-price override for discount display.
    #[serde(default)]
    pub original_price: Option<Money>,

    /// Stock-availability flag.
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

fn default_in_stock() -> bool {
    true
}

impl Variant {
    /// Creates an in-stock variant with no price override.
    pub fn new(id: impl Into<VariantId>, name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: kind.into(),
            price: None,
            original_price: None,
            in_stock: true,
        }
    }

    /// Sets a price override on the variant.
    pub fn with_price(mut self, price: Money) -> Self {
        self.price = Some(price);
        self
    }

    /// Marks the variant as out of stock.
    pub fn out_of_stock(mut self) -> Self {
        self.in_stock = false;
        self
    }

    /// Returns the variant's effective price given the product's base price.
    pub fn effective_price(&self, base: Money) -> Money {
        self.price.unwrap_or(base)
    }
}

/// A catalog product as handed to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Unit price.
    pub price: Money,

    /// Optional original/list price for discount display.
    #[serde(default)]
    pub original_price: Option<Money>,

    /// Purchasable variants, possibly empty.
    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl Product {
    /// Creates a product without variants.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            original_price: None,
            variants: Vec::new(),
        }
    }

    /// Attaches variants to the product.
    pub fn with_variants(mut self, variants: Vec<Variant>) -> Self {
        self.variants = variants;
        self
    }

    /// Sets the original/list price.
    pub fn with_original_price(mut self, original_price: Money) -> Self {
        self.original_price = Some(original_price);
        self
    }

    /// Validates the product at the cart boundary.
    ///
    /// Products originate from UI state that may be stale or partially
    /// constructed, so violations are reported rather than assumed away.
    pub fn validate(&self) -> Result<(), ProductError> {
        if self.id.is_empty() {
            return Err(ProductError::EmptyId);
        }
        if self.name.is_empty() {
            return Err(ProductError::EmptyName);
        }
        if self.price.is_negative() {
            return Err(ProductError::NegativePrice(self.price));
        }
        Ok(())
    }

    /// Looks up a variant by id.
    pub fn variant(&self, id: &VariantId) -> Option<&Variant> {
        self.variants.iter().find(|v| &v.id == id)
    }

    /// Resolves the effective unit price for a variant selection.
    ///
    /// The first selected variant (in kind order) carrying a price
    /// override wins; otherwise the base price applies. Display surfaces
    /// use this; the cart total itself is always base price × quantity.
    pub fn price_for(&self, selection: &VariantSelection) -> Money {
        selection
            .values()
            .filter_map(|id| self.variant(id))
            .find_map(|v| v.price)
            .unwrap_or(self.price)
    }

    /// Returns the display names of the selected variants, in kind order.
    ///
    /// Selection entries that do not resolve to a known variant are
    /// skipped.
    pub fn selected_variant_names(&self, selection: &VariantSelection) -> Vec<String> {
        selection
            .values()
            .filter_map(|id| self.variant(id))
            .map(|v| v.name.clone())
            .collect()
    }

    /// Returns the discount against the original price, if any.
    pub fn discount(&self) -> Option<Money> {
        let original = self.original_price?;
        (original > self.price).then(|| original - self.price)
    }
}
