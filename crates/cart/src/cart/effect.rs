//! Post-transition effects.
//!
//! The reducer returns the new state together with a list of effects.
//! Deciding how effects run (await, queue, drop when offline) happens
//! once at the service boundary, not inside the transition logic.

use std::time::Duration;

use crate::catalog::{Product, VariantSelection};

/// Event name for the cross-session "cart changed" signal.
pub const CART_UPDATED: &str = "cart-updated";

/// Event name for transient user-facing notices.
pub const CART_NOTICE: &str = "cart-notice";

/// How long a transient notice stays visible before auto-dismissing.
pub const NOTICE_TTL: Duration = Duration::from_secs(2);

/// A transient user-facing confirmation message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Message text, naming the product and any selected variants.
    pub message: String,

    /// Auto-dismiss interval, independent of further cart mutations.
    pub ttl: Duration,
}

impl Notice {
    /// Builds the add-confirmation notice for a product and selection.
    pub fn item_added(product: &Product, selection: &VariantSelection) -> Self {
        let names = product.selected_variant_names(selection);
        let message = if names.is_empty() {
            format!("{} added to cart", product.name)
        } else {
            format!("{} ({}) added to cart", product.name, names.join(", "))
        };

        Self {
            message,
            ttl: NOTICE_TTL,
        }
    }
}

/// A side effect requested by a state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEffect {
    /// Write the current snapshot to the persistence sink.
    ///
    /// Emitted after every transition, no-ops included.
    Persist,

    /// Show a transient confirmation to the user.
    Notice(Notice),

    /// Emit the cross-session signal; skipped while offline.
    Broadcast {
        event: &'static str,
        detail: serde_json::Value,
    },
}
