//! Cart aggregation engine.
//!
//! Turns a stream of add/remove/set-quantity operations plus
//! product-variant selections into a consistent, totaled cart:
//! - [`catalog`]: the `Product`/`Variant` input snapshots
//! - [`cart`]: line items, the immutable [`cart::CartState`] read model,
//!   and the pure reducer with its post-transition effect list
//! - [`notify`]: fire-and-forget notification sink and the externally
//!   maintained connectivity flag
//! - [`service`]: the composition-root surface tying state, persistence
//!   sink, and notification sink together

pub mod cart;
pub mod catalog;
pub mod notify;
pub mod service;
pub mod value_objects;

pub use cart::{
    CART_NOTICE, CART_UPDATED, CartAction, CartEffect, CartState, LineId, LineItem, NOTICE_TTL,
    Notice, reduce,
};
pub use catalog::{Product, ProductError, Variant, VariantSelection};
pub use common::SessionId;
pub use notify::{BroadcastNotifier, CartSignal, ConnectivityStatus, NotificationSink, NullNotifier};
pub use service::CartService;
pub use value_objects::{Money, ProductId, VariantId};
