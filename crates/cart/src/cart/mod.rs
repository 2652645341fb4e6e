//! Cart state, actions, and the pure reducer.

mod action;
mod effect;
mod line;
mod reducer;
mod state;

pub use action::CartAction;
pub use effect::{CART_NOTICE, CART_UPDATED, CartEffect, NOTICE_TTL, Notice};
pub use line::{LineId, LineItem};
pub use reducer::reduce;
pub use state::CartState;
