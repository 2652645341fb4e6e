//! Shared types for the cart engine.

mod types;

pub use types::SessionId;
