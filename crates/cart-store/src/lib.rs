//! Snapshot persistence for the cart engine.
//!
//! The cart treats durability as a black box behind the [`CartStore`]
//! trait: the whole cart state is written after every transition and
//! read back once at session start. There is no versioning and no
//! conflict resolution; the last writer to a session's slot wins.

pub mod error;
pub mod file;
pub mod memory;
pub mod postgres;
pub mod snapshot;
pub mod store;

pub use common::SessionId;
pub use error::{CartStoreError, Result};
pub use file::FileCartStore;
pub use memory::InMemoryCartStore;
pub use postgres::PostgresCartStore;
pub use snapshot::CartSnapshot;
pub use store::CartStore;
