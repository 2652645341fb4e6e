use async_trait::async_trait;

use crate::{CartSnapshot, Result, SessionId};

/// Core trait for cart snapshot store implementations.
///
/// A cart store persists the latest cart snapshot for each session.
/// Saving replaces whatever was stored before; there is no history and
/// no version check. All implementations must be thread-safe
/// (Send + Sync).
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Retrieves the latest snapshot for a session.
    ///
    /// Returns None if the session has never been saved.
    async fn load(&self, session_id: SessionId) -> Result<Option<CartSnapshot>>;

    /// Saves a snapshot, replacing any existing snapshot for the session.
    async fn save(&self, snapshot: CartSnapshot) -> Result<()>;

    /// Deletes the stored snapshot for a session.
    ///
    /// Deleting a session that was never saved is a no-op.
    async fn delete(&self, session_id: SessionId) -> Result<()>;
}
