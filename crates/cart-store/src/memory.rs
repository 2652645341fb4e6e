use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    CartSnapshot, Result, SessionId,
    store::CartStore,
};

/// In-memory cart store implementation.
///
/// Stores snapshots in a shared map and provides the same interface as
/// the durable implementations. Intended for tests and benchmarks.
#[derive(Clone, Default)]
pub struct InMemoryCartStore {
    snapshots: Arc<RwLock<HashMap<SessionId, CartSnapshot>>>,
}

impl InMemoryCartStore {
    /// Creates a new empty in-memory cart store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of sessions with a stored snapshot.
    pub async fn snapshot_count(&self) -> usize {
        self.snapshots.read().await.len()
    }

    /// Clears all stored snapshots.
    pub async fn clear(&self) {
        self.snapshots.write().await.clear();
    }
}

#[async_trait]
impl CartStore for InMemoryCartStore {
    async fn load(&self, session_id: SessionId) -> Result<Option<CartSnapshot>> {
        Ok(self.snapshots.read().await.get(&session_id).cloned())
    }

    async fn save(&self, snapshot: CartSnapshot) -> Result<()> {
        self.snapshots
            .write()
            .await
            .insert(snapshot.session_id, snapshot);
        Ok(())
    }

    async fn delete(&self, session_id: SessionId) -> Result<()> {
        self.snapshots.write().await.remove(&session_id);
        Ok(())
    }
}
