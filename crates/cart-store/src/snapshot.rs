use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::SessionId;

/// A persisted snapshot of a session's cart state.
///
/// The state is carried as raw JSON so the store stays agnostic of the
/// cart's concrete types. A snapshot whose state fails to deserialize is
/// treated by the consumer as "no prior state", never as a fatal error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartSnapshot {
    /// The session this snapshot belongs to.
    pub session_id: SessionId,

    /// When the snapshot was written.
    pub saved_at: DateTime<Utc>,

    /// The serialized cart state.
    pub state: serde_json::Value,
}

impl CartSnapshot {
    /// Creates a new snapshot from raw JSON state.
    pub fn new(session_id: SessionId, state: serde_json::Value) -> Self {
        Self {
            session_id,
            saved_at: Utc::now(),
            state,
        }
    }

    /// Creates a snapshot from a serializable state.
    pub fn from_state<T: Serialize>(
        session_id: SessionId,
        state: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            session_id,
            saved_at: Utc::now(),
            state: serde_json::to_value(state)?,
        })
    }

    /// Deserializes the snapshot state into a concrete type.
    pub fn into_state<T: for<'de> Deserialize<'de>>(self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.state)
    }

    /// Gets a reference to the state as JSON.
    pub fn state_ref(&self) -> &serde_json::Value {
        &self.state
    }
}
