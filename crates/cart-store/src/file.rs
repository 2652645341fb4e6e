use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::{
    CartSnapshot, Result, SessionId,
    store::CartStore,
};

/// File-backed cart store implementation.
///
/// Persists one pretty-printed JSON document per session under a base
/// directory. A missing file loads as `None`; the directory is created
/// lazily on the first save.
#[derive(Clone, Debug)]
pub struct FileCartStore {
    dir: PathBuf,
}

impl FileCartStore {
    /// Creates a file store rooted at the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the base directory snapshots are written under.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, session_id: SessionId) -> PathBuf {
        self.dir.join(format!("{session_id}.json"))
    }
}

#[async_trait]
impl CartStore for FileCartStore {
    async fn load(&self, session_id: SessionId) -> Result<Option<CartSnapshot>> {
        let path = self.path_for(session_id);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let snapshot: CartSnapshot = serde_json::from_slice(&bytes)?;
        Ok(Some(snapshot))
    }

    async fn save(&self, snapshot: CartSnapshot) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.path_for(snapshot.session_id);
        let bytes = serde_json::to_vec_pretty(&snapshot)?;
        tokio::fs::write(&path, bytes).await?;

        debug!(session_id = %snapshot.session_id, path = %path.display(), "snapshot written");
        Ok(())
    }

    async fn delete(&self, session_id: SessionId) -> Result<()> {
        let path = self.path_for(session_id);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
