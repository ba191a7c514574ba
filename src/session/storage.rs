use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

pub const CART_KEY: &str = "demporium_cart";
pub const WISHLIST_KEY: &str = "demporium_wishlist";

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Snapshot file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Snapshot storage is unavailable")]
    Unavailable,
}

/// Key/value string storage the session stores persist their snapshots to,
/// the way a browser's local storage would.
pub trait SnapshotStorage: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>, SnapshotError>;
    fn save(&self, key: &str, value: &str) -> Result<(), SnapshotError>;
}

/// In-memory storage. Clones share the same map.
#[derive(Clone, Default)]
pub struct MemorySnapshots {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySnapshots {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStorage for MemorySnapshots {
    fn load(&self, key: &str) -> Result<Option<String>, SnapshotError> {
        let values = self.values.lock().map_err(|_| SnapshotError::Unavailable)?;
        Ok(values.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), SnapshotError> {
        let mut values = self.values.lock().map_err(|_| SnapshotError::Unavailable)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `{key}.json` file per key under a directory.
#[derive(Clone)]
pub struct FileSnapshots {
    dir: PathBuf,
}

impl FileSnapshots {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileSnapshots { dir: dir.into() }
    }

    fn file(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl SnapshotStorage for FileSnapshots {
    fn load(&self, key: &str) -> Result<Option<String>, SnapshotError> {
        match std::fs::read_to_string(self.file(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), SnapshotError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.file(key), value)?;
        Ok(())
    }
}

/// Reads and parses a snapshot. Missing, unreadable and corrupt snapshots
/// all start the store empty.
pub(crate) fn load_snapshot<T, S>(storage: &S, key: &str) -> Vec<T>
where
    T: serde::de::DeserializeOwned,
    S: SnapshotStorage + ?Sized,
{
    let raw = match storage.load(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!("Could not read {} snapshot: {}", key, e);
            return Vec::new();
        }
    };

    serde_json::from_str(&raw).unwrap_or_else(|e| {
        tracing::warn!("Discarding corrupt {} snapshot: {}", key, e);
        Vec::new()
    })
}

pub(crate) fn save_snapshot<T, S>(storage: &S, key: &str, items: &[T])
where
    T: serde::Serialize,
    S: SnapshotStorage + ?Sized,
{
    let result = serde_json::to_string(items)
        .map_err(|e| e.to_string())
        .and_then(|raw| storage.save(key, &raw).map_err(|e| e.to_string()));

    if let Err(e) = result {
        tracing::warn!("Could not persist {} snapshot: {}", key, e);
    }
}
