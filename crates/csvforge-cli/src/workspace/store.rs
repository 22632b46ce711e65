use std::path::{Path, PathBuf};

use tracing::debug;

use super::WorkspaceResult;
use super::atomic::write_bytes_atomic;

/// Persisted copy of the working dataset as CSV text.
pub trait DatasetStore {
    fn get(&self) -> WorkspaceResult<Option<String>>;

    fn put(&self, csv: &str) -> WorkspaceResult<()>;

    /// Remove the stored dataset. Returns whether anything was removed.
    fn clear(&self) -> WorkspaceResult<bool>;
}

/// Single-file store; writes replace the file atomically.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetStore for FileStore {
    fn get(&self) -> WorkspaceResult<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(csv) => Ok(Some(csv)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn put(&self, csv: &str) -> WorkspaceResult<()> {
        write_bytes_atomic(&self.path, csv.as_bytes())?;
        debug!(path = %self.path.display(), bytes = csv.len(), "dataset stored");
        Ok(())
    }

    fn clear(&self) -> WorkspaceResult<bool> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> FileStore {
        let dir = std::env::temp_dir().join(format!("csvforge_store_{}", uuid::Uuid::new_v4()));
        FileStore::new(dir.join("nested").join("dataset.csv"))
    }

    #[test]
    fn empty_store_returns_none() {
        let store = temp_store();
        assert_eq!(store.get().expect("get"), None);
        assert!(!store.clear().expect("clear"));
    }

    #[test]
    fn put_then_get_then_clear() {
        let store = temp_store();
        store.put("a,b\n1,2").expect("put");
        assert_eq!(store.get().expect("get").as_deref(), Some("a,b\n1,2"));

        store.put("a\n3").expect("overwrite");
        assert_eq!(store.get().expect("get").as_deref(), Some("a\n3"));

        assert!(store.clear().expect("clear"));
        assert_eq!(store.get().expect("get"), None);
    }
}
