//! Storage collaborators for the sealed vault blob.
//!
//! The lifecycle controller only ever sees the `BlobStore` trait:
//! `load` an existing blob (or report that none exists) and `save` a
//! new one.  `FileStore` keeps the blob as a JSON file on disk,
//! written atomically; `MemoryStore` backs tests and embedders.

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{Result, SubVaultError};
use crate::vault::blob::EncryptedBlob;

/// A durable home for the sealed vault blob.
pub trait BlobStore {
    /// Read the persisted blob, or `None` if no vault exists yet.
    fn load(&self) -> Result<Option<EncryptedBlob>>;

    /// Persist the blob.  Failures must leave any previous blob intact.
    fn save(&mut self, blob: &EncryptedBlob) -> Result<()>;
}

/// Blob storage backed by a JSON file on disk.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path to the blob file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a vault blob already exists at this path.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl BlobStore for FileStore {
    fn load(&self) -> Result<Option<EncryptedBlob>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)?;
        let blob: EncryptedBlob = serde_json::from_str(&contents)
            .map_err(|e| SubVaultError::InvalidBlobFormat(format!("blob JSON: {e}")))?;
        blob.validate()?;

        Ok(Some(blob))
    }

    /// Write the blob atomically: serialize, write to a temp file in
    /// the same directory, then rename over the target path.  The
    /// rename ensures readers never see a half-written file, and a
    /// failed write leaves the previous blob untouched.
    fn save(&mut self, blob: &EncryptedBlob) -> Result<()> {
        let contents = serde_json::to_string_pretty(blob)
            .map_err(|e| SubVaultError::SerializationError(format!("blob JSON: {e}")))?;

        let parent = self.path.parent().unwrap_or(Path::new("."));
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .map_err(|e| SubVaultError::PersistenceFailed(e.to_string()))?;
        }

        // Temp file in the same directory so the rename stays on one
        // filesystem and is therefore atomic.
        let tmp_path = parent.join(format!(
            ".{}.tmp",
            self.path.file_name().unwrap_or_default().to_string_lossy()
        ));

        fs::write(&tmp_path, &contents)
            .map_err(|e| SubVaultError::PersistenceFailed(e.to_string()))?;
        fs::rename(&tmp_path, &self.path)
            .map_err(|e| SubVaultError::PersistenceFailed(e.to_string()))?;

        Ok(())
    }
}

/// In-memory blob storage for tests and embedding.
#[derive(Default)]
pub struct MemoryStore {
    blob: Option<EncryptedBlob>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently stored blob, if any.
    pub fn blob(&self) -> Option<&EncryptedBlob> {
        self.blob.as_ref()
    }
}

impl BlobStore for MemoryStore {
    fn load(&self) -> Result<Option<EncryptedBlob>> {
        Ok(self.blob.clone())
    }

    fn save(&mut self, blob: &EncryptedBlob) -> Result<()> {
        self.blob = Some(blob.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_blob() -> EncryptedBlob {
        EncryptedBlob {
            salt: vec![7u8; 16],
            iv: vec![9u8; 12],
            data: vec![1u8; 48],
        }
    }

    #[test]
    fn file_store_load_is_none_before_first_save() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("vault.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn file_store_round_trips_blob() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path().join("vault.json"));

        store.save(&sample_blob()).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, sample_blob());
    }

    #[test]
    fn file_store_creates_missing_parent_directory() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path().join("nested/dir/vault.json"));
        store.save(&sample_blob()).unwrap();
        assert!(store.exists());
    }

    #[test]
    fn file_store_leaves_no_temp_file_behind() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path().join("vault.json"));
        store.save(&sample_blob()).unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["vault.json"]);
    }

    #[test]
    fn file_store_rejects_malformed_blob_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vault.json");
        fs::write(&path, "not json at all").unwrap();

        let store = FileStore::new(path);
        assert!(matches!(
            store.load(),
            Err(SubVaultError::InvalidBlobFormat(_))
        ));
    }

    #[test]
    fn memory_store_round_trips_blob() {
        let mut store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());
        store.save(&sample_blob()).unwrap();
        assert_eq!(store.load().unwrap().unwrap(), sample_blob());
    }
}
