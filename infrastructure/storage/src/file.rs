use std::path::PathBuf;

use async_trait::async_trait;

use business::domain::errors::StorageError;
use business::domain::storage::KeyValueStorage;

/// Key-value storage backed by one file per key under a data directory.
///
/// The directory is created lazily on the first write. Missing keys read as
/// `None` rather than an error.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are storage names, not paths; flatten anything else.
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(name)
    }
}

#[async_trait]
impl KeyValueStorage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(_) => Err(StorageError::ReadFailed),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|_| StorageError::WriteFailed)?;

        let path = self.path_for(key);
        // Write-then-rename: a crash mid-write never truncates the stored value.
        let tmp = path.with_extension("tmp");
        tokio::fs::write(&tmp, value)
            .await
            .map_err(|_| StorageError::WriteFailed)?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|_| StorageError::WriteFailed)?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(_) => Err(StorageError::WriteFailed),
        }
    }
}
