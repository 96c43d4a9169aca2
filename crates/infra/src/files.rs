use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;
use uuid::Uuid;

/// Filesystem-backed attachment store under a single upload directory.
///
/// Stored names are prefixed with a UUID so uploads never collide.
#[derive(Debug, Clone)]
pub struct FileService {
    root: PathBuf,
}

/// Errors surfaced by the file store.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("file name must not contain path separators")]
    InvalidName,
    #[error("file not found: {0}")]
    NotFound(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl FileService {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Creates the upload directory when it does not exist yet.
    pub async fn ensure_root(&self) -> Result<(), FileError> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Stores the contents under a unique name and returns that name.
    pub async fn save(&self, file_name: &str, contents: &[u8]) -> Result<String, FileError> {
        check_name(file_name)?;
        let stored_name = format!("{}_{}", Uuid::new_v4(), file_name);
        let path = self.root.join(&stored_name);
        tokio::fs::write(&path, contents).await?;

        info!(stage = "files", path = %path.display(), "file saved");
        Ok(stored_name)
    }

    /// Reads a previously stored file.
    pub async fn load(&self, stored_name: &str) -> Result<Vec<u8>, FileError> {
        check_name(stored_name)?;
        let path = self.root.join(stored_name);
        match tokio::fs::read(&path).await {
            Ok(contents) => Ok(contents),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(FileError::NotFound(stored_name.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Deletes a stored file. Missing files are ignored.
    pub async fn delete(&self, stored_name: &str) -> Result<(), FileError> {
        check_name(stored_name)?;
        let path = self.root.join(stored_name);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                info!(stage = "files", path = %path.display(), "file deleted");
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Returns `true` when the stored file exists.
    pub async fn exists(&self, stored_name: &str) -> bool {
        if check_name(stored_name).is_err() {
            return false;
        }
        tokio::fs::try_exists(self.root.join(stored_name))
            .await
            .unwrap_or(false)
    }

    /// Returns the URL under which the stored file is served.
    pub fn url_for(&self, stored_name: &str) -> String {
        format!("/api/files/{stored_name}")
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn check_name(name: &str) -> Result<(), FileError> {
    if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
        return Err(FileError::InvalidName);
    }
    Ok(())
}
