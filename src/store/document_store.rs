//! Whole-document persistence over a single JSON file.
//!
//! There are no record-level writes: callers load the document, change it in
//! memory and save it back. Only one writer is expected at a time.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::errors::AppError;
use crate::models::Document;

/// File-backed store for the site document.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    path: PathBuf,
}

impl DocumentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document without touching the filesystem.
    ///
    /// Returns `None` when there is no backing file yet.
    pub async fn read(&self) -> Result<Option<Document>, AppError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        serde_json::from_slice(&bytes)
            .and_then(Document::from_json)
            .map(Some)
            .map_err(|e| AppError::StoreCorrupt {
                path: self.path.clone(),
                reason: e.to_string(),
            })
    }

    /// Load the document, creating an empty one on first use.
    pub async fn load(&self) -> Result<Document, AppError> {
        if let Some(document) = self.read().await? {
            return Ok(document);
        }

        tracing::info!("No store at {:?}, creating an empty document", self.path);
        let document = Document::default();
        self.save(&document).await?;
        Ok(document)
    }

    /// Replace the whole file with `document`.
    ///
    /// The new contents are written to a sibling temporary file and renamed
    /// over the target, so the file is never left half-written.
    pub async fn save(&self, document: &Document) -> Result<(), AppError> {
        self.ensure_parent_dir().await?;

        let mut json = serde_json::to_vec_pretty(&document.to_json()?)?;
        json.push(b'\n');

        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, &json).await?;
        if let Err(err) = tokio::fs::rename(&tmp, &self.path).await {
            tokio::fs::remove_file(&tmp).await.ok();
            return Err(err.into());
        }

        tracing::debug!("Wrote {} bytes to {:?}", json.len(), self.path);
        Ok(())
    }

    async fn ensure_parent_dir(&self) -> Result<(), AppError> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                tokio::fs::create_dir_all(parent).await?;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "store".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
