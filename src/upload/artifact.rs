use std::path::{Path, PathBuf};

use super::UploadError;
use crate::utils::file_size::format_size;

/// An SBOM file read fully into memory.
#[derive(Debug, Clone)]
pub struct Artifact {
    path: PathBuf,
    bytes: Vec<u8>,
}

impl Artifact {
    /// Read the whole file. The handle is closed before this returns, on
    /// success and on error alike.
    pub async fn read(path: &Path) -> Result<Self, UploadError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| UploadError::NotFound {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!(
            path = %path.display(),
            size = %format_size(bytes.len() as u64),
            "read SBOM artifact"
        );

        Ok(Self {
            path: path.to_path_buf(),
            bytes,
        })
    }

    pub fn from_bytes(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            bytes,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}
