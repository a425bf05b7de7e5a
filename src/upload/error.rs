use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Fatal upload failures. A response with a non-2xx status is not one of
/// these; it comes back as an [`UploadOutcome`](super::UploadOutcome).
#[derive(Debug, Error)]
pub enum UploadError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("SBOM file not found or unreadable: {}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not reach {endpoint}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}
