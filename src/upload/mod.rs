//! Delivering one SBOM artifact to the server's BOM endpoint.

mod artifact;
mod client;
mod error;
mod types;

pub use artifact::Artifact;
pub use client::BomClient;
pub use error::UploadError;
pub use types::{ResponseBody, UploadOutcome, UploadRequest};

use crate::config::UploaderConfig;

/// Everything that can be checked and built without touching the network.
#[derive(Debug, Clone)]
pub struct PreparedUpload {
    pub endpoint: String,
    pub artifact: Artifact,
    pub request: UploadRequest,
}

/// Validate the config, read the artifact and build the request body.
pub async fn prepare(config: &UploaderConfig) -> Result<PreparedUpload, UploadError> {
    config.validate()?;

    let artifact = Artifact::read(&config.bom_path).await?;
    let request = UploadRequest::new(&config.project_name, &config.project_version, &artifact);

    Ok(PreparedUpload {
        endpoint: config.bom_endpoint(),
        artifact,
        request,
    })
}

/// Upload the configured artifact once.
///
/// Configuration and file problems are reported before any request is made.
/// There is no retry; a transport failure ends the run.
pub async fn upload(config: &UploaderConfig) -> Result<UploadOutcome, UploadError> {
    let prepared = prepare(config).await?;
    let client = BomClient::new(config)?;
    client.submit(&prepared.request).await
}
