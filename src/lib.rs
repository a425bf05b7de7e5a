//! # sbom_uploader
//!
//! Uploads a CycloneDX SBOM to a vulnerability-management server through its
//! `POST /api/v1/bom` endpoint and reports what the server answered.
//!
//! ```no_run
//! use sbom_uploader::config::{ConfigOverrides, UploaderConfig};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = UploaderConfig::load(None, &ConfigOverrides::default())?;
//! let outcome = sbom_uploader::upload(&config).await?;
//! println!("HTTP {} token={:?}", outcome.status, outcome.token);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod exit;
pub mod output;
pub mod upload;
pub mod utils;

pub use upload::{prepare, upload, UploadError, UploadOutcome};
