//! Configuration error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    /// No API key from any source.
    #[error("API key is not set (use --api-key or SBOM_API_KEY)")]
    MissingApiKey,

    /// The API key is still a sample value.
    #[error("API key is a placeholder value; set a real key via --api-key or SBOM_API_KEY")]
    PlaceholderApiKey,

    /// A configuration field has an invalid value.
    #[error("invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        Self::Figment(Box::new(error))
    }
}
