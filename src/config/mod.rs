//! Layered configuration for the uploader.
//!
//! Sources, highest priority first:
//! 1. Explicit overrides (CLI flags)
//! 2. `SBOM_*` environment variables
//! 3. A TOML file (`--config <path>`, or `sbom-uploader.toml` in the working directory)
//! 4. Built-in defaults
//!
//! Resolution happens once, at startup. Nothing reads the environment after
//! [`UploaderConfig::load`] returns.

mod env;
mod error;
mod secret;

pub use env::{PrefixedEnv, ENV_PREFIX};
pub use error::ConfigError;
pub use secret::ApiKey;

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::providers::{Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Deserializer, Serialize};

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "sbom-uploader.toml";

const DOTENV_FILE: &str = ".env";

const BOM_API_PATH: &str = "/api/v1/bom";

fn default_base_url() -> String {
    String::from("http://localhost:8081")
}

fn default_project_name() -> String {
    String::from("my-app")
}

fn default_project_version() -> String {
    String::from("1.0.0")
}

fn default_bom_path() -> PathBuf {
    PathBuf::from("bom.json")
}

const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploaderConfig {
    /// Base address of the vulnerability-management server.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Sent as `X-Api-Key`. No default.
    #[serde(default)]
    pub api_key: ApiKey,

    #[serde(default = "default_project_name")]
    pub project_name: String,

    #[serde(default = "default_project_version")]
    pub project_version: String,

    /// SBOM artifact to upload.
    #[serde(default = "default_bom_path")]
    pub bom_path: PathBuf,

    /// Whole-request timeout.
    #[serde(default = "default_timeout_secs", deserialize_with = "secs_from_any")]
    pub timeout_secs: u64,
}

impl Default for UploaderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: ApiKey::default(),
            project_name: default_project_name(),
            project_version: default_project_version(),
            bom_path: default_bom_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Values supplied explicitly on the command line. `None` leaves lower layers untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<ApiKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bom_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl UploaderConfig {
    /// Build the provider chain.
    ///
    /// The default file is only merged when present; an explicit `config_file`
    /// is checked by [`load`](Self::load).
    pub fn figment(config_file: Option<&Path>, overrides: &ConfigOverrides) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        match config_file {
            Some(path) => {
                figment = figment.merge(Toml::file_exact(path));
            }
            None => {
                let local = PathBuf::from(DEFAULT_CONFIG_FILE);
                if local.exists() {
                    figment = figment.merge(Toml::file(local));
                }
            }
        }

        figment
            .merge(PrefixedEnv::default())
            .merge(Serialized::defaults(overrides))
    }

    /// Resolve configuration from all sources. Does not validate.
    pub fn load(config_file: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        if let Some(path) = config_file {
            if !path.is_file() {
                return Err(ConfigError::InvalidValue {
                    field: "config",
                    reason: format!("{} does not exist", path.display()),
                });
            }
        }
        Ok(Self::figment(config_file, overrides).extract()?)
    }

    /// [`load`](Self::load) after reading `.env` from the working directory, if any.
    ///
    /// Parent directories are not searched: a `.env` can carry the API key.
    pub fn load_with_dotenv(
        config_file: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let dotenv = Path::new(DOTENV_FILE);
        if dotenv.is_file() {
            dotenvy::from_path(dotenv).map_err(|e| ConfigError::InvalidValue {
                field: "dotenv",
                reason: e.to_string(),
            })?;
            tracing::debug!(path = %dotenv.display(), "loaded .env");
        }
        Self::load(config_file, overrides)
    }

    /// Check everything that must hold before the artifact is touched.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.is_blank() {
            return Err(ConfigError::MissingApiKey);
        }
        if self.api_key.is_placeholder() {
            return Err(ConfigError::PlaceholderApiKey);
        }

        let url = reqwest::Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidValue {
            field: "base_url",
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                field: "base_url",
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        if self.project_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "project_name",
                reason: "must not be empty".into(),
            });
        }
        if self.project_version.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "project_version",
                reason: "must not be empty".into(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_secs",
                reason: "must be at least 1".into(),
            });
        }

        Ok(())
    }

    /// `{base_url}/api/v1/bom`, tolerating a trailing slash on the base.
    #[must_use]
    pub fn bom_endpoint(&self) -> String {
        format!("{}{BOM_API_PATH}", self.base_url.trim_end_matches('/'))
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Accept `30` from TOML and `"30"` from the environment.
fn secs_from_any<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Secs {
        Number(u64),
        Text(String),
    }

    match Secs::deserialize(deserializer)? {
        Secs::Number(secs) => Ok(secs),
        Secs::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("expected whole seconds, got '{text}'"))),
    }
}
