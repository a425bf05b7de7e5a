use std::path::PathBuf;

use clap::Parser;

use crate::config::{ApiKey, ConfigOverrides};
use crate::output::OutputFormat;

/// Upload a CycloneDX SBOM to a vulnerability-management server.
///
/// Every option can also come from `SBOM_*` environment variables, a `.env`
/// file or `sbom-uploader.toml`. Flags win over all of them.
#[derive(Debug, Parser)]
#[command(name = "sbom-upload", version)]
pub struct Cli {
    /// Server base URL [env: SBOM_BASE_URL] [default: http://localhost:8081]
    #[arg(long)]
    pub base_url: Option<String>,

    /// API key sent as X-Api-Key [env: SBOM_API_KEY]
    #[arg(long)]
    pub api_key: Option<ApiKey>,

    /// Project the SBOM belongs to [env: SBOM_PROJECT_NAME] [default: my-app]
    #[arg(long)]
    pub project_name: Option<String>,

    /// Project version [env: SBOM_PROJECT_VERSION] [default: 1.0.0]
    #[arg(long)]
    pub project_version: Option<String>,

    /// SBOM file to upload [env: SBOM_BOM_PATH] [default: bom.json]
    #[arg(long = "bom", value_name = "PATH")]
    pub bom_path: Option<PathBuf>,

    /// Request timeout in seconds [env: SBOM_TIMEOUT_SECS] [default: 30]
    #[arg(long = "timeout", value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// TOML config file (defaults to ./sbom-uploader.toml when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Validate and build the request without sending it
    #[arg(long)]
    pub dry_run: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Flags given on the command line, as the top config layer.
    #[must_use]
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            project_name: self.project_name.clone(),
            project_version: self.project_version.clone(),
            bom_path: self.bom_path.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}
