//! `SBOM_*` environment provider.
//!
//! figment's stock `Env` provider parses values, so `SBOM_PROJECT_VERSION=1.10`
//! would arrive as the float `1.1`. This provider hands every value over as
//! the exact string that was set.

use figment::value::{Dict, Map, Value};
use figment::{Error, Metadata, Profile, Provider};

pub const ENV_PREFIX: &str = "SBOM_";

/// Reads `{prefix}KEY=value` pairs into lowercased `key = "value"` entries.
#[derive(Debug, Clone)]
pub struct PrefixedEnv {
    prefix: &'static str,
}

impl PrefixedEnv {
    #[must_use]
    pub const fn new(prefix: &'static str) -> Self {
        Self { prefix }
    }

    /// Variables whose name is not UTF-8 cannot carry the prefix and are
    /// skipped. A prefixed variable with a non-UTF-8 value is an error.
    fn collect(&self) -> Result<Dict, Error> {
        let mut dict = Dict::new();
        for (key, value) in std::env::vars_os() {
            let Ok(key) = key.into_string() else {
                continue;
            };
            let Some(field) = key.strip_prefix(self.prefix) else {
                continue;
            };
            if field.is_empty() {
                continue;
            }
            let value = value
                .into_string()
                .map_err(|_| Error::from(format!("environment variable {key} is not valid UTF-8")))?;
            dict.insert(field.to_ascii_lowercase(), Value::from(value));
        }
        Ok(dict)
    }
}

impl Default for PrefixedEnv {
    fn default() -> Self {
        Self::new(ENV_PREFIX)
    }
}

impl Provider for PrefixedEnv {
    fn metadata(&self) -> Metadata {
        Metadata::named(format!("`{}*` environment variables", self.prefix))
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        Ok(Profile::Default.collect(self.collect()?))
    }
}
