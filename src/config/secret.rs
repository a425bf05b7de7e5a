//! API key handling.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Values that ship in sample configs and must never reach the server.
const PLACEHOLDERS: [&str; 6] = [
    "YOUR_API_KEY",
    "YOUR_API_KEY_HERE",
    "your-api-key",
    "<api-key>",
    "changeme",
    "xxx",
];

/// Credential sent as `X-Api-Key`.
///
/// `Debug` is redacted and there is no `Display`, so the key cannot end up in
/// a log line or error message by accident. Use [`ApiKey::expose`] at the one
/// place the header is built.
#[derive(Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Case-insensitive match against the known sample values.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        let key = self.0.trim();
        PLACEHOLDERS
            .iter()
            .any(|placeholder| placeholder.eq_ignore_ascii_case(key))
    }
}

impl From<String> for ApiKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_blank() {
            f.write_str("ApiKey(<unset>)")
        } else {
            f.write_str("ApiKey(<redacted>)")
        }
    }
}
