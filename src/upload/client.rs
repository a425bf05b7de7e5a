use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use super::types::{ResponseBody, UploadOutcome, UploadRequest};
use super::UploadError;
use crate::config::{ConfigError, UploaderConfig};

const API_KEY_HEADER: &str = "x-api-key";

/// HTTP client bound to one server's BOM endpoint.
#[derive(Clone)]
pub struct BomClient {
    client: reqwest::Client,
    endpoint: String,
    headers: HeaderMap,
}

impl BomClient {
    pub fn new(config: &UploaderConfig) -> Result<Self, UploadError> {
        let endpoint = config.bom_endpoint();

        let mut api_key = HeaderValue::from_str(config.api_key.expose()).map_err(|_| {
            ConfigError::InvalidValue {
                field: "api_key",
                reason: "contains characters not allowed in an HTTP header".into(),
            }
        })?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(API_KEY_HEADER), api_key);

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|source| UploadError::Transport {
                endpoint: endpoint.clone(),
                source,
            })?;

        Ok(Self {
            client,
            endpoint,
            headers,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST the request once. Any response, whatever its status, becomes an
    /// outcome; only failing to get one is an error.
    pub async fn submit(&self, request: &UploadRequest) -> Result<UploadOutcome, UploadError> {
        tracing::info!(
            endpoint = %self.endpoint,
            project = %request.project_name,
            version = %request.project_version,
            "uploading SBOM"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .headers(self.headers.clone())
            .json(request)
            .send()
            .await
            .map_err(|source| self.transport(source))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|source| self.transport(source))?;

        if status.is_success() {
            tracing::info!(status = status.as_u16(), "server accepted SBOM");
        } else {
            tracing::warn!(status = status.as_u16(), "server rejected SBOM");
        }

        Ok(UploadOutcome::new(status.as_u16(), ResponseBody::from_bytes(&body)))
    }

    fn transport(&self, source: reqwest::Error) -> UploadError {
        tracing::debug!(
            connect = source.is_connect(),
            timeout = source.is_timeout(),
            "transport failure"
        );
        UploadError::Transport {
            endpoint: self.endpoint.clone(),
            source,
        }
    }
}
