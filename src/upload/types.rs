use std::borrow::Cow;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::artifact::Artifact;

/// JSON body of `POST /api/v1/bom`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    pub project_name: String,
    pub project_version: String,
    /// Always `true`: the server creates the project when it does not exist.
    pub auto_create: bool,
    /// Standard base64 of the artifact bytes.
    pub bom: String,
}

impl UploadRequest {
    pub fn new(project_name: &str, project_version: &str, artifact: &Artifact) -> Self {
        Self {
            project_name: project_name.to_owned(),
            project_version: project_version.to_owned(),
            auto_create: true,
            bom: STANDARD.encode(artifact.bytes()),
        }
    }
}

/// Response body as received.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    /// A JSON object or array.
    Json(Value),
    /// Anything else, including empty bodies and bare JSON scalars.
    Text(String),
}

impl ResponseBody {
    /// Decode a raw body. Invalid UTF-8 sequences become U+FFFD, so a
    /// non-UTF-8 body is shown approximately rather than byte for byte.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let text = String::from_utf8_lossy(bytes);
        if let Cow::Owned(_) = text {
            tracing::warn!("response body is not valid UTF-8; showing a lossy decoding");
        }
        Self::parse(text.into_owned())
    }

    pub fn parse(text: String) -> Self {
        match serde_json::from_str::<Value>(&text) {
            Ok(value @ (Value::Object(_) | Value::Array(_))) => Self::Json(value),
            _ => Self::Text(text),
        }
    }

    /// The server's processing token, when the body is an object carrying one.
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Json(value) => value.get("token").and_then(Value::as_str),
            Self::Text(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadOutcome {
    pub status: u16,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub body: ResponseBody,
}

impl UploadOutcome {
    pub fn new(status: u16, body: ResponseBody) -> Self {
        let token = body.token().map(str::to_owned);
        Self {
            status,
            success: (200..300).contains(&status),
            token,
            body,
        }
    }
}
