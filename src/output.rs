//! Operator-facing rendering.

use clap::ValueEnum;
use serde_json::json;

use crate::upload::{PreparedUpload, ResponseBody, UploadOutcome};
use crate::utils::file_size::format_size;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub fn render_outcome(outcome: &UploadOutcome, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(&outcome),
        OutputFormat::Text => {
            let mut lines = Vec::new();
            if outcome.success {
                lines.push(format!("✅ Upload accepted (HTTP {})", outcome.status));
            } else {
                lines.push(format!("❌ Upload failed (HTTP {})", outcome.status));
            }

            if let Some(token) = &outcome.token {
                lines.push(format!("🔑 Processing token: {token}"));
            }

            match &outcome.body {
                ResponseBody::Json(value) => {
                    lines.push(String::from("Response:"));
                    lines.push(to_json(value));
                }
                ResponseBody::Text(text) if text.trim().is_empty() => {
                    lines.push(String::from("Response: (empty body)"));
                }
                ResponseBody::Text(text) => {
                    lines.push(String::from("Response (raw):"));
                    lines.push(text.clone());
                }
            }

            lines.join("\n")
        }
    }
}

pub fn render_dry_run(prepared: &PreparedUpload, format: OutputFormat) -> String {
    let size = prepared.artifact.size();
    match format {
        OutputFormat::Json => to_json(&json!({
            "dry_run": true,
            "endpoint": prepared.endpoint,
            "projectName": prepared.request.project_name,
            "projectVersion": prepared.request.project_version,
            "autoCreate": prepared.request.auto_create,
            "bom_path": prepared.artifact.path().display().to_string(),
            "bom_bytes": size,
            "payload_chars": prepared.request.bom.len(),
        })),
        OutputFormat::Text => [
            String::from("⏩ Dry run: nothing was sent"),
            format!("Endpoint: POST {}", prepared.endpoint),
            format!(
                "Project:  {} {} (autoCreate: {})",
                prepared.request.project_name,
                prepared.request.project_version,
                prepared.request.auto_create
            ),
            format!(
                "SBOM:     {} ({})",
                prepared.artifact.path().display(),
                format_size(size)
            ),
            format!("Payload:  {} base64 characters", prepared.request.bom.len()),
        ]
        .join("\n"),
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|error| format!("<unrenderable: {error}>"))
}
