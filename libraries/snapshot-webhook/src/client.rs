//! Webhook delivery client.

use crate::error::{Result, WebhookError};
use crate::types::{attachment_name, DeliveryOptions, WebhookConfig, WebhookPayload};
use chrono::Utc;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Client for posting captures to a chat webhook.
///
/// Each call to [`WebhookClient::deliver`] sends exactly one request; retry
/// and backoff are left to the caller.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    http: Client,
    url: String,
}

impl WebhookClient {
    /// Create a new client for the given endpoint.
    pub fn new(config: WebhookConfig) -> Result<Self> {
        let url = config.url.trim().to_string();

        if url.is_empty() {
            return Err(WebhookError::Config("webhook URL cannot be empty".into()));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(WebhookError::Config(
                "webhook URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("DailySnapshot/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Upload one capture with its embed.
    ///
    /// Fails with [`WebhookError::FileNotFound`] before any network traffic if
    /// the capture is missing.
    pub async fn deliver(&self, file_path: &Path, options: &DeliveryOptions) -> Result<()> {
        if !file_path.is_file() {
            return Err(WebhookError::FileNotFound(
                file_path.display().to_string(),
            ));
        }

        let file_name = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("snapshot.png")
            .to_string();

        debug!(file = %file_path.display(), "Delivering capture");

        let contents = tokio::fs::read(file_path).await?;
        let file_size = contents.len();

        let payload = WebhookPayload::for_capture(&file_name, options, Utc::now());
        let payload_json = serde_json::to_string(&payload)?;

        let file_part = Part::bytes(contents)
            .file_name(attachment_name(&file_name))
            .mime_str(mime_type_for_file(file_path))?;

        let form = Form::new()
            .text("payload_json", payload_json)
            .part("files[0]", file_part);

        let response = self.http.post(&self.url).multipart(form).send().await?;

        let status = response.status();

        if status.is_success() {
            info!(
                file = %file_name,
                size = file_size,
                status = status.as_u16(),
                "Capture delivered"
            );
            Ok(())
        } else if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<f64>().ok())
                .and_then(|secs| Duration::try_from_secs_f64(secs).ok());
            let body = response.text().await.unwrap_or_default();

            Err(WebhookError::RateLimited { retry_after, body })
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(WebhookError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }
}

/// Get MIME type for a capture file.
fn mime_type_for_file(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
