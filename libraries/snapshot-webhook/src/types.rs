//! Types for webhook requests.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use snapshot_archive::display_date;

/// Configuration for the webhook endpoint.
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    /// Full webhook URL including any token path segments
    pub url: String,
}

impl WebhookConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Presentation settings for each delivered embed.
#[derive(Debug, Clone)]
pub struct DeliveryOptions {
    pub title: String,
    pub footer: String,
    /// Embed accent colour as 0xRRGGBB
    pub color: u32,
    /// Overrides the webhook's configured display name
    pub username: Option<String>,
    /// Overrides the webhook's configured avatar
    pub avatar_url: Option<String>,
}

impl Default for DeliveryOptions {
    fn default() -> Self {
        Self {
            title: "Daily Snapshot".to_string(),
            footer: "Captured automatically by daily-snapshot".to_string(),
            color: 0x0058_65F2,
            username: None,
            avatar_url: None,
        }
    }
}

// =============================================================================
// Payload Types
// =============================================================================

/// JSON body sent in the `payload_json` multipart part.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub embeds: Vec<Embed>,
    pub attachments: Vec<AttachmentRef>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub image: EmbedImage,
    pub footer: EmbedFooter,
    /// RFC 3339 send time
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmbedImage {
    /// `attachment://<name>` so the image renders inside the embed
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmbedFooter {
    pub text: String,
}

/// Descriptor tying a multipart file part (by index) to its file name.
#[derive(Debug, Clone, Serialize)]
pub struct AttachmentRef {
    pub id: u32,
    pub filename: String,
}

impl WebhookPayload {
    /// Build the payload for one capture sent at `sent_at`.
    pub fn for_capture(file_name: &str, options: &DeliveryOptions, sent_at: DateTime<Utc>) -> Self {
        let attachment = attachment_name(file_name);

        Self {
            username: options.username.clone(),
            avatar_url: options.avatar_url.clone(),
            embeds: vec![Embed {
                title: options.title.clone(),
                description: display_date(file_name),
                color: options.color,
                image: EmbedImage {
                    url: format!("attachment://{}", attachment),
                },
                footer: EmbedFooter {
                    text: options.footer.clone(),
                },
                timestamp: sent_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            }],
            attachments: vec![AttachmentRef {
                id: 0,
                filename: attachment,
            }],
        }
    }
}

/// Attachment name for a capture file; `attachment://` references cannot
/// contain spaces.
pub fn attachment_name(file_name: &str) -> String {
    file_name.replace(' ', "_")
}
