//! Snapshot Webhook
//!
//! Delivers a single archived capture to a chat webhook as an embed with the
//! image attached inline.
//!
//! # Example
//!
//! ```ignore
//! use snapshot_webhook::{DeliveryOptions, WebhookClient, WebhookConfig};
//!
//! let client = WebhookClient::new(WebhookConfig::new("https://chat.example.com/api/webhooks/1/abc"))?;
//! client
//!     .deliver("archives/2025/December/9 December 2025.png".as_ref(), &DeliveryOptions::default())
//!     .await?;
//! ```

mod client;
mod error;
mod types;

pub use client::WebhookClient;
pub use error::{Result, WebhookError};
pub use types::{
    attachment_name, AttachmentRef, DeliveryOptions, Embed, EmbedFooter, EmbedImage,
    WebhookConfig, WebhookPayload,
};
