/// Application configuration
use crate::capture::Capturer;
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use snapshot_sync::SyncOptions;
use snapshot_webhook::{DeliveryOptions, WebhookConfig};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "daily-snapshot.toml";

/// Prefix for environment overrides, e.g. `DAILYSNAP_WEBHOOK_URL`.
pub const ENV_PREFIX: &str = "DAILYSNAP";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Chat webhook endpoint; required for delivery
    #[serde(default)]
    pub webhook_url: String,

    #[serde(default = "default_archive_root")]
    pub archive_root: PathBuf,

    #[serde(default = "default_tracker_path")]
    pub tracker_path: PathBuf,

    #[serde(default = "default_send_delay_ms")]
    pub send_delay_ms: u64,

    #[serde(default = "default_rate_limit_cooldown_secs")]
    pub rate_limit_cooldown_secs: u64,

    #[serde(default = "default_embed_title")]
    pub embed_title: String,

    #[serde(default)]
    pub embed_footer: Option<String>,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub avatar_url: Option<String>,

    /// Page to screenshot; required for capture
    #[serde(default)]
    pub capture_url: String,

    #[serde(default = "default_browser")]
    pub browser: PathBuf,

    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,

    #[serde(default = "default_viewport_height")]
    pub viewport_height: u32,
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(config_path, None)
    }

    /// Load configuration, reading environment overrides from `env` instead
    /// of the process environment when given.
    pub fn load_with_env(
        config_path: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self> {
        let mut settings = config::Config::builder();

        match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(AppError::Config(format!(
                        "config file {} does not exist",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (prefixed with DAILYSNAP_)
        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .try_parsing(true)
                .source(env),
        );

        let config = settings.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Check the settings needed to deliver captures
    pub fn validate_delivery(&self) -> Result<()> {
        if self.webhook_url.trim().is_empty() {
            return Err(AppError::Config(format!(
                "webhook URL is required (set {}_WEBHOOK_URL)",
                ENV_PREFIX
            )));
        }
        Ok(())
    }

    /// Check the settings needed to take a capture
    pub fn validate_capture(&self) -> Result<()> {
        if self.capture_url.trim().is_empty() {
            return Err(AppError::Config(format!(
                "capture URL is required (set {}_CAPTURE_URL)",
                ENV_PREFIX
            )));
        }
        if self.viewport_width == 0 || self.viewport_height == 0 {
            return Err(AppError::Config(
                "viewport width and height must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn webhook_config(&self) -> WebhookConfig {
        WebhookConfig::new(self.webhook_url.clone())
    }

    pub fn delivery_options(&self) -> DeliveryOptions {
        let defaults = DeliveryOptions::default();
        DeliveryOptions {
            title: self.embed_title.clone(),
            footer: self.embed_footer.clone().unwrap_or(defaults.footer),
            color: defaults.color,
            username: self.username.clone(),
            avatar_url: self.avatar_url.clone(),
        }
    }

    pub fn sync_options(&self) -> SyncOptions {
        SyncOptions {
            archive_root: self.archive_root.clone(),
            send_delay: Duration::from_millis(self.send_delay_ms),
            rate_limit_cooldown: Duration::from_secs(self.rate_limit_cooldown_secs),
            delivery: self.delivery_options(),
        }
    }

    pub fn capturer(&self) -> Capturer {
        Capturer::new(
            self.browser.clone(),
            self.capture_url.clone(),
            self.viewport_width,
            self.viewport_height,
        )
    }
}

// Default values
fn default_archive_root() -> PathBuf {
    PathBuf::from("archives")
}

fn default_tracker_path() -> PathBuf {
    PathBuf::from(snapshot_archive::DEFAULT_TRACKER_FILE)
}

fn default_send_delay_ms() -> u64 {
    2000
}

fn default_rate_limit_cooldown_secs() -> u64 {
    60
}

fn default_embed_title() -> String {
    "Daily Snapshot".to_string()
}

fn default_browser() -> PathBuf {
    PathBuf::from("chromium")
}

fn default_viewport_width() -> u32 {
    1920
}

fn default_viewport_height() -> u32 {
    1080
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            archive_root: default_archive_root(),
            tracker_path: default_tracker_path(),
            send_delay_ms: default_send_delay_ms(),
            rate_limit_cooldown_secs: default_rate_limit_cooldown_secs(),
            embed_title: default_embed_title(),
            embed_footer: None,
            username: None,
            avatar_url: None,
            capture_url: String::new(),
            browser: default_browser(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
        }
    }
}
