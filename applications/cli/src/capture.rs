/// Capture step - headless browser wrapper that writes today's screenshot
use crate::error::{AppError, Result};
use chrono::NaiveDate;
use snapshot_archive::archive_path;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct Capturer {
    browser: PathBuf,
    url: String,
    width: u32,
    height: u32,
}

impl Capturer {
    pub fn new(browser: PathBuf, url: String, width: u32, height: u32) -> Self {
        Self {
            browser,
            url,
            width,
            height,
        }
    }

    /// Arguments passed to the browser to screenshot the page into `output`
    pub fn command_args(&self, output: &Path) -> Vec<OsString> {
        let mut screenshot = OsString::from("--screenshot=");
        screenshot.push(output.as_os_str());

        vec![
            OsString::from("--headless"),
            OsString::from("--disable-gpu"),
            OsString::from("--hide-scrollbars"),
            OsString::from(format!("--window-size={},{}", self.width, self.height)),
            screenshot,
            OsString::from(&self.url),
        ]
    }

    /// Screenshot the page into the archive slot for `date`.
    ///
    /// An existing capture for the same day is overwritten.
    pub async fn capture_for(&self, archive_root: &Path, date: NaiveDate) -> Result<PathBuf> {
        let output = archive_path(archive_root, date);
        self.capture(&output).await?;
        Ok(output)
    }

    /// Screenshot the page into `output`
    pub async fn capture(&self, output: &Path) -> Result<()> {
        if let Some(parent) = output.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        debug!(
            browser = %self.browser.display(),
            url = %self.url,
            output = %output.display(),
            "Launching headless browser"
        );

        let result = Command::new(&self.browser)
            .args(self.command_args(output))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                AppError::Capture(format!(
                    "could not launch {}: {}",
                    self.browser.display(),
                    e
                ))
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(AppError::Capture(format!(
                "{} exited with {}: {}",
                self.browser.display(),
                result.status,
                stderr.trim()
            )));
        }

        if !output.is_file() {
            return Err(AppError::Capture(format!(
                "browser exited cleanly but wrote no file at {}",
                output.display()
            )));
        }

        info!(url = %self.url, output = %output.display(), "Screenshot captured");
        Ok(())
    }
}
