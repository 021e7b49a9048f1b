use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::config::CaptureConfig;

/// Take one still with the external capture tool and return the written
/// file's path. The file is fully persisted once this returns; the core
/// consumes it as an opaque path and never learns how it was produced.
pub fn capture_still(config: &CaptureConfig, images_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(images_dir)
        .with_context(|| format!("failed to create {}", images_dir.display()))?;

    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let output = images_dir.join(format!("captured_{stamp}.jpg"));

    let mut command = Command::new(&config.command);
    command
        .arg("-o")
        .arg(&output)
        .arg("-t")
        .arg(config.timeout_ms.to_string())
        .arg("--width")
        .arg(config.width.to_string())
        .arg("--height")
        .arg(config.height.to_string())
        .arg("--nopreview");

    info!(command = ?command, "capturing still");
    let status = command
        .status()
        .with_context(|| format!("failed to run {}", config.command))?;
    if !status.success() {
        bail!("{} exited with {status}", config.command);
    }

    Ok(output)
}
