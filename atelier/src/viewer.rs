use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::ViewerConfig;

/// Show a styled image, either through the configured viewer command or
/// the platform opener. The viewer is spawned and left running; the kiosk
/// does not wait for it to close.
pub fn show(config: &ViewerConfig, image: &Path) -> Result<()> {
    let Some((program, args)) = config.command.split_first() else {
        info!(image = %image.display(), "opening with the platform viewer");
        return open::that(image).with_context(|| format!("failed to open {}", image.display()));
    };

    if let Some(process) = &config.replace {
        // Best effort; there may be nothing running to replace.
        let _ = Command::new("pkill").arg("-f").arg(process).status();
    }

    info!(viewer = %program, image = %image.display(), "launching viewer");
    Command::new(program)
        .args(args)
        .arg(image)
        .spawn()
        .with_context(|| format!("failed to launch {program}"))?;

    Ok(())
}
