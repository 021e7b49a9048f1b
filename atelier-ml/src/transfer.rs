use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use image::{DynamicImage, GenericImageView, imageops::FilterType};
use tracing::{info, instrument};

use crate::error::{Error, Result};
use crate::registry::SharedNetwork;

/// Marker the capture tool puts in its file names, and its replacement in
/// the styled output name.
const CAPTURE_MARKER: &str = "captured";
const STYLE_MARKER: &str = "styled";

/// Run the full decode → infer → encode pipeline for one image and return
/// the written output path.
///
/// The styled image lands next to the input, named by [`styled_path`], and
/// always has the input's dimensions even when the network renders at a
/// different internal resolution. Each call is independent; the single
/// output file write is the only side effect.
pub fn transfer(input: &Path, network: &SharedNetwork) -> Result<PathBuf> {
    transfer_with_cancel(input, network, &AtomicBool::new(false))
}

/// Like [`transfer`], but lets the caller abandon the request while it is
/// still pending. The token is honored up to the start of the forward
/// pass; once the pass has begun it runs to completion. A cancelled
/// request writes nothing.
#[instrument(level = "info", skip_all, fields(input = %input.display()))]
pub fn transfer_with_cancel(
    input: &Path,
    network: &SharedNetwork,
    cancel: &AtomicBool,
) -> Result<PathBuf> {
    let image = image::open(input).map_err(|source| Error::Decode {
        path: input.to_path_buf(),
        source,
    })?;
    let (width, height) = image.dimensions();

    if cancel.load(Ordering::Relaxed) {
        return Err(Error::Cancelled);
    }

    let styled = {
        let mut network = network.lock().unwrap();
        // Last exit before the forward pass; waiting on the lock may have
        // taken a while.
        if cancel.load(Ordering::Relaxed) {
            return Err(Error::Cancelled);
        }
        network.stylize(&image)?
    };

    // The network's strided convolutions may round the spatial dimensions;
    // bring the result back to the capture's geometry.
    let styled = if styled.dimensions() == (width, height) {
        styled
    } else {
        image::imageops::resize(&styled, width, height, FilterType::Lanczos3)
    };

    let output = styled_path(input);
    DynamicImage::ImageRgb8(styled)
        .save(&output)
        .map_err(|source| Error::Encode {
            path: output.clone(),
            source,
        })?;
    info!(output = %output.display(), "styled image written");

    Ok(output)
}

/// Derive the output path from the input path: the capture marker in the
/// file name becomes the style marker. A name without the marker gets a
/// `_styled` suffix before its extension instead, so the input is never
/// overwritten.
pub fn styled_path(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    if name.contains(CAPTURE_MARKER) {
        return input.with_file_name(name.replace(CAPTURE_MARKER, STYLE_MARKER));
    }

    let stem = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default();
    match input.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => input.with_file_name(format!("{stem}_{STYLE_MARKER}.{ext}")),
        None => input.with_file_name(format!("{stem}_{STYLE_MARKER}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_marker_becomes_style_marker() {
        assert_eq!(
            styled_path(Path::new("images/captured_1718000000.jpg")),
            Path::new("images/styled_1718000000.jpg")
        );
    }

    #[test]
    fn marker_in_a_directory_name_is_left_alone() {
        assert_eq!(
            styled_path(Path::new("captured_shots/portrait.jpg")),
            Path::new("captured_shots/portrait_styled.jpg")
        );
    }

    #[test]
    fn unmarked_names_get_a_suffix() {
        assert_eq!(
            styled_path(Path::new("portrait.png")),
            Path::new("portrait_styled.png")
        );
        assert_eq!(styled_path(Path::new("portrait")), Path::new("portrait_styled"));
    }
}
