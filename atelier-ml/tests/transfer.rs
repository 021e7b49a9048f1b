//! End-to-end checks that need real style models. Point `ATELIER_MODEL_DIR`
//! at a directory holding the catalog artifacts and run with `--ignored`.

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use atelier_ml::{Style, StyleRegistry, styled_path, transfer};
use image::{DynamicImage, GenericImageView, RgbImage};
use tempfile::tempdir;

fn model_dir() -> PathBuf {
    PathBuf::from(std::env::var_os("ATELIER_MODEL_DIR").expect("ATELIER_MODEL_DIR not set"))
}

#[test]
#[ignore = "needs style model artifacts (set ATELIER_MODEL_DIR)"]
fn black_capture_keeps_its_geometry() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("captured_0.jpg");
    DynamicImage::ImageRgb8(RgbImage::new(1920, 1080)).save(&input)?;

    let registry = StyleRegistry::new(model_dir());
    let network = registry.session(Style::default_style())?;
    let output = transfer(&input, &network)?;

    assert_eq!(output, styled_path(&input));
    let styled = image::open(output)?;
    assert_eq!(styled.dimensions(), (1920, 1080));
    Ok(())
}

#[test]
#[ignore = "needs style model artifacts (set ATELIER_MODEL_DIR)"]
fn concurrent_first_loads_share_one_session() -> anyhow::Result<()> {
    let registry = Arc::new(StyleRegistry::new(model_dir()));

    let handles: Vec<_> = (0..2)
        .map(|_| {
            let registry = registry.clone();
            thread::spawn(move || registry.session(Style::default_style()))
        })
        .collect();

    let sessions = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect::<Result<Vec<_>, _>>()?;

    assert!(Arc::ptr_eq(&sessions[0], &sessions[1]));
    Ok(())
}
