use std::fs;

use atelier_ml::{Error, Style, StyleRegistry};
use tempfile::tempdir;

#[test]
fn resolve_finds_every_catalog_artifact() -> anyhow::Result<()> {
    let dir = tempdir()?;
    for style in Style::catalog() {
        fs::write(dir.path().join(style.artifact_file()), b"")?;
    }

    let registry = StyleRegistry::new(dir.path());
    for style in Style::catalog() {
        let path = registry.resolve(style)?;
        assert!(path.is_file());
        assert_eq!(path.file_name().and_then(|name| name.to_str()), Some(style.artifact_file().as_str()));
    }
    Ok(())
}

#[test]
fn resolve_reports_missing_artifacts() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let registry = StyleRegistry::new(dir.path());

    let err = registry.resolve(Style::Mosaic).unwrap_err();
    assert!(matches!(err, Error::ArtifactMissing { .. }));
    Ok(())
}

#[test]
fn a_corrupt_artifact_fails_at_load_not_at_inference() -> anyhow::Result<()> {
    let dir = tempdir()?;
    fs::write(dir.path().join(Style::Candy.artifact_file()), b"not an onnx graph")?;

    let registry = StyleRegistry::new(dir.path());
    let err = registry.session(Style::Candy).unwrap_err();
    assert!(matches!(err, Error::ModelLoad { .. }));
    Ok(())
}
