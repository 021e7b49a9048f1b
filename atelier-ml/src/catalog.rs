use std::str::FromStr;

use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::error::{Error, Result};

/// The styles the kiosk ships with, one pretrained network each.
///
/// Catalog order is significant: the first entry is the default selection
/// offered to the user. The snake_case string form is the identifier used
/// on the command line and in configuration, and doubles as the artifact
/// file stem under the model directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Style {
    Candy,
    Cubism,
    Futurism,
    Mosaic,
    PopArt,
    RainPrincess,
    StarryNight,
}

impl Style {
    /// Ordered catalog of every supported style.
    pub fn catalog() -> Vec<Style> {
        Style::iter().collect()
    }

    /// Style applied when the caller expresses no preference.
    pub fn default_style() -> Style {
        Style::Candy
    }

    /// File name of the serialized network under the model directory.
    pub fn artifact_file(&self) -> String {
        format!("{self}.onnx")
    }

    /// Parse an identifier, rejecting anything outside the catalog before
    /// any model or image work starts.
    pub fn parse(name: &str) -> Result<Style> {
        Style::from_str(name).map_err(|_| Error::UnknownStyle(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_snake_case() {
        assert_eq!(Style::PopArt.to_string(), "pop_art");
        assert_eq!(Style::RainPrincess.artifact_file(), "rain_princess.onnx");
    }

    #[test]
    fn parse_rejects_identifiers_outside_the_catalog() {
        assert!(matches!(
            Style::parse("vaporwave"),
            Err(Error::UnknownStyle(name)) if name == "vaporwave"
        ));
    }
}
