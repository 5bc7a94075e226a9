//! Named color slots used by the classifiers.

use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static DEFAULT_PALETTE: LazyLock<Palette> = LazyLock::new(Palette::default);

/// Color palette handed to the classifiers.
///
/// Colors are CSS-style hex strings. Missing slots in a deserialized palette
/// fall back to the default palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Default text/icon color when a classifier returns no color.
    pub foreground: String,
    pub green: String,
    pub red: String,
    pub blue: String,
    pub purple: String,
    pub star: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            foreground: "#24292e".to_string(),
            green: "#2cbe4e".to_string(),
            red: "#cb2431".to_string(),
            blue: "#0366d6".to_string(),
            purple: "#6f42c1".to_string(),
            star: "#ffc107".to_string(),
        }
    }
}

impl Palette {
    /// The given palette, or the shared default palette when none is given.
    #[must_use]
    pub fn or_default(palette: Option<&Self>) -> &Self {
        palette.unwrap_or(&*DEFAULT_PALETTE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_palette_keeps_defaults() {
        let palette: Palette = serde_json::from_str(r##"{ "red": "#ff0000" }"##).unwrap();

        assert_eq!(palette.red, "#ff0000");
        assert_eq!(palette.star, Palette::default().star);
    }
}
