//! Persisted user settings shared by both views.
//!
//! The settings blob is the only cross-view channel: the circle view
//! writes the selected key here, the fretboard view reads it back on
//! activation. Saving overwrites the blob wholesale; loading shallow-
//! merges the stored values over the defaults (missing fields keep
//! their default).

use serde::{Deserialize, Serialize};

/// How the fretboard labels its scale-tone markers. The two modes are
/// mutually exclusive by construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// Note names ("C", "F#", ...).
    #[default]
    Notes,
    /// 1-indexed scale degrees ("1" through "7").
    Intervals,
}

/// The persisted settings blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Display name of the last selected key.
    pub selected_key: String,
    /// Fretboard label mode.
    pub display_mode: DisplayMode,
    /// Whether the dark theme is active.
    pub dark_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            selected_key: crate::catalog::CIRCLE_OF_FIFTHS[0].name.to_string(),
            display_mode: DisplayMode::Notes,
            dark_mode: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_key_is_the_catalog_head() {
        let settings = Settings::default();
        assert_eq!(settings.selected_key, "C大调");
        assert_eq!(settings.display_mode, DisplayMode::Notes);
        assert!(!settings.dark_mode);
    }

    #[test]
    fn round_trips_through_json() {
        let settings = Settings {
            selected_key: "G大调".to_string(),
            display_mode: DisplayMode::Intervals,
            dark_mode: true,
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn partial_blob_merges_over_defaults() {
        let back: Settings = serde_json::from_str(r#"{"dark_mode": true}"#).unwrap();
        assert_eq!(back.selected_key, "C大调");
        assert_eq!(back.display_mode, DisplayMode::Notes);
        assert!(back.dark_mode);
    }
}
