//! Application settings model
//!
//! Settings are device-scoped preferences. They are persisted alongside the
//! synchronized collections but are deliberately never merged across devices
//! (one device's theme or backend credentials must not leak into another's).

use serde::{Deserialize, Serialize};

/// Theme mode options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Light theme
    Light,
    /// Dark theme
    Dark,
    /// Follow system preference
    #[default]
    System,
}

/// Device-local application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Theme mode
    #[serde(default)]
    pub theme: ThemeMode,
    /// Days a completed task stays visible before auto-archive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_archive_days: Option<u32>,
    /// Remaining preference groups (keybindings, notification schedules, AI
    /// provider config, ...) - opaque to this core, preserved verbatim
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert_eq!(settings.theme, ThemeMode::System);
        assert!(settings.extra.is_empty());
    }

    #[test]
    fn test_unknown_preference_groups_round_trip() {
        let json = r#"{"theme":"dark","gtd":{"autoArchiveDays":7}}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.theme, ThemeMode::Dark);

        let back = serde_json::to_value(&settings).unwrap();
        assert_eq!(back["gtd"]["autoArchiveDays"], 7);
    }
}
