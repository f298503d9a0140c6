//! Render configuration types.

use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Report color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportTheme {
    /// Light theme.
    Light,
    /// Dark theme.
    Dark,
    /// Follow the system preference.
    #[default]
    Auto,
}

impl ReportTheme {
    /// Get the CSS class for this theme.
    pub fn css_class(&self) -> &'static str {
        match self {
            ReportTheme::Light => "light",
            ReportTheme::Dark => "dark",
            ReportTheme::Auto => "",
        }
    }
}

/// HTML render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Custom report title.
    #[serde(default)]
    pub title: Option<String>,
    /// Color theme.
    #[serde(default)]
    pub theme: ReportTheme,
    /// Show the assessment type under the title.
    #[serde(default = "default_true")]
    pub show_assessment_type: bool,
    /// Render sections that have no fields.
    #[serde(default = "default_true")]
    pub show_empty_sections: bool,
}

fn default_true() -> bool {
    true
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            title: None,
            theme: ReportTheme::default(),
            show_assessment_type: true,
            show_empty_sections: true,
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the report title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the theme.
    pub fn with_theme(mut self, theme: ReportTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Hide sections without fields.
    pub fn hide_empty_sections(mut self) -> Self {
        self.show_empty_sections = false;
        self
    }

    /// Load configuration from JSON.
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ReportError::InvalidConfig(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
            .map_err(|e| ReportError::InvalidConfig(format!("{}: {}", path.display(), e)))
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RenderConfig::default();
        assert_eq!(config.theme, ReportTheme::Auto);
        assert!(config.title.is_none());
        assert!(config.show_empty_sections);
    }

    #[test]
    fn test_config_builder() {
        let config = RenderConfig::new()
            .with_title("Clinic Report")
            .with_theme(ReportTheme::Dark)
            .hide_empty_sections();

        assert_eq!(config.title.as_deref(), Some("Clinic Report"));
        assert_eq!(config.theme.css_class(), "dark");
        assert!(!config.show_empty_sections);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("render.json");
        std::fs::write(&path, r#"{"title": "Clinic"}"#).unwrap();
        let config = RenderConfig::from_file(&path).unwrap();
        assert_eq!(config.title.as_deref(), Some("Clinic"));

        std::fs::write(&path, "{not json").unwrap();
        let err = RenderConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ReportError::InvalidConfig(_)));
        assert!(err.to_string().contains("render.json"));

        let missing = RenderConfig::from_file(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(missing, ReportError::InvalidConfig(_)));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = RenderConfig::from_json(r#"{"theme": "light"}"#).unwrap();
        assert_eq!(config.theme, ReportTheme::Light);
        assert!(config.show_assessment_type);

        let json = config.to_json().unwrap();
        assert_eq!(RenderConfig::from_json(&json).unwrap(), config);
    }
}
