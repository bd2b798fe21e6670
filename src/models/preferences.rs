// ============================================================================
// PREFERENCES - Estado persistido en localStorage
// ============================================================================

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LayoutDensity {
    #[default]
    Comfortable,
    Compact,
    Minimal,
}

impl LayoutDensity {
    pub const ALL: [LayoutDensity; 3] = [
        LayoutDensity::Comfortable,
        LayoutDensity::Compact,
        LayoutDensity::Minimal,
    ];

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|d| d.as_str() == raw.trim())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutDensity::Comfortable => "comfortable",
            LayoutDensity::Compact => "compact",
            LayoutDensity::Minimal => "minimal",
        }
    }

    pub fn body_class(&self) -> String {
        format!("density-{}", self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutPreferences {
    pub density: LayoutDensity,
    pub focus_mode: bool,
    pub show_details: bool,
}

impl Default for LayoutPreferences {
    fn default() -> Self {
        Self {
            density: LayoutDensity::Comfortable,
            focus_mode: false,
            show_details: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPreferences {
    pub table_page_size: u32,
    pub default_export_format: ExportFormat,
    pub auto_save: bool,
    pub show_tooltips: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            table_page_size: 25,
            default_export_format: ExportFormat::Csv,
            auto_save: true,
            show_tooltips: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_preferences_wire_shape() {
        let json = serde_json::to_string(&LayoutPreferences::default()).unwrap();
        assert_eq!(json, r#"{"density":"comfortable","focusMode":false,"showDetails":true}"#);
    }

    #[test]
    fn test_user_preferences_partial_json_uses_defaults() {
        let prefs: UserPreferences = serde_json::from_str(r#"{"defaultExportFormat":"json"}"#).unwrap();
        assert_eq!(prefs.default_export_format, ExportFormat::Json);
        assert_eq!(prefs.table_page_size, 25);
        assert!(prefs.show_tooltips);
    }

    #[test]
    fn test_theme_parse_and_toggle() {
        assert_eq!(Theme::parse("dark"), Some(Theme::Dark));
        assert_eq!(Theme::parse("sepia"), None);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(LayoutDensity::parse("compact"), Some(LayoutDensity::Compact));
        assert_eq!(LayoutDensity::Minimal.body_class(), "density-minimal");
    }
}
