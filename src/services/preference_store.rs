// ============================================================================
// PREFERENCE STORE - Preferencias persistidas (localStorage)
// ============================================================================
// Storage no disponible o JSON corrupto => valores por defecto + log.
// Nunca propaga el error a los componentes.
// ============================================================================

use serde::{de::DeserializeOwned, Serialize};

use crate::error::UiResult;
use crate::models::{LayoutPreferences, Theme, UserPreferences};
use crate::utils::constants::{LAYOUT_PREFERENCES_KEY, THEME_KEY, USER_PREFERENCES_KEY, VISITED_KEY};
use crate::utils::storage::{LocalStorageBackend, MemoryBackend, StorageBackend};

pub struct PreferenceStore {
    backend: Box<dyn StorageBackend>,
}

impl PreferenceStore {
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    pub fn local() -> Self {
        Self::new(Box::new(LocalStorageBackend))
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryBackend::new()))
    }

    pub fn get_raw(&self, key: &str) -> Option<String> {
        match self.backend.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("⚠️ [PREFS] {}", e);
                None
            }
        }
    }

    pub fn set_raw(&self, key: &str, value: &str) -> UiResult<()> {
        self.backend.set_item(key, value)
    }

    pub fn remove(&self, key: &str) -> UiResult<()> {
        self.backend.remove_item(key)
    }

    pub fn load_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get_raw(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("⚠️ [PREFS] '{}' corrupto, usando valores por defecto: {}", key, e);
                None
            }
        }
    }

    pub fn save_json<T: Serialize>(&self, key: &str, value: &T) -> UiResult<()> {
        let json = serde_json::to_string(value)?;
        self.set_raw(key, &json)
    }

    // ------------------------------------------------------------------
    // Accesores tipados
    // ------------------------------------------------------------------

    /// None => el usuario nunca eligió tema (se sigue al sistema)
    pub fn theme(&self) -> Option<Theme> {
        self.get_raw(THEME_KEY).and_then(|raw| Theme::parse(&raw))
    }

    pub fn save_theme(&self, theme: Theme) -> UiResult<()> {
        self.set_raw(THEME_KEY, theme.as_str())
    }

    pub fn layout(&self) -> LayoutPreferences {
        self.load_json(LAYOUT_PREFERENCES_KEY).unwrap_or_default()
    }

    pub fn save_layout(&self, layout: &LayoutPreferences) -> UiResult<()> {
        self.save_json(LAYOUT_PREFERENCES_KEY, layout)
    }

    pub fn user_preferences(&self) -> UserPreferences {
        self.load_json(USER_PREFERENCES_KEY).unwrap_or_default()
    }

    pub fn has_visited(&self) -> bool {
        self.get_raw(VISITED_KEY).as_deref() == Some("true")
    }

    pub fn mark_visited(&self) -> UiResult<()> {
        self.set_raw(VISITED_KEY, "true")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExportFormat, LayoutDensity};

    #[test]
    fn test_theme_is_stored_as_raw_string() {
        let store = PreferenceStore::in_memory();
        assert_eq!(store.theme(), None);

        store.save_theme(Theme::Dark).unwrap();
        assert_eq!(store.get_raw("theme").as_deref(), Some("dark"));
        assert_eq!(store.theme(), Some(Theme::Dark));

        store.set_raw("theme", "purple").unwrap();
        assert_eq!(store.theme(), None);
    }

    #[test]
    fn test_layout_round_trip_and_defaults() {
        let store = PreferenceStore::in_memory();
        assert_eq!(store.layout(), LayoutPreferences::default());

        let layout = LayoutPreferences {
            density: LayoutDensity::Compact,
            focus_mode: true,
            show_details: false,
        };
        store.save_layout(&layout).unwrap();
        assert_eq!(store.layout(), layout);
        assert!(store
            .get_raw("finwise-layout-preferences")
            .unwrap()
            .contains("\"focusMode\":true"));
    }

    #[test]
    fn test_corrupt_json_degrades_to_defaults() {
        let store = PreferenceStore::in_memory();
        store.set_raw("finwise-preferences", "{not json").unwrap();
        assert_eq!(store.user_preferences(), UserPreferences::default());
        assert_eq!(store.user_preferences().default_export_format, ExportFormat::Csv);
    }

    #[test]
    fn test_visited_marker() {
        let store = PreferenceStore::in_memory();
        assert!(!store.has_visited());
        store.mark_visited().unwrap();
        assert!(store.has_visited());
        assert_eq!(store.get_raw("finwise-visited").as_deref(), Some("true"));
        store.remove("finwise-visited").unwrap();
        assert!(!store.has_visited());
    }
}
