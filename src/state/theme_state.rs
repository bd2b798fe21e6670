// ============================================================================
// THEME STATE - Tema claro/oscuro persistido + subscribers
// ============================================================================
// Aplicar el tema al DOM (data-theme, botón, evento themeChanged) lo hacen
// los subscribers registrados en App; este estado no toca el DOM.
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use crate::models::Theme;
use crate::services::PreferenceStore;
use crate::state::ReactiveState;

#[derive(Clone)]
pub struct ThemeState {
    state: ReactiveState<Theme>,
    store: Rc<PreferenceStore>,
    /// true si el usuario eligió tema (hay valor persistido)
    explicit: Rc<Cell<bool>>,
}

impl ThemeState {
    /// Tema guardado o, si no hay, preferencia del sistema
    pub fn new(store: Rc<PreferenceStore>, system_prefers_dark: bool) -> Self {
        let stored = store.theme();
        let initial = stored.unwrap_or(if system_prefers_dark { Theme::Dark } else { Theme::Light });
        Self {
            state: ReactiveState::new(initial),
            store,
            explicit: Rc::new(Cell::new(stored.is_some())),
        }
    }

    pub fn current(&self) -> Theme {
        self.state.get()
    }

    pub fn is_explicit(&self) -> bool {
        self.explicit.get()
    }

    pub fn toggle(&self) -> Theme {
        let next = self.current().toggled();
        self.set(next);
        next
    }

    /// Elección del usuario: persiste y notifica
    pub fn set(&self, theme: Theme) {
        if let Err(e) = self.store.save_theme(theme) {
            log::warn!("⚠️ [THEME] No se pudo guardar el tema: {}", e);
        }
        self.explicit.set(true);
        self.state.set(theme);
    }

    /// Cambio de prefers-color-scheme: solo aplica sin preferencia guardada
    pub fn follow_system(&self, prefers_dark: bool) -> bool {
        if self.explicit.get() {
            return false;
        }
        let theme = if prefers_dark { Theme::Dark } else { Theme::Light };
        if theme != self.current() {
            self.state.set(theme);
        }
        true
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(Theme) + 'static,
    {
        self.state.subscribe(move |theme| callback(*theme));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn store() -> Rc<PreferenceStore> {
        Rc::new(PreferenceStore::in_memory())
    }

    #[test]
    fn test_initial_theme_from_system_when_not_stored() {
        let theme = ThemeState::new(store(), true);
        assert_eq!(theme.current(), Theme::Dark);
        assert!(!theme.is_explicit());
    }

    #[test]
    fn test_stored_theme_wins_over_system() {
        let prefs = store();
        prefs.save_theme(Theme::Light).unwrap();
        let theme = ThemeState::new(prefs, true);
        assert_eq!(theme.current(), Theme::Light);
        assert!(!theme.follow_system(true));
        assert_eq!(theme.current(), Theme::Light);
    }

    #[test]
    fn test_toggle_persists_and_notifies() {
        let prefs = store();
        let theme = ThemeState::new(prefs.clone(), false);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();
        theme.subscribe(move |t| seen_clone.borrow_mut().push(t));

        assert_eq!(theme.toggle(), Theme::Dark);
        assert_eq!(prefs.theme(), Some(Theme::Dark));
        assert_eq!(theme.toggle(), Theme::Light);
        assert_eq!(*seen.borrow(), vec![Theme::Dark, Theme::Light]);
    }

    #[test]
    fn test_follow_system_does_not_persist() {
        let prefs = store();
        let theme = ThemeState::new(prefs.clone(), false);
        assert!(theme.follow_system(true));
        assert_eq!(theme.current(), Theme::Dark);
        assert_eq!(prefs.theme(), None);
    }
}
