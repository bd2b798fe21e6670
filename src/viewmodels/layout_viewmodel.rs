// ============================================================================
// LAYOUT VIEWMODEL - Densidad, modo foco, bienvenida y botón "volver arriba"
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use web_sys::{ScrollBehavior, ScrollToOptions};

use crate::config::CONFIG;
use crate::dom::{body, get_element_by_id, on_click, on_event, query_selector_all, window};
use crate::error::{UiError, UiResult};
use crate::models::{LayoutDensity, LayoutPreferences, Severity};
use crate::services::{NotificationCenter, PreferenceStore};
use crate::utils::constants::{BACK_TO_TOP_ID, FOCUS_MODE_CLASS};
use crate::views::back_to_top::{render_back_to_top, set_back_to_top_visible};

const FOCUS_HIDDEN_CLASS: &str = "focus-mode-hidden";
const FOCUS_HIDDEN_SELECTORS: [&str; 4] = [".bulk-selection", ".search-filters", ".card-footer", ".quick-actions"];
const LAYOUT_TOAST_MS: u32 = 2000;
const WELCOME_MESSAGE: &str = "Welcome to FinWise! Click the Help button for a guided tour.";
const BACK_TO_TOP_THRESHOLD_PX: f64 = 300.0;

pub fn back_to_top_visible(scroll_y: f64) -> bool {
    scroll_y > BACK_TO_TOP_THRESHOLD_PX
}

pub fn scroll_to_top() {
    if let Some(window) = window() {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&options);
    }
}

/// Clases de <body> a quitar y a poner para unas preferencias
pub fn body_classes(layout: &LayoutPreferences) -> (Vec<String>, Vec<String>) {
    let mut remove: Vec<String> = LayoutDensity::ALL
        .iter()
        .filter(|density| **density != layout.density)
        .map(LayoutDensity::body_class)
        .collect();
    let mut add = vec![layout.density.body_class()];
    if layout.focus_mode {
        add.push(FOCUS_MODE_CLASS.to_string());
    } else {
        remove.push(FOCUS_MODE_CLASS.to_string());
    }
    (remove, add)
}

#[derive(Clone)]
pub struct LayoutViewModel {
    store: Rc<PreferenceStore>,
    notifications: NotificationCenter,
}

impl LayoutViewModel {
    pub fn new(store: Rc<PreferenceStore>, notifications: NotificationCenter) -> Self {
        Self { store, notifications }
    }

    pub fn init(&self) -> UiResult<()> {
        let layout = self.store.layout();
        self.apply(&layout)?;
        log::info!(
            "🧭 [LAYOUT] Densidad {} (foco: {})",
            layout.density.as_str(),
            layout.focus_mode
        );
        self.check_first_visit();
        Ok(())
    }

    fn apply(&self, layout: &LayoutPreferences) -> UiResult<()> {
        let body = body().ok_or_else(|| UiError::MissingElement("body".to_string()))?;
        let (remove, add) = body_classes(layout);
        for class in &remove {
            body.class_list().remove_1(class)?;
        }
        for class in &add {
            body.class_list().add_1(class)?;
        }

        for selector in FOCUS_HIDDEN_SELECTORS {
            for element in query_selector_all(selector)? {
                element
                    .class_list()
                    .toggle_with_force(FOCUS_HIDDEN_CLASS, layout.focus_mode)?;
            }
        }
        Ok(())
    }

    fn save(&self, layout: &LayoutPreferences) {
        if let Err(e) = self.store.save_layout(layout) {
            log::warn!("⚠️ [LAYOUT] No se pudieron guardar las preferencias: {}", e);
        }
    }

    /// set_density("compact"). false si el nombre no es una densidad.
    pub fn set_density(&self, name: &str) -> UiResult<bool> {
        let Some(density) = LayoutDensity::parse(name) else {
            log::warn!("⚠️ [LAYOUT] Densidad desconocida: {}", name);
            return Ok(false);
        };
        let mut layout = self.store.layout();
        layout.density = density;
        self.save(&layout);
        self.apply(&layout)?;
        self.notifications.show_toast(
            &format!("Layout changed to {}", density.as_str()),
            Severity::Info,
            Some(LAYOUT_TOAST_MS),
        );
        Ok(true)
    }

    pub fn toggle_focus_mode(&self) -> UiResult<bool> {
        let mut layout = self.store.layout();
        layout.focus_mode = !layout.focus_mode;
        self.save(&layout);
        self.apply(&layout)?;
        let message = if layout.focus_mode {
            "Focus mode enabled"
        } else {
            "Focus mode disabled"
        };
        self.notifications
            .show_toast(message, Severity::Info, Some(LAYOUT_TOAST_MS));
        Ok(layout.focus_mode)
    }

    /// Botón flotante que aparece tras bajar BACK_TO_TOP_THRESHOLD_PX
    pub fn install_back_to_top(&self) -> UiResult<bool> {
        if get_element_by_id(BACK_TO_TOP_ID).is_some() {
            return Ok(false);
        }
        let body = body().ok_or_else(|| UiError::MissingElement("body".to_string()))?;
        let window = window().ok_or_else(|| UiError::MissingElement("window".to_string()))?;
        let button = render_back_to_top()?;
        body.append_child(&button)?;
        on_click(&button, |_| scroll_to_top())?;

        let shown = Cell::new(false);
        let scrolled = window.clone();
        on_event(&window, "scroll", move |_| {
            let visible = back_to_top_visible(scrolled.scroll_y().unwrap_or_default());
            if visible != shown.replace(visible) {
                if let Err(e) = set_back_to_top_visible(&button, visible) {
                    log::warn!("⚠️ [LAYOUT] Error actualizando volver arriba: {:?}", e);
                }
            }
        })?;
        Ok(true)
    }

    /// Primer acceso: toast de bienvenida diferido y marca persistida
    fn check_first_visit(&self) {
        if self.store.has_visited() {
            return;
        }
        let notifications = self.notifications.clone();
        let onboarding = &CONFIG.onboarding_config;
        let duration = onboarding.welcome_duration_ms;
        Timeout::new(onboarding.welcome_delay_ms, move || {
            notifications.show_toast(WELCOME_MESSAGE, Severity::Info, Some(duration));
        })
        .forget();
        if let Err(e) = self.store.mark_visited() {
            log::warn!("⚠️ [LAYOUT] No se pudo guardar la marca de visita: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_classes_swap_density() {
        let layout = LayoutPreferences {
            density: LayoutDensity::Compact,
            ..Default::default()
        };
        let (remove, add) = body_classes(&layout);
        assert_eq!(add, vec!["density-compact".to_string()]);
        assert!(remove.contains(&"density-comfortable".to_string()));
        assert!(remove.contains(&"density-minimal".to_string()));
        assert!(remove.contains(&FOCUS_MODE_CLASS.to_string()));
        assert!(!remove.contains(&"density-compact".to_string()));
    }

    #[test]
    fn test_body_classes_focus_mode() {
        let layout = LayoutPreferences {
            focus_mode: true,
            ..Default::default()
        };
        let (remove, add) = body_classes(&layout);
        assert!(add.contains(&FOCUS_MODE_CLASS.to_string()));
        assert!(!remove.contains(&FOCUS_MODE_CLASS.to_string()));
    }

    #[test]
    fn test_back_to_top_appears_past_threshold() {
        assert!(!back_to_top_visible(0.0));
        assert!(!back_to_top_visible(300.0));
        assert!(back_to_top_visible(300.5));
        assert!(back_to_top_visible(1200.0));
    }
}
