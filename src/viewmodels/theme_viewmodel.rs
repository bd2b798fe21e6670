// ============================================================================
// THEME VIEWMODEL - Conecta ThemeState con el DOM y con prefers-color-scheme
// ============================================================================

use wasm_bindgen::JsCast;
use web_sys::{Element, MediaQueryList, MediaQueryListEvent};

use crate::dom::{get_element_by_id, on_click, on_event, query_selector, window};
use crate::error::UiResult;
use crate::models::Theme;
use crate::state::ThemeState;
use crate::utils::constants::THEME_TOGGLE_ID;
use crate::views::theme_toggle::{apply_theme_to_document, refresh_theme_toggle, render_theme_toggle};

const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

fn dark_scheme_query() -> Option<MediaQueryList> {
    window()?.match_media(DARK_SCHEME_QUERY).ok().flatten()
}

/// Preferencia del sistema al arrancar
pub fn system_prefers_dark() -> bool {
    dark_scheme_query().map_or(false, |query| query.matches())
}

fn apply(theme: Theme) {
    if let Err(e) = apply_theme_to_document(theme) {
        log::error!("❌ [THEME] Error aplicando tema {}: {:?}", theme.as_str(), e);
    }
    if let Some(button) = get_element_by_id(THEME_TOGGLE_ID) {
        if let Err(e) = refresh_theme_toggle(&button, theme) {
            log::warn!("⚠️ [THEME] Error refrescando el botón: {:?}", e);
        }
    }
}

#[derive(Clone)]
pub struct ThemeViewModel {
    theme: ThemeState,
}

impl ThemeViewModel {
    pub fn new(theme: ThemeState) -> Self {
        Self { theme }
    }

    pub fn init(&self) -> UiResult<()> {
        apply(self.theme.current());
        self.theme.subscribe(apply);
        self.install_toggle()?;
        self.watch_system()?;
        log::info!("🎨 [THEME] Tema inicial: {}", self.theme.current().as_str());
        Ok(())
    }

    pub fn toggle(&self) -> Theme {
        self.theme.toggle()
    }

    /// Reutiliza #theme-toggle si la plantilla lo trae; si no, lo crea en la navbar
    fn install_toggle(&self) -> UiResult<()> {
        let button: Element = match get_element_by_id(THEME_TOGGLE_ID) {
            Some(existing) => existing,
            None => {
                let Some(navbar) = query_selector(".navbar .navbar-nav:last-child")? else {
                    log::debug!("🎨 [THEME] Sin navbar: no se crea el botón");
                    return Ok(());
                };
                let (item, button) = render_theme_toggle(self.theme.current())?;
                navbar.insert_before(&item, navbar.first_child().as_ref())?;
                button
            }
        };
        let theme = self.theme.clone();
        on_click(&button, move |event| {
            event.prevent_default();
            theme.toggle();
        })?;
        Ok(())
    }

    /// Sigue al sistema mientras no haya tema guardado
    fn watch_system(&self) -> UiResult<()> {
        let Some(query) = dark_scheme_query() else {
            return Ok(());
        };
        let theme = self.theme.clone();
        on_event(&query, "change", move |event| {
            if let Ok(change) = event.dyn_into::<MediaQueryListEvent>() {
                if theme.follow_system(change.matches()) {
                    log::debug!("🎨 [THEME] Cambio de tema del sistema aplicado");
                }
            }
        })?;
        Ok(())
    }
}
