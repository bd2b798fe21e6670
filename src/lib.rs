// ============================================================================
// FINWISE UI - MEJORAS PROGRESIVAS DEL FRONTEND (RUST + WASM)
// ============================================================================
// Arquitectura MVVM:
// - Views: Funciones que construyen DOM (sin lógica)
// - ViewModels: Reglas puras + controladores conectados al DOM
// - Services: Notificaciones, confirmaciones, gráficos, atajos, preferencias
// - State: Estado compartido con Rc<RefCell> y suscriptores
// - Models: Tipos de dominio sin dependencias del navegador
// ============================================================================

mod app;
mod config;
mod dom;
mod error;
mod models;
mod services;
mod state;
mod utils;
mod viewmodels;
mod views;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use wasm_logger::Config;

use crate::app::App;

// Instancia global de App para los exports
thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    wasm_logger::init(Config::new(config::CONFIG.log_level()));
    log::info!("🚀 FinWise UI - Rust + WASM");

    let document = dom::document().ok_or_else(|| JsValue::from_str("document no disponible"))?;
    if document.ready_state() == "loading" {
        // Script en <head>: esperar al DOM completo
        let closure = Closure::once(Box::new(start_app) as Box<dyn FnOnce()>);
        document.add_event_listener_with_callback("DOMContentLoaded", closure.as_ref().unchecked_ref())?;
        closure.forget();
    } else {
        start_app();
    }
    Ok(())
}

fn start_app() {
    let app = App::new();
    app.init();
    APP.with(|cell| {
        *cell.borrow_mut() = Some(app);
    });
}

fn with_app<R>(fallback: R, action: impl FnOnce(&App) -> R) -> R {
    APP.with(|cell| match cell.borrow().as_ref() {
        Some(app) => action(app),
        None => {
            log::warn!("⚠️ [MAIN] App no inicializada todavía");
            fallback
        }
    })
}

/// Registra una tabla añadida después de la carga (sustituye a la observación del DOM)
#[wasm_bindgen]
pub fn register_table(id: &str) -> Result<String, JsValue> {
    with_app(Err(JsValue::from_str("App no inicializada")), |app| {
        app.register_table(id).map_err(JsValue::from)
    })
}

#[wasm_bindgen]
pub fn show_toast(message: &str, severity: &str, duration_ms: Option<u32>) {
    with_app((), |app| app.show_toast(message, severity, duration_ms));
}

/// Devuelve el tema resultante ("light" | "dark")
#[wasm_bindgen]
pub fn toggle_theme() -> String {
    with_app(String::new(), |app| app.toggle_theme())
}

#[wasm_bindgen]
pub fn reload_chart(name: &str) -> bool {
    with_app(false, |app| app.reload_chart(name))
}

#[wasm_bindgen]
pub fn set_density(name: &str) -> bool {
    with_app(false, |app| match app.set_density(name) {
        Ok(changed) => changed,
        Err(e) => {
            log::error!("❌ [LAYOUT] Error aplicando densidad: {}", e);
            false
        }
    })
}

/// Devuelve si el modo foco queda activo
#[wasm_bindgen]
pub fn toggle_focus_mode() -> bool {
    with_app(false, |app| match app.toggle_focus_mode() {
        Ok(enabled) => enabled,
        Err(e) => {
            log::error!("❌ [LAYOUT] Error cambiando el modo foco: {}", e);
            false
        }
    })
}
