// ============================================================================
// CHART.JS FFI - Foreign Function Interface para JavaScript
// ============================================================================
// Solo wrappers para la clase global Chart - Sin estado, sin lógica
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

#[wasm_bindgen]
extern "C" {
    /// Instancia de Chart.js
    pub type Chart;

    #[wasm_bindgen(constructor, catch)]
    pub fn new(canvas: &HtmlCanvasElement, config: &JsValue) -> Result<Chart, JsValue>;

    #[wasm_bindgen(method)]
    pub fn destroy(this: &Chart);
}

/// Chart.js cargado en la página (window.Chart)
pub fn chart_library_available() -> bool {
    web_sys::window()
        .and_then(|w| js_sys::Reflect::get(&w, &JsValue::from_str("Chart")).ok())
        .map_or(false, |value| value.is_function())
}
