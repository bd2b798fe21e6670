// ============================================================================
// BOOTSTRAP FFI - Tooltips de Bootstrap 5 (window.bootstrap.Tooltip)
// ============================================================================

use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::Element;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = bootstrap)]
    pub type Tooltip;

    #[wasm_bindgen(constructor, catch, js_namespace = bootstrap)]
    pub fn new(element: &Element, options: &JsValue) -> Result<Tooltip, JsValue>;
}

#[derive(Clone, Debug, Serialize)]
pub struct TooltipDelay {
    pub show: u32,
    pub hide: u32,
}

#[derive(Clone, Debug, Serialize)]
pub struct TooltipOptions {
    pub trigger: &'static str,
    pub delay: TooltipDelay,
}

impl Default for TooltipOptions {
    fn default() -> Self {
        Self {
            trigger: "hover focus",
            delay: TooltipDelay { show: 500, hide: 100 },
        }
    }
}

pub fn tooltip_library_available() -> bool {
    web_sys::window()
        .and_then(|w| js_sys::Reflect::get(&w, &JsValue::from_str("bootstrap")).ok())
        .filter(|bootstrap| bootstrap.is_object())
        .and_then(|bootstrap| js_sys::Reflect::get(&bootstrap, &JsValue::from_str("Tooltip")).ok())
        .map_or(false, |value| value.is_function())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_shape() {
        let json = serde_json::to_value(TooltipOptions::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"trigger": "hover focus", "delay": {"show": 500, "hide": 100}})
        );
    }
}
