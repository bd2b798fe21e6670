// ============================================================================
// JS VALUE - Conversión de estructuras Rust a objetos JS planos
// ============================================================================

use serde::Serialize;
use wasm_bindgen::JsValue;

use crate::error::UiResult;

/// Mapas como objetos JS (no `Map`), para Chart.js y los detail de CustomEvent
pub fn to_js_object<T: Serialize + ?Sized>(value: &T) -> UiResult<JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    Ok(value.serialize(&serializer)?)
}
