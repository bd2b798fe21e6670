// ============================================================================
// BACK TO TOP VIEW - Botón flotante para volver arriba
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{as_html, ElementBuilder};
use crate::utils::constants::BACK_TO_TOP_ID;

const BASE_STYLE: &str = "bottom: 20px; right: 20px; z-index: 1000; border-radius: 50%; width: 50px; height: 50px; \
                          transition: opacity 0.3s; opacity: 0; pointer-events: none;";

/// Oculto hasta que se hace scroll
pub fn render_back_to_top() -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("button")?
        .class("btn btn-primary position-fixed")
        .id(BACK_TO_TOP_ID)
        .attr("type", "button")?
        .attr("aria-label", "Back to top")?
        .attr("title", "Back to top")?
        .attr("style", BASE_STYLE)?
        .icon("bi bi-arrow-up")?
        .build())
}

pub fn set_back_to_top_visible(button: &Element, visible: bool) -> Result<(), JsValue> {
    let Some(button) = as_html(button) else {
        return Ok(());
    };
    let style = button.style();
    if visible {
        style.set_property("opacity", "1")?;
        style.set_property("pointer-events", "auto")
    } else {
        style.set_property("opacity", "0")?;
        style.set_property("pointer-events", "none")
    }
}
