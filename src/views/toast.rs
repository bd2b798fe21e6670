// ============================================================================
// TOAST VIEW - Contenedor y elemento de toast
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::models::ToastMessage;
use crate::utils::constants::TOAST_CONTAINER_ID;

pub fn toast_element_id(id: u32) -> String {
    format!("toast-{}", id)
}

/// Contenedor fijo arriba a la derecha (uno por página)
pub fn render_toast_container() -> Result<Element, JsValue> {
    let container = ElementBuilder::new("div")?
        .id(TOAST_CONTAINER_ID)
        .class("toast-container position-fixed top-0 end-0 p-3")
        .attr("style", "z-index: 1055;")?
        .build();
    Ok(container)
}

/// Renderizar toast. Retorna (toast, botón de cerrar)
pub fn render_toast(message: &ToastMessage) -> Result<(Element, Element), JsValue> {
    let body = ElementBuilder::new("div")?
        .class("toast-body")
        .text(&message.text)
        .build();

    let close = ElementBuilder::new("button")?
        .class("btn-close btn-close-white me-2 m-auto")
        .attr("type", "button")?
        .attr("aria-label", "Close")?
        .build();

    let row = ElementBuilder::new("div")?
        .class("d-flex")
        .child(&body)?
        .child(&close)?
        .build();

    let toast = ElementBuilder::new("div")?
        .id(&toast_element_id(message.id))
        .class(&message.severity.css_class())
        .attr("role", "alert")?
        .attr("aria-live", "assertive")?
        .child(&row)?
        .build();

    Ok((toast, close))
}

/// Botón de cerrar para alertas del servidor sin él
pub fn render_alert_close_button() -> Result<Element, JsValue> {
    let button = ElementBuilder::new("button")?
        .class("btn-close")
        .attr("type", "button")?
        .attr("data-bs-dismiss", "alert")?
        .attr("aria-label", "Close")?
        .build();
    Ok(button)
}
