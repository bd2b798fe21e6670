// ============================================================================
// CHART VIEW - Estados vacío / error junto al <canvas>
// ============================================================================
// El canvas nunca se elimina: se oculta para poder recargar después.
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlCanvasElement};

use crate::dom::{as_html, ElementBuilder};
use crate::utils::constants::{CHART_EMPTY_CLASS, CHART_ERROR_CLASS};

fn set_display(element: &Element, value: &str) -> Result<(), JsValue> {
    if let Some(html) = as_html(element) {
        html.style().set_property("display", value)?;
    }
    Ok(())
}

/// Placeholder existente o nuevo dentro del padre del canvas
fn placeholder(
    canvas: &HtmlCanvasElement,
    selector: &str,
    class: &str,
    icon: &str,
    message: &str,
) -> Result<Option<Element>, JsValue> {
    let parent = match canvas.parent_element() {
        Some(parent) => parent,
        None => return Ok(None),
    };
    if let Some(existing) = parent.query_selector(selector)? {
        return Ok(Some(existing));
    }
    let text = ElementBuilder::new("p")?.text(message).build();
    let state = ElementBuilder::new("div")?
        .class(class)
        .icon(icon)?
        .child(&text)?
        .build();
    parent.append_child(&state)?;
    Ok(Some(state))
}

fn hide_placeholders(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    if let Some(parent) = canvas.parent_element() {
        for selector in [
            format!(".{}", CHART_EMPTY_CLASS),
            format!(".{}", CHART_ERROR_CLASS),
        ] {
            if let Some(state) = parent.query_selector(&selector)? {
                set_display(&state, "none")?;
            }
        }
    }
    Ok(())
}

/// Dataset vacío: ocultar canvas y mostrar mensaje
pub fn show_empty_state(canvas: &HtmlCanvasElement, message: &str) -> Result<(), JsValue> {
    hide_placeholders(canvas)?;
    canvas.style().set_property("display", "none")?;
    let selector = format!(".{}:not(.{})", CHART_EMPTY_CLASS, CHART_ERROR_CLASS);
    if let Some(state) = placeholder(canvas, &selector, CHART_EMPTY_CLASS, "bi bi-graph-up", message)? {
        set_display(&state, "flex")?;
    }
    Ok(())
}

/// Fallo de red / HTTP / parseo
pub fn show_error_state(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    hide_placeholders(canvas)?;
    canvas.style().set_property("display", "none")?;
    let class = format!("{} {}", CHART_EMPTY_CLASS, CHART_ERROR_CLASS);
    let selector = format!(".{}", CHART_ERROR_CLASS);
    if let Some(state) = placeholder(
        canvas,
        &selector,
        &class,
        "bi bi-exclamation-triangle text-danger",
        "Error loading chart data",
    )? {
        set_display(&state, "flex")?;
    }
    Ok(())
}

/// Datos disponibles: canvas visible, placeholders ocultos
pub fn show_canvas(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    hide_placeholders(canvas)?;
    canvas.style().set_property("display", "block")?;
    Ok(())
}
