// ============================================================================
// THEME TOGGLE VIEW - Botón sol/luna + data-theme en <html>
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{dispatch_custom_event, document, ElementBuilder};
use crate::models::Theme;
use crate::utils::constants::{THEME_ATTR, THEME_CHANGED_EVENT, THEME_TOGGLE_ID};

/// El botón ofrece el tema contrario al actual
fn fill_toggle(button: &Element, theme: Theme) -> Result<(), JsValue> {
    let (icon, label) = if theme.is_dark() {
        ("bi bi-sun-fill", "Light")
    } else {
        ("bi bi-moon-fill", "Dark")
    };
    button.set_text_content(None);
    let icon = ElementBuilder::new("i")?.class(icon).build();
    let label = ElementBuilder::new("span")?.text(label).build();
    button.append_child(&icon)?;
    button.append_child(&label)?;
    Ok(())
}

/// <li> con el botón #theme-toggle para la navbar
pub fn render_theme_toggle(theme: Theme) -> Result<(Element, Element), JsValue> {
    let button = ElementBuilder::new("button")?
        .class("theme-toggle btn btn-sm")
        .id(THEME_TOGGLE_ID)
        .attr("type", "button")?
        .attr("aria-label", "Toggle theme")?
        .build();
    fill_toggle(&button, theme)?;
    let item = ElementBuilder::new("li")?
        .class("nav-item d-flex align-items-center me-2")
        .child(&button)?
        .build();
    Ok((item, button))
}

pub fn refresh_theme_toggle(button: &Element, theme: Theme) -> Result<(), JsValue> {
    fill_toggle(button, theme)
}

/// data-theme en <html> + evento themeChanged {theme} en document
pub fn apply_theme_to_document(theme: Theme) -> Result<(), JsValue> {
    let document = document().ok_or_else(|| JsValue::from_str("No document"))?;
    if let Some(root) = document.document_element() {
        root.set_attribute(THEME_ATTR, theme.as_str())?;
    }
    let detail = js_sys::Object::new();
    js_sys::Reflect::set(&detail, &JsValue::from_str("theme"), &JsValue::from_str(theme.as_str()))?;
    dispatch_custom_event(&document, THEME_CHANGED_EVENT, &detail)
}
