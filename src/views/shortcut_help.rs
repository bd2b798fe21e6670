// ============================================================================
// SHORTCUT HELP VIEW - Diálogo "?" generado desde el registro de atajos
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::utils::constants::SHORTCUT_HELP_ID;
use crate::views::confirmation_dialog::render_overlay;

pub struct ShortcutHelpView {
    pub overlay: Element,
    pub close: Element,
}

/// `shortcuts`: (combinación, descripción) en orden de registro
pub fn render_shortcut_help(shortcuts: &[(String, String)]) -> Result<ShortcutHelpView, JsValue> {
    let (overlay, dialog) = render_overlay(Some("max-width: 480px;"))?;
    overlay.set_id(SHORTCUT_HELP_ID);

    let title = ElementBuilder::new("h5")?
        .class("mb-3")
        .icon("bi bi-keyboard me-2")?
        .append_text("Keyboard Shortcuts")?
        .build();

    let grid = ElementBuilder::new("div")?.class("shortcuts-grid mb-3").build();
    for (chord, description) in shortcuts {
        let key = ElementBuilder::new("kbd")?.class("shortcut-key").text(chord).build();
        let text = ElementBuilder::new("span")?
            .class("shortcut-description")
            .text(description)
            .build();
        grid.append_child(&key)?;
        grid.append_child(&text)?;
    }

    let close = ElementBuilder::new("button")?
        .class("btn btn-primary")
        .attr("type", "button")?
        .text("Close")
        .build();
    let actions = ElementBuilder::new("div")?
        .class("d-flex justify-content-end")
        .child(&close)?
        .build();

    dialog.append_child(&title)?;
    dialog.append_child(&grid)?;
    dialog.append_child(&actions)?;

    Ok(ShortcutHelpView { overlay, close })
}
