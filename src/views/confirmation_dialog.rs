// ============================================================================
// CONFIRMATION DIALOG VIEW - Overlay modal de confirmación
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::models::ConfirmationRequest;
use crate::utils::constants::CONFIRMATION_OVERLAY_CLASS;

pub struct ConfirmationDialogView {
    pub overlay: Element,
    pub cancel: Element,
    pub confirm: Element,
}

/// Overlay vacío con su caja de diálogo (también lo usan otros diálogos)
pub fn render_overlay(dialog_style: Option<&str>) -> Result<(Element, Element), JsValue> {
    let mut dialog = ElementBuilder::new("div")?
        .class("confirmation-dialog")
        .attr("role", "dialog")?
        .attr("aria-modal", "true")?;
    if let Some(style) = dialog_style {
        dialog = dialog.attr("style", style)?;
    }
    let dialog = dialog.build();

    let overlay = ElementBuilder::new("div")?
        .class(CONFIRMATION_OVERLAY_CLASS)
        .child(&dialog)?
        .build();
    Ok((overlay, dialog))
}

pub fn render_confirmation_dialog(request: &ConfirmationRequest) -> Result<ConfirmationDialogView, JsValue> {
    let (overlay, dialog) = render_overlay(None)?;

    let title = ElementBuilder::new("h5")?
        .class("mb-0")
        .text(&request.title)
        .build();
    let header = ElementBuilder::new("div")?
        .class("d-flex align-items-center mb-3")
        .icon("bi bi-exclamation-triangle text-warning me-2")?
        .child(&title)?
        .build();

    let message = ElementBuilder::new("p")?
        .class("mb-4")
        .text(&request.message)
        .build();

    let cancel = ElementBuilder::new("button")?
        .class("btn btn-outline-secondary cancel-btn")
        .attr("type", "button")?
        .icon("bi bi-x me-1")?
        .append_text("Cancel")?
        .build();
    let confirm = ElementBuilder::new("button")?
        .class("btn btn-danger confirm-btn")
        .attr("type", "button")?
        .icon("bi bi-check me-1")?
        .append_text(&request.confirm_label)?
        .build();
    let actions = ElementBuilder::new("div")?
        .class("d-flex gap-2 justify-content-end")
        .child(&cancel)?
        .child(&confirm)?
        .build();

    dialog.append_child(&header)?;
    dialog.append_child(&message)?;
    dialog.append_child(&actions)?;

    Ok(ConfirmationDialogView { overlay, cancel, confirm })
}
