// ============================================================================
// BULK ACTION BAR VIEW - Barra de selección + diálogo de categorización
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlSelectElement};

use crate::dom::ElementBuilder;
use crate::utils::constants::{BULK_BAR_ID, BULK_CATEGORIES};
use crate::views::confirmation_dialog::render_overlay;

pub struct BulkBarView {
    pub bar: Element,
    pub count_label: Element,
    pub export: Element,
    pub categorize: Element,
    pub delete: Element,
    pub clear: Element,
}

fn bar_button(class: &str, icon: &str, label: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("button")?
        .class(&format!("btn btn-sm {}", class))
        .attr("type", "button")?
        .icon(icon)?
        .append_text(label)?
        .build())
}

pub fn render_bulk_action_bar() -> Result<BulkBarView, JsValue> {
    let count_label = ElementBuilder::new("span")?
        .class("selected-count")
        .text("0 items selected")
        .build();
    let export = bar_button("btn-outline-primary", "bi bi-download me-1", "Export")?;
    let categorize = bar_button("btn-outline-warning", "bi bi-tags me-1", "Categorize")?;
    let delete = bar_button("btn-outline-danger", "bi bi-trash me-1", "Delete")?;
    let clear = bar_button("btn-outline-secondary", "bi bi-x me-1", "Clear")?;

    let actions = ElementBuilder::new("div")?
        .class("bulk-actions ms-auto")
        .child(&export)?
        .child(&categorize)?
        .child(&delete)?
        .child(&clear)?
        .build();
    let row = ElementBuilder::new("div")?
        .class("d-flex align-items-center")
        .child(&count_label)?
        .child(&actions)?
        .build();
    let bar = ElementBuilder::new("div")?
        .class("bulk-selection")
        .id(BULK_BAR_ID)
        .attr("aria-live", "polite")?
        .child(&row)?
        .build();

    Ok(BulkBarView {
        bar,
        count_label,
        export,
        categorize,
        delete,
        clear,
    })
}

/// Visible (clase show) solo con selección; la etiqueta se actualiza siempre
pub fn update_bulk_action_bar(view: &BulkBarView, visible: bool, label: &str) -> Result<(), JsValue> {
    view.count_label.set_text_content(Some(label));
    view.bar.class_list().toggle_with_force("show", visible)?;
    Ok(())
}

pub struct CategorizeDialogView {
    pub overlay: Element,
    pub select: HtmlSelectElement,
    pub cancel: Element,
    pub apply: Element,
}

pub fn render_categorize_dialog(count: usize) -> Result<CategorizeDialogView, JsValue> {
    let (overlay, dialog) = render_overlay(None)?;

    let title = ElementBuilder::new("h5")?
        .icon("bi bi-tags me-2")?
        .append_text("Bulk Categorize")?
        .build();
    let message = ElementBuilder::new("p")?
        .text(&format!("Apply category to {} selected items:", count))
        .build();

    let select = ElementBuilder::new("select")?
        .class("form-select mb-3")
        .id("bulk-category-select")
        .build();
    let placeholder = ElementBuilder::new("option")?
        .attr("value", "")?
        .text("-- Select Category --")
        .build();
    select.append_child(&placeholder)?;
    for (value, label) in BULK_CATEGORIES {
        let option = ElementBuilder::new("option")?.attr("value", value)?.text(label).build();
        select.append_child(&option)?;
    }
    let select = select
        .dyn_into::<HtmlSelectElement>()
        .map_err(|_| JsValue::from_str("select no es HtmlSelectElement"))?;

    let cancel = ElementBuilder::new("button")?
        .class("btn btn-secondary cancel-btn")
        .attr("type", "button")?
        .text("Cancel")
        .build();
    let apply = ElementBuilder::new("button")?
        .class("btn btn-primary apply-btn")
        .attr("type", "button")?
        .text("Apply Category")
        .build();
    let actions = ElementBuilder::new("div")?
        .class("d-flex gap-2 justify-content-end")
        .child(&cancel)?
        .child(&apply)?
        .build();

    dialog.append_child(&title)?;
    dialog.append_child(&message)?;
    dialog.append_child(&select)?;
    dialog.append_child(&actions)?;

    Ok(CategorizeDialogView {
        overlay,
        select,
        cancel,
        apply,
    })
}
