// ============================================================================
// FORM FEEDBACK VIEW - invalid/valid-feedback y medidor de fuerza
// ============================================================================
// Los mensajes se insertan siempre como texto, nunca como HTML
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{query_all_in, ElementBuilder};
use crate::viewmodels::validation_viewmodel::PasswordStrength;

fn feedback(class: &str, icon: &str, message: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class(class)
        .icon(icon)?
        .append_text(message)?
        .build())
}

fn remove_in_parent(control: &Element, selector: &str) -> Result<(), JsValue> {
    if let Some(parent) = control.parent_element() {
        for element in query_all_in(&parent, selector)? {
            element.remove();
        }
    }
    Ok(())
}

pub fn show_field_error(control: &Element, message: &str) -> Result<(), JsValue> {
    control.class_list().remove_1("is-valid")?;
    control.class_list().add_1("is-invalid")?;
    remove_in_parent(control, ".invalid-feedback, .valid-feedback")?;
    if let Some(parent) = control.parent_element() {
        parent.append_child(&Element::from(feedback("invalid-feedback", "bi bi-exclamation-circle me-1", message)?))?;
    }
    Ok(())
}

/// `with_message`: solo contraseñas muestran "Looks good!"
pub fn show_field_success(control: &Element, with_message: bool) -> Result<(), JsValue> {
    control.class_list().remove_1("is-invalid")?;
    control.class_list().add_1("is-valid")?;
    remove_in_parent(control, ".invalid-feedback, .valid-feedback")?;
    if with_message {
        if let Some(parent) = control.parent_element() {
            parent.append_child(&Element::from(feedback("valid-feedback", "bi bi-check-circle me-1", "Looks good!")?))?;
        }
    }
    Ok(())
}

pub fn clear_field_feedback(control: &Element) -> Result<(), JsValue> {
    control.class_list().remove_2("is-invalid", "is-valid")?;
    remove_in_parent(control, ".invalid-feedback, .valid-feedback")
}

/// Texto de ayuda .form-text bajo el campo (una sola vez)
pub fn add_input_helper(control: &Element, text: &str) -> Result<(), JsValue> {
    let Some(parent) = control.parent_element() else {
        return Ok(());
    };
    if parent.query_selector(".form-text")?.is_some() {
        return Ok(());
    }
    parent.append_child(&Element::from(feedback("form-text", "bi bi-info-circle me-1", text)?))?;
    Ok(())
}

pub struct StrengthMeterView {
    pub root: Element,
    pub bars: Vec<Element>,
    pub text: Element,
}

pub fn render_strength_meter() -> Result<StrengthMeterView, JsValue> {
    let row = ElementBuilder::new("div")?.class("d-flex gap-1 mb-1").build();
    let mut bars = Vec::with_capacity(4);
    for _ in 0..4 {
        let bar = ElementBuilder::new("div")?.class("strength-bar").build();
        row.append_child(&bar)?;
        bars.push(bar);
    }
    let text = ElementBuilder::new("small")?
        .class(PasswordStrength::Empty.text_class())
        .text(PasswordStrength::Empty.label())
        .build();
    let root = ElementBuilder::new("div")?
        .class("password-strength mt-2")
        .child(&row)?
        .child(&text)?
        .build();
    Ok(StrengthMeterView { root, bars, text })
}

pub fn update_strength_meter(meter: &StrengthMeterView, strength: PasswordStrength) {
    for (bar, level) in meter.bars.iter().zip(strength.bar_classes()) {
        if level.is_empty() {
            bar.set_class_name("strength-bar");
        } else {
            bar.set_class_name(&format!("strength-bar {}", level));
        }
    }
    meter.text.set_class_name(strength.text_class());
    meter.text.set_text_content(Some(strength.label()));
}

/// .file-feedback bajo un input de fichero; vacío si no hay fichero
pub fn show_file_info(control: &Element, info: Option<(&str, &str)>) -> Result<(), JsValue> {
    let Some(parent) = control.parent_element() else {
        return Ok(());
    };
    let container = match parent.query_selector(".file-feedback")? {
        Some(existing) => existing,
        None => {
            let created = ElementBuilder::new("div")?.class("file-feedback small mt-2").build();
            parent.append_child(&created)?;
            created
        }
    };
    container.set_inner_html("");
    if let Some((name, detail)) = info {
        let strong = ElementBuilder::new("strong")?.text(name).build();
        let line = ElementBuilder::new("div")?
            .class("d-flex align-items-center text-success")
            .icon("bi bi-check-circle me-2")?
            .child(&strong)?
            .append_text(&format!(" {}", detail))?
            .build();
        container.append_child(&line)?;
    }
    Ok(())
}

/// Spinner + texto en el botón de envío. Devuelve el HTML previo para restaurarlo.
pub fn show_loading_state(button: &Element, label: &str) -> Result<String, JsValue> {
    let previous = button.inner_html();
    button.set_attribute("data-loading", "true")?;
    button.set_attribute("disabled", "")?;
    button.set_inner_html("");
    let spinner = ElementBuilder::new("span")?
        .class("spinner-border spinner-border-sm me-2")
        .attr("role", "status")?
        .attr("aria-hidden", "true")?
        .build();
    button.append_child(&spinner)?;
    if let Some(doc) = crate::dom::document() {
        button.append_child(&doc.create_text_node(&format!(" {}", label)))?;
    }
    Ok(previous)
}

pub fn clear_loading_state(button: &Element, previous_html: &str) {
    let _ = button.remove_attribute("data-loading");
    let _ = button.remove_attribute("disabled");
    button.set_inner_html(previous_html);
}
