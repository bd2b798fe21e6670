// ============================================================================
// TOOLTIP VIEWMODEL - Ayudas contextuales sobre iconos y campos conocidos
// ============================================================================
// Solo se anotan atributos data-bs-*; sin Bootstrap en la página los title
// siguen funcionando como tooltip nativo.
// ============================================================================

use crate::dom::{closest, query_selector, query_selector_all};
use crate::error::UiResult;
use crate::utils::bootstrap_ffi::{tooltip_library_available, Tooltip, TooltipOptions};
use crate::utils::to_js_object;

const TOGGLE_ATTR: &str = "data-bs-toggle";
const PLACEMENT_ATTR: &str = "data-bs-placement";
const READY_ATTR: &str = "data-tooltip-ready";
const TOOLTIP_SELECTOR: &str = "[data-bs-toggle=\"tooltip\"]";

/// En orden de prioridad: un icono con varias clases toma la primera
const ICON_TOOLTIPS: [(&str, &str); 12] = [
    ("bi-upload", "Import bank statements and financial data"),
    ("bi-download", "Export or download data"),
    ("bi-trash", "Delete this item permanently"),
    ("bi-pencil", "Edit this item"),
    ("bi-eye", "View details"),
    ("bi-plus", "Add new item"),
    ("bi-gear", "Settings and configuration"),
    ("bi-question-circle", "Get help and information"),
    ("bi-shield-check", "Secure and protected"),
    ("bi-exclamation-triangle", "Warning or attention needed"),
    ("bi-check-circle", "Success or completed"),
    ("bi-info-circle", "Additional information available"),
];

const FIELD_TOOLTIPS: [(&str, &str); 5] = [
    (
        "username",
        "Choose a unique name to identify your account. Use letters, numbers, and underscores only.",
    ),
    (
        "password",
        "Create a strong password with at least 8 characters, including uppercase, lowercase, and numbers.",
    ),
    ("confirm_password", "Re-enter your password to make sure it matches."),
    (
        "email",
        "Your email address for account recovery and notifications (optional).",
    ),
    (
        "ofx_file",
        "Select an OFX file downloaded from your bank's website. Usually found in \"Export Transactions\" section.",
    ),
];

/// Tooltip para un `class` completo; compara tokens, no prefijos
pub fn icon_tooltip(class_attr: &str) -> Option<&'static str> {
    ICON_TOOLTIPS
        .iter()
        .find(|(class, _)| class_attr.split_whitespace().any(|token| token == *class))
        .map(|(_, text)| *text)
}

pub fn field_tooltip(name: &str) -> Option<&'static str> {
    FIELD_TOOLTIPS
        .iter()
        .find(|(field, _)| *field == name)
        .map(|(_, text)| *text)
}

#[derive(Clone, Copy, Default)]
pub struct TooltipViewModel;

impl TooltipViewModel {
    pub fn new() -> Self {
        Self
    }

    /// Anota iconos y campos y arranca los tooltips de Bootstrap. Devuelve cuántos.
    pub fn init(&self) -> UiResult<usize> {
        self.annotate_icons()?;
        self.annotate_fields()?;
        self.activate()
    }

    fn annotate_icons(&self) -> UiResult<()> {
        for (class, _) in ICON_TOOLTIPS {
            for icon in query_selector_all(&format!(".{}", class))? {
                // Ya cubierto por él mismo o por un ancestro
                if closest(&icon, TOOLTIP_SELECTOR).is_some() {
                    continue;
                }
                let Some(text) = icon_tooltip(&icon.class_name()) else {
                    continue;
                };
                icon.set_attribute(TOGGLE_ATTR, "tooltip")?;
                icon.set_attribute(PLACEMENT_ATTR, "top")?;
                icon.set_attribute("title", text)?;
            }
        }
        Ok(())
    }

    fn annotate_fields(&self) -> UiResult<()> {
        for (name, text) in FIELD_TOOLTIPS {
            let selector = format!(
                "input[name=\"{0}\"], select[name=\"{0}\"], textarea[name=\"{0}\"]",
                name
            );
            let Some(field) = query_selector(&selector)? else {
                continue;
            };
            if field.has_attribute(TOGGLE_ATTR) {
                continue;
            }
            field.set_attribute(TOGGLE_ATTR, "tooltip")?;
            field.set_attribute(PLACEMENT_ATTR, "right")?;
            field.set_attribute("title", text)?;
        }
        Ok(())
    }

    fn activate(&self) -> UiResult<usize> {
        if !tooltip_library_available() {
            log::debug!("💬 [TOOLTIP] Bootstrap no cargado, se usan title nativos");
            return Ok(0);
        }
        let options = to_js_object(&TooltipOptions::default())?;
        let mut count = 0;
        for element in query_selector_all(TOOLTIP_SELECTOR)? {
            if element.has_attribute(READY_ATTR) {
                continue;
            }
            match Tooltip::new(&element, &options) {
                Ok(_) => {
                    element.set_attribute(READY_ATTR, "true")?;
                    count += 1;
                }
                Err(e) => log::warn!("⚠️ [TOOLTIP] Error creando tooltip: {:?}", e),
            }
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_tooltip_matches_whole_class_tokens() {
        assert_eq!(icon_tooltip("bi bi-trash"), Some("Delete this item permanently"));
        assert_eq!(icon_tooltip("bi bi-plus me-1"), Some("Add new item"));
        // bi-plus-circle no es bi-plus
        assert_eq!(icon_tooltip("bi bi-plus-circle"), None);
        assert_eq!(icon_tooltip("bi bi-house"), None);
    }

    #[test]
    fn test_icon_tooltip_first_entry_wins() {
        assert_eq!(
            icon_tooltip("bi-check-circle bi-upload"),
            Some("Import bank statements and financial data")
        );
    }

    #[test]
    fn test_field_tooltips() {
        assert_eq!(
            field_tooltip("confirm_password"),
            Some("Re-enter your password to make sure it matches.")
        );
        assert!(field_tooltip("ofx_file").is_some_and(|text| text.contains("OFX")));
        assert_eq!(field_tooltip("amount"), None);
    }
}
