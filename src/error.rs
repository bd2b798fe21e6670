// ============================================================================
// ERRORES - Taxonomía de errores de la capa UI
// ============================================================================
// Los helpers DOM devuelven Result<_, JsValue> (superficie web-sys);
// los servicios devuelven Result<_, UiError>.
// ============================================================================

use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum UiError {
    /// El punto de montaje no existe en esta variante de página
    #[error("missing element: {0}")]
    MissingElement(String),
    #[error("js error: {0}")]
    Js(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {status}: {url}")]
    Http { status: u16, url: String },
    #[error("parse error: {0}")]
    Parse(String),
    #[error("shortcut {chord} already bound to \"{existing}\"")]
    ShortcutConflict { chord: String, existing: String },
}

impl UiError {
    /// Faltan nodos del DOM: se trata como no-op silencioso por los componentes
    pub fn is_missing_element(&self) -> bool {
        matches!(self, UiError::MissingElement(_))
    }
}

impl From<JsValue> for UiError {
    fn from(value: JsValue) -> Self {
        UiError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<UiError> for JsValue {
    fn from(err: UiError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

impl From<serde_json::Error> for UiError {
    fn from(err: serde_json::Error) -> Self {
        UiError::Parse(err.to_string())
    }
}

impl From<serde_wasm_bindgen::Error> for UiError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        UiError::Js(err.to_string())
    }
}

impl From<gloo_net::Error> for UiError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => UiError::Parse(e.to_string()),
            other => UiError::Network(other.to_string()),
        }
    }
}

pub type UiResult<T> = Result<T, UiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = UiError::ShortcutConflict {
            chord: "Ctrl+Shift+E".to_string(),
            existing: "Export table".to_string(),
        };
        assert_eq!(err.to_string(), "shortcut Ctrl+Shift+E already bound to \"Export table\"");

        let err = UiError::Http { status: 500, url: "/api/budgets/".to_string() };
        assert_eq!(err.to_string(), "HTTP 500: /api/budgets/");
    }

    #[test]
    fn test_missing_element_classification() {
        assert!(UiError::MissingElement("#toast-container".into()).is_missing_element());
        assert!(!UiError::Storage("quota".into()).is_missing_element());
    }

    #[test]
    fn test_serde_error_maps_to_parse() {
        let err: UiError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, UiError::Parse(_)));
    }
}
