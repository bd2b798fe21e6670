// ============================================================================
// SHORTCUT REGISTRY - Atajos de teclado indexados por combinación
// ============================================================================
// Un único listener keydown en document resuelve la combinación contra el
// registro. Registrar dos veces la misma combinación es un error.
// ============================================================================

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, KeyboardEvent};

use crate::error::{UiError, UiResult};

/// Tags donde los atajos sin Ctrl/Meta no se disparan
const TEXT_ENTRY_TAGS: [&str; 3] = ["INPUT", "TEXTAREA", "SELECT"];

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyChord {
    /// Ctrl o Meta (Cmd en macOS)
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    /// Tecla normalizada en minúsculas ("e", "1", "?", "home")
    pub key: String,
}

impl KeyChord {
    /// "Ctrl+Shift+E", "Alt+1", "?", "Home"
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        let mut chord = KeyChord {
            ctrl: false,
            alt: false,
            shift: false,
            key: String::new(),
        };

        let parts: Vec<&str> = raw.split('+').collect();
        let (key, modifiers) = parts.split_last()?;
        for modifier in modifiers {
            match modifier.trim().to_lowercase().as_str() {
                "ctrl" | "control" | "meta" | "cmd" => chord.ctrl = true,
                "alt" | "option" => chord.alt = true,
                "shift" => chord.shift = true,
                _ => return None,
            }
        }

        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        chord.key = key.to_lowercase();
        Some(chord.normalized())
    }

    /// Combinación de un evento keydown (key + code del navegador)
    pub fn from_parts(key: &str, code: &str, ctrl: bool, alt: bool, shift: bool) -> Self {
        // Con Alt/Ctrl algunos layouts producen otro carácter ("∂" con Alt+D en macOS)
        let from_code = code
            .strip_prefix("Key")
            .or_else(|| code.strip_prefix("Digit"))
            .filter(|c| c.len() == 1);
        let key = match from_code {
            Some(c) if alt || ctrl => c.to_lowercase(),
            _ => key.to_lowercase(),
        };
        KeyChord { ctrl, alt, shift, key }.normalized()
    }

    pub fn from_event(event: &KeyboardEvent) -> Self {
        Self::from_parts(
            &event.key(),
            &event.code(),
            event.ctrl_key() || event.meta_key(),
            event.alt_key(),
            event.shift_key(),
        )
    }

    /// Shift es implícito en símbolos ("?" ya es Shift+/)
    fn normalized(mut self) -> Self {
        let mut chars = self.key.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if !c.is_alphanumeric() {
                self.shift = false;
            }
        }
        self
    }

    pub fn has_command_modifier(&self) -> bool {
        self.ctrl
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            write!(f, "Ctrl+")?;
        }
        if self.alt {
            write!(f, "Alt+")?;
        }
        if self.shift {
            write!(f, "Shift+")?;
        }
        let mut chars = self.key.chars();
        match chars.next() {
            Some(first) if self.key.chars().count() == 1 => write!(f, "{}", first.to_uppercase()),
            Some(first) => write!(f, "{}{}", first.to_uppercase(), chars.as_str()),
            None => Ok(()),
        }
    }
}

struct ShortcutBinding {
    chord: KeyChord,
    description: String,
    handler: Rc<dyn Fn()>,
}

#[derive(Clone, Default)]
pub struct ShortcutRegistry {
    bindings: Rc<RefCell<Vec<ShortcutBinding>>>,
}

impl ShortcutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&self, chord: &str, description: &str, handler: F) -> UiResult<()>
    where
        F: Fn() + 'static,
    {
        let parsed = KeyChord::parse(chord)
            .ok_or_else(|| UiError::Parse(format!("combinación inválida: '{}'", chord)))?;

        let mut bindings = self.bindings.borrow_mut();
        if let Some(existing) = bindings.iter().find(|b| b.chord == parsed) {
            return Err(UiError::ShortcutConflict {
                chord: parsed.to_string(),
                existing: existing.description.clone(),
            });
        }
        bindings.push(ShortcutBinding {
            chord: parsed,
            description: description.to_string(),
            handler: Rc::new(handler),
        });
        Ok(())
    }

    pub fn resolve(&self, chord: &KeyChord) -> Option<Rc<dyn Fn()>> {
        self.bindings
            .borrow()
            .iter()
            .find(|b| &b.chord == chord)
            .map(|b| b.handler.clone())
    }

    /// (combinación, descripción) en orden de registro, para el diálogo de ayuda
    pub fn describe(&self) -> Vec<(String, String)> {
        self.bindings
            .borrow()
            .iter()
            .map(|b| (b.chord.to_string(), b.description.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.bindings.borrow().len()
    }

    /// Decide y ejecuta; true si el evento fue consumido
    pub fn dispatch(&self, chord: &KeyChord, target_tag: Option<&str>) -> bool {
        let in_text_entry = target_tag.map_or(false, |tag| TEXT_ENTRY_TAGS.contains(&tag));
        if in_text_entry && !chord.has_command_modifier() {
            return false;
        }
        match self.resolve(chord) {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }

    /// Listener keydown único en document
    pub fn install(&self) -> UiResult<()> {
        let document = crate::dom::document()
            .ok_or_else(|| UiError::MissingElement("document".to_string()))?;
        let registry = self.clone();
        let closure = Closure::wrap(Box::new(move |event: KeyboardEvent| {
            let chord = KeyChord::from_event(&event);
            let tag = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .map(|el| el.tag_name());
            if registry.dispatch(&chord, tag.as_deref()) {
                event.prevent_default();
            }
        }) as Box<dyn FnMut(KeyboardEvent)>);
        document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        // Listener global registrado una sola vez desde App
        closure.forget();
        log::info!("⌨️ [SHORTCUTS] {} atajos registrados", self.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_parse_and_display() {
        let chord = KeyChord::parse("Ctrl+Shift+E").unwrap();
        assert!(chord.ctrl && chord.shift && !chord.alt);
        assert_eq!(chord.key, "e");
        assert_eq!(chord.to_string(), "Ctrl+Shift+E");

        assert_eq!(KeyChord::parse("alt+1").unwrap().to_string(), "Alt+1");
        assert_eq!(KeyChord::parse("Home").unwrap().to_string(), "Home");
        assert_eq!(KeyChord::parse("?").unwrap().to_string(), "?");
        assert_eq!(KeyChord::parse("Hyper+X"), None);
        assert_eq!(KeyChord::parse(""), None);
    }

    #[test]
    fn test_event_matches_parsed_chord() {
        // Shift+/ produce "?" con shiftKey = true
        let question = KeyChord::from_parts("?", "Slash", false, false, true);
        assert_eq!(question, KeyChord::parse("?").unwrap());

        let export = KeyChord::from_parts("E", "KeyE", true, false, true);
        assert_eq!(export, KeyChord::parse("Ctrl+Shift+E").unwrap());

        // Alt+D en macOS
        let dashboard = KeyChord::from_parts("∂", "KeyD", false, true, false);
        assert_eq!(dashboard, KeyChord::parse("Alt+D").unwrap());

        let filter = KeyChord::from_parts("1", "Digit1", false, true, false);
        assert_eq!(filter, KeyChord::parse("Alt+1").unwrap());
    }

    #[test]
    fn test_double_binding_is_rejected() {
        let registry = ShortcutRegistry::new();
        registry.register("Ctrl+Shift+E", "Export table", || {}).unwrap();
        let err = registry.register("ctrl+shift+e", "Quick export", || {}).unwrap_err();
        match err {
            UiError::ShortcutConflict { chord, existing } => {
                assert_eq!(chord, "Ctrl+Shift+E");
                assert_eq!(existing, "Export table");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_dispatch_respects_text_entry_focus() {
        let registry = ShortcutRegistry::new();
        let help = Rc::new(Cell::new(0));
        let search = Rc::new(Cell::new(0));
        let help_clone = help.clone();
        let search_clone = search.clone();
        registry.register("?", "Show shortcuts", move || help_clone.set(help_clone.get() + 1)).unwrap();
        registry
            .register("Ctrl+Shift+F", "Focus search", move || search_clone.set(search_clone.get() + 1))
            .unwrap();

        let question = KeyChord::parse("?").unwrap();
        assert!(!registry.dispatch(&question, Some("INPUT")));
        assert!(registry.dispatch(&question, Some("DIV")));
        assert_eq!(help.get(), 1);

        let focus = KeyChord::parse("Ctrl+Shift+F").unwrap();
        assert!(registry.dispatch(&focus, Some("TEXTAREA")));
        assert_eq!(search.get(), 1);

        assert!(!registry.dispatch(&KeyChord::parse("Alt+Z").unwrap(), None));
    }

    #[test]
    fn test_describe_keeps_registration_order() {
        let registry = ShortcutRegistry::new();
        registry.register("Alt+D", "Go to dashboard", || {}).unwrap();
        registry.register("Home", "Scroll to top", || {}).unwrap();
        assert_eq!(
            registry.describe(),
            vec![
                ("Alt+D".to_string(), "Go to dashboard".to_string()),
                ("Home".to_string(), "Scroll to top".to_string()),
            ]
        );
    }
}
