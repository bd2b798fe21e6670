// ============================================================================
// EVENT HANDLING - Sistema de eventos
// ============================================================================
// GESTIÓN DE MEMORY LEAKS:
// - Listeners en elementos del DOM: al destruirse el elemento el navegador
//   limpia sus listeners, así que closure.forget() es seguro.
// - Listeners globales (window/document): o se registran UNA VEZ desde App,
//   o se guardan en un ListenerHandle que los quita al hacer drop
//   (p.ej. Escape del diálogo de confirmación).
// ============================================================================

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, KeyboardEvent, MouseEvent};

/// Listener registrado que se elimina al hacer drop
pub struct ListenerHandle {
    target: EventTarget,
    event_type: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl ListenerHandle {
    pub fn new<F>(target: &EventTarget, event_type: &'static str, handler: F) -> Result<Self, JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event_type,
            closure,
        })
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event_type, self.closure.as_ref().unchecked_ref());
    }
}

/// Listener genérico permanente (closure.forget())
pub fn on_event<F>(target: &EventTarget, event_type: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Helper para crear click handler simple
pub fn on_click<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(MouseEvent)>);
    element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Helper para input (cada pulsación)
pub fn on_input<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    on_event(element, "input", handler)
}

/// Helper para change (checkbox, select, file, date)
pub fn on_change<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    on_event(element, "change", handler)
}

/// Keydown con el evento ya tipado
pub fn on_keydown<F>(target: &EventTarget, mut handler: F) -> Result<ListenerHandle, JsValue>
where
    F: FnMut(KeyboardEvent) + 'static,
{
    ListenerHandle::new(target, "keydown", move |event: Event| {
        if let Ok(key_event) = event.dyn_into::<KeyboardEvent>() {
            handler(key_event);
        }
    })
}
