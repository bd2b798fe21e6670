// ============================================================================
// ELEMENT BUILDER - Builder pattern para crear elementos fácilmente
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::create_element;

pub struct ElementBuilder {
    element: Element,
}

impl ElementBuilder {
    pub fn new(tag: &str) -> Result<Self, JsValue> {
        Ok(Self {
            element: create_element(tag)?,
        })
    }

    /// Establecer class name (reemplaza todas las clases)
    pub fn class(self, class: &str) -> Self {
        self.element.set_class_name(class);
        self
    }

    pub fn id(self, id: &str) -> Self {
        self.element.set_id(id);
        self
    }

    /// Texto plano (nunca HTML: los mensajes pueden venir del usuario)
    pub fn text(self, text: &str) -> Self {
        self.element.set_text_content(Some(text));
        self
    }

    pub fn attr(self, name: &str, value: &str) -> Result<Self, JsValue> {
        self.element.set_attribute(name, value)?;
        Ok(self)
    }

    pub fn child(self, child: &Element) -> Result<Self, JsValue> {
        self.element.append_child(child)?;
        Ok(self)
    }

    /// Icono bootstrap <i class="bi bi-...">
    pub fn icon(self, icon_class: &str) -> Result<Self, JsValue> {
        let icon = ElementBuilder::new("i")?.class(icon_class).build();
        self.child(&icon)
    }

    /// Agregar texto tras los hijos existentes (p.ej. después de un icono)
    pub fn append_text(self, text: &str) -> Result<Self, JsValue> {
        if let Some(doc) = crate::dom::document() {
            let node = doc.create_text_node(text);
            self.element.append_child(&node)?;
        }
        Ok(self)
    }

    pub fn build(self) -> Element {
        self.element
    }
}
