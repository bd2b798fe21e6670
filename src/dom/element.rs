// ============================================================================
// ELEMENT HELPERS - Funciones básicas para manipular DOM
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Blob, BlobPropertyBag, CustomEvent, CustomEventInit, Document, Element, HtmlAnchorElement, HtmlElement, NodeList, Url,
    Window,
};

/// Obtener window global
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Obtener document
pub fn document() -> Option<Document> {
    window()?.document()
}

pub fn body() -> Option<HtmlElement> {
    document()?.body()
}

/// Obtener elemento por ID
pub fn get_element_by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

/// Crear elemento
pub fn create_element(tag: &str) -> Result<Element, JsValue> {
    document()
        .ok_or_else(|| JsValue::from_str("No document"))
        .and_then(|doc| doc.create_element(tag))
}

/// Agregar clase
pub fn add_class(element: &Element, class: &str) -> Result<(), JsValue> {
    element.class_list().add_1(class)
}

/// Verificar si tiene clase
pub fn has_class(element: &Element, class: &str) -> bool {
    element.class_list().contains(class)
}

/// Texto visible del elemento (textContent, recortado)
pub fn text_of(element: &Element) -> String {
    element.text_content().unwrap_or_default().trim().to_string()
}

/// Query selector sobre document
pub fn query_selector(selector: &str) -> Result<Option<Element>, JsValue> {
    document()
        .ok_or_else(|| JsValue::from_str("No document"))?
        .query_selector(selector)
}

fn node_list_elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// querySelectorAll sobre document
pub fn query_selector_all(selector: &str) -> Result<Vec<Element>, JsValue> {
    let doc = document().ok_or_else(|| JsValue::from_str("No document"))?;
    Ok(node_list_elements(doc.query_selector_all(selector)?))
}

/// querySelectorAll dentro de un elemento
pub fn query_all_in(root: &Element, selector: &str) -> Result<Vec<Element>, JsValue> {
    Ok(node_list_elements(root.query_selector_all(selector)?))
}

/// Ancestro más cercano (incluido el propio elemento) que cumple el selector
pub fn closest(element: &Element, selector: &str) -> Option<Element> {
    element.closest(selector).ok().flatten()
}

pub fn as_html(element: &Element) -> Option<HtmlElement> {
    element.dyn_ref::<HtmlElement>().cloned()
}

/// Lanzar un CustomEvent con detail JSON sobre un target
pub fn dispatch_custom_event(target: &web_sys::EventTarget, name: &str, detail: &JsValue) -> Result<(), JsValue> {
    let init = CustomEventInit::new();
    init.set_detail(detail);
    init.set_bubbles(true);
    let event = CustomEvent::new_with_event_init_dict(name, &init)?;
    target.dispatch_event(&event)?;
    Ok(())
}

/// Descarga de texto generado vía Blob + <a download>
pub fn download_file(content: &str, mime: &str, filename: &str) -> Result<(), JsValue> {
    let parts = js_sys::Array::of1(&JsValue::from_str(content));
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let anchor = create_element("a")?.dyn_into::<HtmlAnchorElement>()?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    let body = body().ok_or_else(|| JsValue::from_str("No body"))?;
    body.append_child(&anchor)?;
    anchor.click();
    anchor.remove();
    Url::revoke_object_url(&url)
}

/// Hoy según el reloj local del navegador
pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
