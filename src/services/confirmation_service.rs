// ============================================================================
// CONFIRMATION SERVICE - Diálogo modal + guardas de acciones destructivas
// ============================================================================
// request() devuelve un Future<bool>. Solo hay un diálogo abierto a la vez:
// una petición concurrente se resuelve false sin abrir nada.
// ============================================================================

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use futures::channel::oneshot;
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event, HtmlButtonElement, HtmlFormElement, HtmlInputElement};

use crate::dom::{as_html, body, closest, document, on_click, on_event, on_keydown, query_selector_all, text_of, ListenerHandle};
use crate::error::{UiError, UiResult};
use crate::models::{
    action_from_button_text, action_from_form_action, subject_from_onsubmit, ConfirmationFlow,
    ConfirmationRequest, ConfirmedMarker, GuardDecision, DEFAULT_SUBJECT,
};
use crate::utils::constants::CONFIRMED_ATTR;
use crate::views::confirmation_dialog::render_confirmation_dialog;

/// Controles protegidos por click
const GUARDED_BUTTONS: &str =
    "button[type=\"submit\"][class*=\"danger\"], form[action*=\"delete\"] button, [data-confirm]";
/// Formularios protegidos por submit
const GUARDED_FORMS: &str = "form[action*=\"delete\"]";
/// Marca de guarda instalada (registro idempotente)
const GUARDED_ATTR: &str = "data-confirm-guarded";

struct OpenDialog {
    overlay: Element,
    sender: Option<oneshot::Sender<bool>>,
    escape: Option<ListenerHandle>,
}

#[derive(Clone, Default)]
pub struct ConfirmationService {
    open: Rc<RefCell<Option<OpenDialog>>>,
}

impl ConfirmationService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open.borrow().is_some()
    }

    /// Abre el diálogo y resuelve true solo si el usuario confirma
    pub fn request(&self, request: ConfirmationRequest) -> impl Future<Output = bool> {
        let (sender, receiver) = oneshot::channel();
        if self.is_open() {
            log::debug!("🛑 [CONFIRM] Ya hay un diálogo abierto, se rechaza '{}'", request.title);
            let _ = sender.send(false);
        } else if let Err(e) = self.open_dialog(&request, sender) {
            // sender descartado => el receiver se resuelve como cancelado
            log::error!("❌ [CONFIRM] No se pudo abrir el diálogo: {}", e);
        }
        async move { receiver.await.unwrap_or(false) }
    }

    fn open_dialog(&self, request: &ConfirmationRequest, sender: oneshot::Sender<bool>) -> UiResult<()> {
        let body = body().ok_or_else(|| UiError::MissingElement("body".to_string()))?;
        let document = document().ok_or_else(|| UiError::MissingElement("document".to_string()))?;
        let view = render_confirmation_dialog(request)?;

        let service = self.clone();
        on_click(&view.cancel, move |_| service.close(false))?;

        let service = self.clone();
        on_click(&view.confirm, move |_| service.close(true))?;

        // Click fuera de la caja del diálogo
        let service = self.clone();
        let overlay = view.overlay.clone();
        on_click(&view.overlay, move |event| {
            let on_overlay = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .map_or(false, |target| target == overlay);
            if on_overlay {
                service.close(false);
            }
        })?;

        let service = self.clone();
        let escape = on_keydown(&document, move |event| {
            if event.key() == "Escape" {
                service.close(false);
            }
        })?;

        body.append_child(&view.overlay)?;
        if let Some(confirm) = as_html(&view.confirm) {
            let _ = confirm.focus();
        }

        *self.open.borrow_mut() = Some(OpenDialog {
            overlay: view.overlay,
            sender: Some(sender),
            escape: Some(escape),
        });
        Ok(())
    }

    /// Cierra el diálogo abierto y entrega el resultado
    pub fn close(&self, confirmed: bool) {
        let dialog = self.open.borrow_mut().take();
        let Some(mut dialog) = dialog else {
            return;
        };
        dialog.overlay.remove();
        if let Some(sender) = dialog.sender.take() {
            let _ = sender.send(confirmed);
        }
        // El listener de Escape puede estar ejecutándose ahora mismo:
        // se suelta en la siguiente microtarea
        let escape = dialog.escape.take();
        spawn_local(async move {
            drop(escape);
        });
    }

    // ------------------------------------------------------------------
    // Guardas
    // ------------------------------------------------------------------

    /// Instala guardas en todos los controles destructivos de la página
    pub fn install_guards(&self) -> UiResult<usize> {
        let mut installed = 0;
        for element in query_selector_all(GUARDED_BUTTONS)? {
            if self.guard_control(&element)? {
                installed += 1;
            }
        }
        for form in query_selector_all(GUARDED_FORMS)? {
            if let Ok(form) = form.dyn_into::<HtmlFormElement>() {
                if self.guard_form(&form)? {
                    installed += 1;
                }
            }
        }
        log::info!("🛡️ [CONFIRM] {} controles protegidos", installed);
        Ok(installed)
    }

    fn guard_control(&self, element: &Element) -> UiResult<bool> {
        if element.has_attribute(GUARDED_ATTR) {
            return Ok(false);
        }
        element.set_attribute(GUARDED_ATTR, "button")?;

        let flow = Rc::new(RefCell::new(ConfirmationFlow::new()));
        let service = self.clone();
        let target = element.clone();
        on_event(element, "click", move |event: Event| {
            let decision = flow.borrow_mut().on_activation();
            match decision {
                GuardDecision::Allow => {
                    target.unmark();
                    // Un submit confirmado no vuelve a pasar por la guarda del form
                    if is_submit_button(&target) {
                        if let Some(form) = closest(&target, "form") {
                            form.mark();
                            // Si el submit no llegó a la guarda (validación), el pase caduca
                            Timeout::new(0, move || form.unmark()).forget();
                        }
                    }
                }
                GuardDecision::AlreadyPending => event.prevent_default(),
                GuardDecision::OpenDialog => {
                    event.prevent_default();
                    let request = request_for_control(&target);
                    let service = service.clone();
                    let flow = flow.clone();
                    let target = target.clone();
                    spawn_local(async move {
                        if service.request(request).await {
                            let replay = flow.borrow_mut().confirm();
                            if replay {
                                target.mark();
                                if let Some(html) = as_html(&target) {
                                    html.click();
                                }
                            }
                        } else {
                            flow.borrow_mut().cancel();
                        }
                    });
                }
            }
        })?;
        Ok(true)
    }

    fn guard_form(&self, form: &HtmlFormElement) -> UiResult<bool> {
        if form.has_attribute(GUARDED_ATTR) {
            return Ok(false);
        }
        form.set_attribute(GUARDED_ATTR, "form")?;

        let flow = Rc::new(RefCell::new(ConfirmationFlow::new()));
        let service = self.clone();
        let target = form.clone();
        on_event(form, "submit", move |event: Event| {
            // Confirmado desde el botón de envío
            if target.take_mark() {
                return;
            }
            let decision = flow.borrow_mut().on_activation();
            match decision {
                GuardDecision::Allow => {}
                GuardDecision::AlreadyPending => event.prevent_default(),
                GuardDecision::OpenDialog => {
                    event.prevent_default();
                    let request = request_for_form(&target);
                    let service = service.clone();
                    let flow = flow.clone();
                    let target = target.clone();
                    spawn_local(async move {
                        if service.request(request).await {
                            let replay = flow.borrow_mut().confirm();
                            // requestSubmit dispara de nuevo el evento submit
                            if replay && target.request_submit().is_err() {
                                flow.borrow_mut().on_activation();
                                let _ = target.submit();
                            }
                        } else {
                            flow.borrow_mut().cancel();
                        }
                    });
                }
            }
        })?;
        Ok(true)
    }
}

impl ConfirmedMarker for Element {
    fn mark(&self) {
        let _ = self.set_attribute(CONFIRMED_ATTR, "true");
    }

    fn is_marked(&self) -> bool {
        self.has_attribute(CONFIRMED_ATTR)
    }

    fn unmark(&self) {
        let _ = self.remove_attribute(CONFIRMED_ATTR);
    }
}

fn is_submit_button(element: &Element) -> bool {
    if let Some(button) = element.dyn_ref::<HtmlButtonElement>() {
        return button.type_() == "submit";
    }
    element
        .dyn_ref::<HtmlInputElement>()
        .map_or(false, |input| input.type_() == "submit")
}

/// Sujeto: badge / primera celda de la fila, cabecera de la card, o genérico
pub fn subject_for(element: &Element) -> String {
    if let Some(row) = closest(element, "tr") {
        if let Ok(Some(first_cell)) = row.query_selector("td") {
            if let Ok(Some(badge)) = first_cell.query_selector(".badge") {
                return text_of(&badge);
            }
            return text_of(&first_cell);
        }
    }
    if let Some(card) = closest(element, ".card") {
        if let Ok(Some(header)) = card.query_selector(".card-header h6, .card-header h5") {
            return text_of(&header);
        }
    }
    DEFAULT_SUBJECT.to_string()
}

pub fn request_for_control(element: &Element) -> ConfirmationRequest {
    let action = action_from_button_text(&text_of(element));
    match element.get_attribute("data-confirm") {
        Some(message) => ConfirmationRequest::with_message(action, &message),
        None => ConfirmationRequest::for_action(action, &subject_for(element)),
    }
}

pub fn request_for_form(form: &HtmlFormElement) -> ConfirmationRequest {
    let action = action_from_form_action(&form.get_attribute("action").unwrap_or_default());
    let from_onsubmit = form
        .get_attribute("onsubmit")
        .and_then(|onsubmit| subject_from_onsubmit(&onsubmit));
    let subject = match from_onsubmit {
        Some(subject) => subject,
        None => match form.query_selector("button[type=\"submit\"]") {
            Ok(Some(button)) => subject_for(&button),
            _ => subject_for(form),
        },
    };
    ConfirmationRequest::for_action(action, &subject)
}
