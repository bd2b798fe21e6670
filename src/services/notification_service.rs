// ============================================================================
// NOTIFICATION CENTER - Toasts transitorios + alertas del servidor
// ============================================================================
// Cada toast tiene su propio Timeout, pero quien decide qué caduca es el
// ToastTracker: el timer solo dispara un barrido con la hora actual.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use web_sys::Element;

use crate::config::CONFIG;
use crate::dom::{body, get_element_by_id, has_class, on_click, query_selector_all};
use crate::error::{UiError, UiResult};
use crate::models::{Severity, ToastTracker};
use crate::utils::constants::TOAST_CONTAINER_ID;
use crate::views::toast::{render_alert_close_button, render_toast, render_toast_container, toast_element_id};

fn remove_toast_element(id: u32) {
    if let Some(element) = get_element_by_id(&toast_element_id(id)) {
        element.remove();
    }
}

#[derive(Clone)]
pub struct NotificationCenter {
    tracker: Rc<RefCell<ToastTracker>>,
    default_duration_ms: u32,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self {
            tracker: Rc::new(RefCell::new(ToastTracker::new())),
            default_duration_ms: CONFIG.toast_config.default_duration_ms,
        }
    }

    /// Nunca falla hacia el llamador: sin document solo se loguea
    pub fn show_toast(&self, text: &str, severity: Severity, duration_ms: Option<u32>) {
        let duration = duration_ms.unwrap_or(self.default_duration_ms);
        if let Err(e) = self.try_show(text, severity, duration) {
            log::warn!("⚠️ [TOAST] No se pudo mostrar '{}': {}", text, e);
        }
    }

    pub fn info(&self, text: &str) {
        self.show_toast(text, Severity::Info, None);
    }

    pub fn success(&self, text: &str) {
        self.show_toast(text, Severity::Success, None);
    }

    pub fn warning(&self, text: &str) {
        self.show_toast(text, Severity::Warning, None);
    }

    pub fn danger(&self, text: &str) {
        self.show_toast(text, Severity::Danger, None);
    }

    fn container(&self) -> UiResult<Element> {
        if let Some(existing) = get_element_by_id(TOAST_CONTAINER_ID) {
            return Ok(existing);
        }
        let body = body().ok_or_else(|| UiError::MissingElement("body".to_string()))?;
        let container = render_toast_container()?;
        body.append_child(&container)?;
        Ok(container)
    }

    fn try_show(&self, text: &str, severity: Severity, duration_ms: u32) -> UiResult<()> {
        let container = self.container()?;
        let message = self
            .tracker
            .borrow_mut()
            .push(text, severity, duration_ms, js_sys::Date::now());
        let (toast, close) = render_toast(&message)?;
        container.append_child(&toast)?;

        let id = message.id;
        let center = self.clone();
        on_click(&close, move |_| center.dismiss(id))?;

        self.schedule_expiry(id, duration_ms);
        Ok(())
    }

    fn schedule_expiry(&self, id: u32, delay_ms: u32) {
        let center = self.clone();
        Timeout::new(delay_ms, move || center.expire_due(id)).forget();
    }

    /// Quita del DOM todo lo caducado; si `id` aún no venció se reprograma
    fn expire_due(&self, id: u32) {
        let now = js_sys::Date::now();
        let (expired, remaining) = {
            let mut tracker = self.tracker.borrow_mut();
            (tracker.expire(now), tracker.remaining_ms(id, now))
        };
        for expired_id in expired {
            remove_toast_element(expired_id);
        }
        if let Some(delay_ms) = remaining {
            self.schedule_expiry(id, delay_ms);
        }
    }

    /// Quita el toast si sigue vivo (dismiss manual o expiración)
    pub fn dismiss(&self, id: u32) {
        if !self.tracker.borrow_mut().dismiss(id) {
            return;
        }
        remove_toast_element(id);
    }

    /// Alertas .alert del servidor: botón de cerrar + auto-dismiss de éxito
    pub fn enhance_alerts(&self) -> UiResult<()> {
        let alerts = query_selector_all(".alert")?;
        let dismiss_ms = CONFIG.toast_config.alert_dismiss_ms;

        for alert in alerts {
            if alert.query_selector(".btn-close")?.is_none() {
                alert.class_list().add_1("alert-dismissible")?;
                let close = render_alert_close_button()?;
                alert.append_child(&close)?;
                let target = alert.clone();
                on_click(&close, move |_| target.remove())?;
            }

            if has_class(&alert, "alert-success") {
                let target = alert.clone();
                Timeout::new(dismiss_ms, move || {
                    if target.parent_node().is_some() {
                        target.remove();
                    }
                })
                .forget();
            }
        }
        log::debug!("🔔 [TOAST] Alertas del servidor mejoradas");
        Ok(())
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}
