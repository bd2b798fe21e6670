// ============================================================================
// FORM VIEWMODEL - Validación en línea de los <form> de la página
// ============================================================================
// Las reglas viven en validation_viewmodel (puras); aquí solo se leen los
// controles, se decide y se pinta el feedback. Nunca se lanza un error al
// usuario: todo acaba en invalid-feedback.
// ============================================================================

use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

use crate::dom::{on_change, on_event, on_input, query_all_in, query_selector_all, text_of};
use crate::error::UiResult;
use crate::viewmodels::validation_viewmodel::{
    display_name_from_label, display_name_from_name, file_info_detail, passwords_match, submit_decision,
    validate_field, FieldInput, FieldKind, PasswordStrength, SubmitDecision, EMAIL_HELP, EMAIL_RECHECK_MS,
    FILE_HELP, PROCESSING_LABEL, SUBMIT_LOCK_MS, USERNAME_HELP,
};
use crate::views::form_feedback::{
    add_input_helper, clear_field_feedback, clear_loading_state, render_strength_meter, show_field_error,
    show_field_success, show_file_info, show_loading_state, update_strength_meter,
};

const CONTROL_SELECTOR: &str = "input, select, textarea";
const READY_ATTR: &str = "data-validation-ready";
const SUBMITTING_ATTR: &str = "data-submitting";
const SUBMIT_BUTTON_SELECTOR: &str = "button[type=\"submit\"]";
const SKIPPED_TYPES: [&str; 6] = ["hidden", "submit", "button", "checkbox", "radio", "reset"];

/// input / select / textarea con la interfaz común que necesita la validación
#[derive(Clone)]
enum FormControl {
    Input(HtmlInputElement),
    Select(HtmlSelectElement),
    TextArea(HtmlTextAreaElement),
}

impl FormControl {
    fn from_element(element: Element) -> Option<Self> {
        let element = match element.dyn_into::<HtmlInputElement>() {
            Ok(input) => return Some(FormControl::Input(input)),
            Err(element) => element,
        };
        let element = match element.dyn_into::<HtmlSelectElement>() {
            Ok(select) => return Some(FormControl::Select(select)),
            Err(element) => element,
        };
        element.dyn_into::<HtmlTextAreaElement>().ok().map(FormControl::TextArea)
    }

    fn element(&self) -> &Element {
        match self {
            FormControl::Input(input) => input.unchecked_ref(),
            FormControl::Select(select) => select.unchecked_ref(),
            FormControl::TextArea(area) => area.unchecked_ref(),
        }
    }

    fn name(&self) -> String {
        match self {
            FormControl::Input(input) => input.name(),
            FormControl::Select(select) => select.name(),
            FormControl::TextArea(area) => area.name(),
        }
    }

    fn value(&self) -> String {
        match self {
            FormControl::Input(input) => input.value(),
            FormControl::Select(select) => select.value(),
            FormControl::TextArea(area) => area.value(),
        }
    }

    fn required(&self) -> bool {
        match self {
            FormControl::Input(input) => input.required(),
            FormControl::Select(select) => select.required(),
            FormControl::TextArea(area) => area.required(),
        }
    }

    fn input_type(&self) -> String {
        match self {
            FormControl::Input(input) => input.type_(),
            FormControl::Select(_) => "select".to_string(),
            FormControl::TextArea(_) => "textarea".to_string(),
        }
    }

    fn kind(&self) -> FieldKind {
        FieldKind::from_input_type(&self.input_type())
    }

    fn is_validated(&self) -> bool {
        !SKIPPED_TYPES.contains(&self.input_type().as_str())
    }
}

fn controls_of(form: &HtmlFormElement) -> Vec<FormControl> {
    query_all_in(form, CONTROL_SELECTOR)
        .unwrap_or_default()
        .into_iter()
        .filter_map(FormControl::from_element)
        .filter(FormControl::is_validated)
        .collect()
}

fn named_input(form: &HtmlFormElement, name: &str) -> Option<HtmlInputElement> {
    form.query_selector(&format!("input[name=\"{}\"]", name))
        .ok()
        .flatten()
        .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
}

/// <label for=id> dentro del form o, si no hay, el name formateado
fn display_name(form: &HtmlFormElement, control: &FormControl) -> String {
    let id = control.element().id();
    if !id.is_empty() {
        if let Ok(Some(label)) = form.query_selector(&format!("label[for=\"{}\"]", id)) {
            return display_name_from_label(&text_of(&label));
        }
    }
    display_name_from_name(&control.name())
}

fn snapshot(form: &HtmlFormElement, control: &FormControl) -> FieldInput {
    let (file, accept) = match control {
        FormControl::Input(input) if control.kind() == FieldKind::File => (
            input
                .files()
                .and_then(|files| files.get(0))
                .map(|file| (file.name(), file.size())),
            input.accept(),
        ),
        _ => (None, String::new()),
    };
    FieldInput {
        name: control.name(),
        display_name: display_name(form, control),
        value: control.value(),
        required: control.required(),
        file,
        accept,
    }
}

fn render_result(control: &FormControl, result: &Result<(), String>) {
    let element = control.element();
    let outcome = match result {
        Ok(()) => {
            let with_message = control.kind() == FieldKind::Password || control.name() == "confirm_password";
            show_field_success(element, with_message)
        }
        Err(message) => show_field_error(element, message),
    };
    if let Err(e) = outcome {
        log::warn!("⚠️ [FORM] Error pintando feedback de {}: {:?}", control.name(), e);
    }
}

fn validate_control(form: &HtmlFormElement, control: &FormControl) -> bool {
    let result = validate_field(&snapshot(form, control), control.kind());
    render_result(control, &result);
    result.is_ok()
}

/// confirm_password contra password del mismo form
fn validate_confirmation(form: &HtmlFormElement, confirm: &FormControl) -> bool {
    let Some(password) = named_input(form, "password") else {
        return true;
    };
    let result = passwords_match(&password.value(), &confirm.value());
    if result.is_err() || !confirm.value().is_empty() {
        render_result(confirm, &result);
    }
    result.is_ok()
}

/// Bloquea reenvíos durante SUBMIT_LOCK_MS con el botón en estado de carga
fn lock_submission(form: &HtmlFormElement) {
    let _ = form.set_attribute(SUBMITTING_ATTR, "true");
    let button = form.query_selector(SUBMIT_BUTTON_SELECTOR).ok().flatten();
    let previous = button.as_ref().and_then(|button| match show_loading_state(button, PROCESSING_LABEL) {
        Ok(html) => Some(html),
        Err(e) => {
            log::warn!("⚠️ [FORM] Error mostrando estado de carga: {:?}", e);
            None
        }
    });

    let form = form.clone();
    Timeout::new(SUBMIT_LOCK_MS, move || {
        let _ = form.set_attribute(SUBMITTING_ATTR, "false");
        if let (Some(button), Some(html)) = (button, previous) {
            clear_loading_state(&button, &html);
        }
    })
    .forget();
}

/// Valida todos los campos (sin cortocircuito, para pintar todos los errores)
pub fn validate_form(form: &HtmlFormElement) -> bool {
    let mut valid = true;
    for control in controls_of(form) {
        if !validate_control(form, &control) {
            valid = false;
        }
    }
    if let Some(confirm) = named_input(form, "confirm_password") {
        if !validate_confirmation(form, &FormControl::Input(confirm)) {
            valid = false;
        }
    }
    valid
}

#[derive(Clone, Copy, Default)]
pub struct FormValidationViewModel;

impl FormValidationViewModel {
    pub fn new() -> Self {
        Self
    }

    /// Conecta todos los formularios. Devuelve cuántos.
    pub fn init(&self) -> UiResult<usize> {
        let mut count = 0;
        for element in query_selector_all("form")? {
            let Ok(form) = element.dyn_into::<HtmlFormElement>() else {
                continue;
            };
            if form.has_attribute(READY_ATTR) {
                continue;
            }
            form.set_attribute(READY_ATTR, "true")?;
            self.setup_form(&form)?;
            count += 1;
        }
        log::info!("📝 [FORM] {} formularios con validación", count);
        Ok(count)
    }

    fn setup_form(&self, form: &HtmlFormElement) -> UiResult<()> {
        let submitted = form.clone();
        on_event(form, "submit", move |event| {
            let locked = submitted.get_attribute(SUBMITTING_ATTR).as_deref() == Some("true");
            match submit_decision(event.default_prevented(), locked, || validate_form(&submitted)) {
                SubmitDecision::Skip => {}
                SubmitDecision::Blocked => {
                    log::debug!("🛑 [FORM] Doble envío bloqueado");
                    event.prevent_default();
                }
                SubmitDecision::Invalid => event.prevent_default(),
                SubmitDecision::Submit => lock_submission(&submitted),
            }
        })?;

        for control in controls_of(form) {
            self.setup_control(form, control)?;
        }
        Ok(())
    }

    fn setup_control(&self, form: &HtmlFormElement, control: FormControl) -> UiResult<()> {
        let control = Rc::new(control);
        let element = control.element().clone();
        let name = control.name();
        let kind = control.kind();

        {
            let form = form.clone();
            let control = control.clone();
            on_event(&element, "blur", move |_| {
                validate_control(&form, &control);
            })?;
        }
        {
            let form = form.clone();
            let control = control.clone();
            on_input(&element, move |_| {
                if let Err(e) = clear_field_feedback(control.element()) {
                    log::warn!("⚠️ [FORM] Error limpiando feedback: {:?}", e);
                }
                if control.kind() == FieldKind::Email {
                    let form = form.clone();
                    let control = control.clone();
                    Timeout::new(EMAIL_RECHECK_MS, move || {
                        validate_control(&form, &control);
                    })
                    .forget();
                }
            })?;
        }

        if name == "confirm_password" {
            let form = form.clone();
            let control = control.clone();
            on_input(&element, move |_| {
                validate_confirmation(&form, &control);
            })?;
        }

        if kind == FieldKind::File {
            let form = form.clone();
            let control = control.clone();
            on_change(&element, move |_| {
                let FormControl::Input(input) = control.as_ref() else {
                    return;
                };
                // Un fichero inválido se descarta del input
                let valid = validate_control(&form, &control);
                if !valid {
                    input.set_value("");
                }
                let selected = input
                    .files()
                    .and_then(|files| files.get(0))
                    .filter(|_| valid)
                    .map(|file| (file.name(), file_info_detail(file.size())));
                let info = selected.as_ref().map(|(name, detail)| (name.as_str(), detail.as_str()));
                if let Err(e) = show_file_info(control.element(), info) {
                    log::warn!("⚠️ [FORM] Error mostrando el fichero elegido: {:?}", e);
                }
            })?;
            add_input_helper(&element, FILE_HELP)?;
        }

        if kind == FieldKind::Email {
            add_input_helper(&element, EMAIL_HELP)?;
        }

        if name == "username" {
            element.set_attribute("minlength", "3")?;
            element.set_attribute("maxlength", "30")?;
            element.set_attribute("pattern", "[a-zA-Z0-9_]+")?;
            add_input_helper(&element, USERNAME_HELP)?;
        }

        if name == "password" && kind == FieldKind::Password {
            element.set_attribute("minlength", "8")?;
            self.attach_strength_meter(&control)?;
        }
        Ok(())
    }

    fn attach_strength_meter(&self, control: &Rc<FormControl>) -> UiResult<()> {
        let element = control.element();
        let Some(parent) = element.parent_element() else {
            return Ok(());
        };
        let meter = Rc::new(render_strength_meter()?);
        parent.append_child(&meter.root)?;

        let control = control.clone();
        on_input(element, move |_| {
            update_strength_meter(&meter, PasswordStrength::evaluate(&control.value()));
        })?;
        Ok(())
    }
}
