// ============================================================================
// CONFIRMATION - Máquina de estados de acciones destructivas
// ============================================================================
// Idle -> Pending -> { Confirmed -> replay (una sola vez), Cancelled -> Idle }
// ============================================================================

/// Sustantivo genérico cuando no se puede derivar el sujeto del DOM
pub const DEFAULT_SUBJECT: &str = "this item";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfirmationRequest {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
}

impl ConfirmationRequest {
    /// Petición estándar "Confirm Delete" / "Are you sure you want to delete ..."
    pub fn for_action(action: &str, subject: &str) -> Self {
        let subject = if subject.trim().is_empty() { DEFAULT_SUBJECT } else { subject.trim() };
        Self {
            title: format!("Confirm {}", action),
            message: format!(
                "Are you sure you want to {} \"{}\"? This action cannot be undone.",
                action.to_lowercase(),
                subject
            ),
            confirm_label: "Confirm".to_string(),
        }
    }

    /// Mensaje explícito (atributo data-confirm)
    pub fn with_message(action: &str, message: &str) -> Self {
        let message = if message.trim().is_empty() { "Are you sure?" } else { message.trim() };
        Self {
            title: format!("Confirm {}", action),
            message: message.to_string(),
            confirm_label: "Confirm".to_string(),
        }
    }

    pub fn bulk_delete(count: usize) -> Self {
        Self {
            title: "Confirm Delete".to_string(),
            message: format!(
                "Are you sure you want to delete {} selected item{}? This action cannot be undone.",
                count,
                if count == 1 { "" } else { "s" }
            ),
            confirm_label: "Delete".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfirmationPhase {
    Idle,
    Pending,
    /// Confirmado, esperando el replay de la acción original
    Confirmed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Bloquear la acción y abrir el diálogo
    OpenDialog,
    /// Ya hay un diálogo abierto para este control
    AlreadyPending,
    /// Replay tras confirmar: dejar pasar la acción
    Allow,
}

/// Estado por control protegido. La marca one-shot vive aquí.
#[derive(Debug)]
pub struct ConfirmationFlow {
    phase: ConfirmationPhase,
}

impl Default for ConfirmationFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfirmationFlow {
    pub fn new() -> Self {
        Self { phase: ConfirmationPhase::Idle }
    }

    pub fn phase(&self) -> ConfirmationPhase {
        self.phase
    }

    /// El usuario (o el replay) activó el control
    pub fn on_activation(&mut self) -> GuardDecision {
        match self.phase {
            ConfirmationPhase::Confirmed => {
                // Consumir la marca: la próxima activación vuelve a pedir confirmación
                self.phase = ConfirmationPhase::Idle;
                GuardDecision::Allow
            }
            ConfirmationPhase::Pending => GuardDecision::AlreadyPending,
            ConfirmationPhase::Idle => {
                self.phase = ConfirmationPhase::Pending;
                GuardDecision::OpenDialog
            }
        }
    }

    /// Devuelve true si hay que reproducir la acción original
    pub fn confirm(&mut self) -> bool {
        if self.phase == ConfirmationPhase::Pending {
            self.phase = ConfirmationPhase::Confirmed;
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self) {
        if self.phase == ConfirmationPhase::Pending {
            self.phase = ConfirmationPhase::Idle;
        }
    }
}

/// Pase de un solo uso que el botón confirmado deja en su <form> para que la
/// guarda del form no vuelva a preguntar. En el DOM es el atributo data-confirmed.
pub trait ConfirmedMarker {
    fn mark(&self);
    fn is_marked(&self) -> bool;
    fn unmark(&self);

    /// La guarda del form lo consume: true si estaba puesto
    fn take_mark(&self) -> bool {
        let marked = self.is_marked();
        if marked {
            self.unmark();
        }
        marked
    }
}

/// Acción a partir del texto del botón
pub fn action_from_button_text(text: &str) -> &'static str {
    let text = text.to_lowercase();
    if text.contains("delete") {
        "Delete"
    } else if text.contains("remove") {
        "Remove"
    } else if text.contains("clear") {
        "Clear"
    } else {
        "Delete"
    }
}

/// Acción a partir del atributo action del formulario
pub fn action_from_form_action(action: &str) -> &'static str {
    let action = action.to_lowercase();
    if action.contains("remove") && !action.contains("delete") {
        "Remove"
    } else {
        "Delete"
    }
}

/// Mensajes heredados: onsubmit="return confirm('Delete budget for Groceries')"
pub fn subject_from_onsubmit(onsubmit: &str) -> Option<String> {
    const MARKER: &str = "Delete budget for ";
    let start = onsubmit.find(MARKER)? + MARKER.len();
    let rest = &onsubmit[start..];
    let end = rest.find('\'')?;
    let subject = rest[..end].trim();
    if subject.is_empty() {
        None
    } else {
        Some(subject.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Simula botón + diálogo: cuenta cuántas veces se ejecuta la acción real
    struct GuardedButton {
        flow: ConfirmationFlow,
        dialogs_open: usize,
        invocations: usize,
    }

    impl GuardedButton {
        fn new() -> Self {
            Self { flow: ConfirmationFlow::new(), dialogs_open: 0, invocations: 0 }
        }

        fn click(&mut self) {
            match self.flow.on_activation() {
                GuardDecision::OpenDialog => self.dialogs_open += 1,
                GuardDecision::AlreadyPending => {}
                GuardDecision::Allow => self.invocations += 1,
            }
        }

        fn press_escape(&mut self) {
            self.flow.cancel();
            self.dialogs_open = 0;
        }

        fn press_confirm(&mut self) {
            if self.flow.confirm() {
                self.dialogs_open = 0;
                self.click();
            }
        }
    }

    #[test]
    fn test_first_click_opens_exactly_one_dialog() {
        let mut button = GuardedButton::new();
        button.click();
        button.click();
        assert_eq!(button.dialogs_open, 1);
        assert_eq!(button.invocations, 0);
    }

    #[test]
    fn test_escape_cancels_without_side_effect() {
        let mut button = GuardedButton::new();
        button.click();
        button.press_escape();
        assert_eq!(button.dialogs_open, 0);
        assert_eq!(button.invocations, 0);
        assert_eq!(button.flow.phase(), ConfirmationPhase::Idle);

        // Se puede volver a disparar
        button.click();
        assert_eq!(button.dialogs_open, 1);
    }

    #[test]
    fn test_confirm_replays_exactly_once() {
        let mut button = GuardedButton::new();
        button.click();
        button.press_confirm();
        assert_eq!(button.invocations, 1);
        assert_eq!(button.dialogs_open, 0);

        // La marca era one-shot: el siguiente click vuelve a estar protegido
        button.click();
        assert_eq!(button.invocations, 1);
        assert_eq!(button.dialogs_open, 1);
    }

    #[test]
    fn test_confirm_without_pending_is_ignored() {
        let mut flow = ConfirmationFlow::new();
        assert!(!flow.confirm());
        assert_eq!(flow.phase(), ConfirmationPhase::Idle);
    }

    #[test]
    fn test_action_labels() {
        assert_eq!(action_from_button_text("  Delete transaction "), "Delete");
        assert_eq!(action_from_button_text("Remove"), "Remove");
        assert_eq!(action_from_button_text("Clear all"), "Clear");
        assert_eq!(action_from_button_text("🗑"), "Delete");
        assert_eq!(action_from_form_action("/budgets/3/delete/"), "Delete");
        assert_eq!(action_from_form_action("/accounts/remove/4/"), "Remove");
    }

    #[test]
    fn test_subject_from_legacy_onsubmit() {
        assert_eq!(
            subject_from_onsubmit("return confirm('Delete budget for Groceries')"),
            Some("Groceries".to_string())
        );
        assert_eq!(subject_from_onsubmit("return confirm('Sure?')"), None);
        assert_eq!(subject_from_onsubmit(""), None);
    }

    #[test]
    fn test_request_messages() {
        let req = ConfirmationRequest::for_action("Delete", "Groceries");
        assert_eq!(req.title, "Confirm Delete");
        assert_eq!(
            req.message,
            "Are you sure you want to delete \"Groceries\"? This action cannot be undone."
        );

        let req = ConfirmationRequest::for_action("Remove", "   ");
        assert!(req.message.contains("\"this item\""));

        let req = ConfirmationRequest::bulk_delete(1);
        assert!(req.message.contains("1 selected item?"));
    }

    impl ConfirmedMarker for std::cell::Cell<bool> {
        fn mark(&self) {
            self.set(true);
        }
        fn is_marked(&self) -> bool {
            self.get()
        }
        fn unmark(&self) {
            self.set(false);
        }
    }

    #[test]
    fn test_marker_does_not_outlive_cancelled_submit() {
        let form = std::cell::Cell::new(false);

        // Clic confirmado, pero la validación cancela el submit antes de la guarda
        form.mark();
        // Limpieza diferida tras el clic
        form.unmark();

        // Un submit posterior (Enter) debe volver a pasar por la confirmación
        assert!(!form.take_mark());
        let mut flow = ConfirmationFlow::new();
        assert_eq!(flow.on_activation(), GuardDecision::OpenDialog);
    }

    #[test]
    fn test_marker_consumed_by_form_guard_once() {
        let form = std::cell::Cell::new(false);
        form.mark();
        assert!(form.take_mark());
        assert!(!form.take_mark());
        // La limpieza diferida ya no tiene nada que quitar
        form.unmark();
        assert!(!form.is_marked());
    }
}
