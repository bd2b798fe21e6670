// ============================================================================
// TOAST - Mensajes transitorios y su ciclo de vida
// ============================================================================

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Danger,
}

impl Severity {
    /// Severidad desconocida => Info (nunca es un error)
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "success" => Severity::Success,
            "warning" => Severity::Warning,
            "danger" | "error" => Severity::Danger,
            _ => Severity::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }

    /// Clases CSS del toast (bootstrap bg-*)
    pub fn css_class(&self) -> String {
        format!("toast show align-items-center text-white bg-{} border-0", self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ToastMessage {
    pub id: u32,
    pub text: String,
    pub severity: Severity,
    pub duration_ms: u32,
}

/// Registro de toasts vivos con su instante de expiración.
/// El NotificationCenter lo alimenta; el DOM solo refleja lo que hay aquí.
#[derive(Debug, Default)]
pub struct ToastTracker {
    next_id: u32,
    // (mensaje, expira_en_ms) en orden de llamada
    live: Vec<(ToastMessage, f64)>,
}

impl ToastTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registrar un toast creado en `now_ms`
    pub fn push(&mut self, text: &str, severity: Severity, duration_ms: u32, now_ms: f64) -> ToastMessage {
        self.next_id += 1;
        let message = ToastMessage {
            id: self.next_id,
            text: text.to_string(),
            severity,
            duration_ms,
        };
        self.live.push((message.clone(), now_ms + f64::from(duration_ms)));
        message
    }

    /// Cierre explícito. Devuelve false si ya no estaba vivo.
    pub fn dismiss(&mut self, id: u32) -> bool {
        let before = self.live.len();
        self.live.retain(|(m, _)| m.id != id);
        self.live.len() != before
    }

    /// Eliminar los toasts expirados en `now_ms`, devolviendo sus ids
    pub fn expire(&mut self, now_ms: f64) -> Vec<u32> {
        let expired: Vec<u32> = self
            .live
            .iter()
            .filter(|(_, deadline)| *deadline <= now_ms)
            .map(|(m, _)| m.id)
            .collect();
        self.live.retain(|(_, deadline)| *deadline > now_ms);
        expired
    }

    /// Milisegundos que le quedan a un toast vivo (al menos 1)
    pub fn remaining_ms(&self, id: u32, now_ms: f64) -> Option<u32> {
        self.live
            .iter()
            .find(|(m, _)| m.id == id)
            .map(|(_, deadline)| (deadline - now_ms).ceil().max(1.0) as u32)
    }

    #[cfg(test)]
    pub fn active(&self) -> Vec<&ToastMessage> {
        self.live.iter().map(|(m, _)| m).collect()
    }

    #[cfg(test)]
    pub fn is_live(&self, id: u32) -> bool {
        self.live.iter().any(|(m, _)| m.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_severity_falls_back_to_info() {
        assert_eq!(Severity::parse("success"), Severity::Success);
        assert_eq!(Severity::parse("DANGER"), Severity::Danger);
        assert_eq!(Severity::parse("purple"), Severity::Info);
        assert_eq!(Severity::parse(""), Severity::Info);
    }

    #[test]
    fn test_toast_gone_after_duration() {
        let mut tracker = ToastTracker::new();
        let toast = tracker.push("Saved", Severity::Success, 2000, 0.0);

        assert!(tracker.expire(1999.0).is_empty());
        assert!(tracker.is_live(toast.id));

        assert_eq!(tracker.expire(2000.0 + 1.0), vec![toast.id]);
        assert!(tracker.active().is_empty());
    }

    #[test]
    fn test_toasts_stack_in_call_order_with_independent_timers() {
        let mut tracker = ToastTracker::new();
        let first = tracker.push("one", Severity::Info, 3000, 0.0);
        let second = tracker.push("two", Severity::Warning, 500, 100.0);

        let texts: Vec<&str> = tracker.active().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two"]);

        assert_eq!(tracker.expire(700.0), vec![second.id]);
        assert!(tracker.is_live(first.id));
    }

    #[test]
    fn test_dismiss_before_expiry() {
        let mut tracker = ToastTracker::new();
        let toast = tracker.push("bye", Severity::Info, 3000, 0.0);
        assert!(tracker.dismiss(toast.id));
        assert!(!tracker.dismiss(toast.id));
        assert!(tracker.expire(5000.0).is_empty());
    }

    #[test]
    fn test_early_timer_reschedules_instead_of_dropping() {
        let mut tracker = ToastTracker::new();
        let toast = tracker.push("Saved", Severity::Success, 3000, 1000.0);

        // El timer del navegador dispara un poco antes del deadline
        assert!(tracker.expire(3998.5).is_empty());
        assert_eq!(tracker.remaining_ms(toast.id, 3998.5), Some(2));

        assert_eq!(tracker.expire(4000.0), vec![toast.id]);
        assert_eq!(tracker.remaining_ms(toast.id, 4000.0), None);
    }

    #[test]
    fn test_expiry_sweeps_every_due_toast() {
        let mut tracker = ToastTracker::new();
        let short = tracker.push("short", Severity::Info, 500, 0.0);
        let dismissed = tracker.push("gone", Severity::Info, 500, 0.0);
        let long = tracker.push("long", Severity::Info, 5000, 0.0);
        tracker.dismiss(dismissed.id);

        // Un solo barrido quita también los que vencieron sin que su timer corriera aún
        assert_eq!(tracker.expire(600.0), vec![short.id]);
        assert_eq!(tracker.remaining_ms(long.id, 600.0), Some(4400));
    }
}
