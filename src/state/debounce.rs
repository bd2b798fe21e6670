// ============================================================================
// DEBOUNCE - Un temporizador pendiente por clave
// ============================================================================
// Genérico sobre el temporizador: en el navegador es un gloo Timeout (que se
// cancela al soltarse); en los tests cualquier tipo que cuente sus drops.
// ============================================================================

use std::collections::HashMap;

#[derive(Debug)]
pub struct PendingTimers<T> {
    slots: HashMap<String, T>,
}

impl<T> PendingTimers<T> {
    pub fn new() -> Self {
        Self { slots: HashMap::new() }
    }

    /// Arma `timer` para `key`. El anterior, si lo había, se suelta aquí mismo.
    pub fn arm(&mut self, key: &str, timer: T) -> bool {
        self.slots.insert(key.to_string(), timer).is_some()
    }

    pub fn cancel(&mut self, key: &str) -> bool {
        self.slots.remove(key).is_some()
    }
}

impl<T> Default for PendingTimers<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Cuenta cuántos temporizadores se cancelaron (soltaron)
    struct FakeTimer {
        cancelled: Rc<Cell<u32>>,
    }

    impl Drop for FakeTimer {
        fn drop(&mut self) {
            self.cancelled.set(self.cancelled.get() + 1);
        }
    }

    fn timer(counter: &Rc<Cell<u32>>) -> FakeTimer {
        FakeTimer {
            cancelled: counter.clone(),
        }
    }

    #[test]
    fn test_latest_keystroke_supersedes_pending_timer() {
        let cancelled = Rc::new(Cell::new(0));
        let mut pending = PendingTimers::new();

        assert!(!pending.arm("transactions", timer(&cancelled)));
        assert_eq!(cancelled.get(), 0);

        assert!(pending.arm("transactions", timer(&cancelled)));
        assert!(pending.arm("transactions", timer(&cancelled)));
        // Solo queda vivo el último
        assert_eq!(cancelled.get(), 2);
    }

    #[test]
    fn test_tables_debounce_independently() {
        let cancelled = Rc::new(Cell::new(0));
        let mut pending = PendingTimers::new();
        pending.arm("income", timer(&cancelled));
        pending.arm("expenses", timer(&cancelled));
        assert_eq!(cancelled.get(), 0);

        assert!(pending.cancel("income"));
        assert!(!pending.cancel("income"));
        assert_eq!(cancelled.get(), 1);
    }
}
