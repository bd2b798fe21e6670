// ============================================================================
// REACTIVITY - Sistema de notificaciones/subscribers para reactividad
// ============================================================================
// Los subscribers reciben una copia del valor ya actualizado. La lista se
// clona antes de notificar: un subscriber puede suscribir a otros o leer el
// estado sin provocar un doble borrow.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

type Callback<T> = Rc<dyn Fn(&T)>;

/// Estado reactivo con sistema de notificaciones
pub struct ReactiveState<T> {
    value: Rc<RefCell<T>>,
    subscribers: Rc<RefCell<Vec<Callback<T>>>>,
}

impl<T: Clone + 'static> ReactiveState<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Copia del valor actual
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// Leer sin clonar
    pub fn with<R>(&self, reader: impl FnOnce(&T) -> R) -> R {
        reader(&self.value.borrow())
    }

    /// Establecer nuevo valor y notificar subscribers
    pub fn set(&self, new_value: T) {
        *self.value.borrow_mut() = new_value;
        self.notify();
    }

    /// Actualizar valor usando closure y notificar
    pub fn update<R>(&self, updater: impl FnOnce(&mut T) -> R) -> R {
        let result = updater(&mut self.value.borrow_mut());
        self.notify();
        result
    }

    /// Suscribirse a cambios
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&T) + 'static,
    {
        self.subscribers.borrow_mut().push(Rc::new(callback));
    }

    fn notify(&self) {
        let snapshot = self.get();
        let callbacks: Vec<Callback<T>> = self.subscribers.borrow().clone();
        for callback in callbacks {
            callback(&snapshot);
        }
    }
}

/// Los clones comparten valor y subscribers
impl<T> Clone for ReactiveState<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            subscribers: self.subscribers.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_subscribers_receive_new_value() {
        let state = ReactiveState::new(1u32);
        let seen = Rc::new(Cell::new(0u32));
        let seen_clone = seen.clone();
        state.subscribe(move |v| seen_clone.set(*v));

        state.set(7);
        assert_eq!(seen.get(), 7);

        state.update(|v| *v += 1);
        assert_eq!(seen.get(), 8);
        assert_eq!(state.get(), 8);
    }

    #[test]
    fn test_clone_shares_subscribers() {
        let state = ReactiveState::new(String::new());
        let calls = Rc::new(Cell::new(0));
        let calls_clone = calls.clone();
        state.subscribe(move |_| calls_clone.set(calls_clone.get() + 1));

        let other = state.clone();
        other.set("dark".to_string());
        assert_eq!(calls.get(), 1);
        assert_eq!(state.get(), "dark");
    }

    #[test]
    fn test_subscriber_can_read_state() {
        let state = ReactiveState::new(3i32);
        let reader = state.clone();
        let observed = Rc::new(Cell::new(0));
        let observed_clone = observed.clone();
        state.subscribe(move |_| observed_clone.set(reader.get() * 2));
        state.set(5);
        assert_eq!(observed.get(), 10);
    }
}
