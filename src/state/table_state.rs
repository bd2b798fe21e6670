// ============================================================================
// TABLE STATE - Registro de tablas mejoradas (filtros + orden por tabla)
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::models::{FilterState, QuickFilter, SortState};
use crate::utils::constants::GENERATED_TABLE_PREFIX;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableEntry {
    pub filter: FilterState,
    pub sort: Option<SortState>,
    /// Dentro de una .card: tiene controles de filtro/export
    pub has_controls: bool,
}

#[derive(Clone, Default)]
pub struct TableState {
    tables: Rc<RefCell<HashMap<String, TableEntry>>>,
    /// Orden de registro (la "primera tabla" de los atajos)
    order: Rc<RefCell<Vec<String>>>,
    next_generated: Rc<RefCell<usize>>,
}

impl TableState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id para tablas sin atributo id (finwise-table-N)
    pub fn generate_id(&self) -> String {
        let mut next = self.next_generated.borrow_mut();
        *next += 1;
        format!("{}{}", GENERATED_TABLE_PREFIX, *next)
    }

    /// false si ya estaba registrada (registro idempotente)
    pub fn register(&self, id: &str, has_controls: bool) -> bool {
        let mut tables = self.tables.borrow_mut();
        if tables.contains_key(id) {
            return false;
        }
        tables.insert(
            id.to_string(),
            TableEntry {
                has_controls,
                ..Default::default()
            },
        );
        self.order.borrow_mut().push(id.to_string());
        true
    }

    pub fn ids(&self) -> Vec<String> {
        self.order.borrow().clone()
    }

    pub fn first_table(&self) -> Option<String> {
        self.order.borrow().first().cloned()
    }

    /// Primera tabla con controles de filtro (destino de Alt+1..4)
    pub fn first_with_controls(&self) -> Option<String> {
        let tables = self.tables.borrow();
        self.order
            .borrow()
            .iter()
            .find(|id| tables.get(*id).map_or(false, |e| e.has_controls))
            .cloned()
    }

    pub fn filter(&self, id: &str) -> FilterState {
        self.tables
            .borrow()
            .get(id)
            .map(|e| e.filter.clone())
            .unwrap_or_default()
    }

    pub fn update_filter<F>(&self, id: &str, updater: F) -> Option<FilterState>
    where
        F: FnOnce(&mut FilterState),
    {
        let mut tables = self.tables.borrow_mut();
        let entry = tables.get_mut(id)?;
        updater(&mut entry.filter);
        Some(entry.filter.clone())
    }

    pub fn set_quick_filter(&self, id: &str, filter: QuickFilter) -> Option<FilterState> {
        self.update_filter(id, |state| state.quick_filter = filter)
    }

    pub fn sort(&self, id: &str) -> Option<SortState> {
        self.tables.borrow().get(id).and_then(|e| e.sort)
    }

    /// Click en cabecera: calcula y guarda el siguiente SortState
    pub fn next_sort(&self, id: &str, column: usize) -> Option<SortState> {
        let mut tables = self.tables.borrow_mut();
        let entry = tables.get_mut(id)?;
        let next = SortState::next(entry.sort, column);
        entry.sort = Some(next);
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SortDirection;

    #[test]
    fn test_register_is_idempotent() {
        let state = TableState::new();
        assert!(state.register("tx", true));
        assert!(!state.register("tx", false));
        assert_eq!(state.ids(), vec!["tx".to_string()]);
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let state = TableState::new();
        assert_eq!(state.generate_id(), "finwise-table-1");
        assert_eq!(state.generate_id(), "finwise-table-2");
    }

    #[test]
    fn test_first_with_controls() {
        let state = TableState::new();
        state.register("plain", false);
        state.register("card", true);
        assert_eq!(state.first_table().as_deref(), Some("plain"));
        assert_eq!(state.first_with_controls().as_deref(), Some("card"));
    }

    #[test]
    fn test_sort_and_filter_are_per_table() {
        let state = TableState::new();
        state.register("a", true);
        state.register("b", true);

        state.next_sort("a", 2);
        let second = state.next_sort("a", 2).unwrap();
        assert_eq!(second.direction, SortDirection::Descending);
        assert_eq!(state.sort("b"), None);

        state.set_quick_filter("b", QuickFilter::Income);
        assert_eq!(state.filter("b").quick_filter, QuickFilter::Income);
        assert_eq!(state.filter("a").quick_filter, QuickFilter::All);
        assert_eq!(state.set_quick_filter("missing", QuickFilter::Income), None);
    }
}
