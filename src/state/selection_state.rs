// ============================================================================
// SELECTION STATE - Filas seleccionadas por tabla + barra de acciones
// ============================================================================

use std::collections::{BTreeSet, HashMap};

use crate::state::ReactiveState;

/// Estado del checkbox maestro de una tabla
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MasterCheckboxState {
    Unchecked,
    Checked,
    Indeterminate,
}

impl MasterCheckboxState {
    pub fn from_counts(selected: usize, total: usize) -> Self {
        if selected == 0 {
            MasterCheckboxState::Unchecked
        } else if selected >= total {
            MasterCheckboxState::Checked
        } else {
            MasterCheckboxState::Indeterminate
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct TableSelection {
    total: usize,
    rows: BTreeSet<usize>,
}

/// table id -> índices de fila seleccionados (índice original del tbody)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionSet {
    tables: HashMap<String, TableSelection>,
}

impl SelectionSet {
    /// Declara cuántas filas tiene la tabla (se llama al registrarla)
    pub fn set_total(&mut self, table: &str, total: usize) {
        let entry = self.tables.entry(table.to_string()).or_default();
        entry.total = total;
        entry.rows.retain(|row| *row < total);
    }

    /// Idempotente: marcar dos veces la misma fila no cambia nada
    pub fn toggle_row(&mut self, table: &str, row: usize, checked: bool) -> MasterCheckboxState {
        let entry = self.tables.entry(table.to_string()).or_default();
        if checked {
            entry.rows.insert(row);
            entry.total = entry.total.max(row + 1);
        } else {
            entry.rows.remove(&row);
        }
        self.master_state(table)
    }

    /// Sobre todas las filas, incluidas las ocultas por filtros
    pub fn toggle_all(&mut self, table: &str, checked: bool) -> MasterCheckboxState {
        let entry = self.tables.entry(table.to_string()).or_default();
        if checked {
            entry.rows = (0..entry.total).collect();
        } else {
            entry.rows.clear();
        }
        self.master_state(table)
    }

    pub fn clear(&mut self) {
        for entry in self.tables.values_mut() {
            entry.rows.clear();
        }
    }

    pub fn clear_table(&mut self, table: &str) {
        if let Some(entry) = self.tables.get_mut(table) {
            entry.rows.clear();
        }
    }

    pub fn is_selected(&self, table: &str, row: usize) -> bool {
        self.tables
            .get(table)
            .map_or(false, |entry| entry.rows.contains(&row))
    }

    pub fn count(&self, table: &str) -> usize {
        self.tables.get(table).map_or(0, |entry| entry.rows.len())
    }

    pub fn total_count(&self) -> usize {
        self.tables.values().map(|entry| entry.rows.len()).sum()
    }

    pub fn master_state(&self, table: &str) -> MasterCheckboxState {
        match self.tables.get(table) {
            Some(entry) => MasterCheckboxState::from_counts(entry.rows.len(), entry.total),
            None => MasterCheckboxState::Unchecked,
        }
    }

    /// Filas seleccionadas en orden ascendente
    pub fn selected_rows(&self, table: &str) -> Vec<usize> {
        self.tables
            .get(table)
            .map(|entry| entry.rows.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Tablas con al menos una fila seleccionada
    pub fn tables_with_selection(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .tables
            .iter()
            .filter(|(_, entry)| !entry.rows.is_empty())
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort();
        ids
    }

    pub fn bulk_bar_visible(&self) -> bool {
        self.total_count() > 0
    }

    pub fn label(&self) -> String {
        selection_label(self.total_count())
    }
}

pub fn selection_label(count: usize) -> String {
    if count == 1 {
        "1 item selected".to_string()
    } else {
        format!("{} items selected", count)
    }
}

/// SelectionSet compartido: cada mutación notifica a la barra de acciones
#[derive(Clone)]
pub struct SelectionState {
    state: ReactiveState<SelectionSet>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self {
            state: ReactiveState::new(SelectionSet::default()),
        }
    }

    pub fn register_table(&self, table: &str, total: usize) {
        self.state.update(|set| set.set_total(table, total));
    }

    pub fn toggle_row(&self, table: &str, row: usize, checked: bool) -> MasterCheckboxState {
        self.state.update(|set| set.toggle_row(table, row, checked))
    }

    pub fn toggle_all(&self, table: &str, checked: bool) -> MasterCheckboxState {
        self.state.update(|set| set.toggle_all(table, checked))
    }

    pub fn clear(&self) {
        self.state.update(|set| set.clear());
    }

    pub fn clear_table(&self, table: &str) {
        self.state.update(|set| set.clear_table(table));
    }

    pub fn count(&self, table: &str) -> usize {
        self.state.with(|set| set.count(table))
    }

    pub fn total_count(&self) -> usize {
        self.state.with(|set| set.total_count())
    }

    pub fn master_state(&self, table: &str) -> MasterCheckboxState {
        self.state.with(|set| set.master_state(table))
    }

    pub fn is_selected(&self, table: &str, row: usize) -> bool {
        self.state.with(|set| set.is_selected(table, row))
    }

    pub fn selected_rows(&self, table: &str) -> Vec<usize> {
        self.state.with(|set| set.selected_rows(table))
    }

    pub fn snapshot(&self) -> SelectionSet {
        self.state.get()
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&SelectionSet) + 'static,
    {
        self.state.subscribe(callback);
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_master_state_follows_counts() {
        let mut set = SelectionSet::default();
        set.set_total("tx", 3);

        assert_eq!(set.toggle_row("tx", 0, true), MasterCheckboxState::Indeterminate);
        assert_eq!(set.toggle_row("tx", 1, true), MasterCheckboxState::Indeterminate);
        assert_eq!(set.toggle_row("tx", 2, true), MasterCheckboxState::Checked);
        assert_eq!(set.toggle_row("tx", 0, false), MasterCheckboxState::Indeterminate);
        set.clear_table("tx");
        assert_eq!(set.master_state("tx"), MasterCheckboxState::Unchecked);
    }

    #[test]
    fn test_toggle_row_is_idempotent() {
        let mut set = SelectionSet::default();
        set.set_total("tx", 5);
        set.toggle_row("tx", 2, true);
        let once = set.clone();
        set.toggle_row("tx", 2, true);
        assert_eq!(set, once);
        assert_eq!(set.count("tx"), 1);

        set.toggle_row("tx", 4, false);
        assert_eq!(set.count("tx"), 1);
    }

    #[test]
    fn test_toggle_all_covers_every_row() {
        let mut set = SelectionSet::default();
        set.set_total("tx", 4);
        assert_eq!(set.toggle_all("tx", true), MasterCheckboxState::Checked);
        assert_eq!(set.selected_rows("tx"), vec![0, 1, 2, 3]);
        assert_eq!(set.toggle_all("tx", false), MasterCheckboxState::Unchecked);
        assert_eq!(set.count("tx"), 0);
    }

    #[test]
    fn test_bulk_bar_and_label_across_tables() {
        let mut set = SelectionSet::default();
        set.set_total("a", 2);
        set.set_total("b", 2);
        assert!(!set.bulk_bar_visible());

        set.toggle_row("a", 0, true);
        assert!(set.bulk_bar_visible());
        assert_eq!(set.label(), "1 item selected");

        set.toggle_row("b", 1, true);
        assert_eq!(set.total_count(), 2);
        assert_eq!(set.label(), "2 items selected");
        assert_eq!(set.tables_with_selection(), vec!["a".to_string(), "b".to_string()]);

        set.clear();
        assert!(!set.bulk_bar_visible());
        assert_eq!(selection_label(0), "0 items selected");
    }

    #[test]
    fn test_shrinking_table_drops_stale_rows() {
        let mut set = SelectionSet::default();
        set.set_total("tx", 5);
        set.toggle_row("tx", 4, true);
        set.toggle_row("tx", 1, true);
        set.set_total("tx", 3);
        assert_eq!(set.selected_rows("tx"), vec![1]);
    }

    #[test]
    fn test_selection_state_notifies_synchronously() {
        let state = SelectionState::new();
        state.register_table("tx", 3);

        let labels = Rc::new(RefCell::new(Vec::new()));
        let labels_clone = labels.clone();
        state.subscribe(move |set| {
            labels_clone.borrow_mut().push((set.bulk_bar_visible(), set.label()));
        });

        state.toggle_row("tx", 1, true);
        state.toggle_row("tx", 2, true);
        state.clear();

        assert_eq!(
            *labels.borrow(),
            vec![
                (true, "1 item selected".to_string()),
                (true, "2 items selected".to_string()),
                (false, "0 items selected".to_string()),
            ]
        );
    }
}
