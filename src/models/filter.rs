// ============================================================================
// FILTER STATE - Estado de filtros y orden por tabla (no persistido)
// ============================================================================

use chrono::NaiveDate;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum QuickFilter {
    #[default]
    All,
    Income,
    Expenses,
    ThisMonth,
}

impl QuickFilter {
    /// Orden de los botones (Alt+1..4)
    pub const ALL: [QuickFilter; 4] = [
        QuickFilter::All,
        QuickFilter::Income,
        QuickFilter::Expenses,
        QuickFilter::ThisMonth,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Valor del atributo data-filter
    pub fn key(&self) -> &'static str {
        match self {
            QuickFilter::All => "all",
            QuickFilter::Income => "positive",
            QuickFilter::Expenses => "negative",
            QuickFilter::ThisMonth => "recent",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.key() == key)
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuickFilter::All => "All",
            QuickFilter::Income => "Income",
            QuickFilter::Expenses => "Expenses",
            QuickFilter::ThisMonth => "This Month",
        }
    }

    /// Clase bootstrap del botón
    pub fn button_class(&self) -> &'static str {
        match self {
            QuickFilter::All => "btn btn-sm btn-outline-secondary filter-btn",
            QuickFilter::Income => "btn btn-sm btn-outline-success filter-btn",
            QuickFilter::Expenses => "btn btn-sm btn-outline-danger filter-btn",
            QuickFilter::ThisMonth => "btn btn-sm btn-outline-info filter-btn",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct FilterState {
    pub search_text: String,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub quick_filter: QuickFilter,
}

impl FilterState {
    /// Sin ningún filtro activo (todas las filas visibles)
    pub fn is_empty(&self) -> bool {
        self.search_text.trim().is_empty()
            && self.date_from.is_none()
            && self.date_to.is_none()
            && self.quick_filter == QuickFilter::All
    }

    /// Limpia los filtros avanzados; el filtro rápido se conserva
    pub fn clear_advanced(&mut self) {
        self.search_text.clear();
        self.date_from = None;
        self.date_to = None;
    }

    /// Valor de un <input type="date"> ("" => sin límite)
    pub fn parse_date_input(raw: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_attr(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortState {
    pub column: usize,
    pub direction: SortDirection,
}

impl SortState {
    /// Click en una cabecera: misma columna alterna, otra columna empieza en asc
    pub fn next(current: Option<SortState>, column: usize) -> SortState {
        match current {
            Some(state) if state.column == column => SortState {
                column,
                direction: match state.direction {
                    SortDirection::Ascending => SortDirection::Descending,
                    SortDirection::Descending => SortDirection::Ascending,
                },
            },
            _ => SortState {
                column,
                direction: SortDirection::Ascending,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quick_filter_keys_round_trip() {
        for filter in QuickFilter::ALL {
            assert_eq!(QuickFilter::from_key(filter.key()), Some(filter));
        }
        assert_eq!(QuickFilter::from_key("bogus"), None);
        assert_eq!(QuickFilter::from_index(2), Some(QuickFilter::Expenses));
        assert_eq!(QuickFilter::from_index(4), None);
    }

    #[test]
    fn test_sort_state_toggles_and_resets() {
        let first = SortState::next(None, 1);
        assert_eq!(first.direction, SortDirection::Ascending);

        let second = SortState::next(Some(first), 1);
        assert_eq!(second.direction, SortDirection::Descending);

        let third = SortState::next(Some(second), 1);
        assert_eq!(third.direction, SortDirection::Ascending);

        let other = SortState::next(Some(second), 3);
        assert_eq!(other, SortState { column: 3, direction: SortDirection::Ascending });
    }

    #[test]
    fn test_filter_state_emptiness() {
        let mut state = FilterState::default();
        assert!(state.is_empty());

        state.search_text = "   ".to_string();
        assert!(state.is_empty());

        state.date_from = FilterState::parse_date_input("2024-02-01");
        assert!(!state.is_empty());

        state.clear_advanced();
        assert!(state.is_empty());
        assert_eq!(FilterState::parse_date_input(""), None);
    }
}
