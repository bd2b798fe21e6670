// ============================================================================
// TABLE VIEWMODEL - Orden y filtrado de tablas (lógica pura)
// ============================================================================
// Las funciones reciben el TableModel y devuelven órdenes / visibilidad;
// dom::table aplica el resultado. Aplicar dos veces el mismo FilterState
// produce exactamente el mismo conjunto visible.
// ============================================================================

use std::cmp::Ordering;

use chrono::{Datelike, NaiveDate};

use crate::models::{CellData, FilterState, QuickFilter, RowData, SortDirection, SortState, TableModel};

/// Símbolos que se eliminan antes del parseo numérico
const CURRENCY_NOISE: [char; 5] = ['$', ',', '€', '£', '\u{a0}'];

/// Número de una celda ("$1,250.00", "-$20.00", "42") o None si no es numérica
pub fn parse_amount(text: &str) -> Option<f64> {
    let cleaned: String = text.trim().chars().filter(|c| !CURRENCY_NOISE.contains(c)).collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    // "1e5", "inf" y "NaN" no son importes
    if cleaned.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Fecha de una celda en los formatos que renderiza el servidor
pub fn parse_cell_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    // ISO, con o sin hora
    let first_token = text.split_whitespace().next().unwrap_or(text);
    for candidate in [text, first_token] {
        if let Ok(date) = NaiveDate::parse_from_str(candidate, "%Y-%m-%d") {
            return Some(date);
        }
        if let Ok(date) = NaiveDate::parse_from_str(candidate, "%m/%d/%Y") {
            return Some(date);
        }
    }

    // Estilo Django/AP: "Jan. 5, 2024", "Sept. 12, 2024", "March 3, 2024"
    let normalized = text.replace('.', "").replace("Sept ", "Sep ");
    for format in ["%b %d, %Y", "%B %d, %Y", "%d %b %Y", "%d %B %Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(&normalized, format) {
            return Some(date);
        }
    }
    None
}

/// Clave numérica para ordenar: importes y porcentajes ("45%")
pub fn parse_sort_number(text: &str) -> Option<f64> {
    parse_amount(text).or_else(|| parse_amount(text.trim().strip_suffix('%')?))
}

/// Comparación de celdas: numérica si ambas parsean, si no texto
pub fn compare_cells(a: &str, b: &str) -> Ordering {
    match (parse_sort_number(a), parse_sort_number(b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => {
            let by_fold = a.to_lowercase().cmp(&b.to_lowercase());
            if by_fold == Ordering::Equal {
                a.cmp(b)
            } else {
                by_fold
            }
        }
    }
}

/// Orden estable de las filas para una columna. Devuelve posiciones en `rows`.
pub fn sort_order(rows: &[RowData], state: SortState) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rows.len()).collect();
    let text_of = |pos: usize| -> &str {
        rows[pos]
            .cell(state.column)
            .map(|c| c.text.as_str())
            .unwrap_or("")
    };

    // sort_by es estable: las claves iguales conservan su orden actual
    order.sort_by(|&a, &b| {
        let ordering = compare_cells(text_of(a), text_of(b));
        match state.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    order
}

fn cell_is_amount(cell: &CellData) -> Option<f64> {
    if cell.is_checkbox {
        None
    } else {
        parse_amount(&cell.text)
    }
}

/// Ingreso: importe no negativo marcado como text-success
pub fn is_positive_amount(row: &RowData) -> bool {
    row.cells.iter().any(|cell| match cell_is_amount(cell) {
        Some(value) => cell.has_class("text-success") && !cell.text.contains('-') && value >= 0.0,
        None => false,
    })
}

/// Gasto: importe negativo o marcado como text-danger
pub fn is_negative_amount(row: &RowData) -> bool {
    row.cells.iter().any(|cell| match cell_is_amount(cell) {
        Some(value) => value < 0.0 || cell.text.contains('-') || cell.has_class("text-danger"),
        None => false,
    })
}

/// Alguna celda con fecha del mes en curso
pub fn is_recent_date(row: &RowData, today: NaiveDate) -> bool {
    row.data_cells()
        .filter_map(|cell| parse_cell_date(&cell.text))
        .any(|date| date.month() == today.month() && date.year() == today.year())
}

pub fn passes_quick_filter(row: &RowData, filter: QuickFilter, today: NaiveDate) -> bool {
    match filter {
        QuickFilter::All => true,
        QuickFilter::Income => is_positive_amount(row),
        QuickFilter::Expenses => is_negative_amount(row),
        QuickFilter::ThisMonth => is_recent_date(row, today),
    }
}

/// Búsqueda de texto + rango de fechas (fechas no parseables no excluyen)
pub fn passes_advanced_filter(row: &RowData, filter: &FilterState) -> bool {
    let needle = filter.search_text.trim().to_lowercase();
    if !needle.is_empty() && !row.text().to_lowercase().contains(&needle) {
        return false;
    }

    if filter.date_from.is_some() || filter.date_to.is_some() {
        if let Some(date) = row.date_cell().and_then(|c| parse_cell_date(&c.text)) {
            if filter.date_from.map_or(false, |from| date < from) {
                return false;
            }
            if filter.date_to.map_or(false, |to| date > to) {
                return false;
            }
        }
    }
    true
}

pub fn row_visible(row: &RowData, filter: &FilterState, today: NaiveDate) -> bool {
    passes_quick_filter(row, filter.quick_filter, today) && passes_advanced_filter(row, filter)
}

/// Visibilidad por fila (mismo orden que table.rows)
pub fn visibility(table: &TableModel, filter: &FilterState, today: NaiveDate) -> Vec<bool> {
    table
        .rows
        .iter()
        .map(|row| row_visible(row, filter, today))
        .collect()
}

/// Texto del indicador "Showing N of M items"; None si todo es visible
pub fn results_indicator(visible: usize, total: usize) -> Option<String> {
    if visible == total {
        None
    } else {
        Some(format!("Showing {} of {} items", visible, total))
    }
}

/// Qué hacer con el nodo del indicador: nunca se crea un segundo
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndicatorAction<'a> {
    Create(&'a str),
    Update(&'a str),
    Remove,
    Nothing,
}

pub fn indicator_action(existing: bool, text: Option<&str>) -> IndicatorAction<'_> {
    match (existing, text) {
        (true, Some(text)) => IndicatorAction::Update(text),
        (true, None) => IndicatorAction::Remove,
        (false, Some(text)) => IndicatorAction::Create(text),
        (false, None) => IndicatorAction::Nothing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn amount_row(index: usize, amount: &str, class: Option<&str>) -> RowData {
        let mut cell = CellData::new(amount);
        if let Some(class) = class {
            cell = cell.with_class(class);
        }
        RowData::new(index, vec![CellData::new("Coffee"), cell])
    }

    fn scenario_table() -> TableModel {
        TableModel::new(
            "transactions",
            vec![CellData::new("Description"), CellData::new("Amount")],
            vec![
                amount_row(0, "$50.00", Some("text-success")),
                amount_row(1, "-$20.00", Some("text-danger")),
                amount_row(2, "$10.00", None),
                amount_row(3, "-$5.00", None),
                amount_row(4, "$0.00", None),
            ],
        )
    }

    fn visible_indices(table: &TableModel, filter: &FilterState) -> Vec<usize> {
        visibility(table, filter, today())
            .iter()
            .enumerate()
            .filter(|(_, v)| **v)
            .map(|(i, _)| table.rows[i].index)
            .collect()
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("$1,250.50"), Some(1250.5));
        assert_eq!(parse_amount("-$20.00"), Some(-20.0));
        assert_eq!(parse_amount(" 42 "), Some(42.0));
        assert_eq!(parse_amount("Groceries"), None);
        assert_eq!(parse_amount("2024-01-05"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("NaN"), None);
    }

    #[test]
    fn test_parse_cell_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 5);
        assert_eq!(parse_cell_date("2024-01-05"), expected);
        assert_eq!(parse_cell_date("2024-01-05 14:30"), expected);
        assert_eq!(parse_cell_date("01/05/2024"), expected);
        assert_eq!(parse_cell_date("Jan. 5, 2024"), expected);
        assert_eq!(parse_cell_date("January 5, 2024"), expected);
        assert_eq!(parse_cell_date("5 Jan 2024"), expected);
        assert_eq!(
            parse_cell_date("Sept. 12, 2024"),
            NaiveDate::from_ymd_opt(2024, 9, 12)
        );
        assert_eq!(parse_cell_date("pending"), None);
    }

    #[test]
    fn test_quick_filter_expenses_and_income_scenario() {
        let table = scenario_table();

        let mut filter = FilterState::default();
        filter.quick_filter = QuickFilter::Expenses;
        assert_eq!(visible_indices(&table, &filter), vec![1, 3]);

        filter.quick_filter = QuickFilter::Income;
        assert_eq!(visible_indices(&table, &filter), vec![0]);

        filter.quick_filter = QuickFilter::All;
        assert_eq!(visible_indices(&table, &filter), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_dates_are_not_amounts_for_expense_filter() {
        let row = RowData::new(
            0,
            vec![CellData::new("2024-03-02"), CellData::new("$12.00").with_class("text-success")],
        );
        assert!(!is_negative_amount(&row));
        assert!(is_positive_amount(&row));
    }

    #[test]
    fn test_this_month_filter() {
        let table = TableModel::new(
            "t",
            vec![CellData::new("Date")],
            vec![
                RowData::new(0, vec![CellData::new("2024-03-01")]),
                RowData::new(1, vec![CellData::new("2024-02-29")]),
                RowData::new(2, vec![CellData::new("2023-03-10")]),
                RowData::new(3, vec![CellData::new("not a date")]),
            ],
        );
        let filter = FilterState { quick_filter: QuickFilter::ThisMonth, ..Default::default() };
        assert_eq!(visible_indices(&table, &filter), vec![0]);
    }

    #[test]
    fn test_quick_filter_and_search_combine_with_and() {
        let mut table = scenario_table();
        table.rows[3].cells[0] = CellData::new("Rent");

        let filter = FilterState {
            search_text: "COFFEE".to_string(),
            quick_filter: QuickFilter::Expenses,
            ..Default::default()
        };
        assert_eq!(visible_indices(&table, &filter), vec![1]);
    }

    #[test]
    fn test_empty_search_equals_cleared_filters() {
        let table = scenario_table();
        let filter = FilterState { search_text: String::new(), ..Default::default() };
        let visible = visibility(&table, &filter, today());
        assert!(visible.iter().all(|v| *v));

        let shown = visible.iter().filter(|v| **v).count();
        assert_eq!(results_indicator(shown, table.total_rows()), None);
    }

    #[test]
    fn test_filters_are_idempotent() {
        let table = scenario_table();
        let filter = FilterState {
            search_text: "coffee".to_string(),
            quick_filter: QuickFilter::Income,
            ..Default::default()
        };
        let first = visibility(&table, &filter, today());
        let second = visibility(&table, &filter, today());
        assert_eq!(first, second);
        assert_eq!(results_indicator(1, 5), Some("Showing 1 of 5 items".to_string()));
    }

    #[test]
    fn test_date_range_is_inclusive_and_fails_open() {
        let table = TableModel::new(
            "t",
            vec![CellData::checkbox(), CellData::new("Date")],
            vec![
                RowData::new(0, vec![CellData::checkbox(), CellData::new("2024-01-01")]),
                RowData::new(1, vec![CellData::checkbox(), CellData::new("2024-01-31")]),
                RowData::new(2, vec![CellData::checkbox(), CellData::new("2024-02-01")]),
                RowData::new(3, vec![CellData::checkbox(), CellData::new("n/a")]),
            ],
        );
        let filter = FilterState {
            date_from: NaiveDate::from_ymd_opt(2024, 1, 1),
            date_to: NaiveDate::from_ymd_opt(2024, 1, 31),
            ..Default::default()
        };
        assert_eq!(visible_indices(&table, &filter), vec![0, 1, 3]);
    }

    #[test]
    fn test_numeric_sort_with_currency() {
        let rows: Vec<RowData> = ["$1,000.00", "-$5.00", "$20.00"]
            .iter()
            .enumerate()
            .map(|(i, t)| RowData::new(i, vec![CellData::new(t)]))
            .collect();
        let order = sort_order(&rows, SortState { column: 0, direction: SortDirection::Ascending });
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn test_percent_cells_sort_numerically() {
        let rows: Vec<RowData> = ["100%", "9%", "45 %", "0%"]
            .iter()
            .enumerate()
            .map(|(i, t)| RowData::new(i, vec![CellData::new(t)]))
            .collect();
        let order = sort_order(&rows, SortState { column: 0, direction: SortDirection::Ascending });
        assert_eq!(order, vec![3, 1, 2, 0]);

        assert_eq!(parse_sort_number("45%"), Some(45.0));
        assert_eq!(parse_sort_number("-12.5%"), Some(-12.5));
        // Un porcentaje no cuenta como importe para los filtros rápidos
        assert_eq!(parse_amount("45%"), None);
        assert_eq!(parse_sort_number("%"), None);
        assert_eq!(parse_sort_number("2024-03-01"), None);
    }

    #[test]
    fn test_text_sort_falls_back_to_string_comparison() {
        let rows: Vec<RowData> = ["banana", "Apple", "$3.00", "cherry"]
            .iter()
            .enumerate()
            .map(|(i, t)| RowData::new(i, vec![CellData::new(t)]))
            .collect();
        let order = sort_order(&rows, SortState { column: 0, direction: SortDirection::Ascending });
        assert_eq!(order, vec![2, 1, 0, 3]);
    }

    #[test]
    fn test_descending_reverses_keys_and_is_stable() {
        let rows: Vec<RowData> = [("b", "x1"), ("a", "y1"), ("b", "x2"), ("a", "y2"), ("c", "z")]
            .iter()
            .enumerate()
            .map(|(i, (k, tag))| RowData::new(i, vec![CellData::new(k), CellData::new(tag)]))
            .collect();

        let asc = sort_order(&rows, SortState { column: 0, direction: SortDirection::Ascending });
        let asc_keys: Vec<&str> = asc.iter().map(|&p| rows[p].cells[0].text.as_str()).collect();
        assert_eq!(asc_keys, vec!["a", "a", "b", "b", "c"]);
        // Estable: y1 antes que y2, x1 antes que x2
        assert_eq!(asc, vec![1, 3, 0, 2, 4]);

        // Segundo click sobre las filas ya ordenadas
        let sorted: Vec<RowData> = asc.iter().map(|&p| rows[p].clone()).collect();
        let state = SortState::next(Some(SortState { column: 0, direction: SortDirection::Ascending }), 0);
        let desc = sort_order(&sorted, state);
        let mut desc_keys: Vec<&str> = desc.iter().map(|&p| sorted[p].cells[0].text.as_str()).collect();
        desc_keys.reverse();
        assert_eq!(desc_keys, asc_keys);

        let desc_tags: Vec<&str> = desc.iter().map(|&p| sorted[p].cells[1].text.as_str()).collect();
        assert_eq!(desc_tags, vec!["z", "x1", "x2", "y1", "y2"]);
    }

    #[test]
    fn test_indicator_updated_in_place_across_filter_changes() {
        let mut present = false;
        let mut created = 0;
        for (shown, total) in [(3, 10), (5, 10), (10, 10), (2, 10)] {
            let text = results_indicator(shown, total);
            match indicator_action(present, text.as_deref()) {
                IndicatorAction::Create(_) => {
                    created += 1;
                    present = true;
                }
                IndicatorAction::Remove => present = false,
                IndicatorAction::Update(text) => assert_eq!(text, "Showing 5 of 10 items"),
                IndicatorAction::Nothing => {}
            }
        }
        // Creado al filtrar, actualizado, quitado al mostrar todo, recreado
        assert_eq!(created, 2);
        assert!(present);
        assert_eq!(indicator_action(false, None), IndicatorAction::Nothing);
    }
}
