// ============================================================================
// TABLE DOM - Lectura de <table> a TableModel y aplicación de resultados
// ============================================================================

use std::collections::HashMap;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement};

use crate::dom::{as_html, query_all_in, text_of};
use crate::models::{CellData, RowData, SortDirection, SortState, TableModel};
use crate::state::MasterCheckboxState;
use crate::utils::constants::{MASTER_CHECKBOX_CLASS, ROW_CHECKBOX_CLASS, ROW_INDEX_ATTR, SELECTED_ROW_CLASS};

pub fn header_cells(table: &Element) -> Result<Vec<Element>, JsValue> {
    let in_thead = query_all_in(table, "thead th")?;
    if !in_thead.is_empty() {
        return Ok(in_thead);
    }
    query_all_in(table, "tr:first-child th")
}

pub fn body_rows(table: &Element) -> Result<Vec<Element>, JsValue> {
    query_all_in(table, "tbody tr")
}

/// Índice original de una fila (asignado al registrar la tabla)
pub fn row_index(row: &Element) -> Option<usize> {
    row.get_attribute(ROW_INDEX_ATTR)?.parse().ok()
}

fn cell_data(cell: &Element, checkbox_class: &str) -> Result<CellData, JsValue> {
    if cell.query_selector(&format!(".{}", checkbox_class))?.is_some() {
        return Ok(CellData::checkbox());
    }
    let mut data = CellData::new(&text_of(cell));
    let classes = cell.class_list();
    for i in 0..classes.length() {
        if let Some(class) = classes.item(i) {
            data = data.with_class(&class);
        }
    }
    // Importes marcados en un <span class="text-success"> dentro de la celda
    for marker in ["text-success", "text-danger"] {
        if !data.has_class(marker) && cell.query_selector(&format!(".{}", marker))?.is_some() {
            data = data.with_class(marker);
        }
    }
    Ok(data)
}

/// Snapshot del DOM actual de la tabla
pub fn read_model(table: &Element, id: &str) -> Result<TableModel, JsValue> {
    let headers = header_cells(table)?
        .iter()
        .map(|th| cell_data(th, MASTER_CHECKBOX_CLASS))
        .collect::<Result<Vec<_>, _>>()?;

    let mut rows = Vec::new();
    for (position, row) in body_rows(table)?.iter().enumerate() {
        let cells = query_all_in(row, "td")?
            .iter()
            .map(|td| cell_data(td, ROW_CHECKBOX_CLASS))
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(RowData::new(row_index(row).unwrap_or(position), cells));
    }
    Ok(TableModel::new(id, headers, rows))
}

fn rows_by_index(table: &Element) -> Result<HashMap<usize, Element>, JsValue> {
    Ok(body_rows(table)?
        .into_iter()
        .enumerate()
        .map(|(position, row)| (row_index(&row).unwrap_or(position), row))
        .collect())
}

/// Mostrar/ocultar filas; `visible` sigue el orden de model.rows
pub fn apply_visibility(table: &Element, model: &TableModel, visible: &[bool]) -> Result<(), JsValue> {
    let rows = rows_by_index(table)?;
    for (row, show) in model.rows.iter().zip(visible) {
        if let Some(html) = rows.get(&row.index).and_then(as_html) {
            if *show {
                html.style().remove_property("display")?;
            } else {
                html.style().set_property("display", "none")?;
            }
        }
    }
    Ok(())
}

/// Reordenar el tbody; `order` son posiciones en model.rows
pub fn apply_order(table: &Element, model: &TableModel, order: &[usize]) -> Result<(), JsValue> {
    let tbody = match table.query_selector("tbody")? {
        Some(tbody) => tbody,
        None => return Ok(()),
    };
    let rows = rows_by_index(table)?;
    for position in order {
        if let Some(element) = model.rows.get(*position).and_then(|r| rows.get(&r.index)) {
            tbody.append_child(element)?;
        }
    }
    Ok(())
}

/// Indicador de orden en la cabecera activa; limpia el resto
pub fn mark_sorted_header(table: &Element, sort: SortState) -> Result<(), JsValue> {
    for (column, th) in header_cells(table)?.iter().enumerate() {
        th.class_list().remove_2("sort-asc", "sort-desc")?;
        if column == sort.column {
            th.class_list().add_1(&format!("sort-{}", sort.direction.as_attr()))?;
            let aria = match sort.direction {
                SortDirection::Ascending => "ascending",
                SortDirection::Descending => "descending",
            };
            th.set_attribute("aria-sort", aria)?;
        } else {
            th.remove_attribute("aria-sort")?;
        }
    }
    Ok(())
}

fn as_checkbox(element: &Element) -> Option<HtmlInputElement> {
    element.dyn_ref::<HtmlInputElement>().cloned()
}

pub fn set_master_checkbox(table: &Element, state: MasterCheckboxState) -> Result<(), JsValue> {
    let selector = format!(".{}", MASTER_CHECKBOX_CLASS);
    if let Some(master) = table.query_selector(&selector)?.as_ref().and_then(as_checkbox) {
        master.set_indeterminate(state == MasterCheckboxState::Indeterminate);
        master.set_checked(state == MasterCheckboxState::Checked);
    }
    Ok(())
}

/// Sincroniza checkboxes y clase de fila con la selección actual
pub fn sync_row_checkboxes<F>(table: &Element, is_selected: F) -> Result<(), JsValue>
where
    F: Fn(usize) -> bool,
{
    for (position, row) in body_rows(table)?.iter().enumerate() {
        let index = row_index(row).unwrap_or(position);
        let selected = is_selected(index);
        let selector = format!(".{}", ROW_CHECKBOX_CLASS);
        if let Some(checkbox) = row.query_selector(&selector)?.as_ref().and_then(as_checkbox) {
            checkbox.set_checked(selected);
        }
        if selected {
            row.class_list().add_1(SELECTED_ROW_CLASS)?;
        } else {
            row.class_list().remove_1(SELECTED_ROW_CLASS)?;
        }
    }
    Ok(())
}
