// ============================================================================
// EXPORT VIEWMODEL - CSV / JSON a partir del TableModel
// ============================================================================

use serde_json::{Map, Value};

use crate::error::UiResult;
use crate::models::{ExportFormat, RowData, TableModel};
use crate::utils::constants::{EXPORT_CSV_FILENAME, EXPORT_JSON_FILENAME};

/// Campo CSV: siempre entre comillas, comillas internas duplicadas
fn csv_field(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

fn csv_line<'a>(fields: impl Iterator<Item = &'a str>) -> String {
    fields.map(csv_field).collect::<Vec<_>>().join(",")
}

/// Cabecera + una línea por fila, sin columnas de checkbox
pub fn to_csv<'a>(table: &TableModel, rows: impl IntoIterator<Item = &'a RowData>) -> String {
    let mut lines = vec![csv_line(table.data_headers().into_iter())];
    for row in rows {
        lines.push(csv_line(row.data_cells().map(|c| c.text.as_str())));
    }
    lines.join("\n")
}

/// Array de objetos {cabecera: texto}, indentado
pub fn to_json<'a>(table: &TableModel, rows: impl IntoIterator<Item = &'a RowData>) -> UiResult<String> {
    let headers = table.data_headers();
    let objects: Vec<Value> = rows
        .into_iter()
        .map(|row| {
            let mut object = Map::new();
            for (header, cell) in headers.iter().zip(row.data_cells()) {
                object.insert(header.to_string(), Value::String(cell.text.clone()));
            }
            Value::Object(object)
        })
        .collect();
    Ok(serde_json::to_string_pretty(&objects)?)
}

/// Contenido, mime y nombre de fichero para un formato
pub fn export_payload<'a>(
    table: &TableModel,
    rows: impl IntoIterator<Item = &'a RowData>,
    format: ExportFormat,
) -> UiResult<(String, &'static str, &'static str)> {
    match format {
        ExportFormat::Csv => Ok((to_csv(table, rows), "text/csv", EXPORT_CSV_FILENAME)),
        ExportFormat::Json => Ok((to_json(table, rows)?, "application/json", EXPORT_JSON_FILENAME)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CellData;

    fn table() -> TableModel {
        TableModel::new(
            "tx",
            vec![CellData::checkbox(), CellData::new("Description"), CellData::new("Amount")],
            vec![
                RowData::new(
                    0,
                    vec![CellData::checkbox(), CellData::new("Lunch \"deluxe\""), CellData::new("-$12.00")],
                ),
                RowData::new(1, vec![CellData::checkbox(), CellData::new("Salary, March"), CellData::new("$3,000.00")]),
            ],
        )
    }

    #[test]
    fn test_csv_quotes_every_field_and_skips_checkbox() {
        let table = table();
        let csv = to_csv(&table, &table.rows);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "\"Description\",\"Amount\"");
        assert_eq!(lines[1], "\"Lunch \"\"deluxe\"\"\",\"-$12.00\"");
        assert_eq!(lines[2], "\"Salary, March\",\"$3,000.00\"");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_json_objects_keyed_by_header() {
        let table = table();
        let json = to_json(&table, table.rows.iter().take(1)).unwrap();
        let parsed: Vec<Map<String, Value>> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0]["Description"], "Lunch \"deluxe\"");
        assert_eq!(parsed[0]["Amount"], "-$12.00");
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_empty_selection_exports_header_only() {
        let table = table();
        assert_eq!(to_csv(&table, std::iter::empty()), "\"Description\",\"Amount\"");
        assert_eq!(to_json(&table, std::iter::empty()).unwrap(), "[]");
    }

    #[test]
    fn test_export_payload_names() {
        let table = table();
        let (_, mime, name) = export_payload(&table, &table.rows, ExportFormat::Json).unwrap();
        assert_eq!((mime, name), ("application/json", "export.json"));
        let (_, mime, name) = export_payload(&table, &table.rows, ExportFormat::Csv).unwrap();
        assert_eq!((mime, name), ("text/csv", "export.csv"));
    }
}
