// ============================================================================
// TABLE MODEL - Instantánea de una tabla renderizada
// ============================================================================
// El DOM se lee una vez (dom::table) y toda la lógica de orden, filtro
// y exportación trabaja sobre este modelo.
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct CellData {
    pub text: String,
    pub classes: Vec<String>,
    /// Celda de checkbox de selección (excluida de export/filtros de fecha)
    pub is_checkbox: bool,
}

impl CellData {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.trim().to_string(),
            classes: Vec::new(),
            is_checkbox: false,
        }
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn checkbox() -> Self {
        Self {
            text: String::new(),
            classes: Vec::new(),
            is_checkbox: true,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct RowData {
    /// Índice original en el tbody (identificador de selección)
    pub index: usize,
    pub cells: Vec<CellData>,
}

impl RowData {
    pub fn new(index: usize, cells: Vec<CellData>) -> Self {
        Self { index, cells }
    }

    /// Texto concatenado de la fila (row.textContent, con separador entre celdas)
    pub fn text(&self) -> String {
        self.data_cells()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Celdas de datos (sin checkbox)
    pub fn data_cells(&self) -> impl Iterator<Item = &CellData> {
        self.cells.iter().filter(|c| !c.is_checkbox)
    }

    /// Columna de fecha por convención: primera celda de datos
    pub fn date_cell(&self) -> Option<&CellData> {
        self.data_cells().next()
    }

    pub fn cell(&self, column: usize) -> Option<&CellData> {
        self.cells.get(column)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct TableModel {
    pub id: String,
    pub headers: Vec<CellData>,
    pub rows: Vec<RowData>,
}

impl TableModel {
    pub fn new(id: &str, headers: Vec<CellData>, rows: Vec<RowData>) -> Self {
        Self {
            id: id.to_string(),
            headers,
            rows,
        }
    }

    pub fn total_rows(&self) -> usize {
        self.rows.len()
    }

    /// Texto de las cabeceras sin la columna de checkbox
    pub fn data_headers(&self) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|h| !h.is_checkbox)
            .map(|h| h.text.as_str())
            .collect()
    }

    /// Una columna es ordenable salvo checkbox o acciones
    pub fn is_sortable(&self, column: usize) -> bool {
        match self.headers.get(column) {
            Some(header) if !header.is_checkbox => {
                let text = header.text.to_lowercase();
                !(text.contains("action") || text.contains("edit") || text.contains("delete"))
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_headers_skip_checkbox() {
        let table = TableModel::new(
            "tx",
            vec![CellData::checkbox(), CellData::new("Date"), CellData::new("Amount")],
            vec![],
        );
        assert_eq!(table.data_headers(), vec!["Date", "Amount"]);
    }

    #[test]
    fn test_sortable_columns() {
        let table = TableModel::new(
            "tx",
            vec![
                CellData::checkbox(),
                CellData::new("Date"),
                CellData::new("Actions"),
                CellData::new("Edit"),
            ],
            vec![],
        );
        assert!(!table.is_sortable(0));
        assert!(table.is_sortable(1));
        assert!(!table.is_sortable(2));
        assert!(!table.is_sortable(3));
        assert!(!table.is_sortable(9));
    }

    #[test]
    fn test_date_cell_skips_checkbox() {
        let row = RowData::new(0, vec![CellData::checkbox(), CellData::new(" 2024-01-05 ")]);
        assert_eq!(row.date_cell().map(|c| c.text.as_str()), Some("2024-01-05"));
        assert_eq!(row.text(), "2024-01-05");
    }
}
