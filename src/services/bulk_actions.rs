// ============================================================================
// BULK ACTIONS - Acciones sobre filas seleccionadas
// ============================================================================
// Las mutaciones reales las hace el servidor: la UI solo publica la acción
// a través de un BulkActionSink.
// ============================================================================

use serde::Serialize;
use crate::dom::{dispatch_custom_event, document};
use crate::error::{UiError, UiResult};
use crate::utils::constants::BULK_ACTION_EVENT;
use crate::utils::to_js_object;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkActionKind {
    Export,
    Categorize,
    Delete,
}

/// Detalle del evento finwise:bulk-action
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BulkAction {
    pub action: BulkActionKind,
    pub table: String,
    pub rows: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl BulkAction {
    pub fn new(action: BulkActionKind, table: &str, rows: Vec<usize>) -> Self {
        Self {
            action,
            table: table.to_string(),
            rows,
            category: None,
        }
    }

    pub fn categorize(table: &str, rows: Vec<usize>, category: &str) -> Self {
        Self {
            category: Some(category.to_string()),
            ..Self::new(BulkActionKind::Categorize, table, rows)
        }
    }
}

/// Destino de las acciones masivas
pub trait BulkActionSink {
    fn submit(&self, action: &BulkAction) -> UiResult<()>;
}

/// Sink por defecto: CustomEvent en document para los scripts del servidor
#[derive(Clone, Copy, Default)]
pub struct DomEventSink;

impl BulkActionSink for DomEventSink {
    fn submit(&self, action: &BulkAction) -> UiResult<()> {
        let document = document().ok_or_else(|| UiError::MissingElement("document".to_string()))?;
        let detail = to_js_object(action)?;
        dispatch_custom_event(&document, BULK_ACTION_EVENT, &detail)?;
        log::info!(
            "📤 [BULK] {:?} sobre {} filas de {}",
            action.action,
            action.rows.len(),
            action.table
        );
        Ok(())
    }
}

/// Texto del toast tras completar una acción sobre `count` filas
pub fn completion_message(kind: BulkActionKind, count: usize, category: Option<&str>) -> String {
    let plural = if count == 1 { "" } else { "s" };
    match kind {
        BulkActionKind::Export => format!("Exported {} item{}", count, plural),
        BulkActionKind::Categorize => format!(
            "Applied \"{}\" category to {} item{}",
            category.unwrap_or(""),
            count,
            plural
        ),
        BulkActionKind::Delete => format!("Deleted {} item{}", count, plural),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_detail_shape() {
        let action = BulkAction::categorize("transactions", vec![1, 4], "groceries");
        let json = serde_json::to_string(&action).unwrap();
        assert_eq!(
            json,
            r#"{"action":"categorize","table":"transactions","rows":[1,4],"category":"groceries"}"#
        );

        let delete = BulkAction::new(BulkActionKind::Delete, "t", vec![0]);
        assert_eq!(
            serde_json::to_string(&delete).unwrap(),
            r#"{"action":"delete","table":"t","rows":[0]}"#
        );
    }

    #[test]
    fn test_completion_messages() {
        assert_eq!(completion_message(BulkActionKind::Delete, 1, None), "Deleted 1 item");
        assert_eq!(
            completion_message(BulkActionKind::Categorize, 3, Some("dining")),
            "Applied \"dining\" category to 3 items"
        );
        assert_eq!(completion_message(BulkActionKind::Export, 2, None), "Exported 2 items");
    }
}
