// ============================================================================
// BULK ACTION VIEWMODEL - Barra de acciones masivas sobre la selección
// ============================================================================
// Export / Categorize / Delete / Clear. Las mutaciones se delegan al
// BulkActionSink; tras completar una acción la selección se limpia.
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{body, closest, on_click, query_selector};
use crate::error::{UiError, UiResult};
use crate::models::{ConfirmationRequest, ExportFormat};
use crate::services::bulk_actions::{completion_message, BulkAction, BulkActionKind, BulkActionSink};
use crate::services::{ConfirmationService, NotificationCenter, PreferenceStore};
use crate::state::{SelectionSet, SelectionState};
use crate::utils::constants::TABLE_ENHANCED_CLASS;
use crate::viewmodels::table_engine::TableInteractionEngine;
use crate::views::bulk_action_bar::{
    render_bulk_action_bar, render_categorize_dialog, update_bulk_action_bar, BulkBarView,
};

#[derive(Clone)]
pub struct BulkActionViewModel {
    selection: SelectionState,
    engine: TableInteractionEngine,
    confirmations: ConfirmationService,
    notifications: NotificationCenter,
    preferences: Rc<PreferenceStore>,
    sink: Rc<dyn BulkActionSink>,
}

/// (tabla, filas) con selección, en orden estable
fn selected_by_table(set: &SelectionSet) -> Vec<(String, Vec<usize>)> {
    set.tables_with_selection()
        .into_iter()
        .map(|table| {
            let rows = set.selected_rows(&table);
            (table, rows)
        })
        .collect()
}

impl BulkActionViewModel {
    pub fn new(
        selection: SelectionState,
        engine: TableInteractionEngine,
        confirmations: ConfirmationService,
        notifications: NotificationCenter,
        preferences: Rc<PreferenceStore>,
        sink: Rc<dyn BulkActionSink>,
    ) -> Self {
        Self {
            selection,
            engine,
            confirmations,
            notifications,
            preferences,
            sink,
        }
    }

    /// Inserta la barra antes de la primera tabla mejorada. false si no hay tablas.
    pub fn init(&self) -> UiResult<bool> {
        let Some(first_table) = query_selector(&format!("table.{}", TABLE_ENHANCED_CLASS))? else {
            return Ok(false);
        };
        let view = Rc::new(render_bulk_action_bar()?);
        let anchor: Element = closest(&first_table, ".card, .table-responsive").unwrap_or(first_table);
        match anchor.parent_element() {
            Some(parent) => parent.insert_before(&view.bar, Some(&anchor))?,
            None => body()
                .ok_or_else(|| UiError::MissingElement("body".to_string()))?
                .append_child(&view.bar)?,
        };

        self.wire_buttons(&view)?;

        let bar = view.clone();
        self.selection.subscribe(move |set| {
            if let Err(e) = update_bulk_action_bar(&bar, set.bulk_bar_visible(), &set.label()) {
                log::error!("❌ [BULK] Error actualizando la barra: {:?}", e);
            }
        });
        Ok(true)
    }

    fn wire_buttons(&self, view: &BulkBarView) -> UiResult<()> {
        let vm = self.clone();
        on_click(&view.export, move |_| vm.export_selected())?;
        let vm = self.clone();
        on_click(&view.categorize, move |_| vm.categorize_selected())?;
        let vm = self.clone();
        on_click(&view.delete, move |_| vm.delete_selected())?;
        let vm = self.clone();
        on_click(&view.clear, move |_| vm.selection.clear())?;
        Ok(())
    }

    fn export_format(&self) -> ExportFormat {
        self.preferences.user_preferences().default_export_format
    }

    /// CSV/JSON de las filas seleccionadas (un fichero por tabla)
    pub fn export_selected(&self) {
        let groups = selected_by_table(&self.selection.snapshot());
        if groups.is_empty() {
            return;
        }
        let format = self.export_format();
        let mut exported = 0;
        for (table, rows) in &groups {
            match self.engine.export_rows(table, rows, format) {
                Ok(count) => {
                    exported += count;
                    self.submit(&BulkAction::new(BulkActionKind::Export, table, rows.clone()));
                }
                Err(e) => log::error!("❌ [BULK] Error exportando {}: {}", table, e),
            }
        }
        self.notifications
            .success(&completion_message(BulkActionKind::Export, exported, None));
        self.selection.clear();
    }

    pub fn categorize_selected(&self) {
        let count = self.selection.total_count();
        if count == 0 {
            return;
        }
        if let Err(e) = self.open_categorize_dialog(count) {
            log::error!("❌ [BULK] No se pudo abrir el diálogo de categorías: {}", e);
        }
    }

    fn open_categorize_dialog(&self, count: usize) -> UiResult<()> {
        let body = body().ok_or_else(|| UiError::MissingElement("body".to_string()))?;
        let view = render_categorize_dialog(count)?;

        let overlay = view.overlay.clone();
        on_click(&view.cancel, move |_| overlay.remove())?;

        let overlay = view.overlay.clone();
        on_click(&view.overlay, move |event| {
            let on_overlay = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .map_or(false, |target| target == overlay);
            if on_overlay {
                overlay.remove();
            }
        })?;

        let vm = self.clone();
        let overlay = view.overlay.clone();
        let select = view.select.clone();
        on_click(&view.apply, move |_| {
            let category = select.value();
            // Sin categoría elegida el diálogo sigue abierto
            if category.is_empty() {
                return;
            }
            vm.apply_category(&category);
            overlay.remove();
        })?;

        body.append_child(&view.overlay)?;
        Ok(())
    }

    pub fn apply_category(&self, category: &str) {
        let groups = selected_by_table(&self.selection.snapshot());
        let count: usize = groups.iter().map(|(_, rows)| rows.len()).sum();
        for (table, rows) in groups {
            self.submit(&BulkAction::categorize(&table, rows, category));
        }
        self.notifications
            .success(&completion_message(BulkActionKind::Categorize, count, Some(category)));
        self.selection.clear();
    }

    /// Pasa siempre por ConfirmationService antes de publicar
    pub fn delete_selected(&self) {
        let count = self.selection.total_count();
        if count == 0 {
            return;
        }
        let vm = self.clone();
        let confirmed = self.confirmations.request(ConfirmationRequest::bulk_delete(count));
        spawn_local(async move {
            if !confirmed.await {
                log::debug!("🚫 [BULK] Borrado masivo cancelado");
                return;
            }
            let groups = selected_by_table(&vm.selection.snapshot());
            let deleted: usize = groups.iter().map(|(_, rows)| rows.len()).sum();
            for (table, rows) in groups {
                vm.submit(&BulkAction::new(BulkActionKind::Delete, &table, rows));
            }
            vm.notifications
                .success(&completion_message(BulkActionKind::Delete, deleted, None));
            vm.selection.clear();
        });
    }

    fn submit(&self, action: &BulkAction) {
        if let Err(e) = self.sink.submit(action) {
            log::error!("❌ [BULK] Error publicando {:?}: {}", action.action, e);
        }
    }
}
