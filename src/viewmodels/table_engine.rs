// ============================================================================
// TABLE INTERACTION ENGINE - Orden, filtros, selección y export sobre <table>
// ============================================================================
// Lee el DOM a TableModel, decide con table_viewmodel y aplica el resultado.
// Estado por tabla en TableState; selección en SelectionState (compartida
// con la barra de acciones masivas).
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, HtmlInputElement};

use crate::config::CONFIG;
use crate::dom::table::{
    apply_order, apply_visibility, body_rows, header_cells, mark_sorted_header, read_model, set_master_checkbox,
    sync_row_checkboxes,
};
use crate::dom::{
    add_class, closest, download_file, get_element_by_id, has_class, on_change, on_click, on_input, query_selector,
    query_selector_all, today, ElementBuilder,
};
use crate::error::{UiError, UiResult};
use crate::models::{ExportFormat, FilterState, QuickFilter, RowData, TableModel};
use crate::services::bulk_actions::{completion_message, BulkActionKind};
use crate::services::NotificationCenter;
use crate::state::{PendingTimers, SelectionSet, SelectionState, TableState};
use crate::utils::constants::{
    MASTER_CHECKBOX_CLASS, ROW_CHECKBOX_CLASS, ROW_INDEX_ATTR, SORTABLE_CLASS, TABLE_ENHANCED_CLASS,
    TABLE_RESPONSIVE_CLASS,
};
use crate::viewmodels::export_viewmodel::export_payload;
use crate::viewmodels::table_viewmodel::{results_indicator, sort_order, visibility};
use crate::views::table_controls::{
    mark_active_quick_filter, render_table_controls, search_input_id, set_results_indicator, SearchPanelView,
};

/// Tablas que se mejoran automáticamente al arrancar
const AUTO_TABLE_SELECTOR: &str = "table.table, table.table-enhanced";

#[derive(Clone)]
pub struct TableInteractionEngine {
    tables: TableState,
    selection: SelectionState,
    notifications: NotificationCenter,
    elements: Rc<RefCell<HashMap<String, Element>>>,
    debounce: Rc<RefCell<PendingTimers<Timeout>>>,
}

fn checkbox_target(event: &Event) -> Option<HtmlInputElement> {
    event.target()?.dyn_into::<HtmlInputElement>().ok()
}

fn checkbox(class: &str, title: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("input")?
        .class(&format!("form-check-input {}", class))
        .attr("type", "checkbox")?
        .attr("title", title)?
        .build())
}

/// Envuelve la tabla en .table-responsive si aún no lo está
fn wrap_responsive(table: &Element) -> Result<Element, JsValue> {
    let Some(parent) = table.parent_element() else {
        return Ok(table.clone());
    };
    if has_class(&parent, TABLE_RESPONSIVE_CLASS) {
        return Ok(parent);
    }
    let wrapper = ElementBuilder::new("div")?.class(TABLE_RESPONSIVE_CLASS).build();
    parent.insert_before(&wrapper, Some(table))?;
    wrapper.append_child(table)?;
    Ok(wrapper)
}

/// Nodo junto al que van controles e indicador
fn anchor_of(table: &Element) -> Element {
    table
        .parent_element()
        .filter(|parent| has_class(parent, TABLE_RESPONSIVE_CLASS))
        .unwrap_or_else(|| table.clone())
}

fn sync_selection(elements: &RefCell<HashMap<String, Element>>, set: &SelectionSet) {
    for (id, table) in elements.borrow().iter() {
        let result = sync_row_checkboxes(table, |row| set.is_selected(id, row))
            .and_then(|_| set_master_checkbox(table, set.master_state(id)));
        if let Err(e) = result {
            log::error!("❌ [TABLE] Error sincronizando selección de {}: {:?}", id, e);
        }
    }
}

impl TableInteractionEngine {
    pub fn new(tables: TableState, selection: SelectionState, notifications: NotificationCenter) -> Self {
        let engine = Self {
            tables,
            selection,
            notifications,
            elements: Rc::new(RefCell::new(HashMap::new())),
            debounce: Rc::new(RefCell::new(PendingTimers::new())),
        };
        let elements = engine.elements.clone();
        engine.selection.subscribe(move |set| sync_selection(&elements, set));
        engine
    }

    /// Registra las tablas presentes en la página. Devuelve cuántas.
    pub fn init(&self) -> UiResult<usize> {
        let mut count = 0;
        for table in query_selector_all(AUTO_TABLE_SELECTOR)? {
            match self.register_table(&table) {
                Ok(_) => count += 1,
                Err(e) => log::error!("❌ [TABLE] Error registrando tabla: {}", e),
            }
        }
        Ok(count)
    }

    /// Registra por id (export WASM para plantillas que cargan tablas tarde)
    pub fn register_by_id(&self, id: &str) -> UiResult<String> {
        let table = get_element_by_id(id).ok_or_else(|| UiError::MissingElement(format!("#{}", id)))?;
        self.register_table(&table)
    }

    /// Mejora una tabla. Registrar dos veces la misma es un no-op.
    pub fn register_table(&self, table: &Element) -> UiResult<String> {
        let id = if table.id().is_empty() {
            let generated = self.tables.generate_id();
            table.set_id(&generated);
            generated
        } else {
            table.id()
        };

        let has_controls = closest(table, ".card").is_some();
        if !self.tables.register(&id, has_controls) {
            log::debug!("📋 [TABLE] {} ya registrada", id);
            return Ok(id);
        }

        add_class(table, TABLE_ENHANCED_CLASS)?;
        let wrapper = wrap_responsive(table)?;
        let total = self.add_checkboxes(&id, table)?;
        self.selection.register_table(&id, total);
        self.elements.borrow_mut().insert(id.clone(), table.clone());
        self.install_sorting(&id, table)?;
        if has_controls {
            self.install_controls(&id, &wrapper)?;
        }

        log::info!("📋 [TABLE] {} registrada ({} filas)", id, total);
        Ok(id)
    }

    fn element(&self, id: &str) -> UiResult<Element> {
        self.elements
            .borrow()
            .get(id)
            .cloned()
            .ok_or_else(|| UiError::MissingElement(format!("table {}", id)))
    }

    fn add_checkboxes(&self, id: &str, table: &Element) -> Result<usize, JsValue> {
        if let Some(header_row) = table.query_selector("thead tr")? {
            let master = checkbox(MASTER_CHECKBOX_CLASS, "Select all rows")?;
            let cell = ElementBuilder::new("th")?.child(&master)?.build();
            header_row.insert_before(&cell, header_row.first_child().as_ref())?;

            let selection = self.selection.clone();
            let table_id = id.to_string();
            on_change(&master, move |event| {
                if let Some(input) = checkbox_target(&event) {
                    selection.toggle_all(&table_id, input.checked());
                }
            })?;
        }

        let rows = body_rows(table)?;
        for (index, row) in rows.iter().enumerate() {
            row.set_attribute(ROW_INDEX_ATTR, &index.to_string())?;
            let row_checkbox = checkbox(ROW_CHECKBOX_CLASS, "Select row")?;
            let cell = ElementBuilder::new("td")?.child(&row_checkbox)?.build();
            row.insert_before(&cell, row.first_child().as_ref())?;

            let selection = self.selection.clone();
            let table_id = id.to_string();
            on_change(&row_checkbox, move |event| {
                if let Some(input) = checkbox_target(&event) {
                    selection.toggle_row(&table_id, index, input.checked());
                }
            })?;
        }
        Ok(rows.len())
    }

    fn install_sorting(&self, id: &str, table: &Element) -> UiResult<()> {
        let model = read_model(table, id)?;
        for (column, header) in header_cells(table)?.into_iter().enumerate() {
            if !model.is_sortable(column) {
                continue;
            }
            add_class(&header, SORTABLE_CLASS)?;
            let engine = self.clone();
            let table_id = id.to_string();
            on_click(&header, move |_| {
                if let Err(e) = engine.sort_by(&table_id, column) {
                    log::error!("❌ [TABLE] Error ordenando {}: {}", table_id, e);
                }
            })?;
        }
        Ok(())
    }

    /// Click en cabecera: asc, luego desc; otra columna vuelve a asc
    pub fn sort_by(&self, id: &str, column: usize) -> UiResult<()> {
        let table = self.element(id)?;
        let state = self
            .tables
            .next_sort(id, column)
            .ok_or_else(|| UiError::MissingElement(format!("table {}", id)))?;
        let model = read_model(&table, id)?;
        let order = sort_order(&model.rows, state);
        apply_order(&table, &model, &order)?;
        mark_sorted_header(&table, state)?;
        log::debug!("↕️ [TABLE] {} columna {} {:?}", id, column, state.direction);
        Ok(())
    }

    fn install_controls(&self, id: &str, wrapper: &Element) -> UiResult<()> {
        let view = render_table_controls(id)?;
        if let Some(parent) = wrapper.parent_element() {
            parent.insert_before(&view.root, Some(wrapper))?;
        }

        for (filter, button) in &view.quick_filters {
            let engine = self.clone();
            let table_id = id.to_string();
            let filter = *filter;
            on_click(button, move |_| engine.select_filter(&table_id, filter))?;
        }

        let panel = Rc::new(view.search);
        {
            let engine = self.clone();
            let table_id = id.to_string();
            let panel_ref = panel.clone();
            on_input(&panel.search, move |_| engine.schedule_filters(&table_id, &panel_ref))?;
        }
        for date_input in [&panel.date_from, &panel.date_to] {
            let engine = self.clone();
            let table_id = id.to_string();
            let panel_ref = panel.clone();
            on_change(date_input, move |_| {
                engine.read_panel(&table_id, &panel_ref);
                engine.apply_filters_logged(&table_id);
            })?;
        }
        {
            let engine = self.clone();
            let table_id = id.to_string();
            let panel_ref = panel.clone();
            on_click(&panel.apply, move |_| {
                engine.read_panel(&table_id, &panel_ref);
                engine.apply_filters_logged(&table_id);
            })?;
        }
        {
            let engine = self.clone();
            let table_id = id.to_string();
            let panel_ref = panel.clone();
            on_click(&panel.clear, move |_| engine.clear_filters(&table_id, &panel_ref))?;
        }

        for (format, button) in &view.exports {
            let engine = self.clone();
            let table_id = id.to_string();
            let format = *format;
            on_click(button, move |event| {
                event.prevent_default();
                engine.export_logged(&table_id, format);
            })?;
        }
        Ok(())
    }

    fn read_panel(&self, id: &str, panel: &SearchPanelView) {
        self.tables.update_filter(id, |filter| {
            filter.search_text = panel.search.value();
            filter.date_from = FilterState::parse_date_input(&panel.date_from.value());
            filter.date_to = FilterState::parse_date_input(&panel.date_to.value());
        });
    }

    /// Cada pulsación reemplaza el Timeout pendiente de la tabla
    fn schedule_filters(&self, id: &str, panel: &SearchPanelView) {
        self.read_panel(id, panel);
        let engine = self.clone();
        let table_id = id.to_string();
        let timeout = Timeout::new(CONFIG.table_config.search_debounce_ms, move || {
            engine.apply_filters_logged(&table_id);
        });
        self.debounce.borrow_mut().arm(id, timeout);
    }

    fn clear_filters(&self, id: &str, panel: &SearchPanelView) {
        panel.search.set_value("");
        panel.date_from.set_value("");
        panel.date_to.set_value("");
        self.debounce.borrow_mut().cancel(id);
        self.tables.update_filter(id, FilterState::clear_advanced);
        self.apply_filters_logged(id);
    }

    fn select_filter(&self, id: &str, filter: QuickFilter) {
        if self.tables.set_quick_filter(id, filter).is_none() {
            return;
        }
        let selector = format!(".table-controls[data-table=\"{}\"]", id);
        match query_selector(&selector) {
            Ok(Some(controls)) => {
                if let Err(e) = mark_active_quick_filter(&controls, filter) {
                    log::warn!("⚠️ [TABLE] No se pudo marcar el filtro activo: {:?}", e);
                }
            }
            Ok(None) => {}
            Err(e) => log::warn!("⚠️ [TABLE] Selector inválido {}: {:?}", selector, e),
        }
        self.apply_filters_logged(id);
    }

    /// Alt+1..4 sobre la primera tabla con controles
    pub fn select_quick_filter(&self, index: usize) -> bool {
        match (self.tables.first_with_controls(), QuickFilter::from_index(index)) {
            (Some(id), Some(filter)) => {
                self.select_filter(&id, filter);
                true
            }
            _ => false,
        }
    }

    /// Recalcula visibilidad e indicador. Idempotente. Devuelve filas visibles.
    pub fn apply_filters(&self, id: &str) -> UiResult<usize> {
        let table = self.element(id)?;
        let model = read_model(&table, id)?;
        let visible = visibility(&model, &self.tables.filter(id), today());
        apply_visibility(&table, &model, &visible)?;

        let shown = visible.iter().filter(|v| **v).count();
        let indicator = results_indicator(shown, model.total_rows());
        set_results_indicator(&anchor_of(&table), indicator.as_deref())?;
        Ok(shown)
    }

    fn apply_filters_logged(&self, id: &str) {
        if let Err(e) = self.apply_filters(id) {
            log::error!("❌ [TABLE] Error aplicando filtros a {}: {}", id, e);
        }
    }

    fn download<'a>(
        &self,
        id: &str,
        rows: impl IntoIterator<Item = &'a RowData>,
        model: &TableModel,
        format: ExportFormat,
    ) -> UiResult<()> {
        let (content, mime, filename) = export_payload(model, rows, format)?;
        download_file(&content, mime, filename)?;
        log::info!("💾 [TABLE] {} exportada como {}", id, filename);
        Ok(())
    }

    /// Exporta las filas visibles. Devuelve cuántas.
    pub fn export(&self, id: &str, format: ExportFormat) -> UiResult<usize> {
        let table = self.element(id)?;
        let model = read_model(&table, id)?;
        let visible = visibility(&model, &self.tables.filter(id), today());
        let rows: Vec<&RowData> = model
            .rows
            .iter()
            .zip(&visible)
            .filter(|(_, shown)| **shown)
            .map(|(row, _)| row)
            .collect();
        self.download(id, rows.iter().copied(), &model, format)?;
        Ok(rows.len())
    }

    /// Exporta un subconjunto por índice original (selección masiva)
    pub fn export_rows(&self, id: &str, indices: &[usize], format: ExportFormat) -> UiResult<usize> {
        let table = self.element(id)?;
        let model = read_model(&table, id)?;
        let rows: Vec<&RowData> = model.rows.iter().filter(|row| indices.contains(&row.index)).collect();
        self.download(id, rows.iter().copied(), &model, format)?;
        Ok(rows.len())
    }

    fn export_logged(&self, id: &str, format: ExportFormat) {
        match self.export(id, format) {
            Ok(count) => self
                .notifications
                .success(&completion_message(BulkActionKind::Export, count, None)),
            Err(e) => {
                log::error!("❌ [TABLE] Error exportando {}: {}", id, e);
                self.notifications.danger("Export failed");
            }
        }
    }

    pub fn export_first_table(&self, format: ExportFormat) -> bool {
        match self.tables.first_table() {
            Some(id) => {
                self.export_logged(&id, format);
                true
            }
            None => false,
        }
    }

    /// Ctrl+Shift+F
    pub fn focus_search(&self) -> bool {
        let focused = self
            .tables
            .first_with_controls()
            .and_then(|id| get_element_by_id(&search_input_id(&id)))
            .and_then(|input| input.dyn_into::<HtmlElement>().ok())
            .map(|input| input.focus().is_ok());
        focused.unwrap_or(false)
    }

    /// Ctrl+Shift+S: selecciona todas las filas de la primera tabla
    pub fn select_all(&self) -> bool {
        match self.tables.first_table() {
            Some(id) => {
                self.selection.toggle_all(&id, true);
                true
            }
            None => false,
        }
    }

    pub fn clear_selection(&self) {
        self.selection.clear();
    }
}
