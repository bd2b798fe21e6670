// ============================================================================
// TABLE CONTROLS VIEW - Filtros rápidos, panel de búsqueda y exportación
// ============================================================================
// Solo construye elementos: el cableado de eventos vive en TableInteractionEngine
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement};

use crate::dom::{query_all_in, ElementBuilder};
use crate::models::{ExportFormat, QuickFilter};
use crate::utils::constants::RESULTS_INDICATOR_CLASS;
use crate::viewmodels::table_viewmodel::{indicator_action, IndicatorAction};

pub struct SearchPanelView {
    pub panel: Element,
    pub search: HtmlInputElement,
    pub date_from: HtmlInputElement,
    pub date_to: HtmlInputElement,
    pub apply: Element,
    pub clear: Element,
}

pub struct TableControlsView {
    pub root: Element,
    pub quick_filters: Vec<(QuickFilter, Element)>,
    pub search: SearchPanelView,
    pub exports: Vec<(ExportFormat, Element)>,
}

pub fn search_input_id(table_id: &str) -> String {
    format!("{}-search", table_id)
}

fn input(input_type: &str, class: &str) -> Result<HtmlInputElement, JsValue> {
    ElementBuilder::new("input")?
        .class(class)
        .attr("type", input_type)?
        .build()
        .dyn_into::<HtmlInputElement>()
        .map_err(|_| JsValue::from_str("input no es HtmlInputElement"))
}

fn labelled_column(col_class: &str, label: &str, field: &Element) -> Result<Element, JsValue> {
    let label = ElementBuilder::new("label")?.class("form-label").text(label).build();
    Ok(ElementBuilder::new("div")?
        .class(col_class)
        .child(&label)?
        .child(field)?
        .build())
}

/// Botones All / Income / Expenses / This Month
pub fn render_quick_filters() -> Result<(Element, Vec<(QuickFilter, Element)>), JsValue> {
    let group = ElementBuilder::new("div")?
        .class("btn-group")
        .attr("role", "group")?
        .build();
    let mut buttons = Vec::new();
    for filter in QuickFilter::ALL {
        let button = ElementBuilder::new("button")?
            .class(filter.button_class())
            .attr("type", "button")?
            .attr("data-filter", filter.key())?
            .text(filter.label())
            .build();
        if filter == QuickFilter::All {
            button.class_list().add_1("active")?;
        }
        group.append_child(&button)?;
        buttons.push((filter, button));
    }
    let container = ElementBuilder::new("div")?
        .class("quick-filters mb-3")
        .child(&group)?
        .build();
    Ok((container, buttons))
}

/// Marca como activo solo el botón del filtro actual
pub fn mark_active_quick_filter(root: &Element, active: QuickFilter) -> Result<(), JsValue> {
    for button in query_all_in(root, "[data-filter]")? {
        let is_active = button.get_attribute("data-filter").as_deref() == Some(active.key());
        button.class_list().toggle_with_force("active", is_active)?;
    }
    Ok(())
}

pub fn render_search_panel(table_id: &str) -> Result<SearchPanelView, JsValue> {
    let search = input("text", "form-control search-text")?;
    search.set_id(&search_input_id(table_id));
    search.set_placeholder("Search...");
    let date_from = input("date", "form-control date-from")?;
    let date_to = input("date", "form-control date-to")?;

    let apply = ElementBuilder::new("button")?
        .class("btn btn-primary btn-sm apply-filters")
        .attr("type", "button")?
        .text("Apply")
        .build();
    let clear = ElementBuilder::new("button")?
        .class("btn btn-outline-secondary btn-sm clear-filters")
        .attr("type", "button")?
        .text("Clear")
        .build();
    let buttons = ElementBuilder::new("div")?
        .class("d-flex gap-1")
        .child(&apply)?
        .child(&clear)?
        .build();

    let row = ElementBuilder::new("div")?
        .class("row g-2")
        .child(&labelled_column("col-md-4", "Search", &search)?)?
        .child(&labelled_column("col-md-3", "Date From", &date_from)?)?
        .child(&labelled_column("col-md-3", "Date To", &date_to)?)?
        .child(&labelled_column("col-md-2", "\u{a0}", &buttons)?)?
        .build();
    let panel = ElementBuilder::new("div")?
        .class("search-filters mb-3")
        .child(&row)?
        .build();

    Ok(SearchPanelView {
        panel,
        search,
        date_from,
        date_to,
        apply,
        clear,
    })
}

/// Botones CSV / JSON
pub fn render_export_menu() -> Result<(Element, Vec<(ExportFormat, Element)>), JsValue> {
    let menu = ElementBuilder::new("div")?.class("export-menu btn-group ms-2").build();
    let mut items = Vec::new();
    for (format, label, icon) in [
        (ExportFormat::Csv, "CSV", "bi bi-file-earmark-spreadsheet me-1"),
        (ExportFormat::Json, "JSON", "bi bi-file-earmark-code me-1"),
    ] {
        let button = ElementBuilder::new("button")?
            .class("btn btn-sm btn-outline-secondary")
            .attr("type", "button")?
            .attr("title", &format!("Export {}", label))?
            .icon(icon)?
            .append_text(label)?
            .build();
        menu.append_child(&button)?;
        items.push((format, button));
    }
    Ok((menu, items))
}

/// Contenedor completo de controles para una tabla dentro de .card
pub fn render_table_controls(table_id: &str) -> Result<TableControlsView, JsValue> {
    let (filters, quick_filters) = render_quick_filters()?;
    let search = render_search_panel(table_id)?;
    let (export_menu, exports) = render_export_menu()?;

    let toolbar = ElementBuilder::new("div")?
        .class("d-flex justify-content-between align-items-start")
        .child(&filters)?
        .child(&export_menu)?
        .build();
    let root = ElementBuilder::new("div")?
        .class("table-controls")
        .attr("data-table", table_id)?
        .child(&toolbar)?
        .child(&search.panel)?
        .build();

    Ok(TableControlsView {
        root,
        quick_filters,
        search,
        exports,
    })
}

/// Crea, actualiza o elimina el indicador "Showing N of M items".
/// `anchor` es el nodo tras el que se coloca (wrapper de la tabla).
pub fn set_results_indicator(anchor: &Element, text: Option<&str>) -> Result<(), JsValue> {
    let parent = match anchor.parent_element() {
        Some(parent) => parent,
        None => return Ok(()),
    };
    let existing = parent.query_selector(&format!(":scope > .{}", RESULTS_INDICATOR_CLASS))?;
    match (indicator_action(existing.is_some(), text), existing) {
        (IndicatorAction::Update(text), Some(indicator)) => indicator.set_text_content(Some(text)),
        (IndicatorAction::Remove, Some(indicator)) => indicator.remove(),
        (IndicatorAction::Create(text), _) => {
            let indicator = ElementBuilder::new("div")?
                .class(&format!("{} alert alert-info small py-2 mt-2", RESULTS_INDICATOR_CLASS))
                .text(text)
                .build();
            anchor.after_with_node_1(&indicator)?;
        }
        _ => {}
    }
    Ok(())
}
