// ============================================================================
// APP - Composición de servicios y arranque de componentes
// ============================================================================
// Cada componente se inicializa por separado: si uno falla (p.ej. la página
// no tiene sus nodos) se loguea y el resto sigue funcionando.
// ============================================================================

use std::fmt::Display;
use std::rc::Rc;

use crate::dom::{body, get_element_by_id, on_click, window};
use crate::error::{UiError, UiResult};
use crate::models::Severity;
use crate::services::{
    ChartApiClient, ChartBridge, ConfirmationService, DomEventSink, NotificationCenter, PreferenceStore,
    ShortcutRegistry,
};
use crate::state::{SelectionState, TableState, ThemeState};
use crate::utils::constants::SHORTCUT_HELP_ID;
use crate::viewmodels::layout_viewmodel::scroll_to_top;
use crate::viewmodels::theme_viewmodel::system_prefers_dark;
use crate::viewmodels::{
    BulkActionViewModel, FormValidationViewModel, LayoutViewModel, TableInteractionEngine, ThemeViewModel,
    TooltipViewModel,
};
use crate::views::shortcut_help::render_shortcut_help;

/// Rutas de navegación rápida (Alt+letra)
const NAVIGATION_SHORTCUTS: [(&str, &str, &str); 5] = [
    ("Alt+D", "Go to Dashboard", "/dashboard/"),
    ("Alt+I", "Go to Import page", "/import/"),
    ("Alt+C", "Go to Categories", "/categories/"),
    ("Alt+B", "Go to Budgets", "/budgets/"),
    ("Alt+H", "Go to Home", "/"),
];

fn log_init<T: Display>(component: &str, result: UiResult<T>) {
    match result {
        Ok(summary) => log::info!("✅ [APP] {} listo ({})", component, summary),
        Err(e) if e.is_missing_element() => log::debug!("⏭️ [APP] {} omitido: {}", component, e),
        Err(e) => log::error!("❌ [APP] Error inicializando {}: {}", component, e),
    }
}

fn navigate(path: &str) {
    if let Some(window) = window() {
        if let Err(e) = window.location().set_href(path) {
            log::error!("❌ [APP] Error navegando a {}: {:?}", path, e);
        }
    }
}

pub struct App {
    preferences: Rc<PreferenceStore>,
    notifications: NotificationCenter,
    confirmations: ConfirmationService,
    theme: ThemeViewModel,
    tables: TableInteractionEngine,
    bulk: BulkActionViewModel,
    charts: ChartBridge,
    layout: LayoutViewModel,
    forms: FormValidationViewModel,
    tooltips: TooltipViewModel,
    shortcuts: ShortcutRegistry,
}

impl App {
    pub fn new() -> Self {
        let preferences = Rc::new(PreferenceStore::local());
        let notifications = NotificationCenter::new();
        let confirmations = ConfirmationService::new();
        let theme_state = ThemeState::new(preferences.clone(), system_prefers_dark());
        let selection = SelectionState::new();

        let tables = TableInteractionEngine::new(TableState::new(), selection.clone(), notifications.clone());
        let bulk = BulkActionViewModel::new(
            selection,
            tables.clone(),
            confirmations.clone(),
            notifications.clone(),
            preferences.clone(),
            Rc::new(DomEventSink),
        );

        Self {
            charts: ChartBridge::new(ChartApiClient::new(), theme_state.clone()),
            theme: ThemeViewModel::new(theme_state),
            layout: LayoutViewModel::new(preferences.clone(), notifications.clone()),
            forms: FormValidationViewModel::new(),
            tooltips: TooltipViewModel::new(),
            shortcuts: ShortcutRegistry::new(),
            preferences,
            notifications,
            confirmations,
            tables,
            bulk,
        }
    }

    /// Arranca todos los componentes sobre el DOM actual
    pub fn init(&self) {
        log_init("layout", self.layout.init().map(|_| "preferencias aplicadas"));
        log_init(
            "back to top",
            self.layout
                .install_back_to_top()
                .map(|created| if created { "botón creado" } else { "ya existía" }),
        );
        log_init("theme", self.theme.init().map(|_| "tema aplicado"));
        log_init("alerts", self.notifications.enhance_alerts().map(|_| "alertas"));
        log_init(
            "confirmation",
            self.confirmations.install_guards().map(|n| format!("{} guardas", n)),
        );
        log_init("tables", self.tables.init().map(|n| format!("{} tablas", n)));
        log_init(
            "bulk actions",
            self.bulk.init().map(|shown| if shown { "barra creada" } else { "sin tablas" }),
        );
        log_init("forms", self.forms.init().map(|n| format!("{} formularios", n)));
        // Después de forms: los campos ya tienen sus helpers
        log_init("tooltips", self.tooltips.init().map(|n| format!("{} tooltips", n)));
        log_init("charts", self.charts.init().map(|n| format!("{} gráficos", n)));
        log_init("shortcuts", self.install_shortcuts().map(|n| format!("{} atajos", n)));
    }

    fn install_shortcuts(&self) -> UiResult<usize> {
        let registry = &self.shortcuts;
        let mut failures = Vec::new();
        let mut bind = |chord: &str, description: &str, handler: Box<dyn Fn()>| {
            if let Err(e) = registry.register(chord, description, handler) {
                failures.push(e);
            }
        };

        for (chord, description, path) in NAVIGATION_SHORTCUTS {
            bind(chord, description, Box::new(move || navigate(path)));
        }

        let help_registry = self.shortcuts.clone();
        bind("?", "Show keyboard shortcuts", Box::new(move || show_shortcut_help(&help_registry)));
        bind("Home", "Scroll to top", Box::new(scroll_to_top));

        let tables = self.tables.clone();
        bind(
            "Ctrl+Shift+F",
            "Focus table search",
            Box::new(move || {
                tables.focus_search();
            }),
        );
        let tables = self.tables.clone();
        bind(
            "Ctrl+Shift+S",
            "Select all rows",
            Box::new(move || {
                tables.select_all();
            }),
        );
        let tables = self.tables.clone();
        let preferences = self.preferences.clone();
        bind(
            "Ctrl+Shift+E",
            "Export table",
            Box::new(move || {
                let format = preferences.user_preferences().default_export_format;
                tables.export_first_table(format);
            }),
        );
        let tables = self.tables.clone();
        bind("Ctrl+Shift+C", "Clear selection", Box::new(move || tables.clear_selection()));

        for (index, label) in ["All", "Income", "Expenses", "This Month"].iter().enumerate() {
            let tables = self.tables.clone();
            bind(
                &format!("Alt+{}", index + 1),
                &format!("Filter: {}", label),
                Box::new(move || {
                    tables.select_quick_filter(index);
                }),
            );
        }

        for conflict in &failures {
            log::warn!("⚠️ [SHORTCUTS] {}", conflict);
        }
        registry.install()?;
        Ok(registry.len())
    }

    // ------------------------------------------------------------------
    // Entradas de los exports WASM
    // ------------------------------------------------------------------

    pub fn register_table(&self, id: &str) -> UiResult<String> {
        let registered = self.tables.register_by_id(id)?;
        // La barra masiva se crea con la primera tabla que aparezca
        if get_element_by_id(crate::utils::constants::BULK_BAR_ID).is_none() {
            self.bulk.init()?;
        }
        Ok(registered)
    }

    pub fn show_toast(&self, message: &str, severity: &str, duration_ms: Option<u32>) {
        self.notifications
            .show_toast(message, Severity::parse(severity), duration_ms);
    }

    pub fn toggle_theme(&self) -> String {
        self.theme.toggle().as_str().to_string()
    }

    pub fn reload_chart(&self, name: &str) -> bool {
        self.charts.reload(name)
    }

    pub fn set_density(&self, name: &str) -> UiResult<bool> {
        self.layout.set_density(name)
    }

    pub fn toggle_focus_mode(&self) -> UiResult<bool> {
        self.layout.toggle_focus_mode()
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Diálogo de ayuda generado desde el registro; uno como máximo
fn show_shortcut_help(registry: &ShortcutRegistry) {
    if get_element_by_id(SHORTCUT_HELP_ID).is_some() {
        return;
    }
    let result = (|| -> UiResult<()> {
        let body = body().ok_or_else(|| UiError::MissingElement("body".to_string()))?;
        let view = render_shortcut_help(&registry.describe())?;
        let overlay = view.overlay.clone();
        on_click(&view.close, move |_| overlay.remove())?;
        body.append_child(&view.overlay)?;
        Ok(())
    })();
    if let Err(e) = result {
        log::error!("❌ [SHORTCUTS] Error mostrando la ayuda: {}", e);
    }
}
