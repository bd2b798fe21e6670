// ============================================================================
// CONSTANTES - Claves de storage, ids y clases compartidas con las plantillas
// ============================================================================

// Claves de localStorage
pub const THEME_KEY: &str = "theme";
pub const LAYOUT_PREFERENCES_KEY: &str = "finwise-layout-preferences";
pub const USER_PREFERENCES_KEY: &str = "finwise-preferences";
pub const VISITED_KEY: &str = "finwise-visited";

// Ids de elementos creados por la UI
pub const TOAST_CONTAINER_ID: &str = "toast-container";
pub const BULK_BAR_ID: &str = "bulk-action-bar";
pub const THEME_TOGGLE_ID: &str = "theme-toggle";
pub const SHORTCUT_HELP_ID: &str = "shortcut-help";
pub const BACK_TO_TOP_ID: &str = "back-to-top";
pub const GENERATED_TABLE_PREFIX: &str = "finwise-table-";

// Clases
pub const TABLE_ENHANCED_CLASS: &str = "table-enhanced";
pub const TABLE_RESPONSIVE_CLASS: &str = "table-responsive";
pub const ROW_CHECKBOX_CLASS: &str = "row-checkbox";
pub const MASTER_CHECKBOX_CLASS: &str = "master-checkbox";
pub const SELECTED_ROW_CLASS: &str = "table-selected";
pub const SORTABLE_CLASS: &str = "sortable";
pub const RESULTS_INDICATOR_CLASS: &str = "results-indicator";
pub const CHART_EMPTY_CLASS: &str = "chart-empty-state";
pub const CHART_ERROR_CLASS: &str = "chart-error-state";
pub const CONFIRMATION_OVERLAY_CLASS: &str = "confirmation-overlay";
pub const FOCUS_MODE_CLASS: &str = "focus-mode";

// Atributos
pub const CONFIRMED_ATTR: &str = "data-confirmed";
pub const ROW_INDEX_ATTR: &str = "data-row-index";
pub const THEME_ATTR: &str = "data-theme";

// Eventos DOM para scripts de la página
pub const THEME_CHANGED_EVENT: &str = "themeChanged";
pub const BULK_ACTION_EVENT: &str = "finwise:bulk-action";

/// Categorías del diálogo de categorización masiva (valor, etiqueta)
pub const BULK_CATEGORIES: [(&str, &str); 5] = [
    ("groceries", "Groceries"),
    ("dining", "Dining Out"),
    ("utilities", "Utilities"),
    ("transportation", "Transportation"),
    ("entertainment", "Entertainment"),
];

/// Nombres de fichero de exportación
pub const EXPORT_CSV_FILENAME: &str = "export.csv";
pub const EXPORT_JSON_FILENAME: &str = "export.json";
