// ============================================================================
// VIEWMODELS - Lógica UI (pura en *_viewmodel, cableada al DOM en el resto)
// ============================================================================

pub mod bulk_viewmodel;
pub mod chart_viewmodel;
pub mod export_viewmodel;
pub mod form_viewmodel;
pub mod layout_viewmodel;
pub mod table_engine;
pub mod table_viewmodel;
pub mod theme_viewmodel;
pub mod tooltip_viewmodel;
pub mod validation_viewmodel;

pub use bulk_viewmodel::BulkActionViewModel;
pub use form_viewmodel::FormValidationViewModel;
pub use layout_viewmodel::LayoutViewModel;
pub use table_engine::TableInteractionEngine;
pub use theme_viewmodel::ThemeViewModel;
pub use tooltip_viewmodel::TooltipViewModel;
