// ============================================================================
// VIEWS - Funciones que construyen DOM (sin lógica ni estado)
// ============================================================================

pub mod back_to_top;
pub mod bulk_action_bar;
pub mod chart_view;
pub mod confirmation_dialog;
pub mod form_feedback;
pub mod shortcut_help;
pub mod table_controls;
pub mod theme_toggle;
pub mod toast;
