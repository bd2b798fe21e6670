// ============================================================================
// SERVICES - Storage, notificaciones, confirmación, gráficos y atajos
// ============================================================================

pub mod bulk_actions;
pub mod chart_service;
pub mod confirmation_service;
pub mod notification_service;
pub mod preference_store;
pub mod shortcut_registry;

pub use bulk_actions::{BulkActionSink, DomEventSink};
pub use chart_service::{ChartApiClient, ChartBridge};
pub use confirmation_service::ConfirmationService;
pub use notification_service::NotificationCenter;
pub use preference_store::PreferenceStore;
pub use shortcut_registry::{KeyChord, ShortcutRegistry};
