// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod debounce;
pub mod reactivity;
pub mod selection_state;
pub mod table_state;
pub mod theme_state;

pub use debounce::*;
pub use reactivity::*;
pub use selection_state::*;
pub use table_state::*;
pub use theme_state::*;
