// ============================================================================
// MODELS - Estructuras de datos puras (sin DOM)
// ============================================================================

pub mod chart;
pub mod confirmation;
pub mod filter;
pub mod preferences;
pub mod table;
pub mod toast;

pub use chart::*;
pub use confirmation::*;
pub use filter::*;
pub use preferences::*;
pub use table::*;
pub use toast::*;
