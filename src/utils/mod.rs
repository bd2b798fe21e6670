// Utils compartidos

pub mod bootstrap_ffi;
pub mod chart_ffi;
pub mod constants;
pub mod js_value;
pub mod storage;

pub use constants::*;
pub use js_value::to_js_object;
