//! Behavior toggles shared by every flow step.
//!
//! Settings are resolved once from an external key-value source (the server reads
//! the process environment) and then handed to the router as an explicit value.

mod coercion;
mod table;
mod types;

pub use coercion::parse_flag;
pub use table::Settings;
pub use types::{SettingKey, SettingValue, DEFAULT_STORE_LOCATION};
