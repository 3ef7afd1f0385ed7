//! Pure request routing: path normalization and the externally visible origin.

mod origin;
mod route;

pub use origin::{base_url, request_scheme, DEFAULT_HOST};
pub use route::{route_key, Route};
