//! Functional core of the fakesso mock identity provider.
//!
//! Everything in this crate is free of HTTP and database concerns:
//! - [`settings`]: the four behavior toggles and their coercion rules
//! - [`identity`]: identity records and how new ones are provisioned
//! - [`token`]: the bearer token format
//! - [`routing`]: route keys and request origin derivation
//! - [`storage`]: the repository abstraction implemented by the server

pub mod identity;
pub mod random;
pub mod routing;
pub mod settings;
pub mod storage;
pub mod token;
