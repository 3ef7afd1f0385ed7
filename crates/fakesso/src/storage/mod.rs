//! Storage backend implementations.
//!
//! Concrete implementations of [`fakesso_core::storage::IdentityRepository`]:
//!
//! - [`SqliteRepository`]: file-backed store used by the server. An empty store
//!   location falls back to its in-memory variant.
//! - [`InMemoryRepository`]: process-local maps, used by the router tests.

// Only the tests construct the in-memory backend.
#[cfg_attr(not(test), allow(dead_code))]
pub mod inmemory;
pub mod sqlite;

#[cfg_attr(not(test), allow(unused_imports))]
pub use inmemory::InMemoryRepository;
pub use sqlite::SqliteRepository;
