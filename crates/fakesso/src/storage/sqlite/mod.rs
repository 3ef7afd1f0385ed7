//! SQLite storage backend.
//!
//! Uses `rusqlite` for synchronous operations and `tokio-rusqlite` for the async
//! wrapper. Each repository owns one connection running on its own thread.

mod error;
mod repository;
mod schema;

pub use repository::SqliteRepository;
