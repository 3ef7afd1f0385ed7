//! In-memory storage backend for testing.
//!
//! Stores identities in a map wrapped in `Arc<RwLock<_>>`. Nothing is persisted.
//!
//! # Example
//!
//! ```rust,ignore
//! use fakesso::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! // Use repo for testing...
//! ```

mod repository;

pub use repository::InMemoryRepository;
