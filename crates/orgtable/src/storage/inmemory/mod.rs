//! In-memory storage backend.
//!
//! Default backend for local runs and the backing store for every test in
//! this crate.

mod store;

pub use store::InMemoryItemStore;
