//! In-memory backend for the cartelera movie store.
//!
//! Holds the whole catalog in a [`tokio::sync::RwLock`]ed vector, seeded
//! from the JSON dataset bundled with the crate. Nothing is persisted;
//! restart the process and the seed is back.

mod seed;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::MemoryStore;
