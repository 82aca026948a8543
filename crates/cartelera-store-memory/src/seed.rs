//! The bundled seed dataset, compiled into the binary.

/// JSON array of movies loaded by [`crate::MemoryStore::seeded`].
pub(crate) const SEED_JSON: &str = include_str!("../data/movies.json");
