//! Error type for `cartelera-store-memory`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The seed dataset could not be parsed.
  #[error("seed error: {0}")]
  Seed(#[from] serde_json::Error),

  /// Attempted to add a movie whose id is already in the catalog.
  #[error("duplicate movie id: {0}")]
  DuplicateId(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
