//! [`MemoryStore`], the in-memory implementation of [`MovieStore`].

use std::{collections::HashSet, sync::Arc};

use tokio::sync::RwLock;

use cartelera_core::{
  movie::{Movie, MoviePatch},
  store::MovieStore,
};

use crate::{Error, Result, seed::SEED_JSON};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A movie catalog held in process memory.
///
/// Cloning is cheap; clones share the same collection. All access goes
/// through one [`RwLock`], so reads run concurrently and writes are
/// serialized against everything else.
#[derive(Clone)]
pub struct MemoryStore {
  movies: Arc<RwLock<Vec<Movie>>>,
}

impl MemoryStore {
  /// A store with nothing in it.
  pub fn empty() -> MemoryStore {
    MemoryStore { movies: Arc::new(RwLock::new(Vec::new())) }
  }

  /// A store loaded from a JSON array of movies. Fails on malformed JSON
  /// and on duplicate ids.
  pub fn from_json(json: &str) -> Result<MemoryStore> {
    let movies: Vec<Movie> = serde_json::from_str(json)?;

    let mut seen = HashSet::new();
    for movie in &movies {
      if !seen.insert(movie.id.as_str()) {
        return Err(Error::DuplicateId(movie.id.clone()));
      }
    }

    Ok(MemoryStore { movies: Arc::new(RwLock::new(movies)) })
  }

  /// A store preloaded with the bundled dataset.
  pub fn seeded() -> Result<MemoryStore> {
    MemoryStore::from_json(SEED_JSON)
  }

  /// Current number of movies.
  pub async fn len(&self) -> usize {
    self.movies.read().await.len()
  }

  pub async fn is_empty(&self) -> bool {
    self.movies.read().await.is_empty()
  }
}

impl MovieStore for MemoryStore {
  type Error = Error;

  async fn list(&self, genre: Option<&str>) -> Result<Vec<Movie>> {
    let movies = self.movies.read().await;
    Ok(match genre {
      Some(genre) => movies
        .iter()
        .filter(|movie| movie.has_genre(genre))
        .cloned()
        .collect(),
      None => movies.clone(),
    })
  }

  async fn get(&self, id: &str) -> Result<Option<Movie>> {
    let movies = self.movies.read().await;
    Ok(movies.iter().find(|movie| movie.id == id).cloned())
  }

  async fn insert(&self, movie: Movie) -> Result<Movie> {
    let mut movies = self.movies.write().await;
    if movies.iter().any(|existing| existing.id == movie.id) {
      return Err(Error::DuplicateId(movie.id));
    }
    movies.push(movie.clone());
    Ok(movie)
  }

  async fn update(&self, id: &str, patch: MoviePatch) -> Result<Option<Movie>> {
    let mut movies = self.movies.write().await;
    let Some(movie) = movies.iter_mut().find(|movie| movie.id == id) else {
      return Ok(None);
    };
    patch.apply(movie);
    Ok(Some(movie.clone()))
  }

  async fn delete(&self, id: &str) -> Result<bool> {
    let mut movies = self.movies.write().await;
    match movies.iter().position(|movie| movie.id == id) {
      Some(index) => {
        movies.remove(index);
        Ok(true)
      }
      None => Ok(false),
    }
  }
}
