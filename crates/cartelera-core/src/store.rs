//! The [`MovieStore`] trait, the seam between HTTP handlers and storage.
//!
//! Handlers are generic over this trait rather than tied to a concrete
//! backend, so tests can run against whatever store they like and backends
//! can be swapped without touching the routing layer.

use std::future::Future;

use crate::movie::{Movie, MoviePatch};

/// A movie collection backend.
///
/// The collection is insertion-ordered: [`insert`](MovieStore::insert)
/// appends, [`delete`](MovieStore::delete) removes exactly one record and
/// preserves the relative order of the rest.
///
/// Methods return `Send` futures so implementations work on multi-threaded
/// runtimes.
pub trait MovieStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// All movies, or only those carrying `genre` (matched case-insensitively
  /// against each movie's genre names) when a filter is given.
  fn list(
    &self,
    genre: Option<&str>,
  ) -> impl Future<Output = Result<Vec<Movie>, Self::Error>> + Send;

  /// The movie with `id`, if any.
  fn get(
    &self,
    id: &str,
  ) -> impl Future<Output = Result<Option<Movie>, Self::Error>> + Send;

  /// Append a movie that already carries its id and hand it back.
  fn insert(
    &self,
    movie: Movie,
  ) -> impl Future<Output = Result<Movie, Self::Error>> + Send;

  /// Merge `patch` over the movie with `id` and return the merged record,
  /// or `None` when no movie has that id.
  fn update(
    &self,
    id: &str,
    patch: MoviePatch,
  ) -> impl Future<Output = Result<Option<Movie>, Self::Error>> + Send;

  /// Remove the movie with `id`. `false` when no movie had it.
  fn delete(
    &self,
    id: &str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send;
}
