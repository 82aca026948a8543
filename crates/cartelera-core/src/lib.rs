//! Core types and validation for the cartelera movie catalog.
//!
//! Everything HTTP-shaped lives elsewhere. This crate defines the [`Movie`]
//! record, the [`MovieStore`](store::MovieStore) seam that storage backends
//! implement, and the payload [`validate`] routines whose issue lists are
//! what clients see in `400` responses.

pub mod movie;
pub mod store;
pub mod validate;

pub use self::{
  movie::{Genre, Movie, MovieDraft, MoviePatch},
  store::MovieStore,
  validate::{Issue, PathSegment, ValidationErrors},
};
