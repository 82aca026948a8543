//! Handlers for `/movies` endpoints.
//!
//! | Method   | Path          | Notes |
//! |----------|---------------|-------|
//! | `GET`    | `/movies`     | Optional `?genre=<name>`, case-insensitive |
//! | `POST`   | `/movies`     | Validated body; `201` with the stored movie |
//! | `GET`    | `/movies/:id` | `404` if not found |
//! | `PATCH`  | `/movies/:id` | Partial body, merged shallowly |
//! | `DELETE` | `/movies/:id` | `200` with a confirmation body |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use cartelera_core::{
  movie::Movie,
  store::MovieStore,
  validate::{validate_movie, validate_movie_patch},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{AppState, error::ApiError};

fn store_error<E>(e: E) -> ApiError
where
  E: std::error::Error + Send + Sync + 'static,
{
  ApiError::Store(Box::new(e))
}

// ─── List ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub genre: Option<String>,
}

/// `GET /movies[?genre=<name>]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Movie>>, ApiError>
where
  S: MovieStore,
{
  // `?genre=` with an empty value means no filter.
  let genre = params.genre.as_deref().filter(|genre| !genre.is_empty());
  let movies = state.store.list(genre).await.map_err(store_error)?;
  Ok(Json(movies))
}

// ─── Create ──────────────────────────────────────────────────────────────────

/// `POST /movies`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError>
where
  S: MovieStore,
{
  // Reject before touching the store; an invalid payload has no effect.
  let draft = validate_movie(&body)?;
  let movie = state
    .store
    .insert(Movie::from_draft(draft))
    .await
    .map_err(store_error)?;
  Ok((StatusCode::CREATED, Json(movie)))
}

// ─── Get one ─────────────────────────────────────────────────────────────────

/// `GET /movies/:id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Result<Json<Movie>, ApiError>
where
  S: MovieStore,
{
  let movie = state
    .store
    .get(&id)
    .await
    .map_err(store_error)?
    .ok_or_else(|| ApiError::NotFound("not found".to_owned()))?;
  Ok(Json(movie))
}

// ─── Update ──────────────────────────────────────────────────────────────────

/// `PATCH /movies/:id`
pub async fn update_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
  Json(body): Json<Value>,
) -> Result<Json<Movie>, ApiError>
where
  S: MovieStore,
{
  // Validation wins over existence: a broken payload is 400 even when the
  // id is unknown.
  let patch = validate_movie_patch(&body)?;
  let movie = state
    .store
    .update(&id, patch)
    .await
    .map_err(store_error)?
    .ok_or_else(|| ApiError::NotFound("Movie not found".to_owned()))?;
  Ok(Json(movie))
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// `DELETE /movies/:id`
pub async fn delete_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Result<Json<Value>, ApiError>
where
  S: MovieStore,
{
  let deleted = state.store.delete(&id).await.map_err(store_error)?;
  if !deleted {
    return Err(ApiError::NotFound("Movie not found".to_owned()));
  }
  Ok(Json(json!({ "message": "Movie deleted successfully" })))
}
