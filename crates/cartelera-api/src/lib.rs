//! HTTP layer for the cartelera movie catalog.
//!
//! Exposes an axum [`Router`] implementing a small JSON CRUD API over any
//! [`MovieStore`], with origin allow-listing wrapped around every route.

pub mod cors;
pub mod error;
pub mod movies;

pub use error::ApiError;

use std::sync::Arc;

use axum::{Json, Router, middleware, routing::get};
use cartelera_core::store::MovieStore;
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

use cors::CorsPolicy;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialized from `config.toml` and the
/// `CARTELERA_*` environment. Every field has a default, so the server runs
/// with no configuration at all.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:            String,
  #[serde(default = "default_port")]
  pub port:            u16,
  /// Origins the CORS policy accepts.
  #[serde(default = "default_allowed_origins")]
  pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
  fn default() -> ServerConfig {
    ServerConfig {
      host:            default_host(),
      port:            default_port(),
      allowed_origins: default_allowed_origins(),
    }
  }
}

fn default_host() -> String {
  "0.0.0.0".to_owned()
}

fn default_port() -> u16 {
  3000
}

fn default_allowed_origins() -> Vec<String> {
  cors::DEFAULT_ALLOWED_ORIGINS
    .iter()
    .map(|&origin| origin.to_owned())
    .collect()
}

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: MovieStore> {
  pub store: Arc<S>,
  pub cors:  Arc<CorsPolicy>,
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the API.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: MovieStore + Clone + Send + Sync + 'static,
{
  Router::new()
    .route("/", get(greeting))
    .route("/movies", get(movies::list::<S>).post(movies::create::<S>))
    .route(
      "/movies/{id}",
      get(movies::get_one::<S>)
        .patch(movies::update_one::<S>)
        .delete(movies::delete_one::<S>)
        .options(cors::preflight),
    )
    .layer(middleware::from_fn_with_state(state.clone(), cors::apply::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

/// The `GET /` liveness greeting.
async fn greeting() -> Json<Value> {
  Json(json!({ "message": "hola mundo" }))
}

// ─── Integration tests ───────────────────────────────────────────────────────
