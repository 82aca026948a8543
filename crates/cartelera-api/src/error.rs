//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use cartelera_core::validate::ValidationErrors;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
///
/// Response bodies are part of the published contract: `404` responses carry
/// `{"message": …}`, everything else carries `{"error": …}`.
#[derive(Debug, Error)]
pub enum ApiError {
  /// The message is the body's `message` field, verbatim.
  #[error("not found: {0}")]
  NotFound(String),

  #[error(transparent)]
  Validation(#[from] ValidationErrors),

  /// Request carried an `Origin` outside the allow-list.
  #[error("origin not allowed")]
  OriginRejected,

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::NotFound(message) => {
        (StatusCode::NOT_FOUND, Json(json!({ "message": message })))
          .into_response()
      }
      ApiError::Validation(errors) => (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": errors.issues() })),
      )
        .into_response(),
      ApiError::OriginRejected => (
        StatusCode::FORBIDDEN,
        Json(json!({ "error": "Not allowed by CORS" })),
      )
        .into_response(),
      ApiError::Store(e) => (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
      )
        .into_response(),
    }
  }
}
