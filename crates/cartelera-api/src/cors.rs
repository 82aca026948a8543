//! CORS origin allow-listing.
//!
//! A small explicit policy rather than a permissive wildcard layer: only
//! origins on the configured list may call the API. Requests from any other
//! origin are rejected with `403` before a handler runs; allowed origins get
//! `Access-Control-Allow-Origin` echoed onto every response. Requests
//! without an `Origin` header (curl, same-origin) pass through untouched.

use axum::{
  body::Body,
  extract::{Request, State},
  http::{HeaderMap, HeaderValue, StatusCode, header},
  middleware::Next,
  response::{IntoResponse, Response},
};
use cartelera_core::store::MovieStore;

use crate::{AppState, error::ApiError};

/// Methods advertised on preflight responses.
pub const ALLOWED_METHODS: &str = "GET, POST, PATCH, PUT, DELETE";

/// Origins accepted when no configuration overrides them.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 4] = [
  "http://localhost:8800",
  "http://localhost:1234",
  "https://movies.com",
  "https://luisgfr.com",
];

// ─── Policy ──────────────────────────────────────────────────────────────────

/// The set of origins allowed to call the API. Matching is exact, scheme
/// and port included.
#[derive(Clone, Debug)]
pub struct CorsPolicy {
  allowed: Vec<String>,
}

impl CorsPolicy {
  pub fn new<I, T>(allowed: I) -> CorsPolicy
  where
    I: IntoIterator<Item = T>,
    T: Into<String>,
  {
    CorsPolicy { allowed: allowed.into_iter().map(Into::into).collect() }
  }

  pub fn is_allowed(&self, origin: &str) -> bool {
    self.allowed.iter().any(|allowed| allowed == origin)
  }
}

impl Default for CorsPolicy {
  fn default() -> CorsPolicy {
    CorsPolicy::new(DEFAULT_ALLOWED_ORIGINS)
  }
}

// ─── Enforcement ─────────────────────────────────────────────────────────────

/// Middleware wrapped around every route.
pub async fn apply<S>(
  State(state): State<AppState<S>>,
  request: Request<Body>,
  next: Next,
) -> Response
where
  S: MovieStore + Clone + Send + Sync + 'static,
{
  let Some(origin) = request.headers().get(header::ORIGIN).cloned() else {
    return next.run(request).await;
  };

  let allowed = origin
    .to_str()
    .is_ok_and(|origin| state.cors.is_allowed(origin));
  if !allowed {
    tracing::warn!(?origin, "rejected by CORS policy");
    return ApiError::OriginRejected.into_response();
  }

  let mut response = next.run(request).await;
  let headers = response.headers_mut();
  headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
  headers.insert(header::VARY, HeaderValue::from_static("Origin"));
  response
}

// ─── Preflight ───────────────────────────────────────────────────────────────

/// `OPTIONS /movies/:id`
///
/// Browsers preflight `PATCH` and `DELETE`. [`apply`] has already rejected
/// disallowed origins, so any `Origin` reaching this handler is echoed back.
/// Without an `Origin` the response still advertises the allowed methods.
pub async fn preflight(headers: HeaderMap) -> Response {
  let mut response = StatusCode::OK.into_response();
  response.headers_mut().insert(
    header::ACCESS_CONTROL_ALLOW_METHODS,
    HeaderValue::from_static(ALLOWED_METHODS),
  );
  if let Some(origin) = headers.get(header::ORIGIN) {
    response
      .headers_mut()
      .insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin.clone());
  }
  response
}
