//! The movie record and its derived payload shapes.
//!
//! [`Movie`] is the stored record. [`MovieDraft`] is a validated create
//! payload (no id yet), and [`MoviePatch`] is a validated partial update.
//! Both are produced exclusively by the [`validate`](crate::validate)
//! module, so a draft or patch in hand is already known-good.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Rating applied when a create payload omits `rate`.
pub const DEFAULT_RATE: f64 = 0.5;

fn default_rate() -> f64 { DEFAULT_RATE }

// ─── Genre ───────────────────────────────────────────────────────────────────

/// The closed set of genres a movie may carry.
///
/// Payload validation matches these names exactly; the `?genre=` list filter
/// matches them case-insensitively.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Genre {
  Action,
  Adventure,
  Comedy,
  Drama,
  Fantasy,
  Horror,
  Thriller,
  #[serde(rename = "Sci-Fi")]
  SciFi,
}

impl Genre {
  /// Every variant in declaration order. Drives the expected-values half of
  /// enum validation messages.
  pub const ALL: [Genre; 8] = [
    Genre::Action,
    Genre::Adventure,
    Genre::Comedy,
    Genre::Drama,
    Genre::Fantasy,
    Genre::Horror,
    Genre::Thriller,
    Genre::SciFi,
  ];

  /// The wire name. Kept in lockstep with the serde names above.
  pub fn name(self) -> &'static str {
    match self {
      Genre::Action => "Action",
      Genre::Adventure => "Adventure",
      Genre::Comedy => "Comedy",
      Genre::Drama => "Drama",
      Genre::Fantasy => "Fantasy",
      Genre::Horror => "Horror",
      Genre::Thriller => "Thriller",
      Genre::SciFi => "Sci-Fi",
    }
  }

  /// Exact-match lookup, as payload validation requires. `"drama"` is not
  /// a genre; `"Drama"` is.
  pub fn from_name(name: &str) -> Option<Genre> {
    Genre::ALL.into_iter().find(|genre| genre.name() == name)
  }
}

impl std::fmt::Display for Genre {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.name())
  }
}

// ─── Movie ───────────────────────────────────────────────────────────────────

/// A catalog record. Field order here is the JSON key order on the wire.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Movie {
  /// Opaque unique id. Server-generated (UUID v4) on creation; seed records
  /// may carry any non-colliding string.
  pub id:       String,
  pub title:    String,
  /// Release year, 1900 or later.
  pub year:     i32,
  pub director: String,
  /// Running time in minutes.
  pub duration: u32,
  /// Poster URL, stored exactly as supplied.
  pub poster:   String,
  #[serde(default = "default_rate")]
  pub rate:     f64,
  pub genre:    Vec<Genre>,
}

impl Movie {
  /// Promote a validated draft to a stored record with a fresh UUID v4 id.
  pub fn from_draft(draft: MovieDraft) -> Movie {
    Movie {
      id:       Uuid::new_v4().to_string(),
      title:    draft.title,
      year:     draft.year,
      director: draft.director,
      duration: draft.duration,
      poster:   draft.poster,
      rate:     draft.rate,
      genre:    draft.genre,
    }
  }

  /// Whether any of the movie's genres matches `filter`, ignoring ASCII
  /// case. `"drama"`, `"Drama"`, and `"DRAMA"` all match [`Genre::Drama`].
  pub fn has_genre(&self, filter: &str) -> bool {
    self
      .genre
      .iter()
      .any(|genre| genre.name().eq_ignore_ascii_case(filter))
  }
}

// ─── Drafts and patches ──────────────────────────────────────────────────────

/// A validated create payload. Everything a [`Movie`] needs except the id,
/// which the server assigns.
#[derive(Clone, Debug, PartialEq)]
pub struct MovieDraft {
  pub title:    String,
  pub year:     i32,
  pub director: String,
  pub duration: u32,
  pub poster:   String,
  /// [`DEFAULT_RATE`] when the payload omitted it.
  pub rate:     f64,
  pub genre:    Vec<Genre>,
}

/// A validated partial update. `None` fields were absent from the payload
/// and leave the stored value untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MoviePatch {
  pub title:    Option<String>,
  pub year:     Option<i32>,
  pub director: Option<String>,
  pub duration: Option<u32>,
  pub poster:   Option<String>,
  pub rate:     Option<f64>,
  pub genre:    Option<Vec<Genre>>,
}

impl MoviePatch {
  /// Shallow-merge into `movie`. Supplied fields win; the id is never
  /// touched (a patch cannot carry one). The merged record is not
  /// re-validated, only the supplied fields were.
  pub fn apply(self, movie: &mut Movie) {
    if let Some(title) = self.title {
      movie.title = title;
    }
    if let Some(year) = self.year {
      movie.year = year;
    }
    if let Some(director) = self.director {
      movie.director = director;
    }
    if let Some(duration) = self.duration {
      movie.duration = duration;
    }
    if let Some(poster) = self.poster {
      movie.poster = poster;
    }
    if let Some(rate) = self.rate {
      movie.rate = rate;
    }
    if let Some(genre) = self.genre {
      movie.genre = genre;
    }
  }
}
