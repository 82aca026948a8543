//! Payload validation for create and partial-update requests.
//!
//! Validation runs directly over untrusted [`serde_json::Value`] input so
//! that every broken field is reported in one pass rather than failing on
//! the first. Each problem becomes an [`Issue`] carrying the path to the
//! offending value and a message; the `400` response body is the collected
//! list. Unknown fields are ignored in both modes.

use serde::Serialize;
use serde_json::{Map, Number, Value};
use thiserror::Error;
use url::Url;

use crate::movie::{DEFAULT_RATE, Genre, MovieDraft, MoviePatch};

// ─── Issues ──────────────────────────────────────────────────────────────────

/// One step in the path from the payload root to the offending value.
///
/// Serializes untagged, so a nested genre problem comes out as the mixed
/// array `["genre", 1]`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
  Key(String),
  Index(usize),
}

/// A single payload problem: where it sits and what is wrong with it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Issue {
  pub path:    Vec<PathSegment>,
  pub message: String,
}

impl Issue {
  fn at_root(message: impl Into<String>) -> Issue {
    Issue { path: Vec::new(), message: message.into() }
  }

  fn field(name: &str, message: impl Into<String>) -> Issue {
    Issue {
      path:    vec![PathSegment::Key(name.to_owned())],
      message: message.into(),
    }
  }

  fn element(name: &str, index: usize, message: impl Into<String>) -> Issue {
    Issue {
      path:    vec![PathSegment::Key(name.to_owned()), PathSegment::Index(index)],
      message: message.into(),
    }
  }
}

/// Everything wrong with one payload. Never constructed with an empty list.
#[derive(Clone, Debug, Error)]
#[error("invalid movie payload ({} issues)", .0.len())]
pub struct ValidationErrors(pub Vec<Issue>);

impl ValidationErrors {
  pub fn issues(&self) -> &[Issue] {
    &self.0
  }
}

// ─── Messages ────────────────────────────────────────────────────────────────
//
// Clients match on these strings. The custom ones (including the "es
// required" title message) are part of the published contract and must not
// be "fixed".

const REQUIRED: &str = "Required";
const TITLE_TYPE: &str = "Movie title must be a string";
const TITLE_REQUIRED: &str = "Movie title es required";
const YEAR_MIN: &str = "The number must be greater than 1900";
const DURATION_POSITIVE: &str = "Number must be greater than 0";
const POSTER_URL: &str = "Poster must be a valid url";
const GENRE_TYPE: &str = "Movie genre must be an array of enum Genre";
const INTEGER_EXPECTED: &str = "Expected integer, received float";

/// JSON type name as it appears in `Expected …, received …` messages.
fn json_type(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "boolean",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}

fn expected_got(expected: &str, got: &Value) -> String {
  format!("Expected {expected}, received {}", json_type(got))
}

fn genre_choices() -> String {
  Genre::ALL
    .iter()
    .map(|genre| format!("'{genre}'"))
    .collect::<Vec<_>>()
    .join(" | ")
}

// ─── Field checks ────────────────────────────────────────────────────────────
//
// Each check pushes zero or more issues and returns the parsed value, or
// `None` when at least one issue was pushed for the field.

/// Read a JSON number as an integer. A float with a zero fractional part
/// counts as an integer, matching how clients produce these payloads.
fn as_integer(n: &Number) -> Option<i64> {
  if let Some(int) = n.as_i64() {
    return Some(int);
  }
  let float = n.as_f64()?;
  if float.fract() != 0.0 || float < i64::MIN as f64 || float > i64::MAX as f64 {
    return None;
  }
  Some(float as i64)
}

fn check_title(value: &Value, issues: &mut Vec<Issue>) -> Option<String> {
  match value {
    Value::String(title) => Some(title.clone()),
    _ => {
      issues.push(Issue::field("title", TITLE_TYPE));
      None
    }
  }
}

fn check_year(value: &Value, issues: &mut Vec<Issue>) -> Option<i32> {
  let Value::Number(n) = value else {
    issues.push(Issue::field("year", expected_got("number", value)));
    return None;
  };

  // Both checks report, so `1899.5` yields an integer issue and a bound
  // issue in the same response.
  let wide = as_integer(n);
  if wide.is_none() {
    issues.push(Issue::field("year", INTEGER_EXPECTED));
  }
  let below_min = n.as_f64().is_some_and(|f| f < 1900.0);
  if below_min {
    issues.push(Issue::field("year", YEAR_MIN));
  }

  let wide = wide?;
  if below_min {
    return None;
  }
  match i32::try_from(wide) {
    Ok(year) => Some(year),
    Err(_) => {
      issues.push(Issue::field("year", INTEGER_EXPECTED));
      None
    }
  }
}

fn check_director(value: &Value, issues: &mut Vec<Issue>) -> Option<String> {
  match value {
    Value::String(director) => Some(director.clone()),
    _ => {
      issues.push(Issue::field("director", expected_got("string", value)));
      None
    }
  }
}

fn check_duration(value: &Value, issues: &mut Vec<Issue>) -> Option<u32> {
  let Value::Number(n) = value else {
    issues.push(Issue::field("duration", expected_got("number", value)));
    return None;
  };

  let wide = as_integer(n);
  if wide.is_none() {
    issues.push(Issue::field("duration", INTEGER_EXPECTED));
  }
  // `-5` is an integer that fails only the bound check, so the sign test
  // runs on the raw number rather than on a converted u32.
  let non_positive = n.as_f64().is_some_and(|f| f <= 0.0);
  if non_positive {
    issues.push(Issue::field("duration", DURATION_POSITIVE));
  }

  let wide = wide?;
  if non_positive {
    return None;
  }
  match u32::try_from(wide) {
    Ok(duration) => Some(duration),
    Err(_) => {
      issues.push(Issue::field("duration", INTEGER_EXPECTED));
      None
    }
  }
}

fn check_poster(value: &Value, issues: &mut Vec<Issue>) -> Option<String> {
  let Value::String(poster) = value else {
    issues.push(Issue::field("poster", expected_got("string", value)));
    return None;
  };
  if Url::parse(poster).is_err() {
    issues.push(Issue::field("poster", POSTER_URL));
    return None;
  }
  Some(poster.clone())
}

fn check_rate(value: &Value, issues: &mut Vec<Issue>) -> Option<f64> {
  match value {
    Value::Number(n) => n.as_f64(),
    _ => {
      issues.push(Issue::field("rate", expected_got("number", value)));
      None
    }
  }
}

fn check_genre(value: &Value, issues: &mut Vec<Issue>) -> Option<Vec<Genre>> {
  let Value::Array(entries) = value else {
    issues.push(Issue::field("genre", GENRE_TYPE));
    return None;
  };

  let mut genres = Vec::with_capacity(entries.len());
  let mut ok = true;
  for (index, entry) in entries.iter().enumerate() {
    match entry {
      Value::String(name) => match Genre::from_name(name) {
        Some(genre) => genres.push(genre),
        None => {
          issues.push(Issue::element(
            "genre",
            index,
            format!(
              "Invalid enum value. Expected {}, received '{name}'",
              genre_choices()
            ),
          ));
          ok = false;
        }
      },
      _ => {
        issues.push(Issue::element(
          "genre",
          index,
          format!("Expected {}, received {}", genre_choices(), json_type(entry)),
        ));
        ok = false;
      }
    }
  }
  ok.then_some(genres)
}

// ─── Entry points ────────────────────────────────────────────────────────────

fn require<T>(
  fields: &Map<String, Value>,
  name: &str,
  issues: &mut Vec<Issue>,
  missing: &str,
  check: impl FnOnce(&Value, &mut Vec<Issue>) -> Option<T>,
) -> Option<T> {
  match fields.get(name) {
    Some(value) => check(value, issues),
    None => {
      issues.push(Issue::field(name, missing));
      None
    }
  }
}

fn optional<T>(
  fields: &Map<String, Value>,
  name: &str,
  issues: &mut Vec<Issue>,
  check: impl FnOnce(&Value, &mut Vec<Issue>) -> Option<T>,
) -> Option<T> {
  fields.get(name).and_then(|value| check(value, issues))
}

/// Validate a create payload. Every field except `rate` is required; `rate`
/// falls back to [`DEFAULT_RATE`]. All problems are collected before the
/// payload is rejected.
pub fn validate_movie(input: &Value) -> Result<MovieDraft, ValidationErrors> {
  let Value::Object(fields) = input else {
    return Err(ValidationErrors(vec![Issue::at_root(expected_got(
      "object", input,
    ))]));
  };

  let mut issues = Vec::new();

  let title = require(fields, "title", &mut issues, TITLE_REQUIRED, check_title);
  let year = require(fields, "year", &mut issues, REQUIRED, check_year);
  let director = require(fields, "director", &mut issues, REQUIRED, check_director);
  let duration = require(fields, "duration", &mut issues, REQUIRED, check_duration);
  let poster = require(fields, "poster", &mut issues, REQUIRED, check_poster);
  let rate = match fields.get("rate") {
    Some(value) => check_rate(value, &mut issues),
    None => Some(DEFAULT_RATE),
  };
  let genre = require(fields, "genre", &mut issues, REQUIRED, check_genre);

  match (title, year, director, duration, poster, rate, genre) {
    (
      Some(title),
      Some(year),
      Some(director),
      Some(duration),
      Some(poster),
      Some(rate),
      Some(genre),
    ) if issues.is_empty() => Ok(MovieDraft {
      title,
      year,
      director,
      duration,
      poster,
      rate,
      genre,
    }),
    _ => Err(ValidationErrors(issues)),
  }
}

/// Validate a partial-update payload. Field rules are the same as for
/// creation, but nothing is required and absent fields stay absent; in
/// particular `rate` is not defaulted. `{}` is a valid patch.
pub fn validate_movie_patch(input: &Value) -> Result<MoviePatch, ValidationErrors> {
  let Value::Object(fields) = input else {
    return Err(ValidationErrors(vec![Issue::at_root(expected_got(
      "object", input,
    ))]));
  };

  let mut issues = Vec::new();

  let patch = MoviePatch {
    title:    optional(fields, "title", &mut issues, check_title),
    year:     optional(fields, "year", &mut issues, check_year),
    director: optional(fields, "director", &mut issues, check_director),
    duration: optional(fields, "duration", &mut issues, check_duration),
    poster:   optional(fields, "poster", &mut issues, check_poster),
    rate:     optional(fields, "rate", &mut issues, check_rate),
    genre:    optional(fields, "genre", &mut issues, check_genre),
  };

  if issues.is_empty() {
    Ok(patch)
  } else {
    Err(ValidationErrors(issues))
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn full_payload() -> Value {
    json!({
      "title":    "The Thing",
      "year":     1982,
      "director": "John Carpenter",
      "duration": 109,
      "poster":   "https://example.com/the-thing.jpg",
      "rate":     8.2,
      "genre":    ["Horror", "Sci-Fi"]
    })
  }

  fn messages_for<'a>(errors: &'a ValidationErrors, field: &str) -> Vec<&'a str> {
    errors
      .issues()
      .iter()
      .filter(|issue| issue.path.first() == Some(&PathSegment::Key(field.to_owned())))
      .map(|issue| issue.message.as_str())
      .collect()
  }

  #[test]
  fn accepts_a_complete_payload() {
    let draft = validate_movie(&full_payload()).unwrap();
    assert_eq!(draft.title, "The Thing");
    assert_eq!(draft.year, 1982);
    assert_eq!(draft.duration, 109);
    assert_eq!(draft.rate, 8.2);
    assert_eq!(draft.genre, vec![Genre::Horror, Genre::SciFi]);
  }

  #[test]
  fn defaults_rate_when_absent() {
    let mut payload = full_payload();
    payload.as_object_mut().unwrap().remove("rate");

    let draft = validate_movie(&payload).unwrap();
    assert_eq!(draft.rate, DEFAULT_RATE);
  }

  #[test]
  fn integral_floats_pass_integer_fields() {
    let mut payload = full_payload();
    payload["year"] = json!(1982.0);
    payload["duration"] = json!(109.0);

    let draft = validate_movie(&payload).unwrap();
    assert_eq!(draft.year, 1982);
    assert_eq!(draft.duration, 109);
  }

  #[test]
  fn ignores_unknown_fields_and_supplied_ids() {
    let mut payload = full_payload();
    payload["id"] = json!("not-for-you-to-pick");
    payload["producer"] = json!("somebody");

    assert!(validate_movie(&payload).is_ok());
  }

  #[test]
  fn missing_title_uses_the_custom_message() {
    let mut payload = full_payload();
    payload.as_object_mut().unwrap().remove("title");

    let errors = validate_movie(&payload).unwrap_err();
    assert_eq!(messages_for(&errors, "title"), vec!["Movie title es required"]);
  }

  #[test]
  fn non_string_title_uses_the_type_message() {
    let mut payload = full_payload();
    payload["title"] = json!(42);

    let errors = validate_movie(&payload).unwrap_err();
    assert_eq!(
      messages_for(&errors, "title"),
      vec!["Movie title must be a string"]
    );
  }

  #[test]
  fn null_counts_as_present_but_wrong_type() {
    let mut payload = full_payload();
    payload["director"] = json!(null);

    let errors = validate_movie(&payload).unwrap_err();
    assert_eq!(
      messages_for(&errors, "director"),
      vec!["Expected string, received null"]
    );
  }

  #[test]
  fn year_below_minimum_is_rejected() {
    let mut payload = full_payload();
    payload["year"] = json!(1899);

    let errors = validate_movie(&payload).unwrap_err();
    assert_eq!(
      messages_for(&errors, "year"),
      vec!["The number must be greater than 1900"]
    );
  }

  #[test]
  fn fractional_year_below_minimum_reports_both_problems() {
    let mut payload = full_payload();
    payload["year"] = json!(1899.5);

    let errors = validate_movie(&payload).unwrap_err();
    assert_eq!(
      messages_for(&errors, "year"),
      vec![
        "Expected integer, received float",
        "The number must be greater than 1900",
      ]
    );
  }

  #[test]
  fn non_numeric_year_reports_the_received_type() {
    let mut payload = full_payload();
    payload["year"] = json!("1982");

    let errors = validate_movie(&payload).unwrap_err();
    assert_eq!(
      messages_for(&errors, "year"),
      vec!["Expected number, received string"]
    );
  }

  #[test]
  fn zero_duration_is_not_positive() {
    let mut payload = full_payload();
    payload["duration"] = json!(0);

    let errors = validate_movie(&payload).unwrap_err();
    assert_eq!(
      messages_for(&errors, "duration"),
      vec!["Number must be greater than 0"]
    );
  }

  #[test]
  fn negative_duration_fails_only_the_bound_check() {
    let mut payload = full_payload();
    payload["duration"] = json!(-5);

    let errors = validate_movie(&payload).unwrap_err();
    assert_eq!(
      messages_for(&errors, "duration"),
      vec!["Number must be greater than 0"]
    );
  }

  #[test]
  fn fractional_duration_is_not_an_integer() {
    let mut payload = full_payload();
    payload["duration"] = json!(90.5);

    let errors = validate_movie(&payload).unwrap_err();
    assert_eq!(
      messages_for(&errors, "duration"),
      vec!["Expected integer, received float"]
    );
  }

  #[test]
  fn poster_must_parse_as_a_url() {
    let mut payload = full_payload();
    payload["poster"] = json!("definitely not a url");

    let errors = validate_movie(&payload).unwrap_err();
    assert_eq!(
      messages_for(&errors, "poster"),
      vec!["Poster must be a valid url"]
    );
  }

  #[test]
  fn non_array_genre_uses_the_custom_message() {
    let mut payload = full_payload();
    payload["genre"] = json!("Horror");

    let errors = validate_movie(&payload).unwrap_err();
    assert_eq!(
      messages_for(&errors, "genre"),
      vec!["Movie genre must be an array of enum Genre"]
    );
  }

  #[test]
  fn unknown_genre_reports_the_choices_and_the_element_path() {
    let mut payload = full_payload();
    payload["genre"] = json!(["Horror", "Romance"]);

    let errors = validate_movie(&payload).unwrap_err();
    assert_eq!(errors.issues().len(), 1);

    let issue = &errors.issues()[0];
    assert_eq!(
      issue.path,
      vec![PathSegment::Key("genre".to_owned()), PathSegment::Index(1)]
    );
    assert_eq!(
      issue.message,
      "Invalid enum value. Expected 'Action' | 'Adventure' | 'Comedy' | \
       'Drama' | 'Fantasy' | 'Horror' | 'Thriller' | 'Sci-Fi', received \
       'Romance'"
    );
  }

  #[test]
  fn genre_names_are_case_sensitive() {
    let mut payload = full_payload();
    payload["genre"] = json!(["horror"]);

    assert!(validate_movie(&payload).is_err());
  }

  #[test]
  fn non_string_genre_element_reports_its_type() {
    let mut payload = full_payload();
    payload["genre"] = json!([42]);

    let errors = validate_movie(&payload).unwrap_err();
    let issue = &errors.issues()[0];
    assert!(issue.message.starts_with("Expected 'Action' | "));
    assert!(issue.message.ends_with(", received number"));
  }

  #[test]
  fn empty_genre_list_is_allowed() {
    let mut payload = full_payload();
    payload["genre"] = json!([]);

    let draft = validate_movie(&payload).unwrap();
    assert!(draft.genre.is_empty());
  }

  #[test]
  fn empty_object_reports_every_required_field() {
    let errors = validate_movie(&json!({})).unwrap_err();

    // Everything except `rate`, which defaults.
    assert_eq!(errors.issues().len(), 6);
    assert_eq!(messages_for(&errors, "title"), vec!["Movie title es required"]);
    assert_eq!(messages_for(&errors, "year"), vec!["Required"]);
    assert_eq!(messages_for(&errors, "rate"), Vec::<&str>::new());
  }

  #[test]
  fn non_object_root_reports_at_the_root_path() {
    for (payload, received) in [
      (json!(null), "null"),
      (json!([1, 2]), "array"),
      (json!("movie"), "string"),
    ] {
      let errors = validate_movie(&payload).unwrap_err();
      assert_eq!(errors.issues().len(), 1);
      assert!(errors.issues()[0].path.is_empty());
      assert_eq!(
        errors.issues()[0].message,
        format!("Expected object, received {received}")
      );
    }
  }

  #[test]
  fn issues_serialize_with_path_and_message() {
    let mut payload = full_payload();
    payload["genre"] = json!(["Horror", "Romance"]);

    let errors = validate_movie(&payload).unwrap_err();
    let body = serde_json::to_value(errors.issues()).unwrap();

    assert_eq!(body[0]["path"], json!(["genre", 1]));
    assert!(body[0]["message"].is_string());
  }

  #[test]
  fn empty_patch_is_valid_and_changes_nothing() {
    let patch = validate_movie_patch(&json!({})).unwrap();
    assert_eq!(patch, MoviePatch::default());
  }

  #[test]
  fn patch_keeps_only_supplied_fields() {
    let patch = validate_movie_patch(&json!({
      "year": 2020,
      "rate": 9.1
    }))
    .unwrap();

    assert_eq!(patch.year, Some(2020));
    assert_eq!(patch.rate, Some(9.1));
    assert_eq!(patch.title, None);
    assert_eq!(patch.genre, None);
  }

  #[test]
  fn patch_does_not_default_rate() {
    let patch = validate_movie_patch(&json!({ "title": "Heat" })).unwrap();
    assert_eq!(patch.rate, None);
  }

  #[test]
  fn patch_rejects_invalid_supplied_fields() {
    let errors = validate_movie_patch(&json!({
      "year": "not a year",
      "title": "fine"
    }))
    .unwrap_err();

    assert_eq!(
      messages_for(&errors, "year"),
      vec!["Expected number, received string"]
    );
  }

  #[test]
  fn patch_root_must_be_an_object() {
    let errors = validate_movie_patch(&json!([])).unwrap_err();
    assert_eq!(errors.issues()[0].message, "Expected object, received array");
  }
}
