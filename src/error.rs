use thiserror::Error;

/// A decoded feature that cannot become a marker.
///
/// Fatal only to the one record: the loader logs it and moves on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidFeature {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("field `{field}` is not a finite number: {value}")]
    NotNumeric { field: &'static str, value: String },
    #[error("field `{field}` is not text: {value}")]
    NotText { field: &'static str, value: String },
    #[error("boundary of `{0}` has no ring with at least three points")]
    EmptyBoundary(String),
}
