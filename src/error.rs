//! Crate error type.
//!
//! The engines themselves never fail; errors only surface at the parse and
//! configuration boundaries.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid filter expression JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed encoded polyline at byte {offset}")]
    Polyline { offset: usize },

    #[error("grid size must be a positive, finite number of minutes (got {0})")]
    InvalidGrid(f64),
}
