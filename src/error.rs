//! Error types for the dashboard pipeline
//!
//! Each stage owns its error enum; a render pass surfaces them as one type.

use crate::charts::RenderError;
use crate::data::{FetchError, ShapeError};
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Anything that can abort a render pass.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Source unreachable, non-2xx, or undecodable
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Missing column, missing lookup key, or misaligned series
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// Chart drawing failed
    #[error(transparent)]
    Render(#[from] RenderError),
}
