//! View error types

use thiserror::Error;

/// View errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("Invalid colour: {0}")]
    InvalidColor(String),

    #[error("Renderer layer {0} does not exist")]
    MissingLayer(usize),
}

/// Result type for view operations
pub type ViewResult<T> = Result<T, ViewError>;
