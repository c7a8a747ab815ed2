//! Collaborator error types
//!
//! The coalescer itself never fails: disabled, hidden and already-rendered
//! requests are reported as outcomes. These errors belong to the timer and
//! render sink it drives.

use thiserror::Error;

/// Timer service errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TimerError {
    #[error("Failed to arm deferred render: {0}")]
    Arm(String),

    #[error("Timer service unavailable: {0}")]
    Unavailable(String),
}

/// Render sink errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DrawError {
    #[error("Render target lost")]
    TargetLost,

    #[error("Draw failed: {0}")]
    Failed(String),
}

/// Result type for timer operations
pub type TimerResult<T> = Result<T, TimerError>;

/// Result type for draw operations
pub type DrawResult<T> = Result<T, DrawError>;
