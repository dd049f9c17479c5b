//! Error types
//!
//! Runtime oddities (zero-sized canvas, coincident balls, a draw pressed twice)
//! are handled in place and never surface here. These cover the edges that take
//! user or stored input.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LotteryError {
    #[error("at least {min} prizes are required, got {got}")]
    TooFewPrizes { min: usize, got: usize },
    #[error("prize #{index} has an empty label")]
    EmptyLabel { index: usize },
    #[error("prize index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure of the external transition media. Never fatal: the reveal falls
/// back to a fixed delay.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaError {
    #[error("transition media unavailable")]
    Unavailable,
    #[error("playback failed: {0}")]
    Playback(String),
}
