use thiserror::Error;

use crate::{Axis, AxisSelection};

/// Errors surfaced synchronously at the call boundary.
///
/// Out-of-range positions are never errors (they are clamped), and cancellation is reported
/// through the cancelled task's callbacks instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("invalid scroll position: {0:?}")]
    InvalidPosition(String),

    #[error("scroll position must be finite, got {0}")]
    NonFinite(f64),

    #[error("invalid axis name: {0:?}")]
    InvalidAxis(String),

    #[error("keyword position targets the {keyword:?} axis but the call is restricted to {axis:?}")]
    AxisMismatch { keyword: Axis, axis: AxisSelection },

    #[error("invalid queue name: {0:?}")]
    InvalidQueueName(String),
}

pub type Result<T> = std::result::Result<T, Error>;
