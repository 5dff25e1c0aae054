//! Error types shared by every module of the crate.
//!
//! All failures are raised synchronously at the point of detection. Nothing in
//! this crate retries or recovers; callers receive a [`TimesliceError`] and
//! decide what to do with it.

use std::fmt;

use thiserror::Error;

use crate::Timestamp;

pub type Result<T> = std::result::Result<T, TimesliceError>;

/// A timestamp could not be derived from an item.
///
/// `item` carries a rendering of the offending item so that the message
/// identifies it. `position` is filled in when the failure happened while
/// building an [`IndexedList`](crate::IndexedList).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub item: String,
    pub position: Option<usize>,
    pub reason: String,
}

impl ParseError {
    pub fn new(item: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            position: None,
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn at(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(pos) => write!(
                f,
                "could not parse '{}' (position {}) into a valid datetime: {}",
                self.item, pos, self.reason
            ),
            None => write!(
                f,
                "could not parse '{}' into a valid datetime: {}",
                self.item, self.reason
            ),
        }
    }
}

impl std::error::Error for ParseError {}

#[derive(Debug, Error)]
pub enum TimesliceError {
    #[error("{0}")]
    Construction(String),
    #[error("start '{start}' is later than end '{end}'")]
    Ordering { start: Timestamp, end: Timestamp },
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("index {index} is out of range for a list of {len} items")]
    Index { index: isize, len: usize },
    #[error("{0}")]
    Sizing(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TimesliceError {
    pub(crate) fn construction(msg: impl Into<String>) -> Self {
        Self::Construction(msg.into())
    }

    pub(crate) fn sizing(msg: impl Into<String>) -> Self {
        Self::Sizing(msg.into())
    }
}
