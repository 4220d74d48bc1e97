//! Storage errors
//!
//! The simulation itself is infallible; only reading and writing the high
//! score and settings can fail.

use std::fmt;
use std::io;

#[derive(Debug)]
pub enum PersistenceError {
    /// Filesystem failure
    Io(io::Error),
    /// Stored data isn't valid JSON for the expected shape
    Format(serde_json::Error),
    /// Browser storage unavailable or rejected the write
    Unavailable(&'static str),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "storage I/O failed: {e}"),
            Self::Format(e) => write!(f, "stored data is malformed: {e}"),
            Self::Unavailable(what) => write!(f, "storage unavailable: {what}"),
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Format(e) => Some(e),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<io::Error> for PersistenceError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(e: serde_json::Error) -> Self {
        Self::Format(e)
    }
}
