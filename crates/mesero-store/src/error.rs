//! # Store Error Types
//!
//! Error taxonomy for the persistence layer.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Failure Propagation                            │
//! │                                                                     │
//! │  Io     - file missing/unopenable       → Err, blocking dialog      │
//! │  Parse  - malformed line or record      → Err, fatal to that load   │
//! │  NotFound - find_product miss           → Err, warning dialog       │
//! │                                                                     │
//! │  Everything else the CRUD surface reports as a boolean `false`      │
//! │  "soft failure" (dedup violation, missing category, empty input):   │
//! │  the UI shows a warning and the session keeps running.              │
//! │                                                                     │
//! │  Decrement-engine misses are logged only - a sale never aborts.     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Persistence-layer errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// File missing or unopenable. Fatal to the operation that needed it.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed on-disk data, naming the offending location.
    ///
    /// `line` is 1-based for text formats and 0 for binary records where
    /// the offset lives in the message instead.
    #[error("parse error in {path} (line {line}): {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// Lookup miss on a query that must hand back a value.
    #[error("{entity} not found: {name}")]
    NotFound { entity: &'static str, name: String },
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        StoreError::Parse {
            path: path.into(),
            line,
            message: message.into(),
        }
    }

    pub fn not_found(entity: &'static str, name: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity,
            name: name.into(),
        }
    }
}

/// Result type for persistence operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StoreError::parse("/tmp/catalog.txt", 4, "bad ingredient quantity: 'dos'");
        assert_eq!(
            err.to_string(),
            "parse error in /tmp/catalog.txt (line 4): bad ingredient quantity: 'dos'"
        );

        let err = StoreError::not_found("product", "Cola");
        assert_eq!(err.to_string(), "product not found: Cola");
    }
}
