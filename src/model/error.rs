//! Error types for commentview.
//!
//! This module defines the top-level error taxonomy using `thiserror`. Errors compose via
//! `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error returned by the binary
//!   - [`InputError`] - Reading or decoding the comment file
//!   - [`ConfigError`](crate::config::ConfigError) - Config file read/parse failures
//!   - [`LoggingError`](crate::logging::LoggingError) - Tracing subscriber setup
//!
//! # Recovery Strategy
//!
//! The view core itself has no fatal runtime errors. Failed reaction mutations roll back
//! silently, stale measurements are dropped, and sizing without a container width is a
//! programmer error reported by [`SizingError`](crate::view_state::sizing::SizingError).
//! Everything in this module is fatal for the binary and propagates to `main`.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::view_state::SizingError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all failure modes of the binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read or decode the comment input.
    #[error("Failed to read input: {0}")]
    Input(#[from] InputError),

    /// Config file exists but could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tracing subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Items were sized before a container width was set.
    #[error("Layout error: {0}")]
    Sizing(#[from] SizingError),

    /// A simulated interaction referenced an item that does not exist.
    #[error("No renderable item at index {index} (list has {len} items)")]
    NoSuchItem {
        /// Requested index.
        index: usize,
        /// Length of the projected list.
        len: usize,
    },
}

/// Errors encountered when loading a canonical comment from disk.
#[derive(Debug, Error)]
pub enum InputError {
    /// The comment file does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use commentview::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.json")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.json"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was attempted.
        path: PathBuf,
    },

    /// The file was read but is not a valid comment document.
    #[error("Malformed comment JSON in {path}: {source}")]
    Malformed {
        /// The offending file.
        path: PathBuf,
        /// Decoder error with line/column.
        #[source]
        source: serde_json::Error,
    },

    /// Generic I/O error reading the file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_error_converts_into_app_error() {
        fn load() -> Result<(), InputError> {
            Err(InputError::FileNotFound {
                path: PathBuf::from("comment.json"),
            })
        }
        fn run() -> Result<(), AppError> {
            load()?;
            Ok(())
        }

        let err = run().expect_err("load fails");
        assert!(matches!(err, AppError::Input(InputError::FileNotFound { .. })));
        assert_eq!(err.to_string(), "Failed to read input: File not found: comment.json");
    }

    #[test]
    fn malformed_error_mentions_path() {
        let source = serde_json::from_str::<serde_json::Value>("{").expect_err("truncated json");
        let err = InputError::Malformed {
            path: PathBuf::from("bad.json"),
            source,
        };
        assert!(err.to_string().starts_with("Malformed comment JSON in bad.json"));
    }

    #[test]
    fn no_such_item_reports_bounds() {
        let err = AppError::NoSuchItem { index: 9, len: 3 };
        assert_eq!(
            err.to_string(),
            "No renderable item at index 9 (list has 3 items)"
        );
    }
}
