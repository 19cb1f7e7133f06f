//! # Error Types
//!
//! This module defines all error types for the song map adapter.
//!
//! Shape errors carry the path of the offending field (`tempo.bpmGlobal`,
//! `lyrics[3].end`) so callers can point at the broken part of the analysis
//! result. Every error maps to a stable machine-readable [`ErrorCode`].
//!
//! ## Error Types
//! - `InvalidInputShape` - required field missing or of the wrong type
//! - `InvalidOptions` - adapter option out of range
//! - `InvalidHierarchy` - assembled output failed validation
//! - `Config` - YAML options document could not be parsed
//! - `Json` - input text is not JSON
//! - `Io` - file handling in the command-line tool
//!
//! ## Usage
//! ```rust
//! use songmap::{adapt_json, AdaptOptions, ErrorCode};
//!
//! let err = adapt_json(r#"{"id": "x"}"#, &AdaptOptions::default()).unwrap_err();
//! assert_eq!(err.code(), ErrorCode::InvalidInputShape);
//! ```

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SongMapError {
    /// Required top-level field missing or mistyped.
    ///
    /// Raised before any transformation step runs.
    ///
    /// # Example
    /// ```
    /// # use songmap::SongMapError;
    /// let err = SongMapError::InvalidInputShape {
    ///     field: "tempo.bpmGlobal".to_string(),
    ///     message: "expected a number".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Invalid input shape at 'tempo.bpmGlobal': expected a number");
    /// ```
    #[error("Invalid input shape at '{field}': {message}")]
    InvalidInputShape { field: String, message: String },

    /// An adapter option is out of range.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// The assembled hierarchy failed validation.
    #[error("Invalid hierarchy: {0}")]
    InvalidHierarchy(String),

    /// Invalid YAML options document.
    ///
    /// # Example
    /// ```
    /// # use songmap::SongMapError;
    /// let err = SongMapError::Config("unknown field `gap`".to_string());
    /// assert_eq!(err.to_string(), "Invalid config: unknown field `gap`");
    /// ```
    #[error("Invalid config: {0}")]
    Config(String),

    #[error("Invalid JSON: {0}")]
    Json(String),

    #[error("I/O error on '{path}': {message}")]
    Io { path: String, message: String },
}

/// Machine-readable error code, stable across releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidInputShape,
    InvalidOptions,
    InvalidHierarchy,
    InvalidConfig,
    InvalidJson,
    Io,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidInputShape => "INVALID_INPUT_SHAPE",
            ErrorCode::InvalidOptions => "INVALID_OPTIONS",
            ErrorCode::InvalidHierarchy => "INVALID_HIERARCHY",
            ErrorCode::InvalidConfig => "INVALID_CONFIG",
            ErrorCode::InvalidJson => "INVALID_JSON",
            ErrorCode::Io => "IO",
        }
    }
}

impl SongMapError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SongMapError::InvalidInputShape { .. } => ErrorCode::InvalidInputShape,
            SongMapError::InvalidOptions(_) => ErrorCode::InvalidOptions,
            SongMapError::InvalidHierarchy(_) => ErrorCode::InvalidHierarchy,
            SongMapError::Config(_) => ErrorCode::InvalidConfig,
            SongMapError::Json(_) => ErrorCode::InvalidJson,
            SongMapError::Io { .. } => ErrorCode::Io,
        }
    }

    pub(crate) fn shape(field: impl Into<String>, message: impl Into<String>) -> Self {
        SongMapError::InvalidInputShape {
            field: field.into(),
            message: message.into(),
        }
    }
}
