//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Zi Export.
//! The Zi Export project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Zi Export Error Module
//!
//! This module defines the error type shared by every stage of the export
//! pipeline, from option parsing to the serializers.
//!
//! ## Error Categories
//!
//! - **Validation**: The record batch is empty or malformed ("No data to export")
//! - **UnsupportedFormat**: The requested output format is unknown or disabled
//! - **Transform**: A field transform rejected its input value
//! - **Operator**: Failures in operator implementations
//! - **Pipeline**: Pipeline construction or orchestration failures
//! - **Io**: Filesystem errors while writing artifacts or reading config
//! - **Serde**: JSON/YAML/CSV serialization errors
//! - **Spreadsheet**: Workbook generation errors
//! - **Cancelled**: A chunked export was cancelled between chunks
//! - **Internal**: Unexpected internal failures
//!
//! All errors are returned synchronously; nothing in the pipeline retries.
//! An export is a one-shot operation that the caller may simply trigger again.
//!
//! ## Usage
//!
//! ```rust
//! use ziexport::errors::{Result, ZiError};
//!
//! fn ensure_rows(count: usize) -> Result<()> {
//!     if count == 0 {
//!         return Err(ZiError::validation("No data to export"));
//!     }
//!     Ok(())
//! }
//! ```

use std::io;

use thiserror::Error;

/// Convenience result type used throughout Zi Export.
pub type Result<T> = std::result::Result<T, ZiError>;

/// Canonical error enumeration for Zi Export.
#[derive(Debug, Error)]
pub enum ZiError {
    /// Errors originating from filesystem IO.
    #[error("io error: {0}")]
    Io(String),

    /// Validation errors triggered by invalid inputs.
    ///
    /// Displays the bare message so callers can surface it to users as-is.
    #[error("{message}")]
    Validation { message: String },

    /// The requested output format is not one of `csv`, `excel` or `json`,
    /// or its support was compiled out.
    #[error("unsupported export format '{format}'")]
    UnsupportedFormat { format: String },

    /// A field transform failed. Never swallowed by the pipeline.
    #[error("transform for field '{field}' failed: {message}")]
    Transform { field: String, message: String },

    /// Any other failure raised by an operator implementation.
    #[error("operator '{operator}' failed: {message}")]
    Operator { operator: String, message: String },

    /// Failures that occur while building or running a pipeline.
    #[error("pipeline error at stage '{stage}': {message}")]
    Pipeline { stage: String, message: String },

    /// Wrapper for serialization issues (JSON, YAML, CSV).
    #[error("serialization error: {0}")]
    Serde(String),

    /// Errors raised while building a spreadsheet workbook.
    #[error("spreadsheet error: {0}")]
    Spreadsheet(String),

    /// The export was cancelled before completion.
    #[error("export cancelled")]
    Cancelled,

    /// Catch-all variant for unexpected situations.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<io::Error> for ZiError {
    fn from(err: io::Error) -> Self {
        ZiError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ZiError {
    fn from(err: serde_json::Error) -> Self {
        ZiError::Serde(err.to_string())
    }
}

impl From<serde_yaml::Error> for ZiError {
    fn from(err: serde_yaml::Error) -> Self {
        ZiError::Serde(err.to_string())
    }
}

impl From<csv::Error> for ZiError {
    fn from(err: csv::Error) -> Self {
        ZiError::Serde(format!("csv: {}", err))
    }
}

#[cfg(feature = "excel")]
impl From<rust_xlsxwriter::XlsxError> for ZiError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ZiError::Spreadsheet(err.to_string())
    }
}

impl ZiError {
    /// Helper to construct simple validation errors.
    pub fn validation<T: Into<String>>(message: T) -> Self {
        ZiError::Validation {
            message: message.into(),
        }
    }

    /// Helper to construct unsupported format errors.
    pub fn unsupported_format<T: Into<String>>(format: T) -> Self {
        ZiError::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// Helper to construct transform errors.
    pub fn transform(field: impl Into<String>, message: impl Into<String>) -> Self {
        ZiError::Transform {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Helper to construct operator errors.
    pub fn operator(name: impl Into<String>, message: impl Into<String>) -> Self {
        ZiError::Operator {
            operator: name.into(),
            message: message.into(),
        }
    }

    /// Helper to construct pipeline errors.
    pub fn pipeline(stage: impl Into<String>, message: impl Into<String>) -> Self {
        ZiError::Pipeline {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// Helper to construct internal errors.
    pub fn internal<T: Into<String>>(message: T) -> Self {
        ZiError::Internal(message.into())
    }

    /// True for the "No data to export" family of validation errors.
    pub fn is_validation(&self) -> bool {
        matches!(self, ZiError::Validation { .. })
    }
}
