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

//! # Zi Operator Module
//!
//! This module defines the operator trait behind every export stage. An
//! operator receives a batch of records by value and returns a new batch:
//! filtering drops records, sorting reorders them, limiting truncates and
//! projection reshapes each record.
//!
//! ## Implementing Custom Operators
//!
//! ```rust
//! use ziexport::operator::ZiOperator;
//! use ziexport::record::ZiRecordBatch;
//! use ziexport::errors::Result;
//!
//! #[derive(Debug)]
//! struct Reverse;
//!
//! impl ZiOperator for Reverse {
//!     fn name(&self) -> &'static str {
//!         "reverse"
//!     }
//!
//!     fn apply(&self, mut batch: ZiRecordBatch) -> Result<ZiRecordBatch> {
//!         batch.reverse();
//!         Ok(batch)
//!     }
//! }
//! ```

use crate::errors::{Result, ZiError};
use crate::record::ZiRecordBatch;

/// Contracts that every export operator must fulfill.
///
/// Operators are stateless and deterministic: the same batch always yields
/// the same output, which is what makes two identical exports byte-identical.
pub trait ZiOperator: std::fmt::Debug {
    /// Unique, human-readable name used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Applies the operator to an incoming batch of records.
    fn apply(&self, batch: ZiRecordBatch) -> Result<ZiRecordBatch>;
}

/// Executes an operator while normalizing errors.
///
/// Generic failures are tagged with the operator name. Transform, validation
/// and cancellation errors pass through unchanged so callers can match on
/// them directly.
pub fn execute_operator(operator: &dyn ZiOperator, batch: ZiRecordBatch) -> Result<ZiRecordBatch> {
    operator.apply(batch).map_err(|err| match err {
        ZiError::Transform { .. } | ZiError::Validation { .. } | ZiError::Cancelled => err,
        other => ZiError::operator(operator.name(), other.to_string()),
    })
}
