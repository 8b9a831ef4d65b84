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

//! # Zi Record Module
//!
//! This module provides the data structure for one exportable item (a user,
//! an order, a payment, ...). A ZiRecord is an ordered mapping from field
//! name to a JSON value, so heterogeneous values (strings, numbers, booleans,
//! null, nested objects and arrays) fit without a schema.
//!
//! ## Design Principles
//!
//! - **Ordered**: Field order is insertion order. The first record's field
//!   order becomes the CSV header and the spreadsheet column order.
//! - **Homogeneity is assumed, not enforced**: Records in one batch usually
//!   share a field set, but missing fields simply resolve to null downstream.
//! - **Immutability-friendly**: Operators consume batches by value and return
//!   new batches; the caller's slice is never modified.
//!
//! ## Usage Example
//!
//! ```rust
//! use ziexport::record::ZiRecord;
//! use serde_json::json;
//!
//! let record = ZiRecord::from_value(json!({"name": "Alice", "amount": 100})).unwrap();
//! assert_eq!(record.get("name"), Some(&json!("Alice")));
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{Result, ZiError};

/// Ordered field map backing a record.
pub type ZiFields = Map<String, Value>;

/// Fundamental data unit processed by the export operators.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZiRecord {
    fields: ZiFields,
}

impl ZiRecord {
    /// Constructs an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing field map.
    pub fn from_fields(fields: ZiFields) -> Self {
        Self { fields }
    }

    /// Builds a record from a JSON object.
    ///
    /// Any other JSON shape is a validation error.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(ZiError::validation(format!(
                "record must be a JSON object, got {}",
                value_kind(&other)
            ))),
        }
    }

    /// Builds a batch from a JSON array of objects.
    ///
    /// This is the boundary check for data arriving from a REST response:
    /// a non-array document is rejected before any stage runs.
    pub fn batch_from_value(value: Value) -> Result<ZiRecordBatch> {
        match value {
            Value::Array(items) => items.into_iter().map(Self::from_value).collect(),
            other => Err(ZiError::validation(format!(
                "export data must be an array of records, got {}",
                value_kind(&other)
            ))),
        }
    }

    /// Parses a batch from JSON text.
    pub fn batch_from_json_str(text: &str) -> Result<ZiRecordBatch> {
        let value: Value = serde_json::from_str(text)?;
        Self::batch_from_value(value)
    }

    /// Builder-style field insertion.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Inserts or replaces a field, keeping the original position on replace.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.fields.insert(key.into(), value)
    }

    /// Returns the value stored under the literal key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Iterates over field names in order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.fields.keys()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &ZiFields {
        &self.fields
    }

    /// Converts the record into a JSON object value.
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

impl From<ZiFields> for ZiRecord {
    fn from(fields: ZiFields) -> Self {
        Self::from_fields(fields)
    }
}

/// Convenience alias for working on batches of records.
pub type ZiRecordBatch = Vec<ZiRecord>;

/// Renders a field value as display text for CSV cells, spreadsheet cells
/// and substring matching.
///
/// Null renders as the empty string, never as `"null"`.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::Array(items) if items.iter().all(is_primitive) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(","),
        compound => compound.to_string(),
    }
}

/// Coerces a value to a number for range tests and numeric transforms.
///
/// Numbers pass through, numeric strings are parsed (blank strings count as
/// zero), booleans map to 1/0. Everything else has no numeric reading.
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                Some(0.0)
            } else {
                trimmed.parse::<f64>().ok().filter(|n| !n.is_nan())
            }
        }
        Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Structural equality that compares numbers by value, so `100` equals `100.0`.
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => a == b,
        },
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_equal(x, y))
        }
        _ => left == right,
    }
}

fn is_primitive(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
