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

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{Result, ZiError};
use crate::operator::ZiOperator;
use crate::operators::filter::ZiFieldPath;
use crate::record::{display_value, ZiRecord, ZiRecordBatch};

/// Sort direction. Ascending unless stated otherwise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZiSortOrder {
    #[default]
    Asc,
    Desc,
}

impl ZiSortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZiSortOrder::Asc => "asc",
            ZiSortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for ZiSortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparable form of one non-null sort value.
///
/// Kinds rank numbers first, then dates, then text, so values of different
/// kinds never compare through their display text.
#[derive(Clone, Debug, PartialEq)]
pub enum ZiSortKey {
    /// JSON numbers and strings holding a finite number.
    Number(f64),
    /// Date-like strings, as milliseconds since the epoch.
    Timestamp(i64),
    /// Everything else, compared by display text.
    Text(String),
}

impl ZiSortKey {
    /// Classifies a value; `None` for null.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Number(number) => Some(match number.as_f64() {
                Some(n) => ZiSortKey::Number(n),
                None => ZiSortKey::Text(number.to_string()),
            }),
            Value::String(text) => Some(
                numeric_text(text)
                    .map(ZiSortKey::Number)
                    .or_else(|| parse_timestamp(text).map(ZiSortKey::Timestamp))
                    .unwrap_or_else(|| ZiSortKey::Text(text.clone())),
            ),
            other => Some(ZiSortKey::Text(display_value(other))),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            ZiSortKey::Number(_) => 0,
            ZiSortKey::Timestamp(_) => 1,
            ZiSortKey::Text(_) => 2,
        }
    }
}

impl Eq for ZiSortKey {}

impl PartialOrd for ZiSortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ZiSortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (ZiSortKey::Number(a), ZiSortKey::Number(b)) => a.total_cmp(b),
            (ZiSortKey::Timestamp(a), ZiSortKey::Timestamp(b)) => a.cmp(b),
            (ZiSortKey::Text(a), ZiSortKey::Text(b)) => collate(a, b),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

/// Stable sort of a batch on one field.
///
/// Records whose field is missing or null always go last, whatever the
/// direction, and keep their relative order.
#[derive(Debug)]
pub struct ZiSort {
    path: ZiFieldPath,
    order: ZiSortOrder,
}

impl ZiSort {
    pub fn new(path: ZiFieldPath, order: ZiSortOrder) -> Self {
        Self { path, order }
    }

    fn key(&self, record: &ZiRecord) -> Option<ZiSortKey> {
        self.path.resolve(record).and_then(ZiSortKey::from_value)
    }

    fn compare(&self, left: Option<&ZiSortKey>, right: Option<&ZiSortKey>) -> Ordering {
        match (left, right) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => match self.order {
                ZiSortOrder::Asc => a.cmp(b),
                ZiSortOrder::Desc => b.cmp(a),
            },
        }
    }

    fn sort(&self, batch: ZiRecordBatch) -> ZiRecordBatch {
        let mut keyed: Vec<(Option<ZiSortKey>, ZiRecord)> = batch
            .into_iter()
            .map(|record| (self.key(&record), record))
            .collect();
        keyed.sort_by(|a, b| self.compare(a.0.as_ref(), b.0.as_ref()));
        keyed.into_iter().map(|(_, record)| record).collect()
    }
}

impl ZiOperator for ZiSort {
    fn name(&self) -> &'static str {
        "sort"
    }

    fn apply(&self, batch: ZiRecordBatch) -> Result<ZiRecordBatch> {
        Ok(self.sort(batch))
    }
}

/// Returns a sorted copy of `records`; the input is left untouched.
pub fn apply_sorting(records: &[ZiRecord], field: &ZiFieldPath, order: ZiSortOrder) -> ZiRecordBatch {
    ZiSort::new(field.clone(), order).sort(records.to_vec())
}

/// Orders two non-null values through their [`ZiSortKey`].
///
/// Numbers (including numeric strings) compare numerically, dates (RFC 3339
/// or ISO date strings) by timestamp, other values by case-insensitive text.
/// Across kinds, numbers precede dates and dates precede text. Null sorts
/// after everything.
pub fn compare_values(left: &Value, right: &Value) -> Ordering {
    match (ZiSortKey::from_value(left), ZiSortKey::from_value(right)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (a, b) => a.is_none().cmp(&b.is_none()),
    }
}

/// Finite number held by a string such as `"150"` or `" 7.5 "`.
fn numeric_text(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Case-insensitive ordering; lowercase sorts before uppercase on ties.
fn collate(left: &str, right: &str) -> Ordering {
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        .then_with(|| right.cmp(left))
}

/// Milliseconds since the epoch for strings that look like dates.
pub(crate) fn parse_timestamp(text: &str) -> Option<i64> {
    let text = text.trim();
    // Cheap shape check before trying the parsers.
    if text.len() < 10 || !text.as_bytes().get(4).is_some_and(|b| *b == b'-') {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.timestamp_millis());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
            return Some(parsed.and_utc().timestamp_millis());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.and_utc().timestamp_millis())
}

/// Factory that constructs [`ZiSort`] from JSON configuration.
///
/// Expects `{"path": "amount", "order": "desc"}`; `order` defaults to `asc`.
pub fn sort_factory(config: &Value) -> Result<Box<dyn ZiOperator + Send + Sync>> {
    let obj = config
        .as_object()
        .ok_or_else(|| ZiError::validation("sort config must be object"))?;

    let path = obj
        .get("path")
        .and_then(Value::as_str)
        .ok_or_else(|| ZiError::validation("sort requires string 'path'"))?;

    let order = match obj.get("order") {
        Some(value) => serde_json::from_value(value.clone())
            .map_err(|_| ZiError::validation("sort 'order' must be 'asc' or 'desc'"))?,
        None => ZiSortOrder::default(),
    };

    Ok(Box::new(ZiSort::new(ZiFieldPath::parse(path)?, order)))
}
