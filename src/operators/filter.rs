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

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::errors::{Result, ZiError};
use crate::operator::ZiOperator;
use crate::record::{coerce_number, display_value, values_equal, ZiRecord, ZiRecordBatch};

/// Sentinel used by dashboard select boxes for "no filter".
pub const ZI_FILTER_ALL_SENTINEL: &str = "ALL";

/// Dotted reference to a record field, parsed once.
///
/// `"user.name"` first matches a literal `user.name` key (records that were
/// flattened upstream), then descends into the nested `user` object.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ZiFieldPath {
    raw: String,
    segments: Vec<String>,
}

impl ZiFieldPath {
    pub fn parse(path: &str) -> Result<Self> {
        let raw = path.trim();
        let segments: Vec<String> = raw
            .split('.')
            .map(|segment| segment.trim().to_string())
            .filter(|segment| !segment.is_empty())
            .collect();

        if segments.is_empty() {
            return Err(ZiError::validation("field path may not be empty"));
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn resolve<'a>(&self, record: &'a ZiRecord) -> Option<&'a Value> {
        if let Some(value) = record.get(&self.raw) {
            return Some(value);
        }

        let mut segments = self.segments.iter();
        let mut current = record.get(segments.next()?)?;
        for segment in segments {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                _ => return None,
            };
        }
        Some(current)
    }
}

impl fmt::Display for ZiFieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl TryFrom<String> for ZiFieldPath {
    type Error = ZiError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<ZiFieldPath> for String {
    fn from(path: ZiFieldPath) -> Self {
        path.raw
    }
}

/// One filter condition on a single field.
///
/// Configuration documents describe filters by the shape of their value:
/// `{"min": 10, "max": 20}` is a range, `["a", "b"]` a membership test, a
/// string a case-insensitive substring match, anything else exact equality.
/// The same shape is produced when a spec is echoed back into metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub enum ZiFilterSpec {
    Exact(Value),
    Substring(String),
    Range { min: Option<f64>, max: Option<f64> },
    OneOf(Vec<Value>),
}

impl ZiFilterSpec {
    pub fn exact(value: impl Into<Value>) -> Self {
        Self::Exact(value.into())
    }

    pub fn substring(text: impl Into<String>) -> Self {
        Self::Substring(text.into())
    }

    pub fn range(min: Option<f64>, max: Option<f64>) -> Self {
        Self::Range { min, max }
    }

    pub fn one_of<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::OneOf(values.into_iter().map(Into::into).collect())
    }

    /// Interprets a raw filter value by its shape.
    ///
    /// Returns `None` for values meaning "no constraint": null, the empty
    /// string, the `"ALL"` sentinel and the empty list.
    pub fn from_raw(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(text) if text.is_empty() || text == ZI_FILTER_ALL_SENTINEL => None,
            Value::String(text) => Some(Self::Substring(text.clone())),
            Value::Array(items) if items.is_empty() => None,
            Value::Array(items) => Some(Self::OneOf(items.clone())),
            Value::Object(map) if map.contains_key("min") || map.contains_key("max") => {
                let min = map.get("min").and_then(coerce_bound);
                let max = map.get("max").and_then(coerce_bound);
                if min.is_none() && max.is_none() {
                    None
                } else {
                    Some(Self::Range { min, max })
                }
            }
            other => Some(Self::Exact(other.clone())),
        }
    }

    /// Tests a resolved field value. Missing and null values fail every filter.
    pub fn matches(&self, value: Option<&Value>) -> bool {
        let value = match value {
            None | Some(Value::Null) => return false,
            Some(value) => value,
        };

        match self {
            Self::Exact(expected) => values_equal(value, expected),
            Self::Substring(needle) => display_value(value)
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            Self::Range { min, max } => match coerce_number(value) {
                Some(number) => {
                    min.map_or(true, |bound| number >= bound)
                        && max.map_or(true, |bound| number <= bound)
                }
                None => false,
            },
            Self::OneOf(options) => options.iter().any(|option| values_equal(value, option)),
        }
    }

    /// Echo of the spec as it would appear in a configuration document.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Exact(value) => value.clone(),
            Self::Substring(text) => Value::String(text.clone()),
            Self::OneOf(items) => Value::Array(items.clone()),
            Self::Range { min, max } => {
                let mut map = Map::new();
                if let Some(min) = min {
                    map.insert("min".into(), bound_value(*min));
                }
                if let Some(max) = max {
                    map.insert("max".into(), bound_value(*max));
                }
                Value::Object(map)
            }
        }
    }
}

/// Integral bounds echo as integers, so `{"min": 60}` stays `{"min": 60}`.
fn bound_value(bound: f64) -> Value {
    if bound.fract() == 0.0 && bound.abs() < i64::MAX as f64 {
        Value::from(bound as i64)
    } else {
        Number::from_f64(bound).map_or(Value::Null, Value::Number)
    }
}

fn coerce_bound(value: &Value) -> Option<f64> {
    match value {
        Value::Null => None,
        Value::String(text) if text.trim().is_empty() => None,
        other => coerce_number(other),
    }
}

impl TryFrom<Value> for ZiFilterSpec {
    type Error = ZiError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_raw(&value)
            .ok_or_else(|| ZiError::validation("filter value may not be empty"))
    }
}

impl From<ZiFilterSpec> for Value {
    fn from(spec: ZiFilterSpec) -> Self {
        spec.to_value()
    }
}

/// Ordered collection of per-field filters combined with logical AND.
///
/// Only real constraints live in a set: "no filter" entries are dropped
/// when the set is built from raw values, so `len()` is the number of
/// applied filters.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct ZiFilterSet {
    entries: Vec<(ZiFieldPath, ZiFilterSpec)>,
}

impl ZiFilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from raw dashboard filter values, skipping empty ones.
    pub fn from_raw(raw: &Map<String, Value>) -> Result<Self> {
        let mut set = Self::new();
        for (field, value) in raw {
            if let Some(spec) = ZiFilterSpec::from_raw(value) {
                set.insert(field, spec)?;
            }
        }
        Ok(set)
    }

    /// Builder-style insertion.
    pub fn with(mut self, field: &str, spec: ZiFilterSpec) -> Result<Self> {
        self.insert(field, spec)?;
        Ok(self)
    }

    /// Adds a filter, replacing any earlier filter on the same field.
    pub fn insert(&mut self, field: &str, spec: ZiFilterSpec) -> Result<()> {
        let path = ZiFieldPath::parse(field)?;
        match self.entries.iter_mut().find(|(existing, _)| *existing == path) {
            Some(entry) => entry.1 = spec,
            None => self.entries.push((path, spec)),
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ZiFieldPath, &ZiFilterSpec)> {
        self.entries.iter().map(|(path, spec)| (path, spec))
    }

    /// True when the record satisfies every filter in the set.
    pub fn matches(&self, record: &ZiRecord) -> bool {
        self.entries
            .iter()
            .all(|(path, spec)| spec.matches(path.resolve(record)))
    }

    /// Echo of the active filters, keyed by field.
    pub fn to_map(&self) -> Map<String, Value> {
        self.entries
            .iter()
            .map(|(path, spec)| (path.as_str().to_string(), spec.to_value()))
            .collect()
    }
}

impl TryFrom<Map<String, Value>> for ZiFilterSet {
    type Error = ZiError;

    fn try_from(raw: Map<String, Value>) -> Result<Self> {
        Self::from_raw(&raw)
    }
}

impl From<ZiFilterSet> for Map<String, Value> {
    fn from(set: ZiFilterSet) -> Self {
        set.to_map()
    }
}

/// Keeps records that satisfy every filter of a [`ZiFilterSet`].
#[derive(Debug)]
pub struct ZiFilter {
    filters: ZiFilterSet,
}

impl ZiFilter {
    pub fn new(filters: ZiFilterSet) -> Self {
        Self { filters }
    }

    pub fn filters(&self) -> &ZiFilterSet {
        &self.filters
    }
}

impl ZiOperator for ZiFilter {
    fn name(&self) -> &'static str {
        "filter"
    }

    fn apply(&self, batch: ZiRecordBatch) -> Result<ZiRecordBatch> {
        if self.filters.is_empty() {
            return Ok(batch);
        }
        Ok(batch
            .into_iter()
            .filter(|record| self.filters.matches(record))
            .collect())
    }
}

/// Returns the records of `records` that pass `filters`, leaving the input untouched.
pub fn apply_filters(records: &[ZiRecord], filters: &ZiFilterSet) -> ZiRecordBatch {
    records
        .iter()
        .filter(|record| filters.matches(record))
        .cloned()
        .collect()
}

/// Factory that constructs [`ZiFilter`] from JSON configuration.
///
/// Expects `{"filters": {"field": <raw filter value>, ...}}`.
pub fn filter_factory(config: &Value) -> Result<Box<dyn ZiOperator + Send + Sync>> {
    let obj = config
        .as_object()
        .ok_or_else(|| ZiError::validation("filter config must be object"))?;

    let raw = obj
        .get("filters")
        .and_then(Value::as_object)
        .ok_or_else(|| ZiError::validation("filter requires object 'filters'"))?;

    Ok(Box::new(ZiFilter::new(ZiFilterSet::from_raw(raw)?)))
}
