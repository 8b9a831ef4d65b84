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

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{Result, ZiError};
use crate::operator::ZiOperator;
use crate::operators::filter::ZiFieldPath;
use crate::operators::transform::ZiTransform;
use crate::record::{ZiRecord, ZiRecordBatch};

/// Projects records onto an ordered list of fields.
///
/// Output keys are the field references exactly as listed, so `user.name`
/// stays `user.name`. Every output record has exactly the listed keys; a
/// missing source field yields null.
#[derive(Debug)]
pub struct ZiFieldSelect {
    fields: Vec<ZiFieldPath>,
}

impl ZiFieldSelect {
    pub fn new(fields: Vec<ZiFieldPath>) -> Self {
        Self { fields }
    }

    pub fn parse<I, S>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let fields = fields
            .into_iter()
            .map(|field| ZiFieldPath::parse(field.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::unique(fields)
    }

    /// Rejects a list naming the same field twice.
    fn unique(fields: Vec<ZiFieldPath>) -> Result<Self> {
        for (index, path) in fields.iter().enumerate() {
            if fields[..index].iter().any(|seen| seen.as_str() == path.as_str()) {
                return Err(ZiError::validation(format!(
                    "field '{}' is listed more than once",
                    path.as_str()
                )));
            }
        }
        Ok(Self::new(fields))
    }

    fn project(&self, record: &ZiRecord) -> ZiRecord {
        let mut out = Map::with_capacity(self.fields.len());
        for path in &self.fields {
            let value = path.resolve(record).cloned().unwrap_or(Value::Null);
            out.insert(path.as_str().to_string(), value);
        }
        ZiRecord::from_fields(out)
    }
}

impl ZiOperator for ZiFieldSelect {
    fn name(&self) -> &'static str {
        "field.select"
    }

    fn apply(&self, batch: ZiRecordBatch) -> Result<ZiRecordBatch> {
        Ok(batch.iter().map(|record| self.project(record)).collect())
    }
}

/// Returns a projected copy of `records`.
pub fn select_fields(records: &[ZiRecord], fields: &[String]) -> Result<ZiRecordBatch> {
    let select = ZiFieldSelect::parse(fields)?;
    Ok(records.iter().map(|record| select.project(record)).collect())
}

pub fn field_select_factory(config: &Value) -> Result<Box<dyn ZiOperator + Send + Sync>> {
    let obj = config
        .as_object()
        .ok_or_else(|| ZiError::validation("field.select config must be object"))?;

    let fields = obj
        .get("fields")
        .and_then(Value::as_array)
        .ok_or_else(|| ZiError::validation("field.select requires array 'fields'"))?
        .iter()
        .map(|v| {
            v.as_str()
                .ok_or_else(|| ZiError::validation("fields must be strings"))
                .and_then(ZiFieldPath::parse)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Box::new(ZiFieldSelect::unique(fields)?))
}

/// Output name and optional transform for one mapped source field.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ZiFieldDescriptor {
    #[serde(default, alias = "displayName", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<ZiTransform>,
}

impl ZiFieldDescriptor {
    pub fn named(display_name: impl Into<String>) -> Self {
        Self {
            display_name: Some(display_name.into()),
            transform: None,
        }
    }

    pub fn with_transform(mut self, transform: ZiTransform) -> Self {
        self.transform = Some(transform);
        self
    }
}

/// Ordered rename + transform table.
///
/// It is an allow-list: fields not mentioned are dropped from the output.
/// In configuration documents each entry is either a display name string
/// or a `{"display_name": ..., "transform": {...}}` object.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct ZiFieldMapping {
    entries: Vec<(ZiFieldPath, ZiFieldDescriptor)>,
}

impl ZiFieldMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry. Fails on an empty source path or an output name
    /// already produced by an earlier entry.
    pub fn field(mut self, source: &str, descriptor: ZiFieldDescriptor) -> Result<Self> {
        let path = ZiFieldPath::parse(source)?;
        let name = output_name(&path, &descriptor);
        if self
            .entries
            .iter()
            .any(|(seen, existing)| output_name(seen, existing) == name)
        {
            return Err(ZiError::validation(format!(
                "output column '{name}' is mapped more than once"
            )));
        }
        self.entries.push((path, descriptor));
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ZiFieldPath, &ZiFieldDescriptor)> {
        self.entries.iter().map(|(path, descriptor)| (path, descriptor))
    }

    /// Output column names in declaration order.
    pub fn display_names(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(path, descriptor)| output_name(path, descriptor))
            .collect()
    }

    /// Maps one record. Transform failures propagate unchanged.
    pub fn apply_to(&self, record: &ZiRecord) -> Result<ZiRecord> {
        let mut out = Map::with_capacity(self.entries.len());
        for (path, descriptor) in &self.entries {
            let source = path.resolve(record);
            let value = match &descriptor.transform {
                Some(transform) => transform.apply(path.as_str(), source, record)?,
                None => source.cloned().unwrap_or(Value::Null),
            };
            out.insert(output_name(path, descriptor), value);
        }
        Ok(ZiRecord::from_fields(out))
    }
}

fn output_name(path: &ZiFieldPath, descriptor: &ZiFieldDescriptor) -> String {
    descriptor
        .display_name
        .clone()
        .unwrap_or_else(|| path.as_str().to_string())
}

impl TryFrom<Map<String, Value>> for ZiFieldMapping {
    type Error = ZiError;

    fn try_from(raw: Map<String, Value>) -> Result<Self> {
        let mut mapping = Self::new();
        for (source, entry) in raw {
            let descriptor = match entry {
                Value::String(name) => ZiFieldDescriptor::named(name),
                Value::Null => ZiFieldDescriptor::default(),
                other => serde_json::from_value(other).map_err(|err| {
                    ZiError::validation(format!("invalid mapping for field '{source}': {err}"))
                })?,
            };
            mapping = mapping.field(&source, descriptor)?;
        }
        Ok(mapping)
    }
}

impl From<ZiFieldMapping> for Map<String, Value> {
    fn from(mapping: ZiFieldMapping) -> Self {
        mapping
            .entries
            .into_iter()
            .map(|(path, descriptor)| {
                let value = serde_json::to_value(&descriptor).unwrap_or(Value::Null);
                (String::from(path), value)
            })
            .collect()
    }
}

/// Applies a [`ZiFieldMapping`] to every record.
#[derive(Debug)]
pub struct ZiCustomMapping {
    mapping: ZiFieldMapping,
}

impl ZiCustomMapping {
    pub fn new(mapping: ZiFieldMapping) -> Self {
        Self { mapping }
    }
}

impl ZiOperator for ZiCustomMapping {
    fn name(&self) -> &'static str {
        "field.map"
    }

    fn apply(&self, batch: ZiRecordBatch) -> Result<ZiRecordBatch> {
        batch
            .iter()
            .map(|record| self.mapping.apply_to(record))
            .collect()
    }
}

/// Returns a mapped copy of `records`.
pub fn apply_custom_mapping(records: &[ZiRecord], mapping: &ZiFieldMapping) -> Result<ZiRecordBatch> {
    records.iter().map(|record| mapping.apply_to(record)).collect()
}

/// Factory that constructs [`ZiCustomMapping`] from `{"mapping": {...}}`.
pub fn field_map_factory(config: &Value) -> Result<Box<dyn ZiOperator + Send + Sync>> {
    let raw = config
        .get("mapping")
        .and_then(Value::as_object)
        .cloned()
        .ok_or_else(|| ZiError::validation("field.map requires object 'mapping'"))?;

    Ok(Box::new(ZiCustomMapping::new(ZiFieldMapping::try_from(raw)?)))
}
