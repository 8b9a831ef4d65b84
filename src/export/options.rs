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

//! # Export Options
//!
//! The declarative configuration of one export call. Options are built in
//! code with the `with_*` methods or loaded from JSON/YAML documents such as:
//!
//! ```yaml
//! format: excel
//! kind: orders
//! filters:
//!   status: completed
//!   totalAmount: { min: 100 }
//! sort_by: createdAt
//! sort_order: desc
//! limit: 500
//! include_summary: true
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{Result, ZiError};
use crate::operators::field::ZiFieldMapping;
use crate::operators::filter::{ZiFilterSet, ZiFilterSpec};
use crate::operators::sort::ZiSortOrder;
use crate::presets::ZiRecordKind;

/// Supported output formats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ZiExportFormat {
    /// Comma-separated values with a header row.
    #[default]
    Csv,
    /// Excel-compatible XLSX workbook.
    Excel,
    /// Pretty-printed JSON, optionally wrapped in a metadata envelope.
    Json,
}

impl ZiExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZiExportFormat::Csv => "csv",
            ZiExportFormat::Excel => "excel",
            ZiExportFormat::Json => "json",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ZiExportFormat::Csv => "csv",
            ZiExportFormat::Excel => "xlsx",
            ZiExportFormat::Json => "json",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ZiExportFormat::Csv => "text/csv",
            ZiExportFormat::Excel => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ZiExportFormat::Json => "application/json",
        }
    }

    /// Fails when the format's serializer was compiled out.
    pub fn ensure_available(&self) -> Result<()> {
        if *self == ZiExportFormat::Excel && !cfg!(feature = "excel") {
            return Err(ZiError::unsupported_format(self.as_str()));
        }
        Ok(())
    }
}

impl fmt::Display for ZiExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZiExportFormat {
    type Err = ZiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ZiExportFormat::Csv),
            "excel" | "xlsx" => Ok(ZiExportFormat::Excel),
            "json" => Ok(ZiExportFormat::Json),
            _ => Err(ZiError::unsupported_format(s)),
        }
    }
}

impl TryFrom<String> for ZiExportFormat {
    type Error = ZiError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ZiExportFormat> for String {
    fn from(format: ZiExportFormat) -> Self {
        format.as_str().to_string()
    }
}

/// Configuration of a single export invocation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZiExportOptions {
    pub format: ZiExportFormat,
    /// Record family; names the data sheet and the default filename prefix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ZiRecordKind>,
    pub filters: ZiFilterSet,
    #[serde(alias = "sortBy", skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(alias = "sortOrder")]
    pub sort_order: ZiSortOrder,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(alias = "customMapping", skip_serializing_if = "Option::is_none")]
    pub custom_mapping: Option<ZiFieldMapping>,
    #[serde(alias = "includeSummary")]
    pub include_summary: bool,
    #[serde(alias = "includeMetadata")]
    pub include_metadata: bool,
    #[serde(alias = "includeFilters")]
    pub include_filters: bool,
    #[serde(alias = "filenamePrefix", skip_serializing_if = "Option::is_none")]
    pub filename_prefix: Option<String>,
}

impl ZiExportOptions {
    pub fn new(format: ZiExportFormat) -> Self {
        Self {
            format,
            ..Default::default()
        }
    }

    /// Options for a record kind with its predefined mapping applied.
    pub fn for_kind(kind: ZiRecordKind, format: ZiExportFormat) -> Self {
        Self {
            format,
            kind: Some(kind),
            custom_mapping: Some(kind.default_mapping()),
            ..Default::default()
        }
    }

    pub fn with_filter(mut self, field: &str, spec: ZiFilterSpec) -> Result<Self> {
        self.filters.insert(field, spec)?;
        Ok(self)
    }

    pub fn with_filters(mut self, filters: ZiFilterSet) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_sort(mut self, field: impl Into<String>, order: ZiSortOrder) -> Self {
        self.sort_by = Some(field.into());
        self.sort_order = order;
        self
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_custom_mapping(mut self, mapping: ZiFieldMapping) -> Self {
        self.custom_mapping = Some(mapping);
        self
    }

    pub fn with_kind(mut self, kind: ZiRecordKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_summary(mut self, include: bool) -> Self {
        self.include_summary = include;
        self
    }

    pub fn with_metadata(mut self, include: bool) -> Self {
        self.include_metadata = include;
        self
    }

    pub fn with_filters_echo(mut self, include: bool) -> Self {
        self.include_filters = include;
        self
    }

    pub fn with_filename_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.filename_prefix = Some(prefix.into());
        self
    }

    /// True when any summary or metadata section was requested.
    pub fn wants_summary(&self) -> bool {
        self.include_summary || self.include_metadata
    }

    /// True when active filters should be echoed into the artifact.
    pub fn wants_filters(&self) -> bool {
        self.include_filters || self.include_metadata
    }

    /// Prefix for generated filenames: explicit prefix, then kind, then "export".
    pub fn filename_prefix(&self) -> String {
        self.filename_prefix
            .clone()
            .filter(|prefix| !prefix.trim().is_empty())
            .or_else(|| self.kind.map(|kind| kind.as_str().to_string()))
            .unwrap_or_else(|| "export".to_string())
    }

    /// Title of the data sheet in spreadsheet exports.
    pub fn sheet_name(&self) -> &'static str {
        self.kind.map_or("Data", |kind| kind.sheet_name())
    }

    /// Parses options from a JSON value.
    ///
    /// The `format` key is checked first so that an unknown format is
    /// reported as such rather than as a generic parse failure.
    pub fn from_value(value: Value) -> Result<Self> {
        if let Some(format) = value.get("format") {
            match format.as_str() {
                Some(text) => {
                    text.parse::<ZiExportFormat>()?;
                }
                None => return Err(ZiError::unsupported_format(format.to_string())),
            }
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(text)?;
        Self::from_value(value)
    }

    /// Loads options from a `.json`, `.yaml` or `.yml` file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&text),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text),
            other => Err(ZiError::validation(format!(
                "unsupported options file extension: {}",
                other.unwrap_or("<none>")
            ))),
        }
    }
}
