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

//! # Export Summary
//!
//! A read-only snapshot describing one export: how many records came in, how
//! many survived the filters, and which options shaped the output. The
//! snapshot is computed from the unfiltered input and never reads the main
//! pipeline's output, so it stays correct regardless of call order.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::export::options::ZiExportOptions;
use crate::operators::filter::{apply_filters, ZiFilterSet};
use crate::record::ZiRecord;

/// Display-string echo of the options that shaped an export.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZiSummaryOptions {
    pub format: String,
    pub fields: String,
    pub sort: String,
    pub limit: String,
    /// Projected column count; `None` when every field is kept.
    #[serde(skip)]
    pub field_count: Option<usize>,
}

impl ZiSummaryOptions {
    pub fn from_options(options: &ZiExportOptions) -> Self {
        let projected = projected_fields(options);
        let field_count = (!projected.is_empty()).then_some(projected.len());
        let fields = if projected.is_empty() {
            "All".to_string()
        } else {
            projected.join(", ")
        };

        let sort = match options.sort_by.as_deref().map(str::trim) {
            Some(field) if !field.is_empty() => format!("{} ({})", field, options.sort_order),
            _ => "None".to_string(),
        };

        let limit = match options.limit {
            Some(limit) if limit > 0 => limit.to_string(),
            _ => "No limit".to_string(),
        };

        Self {
            format: options.format.as_str().to_uppercase(),
            fields,
            sort,
            limit,
            field_count,
        }
    }
}

/// Output column names the options will produce, empty when all fields are kept.
fn projected_fields(options: &ZiExportOptions) -> Vec<String> {
    match (&options.custom_mapping, &options.fields) {
        (Some(mapping), _) if !mapping.is_empty() => mapping.display_names(),
        (_, Some(fields)) => fields.clone(),
        _ => Vec::new(),
    }
}

/// Snapshot of an export's inputs and outputs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZiExportSummary {
    pub total_records: usize,
    pub filtered_records: usize,
    pub filters_applied: usize,
    pub export_options: ZiSummaryOptions,
    pub timestamp: DateTime<Utc>,
    pub generated_by: String,
}

impl ZiExportSummary {
    /// Builds a summary stamped with the current wall-clock time.
    pub fn generate(
        all_records: &[ZiRecord],
        filters: &ZiFilterSet,
        options: &ZiExportOptions,
        generated_by: &str,
    ) -> Self {
        Self::generate_at(all_records, filters, options, generated_by, Utc::now())
    }

    /// Builds a summary with an explicit timestamp.
    pub fn generate_at(
        all_records: &[ZiRecord],
        filters: &ZiFilterSet,
        options: &ZiExportOptions,
        generated_by: &str,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let filtered_records = if filters.is_empty() {
            all_records.len()
        } else {
            apply_filters(all_records, filters).len()
        };

        Self {
            total_records: all_records.len(),
            filtered_records,
            filters_applied: filters.len(),
            export_options: ZiSummaryOptions::from_options(options),
            timestamp,
            generated_by: generated_by.to_string(),
        }
    }

    /// Timestamp in RFC 3339 with millisecond precision.
    pub fn timestamp_string(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Number of output columns, or "All" when no projection is configured.
    pub fn field_count(&self) -> String {
        self.export_options
            .field_count
            .map_or_else(|| "All".to_string(), |count| count.to_string())
    }

    /// Key/value rows for the spreadsheet summary sheet.
    pub fn to_rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Total Records", self.total_records.to_string()),
            ("Filtered Records", self.filtered_records.to_string()),
            ("Filters Applied", self.filters_applied.to_string()),
            ("Export Format", self.export_options.format.clone()),
            ("Field Count", self.field_count()),
            ("Sort", self.export_options.sort.clone()),
            ("Limit", self.export_options.limit.clone()),
            ("Generated At", self.timestamp_string()),
            ("Generated By", self.generated_by.clone()),
        ]
    }

    pub fn log_summary(&self) {
        log::info!(
            "export summary: total={} filtered={} filters={} format={} sort={} limit={}",
            self.total_records,
            self.filtered_records,
            self.filters_applied,
            self.export_options.format,
            self.export_options.sort,
            self.export_options.limit
        );
    }
}
