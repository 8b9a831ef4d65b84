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

//! # Data Export Module
//!
//! This module turns shaped record batches into downloadable artifacts.
//!
//! ## Module Components
//!
//! - **Options** ([options.rs](options/index.html)): Output format and the declarative export configuration
//! - **Summary** ([summary.rs](summary/index.html)): Export summary snapshot
//! - **Filename** ([filename.rs](filename/index.html)): Timestamped artifact names
//! - **Serializers**: [csv.rs](csv/index.html), [json.rs](json/index.html), [excel.rs](excel/index.html)
//! - **Artifact** ([artifact.rs](artifact/index.html)): Named output blob with atomic directory writes
//! - **Exporter** ([exporter.rs](exporter/index.html)): Validation, staging, progress and cancellation
//!
//! ## Supported Output Formats
//!
//! - **CSV**: Header row plus data rows, minimal quoting
//! - **JSON**: Pretty-printed array, or a `{metadata, filters, data}` envelope
//! - **Excel**: XLSX workbook with optional summary and filter sheets (with feature flag)
//!
//! ## Usage
//!
//! ```rust
//! use ziexport::export::{ZiExporter, ZiExportOptions, ZiExportFormat};
//! use ziexport::operators::sort::ZiSortOrder;
//!
//! let options = ZiExportOptions::new(ZiExportFormat::Csv)
//!     .with_sort("amount", ZiSortOrder::Desc)
//!     .with_fields(["name", "amount"]);
//! let artifact = ZiExporter::default().export(&records, &options)?;
//! artifact.write_to_dir("exports")?;
//! ```

pub mod artifact;
pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;
pub mod exporter;
pub mod filename;
pub mod json;
pub mod options;
pub mod summary;

pub use artifact::ZiArtifact;
pub use exporter::{ZiCancellationToken, ZiExportProgress, ZiExporter, ZiExporterConfig};
pub use filename::{generate_filename, generate_filename_at};
pub use options::{ZiExportFormat, ZiExportOptions};
pub use summary::{ZiExportSummary, ZiSummaryOptions};

use crate::errors::{Result, ZiError};
use crate::record::ZiRecord;

/// Message of the validation error raised for an empty export.
pub const ZI_NO_DATA_MESSAGE: &str = "No data to export";

/// Rejects an empty batch before any formatting work.
pub(crate) fn ensure_records(records: &[ZiRecord]) -> Result<()> {
    if records.is_empty() {
        return Err(ZiError::validation(ZI_NO_DATA_MESSAGE));
    }
    Ok(())
}

/// Column order for tabular output: the first record's keys.
pub(crate) fn column_names(records: &[ZiRecord]) -> Vec<String> {
    records
        .first()
        .map(|record| record.keys().cloned().collect())
        .unwrap_or_default()
}
