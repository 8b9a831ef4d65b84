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

//! # Zi Export Library
//!
//! Record export pipeline for dashboard data: in-memory records fetched from
//! a REST backend are filtered, sorted, limited, projected and serialized to
//! CSV, JSON or an Excel-compatible workbook, optionally with a summary of
//! what was exported.
//!
//! ## Module Overview
//!
//! - **errors**: `ZiError` and the crate-wide `Result`
//! - **record**: `ZiRecord`, an ordered field map, plus value display rules
//! - **operator**: The `ZiOperator` trait and error-wrapping execution
//! - **operators**: Filter, sort, limit, projection and named transforms
//! - **presets**: Predefined field mappings per record kind
//! - **pipeline**: Stage composition and config-driven construction
//! - **export**: Options, serializers, summary, filenames, artifacts and the exporter
//!
//! ## Feature Flags
//!
//! - `excel`: Enables XLSX output through `rust_xlsxwriter`
//! - `full`: Enables all features (default)
//!
//! ## Quick Start
//!
//! ```rust
//! use ziexport::{ZiExporter, ZiExportFormat, ZiExportOptions, ZiFilterSpec, ZiRecord};
//! use serde_json::json;
//!
//! let records = ZiRecord::batch_from_value(json!([
//!     {"name": "Alice", "amount": 100},
//!     {"name": "Bob", "amount": 50},
//! ]))?;
//!
//! let options = ZiExportOptions::new(ZiExportFormat::Json)
//!     .with_filter("amount", ZiFilterSpec::range(Some(60.0), None))?
//!     .with_metadata(true);
//!
//! let artifact = ZiExporter::default().export(&records, &options)?;
//! println!("{} ({})", artifact.filename, artifact.content_type);
//! ```
//!
//! ## Architecture
//!
//! 1. **Records**: Data is represented as ZiRecord with JSON values
//! 2. **Operators**: Individual stages (filter, sort, limit, projection)
//! 3. **Pipeline**: Runs stages in the fixed order filter, sort, limit, projection
//! 4. **Export**: Serializes the result and attaches metadata
//!
//! ## Error Handling
//!
//! All operations return `Result<T, ZiError>`. Validation happens before any
//! serializer runs, so a failed export never yields a partial artifact.

pub mod errors;
pub mod export;
pub mod operator;
pub mod operators;
pub mod pipeline;
pub mod presets;
pub mod record;

pub use errors::{Result, ZiError};
pub use record::{ZiRecord, ZiRecordBatch};
pub use operator::{execute_operator, ZiOperator};
pub use pipeline::{ZiPipeline, ZiPipelineBuilder};
pub use presets::ZiRecordKind;

pub use operators::field::{ZiCustomMapping, ZiFieldDescriptor, ZiFieldMapping, ZiFieldSelect};
pub use operators::filter::{ZiFieldPath, ZiFilter, ZiFilterSet, ZiFilterSpec};
pub use operators::limit::ZiLimit;
pub use operators::sort::{ZiSort, ZiSortKey, ZiSortOrder};
pub use operators::transform::ZiTransform;

pub use export::{
    generate_filename, generate_filename_at, ZiArtifact, ZiCancellationToken, ZiExportFormat,
    ZiExportOptions, ZiExportProgress, ZiExportSummary, ZiExporter, ZiExporterConfig,
    ZiSummaryOptions,
};
