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

//! # Exporter
//!
//! Entry point tying the pipeline, the serializers and the summary together.
//!
//! ## Flow
//!
//! 1. Validate: the format must be available and the input non-empty.
//!    Nothing is serialized when validation fails.
//! 2. Shape the full batch: filter, sort, limit.
//! 3. Project the shaped records in fixed-size chunks, reporting progress
//!    after each chunk.
//! 4. Serialize, attaching summary and filter sections as requested.
//!
//! The async variant yields to the runtime between chunks and honours a
//! [`ZiCancellationToken`].

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{Result, ZiError};
use crate::export::artifact::ZiArtifact;
use crate::export::csv::export_csv;
use crate::export::filename::generate_filename;
use crate::export::json::{export_json, export_json_with_metadata, ZiJsonSource};
use crate::export::options::{ZiExportFormat, ZiExportOptions};
use crate::export::summary::ZiExportSummary;
use crate::export::{ensure_records, ZI_NO_DATA_MESSAGE};
use crate::pipeline::ZiPipeline;
use crate::record::{ZiRecord, ZiRecordBatch};

/// Exporter-wide settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZiExporterConfig {
    /// Records projected per progress step.
    pub chunk_size: usize,
    /// Input size above which a warning is logged. Exports still proceed.
    pub large_export_threshold: usize,
    pub generated_by: String,
    pub source: String,
    pub version: String,
}

impl Default for ZiExporterConfig {
    fn default() -> Self {
        Self {
            chunk_size: 100,
            large_export_threshold: 10_000,
            generated_by: "Admin Dashboard".to_string(),
            source: "MLM Admin Dashboard".to_string(),
            version: "1.0".to_string(),
        }
    }
}

impl ZiExporterConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Loads settings from a `.json`, `.yaml` or `.yml` file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&text),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text),
            other => Err(ZiError::validation(format!(
                "unsupported config file extension: {}",
                other.unwrap_or("<none>")
            ))),
        }
    }
}

/// Progress after one projected chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZiExportProgress {
    pub processed: usize,
    pub total: usize,
    /// Whole percent, 0 to 100.
    pub percent: u8,
}

impl ZiExportProgress {
    pub fn new(processed: usize, total: usize) -> Self {
        let percent = if total == 0 {
            100
        } else {
            (processed.min(total) * 100 / total) as u8
        };
        Self {
            processed,
            total,
            percent,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.processed >= self.total
    }
}

/// Shared flag for stopping an async export between chunks.
#[derive(Clone, Debug, Default)]
pub struct ZiCancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl ZiCancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(ZiError::Cancelled);
        }
        Ok(())
    }
}

/// Runs exports with a fixed configuration.
#[derive(Clone, Debug, Default)]
pub struct ZiExporter {
    config: ZiExporterConfig,
}

impl ZiExporter {
    pub fn new(config: ZiExporterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ZiExporterConfig {
        &self.config
    }

    /// Exports `records` in one pass.
    pub fn export(&self, records: &[ZiRecord], options: &ZiExportOptions) -> Result<ZiArtifact> {
        self.export_with_progress(records, options, |_| {})
    }

    /// Exports raw JSON data, rejecting anything but an array of objects.
    pub fn export_value(&self, data: Value, options: &ZiExportOptions) -> Result<ZiArtifact> {
        let records = ZiRecord::batch_from_value(data)?;
        self.export(&records, options)
    }

    /// Exports `records`, calling `progress` after every projected chunk.
    pub fn export_with_progress(
        &self,
        records: &[ZiRecord],
        options: &ZiExportOptions,
        mut progress: impl FnMut(ZiExportProgress),
    ) -> Result<ZiArtifact> {
        let (shaped, projection) = self.prepare(records, options)?;

        let total = shaped.len();
        let mut rows: ZiRecordBatch = Vec::with_capacity(total);
        for chunk in shaped.chunks(self.chunk_size()) {
            rows.extend(projection.run(chunk.to_vec())?);
            progress(ZiExportProgress::new(rows.len(), total));
        }

        self.render(records, &rows, options)
    }

    /// Async chunked export.
    ///
    /// Yields to the scheduler between chunks. When `token` is cancelled the
    /// export stops at the next chunk boundary with [`ZiError::Cancelled`]
    /// and no artifact is produced.
    pub async fn export_chunked(
        &self,
        records: &[ZiRecord],
        options: &ZiExportOptions,
        token: &ZiCancellationToken,
        mut progress: impl FnMut(ZiExportProgress),
    ) -> Result<ZiArtifact> {
        token.check()?;
        let (shaped, projection) = self.prepare(records, options)?;

        let total = shaped.len();
        let mut rows: ZiRecordBatch = Vec::with_capacity(total);
        for chunk in shaped.chunks(self.chunk_size()) {
            token.check()?;
            rows.extend(projection.run(chunk.to_vec())?);
            progress(ZiExportProgress::new(rows.len(), total));
            tokio::task::yield_now().await;
        }

        token.check()?;
        self.render(records, &rows, options)
    }

    fn chunk_size(&self) -> usize {
        self.config.chunk_size.max(1)
    }

    /// Validates the request and runs the whole-batch stages.
    fn prepare(
        &self,
        records: &[ZiRecord],
        options: &ZiExportOptions,
    ) -> Result<(ZiRecordBatch, ZiPipeline)> {
        options.format.ensure_available()?;
        ensure_records(records)?;

        if records.len() > self.config.large_export_threshold {
            log::warn!(
                "exporting {} records (threshold {}); this may take a while",
                records.len(),
                self.config.large_export_threshold
            );
        }

        let shaping = ZiPipeline::shaping(options)?;
        let projection = ZiPipeline::projection(options)?;

        let shaped = shaping.run(records.to_vec())?;
        log::debug!(
            "shaped {} of {} records for {} export",
            shaped.len(),
            records.len(),
            options.format
        );
        Ok((shaped, projection))
    }

    fn render(
        &self,
        all_records: &[ZiRecord],
        rows: &[ZiRecord],
        options: &ZiExportOptions,
    ) -> Result<ZiArtifact> {
        if rows.is_empty() {
            return Err(ZiError::validation(ZI_NO_DATA_MESSAGE));
        }

        let summary = options.wants_summary().then(|| {
            ZiExportSummary::generate(
                all_records,
                &options.filters,
                options,
                &self.config.generated_by,
            )
        });

        let bytes = match options.format {
            ZiExportFormat::Csv => export_csv(rows)?.into_bytes(),
            ZiExportFormat::Json => match summary.as_ref().filter(|_| options.include_metadata) {
                Some(summary) => export_json_with_metadata(
                    rows,
                    summary,
                    &options.filters,
                    ZiJsonSource {
                        version: &self.config.version,
                        source: &self.config.source,
                    },
                )?
                .into_bytes(),
                None => export_json(rows)?.into_bytes(),
            },
            ZiExportFormat::Excel => self.render_excel(rows, summary.as_ref(), options)?,
        };

        let filename = generate_filename(&options.filename_prefix(), options.format.extension());
        if let Some(summary) = &summary {
            summary.log_summary();
        }
        log::info!(
            "export complete: {} ({} rows, {} bytes, format {})",
            filename,
            rows.len(),
            bytes.len(),
            options.format
        );

        Ok(ZiArtifact::new(filename, options.format, bytes))
    }

    #[cfg(feature = "excel")]
    fn render_excel(
        &self,
        rows: &[ZiRecord],
        summary: Option<&ZiExportSummary>,
        options: &ZiExportOptions,
    ) -> Result<Vec<u8>> {
        use crate::export::excel::{export_excel, ZiWorkbookExtras};

        let extras = ZiWorkbookExtras {
            summary,
            filters: options.wants_filters().then_some(&options.filters),
        };
        export_excel(rows, options.sheet_name(), extras)
    }

    #[cfg(not(feature = "excel"))]
    fn render_excel(
        &self,
        _rows: &[ZiRecord],
        _summary: Option<&ZiExportSummary>,
        options: &ZiExportOptions,
    ) -> Result<Vec<u8>> {
        Err(ZiError::unsupported_format(options.format.as_str()))
    }
}
