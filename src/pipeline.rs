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

use std::collections::HashMap;

use serde_json::Value;

use crate::errors::{Result, ZiError};
use crate::export::options::ZiExportOptions;
use crate::operator::{execute_operator, ZiOperator};
use crate::operators::field::{ZiCustomMapping, ZiFieldSelect};
use crate::operators::filter::{ZiFieldPath, ZiFilter};
use crate::operators::limit::ZiLimit;
use crate::operators::sort::ZiSort;
use crate::record::ZiRecordBatch;

pub type OperatorFactory = fn(&Value) -> Result<Box<dyn ZiOperator + Send + Sync>>;

/// Simple linear pipeline composed of sequential operators.
#[derive(Debug, Default)]
pub struct ZiPipeline {
    stages: Vec<Box<dyn ZiOperator + Send + Sync>>,
}

impl ZiPipeline {
    /// Constructs a pipeline from a list of operators.
    pub fn new(stages: Vec<Box<dyn ZiOperator + Send + Sync>>) -> Self {
        ZiPipeline { stages }
    }

    /// Stages that select and order records: filter, sort, limit.
    ///
    /// Stages whose options are unset are left out rather than run as no-ops.
    pub fn shaping(options: &ZiExportOptions) -> Result<Self> {
        let mut stages: Vec<Box<dyn ZiOperator + Send + Sync>> = Vec::new();

        if !options.filters.is_empty() {
            stages.push(Box::new(ZiFilter::new(options.filters.clone())));
        }
        if let Some(field) = options.sort_by.as_deref().filter(|field| !field.trim().is_empty()) {
            stages.push(Box::new(ZiSort::new(
                ZiFieldPath::parse(field)?,
                options.sort_order,
            )));
        }
        if let Some(limit) = ZiLimit::positive(options.limit) {
            stages.push(Box::new(limit));
        }

        Ok(Self::new(stages))
    }

    /// The per-record projection stage, if any.
    ///
    /// A custom mapping supersedes the plain field list.
    pub fn projection(options: &ZiExportOptions) -> Result<Self> {
        let mut stages: Vec<Box<dyn ZiOperator + Send + Sync>> = Vec::new();

        if let Some(mapping) = options.custom_mapping.as_ref().filter(|m| !m.is_empty()) {
            stages.push(Box::new(ZiCustomMapping::new(mapping.clone())));
        } else if let Some(fields) = options.fields.as_ref().filter(|f| !f.is_empty()) {
            stages.push(Box::new(ZiFieldSelect::parse(fields)?));
        }

        Ok(Self::new(stages))
    }

    /// Full export pipeline in its fixed order: filter, sort, limit, projection.
    pub fn from_options(options: &ZiExportOptions) -> Result<Self> {
        let mut pipeline = Self::shaping(options)?;
        pipeline.stages.extend(Self::projection(options)?.stages);
        Ok(pipeline)
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Runs the pipeline, passing batches through each operator sequentially.
    pub fn run(&self, batch: ZiRecordBatch) -> Result<ZiRecordBatch> {
        self.run_with_progress(batch, |_, _, _| {})
    }

    /// Runs the pipeline in fixed-size chunks.
    ///
    /// Only meaningful for per-record stages (projection); filter-sort-limit
    /// must see the whole batch.
    pub fn run_chunked(&self, batch: ZiRecordBatch, chunk_size: usize) -> Result<ZiRecordBatch> {
        let chunk_size = chunk_size.max(1);
        let mut out = Vec::with_capacity(batch.len());
        for chunk in batch.chunks(chunk_size) {
            out.extend(self.run(chunk.to_vec())?);
        }
        Ok(out)
    }

    /// Runs the pipeline, reporting `(stage, before, after)` record counts.
    pub fn run_with_progress(
        &self,
        mut batch: ZiRecordBatch,
        mut progress: impl FnMut(&str, usize, usize),
    ) -> Result<ZiRecordBatch> {
        for stage in &self.stages {
            let before = batch.len();
            batch = execute_operator(stage.as_ref(), batch)?;
            let after = batch.len();
            log::debug!("stage '{}' kept {} of {} records", stage.name(), after, before);
            progress(stage.name(), before, after);
        }
        Ok(batch)
    }

    /// Ensures the pipeline contains at least one stage.
    pub fn validate(&self) -> Result<()> {
        if self.stages.is_empty() {
            return Err(ZiError::pipeline("pipeline", "no stages configured"));
        }
        Ok(())
    }
}

/// Builder that knows how to instantiate operators from configuration.
pub struct ZiPipelineBuilder {
    factories: HashMap<String, OperatorFactory>,
}

impl ZiPipelineBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        ZiPipelineBuilder {
            factories: HashMap::new(),
        }
    }

    /// Creates a builder pre-loaded with the bundled operators.
    pub fn with_defaults() -> Self {
        let mut builder = Self::new();
        builder.register_defaults();
        builder
    }

    /// Registers a factory for the given operator name.
    pub fn register(&mut self, name: impl Into<String>, factory: OperatorFactory) {
        self.factories.insert(name.into(), factory);
    }

    fn register_defaults(&mut self) {
        self.register(
            "filter",
            crate::operators::filter::filter_factory as OperatorFactory,
        );
        self.register("sort", crate::operators::sort::sort_factory as OperatorFactory);
        self.register("limit", crate::operators::limit::limit_factory as OperatorFactory);
        self.register(
            "field.select",
            crate::operators::field::field_select_factory as OperatorFactory,
        );
        self.register(
            "field.map",
            crate::operators::field::field_map_factory as OperatorFactory,
        );
    }

    /// Builds a pipeline from `[{"operator": ..., "config": {...}}, ...]`.
    pub fn build_from_config(&self, steps: &[Value]) -> Result<ZiPipeline> {
        let mut stages = Vec::with_capacity(steps.len());
        for (index, step) in steps.iter().enumerate() {
            let object = step.as_object().ok_or_else(|| {
                ZiError::validation(format!("pipeline step #{index} must be an object"))
            })?;

            let operator_name = object
                .get("operator")
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    ZiError::validation(format!("pipeline step #{index} missing string 'operator'"))
                })?;

            let factory = self.factories.get(operator_name).ok_or_else(|| {
                ZiError::validation(format!("unknown operator '{operator_name}'"))
            })?;

            let config_value = object.get("config").cloned().unwrap_or(Value::Null);
            let operator = factory(&config_value)
                .map_err(|err| ZiError::pipeline(operator_name, err.to_string()))?;
            stages.push(operator);
        }

        let pipeline = ZiPipeline::new(stages);
        pipeline.validate()?;
        Ok(pipeline)
    }
}

impl Default for ZiPipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
