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

use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::Result;
use crate::export::ensure_records;
use crate::export::summary::ZiExportSummary;
use crate::operators::filter::ZiFilterSet;
use crate::record::ZiRecord;

/// Producer identity written into the JSON metadata envelope.
#[derive(Clone, Copy, Debug)]
pub struct ZiJsonSource<'a> {
    pub version: &'a str,
    pub source: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeMetadata<'a> {
    summary: &'a ZiExportSummary,
    exported_at: String,
    version: &'a str,
    source: &'a str,
}

#[derive(Serialize)]
struct Envelope<'a> {
    metadata: EnvelopeMetadata<'a>,
    filters: Map<String, Value>,
    data: &'a [ZiRecord],
}

/// Serializes records as a pretty-printed JSON array.
pub fn export_json(records: &[ZiRecord]) -> Result<String> {
    ensure_records(records)?;
    Ok(serde_json::to_string_pretty(records)?)
}

/// Serializes records inside a `{metadata, filters, data}` envelope.
pub fn export_json_with_metadata(
    records: &[ZiRecord],
    summary: &ZiExportSummary,
    filters: &ZiFilterSet,
    source: ZiJsonSource<'_>,
) -> Result<String> {
    ensure_records(records)?;

    let envelope = Envelope {
        metadata: EnvelopeMetadata {
            summary,
            exported_at: summary.timestamp_string(),
            version: source.version,
            source: source.source,
        },
        filters: filters.to_map(),
        data: records,
    };
    Ok(serde_json::to_string_pretty(&envelope)?)
}
