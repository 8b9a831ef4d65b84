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

use ::csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::errors::{Result, ZiError};
use crate::export::{column_names, ensure_records};
use crate::record::{display_value, ZiRecord};

/// Serializes records as CSV text.
///
/// The header row is the first record's keys. Cells are display-coerced and
/// quoted only when they contain a comma, a double quote or a line break.
/// Rows are joined with `\n` and there is no trailing newline.
pub fn export_csv(records: &[ZiRecord]) -> Result<String> {
    ensure_records(records)?;

    let headers = column_names(records);
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(&headers)?;
    for record in records {
        let row = headers.iter().map(|header| {
            record
                .get(header)
                .map(display_value)
                .unwrap_or_default()
        });
        writer.write_record(row)?;
    }
    writer.flush()?;

    let bytes = writer
        .into_inner()
        .map_err(|err| ZiError::Serde(format!("csv: {}", err.error())))?;
    let mut text = String::from_utf8(bytes)
        .map_err(|err| ZiError::internal(format!("csv output is not UTF-8: {}", err)))?;

    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}
