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

//! # Spreadsheet Serializer
//!
//! Builds an XLSX workbook with one data sheet and, on request, an
//! "Export Summary" sheet and an "Applied Filters" sheet.
//!
//! Numbers and booleans are written as native cells so spreadsheet formulas
//! work on them; every other value is written as its display text.

use rust_xlsxwriter::{Format, Workbook, Worksheet};
use serde_json::Value;

use crate::errors::Result;
use crate::export::summary::ZiExportSummary;
use crate::export::{column_names, ensure_records};
use crate::operators::filter::ZiFilterSet;
use crate::record::{display_value, ZiRecord};

pub const ZI_SUMMARY_SHEET: &str = "Export Summary";
pub const ZI_FILTERS_SHEET: &str = "Applied Filters";

/// Narrowest column width, in characters.
const MIN_COLUMN_WIDTH: usize = 15;

/// Sheets to include besides the data sheet.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZiWorkbookExtras<'a> {
    pub summary: Option<&'a ZiExportSummary>,
    /// Ignored when the set is empty.
    pub filters: Option<&'a ZiFilterSet>,
}

/// Serializes records into XLSX bytes.
pub fn export_excel(
    records: &[ZiRecord],
    data_sheet: &str,
    extras: ZiWorkbookExtras<'_>,
) -> Result<Vec<u8>> {
    ensure_records(records)?;

    let header_format = Format::new().set_bold();
    let mut workbook = Workbook::new();

    workbook.push_worksheet(data_worksheet(records, data_sheet, &header_format)?);

    if let Some(summary) = extras.summary {
        let rows: Vec<(String, String)> = summary
            .to_rows()
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect();
        workbook.push_worksheet(key_value_worksheet(
            ZI_SUMMARY_SHEET,
            ("Property", "Value"),
            &rows,
            &header_format,
        )?);
    }

    if let Some(filters) = extras.filters.filter(|filters| !filters.is_empty()) {
        let rows: Vec<(String, String)> = filters
            .iter()
            .map(|(path, spec)| (path.to_string(), filter_text(&spec.to_value())))
            .collect();
        workbook.push_worksheet(key_value_worksheet(
            ZI_FILTERS_SHEET,
            ("Filter", "Value"),
            &rows,
            &header_format,
        )?);
    }

    Ok(workbook.save_to_buffer()?)
}

fn data_worksheet(records: &[ZiRecord], name: &str, header_format: &Format) -> Result<Worksheet> {
    let headers = column_names(records);
    let mut sheet = Worksheet::new();
    sheet.set_name(name)?;

    for (col, header) in headers.iter().enumerate() {
        let col = col as u16;
        sheet.write_string_with_format(0, col, header.as_str(), header_format)?;
        sheet.set_column_width(col, column_width(header) as f64)?;
    }

    for (index, record) in records.iter().enumerate() {
        let row = index as u32 + 1;
        for (col, header) in headers.iter().enumerate() {
            write_cell(&mut sheet, row, col as u16, record.get(header))?;
        }
    }

    Ok(sheet)
}

fn key_value_worksheet(
    name: &str,
    titles: (&str, &str),
    rows: &[(String, String)],
    header_format: &Format,
) -> Result<Worksheet> {
    let mut sheet = Worksheet::new();
    sheet.set_name(name)?;

    sheet.write_string_with_format(0, 0, titles.0, header_format)?;
    sheet.write_string_with_format(0, 1, titles.1, header_format)?;

    let key_width = rows
        .iter()
        .map(|(key, _)| column_width(key))
        .fold(column_width(titles.0), usize::max);
    let value_width = rows
        .iter()
        .map(|(_, value)| column_width(value))
        .fold(column_width(titles.1), usize::max);
    sheet.set_column_width(0, key_width as f64)?;
    sheet.set_column_width(1, value_width as f64)?;

    for (index, (key, value)) in rows.iter().enumerate() {
        let row = index as u32 + 1;
        sheet.write_string(row, 0, key.as_str())?;
        sheet.write_string(row, 1, value.as_str())?;
    }

    Ok(sheet)
}

fn write_cell(sheet: &mut Worksheet, row: u32, col: u16, value: Option<&Value>) -> Result<()> {
    match value {
        None | Some(Value::Null) => {}
        Some(Value::Number(number)) => match number.as_f64() {
            Some(n) => {
                sheet.write_number(row, col, n)?;
            }
            None => {
                sheet.write_string(row, col, number.to_string())?;
            }
        },
        Some(Value::Bool(flag)) => {
            sheet.write_boolean(row, col, *flag)?;
        }
        Some(other) => {
            sheet.write_string(row, col, display_value(other))?;
        }
    }
    Ok(())
}

fn column_width(label: &str) -> usize {
    label.chars().count().max(MIN_COLUMN_WIDTH)
}

/// Strings as-is, everything else as compact JSON.
fn filter_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
