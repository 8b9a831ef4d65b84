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


#![allow(non_snake_case)]

use std::io::{Cursor, Read};

use serde_json::json;
use ziexport::export::excel::{export_excel, ZiWorkbookExtras, ZI_FILTERS_SHEET, ZI_SUMMARY_SHEET};
use ziexport::export::options::{ZiExportFormat, ZiExportOptions};
use ziexport::export::summary::ZiExportSummary;
use ziexport::export::ZiExporter;
use ziexport::operators::filter::{ZiFilterSet, ZiFilterSpec};
use ziexport::presets::ZiRecordKind;
use ziexport::record::ZiRecord;

fn records() -> Vec<ZiRecord> {
    ZiRecord::batch_from_value(json!([
        {"name": "Alice", "amount": 100, "paid": true},
        {"name": "Bob", "amount": 50, "paid": false},
    ]))
    .unwrap()
}

fn read_part(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut part = archive.by_name(name).unwrap();
    let mut text = String::new();
    part.read_to_string(&mut text).unwrap();
    text
}

fn sheet_names(bytes: &[u8]) -> Vec<String> {
    let workbook = read_part(bytes, "xl/workbook.xml");
    workbook
        .split("<sheet name=\"")
        .skip(1)
        .filter_map(|chunk| chunk.split('"').next())
        .map(str::to_string)
        .collect()
}

#[test]
fn ZiFTExcelDataSheetOnly() {
    let bytes = export_excel(&records(), "Orders", ZiWorkbookExtras::default()).unwrap();

    assert_eq!(sheet_names(&bytes), vec!["Orders"]);
    let strings = read_part(&bytes, "xl/sharedStrings.xml");
    assert!(strings.contains("Alice"));
    assert!(strings.contains("amount"));
}

#[test]
fn ZiFTExcelAppendsSummaryAndFilterSheets() {
    let all = records();
    let filters = ZiFilterSet::new()
        .with("amount", ZiFilterSpec::range(Some(60.0), None))
        .unwrap();
    let options = ZiExportOptions::new(ZiExportFormat::Excel).with_filters(filters.clone());
    let summary = ZiExportSummary::generate(&all, &filters, &options, "Admin Dashboard");

    let bytes = export_excel(
        &all[..1],
        "Data",
        ZiWorkbookExtras {
            summary: Some(&summary),
            filters: Some(&filters),
        },
    )
    .unwrap();

    assert_eq!(sheet_names(&bytes), vec!["Data", ZI_SUMMARY_SHEET, ZI_FILTERS_SHEET]);
    let strings = read_part(&bytes, "xl/sharedStrings.xml");
    assert!(strings.contains("Filtered Records"));
    assert!(strings.contains("Admin Dashboard"));
    assert!(strings.contains("{&quot;min&quot;:60}") || strings.contains("{\"min\":60}"));
}

#[test]
fn ZiFTExcelSkipsFilterSheetWithoutFilters() {
    let bytes = export_excel(
        &records(),
        "Data",
        ZiWorkbookExtras {
            summary: None,
            filters: Some(&ZiFilterSet::new()),
        },
    )
    .unwrap();

    assert_eq!(sheet_names(&bytes), vec!["Data"]);
}

#[test]
fn ZiFTExcelRejectsInvalidSheetName() {
    let err = export_excel(&records(), "bad/name", ZiWorkbookExtras::default()).unwrap_err();
    assert!(err.to_string().starts_with("spreadsheet error"));
}

#[test]
fn ZiFTExcelRejectsEmptyInput() {
    let err = export_excel(&[], "Data", ZiWorkbookExtras::default()).unwrap_err();
    assert_eq!(err.to_string(), "No data to export");
}

#[test]
fn ZiFTExporterExcelUsesKindSheetAndMetadata() {
    let orders = ZiRecord::batch_from_value(json!([
        {"orderNumber": "ORD-1", "totalAmount": 20, "status": "completed", "createdAt": "2024-01-20"},
        {"orderNumber": "ORD-2", "totalAmount": 30, "status": "pending", "createdAt": "2024-01-21"},
    ]))
    .unwrap();
    let options = ZiExportOptions::for_kind(ZiRecordKind::Orders, ZiExportFormat::Excel)
        .with_filter("status", ZiFilterSpec::exact("completed"))
        .unwrap()
        .with_metadata(true);

    let artifact = ZiExporter::default().export(&orders, &options).unwrap();

    assert!(artifact.filename.starts_with("orders_"));
    assert!(artifact.filename.ends_with(".xlsx"));
    assert_eq!(
        artifact.content_type,
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert_eq!(
        sheet_names(&artifact.bytes),
        vec!["Orders", ZI_SUMMARY_SHEET, ZI_FILTERS_SHEET]
    );
    assert!(artifact.as_text().is_err());
}
