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

use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use ziexport::export::json::{export_json, export_json_with_metadata, ZiJsonSource};
use ziexport::export::options::{ZiExportFormat, ZiExportOptions};
use ziexport::export::summary::ZiExportSummary;
use ziexport::operators::filter::ZiFilterSpec;
use ziexport::record::ZiRecord;

fn records() -> Vec<ZiRecord> {
    ZiRecord::batch_from_value(json!([
        {"name": "Alice", "amount": 100, "user": {"name": "Ann"}},
        {"name": "Bob", "amount": 50, "user": null},
    ]))
    .unwrap()
}

#[test]
fn ZiFTJsonBareArrayIsPrettyAndParsesBack() {
    let text = export_json(&records()).unwrap();

    assert!(text.starts_with("[\n  {"));
    let parsed: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        parsed,
        json!([
            {"name": "Alice", "amount": 100, "user": {"name": "Ann"}},
            {"name": "Bob", "amount": 50, "user": null},
        ])
    );
}

#[test]
fn ZiFTJsonEnvelopeEchoesSummaryAndFilters() {
    let all = records();
    let options = ZiExportOptions::new(ZiExportFormat::Json)
        .with_filter("amount", ZiFilterSpec::range(Some(60.0), None))
        .unwrap()
        .with_metadata(true);
    let at = Utc.with_ymd_and_hms(2024, 1, 20, 14, 45, 30).unwrap();
    let summary = ZiExportSummary::generate_at(&all, &options.filters, &options, "Admin Dashboard", at);

    let text = export_json_with_metadata(
        &all[..1],
        &summary,
        &options.filters,
        ZiJsonSource {
            version: "1.0",
            source: "MLM Admin Dashboard",
        },
    )
    .unwrap();
    let value: Value = serde_json::from_str(&text).unwrap();

    assert_eq!(value["metadata"]["exportedAt"], json!("2024-01-20T14:45:30.000Z"));
    assert_eq!(value["metadata"]["version"], json!("1.0"));
    assert_eq!(value["metadata"]["source"], json!("MLM Admin Dashboard"));
    assert_eq!(value["metadata"]["summary"]["totalRecords"], json!(2));
    assert_eq!(value["metadata"]["summary"]["filteredRecords"], json!(1));
    assert_eq!(value["metadata"]["summary"]["filtersApplied"], json!(1));
    assert_eq!(value["metadata"]["summary"]["generatedBy"], json!("Admin Dashboard"));
    assert_eq!(value["filters"], json!({"amount": {"min": 60}}));
    assert_eq!(value["data"].as_array().map(Vec::len), Some(1));
}

#[test]
fn ZiFTJsonEnvelopeKeysAreOrdered() {
    let all = records();
    let options = ZiExportOptions::new(ZiExportFormat::Json);
    let summary = ZiExportSummary::generate(&all, &options.filters, &options, "tests");
    let text = export_json_with_metadata(
        &all,
        &summary,
        &options.filters,
        ZiJsonSource { version: "1.0", source: "tests" },
    )
    .unwrap();

    let metadata = text.find("\"metadata\"").unwrap();
    let filters = text.find("\"filters\"").unwrap();
    let data = text.find("\"data\"").unwrap();
    assert!(metadata < filters && filters < data);
}

#[test]
fn ZiFTJsonRejectsEmptyInput() {
    assert_eq!(export_json(&[]).unwrap_err().to_string(), "No data to export");
}
