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

use serde_json::json;
use ziexport::export::csv::export_csv;
use ziexport::record::ZiRecord;

fn records(value: serde_json::Value) -> Vec<ZiRecord> {
    ZiRecord::batch_from_value(value).unwrap()
}

#[test]
fn ZiFTCsvWritesHeaderFromFirstRecord() {
    let text = export_csv(&records(json!([
        {"name": "Alice", "amount": 100},
        {"name": "Bob", "amount": 50},
    ])))
    .unwrap();

    assert_eq!(text, "name,amount\nAlice,100\nBob,50");
}

#[test]
fn ZiFTCsvIgnoresFieldsMissingFromFirstRecord() {
    let text = export_csv(&records(json!([
        {"name": "Alice"},
        {"name": "Bob", "extra": "dropped"},
    ])))
    .unwrap();

    assert_eq!(text, "name\nAlice\nBob");
}

#[test]
fn ZiFTCsvQuotesNewlinesAndQuotes() {
    let text = export_csv(&records(json!([
        {"note": "line one\nline two", "quote": "5\" screen"},
    ])))
    .unwrap();

    assert_eq!(text, "note,quote\n\"line one\nline two\",\"5\"\" screen\"");
}

#[test]
fn ZiFTCsvRendersCompoundValues() {
    let text = export_csv(&records(json!([
        {"tags": ["a", "b"], "user": {"name": "Ann"}, "active": true, "deleted": null},
    ])))
    .unwrap();

    assert_eq!(
        text,
        "tags,user,active,deleted\n\"a,b\",\"{\"\"name\"\":\"\"Ann\"\"}\",true,"
    );
}

#[test]
fn ZiFTCsvRejectsEmptyInput() {
    let err = export_csv(&[]).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(err.to_string(), "No data to export");
}
