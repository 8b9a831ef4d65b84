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

use serde_json::{json, Value};
use ziexport::errors::ZiError;
use ziexport::record::{coerce_number, display_value, values_equal, ZiRecord, ZiRecordBatch};

#[test]
fn ZiFTRecordFromValueKeepsFieldOrder() {
    let record = ZiRecord::from_value(json!({"z": 1, "a": 2, "m": 3})).unwrap();
    let keys: Vec<&str> = record.keys().map(String::as_str).collect();

    assert_eq!(keys, vec!["z", "a", "m"]);
    assert_eq!(record.len(), 3);
}

#[test]
fn ZiFTRecordFromValueRejectsScalars() {
    let err = ZiRecord::from_value(json!("text")).unwrap_err();
    assert!(matches!(err, ZiError::Validation { .. }));
}

#[test]
fn ZiFTRecordBatchFromJsonStrParsesArray() {
    let batch: ZiRecordBatch =
        ZiRecord::batch_from_json_str(r#"[{"name": "Alice"}, {"name": "Bob"}]"#).unwrap();

    assert_eq!(batch.len(), 2);
    assert_eq!(batch[1].get("name"), Some(&json!("Bob")));
}

#[test]
fn ZiFTRecordBatchFromValueRejectsObjectDocument() {
    let err = ZiRecord::batch_from_value(json!({"data": []})).unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn ZiFTRecordInsertReplacesInPlace() {
    let mut record = ZiRecord::new().with("a", 1).with("b", 2);
    let previous = record.insert("a", json!(10));

    assert_eq!(previous, Some(json!(1)));
    let keys: Vec<&str> = record.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["a", "b"]);
    assert_eq!(record.get("a"), Some(&json!(10)));
}

#[test]
fn ZiFTRecordSerializesAsPlainObject() {
    let record = ZiRecord::new().with("name", "Alice").with("amount", 100);
    let text = serde_json::to_string(&record).unwrap();

    assert_eq!(text, r#"{"name":"Alice","amount":100}"#);
    assert_eq!(record.into_value(), json!({"name": "Alice", "amount": 100}));
}

#[test]
fn ZiFTDisplayValueNeverPrintsNull() {
    assert_eq!(display_value(&Value::Null), "");
    assert_eq!(display_value(&json!([1, 2, 3])), "1,2,3");
    assert_eq!(display_value(&json!([[1], 2])), "[[1],2]");
}

#[test]
fn ZiFTCoerceNumberRejectsCompounds() {
    assert_eq!(coerce_number(&json!({"a": 1})), None);
    assert_eq!(coerce_number(&json!([1])), None);
    assert_eq!(coerce_number(&json!(false)), Some(0.0));
}

#[test]
fn ZiFTValuesEqualKeepsStringsDistinct() {
    assert!(values_equal(&json!("a"), &json!("a")));
    assert!(!values_equal(&json!("A"), &json!("a")));
    assert!(values_equal(&json!({"x": 1}), &json!({"x": 1})));
}
