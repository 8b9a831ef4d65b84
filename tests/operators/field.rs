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
use ziexport::operator::{execute_operator, ZiOperator};
use ziexport::operators::field::*;
use ziexport::operators::transform::ZiTransform;
use ziexport::record::ZiRecord;

fn records(value: Value) -> Vec<ZiRecord> {
    ZiRecord::batch_from_value(value).unwrap()
}

fn keys(record: &ZiRecord) -> Vec<&str> {
    record.keys().map(String::as_str).collect()
}

#[test]
fn ZiFTSelectFieldsDropsUnlisted() {
    let input = records(json!([
        {"name": "Alice", "amount": 100},
        {"name": "Bob", "amount": 50},
    ]));

    let output = select_fields(&input, &["name".to_string()]).unwrap();
    assert_eq!(output, records(json!([{"name": "Alice"}, {"name": "Bob"}])));
}

#[test]
fn ZiFTSelectFieldsFollowsListedOrder() {
    let input = records(json!([{"a": 1, "b": 2, "c": 3}]));
    let fields = vec!["c".to_string(), "a".to_string()];

    let output = select_fields(&input, &fields).unwrap();
    assert_eq!(keys(&output[0]), vec!["c", "a"]);
}

#[test]
fn ZiFTSelectFieldsResolvesDottedPaths() {
    let input = records(json!([{"order": "A1", "user": {"name": "Ann"}}]));
    let fields = vec!["order".to_string(), "user.name".to_string()];

    let output = select_fields(&input, &fields).unwrap();
    assert_eq!(output[0].get("user.name"), Some(&json!("Ann")));
}

#[test]
fn ZiFTSelectFieldsRejectsEmptyName() {
    let input = records(json!([{"a": 1}]));
    assert!(select_fields(&input, &["".to_string()]).is_err());
}

#[test]
fn ZiFTCustomMappingRenamesTransformsAndDrops() {
    let input = records(json!([
        {"_id": "x1", "amount": 12.5, "user": {"name": "Ann"}, "secret": "hidden"},
    ]));
    let mapping = ZiFieldMapping::new()
        .field("user", ZiFieldDescriptor::named("Customer").with_transform(ZiTransform::nested("name")))
        .unwrap()
        .field("amount", ZiFieldDescriptor::named("Amount").with_transform(ZiTransform::currency("$")))
        .unwrap()
        .field("_id", ZiFieldDescriptor::default())
        .unwrap();

    let output = apply_custom_mapping(&input, &mapping).unwrap();
    assert_eq!(keys(&output[0]), vec!["Customer", "Amount", "_id"]);
    assert_eq!(output[0].get("Customer"), Some(&json!("Ann")));
    assert_eq!(output[0].get("Amount"), Some(&json!("$12.50")));
    assert!(output[0].get("secret").is_none());
}

#[test]
fn ZiFTCustomMappingTransformSeesOriginalRecord() {
    let input = records(json!([{"first": "Ann", "last": "Lee"}]));
    let mapping = ZiFieldMapping::new()
        .field("first", ZiFieldDescriptor::named("First"))
        .unwrap()
        .field(
            "last",
            ZiFieldDescriptor::named("Full Name")
                .with_transform(ZiTransform::concat(["first", "last"], " ")),
        )
        .unwrap();

    let output = apply_custom_mapping(&input, &mapping).unwrap();
    assert_eq!(output[0].get("Full Name"), Some(&json!("Ann Lee")));
}

#[test]
fn ZiFTCustomMappingPropagatesTransformErrors() {
    let input = records(json!([{"createdAt": "not a date"}]));
    let mapping = ZiFieldMapping::new()
        .field("createdAt", ZiFieldDescriptor::named("Created").with_transform(ZiTransform::date("%Y")))
        .unwrap();

    let operator = ZiCustomMapping::new(mapping);
    let err = execute_operator(&operator, input).unwrap_err();
    assert!(matches!(err, ZiError::Transform { ref field, .. } if field == "createdAt"));
}

#[test]
fn ZiFTFieldMappingDeserializesFromConfig() {
    let mapping: ZiFieldMapping = serde_json::from_value(json!({
        "isActive": {"display_name": "Active", "transform": {"type": "boolean"}},
        "email": "Email"
    }))
    .unwrap();

    assert_eq!(mapping.len(), 2);
    assert_eq!(mapping.display_names(), vec!["Active", "Email"]);

    let output = mapping
        .apply_to(&ZiRecord::new().with("email", "a@b.c").with("isActive", false))
        .unwrap();
    assert_eq!(output.get("Active"), Some(&json!("No")));
}

#[test]
fn ZiFTFieldMappingRejectsBadEntries() {
    let result: Result<ZiFieldMapping, _> =
        serde_json::from_value(json!({"amount": {"transform": {"type": "teleport"}}}));
    assert!(result.is_err());
}

#[test]
fn ZiFTFieldFactoriesBuildOperators() {
    let select = field_select_factory(&json!({"fields": ["name"]})).unwrap();
    assert_eq!(select.name(), "field.select");

    let map = field_map_factory(&json!({"mapping": {"name": "Name"}})).unwrap();
    assert_eq!(map.name(), "field.map");

    let output = map.apply(records(json!([{"name": "Ann", "x": 1}]))).unwrap();
    assert_eq!(output[0].fields().len(), 1);
    assert_eq!(output[0].get("Name"), Some(&json!("Ann")));

    assert!(field_select_factory(&json!({"fields": [1]})).is_err());
    assert!(field_map_factory(&json!({"mapping": []})).is_err());
}

#[test]
fn ZiFTSelectFieldsRejectsDuplicates() {
    let input = records(json!([{"name": "Alice", "amount": 100}]));

    let err = select_fields(&input, &["name".to_string(), "amount".to_string(), "name".to_string()])
        .unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("name"));

    assert!(field_select_factory(&json!({"fields": ["amount", "amount"]})).is_err());
}

#[test]
fn ZiFTFieldMappingRejectsDuplicateOutputNames() {
    let err = ZiFieldMapping::new()
        .field("firstName", ZiFieldDescriptor::named("Name"))
        .unwrap()
        .field("lastName", ZiFieldDescriptor::named("Name"))
        .unwrap_err();
    assert!(err.is_validation());

    // A source field without a display name keeps its own path as the column.
    assert!(ZiFieldMapping::new()
        .field("email", ZiFieldDescriptor::default())
        .unwrap()
        .field("contact", ZiFieldDescriptor::named("email"))
        .is_err());

    let raw = json!({"firstName": "Name", "lastName": "Name"});
    assert!(serde_json::from_value::<ZiFieldMapping>(raw).is_err());
}
