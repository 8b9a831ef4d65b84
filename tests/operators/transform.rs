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
use ziexport::operators::field::apply_custom_mapping;
use ziexport::operators::transform::ZiTransform;
use ziexport::presets::ZiRecordKind;
use ziexport::record::ZiRecord;

fn apply(transform: &ZiTransform, value: Value) -> Value {
    transform
        .apply("field", Some(&value), &ZiRecord::new())
        .unwrap()
}

#[test]
fn ZiFTTransformCurrencyAcceptsNumericStrings() {
    let transform = ZiTransform::Currency {
        symbol: "€".into(),
        decimals: 0,
    };
    assert_eq!(apply(&transform, json!("1234.6")), json!("€1235"));
}

#[test]
fn ZiFTTransformCurrencyRejectsText() {
    let err = ZiTransform::currency("$")
        .apply("amount", Some(&json!("lots")), &ZiRecord::new())
        .unwrap_err();
    assert!(matches!(err, ZiError::Transform { .. }));
}

#[test]
fn ZiFTTransformDateFormatsSeveralInputs() {
    let transform = ZiTransform::date("%Y-%m-%d %H:%M");

    assert_eq!(apply(&transform, json!("2024-01-20T14:45:30Z")), json!("2024-01-20 14:45"));
    assert_eq!(apply(&transform, json!("2024-01-20")), json!("2024-01-20 00:00"));
    assert_eq!(apply(&transform, json!(1705761930000i64)), json!("2024-01-20 14:45"));
    assert_eq!(
        transform.apply("createdAt", None, &ZiRecord::new()).unwrap(),
        json!("")
    );
}

#[test]
fn ZiFTTransformNestedFallsBack() {
    let transform = ZiTransform::nested("name");

    assert_eq!(apply(&transform, json!({"name": "Ann"})), json!("Ann"));
    assert_eq!(apply(&transform, json!({"email": "a@b.c"})), json!("N/A"));
    assert_eq!(apply(&transform, json!("plain")), json!("N/A"));
}

#[test]
fn ZiFTTransformConcatSkipsEmptyParts() {
    let record = ZiRecord::new().with("first", "Ann").with("middle", Value::Null).with("last", "Lee");
    let transform = ZiTransform::concat(["first", "middle", "last"], " ");

    assert_eq!(transform.apply("first", record.get("first"), &record).unwrap(), json!("Ann Lee"));
}

#[test]
fn ZiFTTransformBooleanLabels() {
    let transform = ZiTransform::yes_no();

    assert_eq!(apply(&transform, json!(true)), json!("Yes"));
    assert_eq!(apply(&transform, json!(0)), json!("No"));
    assert_eq!(transform.apply("x", None, &ZiRecord::new()).unwrap(), json!("No"));
}

#[test]
fn ZiFTTransformJoinAndCase() {
    let join = ZiTransform::Join { separator: " | ".into() };
    assert_eq!(apply(&join, json!(["a", 1, true])), json!("a | 1 | true"));

    assert_eq!(apply(&ZiTransform::Uppercase, json!("paid")), json!("PAID"));
    assert_eq!(apply(&ZiTransform::Lowercase, json!("PAID")), json!("paid"));
}

#[test]
fn ZiFTTransformFallbackReplacesMissing() {
    let transform = ZiTransform::Fallback { value: json!("-") };

    assert_eq!(transform.apply("x", None, &ZiRecord::new()).unwrap(), json!("-"));
    assert_eq!(transform.apply("x", Some(&Value::Null), &ZiRecord::new()).unwrap(), json!("-"));
    assert_eq!(apply(&transform, json!(3)), json!(3));
}

#[test]
fn ZiFTTransformNumberRounds() {
    let transform = ZiTransform::Number { decimals: 1 };

    assert_eq!(apply(&transform, json!(2.26)), json!(2.3));
    assert!(transform
        .apply("x", Some(&json!("abc")), &ZiRecord::new())
        .is_err());
}

#[test]
fn ZiFTTransformNamesMatchSerdeTags() {
    let transforms = vec![
        ZiTransform::currency("$"),
        ZiTransform::date("%Y"),
        ZiTransform::nested("name"),
        ZiTransform::yes_no(),
        ZiTransform::Uppercase,
    ];
    for transform in transforms {
        let value = serde_json::to_value(&transform).unwrap();
        assert_eq!(value["type"], json!(transform.name()));
    }
}

#[test]
fn ZiFTPresetOrdersMappingFormatsRecord() {
    let order = ZiRecord::from_value(json!({
        "_id": "665f",
        "orderNumber": "ORD-1",
        "user": {"name": "Ann", "email": "ann@example.com"},
        "items": ["Starter Kit", "Refill"],
        "totalAmount": 149.9,
        "status": "completed",
        "paymentStatus": "paid",
        "createdAt": "2024-01-20T14:45:30Z"
    }))
    .unwrap();

    let output = apply_custom_mapping(&[order], &ZiRecordKind::Orders.default_mapping()).unwrap();
    assert_eq!(
        output[0].clone().into_value(),
        json!({
            "Order Number": "ORD-1",
            "Customer": "Ann",
            "Items": "Starter Kit, Refill",
            "Total Amount": "$149.90",
            "Status": "completed",
            "Payment Status": "paid",
            "Order Date": "2024-01-20 14:45"
        })
    );
}

#[test]
fn ZiFTPresetUsersMappingHandlesMissingSponsor() {
    let user = ZiRecord::from_value(json!({
        "_id": "u1",
        "name": "Ann",
        "email": "ann@example.com",
        "isActive": true,
        "walletBalance": 0,
        "createdAt": "2024-01-20"
    }))
    .unwrap();

    let output = apply_custom_mapping(&[user], &ZiRecordKind::Users.default_mapping()).unwrap();
    let row = &output[0];
    assert_eq!(row.get("Sponsor"), Some(&json!("N/A")));
    assert_eq!(row.get("Phone"), Some(&Value::Null));
    assert_eq!(row.get("Active"), Some(&json!("Yes")));
    assert_eq!(row.get("Wallet Balance"), Some(&json!("$0.00")));
}

#[test]
fn ZiFTPresetKindsRoundTripNames() {
    for kind in ZiRecordKind::ALL {
        let parsed: ZiRecordKind = kind.as_str().parse().unwrap();
        assert_eq!(parsed, kind);
        assert!(kind.sheet_name().len() <= 31);
    }
}
