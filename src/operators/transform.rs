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

//! # Value Transforms
//!
//! Named, pure value transforms used by field mappings. Each transform
//! receives the resolved source value and the full original record, so a
//! transform may read sibling fields. Transforms are plain data and
//! round-trip through JSON/YAML as `{"type": "currency", "symbol": "$"}`.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{Result, ZiError};
use crate::operators::filter::ZiFieldPath;
use crate::operators::sort::parse_timestamp;
use crate::record::{coerce_number, display_value, ZiRecord};

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_decimals() -> usize {
    2
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_fallback() -> String {
    "N/A".to_string()
}

fn default_space() -> String {
    " ".to_string()
}

fn default_list_separator() -> String {
    ", ".to_string()
}

fn default_true_label() -> String {
    "Yes".to_string()
}

fn default_false_label() -> String {
    "No".to_string()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ZiTransform {
    /// Currency text such as `$1234.50`. Null becomes the empty string.
    Currency {
        #[serde(default = "default_currency_symbol")]
        symbol: String,
        #[serde(default = "default_decimals")]
        decimals: usize,
    },
    /// Reformats RFC 3339 / ISO date strings or epoch milliseconds.
    Date {
        #[serde(default = "default_date_format")]
        format: String,
    },
    /// Reads a field out of a nested object, e.g. `sponsor` -> `sponsor.name`.
    Nested {
        path: String,
        #[serde(default = "default_fallback")]
        fallback: String,
    },
    /// Joins sibling fields of the original record.
    Concat {
        fields: Vec<String>,
        #[serde(default = "default_space")]
        separator: String,
    },
    Boolean {
        #[serde(default = "default_true_label")]
        true_label: String,
        #[serde(default = "default_false_label")]
        false_label: String,
    },
    /// Joins an array of primitives into one string.
    Join {
        #[serde(default = "default_list_separator")]
        separator: String,
    },
    Uppercase,
    Lowercase,
    /// Substitutes a fixed value for null or missing fields.
    #[serde(alias = "default")]
    Fallback { value: Value },
    /// Rounds numeric values.
    Number {
        #[serde(default = "default_decimals")]
        decimals: usize,
    },
}

impl ZiTransform {
    pub fn currency(symbol: impl Into<String>) -> Self {
        Self::Currency {
            symbol: symbol.into(),
            decimals: default_decimals(),
        }
    }

    pub fn date(format: impl Into<String>) -> Self {
        Self::Date {
            format: format.into(),
        }
    }

    pub fn nested(path: impl Into<String>) -> Self {
        Self::Nested {
            path: path.into(),
            fallback: default_fallback(),
        }
    }

    pub fn concat<I, S>(fields: I, separator: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Concat {
            fields: fields.into_iter().map(Into::into).collect(),
            separator: separator.into(),
        }
    }

    pub fn yes_no() -> Self {
        Self::Boolean {
            true_label: default_true_label(),
            false_label: default_false_label(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Currency { .. } => "currency",
            Self::Date { .. } => "date",
            Self::Nested { .. } => "nested",
            Self::Concat { .. } => "concat",
            Self::Boolean { .. } => "boolean",
            Self::Join { .. } => "join",
            Self::Uppercase => "uppercase",
            Self::Lowercase => "lowercase",
            Self::Fallback { .. } => "fallback",
            Self::Number { .. } => "number",
        }
    }

    /// Applies the transform to the value resolved for `field`.
    ///
    /// `record` is the untouched source record, never the output in progress.
    pub fn apply(&self, field: &str, value: Option<&Value>, record: &ZiRecord) -> Result<Value> {
        let value = value.filter(|value| !value.is_null());

        match self {
            Self::Currency { symbol, decimals } => {
                let Some(value) = value else {
                    return Ok(Value::String(String::new()));
                };
                let amount = coerce_number(value).ok_or_else(|| {
                    ZiError::transform(field, format!("'{}' is not a monetary amount", display_value(value)))
                })?;
                let sign = if amount < 0.0 { "-" } else { "" };
                Ok(Value::String(format!(
                    "{sign}{symbol}{:.*}",
                    *decimals,
                    amount.abs()
                )))
            }
            Self::Date { format } => {
                let Some(value) = value else {
                    return Ok(Value::String(String::new()));
                };
                let millis = match value {
                    Value::String(text) => parse_timestamp(text),
                    Value::Number(number) => number.as_i64(),
                    _ => None,
                }
                .ok_or_else(|| {
                    ZiError::transform(field, format!("'{}' is not a date", display_value(value)))
                })?;
                let datetime = DateTime::<Utc>::from_timestamp_millis(millis)
                    .ok_or_else(|| ZiError::transform(field, "date out of range"))?;
                let mut text = String::new();
                write!(text, "{}", datetime.format(format))
                    .map_err(|_| ZiError::transform(field, format!("invalid date format '{format}'")))?;
                Ok(Value::String(text))
            }
            Self::Nested { path, fallback } => {
                let inner = match value {
                    Some(Value::Object(map)) => {
                        let nested = ZiRecord::from_fields(map.clone());
                        ZiFieldPath::parse(path)
                            .map_err(|err| ZiError::transform(field, err.to_string()))?
                            .resolve(&nested)
                            .filter(|value| !value.is_null())
                            .cloned()
                    }
                    _ => None,
                };
                Ok(inner.unwrap_or_else(|| Value::String(fallback.clone())))
            }
            Self::Concat { fields, separator } => {
                let mut parts = Vec::with_capacity(fields.len());
                for sibling in fields {
                    let path = ZiFieldPath::parse(sibling)
                        .map_err(|err| ZiError::transform(field, err.to_string()))?;
                    let text = path.resolve(record).map(display_value).unwrap_or_default();
                    if !text.is_empty() {
                        parts.push(text);
                    }
                }
                Ok(Value::String(parts.join(separator)))
            }
            Self::Boolean {
                true_label,
                false_label,
            } => {
                let label = if value.is_some_and(is_truthy) {
                    true_label
                } else {
                    false_label
                };
                Ok(Value::String(label.clone()))
            }
            Self::Join { separator } => Ok(Value::String(match value {
                Some(Value::Array(items)) => items
                    .iter()
                    .map(display_value)
                    .collect::<Vec<_>>()
                    .join(separator),
                Some(other) => display_value(other),
                None => String::new(),
            })),
            Self::Uppercase => Ok(Value::String(
                value.map(display_value).unwrap_or_default().to_uppercase(),
            )),
            Self::Lowercase => Ok(Value::String(
                value.map(display_value).unwrap_or_default().to_lowercase(),
            )),
            Self::Fallback { value: replacement } => {
                Ok(value.cloned().unwrap_or_else(|| replacement.clone()))
            }
            Self::Number { decimals } => {
                let Some(value) = value else {
                    return Ok(Value::Null);
                };
                let number = coerce_number(value).ok_or_else(|| {
                    ZiError::transform(field, format!("'{}' is not numeric", display_value(value)))
                })?;
                let scale = 10f64.powi(*decimals as i32);
                Ok(Value::from((number * scale).round() / scale))
            }
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
