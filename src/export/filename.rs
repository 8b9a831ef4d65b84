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

use chrono::{DateTime, SecondsFormat, Utc};

/// Length of `YYYY-MM-DDTHH-MM-SS`.
const STAMP_LEN: usize = 19;

/// Builds `"{prefix}_{timestamp}.{extension}"` for the current time.
///
/// Resolution is one second; two calls within the same second collide.
pub fn generate_filename(prefix: &str, extension: &str) -> String {
    generate_filename_at(prefix, extension, Utc::now())
}

/// Builds a filename for a fixed instant.
pub fn generate_filename_at(prefix: &str, extension: &str, at: DateTime<Utc>) -> String {
    let stamp: String = at
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-")
        .chars()
        .take(STAMP_LEN)
        .collect();
    format!("{}_{}.{}", prefix, stamp, extension.trim_start_matches('.'))
}
