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

//! # Operators Module
//!
//! The stages of the export pipeline. Each stage implements [`ZiOperator`]
//! and also exposes a slice-based helper that leaves its input untouched.
//!
//! ## Operator Categories
//!
//! - **filter**: Field paths and AND-combined filters (exact, substring, range, membership)
//! - **sort**: Stable single-field sort with missing values last
//! - **limit**: First-N truncation
//! - **field**: Plain projection and rename/transform mappings
//! - **transform**: Named value transforms used by mappings
//!
//! [`ZiOperator`]: crate::operator::ZiOperator

pub mod field;
pub mod filter;
pub mod limit;
pub mod sort;
pub mod transform;
