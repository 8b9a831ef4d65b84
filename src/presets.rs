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

//! # Predefined Field Mappings
//!
//! Display mappings for the record kinds served by the dashboard backend.
//! They are configuration data: raw backend field names mapped to column
//! titles, with currency, date and nested-object transforms attached.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, ZiError};
use crate::operators::field::{ZiFieldDescriptor, ZiFieldMapping};
use crate::operators::transform::ZiTransform;

/// Record families exported from the dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZiRecordKind {
    Users,
    Orders,
    Payments,
    Commissions,
    Withdrawals,
    Products,
}

impl ZiRecordKind {
    pub const ALL: [ZiRecordKind; 6] = [
        ZiRecordKind::Users,
        ZiRecordKind::Orders,
        ZiRecordKind::Payments,
        ZiRecordKind::Commissions,
        ZiRecordKind::Withdrawals,
        ZiRecordKind::Products,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ZiRecordKind::Users => "users",
            ZiRecordKind::Orders => "orders",
            ZiRecordKind::Payments => "payments",
            ZiRecordKind::Commissions => "commissions",
            ZiRecordKind::Withdrawals => "withdrawals",
            ZiRecordKind::Products => "products",
        }
    }

    /// Title of the data sheet in spreadsheet exports.
    pub fn sheet_name(&self) -> &'static str {
        match self {
            ZiRecordKind::Users => "Users",
            ZiRecordKind::Orders => "Orders",
            ZiRecordKind::Payments => "Payments",
            ZiRecordKind::Commissions => "Commissions",
            ZiRecordKind::Withdrawals => "Withdrawals",
            ZiRecordKind::Products => "Products",
        }
    }

    pub fn default_mapping(&self) -> ZiFieldMapping {
        // Entries are static and their paths non-empty.
        let built = match self {
            ZiRecordKind::Users => users_mapping(),
            ZiRecordKind::Orders => orders_mapping(),
            ZiRecordKind::Payments => payments_mapping(),
            ZiRecordKind::Commissions => commissions_mapping(),
            ZiRecordKind::Withdrawals => withdrawals_mapping(),
            ZiRecordKind::Products => products_mapping(),
        };
        built.unwrap_or_default()
    }
}

impl fmt::Display for ZiRecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZiRecordKind {
    type Err = ZiError;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_lowercase();
        ZiRecordKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lowered)
            .ok_or_else(|| ZiError::validation(format!("unknown record kind '{s}'")))
    }
}

fn plain(name: &str) -> ZiFieldDescriptor {
    ZiFieldDescriptor::named(name)
}

fn money(name: &str) -> ZiFieldDescriptor {
    ZiFieldDescriptor::named(name).with_transform(ZiTransform::currency("$"))
}

fn date(name: &str) -> ZiFieldDescriptor {
    ZiFieldDescriptor::named(name).with_transform(ZiTransform::date("%Y-%m-%d %H:%M"))
}

fn person(name: &str) -> ZiFieldDescriptor {
    ZiFieldDescriptor::named(name).with_transform(ZiTransform::nested("name"))
}

fn users_mapping() -> Result<ZiFieldMapping> {
    ZiFieldMapping::new()
        .field("_id", plain("User ID"))?
        .field("name", plain("Name"))?
        .field("email", plain("Email"))?
        .field("phone", plain("Phone"))?
        .field("referralCode", plain("Referral Code"))?
        .field("sponsor", person("Sponsor"))?
        .field("level", plain("Level"))?
        .field("walletBalance", money("Wallet Balance"))?
        .field(
            "isActive",
            ZiFieldDescriptor::named("Active").with_transform(ZiTransform::yes_no()),
        )?
        .field("createdAt", date("Joined At"))
}

fn orders_mapping() -> Result<ZiFieldMapping> {
    ZiFieldMapping::new()
        .field("orderNumber", plain("Order Number"))?
        .field("user", person("Customer"))?
        .field(
            "items",
            ZiFieldDescriptor::named("Items").with_transform(ZiTransform::Join {
                separator: ", ".to_string(),
            }),
        )?
        .field("totalAmount", money("Total Amount"))?
        .field("status", plain("Status"))?
        .field("paymentStatus", plain("Payment Status"))?
        .field("createdAt", date("Order Date"))
}

fn payments_mapping() -> Result<ZiFieldMapping> {
    ZiFieldMapping::new()
        .field("transactionId", plain("Transaction ID"))?
        .field("user", person("User"))?
        .field("amount", money("Amount"))?
        .field("method", plain("Payment Method"))?
        .field("status", plain("Status"))?
        .field("createdAt", date("Paid At"))
}

fn commissions_mapping() -> Result<ZiFieldMapping> {
    ZiFieldMapping::new()
        .field("user", person("Earner"))?
        .field("fromUser", person("From User"))?
        .field("type", plain("Commission Type"))?
        .field("level", plain("Level"))?
        .field("amount", money("Amount"))?
        .field("status", plain("Status"))?
        .field("createdAt", date("Earned At"))
}

fn withdrawals_mapping() -> Result<ZiFieldMapping> {
    ZiFieldMapping::new()
        .field("user", person("User"))?
        .field("amount", money("Amount"))?
        .field("fee", money("Fee"))?
        .field("method", plain("Method"))?
        .field("status", plain("Status"))?
        .field("requestedAt", date("Requested At"))?
        .field("processedAt", date("Processed At"))
}

fn products_mapping() -> Result<ZiFieldMapping> {
    ZiFieldMapping::new()
        .field("name", plain("Product Name"))?
        .field("sku", plain("SKU"))?
        .field("category", plain("Category"))?
        .field("price", money("Price"))?
        .field("businessVolume", plain("Business Volume"))?
        .field("stock", plain("Stock"))?
        .field(
            "isActive",
            ZiFieldDescriptor::named("Active").with_transform(ZiTransform::yes_no()),
        )
}
