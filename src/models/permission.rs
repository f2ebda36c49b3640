//! Permission model.

use serde::{Deserialize, Serialize};

/// Per-module CRUD flags granted to the signed-in admin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Permission {
    pub module: String,
    #[serde(default)]
    pub create: bool,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub update: bool,
    #[serde(default)]
    pub delete: bool,
}

/// Known permission module names.
pub mod modules {
    pub const PACKAGES: &str = "packages";
    pub const DESTINATIONS: &str = "destinations";
    pub const CONTENT: &str = "content";
    pub const COUPONS: &str = "coupons";
    pub const PROMO_CODES: &str = "promoCodes";
    pub const COMMUNITY: &str = "community";
}
