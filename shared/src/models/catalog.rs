//! Users and locations used to populate filter choices

use serde::{Deserialize, Serialize};

/// Cashier account (subset used by the history filter)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
}

/// Point-of-sale location (subset used by the history filter)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSummary {
    pub id: i64,
    pub name: String,
}
