//! Ticket history filter
//!
//! `TicketFilter` is what the operator edits; `TicketQuery` is what goes on
//! the wire. Empty fields never reach the query string.

use serde::{Deserialize, Serialize};

use crate::time::today_local;

/// Active history filter
///
/// Dates are free-form calendar dates (`YYYY-MM-DD`) and are passed through
/// untouched, including inverted ranges. The server decides what is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketFilter {
    pub date_from: String,
    pub date_to: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub location_id: Option<String>,
}

impl TicketFilter {
    /// Filter covering today only (local calendar date)
    pub fn today() -> Self {
        let today = today_local();
        Self::between(today.clone(), today)
    }

    /// Filter covering an inclusive date range
    pub fn between(date_from: impl Into<String>, date_to: impl Into<String>) -> Self {
        Self {
            date_from: date_from.into(),
            date_to: date_to.into(),
            user_id: None,
            location_id: None,
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_location(mut self, location_id: impl Into<String>) -> Self {
        self.location_id = Some(location_id.into());
        self
    }

    /// Wire query with every empty field dropped
    pub fn to_query(&self) -> TicketQuery {
        TicketQuery {
            date_from: non_empty(Some(&self.date_from)),
            date_to: non_empty(Some(&self.date_to)),
            user_id: non_empty(self.user_id.as_ref()),
            location_id: non_empty(self.location_id.as_ref()),
        }
    }
}

impl Default for TicketFilter {
    fn default() -> Self {
        Self::today()
    }
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.is_empty()).cloned()
}

/// `GET /tickets` query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
}

impl TicketQuery {
    /// Encode as a query string (no leading `?`)
    pub fn to_query_string(&self) -> Result<String, serde_qs::Error> {
        serde_qs::to_string(self)
    }

    /// Parse a query string (leading `?` allowed)
    pub fn parse(query: &str) -> Result<Self, serde_qs::Error> {
        serde_qs::from_str(query.trim_start_matches('?'))
    }

    /// Names of the parameters that will be sent
    pub fn keys(&self) -> Vec<&'static str> {
        let mut keys = Vec::with_capacity(4);
        if self.date_from.is_some() {
            keys.push("date_from");
        }
        if self.date_to.is_some() {
            keys.push("date_to");
        }
        if self.user_id.is_some() {
            keys.push("user_id");
        }
        if self.location_id.is_some() {
            keys.push("location_id");
        }
        keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys().is_empty()
    }
}
