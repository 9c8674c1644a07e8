//! Reporting API rows consumed by the dashboard

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::ticket::Ticket;
use crate::serde_util::{lenient_decimal, lenient_i64};

/// Bucket size of the sales time series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Day,
    Week,
    Month,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown period '{0}' (expected day, week or month)")]
pub struct ParsePeriodError(pub String);

impl FromStr for Period {
    type Err = ParsePeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            _ => Err(ParsePeriodError(s.to_string())),
        }
    }
}

/// `GET /dashboard/stats`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub total_sales: Decimal,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub total_tickets: i64,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub average_ticket: Decimal,
    /// Active catalog items
    #[serde(default, deserialize_with = "lenient_i64")]
    pub total_items: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub total_users: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub total_locations: i64,
}

/// `GET /dashboard/sales-today`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesToday {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub ticket_count: i64,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub total_sales: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub avg_ticket: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub max_ticket: Decimal,
}

/// One bucket of `GET /dashboard/sales-by-period`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSales {
    /// Bucket label (`2024-01-22`, `2024-W04`, `2024-01`); order with
    /// [`PeriodSales::period_key`]
    pub period: String,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub total_sales: Decimal,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub ticket_count: i64,
}

/// Piece of a bucket label; digit runs compare numerically
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum LabelPart {
    Number(u64),
    Text(String),
}

impl PeriodSales {
    /// Chronological sort key of the label
    ///
    /// Zero padding does not matter: `2024-W9` sorts before `2024-W10`.
    pub fn period_key(&self) -> Vec<LabelPart> {
        let mut parts = Vec::new();
        let mut chars = self.period.chars().peekable();
        while let Some(&first) = chars.peek() {
            let digit = first.is_ascii_digit();
            let mut run = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_ascii_digit() != digit {
                    break;
                }
                run.push(c);
                chars.next();
            }
            parts.push(match run.parse::<u64>() {
                Ok(n) if digit => LabelPart::Number(n),
                _ => LabelPart::Text(run),
            });
        }
        parts
    }
}

/// One row of `GET /dashboard/top-items`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopItem {
    pub item_name: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub total_quantity: i64,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub total_revenue: Decimal,
}

/// One row of `GET /dashboard/sales-by-location`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSales {
    pub id: i64,
    pub location_name: String,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub total_sales: Decimal,
}

/// One row of `GET /dashboard/recent-activity`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentActivity {
    #[serde(flatten)]
    pub ticket: Ticket,
    /// Cashier's display name
    #[serde(default)]
    pub full_name: Option<String>,
}

impl RecentActivity {
    pub fn created_at(&self) -> NaiveDateTime {
        self.ticket.created_at
    }
}
