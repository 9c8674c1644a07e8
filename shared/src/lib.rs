//! Shared types for the TuriCash back-office
//!
//! Wire models returned by the Transaction Service and the reporting API,
//! plus the money and timestamp helpers every crate formats with.

pub mod error;
pub mod models;
pub mod money;
pub mod serde_util;
pub mod time;

// Re-exports
pub use error::ApiErrorResponse;
pub use models::{
    DashboardStats, LabelPart, LineItem, LocationSales, LocationSummary, ParsePeriodError, Period,
    PeriodSales, RecentActivity, SalesToday, Ticket, TicketFilter, TicketQuery, TopItem,
    UserSummary,
};
pub use rust_decimal::Decimal;
