//! Data models
//!
//! Read-only views of records owned by the Transaction Service and the
//! reporting API. Field names follow the JSON wire format.

pub mod catalog;
pub mod dashboard;
pub mod filter;
pub mod ticket;

pub use catalog::{LocationSummary, UserSummary};
pub use dashboard::{
    DashboardStats, LabelPart, LocationSales, ParsePeriodError, Period, PeriodSales,
    RecentActivity, SalesToday, TopItem,
};
pub use filter::{TicketFilter, TicketQuery};
pub use ticket::{LineItem, Ticket};
