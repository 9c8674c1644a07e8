//! Turi Client - reporting client for the TuriCash back-office
//!
//! Talks to the Transaction Service and the reporting API over HTTP and
//! turns their answers into consistent, read-only views:
//!
//! - [`DashboardView`]: six dashboard queries fanned out together and
//!   swapped in as one [`AggregateSnapshot`] (all or nothing).
//! - [`HistoryView`]: filtered ticket list plus [`FilteredTotals`]
//!   derived from exactly that list.
//!
//! Every outbound call goes through [`ApiClient`], which attaches the
//! bearer credential and turns a 401 into a session-expiry signal.

pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod history;
pub mod http;
pub mod sequence;
pub mod session;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use dashboard::{AggregateSnapshot, DashboardLimits, DashboardQuery, DashboardView};
pub use error::{AggregationError, ClientError, ClientResult, QueryError};
pub use history::{FilterOptions, FilteredTotals, HistoryState, HistoryView, TicketDetail};
pub use http::{ApiReply, ApiRequest, HttpTransport, NetworkTransport};
pub use sequence::{RequestSequence, Resolution, SequenceToken};
pub use session::{
    Credential, CredentialStore, FileCredentialStore, MemoryCredentialStore, Session,
    SessionEvent,
};

// Re-export shared types for convenience
pub use shared::{LineItem, Period, Ticket, TicketFilter, TicketQuery};
