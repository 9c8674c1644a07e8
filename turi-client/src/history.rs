//! Ticket history: filter, list and running totals
//!
//! The held list is always replaced wholesale by the answer of the most
//! recently started query, and the totals are recomputed from that list in
//! the same step. A query that resolves after a newer one was started is
//! dropped.

use rust_decimal::Decimal;
use serde::Serialize;
use shared::{LineItem, LocationSummary, Ticket, TicketFilter, UserSummary};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::error::{ClientResult, QueryError};
use crate::http::HttpTransport;
use crate::sequence::{RequestSequence, Resolution};

/// Totals derived from the loaded ticket list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilteredTotals {
    pub total_amount_sum: Decimal,
    pub count: usize,
    /// `total_amount_sum / count`, or 0 for an empty list
    pub average: Decimal,
}

impl FilteredTotals {
    pub fn from_tickets(tickets: &[Ticket]) -> Self {
        let count = tickets.len();
        let total_amount_sum: Decimal = tickets.iter().map(|t| t.total_amount).sum();
        let average = if count == 0 {
            Decimal::ZERO
        } else {
            total_amount_sum / Decimal::from(count)
        };
        Self {
            total_amount_sum,
            count,
            average,
        }
    }
}

/// Choices for the user and location filter fields
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterOptions {
    pub users: Vec<UserSummary>,
    pub locations: Vec<LocationSummary>,
}

/// Visible history: the filter that produced it, its tickets and totals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryState {
    pub filter: TicketFilter,
    pub tickets: Vec<Ticket>,
    pub totals: FilteredTotals,
}

impl HistoryState {
    pub fn new(filter: TicketFilter, tickets: Vec<Ticket>) -> Self {
        let totals = FilteredTotals::from_tickets(&tickets);
        Self {
            filter,
            tickets,
            totals,
        }
    }

    pub fn find(&self, ticket_id: i64) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.id == ticket_id)
    }
}

/// A ticket picked from the visible list, with its line items
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketDetail {
    pub ticket: Ticket,
    /// In the order the service returned them
    pub items: Vec<LineItem>,
}

/// Filter & totals engine for the ticket history view
#[derive(Debug)]
pub struct HistoryView<T: HttpTransport> {
    api: Arc<ApiClient<T>>,
    sequence: RequestSequence,
    filter: RwLock<TicketFilter>,
    state: RwLock<Arc<HistoryState>>,
    options: RwLock<Option<Arc<FilterOptions>>>,
}

impl<T: HttpTransport> HistoryView<T> {
    /// New view with today's filter and an empty list
    pub fn new(api: Arc<ApiClient<T>>) -> Self {
        Self::with_filter(api, TicketFilter::today())
    }

    pub fn with_filter(api: Arc<ApiClient<T>>, filter: TicketFilter) -> Self {
        Self {
            api,
            sequence: RequestSequence::new(),
            state: RwLock::new(Arc::new(HistoryState::new(filter.clone(), Vec::new()))),
            filter: RwLock::new(filter),
            options: RwLock::new(None),
        }
    }

    /// Load user and location choices once per view activation
    ///
    /// Independent of [`HistoryView::apply_filter`]: a failure here leaves
    /// the history queries fully usable.
    pub async fn bootstrap(&self) -> ClientResult<Arc<FilterOptions>> {
        let (users, locations) = tokio::try_join!(self.api.users(), self.api.locations())?;
        let options = Arc::new(FilterOptions { users, locations });
        *self.options.write().await = Some(options.clone());
        info!(
            users = options.users.len(),
            locations = options.locations.len(),
            "Filter options loaded"
        );
        Ok(options)
    }

    pub async fn options(&self) -> Option<Arc<FilterOptions>> {
        self.options.read().await.clone()
    }

    /// Filter currently being edited
    pub async fn filter(&self) -> TicketFilter {
        self.filter.read().await.clone()
    }

    /// Replace the edited filter; does not refetch
    pub async fn set_filter(&self, filter: TicketFilter) {
        *self.filter.write().await = filter;
    }

    /// Edit one or more filter fields; does not refetch
    pub async fn update_filter(&self, edit: impl FnOnce(&mut TicketFilter)) {
        edit(&mut *self.filter.write().await);
    }

    /// Query tickets for `filter` and publish the result
    pub async fn apply_filter(
        &self,
        filter: TicketFilter,
    ) -> Result<Resolution<Arc<HistoryState>>, QueryError> {
        *self.filter.write().await = filter.clone();
        let token = self.sequence.begin();
        let query = filter.to_query();

        let result = self.api.tickets(&query).await;

        let mut visible = self.state.write().await;
        if !self.sequence.is_latest(token) {
            warn!(token = token.value(), "Discarding superseded ticket history result");
            return Ok(Resolution::Superseded);
        }

        let tickets = result?;
        let state = Arc::new(HistoryState::new(filter, tickets));
        *visible = state.clone();
        info!(
            token = token.value(),
            count = state.totals.count,
            total = %state.totals.total_amount_sum,
            "Ticket history updated"
        );
        Ok(Resolution::Applied(state))
    }

    /// Re-run the query for the edited filter
    pub async fn refresh(&self) -> Result<Resolution<Arc<HistoryState>>, QueryError> {
        let filter = self.filter().await;
        self.apply_filter(filter).await
    }

    /// Currently visible history
    pub async fn state(&self) -> Arc<HistoryState> {
        self.state.read().await.clone()
    }

    /// Look up a ticket in the visible list
    pub async fn find_ticket(&self, ticket_id: i64) -> Option<Ticket> {
        self.state.read().await.find(ticket_id).cloned()
    }

    /// Line items of a ticket, for detail or export
    pub async fn ticket_items(&self, ticket: &Ticket) -> ClientResult<Vec<LineItem>> {
        self.api.ticket_items(ticket.id).await
    }

    /// Open a ticket from the visible list
    ///
    /// `Ok(None)` when the ticket is not part of the current result set.
    pub async fn select(&self, ticket_id: i64) -> ClientResult<Option<TicketDetail>> {
        let Some(ticket) = self.find_ticket(ticket_id).await else {
            return Ok(None);
        };
        let items = self.ticket_items(&ticket).await?;
        Ok(Some(TicketDetail { ticket, items }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn ticket(id: i64, cents: i64) -> Ticket {
        Ticket {
            id,
            correlative_number: 1000 + id,
            created_at: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            username: "ana".into(),
            location_name: "Centro".into(),
            payment_type: "cash".into(),
            total_amount: Decimal::new(cents, 2),
        }
    }

    #[test]
    fn test_empty_totals_are_zero() {
        let totals = FilteredTotals::from_tickets(&[]);
        assert_eq!(totals, FilteredTotals::default());
        assert_eq!(totals.average, Decimal::ZERO);
        assert_eq!(totals.count, 0);
    }

    #[test]
    fn test_totals_sum_count_average() {
        let totals = FilteredTotals::from_tickets(&[ticket(1, 1000), ticket(2, 2000), ticket(3, 4500)]);
        assert_eq!(totals.total_amount_sum, Decimal::new(7500, 2));
        assert_eq!(totals.count, 3);
        assert_eq!(totals.average, Decimal::from(25));
    }

    #[test]
    fn test_state_find() {
        let state = HistoryState::new(TicketFilter::between("", ""), vec![ticket(1, 100), ticket(2, 200)]);
        assert_eq!(state.find(2).map(|t| t.correlative_number), Some(1002));
        assert!(state.find(9).is_none());
    }

    proptest! {
        #[test]
        fn average_times_count_matches_sum(
            cents in prop::collection::vec(0i64..10_000_000, 1..200),
        ) {
            let tickets: Vec<Ticket> = cents
                .iter()
                .enumerate()
                .map(|(i, &c)| ticket(i as i64, c))
                .collect();
            let totals = FilteredTotals::from_tickets(&tickets);

            prop_assert_eq!(totals.count, tickets.len());
            prop_assert_eq!(totals.total_amount_sum, Decimal::new(cents.iter().sum(), 2));
            let diff = (totals.average * Decimal::from(totals.count) - totals.total_amount_sum).abs();
            prop_assert!(diff <= Decimal::new(1, 6), "diff {}", diff);
        }
    }
}
