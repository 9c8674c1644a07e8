//! Metrics aggregation
//!
//! The dashboard is built from six independent reads that are issued
//! together and joined. The snapshot is published only when all six
//! succeed; a single failure fails the whole cycle and leaves the
//! previously published snapshot untouched.

use rust_decimal::Decimal;
use serde::Serialize;
use shared::{
    DashboardStats, LocationSales, Period, PeriodSales, RecentActivity, SalesToday, TopItem,
};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::api::ApiClient;
use crate::error::{AggregationError, ClientError};
use crate::http::HttpTransport;
use crate::sequence::{RequestSequence, Resolution};

/// One of the six dashboard sub-queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DashboardQuery {
    Stats,
    SalesToday,
    SalesByPeriod,
    TopItems,
    SalesByLocation,
    RecentActivity,
}

impl DashboardQuery {
    pub const ALL: [DashboardQuery; 6] = [
        Self::Stats,
        Self::SalesToday,
        Self::SalesByPeriod,
        Self::TopItems,
        Self::SalesByLocation,
        Self::RecentActivity,
    ];

    /// Endpoint path
    pub fn path(&self) -> &'static str {
        match self {
            Self::Stats => "/dashboard/stats",
            Self::SalesToday => "/dashboard/sales-today",
            Self::SalesByPeriod => "/dashboard/sales-by-period",
            Self::TopItems => "/dashboard/top-items",
            Self::SalesByLocation => "/dashboard/sales-by-location",
            Self::RecentActivity => "/dashboard/recent-activity",
        }
    }
}

impl fmt::Display for DashboardQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Requested series lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardLimits {
    /// Buckets of the sales time series
    pub series: usize,
    pub top_items: usize,
    pub recent_activity: usize,
}

impl Default for DashboardLimits {
    fn default() -> Self {
        Self {
            series: 7,
            top_items: 5,
            recent_activity: 5,
        }
    }
}

/// Consistent dashboard snapshot, all fields from the same query cycle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateSnapshot {
    pub period: Period,
    pub total_sales: Decimal,
    pub total_tickets: i64,
    pub average_ticket: Decimal,
    pub total_items: i64,
    pub total_users: i64,
    pub total_locations: i64,
    /// Today's figures
    pub today: SalesToday,
    /// Ascending by period, at most `limits.series` buckets
    pub sales_by_period: Vec<PeriodSales>,
    /// Descending by quantity sold, at most `limits.top_items`
    pub top_items: Vec<TopItem>,
    /// Locations with nonzero sales
    pub sales_by_location: Vec<LocationSales>,
    /// Newest first, at most `limits.recent_activity`
    pub recent_activity: Vec<RecentActivity>,
}

impl AggregateSnapshot {
    /// Assemble a snapshot from the six raw answers
    ///
    /// Ordering and length rules are enforced here so the presentation
    /// layer can consume the rows verbatim whatever the server returned.
    #[allow(clippy::too_many_arguments)]
    pub fn assemble(
        period: Period,
        limits: DashboardLimits,
        stats: DashboardStats,
        today: SalesToday,
        mut sales_by_period: Vec<PeriodSales>,
        mut top_items: Vec<TopItem>,
        mut sales_by_location: Vec<LocationSales>,
        mut recent_activity: Vec<RecentActivity>,
    ) -> Self {
        // Keep the most recent buckets
        sales_by_period.sort_by_cached_key(PeriodSales::period_key);
        if sales_by_period.len() > limits.series {
            sales_by_period.drain(..sales_by_period.len() - limits.series);
        }

        top_items.sort_by(|a, b| b.total_quantity.cmp(&a.total_quantity));
        top_items.truncate(limits.top_items);

        sales_by_location.retain(|row| !row.total_sales.is_zero());

        recent_activity.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        recent_activity.truncate(limits.recent_activity);

        Self {
            period,
            total_sales: stats.total_sales,
            total_tickets: stats.total_tickets,
            average_ticket: stats.average_ticket,
            total_items: stats.total_items,
            total_users: stats.total_users,
            total_locations: stats.total_locations,
            today,
            sales_by_period,
            top_items,
            sales_by_location,
            recent_activity,
        }
    }
}

/// Tag a sub-query's failure with the query it belongs to
async fn tagged<R>(
    query: DashboardQuery,
    call: impl Future<Output = Result<R, ClientError>>,
) -> Result<R, AggregationError> {
    call.await.map_err(|source| AggregationError { query, source })
}

/// Fire all six dashboard queries and join them (fail-together)
pub async fn fetch_snapshot<T: HttpTransport>(
    api: &ApiClient<T>,
    period: Period,
    limits: DashboardLimits,
) -> Result<AggregateSnapshot, AggregationError> {
    let (stats, today, by_period, top, by_location, recent) = tokio::try_join!(
        tagged(DashboardQuery::Stats, api.dashboard_stats()),
        tagged(DashboardQuery::SalesToday, api.sales_today()),
        tagged(
            DashboardQuery::SalesByPeriod,
            api.sales_by_period(period, limits.series)
        ),
        tagged(DashboardQuery::TopItems, api.top_items(limits.top_items)),
        tagged(DashboardQuery::SalesByLocation, api.sales_by_location()),
        tagged(
            DashboardQuery::RecentActivity,
            api.recent_activity(limits.recent_activity)
        )
    )?;

    Ok(AggregateSnapshot::assemble(
        period,
        limits,
        stats,
        today,
        by_period,
        top,
        by_location,
        recent,
    ))
}

/// Dashboard state holder
///
/// Owns the published snapshot. Each [`DashboardView::load_dashboard`] call
/// builds its snapshot privately and swaps it in only if it is still the
/// most recently started call.
#[derive(Debug)]
pub struct DashboardView<T: HttpTransport> {
    api: Arc<ApiClient<T>>,
    sequence: RequestSequence,
    snapshot: RwLock<Option<Arc<AggregateSnapshot>>>,
}

impl<T: HttpTransport> DashboardView<T> {
    pub fn new(api: Arc<ApiClient<T>>) -> Self {
        Self {
            api,
            sequence: RequestSequence::new(),
            snapshot: RwLock::new(None),
        }
    }

    /// Load a fresh snapshot
    ///
    /// Returns [`Resolution::Superseded`] (and publishes nothing) when a
    /// newer call was started before this one resolved, whether this one
    /// succeeded or failed.
    pub async fn load_dashboard(
        &self,
        period: Period,
        limits: DashboardLimits,
    ) -> Result<Resolution<Arc<AggregateSnapshot>>, AggregationError> {
        let token = self.sequence.begin();
        let result = fetch_snapshot(&self.api, period, limits).await;

        let mut published = self.snapshot.write().await;
        if !self.sequence.is_latest(token) {
            warn!(token = token.value(), %period, "Discarding superseded dashboard result");
            return Ok(Resolution::Superseded);
        }

        match result {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                *published = Some(snapshot.clone());
                info!(
                    token = token.value(),
                    %period,
                    tickets = snapshot.total_tickets,
                    "Dashboard snapshot published"
                );
                Ok(Resolution::Applied(snapshot))
            }
            Err(e) => {
                error!(query = %e.query, error = %e.source, "Dashboard aggregation failed");
                Err(e)
            }
        }
    }

    /// Currently published snapshot
    pub async fn snapshot(&self) -> Option<Arc<AggregateSnapshot>> {
        self.snapshot.read().await.clone()
    }
}
