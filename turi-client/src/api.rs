//! API client: typed endpoints behind one response interceptor

use serde::de::DeserializeOwned;
use shared::error::{ApiErrorResponse, status_message};
use shared::{
    DashboardStats, LineItem, LocationSales, LocationSummary, Period, PeriodSales, RecentActivity,
    SalesToday, Ticket, TicketQuery, TopItem, UserSummary,
};
use tracing::debug;

use crate::http::{ApiReply, ApiRequest, HttpTransport};
use crate::session::Session;
use crate::{ClientError, ClientResult};

/// Back-office API client
///
/// Every call goes through [`ApiClient::get`], which attaches the bearer
/// credential from the session and applies the shared response handling:
/// 401 expires the session, other non-2xx statuses become
/// [`ClientError::Server`], and 2xx bodies are decoded as JSON.
#[derive(Debug)]
pub struct ApiClient<T: HttpTransport> {
    transport: T,
    session: Session,
}

impl<T: HttpTransport> ApiClient<T> {
    pub fn new(transport: T, session: Session) -> Self {
        Self { transport, session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Make a GET request
    pub async fn get<R: DeserializeOwned>(&self, path: &str, query: Option<String>) -> ClientResult<R> {
        let mut request = ApiRequest::get(path).with_bearer(self.session.token());
        if let Some(q) = query {
            request = request.with_query(q);
        }
        let target = request.target();
        debug!(target = %target, "GET");

        let reply = self.transport.send(request).await?;
        self.handle_reply(&target, reply)
    }

    fn handle_reply<R: DeserializeOwned>(&self, target: &str, reply: ApiReply) -> ClientResult<R> {
        if reply.status == 401 {
            self.session.expire();
            return Err(ClientError::SessionExpired);
        }

        if !reply.is_success() {
            let message = ApiErrorResponse::parse(&reply.body)
                .map(|e| e.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| status_message(reply.status).to_string());
            debug!(target = %target, status = reply.status, %message, "Request failed");
            return Err(ClientError::Server {
                status: reply.status,
                message,
            });
        }

        serde_json::from_str(&reply.body)
            .map_err(|e| ClientError::InvalidResponse(format!("{}: {}", target, e)))
    }

    // ========== Dashboard API ==========

    pub async fn dashboard_stats(&self) -> ClientResult<DashboardStats> {
        self.get("/dashboard/stats", None).await
    }

    pub async fn sales_today(&self) -> ClientResult<SalesToday> {
        self.get("/dashboard/sales-today", None).await
    }

    pub async fn sales_by_period(&self, period: Period, limit: usize) -> ClientResult<Vec<PeriodSales>> {
        let query = format!("period={}&limit={}", period.as_str(), limit);
        self.get("/dashboard/sales-by-period", Some(query)).await
    }

    pub async fn top_items(&self, limit: usize) -> ClientResult<Vec<TopItem>> {
        self.get("/dashboard/top-items", Some(format!("limit={}", limit)))
            .await
    }

    pub async fn sales_by_location(&self) -> ClientResult<Vec<LocationSales>> {
        self.get("/dashboard/sales-by-location", None).await
    }

    pub async fn recent_activity(&self, limit: usize) -> ClientResult<Vec<RecentActivity>> {
        self.get("/dashboard/recent-activity", Some(format!("limit={}", limit)))
            .await
    }

    // ========== Tickets API ==========

    /// Filtered ticket list; empty query fields are never sent
    pub async fn tickets(&self, query: &TicketQuery) -> ClientResult<Vec<Ticket>> {
        let qs = query
            .to_query_string()
            .map_err(|e| ClientError::Internal(format!("cannot encode ticket query: {}", e)))?;
        self.get("/tickets", Some(qs)).await
    }

    /// Line items of one ticket, in the order the service returns them
    pub async fn ticket_items(&self, ticket_id: i64) -> ClientResult<Vec<LineItem>> {
        self.get(&format!("/tickets/{}/items", ticket_id), None).await
    }

    // ========== Filter metadata ==========

    pub async fn users(&self) -> ClientResult<Vec<UserSummary>> {
        self.get("/users", None).await
    }

    pub async fn locations(&self) -> ClientResult<Vec<LocationSummary>> {
        self.get("/locations", None).await
    }
}
