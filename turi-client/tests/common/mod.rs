//! In-memory transport for driving the views without a server

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;
use turi_client::{
    ApiClient, ApiReply, ApiRequest, ClientError, ClientResult, HttpTransport,
    MemoryCredentialStore, Session,
};

#[derive(Debug)]
enum Scripted {
    Reply(ApiReply),
    /// Held until the test releases it
    Gate(oneshot::Receiver<ApiReply>),
}

/// Scripted transport
///
/// Each path answers from its queue of one-shot replies first, then from its
/// standing reply. Unknown paths answer 404.
#[derive(Debug, Default)]
pub struct FakeTransport {
    queued: Mutex<HashMap<String, VecDeque<Scripted>>>,
    standing: Mutex<HashMap<String, ApiReply>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Standing 200 reply with a JSON body
    pub fn json(&self, path: &str, body: Value) {
        self.reply(path, 200, body.to_string());
    }

    /// Standing reply
    pub fn reply(&self, path: &str, status: u16, body: impl Into<String>) {
        self.standing
            .lock()
            .unwrap()
            .insert(path.to_string(), ApiReply::new(status, body));
    }

    /// Reply used once, before the standing one
    pub fn once(&self, path: &str, status: u16, body: impl Into<String>) {
        self.push(path, Scripted::Reply(ApiReply::new(status, body)));
    }

    /// Hold the next request to `path` until the returned sender fires
    pub fn gate(&self, path: &str) -> oneshot::Sender<ApiReply> {
        let (tx, rx) = oneshot::channel();
        self.push(path, Scripted::Gate(rx));
        tx
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    fn push(&self, path: &str, scripted: Scripted) {
        self.queued
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(scripted);
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiReply> {
        self.requests.lock().unwrap().push(request.clone());

        let next = self
            .queued
            .lock()
            .unwrap()
            .get_mut(&request.path)
            .and_then(|q| q.pop_front());

        match next {
            Some(Scripted::Reply(reply)) => Ok(reply),
            Some(Scripted::Gate(rx)) => rx
                .await
                .map_err(|_| ClientError::Internal("gate dropped".into())),
            None => Ok(self
                .standing
                .lock()
                .unwrap()
                .get(&request.path)
                .cloned()
                .unwrap_or_else(|| ApiReply::new(404, r#"{"message":"Not found"}"#))),
        }
    }
}

pub fn client(transport: FakeTransport) -> Arc<ApiClient<FakeTransport>> {
    client_with_token(transport, "test-token")
}

pub fn client_with_token(transport: FakeTransport, token: &str) -> Arc<ApiClient<FakeTransport>> {
    let session = Session::new(Arc::new(MemoryCredentialStore::with_token(token)));
    Arc::new(ApiClient::new(transport, session))
}

pub fn ticket_json(id: i64, total: &str) -> Value {
    json!({
        "id": id,
        "correlative_number": 1000 + id,
        "created_at_local": format!("2024-01-22T{:02}:15:00", 8 + id % 10),
        "username": "maria",
        "location_name": "Main Street",
        "payment_type": if id % 2 == 0 { "card" } else { "cash" },
        "total_amount": total,
    })
}

pub fn stats_json(total_tickets: i64) -> Value {
    json!({
        "totalSales": "1520.50",
        "totalTickets": total_tickets,
        "averageTicket": "17.48",
        "totalItems": 32,
        "totalUsers": "4",
        "totalLocations": 2,
    })
}

/// Standing 200 replies for all six dashboard reads
pub fn serve_dashboard(fake: &FakeTransport) {
    fake.json("/dashboard/stats", stats_json(87));
    fake.json(
        "/dashboard/sales-today",
        json!({"ticket_count": "12", "total_sales": "240.00", "avg_ticket": "20.00", "max_ticket": "55.10"}),
    );
    fake.json(
        "/dashboard/sales-by-period",
        json!([
            {"period": "2024-01-22", "total_sales": "240.00", "ticket_count": 12},
            {"period": "2024-01-21", "total_sales": "180.50", "ticket_count": "9"},
        ]),
    );
    fake.json(
        "/dashboard/top-items",
        json!([
            {"item_name": "Muffin", "total_quantity": 14, "total_revenue": "48.30"},
            {"item_name": "Coffee", "total_quantity": "40", "total_revenue": "199.60"},
        ]),
    );
    fake.json(
        "/dashboard/sales-by-location",
        json!([
            {"id": 1, "location_name": "Main Street", "total_sales": "1200.00"},
            {"id": 2, "location_name": "Airport", "total_sales": "0"},
            {"id": 3, "location_name": "Kiosk", "total_sales": "320.50"},
        ]),
    );
    fake.json(
        "/dashboard/recent-activity",
        json!([ticket_json(1, "10.00"), ticket_json(3, "12.50"), ticket_json(2, "7.25")]),
    );
}
