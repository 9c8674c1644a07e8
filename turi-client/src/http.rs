//! HTTP transport
//!
//! The transport only moves bytes. Authentication headers come in with the
//! request and status handling is left to [`crate::ApiClient`], so every
//! endpoint shares one interceptor.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::{ClientConfig, ClientResult};

/// Outbound read request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// API path relative to the base URL (e.g. `/tickets`)
    pub path: String,
    /// Encoded query string without the leading `?`
    pub query: Option<String>,
    /// Bearer credential
    pub bearer: Option<String>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: None,
            bearer: None,
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.query = (!query.is_empty()).then_some(query);
        self
    }

    pub fn with_bearer(mut self, token: Option<String>) -> Self {
        self.bearer = token;
        self
    }

    /// Path plus query string
    pub fn target(&self) -> String {
        match &self.query {
            Some(q) => format!("{}?{}", self.path, q),
            None => self.path.clone(),
        }
    }
}

/// Raw response: status and body text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiReply {
    pub status: u16,
    pub body: String,
}

impl ApiReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP transport trait
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiReply>;
}

/// Network transport backed by reqwest
#[derive(Debug, Clone)]
pub struct NetworkTransport {
    client: Client,
    config: ClientConfig,
}

impl NetworkTransport {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            config: config.clone(),
        })
    }
}

#[async_trait]
impl HttpTransport for NetworkTransport {
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiReply> {
        let url = self.config.url(&request.target());
        let mut req = self.client.get(&url);
        if let Some(token) = &request.bearer {
            req = req.bearer_auth(token);
        }
        let response = req.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(ApiReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_with_and_without_query() {
        let r = ApiRequest::get("/tickets").with_query("date_from=2024-01-01");
        assert_eq!(r.target(), "/tickets?date_from=2024-01-01");

        let r = ApiRequest::get("/tickets").with_query("");
        assert_eq!(r.query, None);
        assert_eq!(r.target(), "/tickets");
    }

    #[test]
    fn test_reply_success_range() {
        assert!(ApiReply::new(200, "[]").is_success());
        assert!(ApiReply::new(204, "").is_success());
        assert!(!ApiReply::new(401, "").is_success());
        assert!(!ApiReply::new(302, "").is_success());
    }
}
