use std::path::PathBuf;

use shared::money::DEFAULT_CURRENCY;
use turi_client::{ClientConfig, DashboardLimits, config::DEFAULT_BASE_URL};

/// Back-office CLI configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | TURI_API_URL | http://localhost:5000/api | API base URL |
/// | TURI_REQUEST_TIMEOUT_SECS | 10 | Per-request timeout |
/// | TURI_SESSION_FILE | $HOME/.turi/session.json | Stored bearer credential |
/// | TURI_EXPORT_DIR | . | Where exported receipts are written |
/// | TURI_CURRENCY | $ | Money prefix |
/// | TURI_SERIES_LIMIT | 7 | Buckets in the sales series |
/// | TURI_TOP_ITEMS_LIMIT | 5 | Rows in the top items list |
/// | TURI_RECENT_LIMIT | 5 | Rows in the recent activity list |
/// | LOG_LEVEL | info | Log level |
/// | LOG_DIR | (unset) | Daily log files go here when the directory exists |
#[derive(Debug, Clone, PartialEq)]
pub struct AdminConfig {
    pub api_url: String,
    pub request_timeout_secs: u64,
    pub session_file: PathBuf,
    pub export_dir: PathBuf,
    pub currency: String,
    pub limits: DashboardLimits,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl AdminConfig {
    /// Load `.env` (if any) and read the environment
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let number = |key: &str, default: u64| {
            var(key)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(default)
        };
        let defaults = DashboardLimits::default();

        Self {
            api_url: var("TURI_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into()),
            request_timeout_secs: number("TURI_REQUEST_TIMEOUT_SECS", 10),
            session_file: var("TURI_SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| default_session_file(var("HOME"))),
            export_dir: var("TURI_EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            currency: var("TURI_CURRENCY").unwrap_or_else(|| DEFAULT_CURRENCY.into()),
            limits: DashboardLimits {
                series: number("TURI_SERIES_LIMIT", defaults.series as u64) as usize,
                top_items: number("TURI_TOP_ITEMS_LIMIT", defaults.top_items as u64) as usize,
                recent_activity: number("TURI_RECENT_LIMIT", defaults.recent_activity as u64)
                    as usize,
            },
            log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: var("LOG_DIR"),
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.api_url).with_timeout(self.request_timeout_secs)
    }
}

fn default_session_file(home: Option<String>) -> PathBuf {
    home.map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".turi")
        .join("session.json")
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
