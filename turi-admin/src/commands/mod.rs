//! Command implementations
//!
//! Every command returns the text to print; nothing here writes to stdout.

mod auth;
mod dashboard;
mod export;
mod history;

use anyhow::Context as _;
use std::sync::Arc;
use turi_client::{
    ApiClient, DashboardLimits, FileCredentialStore, HttpTransport, NetworkTransport, Session,
};

use crate::cli::Command;
use crate::config::AdminConfig;
use crate::output::Output;

/// Everything a command needs
#[derive(Debug)]
pub struct Context<T: HttpTransport> {
    pub api: Arc<ApiClient<T>>,
    pub config: AdminConfig,
    pub output: Output,
}

impl<T: HttpTransport> Context<T> {
    pub fn new(api: Arc<ApiClient<T>>, config: AdminConfig, output: Output) -> Self {
        Self {
            api,
            config,
            output,
        }
    }
}

impl Context<NetworkTransport> {
    /// Network client with the credential file from `config`
    pub fn connect(config: AdminConfig, json: bool) -> anyhow::Result<Self> {
        let session = Session::new(Arc::new(FileCredentialStore::new(&config.session_file)));
        let transport = NetworkTransport::new(&config.client_config())
            .context("Failed to create HTTP client")?;
        let output = Output::new(json, &config.currency);
        Ok(Self::new(
            Arc::new(ApiClient::new(transport, session)),
            config,
            output,
        ))
    }
}

pub async fn execute<T: HttpTransport>(ctx: &Context<T>, command: Command) -> anyhow::Result<String> {
    match command {
        Command::Login { token, username } => auth::login(ctx.api.session(), token, username),
        Command::Logout => auth::logout(ctx.api.session()),
        Command::Dashboard {
            period,
            series,
            top,
            recent,
        } => {
            let defaults = ctx.config.limits;
            let limits = DashboardLimits {
                series: series.unwrap_or(defaults.series),
                top_items: top.unwrap_or(defaults.top_items),
                recent_activity: recent.unwrap_or(defaults.recent_activity),
            };
            dashboard::show(ctx, period, limits).await
        }
        Command::History { filter, options } => {
            history::list(ctx, filter.to_filter(), options).await
        }
        Command::Ticket { id, filter } => history::show_ticket(ctx, id, filter.to_filter()).await,
        Command::Export {
            id,
            filter,
            out,
            format,
        } => export::export_ticket(ctx, id, filter.to_filter(), out, format).await,
    }
}
