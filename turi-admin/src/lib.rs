//! TuriCash back-office CLI
//!
//! Thin operator surface over `turi-client` and `turi-receipt`: dashboard,
//! ticket history with totals, ticket detail and receipt export.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod logger;
pub mod output;

pub use cli::{Cli, Command, FilterArgs};
pub use commands::Context;
pub use config::AdminConfig;
pub use error::{CliError, CommandError};
pub use logger::init_logger;
pub use output::Output;

use turi_client::{HttpTransport, SessionEvent};

/// Run one command
///
/// A 401 anywhere during the command ends it with the session-expired
/// exit code, whatever error the command itself reported.
pub async fn run<T: HttpTransport>(ctx: &Context<T>, command: Command) -> Result<String, CliError> {
    let mut events = ctx.api.session().subscribe();
    commands::execute(ctx, command).await.map_err(|err| {
        let expired = matches!(events.try_recv(), Ok(SessionEvent::Expired));
        CliError::from_failure(err, expired)
    })
}
