use clap::Parser;
use std::process::ExitCode;
use turi_admin::exit_codes::{EXIT_ERROR, EXIT_SUCCESS};
use turi_admin::{AdminConfig, Cli, Context, init_logger, run};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // 1. Configuration (.env + environment), command line wins
    let mut config = AdminConfig::from_env();
    if let Some(url) = cli.api_url.clone() {
        config.api_url = url;
    }

    // 2. Logging
    init_logger(&config.log_level, config.log_dir.as_deref());
    tracing::debug!(api_url = %config.api_url, "turi-admin starting");

    // 3. Client
    let ctx = match Context::connect(config, cli.json) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("error: {:#}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    match run(&ctx, cli.command).await {
        Ok(out) => {
            print!("{}", out);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            e.report();
            ExitCode::from(e.code)
        }
    }
}
