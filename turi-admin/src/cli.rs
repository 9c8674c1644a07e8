use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use turi_client::{Period, TicketFilter};
use turi_receipt::ExportFormat;

#[derive(Debug, Parser)]
#[command(name = "turi-admin", version, about = "TuriCash back-office reporting")]
pub struct Cli {
    /// API base URL (overrides TURI_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the bearer token issued by the auth service
    Login {
        #[arg(long, env = "TURI_TOKEN", hide_env_values = true)]
        token: String,

        #[arg(long)]
        username: Option<String>,
    },

    /// Forget the stored token
    Logout,

    /// Sales dashboard
    Dashboard {
        /// Bucket size of the sales series
        #[arg(long, short, default_value = "day")]
        period: Period,

        /// Buckets in the sales series
        #[arg(long)]
        series: Option<usize>,

        /// Rows in the top items list
        #[arg(long)]
        top: Option<usize>,

        /// Rows in the recent activity list
        #[arg(long)]
        recent: Option<usize>,
    },

    /// Ticket history with totals
    #[command(after_help = "\
Examples:
  turi-admin history
  turi-admin history --from 2024-01-01 --to 2024-01-31 --location 5
  turi-admin history --options")]
    History {
        #[command(flatten)]
        filter: FilterArgs,

        /// Also list the users and locations to filter by
        #[arg(long)]
        options: bool,
    },

    /// Show one ticket from the history with its items
    Ticket {
        /// Internal ticket id
        id: i64,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Export one ticket from the history as a receipt document
    Export {
        /// Internal ticket id
        id: i64,

        #[command(flatten)]
        filter: FilterArgs,

        /// Output directory (overrides TURI_EXPORT_DIR)
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,

        /// Artifact format: pdf or json
        #[arg(long, short, default_value = "pdf")]
        format: ExportFormat,
    },
}

/// History filter; omitted dates default to today
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// First day, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Last day, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    /// Cashier user id
    #[arg(long)]
    pub user: Option<String>,

    /// Location id
    #[arg(long)]
    pub location: Option<String>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> TicketFilter {
        let today = TicketFilter::today();
        TicketFilter {
            date_from: self.from.clone().unwrap_or(today.date_from),
            date_to: self.to.clone().unwrap_or(today.date_to),
            user_id: self.user.clone(),
            location_id: self.location.clone(),
        }
    }
}
