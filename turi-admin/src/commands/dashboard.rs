use anyhow::Context as _;
use turi_client::{DashboardLimits, DashboardView, HttpTransport, Period};

use super::Context;

pub async fn show<T: HttpTransport>(
    ctx: &Context<T>,
    period: Period,
    limits: DashboardLimits,
) -> anyhow::Result<String> {
    let view = DashboardView::new(ctx.api.clone());
    let snapshot = view
        .load_dashboard(period, limits)
        .await?
        .applied()
        .context("Dashboard load was superseded")?;
    ctx.output.dashboard(&snapshot)
}
