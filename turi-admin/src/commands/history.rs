use anyhow::Context as _;
use tracing::warn;
use turi_client::{HistoryView, HttpTransport, TicketDetail, TicketFilter};

use super::Context;
use crate::error::CommandError;

pub async fn list<T: HttpTransport>(
    ctx: &Context<T>,
    filter: TicketFilter,
    with_options: bool,
) -> anyhow::Result<String> {
    let view = HistoryView::new(ctx.api.clone());

    // Filter choices are optional: the list is still shown without them
    let options = if with_options {
        match view.bootstrap().await {
            Ok(options) => Some(options),
            Err(e) if e.is_session_expired() => return Err(e.into()),
            Err(e) => {
                warn!(error = %e, "Filter options unavailable");
                None
            }
        }
    } else {
        None
    };

    let state = view
        .apply_filter(filter)
        .await?
        .applied()
        .context("History query was superseded")?;
    ctx.output.history(&state, options.as_deref())
}

pub async fn show_ticket<T: HttpTransport>(
    ctx: &Context<T>,
    id: i64,
    filter: TicketFilter,
) -> anyhow::Result<String> {
    let detail = select(ctx, id, filter).await?;
    ctx.output.ticket(&detail)
}

/// Load the history for `filter` and open ticket `id` from it
pub(super) async fn select<T: HttpTransport>(
    ctx: &Context<T>,
    id: i64,
    filter: TicketFilter,
) -> anyhow::Result<TicketDetail> {
    let view = HistoryView::new(ctx.api.clone());
    view.apply_filter(filter).await?;
    view.select(id)
        .await
        .context("Failed to load ticket items")?
        .ok_or_else(|| CommandError::TicketNotFound(id).into())
}
