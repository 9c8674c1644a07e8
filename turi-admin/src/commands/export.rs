use anyhow::Context as _;
use serde_json::json;
use std::path::PathBuf;
use turi_client::{HttpTransport, TicketFilter};
use turi_receipt::{ExportFormat, ReceiptRenderer, ReceiptTemplate};

use super::Context;
use super::history::select;

pub async fn export_ticket<T: HttpTransport>(
    ctx: &Context<T>,
    id: i64,
    filter: TicketFilter,
    out: Option<PathBuf>,
    format: ExportFormat,
) -> anyhow::Result<String> {
    let detail = select(ctx, id, filter).await?;

    let template = ReceiptTemplate::default().with_currency(&ctx.config.currency);
    let document = ReceiptRenderer::new(template)
        .render(&detail.ticket, &detail.items)
        .context("Failed to render receipt")?;

    let dir = out.unwrap_or_else(|| ctx.config.export_dir.clone());
    let path = document
        .save_to_dir(&dir, format)
        .with_context(|| format!("Failed to write receipt to {}", dir.display()))?;

    if ctx.output.is_json() {
        return Ok(serde_json::to_string_pretty(&json!({
            "path": path,
            "pages": document.page_count(),
        }))?);
    }
    Ok(format!(
        "Exported {} ({} page{})\n",
        path.display(),
        document.page_count(),
        if document.page_count() == 1 { "" } else { "s" }
    ))
}
