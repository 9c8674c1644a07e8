//! Receipt renderer
//!
//! Lays out one ticket and its line items on the receipt template:
//! header band, ticket information, item table, total box and a footer on
//! every page. Rendering is a pure function of the ticket, the items and
//! the generation timestamp.

use chrono::{Local, NaiveDateTime};
use rust_decimal::Decimal;
use shared::money::format_money;
use shared::time::{format_date, format_datetime, format_time};
use shared::{LineItem, Ticket};
use tracing::debug;

use crate::canvas::{Canvas, TextStyle};
use crate::document::{Align, Color, DrawOp, Page, ReceiptDocument};
use crate::error::{RenderError, RenderResult};
use crate::table::{Column, Table, TableFrame};
use crate::template::ReceiptTemplate;
use crate::text::{line_height, truncate};

const TOTAL_BOX_WIDTH: f64 = 60.0;
const TOTAL_BOX_HEIGHT: f64 = 15.0;
const TOTAL_BOX_GAP: f64 = 2.0;

/// Source of the footer's generation timestamp
pub trait RenderClock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl RenderClock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always the same instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl RenderClock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Receipt renderer
#[derive(Debug, Clone)]
pub struct ReceiptRenderer<C = SystemClock> {
    template: ReceiptTemplate,
    clock: C,
}

impl ReceiptRenderer<SystemClock> {
    pub fn new(template: ReceiptTemplate) -> Self {
        Self::with_clock(template, SystemClock)
    }
}

impl Default for ReceiptRenderer<SystemClock> {
    fn default() -> Self {
        Self::new(ReceiptTemplate::default())
    }
}

impl<C: RenderClock> ReceiptRenderer<C> {
    pub fn with_clock(template: ReceiptTemplate, clock: C) -> Self {
        Self { template, clock }
    }

    pub fn template(&self) -> &ReceiptTemplate {
        &self.template
    }

    /// Render with the renderer's clock as generation time
    pub fn render(&self, ticket: &Ticket, items: &[LineItem]) -> RenderResult<ReceiptDocument> {
        self.render_at(ticket, items, self.clock.now())
    }

    /// Render with an explicit generation time
    pub fn render_at(
        &self,
        ticket: &Ticket,
        items: &[LineItem],
        generated_at: NaiveDateTime,
    ) -> RenderResult<ReceiptDocument> {
        validate_ticket(ticket)?;
        let rows = self.item_rows(items)?;

        let t = &self.template;
        let mut canvas = Canvas::new(t.page_size);

        self.header(&mut canvas, ticket);
        let y = self.ticket_info(&mut canvas, ticket);
        let y = self.section_title(&mut canvas, y, &t.labels.items_section) + 8.0;
        let final_y = self.items(&mut canvas, y, &rows)?;
        self.total_box(&mut canvas, final_y, ticket, items.len());

        let generated = format!("{} {}", t.labels.generated_on, format_datetime(&generated_at));
        let page_size = canvas.size();
        let pages = canvas.finish(|page, total| self.footer(page, total, &generated));

        debug!(
            ticket = ticket.correlative_number,
            items = items.len(),
            pages = pages.len(),
            "Receipt rendered"
        );

        Ok(ReceiptDocument {
            name: format!("Ticket_{}", ticket.correlative_number),
            page_size,
            pages,
        })
    }

    /// Table cells for each item, validated
    fn item_rows(&self, items: &[LineItem]) -> RenderResult<Vec<Vec<String>>> {
        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let invalid = |reason: &str| RenderError::InvalidItem {
                    index,
                    reason: reason.to_string(),
                };
                if item.quantity < 1 {
                    return Err(invalid("quantity must be at least 1"));
                }
                if item.unit_price < Decimal::ZERO {
                    return Err(invalid("unit price is negative"));
                }
                let subtotal = item.subtotal().ok_or_else(|| invalid("subtotal overflows"))?;
                Ok(vec![
                    item.quantity.to_string(),
                    item.item_name.clone(),
                    format_money(&self.template.currency, item.unit_price),
                    format_money(&self.template.currency, subtotal),
                ])
            })
            .collect()
    }

    fn header(&self, canvas: &mut Canvas, ticket: &Ticket) {
        let t = &self.template;
        canvas.rect(0.0, 0.0, t.page_size.width, t.header_height, t.colors.primary);

        let white = |size| TextStyle::new(size, Color::WHITE);
        canvas.text(t.margin, 20.0, &t.brand, white(24.0).bold());
        canvas.text(t.margin, 28.0, &t.subtitle, white(10.0));
        canvas.text(
            t.margin,
            38.0,
            format!("{} {}", t.labels.ticket, ticket.display_number()),
            white(12.0).bold(),
        );

        let right = white(9.0).align(Align::Right);
        canvas.text(
            t.right(),
            25.0,
            format!("{} {}", t.labels.date, format_date(&ticket.created_at)),
            right,
        );
        canvas.text(
            t.right(),
            32.0,
            format!("{} {}", t.labels.time, format_time(&ticket.created_at)),
            right,
        );
    }

    /// Title plus divider; returns the y of the title baseline
    fn section_title(&self, canvas: &mut Canvas, y: f64, title: &str) -> f64 {
        let t = &self.template;
        canvas.text(t.margin, y, title, TextStyle::new(12.0, t.colors.primary).bold());
        canvas.line(t.margin, y + 2.0, t.right(), y + 2.0, t.colors.primary, 0.5);
        y
    }

    /// Two-column key/value block; returns where the next section starts
    fn ticket_info(&self, canvas: &mut Canvas, ticket: &Ticket) -> f64 {
        let t = &self.template;
        let labels = &t.labels;
        let mut y = self.section_title(canvas, t.header_height + 10.0, &labels.ticket_section) + 10.0;

        const VALUE_OFFSET: f64 = 25.0;
        const SIZE: f64 = 10.0;
        let left = t.margin;
        let right = t.page_size.width / 2.0 + 5.0;
        let label = TextStyle::new(SIZE, Color::BLACK).bold();
        let value = TextStyle::new(SIZE, Color::BLACK);

        let pair = |canvas: &mut Canvas, x: f64, limit: f64, y: f64, key: &str, text: &str| {
            canvas.text(x, y, key, label);
            let width = limit - (x + VALUE_OFFSET) - 2.0;
            canvas.text(x + VALUE_OFFSET, y, truncate(text, width, SIZE), value);
        };

        pair(canvas, left, right, y, &labels.cashier, &ticket.username);
        pair(canvas, right, t.right() + 2.0, y, &labels.location, &ticket.location_name);
        y += 8.0;
        pair(canvas, left, right, y, &labels.payment_type, &ticket.payment_type);

        y + 15.0
    }

    /// Item table, or the "no items" line; returns the bottom of the body
    fn items(&self, canvas: &mut Canvas, y: f64, rows: &[Vec<String>]) -> RenderResult<f64> {
        let t = &self.template;
        let labels = &t.labels;
        let columns = [
            Column::new(&labels.quantity, 20.0, Align::Center),
            Column::new(&labels.description, 90.0, Align::Left),
            Column::new(&labels.unit_price, 30.0, Align::Right),
            Column::new(&labels.subtotal, 30.0, Align::Right),
        ];
        let style = t.table_style();
        let frame = TableFrame {
            x: t.margin,
            top: t.continuation_top,
            bottom: t.body_bottom(),
        };

        let layout = Table::new(&columns, &style, frame).layout(canvas, y, rows)?;
        if !rows.is_empty() {
            return Ok(layout.final_y);
        }

        // The table reserved room for one row under its header
        let height = line_height(style.body_font_size) + 2.0 * style.padding;
        let width: f64 = columns.iter().map(|c| c.width).sum();
        canvas.text(
            t.margin + width / 2.0,
            layout.final_y + style.padding + line_height(style.body_font_size) * 0.8,
            &labels.no_items,
            TextStyle::new(style.body_font_size, t.colors.muted)
                .italic()
                .align(Align::Center),
        );
        Ok(layout.final_y + height)
    }

    /// Filled total box right below the body, on a new page if needed
    fn total_box(&self, canvas: &mut Canvas, final_y: f64, ticket: &Ticket, item_count: usize) {
        let t = &self.template;
        let x = t.right() - TOTAL_BOX_WIDTH;
        let mut y = final_y + TOTAL_BOX_GAP;
        if y + TOTAL_BOX_HEIGHT > t.body_bottom() {
            canvas.new_page();
            y = t.continuation_top;
        }

        canvas.rect(x, y, TOTAL_BOX_WIDTH, TOTAL_BOX_HEIGHT, t.colors.accent);
        let white = |size| TextStyle::new(size, Color::WHITE);
        canvas.text(x + 5.0, y + 6.0, &t.labels.total, white(11.0).bold());
        canvas.text(
            x + TOTAL_BOX_WIDTH - 5.0,
            y + 10.0,
            format_money(&t.currency, ticket.total_amount),
            white(14.0).bold().align(Align::Right),
        );
        canvas.text(x + 5.0, y + 12.0, t.labels.item_count(item_count), white(8.0));
    }

    fn footer(&self, page: &mut Page, total: usize, generated: &str) {
        let t = &self.template;
        let center = t.page_size.width / 2.0;
        let bottom = t.page_size.height;
        let muted = TextStyle::new(8.0, t.colors.muted).italic();

        page.ops.push(DrawOp::Text(muted.align(Align::Center).run(
            center,
            bottom - 15.0,
            t.labels.thank_you.clone(),
        )));
        page.ops.push(DrawOp::Text(muted.align(Align::Center).run(
            center,
            bottom - 10.0,
            generated.to_string(),
        )));
        page.ops.push(DrawOp::Text(muted.align(Align::Right).run(
            t.right(),
            bottom - 10.0,
            t.labels.page_number(page.number, total),
        )));
    }
}

fn validate_ticket(ticket: &Ticket) -> RenderResult<()> {
    if ticket.total_amount < Decimal::ZERO {
        return Err(RenderError::InvalidTicket(format!(
            "ticket {} has a negative total",
            ticket.display_number()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 22)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn ticket() -> Ticket {
        Ticket {
            id: 41,
            correlative_number: 1042,
            created_at: at(14, 32),
            username: "maria".into(),
            location_name: "Main Street".into(),
            payment_type: "cash".into(),
            total_amount: Decimal::new(1997, 2),
        }
    }

    fn item(name: &str, cents: i64, quantity: i64) -> LineItem {
        LineItem {
            item_name: name.into(),
            unit_price: Decimal::new(cents, 2),
            quantity,
        }
    }

    fn renderer() -> ReceiptRenderer<FixedClock> {
        ReceiptRenderer::with_clock(ReceiptTemplate::default(), FixedClock(at(18, 0)))
    }

    #[test]
    fn test_header_and_metadata() {
        let doc = renderer().render(&ticket(), &[item("Coffee", 499, 2)]).unwrap();
        let page = &doc.pages[0];

        let band = page.rects().next().unwrap();
        assert_eq!((band.x, band.y, band.width, band.height), (0.0, 0.0, 210.0, 45.0));
        assert!(page.find_text("TuriCash").is_some());
        assert!(page.find_text("Ticket #1042").is_some());

        let date = page.find_text("Date: 2024-01-22").unwrap();
        assert_eq!(date.align, Align::Right);
        assert!(page.find_text("Time: 14:32:00").is_some());

        assert!(page.find_text("maria").is_some());
        assert!(page.find_text("Main Street").is_some());
        assert!(page.find_text("cash").is_some());
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let err = renderer()
            .render(&ticket(), &[item("Coffee", 499, 1), item("Refund", 100, 0)])
            .unwrap_err();
        assert!(matches!(err, RenderError::InvalidItem { index: 1, .. }));
    }

    #[test]
    fn test_negative_price_rejected() {
        let err = renderer()
            .render(&ticket(), &[item("Coupon", -50, 1)])
            .unwrap_err();
        assert!(matches!(err, RenderError::InvalidItem { index: 0, .. }));
    }

    #[test]
    fn test_zero_price_allowed() {
        let doc = renderer().render(&ticket(), &[item("Water", 0, 1)]).unwrap();
        let (_, _, row) = doc.body_rows().next().unwrap();
        assert_eq!(row.cell_text(3).as_deref(), Some("$0.00"));
    }

    #[test]
    fn test_negative_total_rejected() {
        let mut t = ticket();
        t.total_amount = Decimal::new(-1, 2);
        assert!(matches!(
            renderer().render(&t, &[]),
            Err(RenderError::InvalidTicket(_))
        ));
    }

    #[test]
    fn test_long_location_truncated() {
        let mut t = ticket();
        t.location_name = "A very long location name that would run off the page".into();
        let doc = renderer().render(&t, &[]).unwrap();
        let value = doc.pages[0]
            .texts()
            .find(|r| r.text.starts_with("A very"))
            .unwrap();
        assert!(value.text.ends_with('…'));
        assert!(value.x + crate::text::text_width(&value.text, value.size) <= 192.0);
    }

    #[test]
    fn test_custom_currency() {
        let renderer = ReceiptRenderer::with_clock(
            ReceiptTemplate::default().with_currency("€"),
            FixedClock(at(9, 0)),
        );
        let doc = renderer.render(&ticket(), &[item("Tea", 250, 1)]).unwrap();
        assert!(doc.pages[0].find_text("€19.97").is_some());
    }
}
