//! Plain-text and JSON rendering of command results

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;
use shared::money::format_money;
use shared::time::format_datetime;
use std::fmt::Write;
use turi_client::{AggregateSnapshot, FilterOptions, HistoryState, TicketDetail};
use unicode_width::UnicodeWidthStr;

/// Output mode for one invocation
#[derive(Debug, Clone)]
pub struct Output {
    json: bool,
    currency: String,
}

impl Output {
    pub fn new(json: bool, currency: impl Into<String>) -> Self {
        Self {
            json,
            currency: currency.into(),
        }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    fn money(&self, amount: Decimal) -> String {
        format_money(&self.currency, amount)
    }

    fn to_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }

    pub fn dashboard(&self, s: &AggregateSnapshot) -> anyhow::Result<String> {
        if self.json {
            return Self::to_json(s);
        }

        let mut out = String::new();
        writeln!(out, "Dashboard ({})", s.period)?;
        out.push_str(&table(
            &["", ""],
            &[Align::Left, Align::Right],
            vec![
                vec!["Total sales".into(), self.money(s.total_sales)],
                vec!["Tickets".into(), s.total_tickets.to_string()],
                vec!["Average ticket".into(), self.money(s.average_ticket)],
                vec!["Active items".into(), s.total_items.to_string()],
                vec!["Users".into(), s.total_users.to_string()],
                vec!["Locations".into(), s.total_locations.to_string()],
            ],
        ));

        writeln!(
            out,
            "\nToday: {} tickets, {} sold, average {}, largest {}",
            s.today.ticket_count,
            self.money(s.today.total_sales),
            self.money(s.today.avg_ticket),
            self.money(s.today.max_ticket)
        )?;

        writeln!(out, "\nSales by {}", s.period)?;
        out.push_str(&table(
            &["Period", "Sales", "Tickets"],
            &[Align::Left, Align::Right, Align::Right],
            s.sales_by_period
                .iter()
                .map(|p| vec![p.period.clone(), self.money(p.total_sales), p.ticket_count.to_string()])
                .collect(),
        ));

        writeln!(out, "\nTop items")?;
        out.push_str(&table(
            &["Item", "Qty", "Revenue"],
            &[Align::Left, Align::Right, Align::Right],
            s.top_items
                .iter()
                .map(|t| vec![t.item_name.clone(), t.total_quantity.to_string(), self.money(t.total_revenue)])
                .collect(),
        ));

        writeln!(out, "\nSales by location")?;
        out.push_str(&table(
            &["Location", "Sales"],
            &[Align::Left, Align::Right],
            s.sales_by_location
                .iter()
                .map(|l| vec![l.location_name.clone(), self.money(l.total_sales)])
                .collect(),
        ));

        writeln!(out, "\nRecent activity")?;
        out.push_str(&table(
            &["Ticket", "Time", "Cashier", "Location", "Payment", "Total"],
            &[Align::Left, Align::Left, Align::Left, Align::Left, Align::Left, Align::Right],
            s.recent_activity
                .iter()
                .map(|a| {
                    let cashier = a.full_name.clone().unwrap_or_else(|| a.ticket.username.clone());
                    vec![
                        a.ticket.display_number(),
                        format_datetime(&a.ticket.created_at),
                        cashier,
                        a.ticket.location_name.clone(),
                        a.ticket.payment_type.clone(),
                        self.money(a.ticket.total_amount),
                    ]
                })
                .collect(),
        ));
        Ok(out)
    }

    pub fn history(
        &self,
        state: &HistoryState,
        options: Option<&FilterOptions>,
    ) -> anyhow::Result<String> {
        if self.json {
            return Self::to_json(&json!({ "history": state, "options": options }));
        }

        let mut out = String::new();
        if let Some(options) = options {
            writeln!(out, "Users")?;
            out.push_str(&table(
                &["Id", "Username", "Name"],
                &[Align::Right, Align::Left, Align::Left],
                options
                    .users
                    .iter()
                    .map(|u| vec![u.id.to_string(), u.username.clone(), u.full_name.clone().unwrap_or_default()])
                    .collect(),
            ));
            writeln!(out, "\nLocations")?;
            out.push_str(&table(
                &["Id", "Name"],
                &[Align::Right, Align::Left],
                options
                    .locations
                    .iter()
                    .map(|l| vec![l.id.to_string(), l.name.clone()])
                    .collect(),
            ));
            out.push('\n');
        }

        let f = &state.filter;
        writeln!(out, "Tickets {} .. {}", f.date_from, f.date_to)?;
        if state.tickets.is_empty() {
            writeln!(out, "No tickets")?;
        } else {
            out.push_str(&table(
                &["Id", "Ticket", "Time", "Cashier", "Location", "Payment", "Total"],
                &[
                    Align::Right,
                    Align::Left,
                    Align::Left,
                    Align::Left,
                    Align::Left,
                    Align::Left,
                    Align::Right,
                ],
                state
                    .tickets
                    .iter()
                    .map(|t| {
                        vec![
                            t.id.to_string(),
                            t.display_number(),
                            format_datetime(&t.created_at),
                            t.username.clone(),
                            t.location_name.clone(),
                            t.payment_type.clone(),
                            self.money(t.total_amount),
                        ]
                    })
                    .collect(),
            ));
        }

        let totals = &state.totals;
        writeln!(
            out,
            "\n{} tickets, total {}, average {}",
            totals.count,
            self.money(totals.total_amount_sum),
            self.money(totals.average)
        )?;
        Ok(out)
    }

    pub fn ticket(&self, detail: &TicketDetail) -> anyhow::Result<String> {
        if self.json {
            return Self::to_json(detail);
        }

        let t = &detail.ticket;
        let mut out = String::new();
        writeln!(out, "Ticket {}  {}", t.display_number(), format_datetime(&t.created_at))?;
        writeln!(out, "Cashier: {}  Location: {}  Payment: {}", t.username, t.location_name, t.payment_type)?;
        out.push('\n');
        if detail.items.is_empty() {
            writeln!(out, "No items")?;
        } else {
            out.push_str(&table(
                &["Qty", "Description", "Unit price", "Subtotal"],
                &[Align::Right, Align::Left, Align::Right, Align::Right],
                detail
                    .items
                    .iter()
                    .map(|i| {
                        let subtotal = i.subtotal().map(|s| self.money(s)).unwrap_or_else(|| "-".into());
                        vec![i.quantity.to_string(), i.item_name.clone(), self.money(i.unit_price), subtotal]
                    })
                    .collect(),
            ));
        }
        writeln!(out, "\nTotal: {}", self.money(t.total_amount))?;
        Ok(out)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Align {
    Left,
    Right,
}

/// Display width in terminal columns (CJK counts double, combining marks zero)
fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Pad `s` with spaces to `width` display columns
fn pad(s: &str, width: usize, align: Align) -> String {
    let fill = " ".repeat(width.saturating_sub(display_width(s)));
    match align {
        Align::Left => format!("{}{}", s, fill),
        Align::Right => format!("{}{}", fill, s),
    }
}

/// Fixed-width text table; a header row of empty strings is skipped
fn table(headers: &[&str], align: &[Align], rows: Vec<Vec<String>>) -> String {
    let show_header = headers.iter().any(|h| !h.is_empty());
    let mut widths: Vec<usize> = headers.iter().map(|h| display_width(h)).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(display_width(cell));
            }
        }
    }

    let line = |cells: &[String]| -> String {
        let parts: Vec<String> = cells
            .iter()
            .zip(&widths)
            .zip(align)
            .map(|((cell, &width), &align)| pad(cell, width, align))
            .collect();
        format!("  {}\n", parts.join("  ").trim_end())
    };

    let mut out = String::new();
    if show_header {
        let header: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
        out.push_str(&line(&header));
    }
    for row in &rows {
        out.push_str(&line(row));
    }
    out
}
