//! Receipt page template: branding, labels, colors and geometry

use shared::money::DEFAULT_CURRENCY;

use crate::document::{Color, PageSize};
use crate::table::TableStyle;

/// Text printed on the receipt
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptLabels {
    pub ticket: String,
    pub date: String,
    pub time: String,
    pub ticket_section: String,
    pub items_section: String,
    pub cashier: String,
    pub location: String,
    pub payment_type: String,
    pub quantity: String,
    pub description: String,
    pub unit_price: String,
    pub subtotal: String,
    pub total: String,
    pub no_items: String,
    pub item_singular: String,
    pub item_plural: String,
    pub thank_you: String,
    pub generated_on: String,
    pub page: String,
    pub page_of: String,
}

impl Default for ReceiptLabels {
    fn default() -> Self {
        Self {
            ticket: "Ticket".into(),
            date: "Date:".into(),
            time: "Time:".into(),
            ticket_section: "Ticket information".into(),
            items_section: "Item detail".into(),
            cashier: "Cashier:".into(),
            location: "Location:".into(),
            payment_type: "Payment type:".into(),
            quantity: "Qty".into(),
            description: "Description".into(),
            unit_price: "Unit price".into(),
            subtotal: "Subtotal".into(),
            total: "TOTAL:".into(),
            no_items: "No items".into(),
            item_singular: "item".into(),
            item_plural: "items".into(),
            thank_you: "Thank you for your purchase".into(),
            generated_on: "Generated on".into(),
            page: "Page".into(),
            page_of: "of".into(),
        }
    }
}

impl ReceiptLabels {
    pub fn item_count(&self, count: usize) -> String {
        let noun = if count == 1 {
            &self.item_singular
        } else {
            &self.item_plural
        };
        format!("{} {}", count, noun)
    }

    pub fn page_number(&self, page: usize, total: usize) -> String {
        format!("{} {} {} {}", self.page, page, self.page_of, total)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptColors {
    pub primary: Color,
    pub accent: Color,
    pub stripe: Color,
    pub muted: Color,
}

impl Default for ReceiptColors {
    fn default() -> Self {
        Self {
            primary: Color(41, 98, 255),
            accent: Color(34, 197, 94),
            stripe: Color(245, 247, 250),
            muted: Color(100, 100, 100),
        }
    }
}

/// Single page template shared by every receipt
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptTemplate {
    pub brand: String,
    pub subtitle: String,
    /// Money prefix (`$`)
    pub currency: String,
    pub labels: ReceiptLabels,
    pub colors: ReceiptColors,
    pub page_size: PageSize,
    /// Left and right margin, mm
    pub margin: f64,
    /// Where the table restarts on continuation pages
    pub continuation_top: f64,
    /// Distance from the bottom edge reserved for the footer
    pub footer_reserve: f64,
    pub header_height: f64,
}

impl Default for ReceiptTemplate {
    fn default() -> Self {
        Self {
            brand: "TuriCash".into(),
            subtitle: "Sales management system".into(),
            currency: DEFAULT_CURRENCY.into(),
            labels: ReceiptLabels::default(),
            colors: ReceiptColors::default(),
            page_size: PageSize::A4,
            margin: 20.0,
            continuation_top: 20.0,
            footer_reserve: 25.0,
            header_height: 45.0,
        }
    }
}

impl ReceiptTemplate {
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Right edge of the content area
    pub fn right(&self) -> f64 {
        self.page_size.width - self.margin
    }

    /// Lowest y the body may reach
    pub fn body_bottom(&self) -> f64 {
        self.page_size.height - self.footer_reserve
    }

    pub fn table_style(&self) -> TableStyle {
        TableStyle {
            header_fill: self.colors.primary,
            header_text: Color::WHITE,
            header_font_size: 10.0,
            body_text: Color::BLACK,
            body_font_size: 9.0,
            stripe: Some(self.colors.stripe),
            padding: 1.76,
        }
    }
}
