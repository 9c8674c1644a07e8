//! # turi-receipt
//!
//! Receipt document renderer for the TuriCash back-office.
//!
//! Turns one ticket and its line items into a [`ReceiptDocument`]: a list
//! of fixed-size pages of absolutely positioned draw instructions (text
//! runs, rectangles, table rows). The item table paginates on its own and
//! repeats its header on every page it spans. The document exports as a
//! printable PDF or as its JSON draw list.
//!
//! ## Example
//!
//! ```ignore
//! use turi_receipt::{FixedClock, ReceiptRenderer, ReceiptTemplate};
//!
//! let renderer = ReceiptRenderer::with_clock(ReceiptTemplate::default(), FixedClock(now));
//! let doc = renderer.render(&ticket, &items)?;
//! doc.save_to_dir(Path::new("exports"), ExportFormat::Pdf)?;
//! ```

mod canvas;
mod document;
mod error;
mod pdf;
mod renderer;
mod table;
mod template;
pub mod text;

// Re-exports
pub use canvas::{Canvas, TextStyle};
pub use document::{
    Align, Color, DrawOp, ExportFormat, FontStyle, Line, Page, PageSize, ReceiptDocument, Rect,
    RowKind, TableCell, TableRow, TextRun,
};
pub use error::{RenderError, RenderResult};
pub use renderer::{FixedClock, ReceiptRenderer, RenderClock, SystemClock};
pub use table::{Column, Table, TableFrame, TableLayout, TableStyle};
pub use template::{ReceiptColors, ReceiptLabels, ReceiptTemplate};
