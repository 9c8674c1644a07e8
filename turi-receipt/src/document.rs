//! Draw-instruction document model
//!
//! A [`ReceiptDocument`] is a list of fixed-size pages, each holding
//! absolutely positioned drawing operations. Units are millimetres from the
//! top-left corner of the page; font sizes are points.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

use crate::error::RenderResult;

/// Artifact written by [`ReceiptDocument::save_to_dir`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Printable PDF
    #[default]
    Pdf,
    /// The draw instructions themselves
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "json" => Ok(Self::Json),
            _ => Err(format!("unknown export format '{}' (expected pdf or json)", s)),
        }
    }
}

/// RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const WHITE: Color = Color(255, 255, 255);
    pub const BLACK: Color = Color(0, 0, 0);
}

/// Horizontal anchor of a text run relative to its `x`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Bold,
    Italic,
}

/// Page size in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    pub const A4: PageSize = PageSize {
        width: 210.0,
        height: 297.0,
    };
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub color: Color,
    pub thickness: f64,
}

/// Single line of text; `y` is the baseline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub size: f64,
    pub style: FontStyle,
    pub color: Color,
    pub align: Align,
}

/// Header row or the body row for item `index`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "index", rename_all = "lowercase")]
pub enum RowKind {
    Header,
    Body(usize),
}

/// One table cell; `lines` are already wrapped to `width`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    pub x: f64,
    pub width: f64,
    pub lines: Vec<String>,
    pub align: Align,
}

/// One table row with its own box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub kind: RowKind,
    pub y: f64,
    pub height: f64,
    pub fill: Option<Color>,
    pub text_color: Color,
    pub font_size: f64,
    pub style: FontStyle,
    pub cells: Vec<TableCell>,
}

impl TableRow {
    pub fn is_header(&self) -> bool {
        self.kind == RowKind::Header
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Text of the cell at `column`, lines joined with a space
    pub fn cell_text(&self, column: usize) -> Option<String> {
        self.cells.get(column).map(|c| c.lines.join(" "))
    }
}

/// Drawing operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    Rect(Rect),
    Line(Line),
    Text(TextRun),
    Row(TableRow),
}

/// One page of the document (`number` starts at 1)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub number: usize,
    pub ops: Vec<DrawOp>,
}

impl Page {
    pub fn new(number: usize) -> Self {
        Self {
            number,
            ops: Vec::new(),
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &TableRow> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Row(row) => Some(row),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(text) => Some(text),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = &Rect> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Rect(rect) => Some(rect),
            _ => None,
        })
    }

    /// First text run whose content equals `text`
    pub fn find_text(&self, text: &str) -> Option<&TextRun> {
        self.texts().find(|t| t.text == text)
    }
}

/// Rendered receipt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptDocument {
    /// Artifact name without extension (`Ticket_<correlative_number>`)
    pub name: String,
    pub page_size: PageSize,
    pub pages: Vec<Page>,
}

impl ReceiptDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// File name of the exported artifact
    pub fn file_name(&self, format: ExportFormat) -> String {
        format!("{}.{}", self.name, format.extension())
    }

    /// Body rows in document order, with their page number
    pub fn body_rows(&self) -> impl Iterator<Item = (usize, usize, &TableRow)> {
        self.pages.iter().flat_map(|page| {
            page.rows().filter_map(move |row| match row.kind {
                RowKind::Body(index) => Some((page.number, index, row)),
                RowKind::Header => None,
            })
        })
    }

    pub fn to_json(&self) -> RenderResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_bytes(&self, format: ExportFormat) -> RenderResult<Vec<u8>> {
        match format {
            ExportFormat::Pdf => self.to_pdf(),
            ExportFormat::Json => Ok(self.to_json()?.into_bytes()),
        }
    }

    /// Write the artifact into `dir` and return its path
    pub fn save_to_dir(&self, dir: &Path, format: ExportFormat) -> RenderResult<PathBuf> {
        let bytes = self.to_bytes(format)?;
        fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name(format));
        fs::write(&path, bytes)?;
        info!(path = %path.display(), %format, pages = self.pages.len(), "Receipt exported");
        Ok(path)
    }
}
