//! PDF backend
//!
//! Replays the draw operations of a [`ReceiptDocument`] onto a PDF using the
//! built-in Helvetica faces. Document coordinates are top-left based; PDF
//! coordinates start bottom-left, so every `y` is flipped against the page
//! height.

use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color as PdfColor, IndirectFontRef, Line as PdfLine, Mm, PdfDocument,
    PdfDocumentReference, PdfLayerReference, Point, Rect as PdfRect, Rgb,
};

use crate::document::{Align, Color, DrawOp, FontStyle, Line, Page, ReceiptDocument, Rect, TableRow, TextRun};
use crate::error::{RenderError, RenderResult};
use crate::text::{PT_TO_MM, line_height, text_width};

const LAYER: &str = "Receipt";

fn pdf_error(err: impl std::fmt::Display) -> RenderError {
    RenderError::Pdf(err.to_string())
}

fn rgb(color: Color) -> PdfColor {
    let Color(r, g, b) = color;
    PdfColor::Rgb(Rgb::new(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        None,
    ))
}

fn mm(value: f64) -> Mm {
    Mm(value as f32)
}

struct Fonts {
    normal: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

impl Fonts {
    fn load(doc: &PdfDocumentReference) -> RenderResult<Self> {
        let add = |font: BuiltinFont| doc.add_builtin_font(font).map_err(pdf_error);
        Ok(Self {
            normal: add(BuiltinFont::Helvetica)?,
            bold: add(BuiltinFont::HelveticaBold)?,
            italic: add(BuiltinFont::HelveticaOblique)?,
        })
    }

    fn get(&self, style: FontStyle) -> &IndirectFontRef {
        match style {
            FontStyle::Normal => &self.normal,
            FontStyle::Bold => &self.bold,
            FontStyle::Italic => &self.italic,
        }
    }
}

struct PageWriter<'a> {
    layer: PdfLayerReference,
    fonts: &'a Fonts,
    height: f64,
}

impl PageWriter<'_> {
    fn draw(&self, page: &Page) {
        for op in &page.ops {
            match op {
                DrawOp::Rect(rect) => self.rect(rect),
                DrawOp::Line(line) => self.line(line),
                DrawOp::Text(run) => self.text(run),
                DrawOp::Row(row) => self.row(row),
            }
        }
    }

    fn point(&self, x: f64, y: f64) -> Point {
        Point::new(mm(x), mm(self.height - y))
    }

    fn rect(&self, rect: &Rect) {
        self.layer.set_fill_color(rgb(rect.fill));
        let bottom = self.height - rect.y - rect.height;
        let top = self.height - rect.y;
        self.layer.add_rect(
            PdfRect::new(mm(rect.x), mm(bottom), mm(rect.x + rect.width), mm(top))
                .with_mode(PaintMode::Fill),
        );
    }

    fn line(&self, line: &Line) {
        self.layer.set_outline_color(rgb(line.color));
        // Thickness is stored in mm, PDF wants points
        self.layer.set_outline_thickness((line.thickness / PT_TO_MM) as f32);
        self.layer.add_line(PdfLine {
            points: vec![
                (self.point(line.x1, line.y1), false),
                (self.point(line.x2, line.y2), false),
            ],
            is_closed: false,
        });
    }

    fn text(&self, run: &TextRun) {
        if run.text.is_empty() {
            return;
        }
        let left = match run.align {
            Align::Left => run.x,
            Align::Center => run.x - text_width(&run.text, run.size) / 2.0,
            Align::Right => run.x - text_width(&run.text, run.size),
        };
        self.layer.set_fill_color(rgb(run.color));
        self.layer.use_text(
            run.text.as_str(),
            run.size as f32,
            mm(left),
            mm(self.height - run.y),
            self.fonts.get(run.style),
        );
    }

    fn row(&self, row: &TableRow) {
        let (Some(first), Some(last)) = (row.cells.first(), row.cells.last()) else {
            return;
        };
        if let Some(fill) = row.fill {
            self.rect(&Rect {
                x: first.x,
                y: row.y,
                width: last.x + last.width - first.x,
                height: row.height,
                fill,
            });
        }

        let line_h = line_height(row.font_size);
        let lines = row.cells.iter().map(|c| c.lines.len()).max().unwrap_or(1);
        let padding = ((row.height - lines as f64 * line_h) / 2.0).max(0.0);
        let ascent = row.font_size * PT_TO_MM;

        for cell in &row.cells {
            let x = match cell.align {
                Align::Left => cell.x + padding,
                Align::Center => cell.x + cell.width / 2.0,
                Align::Right => cell.x + cell.width - padding,
            };
            for (i, line) in cell.lines.iter().enumerate() {
                self.text(&TextRun {
                    x,
                    y: row.y + padding + i as f64 * line_h + ascent,
                    text: line.clone(),
                    size: row.font_size,
                    style: row.style,
                    color: row.text_color,
                    align: cell.align,
                });
            }
        }
    }
}

impl ReceiptDocument {
    /// Printable PDF, one PDF page per document page
    pub fn to_pdf(&self) -> RenderResult<Vec<u8>> {
        let width = mm(self.page_size.width);
        let height = mm(self.page_size.height);
        let (doc, first_page, first_layer) =
            PdfDocument::new(self.name.as_str(), width, height, LAYER);
        let fonts = Fonts::load(&doc)?;

        for (index, page) in self.pages.iter().enumerate() {
            let (page_index, layer_index) = if index == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(width, height, LAYER)
            };
            let writer = PageWriter {
                layer: doc.get_page(page_index).get_layer(layer_index),
                fonts: &fonts,
                height: self.page_size.height,
            };
            writer.draw(page);
        }

        doc.save_to_bytes().map_err(pdf_error)
    }
}
