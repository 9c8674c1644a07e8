//! Auto-paginating table layout
//!
//! Rows are placed top to bottom in the order given. When the next row does
//! not fit above the frame's bottom edge a new page is started and the
//! header row is repeated on it. The caller gets back the vertical position
//! right below the last row, on the last page used.

use crate::canvas::Canvas;
use crate::document::{Align, Color, DrawOp, FontStyle, RowKind, TableCell, TableRow};
use crate::error::{RenderError, RenderResult};
use crate::text::{clamp_lines, line_height, wrap};

/// Slack for float comparisons against the bottom edge
const EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub header: String,
    pub width: f64,
    pub align: Align,
}

impl Column {
    pub fn new(header: impl Into<String>, width: f64, align: Align) -> Self {
        Self {
            header: header.into(),
            width,
            align,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableStyle {
    pub header_fill: Color,
    pub header_text: Color,
    pub header_font_size: f64,
    pub body_text: Color,
    pub body_font_size: f64,
    /// Fill of every second body row
    pub stripe: Option<Color>,
    /// Cell padding on every side, mm
    pub padding: f64,
}

impl TableStyle {
    fn header_height(&self) -> f64 {
        row_height(1, self.header_font_size, self.padding)
    }

    fn body_row_height(&self, lines: usize) -> f64 {
        row_height(lines, self.body_font_size, self.padding)
    }
}

fn row_height(lines: usize, font_size: f64, padding: f64) -> f64 {
    lines as f64 * line_height(font_size) + 2.0 * padding
}

/// Vertical band the table may use on each page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableFrame {
    /// Left edge of the first column
    pub x: f64,
    /// Where the table restarts on continuation pages
    pub top: f64,
    /// Rows never extend below this
    pub bottom: f64,
}

/// Where the table ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableLayout {
    /// Bottom edge of the last row on `last_page`
    pub final_y: f64,
    pub last_page: usize,
    pub rows: usize,
}

#[derive(Debug)]
pub struct Table<'a> {
    columns: &'a [Column],
    style: &'a TableStyle,
    frame: TableFrame,
}

impl<'a> Table<'a> {
    pub fn new(columns: &'a [Column], style: &'a TableStyle, frame: TableFrame) -> Self {
        Self {
            columns,
            style,
            frame,
        }
    }

    /// Header height plus one single-line body row
    pub fn min_height(&self) -> f64 {
        self.style.header_height() + self.style.body_row_height(1)
    }

    /// Lay out `rows` starting at `start_y` on the canvas' current page
    pub fn layout(
        &self,
        canvas: &mut Canvas,
        start_y: f64,
        rows: &[Vec<String>],
    ) -> RenderResult<TableLayout> {
        let frame = self.frame;
        if frame.top + self.min_height() > frame.bottom + EPSILON {
            return Err(RenderError::Layout(format!(
                "table frame {:.1}..{:.1}mm cannot hold a header and one row",
                frame.top, frame.bottom
            )));
        }

        let header_h = self.style.header_height();
        let line_h = line_height(self.style.body_font_size);
        let max_lines =
            ((frame.bottom - frame.top - header_h - 2.0 * self.style.padding) / line_h).floor() as usize;

        let mut y = start_y;
        if y + self.min_height() > frame.bottom + EPSILON {
            canvas.new_page();
            y = frame.top;
        }
        y = self.header(canvas, y);

        for (index, row) in rows.iter().enumerate() {
            if row.len() != self.columns.len() {
                return Err(RenderError::Layout(format!(
                    "row {} has {} cells, table has {} columns",
                    index,
                    row.len(),
                    self.columns.len()
                )));
            }

            let cells = self.body_cells(row, max_lines);
            let lines = cells.iter().map(|c| c.lines.len()).max().unwrap_or(1);
            let height = self.style.body_row_height(lines);

            if y + height > frame.bottom + EPSILON {
                canvas.new_page();
                y = self.header(canvas, frame.top);
            }

            let fill = if index % 2 == 1 { self.style.stripe } else { None };
            canvas.push(DrawOp::Row(TableRow {
                kind: RowKind::Body(index),
                y,
                height,
                fill,
                text_color: self.style.body_text,
                font_size: self.style.body_font_size,
                style: FontStyle::Normal,
                cells,
            }));
            y += height;
        }

        Ok(TableLayout {
            final_y: y,
            last_page: canvas.page_number(),
            rows: rows.len(),
        })
    }

    fn header(&self, canvas: &mut Canvas, y: f64) -> f64 {
        let height = self.style.header_height();
        let cells = self
            .cells()
            .map(|(x, column)| TableCell {
                x,
                width: column.width,
                lines: vec![column.header.clone()],
                align: column.align,
            })
            .collect();
        canvas.push(DrawOp::Row(TableRow {
            kind: RowKind::Header,
            y,
            height,
            fill: Some(self.style.header_fill),
            text_color: self.style.header_text,
            font_size: self.style.header_font_size,
            style: FontStyle::Bold,
            cells,
        }));
        y + height
    }

    fn body_cells(&self, row: &[String], max_lines: usize) -> Vec<TableCell> {
        let size = self.style.body_font_size;
        self.cells()
            .zip(row)
            .map(|((x, column), text)| {
                let inner = column.width - 2.0 * self.style.padding;
                TableCell {
                    x,
                    width: column.width,
                    lines: clamp_lines(wrap(text, inner, size), max_lines, inner, size),
                    align: column.align,
                }
            })
            .collect()
    }

    /// Columns with their left edge
    fn cells(&self) -> impl Iterator<Item = (f64, &'a Column)> {
        let mut x = self.frame.x;
        self.columns.iter().map(move |column| {
            let left = x;
            x += column.width;
            (left, column)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::PageSize;

    fn style() -> TableStyle {
        TableStyle {
            header_fill: Color(41, 98, 255),
            header_text: Color::WHITE,
            header_font_size: 10.0,
            body_text: Color::BLACK,
            body_font_size: 9.0,
            stripe: Some(Color(245, 247, 250)),
            padding: 1.5,
        }
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::new("Qty", 20.0, Align::Center),
            Column::new("Description", 90.0, Align::Left),
        ]
    }

    fn rows(n: usize) -> Vec<Vec<String>> {
        (0..n).map(|i| vec![i.to_string(), format!("Item {}", i)]).collect()
    }

    const FRAME: TableFrame = TableFrame {
        x: 20.0,
        top: 20.0,
        bottom: 100.0,
    };

    #[test]
    fn test_single_page() {
        let (columns, style) = (columns(), style());
        let mut canvas = Canvas::new(PageSize::A4);
        let layout = Table::new(&columns, &style, FRAME)
            .layout(&mut canvas, 30.0, &rows(3))
            .unwrap();

        assert_eq!(layout.last_page, 1);
        assert_eq!(layout.rows, 3);

        let pages = canvas.finish(|_, _| {});
        let all: Vec<_> = pages[0].rows().collect();
        assert_eq!(all.len(), 4);
        assert!(all[0].is_header());
        assert_eq!(all[0].cells[1].x, 40.0);
        assert_eq!(all[2].fill, Some(Color(245, 247, 250)));
        assert_eq!(all[1].fill, None);
        assert!((layout.final_y - all[3].bottom()).abs() < 1e-9);
    }

    #[test]
    fn test_paginates_and_repeats_header() {
        let (columns, style) = (columns(), style());
        let mut canvas = Canvas::new(PageSize::A4);
        let layout = Table::new(&columns, &style, FRAME)
            .layout(&mut canvas, 30.0, &rows(40))
            .unwrap();
        assert!(layout.last_page >= 2);

        let pages = canvas.finish(|_, _| {});
        let mut seen = Vec::new();
        for page in &pages {
            let page_rows: Vec<_> = page.rows().collect();
            assert!(page_rows[0].is_header(), "page {} lacks a header", page.number);
            for row in &page_rows {
                assert!(row.bottom() <= FRAME.bottom + 1e-6);
                if let RowKind::Body(i) = row.kind {
                    seen.push(i);
                }
            }
        }
        assert_eq!(seen, (0..40).collect::<Vec<_>>());
    }

    #[test]
    fn test_start_below_room_moves_to_next_page() {
        let (columns, style) = (columns(), style());
        let mut canvas = Canvas::new(PageSize::A4);
        Table::new(&columns, &style, FRAME)
            .layout(&mut canvas, 98.0, &rows(1))
            .unwrap();
        let pages = canvas.finish(|_, _| {});
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].rows().count(), 0);
        assert_eq!(pages[1].rows().next().map(|r| r.y), Some(FRAME.top));
    }

    #[test]
    fn test_overlong_cell_is_clamped_to_one_page() {
        let (columns, style) = (columns(), style());
        let mut canvas = Canvas::new(PageSize::A4);
        let long = "word ".repeat(2000);
        Table::new(&columns, &style, FRAME)
            .layout(&mut canvas, 20.0, &[vec!["1".into(), long]])
            .unwrap();
        let pages = canvas.finish(|_, _| {});
        let row = pages.iter().flat_map(|p| p.rows()).find(|r| !r.is_header()).unwrap();
        assert!(row.bottom() <= FRAME.bottom + 1e-6);
        assert!(row.cells[1].lines.last().unwrap().ends_with('…'));
    }

    #[test]
    fn test_frame_too_small() {
        let (columns, style) = (columns(), style());
        let frame = TableFrame {
            x: 20.0,
            top: 20.0,
            bottom: 25.0,
        };
        let mut canvas = Canvas::new(PageSize::A4);
        let err = Table::new(&columns, &style, frame)
            .layout(&mut canvas, 20.0, &rows(1))
            .unwrap_err();
        assert!(matches!(err, RenderError::Layout(_)));
    }

    #[test]
    fn test_cell_count_mismatch() {
        let (columns, style) = (columns(), style());
        let mut canvas = Canvas::new(PageSize::A4);
        let err = Table::new(&columns, &style, FRAME)
            .layout(&mut canvas, 20.0, &[vec!["only one".into()]])
            .unwrap_err();
        assert!(matches!(err, RenderError::Layout(_)));
    }
}
