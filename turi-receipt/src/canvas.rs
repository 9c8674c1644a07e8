//! Page canvas
//!
//! Collects drawing operations page by page. Layout code only ever appends
//! to the current page or starts a new one.

use crate::document::{Align, Color, DrawOp, FontStyle, Line, Page, PageSize, Rect, TextRun};

#[derive(Debug)]
pub struct Canvas {
    size: PageSize,
    pages: Vec<Page>,
}

impl Canvas {
    /// Canvas with one empty page
    pub fn new(size: PageSize) -> Self {
        Self {
            size,
            pages: vec![Page::new(1)],
        }
    }

    pub fn size(&self) -> PageSize {
        self.size
    }

    /// Number of the page being drawn (starts at 1)
    pub fn page_number(&self) -> usize {
        self.pages.len()
    }

    pub fn new_page(&mut self) {
        let number = self.pages.len() + 1;
        self.pages.push(Page::new(number));
    }

    pub fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: Color) {
        self.push(DrawOp::Rect(Rect {
            x,
            y,
            width,
            height,
            fill,
        }));
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Color, thickness: f64) {
        self.push(DrawOp::Line(Line {
            x1,
            y1,
            x2,
            y2,
            color,
            thickness,
        }));
    }

    pub fn text(&mut self, x: f64, y: f64, text: impl Into<String>, style: TextStyle) {
        self.push(DrawOp::Text(style.run(x, y, text.into())));
    }

    /// Consume the canvas, handing each finished page to `decorate`
    ///
    /// `decorate` also receives the total page count, for footers.
    pub fn finish(mut self, mut decorate: impl FnMut(&mut Page, usize)) -> Vec<Page> {
        let total = self.pages.len();
        for page in &mut self.pages {
            decorate(page, total);
        }
        self.pages
    }
}

/// Font settings for a text run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub style: FontStyle,
    pub color: Color,
    pub align: Align,
}

impl TextStyle {
    pub fn new(size: f64, color: Color) -> Self {
        Self {
            size,
            style: FontStyle::Normal,
            color,
            align: Align::Left,
        }
    }

    pub fn bold(mut self) -> Self {
        self.style = FontStyle::Bold;
        self
    }

    pub fn italic(mut self) -> Self {
        self.style = FontStyle::Italic;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn run(&self, x: f64, y: f64, text: String) -> TextRun {
        TextRun {
            x,
            y,
            text,
            size: self.size,
            style: self.style,
            color: self.color,
            align: self.align,
        }
    }
}
