//! Page layout
//!
//! Positions text and rules on pages using a top-down cursor measured in
//! PDF points from the top edge. Every block (text line, table row) is
//! measured first; when it does not fit in the space left above the bottom
//! margin a new page is started and the cursor resets to the top margin.

use crate::metrics::{text_width, wrap_text};

/// A4 in PDF points
const A4_WIDTH: f32 = 595.28;
const A4_HEIGHT: f32 = 841.89;

/// Line height as a multiple of font size
const LEADING: f32 = 1.25;

/// Page size and margins (points)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl PageGeometry {
    /// A4 portrait with the same margin on every side
    pub fn a4(margin: f32) -> Self {
        Self {
            width: A4_WIDTH,
            height: A4_HEIGHT,
            margin,
        }
    }

    /// Lowest cursor position content may reach
    pub fn bottom_limit(&self) -> f32 {
        self.height - self.margin
    }

    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }
}

/// Horizontal alignment inside a box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Font selection for a block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub bold: bool,
}

impl TextStyle {
    pub fn title() -> Self {
        Self {
            size: 18.0,
            bold: true,
        }
    }

    pub fn header() -> Self {
        Self {
            size: 10.0,
            bold: true,
        }
    }

    pub fn body() -> Self {
        Self {
            size: 10.0,
            bold: false,
        }
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn line_height(&self) -> f32 {
        self.size * LEADING
    }
}

/// Fixed table column
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub title: String,
    /// Left edge (points from the left page edge)
    pub x: f32,
    pub width: f32,
    pub align: Align,
}

impl Column {
    pub fn new(title: impl Into<String>, x: f32, width: f32, align: Align) -> Self {
        Self {
            title: title.into(),
            x,
            width,
            align,
        }
    }
}

/// A positioned drawing instruction. `y` is the top of the text box
/// (or the rule), measured from the top page edge.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        size: f32,
        bold: bool,
        text: String,
    },
    Rule {
        x1: f32,
        x2: f32,
        y: f32,
    },
}

/// Drawing instructions for one page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    /// Text content in drawing order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            DrawOp::Rule { .. } => None,
        })
    }
}

/// Extra vertical space below each table row
const ROW_PADDING: f32 = 5.5;

/// Paginating layout engine
#[derive(Debug, Clone)]
pub struct PageLayout {
    geometry: PageGeometry,
    pages: Vec<Page>,
    cursor: f32,
}

impl PageLayout {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: vec![Page::default()],
            cursor: geometry.margin,
        }
    }

    pub fn geometry(&self) -> PageGeometry {
        self.geometry
    }

    /// Current cursor (points from the top edge)
    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    /// Vertical space left above the bottom margin
    pub fn remaining(&self) -> f32 {
        self.geometry.bottom_limit() - self.cursor
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn into_pages(self) -> Vec<Page> {
        self.pages
    }

    /// Start a new page and reset the cursor to the top margin
    pub fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.cursor = self.geometry.margin;
    }

    /// Break the page if a block of `height` would cross the bottom margin.
    ///
    /// A block taller than a whole page is placed on the current page when
    /// that page is still empty.
    pub fn ensure_space(&mut self, height: f32) -> bool {
        let at_top = self.cursor <= self.geometry.margin;
        if height > self.remaining() && !at_top {
            self.new_page();
            return true;
        }
        false
    }

    /// Advance the cursor
    pub fn gap(&mut self, height: f32) {
        self.cursor += height;
    }

    /// Paragraph across the content width, wrapped and aligned
    pub fn text(&mut self, text: &str, style: TextStyle, align: Align) {
        let x = self.geometry.margin;
        let width = self.geometry.content_width();
        for line in wrap_text(text, width, style.size, style.bold) {
            let height = style.line_height();
            self.ensure_space(height);
            self.place(&line, x, width, align, style);
            self.cursor += height;
        }
    }

    /// Horizontal rule across the content width
    pub fn rule(&mut self) {
        self.ensure_space(4.0);
        let y = self.cursor + 2.0;
        let margin = self.geometry.margin;
        let x2 = self.geometry.width - margin;
        self.current_page().ops.push(DrawOp::Rule { x1: margin, x2, y });
        self.cursor += 4.0;
    }

    /// Column titles
    pub fn table_header(&mut self, columns: &[Column], style: TextStyle) {
        let titles: Vec<&str> = columns.iter().map(|c| c.title.as_str()).collect();
        self.table_row(columns, &titles, style);
    }

    /// One table row; each cell wraps inside its column and the row takes
    /// the height of its tallest cell. Missing cells are left blank.
    pub fn table_row(&mut self, columns: &[Column], cells: &[&str], style: TextStyle) {
        let wrapped: Vec<Vec<String>> = columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let cell = cells.get(i).copied().unwrap_or_default();
                wrap_text(cell, col.width, style.size, style.bold)
            })
            .collect();

        let height = self.row_height(&wrapped, style);
        self.ensure_space(height);

        let top = self.cursor;
        for (col, lines) in columns.iter().zip(&wrapped) {
            for (n, line) in lines.iter().enumerate() {
                self.cursor = top + n as f32 * style.line_height();
                self.place(line, col.x, col.width, col.align, style);
            }
        }
        self.cursor = top + height;
    }

    /// Height a row with these wrapped cells occupies
    pub fn row_height(&self, wrapped: &[Vec<String>], style: TextStyle) -> f32 {
        let lines = wrapped.iter().map(Vec::len).max().unwrap_or(1).max(1);
        lines as f32 * style.line_height() + ROW_PADDING
    }

    fn place(&mut self, text: &str, x: f32, width: f32, align: Align, style: TextStyle) {
        if text.is_empty() {
            return;
        }
        let text_w = text_width(text, style.size, style.bold);
        let x = match align {
            Align::Left => x,
            Align::Center => x + (width - text_w) / 2.0,
            Align::Right => x + width - text_w,
        };
        let y = self.cursor;
        self.current_page().ops.push(DrawOp::Text {
            x,
            y,
            size: style.size,
            bold: style.bold,
            text: text.to_string(),
        });
    }

    fn current_page(&mut self) -> &mut Page {
        if self.pages.is_empty() {
            self.pages.push(Page::default());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }
}
