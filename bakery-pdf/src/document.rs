//! PDF document builder
//!
//! Collects laid-out pages and serializes them with `printpdf` when
//! [`DocumentBuilder::finish`] consumes the builder.

use std::io::BufWriter;

use printpdf::{BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point};
use tracing::instrument;

use crate::error::{PdfError, PdfResult};
use crate::layout::{Align, Column, DrawOp, Page, PageGeometry, PageLayout, TextStyle};

/// Approximate Helvetica ascent as a fraction of the font size
const ASCENT: f32 = 0.8;

const LAYER_NAME: &str = "Layer 1";

/// Paginated document builder
///
/// Layout calls write into an in-memory [`PageLayout`]; nothing touches the
/// PDF until [`finish`](Self::finish), which consumes the builder, so a
/// document is serialized exactly once and never partially.
pub struct DocumentBuilder {
    title: String,
    layout: PageLayout,
}

impl DocumentBuilder {
    pub fn new(title: impl Into<String>, geometry: PageGeometry) -> Self {
        Self {
            title: title.into(),
            layout: PageLayout::new(geometry),
        }
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    // === Content ===

    pub fn text(&mut self, text: &str, style: TextStyle, align: Align) -> &mut Self {
        self.layout.text(text, style, align);
        self
    }

    pub fn gap(&mut self, height: f32) -> &mut Self {
        self.layout.gap(height);
        self
    }

    pub fn rule(&mut self) -> &mut Self {
        self.layout.rule();
        self
    }

    pub fn table_header(&mut self, columns: &[Column], style: TextStyle) -> &mut Self {
        self.layout.table_header(columns, style);
        self
    }

    pub fn table_row(&mut self, columns: &[Column], cells: &[&str], style: TextStyle) -> &mut Self {
        self.layout.table_row(columns, cells, style);
        self
    }

    // === Output ===

    /// Laid-out pages without serializing
    pub fn into_pages(self) -> Vec<Page> {
        self.layout.into_pages()
    }

    /// Serialize to PDF bytes
    #[instrument(skip(self), fields(title = %self.title, pages = self.layout.page_count()))]
    pub fn finish(self) -> PdfResult<Vec<u8>> {
        let geometry = self.layout.geometry();
        let pages = self.layout.into_pages();
        let (w, h) = (pt_to_mm(geometry.width), pt_to_mm(geometry.height));

        let (doc, first_page, first_layer) = PdfDocument::new(&self.title, Mm(w), Mm(h), LAYER_NAME);
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| PdfError::Font(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| PdfError::Font(e.to_string()))?;

        for (index, page) in pages.iter().enumerate() {
            let layer = if index == 0 {
                doc.get_page(first_page).get_layer(first_layer)
            } else {
                let (p, l) = doc.add_page(Mm(w), Mm(h), LAYER_NAME);
                doc.get_page(p).get_layer(l)
            };
            draw_page(&layer, page, geometry, &regular, &bold);
        }

        let mut writer = BufWriter::new(Vec::<u8>::new());
        doc.save(&mut writer)
            .map_err(|e| PdfError::Write(e.to_string()))?;
        let bytes = writer
            .into_inner()
            .map_err(|e| PdfError::Io(e.into_error()))?;

        tracing::debug!(bytes = bytes.len(), "PDF document written");
        Ok(bytes)
    }
}

fn draw_page(
    layer: &PdfLayerReference,
    page: &Page,
    geometry: PageGeometry,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    for op in &page.ops {
        match op {
            DrawOp::Text {
                x,
                y,
                size,
                bold: is_bold,
                text,
            } => {
                let font = if *is_bold { bold } else { regular };
                let baseline = geometry.height - (y + size * ASCENT);
                layer.use_text(text.as_str(), *size, Mm(pt_to_mm(*x)), Mm(pt_to_mm(baseline)), font);
            }
            DrawOp::Rule { x1, x2, y } => {
                let y = Mm(pt_to_mm(geometry.height - y));
                layer.add_line(Line {
                    points: vec![
                        (Point::new(Mm(pt_to_mm(*x1)), y), false),
                        (Point::new(Mm(pt_to_mm(*x2)), y), false),
                    ],
                    is_closed: false,
                });
            }
        }
    }
}

#[inline]
fn pt_to_mm(pt: f32) -> f32 {
    pt * 25.4 / 72.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finish_produces_pdf_bytes() {
        let mut doc = DocumentBuilder::new("Test", PageGeometry::a4(40.0));
        doc.text("Hello", TextStyle::title(), Align::Center)
            .rule()
            .text("World", TextStyle::body(), Align::Left);
        let bytes = doc.finish().unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn multi_page_document() {
        let mut doc = DocumentBuilder::new("Long", PageGeometry::a4(40.0));
        let columns = [Column::new("Item", 40.0, 300.0, Align::Left)];
        for i in 0..120 {
            doc.table_row(&columns, &[&format!("Row {}", i)], TextStyle::body());
        }
        assert!(doc.layout().page_count() > 1);
        let bytes = doc.finish().unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn pt_mm_conversion() {
        assert!((pt_to_mm(72.0) - 25.4).abs() < 1e-4);
    }
}
