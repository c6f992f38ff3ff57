//! Document rendering
//!
//! Business layouts (WHAT to draw) on top of `bakery-pdf`:
//! - [`InvoiceRenderer`] - per-order invoice table
//! - [`SalesReportRenderer`] - monthly sales report

pub mod invoice;
pub mod sales_report;

pub use invoice::InvoiceRenderer;
pub use sales_report::SalesReportRenderer;

use bakery_pdf::PdfError;
use shared::error::AppError;

/// Page margin shared by all documents (points)
pub const PAGE_MARGIN: f32 = 40.0;

pub(crate) fn render_error(err: PdfError) -> AppError {
    tracing::error!(error = %err, "Document rendering failed");
    AppError::render(err.to_string())
}
