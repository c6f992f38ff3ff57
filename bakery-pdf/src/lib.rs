//! # bakery-pdf
//!
//! Paginated document library - low-level drawing capabilities only.
//!
//! ## Scope
//!
//! This crate handles HOW to draw a document:
//! - Page geometry and margins (PDF points, top-down cursor)
//! - Helvetica text metrics and word wrapping
//! - Table rows with per-row page breaks
//! - PDF emission via `printpdf`
//!
//! Business logic (WHAT to draw) stays in application code:
//! - Invoices and sales reports → bakery-server
//!
//! ## Example
//!
//! ```ignore
//! use bakery_pdf::{Align, Column, DocumentBuilder, PageGeometry, TextStyle};
//!
//! let mut doc = DocumentBuilder::new("Bakery Invoice", PageGeometry::a4(40.0));
//! doc.text("Bakery Invoice", TextStyle::title(), Align::Center);
//! let columns = [Column::new("Item", 40.0, 280.0, Align::Left)];
//! doc.table_header(&columns, TextStyle::header());
//! doc.table_row(&columns, &["Veg Puff"], TextStyle::body());
//! let bytes = doc.finish()?;
//! ```

mod document;
mod error;
mod layout;
mod metrics;

// Re-exports
pub use document::DocumentBuilder;
pub use error::{PdfError, PdfResult};
pub use layout::{Align, Column, DrawOp, Page, PageGeometry, PageLayout, TextStyle};
pub use metrics::{text_width, wrap_text};
