//! Invoice renderer
//!
//! Renders a persisted [`Order`] as a paginated table: Item, Qty, Weight,
//! Price, Subtotal. Item names wrap inside their column; every row is
//! measured before it is placed and moves to a new page only when it does
//! not fit. The column header is printed on the first page only.

use bakery_pdf::{Align, Column, DocumentBuilder, PageGeometry, TextStyle};
use shared::models::{Order, OrderLine};
use shared::money::{format_amount, format_currency};
use shared::util::format_millis;

use super::{PAGE_MARGIN, render_error};
use crate::utils::AppResult;

/// Invoice renderer
pub struct InvoiceRenderer {
    shop_name: String,
    currency_symbol: String,
    geometry: PageGeometry,
}

impl InvoiceRenderer {
    pub fn new(shop_name: impl Into<String>, currency_symbol: impl Into<String>) -> Self {
        Self {
            shop_name: shop_name.into(),
            currency_symbol: currency_symbol.into(),
            geometry: PageGeometry::a4(PAGE_MARGIN),
        }
    }

    /// Download filename for an order
    pub fn filename(order_id: i64) -> String {
        format!("invoice-{}.pdf", order_id)
    }

    /// Render an order to PDF bytes
    pub fn render(&self, order: &Order) -> AppResult<Vec<u8>> {
        self.layout(order).finish().map_err(render_error)
    }

    /// Lay the invoice out without serializing it
    pub fn layout(&self, order: &Order) -> DocumentBuilder {
        let mut doc = DocumentBuilder::new(format!("Invoice {}", order.id), self.geometry);
        let columns = self.columns();

        self.render_header(&mut doc, order);
        doc.table_header(&columns, TextStyle::header());
        doc.rule();
        for line in &order.lines {
            self.render_line(&mut doc, &columns, line);
        }
        self.render_footer(&mut doc, order);

        doc
    }

    /// Fixed columns; Item takes whatever the numeric columns leave
    fn columns(&self) -> Vec<Column> {
        let left = self.geometry.margin;
        let right = self.geometry.width - self.geometry.margin;

        let subtotal = Column::new("Subtotal", right - 70.0, 70.0, Align::Right);
        let price = Column::new("Price", subtotal.x - 70.0, 62.0, Align::Right);
        let weight = Column::new("Weight", price.x - 55.0, 47.0, Align::Right);
        let qty = Column::new("Qty", weight.x - 45.0, 37.0, Align::Right);
        let item = Column::new("Item", left, qty.x - left - 8.0, Align::Left);

        vec![item, qty, weight, price, subtotal]
    }

    fn render_header(&self, doc: &mut DocumentBuilder, order: &Order) {
        doc.text(
            &format!("{} Invoice", self.shop_name),
            TextStyle::title().with_size(20.0),
            Align::Center,
        );
        doc.gap(8.0);
        doc.text(&format!("Order ID: {}", order.id), TextStyle::body(), Align::Left);
        doc.text(
            &format!("Date: {}", format_millis(order.created_at)),
            TextStyle::body(),
            Align::Left,
        );
        doc.gap(12.0);
    }

    fn render_line(&self, doc: &mut DocumentBuilder, columns: &[Column], line: &OrderLine) {
        let qty = line.quantity.to_string();
        let weight = format_weight(line.weight);
        let price = format_amount(line.unit_price);
        let subtotal = format_amount(line.line_subtotal);
        doc.table_row(
            columns,
            &[&line.name, &qty, &weight, &price, &subtotal],
            TextStyle::body(),
        );
    }

    fn render_footer(&self, doc: &mut DocumentBuilder, order: &Order) {
        doc.rule();
        doc.gap(6.0);
        doc.text(
            &format!("Total: {}", format_currency(&self.currency_symbol, order.total)),
            TextStyle::header().with_size(12.0),
            Align::Right,
        );
    }
}

/// Shortest exact form: `1`, `1.5`, `0.25`, `0.333`
fn format_weight(weight: f64) -> String {
    weight.to_string()
}
