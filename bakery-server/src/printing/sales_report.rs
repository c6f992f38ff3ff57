//! Monthly sales report renderer

use bakery_pdf::{Align, DocumentBuilder, PageGeometry, TextStyle};
use shared::models::SalesReport;
use shared::money::format_currency;
use shared::util::format_millis;

use super::{PAGE_MARGIN, render_error};
use crate::utils::AppResult;

/// Sales report renderer
pub struct SalesReportRenderer {
    currency_symbol: String,
    geometry: PageGeometry,
}

impl SalesReportRenderer {
    pub fn new(currency_symbol: impl Into<String>) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
            geometry: PageGeometry::a4(PAGE_MARGIN),
        }
    }

    /// Download filename for a month
    pub fn filename(month: &str) -> String {
        format!("sales-{}.pdf", month)
    }

    pub fn render(&self, report: &SalesReport) -> AppResult<Vec<u8>> {
        self.layout(report).finish().map_err(render_error)
    }

    pub fn layout(&self, report: &SalesReport) -> DocumentBuilder {
        let summary = &report.summary;
        let mut doc =
            DocumentBuilder::new(format!("Sales {}", summary.month), self.geometry);

        doc.text("Monthly Sales Report", TextStyle::title(), Align::Center);
        doc.gap(12.0);

        let heading = TextStyle::body().with_size(12.0);
        doc.text(&format!("Month: {}", summary.month), heading, Align::Left)
            .text(
                &format!(
                    "Total Sales: {}",
                    format_currency(&self.currency_symbol, summary.total)
                ),
                heading,
                Align::Left,
            )
            .text(&format!("Orders: {}", summary.orders), heading, Align::Left);
        doc.gap(12.0);

        for order in &report.orders {
            doc.text(
                &format!(
                    "Order {} - {} - {}",
                    order.id,
                    format_currency(&self.currency_symbol, order.total),
                    format_millis(order.created_at)
                ),
                TextStyle::body(),
                Align::Left,
            );
        }

        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{OrderSummary, SalesSummary};

    fn report(n: i64) -> SalesReport {
        let orders: Vec<OrderSummary> = (1..=n)
            .map(|id| OrderSummary {
                id,
                total: 45.0,
                created_at: 1_704_067_200_000 + id * 60_000,
            })
            .collect();
        SalesReport {
            summary: SalesSummary {
                month: "2024-01".into(),
                total: 45.0 * n as f64,
                orders: n,
            },
            orders,
        }
    }

    #[test]
    fn summary_lines() {
        let renderer = SalesReportRenderer::new("Rs.");
        let pages = renderer.layout(&report(2)).into_pages();
        let texts: Vec<&str> = pages[0].texts().collect();
        assert_eq!(
            texts,
            vec![
                "Monthly Sales Report",
                "Month: 2024-01",
                "Total Sales: Rs.90.00",
                "Orders: 2",
                "Order 1 - Rs.45.00 - 2024-01-01 00:01:00 UTC",
                "Order 2 - Rs.45.00 - 2024-01-01 00:02:00 UTC",
            ]
        );
    }

    #[test]
    fn long_reports_paginate() {
        let renderer = SalesReportRenderer::new("Rs.");
        let doc = renderer.layout(&report(200));
        assert!(doc.layout().page_count() > 1);

        let pages = doc.into_pages();
        let order_lines = pages
            .iter()
            .flat_map(|p| p.texts())
            .filter(|t| t.starts_with("Order "))
            .count();
        assert_eq!(order_lines, 200);
    }

    #[test]
    fn empty_month_renders() {
        let renderer = SalesReportRenderer::new("Rs.");
        let bytes = renderer.render(&report(0)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert_eq!(SalesReportRenderer::filename("2024-01"), "sales-2024-01.pdf");
    }
}
