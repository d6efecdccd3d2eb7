//! Printable HTML reports.
//!
//! Each report is a complete standalone document; the app writes it into a
//! fresh window and hands it to the browser's print dialog.

use chrono::{DateTime, Utc};

use crate::dashboard::{self, FinanceSummary};
use crate::domain::{EmployeeLog, Item, PurchaseOrder, Supplier};
use crate::format::{self, escape_html};

const PRINT_CSS: &str = "\
body{font-family:Helvetica,Arial,sans-serif;color:#222;margin:24px;}\
h1{font-size:20px;margin:0 0 4px;}\
h2{font-size:15px;margin:24px 0 8px;border-bottom:1px solid #999;}\
.meta{color:#666;font-size:11px;margin-bottom:16px;}\
table{width:100%;border-collapse:collapse;font-size:11px;}\
th,td{border:1px solid #bbb;padding:4px 6px;text-align:left;}\
th{background:#eee;}\
td.num{text-align:right;}\
dl{display:grid;grid-template-columns:max-content auto;gap:4px 16px;font-size:12px;}\
dt{font-weight:bold;}\
footer{margin-top:32px;font-size:10px;color:#888;}\
@media print{body{margin:0;}h2{page-break-after:avoid;}tr{page-break-inside:avoid;}}";

/// A table cell; numbers are right-aligned
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(String),
}

impl Cell {
    fn render(&self) -> String {
        match self {
            Cell::Text(text) => format!("<td>{}</td>", escape_html(text)),
            Cell::Number(text) => format!("<td class=\"num\">{}</td>", escape_html(text)),
        }
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Cell::Text(text)
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::Text(text.to_string())
    }
}

/// Builds one report document section by section
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    title: String,
    subtitle: Option<String>,
    generated_at: DateTime<Utc>,
    body: String,
}

impl ReportBuilder {
    pub fn new(title: impl Into<String>, generated_at: DateTime<Utc>) -> Self {
        Self { title: title.into(), subtitle: None, generated_at, body: String::new() }
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn heading(mut self, text: &str) -> Self {
        self.body.push_str(&format!("<h2>{}</h2>", escape_html(text)));
        self
    }

    pub fn paragraph(mut self, text: &str) -> Self {
        self.body.push_str(&format!("<p>{}</p>", escape_html(text)));
        self
    }

    /// Label/value pairs rendered as a definition list
    pub fn summary(mut self, pairs: &[(&str, String)]) -> Self {
        self.body.push_str("<dl>");
        for (label, value) in pairs {
            self.body.push_str(&format!("<dt>{}</dt><dd>{}</dd>", escape_html(label), escape_html(value)));
        }
        self.body.push_str("</dl>");
        self
    }

    pub fn table(mut self, headers: &[&str], rows: Vec<Vec<Cell>>) -> Self {
        if rows.is_empty() {
            return self.paragraph("No records.");
        }
        self.body.push_str("<table><thead><tr>");
        for header in headers {
            self.body.push_str(&format!("<th>{}</th>", escape_html(header)));
        }
        self.body.push_str("</tr></thead><tbody>");
        for row in rows {
            self.body.push_str("<tr>");
            for cell in row {
                self.body.push_str(&cell.render());
            }
            self.body.push_str("</tr>");
        }
        self.body.push_str("</tbody></table>");
        self
    }

    pub fn build(self) -> String {
        let title = escape_html(&self.title);
        let subtitle = self
            .subtitle
            .map(|s| format!("<div class=\"meta\">{}</div>", escape_html(&s)))
            .unwrap_or_default();
        format!(
            "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{title}</title><style>{css}</style></head>\
             <body><h1>{title}</h1>{subtitle}<div class=\"meta\">Generated {generated}</div>{body}\
             <footer>Internal use only.</footer></body></html>",
            title = title,
            css = PRINT_CSS,
            subtitle = subtitle,
            generated = escape_html(&format::date_time(&self.generated_at)),
            body = self.body,
        )
    }
}

pub fn inventory_report(items: &[Item], now: DateTime<Utc>) -> String {
    let total_quantity: u64 = items.iter().map(|i| u64::from(i.quantity)).sum();
    let rows = items
        .iter()
        .map(|item| {
            let (done, total) = item.progress();
            let current = item.current_phase().map(|p| p.name.clone()).unwrap_or_else(|| "Complete".to_string());
            vec![
                Cell::from(item.part_number.as_str()),
                Cell::from(item.name.as_str()),
                Cell::from(item.client.as_str()),
                Cell::from(item.priority.to_string()),
                Cell::Number(format::count(u64::from(item.quantity))),
                Cell::from(current),
                Cell::Number(format!("{}%", format::percent(done, total))),
            ]
        })
        .collect();

    let phase_rows = dashboard::phase_progress(items)
        .into_iter()
        .map(|p| {
            vec![
                Cell::from(p.part_number.as_str()),
                Cell::from(p.phase_name.as_str()),
                Cell::from(p.status.label()),
                Cell::Number(format!("{}/{} ({}%)", p.done, p.total, p.percent())),
                Cell::Number(format::duration_minutes(p.expected_minutes)),
                Cell::Number(format::duration_seconds(p.actual_seconds)),
            ]
        })
        .collect();

    ReportBuilder::new("Production Inventory Report", now)
        .summary(&[
            ("Items", format::count(items.len() as u64)),
            ("Total quantity", format::count(total_quantity)),
        ])
        .heading("Items")
        .table(&["Part #", "Name", "Client", "Priority", "Qty", "Current phase", "Progress"], rows)
        .heading("Phase progress")
        .table(&["Part #", "Phase", "Status", "Subphases", "Expected", "Actual"], phase_rows)
        .build()
}

pub fn supplier_report(suppliers: &[Supplier], now: DateTime<Utc>) -> String {
    let total_value: f64 = suppliers.iter().map(|s| s.inventory_value).sum();
    let rows = suppliers
        .iter()
        .map(|s| {
            vec![
                Cell::from(s.name.as_str()),
                Cell::from(s.contact_name.as_str()),
                Cell::from(s.email.as_str()),
                Cell::from(s.phone.as_str()),
                Cell::from(s.full_address()),
                Cell::Number(format::count(u64::from(s.item_count))),
                Cell::Number(format::currency(s.inventory_value)),
            ]
        })
        .collect();

    ReportBuilder::new("Supplier Report", now)
        .summary(&[
            ("Suppliers", format::count(suppliers.len() as u64)),
            ("Inventory value", format::currency(total_value)),
        ])
        .heading("Suppliers")
        .table(&["Name", "Contact", "Email", "Phone", "Address", "Items", "Value"], rows)
        .build()
}

pub fn purchase_order_report(orders: &[PurchaseOrder], now: DateTime<Utc>) -> String {
    let mut builder = ReportBuilder::new("Purchase Orders", now).summary(&[
        ("Orders", format::count(orders.len() as u64)),
        ("Total value", format::currency(orders.iter().map(PurchaseOrder::total).sum())),
    ]);

    for order in orders {
        let heading = format!("{} · {} · {}", order.po_number, order.supplier_name, order.status);
        let delivery = order.expected_delivery.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string());
        let rows = order
            .lines
            .iter()
            .map(|line| {
                vec![
                    Cell::from(line.description.as_str()),
                    Cell::Number(format::count(u64::from(line.quantity))),
                    Cell::Number(format::currency(line.unit_price)),
                    Cell::Number(format::currency(line.total())),
                ]
            })
            .collect();
        builder = builder
            .heading(&heading)
            .summary(&[
                ("Ordered", format::date(&order.order_date)),
                ("Expected", delivery),
                ("Total", format::currency(order.total())),
            ])
            .table(&["Description", "Qty", "Unit price", "Line total"], rows);
    }

    builder.build()
}

pub fn finance_report(summary: &FinanceSummary, now: DateTime<Utc>) -> String {
    let spend_rows = summary
        .spend_by_status
        .iter()
        .map(|(status, total)| vec![Cell::from(status.to_string()), Cell::Number(format::currency(*total))])
        .collect();
    let supplier_rows = summary
        .top_suppliers
        .iter()
        .map(|(name, value)| vec![Cell::from(name.as_str()), Cell::Number(format::currency(*value))])
        .collect();

    ReportBuilder::new("Financial Summary", now)
        .summary(&[
            ("Inventory value", format::currency(summary.inventory_value)),
            ("Stock lines", format::count(summary.stock_lines as u64)),
            ("Low stock lines", format::count(summary.low_stock_lines as u64)),
            ("Open commitments", format::currency(summary.open_commitments)),
        ])
        .heading("Purchase order spend by status")
        .table(&["Status", "Total"], spend_rows)
        .heading("Top suppliers by inventory value")
        .table(&["Supplier", "Value"], supplier_rows)
        .build()
}

pub fn employee_log_report(logs: &[&EmployeeLog], now: DateTime<Utc>) -> String {
    let flagged = logs.iter().filter(|l| l.flagged).count();
    let rows = logs
        .iter()
        .map(|log| {
            vec![
                Cell::from(format::date_time(&log.timestamp)),
                Cell::from(log.username.as_str()),
                Cell::from(log.details.as_str()),
                Cell::from(if log.flagged { "Yes" } else { "" }),
                Cell::from(log.admin_notes.clone().unwrap_or_default()),
            ]
        })
        .collect();

    ReportBuilder::new("Employee Activity Log", now)
        .summary(&[
            ("Entries", format::count(logs.len() as u64)),
            ("Flagged", format::count(flagged as u64)),
        ])
        .table(&["When", "Employee", "Details", "Flagged", "Admin notes"], rows)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_document_shell() {
        let html = ReportBuilder::new("Weekly", now()).subtitle("Plant 2").build();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Weekly</title>"));
        assert!(html.contains("Plant 2"));
        assert!(html.contains("Generated Oct 18, 2026 09:30 UTC"));
        assert!(html.contains("@media print"));
        assert!(html.ends_with("</html>"));
    }

    #[test]
    fn test_cells_are_escaped() {
        let html = ReportBuilder::new("<script>", now())
            .table(&["Name"], vec![vec![Cell::from("Smith & <Sons>")]])
            .build();
        assert!(!html.contains("<script>"));
        assert!(html.contains("Smith &amp; &lt;Sons&gt;"));
    }

    #[test]
    fn test_empty_table_says_so() {
        let html = ReportBuilder::new("Empty", now()).table(&["A"], Vec::new()).build();
        assert!(html.contains("No records."));
        assert!(!html.contains("<table>"));
    }

    #[test]
    fn test_supplier_report_totals() {
        let suppliers: Vec<Supplier> = serde_json::from_str(
            r#"[{"id":"1","name":"Acme","inventoryValue":1500.5,"itemCount":3},
                {"id":"2","name":"Globex","inventoryValue":499.5,"itemCount":1}]"#,
        )
        .unwrap();
        let html = supplier_report(&suppliers, now());
        assert!(html.contains("$2,000.00"));
        assert!(html.contains("<td class=\"num\">$1,500.50</td>"));
    }

    #[test]
    fn test_purchase_order_report_sections() {
        let orders: Vec<PurchaseOrder> = serde_json::from_str(
            r#"[{"id":"o1","poNumber":"PO-1001","supplierId":"1","supplierName":"Acme","status":"ordered",
                 "orderDate":"2026-10-01T00:00:00Z","expectedDelivery":"2026-10-20",
                 "lines":[{"description":"Steel","quantity":10,"unitPrice":12.5}]}]"#,
        )
        .unwrap();
        let html = purchase_order_report(&orders, now());
        assert!(html.contains("PO-1001 · Acme · Ordered"));
        assert!(html.contains("2026-10-20"));
        assert!(html.contains("$125.00"));
    }
}
