//! Figures shown on the department dashboards.

use std::collections::HashMap;

use crate::domain::{
    EmployeeLog, InventoryItem, Item, PhaseStatus, Priority, PurchaseOrder, PurchaseOrderStatus, Subphase, Supplier,
};
use crate::format;
use crate::transfer::SubphaseRef;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OperationsSummary {
    pub item_count: usize,
    pub total_quantity: u64,
    pub by_priority: Vec<(Priority, usize)>,
    pub by_phase_status: Vec<(PhaseStatus, usize)>,
    /// Completed subphases over all subphases, in percent
    pub completion: u8,
}

pub fn operations_summary(items: &[Item]) -> OperationsSummary {
    let by_priority = Priority::ALL
        .iter()
        .map(|p| (*p, items.iter().filter(|i| i.priority == *p).count()))
        .collect();

    let mut status_counts: HashMap<PhaseStatus, usize> = HashMap::new();
    for phase in items.iter().flat_map(|i| &i.phases) {
        *status_counts.entry(phase.status()).or_default() += 1;
    }
    let by_phase_status =
        PhaseStatus::ALL.iter().map(|s| (*s, status_counts.get(s).copied().unwrap_or(0))).collect();

    let (done, total) = items.iter().map(Item::progress).fold((0, 0), |(d, t), (id, it)| (d + id, t + it));

    OperationsSummary {
        item_count: items.len(),
        total_quantity: items.iter().map(|i| u64::from(i.quantity)).sum(),
        by_priority,
        by_phase_status,
        completion: format::percent(done, total),
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FinanceSummary {
    pub inventory_value: f64,
    pub stock_lines: usize,
    pub low_stock_lines: usize,
    pub spend_by_status: Vec<(PurchaseOrderStatus, f64)>,
    /// Value of orders not yet received or cancelled
    pub open_commitments: f64,
    /// Suppliers ordered by server-computed inventory value, highest first
    pub top_suppliers: Vec<(String, f64)>,
}

pub fn finance_summary(
    stock: &[InventoryItem],
    orders: &[PurchaseOrder],
    suppliers: &[Supplier],
    low_stock_threshold: u32,
    top_n: usize,
) -> FinanceSummary {
    let spend_by_status = PurchaseOrderStatus::ALL
        .iter()
        .map(|status| {
            let total = orders.iter().filter(|o| o.status == *status).map(PurchaseOrder::total).sum();
            (*status, total)
        })
        .collect();

    let mut top_suppliers: Vec<(String, f64)> =
        suppliers.iter().map(|s| (s.name.clone(), s.inventory_value)).collect();
    top_suppliers.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    top_suppliers.truncate(top_n);

    FinanceSummary {
        inventory_value: stock.iter().map(InventoryItem::value).sum(),
        stock_lines: stock.len(),
        low_stock_lines: stock.iter().filter(|i| i.is_low_stock(low_stock_threshold)).count(),
        spend_by_status,
        open_commitments: orders.iter().filter(|o| o.status.is_open()).map(PurchaseOrder::total).sum(),
        top_suppliers,
    }
}

/// One row of the engineering progress table
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseProgress {
    pub item_id: String,
    pub part_number: String,
    pub phase_name: String,
    pub status: PhaseStatus,
    pub done: usize,
    pub total: usize,
    pub expected_minutes: u32,
    pub actual_seconds: u64,
}

impl PhaseProgress {
    pub fn percent(&self) -> u8 {
        format::percent(self.done, self.total)
    }

    /// Actual time exceeds the estimate
    pub fn is_over_estimate(&self) -> bool {
        self.expected_minutes > 0 && self.actual_seconds > u64::from(self.expected_minutes) * 60
    }
}

pub fn phase_progress(items: &[Item]) -> Vec<PhaseProgress> {
    items
        .iter()
        .flat_map(|item| {
            item.phases.iter().map(move |phase| PhaseProgress {
                item_id: item.id.clone(),
                part_number: item.part_number.clone(),
                phase_name: phase.name.clone(),
                status: phase.status(),
                done: phase.completed_subphases(),
                total: phase.subphases.len(),
                expected_minutes: phase.expected_minutes(),
                actual_seconds: phase.actual_seconds(),
            })
        })
        .collect()
}

/// A subphase assigned to an employee, with enough context to act on it
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub at: SubphaseRef,
    pub part_number: String,
    pub item_name: String,
    pub phase_name: String,
    pub subphase: Subphase,
}

/// Open assignments first, then completed ones, each group in item order
pub fn assignments_for(items: &[Item], username: &str) -> Vec<Assignment> {
    let mut rows: Vec<Assignment> = items
        .iter()
        .flat_map(|item| {
            item.assigned_to(username).map(move |(phase, sub)| Assignment {
                at: SubphaseRef {
                    item_id: item.id.clone(),
                    phase_id: phase.id.clone(),
                    subphase_id: sub.id.clone(),
                },
                part_number: item.part_number.clone(),
                item_name: item.name.clone(),
                phase_name: phase.name.clone(),
                subphase: sub.clone(),
            })
        })
        .collect();
    rows.sort_by_key(|a| a.subphase.completed);
    rows
}

/// Logs matching an optional username substring and flag filter, newest first
pub fn filter_logs<'a>(logs: &'a [EmployeeLog], username: &str, flagged_only: bool) -> Vec<&'a EmployeeLog> {
    let needle = username.trim().to_ascii_lowercase();
    let mut rows: Vec<&EmployeeLog> = logs
        .iter()
        .filter(|l| !flagged_only || l.flagged)
        .filter(|l| needle.is_empty() || l.username.to_ascii_lowercase().contains(&needle))
        .collect();
    rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Phase, PurchaseOrderLine};
    use chrono::{TimeZone, Utc};

    fn sub(id: &str, done: bool, who: &str) -> Subphase {
        Subphase {
            id: id.into(),
            name: id.to_uppercase(),
            expected_duration: 10,
            expected_quantity: 5,
            current_quantity: if done { 5 } else { 0 },
            completed: done,
            assigned_employee: Some(who.into()),
            actual_duration: 900,
        }
    }

    fn item(id: &str, priority: Priority, started: bool) -> Item {
        Item {
            id: id.into(),
            part_number: format!("PN-{}", id),
            name: format!("Item {}", id),
            client: "Acme".into(),
            priority,
            quantity: 5,
            phases: vec![Phase {
                id: "p1".into(),
                name: "Cut".into(),
                start_time: started.then(|| Utc.with_ymd_and_hms(2026, 1, 5, 8, 0, 0).unwrap()),
                end_time: None,
                pause_time: None,
                subphases: vec![sub("a", true, "maria"), sub("b", false, "maria")],
            }],
            created_at: None,
        }
    }

    #[test]
    fn test_operations_summary() {
        let items = vec![item("1", Priority::High, true), item("2", Priority::High, false), item("3", Priority::Low, false)];
        let summary = operations_summary(&items);
        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.total_quantity, 15);
        assert!(summary.by_priority.contains(&(Priority::High, 2)));
        assert!(summary.by_phase_status.contains(&(PhaseStatus::Running, 1)));
        assert!(summary.by_phase_status.contains(&(PhaseStatus::NotStarted, 2)));
        assert_eq!(summary.completion, 50);
    }

    #[test]
    fn test_finance_summary() {
        let stock = vec![InventoryItem {
            id: "s".into(),
            name: "Bolt".into(),
            sku: String::new(),
            category: String::new(),
            supplier_id: None,
            quantity: 4,
            unit_price: 2.5,
            reorder_level: 0,
        }];
        let order = |status, price| PurchaseOrder {
            id: "o".into(),
            po_number: "PO-1".into(),
            supplier_id: "x".into(),
            supplier_name: "X".into(),
            status,
            order_date: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            expected_delivery: None,
            lines: vec![PurchaseOrderLine { description: "d".into(), quantity: 2, unit_price: price }],
            notes: None,
        };
        let orders = vec![
            order(PurchaseOrderStatus::Ordered, 100.0),
            order(PurchaseOrderStatus::Received, 50.0),
            order(PurchaseOrderStatus::Ordered, 25.0),
        ];
        let supplier = |name: &str, value| Supplier {
            id: name.into(),
            name: name.into(),
            contact_name: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            zip: String::new(),
            notes: None,
            item_count: 1,
            inventory_value: value,
        };
        let suppliers = vec![supplier("Beta", 10.0), supplier("Alpha", 90.0), supplier("Gamma", 40.0)];

        let summary = finance_summary(&stock, &orders, &suppliers, 5, 2);
        assert!((summary.inventory_value - 10.0).abs() < 1e-9);
        assert_eq!(summary.low_stock_lines, 1);
        assert!(summary.spend_by_status.contains(&(PurchaseOrderStatus::Ordered, 250.0)));
        assert!((summary.open_commitments - 250.0).abs() < 1e-9);
        assert_eq!(summary.top_suppliers, vec![("Alpha".to_string(), 90.0), ("Gamma".to_string(), 40.0)]);
    }

    #[test]
    fn test_phase_progress_rows() {
        let rows = phase_progress(&[item("1", Priority::Medium, true)]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].percent(), 50);
        assert_eq!(rows[0].expected_minutes, 20);
        assert!(rows[0].is_over_estimate());
    }

    #[test]
    fn test_assignments_open_first() {
        let rows = assignments_for(&[item("1", Priority::Medium, true)], "maria");
        assert_eq!(rows.len(), 2);
        assert!(!rows[0].subphase.completed);
        assert_eq!(rows[0].at.subphase_id, "b");
        assert!(assignments_for(&[item("1", Priority::Medium, true)], "tom").is_empty());
    }

    #[test]
    fn test_filter_logs() {
        let log = |id: &str, user: &str, day: u32, flagged: bool| EmployeeLog {
            id: id.into(),
            username: user.into(),
            timestamp: Utc.with_ymd_and_hms(2026, 2, day, 9, 0, 0).unwrap(),
            details: String::new(),
            flagged,
            admin_notes: None,
        };
        let logs = vec![log("1", "maria", 1, false), log("2", "tom", 3, true), log("3", "Maria", 2, true)];
        let ids: Vec<&str> = filter_logs(&logs, "mar", false).iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1"]);
        let ids: Vec<&str> = filter_logs(&logs, "", true).iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3"]);
    }
}
