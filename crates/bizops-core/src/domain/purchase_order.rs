//! Purchase Order Entity

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::entity::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseOrderStatus {
    #[default]
    Draft,
    Submitted,
    Approved,
    Ordered,
    Received,
    Cancelled,
}

impl PurchaseOrderStatus {
    pub const ALL: [PurchaseOrderStatus; 6] = [
        PurchaseOrderStatus::Draft,
        PurchaseOrderStatus::Submitted,
        PurchaseOrderStatus::Approved,
        PurchaseOrderStatus::Ordered,
        PurchaseOrderStatus::Received,
        PurchaseOrderStatus::Cancelled,
    ];

    /// Statuses this one may move to
    pub fn next_statuses(&self) -> &'static [PurchaseOrderStatus] {
        use PurchaseOrderStatus::*;
        match self {
            Draft => &[Submitted, Cancelled],
            Submitted => &[Approved, Cancelled],
            Approved => &[Ordered, Cancelled],
            Ordered => &[Received],
            Received | Cancelled => &[],
        }
    }

    pub fn can_transition_to(&self, next: PurchaseOrderStatus) -> bool {
        self.next_statuses().contains(&next)
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, PurchaseOrderStatus::Received | PurchaseOrderStatus::Cancelled)
    }
}

impl fmt::Display for PurchaseOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PurchaseOrderStatus::Draft => "Draft",
            PurchaseOrderStatus::Submitted => "Submitted",
            PurchaseOrderStatus::Approved => "Approved",
            PurchaseOrderStatus::Ordered => "Ordered",
            PurchaseOrderStatus::Received => "Received",
            PurchaseOrderStatus::Cancelled => "Cancelled",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderLine {
    pub description: String,
    pub quantity: u32,
    pub unit_price: f64,
}

impl PurchaseOrderLine {
    pub fn total(&self) -> f64 {
        f64::from(self.quantity) * self.unit_price
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    #[serde(alias = "_id")]
    pub id: String,
    pub po_number: String,
    pub supplier_id: String,
    #[serde(default)]
    pub supplier_name: String,
    #[serde(default)]
    pub status: PurchaseOrderStatus,
    pub order_date: DateTime<Utc>,
    #[serde(default)]
    pub expected_delivery: Option<NaiveDate>,
    #[serde(default)]
    pub lines: Vec<PurchaseOrderLine>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Entity for PurchaseOrder {
    fn id(&self) -> &str {
        &self.id
    }
}

impl PurchaseOrder {
    pub fn total(&self) -> f64 {
        self.lines.iter().map(PurchaseOrderLine::total).sum()
    }
}

/// Body for creating a purchase order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPurchaseOrder {
    pub supplier_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_delivery: Option<NaiveDate>,
    pub lines: Vec<PurchaseOrderLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewPurchaseOrder {
    pub fn total(&self) -> f64 {
        self.lines.iter().map(PurchaseOrderLine::total).sum()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.supplier_id.is_empty() {
            return Err("Choose a supplier".to_string());
        }
        if self.lines.is_empty() {
            return Err("Add at least one line".to_string());
        }
        for (i, line) in self.lines.iter().enumerate() {
            if line.description.trim().is_empty() {
                return Err(format!("Line {} needs a description", i + 1));
            }
            if line.quantity == 0 {
                return Err(format!("Line {} needs a quantity", i + 1));
            }
            if line.unit_price < 0.0 {
                return Err(format!("Line {} has a negative price", i + 1));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PurchaseOrderStatus::*;

    fn line(description: &str, quantity: u32, unit_price: f64) -> PurchaseOrderLine {
        PurchaseOrderLine { description: description.into(), quantity, unit_price }
    }

    #[test]
    fn test_status_transitions() {
        assert!(Draft.can_transition_to(Submitted));
        assert!(Approved.can_transition_to(Cancelled));
        assert!(!Ordered.can_transition_to(Cancelled));
        assert!(!Received.can_transition_to(Draft));
        assert!(Ordered.is_open());
        assert!(!Cancelled.is_open());
    }

    #[test]
    fn test_order_total() {
        let order = NewPurchaseOrder {
            supplier_id: "s1".into(),
            lines: vec![line("Sheet steel", 4, 12.5), line("Rivets", 100, 0.1)],
            ..Default::default()
        };
        assert!((order.total() - 60.0).abs() < 1e-9);
        assert!(order.validate().is_ok());
    }

    #[test]
    fn test_validation_names_the_bad_line() {
        let order = NewPurchaseOrder {
            supplier_id: "s1".into(),
            lines: vec![line("ok", 1, 1.0), line("", 1, 1.0)],
            ..Default::default()
        };
        assert_eq!(order.validate().unwrap_err(), "Line 2 needs a description");
        let empty = NewPurchaseOrder { supplier_id: "s1".into(), ..Default::default() };
        assert_eq!(empty.validate().unwrap_err(), "Add at least one line");
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(serde_json::to_string(&Received).unwrap(), "\"received\"");
    }
}
