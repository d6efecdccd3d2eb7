//! Stock Item Entity
//!
//! Purchased stock tracked by Procurement and valued by Finance.

use serde::{Deserialize, Serialize};

use super::entity::Entity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub supplier_id: Option<String>,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub unit_price: f64,
    #[serde(default)]
    pub reorder_level: u32,
}

impl Entity for InventoryItem {
    fn id(&self) -> &str {
        &self.id
    }
}

impl InventoryItem {
    pub fn value(&self) -> f64 {
        f64::from(self.quantity) * self.unit_price
    }

    /// At or below the reorder level; `fallback` applies when no level is set
    pub fn is_low_stock(&self, fallback: u32) -> bool {
        let level = if self.reorder_level == 0 { fallback } else { self.reorder_level };
        self.quantity <= level
    }
}

/// Create and update body for a stock line
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockInput {
    pub name: String,
    pub sku: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<String>,
    pub quantity: u32,
    pub unit_price: f64,
    pub reorder_level: u32,
}

impl StockInput {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Name is required".to_string());
        }
        if !self.unit_price.is_finite() || self.unit_price < 0.0 {
            return Err("Unit price must be zero or more".to_string());
        }
        Ok(())
    }
}

impl From<&InventoryItem> for StockInput {
    fn from(item: &InventoryItem) -> Self {
        Self {
            name: item.name.clone(),
            sku: item.sku.clone(),
            category: item.category.clone(),
            supplier_id: item.supplier_id.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            reorder_level: item.reorder_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stock(quantity: u32, reorder_level: u32) -> InventoryItem {
        InventoryItem {
            id: "i1".into(),
            name: "Bolt M8".into(),
            sku: "B-M8".into(),
            category: "Fasteners".into(),
            supplier_id: None,
            quantity,
            unit_price: 0.25,
            reorder_level,
        }
    }

    #[test]
    fn test_value() {
        assert!((stock(200, 0).value() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_low_stock_uses_fallback_when_unset() {
        assert!(stock(5, 0).is_low_stock(5));
        assert!(!stock(6, 0).is_low_stock(5));
        assert!(stock(40, 50).is_low_stock(5));
    }

    #[test]
    fn test_stock_input_validation() {
        let mut input = StockInput::from(&stock(10, 0));
        assert!(input.validate().is_ok());
        input.unit_price = -1.0;
        assert!(input.validate().is_err());
        input.unit_price = 1.0;
        input.name = "  ".into();
        assert_eq!(input.validate(), Err("Name is required".to_string()));
    }
}
