//! Supplier Entity

use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// Supplier record. `item_count` and `inventory_value` are computed by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub contact_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub item_count: u32,
    #[serde(default)]
    pub inventory_value: f64,
}

impl Entity for Supplier {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Supplier {
    /// Single-line postal address, skipping empty parts
    pub fn full_address(&self) -> String {
        let region = [self.state.as_str(), self.zip.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        [self.address.as_str(), self.city.as_str(), region.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Editable supplier fields (create and update body)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierInput {
    pub name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl SupplierInput {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Supplier name is required".to_string());
        }
        if !self.email.is_empty() && !self.email.contains('@') {
            return Err(format!("'{}' is not a valid email address", self.email));
        }
        Ok(())
    }
}

impl From<&Supplier> for SupplierInput {
    fn from(s: &Supplier) -> Self {
        Self {
            name: s.name.clone(),
            contact_name: s.contact_name.clone(),
            email: s.email.clone(),
            phone: s.phone.clone(),
            address: s.address.clone(),
            city: s.city.clone(),
            state: s.state.clone(),
            zip: s.zip.clone(),
            notes: s.notes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_address_skips_empty_parts() {
        let supplier: Supplier = serde_json::from_str(
            r#"{"id":"s1","name":"Steelworks","address":"1 Mill Rd","city":"Gary","state":"IN","zip":""}"#,
        )
        .unwrap();
        assert_eq!(supplier.full_address(), "1 Mill Rd, Gary, IN");
        assert_eq!(supplier.item_count, 0);
    }

    #[test]
    fn test_input_validation() {
        let mut input = SupplierInput { name: "Acme".into(), ..Default::default() };
        assert!(input.validate().is_ok());
        input.email = "nobody".into();
        assert!(input.validate().is_err());
        input.name = String::new();
        assert_eq!(input.validate().unwrap_err(), "Supplier name is required");
    }
}
