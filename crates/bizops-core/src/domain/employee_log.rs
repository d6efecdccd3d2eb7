//! Employee Activity Log Entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::Entity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeLog {
    #[serde(alias = "_id")]
    pub id: String,
    pub username: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub flagged: bool,
    #[serde(default)]
    pub admin_notes: Option<String>,
}

impl Entity for EmployeeLog {
    fn id(&self) -> &str {
        &self.id
    }
}

impl EmployeeLog {
    /// Apply an admin review locally (optimistic update)
    pub fn apply(&mut self, update: &EmployeeLogUpdate) {
        if let Some(flagged) = update.flagged {
            self.flagged = flagged;
        }
        if let Some(notes) = &update.admin_notes {
            self.admin_notes = if notes.is_empty() { None } else { Some(notes.clone()) };
        }
    }
}

/// Body for an employee submitting a log entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployeeLog {
    pub username: String,
    pub details: String,
}

/// Admin review body; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeLogUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flagged: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log() -> EmployeeLog {
        serde_json::from_str(
            r#"{"_id":"l1","username":"maria","timestamp":"2026-02-02T10:00:00Z","details":"Deburred 40 parts"}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_apply_flag_only() {
        let mut entry = log();
        entry.apply(&EmployeeLogUpdate { flagged: Some(true), admin_notes: None });
        assert!(entry.flagged);
        assert!(entry.admin_notes.is_none());
    }

    #[test]
    fn test_apply_empty_notes_clears() {
        let mut entry = log();
        entry.apply(&EmployeeLogUpdate { flagged: None, admin_notes: Some("check count".into()) });
        assert_eq!(entry.admin_notes.as_deref(), Some("check count"));
        entry.apply(&EmployeeLogUpdate { flagged: None, admin_notes: Some(String::new()) });
        assert!(entry.admin_notes.is_none());
    }
}
