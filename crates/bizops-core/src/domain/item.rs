//! Production Item Entity
//!
//! An item moving through the shop floor. Each item carries an ordered list
//! of phases, and each phase an ordered list of subphases.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::entity::Entity;

/// Scheduling priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 4] = [Priority::Low, Priority::Medium, Priority::High, Priority::Urgent];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }

    /// Lenient parse used for form values; unknown strings fall back to medium
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Priority::Low,
            "high" => Priority::High,
            "urgent" => Priority::Urgent,
            _ => Priority::Medium,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Urgent => "Urgent",
        };
        f.write_str(label)
    }
}

/// Production item (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(alias = "_id")]
    pub id: String,
    pub part_number: String,
    pub name: String,
    #[serde(default)]
    pub client: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub phases: Vec<Phase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Entity for Item {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Item {
    /// (completed subphases, total subphases) across all phases
    pub fn progress(&self) -> (usize, usize) {
        self.phases.iter().fold((0, 0), |(done, total), phase| {
            (done + phase.completed_subphases(), total + phase.subphases.len())
        })
    }

    pub fn phase(&self, phase_id: &str) -> Option<&Phase> {
        self.phases.iter().find(|p| p.id == phase_id)
    }

    pub fn subphase(&self, phase_id: &str, subphase_id: &str) -> Option<&Subphase> {
        self.phase(phase_id)?.subphases.iter().find(|s| s.id == subphase_id)
    }

    /// Subphases assigned to an employee as (phase, subphase) pairs, in display order
    pub fn assigned_to<'a>(&'a self, username: &'a str) -> impl Iterator<Item = (&'a Phase, &'a Subphase)> + 'a {
        self.phases.iter().flat_map(move |phase| {
            phase
                .subphases
                .iter()
                .filter(move |s| s.assigned_employee.as_deref() == Some(username))
                .map(move |s| (phase, s))
        })
    }

    /// The first phase that is not completed, if any
    pub fn current_phase(&self) -> Option<&Phase> {
        self.phases.iter().find(|p| p.status() != PhaseStatus::Completed)
    }
}

/// Lifecycle state derived from phase timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseStatus {
    NotStarted,
    Running,
    Paused,
    Completed,
}

impl PhaseStatus {
    pub const ALL: [PhaseStatus; 4] = [
        PhaseStatus::NotStarted,
        PhaseStatus::Running,
        PhaseStatus::Paused,
        PhaseStatus::Completed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PhaseStatus::NotStarted => "Not started",
            PhaseStatus::Running => "Running",
            PhaseStatus::Paused => "Paused",
            PhaseStatus::Completed => "Completed",
        }
    }
}

/// Timer actions the API accepts on a phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseAction {
    Start,
    Pause,
    Resume,
    End,
}

impl PhaseAction {
    /// Path segment used by the operations endpoint
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseAction::Start => "start",
            PhaseAction::Pause => "pause",
            PhaseAction::Resume => "resume",
            PhaseAction::End => "end",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PhaseAction::Start => "Start",
            PhaseAction::Pause => "Pause",
            PhaseAction::Resume => "Resume",
            PhaseAction::End => "End",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pause_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub subphases: Vec<Subphase>,
}

impl Phase {
    pub fn status(&self) -> PhaseStatus {
        match (self.start_time, self.pause_time, self.end_time) {
            (_, _, Some(_)) => PhaseStatus::Completed,
            (None, _, None) => PhaseStatus::NotStarted,
            (Some(_), Some(_), None) => PhaseStatus::Paused,
            (Some(_), None, None) => PhaseStatus::Running,
        }
    }

    /// Actions that make sense from the current status
    pub fn available_actions(&self) -> &'static [PhaseAction] {
        match self.status() {
            PhaseStatus::NotStarted => &[PhaseAction::Start],
            PhaseStatus::Running => &[PhaseAction::Pause, PhaseAction::End],
            PhaseStatus::Paused => &[PhaseAction::Resume, PhaseAction::End],
            PhaseStatus::Completed => &[],
        }
    }

    pub fn completed_subphases(&self) -> usize {
        self.subphases.iter().filter(|s| s.completed).count()
    }

    /// Sum of expected subphase durations, in minutes
    pub fn expected_minutes(&self) -> u32 {
        self.subphases.iter().map(|s| s.expected_duration).sum()
    }

    /// Sum of accumulated subphase durations, in seconds
    pub fn actual_seconds(&self) -> u64 {
        self.subphases.iter().map(|s| s.actual_duration).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subphase {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    /// Minutes
    #[serde(default)]
    pub expected_duration: u32,
    #[serde(default)]
    pub expected_quantity: u32,
    #[serde(default)]
    pub current_quantity: u32,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub assigned_employee: Option<String>,
    /// Seconds
    #[serde(default)]
    pub actual_duration: u64,
}

impl Subphase {
    pub fn remaining_quantity(&self) -> u32 {
        self.expected_quantity.saturating_sub(self.current_quantity)
    }
}

/// Partial update body for a subphase; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubphaseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_employee: Option<String>,
}

/// Body for creating a production item
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub part_number: String,
    pub name: String,
    pub client: String,
    pub priority: Priority,
    pub quantity: u32,
}

impl NewItem {
    /// Returns the first problem with the form, if any
    pub fn validate(&self) -> Result<(), String> {
        if self.part_number.trim().is_empty() {
            return Err("Part number is required".to_string());
        }
        if self.name.trim().is_empty() {
            return Err("Name is required".to_string());
        }
        if self.quantity == 0 {
            return Err("Quantity must be at least 1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, h, 0, 0).unwrap()
    }

    fn sub(id: &str, completed: bool, who: Option<&str>) -> Subphase {
        Subphase {
            id: id.to_string(),
            name: format!("Sub {}", id),
            expected_duration: 30,
            expected_quantity: 10,
            current_quantity: if completed { 10 } else { 4 },
            completed,
            assigned_employee: who.map(str::to_string),
            actual_duration: 600,
        }
    }

    fn phase(id: &str, start: Option<u32>, pause: Option<u32>, end: Option<u32>) -> Phase {
        Phase {
            id: id.to_string(),
            name: format!("Phase {}", id),
            start_time: start.map(ts),
            pause_time: pause.map(ts),
            end_time: end.map(ts),
            subphases: vec![sub("a", true, Some("maria")), sub("b", false, Some("tom"))],
        }
    }

    #[test]
    fn test_phase_status_from_timestamps() {
        assert_eq!(phase("1", None, None, None).status(), PhaseStatus::NotStarted);
        assert_eq!(phase("1", Some(8), None, None).status(), PhaseStatus::Running);
        assert_eq!(phase("1", Some(8), Some(9), None).status(), PhaseStatus::Paused);
        assert_eq!(phase("1", Some(8), Some(9), Some(10)).status(), PhaseStatus::Completed);
    }

    #[test]
    fn test_available_actions() {
        assert_eq!(phase("1", None, None, None).available_actions(), &[PhaseAction::Start]);
        assert_eq!(
            phase("1", Some(8), Some(9), None).available_actions(),
            &[PhaseAction::Resume, PhaseAction::End]
        );
        assert!(phase("1", Some(8), None, Some(9)).available_actions().is_empty());
    }

    #[test]
    fn test_item_progress_and_lookup() {
        let item = Item {
            id: "it1".into(),
            part_number: "PN-100".into(),
            name: "Bracket".into(),
            client: "Acme".into(),
            priority: Priority::High,
            quantity: 10,
            phases: vec![phase("p1", Some(8), None, Some(9)), phase("p2", None, None, None)],
            created_at: None,
        };
        assert_eq!(item.progress(), (2, 4));
        assert_eq!(item.subphase("p2", "b").map(|s| s.remaining_quantity()), Some(6));
        assert!(item.subphase("p3", "a").is_none());
        assert_eq!(item.current_phase().map(|p| p.id.as_str()), Some("p2"));
        let tom: Vec<_> = item.assigned_to("tom").map(|(p, s)| (p.id.clone(), s.id.clone())).collect();
        assert_eq!(tom, vec![("p1".to_string(), "b".to_string()), ("p2".to_string(), "b".to_string())]);
    }

    #[test]
    fn test_deserialize_api_payload() {
        let json = r#"{
            "_id": "66aa",
            "partNumber": "PN-7",
            "name": "Housing",
            "client": "Globex",
            "priority": "urgent",
            "quantity": 3,
            "phases": [{
                "_id": "ph1",
                "name": "Machining",
                "startTime": "2026-03-01T08:00:00Z",
                "subphases": [{"_id": "s1", "name": "Rough cut", "expectedQuantity": 3}]
            }]
        }"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, "66aa");
        assert_eq!(item.priority, Priority::Urgent);
        assert_eq!(item.phases[0].status(), PhaseStatus::Running);
        assert_eq!(item.phases[0].subphases[0].current_quantity, 0);
    }

    #[test]
    fn test_subphase_update_omits_absent_fields() {
        let update = SubphaseUpdate { completed: Some(true), ..Default::default() };
        assert_eq!(serde_json::to_string(&update).unwrap(), r#"{"completed":true}"#);
    }

    #[test]
    fn test_new_item_validation() {
        let mut form = NewItem { part_number: "PN".into(), name: "X".into(), quantity: 1, ..Default::default() };
        assert!(form.validate().is_ok());
        form.quantity = 0;
        assert_eq!(form.validate().unwrap_err(), "Quantity must be at least 1");
        form.part_number = "  ".into();
        assert_eq!(form.validate().unwrap_err(), "Part number is required");
    }

    #[test]
    fn test_priority_parse_is_lenient() {
        assert_eq!(Priority::parse("HIGH"), Priority::High);
        assert_eq!(Priority::parse("whatever"), Priority::Medium);
    }
}
