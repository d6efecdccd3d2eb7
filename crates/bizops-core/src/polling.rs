//! Operations refresh decisions.
//!
//! The Operations page re-fetches the current page of items on a fixed
//! interval and compares the reported total with the last one it saw. This
//! module holds that bookkeeping; the timer and the fetch live in the app.

use std::time::Duration;
use tracing::debug;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Tabs of the Operations page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationsTab {
    Dashboard,
    Inventory,
    Phases,
    Reports,
}

impl OperationsTab {
    pub const ALL: [OperationsTab; 4] =
        [OperationsTab::Dashboard, OperationsTab::Inventory, OperationsTab::Phases, OperationsTab::Reports];

    /// Tabs that show the item list and therefore keep polling
    pub const POLLED: [OperationsTab; 2] = [OperationsTab::Dashboard, OperationsTab::Inventory];

    pub fn label(&self) -> &'static str {
        match self {
            OperationsTab::Dashboard => "Dashboard",
            OperationsTab::Inventory => "Inventory",
            OperationsTab::Phases => "Phases",
            OperationsTab::Reports => "Reports",
        }
    }
}

/// What a poll result means for the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// First total seen; nothing to compare against yet
    Baseline,
    Unchanged,
    /// Total grew by this many items: reload and notify once
    NewItems(u64),
    /// Total shrank; the baseline follows silently
    Shrunk,
}

impl PollOutcome {
    pub fn needs_reload(&self) -> bool {
        matches!(self, PollOutcome::NewItems(_))
    }
}

/// Produced by a tick that saw new items: reload once and show `message` once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItemsNotice {
    pub count: u64,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct PollController {
    allowed: Vec<OperationsTab>,
    active_tab: OperationsTab,
    visible: bool,
    last_total: Option<u64>,
}

impl Default for PollController {
    fn default() -> Self {
        Self::new(OperationsTab::POLLED.to_vec())
    }
}

impl PollController {
    pub fn new(allowed: Vec<OperationsTab>) -> Self {
        Self { allowed, active_tab: OperationsTab::Dashboard, visible: true, last_total: None }
    }

    pub fn set_tab(&mut self, tab: OperationsTab) {
        self.active_tab = tab;
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// True when a tick should actually fetch
    pub fn should_poll(&self) -> bool {
        self.visible && self.allowed.contains(&self.active_tab)
    }

    pub fn last_total(&self) -> Option<u64> {
        self.last_total
    }

    /// Record the total from a full reload so the next tick compares against it
    pub fn reset_baseline(&mut self, total: u64) {
        self.last_total = Some(total);
    }

    /// Compare a freshly polled total with the last known one
    pub fn observe(&mut self, total: u64) -> PollOutcome {
        let outcome = match self.last_total {
            None => PollOutcome::Baseline,
            Some(last) if total > last => PollOutcome::NewItems(total - last),
            Some(last) if total < last => PollOutcome::Shrunk,
            Some(_) => PollOutcome::Unchanged,
        };
        self.last_total = Some(total);
        debug!(event = "poll.observed", total, outcome = ?outcome);
        outcome
    }

    /// Handle one polled total. Skipped entirely while polling is paused
    /// (hidden document or a tab that is not polled), so the baseline is kept.
    pub fn tick(&mut self, total: u64) -> Option<NewItemsNotice> {
        if !self.should_poll() {
            debug!(event = "poll.tick_skipped", total);
            return None;
        }
        match self.observe(total) {
            PollOutcome::NewItems(count) => Some(NewItemsNotice { count, message: new_items_message(count) }),
            _ => None,
        }
    }
}

/// Notification text for `count` newly detected items
pub fn new_items_message(count: u64) -> String {
    if count == 1 {
        "1 new item was added to inventory".to_string()
    } else {
        format!("{} new items were added to inventory", count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notices(controller: &mut PollController, totals: &[u64]) -> Vec<NewItemsNotice> {
        totals.iter().filter_map(|t| controller.tick(*t)).collect()
    }

    #[test]
    fn test_first_tick_sets_baseline_only() {
        let mut c = PollController::default();
        assert_eq!(c.tick(12), None);
        assert_eq!(c.last_total(), Some(12));
    }

    #[test]
    fn test_unchanged_total_fires_nothing() {
        let mut c = PollController::default();
        assert!(notices(&mut c, &[12, 12, 12, 12, 12]).is_empty());
    }

    #[test]
    fn test_increase_fires_exactly_one_notice() {
        let mut c = PollController::default();
        c.reset_baseline(10);
        let fired = notices(&mut c, &[13, 13, 13]);
        assert_eq!(
            fired,
            vec![NewItemsNotice { count: 3, message: "3 new items were added to inventory".to_string() }]
        );
        assert_eq!(c.last_total(), Some(13));
    }

    #[test]
    fn test_reload_resets_baseline_so_own_inserts_are_quiet() {
        let mut c = PollController::default();
        c.reset_baseline(10);
        c.reset_baseline(11);
        assert_eq!(c.tick(11), None);
    }

    #[test]
    fn test_shrink_moves_baseline_silently() {
        let mut c = PollController::default();
        c.reset_baseline(10);
        assert_eq!(c.observe(8), PollOutcome::Shrunk);
        assert_eq!(c.tick(9).map(|n| n.count), Some(1));
    }

    #[test]
    fn test_hidden_document_skips_ticks() {
        let mut c = PollController::default();
        c.reset_baseline(10);
        c.set_visible(false);
        assert_eq!(c.tick(20), None);
        assert_eq!(c.last_total(), Some(10));

        c.set_visible(true);
        assert_eq!(c.tick(20).map(|n| n.message), Some(new_items_message(10)));
    }

    #[test]
    fn test_unpolled_tab_keeps_baseline() {
        let mut c = PollController::default();
        c.reset_baseline(4);
        c.set_tab(OperationsTab::Reports);
        assert_eq!(c.tick(9), None);
        c.set_tab(OperationsTab::Inventory);
        assert_eq!(c.tick(9).map(|n| n.count), Some(5));
    }

    #[test]
    fn test_only_allowed_tabs_poll() {
        let mut c = PollController::default();
        for tab in OperationsTab::ALL {
            c.set_tab(tab);
            assert_eq!(c.should_poll(), OperationsTab::POLLED.contains(&tab), "{:?}", tab);
        }
    }

    #[test]
    fn test_singular_message() {
        assert_eq!(new_items_message(1), "1 new item was added to inventory");
        assert!(PollOutcome::NewItems(1).needs_reload());
        assert!(!PollOutcome::Baseline.needs_reload());
    }
}
