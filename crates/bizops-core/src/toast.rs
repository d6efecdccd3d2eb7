//! Transient user notifications shown in the corner of the page.

use std::collections::VecDeque;
use std::time::Duration;

pub const MAX_VISIBLE: usize = 5;
pub const AUTO_DISMISS: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
    Warning,
}

impl ToastKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast-success",
            ToastKind::Error => "toast-error",
            ToastKind::Info => "toast-info",
            ToastKind::Warning => "toast-warning",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Bounded queue of visible toasts. The oldest toast is dropped once
/// `MAX_VISIBLE` is exceeded.
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    next_id: u64,
    toasts: VecDeque<Toast>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id of the new toast for scheduling its dismissal
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.toasts.push_back(Toast { id, kind, message: message.into() });
        while self.toasts.len() > MAX_VISIBLE {
            self.toasts.pop_front();
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_assigns_increasing_ids() {
        let mut queue = ToastQueue::new();
        let a = queue.push(ToastKind::Info, "one");
        let b = queue.push(ToastKind::Error, "two");
        assert!(b > a);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_oldest_dropped_past_limit() {
        let mut queue = ToastQueue::new();
        for i in 0..7 {
            queue.push(ToastKind::Success, format!("toast {i}"));
        }
        assert_eq!(queue.len(), MAX_VISIBLE);
        let first = queue.iter().next().map(|t| t.message.clone());
        assert_eq!(first.as_deref(), Some("toast 2"));
    }

    #[test]
    fn test_dismiss() {
        let mut queue = ToastQueue::new();
        let id = queue.push(ToastKind::Warning, "careful");
        assert!(queue.dismiss(id));
        assert!(!queue.dismiss(id));
        assert!(queue.is_empty());
    }
}
