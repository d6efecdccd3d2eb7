//! Paginated list envelope returned by list endpoints.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total number of records across all pages
    pub total: u64,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
}

fn first_page() -> u32 {
    1
}

impl<T> Page<T> {
    /// Number of pages needed for `total` records, at least one
    pub fn page_count(&self) -> u32 {
        if self.limit == 0 {
            return 1;
        }
        let pages = (self.total + u64::from(self.limit) - 1) / u64::from(self.limit);
        pages.max(1) as u32
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self { items: Vec::new(), total: 0, page: 1, limit: 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(total: u64, page: u32, limit: u32) -> Page<u8> {
        Page { items: Vec::new(), total, page, limit }
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page(0, 1, 20).page_count(), 1);
        assert_eq!(page(20, 1, 20).page_count(), 1);
        assert_eq!(page(21, 1, 20).page_count(), 2);
        assert_eq!(page(5, 1, 0).page_count(), 1);
    }

    #[test]
    fn test_navigation_flags() {
        assert!(page(41, 2, 20).has_next());
        assert!(page(41, 2, 20).has_prev());
        assert!(!page(41, 3, 20).has_next());
        assert!(!page(41, 1, 20).has_prev());
    }

    #[test]
    fn test_missing_page_defaults_to_first() {
        let p: Page<u8> = serde_json::from_str(r#"{"items":[1,2],"total":2}"#).unwrap();
        assert_eq!(p.page, 1);
        assert_eq!(p.items, vec![1, 2]);
    }
}
