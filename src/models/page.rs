use serde::Serialize;

use crate::constants::PAGE_CAPACITY;

/// One page of a user's home names
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Page {
    pub page: usize,
    #[serde(rename = "pageCount")]
    pub page_count: usize,
    pub total: usize,
    pub names: Vec<String>,
}

impl Page {
    /// Slice `names` into the requested page.
    ///
    /// There is always at least one page, and out-of-range requests are
    /// clamped to the last page.
    pub fn of(names: Vec<String>, requested: usize) -> Self {
        let total = names.len();
        let page_count = total.div_ceil(PAGE_CAPACITY).max(1);
        let page = requested.min(page_count - 1);

        let names = names
            .into_iter()
            .skip(page * PAGE_CAPACITY)
            .take(PAGE_CAPACITY)
            .collect();

        Self {
            page,
            page_count,
            total,
            names,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("home{:03}", i)).collect()
    }

    #[test]
    fn test_empty_list_has_one_page() {
        let page = Page::of(Vec::new(), 0);
        assert_eq!(page.page, 0);
        assert_eq!(page.page_count, 1);
        assert_eq!(page.total, 0);
        assert!(page.names.is_empty());
    }

    #[test]
    fn test_exact_capacity_is_single_page() {
        let page = Page::of(names(PAGE_CAPACITY), 0);
        assert_eq!(page.page_count, 1);
        assert_eq!(page.names.len(), PAGE_CAPACITY);
    }

    #[test]
    fn test_second_page_holds_remainder() {
        let page = Page::of(names(PAGE_CAPACITY + 5), 1);
        assert_eq!(page.page, 1);
        assert_eq!(page.page_count, 2);
        assert_eq!(page.total, PAGE_CAPACITY + 5);
        assert_eq!(page.names.len(), 5);
        assert_eq!(page.names[0], format!("home{:03}", PAGE_CAPACITY));
    }

    #[test]
    fn test_out_of_range_page_is_clamped() {
        let page = Page::of(names(10), 7);
        assert_eq!(page.page, 0);
        assert_eq!(page.names.len(), 10);
    }
}
