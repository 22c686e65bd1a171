//! Pagination and client-side filtering helpers shared by the listing screens.

use shared::protocol::Page;
use tracing::warn;

/// Pagination control state: zero-based page index over `total_pages`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pager {
    pub page: u32,
    pub total_pages: u32,
}

impl Pager {
    pub fn new(page: u32, total_pages: u32) -> Self {
        Self { page, total_pages }
    }

    pub fn has_prev(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.page.saturating_add(1) < self.total_pages
    }

    pub fn prev(&self) -> Option<u32> {
        self.has_prev().then(|| self.page - 1)
    }

    pub fn next(&self) -> Option<u32> {
        self.has_next().then(|| self.page + 1)
    }

    /// `"2/5"` style indicator.
    pub fn label(&self) -> String {
        format!("{}/{}", self.page.saturating_add(1), self.total_pages)
    }
}

/// Enforces `content.len() <= size` on a server page.
pub fn clamp_page<T>(mut page: Page<T>, size: u32, resource: &str) -> Page<T> {
    let size = size as usize;
    if page.content.len() > size {
        warn!(
            resource,
            received = page.content.len(),
            size,
            "paging: server returned more rows than requested, truncating"
        );
        page.content.truncate(size);
    }
    page
}

/// Case-insensitive substring match used by the client-side filters.
pub fn matches_needle(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Keeps the items where any of the `fields` contains `needle`.
pub fn filter_items<'a, T, F>(items: &'a [T], needle: &str, fields: F) -> Vec<&'a T>
where
    F: Fn(&T) -> Vec<&str>,
{
    items
        .iter()
        .filter(|item| fields(*item).into_iter().any(|f| matches_needle(f, needle)))
        .collect()
}
