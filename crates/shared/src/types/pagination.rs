//! Client-side pagination for list screens.
//!
//! The backend returns whole collections; filtering and paging happen on
//! the loaded copy.

use serde::{Deserialize, Serialize};

/// Request parameters for a page of a loaded list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-indexed).
    #[serde(default = "default_page")]
    pub page: u32,
    /// Number of items per page.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    10
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

impl PageRequest {
    /// Creates a page request; zero values are bumped to 1.
    #[must_use]
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    /// Index of the first item of this page.
    #[must_use]
    pub fn offset(&self) -> usize {
        (self.page.max(1) as usize - 1) * self.per_page.max(1) as usize
    }

    /// Slices `items` into the requested page.
    ///
    /// A page past the end yields an empty page with correct metadata.
    #[must_use]
    pub fn paginate<T: Clone>(&self, items: &[T]) -> Page<T> {
        let per_page = self.per_page.max(1);
        let total = items.len();
        let start = self.offset().min(total);
        let end = (start + per_page as usize).min(total);
        let total_pages = u32::try_from(total.div_ceil(per_page as usize))
            .unwrap_or(u32::MAX)
            .max(1);

        Page {
            data: items[start..end].to_vec(),
            meta: PageMeta {
                page: self.page.max(1),
                per_page,
                total,
                total_pages,
            },
        }
    }
}

/// A page of items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items in the current page.
    pub data: Vec<T>,
    /// Pagination metadata.
    pub meta: PageMeta,
}

/// Pagination metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Current page number.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total number of items across all pages.
    pub total: usize,
    /// Total number of pages (at least 1).
    pub total_pages: u32,
}
