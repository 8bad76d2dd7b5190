use serde::{Deserialize, Serialize};

pub const PAGE_WINDOW: usize = 2;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    /// 0-based.
    pub page: usize,
    pub page_size: usize,
}

impl PageRequest {
    pub fn new(page: usize, page_size: usize) -> Self {
        Self { page, page_size: page_size.max(1) }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 0, page_size: 20 }
    }
}

/// Pagination computed from the filtered count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub current_page: usize,
    pub page_size: usize,
    pub total_elements: usize,
    pub total_pages: usize,
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub page_numbers: Vec<usize>,
}

impl PageInfo {
    pub fn compute(total_elements: usize, request: PageRequest) -> Self {
        let page_size = request.page_size.max(1);
        let current_page = request.page;
        let total_pages = total_elements.div_ceil(page_size);

        let first = current_page.saturating_sub(PAGE_WINDOW);
        let last = current_page.saturating_add(PAGE_WINDOW).min(total_pages.saturating_sub(1));
        let page_numbers = if total_pages == 0 || first > last {
            Vec::new()
        } else {
            (first..=last).collect()
        };

        Self {
            current_page,
            page_size,
            total_elements,
            total_pages,
            has_next_page: current_page.saturating_add(1) < total_pages,
            has_previous_page: current_page > 0,
            page_numbers,
        }
    }

    /// Index range of the current page within the filtered list.
    pub fn bounds(&self) -> (usize, usize) {
        let start = self.current_page.saturating_mul(self.page_size).min(self.total_elements);
        let end = start.saturating_add(self.page_size).min(self.total_elements);
        (start, end)
    }
}

/// Server-reported pagination block, kept apart from [`PageInfo`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServerPagination {
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(default)]
    pub current_page_size: Option<u32>,
    #[serde(default)]
    pub total_elements: Option<u64>,
    #[serde(default)]
    pub has_next_page: Option<bool>,
    #[serde(default)]
    pub has_previous_page: Option<bool>,
    #[serde(default)]
    pub page_numbers: Option<Vec<u32>>,
}
