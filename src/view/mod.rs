//! Filter, sort and paginate mapped events; dashboard analytics on top.
//!
//! Everything here is pure given an explicit `now`.

pub mod analytics;
pub mod filters;
pub mod pagination;
pub mod sort;
pub mod venues;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::InternalEvent;

pub use filters::{filter_events, DateRange, ViewFilters};
pub use pagination::{PageInfo, PageRequest, ServerPagination};
pub use sort::{sort_events, SortKey};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ViewPage {
    pub items: Vec<InternalEvent>,
    pub pagination: PageInfo,
}

/// Filters, then sorts, then slices out the requested page.
pub fn apply_view(
    events: &[InternalEvent],
    filters: &ViewFilters,
    sort: Option<SortKey>,
    page: PageRequest,
    now: NaiveDateTime,
) -> ViewPage {
    let mut filtered = filter_events(events, filters, now);
    sort_events(&mut filtered, sort);

    let pagination = PageInfo::compute(filtered.len(), page);
    let (start, end) = pagination.bounds();
    let items = filtered.drain(start..end).collect();

    ViewPage { items, pagination }
}
