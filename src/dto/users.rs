//! DTOs shaped for the user management template.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::pagination::PaginationDisplay;
use crate::table::RenderedTable;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PageLink {
    /// `None` renders as a gap.
    pub number: Option<u32>,
    pub href: Option<String>,
    pub current: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SizeLink {
    pub size: u32,
    pub href: String,
    pub selected: bool,
}

/// Pagination controls with every action resolved to a URL; disabled
/// actions have no URL.
#[derive(Debug, Clone, Serialize)]
pub struct PagerView {
    pub display: PaginationDisplay,
    pub first: Option<String>,
    pub previous: Option<String>,
    pub next: Option<String>,
    pub last: Option<String>,
    pub pages: Vec<PageLink>,
    pub sizes: Vec<SizeLink>,
}

/// Data required to render the users page.
#[derive(Debug, Serialize)]
pub struct UsersPageData {
    pub table: RenderedTable,
    pub pager: PagerView,
    /// Header link per column key for the next sort state.
    pub sort_links: BTreeMap<String, String>,
    pub total_elements: u64,
    pub search_query: String,
    /// Query string of the current view, posted back with searches.
    pub current_query: String,
}
