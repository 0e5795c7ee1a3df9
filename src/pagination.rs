//! Pagination state carried in the URL and the page envelope returned by data
//! sources.
//!
//! [`PaginationParams`] is always normalized: parsing never fails and falls
//! back to defaults for missing or malformed input, so downstream code can
//! trust `page >= 1` and `1 <= size <= 100`.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const DEFAULT_SIZE_OPTIONS: [u32; 3] = [10, 20, 50];

pub const PAGE_PARAM: &str = "page";
pub const SIZE_PARAM: &str = "size";
pub const SEARCH_PARAM: &str = "q";

/// Ordered `application/x-www-form-urlencoded` key/value pairs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a raw query string. Undecodable input yields an empty set.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        match serde_html_form::from_str::<Vec<(String, String)>>(query) {
            Ok(pairs) => Self { pairs },
            Err(err) => {
                log::debug!("Ignoring malformed query string {query:?}: {err}");
                Self::default()
            }
        }
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Replaces the first value under `key` and drops later duplicates, or
    /// appends the pair when the key is absent.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter().position(|(k, _)| *k == key) {
            Some(idx) => {
                self.pairs[idx].1 = value;
                let mut seen = false;
                self.pairs.retain(|(k, _)| {
                    if *k != key {
                        return true;
                    }
                    let keep = !seen;
                    seen = true;
                    keep
                });
            }
            None => self.pairs.push((key, value)),
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl Display for QueryParams {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // Plain string pairs always encode.
        let encoded = serde_html_form::to_string(&self.pairs).unwrap_or_default();
        f.write_str(&encoded)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (k, v) in iter {
            params.set(k, v);
        }
        params
    }
}

/// Reads a leading integer the way browsers' `parseInt` does: optional
/// whitespace, optional sign, then digits. Anything after the digits is
/// ignored. Returns `None` when no digit is present.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    let mut any = false;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        any = true;
        value = value.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }

    if !any {
        return None;
    }
    Some(if negative { -value } else { value })
}

/// Reads `key` as an integer; zero counts as absent.
fn read_number(params: &QueryParams, key: &str) -> Option<i64> {
    params
        .get(key)
        .and_then(parse_leading_int)
        .filter(|value| *value != 0)
}

/// Requested page (1-based) and page size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct PaginationParams {
    page: u32,
    size: u32,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationParams {
    /// Builds clamped parameters: `page >= 1`, `size` in `[1, 100]`.
    pub fn new(page: u32, size: u32) -> Self {
        Self::clamped(i64::from(page), i64::from(size))
    }

    fn clamped(page: i64, size: i64) -> Self {
        let page = page.clamp(1, i64::from(u32::MAX));
        let size = size.clamp(1, i64::from(MAX_PAGE_SIZE));
        Self {
            page: u32::try_from(page).unwrap_or(DEFAULT_PAGE),
            size: u32::try_from(size).unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }

    pub const fn page(&self) -> u32 {
        self.page
    }

    pub const fn size(&self) -> u32 {
        self.size
    }

    #[must_use]
    pub fn with_page(self, page: u32) -> Self {
        Self::new(page, self.size)
    }

    /// A size change always lands on the first page.
    #[must_use]
    pub fn with_size(self, size: u32) -> Self {
        Self::new(DEFAULT_PAGE, size)
    }

    /// Reads `page` and `size`, substituting defaults for anything missing,
    /// non-numeric or zero, then clamping into range.
    pub fn parse(params: &QueryParams) -> Self {
        let page = read_number(params, PAGE_PARAM).unwrap_or(i64::from(DEFAULT_PAGE));
        let size = read_number(params, SIZE_PARAM).unwrap_or(i64::from(DEFAULT_PAGE_SIZE));
        Self::clamped(page, size)
    }

    pub fn from_query(query: &str) -> Self {
        Self::parse(&QueryParams::parse(query))
    }

    /// Writes `page` and `size` into an existing query, keeping other keys.
    pub fn apply_to(&self, params: &mut QueryParams) {
        params.set(PAGE_PARAM, self.page.to_string());
        params.set(SIZE_PARAM, self.size.to_string());
    }

    pub fn to_query_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        self.apply_to(&mut params);
        params
    }

    /// Encodes `page` and `size` followed by `extra`; extras win on key
    /// collision.
    pub fn serialize(&self, extra: &[(&str, &str)]) -> String {
        let mut params = self.to_query_params();
        for (key, value) in extra {
            params.set(*key, *value);
        }
        params.to_string()
    }
}

/// Raw search text stored under `q`, empty when absent.
pub fn search_term(params: &QueryParams) -> &str {
    params.get(SEARCH_PARAM).unwrap_or("")
}

/// One page of results as returned by a data source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u32,
    pub size: u32,
    /// Zero-based page index.
    pub number: u32,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl<T> PaginatedResponse<T> {
    /// Builds an envelope whose flags agree with its content. Content beyond
    /// `size` is dropped.
    pub fn new(mut content: Vec<T>, number: u32, size: u32, total_elements: u64) -> Self {
        let size = size.max(1);
        content.truncate(size as usize);
        let total_pages = u32::try_from(total_elements.div_ceil(u64::from(size))).unwrap_or(u32::MAX);

        Self {
            empty: content.is_empty(),
            content,
            total_elements,
            total_pages,
            size,
            number,
            first: number == 0,
            last: u64::from(number) + 1 >= u64::from(total_pages),
        }
    }

    pub fn empty_page(params: PaginationParams) -> Self {
        Self::new(Vec::new(), params.page() - 1, params.size(), 0)
    }

    /// One-based page number.
    pub fn page(&self) -> u32 {
        self.number + 1
    }

    pub fn map<U, F>(self, f: F) -> PaginatedResponse<U>
    where
        F: FnMut(T) -> U,
    {
        PaginatedResponse {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            size: self.size,
            number: self.number,
            first: self.first,
            last: self.last,
            empty: self.empty,
        }
    }
}

fn get_pages(
    total_pages: u32,
    current_page: u32,
    left_edge: u32,
    left_current: u32,
    right_current: u32,
    right_edge: u32,
) -> Vec<Option<u32>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();
    let current_page = current_page.min(last_page);
    let past_last = last_page.saturating_add(1);

    let left_end = left_edge.saturating_add(1).min(past_last);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = current_page
        .saturating_add(right_current)
        .saturating_add(1)
        .min(past_last);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge).saturating_add(1));

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// Page metadata as known to the caller. Flags and page count are optional;
/// whatever is supplied takes precedence over local derivation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageMeta {
    pub total_elements: u64,
    pub total_pages: Option<u32>,
    pub first: Option<bool>,
    pub last: Option<bool>,
}

impl PageMeta {
    pub fn new(total_elements: u64) -> Self {
        Self {
            total_elements,
            ..Self::default()
        }
    }

    pub fn total_pages(mut self, total_pages: u32) -> Self {
        self.total_pages = Some(total_pages);
        self
    }

    pub fn flags(mut self, first: bool, last: bool) -> Self {
        self.first = Some(first);
        self.last = Some(last);
        self
    }
}

/// Navigation model shown under a table: visible range, first/previous/
/// next/last targets and the page-size selector.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PaginationDisplay {
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub is_first: bool,
    pub is_last: bool,
    pub start: u64,
    pub end: u64,
    pub size_options: Vec<u32>,
    pub pages: Vec<Option<u32>>,
}

impl PaginationDisplay {
    pub fn new(params: PaginationParams, meta: PageMeta) -> Self {
        let page = params.page();
        let size = params.size();
        let total_pages = meta.total_pages.unwrap_or_else(|| {
            u32::try_from(meta.total_elements.div_ceil(u64::from(size))).unwrap_or(u32::MAX)
        });

        let start = u64::from(page - 1) * u64::from(size) + 1;
        let end = (u64::from(page) * u64::from(size)).min(meta.total_elements);

        Self {
            page,
            size,
            total_elements: meta.total_elements,
            total_pages,
            is_first: meta.first.unwrap_or(page == 1),
            is_last: meta.last.unwrap_or(page >= total_pages),
            start,
            end,
            size_options: DEFAULT_SIZE_OPTIONS.to_vec(),
            pages: get_pages(total_pages, page, 2, 2, 4, 2),
        }
    }

    /// Uses the server-supplied page count and flags as the source of truth.
    pub fn from_response<T>(params: PaginationParams, response: &PaginatedResponse<T>) -> Self {
        Self::new(
            params,
            PageMeta::new(response.total_elements)
                .total_pages(response.total_pages)
                .flags(response.first, response.last),
        )
    }

    pub fn params(&self) -> PaginationParams {
        PaginationParams::new(self.page, self.size)
    }

    pub fn range(&self) -> (u64, u64) {
        (self.start, self.end)
    }

    pub fn first_page(&self) -> Option<u32> {
        (!self.is_first).then_some(1)
    }

    pub fn previous_page(&self) -> Option<u32> {
        (!self.is_first).then(|| self.page.saturating_sub(1).max(1))
    }

    pub fn next_page(&self) -> Option<u32> {
        (!self.is_last).then(|| self.page.saturating_add(1))
    }

    pub fn last_page(&self) -> Option<u32> {
        (!self.is_last).then(|| self.total_pages.max(1))
    }

    /// Parameters after picking a new page size; the page resets to 1.
    pub fn change_size(&self, size: u32) -> PaginationParams {
        self.params().with_size(size)
    }

    pub fn change_page(&self, page: u32) -> PaginationParams {
        self.params().with_page(page)
    }
}
