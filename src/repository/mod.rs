//! Data-source boundary of the console.
//!
//! Pages are requested with a [`PageRequest`] keyed by its full parameter
//! tuple, so identical requests can be answered from [`cache::CachedPageSource`].

use std::collections::BTreeMap;

use crate::domain::dashboard::DashboardStats;
use crate::pagination::{PaginatedResponse, PaginationParams, QueryParams};
use crate::repository::errors::RepositoryResult;

pub mod cache;
pub mod errors;
pub mod fixture;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

pub const USERS_PATH: &str = "/users";

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PageRequest {
    pub path: String,
    pub params: PaginationParams,
    /// Additional filters (search, sort) sent along with `page` and `size`.
    pub extra: BTreeMap<String, String>,
}

impl PageRequest {
    pub fn new(path: impl Into<String>, params: PaginationParams) -> Self {
        Self {
            path: path.into(),
            params,
            extra: BTreeMap::new(),
        }
    }

    pub fn extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn extra_param(&self, key: &str) -> Option<&str> {
        self.extra.get(key).map(String::as_str)
    }

    /// `page`, `size` and the extras as they would travel on the wire.
    pub fn query(&self) -> QueryParams {
        let mut query = self.params.to_query_params();
        for (key, value) in &self.extra {
            query.set(key.as_str(), value.as_str());
        }
        query
    }
}

pub trait PageSource<T> {
    fn fetch_page(&self, request: &PageRequest) -> RepositoryResult<PaginatedResponse<T>>;
}

pub trait DashboardReader {
    fn dashboard_stats(&self) -> RepositoryResult<DashboardStats>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_merges_extras_after_pagination() {
        let request = PageRequest::new(USERS_PATH, PaginationParams::new(2, 20))
            .extra("q", "kim")
            .extra("size", "5");
        assert_eq!(request.query().to_string(), "page=2&size=5&q=kim");
    }

    #[test]
    fn identical_requests_compare_equal() {
        let a = PageRequest::new(USERS_PATH, PaginationParams::new(1, 10)).extra("q", "x");
        let b = PageRequest::new(USERS_PATH, PaginationParams::new(1, 10)).extra("q", "x");
        assert_eq!(a, b);
        assert_ne!(a, b.extra("q", "y"));
    }
}
