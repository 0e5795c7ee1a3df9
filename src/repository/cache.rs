//! Response cache keyed by the full page request.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::domain::dashboard::DashboardStats;
use crate::pagination::PaginatedResponse;
use crate::repository::errors::RepositoryResult;
use crate::repository::{DashboardReader, PageRequest, PageSource};

/// Entries older than this are fetched again.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

struct CachedPage<T> {
    page: PaginatedResponse<T>,
    stored_at: Instant,
}

/// Serves repeated identical page requests from memory. Failed fetches are
/// not cached. Entries expire after `ttl`; past `capacity` the oldest entry
/// is evicted.
pub struct CachedPageSource<S, T> {
    inner: S,
    ttl: Duration,
    capacity: usize,
    pages: Mutex<HashMap<PageRequest, CachedPage<T>>>,
}

impl<S, T> CachedPageSource<S, T> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            ttl: DEFAULT_CACHE_TTL,
            capacity: DEFAULT_CACHE_CAPACITY,
            pages: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// A capacity of zero disables caching.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn invalidate(&self) -> RepositoryResult<()> {
        self.pages.lock()?.clear();
        Ok(())
    }

    pub fn cached_pages(&self) -> RepositoryResult<usize> {
        Ok(self.pages.lock()?.len())
    }

    fn is_fresh(&self, entry: &CachedPage<T>) -> bool {
        entry.stored_at.elapsed() < self.ttl
    }
}

impl<S, T> PageSource<T> for CachedPageSource<S, T>
where
    S: PageSource<T>,
    T: Clone,
{
    fn fetch_page(&self, request: &PageRequest) -> RepositoryResult<PaginatedResponse<T>> {
        {
            let mut pages = self.pages.lock()?;
            match pages.get(request) {
                Some(entry) if self.is_fresh(entry) => {
                    log::debug!("Cache hit for {}?{}", request.path, request.query());
                    return Ok(entry.page.clone());
                }
                Some(_) => {
                    pages.remove(request);
                }
                None => {}
            }
        }

        let page = self.inner.fetch_page(request)?;
        if self.capacity == 0 {
            return Ok(page);
        }

        let mut pages = self.pages.lock()?;
        pages.retain(|_, entry| self.is_fresh(entry));
        while pages.len() >= self.capacity {
            let oldest = pages
                .iter()
                .min_by_key(|(_, entry)| entry.stored_at)
                .map(|(key, _)| key.clone());
            match oldest {
                Some(key) => {
                    pages.remove(&key);
                }
                None => break,
            }
        }
        pages.insert(
            request.clone(),
            CachedPage {
                page: page.clone(),
                stored_at: Instant::now(),
            },
        );
        Ok(page)
    }
}

impl<S, T> DashboardReader for CachedPageSource<S, T>
where
    S: DashboardReader,
{
    fn dashboard_stats(&self) -> RepositoryResult<DashboardStats> {
        self.inner.dashboard_stats()
    }
}
