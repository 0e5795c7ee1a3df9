//! Tracks the page fetch triggered by the latest pagination change.
//!
//! Every [`PageLoader::begin`] supersedes the previous request. A result is
//! only applied when it belongs to the most recent ticket, so a slow response
//! for old parameters can never overwrite the page for the current ones.

use crate::pagination::PaginatedResponse;
use crate::repository::PageRequest;
use crate::repository::errors::{RepositoryError, RepositoryResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestTicket(u64);

#[derive(Debug)]
pub enum LoadState<T> {
    Idle,
    Loading,
    Loaded(PaginatedResponse<T>),
    Failed(RepositoryError),
}

#[derive(Debug)]
pub struct PageLoader<T> {
    latest: u64,
    request: Option<PageRequest>,
    state: LoadState<T>,
}

impl<T> Default for PageLoader<T> {
    fn default() -> Self {
        Self {
            latest: 0,
            request: None,
            state: LoadState::Idle,
        }
    }
}

impl<T> PageLoader<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts loading `request`; any earlier in-flight request becomes stale.
    pub fn begin(&mut self, request: PageRequest) -> RequestTicket {
        self.latest += 1;
        self.request = Some(request);
        self.state = LoadState::Loading;
        RequestTicket(self.latest)
    }

    /// Applies `result` if `ticket` is still current. Returns whether it was
    /// applied.
    pub fn resolve(
        &mut self,
        ticket: RequestTicket,
        result: RepositoryResult<PaginatedResponse<T>>,
    ) -> bool {
        if ticket.0 != self.latest {
            log::debug!(
                "Dropping stale page response (ticket {}, latest {})",
                ticket.0,
                self.latest
            );
            return false;
        }
        self.state = match result {
            Ok(page) => LoadState::Loaded(page),
            Err(err) => LoadState::Failed(err),
        };
        true
    }

    /// Fetches synchronously through `fetch` and applies the result.
    pub fn load<F>(&mut self, request: PageRequest, fetch: F) -> &LoadState<T>
    where
        F: FnOnce(&PageRequest) -> RepositoryResult<PaginatedResponse<T>>,
    {
        let ticket = self.begin(request.clone());
        let result = fetch(&request);
        self.resolve(ticket, result);
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading)
    }

    pub fn current_request(&self) -> Option<&PageRequest> {
        self.request.as_ref()
    }

    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    pub fn into_state(self) -> LoadState<T> {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::PaginationParams;

    fn request(page: u32) -> PageRequest {
        PageRequest::new("/users", PaginationParams::new(page, 10))
    }

    fn page(number: u32) -> PaginatedResponse<u32> {
        PaginatedResponse::new(vec![number], number, 10, 100)
    }

    #[test]
    fn latest_request_wins() {
        let mut loader = PageLoader::new();
        let stale = loader.begin(request(1));
        let current = loader.begin(request(2));

        assert!(loader.is_loading());
        assert!(loader.resolve(current, Ok(page(1))));
        assert!(!loader.resolve(stale, Ok(page(0))));

        match loader.state() {
            LoadState::Loaded(loaded) => assert_eq!(loaded.number, 1),
            other => panic!("unexpected state {other:?}"),
        }
        assert_eq!(loader.current_request(), Some(&request(2)));
    }

    #[test]
    fn stale_result_does_not_end_loading() {
        let mut loader: PageLoader<u32> = PageLoader::new();
        let stale = loader.begin(request(1));
        loader.begin(request(2));

        assert!(!loader.resolve(stale, Ok(page(0))));
        assert!(loader.is_loading());
    }

    #[test]
    fn failures_become_failed_state() {
        let mut loader: PageLoader<u32> = PageLoader::new();
        let state = loader.load(request(1), |_| {
            Err(RepositoryError::ConnectionError("timeout".to_string()))
        });
        assert!(matches!(state, LoadState::Failed(RepositoryError::ConnectionError(_))));
    }

    #[test]
    fn load_applies_result() {
        let mut loader = PageLoader::new();
        loader.load(request(3), |req| Ok(page(req.params.page() - 1)));
        assert!(matches!(loader.into_state(), LoadState::Loaded(p) if p.number == 2));
    }
}
