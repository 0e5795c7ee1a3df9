//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::dashboard::DashboardStats;
use crate::domain::user::User;
use crate::pagination::PaginatedResponse;
use crate::repository::errors::RepositoryResult;
use crate::repository::{DashboardReader, PageRequest, PageSource};

mock! {
    pub Repository {}

    impl PageSource<User> for Repository {
        fn fetch_page(&self, request: &PageRequest) -> RepositoryResult<PaginatedResponse<User>>;
    }

    impl DashboardReader for Repository {
        fn dashboard_stats(&self) -> RepositoryResult<DashboardStats>;
    }
}
