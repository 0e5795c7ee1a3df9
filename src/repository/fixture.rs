//! Deterministic in-memory backend standing in for the REST API.
//!
//! Users are generated from their index, so every page is reproducible and
//! no storage is needed.

use chrono::{DateTime, Duration, Utc};

use crate::domain::dashboard::{AccountStats, DashboardStats, InvestmentStats, MemberStats};
use crate::domain::types::UserId;
use crate::domain::user::{User, UserRole, UserStatus};
use crate::pagination::{PaginatedResponse, SEARCH_PARAM};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DashboardReader, PageRequest, PageSource, USERS_PATH};

pub const DEFAULT_TOTAL_USERS: usize = 150;
/// The mock API serves at most this many rows per page.
pub const MAX_FIXTURE_PAGE_SIZE: u32 = 50;

/// 2026-01-01T00:00:00Z
const ANCHOR_TIMESTAMP: i64 = 1_767_225_600;

const DEPARTMENTS: [&str; 5] = ["Engineering", "Design", "Marketing", "Sales", "HR"];
const ROLES: [UserRole; 3] = [UserRole::Admin, UserRole::User, UserRole::Manager];
const STATUSES: [UserStatus; 3] = [UserStatus::Active, UserStatus::Inactive, UserStatus::Pending];

#[derive(Clone, Debug)]
pub struct FixtureRepository {
    total_users: usize,
    anchor: DateTime<Utc>,
}

impl Default for FixtureRepository {
    fn default() -> Self {
        Self::new(DEFAULT_TOTAL_USERS)
    }
}

impl FixtureRepository {
    pub fn new(total_users: usize) -> Self {
        Self {
            total_users,
            anchor: DateTime::from_timestamp(ANCHOR_TIMESTAMP, 0).unwrap_or_default(),
        }
    }

    pub fn total_users(&self) -> usize {
        self.total_users
    }

    fn user(&self, index: usize) -> RepositoryResult<User> {
        let n = index as i64 + 1;
        let joined = self.anchor - Duration::days((n * 37) % 365);
        let last_login = self.anchor - Duration::days((n * 13) % 30) - Duration::hours(n % 24);

        Ok(User {
            id: UserId::new(n)?,
            name: format!("User {n}"),
            email: format!("user{n}@example.com"),
            role: ROLES[index % ROLES.len()],
            status: STATUSES[index % STATUSES.len()],
            department: DEPARTMENTS[index % DEPARTMENTS.len()].to_string(),
            phone: format!(
                "010-{:04}-{:04}",
                1000 + (n * 7919) % 9000,
                1000 + (n * 104_729) % 9000
            ),
            join_date: joined.date_naive(),
            last_login,
            created_at: joined,
        })
    }

    fn list_users(&self, request: &PageRequest) -> RepositoryResult<PaginatedResponse<User>> {
        let page = request.params.page();
        let size = request.params.size().min(MAX_FIXTURE_PAGE_SIZE);

        let search = request
            .extra_param(SEARCH_PARAM)
            .map(str::trim)
            .filter(|term| !term.is_empty());

        let matching: Vec<usize> = match search {
            Some(term) => (0..self.total_users)
                .map(|index| self.user(index).map(|user| (index, user)))
                .collect::<RepositoryResult<Vec<_>>>()?
                .into_iter()
                .filter(|(_, user)| user.matches_search(term))
                .map(|(index, _)| index)
                .collect(),
            None => (0..self.total_users).collect(),
        };

        let start = (page as usize - 1).saturating_mul(size as usize);
        let content = matching
            .iter()
            .skip(start)
            .take(size as usize)
            .map(|&index| self.user(index))
            .collect::<RepositoryResult<Vec<_>>>()?;

        log::debug!(
            "Fixture served {} users for page {page} (size {size}, total {})",
            content.len(),
            matching.len()
        );

        Ok(PaginatedResponse::new(
            content,
            page - 1,
            size,
            matching.len() as u64,
        ))
    }
}

impl PageSource<User> for FixtureRepository {
    fn fetch_page(&self, request: &PageRequest) -> RepositoryResult<PaginatedResponse<User>> {
        match request.path.as_str() {
            USERS_PATH => self.list_users(request),
            other => Err(RepositoryError::UnknownPath(other.to_string())),
        }
    }
}

impl DashboardReader for FixtureRepository {
    fn dashboard_stats(&self) -> RepositoryResult<DashboardStats> {
        Ok(DashboardStats {
            members: MemberStats {
                total: 1250,
                contracted: 892,
            },
            investment: InvestmentStats {
                total_amount: 15_750_000_000,
                deposited_amount: 12_340_000_000,
            },
            accounts: AccountStats {
                total: 3420,
                suspended: 156,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::PaginationParams;

    fn request(page: u32, size: u32) -> PageRequest {
        PageRequest::new(USERS_PATH, PaginationParams::new(page, size))
    }

    #[test]
    fn first_page_starts_at_user_one() {
        let repo = FixtureRepository::default();
        let page = repo.fetch_page(&request(1, 10)).unwrap();

        assert_eq!(page.content.len(), 10);
        assert_eq!(page.content[0].id.get(), 1);
        assert_eq!(page.content[0].name, "User 1");
        assert_eq!(page.content[0].email, "user1@example.com");
        assert_eq!(page.content[0].role, UserRole::Admin);
        assert_eq!(page.content[1].status, UserStatus::Inactive);
        assert_eq!(page.content[4].department, "HR");
        assert_eq!(page.total_elements, 150);
        assert_eq!(page.total_pages, 15);
        assert!(page.first);
        assert!(!page.last);
    }

    #[test]
    fn last_partial_page() {
        let repo = FixtureRepository::new(45);
        let page = repo.fetch_page(&request(3, 20)).unwrap();

        assert_eq!(page.content.len(), 5);
        assert_eq!(page.content[0].id.get(), 41);
        assert_eq!(page.number, 2);
        assert!(page.last);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let repo = FixtureRepository::new(45);
        let page = repo.fetch_page(&request(9, 20)).unwrap();
        assert!(page.empty);
        assert!(page.last);
    }

    #[test]
    fn size_is_capped() {
        let repo = FixtureRepository::default();
        let page = repo.fetch_page(&request(1, 100)).unwrap();
        assert_eq!(page.size, MAX_FIXTURE_PAGE_SIZE);
        assert_eq!(page.content.len(), 50);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn search_extra_filters_before_paging() {
        let repo = FixtureRepository::default();
        let page = repo
            .fetch_page(&request(1, 10).extra(SEARCH_PARAM, " user15@ "))
            .unwrap();
        assert_eq!(page.total_elements, 1);
        assert_eq!(page.content[0].name, "User 15");
    }

    #[test]
    fn data_is_deterministic() {
        let repo = FixtureRepository::default();
        assert_eq!(
            repo.fetch_page(&request(2, 10)).unwrap(),
            repo.fetch_page(&request(2, 10)).unwrap()
        );
    }

    #[test]
    fn unknown_path_is_an_error() {
        let repo = FixtureRepository::default();
        let result = repo.fetch_page(&PageRequest::new("/orders", PaginationParams::default()));
        assert!(matches!(result, Err(RepositoryError::UnknownPath(path)) if path == "/orders"));
    }
}
