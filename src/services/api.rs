use crate::domain::user::User;
use crate::pagination::{PaginatedResponse, PaginationParams, QueryParams, SEARCH_PARAM};
use crate::repository::{PageRequest, PageSource, USERS_PATH};
use crate::services::ServiceResult;

/// Serves `/api/users`: `page`/`size` are normalized, a non-empty `q` is
/// forwarded to the data source as a filter.
pub fn list_users<R>(repo: &R, query: &QueryParams) -> ServiceResult<PaginatedResponse<User>>
where
    R: PageSource<User> + ?Sized,
{
    let mut request = PageRequest::new(USERS_PATH, PaginationParams::parse(query));

    if let Some(term) = query
        .get(SEARCH_PARAM)
        .map(str::trim)
        .filter(|term| !term.is_empty())
    {
        request = request.extra(SEARCH_PARAM, term);
    }

    let page = repo.fetch_page(&request).map_err(|err| {
        log::error!("Failed to list users: {err}");
        err
    })?;

    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::fixture::FixtureRepository;
    use crate::repository::mock::MockRepository;

    #[test]
    fn forwards_trimmed_search() {
        let mut repo = MockRepository::new();
        repo.expect_fetch_page()
            .withf(|request| request.extra_param(SEARCH_PARAM) == Some("kim"))
            .times(1)
            .returning(|request| Ok(PaginatedResponse::empty_page(request.params)));

        list_users(&repo, &QueryParams::parse("q=+kim+")).unwrap();
    }

    #[test]
    fn blank_search_is_not_forwarded() {
        let mut repo = MockRepository::new();
        repo.expect_fetch_page()
            .withf(|request| request.extra.is_empty())
            .times(1)
            .returning(|request| Ok(PaginatedResponse::empty_page(request.params)));

        list_users(&repo, &QueryParams::parse("q=%20")).unwrap();
    }

    #[test]
    fn fixture_pages_are_capped_at_fifty() {
        let page = list_users(&FixtureRepository::default(), &QueryParams::parse("size=80")).unwrap();
        assert_eq!(page.size, 50);
        assert_eq!(page.content.len(), 50);
    }
}
