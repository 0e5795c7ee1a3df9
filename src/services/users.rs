use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::domain::user::User;
use crate::dto::users::{PageLink, PagerView, SizeLink, UsersPageData};
use crate::loader::{LoadState, PageLoader};
use crate::pagination::{
    PAGE_PARAM, PaginationDisplay, PaginationParams, QueryParams, SEARCH_PARAM, search_term,
};
use crate::repository::{PageRequest, PageSource, USERS_PATH};
use crate::services::{ServiceError, ServiceResult};
use crate::table::{Column, ColumnSchema, SearchMode, SortDirection, TableController, TableOptions};

pub const USERS_PAGE_URL: &str = "/users";
pub const SORT_PARAM: &str = "sort";
pub const DIRECTION_PARAM: &str = "dir";
/// Column filters travel as `f_<column key>=<value>`.
pub const FILTER_PREFIX: &str = "f_";

/// Column schema of the user management table.
pub fn user_columns() -> ColumnSchema<User> {
    ColumnSchema::new(vec![
        Column::new("id", "ID", |u: &User| u.id.get()).size(60),
        Column::new("name", "Name", |u: &User| u.name.clone()).size(120),
        Column::new("email", "Email", |u: &User| u.email.clone()).size(200),
        Column::new("role", "Role", |u: &User| u.role.as_str())
            .size(100)
            .cell(|u: &User| u.role.label().to_string()),
        Column::new("status", "Status", |u: &User| u.status.as_str())
            .size(100)
            .cell(|u: &User| u.status.label().to_string()),
        Column::new("department", "Department", |u: &User| u.department.clone()).size(120),
        Column::new("phone", "Phone", |u: &User| u.phone.clone()).size(130),
        Column::new("joinDate", "Joined", |u: &User| u.join_date.to_string()).size(110),
        Column::new("lastLogin", "Last login", |u: &User| u.last_login.to_rfc3339())
            .size(160)
            .cell(|u: &User| u.last_login.format("%Y-%m-%d %H:%M").to_string()),
    ])
}

fn users_table_options() -> TableOptions {
    TableOptions {
        search_placeholder: "Search by name, email or department...".to_string(),
        empty_message: "No users found.".to_string(),
        ..TableOptions::default()
    }
}

/// `/users` with the given query, or bare `/users` when there is none.
pub fn users_location(query: &QueryParams) -> String {
    if query.is_empty() {
        USERS_PAGE_URL.to_string()
    } else {
        format!("{USERS_PAGE_URL}?{query}")
    }
}

/// URL after a search submit: a non-empty term is stored and the view jumps
/// back to page 1; an empty term removes the search.
pub fn search_location(current: &QueryParams, term: &str) -> String {
    let mut next = current.clone();
    if term.is_empty() {
        next.remove(SEARCH_PARAM);
    } else {
        next.set(SEARCH_PARAM, term);
        next.set(PAGE_PARAM, "1");
    }
    users_location(&next)
}

fn build_table(query: &QueryParams, on_submit: impl FnMut(&str) + 'static) -> TableController<User> {
    let mut table = TableController::new(
        user_columns(),
        users_table_options(),
        SearchMode::external(search_term(query), on_submit),
    );

    if let Some(key) = query.get(SORT_PARAM) {
        let direction = query
            .get(DIRECTION_PARAM)
            .and_then(|dir| dir.parse::<SortDirection>().ok())
            .unwrap_or(SortDirection::Ascending);
        table.set_sort(key, Some(direction));
    }

    for (key, value) in query.iter() {
        if let Some(column) = key.strip_prefix(FILTER_PREFIX) {
            table.set_column_filter(column, value);
        }
    }

    table
}

fn sort_links(table: &TableController<User>, query: &QueryParams) -> BTreeMap<String, String> {
    table
        .columns()
        .iter()
        .map(|column| {
            let mut next = query.clone();
            match table.sort_after_toggle(column.key()) {
                Some(sort) => {
                    next.set(SORT_PARAM, sort.key);
                    next.set(DIRECTION_PARAM, sort.direction.as_param());
                }
                None => {
                    next.remove(SORT_PARAM);
                    next.remove(DIRECTION_PARAM);
                }
            }
            (column.key().to_string(), users_location(&next))
        })
        .collect()
}

fn pager_view(display: PaginationDisplay, query: &QueryParams) -> PagerView {
    let link = |params: PaginationParams| {
        let mut next = query.clone();
        params.apply_to(&mut next);
        users_location(&next)
    };
    let page_link = |page: u32| link(display.change_page(page));

    let pages = display
        .pages
        .iter()
        .map(|number| PageLink {
            number: *number,
            href: number.map(page_link),
            current: *number == Some(display.page),
        })
        .collect();

    let sizes = display
        .size_options
        .iter()
        .map(|&size| SizeLink {
            size,
            href: link(display.change_size(size)),
            selected: size == display.size,
        })
        .collect();

    PagerView {
        first: display.first_page().map(page_link),
        previous: display.previous_page().map(page_link),
        next: display.next_page().map(page_link),
        last: display.last_page().map(page_link),
        pages,
        sizes,
        display,
    }
}

/// Loads one page of users and prepares the table and pager for rendering.
///
/// Search, sort and column filters are applied to the fetched page only.
pub fn load_users_page<R>(repo: &R, query: &QueryParams) -> ServiceResult<UsersPageData>
where
    R: PageSource<User> + ?Sized,
{
    let params = PaginationParams::parse(query);
    let request = PageRequest::new(USERS_PATH, params);

    let mut loader = PageLoader::new();
    loader.load(request, |request| repo.fetch_page(request));

    let page = match loader.into_state() {
        LoadState::Loaded(page) => page,
        LoadState::Failed(err) => {
            log::error!("Failed to load users: {err}");
            return Err(ServiceError::from(err));
        }
        LoadState::Idle | LoadState::Loading => {
            log::error!("User page fetch did not complete");
            return Err(ServiceError::Internal);
        }
    };

    let display = PaginationDisplay::from_response(params, &page);
    let total_elements = page.total_elements;

    let mut table = build_table(query, |_| {});
    table.set_data(page.content);

    let sort_links = sort_links(&table, query);

    Ok(UsersPageData {
        table: table.render(),
        pager: pager_view(display, query),
        sort_links,
        total_elements,
        search_query: search_term(query).to_string(),
        current_query: query.to_string(),
    })
}

/// Handles the search box: the trimmed input becomes the new `q` and the
/// returned URL is where the browser should go next.
pub fn submit_search(current: &QueryParams, input: &str) -> String {
    let location = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&location);
    let base = current.clone();

    let mut table = build_table(current, move |term| {
        *sink.borrow_mut() = Some(search_location(&base, term));
    });
    table.set_search_input(input);
    table.commit_search();

    let next = location.borrow_mut().take();
    next.unwrap_or_else(|| users_location(current))
}
