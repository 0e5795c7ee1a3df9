//! Headless data-table controller.
//!
//! A [`TableController`] holds one page of rows fetched elsewhere and layers
//! client-side sorting, per-column filters, a global search box and optional
//! row selection on top of it. Rendering produces a serializable
//! [`RenderedTable`] that templates turn into markup.

use std::cmp::Ordering;

use serde::Serialize;

pub mod column;
pub mod state;

pub use column::{CellValue, Column, ColumnSchema};
pub use state::{ColumnSort, SearchMode, SortDirection, SortIndicator, TableState};

use state::next_direction;

#[derive(Clone, Debug)]
pub struct TableOptions {
    pub searchable: bool,
    pub sortable: bool,
    pub selectable: bool,
    pub search_placeholder: String,
    pub empty_message: String,
    pub loading_message: String,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            searchable: true,
            sortable: true,
            selectable: false,
            search_placeholder: "Search...".to_string(),
            empty_message: "No data.".to_string(),
            loading_message: "Loading...".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HeaderCell {
    pub key: String,
    pub label: String,
    pub width: Option<u32>,
    pub sortable: bool,
    pub sort: SortIndicator,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BodyRow {
    /// Position of the record in the input data.
    pub index: usize,
    pub selected: bool,
    pub cells: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TableBody {
    Loading { message: String },
    Empty { message: String },
    Rows { rows: Vec<BodyRow> },
}

impl TableBody {
    /// Number of `<tr>` elements the body produces.
    pub fn row_count(&self) -> usize {
        match self {
            TableBody::Loading { .. } | TableBody::Empty { .. } => 1,
            TableBody::Rows { rows } => rows.len(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenderedTable {
    pub headers: Vec<HeaderCell>,
    pub body: TableBody,
    pub colspan: usize,
    pub searchable: bool,
    pub search_placeholder: String,
    pub search_input_value: String,
    pub applied_search_text: String,
}

type SelectionCallback<T> = Box<dyn FnMut(&[&T])>;

pub struct TableController<T> {
    columns: ColumnSchema<T>,
    data: Vec<T>,
    options: TableOptions,
    search_mode: SearchMode,
    state: TableState,
    is_loading: bool,
    on_row_selection_change: Option<SelectionCallback<T>>,
}

impl<T> TableController<T> {
    pub fn new(columns: ColumnSchema<T>, options: TableOptions, search_mode: SearchMode) -> Self {
        let state = match &search_mode {
            SearchMode::Internal => TableState::default(),
            SearchMode::External { value, .. } => TableState::with_search(value),
        };

        Self {
            columns,
            data: Vec::new(),
            options,
            search_mode,
            state,
            is_loading: false,
            on_row_selection_change: None,
        }
    }

    #[must_use]
    pub fn with_data(mut self, data: Vec<T>) -> Self {
        self.data = data;
        self
    }

    /// Registers the callback receiving the selected records after every
    /// selection change.
    #[must_use]
    pub fn on_row_selection_change(mut self, callback: impl FnMut(&[&T]) + 'static) -> Self {
        self.on_row_selection_change = Some(Box::new(callback));
        self
    }

    /// Replaces the materialized page. Selection is index based and kept.
    pub fn set_data(&mut self, data: Vec<T>) {
        self.data = data;
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn columns(&self) -> &ColumnSchema<T> {
        &self.columns
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    pub fn set_loading(&mut self, is_loading: bool) {
        self.is_loading = is_loading;
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    fn can_sort(&self, key: &str) -> bool {
        self.options.sortable
            && self
                .columns
                .find(key)
                .is_some_and(|column| column.is_sortable())
    }

    /// Sort state a click on `key` would produce. Clicks on columns that
    /// cannot sort leave the state as is.
    pub fn sort_after_toggle(&self, key: &str) -> Option<ColumnSort> {
        if !self.can_sort(key) {
            return self.sorted_column().cloned();
        }
        next_direction(self.state.direction_of(key)).map(|direction| ColumnSort::new(key, direction))
    }

    /// Cycles `key` through none, ascending, descending and clears every
    /// other column.
    pub fn toggle_sort(&mut self, key: &str) {
        if !self.can_sort(key) {
            log::debug!("Ignoring sort toggle on column {key:?}");
            return;
        }
        self.state.sorting = self.sort_after_toggle(key).into_iter().collect();
    }

    /// Sets the sort directly, e.g. when restoring it from a URL.
    pub fn set_sort(&mut self, key: &str, direction: Option<SortDirection>) {
        if !self.can_sort(key) {
            return;
        }
        self.state.sorting = direction
            .map(|direction| ColumnSort::new(key, direction))
            .into_iter()
            .collect();
    }

    pub fn sorted_column(&self) -> Option<&ColumnSort> {
        self.state.sorting.first()
    }

    pub fn sort_indicator(&self, key: &str) -> SortIndicator {
        if !self.options.sortable {
            return SortIndicator::None;
        }
        self.state.direction_of(key).into()
    }

    pub fn search_mode(&self) -> &SearchMode {
        &self.search_mode
    }

    /// Updates the text box without touching the applied filter.
    pub fn set_search_input(&mut self, value: impl Into<String>) {
        self.state.search_input_value = value.into();
    }

    /// Enter key or search button. Internal mode applies the trimmed input;
    /// external mode hands it to the caller instead.
    pub fn commit_search(&mut self) {
        let trimmed = self.state.search_input_value.trim().to_string();
        match &mut self.search_mode {
            SearchMode::Internal => self.state.applied_search_text = trimmed,
            SearchMode::External { on_submit, .. } => on_submit(&trimmed),
        }
    }

    /// Pushes the externally controlled search value in. Both the input and
    /// the applied filter follow it whenever it changes. No effect in
    /// internal mode.
    pub fn sync_external_search(&mut self, value: &str) {
        match &mut self.search_mode {
            SearchMode::Internal => {
                log::debug!("Ignoring external search value on an internally searched table");
            }
            SearchMode::External { value: current, .. } => {
                if current.as_str() != value {
                    *current = value.to_string();
                    self.state.search_input_value = value.to_string();
                    self.state.applied_search_text = value.to_string();
                }
            }
        }
    }

    pub fn search_input_value(&self) -> &str {
        &self.state.search_input_value
    }

    pub fn applied_search_text(&self) -> &str {
        &self.state.applied_search_text
    }

    /// Sets a per-column filter; an empty value clears it.
    pub fn set_column_filter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if value.trim().is_empty() {
            self.state.column_filters.remove(&key);
        } else {
            self.state.column_filters.insert(key, value);
        }
    }

    pub fn clear_column_filter(&mut self, key: &str) {
        self.state.column_filters.remove(key);
    }

    pub fn toggle_row_selection(&mut self, index: usize) {
        if !self.options.selectable || index >= self.data.len() {
            return;
        }
        if !self.state.row_selection.remove(&index) {
            self.state.row_selection.insert(index);
        }
        self.notify_selection();
    }

    pub fn set_all_rows_selected(&mut self, selected: bool) {
        if !self.options.selectable {
            return;
        }
        if selected {
            self.state.row_selection = (0..self.data.len()).collect();
        } else {
            self.state.row_selection.clear();
        }
        self.notify_selection();
    }

    /// Selected records re-derived from the current data.
    pub fn selected_rows(&self) -> Vec<&T> {
        self.state
            .row_selection
            .iter()
            .filter_map(|&index| self.data.get(index))
            .collect()
    }

    fn notify_selection(&mut self) {
        let Some(callback) = self.on_row_selection_change.as_mut() else {
            return;
        };
        let rows: Vec<&T> = self
            .state
            .row_selection
            .iter()
            .filter_map(|&index| self.data.get(index))
            .collect();
        callback(&rows);
    }

    fn row_matches(&self, row: &T, global: &str, filters: &[(&Column<T>, String)]) -> bool {
        let columns_match = filters
            .iter()
            .all(|(column, needle)| column.value(row).matches(needle));
        if !columns_match {
            return false;
        }
        global.is_empty() || self.columns.iter().any(|column| column.value(row).matches(global))
    }

    /// Indices into the data after filtering and sorting.
    pub fn row_model(&self) -> Vec<usize> {
        let global = self.state.applied_search_text.trim().to_lowercase();
        let filters: Vec<(&Column<T>, String)> = self
            .state
            .column_filters
            .iter()
            .filter_map(|(key, value)| {
                self.columns
                    .find(key)
                    .map(|column| (column, value.trim().to_lowercase()))
            })
            .collect();

        let mut rows: Vec<usize> = self
            .data
            .iter()
            .enumerate()
            .filter(|(_, row)| self.row_matches(row, &global, &filters))
            .map(|(index, _)| index)
            .collect();

        let sort = self
            .sorted_column()
            .filter(|_| self.options.sortable)
            .and_then(|sort| self.columns.find(&sort.key).map(|column| (column, sort.direction)));

        if let Some((column, direction)) = sort {
            let mut keyed: Vec<(usize, CellValue)> = rows
                .iter()
                .map(|&index| (index, column.value(&self.data[index])))
                .collect();
            keyed.sort_by(|(_, a), (_, b)| {
                let ordering: Ordering = a.cmp(b);
                match direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
            rows = keyed.into_iter().map(|(index, _)| index).collect();
        }

        rows
    }

    pub fn render(&self) -> RenderedTable {
        let headers = self
            .columns
            .iter()
            .map(|column| HeaderCell {
                key: column.key().to_string(),
                label: column.header().to_string(),
                width: column.width(),
                sortable: self.options.sortable && column.is_sortable(),
                sort: self.sort_indicator(column.key()),
            })
            .collect();

        let body = if self.is_loading {
            TableBody::Loading {
                message: self.options.loading_message.clone(),
            }
        } else {
            let rows: Vec<BodyRow> = self
                .row_model()
                .into_iter()
                .map(|index| {
                    let row = &self.data[index];
                    BodyRow {
                        index,
                        selected: self.state.row_selection.contains(&index),
                        cells: self.columns.iter().map(|column| column.render(row)).collect(),
                    }
                })
                .collect();
            if rows.is_empty() {
                TableBody::Empty {
                    message: self.options.empty_message.clone(),
                }
            } else {
                TableBody::Rows { rows }
            }
        };

        RenderedTable {
            headers,
            body,
            colspan: self.columns.len(),
            searchable: self.options.searchable,
            search_placeholder: self.options.search_placeholder.clone(),
            search_input_value: self.state.search_input_value.clone(),
            applied_search_text: self.state.applied_search_text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Person {
        id: i64,
        name: &'static str,
        team: &'static str,
    }

    fn people() -> Vec<Person> {
        vec![
            Person {
                id: 3,
                name: "Carol",
                team: "Design",
            },
            Person {
                id: 1,
                name: "alice",
                team: "Engineering",
            },
            Person {
                id: 2,
                name: "Bob",
                team: "Engineering",
            },
        ]
    }

    fn columns() -> ColumnSchema<Person> {
        ColumnSchema::new(vec![
            Column::new("id", "ID", |p: &Person| p.id).size(60),
            Column::new("name", "Name", |p: &Person| p.name.to_lowercase())
                .cell(|p: &Person| p.name.to_string()),
            Column::new("team", "Team", |p: &Person| p.team).sortable(false),
        ])
    }

    fn table() -> TableController<Person> {
        TableController::new(columns(), TableOptions::default(), SearchMode::Internal)
            .with_data(people())
    }

    fn names(table: &TableController<Person>) -> Vec<&'static str> {
        table
            .row_model()
            .into_iter()
            .map(|index| table.data()[index].name)
            .collect()
    }

    #[test]
    fn sort_cycles_and_resets_other_columns() {
        let mut table = table();

        table.toggle_sort("name");
        assert_eq!(table.sort_indicator("name"), SortIndicator::Ascending);
        assert_eq!(names(&table), vec!["alice", "Bob", "Carol"]);

        table.toggle_sort("name");
        assert_eq!(table.sort_indicator("name"), SortIndicator::Descending);
        assert_eq!(names(&table), vec!["Carol", "Bob", "alice"]);

        table.toggle_sort("name");
        assert_eq!(table.sort_indicator("name"), SortIndicator::None);
        assert_eq!(table.sorted_column(), None);
        assert_eq!(names(&table), vec!["Carol", "alice", "Bob"]);

        table.toggle_sort("name");
        table.toggle_sort("id");
        assert_eq!(table.sort_indicator("name"), SortIndicator::None);
        assert_eq!(
            table.sorted_column(),
            Some(&ColumnSort::new("id", SortDirection::Ascending))
        );
        assert_eq!(names(&table), vec!["alice", "Bob", "Carol"]);
    }

    #[test]
    fn non_sortable_column_ignores_clicks() {
        let mut table = table();
        table.toggle_sort("id");
        table.toggle_sort("team");
        table.toggle_sort("missing");
        assert_eq!(
            table.sorted_column(),
            Some(&ColumnSort::new("id", SortDirection::Ascending))
        );
        assert_eq!(
            table.sort_after_toggle("team"),
            Some(ColumnSort::new("id", SortDirection::Ascending))
        );
    }

    #[test]
    fn sorting_disabled_table_never_sorts() {
        let options = TableOptions {
            sortable: false,
            ..TableOptions::default()
        };
        let mut table =
            TableController::new(columns(), options, SearchMode::Internal).with_data(people());
        table.toggle_sort("name");
        assert_eq!(table.sorted_column(), None);
        assert!(table.render().headers.iter().all(|header| !header.sortable));
    }

    #[test]
    fn internal_search_applies_only_on_commit() {
        let mut table = table();
        table.set_search_input("engin");
        assert_eq!(table.applied_search_text(), "");
        assert_eq!(table.row_model().len(), 3);

        table.set_search_input("  engin ");
        table.commit_search();
        assert_eq!(table.applied_search_text(), "engin");
        assert_eq!(table.search_input_value(), "  engin ");
        assert_eq!(names(&table), vec!["alice", "Bob"]);
    }

    #[test]
    fn external_search_forwards_commit() {
        let submitted = Rc::new(RefCell::new(Vec::new()));
        let sink = submitted.clone();
        let mut table = TableController::new(
            columns(),
            TableOptions::default(),
            SearchMode::external("", move |q: &str| sink.borrow_mut().push(q.to_string())),
        )
        .with_data(people());

        table.set_search_input(" bob ");
        table.commit_search();

        assert_eq!(*submitted.borrow(), vec!["bob".to_string()]);
        assert_eq!(table.applied_search_text(), "");
        assert_eq!(table.row_model().len(), 3);
    }

    #[test]
    fn external_search_sync_updates_input_and_filter() {
        let mut table = TableController::new(
            columns(),
            TableOptions::default(),
            SearchMode::external("", |_: &str| {}),
        )
        .with_data(people());

        table.sync_external_search("foo");
        assert_eq!(table.search_input_value(), "foo");
        assert_eq!(table.applied_search_text(), "foo");
        assert_eq!(table.render().body.row_count(), 1);

        table.set_search_input("typing");
        table.sync_external_search("foo");
        assert_eq!(table.search_input_value(), "typing");

        table.sync_external_search("carol");
        assert_eq!(table.search_input_value(), "carol");
        assert_eq!(names(&table), vec!["Carol"]);
    }

    #[test]
    fn external_mode_starts_from_supplied_value() {
        let table = TableController::new(
            columns(),
            TableOptions::default(),
            SearchMode::external("bob", |_: &str| {}),
        )
        .with_data(people());
        assert_eq!(table.search_input_value(), "bob");
        assert_eq!(names(&table), vec!["Bob"]);
    }

    #[test]
    fn internal_mode_ignores_external_sync() {
        let mut table = table();
        table.sync_external_search("bob");
        assert_eq!(table.applied_search_text(), "");
    }

    #[test]
    fn column_filters_combine_with_global_search() {
        let mut table = table();
        table.set_column_filter("team", "ENGINEERING");
        assert_eq!(names(&table), vec!["alice", "Bob"]);

        table.set_search_input("bob");
        table.commit_search();
        assert_eq!(names(&table), vec!["Bob"]);

        table.set_column_filter("team", "design");
        assert!(names(&table).is_empty());

        table.set_column_filter("team", " ");
        assert_eq!(names(&table), vec!["Bob"]);
        assert!(table.state().column_filters.is_empty());
    }

    #[test]
    fn selection_reports_records() {
        let selected = Rc::new(RefCell::new(Vec::new()));
        let sink = selected.clone();
        let options = TableOptions {
            selectable: true,
            ..TableOptions::default()
        };
        let mut table = TableController::new(columns(), options, SearchMode::Internal)
            .with_data(people())
            .on_row_selection_change(move |rows: &[&Person]| {
                *sink.borrow_mut() = rows.iter().map(|p| p.id).collect::<Vec<_>>();
            });

        table.toggle_row_selection(2);
        table.toggle_row_selection(0);
        assert_eq!(*selected.borrow(), vec![3, 2]);

        table.toggle_row_selection(2);
        assert_eq!(*selected.borrow(), vec![3]);

        table.toggle_row_selection(99);
        assert_eq!(*selected.borrow(), vec![3]);

        table.set_data(vec![people()[1].clone()]);
        assert_eq!(
            table.selected_rows().into_iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![1]
        );

        table.set_all_rows_selected(false);
        assert!(selected.borrow().is_empty());
    }

    #[test]
    fn selection_disabled_by_default() {
        let mut table = table();
        table.toggle_row_selection(0);
        assert!(table.state().row_selection.is_empty());
    }

    #[test]
    fn empty_data_renders_single_message_row() {
        let options = TableOptions {
            empty_message: "No users.".to_string(),
            ..TableOptions::default()
        };
        let table = TableController::new(columns(), options, SearchMode::Internal);
        let rendered = table.render();
        assert_eq!(
            rendered.body,
            TableBody::Empty {
                message: "No users.".to_string()
            }
        );
        assert_eq!(rendered.body.row_count(), 1);
        assert_eq!(rendered.colspan, 3);
    }

    #[test]
    fn loading_wins_over_data() {
        let mut table = table();
        table.set_loading(true);
        let rendered = table.render();
        assert!(matches!(rendered.body, TableBody::Loading { .. }));
        assert_eq!(rendered.body.row_count(), 1);
    }

    #[test]
    fn render_uses_cell_renderers_and_indicators() {
        let mut table = table();
        table.toggle_sort("id");
        let rendered = table.render();

        assert_eq!(rendered.headers[0].sort, SortIndicator::Ascending);
        assert_eq!(rendered.headers[0].width, Some(60));
        assert!(!rendered.headers[2].sortable);

        let TableBody::Rows { rows } = rendered.body else {
            panic!("expected rows");
        };
        assert_eq!(rows[0].index, 1);
        assert_eq!(rows[0].cells, vec!["1", "alice", "Engineering"]);
    }
}
