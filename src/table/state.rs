use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub const fn as_param(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_param())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sort direction: {0}")]
pub struct ParseSortDirectionError(String);

impl FromStr for SortDirection {
    type Err = ParseSortDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            other => Err(ParseSortDirectionError(other.to_string())),
        }
    }
}

/// Header indicator for a single column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortIndicator {
    Ascending,
    Descending,
    #[default]
    None,
}

impl From<Option<SortDirection>> for SortIndicator {
    fn from(direction: Option<SortDirection>) -> Self {
        match direction {
            Some(SortDirection::Ascending) => SortIndicator::Ascending,
            Some(SortDirection::Descending) => SortIndicator::Descending,
            None => SortIndicator::None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ColumnSort {
    pub key: String,
    pub direction: SortDirection,
}

impl ColumnSort {
    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: key.into(),
            direction,
        }
    }
}

/// Next step of the `none -> ascending -> descending -> none` cycle.
pub(crate) fn next_direction(current: Option<SortDirection>) -> Option<SortDirection> {
    match current {
        None => Some(SortDirection::Ascending),
        Some(SortDirection::Ascending) => Some(SortDirection::Descending),
        Some(SortDirection::Descending) => None,
    }
}

/// Interactive state owned by one table instance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableState {
    /// At most one entry: sorting is single-column.
    pub sorting: Vec<ColumnSort>,
    pub column_filters: BTreeMap<String, String>,
    pub search_input_value: String,
    pub applied_search_text: String,
    pub row_selection: BTreeSet<usize>,
}

impl TableState {
    pub fn with_search(value: &str) -> Self {
        Self {
            search_input_value: value.to_string(),
            applied_search_text: value.to_string(),
            ..Self::default()
        }
    }

    pub fn direction_of(&self, key: &str) -> Option<SortDirection> {
        self.sorting
            .iter()
            .find(|sort| sort.key == key)
            .map(|sort| sort.direction)
    }
}

type SearchSubmit = Box<dyn FnMut(&str)>;

/// How the global search box is driven, fixed for the lifetime of a table.
pub enum SearchMode {
    /// The table buffers typing and applies the filter on commit.
    Internal,
    /// The caller owns the search value (usually the URL). Commits are
    /// forwarded to `on_submit`; the applied value only changes through
    /// [`crate::table::TableController::sync_external_search`].
    External {
        value: String,
        on_submit: SearchSubmit,
    },
}

impl SearchMode {
    pub fn external(value: impl Into<String>, on_submit: impl FnMut(&str) + 'static) -> Self {
        SearchMode::External {
            value: value.into(),
            on_submit: Box::new(on_submit),
        }
    }
}

impl std::fmt::Debug for SearchMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchMode::Internal => f.write_str("Internal"),
            SearchMode::External { value, .. } => {
                f.debug_struct("External").field("value", value).finish()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_cycle() {
        let first = next_direction(None);
        let second = next_direction(first);
        let third = next_direction(second);
        assert_eq!(first, Some(SortDirection::Ascending));
        assert_eq!(second, Some(SortDirection::Descending));
        assert_eq!(third, None);
    }

    #[test]
    fn parses_direction_params() {
        assert_eq!("asc".parse(), Ok(SortDirection::Ascending));
        assert_eq!(" DESC ".parse(), Ok(SortDirection::Descending));
        assert!("sideways".parse::<SortDirection>().is_err());
    }
}
