//! Caller-supplied column schema.

use std::fmt::{Display, Formatter};

use serde::Serialize;

/// Value a column exposes for sorting and filtering.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Number(i64),
    Text(String),
}

impl CellValue {
    /// Case-insensitive substring test used by column and global filters.
    pub fn matches(&self, needle_lowercase: &str) -> bool {
        match self {
            CellValue::Empty => needle_lowercase.is_empty(),
            CellValue::Number(n) => n.to_string().contains(needle_lowercase),
            CellValue::Text(text) => text.to_lowercase().contains(needle_lowercase),
        }
    }
}

impl Display for CellValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Number(i64::from(value))
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        CellValue::Number(i64::from(value))
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl<V: Into<CellValue>> From<Option<V>> for CellValue {
    fn from(value: Option<V>) -> Self {
        value.map_or(CellValue::Empty, Into::into)
    }
}

type Accessor<T> = Box<dyn Fn(&T) -> CellValue + Send + Sync>;
type CellRenderer<T> = Box<dyn Fn(&T) -> String + Send + Sync>;

pub struct Column<T> {
    key: String,
    header: String,
    width: Option<u32>,
    sortable: bool,
    accessor: Accessor<T>,
    renderer: Option<CellRenderer<T>>,
}

impl<T> Column<T> {
    /// Creates a sortable column reading its value through `accessor`.
    pub fn new<F, V>(key: impl Into<String>, header: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> V + Send + Sync + 'static,
        V: Into<CellValue>,
    {
        Self {
            key: key.into(),
            header: header.into(),
            width: None,
            sortable: true,
            accessor: Box::new(move |row| accessor(row).into()),
            renderer: None,
        }
    }

    /// Fixed column width in pixels.
    pub fn size(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Overrides how the cell is displayed; sorting and filtering still use
    /// the accessor value.
    pub fn cell<F>(mut self, renderer: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.renderer = Some(Box::new(renderer));
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn width(&self) -> Option<u32> {
        self.width
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    pub fn value(&self, row: &T) -> CellValue {
        (self.accessor)(row)
    }

    pub fn render(&self, row: &T) -> String {
        match &self.renderer {
            Some(renderer) => renderer(row),
            None => self.value(row).to_string(),
        }
    }
}

impl<T> std::fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("width", &self.width)
            .field("sortable", &self.sortable)
            .finish_non_exhaustive()
    }
}

/// Ordered, immutable list of columns.
#[derive(Debug)]
pub struct ColumnSchema<T> {
    columns: Vec<Column<T>>,
}

impl<T> ColumnSchema<T> {
    pub fn new(columns: Vec<Column<T>>) -> Self {
        Self { columns }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Column<T>> {
        self.columns.iter()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn find(&self, key: &str) -> Option<&Column<T>> {
        self.columns.iter().find(|column| column.key == key)
    }
}

impl<T> FromIterator<Column<T>> for ColumnSchema<T> {
    fn from_iter<I: IntoIterator<Item = Column<T>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
