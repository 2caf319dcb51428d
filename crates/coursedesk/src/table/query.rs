//! The full list pipeline.
//!
//! ```text
//! records ─▶ advanced filters ─▶ column quick filters ─▶ search ─▶ sort ─▶ paginate
//! ```
//!
//! Every stage is pure and the whole pipeline is re-run on each state change.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use super::filter::{apply_column_filters, apply_filters, apply_search, ActiveFilter};
use super::options::FilterOption;
use super::paginate::{paginate, Pagination};
use super::sort::{sort_by_id, SortDirection};
use super::Tabular;

/// Default page size when a caller does not pick one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

fn default_page() -> usize {
    1
}

fn default_limit() -> usize {
    DEFAULT_PAGE_SIZE
}

/// User-controlled list parameters.
///
/// Column quick filters are flattened next to the named parameters, so
/// `{"searchTerm": "x", "page": 2, "title": "alg"}` reads a quick filter on
/// the `title` column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
    #[serde(default)]
    pub search_term: String,
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_direction: SortDirection,
    #[serde(flatten, deserialize_with = "scalar_column_filters")]
    pub column_filters: BTreeMap<String, String>,
}

/// Quick-filter values may arrive as numbers or booleans; they are matched as
/// text, so keep their string form. Nulls clear the filter.
fn scalar_column_filters<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use serde_json::Value;

    let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
    let mut filters = BTreeMap::new();
    for (column, value) in raw {
        let text = match value {
            Value::Null => continue,
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Array(_) | Value::Object(_) => {
                return Err(D::Error::custom(format!(
                    "quick filter on '{}' must be a string, number or boolean",
                    column
                )))
            }
        };
        filters.insert(column, text);
    }
    Ok(filters)
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            page: default_page(),
            limit: default_limit(),
            sort_by: None,
            sort_direction: SortDirection::default(),
            column_filters: BTreeMap::new(),
        }
    }
}

impl FilterParams {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            ..Default::default()
        }
    }

    /// Set the sort key unless one is already chosen.
    pub fn or_sort(mut self, field: &str, direction: SortDirection) -> Self {
        if self.sort_by.is_none() {
            self.sort_by = Some(field.to_string());
            self.sort_direction = direction;
        }
        self
    }
}

/// The `{ data, pagination }` shape handed back to list views.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T> QueryResult<T> {
    pub fn empty(page: usize, limit: usize) -> Self {
        Self {
            data: Vec::new(),
            pagination: Pagination {
                page,
                limit,
                total: 0,
            },
        }
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> QueryResult<U> {
        QueryResult {
            data: self.data.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

impl<T: Clone> QueryResult<&T> {
    /// Detach the page from the borrowed record list.
    pub fn cloned(self) -> QueryResult<T> {
        self.map(T::clone)
    }
}

/// Filter, search and sort without paginating: every row a query selects.
pub fn select_rows<'a, R, I>(
    records: I,
    params: &FilterParams,
    active_filters: &[ActiveFilter],
    filter_options: &[FilterOption],
) -> Vec<&'a R>
where
    R: Tabular + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let all: Vec<&R> = records.into_iter().collect();
    let fetched = all.len();

    let filtered = apply_filters(all, active_filters, filter_options);
    let after_filters = filtered.len();

    let quick = apply_column_filters(filtered, &params.column_filters);
    let after_quick = quick.len();

    let searched = apply_search(quick, &params.search_term);
    let after_search = searched.len();

    let sorted = match &params.sort_by {
        Some(field) => sort_by_id(searched, field, params.sort_direction),
        None => searched,
    };

    debug!(
        fetched,
        after_filters, after_quick, after_search, "filtered rows"
    );
    sorted
}

/// Run the whole pipeline and cut out the requested page.
pub fn run_query<'a, R, I>(
    records: I,
    params: &FilterParams,
    active_filters: &[ActiveFilter],
    filter_options: &[FilterOption],
) -> QueryResult<&'a R>
where
    R: Tabular + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let rows = select_rows(records, params, active_filters, filter_options);
    let slice = paginate(rows, params.page, params.limit);
    let pagination = Pagination {
        page: params.page.max(1),
        limit: params.limit,
        total: slice.total,
    };
    debug!(
        page = pagination.page,
        limit = pagination.limit,
        total = pagination.total,
        returned = slice.items.len(),
        "paginated rows"
    );
    QueryResult {
        data: slice.items,
        pagination,
    }
}
