//! # List View State
//!
//! A list view (levels, subjects, chapters or exercises) owns the user's
//! table state and the rows of the last completed fetch. The rendering layer
//! forwards input events to the `on_*` handlers and asks for a fetch whenever
//! [`ListView::needs_fetch`] says the query changed.
//!
//! ## Fetch Lifecycle
//!
//! ```text
//! Idle ──begin_fetch──▶ Fetching ──complete(Ok)──▶ Ready
//!                          ▲    └──complete(Err)─▶ Error(message)
//!                          └──────── begin_fetch ◀── (any state)
//! ```
//!
//! Every [`ListView::begin_fetch`] issues a new [`RequestId`]. A response is
//! applied only when its id is the latest one issued; a slower, older
//! response arriving after a newer request is discarded. The last request
//! wins, whatever order the responses come back in.

use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::commands::ListRequest;
use crate::error::Result;
use crate::schema::ListSchema;
use crate::table::{
    ActiveFilter, ColumnOption, ColumnVisibility, FilterParams, Pagination, QueryResult,
    SortDirection, DEFAULT_PAGE_SIZE,
};

/// Sequence number of a fetch issued by a [`ListView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RequestId(u64);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum FetchStatus {
    Idle,
    Fetching,
    Ready,
    Error(String),
}

#[derive(Debug, Clone)]
pub struct ListView<R: ListSchema> {
    parent: Option<Uuid>,
    params: FilterParams,
    filters: Vec<ActiveFilter>,
    columns: ColumnVisibility,
    rows: Vec<R>,
    pagination: Pagination,
    status: FetchStatus,
    issued: u64,
    stale: bool,
}

impl<R: ListSchema> ListView<R> {
    pub fn new(parent: Option<Uuid>) -> Self {
        Self::with_page_size(parent, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(parent: Option<Uuid>, limit: usize) -> Self {
        Self {
            parent,
            params: FilterParams::with_limit(limit),
            filters: Vec::new(),
            columns: ColumnVisibility::new(R::column_options()),
            rows: Vec::new(),
            pagination: Pagination {
                page: 1,
                limit,
                total: 0,
            },
            status: FetchStatus::Idle,
            issued: 0,
            stale: true,
        }
    }

    pub fn parent(&self) -> Option<Uuid> {
        self.parent
    }

    pub fn params(&self) -> &FilterParams {
        &self.params
    }

    pub fn filters(&self) -> &[ActiveFilter] {
        &self.filters
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn column_visibility(&self) -> &ColumnVisibility {
        &self.columns
    }

    /// Columns to render with the current visibility.
    pub fn visible_columns(&self) -> Vec<ColumnOption> {
        self.columns.project()
    }

    /// Whether the query changed since the last fetch was issued.
    pub fn needs_fetch(&self) -> bool {
        self.stale
    }

    /// The request describing the current query.
    pub fn request(&self) -> ListRequest {
        ListRequest {
            parent: self.parent,
            params: self.params.clone(),
            filters: self.filters.clone(),
        }
    }

    // --- Input handlers ---

    pub fn on_page_change(&mut self, page: usize) {
        self.params.page = page.max(1);
        self.stale = true;
    }

    /// A new page size starts again from the first page.
    pub fn on_limit_change(&mut self, limit: usize) {
        self.params.limit = limit;
        self.params.page = 1;
        self.stale = true;
    }

    pub fn on_search_change(&mut self, term: impl Into<String>) {
        self.params.search_term = term.into();
        self.params.page = 1;
        self.stale = true;
    }

    /// Set the quick filter of one column; an empty value clears it.
    pub fn on_column_filter_change(&mut self, column: &str, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.params.column_filters.remove(column);
        } else {
            self.params.column_filters.insert(column.to_string(), value);
        }
        self.params.page = 1;
        self.stale = true;
    }

    pub fn on_filter_change(&mut self, filters: Vec<ActiveFilter>) {
        self.filters = filters;
        self.params.page = 1;
        self.stale = true;
    }

    pub fn on_sort_change(&mut self, field: Option<String>, direction: SortDirection) {
        self.params.sort_by = field;
        self.params.sort_direction = direction;
        self.stale = true;
    }

    /// Replace the visible column set. Rendering only, no refetch.
    pub fn on_column_change<S: AsRef<str>>(&mut self, ids: &[S]) {
        self.columns.set_visible(ids);
    }

    pub fn toggle_column(&mut self, id: &str) -> bool {
        self.columns.toggle(id)
    }

    pub fn select_all_columns(&mut self) {
        self.columns.select_all();
    }

    pub fn select_no_columns(&mut self) {
        self.columns.select_none();
    }

    /// Back to the initial query (page size kept) and every column visible.
    pub fn reset(&mut self) {
        self.params = FilterParams::with_limit(self.params.limit);
        self.filters.clear();
        self.columns.select_all();
        self.stale = true;
    }

    // --- Fetching ---

    /// Enter `Fetching` and issue the id the response must carry.
    pub fn begin_fetch(&mut self) -> RequestId {
        self.issued += 1;
        self.status = FetchStatus::Fetching;
        self.stale = false;
        debug!(kind = %R::KIND, request = self.issued, "fetch started");
        RequestId(self.issued)
    }

    /// Apply a fetch response. Returns `false` when the response is stale and
    /// was discarded.
    pub fn complete(&mut self, id: RequestId, response: Result<QueryResult<R>>) -> bool {
        if id.0 != self.issued {
            debug!(
                kind = %R::KIND,
                request = id.0,
                latest = self.issued,
                "discarded stale response"
            );
            return false;
        }
        match response {
            Ok(result) => {
                self.rows = result.data;
                self.pagination = result.pagination;
                self.status = FetchStatus::Ready;
            }
            Err(e) => {
                warn!(kind = %R::KIND, error = %e, "fetch failed");
                self.status = FetchStatus::Error(e.to_string());
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CourseDeskError;
    use crate::model::{Exercise, Level};

    fn page_of(titles: usize, page: usize, limit: usize, total: usize) -> QueryResult<Level> {
        QueryResult {
            data: (0..titles)
                .map(|i| Level {
                    id: Uuid::new_v4(),
                    name: format!("Level {}", i),
                    code: format!("L{}", i),
                    description: String::new(),
                    order: i as u32,
                    created_at: chrono::NaiveDateTime::default(),
                })
                .collect(),
            pagination: Pagination { page, limit, total },
        }
    }

    #[test]
    fn starts_idle_and_needing_a_fetch() {
        let view: ListView<Level> = ListView::new(None);
        assert_eq!(view.status(), &FetchStatus::Idle);
        assert!(view.needs_fetch());
        assert_eq!(view.params().limit, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn limit_and_search_changes_reset_page() {
        let mut view: ListView<Level> = ListView::new(None);
        view.on_page_change(4);
        assert_eq!(view.params().page, 4);

        view.on_limit_change(20);
        assert_eq!(view.params().page, 1);
        assert_eq!(view.params().limit, 20);

        view.on_page_change(3);
        view.on_search_change("grade");
        assert_eq!(view.params().page, 1);
        assert_eq!(view.params().search_term, "grade");
    }

    #[test]
    fn column_filter_set_and_clear() {
        let mut view: ListView<Level> = ListView::new(None);
        view.on_column_filter_change("name", "gr");
        assert_eq!(view.request().params.column_filters.len(), 1);
        view.on_column_filter_change("name", "");
        assert!(view.request().params.column_filters.is_empty());
    }

    #[test]
    fn last_request_wins() {
        let mut view: ListView<Level> = ListView::new(None);
        let first = view.begin_fetch();
        view.on_search_change("x");
        let second = view.begin_fetch();

        assert!(view.complete(second, Ok(page_of(2, 1, 10, 2))));
        assert!(!view.complete(first, Ok(page_of(7, 1, 10, 7))));

        assert_eq!(view.rows().len(), 2);
        assert_eq!(view.pagination().total, 2);
        assert_eq!(view.status(), &FetchStatus::Ready);
    }

    #[test]
    fn stale_error_does_not_clobber_ready_state() {
        let mut view: ListView<Level> = ListView::new(None);
        let first = view.begin_fetch();
        let second = view.begin_fetch();
        view.complete(second, Ok(page_of(1, 1, 10, 1)));
        let applied = view.complete(first, Err(CourseDeskError::Fetch("timeout".into())));
        assert!(!applied);
        assert_eq!(view.status(), &FetchStatus::Ready);
    }

    #[test]
    fn fetch_error_surfaces_message() {
        let mut view: ListView<Level> = ListView::new(None);
        let id = view.begin_fetch();
        view.complete(id, Err(CourseDeskError::Fetch("backend down".into())));
        assert_eq!(
            view.status(),
            &FetchStatus::Error("Fetch failed: backend down".into())
        );
    }

    #[test]
    fn column_changes_do_not_refetch() {
        let mut view: ListView<Exercise> = ListView::new(None);
        view.begin_fetch();
        view.on_column_change(&["title", "points"]);
        assert!(!view.needs_fetch());

        let ids: Vec<&str> = view.visible_columns().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["title", "points", ""]);

        view.select_no_columns();
        let ids: Vec<&str> = view.visible_columns().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["title", ""]);

        view.select_all_columns();
        assert_eq!(view.visible_columns().len(), Exercise::column_options().len());
    }

    #[test]
    fn reset_clears_query_but_keeps_page_size() {
        let mut view: ListView<Exercise> = ListView::with_page_size(None, 20);
        view.on_search_change("limits");
        view.on_filter_change(vec![ActiveFilter::equals("difficulty", "hard")]);
        view.on_sort_change(Some("points".into()), SortDirection::Desc);
        view.toggle_column("description");
        view.begin_fetch();

        view.reset();
        assert!(view.needs_fetch());
        assert!(view.filters().is_empty());
        assert_eq!(view.params(), &FilterParams::with_limit(20));
        assert!(view.column_visibility().is_visible("description"));
    }
}
