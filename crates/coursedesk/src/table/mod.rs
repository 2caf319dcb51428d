//! # Table Engine
//!
//! Every list view of the dashboard (levels, subjects, chapters, exercises)
//! shows the same kind of table: filterable, searchable, sortable, paged,
//! with user-toggleable columns. This module is that table logic, extracted
//! once and shared by all entities.
//!
//! ## Pieces
//!
//! | Module | Role |
//! |--------|------|
//! | [`value`] | `FieldValue`, the runtime value of a record field |
//! | [`field`] | `FieldId` / `Tabular`, typed field access per entity |
//! | [`options`] | `FilterOption`, `ColumnOption`: static view schema |
//! | [`filter`] | predicate evaluation and the three filter layers |
//! | [`sort`] | stable ordering, missing values last |
//! | [`paginate`] | page slicing and `Pagination` |
//! | [`columns`] | column visibility projection |
//! | [`query`] | `FilterParams` and the end-to-end pipeline |
//! | [`export`] | CSV / JSON export of the selected rows |
//!
//! ## Properties
//!
//! All operations are synchronous and pure: they borrow the records, never
//! mutate them, and never fail. Coercion problems (an unparseable date, a
//! non-numeric value) exclude the record; unknown field ids are ignored.
//!
//! ```ignore
//! let result = run_query(&exercises, &params, &active_filters, Exercise::filter_options());
//! for row in result.data { ... }
//! ```

pub mod columns;
pub mod export;
pub mod field;
pub mod filter;
pub mod options;
pub mod paginate;
pub mod query;
pub mod sort;
pub mod value;

pub use columns::{project, ColumnVisibility};
pub use export::{export_rows, ExportFormat};
pub use field::{FieldId, Tabular};
pub use filter::{apply_column_filters, apply_filters, apply_search, ActiveFilter};
pub use options::{
    find_filter_option, ColumnOption, FilterKind, FilterOperator, FilterOption, ACTIONS_COLUMN,
    ACTIONS_COLUMN_ID,
};
pub use paginate::{paginate, PageSlice, Pagination};
pub use query::{run_query, select_rows, FilterParams, QueryResult, DEFAULT_PAGE_SIZE};
pub use sort::{sort_by_id, sort_records, SortDirection};
pub use value::FieldValue;
