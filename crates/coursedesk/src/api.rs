//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for
//! clients. It dispatches to `commands::*`, answers metadata questions (which
//! filters and columns a list offers) and resolves hierarchy paths for the
//! navigator.
//!
//! The API does no business logic of its own and no I/O.
//!
//! ## Generic Over DataStore
//!
//! `CourseDeskApi<S: DataStore>` works with any backend; the shipped one is
//! `InMemoryStore`, loaded from the demo catalog or a JSON snapshot.
//!
//! ## Fetching for a List View
//!
//! [`CourseDeskApi::refresh`] drives one [`ListView`] fetch: it issues a
//! request id, runs the list command and hands the outcome back to the view,
//! which drops it if a newer request was issued meanwhile.

use uuid::Uuid;

use crate::commands::{self, CmdResult, ListRequest};
use crate::error::{CourseDeskError, Result};
use crate::list_view::ListView;
use crate::model::{Chapter, Draft, Entity, EntityKind, Exercise, Level, Subject};
use crate::navigation::Navigator;
use crate::schema;
use crate::store::{DataStore, Record};
use crate::table::{ColumnOption, ExportFormat, FilterOption, QueryResult};

/// The main API facade for coursedesk operations.
pub struct CourseDeskApi<S: DataStore> {
    store: S,
}

impl<S: DataStore> CourseDeskApi<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn list<R: Record>(&self, request: &ListRequest) -> Result<CmdResult<R>> {
        commands::list::run(&self.store, request)
    }

    pub fn view<R: Record>(&self, id: Uuid) -> Result<CmdResult<R>> {
        commands::view::run(&self.store, id)
    }

    pub fn create<D>(&mut self, draft: D) -> Result<CmdResult<D::Target>>
    where
        D: Draft,
        D::Target: Record,
    {
        commands::create::run(&mut self.store, draft)
    }

    pub fn update<D>(&mut self, id: Uuid, draft: D) -> Result<CmdResult<D::Target>>
    where
        D: Draft,
        D::Target: Record,
    {
        commands::update::run(&mut self.store, id, draft)
    }

    pub fn delete<R: Record>(&mut self, id: Uuid) -> Result<CmdResult<R>> {
        commands::delete::run(&mut self.store, id)
    }

    pub fn export<R: Record, C: AsRef<str>>(
        &self,
        request: &ListRequest,
        visible_columns: &[C],
        format: ExportFormat,
    ) -> Result<CmdResult<R>> {
        commands::export::run(&self.store, request, visible_columns, format)
    }

    /// The `{ data, pagination }` page for a request.
    pub fn fetch<R: Record>(&self, request: &ListRequest) -> Result<QueryResult<R>> {
        let result = self.list::<R>(request)?;
        let pagination = result
            .pagination
            .ok_or_else(|| CourseDeskError::Fetch("list returned no pagination".into()))?;
        Ok(QueryResult {
            data: result.listed,
            pagination,
        })
    }

    /// Run the fetch a list view asks for. Returns whether the response was
    /// applied.
    pub fn refresh<R: Record>(&self, view: &mut ListView<R>) -> bool {
        let id = view.begin_fetch();
        let response = self.fetch::<R>(&view.request());
        view.complete(id, response)
    }

    pub fn filter_options(&self, kind: EntityKind) -> &'static [FilterOption] {
        schema::filter_options(kind)
    }

    pub fn column_options(&self, kind: EntityKind) -> &'static [ColumnOption] {
        schema::column_options(kind)
    }

    /// Label of any record, looked up by kind.
    pub fn label_of(&self, kind: EntityKind, id: Uuid) -> Result<String> {
        fn label<S: DataStore, R: Record>(store: &S, id: Uuid) -> Result<String> {
            Ok(store.get::<R>(id)?.label().to_string())
        }
        match kind {
            EntityKind::Level => label::<S, Level>(&self.store, id),
            EntityKind::Subject => label::<S, Subject>(&self.store, id),
            EntityKind::Chapter => label::<S, Chapter>(&self.store, id),
            EntityKind::Exercise => label::<S, Exercise>(&self.store, id),
        }
    }

    /// Build the navigator for a drill-down path of ids: a level, then one of
    /// its subjects, then one of that subject's chapters.
    pub fn navigate(&self, path: &[Uuid]) -> Result<Navigator> {
        let mut nav = Navigator::new();
        for id in path {
            let kind = nav.list_kind();
            let record_parent = self.parent_of(kind, *id)?;
            if record_parent != nav.parent() {
                return Err(CourseDeskError::Validation(format!(
                    "{} {} is not under '{}'",
                    kind,
                    id,
                    nav.trail().last().map(|c| c.label.as_str()).unwrap_or("")
                )));
            }
            let label = self.label_of(kind, *id)?;
            nav.open(kind, *id, label)?;
        }
        Ok(nav)
    }

    fn parent_of(&self, kind: EntityKind, id: Uuid) -> Result<Option<Uuid>> {
        Ok(match kind {
            EntityKind::Level => None,
            EntityKind::Subject => Some(self.store.get::<Subject>(id)?.level_id),
            EntityKind::Chapter => Some(self.store.get::<Chapter>(id)?.subject_id),
            EntityKind::Exercise => Some(self.store.get::<Exercise>(id)?.chapter_id),
        })
    }
}
