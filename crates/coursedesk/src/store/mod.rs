//! # Storage Layer
//!
//! The list views fetch their records from a data source; this module
//! defines that collaborator. The [`DataStore`] trait lets commands work
//! against any backend, while [`memory::InMemoryStore`] is the one shipped:
//! the dashboard's data is a mock held in memory.
//!
//! ## Implementations
//!
//! - [`memory::InMemoryStore`]: a [`Catalog`] held in memory.
//!   - Seeded from [`seed::demo_catalog`] or a JSON snapshot file
//!   - Enforces parent existence on save, cascades on delete
//!   - Nothing is written back to disk
//!
//! ## Generic Records
//!
//! Operations are generic over [`Record`], implemented by the four entity
//! types. `store.list::<Chapter>(Some(subject_id))` reads the chapters of a
//! subject; `store.list::<Level>(None)` reads every level.

use crate::error::Result;
use crate::model::EntityKind;
use uuid::Uuid;

pub mod catalog;
pub mod memory;
pub mod seed;

pub use catalog::{Catalog, Record};

/// Abstract interface for the content data source.
pub trait DataStore {
    /// List records of type `R`, restricted to the children of `parent` when given.
    fn list<R: Record>(&self, parent: Option<Uuid>) -> Result<Vec<R>>;

    /// Get one record by id.
    fn get<R: Record>(&self, id: Uuid) -> Result<R>;

    /// Insert or replace a record. Fails when its parent does not exist.
    fn save<R: Record>(&mut self, record: R) -> Result<()>;

    /// Delete a record and all its descendants. Returns the number of
    /// records removed (including the record itself).
    fn delete(&mut self, kind: EntityKind, id: Uuid) -> Result<usize>;

    /// Whether a record exists.
    fn exists(&self, kind: EntityKind, id: Uuid) -> bool;

    /// Number of direct children of a record.
    fn child_count(&self, kind: EntityKind, id: Uuid) -> Result<usize>;
}
