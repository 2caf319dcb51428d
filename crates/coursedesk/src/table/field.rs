//! Typed field access.
//!
//! Each entity declares a closed enum of its fields ([`FieldId`]) and binds
//! every variant to an accessor through [`Tabular::field`]. String ids only
//! appear at the boundary (filter options, column ids, query params) and are
//! resolved to variants once, with [`FieldId::from_id`].

use super::FieldValue;
use std::fmt::Debug;

/// A closed set of field identifiers for one record type.
pub trait FieldId: Copy + Eq + Debug + 'static {
    /// Every field, in declaration order.
    fn all() -> &'static [Self];

    /// The wire id (matches filter option and column ids).
    fn id(self) -> &'static str;

    /// Resolve a wire id. Returns `None` for ids the record type does not have.
    fn from_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|field| field.id() == id)
    }
}

/// Capability interface the engine needs from a record: read a field by id.
pub trait Tabular {
    type Field: FieldId;

    /// Read one field.
    fn field(&self, field: Self::Field) -> FieldValue;

    /// Fields matched by the global free-text search.
    fn search_fields() -> &'static [Self::Field];

    /// Read a field by wire id, `None` when the id is unknown.
    fn field_by_id(&self, id: &str) -> Option<FieldValue> {
        Self::Field::from_id(id).map(|field| self.field(field))
    }
}
