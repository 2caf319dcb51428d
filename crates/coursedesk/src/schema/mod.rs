//! # List Schemas
//!
//! Binds each entity to the table engine: a closed field enum with typed
//! accessors, the filter options and columns of its list view, and its
//! default ordering.
//!
//! Adding a filterable field means adding a variant to the entity's field
//! enum, an arm to its accessor, and an entry to its `FILTERS` table.

use crate::model::{Entity, EntityKind};
use crate::table::{ColumnOption, FilterOption, SortDirection, Tabular};

mod chapter;
mod exercise;
mod level;
mod subject;

pub use chapter::ChapterField;
pub use exercise::ExerciseField;
pub use level::LevelField;
pub use subject::SubjectField;

/// Static list-view configuration of an entity.
pub trait ListSchema: Tabular + Entity + Clone {
    fn filter_options() -> &'static [FilterOption];

    fn column_options() -> &'static [ColumnOption];

    /// Field id and direction used when the user has not picked a sort.
    fn default_sort() -> (&'static str, SortDirection);
}

/// Filter options of the list view for `kind`.
pub fn filter_options(kind: EntityKind) -> &'static [FilterOption] {
    match kind {
        EntityKind::Level => level::FILTERS,
        EntityKind::Subject => subject::FILTERS,
        EntityKind::Chapter => chapter::FILTERS,
        EntityKind::Exercise => exercise::FILTERS,
    }
}

/// Columns of the list view for `kind`.
pub fn column_options(kind: EntityKind) -> &'static [ColumnOption] {
    match kind {
        EntityKind::Level => level::COLUMNS,
        EntityKind::Subject => subject::COLUMNS,
        EntityKind::Chapter => chapter::COLUMNS,
        EntityKind::Exercise => exercise::COLUMNS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Chapter, Exercise, Level, Subject};
    use crate::table::FieldId;

    fn assert_consistent<R: ListSchema>() {
        for option in R::filter_options() {
            assert!(
                R::Field::from_id(option.id).is_some(),
                "{} filter '{}' has no field",
                R::KIND,
                option.id
            );
        }
        for column in R::column_options() {
            assert!(
                column.is_actions() || R::Field::from_id(column.id).is_some(),
                "{} column '{}' has no field",
                R::KIND,
                column.id
            );
        }
        assert!(R::column_options().iter().any(|c| c.required));
        assert!(R::column_options().last().unwrap().is_actions());
        assert!(R::Field::from_id(R::default_sort().0).is_some());
    }

    #[test]
    fn every_schema_references_real_fields() {
        assert_consistent::<Level>();
        assert_consistent::<Subject>();
        assert_consistent::<Chapter>();
        assert_consistent::<Exercise>();
    }

    #[test]
    fn kind_lookup_matches_trait() {
        assert_eq!(filter_options(EntityKind::Level), Level::filter_options());
        assert_eq!(column_options(EntityKind::Exercise), Exercise::column_options());
    }
}
