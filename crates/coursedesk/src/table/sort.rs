//! Record ordering.
//!
//! Records with a missing sort value always go last, whatever the direction.
//! The sort is stable, so equal keys keep their relative order.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use super::{FieldId, FieldValue, Tabular};
use crate::error::CourseDeskError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("asc"),
            SortDirection::Desc => f.write_str("desc"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = CourseDeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" | "oldest" => Ok(SortDirection::Asc),
            "desc" | "descending" | "latest" | "newest" => Ok(SortDirection::Desc),
            other => Err(CourseDeskError::Validation(format!(
                "Unknown sort direction '{}'",
                other
            ))),
        }
    }
}

/// Compare two field values for sorting, sending `Missing` to the end.
pub fn compare_values(a: &FieldValue, b: &FieldValue, direction: SortDirection) -> Ordering {
    match (a.is_missing(), b.is_missing()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ord = a.compare(b);
            match direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        }
    }
}

/// Sort records by `field`, returning a new ordering of the same references.
pub fn sort_records<'a, R: Tabular>(
    mut records: Vec<&'a R>,
    field: R::Field,
    direction: SortDirection,
) -> Vec<&'a R> {
    records.sort_by(|a, b| compare_values(&a.field(field), &b.field(field), direction));
    records
}

/// Sort by wire id. An unknown id leaves the order untouched.
pub fn sort_by_id<'a, R: Tabular>(
    records: Vec<&'a R>,
    field_id: &str,
    direction: SortDirection,
) -> Vec<&'a R> {
    match R::Field::from_id(field_id) {
        Some(field) => sort_records(records, field, direction),
        None => {
            warn!(field = %field_id, "ignoring sort on unknown field");
            records
        }
    }
}
