//! Filter and column metadata.
//!
//! This module defines the static configuration of a list view: which fields
//! can be filtered (and how), and which columns can be displayed (and whether
//! they may be hidden). It is schema, not user data.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CourseDeskError;

/// How a filterable field's values are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    /// Case-insensitive string matching.
    Text,
    /// Exact match against an enumerated set of values.
    Select,
    /// Calendar/timestamp comparison.
    Date,
    /// Arithmetic comparison.
    Number,
}

impl FilterKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FilterKind::Text => "text",
            FilterKind::Select => "select",
            FilterKind::Date => "date",
            FilterKind::Number => "number",
        }
    }

    /// The operators a field of this kind accepts.
    pub const fn operators(self) -> &'static [FilterOperator] {
        match self {
            FilterKind::Text => &[
                FilterOperator::Contains,
                FilterOperator::Equals,
                FilterOperator::StartsWith,
                FilterOperator::EndsWith,
            ],
            FilterKind::Select => &[FilterOperator::Equals],
            FilterKind::Date => &[
                FilterOperator::Equals,
                FilterOperator::Before,
                FilterOperator::After,
            ],
            FilterKind::Number => &[
                FilterOperator::Equals,
                FilterOperator::GreaterThan,
                FilterOperator::LessThan,
            ],
        }
    }
}

/// Comparison operator of an [`ActiveFilter`](super::ActiveFilter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    Contains,
    Equals,
    StartsWith,
    EndsWith,
    Before,
    After,
    GreaterThan,
    LessThan,
}

impl FilterOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            FilterOperator::Contains => "contains",
            FilterOperator::Equals => "equals",
            FilterOperator::StartsWith => "startsWith",
            FilterOperator::EndsWith => "endsWith",
            FilterOperator::Before => "before",
            FilterOperator::After => "after",
            FilterOperator::GreaterThan => "greaterThan",
            FilterOperator::LessThan => "lessThan",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterOperator {
    type Err = CourseDeskError;

    /// Accepts the camelCase wire names plus a few shell-friendly aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "contains" | "like" => Ok(FilterOperator::Contains),
            "equals" | "eq" | "is" => Ok(FilterOperator::Equals),
            "startswith" | "prefix" => Ok(FilterOperator::StartsWith),
            "endswith" | "suffix" => Ok(FilterOperator::EndsWith),
            "before" => Ok(FilterOperator::Before),
            "after" => Ok(FilterOperator::After),
            "greaterthan" | "gt" => Ok(FilterOperator::GreaterThan),
            "lessthan" | "lt" => Ok(FilterOperator::LessThan),
            _ => Err(CourseDeskError::Validation(format!(
                "Unknown filter operator '{}'",
                s
            ))),
        }
    }
}

/// Describes one filterable field of a list view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOption {
    /// The field id, matching a column/field id of the entity.
    pub id: &'static str,
    /// Display label.
    pub label: &'static str,
    pub kind: FilterKind,
    /// Operators offered for this field.
    pub operators: &'static [FilterOperator],
    /// Allowed values, only meaningful for [`FilterKind::Select`].
    pub options: &'static [&'static str],
}

impl FilterOption {
    const fn new(id: &'static str, label: &'static str, kind: FilterKind) -> Self {
        Self {
            id,
            label,
            kind,
            operators: kind.operators(),
            options: &[],
        }
    }

    pub const fn text(id: &'static str, label: &'static str) -> Self {
        Self::new(id, label, FilterKind::Text)
    }

    pub const fn select(
        id: &'static str,
        label: &'static str,
        options: &'static [&'static str],
    ) -> Self {
        let mut option = Self::new(id, label, FilterKind::Select);
        option.options = options;
        option
    }

    pub const fn date(id: &'static str, label: &'static str) -> Self {
        Self::new(id, label, FilterKind::Date)
    }

    pub const fn number(id: &'static str, label: &'static str) -> Self {
        Self::new(id, label, FilterKind::Number)
    }

    /// Whether `op` is one of the operators declared for this field.
    pub fn allows(&self, op: FilterOperator) -> bool {
        self.operators.contains(&op)
    }
}

/// Look up a filter option by field id.
pub fn find_filter_option<'a>(options: &'a [FilterOption], id: &str) -> Option<&'a FilterOption> {
    options.iter().find(|opt| opt.id == id)
}

/// Describes one displayable column of a list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnOption {
    pub id: &'static str,
    pub label: &'static str,
    /// Required columns can never be hidden.
    pub required: bool,
}

/// Id of the trailing row-actions column.
pub const ACTIONS_COLUMN_ID: &str = "";

/// The row-actions column: always rendered, never toggled, never exported.
pub const ACTIONS_COLUMN: ColumnOption = ColumnOption {
    id: ACTIONS_COLUMN_ID,
    label: "Actions",
    required: false,
};

impl ColumnOption {
    pub const fn new(id: &'static str, label: &'static str) -> Self {
        Self {
            id,
            label,
            required: false,
        }
    }

    /// Mark the column as required.
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn is_actions(&self) -> bool {
        self.id == ACTIONS_COLUMN_ID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPTIONS: &[FilterOption] = &[
        FilterOption::text("title", "Title"),
        FilterOption::select("difficulty", "Difficulty", &["easy", "medium", "hard"]),
        FilterOption::date("publish_date", "Publish date"),
        FilterOption::number("points", "Points"),
    ];

    #[test]
    fn kinds_declare_their_operators() {
        let title = find_filter_option(OPTIONS, "title").unwrap();
        assert!(title.allows(FilterOperator::StartsWith));
        assert!(!title.allows(FilterOperator::GreaterThan));

        let points = find_filter_option(OPTIONS, "points").unwrap();
        assert!(points.allows(FilterOperator::GreaterThan));
        assert!(!points.allows(FilterOperator::Contains));
    }

    #[test]
    fn select_options_keep_their_values() {
        let difficulty = find_filter_option(OPTIONS, "difficulty").unwrap();
        assert_eq!(difficulty.kind, FilterKind::Select);
        assert_eq!(difficulty.options, &["easy", "medium", "hard"]);
        assert_eq!(difficulty.operators, &[FilterOperator::Equals]);
    }

    #[test]
    fn unknown_option_is_none() {
        assert!(find_filter_option(OPTIONS, "nope").is_none());
    }

    #[test]
    fn operators_parse_wire_names_and_aliases() {
        assert_eq!(
            "startsWith".parse::<FilterOperator>().unwrap(),
            FilterOperator::StartsWith
        );
        assert_eq!(
            "starts_with".parse::<FilterOperator>().unwrap(),
            FilterOperator::StartsWith
        );
        assert_eq!(
            "gt".parse::<FilterOperator>().unwrap(),
            FilterOperator::GreaterThan
        );
        assert_eq!(
            "lt".parse::<FilterOperator>().unwrap(),
            FilterOperator::LessThan
        );
        assert_eq!(
            "before".parse::<FilterOperator>().unwrap(),
            FilterOperator::Before
        );
        assert!("between".parse::<FilterOperator>().is_err());
    }

    #[test]
    fn operator_serializes_camel_case() {
        let json = serde_json::to_string(&FilterOperator::GreaterThan).unwrap();
        assert_eq!(json, "\"greaterThan\"");
    }

    #[test]
    fn actions_column_is_recognised() {
        assert!(ACTIONS_COLUMN.is_actions());
        assert!(!ColumnOption::new("name", "Name").required().is_actions());
    }
}
