//! Record filtering.
//!
//! Three independent layers narrow a list of records, all combined with AND:
//!
//! 1. **Advanced filters** ([`ActiveFilter`]): typed `field / operator / value`
//!    conditions interpreted through the field's [`FilterOption`].
//! 2. **Column quick filters**: a map of column id to text, always a
//!    case-insensitive substring test on the stringified value.
//! 3. **Global search**: case-insensitive substring test against the record's
//!    search fields (title/name and description).
//!
//! None of these ever fail. Unknown fields are ignored, and values that cannot
//! be coerced exclude the record instead of raising an error.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::options::{find_filter_option, FilterKind, FilterOperator, FilterOption};
use super::value::{parse_date_time, parse_number};
use super::{FieldId, FieldValue, Tabular};

/// A user-applied filter condition.
///
/// The value is kept as text and interpreted according to the field's
/// declared [`FilterKind`] at evaluation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveFilter {
    /// The field id (matches a [`FilterOption::id`]).
    pub field: String,
    pub operator: FilterOperator,
    pub value: String,
}

impl ActiveFilter {
    pub fn new(field: impl Into<String>, operator: FilterOperator, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    /// Convenience: create a contains filter.
    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, FilterOperator::Contains, value)
    }

    /// Convenience: create an equality filter.
    pub fn equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, FilterOperator::Equals, value)
    }

    /// Whether the filter is a no-op (empty value).
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Check whether `record` satisfies this filter.
    ///
    /// The filter's [`FilterOption`] is looked up by field id in `options`;
    /// when there is none, the filter is ignored and every record matches.
    pub fn matches<R: Tabular>(&self, record: &R, options: &[FilterOption]) -> bool {
        match find_filter_option(options, &self.field) {
            Some(option) => self.matches_option(record, option),
            None => true,
        }
    }

    /// Check `record` against this filter, interpreted through `option`.
    pub fn matches_option<R: Tabular>(&self, record: &R, option: &FilterOption) -> bool {
        if self.is_empty() {
            return true;
        }
        let value = record.field_by_id(option.id).unwrap_or(FieldValue::Missing);
        self.matches_value(&value, option.kind)
    }

    /// Evaluate this filter against an already extracted field value.
    pub fn matches_value(&self, value: &FieldValue, kind: FilterKind) -> bool {
        if self.is_empty() {
            return true;
        }
        match kind {
            FilterKind::Text => self.matches_text(value),
            FilterKind::Select => value.to_display_string() == self.value,
            FilterKind::Date => self.matches_date(value),
            FilterKind::Number => self.matches_number(value),
        }
    }

    fn matches_text(&self, value: &FieldValue) -> bool {
        let haystack = value.to_display_string().to_lowercase();
        let needle = self.value.to_lowercase();
        match self.operator {
            FilterOperator::Contains => haystack.contains(&needle),
            FilterOperator::Equals => haystack == needle,
            FilterOperator::StartsWith => haystack.starts_with(&needle),
            FilterOperator::EndsWith => haystack.ends_with(&needle),
            _ => true,
        }
    }

    /// A date-only filter value compares calendar days; a value with a time of
    /// day compares full timestamps for `before` / `after`.
    fn matches_date(&self, value: &FieldValue) -> bool {
        if !matches!(
            self.operator,
            FilterOperator::Equals | FilterOperator::Before | FilterOperator::After
        ) {
            return true;
        }
        let Some(field_date) = value.as_date_time() else {
            return false;
        };
        let Some((filter_date, has_time)) = parse_date_time(&self.value) else {
            return false;
        };

        match (self.operator, has_time) {
            (FilterOperator::Equals, _) => field_date.date() == filter_date.date(),
            (FilterOperator::Before, true) => field_date < filter_date,
            (FilterOperator::Before, false) => field_date.date() < filter_date.date(),
            (FilterOperator::After, true) => field_date > filter_date,
            (FilterOperator::After, false) => field_date.date() > filter_date.date(),
            _ => true,
        }
    }

    fn matches_number(&self, value: &FieldValue) -> bool {
        if !matches!(
            self.operator,
            FilterOperator::Equals | FilterOperator::GreaterThan | FilterOperator::LessThan
        ) {
            return true;
        }
        let (Some(field_num), Some(filter_num)) = (value.as_number(), parse_number(&self.value))
        else {
            return false;
        };

        match self.operator {
            FilterOperator::Equals => field_num == filter_num,
            FilterOperator::GreaterThan => field_num > filter_num,
            FilterOperator::LessThan => field_num < filter_num,
            _ => true,
        }
    }
}

/// Keep the records matching **all** active filters.
///
/// Filters whose field has no [`FilterOption`] are dropped up front (with a
/// warning), so they match everything. The input is never modified.
pub fn apply_filters<'a, R, I>(
    records: I,
    filters: &[ActiveFilter],
    options: &[FilterOption],
) -> Vec<&'a R>
where
    R: Tabular + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let resolved: Vec<(&ActiveFilter, &FilterOption)> = filters
        .iter()
        .filter(|f| !f.is_empty())
        .filter_map(|f| match find_filter_option(options, &f.field) {
            Some(option) => Some((f, option)),
            None => {
                warn!(field = %f.field, "ignoring filter on unknown field");
                None
            }
        })
        .collect();

    records
        .into_iter()
        .filter(|record| {
            resolved
                .iter()
                .all(|(filter, option)| filter.matches_option(*record, option))
        })
        .collect()
}

/// Keep the records whose columns contain the given quick-filter text.
///
/// Matching is a case-insensitive substring test on the stringified field,
/// regardless of the field's type. Text is trimmed like the search term, and
/// blank entries and unknown column ids are ignored.
pub fn apply_column_filters<'a, R, I>(records: I, column_filters: &BTreeMap<String, String>) -> Vec<&'a R>
where
    R: Tabular + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let resolved: Vec<(R::Field, String)> = column_filters
        .iter()
        .map(|(column, text)| (column, text.trim()))
        .filter(|(_, text)| !text.is_empty())
        .filter_map(|(column, text)| match R::Field::from_id(column) {
            Some(field) => Some((field, text.to_lowercase())),
            None => {
                warn!(column = %column, "ignoring quick filter on unknown column");
                None
            }
        })
        .collect();

    records
        .into_iter()
        .filter(|record| {
            resolved.iter().all(|(field, needle)| {
                record
                    .field(*field)
                    .to_display_string()
                    .to_lowercase()
                    .contains(needle.as_str())
            })
        })
        .collect()
}

/// Keep the records where any search field contains `term` (case-insensitive).
/// A blank term keeps everything.
pub fn apply_search<'a, R, I>(records: I, term: &str) -> Vec<&'a R>
where
    R: Tabular + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return records.into_iter().collect();
    }

    let matched: Vec<&R> = records
        .into_iter()
        .filter(|record| {
            R::search_fields().iter().any(|field| {
                record
                    .field(*field)
                    .to_display_string()
                    .to_lowercase()
                    .contains(&needle)
            })
        })
        .collect();
    debug!(term = %needle, matched = matched.len(), "applied search");
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::field::fixtures::Row;

    const OPTIONS: &[FilterOption] = &[
        FilterOption::text("title", "Title"),
        FilterOption::text("desc", "Description"),
        FilterOption::select("category", "Category", &["Algebra", "Geometry"]),
        FilterOption::date("publishDate", "Publish date"),
        FilterOption::number("score", "Score"),
    ];

    fn rows() -> Vec<Row> {
        vec![
            Row::new("Math", "algebra")
                .category("Algebra")
                .published("2025-04-23T14:32:45")
                .score(12.0),
            Row::new("French", "grammar")
                .category("Geometry")
                .published("2025-05-01T08:00:00")
                .score(7.5),
            Row::new("History", "dates and MAPS"),
        ]
    }

    fn titles(rows: &[&Row]) -> Vec<String> {
        rows.iter().map(|r| r.title.clone()).collect()
    }

    #[test]
    fn text_contains_is_case_insensitive() {
        let data = rows();
        let result = apply_filters(&data, &[ActiveFilter::contains("title", "ma")], OPTIONS);
        assert_eq!(titles(&result), vec!["Math"]);
    }

    #[test]
    fn text_operators() {
        let data = rows();
        let row = &data[0];
        let check = |op, value: &str| ActiveFilter::new("title", op, value).matches(row, OPTIONS);

        assert!(check(FilterOperator::Equals, "MATH"));
        assert!(!check(FilterOperator::Equals, "Mat"));
        assert!(check(FilterOperator::StartsWith, "ma"));
        assert!(!check(FilterOperator::StartsWith, "th"));
        assert!(check(FilterOperator::EndsWith, "TH"));
        assert!(!check(FilterOperator::EndsWith, "ma"));
    }

    #[test]
    fn missing_text_field_is_empty_string() {
        let row = Row::default();
        let filter = ActiveFilter::equals("desc", "");
        assert!(filter.matches(&row, OPTIONS));
        assert!(!ActiveFilter::contains("desc", "x").matches(&row, OPTIONS));
    }

    #[test]
    fn empty_value_matches_everything() {
        for row in rows() {
            for option in OPTIONS {
                for op in option.operators {
                    let filter = ActiveFilter::new(option.id, *op, "");
                    assert!(filter.matches(&row, OPTIONS), "{:?} {:?}", option.id, op);
                }
            }
        }
    }

    #[test]
    fn unknown_field_is_ignored() {
        let data = rows();
        let filter = ActiveFilter::equals("author", "nobody");
        assert!(filter.matches(&data[0], OPTIONS));
        assert_eq!(apply_filters(&data, &[filter], OPTIONS).len(), data.len());
    }

    #[test]
    fn select_is_exact_and_case_sensitive() {
        let data = rows();
        let row = &data[0];
        assert!(ActiveFilter::equals("category", "Algebra").matches(row, OPTIONS));
        assert!(!ActiveFilter::equals("category", "algebra").matches(row, OPTIONS));
        assert!(!ActiveFilter::equals("category", "Alg").matches(row, OPTIONS));
    }

    #[test]
    fn date_equals_compares_calendar_day() {
        let data = rows();
        let row = &data[0];
        assert!(ActiveFilter::equals("publishDate", "2025-04-23").matches(row, OPTIONS));

        let after = ActiveFilter::new("publishDate", FilterOperator::After, "2025-04-23");
        assert!(!after.matches(row, OPTIONS));
        let before = ActiveFilter::new("publishDate", FilterOperator::Before, "2025-04-23");
        assert!(!before.matches(row, OPTIONS));
    }

    #[test]
    fn date_with_time_compares_timestamps() {
        let data = rows();
        let row = &data[0];
        let after = ActiveFilter::new("publishDate", FilterOperator::After, "2025-04-23T10:00:00");
        assert!(after.matches(row, OPTIONS));
        let before = ActiveFilter::new("publishDate", FilterOperator::Before, "2025-04-23T10:00:00");
        assert!(!before.matches(row, OPTIONS));
        let later = ActiveFilter::new("publishDate", FilterOperator::Before, "2025-04-24");
        assert!(later.matches(row, OPTIONS));
    }

    #[test]
    fn unparseable_dates_exclude_the_record() {
        let data = rows();
        let garbage = ActiveFilter::equals("publishDate", "someday");
        assert!(apply_filters(&data, &[garbage], OPTIONS).is_empty());

        // History has no publish date at all.
        let filter = ActiveFilter::new("publishDate", FilterOperator::Before, "2030-01-01");
        assert_eq!(titles(&apply_filters(&data, &[filter], OPTIONS)), vec!["Math", "French"]);
    }

    #[test]
    fn number_comparisons() {
        let data = rows();
        let gt = ActiveFilter::new("score", FilterOperator::GreaterThan, "8");
        assert_eq!(titles(&apply_filters(&data, &[gt], OPTIONS)), vec!["Math"]);

        let lt = ActiveFilter::new("score", FilterOperator::LessThan, "8");
        assert_eq!(titles(&apply_filters(&data, &[lt], OPTIONS)), vec!["French"]);

        let eq = ActiveFilter::equals("score", "7.5");
        assert_eq!(titles(&apply_filters(&data, &[eq], OPTIONS)), vec!["French"]);
    }

    #[test]
    fn non_numeric_number_filter_excludes_everything() {
        let data = rows();
        let filter = ActiveFilter::new("score", FilterOperator::GreaterThan, "lots");
        assert!(apply_filters(&data, &[filter], OPTIONS).is_empty());
    }

    #[test]
    fn operator_outside_kind_is_a_no_op() {
        let data = rows();
        let row = &data[0];
        let filter = ActiveFilter::new("score", FilterOperator::Contains, "zzz");
        assert!(filter.matches(row, OPTIONS));
    }

    #[test]
    fn filters_combine_with_and() {
        let data = rows();
        let f1 = ActiveFilter::contains("desc", "a");
        let f2 = ActiveFilter::new("score", FilterOperator::GreaterThan, "5");

        let both = apply_filters(&data, &[f1.clone(), f2.clone()], OPTIONS);
        let only1 = apply_filters(&data, &[f1], OPTIONS);
        let only2 = apply_filters(&data, &[f2], OPTIONS);
        let intersection: Vec<&Row> = only1
            .iter()
            .copied()
            .filter(|r| only2.iter().any(|o| std::ptr::eq(*o, *r)))
            .collect();

        assert_eq!(both, intersection);
        assert_eq!(titles(&both), vec!["Math", "French"]);
    }

    #[test]
    fn applying_filters_twice_is_idempotent() {
        let data = rows();
        let filters = vec![ActiveFilter::contains("desc", "a")];
        let once = apply_filters(&data, &filters, OPTIONS);
        let twice = apply_filters(once.iter().copied(), &filters, OPTIONS);
        assert_eq!(once, twice);
    }

    #[test]
    fn column_filters_ignore_type_and_case() {
        let data = rows();
        let mut quick = BTreeMap::new();
        quick.insert("score".to_string(), "7.".to_string());
        assert_eq!(titles(&apply_column_filters(&data, &quick)), vec!["French"]);

        quick.clear();
        quick.insert("publishDate".to_string(), "2025-04".to_string());
        quick.insert("desc".to_string(), "ALG".to_string());
        assert_eq!(titles(&apply_column_filters(&data, &quick)), vec!["Math"]);
    }

    #[test]
    fn column_filters_skip_blank_and_unknown_columns() {
        let data = rows();
        let mut quick = BTreeMap::new();
        quick.insert("title".to_string(), String::new());
        quick.insert("author".to_string(), "x".to_string());
        assert_eq!(apply_column_filters(&data, &quick).len(), 3);
    }

    #[test]
    fn column_filters_trim_like_search() {
        let data = rows();
        let mut quick = BTreeMap::new();
        quick.insert("desc".to_string(), "  alg ".to_string());
        assert_eq!(titles(&apply_column_filters(&data, &quick)), vec!["Math"]);
        assert_eq!(
            titles(&apply_column_filters(&data, &quick)),
            titles(&apply_search(&data, "  alg "))
        );

        quick.insert("desc".to_string(), "   ".to_string());
        assert_eq!(apply_column_filters(&data, &quick).len(), 3);
    }

    #[test]
    fn search_matches_title_or_description() {
        let data = rows();
        assert_eq!(titles(&apply_search(&data, "maps")), vec!["History"]);
        assert_eq!(titles(&apply_search(&data, "GRAM")), vec!["French"]);
        assert_eq!(apply_search(&data, "  ").len(), 3);
        // Category is not a search field.
        assert!(apply_search(&data, "geometry").is_empty());
    }

    #[test]
    fn layers_compose() {
        let data = rows();
        let advanced = apply_filters(&data, &[ActiveFilter::contains("desc", "a")], OPTIONS);
        let mut quick = BTreeMap::new();
        quick.insert("category".to_string(), "geo".to_string());
        let quick_filtered = apply_column_filters(advanced, &quick);
        let searched = apply_search(quick_filtered, "fr");
        assert_eq!(titles(&searched), vec!["French"]);
    }
}
