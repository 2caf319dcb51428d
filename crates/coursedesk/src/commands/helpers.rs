use crate::commands::{CmdMessage, ListRequest};
use crate::schema::ListSchema;
use crate::table::options::find_filter_option;
use crate::table::{FieldId, FilterParams, Tabular};

/// Warnings for the parts of a request the engine will ignore.
///
/// The engine itself skips unknown fields silently (apart from a log line);
/// commands surface them so the user knows why a filter had no effect.
pub fn request_warnings<R: ListSchema>(request: &ListRequest) -> Vec<CmdMessage> {
    let mut warnings = Vec::new();

    for filter in request.filters.iter().filter(|f| !f.is_empty()) {
        match find_filter_option(R::filter_options(), &filter.field) {
            None => warnings.push(CmdMessage::warning(format!(
                "No filter named '{}' for {}s, ignoring it",
                filter.field,
                R::KIND
            ))),
            Some(option) if !option.allows(filter.operator) => {
                warnings.push(CmdMessage::warning(format!(
                    "Operator '{}' does not apply to '{}', ignoring it",
                    filter.operator, filter.field
                )))
            }
            Some(_) => {}
        }
    }

    for (column, text) in &request.params.column_filters {
        if !text.is_empty() && <R as Tabular>::Field::from_id(column).is_none() {
            warnings.push(CmdMessage::warning(format!(
                "No column named '{}' for {}s, ignoring it",
                column,
                R::KIND
            )));
        }
    }

    if let Some(sort_by) = &request.params.sort_by {
        if <R as Tabular>::Field::from_id(sort_by).is_none() {
            warnings.push(CmdMessage::warning(format!(
                "Cannot sort {}s by '{}', keeping the default order",
                R::KIND,
                sort_by
            )));
        }
    }

    warnings
}

/// The request's parameters with the record type's default sort filled in.
/// An unknown sort field falls back to the default too.
pub fn effective_params<R: ListSchema>(params: &FilterParams) -> FilterParams {
    let (field, direction) = R::default_sort();
    let mut params = params.clone();
    if params
        .sort_by
        .as_deref()
        .is_some_and(|id| <R as Tabular>::Field::from_id(id).is_none())
    {
        params.sort_by = None;
    }
    params.or_sort(field, direction)
}
