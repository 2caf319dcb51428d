use crate::commands::helpers::{effective_params, request_warnings};
use crate::commands::{CmdMessage, CmdResult, ListRequest};
use crate::error::Result;
use crate::store::{DataStore, Record};
use crate::table::{export_rows, project, select_rows, ExportFormat};

/// Export every row the request selects (not just the current page),
/// restricted to the visible columns.
pub fn run<S, R, C>(
    store: &S,
    request: &ListRequest,
    visible_columns: &[C],
    format: ExportFormat,
) -> Result<CmdResult<R>>
where
    S: DataStore,
    R: Record,
    C: AsRef<str>,
{
    let records: Vec<R> = store.list(request.parent)?;
    let params = effective_params::<R>(&request.params);
    let rows = select_rows(&records, &params, &request.filters, R::filter_options());
    let columns = project(R::column_options(), visible_columns);

    let text = export_rows(&rows, &columns, format)?;

    let mut result = CmdResult::default();
    result.messages = request_warnings::<R>(request);
    result.add_message(CmdMessage::info(format!(
        "Exported {} {}{} as {}",
        rows.len(),
        R::KIND,
        if rows.len() == 1 { "" } else { "s" },
        format
    )));
    result.exported = Some(text);
    Ok(result)
}
