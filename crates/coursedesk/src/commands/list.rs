use tracing::debug;

use crate::commands::helpers::{effective_params, request_warnings};
use crate::commands::{CmdMessage, CmdResult, ListRequest};
use crate::error::Result;
use crate::store::{DataStore, Record};
use crate::table::run_query;

/// One page of `R` records under the request's parent.
pub fn run<S: DataStore, R: Record>(store: &S, request: &ListRequest) -> Result<CmdResult<R>> {
    let records: Vec<R> = store.list(request.parent)?;
    let params = effective_params::<R>(&request.params);

    let page = run_query(&records, &params, &request.filters, R::filter_options()).cloned();
    debug!(kind = %R::KIND, total = page.pagination.total, "listed page");

    let mut result = CmdResult::default();
    result.messages = request_warnings::<R>(request);
    if page.pagination.total == 0 {
        result.add_message(CmdMessage::info(format!("No {}s found", R::KIND)));
    } else if page.data.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "Page {} is past the last page ({})",
            page.pagination.page,
            page.pagination.total_pages()
        )));
    }
    result.pagination = Some(page.pagination);
    Ok(result.with_listed(page.data))
}
