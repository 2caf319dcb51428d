use uuid::Uuid;

use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::{DataStore, Record};

/// One record with the number of its direct children, for the detail drawer.
pub fn run<S: DataStore, R: Record>(store: &S, id: Uuid) -> Result<CmdResult<R>> {
    let record: R = store.get(id)?;
    let children = store.child_count(R::KIND, id)?;

    let mut result = CmdResult::default().with_listed(vec![record]);
    result.child_count = Some(children);
    Ok(result)
}
