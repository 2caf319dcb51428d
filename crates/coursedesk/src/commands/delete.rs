use uuid::Uuid;

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Entity;
use crate::store::{DataStore, Record};

/// Delete a record and everything below it.
pub fn run<S: DataStore, R: Record>(store: &mut S, id: Uuid) -> Result<CmdResult<R>> {
    let record: R = store.get(id)?;
    let removed = store.delete(R::KIND, id)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Deleted {} '{}'",
        R::KIND,
        record.label()
    )));
    if removed > 1 {
        result.add_message(CmdMessage::info(format!(
            "Also removed {} nested record{}",
            removed - 1,
            if removed == 2 { "" } else { "s" }
        )));
    }
    Ok(result.with_affected(vec![record]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Chapter, EntityKind, Exercise, Subject};
    use crate::store::memory::InMemoryStore;
    use crate::store::seed::{demo_catalog, demo_id, ALGEBRA_EXERCISES};

    #[test]
    fn deleting_a_chapter_removes_its_exercises() {
        let mut store = InMemoryStore::from_catalog(demo_catalog());
        let algebra = demo_id(EntityKind::Chapter, 1);
        let before = store.list::<Exercise>(None).unwrap().len();

        let result = run::<_, Chapter>(&mut store, algebra).unwrap();
        assert_eq!(result.affected[0].title, "Algebra");
        assert_eq!(
            result.messages[1].content,
            format!("Also removed {} nested records", ALGEBRA_EXERCISES)
        );
        assert_eq!(
            store.list::<Exercise>(None).unwrap().len(),
            before - ALGEBRA_EXERCISES
        );
        assert!(!store.exists(EntityKind::Chapter, algebra));
    }

    #[test]
    fn leaf_delete_has_single_message() {
        let mut store = InMemoryStore::from_catalog(demo_catalog());
        let result = run::<_, Exercise>(&mut store, demo_id(EntityKind::Exercise, 1)).unwrap();
        assert_eq!(result.messages.len(), 1);
    }

    #[test]
    fn wrong_kind_is_not_found() {
        let mut store = InMemoryStore::from_catalog(demo_catalog());
        // A chapter id looked up as a subject.
        assert!(run::<_, Subject>(&mut store, demo_id(EntityKind::Chapter, 1)).is_err());
        assert!(store.exists(EntityKind::Chapter, demo_id(EntityKind::Chapter, 1)));
    }
}
