use uuid::Uuid;

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Draft, Entity};
use crate::store::{DataStore, Record};

/// Apply `draft` to the record `id`. Identity and creation time are kept.
pub fn run<S, D>(store: &mut S, id: Uuid, draft: D) -> Result<CmdResult<D::Target>>
where
    S: DataStore,
    D: Draft,
    D::Target: Record,
{
    let mut record: D::Target = store.get(id)?;
    draft.apply(&mut record)?;
    store.save(record.clone())?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Updated {} '{}'",
        <D::Target as Entity>::KIND,
        record.label()
    )));
    Ok(result.with_affected(vec![record]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CourseDeskError;
    use crate::model::{Level, NewChapter, NewLevel, Subject};
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn updates_in_place() {
        let mut fx = StoreFixture::new();
        let level = fx.level("Grade 10");
        let draft = NewLevel {
            name: "Seconde".into(),
            code: "2ND".into(),
            description: "Lycée".into(),
            order: 1,
        };

        let result = run(&mut fx.store, level.id, draft).unwrap();
        assert_eq!(result.affected[0].id, level.id);
        assert_eq!(result.affected[0].created_at, level.created_at);

        let stored: Level = fx.store.get(level.id).unwrap();
        assert_eq!(stored.name, "Seconde");
        assert_eq!(result.messages[0].content, "Updated level 'Seconde'");
    }

    #[test]
    fn can_move_a_chapter_to_another_subject() {
        let mut fx = StoreFixture::new();
        let level = fx.level("Grade 10");
        let maths: Subject = fx.subject(&level, "Maths");
        let physics: Subject = fx.subject(&level, "Physics");
        let chapter = fx.chapter(&maths, "Vectors");

        let draft = NewChapter {
            subject_id: physics.id,
            title: chapter.title.clone(),
            description: String::new(),
            order: 1,
        };
        run(&mut fx.store, chapter.id, draft).unwrap();
        assert_eq!(
            fx.store
                .child_count(crate::model::EntityKind::Subject, physics.id)
                .unwrap(),
            1
        );
    }

    #[test]
    fn invalid_draft_leaves_record_untouched() {
        let mut fx = StoreFixture::new();
        let level = fx.level("Grade 10");
        let draft = NewLevel {
            name: " ".into(),
            code: "X".into(),
            description: String::new(),
            order: 0,
        };
        assert!(matches!(
            run(&mut fx.store, level.id, draft),
            Err(CourseDeskError::Validation(_))
        ));
        let stored: Level = fx.store.get(level.id).unwrap();
        assert_eq!(stored.name, "Grade 10");
    }

    #[test]
    fn unknown_id_is_not_found() {
        let mut fx = StoreFixture::new();
        let draft = NewLevel {
            name: "Ghost".into(),
            code: "G".into(),
            description: String::new(),
            order: 0,
        };
        assert!(matches!(
            run(&mut fx.store, Uuid::new_v4(), draft),
            Err(CourseDeskError::NotFound { .. })
        ));
    }
}
