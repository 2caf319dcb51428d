use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Draft, Entity};
use crate::store::{DataStore, Record};

pub fn run<S, D>(store: &mut S, draft: D) -> Result<CmdResult<D::Target>>
where
    S: DataStore,
    D: Draft,
    D::Target: Record,
{
    let record = draft.into_record()?;
    store.save(record.clone())?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Created {} '{}'",
        <D::Target as Entity>::KIND,
        record.label()
    )));
    Ok(result.with_affected(vec![record]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CourseDeskError;
    use crate::model::{Chapter, Difficulty, ExerciseKind, NewExercise, NewSubject, PublishStatus};
    use crate::store::memory::fixtures::StoreFixture;
    use chrono::NaiveDate;
    use uuid::Uuid;

    #[test]
    fn creates_under_existing_parent() {
        let mut fx = StoreFixture::new();
        let level = fx.level("Grade 10");
        let draft = NewSubject {
            level_id: level.id,
            name: "Biology".into(),
            description: String::new(),
            coefficient: 2.0,
            color: Some("#22c55e".into()),
        };

        let result = run(&mut fx.store, draft).unwrap();
        let subject = &result.affected[0];
        assert!(fx.store.exists(crate::model::EntityKind::Subject, subject.id));
        assert_eq!(result.messages[0].content, "Created subject 'Biology'");
    }

    #[test]
    fn rejects_orphans() {
        let mut fx = StoreFixture::new();
        let draft = NewSubject {
            level_id: Uuid::new_v4(),
            name: "Biology".into(),
            description: String::new(),
            coefficient: 2.0,
            color: None,
        };
        assert!(matches!(
            run(&mut fx.store, draft),
            Err(CourseDeskError::MissingParent { .. })
        ));
    }

    #[test]
    fn validation_happens_before_save() {
        let mut fx = StoreFixture::new();
        let level = fx.level("Grade 10");
        let subject = fx.subject(&level, "Maths");
        let chapter: Chapter = fx.chapter(&subject, "Algebra");
        let draft = NewExercise {
            chapter_id: chapter.id,
            title: "Limits".into(),
            description: String::new(),
            difficulty: Difficulty::Hard,
            kind: ExerciseKind::Problem,
            points: 20,
            status: PublishStatus::Published,
            publish_date: None,
        };
        assert!(matches!(
            run(&mut fx.store, draft.clone()),
            Err(CourseDeskError::Validation(_))
        ));

        let dated = NewExercise {
            publish_date: NaiveDate::from_ymd_opt(2025, 4, 23).and_then(|d| d.and_hms_opt(14, 32, 45)),
            ..draft
        };
        let result = run(&mut fx.store, dated).unwrap();
        assert_eq!(result.affected[0].title, "Limits");
    }
}
