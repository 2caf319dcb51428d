use tracing::{debug, info};
use uuid::Uuid;

use super::{Catalog, DataStore, Record};
use crate::error::{CourseDeskError, Result};
use crate::model::{Chapter, Entity, EntityKind, Exercise, Level, Subject};

/// A [`Catalog`] held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    catalog: Catalog,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_catalog(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn remove_ids<R: Record>(&mut self, ids: &[Uuid]) -> usize {
        let table = R::table_mut(&mut self.catalog);
        let before = table.len();
        table.retain(|r| !ids.contains(&r.id()));
        before - table.len()
    }

    /// Remove `ids` of `kind`, then their children, down to the leaves.
    fn delete_subtree(&mut self, kind: EntityKind, ids: &[Uuid]) -> usize {
        if ids.is_empty() {
            return 0;
        }
        let children = kind
            .child()
            .map(|child| (child, self.children_of(child, ids)));
        let removed = match kind {
            EntityKind::Level => self.remove_ids::<Level>(ids),
            EntityKind::Subject => self.remove_ids::<Subject>(ids),
            EntityKind::Chapter => self.remove_ids::<Chapter>(ids),
            EntityKind::Exercise => self.remove_ids::<Exercise>(ids),
        };
        match children {
            Some((child, child_ids)) => removed + self.delete_subtree(child, &child_ids),
            None => removed,
        }
    }

    /// Ids of the records of `kind` whose parent is in `parents`.
    fn children_of(&self, kind: EntityKind, parents: &[Uuid]) -> Vec<Uuid> {
        fn collect<R: Record>(catalog: &Catalog, parents: &[Uuid]) -> Vec<Uuid> {
            R::table(catalog)
                .iter()
                .filter(|r| r.parent_id().is_some_and(|p| parents.contains(&p)))
                .map(|r| r.id())
                .collect()
        }
        match kind {
            EntityKind::Level => collect::<Level>(&self.catalog, parents),
            EntityKind::Subject => collect::<Subject>(&self.catalog, parents),
            EntityKind::Chapter => collect::<Chapter>(&self.catalog, parents),
            EntityKind::Exercise => collect::<Exercise>(&self.catalog, parents),
        }
    }
}

impl DataStore for InMemoryStore {
    fn list<R: Record>(&self, parent: Option<Uuid>) -> Result<Vec<R>> {
        if let (Some(parent_id), Some(parent_kind)) = (parent, R::KIND.parent()) {
            if !self.catalog.contains(parent_kind, parent_id) {
                return Err(CourseDeskError::NotFound {
                    kind: parent_kind,
                    id: parent_id,
                });
            }
        }
        let rows: Vec<R> = R::table(&self.catalog)
            .iter()
            .filter(|r| parent.is_none() || r.parent_id() == parent)
            .cloned()
            .collect();
        debug!(kind = %R::KIND, parent = ?parent, count = rows.len(), "listed records");
        Ok(rows)
    }

    fn get<R: Record>(&self, id: Uuid) -> Result<R> {
        R::table(&self.catalog)
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or(CourseDeskError::NotFound { kind: R::KIND, id })
    }

    fn save<R: Record>(&mut self, record: R) -> Result<()> {
        if let (Some(parent_id), Some(parent_kind)) = (record.parent_id(), R::KIND.parent()) {
            if !self.catalog.contains(parent_kind, parent_id) {
                return Err(CourseDeskError::MissingParent {
                    kind: parent_kind,
                    id: parent_id,
                });
            }
        }

        let id = record.id();
        let table = R::table_mut(&mut self.catalog);
        match table.iter_mut().find(|r| r.id() == id) {
            Some(existing) => {
                *existing = record;
                info!(kind = %R::KIND, %id, "updated record");
            }
            None => {
                table.push(record);
                info!(kind = %R::KIND, %id, "created record");
            }
        }
        Ok(())
    }

    fn delete(&mut self, kind: EntityKind, id: Uuid) -> Result<usize> {
        if !self.catalog.contains(kind, id) {
            return Err(CourseDeskError::NotFound { kind, id });
        }
        let removed = self.delete_subtree(kind, &[id]);
        info!(%kind, %id, removed, "deleted record");
        Ok(removed)
    }

    fn exists(&self, kind: EntityKind, id: Uuid) -> bool {
        self.catalog.contains(kind, id)
    }

    fn child_count(&self, kind: EntityKind, id: Uuid) -> Result<usize> {
        if !self.catalog.contains(kind, id) {
            return Err(CourseDeskError::NotFound { kind, id });
        }
        Ok(match kind.child() {
            Some(child_kind) => self.children_of(child_kind, &[id]).len(),
            None => 0,
        })
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{
        Difficulty, ExerciseKind, NewChapter, NewExercise, NewLevel, NewSubject, PublishStatus,
    };
    use chrono::NaiveDateTime;

    /// Builder for small hand-made hierarchies.
    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn level(&mut self, name: &str) -> Level {
            let level = NewLevel {
                name: name.into(),
                code: name.chars().take(3).collect::<String>().to_uppercase(),
                description: format!("{} curriculum", name),
                order: self.store.catalog.levels.len() as u32 + 1,
            }
            .into_level()
            .unwrap();
            self.store.save(level.clone()).unwrap();
            level
        }

        pub fn subject(&mut self, level: &Level, name: &str) -> Subject {
            let subject = NewSubject {
                level_id: level.id,
                name: name.into(),
                description: format!("{} for {}", name, level.name),
                coefficient: 1.0,
                color: None,
            }
            .into_subject()
            .unwrap();
            self.store.save(subject.clone()).unwrap();
            subject
        }

        pub fn chapter(&mut self, subject: &Subject, title: &str) -> Chapter {
            let order = self
                .store
                .catalog
                .chapters
                .iter()
                .filter(|c| c.subject_id == subject.id)
                .count() as u32
                + 1;
            let chapter = NewChapter {
                subject_id: subject.id,
                title: title.into(),
                description: String::new(),
                order,
            }
            .into_chapter()
            .unwrap();
            self.store.save(chapter.clone()).unwrap();
            chapter
        }

        /// Add an exercise; `publish` is `%Y-%m-%dT%H:%M:%S` or `None` for a draft.
        pub fn exercise(&mut self, chapter: &Chapter, title: &str, publish: Option<&str>) -> Exercise {
            let publish_date = publish
                .map(|p| NaiveDateTime::parse_from_str(p, "%Y-%m-%dT%H:%M:%S").unwrap());
            let exercise = NewExercise {
                chapter_id: chapter.id,
                title: title.into(),
                description: String::new(),
                difficulty: Difficulty::Medium,
                kind: ExerciseKind::Problem,
                points: 10,
                status: if publish_date.is_some() {
                    PublishStatus::Published
                } else {
                    PublishStatus::Draft
                },
                publish_date,
            }
            .into_exercise()
            .unwrap();
            self.store.save(exercise.clone()).unwrap();
            exercise
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::StoreFixture;
    use super::*;

    #[test]
    fn list_scopes_to_parent() {
        let mut fx = StoreFixture::new();
        let l1 = fx.level("Grade 10");
        let l2 = fx.level("Grade 11");
        fx.subject(&l1, "Maths");
        fx.subject(&l1, "Physics");
        fx.subject(&l2, "History");

        let all: Vec<Subject> = fx.store.list(None).unwrap();
        assert_eq!(all.len(), 3);
        let under_l1: Vec<Subject> = fx.store.list(Some(l1.id)).unwrap();
        assert_eq!(under_l1.len(), 2);
    }

    #[test]
    fn list_under_unknown_parent_is_not_found() {
        let fx = StoreFixture::new();
        let id = Uuid::new_v4();
        match fx.store.list::<Subject>(Some(id)) {
            Err(CourseDeskError::NotFound { kind, id: missing }) => {
                assert_eq!(kind, EntityKind::Level);
                assert_eq!(missing, id);
            }
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn save_rejects_missing_parent() {
        let mut fx = StoreFixture::new();
        let level = fx.level("Grade 10");
        let mut subject = fx.subject(&level, "Maths");
        subject.id = Uuid::new_v4();
        subject.level_id = Uuid::new_v4();
        assert!(matches!(
            fx.store.save(subject),
            Err(CourseDeskError::MissingParent {
                kind: EntityKind::Level,
                ..
            })
        ));
    }

    #[test]
    fn save_replaces_existing_record() {
        let mut fx = StoreFixture::new();
        let mut level = fx.level("Grade 10");
        level.name = "Tenth grade".into();
        fx.store.save(level.clone()).unwrap();

        let levels: Vec<Level> = fx.store.list(None).unwrap();
        assert_eq!(levels.len(), 1);
        assert_eq!(levels[0].name, "Tenth grade");
    }

    #[test]
    fn delete_cascades_through_hierarchy() {
        let mut fx = StoreFixture::new();
        let keep = fx.level("Grade 11");
        let level = fx.level("Grade 10");
        let maths = fx.subject(&level, "Maths");
        let kept_subject = fx.subject(&keep, "History");
        let algebra = fx.chapter(&maths, "Algebra");
        fx.chapter(&kept_subject, "Antiquity");
        fx.exercise(&algebra, "Linear equations", None);
        fx.exercise(&algebra, "Quadratics", Some("2025-01-10T10:00:00"));

        let removed = fx.store.delete(EntityKind::Level, level.id).unwrap();
        assert_eq!(removed, 1 + 1 + 1 + 2);

        assert_eq!(fx.store.list::<Level>(None).unwrap().len(), 1);
        assert_eq!(fx.store.list::<Subject>(None).unwrap().len(), 1);
        assert_eq!(fx.store.list::<Chapter>(None).unwrap().len(), 1);
        assert!(fx.store.list::<Exercise>(None).unwrap().is_empty());
    }

    #[test]
    fn delete_unknown_is_not_found() {
        let mut store = InMemoryStore::new();
        let id = Uuid::new_v4();
        assert!(matches!(
            store.delete(EntityKind::Exercise, id),
            Err(CourseDeskError::NotFound { .. })
        ));
    }

    #[test]
    fn child_count_counts_direct_children() {
        let mut fx = StoreFixture::new();
        let level = fx.level("Grade 10");
        let maths = fx.subject(&level, "Maths");
        fx.chapter(&maths, "Algebra");
        fx.chapter(&maths, "Geometry");

        assert_eq!(fx.store.child_count(EntityKind::Level, level.id).unwrap(), 1);
        assert_eq!(fx.store.child_count(EntityKind::Subject, maths.id).unwrap(), 2);
    }

    #[test]
    fn get_finds_by_id() {
        let mut fx = StoreFixture::new();
        let level = fx.level("Grade 10");
        let found: Level = fx.store.get(level.id).unwrap();
        assert_eq!(found, level);
        assert!(fx.store.get::<Level>(Uuid::new_v4()).is_err());
    }
}
