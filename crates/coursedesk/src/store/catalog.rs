//! Catalog snapshots: the whole hierarchy as four flat tables.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

use crate::error::Result;
use crate::model::{Chapter, EntityKind, Exercise, Level, Subject};
use crate::schema::ListSchema;

/// All records of the hierarchy, one table per entity kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub levels: Vec<Level>,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

impl Catalog {
    /// Load a snapshot from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let catalog: Catalog = serde_json::from_str(&raw)?;
        debug!(
            path = %path.display(),
            levels = catalog.levels.len(),
            subjects = catalog.subjects.len(),
            chapters = catalog.chapters.len(),
            exercises = catalog.exercises.len(),
            "loaded catalog"
        );
        let orphans = catalog.orphan_count();
        if orphans > 0 {
            warn!(orphans, "catalog has records whose parent is missing");
        }
        Ok(catalog)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn len(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Level => self.levels.len(),
            EntityKind::Subject => self.subjects.len(),
            EntityKind::Chapter => self.chapters.len(),
            EntityKind::Exercise => self.exercises.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        EntityKind::ALL.iter().all(|kind| self.len(*kind) == 0)
    }

    /// Whether a record of `kind` with `id` exists.
    pub fn contains(&self, kind: EntityKind, id: uuid::Uuid) -> bool {
        match kind {
            EntityKind::Level => self.levels.iter().any(|r| r.id == id),
            EntityKind::Subject => self.subjects.iter().any(|r| r.id == id),
            EntityKind::Chapter => self.chapters.iter().any(|r| r.id == id),
            EntityKind::Exercise => self.exercises.iter().any(|r| r.id == id),
        }
    }

    /// Records whose parent reference points nowhere.
    pub fn orphan_count(&self) -> usize {
        let subjects = self
            .subjects
            .iter()
            .filter(|s| !self.contains(EntityKind::Level, s.level_id))
            .count();
        let chapters = self
            .chapters
            .iter()
            .filter(|c| !self.contains(EntityKind::Subject, c.subject_id))
            .count();
        let exercises = self
            .exercises
            .iter()
            .filter(|e| !self.contains(EntityKind::Chapter, e.chapter_id))
            .count();
        subjects + chapters + exercises
    }
}

/// A record type stored in a [`Catalog`] table.
pub trait Record: ListSchema + Serialize + DeserializeOwned {
    fn table(catalog: &Catalog) -> &Vec<Self>;

    fn table_mut(catalog: &mut Catalog) -> &mut Vec<Self>;
}

impl Record for Level {
    fn table(catalog: &Catalog) -> &Vec<Self> {
        &catalog.levels
    }

    fn table_mut(catalog: &mut Catalog) -> &mut Vec<Self> {
        &mut catalog.levels
    }
}

impl Record for Subject {
    fn table(catalog: &Catalog) -> &Vec<Self> {
        &catalog.subjects
    }

    fn table_mut(catalog: &mut Catalog) -> &mut Vec<Self> {
        &mut catalog.subjects
    }
}

impl Record for Chapter {
    fn table(catalog: &Catalog) -> &Vec<Self> {
        &catalog.chapters
    }

    fn table_mut(catalog: &mut Catalog) -> &mut Vec<Self> {
        &mut catalog.chapters
    }
}

impl Record for Exercise {
    fn table(catalog: &Catalog) -> &Vec<Self> {
        &catalog.exercises
    }

    fn table_mut(catalog: &mut Catalog) -> &mut Vec<Self> {
        &mut catalog.exercises
    }
}
