//! # Domain Model: the Content Hierarchy
//!
//! Educational content is organised as a strict four-level tree:
//!
//! ```text
//! Level ──< Subject ──< Chapter ──< Exercise
//! ```
//!
//! Every record is flat: an id, a handful of descriptive fields and (below the
//! root) a reference to its parent's id. Referential integrity is enforced by
//! the store when records are saved, never by the records themselves.
//!
//! ## Drafts
//!
//! Create and update operations take a *draft* (`NewLevel`, `NewSubject`, ...)
//! carrying only the user-editable fields. Drafts are validated with
//! [`NewLevel::validate`] and friends before they become records, so the
//! engine downstream can assume well-formed values.

use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{CourseDeskError, Result};

/// The four entity types of the hierarchy, root first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Level,
    Subject,
    Chapter,
    Exercise,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Level,
        EntityKind::Subject,
        EntityKind::Chapter,
        EntityKind::Exercise,
    ];

    /// The kind one step up the hierarchy, `None` for levels.
    pub fn parent(self) -> Option<EntityKind> {
        match self {
            EntityKind::Level => None,
            EntityKind::Subject => Some(EntityKind::Level),
            EntityKind::Chapter => Some(EntityKind::Subject),
            EntityKind::Exercise => Some(EntityKind::Chapter),
        }
    }

    /// The kind one step down the hierarchy, `None` for exercises.
    pub fn child(self) -> Option<EntityKind> {
        match self {
            EntityKind::Level => Some(EntityKind::Subject),
            EntityKind::Subject => Some(EntityKind::Chapter),
            EntityKind::Chapter => Some(EntityKind::Exercise),
            EntityKind::Exercise => None,
        }
    }

    /// Depth in the hierarchy, 0 for levels.
    pub fn depth(self) -> usize {
        match self {
            EntityKind::Level => 0,
            EntityKind::Subject => 1,
            EntityKind::Chapter => 2,
            EntityKind::Exercise => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Level => "level",
            EntityKind::Subject => "subject",
            EntityKind::Chapter => "chapter",
            EntityKind::Exercise => "exercise",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = CourseDeskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "level" | "levels" => Ok(EntityKind::Level),
            "subject" | "subjects" => Ok(EntityKind::Subject),
            "chapter" | "chapters" => Ok(EntityKind::Chapter),
            "exercise" | "exercises" => Ok(EntityKind::Exercise),
            other => Err(CourseDeskError::Validation(format!(
                "Unknown entity kind '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseKind {
    Quiz,
    Problem,
    Essay,
    Practical,
}

impl ExerciseKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ExerciseKind::Quiz => "quiz",
            ExerciseKind::Problem => "problem",
            ExerciseKind::Essay => "essay",
            ExerciseKind::Practical => "practical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PublishStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl PublishStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PublishStatus::Draft => "draft",
            PublishStatus::Published => "published",
            PublishStatus::Archived => "archived",
        }
    }
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub order: u32,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: Uuid,
    pub level_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub coefficient: f64,
    #[serde(default)]
    pub color: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: Uuid,
    pub subject_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub order: u32,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: Uuid,
    pub chapter_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub difficulty: Difficulty,
    pub kind: ExerciseKind,
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub status: PublishStatus,
    #[serde(default)]
    pub publish_date: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

/// Common access to the identity and parent link of any record.
pub trait Entity {
    const KIND: EntityKind;

    fn id(&self) -> Uuid;

    /// Id of the parent record, `None` for levels.
    fn parent_id(&self) -> Option<Uuid>;

    /// Human label used in breadcrumbs and messages.
    fn label(&self) -> &str;
}

impl Entity for Level {
    const KIND: EntityKind = EntityKind::Level;

    fn id(&self) -> Uuid {
        self.id
    }

    fn parent_id(&self) -> Option<Uuid> {
        None
    }

    fn label(&self) -> &str {
        &self.name
    }
}

impl Entity for Subject {
    const KIND: EntityKind = EntityKind::Subject;

    fn id(&self) -> Uuid {
        self.id
    }

    fn parent_id(&self) -> Option<Uuid> {
        Some(self.level_id)
    }

    fn label(&self) -> &str {
        &self.name
    }
}

impl Entity for Chapter {
    const KIND: EntityKind = EntityKind::Chapter;

    fn id(&self) -> Uuid {
        self.id
    }

    fn parent_id(&self) -> Option<Uuid> {
        Some(self.subject_id)
    }

    fn label(&self) -> &str {
        &self.title
    }
}

impl Entity for Exercise {
    const KIND: EntityKind = EntityKind::Exercise;

    fn id(&self) -> Uuid {
        self.id
    }

    fn parent_id(&self) -> Option<Uuid> {
        Some(self.chapter_id)
    }

    fn label(&self) -> &str {
        &self.title
    }
}

// --- Drafts ---

/// User-editable fields of a record, validated before they are stored.
pub trait Draft {
    type Target: Entity;

    /// Validate and build a new record with a fresh id.
    fn into_record(self) -> Result<Self::Target>;

    /// Validate and overwrite the editable fields of `target`.
    fn apply(self, target: &mut Self::Target) -> Result<()>;
}

macro_rules! impl_draft {
    ($draft:ty, $target:ty, $into:ident) => {
        impl Draft for $draft {
            type Target = $target;

            fn into_record(self) -> Result<$target> {
                self.$into()
            }

            fn apply(self, target: &mut $target) -> Result<()> {
                self.apply_to(target)
            }
        }
    };
}

impl_draft!(NewLevel, Level, into_level);
impl_draft!(NewSubject, Subject, into_subject);
impl_draft!(NewChapter, Chapter, into_chapter);
impl_draft!(NewExercise, Exercise, into_exercise);

fn require_text(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CourseDeskError::Validation(format!(
            "{} must not be empty",
            field
        )));
    }
    Ok(trimmed.to_string())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLevel {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub order: u32,
}

impl NewLevel {
    pub fn validate(&self) -> Result<()> {
        require_text("name", &self.name)?;
        require_text("code", &self.code)?;
        Ok(())
    }

    pub fn into_level(self) -> Result<Level> {
        self.validate()?;
        Ok(Level {
            id: Uuid::new_v4(),
            name: self.name.trim().to_string(),
            code: self.code.trim().to_string(),
            description: self.description.trim().to_string(),
            order: self.order,
            created_at: now(),
        })
    }

    /// Overwrite the editable fields of an existing level.
    pub fn apply_to(self, level: &mut Level) -> Result<()> {
        self.validate()?;
        level.name = self.name.trim().to_string();
        level.code = self.code.trim().to_string();
        level.description = self.description.trim().to_string();
        level.order = self.order;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSubject {
    pub level_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub coefficient: f64,
    #[serde(default)]
    pub color: Option<String>,
}

impl NewSubject {
    pub fn validate(&self) -> Result<()> {
        require_text("name", &self.name)?;
        if !(self.coefficient.is_finite() && self.coefficient > 0.0) {
            return Err(CourseDeskError::Validation(
                "coefficient must be a positive number".into(),
            ));
        }
        Ok(())
    }

    pub fn into_subject(self) -> Result<Subject> {
        self.validate()?;
        Ok(Subject {
            id: Uuid::new_v4(),
            level_id: self.level_id,
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            coefficient: self.coefficient,
            color: self.color,
            created_at: now(),
        })
    }

    pub fn apply_to(self, subject: &mut Subject) -> Result<()> {
        self.validate()?;
        subject.level_id = self.level_id;
        subject.name = self.name.trim().to_string();
        subject.description = self.description.trim().to_string();
        subject.coefficient = self.coefficient;
        subject.color = self.color;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewChapter {
    pub subject_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub order: u32,
}

impl NewChapter {
    pub fn validate(&self) -> Result<()> {
        require_text("title", &self.title)?;
        Ok(())
    }

    pub fn into_chapter(self) -> Result<Chapter> {
        self.validate()?;
        Ok(Chapter {
            id: Uuid::new_v4(),
            subject_id: self.subject_id,
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            order: self.order,
            created_at: now(),
        })
    }

    pub fn apply_to(self, chapter: &mut Chapter) -> Result<()> {
        self.validate()?;
        chapter.subject_id = self.subject_id;
        chapter.title = self.title.trim().to_string();
        chapter.description = self.description.trim().to_string();
        chapter.order = self.order;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExercise {
    pub chapter_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub difficulty: Difficulty,
    pub kind: ExerciseKind,
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub status: PublishStatus,
    #[serde(default)]
    pub publish_date: Option<NaiveDateTime>,
}

impl NewExercise {
    pub fn validate(&self) -> Result<()> {
        require_text("title", &self.title)?;
        if self.status == PublishStatus::Published && self.publish_date.is_none() {
            return Err(CourseDeskError::Validation(
                "a published exercise needs a publish date".into(),
            ));
        }
        Ok(())
    }

    pub fn into_exercise(self) -> Result<Exercise> {
        self.validate()?;
        Ok(Exercise {
            id: Uuid::new_v4(),
            chapter_id: self.chapter_id,
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            difficulty: self.difficulty,
            kind: self.kind,
            points: self.points,
            status: self.status,
            publish_date: self.publish_date,
            created_at: now(),
        })
    }

    pub fn apply_to(self, exercise: &mut Exercise) -> Result<()> {
        self.validate()?;
        exercise.chapter_id = self.chapter_id;
        exercise.title = self.title.trim().to_string();
        exercise.description = self.description.trim().to_string();
        exercise.difficulty = self.difficulty;
        exercise.kind = self.kind;
        exercise.points = self.points;
        exercise.status = self.status;
        exercise.publish_date = self.publish_date;
        Ok(())
    }
}
