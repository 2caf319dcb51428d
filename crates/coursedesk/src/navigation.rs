//! # Hierarchy Navigation
//!
//! The dashboard drills down one level at a time:
//!
//! ```text
//! Levels ─open─▶ Subjects(level) ─open─▶ Chapters(subject) ─open─▶ Exercises(chapter)
//! ```
//!
//! The [`Navigator`] keeps the breadcrumb trail of opened records. The last
//! crumb is the parent of the list on screen; an empty trail shows levels.
//!
//! Filters, quick filters, column choices and pagination belong to one list
//! and do not carry over. Every move reports [`Navigation::Moved`], telling
//! the caller to start a fresh [`ListView`](crate::list_view::ListView).

use serde::Serialize;
use std::fmt;
use tracing::debug;
use uuid::Uuid;

use crate::error::{CourseDeskError, Result};
use crate::model::EntityKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Crumb {
    pub kind: EntityKind,
    pub id: Uuid,
    pub label: String,
}

/// Outcome of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The position changed; transient list state must be reset.
    Moved,
    /// Nothing changed.
    Stayed,
}

impl Navigation {
    pub fn resets_list(self) -> bool {
        self == Navigation::Moved
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Navigator {
    trail: Vec<Crumb>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trail(&self) -> &[Crumb] {
        &self.trail
    }

    /// Number of opened records, 0 at the root.
    pub fn depth(&self) -> usize {
        self.trail.len()
    }

    /// The kind of records listed at the current position.
    pub fn list_kind(&self) -> EntityKind {
        self.trail
            .last()
            .and_then(|crumb| crumb.kind.child())
            .unwrap_or(EntityKind::Level)
    }

    /// Parent id of the current list, `None` at the root.
    pub fn parent(&self) -> Option<Uuid> {
        self.trail.last().map(|crumb| crumb.id)
    }

    /// Drill into a record of the current list.
    ///
    /// Only records of the listed kind can be opened, and exercises have
    /// nothing below them to open.
    pub fn open(&mut self, kind: EntityKind, id: Uuid, label: impl Into<String>) -> Result<Navigation> {
        let listed = self.list_kind();
        if kind != listed {
            return Err(CourseDeskError::Validation(format!(
                "Cannot open a {} from the {} list",
                kind,
                listed
            )));
        }
        if kind.child().is_none() {
            return Err(CourseDeskError::Validation(format!(
                "A {} has nothing to open",
                kind
            )));
        }
        self.trail.push(Crumb {
            kind,
            id,
            label: label.into(),
        });
        debug!(%kind, %id, depth = self.depth(), "opened");
        Ok(Navigation::Moved)
    }

    /// Go up one level.
    pub fn back(&mut self) -> Navigation {
        match self.trail.pop() {
            Some(_) => Navigation::Moved,
            None => Navigation::Stayed,
        }
    }

    /// Keep the first `depth` crumbs (a click on a breadcrumb).
    pub fn jump_to(&mut self, depth: usize) -> Navigation {
        if depth >= self.trail.len() {
            return Navigation::Stayed;
        }
        self.trail.truncate(depth);
        Navigation::Moved
    }

    /// Back to the level list.
    pub fn home(&mut self) -> Navigation {
        self.jump_to(0)
    }

    /// Heading of the list on screen.
    pub fn title(&self) -> &'static str {
        list_title(self.list_kind())
    }
}

/// Heading of the list of `kind` records.
pub fn list_title(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Level => "Levels",
        EntityKind::Subject => "Subjects",
        EntityKind::Chapter => "Chapters",
        EntityKind::Exercise => "Exercises",
    }
}

/// `Levels › Grade 10 › Mathematics`
impl fmt::Display for Navigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(list_title(EntityKind::Level))?;
        for crumb in &self.trail {
            write!(f, " › {}", crumb.label)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drilled() -> Navigator {
        let mut nav = Navigator::new();
        nav.open(EntityKind::Level, Uuid::from_u128(1), "Grade 10").unwrap();
        nav.open(EntityKind::Subject, Uuid::from_u128(2), "Mathematics").unwrap();
        nav.open(EntityKind::Chapter, Uuid::from_u128(3), "Algebra").unwrap();
        nav
    }

    #[test]
    fn root_lists_levels() {
        let nav = Navigator::new();
        assert_eq!(nav.list_kind(), EntityKind::Level);
        assert_eq!(nav.parent(), None);
        assert_eq!(nav.to_string(), "Levels");
    }

    #[test]
    fn drilling_down_tracks_parent_and_kind() {
        let nav = drilled();
        assert_eq!(nav.depth(), 3);
        assert_eq!(nav.list_kind(), EntityKind::Exercise);
        assert_eq!(nav.title(), "Exercises");
        assert_eq!(nav.parent(), Some(Uuid::from_u128(3)));
        assert_eq!(nav.to_string(), "Levels › Grade 10 › Mathematics › Algebra");
    }

    #[test]
    fn open_only_accepts_the_listed_kind() {
        let mut nav = Navigator::new();
        assert!(nav.open(EntityKind::Chapter, Uuid::nil(), "Algebra").is_err());
        assert_eq!(nav.depth(), 0);

        let mut nav = drilled();
        assert!(nav.open(EntityKind::Exercise, Uuid::nil(), "Limits").is_err());
        assert_eq!(nav.depth(), 3);
    }

    #[test]
    fn back_and_jump_report_moves() {
        let mut nav = drilled();
        assert!(nav.back().resets_list());
        assert_eq!(nav.list_kind(), EntityKind::Chapter);

        assert_eq!(nav.jump_to(5), Navigation::Stayed);
        assert_eq!(nav.jump_to(1), Navigation::Moved);
        assert_eq!(nav.list_kind(), EntityKind::Subject);

        assert_eq!(nav.home(), Navigation::Moved);
        assert_eq!(nav.home(), Navigation::Stayed);
        assert_eq!(nav.back(), Navigation::Stayed);
    }
}
