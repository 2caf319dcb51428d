//! Column visibility.
//!
//! A list view declares its columns once ([`ColumnOption`]s, in display
//! order). The user toggles a set of visible ids; [`project`] turns that set
//! into the columns actually rendered:
//!
//! - required columns are always rendered, whatever the set says;
//! - the actions column is always rendered and cannot be toggled;
//! - everything else is rendered only when its id is in the set.

use serde::Serialize;
use std::collections::BTreeSet;

use super::options::ColumnOption;

/// The columns of `all` to render for the given visible ids, in declaration order.
pub fn project<S: AsRef<str>>(all: &[ColumnOption], visible_ids: &[S]) -> Vec<ColumnOption> {
    all.iter()
        .filter(|column| {
            column.is_actions()
                || column.required
                || visible_ids.iter().any(|id| id.as_ref() == column.id)
        })
        .copied()
        .collect()
}

/// Toggle state over a fixed set of columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnVisibility {
    #[serde(skip)]
    columns: &'static [ColumnOption],
    visible: BTreeSet<&'static str>,
}

impl ColumnVisibility {
    /// Start with every column visible.
    pub fn new(columns: &'static [ColumnOption]) -> Self {
        let mut state = Self {
            columns,
            visible: BTreeSet::new(),
        };
        state.select_all();
        state
    }

    pub fn columns(&self) -> &'static [ColumnOption] {
        self.columns
    }

    /// Ids of visible toggleable/required columns, in declaration order.
    pub fn visible_ids(&self) -> Vec<&'static str> {
        self.columns
            .iter()
            .filter(|c| !c.is_actions() && self.visible.contains(c.id))
            .map(|c| c.id)
            .collect()
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.visible.contains(id)
            || self
                .columns
                .iter()
                .any(|c| c.id == id && (c.required || c.is_actions()))
    }

    /// Replace the visible set. Unknown ids are ignored and required
    /// columns are kept.
    pub fn set_visible<S: AsRef<str>>(&mut self, ids: &[S]) {
        self.visible = self
            .columns
            .iter()
            .filter(|c| !c.is_actions())
            .filter(|c| c.required || ids.iter().any(|id| id.as_ref() == c.id))
            .map(|c| c.id)
            .collect();
    }

    /// Flip one column. Returns `false` when the column cannot be toggled
    /// (required, actions, or unknown).
    pub fn toggle(&mut self, id: &str) -> bool {
        let Some(column) = self.columns.iter().find(|c| c.id == id) else {
            return false;
        };
        if column.required || column.is_actions() {
            return false;
        }
        if !self.visible.remove(column.id) {
            self.visible.insert(column.id);
        }
        true
    }

    /// Show every column.
    pub fn select_all(&mut self) {
        self.visible = self
            .columns
            .iter()
            .filter(|c| !c.is_actions())
            .map(|c| c.id)
            .collect();
    }

    /// Hide everything that can be hidden; required columns remain.
    pub fn select_none(&mut self) {
        self.visible = self
            .columns
            .iter()
            .filter(|c| c.required && !c.is_actions())
            .map(|c| c.id)
            .collect();
    }

    /// The columns to render.
    pub fn project(&self) -> Vec<ColumnOption> {
        project(self.columns, &self.visible_ids())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::options::ACTIONS_COLUMN;

    const COLUMNS: &[ColumnOption] = &[
        ColumnOption::new("name", "Name").required(),
        ColumnOption::new("description", "Description"),
        ColumnOption::new("code", "Code"),
        ACTIONS_COLUMN,
    ];

    fn ids(columns: &[ColumnOption]) -> Vec<&'static str> {
        columns.iter().map(|c| c.id).collect()
    }

    #[test]
    fn hiding_description_keeps_required_and_actions() {
        let rendered = project(COLUMNS, &["code"]);
        assert_eq!(ids(&rendered), vec!["name", "code", ""]);
    }

    #[test]
    fn required_columns_survive_an_empty_selection() {
        let none: [&str; 0] = [];
        assert_eq!(ids(&project(COLUMNS, &none)), vec!["name", ""]);
    }

    #[test]
    fn toggle_removes_and_restores() {
        let mut state = ColumnVisibility::new(COLUMNS);
        assert_eq!(state.visible_ids(), vec!["name", "description", "code"]);

        assert!(state.toggle("description"));
        assert_eq!(ids(&state.project()), vec!["name", "code", ""]);
        assert!(!state.is_visible("description"));

        assert!(state.toggle("description"));
        assert!(state.is_visible("description"));
    }

    #[test]
    fn required_actions_and_unknown_cannot_be_toggled() {
        let mut state = ColumnVisibility::new(COLUMNS);
        assert!(!state.toggle("name"));
        assert!(!state.toggle(""));
        assert!(!state.toggle("nope"));
        assert!(state.is_visible("name"));
        assert!(state.is_visible(""));
    }

    #[test]
    fn select_none_resets_to_required() {
        let mut state = ColumnVisibility::new(COLUMNS);
        state.select_none();
        assert_eq!(state.visible_ids(), vec!["name"]);
        assert_eq!(ids(&state.project()), vec!["name", ""]);

        state.select_all();
        assert_eq!(ids(&state.project()), vec!["name", "description", "code", ""]);
    }

    #[test]
    fn set_visible_pins_required_and_drops_unknown() {
        let mut state = ColumnVisibility::new(COLUMNS);
        state.set_visible(&["code", "ghost"]);
        assert_eq!(state.visible_ids(), vec!["name", "code"]);
    }
}
