//! # Command Layer
//!
//! The business logic of coursedesk. Each command lives in its own submodule
//! as a plain function over a [`DataStore`](crate::store::DataStore) and the
//! record type it works on.
//!
//! ## Role and Responsibilities
//!
//! - Fetch records from the store and run them through the table engine
//! - Validate drafts and save them back
//! - Return a structured [`CmdResult`] with rows, pagination and messages
//!
//! Commands do no I/O of their own: no stdout, no prompts, no exit codes.
//! Rendering is the client's job.
//!
//! ## Structured Returns
//!
//! [`CmdResult`] carries:
//! - `listed`: rows to display (a page of a list, or the single viewed record)
//! - `affected`: records created, updated or deleted
//! - `pagination`: page metadata for list commands
//! - `child_count`: number of direct children, for the detail view
//! - `exported`: rendered export text
//! - `messages`: levelled messages (info, success, warning, error)
//!
//! ## Testing Strategy
//!
//! Command tests run against `InMemoryStore` seeded with
//! [`StoreFixture`](crate::store::memory::fixtures::StoreFixture) or the demo
//! catalog, and check the returned `CmdResult`.
//!
//! ## Command Modules
//!
//! - [`list`]: one page of a kind's records under an optional parent
//! - [`view`]: one record with its child count
//! - [`create`]: validate a draft and insert it
//! - [`update`]: validate a draft and apply it to an existing record
//! - [`delete`]: remove a record and its descendants
//! - [`export`]: all filtered rows rendered as CSV or JSON
//! - [`helpers`]: request validation shared by list and export

use serde::Serialize;
use uuid::Uuid;

use crate::table::{ActiveFilter, FilterParams, Pagination};

pub mod create;
pub mod delete;
pub mod export;
pub mod helpers;
pub mod list;
pub mod update;
pub mod view;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdResult<R> {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub listed: Vec<R>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub affected: Vec<R>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exported: Option<String>,
    pub messages: Vec<CmdMessage>,
}

impl<R> Default for CmdResult<R> {
    fn default() -> Self {
        Self {
            listed: Vec::new(),
            affected: Vec::new(),
            pagination: None,
            child_count: None,
            exported: None,
            messages: Vec::new(),
        }
    }
}

impl<R> CmdResult<R> {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed(mut self, rows: Vec<R>) -> Self {
        self.listed = rows;
        self
    }

    pub fn with_affected(mut self, rows: Vec<R>) -> Self {
        self.affected = rows;
        self
    }

    pub fn has_warnings(&self) -> bool {
        self.messages
            .iter()
            .any(|m| matches!(m.level, MessageLevel::Warning | MessageLevel::Error))
    }
}

/// What a list view asks for: the parent it is scoped to, the user's
/// parameters and the advanced filters currently applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListRequest {
    pub parent: Option<Uuid>,
    pub params: FilterParams,
    pub filters: Vec<ActiveFilter>,
}

impl ListRequest {
    pub fn under(parent: Uuid) -> Self {
        Self {
            parent: Some(parent),
            ..Default::default()
        }
    }

    pub fn with_params(mut self, params: FilterParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_filter(mut self, filter: ActiveFilter) -> Self {
        self.filters.push(filter);
        self
    }
}
