//! # Coursedesk Architecture
//!
//! Coursedesk is the **list engine of an educational content dashboard**. The
//! dashboard manages a four-level hierarchy of content and shows every level
//! as the same kind of table: filtered, searched, sorted, paged, with
//! toggleable columns. This crate is that core, independent of any UI; the
//! `coursedesk` binary in `crates/coursedesk-cli` is one client of it.
//!
//! ```text
//! Level ──< Subject ──< Chapter ──< Exercise
//! ```
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Client (CLI, or any UI)                                    │
//! │  - Owns a ListView per visible list, a Navigator            │
//! │  - Renders rows, the only place that does terminal I/O      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Filter/column metadata, path resolution                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - list, view, create, update, delete, export               │
//! │  - Returns structured CmdResult values                      │
//! └─────────────────────────────────────────────────────────────┘
//!                 │                            │
//!                 ▼                            ▼
//! ┌───────────────────────────────┐ ┌───────────────────────────┐
//! │  Table Engine (table/)        │ │  Storage Layer (store/)   │
//! │  - Pure filter/sort/paginate  │ │  - DataStore trait        │
//! │  - Generic over Tabular       │ │  - InMemoryStore, Catalog │
//! └───────────────────────────────┘ └───────────────────────────┘
//! ```
//!
//! ## Key Principle: One Engine, Four Lists
//!
//! The table logic is written once, generic over the [`table::Tabular`]
//! capability. Each entity plugs into it through [`schema`]: a closed enum
//! of field ids bound to typed accessors, plus its static filter and column
//! configuration. A list view holds only state values; all behavior lives in
//! the engine.
//!
//! ## Testing Strategy
//!
//! 1. **Engine** (`table/*.rs`): unit tests over a small fixture row type.
//! 2. **Commands** (`commands/*.rs`): the bulk of behavior tests, against
//!    `InMemoryStore` with the demo catalog or hand-built fixtures.
//! 3. **API** (`api.rs`): dispatch and list-view refresh.
//! 4. **CLI** (`crates/coursedesk-cli/tests`): end-to-end runs of the binary.
//!
//! ## Module Overview
//!
//! - [`api`]: the API facade, entry point for all operations
//! - [`commands`]: business logic for each operation
//! - [`table`]: the filter/sort/paginate/column engine
//! - [`schema`]: per-entity fields, filters, columns and default sort
//! - [`store`]: storage abstraction, in-memory store and demo data
//! - [`list_view`]: per-list state and fetch sequencing
//! - [`navigation`]: hierarchy drill-down and breadcrumbs
//! - [`model`]: the entity types and their drafts
//! - [`config`]: configuration management
//! - [`error`]: error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod list_view;
pub mod model;
pub mod navigation;
pub mod schema;
pub mod store;
pub mod table;
