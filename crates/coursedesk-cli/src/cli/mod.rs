//! # CLI Layer
//!
//! This module is **one possible client** of the coursedesk library, not the
//! application itself. It is the only place that:
//! - Parses shell arguments
//! - Writes to stdout or stderr
//! - Installs a tracing subscriber
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: shell arguments become typed commands via clap
//!    (`setup.rs`)
//! 2. **Context Setup**: config, catalog and API are built once per run
//! 3. **API Dispatch**: each subcommand calls one `CourseDeskApi` method, or
//!    drives a `ListView` and `Navigator` for `browse`
//! 4. **Output Formatting**: `CmdResult` values become tables, detail views
//!    or JSON (`render.rs`)
//!
//! Business rules (filtering, sorting, validation) are never re-implemented
//! here. CLI tests in `tests/` check arguments in and text out.
//!
//! ## Structure
//!
//! - `run()`: parse, set up, dispatch (called by `main.rs`)
//! - `handle_*()`: per-command handlers, generic over the record type
//! - `render::*`: output formatting

mod commands;
mod render;
pub mod setup;

pub use commands::run;
