use clap::{Args, Parser, Subcommand};
use coursedesk::model::EntityKind;
use coursedesk::table::{ActiveFilter, ExportFormat, FilterOperator, SortDirection};
use std::path::PathBuf;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "coursedesk", bin_name = "coursedesk", version)]
#[command(
    about = "Browse, filter and export educational content tables",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// JSON catalog to load instead of the built-in demo data
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Config file (defaults to coursedesk.toml in the OS config directory)
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true, help_heading = "Options")]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List one page of records
    #[command(alias = "ls")]
    List {
        /// levels, subjects, chapters or exercises
        #[arg(value_parser = parse_kind)]
        kind: EntityKind,

        /// Id of the parent record (required below levels)
        #[arg(long, short)]
        parent: Option<Uuid>,

        #[command(flatten)]
        query: QueryArgs,
    },

    /// Show one record with its child count
    Show {
        #[arg(value_parser = parse_kind)]
        kind: EntityKind,

        id: Uuid,
    },

    /// Drill down through the hierarchy and list what is below
    Browse {
        /// Path of ids: a level, then a subject, then a chapter
        path: Vec<Uuid>,

        #[command(flatten)]
        query: QueryArgs,
    },

    /// Export every matching row, across all pages
    Export {
        #[arg(value_parser = parse_kind)]
        kind: EntityKind,

        #[arg(long, short)]
        parent: Option<Uuid>,

        /// csv or json (defaults to the configured format)
        #[arg(long, value_parser = parse_format)]
        format: Option<ExportFormat>,

        /// Write to a file instead of stdout
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        query: QueryArgs,
    },

    /// Describe the filterable fields of a list
    Filters {
        #[arg(value_parser = parse_kind)]
        kind: EntityKind,
    },

    /// Describe the columns of a list
    Columns {
        #[arg(value_parser = parse_kind)]
        kind: EntityKind,
    },
}

/// Search, filter, sort, page and column flags shared by the list commands.
#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// Case-insensitive search over the searchable fields
    #[arg(long, short)]
    pub search: Option<String>,

    /// Advanced filter as field:operator:value (repeatable)
    #[arg(long = "filter", short = 'f', value_name = "FIELD:OP:VALUE", value_parser = parse_filter)]
    pub filters: Vec<ActiveFilter>,

    /// Column quick filter as column=text (repeatable)
    #[arg(long = "where", short = 'w', value_name = "COLUMN=TEXT", value_parser = parse_column_filter)]
    pub column_filters: Vec<(String, String)>,

    /// Field id to sort by
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long, conflicts_with = "asc")]
    pub desc: bool,

    /// Sort ascending
    #[arg(long)]
    pub asc: bool,

    /// 1-based page number
    #[arg(long)]
    pub page: Option<usize>,

    /// Rows per page
    #[arg(long, short)]
    pub limit: Option<usize>,

    /// Visible columns, comma separated (required columns always show)
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,
}

impl QueryArgs {
    /// The requested direction. Without `--asc`/`--desc`, a `--sort` field
    /// sorts ascending and no field keeps the list's default order.
    pub fn direction(&self) -> SortDirection {
        if self.desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }
}

pub fn parse_kind(raw: &str) -> Result<EntityKind, String> {
    EntityKind::from_str(raw).map_err(|e| e.to_string())
}

pub fn parse_format(raw: &str) -> Result<ExportFormat, String> {
    ExportFormat::from_str(raw).map_err(|e| e.to_string())
}

/// `field:operator:value`. The value may itself contain colons (timestamps)
/// and may be empty.
pub fn parse_filter(raw: &str) -> Result<ActiveFilter, String> {
    let mut parts = raw.splitn(3, ':');
    let field = parts.next().unwrap_or_default().trim();
    let operator = parts
        .next()
        .ok_or_else(|| format!("expected FIELD:OP:VALUE, got '{}'", raw))?;
    let value = parts.next().unwrap_or_default();

    if field.is_empty() {
        return Err(format!("missing field in '{}'", raw));
    }
    let operator = FilterOperator::from_str(operator).map_err(|e| e.to_string())?;
    Ok(ActiveFilter::new(field, operator, value))
}

pub fn parse_column_filter(raw: &str) -> Result<(String, String), String> {
    let (column, text) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected COLUMN=TEXT, got '{}'", raw))?;
    let column = column.trim();
    if column.is_empty() {
        return Err(format!("missing column in '{}'", raw));
    }
    Ok((column.to_string(), text.to_string()))
}
