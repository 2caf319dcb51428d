use super::render::{
    print_breadcrumbs, print_column_options, print_filter_options, print_json, print_messages,
    print_pagination, print_record, print_table, MessageStream,
};
use super::setup::{Cli, Commands, QueryArgs};
use anyhow::{bail, Context, Result};
use clap::Parser;
use coursedesk::api::CourseDeskApi;
use coursedesk::commands::{CmdMessage, ListRequest};
use coursedesk::config::CourseDeskConfig;
use coursedesk::list_view::{FetchStatus, ListView};
use coursedesk::model::{Chapter, EntityKind, Exercise, Level, Subject};
use coursedesk::navigation::Navigator;
use coursedesk::store::memory::InMemoryStore;
use coursedesk::store::seed::demo_catalog;
use coursedesk::store::{Catalog, Record};
use coursedesk::table::{
    ActiveFilter, ColumnOption, ColumnVisibility, ExportFormat, FilterOption, FilterParams,
    Pagination,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Call `$handler::<R>(args)` with `R` the record type of `$kind`.
macro_rules! dispatch {
    ($kind:expr, $handler:ident($($arg:expr),*)) => {
        match $kind {
            EntityKind::Level => $handler::<Level>($($arg),*),
            EntityKind::Subject => $handler::<Subject>($($arg),*),
            EntityKind::Chapter => $handler::<Chapter>($($arg),*),
            EntityKind::Exercise => $handler::<Exercise>($($arg),*),
        }
    };
}

struct AppContext {
    api: CourseDeskApi<InMemoryStore>,
    config: CourseDeskConfig,
    json: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = init_context(&cli)?;

    match cli.command {
        Commands::List {
            kind,
            parent,
            query,
        } => dispatch!(kind, handle_list(&ctx, parent, &query)),
        Commands::Show { kind, id } => dispatch!(kind, handle_show(&ctx, id)),
        Commands::Browse { path, query } => handle_browse(&ctx, &path, &query),
        Commands::Export {
            kind,
            parent,
            format,
            output,
            query,
        } => dispatch!(kind, handle_export(&ctx, parent, format, output, &query)),
        Commands::Filters { kind } => dispatch!(kind, handle_filters(&ctx)),
        Commands::Columns { kind } => handle_columns(&ctx, kind),
    }
}

/// Log to stderr. `RUST_LOG` wins; otherwise `--verbose` selects debug.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config = CourseDeskConfig::load(cli.config.as_deref()).context("loading configuration")?;

    let data_file = cli.data.clone().or_else(|| config.data_file.clone());
    let catalog = match &data_file {
        Some(path) => Catalog::from_json_file(path)
            .with_context(|| format!("loading catalog {}", path.display()))?,
        None => {
            debug!("no data file configured, using demo catalog");
            demo_catalog()
        }
    };
    let orphans = catalog.orphan_count();
    if orphans > 0 {
        warn!(orphans, "catalog has records whose parent is missing");
    }

    Ok(AppContext {
        api: CourseDeskApi::new(InMemoryStore::from_catalog(catalog)),
        config,
        json: cli.json,
    })
}

fn build_request(config: &CourseDeskConfig, parent: Option<Uuid>, query: &QueryArgs) -> ListRequest {
    let mut params = FilterParams::with_limit(config.page_size(query.limit));
    params.page = query.page.unwrap_or(1).max(1);
    params.search_term = query.search.clone().unwrap_or_default();
    params.sort_by = query.sort.clone();
    params.sort_direction = query.direction();
    for (column, text) in &query.column_filters {
        if !text.is_empty() {
            params.column_filters.insert(column.clone(), text.clone());
        }
    }

    ListRequest {
        parent,
        params,
        filters: query.filters.clone(),
    }
}

/// Columns to render for `--columns`, plus a warning per unknown id.
fn visible_columns<R: Record>(ids: &[String]) -> (Vec<ColumnOption>, Vec<CmdMessage>) {
    let mut visibility = ColumnVisibility::new(R::column_options());
    if !ids.is_empty() {
        visibility.set_visible(ids);
    }

    let warnings = ids
        .iter()
        .filter(|id| !R::column_options().iter().any(|c| c.id == id.as_str()))
        .map(|id| CmdMessage::warning(format!("Unknown column '{}' ignored", id)))
        .collect();

    (visibility.project(), warnings)
}

fn handle_list<R: Record>(ctx: &AppContext, parent: Option<Uuid>, query: &QueryArgs) -> Result<()> {
    let request = build_request(&ctx.config, parent, query);
    let mut result = ctx.api.list::<R>(&request)?;
    let (columns, warnings) = visible_columns::<R>(&query.columns);
    result.messages.extend(warnings);

    if ctx.json {
        return print_json(&result);
    }

    print_table(&result.listed, &columns);
    if let Some(pagination) = &result.pagination {
        print_pagination(pagination, &ctx.config.page_size_options());
    }
    print_messages(&result.messages, MessageStream::Stdout);
    Ok(())
}

fn handle_show<R: Record>(ctx: &AppContext, id: Uuid) -> Result<()> {
    let result = ctx.api.view::<R>(id)?;
    if ctx.json {
        return print_json(&result);
    }

    if let Some(record) = result.listed.first() {
        print_record(record, R::column_options(), result.child_count);
    }
    print_messages(&result.messages, MessageStream::Stdout);
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BrowseOutput<'a, R> {
    breadcrumbs: &'a Navigator,
    title: &'static str,
    status: &'a FetchStatus,
    params: &'a FilterParams,
    filters: &'a [ActiveFilter],
    visible_columns: Vec<&'static str>,
    data: &'a [R],
    pagination: Pagination,
}

fn handle_browse(ctx: &AppContext, path: &[Uuid], query: &QueryArgs) -> Result<()> {
    let nav = ctx.api.navigate(path)?;
    dispatch!(nav.list_kind(), browse_list(ctx, &nav, query))
}

/// Drive a fresh list view for the navigator's position the way an
/// interactive client would: feed it the user's inputs, then refresh.
fn browse_list<R: Record>(ctx: &AppContext, nav: &Navigator, query: &QueryArgs) -> Result<()> {
    let mut view: ListView<R> =
        ListView::with_page_size(nav.parent(), ctx.config.page_size(query.limit));

    if let Some(term) = &query.search {
        view.on_search_change(term.clone());
    }
    for (column, text) in &query.column_filters {
        view.on_column_filter_change(column, text.clone());
    }
    if !query.filters.is_empty() {
        view.on_filter_change(query.filters.clone());
    }
    if query.sort.is_some() {
        view.on_sort_change(query.sort.clone(), query.direction());
    }
    if !query.columns.is_empty() {
        view.on_column_change(&query.columns);
    }
    if let Some(page) = query.page {
        view.on_page_change(page);
    }

    ctx.api.refresh(&mut view);
    if let FetchStatus::Error(message) = view.status() {
        bail!("{}", message);
    }

    if ctx.json {
        return print_json(&BrowseOutput {
            breadcrumbs: nav,
            title: nav.title(),
            status: view.status(),
            params: view.params(),
            filters: view.filters(),
            visible_columns: view.column_visibility().visible_ids(),
            data: view.rows(),
            pagination: view.pagination(),
        });
    }

    print_breadcrumbs(nav);
    print_table(view.rows(), &view.visible_columns());
    print_pagination(&view.pagination(), &ctx.config.page_size_options());
    if view.rows().is_empty() {
        let empty = CmdMessage::info(format!("No {}s found", R::KIND));
        print_messages(&[empty], MessageStream::Stdout);
    } else if R::KIND.child().is_some() {
        let hint = CmdMessage::info(format!(
            "Open one with: coursedesk browse {}<ID>",
            path_prefix(nav)
        ));
        print_messages(&[hint], MessageStream::Stdout);
    }
    Ok(())
}

/// The ids already on the trail, each followed by a space.
fn path_prefix(nav: &Navigator) -> String {
    nav.trail()
        .iter()
        .map(|crumb| format!("{} ", crumb.id))
        .collect()
}

fn handle_export<R: Record>(
    ctx: &AppContext,
    parent: Option<Uuid>,
    format: Option<ExportFormat>,
    output: Option<PathBuf>,
    query: &QueryArgs,
) -> Result<()> {
    let request = build_request(&ctx.config, parent, query);
    let (columns, warnings) = visible_columns::<R>(&query.columns);
    let ids: Vec<&str> = columns.iter().map(|c| c.id).collect();
    let format = format.unwrap_or(ctx.config.export_format);

    let mut result = ctx.api.export::<R, _>(&request, &ids, format)?;
    result.messages.extend(warnings);
    let text = result.exported.take().unwrap_or_default();

    match output {
        Some(path) => {
            std::fs::write(&path, &text)
                .with_context(|| format!("writing {}", path.display()))?;
            result.add_message(CmdMessage::success(format!("Wrote {}", path.display())));
            print_messages(&result.messages, MessageStream::Stdout);
        }
        None => {
            if text.ends_with('\n') {
                print!("{}", text);
            } else {
                println!("{}", text);
            }
            // Keep stdout machine-readable.
            print_messages(&result.messages, MessageStream::Stderr);
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct FiltersOutput {
    filters: &'static [FilterOption],
    default_sort: String,
}

fn handle_filters<R: Record>(ctx: &AppContext) -> Result<()> {
    let options = ctx.api.filter_options(R::KIND);
    let (field, direction) = R::default_sort();
    let default_sort = format!("{} {}", field, direction);

    if ctx.json {
        return print_json(&FiltersOutput {
            filters: options,
            default_sort,
        });
    }

    print_filter_options(options);
    println!();
    println!("Default sort: {}", default_sort);
    Ok(())
}

fn handle_columns(ctx: &AppContext, kind: EntityKind) -> Result<()> {
    let columns: Vec<ColumnOption> = ctx
        .api
        .column_options(kind)
        .iter()
        .filter(|c| !c.is_actions())
        .copied()
        .collect();

    if ctx.json {
        return print_json(&columns);
    }
    print_column_options(&columns);
    Ok(())
}
