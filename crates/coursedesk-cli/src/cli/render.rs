//! Terminal output.
//!
//! Tables are laid out by display width (`unicode-width`), so labels with
//! accents or wide characters stay aligned. Dates are shown as a calendar day
//! followed by a relative time.

use anyhow::Result;
use chrono::{NaiveDateTime, Utc};
use colored::*;
use coursedesk::commands::{CmdMessage, MessageLevel};
use coursedesk::navigation::{list_title, Navigator};
use coursedesk::schema::ListSchema;
use coursedesk::table::{ColumnOption, FieldValue, FilterOption, Pagination};
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

const MAX_CELL_WIDTH: usize = 40;
const COLUMN_GAP: &str = "  ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStream {
    Stdout,
    Stderr,
}

pub fn print_messages(messages: &[CmdMessage], stream: MessageStream) {
    for message in messages {
        let line = match message.level {
            MessageLevel::Info => message.content.dimmed(),
            MessageLevel::Success => message.content.green(),
            MessageLevel::Warning => message.content.yellow(),
            MessageLevel::Error => message.content.red(),
        };
        match stream {
            MessageStream::Stdout => println!("{}", line),
            MessageStream::Stderr => eprintln!("{}", line),
        }
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// One page of records, an id column first, then `columns` in order.
pub fn print_table<R: ListSchema>(rows: &[R], columns: &[ColumnOption]) {
    if rows.is_empty() {
        return;
    }
    let columns: Vec<&ColumnOption> = columns.iter().filter(|c| !c.is_actions()).collect();

    let mut header = vec!["ID"];
    header.extend(columns.iter().map(|c| c.label));

    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            let mut cells = vec![row.id().to_string()];
            cells.extend(columns.iter().map(|c| {
                let value = row.field_by_id(c.id).unwrap_or(FieldValue::Missing);
                truncate_to_width(&cell_text(&value), MAX_CELL_WIDTH)
            }));
            cells
        })
        .collect();

    print_grid(&header, &body);
}

fn print_grid(header: &[&str], body: &[Vec<String>]) {
    let mut widths: Vec<usize> = header.iter().map(|h| h.width()).collect();
    for row in body {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.width());
            }
        }
    }

    let header_line = header
        .iter()
        .zip(&widths)
        .map(|(h, w)| pad(h, *w))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    println!("{}", header_line.trim_end().bold());

    let rule = widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    println!("{}", rule.dimmed());

    for row in body {
        let line = row
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (cell, w))| {
                let padded = pad(cell, *w);
                if i == 0 {
                    padded.dimmed().to_string()
                } else {
                    padded
                }
            })
            .collect::<Vec<_>>()
            .join(COLUMN_GAP);
        println!("{}", line.trim_end());
    }
}

pub fn print_pagination(pagination: &Pagination, page_sizes: &[usize]) {
    if pagination.total == 0 {
        return;
    }
    println!();
    println!(
        "{}",
        format!(
            "Showing {}-{} of {} (page {} of {}, {} per page)",
            pagination.first_row(),
            pagination.last_row(),
            pagination.total,
            pagination.page,
            pagination.total_pages(),
            pagination.limit
        )
        .dimmed()
    );
    if pagination.has_next() {
        let sizes: Vec<String> = page_sizes.iter().map(|n| n.to_string()).collect();
        println!(
            "{}",
            format!(
                "Next: --page {} · page sizes: {}",
                pagination.page + 1,
                sizes.join(", ")
            )
            .dimmed()
        );
    }
}

/// A single record as `label: value` lines.
pub fn print_record<R: ListSchema>(
    record: &R,
    columns: &[ColumnOption],
    child_count: Option<usize>,
) {
    println!("{}", record.label().bold());
    println!();

    let mut lines: Vec<(&str, String)> = vec![("ID", record.id().to_string())];
    lines.extend(columns.iter().filter(|c| !c.is_actions()).map(|c| {
        let value = record.field_by_id(c.id).unwrap_or(FieldValue::Missing);
        (c.label, cell_text(&value))
    }));
    if let (Some(count), Some(child)) = (child_count, R::KIND.child()) {
        lines.push((list_title(child), count.to_string()));
    }

    let label_width = lines.iter().map(|(l, _)| l.width()).max().unwrap_or(0);
    for (label, value) in lines {
        println!("{}  {}", pad(label, label_width).dimmed(), value);
    }
}

pub fn print_breadcrumbs(nav: &Navigator) {
    println!("{}", nav.to_string().bold());
    println!();
}

pub fn print_filter_options(options: &[FilterOption]) {
    let body: Vec<Vec<String>> = options
        .iter()
        .map(|o| {
            vec![
                o.id.to_string(),
                o.label.to_string(),
                o.kind.to_string(),
                o.operators
                    .iter()
                    .map(|op| op.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
                o.options.join(", "),
            ]
        })
        .collect();
    print_grid(&["Field", "Label", "Type", "Operators", "Values"], &body);
}

pub fn print_column_options(columns: &[ColumnOption]) {
    let body: Vec<Vec<String>> = columns
        .iter()
        .map(|c| {
            vec![
                c.id.to_string(),
                c.label.to_string(),
                if c.required { "required" } else { "optional" }.to_string(),
            ]
        })
        .collect();
    print_grid(&["Column", "Label", "Visibility"], &body);
}

fn cell_text(value: &FieldValue) -> String {
    match value {
        FieldValue::Date(d) => format!("{} ({})", d.format("%Y-%m-%d"), format_time_ago(*d)),
        FieldValue::Missing => "-".to_string(),
        other => other.to_display_string(),
    }
}

fn format_time_ago(timestamp: NaiveDateTime) -> String {
    let now = Utc::now().naive_utc();
    let mut formatter = timeago::Formatter::new();
    match now.signed_duration_since(timestamp).to_std() {
        Ok(elapsed) => formatter.convert(elapsed),
        Err(_) => {
            formatter.ago("from now");
            formatter.convert(
                timestamp
                    .signed_duration_since(now)
                    .to_std()
                    .unwrap_or_default(),
            )
        }
    }
}

fn pad(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(s.width())))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}
