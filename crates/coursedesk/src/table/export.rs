//! Table export.
//!
//! Exports the rows selected by a query (every page, not just the visible
//! one) restricted to the visible columns. The actions column never exports.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;
use std::str::FromStr;

use super::options::ColumnOption;
use super::{FieldValue, Tabular};
use crate::error::{CourseDeskError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = CourseDeskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(CourseDeskError::Validation(format!(
                "Unknown export format '{}'",
                other
            ))),
        }
    }
}

fn exported_columns(columns: &[ColumnOption]) -> Vec<&ColumnOption> {
    columns.iter().filter(|c| !c.is_actions()).collect()
}

fn cell<R: Tabular>(row: &R, column: &ColumnOption) -> FieldValue {
    row.field_by_id(column.id).unwrap_or(FieldValue::Missing)
}

/// Render `rows` in `format`, one column per entry of `columns`.
pub fn export_rows<R: Tabular>(
    rows: &[&R],
    columns: &[ColumnOption],
    format: ExportFormat,
) -> Result<String> {
    match format {
        ExportFormat::Csv => to_csv(rows, columns),
        ExportFormat::Json => to_json(rows, columns),
    }
}

fn to_csv<R: Tabular>(rows: &[&R], columns: &[ColumnOption]) -> Result<String> {
    let columns = exported_columns(columns);
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(columns.iter().map(|c| c.label))?;
    for row in rows {
        writer.write_record(
            columns
                .iter()
                .map(|column| cell(*row, column).to_display_string()),
        )?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CourseDeskError::Io(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| CourseDeskError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

fn json_value(value: FieldValue) -> Value {
    match value {
        FieldValue::Text(s) => Value::String(s),
        FieldValue::Number(n) => Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null),
        FieldValue::Bool(b) => Value::Bool(b),
        date @ FieldValue::Date(_) => Value::String(date.to_display_string()),
        FieldValue::Missing => Value::Null,
    }
}

fn to_json<R: Tabular>(rows: &[&R], columns: &[ColumnOption]) -> Result<String> {
    let columns = exported_columns(columns);
    let objects: Vec<Value> = rows
        .iter()
        .map(|row| {
            let map: Map<String, Value> = columns
                .iter()
                .map(|column| (column.id.to_string(), json_value(cell(*row, column))))
                .collect();
            Value::Object(map)
        })
        .collect();
    Ok(serde_json::to_string_pretty(&objects)?)
}
