//! Rendering of display models as tables, JSON or YAML.

use anyhow::Result;
use chrono::{DateTime, NaiveDateTime};
use clap::ValueEnum;
use serde::Serialize;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

/// A value that can be shown as one row of named columns.
pub trait TableInfo {
    fn table_columns() -> &'static [&'static str];
    fn table_row(&self) -> Vec<String>;
}

pub fn render_one<T: Serialize + TableInfo>(item: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(table(T::table_columns(), &[item.table_row()])),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(item)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(item)?),
    }
}

pub fn render_many<T: Serialize + TableInfo>(items: &[T], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => {
            let rows: Vec<Vec<String>> = items.iter().map(TableInfo::table_row).collect();
            Ok(table(T::table_columns(), &rows))
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(items)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(items)?),
    }
}

pub fn print_one<T: Serialize + TableInfo>(item: &T, format: OutputFormat) -> Result<()> {
    println!("{}", render_one(item, format)?.trim_end());
    Ok(())
}

pub fn print_many<T: Serialize + TableInfo>(items: &[T], format: OutputFormat) -> Result<()> {
    println!("{}", render_many(items, format)?.trim_end());
    Ok(())
}

/// Status line for a finished action. Goes to stdout for tables and to
/// stderr otherwise, so JSON and YAML output stays parseable.
pub fn notice(message: &str, format: OutputFormat) {
    match format {
        OutputFormat::Table => println!("{message}"),
        OutputFormat::Json | OutputFormat::Yaml => eprintln!("{message}"),
    }
}

/// Bordered text table, each column as wide as its widest cell.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let border = widths
        .iter()
        .map(|w| "-".repeat(w + 2))
        .collect::<Vec<_>>()
        .join("+");
    let border = format!("+{border}+\n");

    let mut out = border.clone();
    out.push_str(&line(&widths, headers));
    out.push_str(&border);
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push_str(&line(&widths, &cells));
    }
    if !rows.is_empty() {
        out.push_str(&border);
    }
    out
}

fn line(widths: &[usize], cells: &[&str]) -> String {
    let padded = widths
        .iter()
        .enumerate()
        .map(|(i, w)| {
            let cell = cells.get(i).copied().unwrap_or("");
            let pad = w.saturating_sub(cell.chars().count());
            format!(" {cell}{} ", " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join("|");
    format!("|{padded}|\n")
}

/// `2020-04-08T05:50:26.000+0000` → `2020-04-08 05:50`. Unparseable input is returned as is.
pub fn format_date(raw: &str) -> String {
    DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z")
        .map(|d| d.naive_utc())
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|d| d.naive_utc()))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

pub(crate) fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

pub(crate) fn opt_date(value: &Option<String>) -> String {
    value.as_deref().map(format_date).unwrap_or_default()
}

pub(crate) fn opt_bool(value: Option<bool>) -> String {
    value.map(|b| b.to_string()).unwrap_or_default()
}
