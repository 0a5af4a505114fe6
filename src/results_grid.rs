//! Results Grid Module for studentdb
//!
//! This module renders query results as a fixed-width text table and exports
//! them to csv, json or markdown.

use crate::core::{Result, StudentDbError};
use std::collections::BTreeMap;

/// Column separator used by the fixed-width table.
const COLUMN_SEPARATOR: &str = " | ";

/// How a listing is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
    Markdown,
}

impl OutputFormat {
    /// Parses a format name, case-insensitively.
    pub fn parse(format: &str) -> Result<Self> {
        match format.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(StudentDbError::Ui(format!(
                "Unsupported output format: '{}'. Supported formats: table, csv, json, markdown",
                format
            ))),
        }
    }
}

/// A header with its fixed display width.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub width: usize,
}

/// Tabular results: headers and rows of string cells.
#[derive(Debug, Clone, Default)]
pub struct ResultsGrid {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl ResultsGrid {
    /// Creates a new, empty ResultsGrid.
    pub fn new() -> Self {
        ResultsGrid::default()
    }

    /// Sets the headers together with their display widths.
    pub fn set_columns(&mut self, columns: &[(&str, usize)]) {
        self.columns = columns
            .iter()
            .map(|(name, width)| Column {
                name: name.to_string(),
                width: *width,
            })
            .collect();
    }

    /// Adds a row to the grid. Each row is represented as a vector of strings.
    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn headers(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Width of the rule under the header: every column plus the separators.
    pub fn rule_width(&self) -> usize {
        let columns: usize = self.columns.iter().map(|c| c.width).sum();
        columns + COLUMN_SEPARATOR.len() * self.columns.len().saturating_sub(1)
    }

    fn render_line(&self, cells: &[String]) -> String {
        let padded: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                format!("{:<width$}", cell, width = column.width)
            })
            .collect();
        format!("\t{}\n", padded.join(COLUMN_SEPARATOR))
    }

    /// Renders the grid as a tab-indented, fixed-width table.
    ///
    /// Cells are left-aligned and padded to their column width; longer values
    /// are printed in full rather than truncated.
    pub fn render(&self) -> String {
        let mut output = String::new();
        if self.columns.is_empty() {
            return output;
        }
        output.push_str(&self.render_line(&self.headers()));
        output.push('\t');
        output.push_str(&"-".repeat(self.rule_width()));
        output.push('\n');
        for row in &self.rows {
            output.push_str(&self.render_line(row));
        }
        output
    }

    /// Renders the grid in the requested format.
    pub fn export(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Table => Ok(self.render()),
            OutputFormat::Csv => Ok(self.export_to_csv()),
            OutputFormat::Json => self.export_to_json(),
            OutputFormat::Markdown => Ok(self.export_to_markdown()),
        }
    }

    fn export_to_csv(&self) -> String {
        let mut output = String::new();
        if !self.columns.is_empty() {
            let headers: Vec<String> = self.headers().iter().map(|h| csv_field(h)).collect();
            output.push_str(&headers.join(","));
            output.push('\n');
        }
        for row in &self.rows {
            let fields: Vec<String> = row.iter().map(|cell| csv_field(cell)).collect();
            output.push_str(&fields.join(","));
            output.push('\n');
        }
        output
    }

    fn export_to_json(&self) -> Result<String> {
        let mut rows = Vec::new();
        for row in &self.rows {
            let mut row_map = BTreeMap::new();
            for (i, cell) in row.iter().enumerate() {
                if let Some(column) = self.columns.get(i) {
                    row_map.insert(column.name.clone(), cell.clone());
                }
            }
            rows.push(row_map);
        }
        Ok(serde_json::to_string(&rows)?)
    }

    fn export_to_markdown(&self) -> String {
        let mut output = String::new();
        if !self.columns.is_empty() {
            output.push_str(&self.headers().join(" | "));
            output.push('\n');
            let underline: Vec<String> = self
                .columns
                .iter()
                .map(|c| "-".repeat(c.name.len()))
                .collect();
            output.push_str(&underline.join(" | "));
            output.push('\n');
        }
        for row in &self.rows {
            output.push_str(&row.join(" | "));
            output.push('\n');
        }
        output
    }
}

// Quotes a csv field only when it needs it.
fn csv_field(value: &str) -> String {
    if value.contains(&[',', '"', '\n'][..]) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
