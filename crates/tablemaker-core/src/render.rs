//! `create table if not exists` rendering.

use crate::schema::{Column, Table};

/// Indentation used when none is configured.
pub const DEFAULT_INDENT: &str = "    ";

/// Turns tables into text.
pub trait TableRenderer {
    /// Render all tables, in the given order, as a single document.
    fn render(&self, tables: &[Table]) -> String;

    /// Render a single table.
    fn render_table(&self, table: &Table) -> String;
}

/// Renders tables as Postgres DDL.
///
/// The relation name is wrapped in double quotes to survive reserved words and
/// mixed case. Embedded quote characters are not escaped: names come from the
/// catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlRenderer {
    indent: String,
}

impl SqlRenderer {
    pub fn new(indent: impl Into<String>) -> Self {
        Self {
            indent: indent.into(),
        }
    }

    pub fn indent(&self) -> &str {
        &self.indent
    }

    fn columns(&self, columns: &[Column]) -> String {
        let lines: Vec<String> = columns
            .iter()
            .map(|column| format!("{} {}", column.name, column.data_type))
            .collect();
        let separator = format!(",\n{}", self.indent);
        format!("{}{}", self.indent, lines.join(&separator))
    }
}

impl Default for SqlRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_INDENT)
    }
}

impl TableRenderer for SqlRenderer {
    fn render(&self, tables: &[Table]) -> String {
        let statements: Vec<String> = tables
            .iter()
            .map(|table| self.render_table(table))
            .collect();
        statements.join("\n")
    }

    fn render_table(&self, table: &Table) -> String {
        format!(
            "create table if not exists \"{}\" (\n{}\n);",
            table.name,
            self.columns(&table.columns)
        )
    }
}

/// Render `tables` with the given indentation.
pub fn render(tables: &[Table], indent: &str) -> String {
    SqlRenderer::new(indent).render(tables)
}
