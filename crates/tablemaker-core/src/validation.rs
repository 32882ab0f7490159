use crate::error::{Error, Result};
use crate::schema::Table;

/// Validate that tables satisfy the model invariants before rendering.
///
/// This checks:
/// - table names are non-empty
/// - every table has at least one column
/// - column names and element types are non-empty
pub fn validate_tables(tables: &[Table]) -> Result<()> {
    for table in tables {
        if table.name.is_empty() {
            return Err(Error::InvalidTable("empty table name".to_string()));
        }

        if table.columns.is_empty() {
            return Err(Error::InvalidTable(format!(
                "table has no columns: {}",
                table.name
            )));
        }

        for column in &table.columns {
            if column.name.is_empty() {
                return Err(Error::InvalidTable(format!(
                    "empty column name in table: {}",
                    table.name
                )));
            }
            if column.data_type.is_empty() {
                return Err(Error::InvalidTable(format!(
                    "empty type for column: {}.{}",
                    table.name, column.name
                )));
            }
        }
    }

    Ok(())
}
