use serde::{Deserialize, Serialize};

/// A column recreated from an array-typed column of the source relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    /// Element type of the source array column (e.g. `numeric` for `numeric[]`).
    pub data_type: String,
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }
}

/// A relation together with its array-typed columns, in catalog ordinal order.
///
/// Introspection never yields a table without columns; a relation with no
/// array columns is reported as an empty slot in [`IntrospectionResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }
}

/// One slot per requested relation name, in request order.
pub type IntrospectionResult = Vec<Option<Table>>;
