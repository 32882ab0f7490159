use std::collections::HashMap;

use async_trait::async_trait;

use tablemaker_core::{Column, IntrospectionResult, Result, Table};

use crate::adapter::TableSource;
use crate::postgres::project_onto_request;

/// In-memory catalog of relations and their array-typed columns.
///
/// Relations registered with no columns behave like relations without array
/// columns: they resolve to an empty slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryTableSource {
    relations: HashMap<String, Vec<Column>>,
}

impl MemoryTableSource {
    pub fn new(tables: impl IntoIterator<Item = Table>) -> Self {
        let mut source = Self::default();
        for table in tables {
            source.insert(table);
        }
        source
    }

    /// Register a relation, replacing any previous one with the same name.
    pub fn insert(&mut self, table: Table) {
        self.relations.insert(table.name, table.columns);
    }
}

#[async_trait]
impl TableSource for MemoryTableSource {
    fn engine(&self) -> &'static str {
        "memory"
    }

    async fn list(&self, names: &[String]) -> Result<IntrospectionResult> {
        Ok(project_onto_request(&self.relations, names))
    }
}
