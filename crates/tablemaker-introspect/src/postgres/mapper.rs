use std::collections::HashMap;

use tablemaker_core::{Column, IntrospectionResult, Table};

use super::queries::RawArrayColumn;
use super::utils::element_type_name;

/// Group rows by relation, keeping the row order within each relation.
pub fn group_by_relation(raw: Vec<RawArrayColumn>) -> HashMap<String, Vec<Column>> {
    let mut groups: HashMap<String, Vec<Column>> = HashMap::new();
    for row in raw {
        let data_type = element_type_name(&row.array_type, &row.element_type);
        groups
            .entry(row.table_name)
            .or_default()
            .push(Column::new(row.column_name, data_type));
    }
    groups
}

/// Walk the requested names in order, emitting one slot per name.
pub fn project_onto_request(
    groups: &HashMap<String, Vec<Column>>,
    names: &[String],
) -> IntrospectionResult {
    names
        .iter()
        .map(|name| match groups.get(name) {
            Some(columns) if !columns.is_empty() => {
                Some(Table::new(name.clone(), columns.clone()))
            }
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(table: &str, column: &str, array_type: &str, element_type: &str) -> RawArrayColumn {
        RawArrayColumn {
            table_name: table.to_string(),
            column_name: column.to_string(),
            array_type: array_type.to_string(),
            element_type: element_type.to_string(),
        }
    }

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    #[test]
    fn keeps_column_order_within_relation() {
        let groups = group_by_relation(vec![
            row("t", "numbers", "_numeric", "numeric"),
            row("t", "labels", "_text", "text"),
            row("t", "flags", "_bool", "bool"),
        ]);

        let columns: Vec<&str> = groups["t"].iter().map(|col| col.name.as_str()).collect();
        assert_eq!(columns, vec!["numbers", "labels", "flags"]);
        assert_eq!(groups["t"][0].data_type, "numeric");
    }

    #[test]
    fn projects_in_request_order_with_gaps() {
        let groups = group_by_relation(vec![
            row("a", "x", "_int4", "int4"),
            row("b", "y", "_text", "text"),
        ]);

        let result = project_onto_request(&groups, &names(&["b", "missing", "a"]));

        assert_eq!(result.len(), 3);
        assert_eq!(
            result[0],
            Some(Table::new("b", vec![Column::new("y", "text")]))
        );
        assert_eq!(result[1], None);
        assert_eq!(
            result[2],
            Some(Table::new("a", vec![Column::new("x", "int4")]))
        );
    }

    #[test]
    fn duplicate_names_resolve_independently() {
        let groups = group_by_relation(vec![row("a", "x", "_int4", "int4")]);

        let result = project_onto_request(&groups, &names(&["a", "a"]));

        assert_eq!(result.len(), 2);
        assert_eq!(result[0], result[1]);
        assert!(result[0].is_some());
    }

    #[test]
    fn empty_group_yields_empty_slot() {
        let mut groups = HashMap::new();
        groups.insert("empty".to_string(), Vec::new());

        let result = project_onto_request(&groups, &names(&["empty"]));

        assert_eq!(result, vec![None]);
    }
}
