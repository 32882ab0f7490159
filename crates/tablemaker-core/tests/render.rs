use tablemaker_core::{Column, SqlRenderer, Table, TableRenderer, render};

fn fixtures() -> Vec<Table> {
    vec![
        Table::new(
            "test_table_1",
            vec![Column::new("col1", "text"), Column::new("col2", "numeric")],
        ),
        Table::new(
            "test_table_2",
            vec![Column::new("col1", "bool"), Column::new("col2", "int4")],
        ),
    ]
}

#[test]
fn renders_single_table_with_configured_indent() {
    let table = Table::new(
        "t",
        vec![Column::new("a", "text"), Column::new("b", "numeric")],
    );

    let sql = render(&[table], "  ");

    let expected = "create table if not exists \"t\" (\n  a text,\n  b numeric\n);";
    assert_eq!(sql, expected);
}

#[test]
fn joins_statements_with_newline_in_given_order() {
    let mut tables = fixtures();
    tables.reverse();

    let sql = SqlRenderer::new("  ").render(&tables);

    let expected = r#"create table if not exists "test_table_2" (
  col1 bool,
  col2 int4
);
create table if not exists "test_table_1" (
  col1 text,
  col2 numeric
);"#;
    assert_eq!(sql, expected);
}

#[test]
fn single_column_has_no_trailing_comma() {
    let table = Table::new("has_array", vec![Column::new("flag", "bool")]);

    let sql = SqlRenderer::new("\t").render_table(&table);

    assert_eq!(sql, "create table if not exists \"has_array\" (\n\tflag bool\n);");
}

#[test]
fn quotes_reserved_and_mixed_case_names() {
    let table = Table::new("Order", vec![Column::new("items", "text")]);

    let sql = SqlRenderer::default().render_table(&table);

    assert!(sql.starts_with("create table if not exists \"Order\" ("));
}

#[test]
fn rendering_is_deterministic() {
    let renderer = SqlRenderer::new("  ");
    let tables = fixtures();

    let first = renderer.render(&tables);
    let second = renderer.render(&tables);

    assert_eq!(first, second);
}

#[test]
fn batch_render_matches_per_table_render() {
    let renderer = SqlRenderer::new("  ");
    let tables = fixtures();

    let joined: Vec<String> = tables
        .iter()
        .map(|table| renderer.render_table(table))
        .collect();

    assert_eq!(renderer.render(&tables), joined.join("\n"));
}
