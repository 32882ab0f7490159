use std::fs;

use anyhow::Result;
use tablemaker_core::{Column, Error, SqlRenderer, Table, TableRenderer};
use tablemaker_output::{FileWriter, TableWriter, write_tables};

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

#[tokio::test]
async fn writes_one_file_per_table() -> Result<()> {
    let dir = tempfile::tempdir()?;

    write_tables(&fixtures(), dir.path()).await?;

    let first = fs::read_to_string(dir.path().join("test_table_1.sql"))?;
    assert_eq!(
        first,
        r#"create table if not exists "test_table_1" (
    col1 text,
    col2 numeric
);"#
    );

    let second = fs::read_to_string(dir.path().join("test_table_2.sql"))?;
    assert_eq!(
        second,
        r#"create table if not exists "test_table_2" (
    col1 bool,
    col2 int4
);"#
    );

    Ok(())
}

#[tokio::test]
async fn file_contents_match_single_table_render() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let renderer = SqlRenderer::new("  ");
    let writer = FileWriter::with_renderer(dir.path(), renderer.clone());

    writer.write_all(&fixtures()).await?;

    for table in fixtures() {
        let contents = fs::read_to_string(writer.destination(&table.name))?;
        assert_eq!(contents, renderer.render_table(&table));
    }
    Ok(())
}

#[tokio::test]
async fn creates_missing_destination_root() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let root = dir.path().join("nested").join("out");

    write_tables(&fixtures(), &root).await?;

    assert!(root.join("test_table_1.sql").is_file());
    assert!(root.join("test_table_2.sql").is_file());
    Ok(())
}

#[tokio::test]
async fn failure_is_reported_and_sibling_still_written() -> Result<()> {
    let dir = tempfile::tempdir()?;
    // A directory in place of the artifact makes that single write fail.
    fs::create_dir(dir.path().join("broken.sql"))?;
    let tables = vec![
        fixtures().remove(0),
        Table::new("broken", vec![Column::new("flag", "bool")]),
    ];

    let err = write_tables(&tables, dir.path())
        .await
        .expect_err("write into a directory must fail");

    match err {
        Error::Write { path, .. } => assert!(path.ends_with("broken.sql")),
        other => panic!("unexpected error: {other}"),
    }
    let sibling = fs::read_to_string(dir.path().join("test_table_1.sql"))?;
    assert_eq!(sibling, SqlRenderer::default().render_table(&tables[0]));
    Ok(())
}

#[tokio::test]
async fn stops_launching_writes_after_failure() -> Result<()> {
    let dir = tempfile::tempdir()?;
    fs::create_dir(dir.path().join("broken.sql"))?;
    let mut tables = vec![Table::new("broken", vec![Column::new("flag", "bool")])];
    tables.extend(fixtures());

    let writer = FileWriter::new(dir.path()).max_concurrency(1);
    let result = writer.write_all(&tables).await;

    assert!(matches!(result, Err(Error::Write { .. })));
    assert!(!dir.path().join("test_table_1.sql").exists());
    assert!(!dir.path().join("test_table_2.sql").exists());
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn stops_launching_writes_after_failure_on_worker_threads() -> Result<()> {
    let tables = vec![
        Table::new("broken", vec![Column::new("flag", "bool")]),
        Table::new("after", vec![Column::new("tags", "text")]),
    ];

    for _ in 0..200 {
        let dir = tempfile::tempdir()?;
        fs::create_dir(dir.path().join("broken.sql"))?;

        let result = FileWriter::new(dir.path())
            .max_concurrency(1)
            .write_all(&tables)
            .await;

        assert!(matches!(result, Err(Error::Write { .. })));
        assert!(!dir.path().join("after.sql").exists());
    }
    Ok(())
}

#[tokio::test]
async fn bounded_concurrency_writes_everything() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let tables: Vec<Table> = (0..20)
        .map(|idx| Table::new(format!("t{idx}"), vec![Column::new("v", "text")]))
        .collect();

    FileWriter::new(dir.path())
        .max_concurrency(3)
        .write_all(&tables)
        .await?;

    for table in &tables {
        assert!(dir.path().join(format!("{}.sql", table.name)).is_file());
    }
    Ok(())
}

#[tokio::test]
async fn empty_input_writes_nothing() -> Result<()> {
    let dir = tempfile::tempdir()?;

    write_tables(&[], dir.path()).await?;

    assert_eq!(fs::read_dir(dir.path())?.count(), 0);
    Ok(())
}
