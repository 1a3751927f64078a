use tests::{Fixture, Value};

const TAGS: &str = "CREATE TABLE tags (name TEXT, color TEXT);";

#[test]
fn tables_without_a_key_column_use_rowid() {
    let fixture = Fixture::new(
        &format!("{TAGS} INSERT INTO tags VALUES ('urgent', 'red');"),
        &format!("{TAGS} INSERT INTO tags VALUES ('urgent', 'crimson'), ('later', 'blue');"),
    );

    let run = fixture.run("tags: ; name; ; color; ; .");

    let report = run.report.table("tags").unwrap();
    assert_eq!(report.matched, 1);
    assert_eq!(report.inserted, 1);
    assert_eq!(report.updated, 1);

    let entries: Vec<_> = run
        .key_map
        .table("tags")
        .map(|(secondary, target)| (secondary.clone(), target.clone()))
        .collect();
    assert_eq!(
        entries,
        [
            (Value::from(1), Value::from(1)),
            (Value::from(2), Value::from(2)),
        ]
    );

    let inserted = fixture.rows_where("tags", "rowid", 2);
    assert_eq!(inserted.len(), 1);
    assert_eq!(inserted[0].get_text("name").unwrap(), "later");
    assert_eq!(inserted[0].get_text("color").unwrap(), "blue");

    assert_eq!(fixture.rows("tags").len(), 2);
}
