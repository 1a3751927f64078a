use tests::{Fixture, Value};

const ORDERS: &str = "
CREATE TABLE orders (id INTEGER PRIMARY KEY, legacy_id INTEGER, updated_at TEXT, total INTEGER);
";

const CONFIG: &str = "orders: id; legacy_id; updated_at; total; ; .";

#[test]
fn unmatched_rows_get_consecutive_keys_after_the_max() {
    let fixture = Fixture::new(
        &format!("{ORDERS} INSERT INTO orders VALUES (1, 100, '2020-01-01', 5), (4, 101, '2020-01-01', 6);"),
        &format!(
            "{ORDERS} INSERT INTO orders VALUES (1, 200, '2020-02-01', 7), (2, 201, '2020-02-01', 8), (3, 202, '2020-02-01', 9);"
        ),
    );

    let run = fixture.run(CONFIG);

    let report = run.report.table("orders").unwrap();
    assert_eq!(report.rows, 3);
    assert_eq!(report.inserted, 3);
    assert_eq!(report.matched, 0);

    for (legacy_id, id) in [(200, 5), (201, 6), (202, 7)] {
        let rows = fixture.rows_where("orders", "legacy_id", legacy_id);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get_i64("id").unwrap(), id);
    }

    assert_eq!(run.log.inserts().len(), 3);
}

#[test]
fn empty_target_starts_at_one() {
    let fixture = Fixture::new(
        ORDERS,
        &format!("{ORDERS} INSERT INTO orders VALUES (10, 200, '2020-02-01', 7), (11, 201, '2020-02-01', 8);"),
    );

    let run = fixture.run(CONFIG);

    let ids: Vec<_> = fixture
        .rows("orders")
        .iter()
        .map(|row| row.get_i64("id").unwrap())
        .collect();
    assert_eq!(ids, [1, 2]);
    assert_eq!(run.key_map.get("orders", &Value::from(10)), Some(&Value::from(1)));
    assert_eq!(run.key_map.get("orders", &Value::from(11)), Some(&Value::from(2)));
}

#[test]
fn inserted_rows_copy_global_ids_and_update_fields() {
    let fixture = Fixture::new(
        ORDERS,
        &format!("{ORDERS} INSERT INTO orders VALUES (3, 200, '2020-02-01', 7);"),
    );

    fixture.run(CONFIG);

    let rows = fixture.rows("orders");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get_i64("legacy_id").unwrap(), 200);
    assert_eq!(rows[0].get_i64("total").unwrap(), 7);

    // Diff fields are neither global ids nor update fields
    assert!(rows[0].get("updated_at").unwrap().is_null());
}

#[test]
fn key_map_has_one_entry_per_secondary_row() {
    let fixture = Fixture::new(
        &format!("{ORDERS} INSERT INTO orders VALUES (1, 100, '2020-01-01', 5);"),
        &format!(
            "{ORDERS} INSERT INTO orders VALUES (1, 300, '2020-02-01', 7), (2, 100, '2020-02-01', 8), (3, 301, '2020-02-01', 9);"
        ),
    );

    let run = fixture.run(CONFIG);

    let entries: Vec<_> = run
        .key_map
        .table("orders")
        .map(|(secondary, target)| (secondary.clone(), target.clone()))
        .collect();

    assert_eq!(
        entries,
        [
            (Value::from(1), Value::from(2)),
            (Value::from(2), Value::from(1)),
            (Value::from(3), Value::from(3)),
        ]
    );
    assert_eq!(run.key_map.len(), 3);
}

#[test]
fn tables_without_global_ids_never_match() {
    let notes = "CREATE TABLE notes (id INTEGER PRIMARY KEY, body TEXT);";
    let fixture = Fixture::new(
        &format!("{notes} INSERT INTO notes VALUES (1, 'hello');"),
        &format!("{notes} INSERT INTO notes VALUES (1, 'hello'), (2, 'world');"),
    );

    let run = fixture.run("notes: id; ; ; body; ; .");

    assert_eq!(run.report.inserted(), 2);
    assert_eq!(fixture.rows("notes").len(), 3);

    // Only the key assignment query reads the target
    assert_eq!(run.log.count(|stmt| stmt.is_query()), 1);
}

#[test]
fn inert_tables_are_left_alone() {
    let fixture = Fixture::new(
        ORDERS,
        &format!("{ORDERS} INSERT INTO orders VALUES (1, 200, '2020-02-01', 7);"),
    );

    let run = fixture.run("orders: id; legacy_id; updated_at; ; ; .");

    assert!(run.report.table("orders").unwrap().skipped);
    assert!(run.log.is_empty());
    assert!(fixture.rows("orders").is_empty());
}

#[test]
fn stored_key_agrees_with_the_key_map() {
    let fixture = Fixture::new(
        &format!("{ORDERS} INSERT INTO orders VALUES (1, 100, '2020-01-01', 5), (2, 101, '2020-01-01', 6);"),
        &format!("{ORDERS} INSERT INTO orders VALUES (50, 200, '2020-02-01', 7);"),
    );

    let run = fixture.run("orders: id; legacy_id; ; id, total; ; .");

    assert_eq!(run.key_map.get("orders", &Value::from(50)), Some(&Value::from(3)));

    let rows = fixture.rows_where("orders", "legacy_id", 200);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get_i64("id").unwrap(), 3);
    assert!(fixture.rows_where("orders", "id", 50).is_empty());
}
