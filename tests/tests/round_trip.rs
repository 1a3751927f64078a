use tests::{Fixture, Value};

const SCHEMA: &str = "
CREATE TABLE orders (id INTEGER PRIMARY KEY, legacy_id INTEGER, updated_at TEXT, total INTEGER);
CREATE TABLE shipments (id INTEGER PRIMARY KEY, order_id INTEGER);
";

const CONFIG: &str = "orders(shipments.order_id): id; legacy_id; updated_at; total(); ; ;";

#[test]
fn second_run_finds_the_inserted_record() {
    let fixture = Fixture::new(
        &format!("{SCHEMA} INSERT INTO shipments VALUES (1, 1);"),
        &format!("{SCHEMA} INSERT INTO orders VALUES (7, 7, '2020-05-01', 42);"),
    );

    let first = fixture.run(CONFIG);
    let report = first.report.table("orders").unwrap();
    assert_eq!(report.inserted, 1);
    assert_eq!(report.matched, 0);
    assert_eq!(first.key_map.get("orders", &Value::from(7)), Some(&Value::from(1)));

    let rows = fixture.rows("orders");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get_i64("legacy_id").unwrap(), 7);
    assert_eq!(rows[0].get_i64("total").unwrap(), 42);

    let second = fixture.run(CONFIG);
    let report = second.report.table("orders").unwrap();
    assert_eq!(report.inserted, 0);
    assert_eq!(report.matched, 1);
    assert_eq!(second.key_map.get("orders", &Value::from(7)), Some(&Value::from(1)));

    // Same timestamp on both sides: nothing is newer
    assert!(!second.log.has_delete());
    assert!(!second.log.has_update());
    assert_eq!(fixture.rows("shipments").len(), 1);
    assert_eq!(fixture.rows("orders").len(), 1);
}

#[test]
fn runs_do_not_share_key_maps() {
    let fixture = Fixture::new(
        SCHEMA,
        &format!("{SCHEMA} INSERT INTO orders VALUES (7, 7, '2020-05-01', 42);"),
    );

    let first = fixture.run(CONFIG);
    let second = fixture.run("shipments: id; order_id; ; order_id; ; .");

    assert_eq!(first.key_map.len(), 1);
    assert!(second.key_map.is_empty());
}
