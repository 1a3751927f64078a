use pretty_assertions::assert_eq;
use tests::Fixture;

const SCHEMA: &str = "
CREATE TABLE orders (
    id INTEGER PRIMARY KEY,
    legacy_id INTEGER,
    updated_at TEXT,
    revision TEXT,
    total INTEGER,
    note TEXT
);
CREATE TABLE shipments (id INTEGER PRIMARY KEY, order_id INTEGER, legacy_id INTEGER);
";

const TARGET: &str = "
INSERT INTO orders VALUES
    (1, 100, '2020-01-01 10:00:00', 'b', 5, 'target'),
    (2, 101, '2020-01-01 10:00:00', 'b', 6, 'target');
INSERT INTO shipments VALUES (1, 1, 100), (2, 1, 100), (3, 2, 101);
";

fn fixture(secondary_order: &str) -> Fixture {
    Fixture::new(
        &format!("{SCHEMA} {TARGET}"),
        &format!("{SCHEMA} INSERT INTO orders VALUES {secondary_order};"),
    )
}

fn shipment_ids(fixture: &Fixture) -> Vec<i64> {
    fixture
        .rows("shipments")
        .iter()
        .map(|row| row.get_i64("id").unwrap())
        .collect()
}

#[test]
fn newer_secondary_cascades_to_dependents_of_the_match() {
    let fixture = fixture("(9, 100, '2020-06-01', 'b', 50, 'secondary')");

    let run = fixture.run("orders(shipments.order_id): id; legacy_id; updated_at; total; ; .");

    let report = run.report.table("orders").unwrap();
    assert_eq!(report.matched, 1);
    assert_eq!(report.deleted, 2);
    assert_eq!(report.updated, 1);

    // Only the matched order's shipments are gone
    assert_eq!(shipment_ids(&fixture), [3]);
    assert_eq!(run.log.deletes().len(), 1);
}

#[test]
fn tier_writes_keep_the_matched_value() {
    let fixture = fixture("(9, 100, '2020-06-01', 'b', 50, 'secondary')");

    let run = fixture.run("orders: id; legacy_id; updated_at; total; ; .");

    let updates = run.log.updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].columns().collect::<Vec<_>>(), ["total"]);

    let rows = fixture.rows_where("orders", "id", 1);
    assert_eq!(rows[0].get_i64("total").unwrap(), 5);
}

#[test]
fn older_secondary_changes_nothing() {
    let fixture = fixture("(9, 100, '2019-06-01', 'c', 50, 'secondary')");

    let run = fixture.run("orders(shipments.order_id): id; legacy_id; updated_at; total; ; note");

    let report = run.report.table("orders").unwrap();
    assert_eq!(report.matched, 1);
    assert_eq!(report.deleted, 0);
    assert_eq!(report.updated, 0);

    assert!(!run.log.has_delete());
    assert!(!run.log.has_update());
    assert_eq!(shipment_ids(&fixture), [1, 2, 3]);
}

#[test]
fn missing_timestamp_counts_as_newer() {
    let fixture = fixture("(9, 100, NULL, 'b', 50, 'secondary')");

    let run = fixture.run("orders(shipments.order_id): id; legacy_id; updated_at; total; ; .");

    assert_eq!(run.report.deleted(), 2);
    assert!(run.log.has_update());
}

#[test]
fn no_diff_fields_counts_as_newer() {
    let fixture = fixture("(9, 100, '2019-06-01', 'b', 50, 'secondary')");

    let run = fixture.run("orders(shipments.order_id): id; legacy_id; ; total; ; note");

    let report = run.report.table("orders").unwrap();
    assert_eq!(report.deleted, 2);

    // Both tiers are written
    assert_eq!(report.updated, 2);
}

#[test]
fn cascade_uses_the_parent_column_when_it_exists() {
    let fixture = fixture("(9, 101, '2020-06-01', 'b', 60, 'secondary')");

    let run = fixture.run("orders(shipments.legacy_id): id; legacy_id; updated_at; total; ; .");

    assert_eq!(run.report.deleted(), 1);
    assert_eq!(shipment_ids(&fixture), [1, 2]);
}

#[test]
fn second_diff_field_gates_the_first_tier_only() {
    // Newer by time, but revision `a` sorts before the target's `b`
    let fixture = fixture("(9, 100, '2020-06-01', 'a', 50, 'secondary')");

    let run = fixture.run(
        "orders(shipments.order_id): id; legacy_id; updated_at, revision; total; ; .",
    );

    let report = run.report.table("orders").unwrap();
    assert_eq!(report.deleted, 2);
    assert_eq!(report.updated, 0);
    assert!(!run.log.has_update());
}

#[test]
fn second_tier_is_compared_as_text() {
    // Chronologically older, textually newer: `T` sorts after ` `
    let fixture = fixture("(9, 100, '2020-01-01T09:00:00', 'b', 50, 'secondary')");

    let run = fixture.run("orders(shipments.order_id): id; legacy_id; updated_at; total; ; note");

    assert!(!run.log.has_delete());

    let updates = run.log.updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].columns().collect::<Vec<_>>(), ["note"]);
}
