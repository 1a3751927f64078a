use tests::{Fixture, Value};

const SCHEMA: &str = "
CREATE TABLE customers (id INTEGER PRIMARY KEY, email TEXT, name TEXT);
CREATE TABLE orders (id INTEGER PRIMARY KEY, legacy_id INTEGER, customer_id INTEGER, total INTEGER);
";

const CONFIG: &str = "
customers: id; email; ; name; ; .
orders: id; legacy_id; ; total, customer_id(customers.id); ; .
";

fn fixture() -> Fixture {
    Fixture::new(
        &format!("{SCHEMA} INSERT INTO customers VALUES (1, 'a@example.com', 'Ada');"),
        &format!(
            "{SCHEMA}
            INSERT INTO customers VALUES (1, 'b@example.com', 'Bob'), (2, 'a@example.com', 'Ada L.');
            INSERT INTO orders VALUES (1, 10, 1, 5), (2, 11, 2, 6), (3, 12, 99, 7);"
        ),
    )
}

fn customer_of(fixture: &Fixture, legacy_id: i64) -> i64 {
    let rows = fixture.rows_where("orders", "legacy_id", legacy_id);
    assert_eq!(rows.len(), 1);
    rows[0].get_i64("customer_id").unwrap()
}

#[test]
fn foreign_keys_follow_inserted_and_matched_records() {
    let fixture = fixture();
    let run = fixture.run(CONFIG);

    // Bob was inserted as customer 2, Ada matched customer 1
    assert_eq!(run.key_map.get("customers", &Value::from(1)), Some(&Value::from(2)));
    assert_eq!(run.key_map.get("customers", &Value::from(2)), Some(&Value::from(1)));

    assert_eq!(customer_of(&fixture, 10), 2);
    assert_eq!(customer_of(&fixture, 11), 1);
}

#[test]
fn unmapped_foreign_keys_keep_their_raw_value() {
    let fixture = fixture();
    fixture.run(CONFIG);

    assert_eq!(customer_of(&fixture, 12), 99);
}

#[test]
fn tables_are_processed_in_configuration_order() {
    let fixture = fixture();

    // Orders first: no customer has been mapped yet
    let run = fixture.run(
        "
        orders: id; legacy_id; ; total, customer_id(customers.id); ; .
        customers: id; email; ; name; ; .
        ",
    );

    let tables: Vec<_> = run.report.tables.iter().map(|t| t.table.as_str()).collect();
    assert_eq!(tables, ["orders", "customers"]);

    assert_eq!(customer_of(&fixture, 10), 1);
    assert_eq!(customer_of(&fixture, 11), 2);
}
