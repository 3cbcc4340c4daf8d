//! Identifier lookups

mod common;

use buoy::mock::MockCall;
use buoy::{BuoyError, MockExecutor, RowId, Schema, Value};
use common::{row, user_columns, User, TABLE};
use std::cell::Cell;

thread_local! {
    // Per test thread, so parallel tests do not disturb each other's counts
    static INSTANCES: Cell<usize> = const { Cell::new(0) };
}

fn instances() -> usize {
    INSTANCES.with(Cell::get)
}

// Factory that counts how many model instances were created
fn counted_user() -> User {
    INSTANCES.with(|count| count.set(count.get() + 1));
    User::default()
}

fn counted_schema() -> Schema<User> {
    Schema::builder(TABLE)
        .model(counted_user)
        .columns(user_columns())
        .build()
        .unwrap()
}

#[test]
fn test_lookup_bypasses_the_compiler() {
    let schema = counted_schema();
    let executor = MockExecutor::new();
    executor.push_lookup(Some(row(&[
        ("ROWID", Value::Int(42)),
        ("NAME", Value::from("Ada")),
    ])));

    let before = instances();
    let user = schema.query(&executor).find_by_id(42).unwrap();
    assert_eq!(instances(), before + 1);
    assert_eq!(user.id, Some(42));
    assert_eq!(user.name, "Ada");
    assert_eq!(
        executor.calls(),
        vec![MockCall::GetById {
            table: TABLE.into(),
            id: RowId::Number(42),
        }]
    );
}

#[test]
fn test_text_identifiers() {
    let schema = counted_schema();
    let executor = MockExecutor::new();
    executor.push_lookup(Some(row(&[("NAME", Value::from("Grace"))])));

    let user = schema.query(&executor).find_by_id("a1b2").unwrap();
    assert_eq!(user.name, "Grace");
    assert!(matches!(
        &executor.calls()[0],
        MockCall::GetById { id: RowId::Text(id), .. } if id == "a1b2"
    ));
}

#[test]
fn test_not_found_never_materializes() {
    let schema = counted_schema();
    let executor = MockExecutor::new();
    executor.push_lookup(None);

    let before = instances();
    let err = schema.query(&executor).find_by_id(7).unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "No row with id 7 in table Users");
    match err {
        BuoyError::EntityNotFound { table, id } => {
            assert_eq!(table, TABLE);
            assert_eq!(id, RowId::Number(7));
        }
        other => panic!("expected EntityNotFound, got {other}"),
    }
    assert_eq!(executor.call_count(), 1);
    assert_eq!(instances(), before);
}

#[test]
fn test_lookup_failure_is_a_backend_error() {
    let schema = counted_schema();
    let executor = MockExecutor::new();
    executor.push_failure("timeout");

    let err = schema.query(&executor).find_by_id(1).unwrap_err();
    assert!(matches!(err, BuoyError::Backend(_)));
    assert!(!err.is_not_found());
}
