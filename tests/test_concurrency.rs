//! One schema shared by many coroutines building and running chains at once

mod common;

use buoy::{Comparator, MockExecutor};
use common::{fake_user_row, user_schema};
use std::sync::Arc;

const COROUTINES: u64 = 32;

// Chains format SQL and log; give coroutines more than the default stack
fn configure_runtime() {
    may::config().set_stack_size(0x10000);
}

#[test]
fn test_chains_built_concurrently_on_coroutines() {
    configure_runtime();
    let schema = Arc::new(user_schema());

    let handles: Vec<_> = (0..COROUTINES)
        .map(|n| {
            let schema = Arc::clone(&schema);
            may::go!(move || {
                let executor = MockExecutor::new();
                let base = schema.query(&executor).and_where("age", Comparator::Gte, n as i64);
                let paged = base.sort_desc("age").limit_offset(10, n);
                (base.compile(), paged.compile())
            })
        })
        .collect();

    for (n, handle) in handles.into_iter().enumerate() {
        let (base, paged) = handle.join().expect("coroutine panicked");
        let base = base.unwrap();
        let paged = paged.unwrap();

        assert_eq!(base.sql, "SELECT * FROM Users WHERE AGE >= ? LIMIT 1000");
        assert_eq!(base.params, vec![buoy::Value::Int(n as i64)]);
        assert_eq!(
            paged.sql,
            format!("SELECT * FROM Users WHERE AGE >= ? ORDER BY AGE DESC LIMIT 10 OFFSET {n}")
        );
    }
}

#[test]
fn test_shared_executor_across_coroutines() {
    configure_runtime();
    let schema = Arc::new(user_schema());
    let executor = Arc::new(MockExecutor::new());
    for id in 0..COROUTINES {
        executor.push_rows(vec![fake_user_row(id as i64).into()]);
    }

    let handles: Vec<_> = (0..COROUTINES)
        .map(|_| {
            let schema = Arc::clone(&schema);
            let executor = Arc::clone(&executor);
            may::go!(move || {
                let users = schema.query(executor).limit(1).get();
                users
            })
        })
        .collect();

    let mut ids: Vec<i64> = handles
        .into_iter()
        .map(|handle| {
            let users = handle.join().expect("coroutine panicked").unwrap();
            assert_eq!(users.len(), 1);
            users[0].id.unwrap()
        })
        .collect();
    ids.sort_unstable();

    let expected: Vec<i64> = (0..COROUTINES as i64).collect();
    assert_eq!(ids, expected);
    assert_eq!(executor.call_count(), COROUTINES as usize);
}
