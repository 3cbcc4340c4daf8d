//! Shared fixtures for the integration tests
//!
//! A `Users` table with the system columns plus `NAME` and `AGE`, and helpers to build
//! raw rows the way a backend would return them.

#![allow(dead_code)]

use buoy::{Column, DataType, Model, RawRow, ResultRow, Schema, Value};
use fake::faker::name::en::Name;
use fake::Fake;
use std::collections::BTreeMap;

// Test entity: the application's view of a Users row
#[derive(Debug, Default, Clone, PartialEq, Model)]
pub struct User {
    pub id: Option<i64>,
    pub name: String,
    pub age: Option<i64>,
}

pub const TABLE: &str = "Users";

pub fn user_columns() -> Vec<Column> {
    vec![
        Column::new("NAME", "name", DataType::Varchar),
        Column::new("AGE", "age", DataType::Int),
    ]
}

pub fn user_schema() -> Schema<User> {
    Schema::builder(TABLE)
        .model(User::default)
        .columns(user_columns())
        .build()
        .expect("Users schema should register")
}

// Helper to build a raw row from (storage name, value) pairs
pub fn row(cells: &[(&str, Value)]) -> RawRow {
    cells
        .iter()
        .map(|(name, value)| ((*name).to_string(), value.clone()))
        .collect()
}

// Helper to nest a raw row under a table name, as grouped backends do
pub fn grouped(table: &str, raw: RawRow) -> ResultRow {
    let mut tables = BTreeMap::new();
    tables.insert(table.to_string(), raw);
    ResultRow::Grouped(tables)
}

// Helper to generate a plausible Users row
pub fn fake_user_row(id: i64) -> RawRow {
    let name: String = Name().fake();
    let age: i64 = (18..90).fake();
    row(&[
        ("ROWID", Value::Int(id)),
        ("NAME", Value::Text(name)),
        ("AGE", Value::Int(age)),
        ("CREATEDTIME", Value::from("2024-05-01 08:00:00")),
    ])
}
