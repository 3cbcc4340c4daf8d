//! Terminal operations: one adapter round trip, then materialization.

use super::compiler::Statement;
use crate::error::BuoyError;
use crate::executor::{get_by_id_instrumented, run_query_instrumented, Executor, RowId};
use crate::model::{materialize, Model};
use crate::schema::Schema;

/// Run a compiled statement and materialize every row belonging to the schema's table.
///
/// Grouped rows without an entry for the table are skipped. The first conversion
/// failure aborts the whole call; no partial result is returned.
pub(crate) fn fetch<M, E>(
    schema: &Schema<M>,
    executor: &E,
    statement: Statement,
) -> Result<Vec<M>, BuoyError>
where
    M: Model,
    E: Executor + ?Sized,
{
    let table = schema.table();
    let rows = run_query_instrumented(executor, table, &statement.sql, &statement.params)?;

    let mut models = Vec::with_capacity(rows.len());
    for row in rows {
        match row.into_table_row(table) {
            Some(raw) => models.push(materialize(raw, schema)?),
            None => log::trace!("{table}: skipping result row without a {table} entry"),
        }
    }
    Ok(models)
}

/// Look a row up by identifier.
pub(crate) fn find_by_id<M, E>(schema: &Schema<M>, executor: &E, id: RowId) -> Result<M, BuoyError>
where
    M: Model,
    E: Executor + ?Sized,
{
    let table = schema.table();
    match get_by_id_instrumented(executor, table, &id)? {
        Some(raw) => materialize(raw, schema),
        None => Err(BuoyError::EntityNotFound {
            table: table.to_string(),
            id,
        }),
    }
}
