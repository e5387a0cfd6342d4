// CiberLoja
// Copyright 2025 The CiberLoja Authors
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Database abstraction in terms of the operations needed by the store.
//!
//! Every entity is stored in its own table and exposes its operations through the `ReadTable`
//! and `WriteTable` traits, which the driver uses to implement the generic lookups, searches and
//! mutations.  Operations that only make sense for one entity are free functions in the module of
//! that entity.

use crate::model::{EntityId, PageRequest, PagedResult, Record};
use async_trait::async_trait;
use ciberloja_core::db::sqlite::{map_sqlx_error, run_schema};
use ciberloja_core::db::{DbError, DbResult, Executor};
use sqlx::sqlite::{SqliteQueryResult, SqliteRow};
use sqlx::{QueryBuilder, Row, Sqlite};

mod cliente;
pub(crate) use cliente::*;
mod direccion;
mod empleado;
pub(crate) use empleado::*;
mod filter;
pub(crate) use filter::Filter;
mod geo;
mod pedido;
mod producto;
#[cfg(test)]
pub(crate) mod testutils;

/// Schema of the database.  All statements are idempotent.
const SCHEMA: &str = include_str!("schema.sql");

/// Initializes the database schema.
pub(crate) async fn init_schema(ex: &mut Executor) -> DbResult<()> {
    run_schema(ex, SCHEMA).await
}

/// Extracts the value of `column` from `row`.
fn get<'r, T>(row: &'r SqliteRow, column: &str) -> DbResult<T>
where
    T: sqlx::Decode<'r, Sqlite> + sqlx::Type<Sqlite>,
{
    row.try_get(column).map_err(map_sqlx_error)
}

/// Extracts the identifier stored in `column` of `row`.
fn get_id(row: &SqliteRow, column: &str) -> DbResult<EntityId> {
    Ok(EntityId::new(get::<i64>(row, column)?)?)
}

/// Extracts the optional `column` from `row` holding an identifier.
fn get_opt_id(row: &SqliteRow, column: &str) -> DbResult<Option<EntityId>> {
    match get::<Option<i64>>(row, column)? {
        Some(id) => Ok(Some(EntityId::new(id)?)),
        None => Ok(None),
    }
}

/// Checks that a modification affected exactly one row.
fn expect_one_row(done: SqliteQueryResult) -> DbResult<()> {
    match done.rows_affected() {
        0 => Err(DbError::NotFound),
        1 => Ok(()),
        n => Err(DbError::BackendError(format!("Modification affected {} rows", n))),
    }
}

/// Read operations on the table that stores the entity `Self`.
#[async_trait]
pub(crate) trait ReadTable: Sized + Send + Sync + 'static {
    /// Criteria to search for entities of this type.
    type Criteria: Default + Send + Sync;

    /// Name of the entity as shown to users.
    const ENTITY: &'static str;

    /// Name of the table.
    const TABLE: &'static str;

    /// Comma-separated list of the columns to query, excluding `id`.
    const COLUMNS: &'static str;

    /// Builds an entity from a `row` that contains `COLUMNS`.
    fn from_row(row: &SqliteRow) -> DbResult<Self>;

    /// Translates the search `criteria` into query conditions.
    fn filter(_criteria: &Self::Criteria) -> Filter {
        Filter::default()
    }

    /// Loads any parts of the entity `data` with identifier `id` that live in other tables.
    async fn load_children(_ex: &mut Executor, _id: EntityId, data: Self) -> DbResult<Self> {
        Ok(data)
    }

    /// Gets the entity with identifier `id`.
    async fn get(ex: &mut Executor, id: EntityId) -> DbResult<Record<Self>> {
        let query_str = format!("SELECT id, {} FROM {} WHERE id = ?", Self::COLUMNS, Self::TABLE);
        let row = sqlx::query(&query_str)
            .bind(id.as_i64())
            .fetch_one(ex.conn())
            .await
            .map_err(map_sqlx_error)?;
        let data = Self::from_row(&row)?;
        let data = Self::load_children(ex, id, data).await?;
        Ok(Record::new(id, data))
    }

    /// Gets the `page` of entities that match `criteria`, sorted by identifier.
    async fn find(
        ex: &mut Executor,
        criteria: &Self::Criteria,
        page: &PageRequest,
    ) -> DbResult<PagedResult<Record<Self>>> {
        let filter = Self::filter(criteria);

        let mut count_query =
            QueryBuilder::<Sqlite>::new(format!("SELECT COUNT(*) AS total FROM {}", Self::TABLE));
        filter.push_where(&mut count_query);
        let row = count_query.build().fetch_one(ex.conn()).await.map_err(map_sqlx_error)?;
        let total = get::<i64>(&row, "total")?;
        let total = u64::try_from(total)
            .map_err(|e| DbError::DataIntegrityError(format!("Invalid count {}: {}", total, e)))?;

        let mut select_query = QueryBuilder::<Sqlite>::new(format!(
            "SELECT id, {} FROM {}",
            Self::COLUMNS,
            Self::TABLE
        ));
        filter.push_where(&mut select_query);
        select_query
            .push(" ORDER BY id LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());
        let rows = select_query.build().fetch_all(ex.conn()).await.map_err(map_sqlx_error)?;

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            let id = get_id(&row, "id")?;
            let data = Self::from_row(&row)?;
            let data = Self::load_children(ex, id, data).await?;
            items.push(Record::new(id, data));
        }
        Ok(PagedResult { items, total })
    }

    /// Gets all entities, sorted by identifier.
    async fn get_all(ex: &mut Executor) -> DbResult<Vec<Record<Self>>> {
        let result = Self::find(ex, &Self::Criteria::default(), &PageRequest::all()).await?;
        Ok(result.items)
    }
}

/// Write operations on the table that stores the entity `Self`.
#[async_trait]
pub(crate) trait WriteTable: ReadTable {
    /// Data needed to insert a new entity, which may be more than what the entity exposes.
    type Insert: Send + Sync;

    /// Inserts a new entity and returns its identifier.
    async fn insert(ex: &mut Executor, data: &Self::Insert) -> DbResult<EntityId>;

    /// Replaces the contents of the existing entity `id` with `data`.
    async fn update(ex: &mut Executor, id: EntityId, data: &Self) -> DbResult<()>;

    /// Deletes the entity `id`.
    async fn delete(ex: &mut Executor, id: EntityId) -> DbResult<()> {
        let query_str = format!("DELETE FROM {} WHERE id = ?", Self::TABLE);
        let done = sqlx::query(&query_str)
            .bind(id.as_i64())
            .execute(ex.conn())
            .await
            .map_err(map_sqlx_error)?;
        expect_one_row(done)
    }
}

/// Converts the result of an insertion into the identifier of the new row.
fn inserted_id(done: SqliteQueryResult) -> DbResult<EntityId> {
    Ok(EntityId::new(done.last_insert_rowid())?)
}
