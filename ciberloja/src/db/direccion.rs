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

//! Persistence of postal addresses.

use crate::db::{ReadTable, WriteTable, expect_one_row, get, get_id, get_opt_id, inserted_id};
use crate::model::{Direccion, EntityId};
use async_trait::async_trait;
use ciberloja_core::db::sqlite::map_sqlx_error;
use ciberloja_core::db::{DbResult, Executor};
use sqlx::sqlite::SqliteRow;

#[async_trait]
impl ReadTable for Direccion {
    type Criteria = ();

    const ENTITY: &'static str = "Direccion";
    const TABLE: &'static str = "direcciones";
    const COLUMNS: &'static str = "nombre_via, dir_via, localidad_id, cliente_id, empleado_id";

    fn from_row(row: &SqliteRow) -> DbResult<Self> {
        Ok(Direccion {
            nombre_via: get(row, "nombre_via")?,
            dir_via: get(row, "dir_via")?,
            localidad_id: get_id(row, "localidad_id")?,
            cliente_id: get_opt_id(row, "cliente_id")?,
            empleado_id: get_opt_id(row, "empleado_id")?,
        })
    }
}

#[async_trait]
impl WriteTable for Direccion {
    type Insert = Direccion;

    async fn insert(ex: &mut Executor, data: &Direccion) -> DbResult<EntityId> {
        let query_str = "
            INSERT INTO direcciones (nombre_via, dir_via, localidad_id, cliente_id, empleado_id)
            VALUES (?, ?, ?, ?, ?)
        ";
        let done = sqlx::query(query_str)
            .bind(&data.nombre_via)
            .bind(&data.dir_via)
            .bind(data.localidad_id.as_i64())
            .bind(data.cliente_id.map(EntityId::as_i64))
            .bind(data.empleado_id.map(EntityId::as_i64))
            .execute(ex.conn())
            .await
            .map_err(map_sqlx_error)?;
        inserted_id(done)
    }

    async fn update(ex: &mut Executor, id: EntityId, data: &Direccion) -> DbResult<()> {
        let query_str = "
            UPDATE direcciones
            SET nombre_via = ?, dir_via = ?, localidad_id = ?, cliente_id = ?, empleado_id = ?
            WHERE id = ?
        ";
        let done = sqlx::query(query_str)
            .bind(&data.nombre_via)
            .bind(&data.dir_via)
            .bind(data.localidad_id.as_i64())
            .bind(data.cliente_id.map(EntityId::as_i64))
            .bind(data.empleado_id.map(EntityId::as_i64))
            .bind(id.as_i64())
            .execute(ex.conn())
            .await
            .map_err(map_sqlx_error)?;
        expect_one_row(done)
    }
}
