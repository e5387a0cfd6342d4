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

//! Persistence of employees and their credentials.

use crate::db::{ReadTable, WriteTable, expect_one_row, get, get_id, inserted_id};
use crate::model::{Empleado, EntityId, HashedPassword, NewEmpleado, Record};
use async_trait::async_trait;
use ciberloja_core::db::sqlite::map_sqlx_error;
use ciberloja_core::db::{DbResult, Executor};
use ciberloja_core::model::EmailAddress;
use sqlx::sqlite::SqliteRow;

#[async_trait]
impl ReadTable for Empleado {
    type Criteria = ();

    const ENTITY: &'static str = "Empleado";
    const TABLE: &'static str = "empleados";
    const COLUMNS: &'static str =
        "nombre, apellido1, apellido2, dni_nie, telefono, email, tipo_empleado_id";

    fn from_row(row: &SqliteRow) -> DbResult<Self> {
        let email = match get::<Option<String>>(row, "email")? {
            Some(email) => Some(EmailAddress::new(email)?),
            None => None,
        };
        Ok(Empleado {
            nombre: get(row, "nombre")?,
            apellido1: get(row, "apellido1")?,
            apellido2: get(row, "apellido2")?,
            dni_nie: get(row, "dni_nie")?,
            telefono: get(row, "telefono")?,
            email,
            tipo_empleado_id: get(row, "tipo_empleado_id")?,
        })
    }
}

#[async_trait]
impl WriteTable for Empleado {
    type Insert = NewEmpleado;

    async fn insert(ex: &mut Executor, data: &NewEmpleado) -> DbResult<EntityId> {
        let query_str = "
            INSERT INTO empleados
                (nombre, apellido1, apellido2, dni_nie, telefono, email, tipo_empleado_id,
                password)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        ";
        let empleado = &data.empleado;
        let done = sqlx::query(query_str)
            .bind(&empleado.nombre)
            .bind(&empleado.apellido1)
            .bind(&empleado.apellido2)
            .bind(&empleado.dni_nie)
            .bind(&empleado.telefono)
            .bind(empleado.email.as_ref().map(EmailAddress::as_str))
            .bind(empleado.tipo_empleado_id)
            .bind(data.hash.as_str())
            .execute(ex.conn())
            .await
            .map_err(map_sqlx_error)?;
        inserted_id(done)
    }

    async fn update(ex: &mut Executor, id: EntityId, data: &Empleado) -> DbResult<()> {
        let query_str = "
            UPDATE empleados
            SET nombre = ?, apellido1 = ?, apellido2 = ?, dni_nie = ?, telefono = ?, email = ?,
                tipo_empleado_id = ?
            WHERE id = ?
        ";
        let done = sqlx::query(query_str)
            .bind(&data.nombre)
            .bind(&data.apellido1)
            .bind(&data.apellido2)
            .bind(&data.dni_nie)
            .bind(&data.telefono)
            .bind(data.email.as_ref().map(EmailAddress::as_str))
            .bind(data.tipo_empleado_id)
            .bind(id.as_i64())
            .execute(ex.conn())
            .await
            .map_err(map_sqlx_error)?;
        expect_one_row(done)
    }
}

/// Gets the employee `id` along with its password hash.
pub(crate) async fn get_empleado_with_password(
    ex: &mut Executor,
    id: EntityId,
) -> DbResult<(Record<Empleado>, HashedPassword)> {
    let query_str = format!("SELECT id, {}, password FROM empleados WHERE id = ?", Empleado::COLUMNS);
    let row = sqlx::query(&query_str)
        .bind(id.as_i64())
        .fetch_one(ex.conn())
        .await
        .map_err(map_sqlx_error)?;
    let record = Record::new(get_id(&row, "id")?, Empleado::from_row(&row)?);
    let hash = HashedPassword::new(get::<String>(&row, "password")?);
    Ok((record, hash))
}
