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

//! Persistence of customers, their credentials and their password reset tokens.

use crate::db::{Filter, ReadTable, WriteTable, expect_one_row, get, get_id, inserted_id};
use crate::model::{
    Cliente, ClienteCriteria, EntityId, HashedPassword, NewCliente, Record, ResetToken,
};
use async_trait::async_trait;
use ciberloja_core::db::sqlite::{build_timestamp, map_sqlx_error, unpack_timestamp};
use ciberloja_core::db::{DbResult, Executor};
use ciberloja_core::model::EmailAddress;
use sqlx::sqlite::SqliteRow;
use time::OffsetDateTime;

#[async_trait]
impl ReadTable for Cliente {
    type Criteria = ClienteCriteria;

    const ENTITY: &'static str = "Cliente";
    const TABLE: &'static str = "clientes";
    const COLUMNS: &'static str =
        "nickname, nombre, apellido1, apellido2, dni_nie, telefono, email, rol_id";

    fn from_row(row: &SqliteRow) -> DbResult<Self> {
        Ok(Cliente {
            nickname: get(row, "nickname")?,
            nombre: get(row, "nombre")?,
            apellido1: get(row, "apellido1")?,
            apellido2: get(row, "apellido2")?,
            dni_nie: get(row, "dni_nie")?,
            telefono: get(row, "telefono")?,
            email: EmailAddress::new(get::<String>(row, "email")?)?,
            rol_id: get(row, "rol_id")?,
        })
    }

    fn filter(criteria: &ClienteCriteria) -> Filter {
        let mut filter = Filter::default();
        filter
            .contains("nickname", criteria.nickname.as_ref())
            .contains("nombre", criteria.nombre.as_ref())
            .contains("email", criteria.email.as_ref())
            .contains("dni_nie", criteria.dni_nie.as_ref())
            .contains("telefono", criteria.telefono.as_ref());
        filter
    }
}

#[async_trait]
impl WriteTable for Cliente {
    type Insert = NewCliente;

    async fn insert(ex: &mut Executor, data: &NewCliente) -> DbResult<EntityId> {
        let query_str = "
            INSERT INTO clientes
                (nickname, nombre, apellido1, apellido2, dni_nie, telefono, email, rol_id,
                password)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        ";
        let cliente = &data.cliente;
        let done = sqlx::query(query_str)
            .bind(&cliente.nickname)
            .bind(&cliente.nombre)
            .bind(&cliente.apellido1)
            .bind(&cliente.apellido2)
            .bind(&cliente.dni_nie)
            .bind(&cliente.telefono)
            .bind(cliente.email.as_str())
            .bind(cliente.rol_id)
            .bind(data.hash.as_str())
            .execute(ex.conn())
            .await
            .map_err(map_sqlx_error)?;
        inserted_id(done)
    }

    async fn update(ex: &mut Executor, id: EntityId, data: &Cliente) -> DbResult<()> {
        let query_str = "
            UPDATE clientes
            SET nickname = ?, nombre = ?, apellido1 = ?, apellido2 = ?, dni_nie = ?,
                telefono = ?, email = ?, rol_id = ?
            WHERE id = ?
        ";
        let done = sqlx::query(query_str)
            .bind(&data.nickname)
            .bind(&data.nombre)
            .bind(&data.apellido1)
            .bind(&data.apellido2)
            .bind(&data.dni_nie)
            .bind(&data.telefono)
            .bind(data.email.as_str())
            .bind(data.rol_id)
            .bind(id.as_i64())
            .execute(ex.conn())
            .await
            .map_err(map_sqlx_error)?;
        expect_one_row(done)
    }
}

/// Gets the customer with `email` along with its password hash.
pub(crate) async fn get_cliente_with_password(
    ex: &mut Executor,
    email: &EmailAddress,
) -> DbResult<(Record<Cliente>, HashedPassword)> {
    let query_str = format!("SELECT id, {}, password FROM clientes WHERE email = ?", Cliente::COLUMNS);
    let row = sqlx::query(&query_str)
        .bind(email.as_str())
        .fetch_one(ex.conn())
        .await
        .map_err(map_sqlx_error)?;
    let record = Record::new(get_id(&row, "id")?, Cliente::from_row(&row)?);
    let hash = HashedPassword::new(get::<String>(&row, "password")?);
    Ok((record, hash))
}

/// Replaces the password hash of the customer `id`.
pub(crate) async fn update_cliente_password(
    ex: &mut Executor,
    id: EntityId,
    hash: &HashedPassword,
) -> DbResult<()> {
    let done = sqlx::query("UPDATE clientes SET password = ? WHERE id = ?")
        .bind(hash.as_str())
        .bind(id.as_i64())
        .execute(ex.conn())
        .await
        .map_err(map_sqlx_error)?;
    expect_one_row(done)
}

/// Stores a password reset `token` for the customer `cliente_id` that is valid until `expires`.
pub(crate) async fn put_reset_token(
    ex: &mut Executor,
    token: &ResetToken,
    cliente_id: EntityId,
    expires: OffsetDateTime,
) -> DbResult<()> {
    let (expires_sec, expires_nsec) = unpack_timestamp(expires)?;
    let query_str = "
        INSERT INTO password_reset_tokens (token, cliente_id, expires_sec, expires_nsec)
        VALUES (?, ?, ?, ?)
    ";
    sqlx::query(query_str)
        .bind(token.as_str())
        .bind(cliente_id.as_i64())
        .bind(expires_sec)
        .bind(expires_nsec)
        .execute(ex.conn())
        .await
        .map_err(map_sqlx_error)?;
    Ok(())
}

/// Deletes the password reset `token` and returns the customer it belonged to and its expiration
/// time.
pub(crate) async fn take_reset_token(
    ex: &mut Executor,
    token: &ResetToken,
) -> DbResult<(EntityId, OffsetDateTime)> {
    let query_str = "
        DELETE FROM password_reset_tokens
        WHERE token = ?
        RETURNING cliente_id, expires_sec, expires_nsec
    ";
    let row = sqlx::query(query_str)
        .bind(token.as_str())
        .fetch_one(ex.conn())
        .await
        .map_err(map_sqlx_error)?;
    let cliente_id = get_id(&row, "cliente_id")?;
    let expires = build_timestamp(get(&row, "expires_sec")?, get(&row, "expires_nsec")?)?;
    Ok((cliente_id, expires))
}
