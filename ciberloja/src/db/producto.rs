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

//! Persistence of products.

use crate::db::{Filter, ReadTable, WriteTable, expect_one_row, get, inserted_id};
use crate::model::{EntityId, Producto, ProductoCriteria};
use async_trait::async_trait;
use ciberloja_core::db::sqlite::map_sqlx_error;
use ciberloja_core::db::{DbResult, Executor};
use sqlx::sqlite::SqliteRow;

#[async_trait]
impl ReadTable for Producto {
    type Criteria = ProductoCriteria;

    const ENTITY: &'static str = "Producto";
    const TABLE: &'static str = "productos";
    const COLUMNS: &'static str =
        "nombre, descripcion, precio, stock_disponible, id_categoria, id_marca, id_unidad_medida";

    fn from_row(row: &SqliteRow) -> DbResult<Self> {
        Ok(Producto {
            nombre: get(row, "nombre")?,
            descripcion: get(row, "descripcion")?,
            precio: get(row, "precio")?,
            stock_disponible: get(row, "stock_disponible")?,
            id_categoria: get(row, "id_categoria")?,
            id_marca: get(row, "id_marca")?,
            id_unidad_medida: get(row, "id_unidad_medida")?,
        })
    }

    fn filter(criteria: &ProductoCriteria) -> Filter {
        let mut filter = Filter::default();
        filter
            .equal("id", criteria.id.map(EntityId::as_i64))
            .contains("nombre", criteria.nombre.as_ref())
            .contains("descripcion", criteria.descripcion.as_ref())
            .at_least("precio", criteria.precio_min)
            .at_most("precio", criteria.precio_max)
            .at_least("stock_disponible", criteria.stock_min)
            .at_most("stock_disponible", criteria.stock_max)
            .equal("id_categoria", criteria.id_categoria)
            .equal("id_marca", criteria.id_marca)
            .equal("id_unidad_medida", criteria.id_unidad_medida);
        filter
    }
}

#[async_trait]
impl WriteTable for Producto {
    type Insert = Producto;

    async fn insert(ex: &mut Executor, data: &Producto) -> DbResult<EntityId> {
        let query_str = "
            INSERT INTO productos
                (nombre, descripcion, precio, stock_disponible,
                id_categoria, id_marca, id_unidad_medida)
            VALUES (?, ?, ?, ?, ?, ?, ?)
        ";
        let done = sqlx::query(query_str)
            .bind(&data.nombre)
            .bind(&data.descripcion)
            .bind(data.precio)
            .bind(data.stock_disponible)
            .bind(data.id_categoria)
            .bind(data.id_marca)
            .bind(data.id_unidad_medida)
            .execute(ex.conn())
            .await
            .map_err(map_sqlx_error)?;
        inserted_id(done)
    }

    async fn update(ex: &mut Executor, id: EntityId, data: &Producto) -> DbResult<()> {
        let query_str = "
            UPDATE productos
            SET nombre = ?, descripcion = ?, precio = ?, stock_disponible = ?,
                id_categoria = ?, id_marca = ?, id_unidad_medida = ?
            WHERE id = ?
        ";
        let done = sqlx::query(query_str)
            .bind(&data.nombre)
            .bind(&data.descripcion)
            .bind(data.precio)
            .bind(data.stock_disponible)
            .bind(data.id_categoria)
            .bind(data.id_marca)
            .bind(data.id_unidad_medida)
            .bind(id.as_i64())
            .execute(ex.conn())
            .await
            .map_err(map_sqlx_error)?;
        expect_one_row(done)
    }
}
