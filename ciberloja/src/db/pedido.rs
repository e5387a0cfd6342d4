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

//! Persistence of orders and their lines.

use crate::db::{Filter, ReadTable, WriteTable, expect_one_row, get, get_id, inserted_id};
use crate::model::{EntityId, LineaPedido, Pedido, PedidoCriteria, date_from_db, date_to_db};
use async_trait::async_trait;
use ciberloja_core::db::sqlite::map_sqlx_error;
use ciberloja_core::db::{DbResult, Executor};
use sqlx::sqlite::SqliteRow;

/// Stores the `lineas` of the order `pedido_id`, numbering them in sequence.
async fn put_lineas(ex: &mut Executor, pedido_id: EntityId, lineas: &[LineaPedido]) -> DbResult<()> {
    let query_str = "
        INSERT INTO lineas_pedido (pedido_id, linea, producto_id, unidades, precio)
        VALUES (?, ?, ?, ?, ?)
    ";
    for (num, linea) in (1_i64..).zip(lineas) {
        sqlx::query(query_str)
            .bind(pedido_id.as_i64())
            .bind(num)
            .bind(linea.producto_id.as_i64())
            .bind(linea.unidades)
            .bind(linea.precio)
            .execute(ex.conn())
            .await
            .map_err(map_sqlx_error)?;
    }
    Ok(())
}

#[async_trait]
impl ReadTable for Pedido {
    type Criteria = PedidoCriteria;

    const ENTITY: &'static str = "Pedido";
    const TABLE: &'static str = "pedidos";
    const COLUMNS: &'static str = "fecha_realizacion, precio, cliente_id, tipo_estado_pedido_id";

    fn from_row(row: &SqliteRow) -> DbResult<Self> {
        Ok(Pedido::from_db(
            date_from_db(get(row, "fecha_realizacion")?)?,
            get(row, "precio")?,
            get_id(row, "cliente_id")?,
            get(row, "tipo_estado_pedido_id")?,
        ))
    }

    fn filter(criteria: &PedidoCriteria) -> Filter {
        let mut filter = Filter::default();
        filter
            .equal("id", criteria.id.map(EntityId::as_i64))
            .at_least("fecha_realizacion", criteria.fecha_desde.map(date_to_db))
            .at_most("fecha_realizacion", criteria.fecha_hasta.map(date_to_db))
            .at_least("precio", criteria.precio_desde)
            .at_most("precio", criteria.precio_hasta)
            .equal("cliente_id", criteria.cliente_id.map(EntityId::as_i64))
            .equal("tipo_estado_pedido_id", criteria.tipo_estado_pedido_id);
        filter
    }

    async fn load_children(ex: &mut Executor, id: EntityId, data: Self) -> DbResult<Self> {
        let query_str = "
            SELECT producto_id, unidades, precio
            FROM lineas_pedido
            WHERE pedido_id = ?
            ORDER BY linea
        ";
        let rows = sqlx::query(query_str)
            .bind(id.as_i64())
            .fetch_all(ex.conn())
            .await
            .map_err(map_sqlx_error)?;
        let mut lineas = Vec::with_capacity(rows.len());
        for row in rows {
            lineas.push(LineaPedido {
                producto_id: get_id(&row, "producto_id")?,
                unidades: get(&row, "unidades")?,
                precio: get(&row, "precio")?,
            });
        }
        Ok(data.with_lineas(lineas))
    }
}

#[async_trait]
impl WriteTable for Pedido {
    type Insert = Pedido;

    async fn insert(ex: &mut Executor, data: &Pedido) -> DbResult<EntityId> {
        let query_str = "
            INSERT INTO pedidos (fecha_realizacion, precio, cliente_id, tipo_estado_pedido_id)
            VALUES (?, ?, ?, ?)
        ";
        let done = sqlx::query(query_str)
            .bind(date_to_db(data.fecha_realizacion()))
            .bind(data.precio())
            .bind(data.cliente_id().as_i64())
            .bind(data.tipo_estado_pedido_id())
            .execute(ex.conn())
            .await
            .map_err(map_sqlx_error)?;
        let id = inserted_id(done)?;
        put_lineas(ex, id, data.lineas()).await?;
        Ok(id)
    }

    async fn update(ex: &mut Executor, id: EntityId, data: &Pedido) -> DbResult<()> {
        let query_str = "
            UPDATE pedidos
            SET fecha_realizacion = ?, precio = ?, cliente_id = ?, tipo_estado_pedido_id = ?
            WHERE id = ?
        ";
        let done = sqlx::query(query_str)
            .bind(date_to_db(data.fecha_realizacion()))
            .bind(data.precio())
            .bind(data.cliente_id().as_i64())
            .bind(data.tipo_estado_pedido_id())
            .bind(id.as_i64())
            .execute(ex.conn())
            .await
            .map_err(map_sqlx_error)?;
        expect_one_row(done)?;

        sqlx::query("DELETE FROM lineas_pedido WHERE pedido_id = ?")
            .bind(id.as_i64())
            .execute(ex.conn())
            .await
            .map_err(map_sqlx_error)?;
        put_lineas(ex, id, data.lineas()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testutils::*;
    use crate::model::{PageRequest, Producto, Record};
    use ciberloja_core::db::DbError;
    use time::macros::date;

    /// Creates a cliente and two productos and returns their identifiers.
    async fn setup_refs(ex: &mut Executor) -> (EntityId, EntityId, EntityId) {
        let cliente = insert_cliente(ex, cliente("ana", "ana@example.com"), "x").await;
        let p1 = Producto::insert(ex, &producto("Cafe", 2.0, 5)).await.unwrap();
        let p2 = Producto::insert(ex, &producto("Te", 1.0, 5)).await.unwrap();
        (cliente, p1, p2)
    }

    #[tokio::test]
    async fn test_pedido_round_trip_with_lines() {
        let context = DbTestContext::setup().await;
        let mut ex = context.ex().await;
        let (cliente, p1, p2) = setup_refs(&mut ex).await;

        let pedido = pedido(date!(2024 - 03 - 10), cliente, &[(p2, 1, 1.0), (p1, 3, 6.0)]);
        let id = Pedido::insert(&mut ex, &pedido).await.unwrap();

        let record = Pedido::get(&mut ex, id).await.unwrap();
        assert_eq!(Record::new(id, pedido), record);
        assert_eq!(7.0, record.data.precio());
        assert_eq!(p2, record.data.lineas()[0].producto_id);
    }

    #[tokio::test]
    async fn test_pedido_invalid_references() {
        let context = DbTestContext::setup().await;
        let mut ex = context.ex().await;
        let (cliente, p1, _) = setup_refs(&mut ex).await;

        let bad_cliente = pedido(date!(2024 - 03 - 10), EntityId::from(999), &[(p1, 1, 1.0)]);
        assert_eq!(
            DbError::InvalidReference,
            Pedido::insert(&mut ex, &bad_cliente).await.unwrap_err()
        );

        let bad_producto = pedido(date!(2024 - 03 - 10), cliente, &[(EntityId::from(999), 1, 1.0)]);
        assert_eq!(
            DbError::InvalidReference,
            Pedido::insert(&mut ex, &bad_producto).await.unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_pedido_update_replaces_lines() {
        let context = DbTestContext::setup().await;
        let mut ex = context.ex().await;
        let (cliente, p1, p2) = setup_refs(&mut ex).await;

        let id = Pedido::insert(
            &mut ex,
            &pedido(date!(2024 - 03 - 10), cliente, &[(p1, 1, 2.0), (p2, 1, 1.0)]),
        )
        .await
        .unwrap();

        let updated = pedido(date!(2024 - 03 - 11), cliente, &[(p2, 4, 4.0)]);
        Pedido::update(&mut ex, id, &updated).await.unwrap();
        assert_eq!(updated, Pedido::get(&mut ex, id).await.unwrap().data);

        Pedido::delete(&mut ex, id).await.unwrap();
        assert_eq!(DbError::NotFound, Pedido::update(&mut ex, id, &updated).await.unwrap_err());
    }

    #[tokio::test]
    async fn test_pedido_find_by_date_and_cliente() {
        let context = DbTestContext::setup().await;
        let mut ex = context.ex().await;
        let (cliente1, p1, _) = setup_refs(&mut ex).await;
        let cliente2 = insert_cliente(&mut ex, cliente("juan", "juan@example.com"), "x").await;

        let a = Pedido::insert(&mut ex, &pedido(date!(2024 - 01 - 01), cliente1, &[(p1, 1, 1.0)]))
            .await
            .unwrap();
        let b = Pedido::insert(&mut ex, &pedido(date!(2024 - 02 - 01), cliente2, &[(p1, 1, 5.0)]))
            .await
            .unwrap();
        let c = Pedido::insert(&mut ex, &pedido(date!(2024 - 03 - 01), cliente1, &[(p1, 1, 9.0)]))
            .await
            .unwrap();

        let criteria = PedidoCriteria {
            fecha_desde: Some(date!(2024 - 01 - 01)),
            fecha_hasta: Some(date!(2024 - 02 - 01)),
            ..Default::default()
        };
        let found = Pedido::find(&mut ex, &criteria, &PageRequest::all()).await.unwrap();
        assert_eq!(vec![a, b], found.items.iter().map(|r| r.id).collect::<Vec<_>>());

        let criteria = PedidoCriteria { cliente_id: Some(cliente1), ..Default::default() };
        let found = Pedido::find(&mut ex, &criteria, &PageRequest::all()).await.unwrap();
        assert_eq!(vec![a, c], found.items.iter().map(|r| r.id).collect::<Vec<_>>());

        let criteria = PedidoCriteria { precio_desde: Some(5.0), ..Default::default() };
        let found = Pedido::find(&mut ex, &criteria, &PageRequest::all()).await.unwrap();
        assert_eq!(2, found.total);
        assert_eq!(1, found.items[0].data.lineas().len());
    }
}
