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

//! Test utilities for the database layer.

use crate::db::{WriteTable, init_schema};
use crate::model::*;
use ciberloja_core::db::sqlite::{self, SqliteDb};
use ciberloja_core::db::{Db, Executor};
use ciberloja_core::model::EmailAddress;
use time::Date;

/// Container for the state required to run a database test.
pub(crate) struct DbTestContext {
    /// The database under test.
    db: SqliteDb,
}

impl DbTestContext {
    /// Creates an empty in-memory database with the schema applied.
    pub(crate) async fn setup() -> Self {
        let db = sqlite::testutils::setup().await;
        init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        Self { db }
    }

    /// Obtains an executor to run queries directly against the database.
    pub(crate) async fn ex(&self) -> Executor {
        self.db.ex().await.unwrap()
    }
}

/// Creates a cliente with fixed values except for the given ones.
pub(crate) fn cliente(nickname: &str, email: &str) -> Cliente {
    Cliente {
        nickname: nickname.to_owned(),
        nombre: "Nombre".to_owned(),
        apellido1: "Apellido".to_owned(),
        apellido2: None,
        dni_nie: "12345678Z".to_owned(),
        telefono: "600000000".to_owned(),
        email: EmailAddress::from(email),
        rol_id: ROL_CLIENTE,
    }
}

/// Creates an empleado with fixed values except for the given ones.
pub(crate) fn empleado(dni_nie: &str) -> Empleado {
    Empleado {
        nombre: "Luis".to_owned(),
        apellido1: "Perez".to_owned(),
        apellido2: None,
        dni_nie: dni_nie.to_owned(),
        telefono: None,
        email: None,
        tipo_empleado_id: 1,
    }
}

/// Creates a producto with fixed values except for the given ones.
pub(crate) fn producto(nombre: &str, precio: f64, stock_disponible: i64) -> Producto {
    Producto {
        nombre: nombre.to_owned(),
        descripcion: None,
        precio,
        stock_disponible,
        id_categoria: 1,
        id_marca: 1,
        id_unidad_medida: 1,
    }
}

/// Creates a pedido placed on `fecha` by `cliente_id` with the `(producto, unidades, precio)`
/// `lineas`.
pub(crate) fn pedido(fecha: Date, cliente_id: EntityId, lineas: &[(EntityId, i64, f64)]) -> Pedido {
    let lineas = lineas
        .iter()
        .map(|(producto_id, unidades, precio)| LineaPedido {
            producto_id: *producto_id,
            unidades: *unidades,
            precio: *precio,
        })
        .collect();
    Pedido::new(fecha, cliente_id, 1, lineas).unwrap()
}

/// Creates a direccion in `localidad_id`, optionally owned by `cliente_id`.
pub(crate) fn direccion(localidad_id: EntityId, cliente_id: Option<EntityId>) -> Direccion {
    Direccion {
        nombre_via: "Calle".to_owned(),
        dir_via: "Mayor 1".to_owned(),
        localidad_id,
        cliente_id,
        empleado_id: None,
    }
}

/// Inserts `cliente` with a fake password `hash`.
pub(crate) async fn insert_cliente(ex: &mut Executor, cliente: Cliente, hash: &str) -> EntityId {
    Cliente::insert(ex, &NewCliente { cliente, hash: HashedPassword::new(hash) }).await.unwrap()
}

/// Inserts `empleado` with a fake password `hash`.
pub(crate) async fn insert_empleado(ex: &mut Executor, empleado: Empleado, hash: &str) -> EntityId {
    Empleado::insert(ex, &NewEmpleado { empleado, hash: HashedPassword::new(hash) }).await.unwrap()
}

/// Runs an insertion `query` that takes a name and, optionally, a parent identifier.
async fn insert_named(
    ex: &mut Executor,
    query: &str,
    nombre: &str,
    parent: Option<EntityId>,
) -> EntityId {
    let mut query = sqlx::query(query).bind(nombre);
    if let Some(parent) = parent {
        query = query.bind(parent.as_i64());
    }
    let done = query.execute(ex.conn()).await.unwrap();
    EntityId::new(done.last_insert_rowid()).unwrap()
}

/// Inserts a pais.
pub(crate) async fn insert_pais(ex: &mut Executor, nombre: &str) -> EntityId {
    insert_named(ex, "INSERT INTO paises (nombre) VALUES (?)", nombre, None).await
}

/// Inserts a provincia of `pais`.
pub(crate) async fn insert_provincia(ex: &mut Executor, nombre: &str, pais: EntityId) -> EntityId {
    insert_named(ex, "INSERT INTO provincias (nombre, pais_id) VALUES (?, ?)", nombre, Some(pais))
        .await
}

/// Inserts a localidad of `provincia`.
pub(crate) async fn insert_localidad(
    ex: &mut Executor,
    nombre: &str,
    codigo_postal: Option<&str>,
    provincia: EntityId,
) -> EntityId {
    let done = sqlx::query(
        "INSERT INTO localidades (nombre, codigo_postal, provincia_id) VALUES (?, ?, ?)",
    )
    .bind(nombre)
    .bind(codigo_postal)
    .bind(provincia.as_i64())
    .execute(ex.conn())
    .await
    .unwrap();
    EntityId::new(done.last_insert_rowid()).unwrap()
}

/// Inserts a distrito.
pub(crate) async fn insert_distrito(ex: &mut Executor, nombre: &str) -> EntityId {
    insert_named(ex, "INSERT INTO distritos (nombre) VALUES (?)", nombre, None).await
}

/// Inserts a concelho of `distrito`.
pub(crate) async fn insert_concelho(ex: &mut Executor, nombre: &str, distrito: EntityId) -> EntityId {
    insert_named(ex, "INSERT INTO concelhos (nombre, distrito_id) VALUES (?, ?)", nombre, Some(distrito))
        .await
}

/// Inserts a freguesia of `concelho`.
pub(crate) async fn insert_freguesia(
    ex: &mut Executor,
    nombre: &str,
    concelho: EntityId,
) -> EntityId {
    insert_named(
        ex,
        "INSERT INTO freguesias (nombre, concelho_id) VALUES (?, ?)",
        nombre,
        Some(concelho),
    )
    .await
}

/// Inserts a pais, a provincia and a localidad, and returns the identifier of the latter.
pub(crate) async fn seed_localidad(ex: &mut Executor) -> EntityId {
    let pais = insert_pais(ex, "Espana").await;
    let provincia = insert_provincia(ex, "Madrid", pais).await;
    insert_localidad(ex, "Madrid", Some("28001"), provincia).await
}
