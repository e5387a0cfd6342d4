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

//! Test utilities for the REST API.

use crate::db::testutils::{cliente, insert_cliente, producto};
use crate::driver::testutils::TestContext as DriverTestContext;
use crate::model::*;
use crate::rest::app;
use axum::Router;
use ciberloja_core::db::Executor;
use ciberloja_smtp::driver::testutils::RecorderSmtpMailer;

/// State of a running test.
pub(crate) struct TestContext {
    /// Context of the driver that backs the app.
    driver_context: DriverTestContext,

    /// The app under test.
    app: Router,
}

impl TestContext {
    /// Initializes the app on top of a fresh driver.
    pub(crate) async fn setup() -> Self {
        let driver_context = DriverTestContext::setup().await;
        let app = app(driver_context.driver());
        Self { driver_context, app }
    }

    /// Gets a copy of the app router.
    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    /// Consumes the context and returns the app router.
    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    /// Gets a direct executor against the database.
    pub(crate) async fn ex(&self) -> Executor {
        self.driver_context.ex().await
    }

    /// Gets the mailer that captures outgoing messages.
    pub(crate) fn mailer(&self) -> &RecorderSmtpMailer {
        &self.driver_context.mailer
    }

    /// Gets the entity `T` with identifier `id`, if it exists.
    pub(crate) async fn get<T: crate::db::ReadTable>(&self, id: EntityId) -> Option<Record<T>> {
        self.driver_context.driver().get::<T>(id).await.ok()
    }

    /// Inserts a cliente with `nickname` and `email` and a fake password.
    pub(crate) async fn insert_cliente(&self, nickname: &str, email: &str) -> EntityId {
        insert_cliente(&mut self.ex().await, cliente(nickname, email), "x").await
    }

    /// Registers a cliente with `email` and a real `password`.
    pub(crate) async fn register_cliente(&self, email: &str, password: &'static str) -> EntityId {
        let registro = crate::driver::testutils::registro("ana", email, password);
        self.driver_context.driver().register_cliente(registro).await.unwrap().id
    }

    /// Creates a producto named `nombre` with a `precio`.
    pub(crate) async fn create_producto(&self, nombre: &str, precio: f64) -> EntityId {
        self.driver_context.driver().create::<Producto>(producto(nombre, precio, 1)).await.unwrap().id
    }

    /// Creates an empleado with `dni_nie` and `password`.
    pub(crate) async fn create_empleado(&self, dni_nie: &str, password: &'static str) -> EntityId {
        let alta = EmpleadoAlta {
            empleado: crate::db::testutils::empleado(dni_nie),
            password: Password::from(password),
        };
        self.driver_context.driver().create_empleado(alta).await.unwrap().id
    }

    /// Creates a pedido for `cliente_id` with a single line of `producto_id`.
    pub(crate) async fn create_pedido(
        &self,
        cliente_id: EntityId,
        producto_id: EntityId,
        precio: f64,
    ) -> EntityId {
        let request = PedidoRequest {
            fecha_realizacion: None,
            cliente_id,
            tipo_estado_pedido_id: 1,
            lineas: vec![LineaPedido { producto_id, unidades: 1, precio }],
        };
        self.driver_context.driver().create_pedido(request).await.unwrap().id
    }

    /// Creates a localidad and its parents, returning the identifier of the localidad.
    pub(crate) async fn seed_localidad(&self) -> EntityId {
        crate::db::testutils::seed_localidad(&mut self.ex().await).await
    }

    /// Creates a `direccion`.
    pub(crate) async fn create_direccion(&self, direccion: Direccion) -> EntityId {
        self.driver_context.driver().create::<Direccion>(direccion).await.unwrap().id
    }
}
