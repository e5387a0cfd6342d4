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

//! Entry point to the REST server.

use crate::driver::Driver;
use crate::model::*;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use tower_http::cors::CorsLayer;

mod cliente_autenticar_post;
mod cliente_forgot_password_post;
mod cliente_registrar_post;
mod cliente_reset_password_post;
mod cliente_update_post;
mod direccion_create_post;
mod empleado_autenticar_post;
mod empleado_create_post;
mod entity_delete;
mod entity_find_all_get;
mod entity_find_get;
mod entity_search_get;
mod entity_update;
mod file_image_get;
mod file_producto_get;
mod file_producto_images_get;
mod file_upload_post;
mod payloads;
mod pedido_create_post;
mod pedido_update_put;
mod pedidos_cliente_get;
mod producto_create_post;
mod producto_update_put;
#[cfg(test)]
mod testutils;

/// Maximum size of an image upload request.
const MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024;

/// Creates the routes of the read-only geography entity `T` under `prefix`.
fn geo_routes<T>(router: Router<Driver>, prefix: &str) -> Router<Driver>
where
    T: crate::db::ReadTable + serde::Serialize,
{
    use axum::routing::get;
    router
        .route(&format!("/{}/findAll", prefix), get(entity_find_all_get::handler::<T>))
        .route(&format!("/{}/find/:id", prefix), get(entity_find_get::handler::<T>))
}

/// Creates the routes under `/api`.
fn api() -> Router<Driver> {
    use axum::routing::{delete, get, post, put};

    let router = Router::new()
        .route("/cliente/find/:id", get(entity_find_get::handler::<Cliente>))
        .route("/cliente/findAll", get(entity_find_all_get::handler::<Cliente>))
        .route("/cliente/search", get(entity_search_get::handler::<Cliente>))
        .route("/cliente/registrar", post(cliente_registrar_post::handler))
        .route("/cliente/autenticar", post(cliente_autenticar_post::handler))
        .route("/cliente/update", post(cliente_update_post::handler))
        .route("/cliente/delete", delete(entity_delete::query_handler::<Cliente>))
        .route("/cliente/forgot-password", post(cliente_forgot_password_post::handler))
        .route("/cliente/reset-password", post(cliente_reset_password_post::handler));

    let router = router
        .route("/empleado/find/:id", get(entity_find_get::handler::<Empleado>))
        .route("/empleado/findAll", get(entity_find_all_get::handler::<Empleado>))
        .route("/empleado/autenticar", post(empleado_autenticar_post::handler))
        .route("/empleado/create", post(empleado_create_post::handler))
        .route("/empleado/update", put(entity_update::handler::<Empleado>))
        .route("/empleado/delete", delete(entity_delete::query_handler::<Empleado>));

    let router = router
        .route("/producto/:id", get(entity_find_get::handler::<Producto>))
        .route("/producto/findAll", get(entity_find_all_get::handler::<Producto>))
        .route("/producto/search", get(entity_search_get::handler::<Producto>))
        .route("/producto/create", post(producto_create_post::handler))
        .route("/producto/update/:id", put(producto_update_put::handler))
        .route("/producto/delete/:id", delete(entity_delete::path_handler::<Producto>));

    let router = router
        .route("/pedido", get(entity_search_get::handler::<Pedido>))
        .route("/pedido/:id", get(entity_find_get::handler::<Pedido>))
        .route("/pedido/findAll", get(entity_find_all_get::handler::<Pedido>))
        .route("/pedido/cliente/:cliente_id", get(pedidos_cliente_get::handler))
        .route("/pedido/create", post(pedido_create_post::handler))
        .route("/pedido/update", put(pedido_update_put::handler))
        .route("/pedido/delete", delete(entity_delete::query_handler::<Pedido>));

    let router = router
        .route("/direccion/find/:id", get(entity_find_get::handler::<Direccion>))
        .route("/direccion/findAll", get(entity_find_all_get::handler::<Direccion>))
        .route("/direccion/create", post(direccion_create_post::handler))
        .route("/direccion/update", put(entity_update::handler::<Direccion>))
        .route("/direccion/delete", delete(entity_delete::query_handler::<Direccion>));

    let router = geo_routes::<Pais>(router, "pais");
    let router = geo_routes::<Provincia>(router, "provincia");
    let router = geo_routes::<Localidad>(router, "localidad");
    let router = geo_routes::<Distrito>(router, "distrito");
    let router = geo_routes::<Concelho>(router, "concelho");
    let router = geo_routes::<Freguesia>(router, "freguesia");

    router
        .route(
            "/file/upload/producto/:producto_id",
            post(file_upload_post::handler).layer(DefaultBodyLimit::max(MAX_UPLOAD_SIZE)),
        )
        .route("/file/producto/:producto_id", get(file_producto_get::handler))
        .route("/file/producto/:producto_id/images", get(file_producto_images_get::handler))
        .route("/file/image/:producto_id/:name", get(file_image_get::handler))
}

/// Creates the router for the application.
pub(crate) fn app(driver: Driver) -> Router {
    Router::new().nest("/api", api()).layer(CorsLayer::permissive()).with_state(driver)
}
