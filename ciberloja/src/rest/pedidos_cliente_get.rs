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

//! API to list the pedidos of a cliente.

use crate::driver::Driver;
use crate::model::EntityId;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ciberloja_core::rest::{EmptyBody, PathParams, RestResult};

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    PathParams(cliente_id): PathParams<EntityId>,
    _: EmptyBody,
) -> RestResult<Response> {
    let pedidos = driver.pedidos_by_cliente(cliente_id).await?;
    if pedidos.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    Ok(Json(pedidos).into_response())
}

#[cfg(test)]
mod tests {
    use crate::model::*;
    use crate::rest::testutils::*;
    use axum::http;
    use ciberloja_core::rest::testutils::*;

    fn route(cliente_id: EntityId) -> (http::Method, String) {
        (http::Method::GET, format!("/api/pedido/cliente/{}", cliente_id))
    }

    #[tokio::test]
    async fn test_some() {
        let context = TestContext::setup().await;
        let ana = context.insert_cliente("ana", "ana@example.com").await;
        let luis = context.insert_cliente("luis", "luis@example.com").await;
        let cafe = context.create_producto("Cafe", 1.5).await;
        let p1 = context.create_pedido(ana, cafe, 1.5).await;
        context.create_pedido(luis, cafe, 3.0).await;
        let p3 = context.create_pedido(ana, cafe, 4.5).await;

        let response = OneShotBuilder::new(context.app(), route(ana))
            .send_empty()
            .await
            .expect_json::<Vec<Record<Pedido>>>()
            .await;
        assert_eq!(vec![p1, p3], response.iter().map(|r| r.id).collect::<Vec<_>>());
        assert!(response.iter().all(|r| r.data.cliente_id() == ana));
    }

    #[tokio::test]
    async fn test_none() {
        let context = TestContext::setup().await;
        let ana = context.insert_cliente("ana", "ana@example.com").await;

        for cliente_id in [ana, EntityId::from(100)] {
            OneShotBuilder::new(context.app(), route(cliente_id))
                .send_empty()
                .await
                .expect_status(http::StatusCode::NO_CONTENT)
                .expect_empty()
                .await;
        }
    }

    #[tokio::test]
    async fn test_bad_id() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), (http::Method::GET, "/api/pedido/cliente/x"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("Cannot parse")
            .await;
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route(EntityId::from(1)));
}
