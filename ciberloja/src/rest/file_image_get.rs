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

//! API to serve one image of a producto.

use crate::driver::Driver;
use crate::model::{EntityId, ImageName};
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use ciberloja_core::rest::{EmptyBody, PathParams, RestResult};

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    PathParams((producto_id, name)): PathParams<(EntityId, ImageName)>,
    _: EmptyBody,
) -> RestResult<Response> {
    let content_type = name.content_type().to_string();
    let content = driver.get_image(producto_id, name).await?;
    Ok(([(header::CONTENT_TYPE, content_type)], content).into_response())
}

#[cfg(test)]
mod tests {
    use crate::model::EntityId;
    use crate::rest::testutils::*;
    use axum::http;
    use ciberloja_core::rest::testutils::*;

    fn route(producto_id: EntityId, name: &str) -> (http::Method, String) {
        (http::Method::GET, format!("/api/file/image/{}/{}", producto_id, name))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;
        let id = context.create_producto("Cafe", 1.0).await;
        let urls = OneShotBuilder::new(
            context.app(),
            (http::Method::POST, format!("/api/file/upload/producto/{}", id)),
        )
        .send_multipart("file", "mi foto.png", b"pixels")
        .await
        .expect_json::<Vec<String>>()
        .await;

        let path = urls[0].strip_prefix("http://localhost:1234").unwrap();
        let (content_type, body) = OneShotBuilder::new(context.app(), (http::Method::GET, path))
            .send_empty()
            .await
            .take_body_with_type()
            .await;
        assert_eq!(Some("image/png".to_owned()), content_type);
        assert_eq!(&b"pixels"[..], &body[..]);
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup().await;
        let id = context.create_producto("Cafe", 1.0).await;

        OneShotBuilder::new(context.app(), route(id, "nada.png"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("Image nada.png not found")
            .await;
    }

    #[tokio::test]
    async fn test_invalid_name() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route(EntityId::from(1), ".secret"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("cannot start with a dot")
            .await;
    }

    test_payload_must_be_empty!(
        TestContext::setup().await.into_app(),
        route(EntityId::from(1), "foto.png")
    );
}
