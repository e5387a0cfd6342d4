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

//! API to authenticate a cliente.

use crate::driver::Driver;
use crate::model::{Cliente, Record};
use crate::rest::payloads::ClienteCredentials;
use axum::Json;
use axum::extract::State;
use ciberloja_core::rest::{JsonBody, RestResult};

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    JsonBody(credentials): JsonBody<ClienteCredentials>,
) -> RestResult<Json<Record<Cliente>>> {
    let record = driver.autenticar_cliente(credentials.email, credentials.password).await?;
    Ok(Json(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::testutils::*;
    use axum::http;
    use ciberloja_core::model::EmailAddress;
    use ciberloja_core::rest::testutils::*;

    fn route() -> (http::Method, String) {
        (http::Method::POST, "/api/cliente/autenticar".to_owned())
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;
        let id = context.register_cliente("ana@example.com", "secreto").await;

        let request = ClienteCredentials {
            email: EmailAddress::from("ana@example.com"),
            password: "secreto".into(),
        };
        let response = OneShotBuilder::new(context.app(), route())
            .send_json(request)
            .await
            .expect_json::<Record<Cliente>>()
            .await;
        assert_eq!(id, response.id);
        assert_eq!("ana@example.com", response.data.email.as_str());
    }

    #[tokio::test]
    async fn test_bad_password() {
        let context = TestContext::setup().await;
        context.register_cliente("ana@example.com", "secreto").await;

        let request = ClienteCredentials {
            email: EmailAddress::from("ana@example.com"),
            password: "otra".into(),
        };
        OneShotBuilder::new(context.app(), route())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::UNAUTHORIZED)
            .expect_error("Invalid email or password")
            .await;
    }

    #[tokio::test]
    async fn test_unknown_email() {
        let context = TestContext::setup().await;

        let request = ClienteCredentials {
            email: EmailAddress::from("nadie@example.com"),
            password: "secreto".into(),
        };
        OneShotBuilder::new(context.app(), route())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::UNAUTHORIZED)
            .expect_error("Invalid email or password")
            .await;
    }

    #[tokio::test]
    async fn test_empty_password() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .send_json(serde_json::json!({"email": "ana@example.com", "password": ""}))
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("Password cannot be empty")
            .await;
    }

    test_payload_must_be_json!(TestContext::setup().await.into_app(), route());
}
