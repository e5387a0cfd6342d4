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

//! API to get the main image of a producto.

use crate::driver::Driver;
use crate::model::EntityId;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use ciberloja_core::rest::{EmptyBody, PathParams, RestResult};

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    PathParams(producto_id): PathParams<EntityId>,
    _: EmptyBody,
) -> RestResult<Response> {
    match driver.first_image(producto_id).await? {
        Some((name, content)) => {
            Ok(([(header::CONTENT_TYPE, name.content_type().to_string())], content).into_response())
        }
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}
