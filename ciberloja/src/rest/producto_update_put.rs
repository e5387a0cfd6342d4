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

//! API to replace the contents of a producto.

use crate::driver::Driver;
use crate::model::{EntityId, Producto, ProductoUpdate, Record};
use axum::Json;
use axum::extract::State;
use ciberloja_core::rest::{JsonBody, PathParams, RestError, RestResult};

/// PUT handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    PathParams(id): PathParams<EntityId>,
    JsonBody(update): JsonBody<ProductoUpdate>,
) -> RestResult<Json<Record<Producto>>> {
    if let Some(body_id) = update.id {
        if body_id != id {
            return Err(RestError::InvalidRequest(format!(
                "Producto id {} in the body does not match id {} in the path",
                body_id, id
            )));
        }
    }

    let record = driver.update(id, update.producto).await?;
    Ok(Json(record))
}
