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

//! API to attach an image to a producto.

use crate::driver::Driver;
use crate::model::{EntityId, ImageName};
use axum::Json;
use axum::extract::State;
use axum::extract::multipart::{Multipart, MultipartError, MultipartRejection};
use ciberloja_core::rest::{PathParams, RestError, RestResult};

/// Name of the multipart field that carries the image.
const FILE_FIELD: &str = "file";

/// Converts a failure to read the multipart body into a `RestError`.
fn multipart_error(e: MultipartError) -> RestError {
    RestError::InvalidRequest(e.body_text())
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    PathParams(producto_id): PathParams<EntityId>,
    multipart: Result<Multipart, MultipartRejection>,
) -> RestResult<Json<Vec<String>>> {
    let mut multipart = multipart.map_err(|e| RestError::InvalidRequest(e.body_text()))?;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = match field.file_name() {
            Some(file_name) => file_name.to_owned(),
            None => {
                return Err(RestError::InvalidRequest(format!(
                    "Field `{}` does not carry a file name",
                    FILE_FIELD
                )));
            }
        };
        let name = ImageName::new(file_name)?;
        let content = field.bytes().await.map_err(multipart_error)?;

        let urls = driver.upload_image(producto_id, name, content).await?;
        return Ok(Json(urls.into_iter().map(String::from).collect()));
    }

    Err(RestError::InvalidRequest(format!("Missing `{}` field in the request", FILE_FIELD)))
}
