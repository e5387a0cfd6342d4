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

//! API to delete an entity.

use crate::db::WriteTable;
use crate::driver::Driver;
use crate::model::EntityId;
use crate::rest::payloads::{IdQuery, MessageResponse};
use axum::Json;
use axum::extract::State;
use ciberloja_core::rest::{EmptyBody, PathParams, QueryParams, RestResult};

/// Deletes the entity `T` with `id` and builds the confirmation.
async fn delete<T: WriteTable>(driver: Driver, id: EntityId) -> RestResult<Json<MessageResponse>> {
    driver.delete::<T>(id).await?;
    Ok(Json(MessageResponse::new(format!("{} {} deleted", T::ENTITY, id))))
}

/// DELETE handler for this API when the identifier comes in the `id` query parameter.
pub(crate) async fn query_handler<T: WriteTable>(
    State(driver): State<Driver>,
    QueryParams(query): QueryParams<IdQuery>,
    _: EmptyBody,
) -> RestResult<Json<MessageResponse>> {
    delete::<T>(driver, query.id).await
}

/// DELETE handler for this API when the identifier comes in the path.
pub(crate) async fn path_handler<T: WriteTable>(
    State(driver): State<Driver>,
    PathParams(id): PathParams<EntityId>,
    _: EmptyBody,
) -> RestResult<Json<MessageResponse>> {
    delete::<T>(driver, id).await
}
