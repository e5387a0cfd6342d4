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

//! API to search for entities that match a set of criteria, one page at a time.

use crate::db::ReadTable;
use crate::driver::Driver;
use crate::model::{PagedResult, Record};
use crate::rest::payloads::PageParams;
use axum::Json;
use axum::extract::State;
use ciberloja_core::rest::{EmptyBody, QueryParams, RestResult};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// GET handler for this API.
pub(crate) async fn handler<T>(
    State(driver): State<Driver>,
    QueryParams(criteria): QueryParams<T::Criteria>,
    QueryParams(page): QueryParams<PageParams>,
    _: EmptyBody,
) -> RestResult<Json<PagedResult<Record<T>>>>
where
    T: ReadTable + Serialize,
    T::Criteria: DeserializeOwned,
{
    let page = page.into_page_request()?;
    let result = driver.find::<T>(criteria, page).await?;
    Ok(Json(result))
}
