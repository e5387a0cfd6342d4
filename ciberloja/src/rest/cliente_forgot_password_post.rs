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

//! API to start the password recovery flow of a cliente.

use crate::driver::Driver;
use crate::rest::payloads::{ForgotPasswordRequest, MessageResponse};
use axum::Json;
use axum::extract::State;
use ciberloja_core::rest::{JsonBody, RestResult};

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    JsonBody(request): JsonBody<ForgotPasswordRequest>,
) -> RestResult<Json<MessageResponse>> {
    let email = request.email;
    driver.forgot_password(email.clone()).await?;
    Ok(Json(MessageResponse::new(format!("Password reset instructions sent to {}", email))))
}
