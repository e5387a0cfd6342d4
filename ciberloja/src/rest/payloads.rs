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

//! Request and response payloads that only exist at the API boundary.

use crate::model::{EntityId, PageRequest, Password, ResetToken};
use ciberloja_core::model::{EmailAddress, ModelResult};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Paging parameters accepted by the search APIs.
///
/// These are parsed separately from the search criteria because the criteria types are shared
/// with the database layer and know nothing about pages.
#[derive(Debug, Default, Deserialize)]
#[cfg_attr(test, derive(Serialize))]
pub(crate) struct PageParams {
    /// Page number, starting at 1.
    pub(crate) page: Option<u32>,

    /// Maximum number of items per page.
    pub(crate) size: Option<u32>,
}

impl PageParams {
    /// Validates the parameters and turns them into a page request.
    pub(crate) fn into_page_request(self) -> ModelResult<PageRequest> {
        PageRequest::new(self.page, self.size)
    }
}

/// Query parameters of the APIs that receive an identifier in the query string.
#[derive(Debug, Deserialize)]
#[cfg_attr(test, derive(Serialize))]
pub(crate) struct IdQuery {
    /// Identifier of the target entity.
    pub(crate) id: EntityId,
}

/// Credentials of a cliente.
#[derive(Debug, Deserialize, Validate)]
#[cfg_attr(test, derive(Serialize))]
pub(crate) struct ClienteCredentials {
    /// Email address used to log in.
    pub(crate) email: EmailAddress,

    /// Password of the cliente.
    pub(crate) password: Password,
}

/// Credentials of an empleado.
#[derive(Debug, Deserialize, Validate)]
#[cfg_attr(test, derive(Serialize))]
pub(crate) struct EmpleadoCredentials {
    /// Identifier of the empleado.
    pub(crate) id: EntityId,

    /// Password of the empleado.
    pub(crate) password: Password,
}

/// Request to start the password reset flow.
#[derive(Debug, Deserialize, Validate)]
#[cfg_attr(test, derive(Serialize))]
pub(crate) struct ForgotPasswordRequest {
    /// Email address of the cliente that forgot its password.
    pub(crate) email: EmailAddress,
}

/// Request to complete the password reset flow.
#[derive(Debug, Deserialize, Validate)]
#[cfg_attr(test, derive(Serialize))]
#[serde(rename_all = "camelCase")]
pub(crate) struct ResetPasswordRequest {
    /// Token received over email.
    pub(crate) token: ResetToken,

    /// Password to set.
    pub(crate) new_password: Password,
}

/// Confirmation returned by APIs that have nothing else to return.
#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub(crate) struct MessageResponse {
    /// Human-readable description of what happened.
    pub(crate) message: String,
}

impl MessageResponse {
    /// Creates a new response with `message`.
    pub(crate) fn new<S: Into<String>>(message: S) -> Self {
        Self { message: message.into() }
    }
}
