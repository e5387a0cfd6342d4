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

//! Postal addresses of customers and employees.

use crate::model::EntityId;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A postal address.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Direccion {
    /// Kind of street, such as "Calle" or "Avenida".
    #[validate(length(min = 1))]
    pub(crate) nombre_via: String,

    /// Street name and number.
    #[validate(length(min = 1))]
    pub(crate) dir_via: String,

    /// Town of the address.
    pub(crate) localidad_id: EntityId,

    /// Customer that owns the address, if any.
    #[serde(default)]
    pub(crate) cliente_id: Option<EntityId>,

    /// Employee that owns the address, if any.
    #[serde(default)]
    pub(crate) empleado_id: Option<EntityId>,
}
