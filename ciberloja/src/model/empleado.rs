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

//! Employees of the store.

use crate::model::{HashedPassword, Password};
use ciberloja_core::model::EmailAddress;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

/// An employee of the store.  Never carries the password.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Empleado {
    /// Given name.
    #[validate(length(min = 1))]
    pub(crate) nombre: String,

    /// First surname.
    #[validate(length(min = 1))]
    pub(crate) apellido1: String,

    /// Second surname, if any.
    #[serde(default)]
    pub(crate) apellido2: Option<String>,

    /// National identity document (DNI or NIE).  Unique across employees.
    #[validate(length(min = 1))]
    pub(crate) dni_nie: String,

    /// Contact phone number, if any.
    #[serde(default)]
    pub(crate) telefono: Option<String>,

    /// Contact email address, if any.
    #[serde(default)]
    pub(crate) email: Option<EmailAddress>,

    /// Kind of employee.
    pub(crate) tipo_empleado_id: i64,
}

/// An employee to insert into the database along with its credentials.
#[derive(Debug)]
pub(crate) struct NewEmpleado {
    /// Details of the employee.
    pub(crate) empleado: Empleado,

    /// Hash of the employee's password.
    pub(crate) hash: HashedPassword,
}

/// Request to create a new employee.
#[derive(Debug, Deserialize)]
#[cfg_attr(test, derive(Serialize))]
pub(crate) struct EmpleadoAlta {
    /// Details of the employee.
    #[serde(flatten)]
    pub(crate) empleado: Empleado,

    /// Initial password of the employee.
    pub(crate) password: Password,
}

impl Validate for EmpleadoAlta {
    fn validate(&self) -> Result<(), ValidationErrors> {
        self.empleado.validate()
    }
}
