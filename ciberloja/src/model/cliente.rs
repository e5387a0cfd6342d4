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

//! Customers of the store.

use crate::model::{HashedPassword, Password};
use ciberloja_core::model::EmailAddress;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

/// Role assigned to customers that sign up by themselves.
pub(crate) const ROL_CLIENTE: i64 = 1;

/// A customer of the store.  Never carries the password.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Cliente {
    /// Public alias of the customer.
    #[validate(length(min = 1))]
    pub(crate) nickname: String,

    /// Given name.
    #[validate(length(min = 1))]
    pub(crate) nombre: String,

    /// First surname.
    #[validate(length(min = 1))]
    pub(crate) apellido1: String,

    /// Second surname, if any.
    #[serde(default)]
    pub(crate) apellido2: Option<String>,

    /// National identity document (DNI or NIE).
    #[validate(length(min = 1))]
    pub(crate) dni_nie: String,

    /// Contact phone number.
    #[validate(length(min = 1))]
    pub(crate) telefono: String,

    /// Contact and login email address.
    pub(crate) email: EmailAddress,

    /// Role of the customer.
    pub(crate) rol_id: i64,
}

/// Criteria to search for customers.  Text fields match by substring.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ClienteCriteria {
    /// Substring of the nickname.
    pub(crate) nickname: Option<String>,

    /// Substring of the given name.
    pub(crate) nombre: Option<String>,

    /// Substring of the email address.
    pub(crate) email: Option<String>,

    /// Substring of the identity document.
    pub(crate) dni_nie: Option<String>,

    /// Substring of the phone number.
    pub(crate) telefono: Option<String>,
}

/// A customer to insert into the database along with its credentials.
#[derive(Debug)]
pub(crate) struct NewCliente {
    /// Details of the customer.
    pub(crate) cliente: Cliente,

    /// Hash of the password chosen by the customer.
    pub(crate) hash: HashedPassword,
}

/// Sign-up form of a customer.  The role is not accepted from the user.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(test, derive(Clone, Serialize))]
pub(crate) struct ClienteRegistro {
    /// Public alias of the customer.
    pub(crate) nickname: String,

    /// Given name.
    pub(crate) nombre: String,

    /// First surname.
    pub(crate) apellido1: String,

    /// Second surname, if any.
    #[serde(default)]
    pub(crate) apellido2: Option<String>,

    /// National identity document (DNI or NIE).
    pub(crate) dni_nie: String,

    /// Contact phone number.
    pub(crate) telefono: String,

    /// Contact and login email address.
    pub(crate) email: EmailAddress,

    /// Password chosen by the customer.
    pub(crate) password: Password,
}

impl ClienteRegistro {
    /// Splits the registration into the customer details and its password.
    pub(crate) fn into_parts(self) -> (Cliente, Password) {
        let cliente = Cliente {
            nickname: self.nickname,
            nombre: self.nombre,
            apellido1: self.apellido1,
            apellido2: self.apellido2.filter(|s| !s.is_empty()),
            dni_nie: self.dni_nie,
            telefono: self.telefono,
            email: self.email,
            rol_id: ROL_CLIENTE,
        };
        (cliente, self.password)
    }
}

impl Validate for ClienteRegistro {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for (field, value) in [
            ("nickname", &self.nickname),
            ("nombre", &self.nombre),
            ("apellido1", &self.apellido1),
            ("dniNie", &self.dni_nie),
            ("telefono", &self.telefono),
        ] {
            if value.trim().is_empty() {
                errors.add(field, validator::ValidationError::new("required"));
            }
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
