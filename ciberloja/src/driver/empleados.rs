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

//! Operations on empleados that deal with their credentials.

use crate::db;
use crate::driver::Driver;
use crate::model::{Empleado, EmpleadoAlta, EntityId, NewEmpleado, Password, Record};
use ciberloja_core::db::DbError;
use ciberloja_core::driver::{DriverError, DriverResult};
use log::info;

/// Message returned for any authentication failure.
const BAD_CREDENTIALS: &str = "Invalid empleado or password";

impl Driver {
    /// Creates a new empleado with the credentials given in `alta`.
    pub(crate) async fn create_empleado(self, alta: EmpleadoAlta) -> DriverResult<Record<Empleado>> {
        let dni_nie = alta.empleado.dni_nie.clone();
        let hash = alta.password.hash()?;

        match self.create::<Empleado>(NewEmpleado { empleado: alta.empleado, hash }).await {
            Ok(record) => {
                info!("Created empleado {}", record.id);
                Ok(record)
            }
            Err(DriverError::AlreadyExists(_)) => Err(DriverError::AlreadyExists(format!(
                "Empleado with dniNie {} already exists",
                dni_nie
            ))),
            Err(e) => Err(e),
        }
    }

    /// Checks the `password` of the empleado `id` and returns its details on success.
    pub(crate) async fn autenticar_empleado(
        self,
        id: EntityId,
        password: Password,
    ) -> DriverResult<Record<Empleado>> {
        let mut ex = self.db.ex().await?;
        let (record, hash) = match db::get_empleado_with_password(&mut ex, id).await {
            Ok(found) => found,
            Err(DbError::NotFound) => {
                return Err(DriverError::Unauthorized(BAD_CREDENTIALS.to_owned()));
            }
            Err(e) => return Err(e.into()),
        };

        if !password.verify(&hash).map_err(|e| DriverError::BackendError(e.to_string()))? {
            return Err(DriverError::Unauthorized(BAD_CREDENTIALS.to_owned()));
        }
        Ok(record)
    }
}
