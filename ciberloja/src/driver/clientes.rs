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

//! Operations on clientes: registration, authentication and password resets.

use crate::db::{self, ReadTable, WriteTable};
use crate::driver::email::send_reset_token;
use crate::driver::{Driver, entity_error};
use crate::model::{Cliente, ClienteRegistro, EntityId, NewCliente, Password, Record, ResetToken};
use ciberloja_core::db::DbError;
use ciberloja_core::driver::{DriverError, DriverResult};
use ciberloja_core::model::EmailAddress;
use log::info;

/// Message returned for any authentication failure so that callers cannot tell apart unknown
/// accounts from bad passwords.
const BAD_CREDENTIALS: &str = "Invalid email or password";

/// Message returned for unknown and expired reset tokens.
const BAD_RESET_TOKEN: &str = "Invalid or expired reset token";

impl Driver {
    /// Registers a new cliente from its sign-up form.
    pub(crate) async fn register_cliente(
        self,
        registro: ClienteRegistro,
    ) -> DriverResult<Record<Cliente>> {
        let (cliente, password) = registro.into_parts();
        let email = cliente.email.clone();
        let hash = password.hash()?;

        match self.create::<Cliente>(NewCliente { cliente, hash }).await {
            Ok(record) => {
                info!("Registered cliente {}", record.id);
                Ok(record)
            }
            Err(DriverError::AlreadyExists(_)) => Err(DriverError::AlreadyExists(format!(
                "Email address {} is already registered",
                email
            ))),
            Err(e) => Err(e),
        }
    }

    /// Replaces the details of cliente `id` with `cliente`.
    ///
    /// The role of a cliente cannot be changed this way so the stored one is kept.
    pub(crate) async fn update_cliente(
        self,
        id: EntityId,
        mut cliente: Cliente,
    ) -> DriverResult<Record<Cliente>> {
        let mut tx = self.db.begin().await?;
        let current =
            Cliente::get(tx.ex(), id).await.map_err(|e| entity_error::<Cliente>(Some(id), e))?;
        cliente.rol_id = current.data.rol_id;

        Cliente::update(tx.ex(), id, &cliente)
            .await
            .map_err(|e| entity_error::<Cliente>(Some(id), e))?;
        let record = Cliente::get(tx.ex(), id).await?;
        tx.commit().await?;
        Ok(record)
    }

    /// Checks the `email` and `password` of a cliente and returns its details on success.
    pub(crate) async fn autenticar_cliente(
        self,
        email: EmailAddress,
        password: Password,
    ) -> DriverResult<Record<Cliente>> {
        let mut ex = self.db.ex().await?;
        let (record, hash) = match db::get_cliente_with_password(&mut ex, &email).await {
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

    /// Starts the password reset flow for the cliente with `email` by mailing it a single-use
    /// token.
    pub(crate) async fn forgot_password(self, email: EmailAddress) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;

        let (record, _hash) = match db::get_cliente_with_password(tx.ex(), &email).await {
            Ok(found) => found,
            Err(DbError::NotFound) => {
                return Err(DriverError::InvalidInput(format!(
                    "No cliente is registered with email {}",
                    email
                )));
            }
            Err(e) => return Err(e.into()),
        };

        let token = ResetToken::generate();
        let expires = self.clock.now_utc() + self.opts.reset_token_ttl;
        db::put_reset_token(tx.ex(), &token, record.id, expires).await?;

        send_reset_token(
            self.mailer.as_ref(),
            self.opts.mail_from.clone(),
            &self.base_urls,
            &record.data,
            &token,
            self.opts.reset_token_ttl,
        )
        .await?;

        tx.commit().await?;
        info!("Sent password reset token to cliente {}", record.id);
        Ok(())
    }

    /// Consumes the reset `token` and sets the password of its cliente to `new_password`.
    pub(crate) async fn reset_password(
        self,
        token: ResetToken,
        new_password: Password,
    ) -> DriverResult<bool> {
        let hash = new_password.hash()?;

        let mut tx = self.db.begin().await?;
        let (cliente_id, expires) = match db::take_reset_token(tx.ex(), &token).await {
            Ok(found) => found,
            Err(DbError::NotFound) => {
                return Err(DriverError::InvalidInput(BAD_RESET_TOKEN.to_owned()));
            }
            Err(e) => return Err(e.into()),
        };

        if expires < self.clock.now_utc() {
            // Expired tokens are useless so drop them while we are at it.
            tx.commit().await?;
            return Err(DriverError::InvalidInput(BAD_RESET_TOKEN.to_owned()));
        }

        db::update_cliente_password(tx.ex(), cliente_id, &hash).await?;
        tx.commit().await?;
        info!("Password of cliente {} reset", cliente_id);
        Ok(true)
    }
}
