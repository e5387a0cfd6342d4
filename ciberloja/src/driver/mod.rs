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

//! Business logic for the service.

use crate::db::{ReadTable, WriteTable};
use crate::model::{EntityId, PageRequest, PagedResult, Record};
use crate::storage::ImageStore;
use ciberloja_core::clocks::Clock;
use ciberloja_core::db::{Db, DbError};
use ciberloja_core::driver::{DriverError, DriverResult};
use ciberloja_core::env::{get_optional_var, get_required_var};
use ciberloja_core::rest::BaseUrls;
use ciberloja_smtp::driver::SmtpMailer;
use ciberloja_smtp::model::Mailbox;
use std::sync::Arc;
use std::time::Duration;

mod clientes;
mod email;
mod empleados;
mod images;
mod pedidos;
#[cfg(test)]
pub(crate) mod testutils;

/// Default value for the `RESET_TOKEN_TTL` setting when not specified.
const DEFAULT_RESET_TOKEN_TTL_SECONDS: u64 = 60 * 60;

/// Configuration options for the driver.
#[derive(Clone, Debug)]
#[cfg_attr(test, derive(PartialEq))]
pub(crate) struct DriverOptions {
    /// Amount of time during which a password reset token can be used.
    pub(crate) reset_token_ttl: Duration,

    /// Sender of all outgoing emails.
    pub(crate) mail_from: Mailbox,
}

impl DriverOptions {
    /// Creates a new set of options from environment variables whose name is prefixed by
    /// `prefix`.
    pub(crate) fn from_env(prefix: &str) -> Result<Self, String> {
        let mail_from = get_required_var::<String>(prefix, "MAIL_FROM")?;
        let mail_from = mail_from
            .parse::<Mailbox>()
            .map_err(|e| format!("Invalid {}_MAIL_FROM '{}': {}", prefix, mail_from, e))?;
        Ok(Self {
            reset_token_ttl: get_optional_var::<Duration>(prefix, "RESET_TOKEN_TTL")?
                .unwrap_or_else(|| Duration::from_secs(DEFAULT_RESET_TOKEN_TTL_SECONDS)),
            mail_from,
        })
    }
}

/// Translates a database error that happened while operating on the entity `T` with the
/// optional `id` into a driver error with a descriptive message.
fn entity_error<T: ReadTable>(id: Option<EntityId>, e: DbError) -> DriverError {
    match (e, id) {
        (DbError::NotFound, Some(id)) => {
            DriverError::NotFound(format!("{} {} not found", T::ENTITY, id))
        }
        (DbError::AlreadyExists, _) => {
            DriverError::AlreadyExists(format!("{} already exists", T::ENTITY))
        }
        (e, _) => DriverError::from(e),
    }
}

/// Business logic.
///
/// The public operations exposed by the driver are all "one shot": they start and commit a
/// transaction, so it's incorrect for the caller to use two separate calls.  For this reason,
/// these operations consume the driver in an attempt to minimize the possibility of executing
/// two operations.
#[derive(Clone)]
pub(crate) struct Driver {
    /// The database that the driver uses for persistence.
    db: Arc<dyn Db + Send + Sync>,

    /// Clock instance to obtain the current time.
    clock: Arc<dyn Clock + Send + Sync>,

    /// Service to send email notifications with.
    mailer: Arc<dyn SmtpMailer + Send + Sync>,

    /// Storage for the images of the products.
    images: Arc<dyn ImageStore + Send + Sync>,

    /// Base URLs of the backend and frontend, used to compose links.
    base_urls: Arc<BaseUrls>,

    /// Configuration options.
    opts: DriverOptions,
}

impl Driver {
    /// Creates a new driver backed by the given injected components.
    pub(crate) fn new(
        db: Arc<dyn Db + Send + Sync>,
        clock: Arc<dyn Clock + Send + Sync>,
        mailer: Arc<dyn SmtpMailer + Send + Sync>,
        images: Arc<dyn ImageStore + Send + Sync>,
        base_urls: Arc<BaseUrls>,
        opts: DriverOptions,
    ) -> Self {
        Self { db, clock, mailer, images, base_urls, opts }
    }

    /// Gets the entity `T` with identifier `id`.
    pub(crate) async fn get<T: ReadTable>(self, id: EntityId) -> DriverResult<Record<T>> {
        let mut ex = self.db.ex().await?;
        T::get(&mut ex, id).await.map_err(|e| entity_error::<T>(Some(id), e))
    }

    /// Gets all entities of type `T`.
    pub(crate) async fn get_all<T: ReadTable>(self) -> DriverResult<Vec<Record<T>>> {
        let mut ex = self.db.ex().await?;
        Ok(T::get_all(&mut ex).await?)
    }

    /// Gets the `page` of entities of type `T` that match `criteria`.
    pub(crate) async fn find<T: ReadTable>(
        self,
        criteria: T::Criteria,
        page: PageRequest,
    ) -> DriverResult<PagedResult<Record<T>>> {
        let mut ex = self.db.ex().await?;
        Ok(T::find(&mut ex, &criteria, &page).await?)
    }

    /// Creates a new entity of type `T` from `data` and returns it as stored.
    pub(crate) async fn create<T: WriteTable>(self, data: T::Insert) -> DriverResult<Record<T>> {
        let mut tx = self.db.begin().await?;
        let id = T::insert(tx.ex(), &data).await.map_err(|e| entity_error::<T>(None, e))?;
        let record = T::get(tx.ex(), id).await?;
        tx.commit().await?;
        Ok(record)
    }

    /// Replaces the entity `id` of type `T` with `data` and returns it as stored.
    pub(crate) async fn update<T: WriteTable>(
        self,
        id: EntityId,
        data: T,
    ) -> DriverResult<Record<T>> {
        let mut tx = self.db.begin().await?;
        T::update(tx.ex(), id, &data).await.map_err(|e| entity_error::<T>(Some(id), e))?;
        let record = T::get(tx.ex(), id).await?;
        tx.commit().await?;
        Ok(record)
    }

    /// Deletes the entity `id` of type `T`.
    pub(crate) async fn delete<T: WriteTable>(self, id: EntityId) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;
        T::delete(tx.ex(), id).await.map_err(|e| entity_error::<T>(Some(id), e))?;
        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::testutils::*;
    use super::*;
    use crate::db::testutils::{direccion, producto, seed_localidad};
    use crate::model::{Direccion, Localidad, Pais, Producto, ProductoCriteria};

    #[test]
    fn test_driver_options_from_env_defaults() {
        temp_env::with_vars(
            [
                ("TEST_MAIL_FROM", Some("CiberLoja <tienda@example.com>")),
                ("TEST_RESET_TOKEN_TTL", None),
            ],
            || {
                let opts = DriverOptions::from_env("TEST").unwrap();
                assert_eq!(Duration::from_secs(3600), opts.reset_token_ttl);
                assert_eq!("tienda@example.com", opts.mail_from.email.to_string());
            },
        );
    }

    #[test]
    fn test_driver_options_from_env_all_present() {
        temp_env::with_vars(
            [
                ("TEST_MAIL_FROM", Some("tienda@example.com")),
                ("TEST_RESET_TOKEN_TTL", Some("30m")),
            ],
            || {
                let opts = DriverOptions::from_env("TEST").unwrap();
                assert_eq!(Duration::from_secs(30 * 60), opts.reset_token_ttl);
            },
        );
    }

    #[test]
    fn test_driver_options_from_env_errors() {
        temp_env::with_vars([("TEST_MAIL_FROM", None::<&str>)], || {
            let err = DriverOptions::from_env("TEST").unwrap_err();
            assert!(err.contains("TEST_MAIL_FROM"));
        });
        temp_env::with_vars([("TEST_MAIL_FROM", Some("not an address"))], || {
            let err = DriverOptions::from_env("TEST").unwrap_err();
            assert!(err.contains("Invalid TEST_MAIL_FROM"));
        });
    }

    #[tokio::test]
    async fn test_get_not_found_names_entity() {
        let context = TestContext::setup().await;

        assert_eq!(
            DriverError::NotFound("Producto 7 not found".to_owned()),
            context.driver().get::<Producto>(EntityId::from(7)).await.unwrap_err()
        );
        assert_eq!(
            DriverError::NotFound("Pais 3 not found".to_owned()),
            context.driver().get::<Pais>(EntityId::from(3)).await.unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let context = TestContext::setup().await;

        let created = context.driver().create::<Producto>(producto("Cafe", 3.5, 10)).await.unwrap();
        assert_eq!(producto("Cafe", 3.5, 10), created.data);

        let fetched = context.driver().get::<Producto>(created.id).await.unwrap();
        assert_eq!(created, fetched);
    }

    #[tokio::test]
    async fn test_create_invalid_reference() {
        let context = TestContext::setup().await;

        let err = context
            .driver()
            .create::<Direccion>(direccion(EntityId::from(9), None))
            .await
            .unwrap_err();
        assert!(matches!(err, DriverError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let context = TestContext::setup().await;

        let created = context.driver().create::<Producto>(producto("Cafe", 3.5, 10)).await.unwrap();
        let updated = context
            .driver()
            .update(created.id, producto("Cafe molido", 4.0, 2))
            .await
            .unwrap();
        assert_eq!(Record::new(created.id, producto("Cafe molido", 4.0, 2)), updated);

        context.driver().delete::<Producto>(created.id).await.unwrap();
        assert_eq!(
            DriverError::NotFound(format!("Producto {} not found", created.id)),
            context.driver().delete::<Producto>(created.id).await.unwrap_err()
        );
        assert!(context.driver().get_all::<Producto>().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_not_found() {
        let context = TestContext::setup().await;

        assert_eq!(
            DriverError::NotFound("Producto 4 not found".to_owned()),
            context
                .driver()
                .update(EntityId::from(4), producto("Cafe", 1.0, 1))
                .await
                .unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_find_and_get_all() {
        let context = TestContext::setup().await;

        for (nombre, precio) in [("Cafe", 3.0), ("Te", 2.0), ("Cacao", 5.0)] {
            context.driver().create::<Producto>(producto(nombre, precio, 1)).await.unwrap();
        }

        let criteria = ProductoCriteria { precio_min: Some(2.5), ..Default::default() };
        let page = PageRequest::new(Some(1), Some(1)).unwrap();
        let result = context.driver().find::<Producto>(criteria, page).await.unwrap();
        assert_eq!(2, result.total);
        assert_eq!(1, result.items.len());
        assert_eq!("Cafe", result.items[0].data.nombre);

        assert_eq!(3, context.driver().get_all::<Producto>().await.unwrap().len());
    }

    #[tokio::test]
    async fn test_read_only_geography() {
        let context = TestContext::setup().await;

        let localidad = seed_localidad(&mut context.ex().await).await;
        let record = context.driver().get::<Localidad>(localidad).await.unwrap();
        assert_eq!("Madrid", record.data.nombre);
        assert_eq!(Some("28001".to_owned()), record.data.codigo_postal);
        assert_eq!(1, context.driver().get_all::<Pais>().await.unwrap().len());
    }
}
