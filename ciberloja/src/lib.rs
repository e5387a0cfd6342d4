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

//! REST backend of the CiberLoja online store.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use ciberloja_core::clocks::SystemClock;
use ciberloja_core::db::Db;
use ciberloja_core::db::sqlite;
use ciberloja_core::env::{get_optional_var, get_required_var};
use ciberloja_core::rest::BaseUrls;
use ciberloja_smtp::driver::{LettreSmtpMailer, SmtpOptions};
use log::info;
use std::error::Error;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

mod db;
mod driver;
use driver::{Driver, DriverOptions};
pub(crate) mod model;
mod rest;
use rest::app;
mod storage;
use storage::FsImageStore;

/// Prefix of the environment variables that configure the SMTP relay.
const SMTP_ENV_PREFIX: &str = "SMTP";

/// Address to listen on when none is configured.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Configuration of the whole service.
#[derive(Debug)]
struct ServerOptions {
    /// Address and port to listen on.
    bind_addr: SocketAddr,

    /// Connection string of the SQLite database.
    database_url: String,

    /// Directory in which to store the images of the productos.
    images_dir: PathBuf,

    /// Base URLs of the backend and the frontend.
    base_urls: BaseUrls,

    /// Options for the business logic.
    driver: DriverOptions,

    /// Connection details of the SMTP relay.
    smtp: SmtpOptions,
}

impl ServerOptions {
    /// Creates a new set of options from environment variables whose name is prefixed by
    /// `prefix`, except for the SMTP settings, which are prefixed by `smtp_prefix`.
    fn from_env(prefix: &str, smtp_prefix: &str) -> Result<Self, String> {
        let bind_addr = match get_optional_var::<SocketAddr>(prefix, "BIND_ADDR")? {
            Some(addr) => addr,
            None => DEFAULT_BIND_ADDR
                .parse::<SocketAddr>()
                .map_err(|e| format!("Invalid default bind address: {}", e))?,
        };
        Ok(Self {
            bind_addr,
            database_url: get_required_var::<String>(prefix, "DATABASE_URL")?,
            images_dir: get_required_var::<PathBuf>(prefix, "IMAGES_DIR")?,
            base_urls: BaseUrls::from_env(prefix)?,
            driver: DriverOptions::from_env(prefix)?,
            smtp: SmtpOptions::from_env(smtp_prefix)?,
        })
    }
}

/// Instantiates all resources from the configuration in environment variables prefixed by
/// `prefix` and serves the application until it fails.
///
/// While it'd be nice to push this responsibility to `main`, doing so would force us to expose many
/// crate-internal types to the public, which in turn would make dead code detection harder.
pub async fn serve(prefix: &str) -> Result<(), Box<dyn Error>> {
    let opts = ServerOptions::from_env(prefix, SMTP_ENV_PREFIX)?;

    let db = sqlite::connect(&opts.database_url).await?;
    db::init_schema(&mut db.ex().await?).await?;
    let db = Arc::from(db);

    let mailer = LettreSmtpMailer::connect(opts.smtp)?;
    let images = FsImageStore::new(opts.images_dir);
    let driver = Driver::new(
        db.clone(),
        Arc::from(SystemClock::default()),
        Arc::from(mailer),
        Arc::from(images),
        Arc::from(opts.base_urls),
        opts.driver,
    );

    let listener = tokio::net::TcpListener::bind(opts.bind_addr).await?;
    info!("Listening on {}", opts.bind_addr);
    let result = axum::serve(listener, app(driver)).await;
    db.close().await;
    result?;
    Ok(())
}
