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

//! Test utilities for the business layer.

use crate::db::init_schema;
use crate::driver::{Driver, DriverOptions};
use crate::model::{ClienteRegistro, Password, ResetToken};
use crate::storage::FsImageStore;
use ciberloja_core::clocks::testutils::SettableClock;
use ciberloja_core::db::{Db, Executor};
use ciberloja_core::model::EmailAddress;
use ciberloja_core::rest::BaseUrls;
use ciberloja_smtp::driver::testutils::RecorderSmtpMailer;
use ciberloja_smtp::model::testutils::parse_message;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use time::macros::datetime;

/// State of a running test.
pub(crate) struct TestContext {
    /// The database shared with the driver.
    db: Arc<dyn Db + Send + Sync>,

    /// The clock shared with the driver, which tests can move around.
    pub(crate) clock: Arc<SettableClock>,

    /// The SMTP mailer to capture outgoing messages.
    pub(crate) mailer: Arc<RecorderSmtpMailer>,

    /// Directory holding the images.  Removed when the context goes away.
    pub(crate) images_dir: TempDir,

    /// The driver under test.
    driver: Driver,
}

impl TestContext {
    /// Initializes the driver using an in-memory database, a settable clock, a mailer that
    /// captures outgoing messages and a temporary directory for images.
    pub(crate) async fn setup() -> Self {
        let db = Arc::from(ciberloja_core::db::sqlite::testutils::setup().await);
        init_schema(&mut db.ex().await.unwrap()).await.unwrap();

        let clock = Arc::from(SettableClock::new(datetime!(2024-05-10 10:00:00 UTC)));
        let mailer = Arc::from(RecorderSmtpMailer::default());
        let images_dir = tempfile::tempdir().unwrap();
        let images = Arc::from(FsImageStore::new(images_dir.path()));
        let base_urls = Arc::from(BaseUrls::from_strs(
            "http://localhost:1234/",
            Some("http://frontend.example.com/"),
        ));
        let opts = DriverOptions {
            reset_token_ttl: Duration::from_secs(60 * 60),
            mail_from: "CiberLoja <tienda@example.com>".parse().unwrap(),
        };

        let driver =
            Driver::new(db.clone(), clock.clone(), mailer.clone(), images, base_urls, opts);

        Self { db, clock, mailer, images_dir, driver }
    }

    /// Gets a direct executor against the database.
    pub(crate) async fn ex(&self) -> Executor {
        self.db.ex().await.unwrap()
    }

    /// Gets a copy of the driver in this test context.
    pub(crate) fn driver(&self) -> Driver {
        self.driver.clone()
    }
}

/// Creates a sign-up form for a cliente with the given `nickname`, `email` and `password`.
pub(crate) fn registro(nickname: &str, email: &str, password: &'static str) -> ClienteRegistro {
    ClienteRegistro {
        nickname: nickname.to_owned(),
        nombre: "Ana".to_owned(),
        apellido1: "Lopez".to_owned(),
        apellido2: None,
        dni_nie: "12345678Z".to_owned(),
        telefono: "600000000".to_owned(),
        email: EmailAddress::from(email),
        password: Password::from(password),
    }
}

/// Extracts the password reset token from the latest message sent to `email`.
pub(crate) async fn get_latest_reset_token(
    mailer: &RecorderSmtpMailer,
    email: &EmailAddress,
) -> ResetToken {
    let inboxes = mailer.inboxes.lock().await;
    let message = inboxes.get(email).and_then(|inbox| inbox.last()).expect("No messages sent");
    let (_headers, body) = parse_message(message);
    let (_, rest) = body.split_once("token=").expect("Message does not contain a token");
    ResetToken::new(&rest[0..64]).unwrap()
}
