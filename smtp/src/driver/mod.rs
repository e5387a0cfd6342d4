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

//! Utilities to send messages over email.

use async_trait::async_trait;
use ciberloja_core::driver::{DriverError, DriverResult};
use ciberloja_core::env::get_required_var;
use derivative::Derivative;
use lettre::message::Message;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use log::info;

#[cfg(any(test, feature = "testutils"))]
pub mod testutils;

/// Options to establish an SMTP connection.
#[derive(Derivative)]
#[derivative(Debug)]
#[cfg_attr(test, derivative(PartialEq))]
pub struct SmtpOptions {
    /// SMTP server to use.
    pub relay: String,

    /// Username for logging into the SMTP server.
    pub username: String,

    /// Password for logging into the SMTP server.
    #[derivative(Debug = "ignore")]
    pub password: String,
}

impl SmtpOptions {
    /// Initializes a set of options from environment variables whose name is prefixed with the
    /// given `prefix`.
    ///
    /// This will use variables such as `<prefix>_RELAY`, `<prefix>_USERNAME` and
    /// `<prefix>_PASSWORD`.
    pub fn from_env(prefix: &str) -> Result<Self, String> {
        Ok(Self {
            relay: get_required_var::<String>(prefix, "RELAY")?,
            username: get_required_var::<String>(prefix, "USERNAME")?,
            password: get_required_var::<String>(prefix, "PASSWORD")?,
        })
    }
}

/// Trait to abstract the integration with the mailer.
#[async_trait]
pub trait SmtpMailer {
    /// Sends a message over SMTP.
    async fn send(&self, message: Message) -> DriverResult<()>;
}

/// Mailer backed by a real SMTP connection using `lettre`.
#[derive(Clone)]
pub struct LettreSmtpMailer(AsyncSmtpTransport<Tokio1Executor>);

impl LettreSmtpMailer {
    /// Prepares a pooled connection to the SMTP server configured in `opts`.
    ///
    /// No network traffic happens until the first message is sent.
    pub fn connect(opts: SmtpOptions) -> Result<Self, String> {
        info!("Using SMTP relay {} as {}", opts.relay, opts.username);
        let creds = Credentials::new(opts.username, opts.password);
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(&opts.relay)
            .map_err(|e| format!("Invalid SMTP relay {}: {}", opts.relay, e))?
            .credentials(creds)
            .build();
        Ok(LettreSmtpMailer(mailer))
    }
}

#[async_trait]
impl SmtpMailer for LettreSmtpMailer {
    async fn send(&self, message: Message) -> DriverResult<()> {
        self.0
            .send(message)
            .await
            .map_err(|e| DriverError::UpstreamError(format!("SMTP communication failed: {}", e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smtp_options_from_env_all_present() {
        let overrides = [
            ("SMTP_RELAY", Some("the-relay")),
            ("SMTP_USERNAME", Some("the-username")),
            ("SMTP_PASSWORD", Some("the-password")),
        ];
        temp_env::with_vars(overrides, || {
            let opts = SmtpOptions::from_env("SMTP").unwrap();
            assert_eq!(
                SmtpOptions {
                    relay: "the-relay".to_owned(),
                    username: "the-username".to_owned(),
                    password: "the-password".to_owned(),
                },
                opts
            );
        });
    }

    #[test]
    fn test_smtp_options_from_env_missing() {
        let overrides = [
            ("MISSING_RELAY", Some("the-relay")),
            ("MISSING_USERNAME", Some("the-username")),
            ("MISSING_PASSWORD", Some("the-password")),
        ];
        for (var, _) in overrides {
            let mut overrides = overrides;
            for (k, v) in &mut overrides {
                if *k == var {
                    *v = None::<&str>;
                }
            }

            temp_env::with_vars(overrides, || {
                let err = SmtpOptions::from_env("MISSING").unwrap_err();
                assert!(err.contains(&format!("{} not present", var)));
            });
        }
    }

    #[test]
    fn test_smtp_options_debug_hides_password() {
        let opts = SmtpOptions {
            relay: "relay.example.com".to_owned(),
            username: "loja".to_owned(),
            password: "super-secret".to_owned(),
        };
        let text = format!("{:?}", opts);
        assert!(text.contains("relay.example.com"));
        assert!(!text.contains("super-secret"));
    }
}
