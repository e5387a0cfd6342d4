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

//! Canned messages sent to clientes over email.

use crate::model::{Cliente, EntityId, Pedido, ResetToken};
use ciberloja_core::driver::{DriverError, DriverResult};
use ciberloja_core::rest::BaseUrls;
use ciberloja_smtp::driver::SmtpMailer;
use ciberloja_smtp::model::{EmailTemplate, Mailbox};
use std::time::Duration;

/// Subject of the password reset message.
const RESET_SUBJECT: &str = "CiberLoja: restablecer la clave de %nickname%";

/// Body of the password reset message.
const RESET_BODY: &str = "Hola %nombre%,

Hemos recibido una solicitud para restablecer la clave de tu cuenta.  Para elegir una nueva,
visita el siguiente enlace en los proximos %minutes% minutos:

%reset_url%

Si no has sido tu, ignora este mensaje.
";

/// Subject of the order confirmation message.
const PEDIDO_SUBJECT: &str = "CiberLoja: pedido %pedido_id% recibido";

/// Body of the order confirmation message.
const PEDIDO_BODY: &str = "Hola %nombre%,

Hemos registrado tu pedido %pedido_id% con fecha %fecha%.

Lineas: %lineas%
Importe total: %precio% EUR

Gracias por comprar en CiberLoja.
";

/// Builds the template for password reset messages sent by `from`.
fn reset_template(from: Mailbox) -> EmailTemplate {
    EmailTemplate { from, subject_template: RESET_SUBJECT, body_template: RESET_BODY }
}

/// Builds the template for order confirmation messages sent by `from`.
fn pedido_template(from: Mailbox) -> EmailTemplate {
    EmailTemplate { from, subject_template: PEDIDO_SUBJECT, body_template: PEDIDO_BODY }
}

/// Sends the password reset `token` to `cliente`.
///
/// The link points to the frontend page that collects the new password, which is computed from
/// `base_urls`.
pub(super) async fn send_reset_token(
    mailer: &(dyn SmtpMailer + Send + Sync),
    from: Mailbox,
    base_urls: &BaseUrls,
    cliente: &Cliente,
    token: &ResetToken,
    ttl: Duration,
) -> DriverResult<()> {
    let reset_url = base_urls.make_frontend_url(&["reset-password"], &[("token", token.as_str())]);
    let minutes = (ttl.as_secs() / 60).to_string();

    let replacements = [
        ("minutes", minutes.as_str()),
        ("nickname", cliente.nickname.as_str()),
        ("nombre", cliente.nombre.as_str()),
        ("reset_url", reset_url.as_str()),
    ];
    let message = reset_template(from)
        .apply(&cliente.email, &replacements)
        .map_err(|e| DriverError::BackendError(e.to_string()))?;

    mailer.send(message).await
}

/// Sends the confirmation of the just-created `pedido` to `cliente`.
pub(super) async fn send_pedido_confirmation(
    mailer: &(dyn SmtpMailer + Send + Sync),
    from: Mailbox,
    cliente: &Cliente,
    pedido_id: EntityId,
    pedido: &Pedido,
) -> DriverResult<()> {
    let pedido_id = pedido_id.to_string();
    let fecha = pedido.fecha_realizacion().to_string();
    let lineas = pedido.lineas().len().to_string();
    let precio = format!("{:.2}", pedido.precio());

    let replacements = [
        ("fecha", fecha.as_str()),
        ("lineas", lineas.as_str()),
        ("nombre", cliente.nombre.as_str()),
        ("pedido_id", pedido_id.as_str()),
        ("precio", precio.as_str()),
    ];
    let message = pedido_template(from)
        .apply(&cliente.email, &replacements)
        .map_err(|e| DriverError::BackendError(e.to_string()))?;

    mailer.send(message).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testutils::{cliente, pedido};
    use ciberloja_smtp::driver::testutils::RecorderSmtpMailer;
    use ciberloja_smtp::model::testutils::parse_message;
    use time::macros::date;

    fn from() -> Mailbox {
        "CiberLoja <tienda@example.com>".parse().unwrap()
    }

    #[tokio::test]
    async fn test_send_reset_token() {
        let mailer = RecorderSmtpMailer::default();
        let cliente = cliente("ana", "ana@example.com");
        let token = ResetToken::generate();

        send_reset_token(
            &mailer,
            from(),
            &BaseUrls::from_strs("http://localhost:1234/", Some("https://shop.example.com/")),
            &cliente,
            &token,
            Duration::from_secs(30 * 60),
        )
        .await
        .unwrap();

        let message = mailer.expect_one_message(&cliente.email).await;
        let (headers, body) = parse_message(&message);
        assert_eq!("CiberLoja: restablecer la clave de ana", headers.get("Subject").unwrap());
        assert!(body.contains(&format!(
            "https://shop.example.com/reset-password?token={}",
            token.as_str()
        )));
        assert!(body.contains("en los proximos 30 minutos"));
    }

    #[tokio::test]
    async fn test_send_pedido_confirmation() {
        let mailer = RecorderSmtpMailer::default();
        let cliente = cliente("ana", "ana@example.com");
        let pedido = pedido(
            date!(2024 - 03 - 10),
            EntityId::from(1),
            &[(EntityId::from(1), 2, 3.5), (EntityId::from(2), 1, 1.25)],
        );

        send_pedido_confirmation(&mailer, from(), &cliente, EntityId::from(12), &pedido)
            .await
            .unwrap();

        let message = mailer.expect_one_message(&cliente.email).await;
        let (headers, body) = parse_message(&message);
        assert_eq!("CiberLoja: pedido 12 recibido", headers.get("Subject").unwrap());
        assert!(body.contains("tu pedido 12 con fecha 2024-03-10"));
        assert!(body.contains("Lineas: 2\n"));
        assert!(body.contains("Importe total: 4.75 EUR"));
    }

    #[tokio::test]
    async fn test_send_failure_propagates() {
        let mailer = RecorderSmtpMailer::default();
        let cliente = cliente("ana", "ana@example.com");
        mailer.inject_error_for(cliente.email.clone()).await;

        let err = send_reset_token(
            &mailer,
            from(),
            &BaseUrls::from_strs("http://localhost:1234/", None),
            &cliente,
            &ResetToken::generate(),
            Duration::from_secs(60),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, DriverError::UpstreamError(_)));
    }
}
