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

//! Data types to compose email messages.

use ciberloja_core::model::{EmailAddress, ModelError, ModelResult};
use lettre::message::Body;
use lettre::message::header::ContentTransferEncoding;
pub use lettre::message::{Mailbox, Message};

/// Performs the named replacements in `input` based on `replacements`.
///
/// The `input` string can have `%key%` sequences in it where `key` must appear in `replacements`.
/// Raw `%` characters are written as `%%`.  Nested expansions are not supported.
pub fn expand(input: &str, replacements: &[(&str, &str)]) -> ModelResult<String> {
    let mut output = String::with_capacity(input.len());
    let mut partial_key: Option<String> = None;
    for ch in input.chars() {
        match (ch, partial_key.take()) {
            ('%', Some(key)) if key.is_empty() => output.push('%'),
            ('%', Some(key)) => {
                let mut values =
                    replacements.iter().filter(|(candidate, _)| *candidate == key.as_str());
                match (values.next(), values.next()) {
                    (Some((_, value)), None) => output.push_str(value),
                    (None, _) => {
                        return Err(ModelError(format!("No value for template key '{}'", key)));
                    }
                    (Some(_), Some(_)) => {
                        return Err(ModelError(format!("Duplicate values for key '{}'", key)));
                    }
                }
            }
            ('%', None) => partial_key = Some(String::new()),
            (ch, Some(mut key)) => {
                key.push(ch);
                partial_key = Some(key);
            }
            (ch, None) => output.push(ch),
        }
    }
    match partial_key {
        Some(key) => Err(ModelError(format!("Unterminated template key '{}'", key))),
        None => Ok(output),
    }
}

/// A template for an email message.
pub struct EmailTemplate {
    /// Who the message comes from.
    pub from: Mailbox,

    /// Subject of the message.
    pub subject_template: &'static str,

    /// Body of the message.
    pub body_template: &'static str,
}

impl EmailTemplate {
    /// Creates a message sent to `to` based on the template by applying the collection of
    /// `replacements` to it, as described in `expand`.
    pub fn apply(&self, to: &EmailAddress, replacements: &[(&str, &str)]) -> ModelResult<Message> {
        let to = to
            .as_str()
            .parse::<Mailbox>()
            .map_err(|e| ModelError(format!("Cannot send email to {}: {}", to, e)))?;

        let subject = expand(self.subject_template, replacements)?;

        let body = Body::new_with_encoding(
            expand(self.body_template, replacements)?,
            ContentTransferEncoding::QuotedPrintable,
        )
        .map_err(|e| ModelError(format!("Failed to encode message: {:?}", e)))?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .body(body)
            .map_err(|e| ModelError(format!("Failed to encode message: {}", e)))
    }
}

/// Utilities to help testing email messages.
#[cfg(any(test, feature = "testutils"))]
pub mod testutils {
    use super::*;
    use std::collections::HashMap;

    /// Given an SMTP `message`, parses it and extracts its headers and body.
    pub fn parse_message(message: &Message) -> (HashMap<String, String>, String) {
        let text = String::from_utf8(message.formatted()).unwrap();
        let (raw_headers, encoded_body) = text
            .split_once("\r\n\r\n")
            .unwrap_or_else(|| panic!("Message seems to have the wrong format: {}", text));

        let mut headers = HashMap::default();
        for raw_header in raw_headers.split("\r\n") {
            let (key, value) = raw_header
                .split_once(": ")
                .unwrap_or_else(|| panic!("Header seems to have the wrong format: {}", raw_header));
            let previous = headers.insert(key.to_owned(), value.to_owned());
            assert!(previous.is_none(), "Duplicate header {}", raw_header);
        }

        let decoded_body =
            quoted_printable::decode(encoded_body, quoted_printable::ParseMode::Robust).unwrap();
        let body = String::from_utf8(decoded_body).unwrap().replace("\r\n", "\n");

        (headers, body)
    }
}

#[cfg(test)]
mod tests {
    use super::testutils::*;
    use super::*;

    #[test]
    fn test_expand_literals() {
        assert_eq!("", expand("", &[]).unwrap());
        assert_eq!("100% sure %", expand("100%% sure %%", &[]).unwrap());
    }

    #[test]
    fn test_expand_replacements() {
        let replacements = &[("id", "42"), ("nombre", "Ana")];
        assert_eq!("Pedido 42 para Ana", expand("Pedido %id% para %nombre%", replacements).unwrap());
        assert_eq!("42Ana", expand("%id%%nombre%", replacements).unwrap());
    }

    #[test]
    fn test_expand_errors() {
        assert_eq!(
            ModelError("No value for template key 'missing'".to_owned()),
            expand("a %missing% b", &[]).unwrap_err()
        );
        assert_eq!(
            ModelError("Duplicate values for key 'k'".to_owned()),
            expand("%k%", &[("k", "1"), ("k", "2")]).unwrap_err()
        );
        assert_eq!(
            ModelError("Unterminated template key 'open'".to_owned()),
            expand("text %open", &[]).unwrap_err()
        );
    }

    #[test]
    fn test_email_template() {
        let template = EmailTemplate {
            from: "CiberLoja <loja@example.com>".parse().unwrap(),
            subject_template: "Pedido %id%",
            body_template: "Hola %nombre%, el pedido %id% cuesta 10 = 5 + 5.",
        };

        let message = template
            .apply(
                &EmailAddress::from("cliente@example.com"),
                &[("id", "7"), ("nombre", "Ana")],
            )
            .unwrap();
        let (headers, body) = parse_message(&message);

        assert_eq!("CiberLoja <loja@example.com>", headers.get("From").unwrap());
        assert_eq!("cliente@example.com", headers.get("To").unwrap());
        assert_eq!("Pedido 7", headers.get("Subject").unwrap());
        assert_eq!("Hola Ana, el pedido 7 cuesta 10 = 5 + 5.", body);
    }

    #[test]
    fn test_email_template_bad_replacements() {
        let template = EmailTemplate {
            from: "loja@example.com".parse().unwrap(),
            subject_template: "Subject",
            body_template: "Body with %unknown%",
        };
        template.apply(&EmailAddress::from("cliente@example.com"), &[]).unwrap_err();
    }
}
