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

//! The `ResetToken` data type.

use ciberloja_core::model::{ModelError, ModelResult};
use rand::Rng;
use serde::Deserialize;
use std::fmt;

/// Length of the password reset tokens, in characters.
const TOKEN_LENGTH: usize = 64;

/// Alphabet from which token characters are drawn.
const TOKEN_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// A single-use token that authorizes changing the password of a cliente.
#[derive(Clone, Deserialize, Eq, PartialEq)]
#[serde(try_from = "String")]
#[cfg_attr(test, derive(serde::Serialize))]
pub(crate) struct ResetToken(String);

impl ResetToken {
    /// Creates a token from its textual representation after validating it.
    pub(crate) fn new<S: Into<String>>(token: S) -> ModelResult<Self> {
        let token = token.into();
        if token.len() != TOKEN_LENGTH || !token.chars().all(|ch| ch.is_ascii_alphanumeric()) {
            return Err(ModelError("Invalid reset token".to_owned()));
        }
        Ok(Self(token))
    }

    /// Generates a new random token.
    pub(crate) fn generate() -> Self {
        let mut rng = rand::rng();
        let token = (0..TOKEN_LENGTH)
            .map(|_| char::from(TOKEN_ALPHABET[rng.random_range(0..TOKEN_ALPHABET.len())]))
            .collect::<String>();
        Self(token)
    }

    /// Returns the string representation of the token.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ResetToken {
    type Error = ModelError;

    fn try_from(token: String) -> ModelResult<Self> {
        ResetToken::new(token)
    }
}

impl fmt::Debug for ResetToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("scrubbed reset token")
    }
}
