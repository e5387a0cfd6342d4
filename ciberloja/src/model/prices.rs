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

//! Validation of monetary amounts.

use serde::{Deserialize, Deserializer, de};
use validator::ValidationError;

/// Validates that `precio` is a finite and non-negative amount.
pub(crate) fn validate_precio(precio: f64) -> Result<(), ValidationError> {
    if precio.is_finite() && precio >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::new("precio"))
    }
}

/// Deserializes an optional amount used as a search bound, rejecting non-finite values.
///
/// Fields using this must also be marked `#[serde(default)]`.
pub(crate) fn deserialize_finite_bound<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<f64>::deserialize(deserializer)? {
        Some(value) if !value.is_finite() => {
            Err(de::Error::custom(format!("Invalid amount {}", value)))
        }
        value => Ok(value),
    }
}
