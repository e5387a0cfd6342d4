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

//! Identifiers and stored records.

use ciberloja_core::model::{ModelError, ModelResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use validator::{Validate, ValidationErrors};

/// Identifier assigned by the database to a stored entity.  Always positive.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub(crate) struct EntityId(i64);

impl EntityId {
    /// Creates a new identifier after validating that it is positive.
    pub(crate) fn new(id: i64) -> ModelResult<Self> {
        if id <= 0 {
            return Err(ModelError(format!("Invalid id {}: must be positive", id)));
        }
        Ok(Self(id))
    }

    /// Returns the raw value of the identifier.
    pub(crate) fn as_i64(self) -> i64 {
        self.0
    }
}

#[cfg(test)]
impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        Self::new(id).unwrap()
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let id = i64::deserialize(deserializer)?;
        EntityId::new(id).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An entity of type `T` as stored in the database, paired with its identifier.
///
/// Serializes as a flat object with the `id` next to the fields of `T`.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub(crate) struct Record<T> {
    /// Identifier of the entity.
    pub(crate) id: EntityId,

    /// Contents of the entity.
    #[serde(flatten)]
    pub(crate) data: T,
}

impl<T> Record<T> {
    /// Pairs `data` with its `id`.
    pub(crate) fn new(id: EntityId, data: T) -> Self {
        Self { id, data }
    }
}

impl<T: Validate> Validate for Record<T> {
    fn validate(&self) -> Result<(), ValidationErrors> {
        self.data.validate()
    }
}
