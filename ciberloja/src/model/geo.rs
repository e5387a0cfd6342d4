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

//! Administrative geography of Spain and Portugal.  These entities are read-only.

use crate::model::EntityId;
use serde::Serialize;

/// A country.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
#[serde(rename_all = "camelCase")]
pub(crate) struct Pais {
    /// Name of the country.
    pub(crate) nombre: String,
}

/// A Spanish province.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
#[serde(rename_all = "camelCase")]
pub(crate) struct Provincia {
    /// Name of the province.
    pub(crate) nombre: String,

    /// Country the province belongs to.
    pub(crate) pais_id: EntityId,
}

/// A Spanish town.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
#[serde(rename_all = "camelCase")]
pub(crate) struct Localidad {
    /// Name of the town.
    pub(crate) nombre: String,

    /// Postal code, if known.
    pub(crate) codigo_postal: Option<String>,

    /// Province the town belongs to.
    pub(crate) provincia_id: EntityId,
}

/// A Portuguese district.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
#[serde(rename_all = "camelCase")]
pub(crate) struct Distrito {
    /// Name of the district.
    pub(crate) nombre: String,
}

/// A Portuguese municipality.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
#[serde(rename_all = "camelCase")]
pub(crate) struct Concelho {
    /// Name of the municipality.
    pub(crate) nombre: String,

    /// District the municipality belongs to.
    pub(crate) distrito_id: EntityId,
}

/// A Portuguese parish.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
#[serde(rename_all = "camelCase")]
pub(crate) struct Freguesia {
    /// Name of the parish.
    pub(crate) nombre: String,

    /// Municipality the parish belongs to.
    pub(crate) concelho_id: EntityId,
}
