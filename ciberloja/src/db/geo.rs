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

//! Persistence of the administrative geography.  These tables are only read by the service.

use crate::db::{ReadTable, get, get_id};
use crate::model::{Concelho, Distrito, Freguesia, Localidad, Pais, Provincia};
use ciberloja_core::db::DbResult;
use sqlx::sqlite::SqliteRow;

/// Implements `ReadTable` for a geography entity whose fields are named like their columns.
macro_rules! geo_table {
    ( $entity:ident, $table:literal, $columns:literal, { $( $field:ident: $getter:ident ),+ } ) => {
        #[async_trait::async_trait]
        impl ReadTable for $entity {
            type Criteria = ();

            const ENTITY: &'static str = stringify!($entity);
            const TABLE: &'static str = $table;
            const COLUMNS: &'static str = $columns;

            fn from_row(row: &SqliteRow) -> DbResult<Self> {
                Ok($entity { $( $field: $getter(row, stringify!($field))? ),+ })
            }
        }
    };
}

geo_table!(Pais, "paises", "nombre", { nombre: get });

geo_table!(Provincia, "provincias", "nombre, pais_id", { nombre: get, pais_id: get_id });

geo_table!(Localidad, "localidades", "nombre, codigo_postal, provincia_id", {
    nombre: get,
    codigo_postal: get,
    provincia_id: get_id
});

geo_table!(Distrito, "distritos", "nombre", { nombre: get });

geo_table!(Concelho, "concelhos", "nombre, distrito_id", { nombre: get, distrito_id: get_id });

geo_table!(Freguesia, "freguesias", "nombre, concelho_id", { nombre: get, concelho_id: get_id });
