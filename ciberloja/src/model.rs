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

//! High-level data types of the store.

mod cliente;
pub(crate) use cliente::*;
mod dates;
pub(crate) use dates::{date_format, date_from_db, date_to_db};
mod direccion;
pub(crate) use direccion::*;
mod empleado;
pub(crate) use empleado::*;
mod geo;
pub(crate) use geo::*;
mod ids;
pub(crate) use ids::*;
mod images;
pub(crate) use images::*;
mod paging;
pub(crate) use paging::*;
mod passwords;
pub(crate) use passwords::*;
mod pedido;
pub(crate) use pedido::*;
mod prices;
pub(crate) use prices::*;
mod producto;
pub(crate) use producto::*;
mod tokens;
pub(crate) use tokens::*;
