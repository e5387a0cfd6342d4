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

//! Building blocks shared by the CiberLoja services.
//!
//! Services built on top of this crate follow a layered architecture and should structure their
//! code to have these modules as well:
//!
//! 1.  `model`: The base layer, holding the data types that represent concepts in the domain of
//!     the application.  Types here validate themselves on construction so that the rest of the
//!     code can trust them.
//!
//! 1.  `db`: The persistence layer.  Operations are free functions or trait implementations that
//!     take an `Executor`, which can be backed by a pooled connection or by an open transaction.
//!
//! 1.  `driver`: The business logic layer.  Services provide their own `Driver` type that holds
//!     the shared state of the app (database, clock, mailer...) and coordinates transactions.
//!
//! 1.  `rest`: The HTTP layer.  Services provide an `axum::Router` whose handlers are backed by
//!     the `Driver`.
//!
//! 1.  `main`: The launcher.  Its sole purpose is to gather configuration from environment
//!     variables and call the service's `serve` function.
//!
//! Every layer has its own result and error types, such as `DbResult` and `DbError`.  Errors float
//! up with the `?` operator and turn into HTTP status codes once they leave the REST layer.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

pub mod clocks;
pub mod db;
pub mod driver;
pub mod env;
pub mod model;
pub mod rest;
