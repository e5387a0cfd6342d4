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

//! Serialization of calendar dates as `yyyy-MM-dd` strings.

use ciberloja_core::db::{DbError, DbResult};
use time::Date;

time::serde::format_description!(pub(crate) date_format, Date, "[year]-[month]-[day]");

/// Converts a `date` into the number that represents it in the database.
pub(crate) fn date_to_db(date: Date) -> i32 {
    date.to_julian_day()
}

/// Converts a number extracted from the database into a `Date`.
pub(crate) fn date_from_db(julian_day: i32) -> DbResult<Date> {
    Date::from_julian_day(julian_day)
        .map_err(|e| DbError::DataIntegrityError(format!("Invalid date {}: {}", julian_day, e)))
}
