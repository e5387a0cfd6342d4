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

//! Pagination of search results.

use ciberloja_core::model::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};

/// Selects a page of results.  Pages are numbered from 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PageRequest {
    /// Maximum number of items per page, or `None` if pages are unbounded.
    size: Option<u32>,

    /// Number of items to skip before the requested page.
    offset: i64,
}

impl PageRequest {
    /// Creates a page request from the optional `page` and `size` query parameters.
    pub(crate) fn new(page: Option<u32>, size: Option<u32>) -> ModelResult<Self> {
        let page = page.unwrap_or(1);
        if page < 1 {
            return Err(ModelError("Page numbers start at 1".to_owned()));
        }
        if size == Some(0) {
            return Err(ModelError("Page size must be at least 1".to_owned()));
        }
        if size.is_none() && page > 1 {
            return Err(ModelError("Cannot request page > 1 without a page size".to_owned()));
        }
        let offset = match size {
            Some(size) => i64::from(page - 1)
                .checked_mul(i64::from(size))
                .ok_or_else(|| ModelError("Page out of range".to_owned()))?,
            None => 0,
        };
        Ok(Self { size, offset })
    }

    /// Returns a request for all results in a single page.
    pub(crate) fn all() -> Self {
        Self { size: None, offset: 0 }
    }

    /// Returns the `LIMIT` to apply to a query.  `-1` means no limit.
    pub(crate) fn limit(&self) -> i64 {
        match self.size {
            Some(size) => i64::from(size),
            None => -1,
        }
    }

    /// Returns the `OFFSET` to apply to a query.
    pub(crate) fn offset(&self) -> i64 {
        self.offset
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::all()
    }
}

/// A page of search results and the total number of matches across all pages.
#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub(crate) struct PagedResult<T> {
    /// Items in the requested page.
    pub(crate) items: Vec<T>,

    /// Number of items matching the search, ignoring pagination.
    pub(crate) total: u64,
}
