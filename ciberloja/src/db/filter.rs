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

//! Dynamic `WHERE` clauses built from search criteria.

use sqlx::{QueryBuilder, Sqlite};

/// A value to bind to a query condition.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Value {
    /// An integer.
    Int(i64),

    /// A floating point number.
    Real(f64),

    /// A string.
    Text(String),
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::Text(value.clone())
    }
}

/// A single condition of the form `<prefix> ? <suffix>`.
#[derive(Debug)]
struct Condition {
    /// SQL text that precedes the bound value.
    prefix: String,

    /// Value to bind.
    value: Value,

    /// SQL text that follows the bound value.
    suffix: &'static str,
}

/// A conjunction of conditions on the columns of a table.  An empty filter matches all rows.
#[derive(Debug, Default)]
pub(crate) struct Filter {
    /// Conditions that must all hold.
    conditions: Vec<Condition>,
}

impl Filter {
    /// Adds a condition unless `value` is missing.
    fn add<V: Into<Value>>(
        &mut self,
        prefix: String,
        value: Option<V>,
        suffix: &'static str,
    ) -> &mut Self {
        if let Some(value) = value {
            self.conditions.push(Condition { prefix, value: value.into(), suffix });
        }
        self
    }

    /// Requires `column` to be equal to `value`, if present.
    pub(crate) fn equal<V: Into<Value>>(&mut self, column: &str, value: Option<V>) -> &mut Self {
        self.add(format!("{} = ", column), value, "")
    }

    /// Requires `column` to be greater than or equal to `value`, if present.
    pub(crate) fn at_least<V: Into<Value>>(&mut self, column: &str, value: Option<V>) -> &mut Self {
        self.add(format!("{} >= ", column), value, "")
    }

    /// Requires `column` to be less than or equal to `value`, if present.
    pub(crate) fn at_most<V: Into<Value>>(&mut self, column: &str, value: Option<V>) -> &mut Self {
        self.add(format!("{} <= ", column), value, "")
    }

    /// Requires `column` to contain the substring `value`, ignoring ASCII case, if present.
    pub(crate) fn contains(&mut self, column: &str, value: Option<&String>) -> &mut Self {
        self.add(format!("instr(lower({}), lower(", column), value, ")) > 0")
    }

    /// Appends the `WHERE` clause of this filter to `query`, if there are any conditions.
    pub(crate) fn push_where(&self, query: &mut QueryBuilder<'_, Sqlite>) {
        for (i, condition) in self.conditions.iter().enumerate() {
            query.push(if i == 0 { " WHERE " } else { " AND " });
            query.push(&condition.prefix);
            match &condition.value {
                Value::Int(value) => query.push_bind(*value),
                Value::Real(value) => query.push_bind(*value),
                Value::Text(value) => query.push_bind(value.clone()),
            };
            query.push(condition.suffix);
        }
    }
}
