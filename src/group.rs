// Copyright 2025 Stoolap Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! GROUP BY support
//!
//! Aggregates do not know how rows are grouped. They ask a
//! [`GroupByProvider`] for the [`GroupKey`] of every row and keep one
//! accumulator per key id. The same provider recomputes keys from output
//! rows, which is how several aggregates of one statement find and share
//! the row of a group.

use std::fmt;
use std::fmt::Write;

use smallvec::SmallVec;

use crate::core::{Row, Value};
use crate::expression::normalize_name;

/// Identity of a group plus the grouping-column values copied onto its
/// output row
#[derive(Debug, Clone, PartialEq)]
pub struct GroupKey {
    /// Opaque id; equal ids mean the same group
    pub id: String,
    /// Grouping columns as `(output field, value)`
    pub values: SmallVec<[(String, Value); 2]>,
}

impl GroupKey {
    /// Create a key from an id and its grouping values
    pub fn new(id: impl Into<String>, values: impl IntoIterator<Item = (String, Value)>) -> Self {
        Self {
            id: id.into(),
            values: values.into_iter().collect(),
        }
    }

    /// Output row holding only the grouping columns
    pub fn to_row(&self) -> Row {
        self.values
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    /// Like [`GroupKey::to_row`], consuming the key
    pub fn into_row(self) -> Row {
        self.values.into_iter().collect()
    }
}

/// Source of group keys for GROUP BY evaluation
///
/// Implementations must return the same id for an input row and for an
/// output row that carries that row's grouping columns.
pub trait GroupByProvider: Send + Sync + fmt::Debug {
    /// Compute the group key of a row
    fn group_key(&self, row: &Row) -> GroupKey;
}

/// Groups rows by the values of one or more columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnGroupBy {
    /// Normalized grouping column names
    columns: Vec<String>,
}

impl ColumnGroupBy {
    /// Group on the given columns; names are normalized like select
    /// expression columns (`First Name` reads field `First_Name`)
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            columns: columns
                .into_iter()
                .map(|c| normalize_name(c.as_ref().trim()))
                .filter(|c| !c.is_empty())
                .collect(),
        }
    }

    /// Parse a comma-separated list of grouping columns
    pub fn parse(list: &str) -> Self {
        Self::new(list.split(','))
    }

    /// The normalized grouping columns
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

impl GroupByProvider for ColumnGroupBy {
    fn group_key(&self, row: &Row) -> GroupKey {
        let mut id = String::new();
        let mut values = SmallVec::new();
        for column in &self.columns {
            let value = row.get(column).cloned().unwrap_or_default();
            encode_value(&mut id, &value);
            values.push((column.clone(), value));
        }
        GroupKey { id, values }
    }
}

/// Append a type-tagged, length-prefixed encoding of `value` to `id`
///
/// The tag keeps `1` and `'1'` apart; the length prefix keeps
/// `('a|b', 'c')` and `('a', 'b|c')` apart. Integer and Float share a tag
/// and equal values encode alike, matching `Value` equality.
fn encode_value(id: &mut String, value: &Value) {
    let text = match value {
        Value::Null => String::new(),
        Value::Integer(_) | Value::Float(_) => match value.as_exact_integer() {
            Some(i) => i.to_string(),
            None => value.to_string(),
        },
        Value::Timestamp(t) => t.timestamp_nanos_opt().unwrap_or_default().to_string(),
        other => other.to_string(),
    };
    // Writing to a String cannot fail
    let _ = write!(id, "{}{}:{}|", value.data_type().tag(), text.len(), text);
}
