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

//! Result set - the mutable collection of output rows
//!
//! Several expressions of one statement write into the same result set:
//! ungrouped aggregates share row 0, grouped aggregates merge into the row
//! of their group.

use std::ops::Index;

use rustc_hash::FxHashMap;

use super::row::Row;
use crate::group::GroupByProvider;

/// Ordered collection of output rows
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultSet {
    rows: Vec<Row>,
}

impl ResultSet {
    /// Create an empty result set
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Create a result set from existing rows
    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if there are no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row at `index`
    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Mutable row at `index`
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Row> {
        self.rows.get_mut(index)
    }

    /// Row 0, created if the result set is empty
    ///
    /// Ungrouped aggregates place their single value here.
    pub fn first_or_insert(&mut self) -> &mut Row {
        if self.rows.is_empty() {
            self.rows.push(Row::new());
        }
        &mut self.rows[0]
    }

    /// Append a row
    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// All rows
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// All rows, mutable
    pub fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    /// Iterate over rows
    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Consume into the row vector
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// Map each row's recomputed group id to its index
    ///
    /// When two rows share a group id the first one wins.
    pub fn group_index(&self, provider: &dyn GroupByProvider) -> FxHashMap<String, usize> {
        let mut index = FxHashMap::default();
        for (i, row) in self.rows.iter().enumerate() {
            index.entry(provider.group_key(row).id).or_insert(i);
        }
        index
    }

    /// Column names in order of first appearance across all rows
    pub fn columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = Vec::new();
        for row in &self.rows {
            for name in row.field_names() {
                if !columns.iter().any(|c| c == name) {
                    columns.push(name.to_string());
                }
            }
        }
        columns
    }

    /// Convert into a JSON array of objects
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(self.rows.iter().map(Row::to_json).collect())
    }
}

impl Index<usize> for ResultSet {
    type Output = Row;

    fn index(&self, index: usize) -> &Row {
        &self.rows[index]
    }
}

impl IntoIterator for ResultSet {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
