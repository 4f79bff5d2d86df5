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

//! Plain column projection

use std::fmt;

use super::base::ExpressionBase;
use super::quote_identifier;
use crate::core::{Result, Row, Value};

/// Copies one column of each row onto the partial result
///
/// `*` copies every field of the row.
#[derive(Debug, Clone)]
pub struct ColumnExpression {
    base: ExpressionBase,
}

impl ColumnExpression {
    /// Create a projection of `column_name`
    pub fn new(column_name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            base: ExpressionBase::new(column_name)?,
        })
    }

    /// Shared expression data
    pub fn base(&self) -> &ExpressionBase {
        &self.base
    }

    /// Shared expression data, mutable
    pub fn base_mut(&mut self) -> &mut ExpressionBase {
        &mut self.base
    }

    /// Copy the column onto `partial`; a missing field is written as NULL
    pub fn process(&self, row: &Row, partial: &mut Row) {
        if self.base.is_star() {
            for (name, value) in row.iter() {
                partial.set(name, value.clone());
            }
            return;
        }
        let value = row
            .get(self.base.column_name_normalized())
            .cloned()
            .unwrap_or(Value::Null);
        partial.set(self.base.output_property(), value);
    }
}

impl fmt::Display for ColumnExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.base.is_star() {
            write!(f, "*")?;
        } else {
            write!(f, "{}", quote_identifier(self.base.column_name()))?;
        }
        self.base.fmt_alias(f)
    }
}
