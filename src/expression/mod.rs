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

//! Select expressions
//!
//! Every item of a select list is one [`SelectExpression`]: a plain column,
//! one of the aggregate functions, or the CONCAT scalar function. All kinds
//! follow the same evaluation protocol:
//!
//! 1. `start` once before the rows of a statement,
//! 2. `process` once per row, writing per-row values onto a partial result,
//! 3. `end` once, merging aggregated values into the result set.

mod base;
mod column;

pub use base::ExpressionBase;
pub use column::ColumnExpression;

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::core::{Result, ResultSet, Row};
use crate::functions::aggregate::{
    AvgFunction, CountFunction, MaxFunction, MinFunction, SumFunction,
};
use crate::functions::scalar::ConcatFunction;
use crate::group::GroupByProvider;

/// Normalize a column or alias name for field lookup
///
/// Every whitespace character becomes `_`.
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

/// Quote `name` so that it parses back to the same identifier
///
/// Names with whitespace, commas, parentheses or quote characters are
/// bracket-quoted; names containing `]` use double quotes, or single quotes
/// if they also contain `"`.
///
/// Quoted identifiers have no escape, so a name holding all of `]`, `"` and
/// `'` has no text form that parses back to it. Such names never come out
/// of the parser. Inside CONCAT the single-quoted form reads as a literal,
/// so only the bracket and double-quote forms round-trip there.
pub fn quote_identifier(name: &str) -> Cow<'_, str> {
    let needs_quotes = name.is_empty()
        || name
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, ',' | '(' | ')' | '[' | ']' | '"' | '\''));
    if !needs_quotes {
        Cow::Borrowed(name)
    } else if name.contains(']') && !name.contains('"') {
        Cow::Owned(format!("\"{}\"", name))
    } else if name.contains(']') {
        Cow::Owned(format!("'{}'", name))
    } else {
        Cow::Owned(format!("[{}]", name))
    }
}

/// One item of a select list
#[derive(Debug, Clone)]
pub enum SelectExpression {
    Column(ColumnExpression),
    Avg(AvgFunction),
    Count(CountFunction),
    Max(MaxFunction),
    Min(MinFunction),
    Sum(SumFunction),
    Concat(ConcatFunction),
}

macro_rules! dispatch {
    ($self:expr, $e:ident => $body:expr) => {
        match $self {
            SelectExpression::Column($e) => $body,
            SelectExpression::Avg($e) => $body,
            SelectExpression::Count($e) => $body,
            SelectExpression::Max($e) => $body,
            SelectExpression::Min($e) => $body,
            SelectExpression::Sum($e) => $body,
            SelectExpression::Concat($e) => $body,
        }
    };
}

macro_rules! dispatch_aggregate {
    ($self:expr, $e:ident => $body:expr, _ => $other:expr) => {
        match $self {
            SelectExpression::Avg($e) => $body,
            SelectExpression::Count($e) => $body,
            SelectExpression::Max($e) => $body,
            SelectExpression::Min($e) => $body,
            SelectExpression::Sum($e) => $body,
            SelectExpression::Column(_) | SelectExpression::Concat(_) => $other,
        }
    };
}

impl SelectExpression {
    /// Prepare for a new evaluation; resets aggregate state
    pub fn start(&mut self, _result: &mut ResultSet) {
        dispatch_aggregate!(self, agg => agg.start(), _ => {})
    }

    /// Evaluate one row
    ///
    /// Columns and CONCAT write their value onto `partial`; aggregates fold
    /// the row into their accumulator and leave `partial` untouched.
    pub fn process(&mut self, row: &Row, partial: &mut Row) -> Result<()> {
        match self {
            SelectExpression::Column(column) => {
                column.process(row, partial);
                Ok(())
            }
            SelectExpression::Concat(concat) => {
                concat.process(row, partial);
                Ok(())
            }
            SelectExpression::Avg(agg) => agg.process(row),
            SelectExpression::Count(agg) => agg.process(row),
            SelectExpression::Max(agg) => agg.process(row),
            SelectExpression::Min(agg) => agg.process(row),
            SelectExpression::Sum(agg) => agg.process(row),
        }
    }

    /// Finish an evaluation, merging aggregate values into `result`
    pub fn end(&mut self, result: &mut ResultSet) {
        dispatch_aggregate!(self, agg => agg.end(result), _ => {})
    }

    /// Shared expression data
    pub fn base(&self) -> &ExpressionBase {
        dispatch!(self, e => e.base())
    }

    /// Shared expression data, mutable
    pub fn base_mut(&mut self) -> &mut ExpressionBase {
        dispatch!(self, e => e.base_mut())
    }

    /// Field the value of this expression is written to
    pub fn output_property(&self) -> Cow<'_, str> {
        dispatch_aggregate!(
            self,
            agg => agg.output_property(),
            _ => Cow::Borrowed(self.base().output_property())
        )
    }

    /// Set the alias; an empty alias clears it
    pub fn set_alias(&mut self, alias: impl Into<String>) {
        self.base_mut().set_alias(alias);
    }

    /// Set or clear the group-by provider
    pub fn set_group_by(&mut self, group_by: Option<Arc<dyn GroupByProvider>>) {
        self.base_mut().set_group_by(group_by);
    }

    /// Returns true for AVG, COUNT, MAX, MIN and SUM
    pub fn is_aggregate(&self) -> bool {
        dispatch_aggregate!(self, _agg => true, _ => false)
    }

    /// Returns true if DISTINCT was given to an aggregate
    pub fn is_distinct(&self) -> bool {
        dispatch_aggregate!(self, agg => agg.is_distinct(), _ => false)
    }

    /// Raw column name; `concat` for CONCAT
    pub fn column_name(&self) -> &str {
        self.base().column_name()
    }

    /// Raw alias, empty if none
    pub fn alias(&self) -> &str {
        self.base().alias()
    }

    /// Name of the expression kind, as written in SQL for functions
    pub fn kind(&self) -> &'static str {
        match self {
            SelectExpression::Column(_) => "COLUMN",
            SelectExpression::Concat(_) => "CONCAT",
            SelectExpression::Avg(agg) => agg.name(),
            SelectExpression::Count(agg) => agg.name(),
            SelectExpression::Max(agg) => agg.name(),
            SelectExpression::Min(agg) => agg.name(),
            SelectExpression::Sum(agg) => agg.name(),
        }
    }
}

impl fmt::Display for SelectExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch!(self, e => fmt::Display::fmt(e, f))
    }
}

impl From<ColumnExpression> for SelectExpression {
    fn from(column: ColumnExpression) -> Self {
        SelectExpression::Column(column)
    }
}

impl From<ConcatFunction> for SelectExpression {
    fn from(concat: ConcatFunction) -> Self {
        SelectExpression::Concat(concat)
    }
}
