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

//! Aggregate Functions
//!
//! This module provides the aggregate functions of a select list:
//!
//! - [`AvgFunction`] - AVG(column)
//! - [`CountFunction`] - COUNT(*) and COUNT(column)
//! - [`MaxFunction`] - MAX(column)
//! - [`MinFunction`] - MIN(column)
//! - [`SumFunction`] - SUM(column)
//!
//! All of them are [`Aggregate`] over a function-specific [`Accumulator`].
//! The aggregate owns the start/process/end lifecycle: it keeps one scope
//! (accumulator plus DISTINCT tracker) for the ungrouped case and one per
//! group, and merges finished values into the result set.

mod avg;
mod count;
mod max;
mod min;
mod sum;

pub use avg::{AvgAccumulator, AvgFunction};
pub use count::{CountAccumulator, CountFunction};
pub use max::{MaxAccumulator, MaxFunction};
pub use min::{MinAccumulator, MinFunction};
pub use sum::{SumAccumulator, SumFunction};

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::config::NumericPolicy;
use crate::core::{Error, Result, ResultSet, Row, Value};
use crate::expression::{quote_identifier, ExpressionBase};
use crate::group::{GroupByProvider, GroupKey};

/// Function-specific running state of an aggregate
pub trait Accumulator: Default + Clone + fmt::Debug + Send + Sync {
    /// SQL function name
    const NAME: &'static str;

    /// Prefix of the default output property (`sum` gives `sum_<column>`)
    const PROPERTY_PREFIX: &'static str;

    /// Whether `*` is a valid argument
    const ACCEPTS_STAR: bool = false;

    /// Whether DISTINCT deduplicates input values
    const TRACKS_DISTINCT: bool = true;

    /// Whether input values must be numeric (SUM, AVG)
    const NUMERIC: bool = false;

    /// Fold one non-NULL value into the state
    fn accumulate(&mut self, value: &Value, policy: NumericPolicy) -> Result<()>;

    /// Count one row for the `*` argument
    fn accumulate_row(&mut self) {}

    /// Final value of the state
    fn result(&self) -> Value;
}

/// Helper struct for tracking distinct values
#[derive(Default, Debug, Clone)]
pub struct DistinctTracker {
    seen: FxHashSet<Value>,
}

impl DistinctTracker {
    /// Check if a value has been seen before (returns true if new)
    pub fn check_and_add(&mut self, value: &Value) -> bool {
        if value.is_null() {
            return false;
        }
        if self.seen.contains(value) {
            return false;
        }
        self.seen.insert(value.clone())
    }

    /// Get the count of distinct values
    pub fn count(&self) -> usize {
        self.seen.len()
    }

    /// Reset the tracker
    pub fn reset(&mut self) {
        self.seen.clear();
    }
}

/// Accumulator plus DISTINCT tracker for one scope (everything, or one group)
#[derive(Default, Debug, Clone)]
struct Scope<A> {
    accumulator: A,
    distinct: DistinctTracker,
}

/// Scope of one group, with the key it was created from
#[derive(Debug, Clone)]
struct GroupState<A> {
    key: GroupKey,
    scope: Scope<A>,
}

/// An aggregate function of a select list
#[derive(Debug, Clone)]
pub struct Aggregate<A: Accumulator> {
    base: ExpressionBase,
    distinct: bool,
    numeric_policy: NumericPolicy,
    total: Scope<A>,
    groups: Vec<GroupState<A>>,
    group_index: FxHashMap<String, usize>,
}

impl<A: Accumulator> Aggregate<A> {
    /// Create the aggregate over `column_name`
    ///
    /// Fails with `IllegalArgument` for an empty column, and for `*` unless
    /// the function counts rows.
    pub fn new(column_name: impl Into<String>, distinct: bool) -> Result<Self> {
        let column_name = column_name.into();
        if column_name.is_empty() {
            return Err(Error::illegal_argument(format!(
                "{} requires a column name",
                A::NAME
            )));
        }
        if column_name == "*" && !A::ACCEPTS_STAR {
            return Err(Error::illegal_argument(format!(
                "{} does not accept '*'",
                A::NAME
            )));
        }
        Ok(Self {
            base: ExpressionBase::new(column_name)?,
            distinct,
            numeric_policy: NumericPolicy::default(),
            total: Scope::default(),
            groups: Vec::new(),
            group_index: FxHashMap::default(),
        })
    }

    /// Set how non-numeric input is handled
    pub fn with_numeric_policy(mut self, policy: NumericPolicy) -> Self {
        self.numeric_policy = policy;
        self
    }

    /// SQL function name
    pub fn name(&self) -> &'static str {
        A::NAME
    }

    /// Shared expression data
    pub fn base(&self) -> &ExpressionBase {
        &self.base
    }

    /// Shared expression data, mutable
    pub fn base_mut(&mut self) -> &mut ExpressionBase {
        &mut self.base
    }

    /// Whether DISTINCT was given
    pub fn is_distinct(&self) -> bool {
        self.distinct
    }

    /// Non-numeric handling
    pub fn numeric_policy(&self) -> NumericPolicy {
        self.numeric_policy
    }

    /// Field the final value is written to
    ///
    /// The alias if set, else `<prefix>_<column>`, or the bare prefix for `*`.
    pub fn output_property(&self) -> Cow<'_, str> {
        if self.base.has_alias() {
            Cow::Borrowed(self.base.alias_normalized())
        } else if self.base.is_star() {
            Cow::Borrowed(A::PROPERTY_PREFIX)
        } else {
            Cow::Owned(format!(
                "{}_{}",
                A::PROPERTY_PREFIX,
                self.base.column_name_normalized()
            ))
        }
    }

    /// Number of groups accumulated since the last `start`
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Reset all accumulated state
    pub fn start(&mut self) {
        self.total = Scope::default();
        self.groups.clear();
        self.group_index.clear();
    }

    /// Fold one row into the ungrouped scope or the scope of its group
    ///
    /// NULL and missing values are ignored, except that `*` counts every row.
    pub fn process(&mut self, row: &Row) -> Result<()> {
        if self.base.is_star() {
            self.scope_for(row).accumulator.accumulate_row();
            return Ok(());
        }

        let Some(value) = row
            .get(self.base.column_name_normalized())
            .filter(|value| !value.is_null())
        else {
            return Ok(());
        };

        let track_distinct = self.distinct && A::TRACKS_DISTINCT;
        let policy = self.numeric_policy;
        // A rejected value must not reach the DISTINCT tracker
        if A::NUMERIC && track_distinct {
            numeric_operand(A::NAME, value, policy)?;
        }
        let scope = self.scope_for(row);
        if track_distinct && !scope.distinct.check_and_add(value) {
            return Ok(());
        }
        scope.accumulator.accumulate(value, policy)
    }

    /// Write the final value(s) into `result`
    ///
    /// Ungrouped, the value goes to row 0. Grouped, each group's value goes
    /// to the existing row with the same group id, or to a new row built
    /// from the group key.
    pub fn end(&mut self, result: &mut ResultSet) {
        let property = self.output_property().into_owned();

        let Some(provider) = self.base.group_by().cloned() else {
            let value = self.total.accumulator.result();
            log::debug!("{} finalized: {} = {}", self, property, value);
            result.first_or_insert().set(property, value);
            return;
        };

        let mut index = result.group_index(provider.as_ref());
        let mut merged = 0usize;
        let groups = std::mem::take(&mut self.groups);
        self.group_index.clear();
        for group in groups {
            let value = group.scope.accumulator.result();
            match index.get(&group.key.id) {
                Some(&row) => {
                    if let Some(row) = result.get_mut(row) {
                        row.set(property.as_str(), value);
                        merged += 1;
                    }
                }
                None => {
                    index.insert(group.key.id.clone(), result.len());
                    let mut row = group.key.into_row();
                    row.set(property.as_str(), value);
                    result.push(row);
                }
            }
        }
        log::debug!(
            "{} finalized: {} groups merged into existing rows, result has {} rows",
            self,
            merged,
            result.len()
        );
    }

    /// Scope for `row`, creating the group's scope on first sight
    fn scope_for(&mut self, row: &Row) -> &mut Scope<A> {
        let provider: Arc<dyn GroupByProvider> = match self.base.group_by() {
            Some(provider) => Arc::clone(provider),
            None => return &mut self.total,
        };
        let key = provider.group_key(row);
        let index = match self.group_index.get(&key.id) {
            Some(&index) => index,
            None => {
                let index = self.groups.len();
                self.group_index.insert(key.id.clone(), index);
                self.groups.push(GroupState {
                    key,
                    scope: Scope::default(),
                });
                index
            }
        };
        &mut self.groups[index].scope
    }
}

impl<A: Accumulator> fmt::Display for Aggregate<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", A::NAME)?;
        if self.distinct {
            write!(f, "DISTINCT ")?;
        }
        if self.base.is_star() {
            write!(f, "*)")?;
        } else {
            write!(f, "{})", quote_identifier(self.base.column_name()))?;
        }
        self.base.fmt_alias(f)
    }
}

/// Numeric view of an input value for SUM and AVG
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Numeric {
    Integer(i64),
    Float(f64),
}

impl Numeric {
    pub(crate) fn as_f64(self) -> f64 {
        match self {
            Numeric::Integer(i) => i as f64,
            Numeric::Float(f) => f,
        }
    }
}

/// Interpret `value` as a number under `policy`
///
/// Returns `Ok(None)` when a coercing policy skips the value.
pub(crate) fn numeric_operand(
    function: &str,
    value: &Value,
    policy: NumericPolicy,
) -> Result<Option<Numeric>> {
    match value {
        Value::Integer(i) => return Ok(Some(Numeric::Integer(*i))),
        Value::Float(f) => return Ok(Some(Numeric::Float(*f))),
        _ => {}
    }

    if policy == NumericPolicy::Reject {
        return Err(Error::type_error(format!(
            "{} cannot use {} value '{}'",
            function,
            value.data_type(),
            value
        )));
    }

    let coerced = match value {
        Value::Boolean(b) => Some(Numeric::Integer(i64::from(*b))),
        Value::Text(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .map(Numeric::Integer)
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(Numeric::Float))
        }
        _ => None,
    };
    if coerced.is_none() {
        log::trace!(
            "{} skipped non-numeric {} value '{}'",
            function,
            value.data_type(),
            value
        );
    }
    Ok(coerced)
}
