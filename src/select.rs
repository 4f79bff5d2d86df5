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

//! Select list evaluation
//!
//! [`SelectList`] drives the start/process/end protocol of its expressions
//! over a sequence of rows.

use std::fmt;
use std::sync::Arc;

use crate::config::SelectConfig;
use crate::core::{Result, ResultSet, Row};
use crate::expression::SelectExpression;
use crate::group::GroupByProvider;
use crate::parser::SelectParser;

/// A parsed select list
#[derive(Debug, Clone)]
pub struct SelectList {
    expressions: Vec<SelectExpression>,
}

impl SelectList {
    /// Parse `input` with the default configuration
    pub fn parse(input: &str) -> Result<Self> {
        Self::parse_with_config(input, SelectConfig::default())
    }

    /// Parse `input` with `config`
    pub fn parse_with_config(input: &str, config: SelectConfig) -> Result<Self> {
        let expressions = SelectParser::with_config(input, config).collect::<Result<Vec<_>>>()?;
        Ok(Self { expressions })
    }

    /// Wrap already built expressions
    pub fn from_expressions(expressions: Vec<SelectExpression>) -> Self {
        Self { expressions }
    }

    /// The expressions, in select-list order
    pub fn expressions(&self) -> &[SelectExpression] {
        &self.expressions
    }

    /// The expressions, mutable
    pub fn expressions_mut(&mut self) -> &mut [SelectExpression] {
        &mut self.expressions
    }

    /// Number of expressions
    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    /// Returns true if the list has no expressions
    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    /// Group every expression with `provider`
    pub fn set_group_by(&mut self, provider: Arc<dyn GroupByProvider>) {
        for expression in &mut self.expressions {
            expression.set_group_by(Some(Arc::clone(&provider)));
        }
    }

    /// Remove grouping from every expression
    pub fn clear_group_by(&mut self) {
        for expression in &mut self.expressions {
            expression.set_group_by(None);
        }
    }

    /// Returns true if any expression is an aggregate
    pub fn has_aggregates(&self) -> bool {
        self.expressions.iter().any(SelectExpression::is_aggregate)
    }

    /// Evaluate the list over `rows`
    ///
    /// With an aggregate in the list, only aggregates are evaluated and the
    /// result holds one row (ungrouped) or one row per group, grouping
    /// columns first. Otherwise every input row yields one output row.
    pub fn execute<'a, I>(&mut self, rows: I) -> Result<ResultSet>
    where
        I: IntoIterator<Item = &'a Row>,
    {
        let mut result = ResultSet::new();
        for expression in &mut self.expressions {
            expression.start(&mut result);
        }

        let aggregate = self.has_aggregates();
        let mut processed = 0usize;
        if aggregate {
            let mut scratch = Row::new();
            for row in rows {
                for expression in self.expressions.iter_mut().filter(|e| e.is_aggregate()) {
                    expression.process(row, &mut scratch)?;
                }
                processed += 1;
            }
        } else {
            for row in rows {
                let mut partial = Row::with_capacity(self.expressions.len());
                for expression in &mut self.expressions {
                    expression.process(row, &mut partial)?;
                }
                result.push(partial);
                processed += 1;
            }
        }

        for expression in &mut self.expressions {
            expression.end(&mut result);
        }

        log::debug!(
            "Evaluated [{}] over {} rows into {} result rows",
            self,
            processed,
            result.len()
        );
        Ok(result)
    }
}

impl fmt::Display for SelectList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, expression) in self.expressions.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", expression)?;
        }
        Ok(())
    }
}

impl IntoIterator for SelectList {
    type Item = SelectExpression;
    type IntoIter = std::vec::IntoIter<SelectExpression>;

    fn into_iter(self) -> Self::IntoIter {
        self.expressions.into_iter()
    }
}
