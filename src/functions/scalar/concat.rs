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

//! CONCAT scalar function

use std::fmt;
use std::sync::Arc;

use crate::core::{Error, Result, Row, Value};
use crate::expression::{normalize_name, quote_identifier, ExpressionBase};

/// One argument of CONCAT
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConcatOperand {
    /// String literal, appended as is
    Literal(String),
    /// Column reference, read off each row
    Column { name: String, normalized: String },
}

impl ConcatOperand {
    /// Literal operand
    pub fn literal(text: impl Into<String>) -> Self {
        ConcatOperand::Literal(text.into())
    }

    /// Column operand; the name is normalized for field lookup
    pub fn column(name: impl Into<String>) -> Self {
        let name = name.into();
        let normalized = normalize_name(&name);
        ConcatOperand::Column { name, normalized }
    }
}

impl fmt::Display for ConcatOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConcatOperand::Literal(text) => write!(f, "'{}'", text.replace('\'', "''")),
            ConcatOperand::Column { name, .. } => write!(f, "{}", quote_identifier(name)),
        }
    }
}

/// CONCAT function - concatenates literals and column values of a row
///
/// NULL and missing columns contribute nothing; other values are appended
/// in their display form.
#[derive(Debug, Clone)]
pub struct ConcatFunction {
    base: ExpressionBase,
    operands: Vec<ConcatOperand>,
}

impl ConcatFunction {
    /// Create CONCAT over `operands`; at least one is required
    pub fn new(operands: Vec<ConcatOperand>) -> Result<Self> {
        if operands.is_empty() {
            return Err(Error::illegal_argument(
                "CONCAT requires at least 1 argument",
            ));
        }
        Ok(Self {
            base: ExpressionBase::new("concat")?,
            operands,
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

    /// The arguments, in call order
    pub fn operands(&self) -> &[ConcatOperand] {
        &self.operands
    }

    /// Concatenate the operands for `row`
    pub fn evaluate(&self, row: &Row) -> Value {
        let mut result = String::new();
        for operand in &self.operands {
            match operand {
                ConcatOperand::Literal(text) => result.push_str(text),
                ConcatOperand::Column { normalized, .. } => match row.get(normalized) {
                    None | Some(Value::Null) => {}
                    Some(Value::Text(s)) => result.push_str(s),
                    Some(value) => result.push_str(&value.to_string()),
                },
            }
        }
        Value::Text(Arc::from(result.as_str()))
    }

    /// Write the concatenation for `row` onto `partial`
    pub fn process(&self, row: &Row, partial: &mut Row) {
        partial.set(self.base.output_property(), self.evaluate(row));
    }
}

impl fmt::Display for ConcatFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CONCAT(")?;
        for (i, operand) in self.operands.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", operand)?;
        }
        write!(f, ")")?;
        self.base.fmt_alias(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_name() -> ConcatFunction {
        ConcatFunction::new(vec![
            ConcatOperand::column("first"),
            ConcatOperand::literal(" "),
            ConcatOperand::column("last"),
        ])
        .unwrap()
    }

    #[test]
    fn test_concat_columns_and_literals() {
        let concat = full_name();
        let row = Row::new().with("first", "Ada").with("last", "Lovelace");
        let mut partial = Row::new();
        concat.process(&row, &mut partial);
        assert_eq!(partial.get("concat"), Some(&Value::text("Ada Lovelace")));
    }

    #[test]
    fn test_concat_skips_null_and_missing() {
        let concat = full_name();
        let row = Row::new().with("first", "Ada").with("last", Value::null());
        assert_eq!(concat.evaluate(&row), Value::text("Ada "));
        assert_eq!(concat.evaluate(&Row::new()), Value::text(" "));
    }

    #[test]
    fn test_concat_non_text_values() {
        let concat = ConcatFunction::new(vec![
            ConcatOperand::column("id"),
            ConcatOperand::literal("-"),
            ConcatOperand::column("ok"),
        ])
        .unwrap();
        let row = Row::new().with("id", 7i64).with("ok", true);
        assert_eq!(concat.evaluate(&row), Value::text("7-true"));
    }

    #[test]
    fn test_concat_alias() {
        let mut concat = full_name();
        concat.base_mut().set_alias("full");
        let mut partial = Row::new();
        concat.process(&Row::new().with("first", "A").with("last", "B"), &mut partial);
        assert_eq!(partial.get("full"), Some(&Value::text("A B")));
    }

    #[test]
    fn test_concat_requires_operands() {
        let err = ConcatFunction::new(Vec::new()).unwrap_err();
        assert!(err.is_illegal_argument());
    }

    #[test]
    fn test_display() {
        let mut concat = full_name();
        concat.base_mut().set_alias("full");
        assert_eq!(concat.to_string(), "CONCAT(first, ' ', last) AS full");

        let concat = ConcatFunction::new(vec![
            ConcatOperand::column("First Name"),
            ConcatOperand::literal("it's"),
        ])
        .unwrap();
        assert_eq!(concat.to_string(), "CONCAT([First Name], 'it''s')");
    }
}
