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

//! Data shared by every select expression kind

use std::fmt;
use std::sync::Arc;

use super::{normalize_name, quote_identifier};
use crate::core::{Error, Result};
use crate::group::GroupByProvider;

/// Column, alias and grouping data common to all expressions
#[derive(Clone)]
pub struct ExpressionBase {
    column_name: String,
    column_name_normalized: String,
    alias: String,
    alias_normalized: String,
    output_property: String,
    group_by: Option<Arc<dyn GroupByProvider>>,
}

impl ExpressionBase {
    /// Create a base for `column_name`; the name must not be empty
    pub fn new(column_name: impl Into<String>) -> Result<Self> {
        let column_name = column_name.into();
        if column_name.is_empty() {
            return Err(Error::illegal_argument(
                "select expression requires a column name",
            ));
        }
        let column_name_normalized = normalize_name(&column_name);
        Ok(Self {
            output_property: column_name_normalized.clone(),
            column_name,
            column_name_normalized,
            alias: String::new(),
            alias_normalized: String::new(),
            group_by: None,
        })
    }

    /// Raw column name, quotes stripped; may be `*`
    pub fn column_name(&self) -> &str {
        &self.column_name
    }

    /// Column name used to read fields off rows
    pub fn column_name_normalized(&self) -> &str {
        &self.column_name_normalized
    }

    /// Raw alias, empty if none
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Normalized alias, empty if none
    pub fn alias_normalized(&self) -> &str {
        &self.alias_normalized
    }

    /// Returns true if an alias is set
    pub fn has_alias(&self) -> bool {
        !self.alias.is_empty()
    }

    /// Normalized alias if set, otherwise the normalized column name
    pub fn output_property(&self) -> &str {
        &self.output_property
    }

    /// Set the alias; an empty alias clears it
    pub fn set_alias(&mut self, alias: impl Into<String>) {
        self.alias = alias.into();
        self.alias_normalized = normalize_name(&self.alias);
        self.output_property = if self.alias_normalized.is_empty() {
            self.column_name_normalized.clone()
        } else {
            self.alias_normalized.clone()
        };
    }

    /// Group-by provider, if this expression is evaluated per group
    pub fn group_by(&self) -> Option<&Arc<dyn GroupByProvider>> {
        self.group_by.as_ref()
    }

    /// Set or clear the group-by provider
    pub fn set_group_by(&mut self, group_by: Option<Arc<dyn GroupByProvider>>) {
        self.group_by = group_by;
    }

    /// Returns true for the `*` column
    pub fn is_star(&self) -> bool {
        self.column_name == "*"
    }

    /// Write ` AS <alias>` if an alias is set
    pub(crate) fn fmt_alias(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_alias() {
            write!(f, " AS {}", quote_identifier(&self.alias))?;
        }
        Ok(())
    }
}

impl fmt::Debug for ExpressionBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpressionBase")
            .field("column_name", &self.column_name)
            .field("alias", &self.alias)
            .field("output_property", &self.output_property)
            .field("group_by", &self.group_by)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::ColumnGroupBy;

    #[test]
    fn test_normalized_names() {
        let base = ExpressionBase::new("First Name").unwrap();
        assert_eq!(base.column_name(), "First Name");
        assert_eq!(base.column_name_normalized(), "First_Name");
        assert_eq!(base.output_property(), "First_Name");
        assert!(!base.has_alias());
    }

    #[test]
    fn test_alias_recomputes_output_property() {
        let mut base = ExpressionBase::new("price").unwrap();
        base.set_alias("unit cost");
        assert_eq!(base.alias(), "unit cost");
        assert_eq!(base.alias_normalized(), "unit_cost");
        assert_eq!(base.output_property(), "unit_cost");

        base.set_alias("");
        assert_eq!(base.output_property(), "price");
    }

    #[test]
    fn test_empty_column_rejected() {
        let err = ExpressionBase::new("").unwrap_err();
        assert!(err.is_illegal_argument());
    }

    #[test]
    fn test_group_by() {
        let mut base = ExpressionBase::new("*").unwrap();
        assert!(base.is_star());
        assert!(base.group_by().is_none());
        base.set_group_by(Some(Arc::new(ColumnGroupBy::new(["dept"]))));
        assert!(base.group_by().is_some());
    }
}
