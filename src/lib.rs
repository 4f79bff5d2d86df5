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

//! # rowsql - select lists over in-memory rows
//!
//! rowsql parses SQL select lists such as
//! `name, AVG(age), COUNT(*) AS total` and evaluates them over flat
//! key/value rows, with or without GROUP BY.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use rowsql::{ColumnGroupBy, Row, SelectList, Value};
//!
//! let rows = vec![
//!     Row::new().with("dept", "eng").with("salary", 100i64),
//!     Row::new().with("dept", "ops").with("salary", 80i64),
//!     Row::new().with("dept", "eng").with("salary", 120i64),
//! ];
//!
//! let mut list = SelectList::parse("SUM(salary) AS total, COUNT(*) AS n").unwrap();
//! list.set_group_by(Arc::new(ColumnGroupBy::new(["dept"])));
//!
//! let result = list.execute(&rows).unwrap();
//! assert_eq!(result.len(), 2);
//! assert_eq!(result[0].get("total"), Some(&Value::integer(220)));
//! assert_eq!(result[0].get("n"), Some(&Value::integer(2)));
//! ```
//!
//! ## Modules
//!
//! - [`core`] - Core types ([`Value`], [`Row`], [`ResultSet`], [`Error`])
//! - [`parser`] - Select list parser ([`SelectParser`])
//! - [`expression`] - Select expressions ([`SelectExpression`])
//! - [`functions`] - Aggregate (AVG, COUNT, MAX, MIN, SUM) and scalar (CONCAT) functions
//! - [`group`] - GROUP BY keys ([`GroupByProvider`], [`ColumnGroupBy`])
//! - [`select`] - Select list evaluation ([`SelectList`])
//! - [`config`] - Parser and evaluation settings ([`SelectConfig`])

pub mod config;
pub mod core;
pub mod expression;
pub mod functions;
pub mod group;
pub mod parser;
pub mod select;

pub use config::{NumericPolicy, SelectConfig};
pub use core::{DataType, Error, Result, ResultSet, Row, Value};
pub use expression::{ColumnExpression, ExpressionBase, SelectExpression};
pub use functions::{
    AvgFunction, ConcatFunction, ConcatOperand, CountFunction, MaxFunction, MinFunction,
    SumFunction,
};
pub use group::{ColumnGroupBy, GroupByProvider, GroupKey};
pub use parser::{parse_select_list, parse_select_list_with_config, ParseError, SelectParser};
pub use select::SelectList;
