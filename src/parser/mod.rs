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

//! Select list parser
//!
//! This module parses the select list of a query into select expressions:
//!
//! - [`Cursor`] - character cursor with mark/rewind
//! - [`SelectParser`] - state machine producing one expression per call
//! - [`ParseError`] - errors raised in strict mode
//!
//! # Example
//!
//! ```
//! use rowsql::parser::parse_select_list;
//!
//! let exprs = parse_select_list("name, AVG(age), COUNT(*) AS total").unwrap();
//! assert_eq!(exprs.len(), 3);
//! assert_eq!(exprs[2].output_property(), "total");
//! ```

pub mod cursor;
pub mod error;
pub mod select;

pub use cursor::{Cursor, Mark};
pub use error::{ParseError, Position};
pub use select::{parse_select_list, parse_select_list_with_config, SelectParser};
