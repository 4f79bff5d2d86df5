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

//! Error types for rowsql
//!
//! Construction of expressions, strict parsing and strict numeric evaluation
//! are the only fallible operations in this crate.

use thiserror::Error;

use crate::parser::ParseError;

/// Result type alias for rowsql operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed or missing construction input, e.g. `AVG(*)` or `SUM()`
    #[error("illegal argument: {0}")]
    IllegalArgument(String),

    /// Malformed select list, only raised in strict parsing mode
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Value of the wrong type for an aggregate under a rejecting numeric policy
    #[error("type error: {0}")]
    Type(String),
}

impl Error {
    /// Create a new IllegalArgument error
    pub fn illegal_argument(message: impl Into<String>) -> Self {
        Error::IllegalArgument(message.into())
    }

    /// Create a new Type error
    pub fn type_error(message: impl Into<String>) -> Self {
        Error::Type(message.into())
    }

    /// Returns true for construction errors
    pub fn is_illegal_argument(&self) -> bool {
        matches!(self, Error::IllegalArgument(_))
    }

    /// Returns true for strict-mode parse errors
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Error::Parse(_))
    }

    /// Returns true for numeric type errors
    pub fn is_type_error(&self) -> bool {
        matches!(self, Error::Type(_))
    }
}
