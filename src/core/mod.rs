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

//! Core types and definitions for rowsql
//!
//! - [`DataType`] - runtime type of a value
//! - [`Value`] - scalar field values
//! - [`Row`] - a flat, string-keyed row object
//! - [`ResultSet`] - the output rows built by a statement execution
//! - [`Error`] - error type for all fallible operations

pub mod error;
pub mod result;
pub mod row;
pub mod types;
pub mod value;

pub use error::{Error, Result};
pub use result::ResultSet;
pub use row::Row;
pub use types::DataType;
pub use value::Value;
