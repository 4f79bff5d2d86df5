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

//! SQL Function System
//!
//! This module provides the functions a select list can call:
//!
//! - [`aggregate`] - AVG, COUNT, MAX, MIN and SUM, evaluated over all rows
//!   of a statement or of a group
//! - [`scalar`] - CONCAT, evaluated per row

pub mod aggregate;
pub mod scalar;

pub use aggregate::{
    Accumulator, Aggregate, AvgFunction, CountFunction, DistinctTracker, MaxFunction, MinFunction,
    SumFunction,
};
pub use scalar::{ConcatFunction, ConcatOperand};
