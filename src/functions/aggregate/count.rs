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

//! COUNT aggregate function

use crate::config::NumericPolicy;
use crate::core::{Result, Value};

use super::{Accumulator, Aggregate};

/// COUNT aggregate function
///
/// Returns the number of rows matching the query criteria.
/// - COUNT(*) counts all rows including NULLs
/// - COUNT(column) counts non-NULL values
/// - COUNT(DISTINCT column) counts distinct non-NULL values
pub type CountFunction = Aggregate<CountAccumulator>;

/// Row / value counter of COUNT
#[derive(Default, Debug, Clone)]
pub struct CountAccumulator {
    count: i64,
}

impl Accumulator for CountAccumulator {
    const NAME: &'static str = "COUNT";
    const PROPERTY_PREFIX: &'static str = "count";
    const ACCEPTS_STAR: bool = true;

    fn accumulate(&mut self, _value: &Value, _policy: NumericPolicy) -> Result<()> {
        self.count += 1;
        Ok(())
    }

    fn accumulate_row(&mut self) {
        self.count += 1;
    }

    fn result(&self) -> Value {
        Value::Integer(self.count)
    }
}
