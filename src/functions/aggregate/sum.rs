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

//! SUM aggregate function

use crate::config::NumericPolicy;
use crate::core::{Result, Value};

use super::{numeric_operand, Accumulator, Aggregate, Numeric};

/// SUM aggregate function
///
/// Returns the sum of all non-NULL values in the specified column.
/// Returns int64 for integer inputs, float64 once any input is fractional
/// or the integer sum overflows.
pub type SumFunction = Aggregate<SumAccumulator>;

/// Sum state - tracks whether we have integers or floats
#[derive(Default, Debug, Clone, Copy, PartialEq)]
enum SumState {
    #[default]
    Empty,
    Integer(i64),
    Float(f64),
}

/// Running sum of SUM
#[derive(Default, Debug, Clone)]
pub struct SumAccumulator {
    state: SumState,
}

impl Accumulator for SumAccumulator {
    const NAME: &'static str = "SUM";
    const PROPERTY_PREFIX: &'static str = "sum";
    const NUMERIC: bool = true;

    fn accumulate(&mut self, value: &Value, policy: NumericPolicy) -> Result<()> {
        let Some(number) = numeric_operand(Self::NAME, value, policy)? else {
            return Ok(());
        };
        self.state = match (self.state, number) {
            (SumState::Empty, Numeric::Integer(i)) => SumState::Integer(i),
            (SumState::Empty, Numeric::Float(f)) => SumState::Float(f),
            (SumState::Integer(sum), Numeric::Integer(i)) => match sum.checked_add(i) {
                Some(sum) => SumState::Integer(sum),
                None => SumState::Float(sum as f64 + i as f64),
            },
            (SumState::Integer(sum), Numeric::Float(f)) => SumState::Float(sum as f64 + f),
            (SumState::Float(sum), number) => SumState::Float(sum + number.as_f64()),
        };
        Ok(())
    }

    fn result(&self) -> Value {
        match self.state {
            SumState::Empty => Value::null(),
            SumState::Integer(sum) => Value::Integer(sum),
            SumState::Float(sum) => Value::Float(sum),
        }
    }
}
