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

//! AVG aggregate function

use crate::config::NumericPolicy;
use crate::core::{Result, Value};

use super::{numeric_operand, Accumulator, Aggregate};

/// AVG aggregate function
///
/// Returns the average of all non-NULL values in the specified column.
/// Always returns a float64; NULL when no value contributed.
pub type AvgFunction = Aggregate<AvgAccumulator>;

/// Running sum and row counter of AVG; the quotient is taken at the end
#[derive(Default, Debug, Clone)]
pub struct AvgAccumulator {
    sum: f64,
    count: i64,
}

impl Accumulator for AvgAccumulator {
    const NAME: &'static str = "AVG";
    const PROPERTY_PREFIX: &'static str = "avg";
    const NUMERIC: bool = true;

    fn accumulate(&mut self, value: &Value, policy: NumericPolicy) -> Result<()> {
        if let Some(number) = numeric_operand(Self::NAME, value, policy)? {
            self.sum += number.as_f64();
            self.count += 1;
        }
        Ok(())
    }

    fn result(&self) -> Value {
        if self.count == 0 {
            Value::null()
        } else {
            Value::Float(self.sum / self.count as f64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ResultSet, Row};

    fn avg_of(values: &[Value], distinct: bool) -> Value {
        let mut avg = AvgFunction::new("v", distinct).unwrap();
        avg.start();
        for value in values {
            avg.process(&Row::new().with("v", value.clone())).unwrap();
        }
        let mut result = ResultSet::new();
        avg.end(&mut result);
        result[0].get("avg_v").cloned().unwrap()
    }

    #[test]
    fn test_avg_integers() {
        let values = [Value::integer(1), Value::integer(2), Value::integer(3)];
        assert_eq!(avg_of(&values, false), Value::Float(2.0));
    }

    #[test]
    fn test_avg_mixed() {
        let values = [Value::integer(1), Value::float(2.0), Value::integer(3)];
        assert_eq!(avg_of(&values, false), Value::Float(2.0));
    }

    #[test]
    fn test_avg_ignores_null() {
        let values = [Value::integer(1), Value::null(), Value::integer(3)];
        assert_eq!(avg_of(&values, false), Value::Float(2.0));
    }

    #[test]
    fn test_avg_distinct() {
        let values = [
            Value::integer(1),
            Value::integer(1),
            Value::integer(3),
            Value::integer(3),
        ];
        assert_eq!(avg_of(&values, true), Value::Float(2.0));
        assert_eq!(avg_of(&values, false), Value::Float(2.0));

        let values = [Value::integer(1), Value::integer(1), Value::integer(4)];
        assert_eq!(avg_of(&values, true), Value::Float(2.5));
        assert_eq!(avg_of(&values, false), Value::Float(2.0));
    }

    #[test]
    fn test_avg_empty_is_null() {
        assert!(avg_of(&[], false).is_null());
    }

    #[test]
    fn test_avg_coerces_numeric_text() {
        let values = [Value::text("2"), Value::integer(4), Value::text("n/a")];
        assert_eq!(avg_of(&values, false), Value::Float(3.0));
    }

    #[test]
    fn test_avg_reject_policy() {
        let mut avg = AvgFunction::new("v", false)
            .unwrap()
            .with_numeric_policy(NumericPolicy::Reject);
        avg.start();
        let err = avg
            .process(&Row::new().with("v", "ten"))
            .unwrap_err();
        assert!(err.is_type_error());
    }
}
