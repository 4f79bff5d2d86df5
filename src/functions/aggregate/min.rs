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

//! MIN aggregate function

use std::cmp::Ordering;

use crate::config::NumericPolicy;
use crate::core::{Result, Value};

use super::{Accumulator, Aggregate};

/// MIN aggregate function
///
/// Returns the minimum value of all non-NULL values in the specified column.
pub type MinFunction = Aggregate<MinAccumulator>;

/// Running minimum; `None` until the first value arrives
#[derive(Default, Debug, Clone)]
pub struct MinAccumulator {
    min_value: Option<Value>,
}

impl Accumulator for MinAccumulator {
    const NAME: &'static str = "MIN";
    const PROPERTY_PREFIX: &'static str = "min";
    const TRACKS_DISTINCT: bool = false;

    fn accumulate(&mut self, value: &Value, _policy: NumericPolicy) -> Result<()> {
        match &self.min_value {
            None => self.min_value = Some(value.clone()),
            Some(current) => {
                if let Ok(Ordering::Less) = value.compare(current) {
                    self.min_value = Some(value.clone());
                }
            }
        }
        Ok(())
    }

    fn result(&self) -> Value {
        self.min_value.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ResultSet, Row};
    use chrono::{TimeZone, Utc};

    fn min_of(values: &[Value]) -> Value {
        let mut min = MinFunction::new("v", false).unwrap();
        min.start();
        for value in values {
            min.process(&Row::new().with("v", value.clone())).unwrap();
        }
        let mut result = ResultSet::new();
        min.end(&mut result);
        result[0].get("min_v").cloned().unwrap()
    }

    #[test]
    fn test_min_integers() {
        let values = [Value::integer(5), Value::integer(2), Value::integer(8)];
        assert_eq!(min_of(&values), Value::Integer(2));
    }

    #[test]
    fn test_min_floats() {
        let values = [Value::float(5.5), Value::float(2.2), Value::float(8.8)];
        assert_eq!(min_of(&values), Value::Float(2.2));
    }

    #[test]
    fn test_min_timestamps() {
        let early = Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let values = [Value::timestamp(late), Value::timestamp(early)];
        assert_eq!(min_of(&values), Value::timestamp(early));
    }

    #[test]
    fn test_min_ignores_null() {
        let values = [Value::null(), Value::integer(5), Value::integer(7)];
        assert_eq!(min_of(&values), Value::Integer(5));
    }

    #[test]
    fn test_min_empty() {
        assert!(min_of(&[]).is_null());
    }
}
