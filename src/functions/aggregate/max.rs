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

//! MAX aggregate function

use std::cmp::Ordering;

use crate::config::NumericPolicy;
use crate::core::{Result, Value};

use super::{Accumulator, Aggregate};

/// MAX aggregate function
///
/// Returns the maximum value of all non-NULL values in the specified column.
/// Works with any comparable type (numbers, strings, timestamps, etc.)
pub type MaxFunction = Aggregate<MaxAccumulator>;

/// Running maximum; `None` until the first value arrives
#[derive(Default, Debug, Clone)]
pub struct MaxAccumulator {
    max_value: Option<Value>,
}

impl Accumulator for MaxAccumulator {
    const NAME: &'static str = "MAX";
    const PROPERTY_PREFIX: &'static str = "max";
    const TRACKS_DISTINCT: bool = false;

    fn accumulate(&mut self, value: &Value, _policy: NumericPolicy) -> Result<()> {
        match &self.max_value {
            None => self.max_value = Some(value.clone()),
            // Values not comparable with the current maximum are skipped
            Some(current) => {
                if let Ok(Ordering::Greater) = value.compare(current) {
                    self.max_value = Some(value.clone());
                }
            }
        }
        Ok(())
    }

    fn result(&self) -> Value {
        self.max_value.clone().unwrap_or_default()
    }
}
