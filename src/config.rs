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

//! Parser and evaluation configuration
//!

/// How SUM and AVG treat values that are not INTEGER or FLOAT
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumericPolicy {
    /// Best effort: booleans count as 0/1, numeric text is parsed,
    /// anything else is skipped
    #[default]
    Coerce,
    /// Any non-numeric value fails `process` with a type error
    Reject,
}

/// Configuration for parsing a select list and evaluating its expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectConfig {
    /// Raise parse errors for unterminated quotes and parentheses, empty
    /// expressions and trailing garbage instead of recovering
    /// Default: false
    pub strict: bool,

    /// Non-numeric handling for SUM and AVG
    /// Default: Coerce
    pub numeric_policy: NumericPolicy,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            strict: false,
            numeric_policy: NumericPolicy::Coerce,
        }
    }
}

impl SelectConfig {
    /// Creates a SelectConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Recover from malformed input and coerce values where possible
    pub fn permissive() -> Self {
        Self::default()
    }

    /// Reject malformed input and non-numeric aggregate input
    pub fn strict() -> Self {
        Self {
            strict: true,
            numeric_policy: NumericPolicy::Reject,
        }
    }

    /// Sets strict parsing
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets the numeric policy
    pub fn with_numeric_policy(mut self, policy: NumericPolicy) -> Self {
        self.numeric_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SelectConfig::default();
        assert!(!config.strict);
        assert_eq!(config.numeric_policy, NumericPolicy::Coerce);
        assert_eq!(config, SelectConfig::permissive());
    }

    #[test]
    fn test_strict_preset() {
        let config = SelectConfig::strict();
        assert!(config.strict);
        assert_eq!(config.numeric_policy, NumericPolicy::Reject);
    }

    #[test]
    fn test_builders() {
        let config = SelectConfig::new()
            .with_strict(true)
            .with_numeric_policy(NumericPolicy::Coerce);
        assert!(config.strict);
        assert_eq!(config.numeric_policy, NumericPolicy::Coerce);
    }
}
