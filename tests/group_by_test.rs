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

//! GROUP BY Tests
//!
//! Tests grouped aggregation and the merging of several aggregates into
//! the rows of their groups

use std::sync::Arc;

use rowsql::{
    parse_select_list, ColumnGroupBy, GroupByProvider, GroupKey, ResultSet, Row,
    SelectExpression, Value,
};

fn sales() -> Vec<Row> {
    vec![
        Row::new().with("region", "north").with("amount", 10i64),
        Row::new().with("region", "south").with("amount", 5i64),
        Row::new().with("region", "north").with("amount", 20i64),
        Row::new().with("region", "east").with("amount", Value::null()),
        Row::new().with("region", "north").with("amount", 10i64),
    ]
}

fn run(exprs: &mut [SelectExpression], rows: &[Row]) -> ResultSet {
    let mut result = ResultSet::new();
    for expr in exprs.iter_mut() {
        expr.start(&mut result);
    }
    let mut partial = Row::new();
    for row in rows {
        for expr in exprs.iter_mut() {
            expr.process(row, &mut partial).expect("Failed to process row");
        }
    }
    for expr in exprs.iter_mut() {
        expr.end(&mut result);
    }
    result
}

fn grouped(input: &str, provider: Arc<dyn GroupByProvider>) -> Vec<SelectExpression> {
    let mut exprs = parse_select_list(input).expect("Failed to parse");
    for expr in &mut exprs {
        expr.set_group_by(Some(Arc::clone(&provider)));
    }
    exprs
}

/// Test SUM and COUNT over the same groups land on the same rows
#[test]
fn test_grouped_sum_and_count_merge() {
    let provider: Arc<dyn GroupByProvider> = Arc::new(ColumnGroupBy::new(["region"]));
    let mut exprs = grouped("SUM(amount) AS total, COUNT(*) AS n", provider);
    let result = run(&mut exprs, &sales());

    // east has only a NULL amount, so SUM never created its group and
    // COUNT(*) appends it
    assert_eq!(result.len(), 3);
    assert_eq!(
        result[0],
        Row::new()
            .with("region", "north")
            .with("total", 40i64)
            .with("n", 3i64)
    );
    assert_eq!(
        result[1],
        Row::new()
            .with("region", "south")
            .with("total", 5i64)
            .with("n", 1i64)
    );
    assert_eq!(result[2], Row::new().with("region", "east").with("n", 1i64));
}

/// Test DISTINCT is tracked per group
#[test]
fn test_distinct_per_group() {
    let provider: Arc<dyn GroupByProvider> = Arc::new(ColumnGroupBy::new(["region"]));
    let mut exprs = grouped("SUM(DISTINCT amount) AS total, COUNT(DISTINCT amount) AS n", provider);
    let result = run(&mut exprs, &sales());

    assert_eq!(result[0].get("total"), Some(&Value::integer(30)));
    assert_eq!(result[0].get("n"), Some(&Value::integer(2)));
    assert_eq!(result[1].get("total"), Some(&Value::integer(5)));
}

/// Test grouping on more than one column
#[test]
fn test_multi_column_groups() {
    let rows = vec![
        Row::new().with("a", 1i64).with("b", "x").with("v", 1.5),
        Row::new().with("a", 1i64).with("b", "y").with("v", 2.5),
        Row::new().with("a", 1i64).with("b", "x").with("v", 0.5),
    ];
    let provider: Arc<dyn GroupByProvider> = Arc::new(ColumnGroupBy::parse("a, b"));
    let mut exprs = grouped("AVG(v), MAX(v)", provider);
    let result = run(&mut exprs, &rows);

    assert_eq!(result.len(), 2);
    assert_eq!(result[0].get("avg_v"), Some(&Value::float(1.0)));
    assert_eq!(result[0].get("max_v"), Some(&Value::float(1.5)));
    assert_eq!(result[1].get("b"), Some(&Value::text("y")));
    assert_eq!(result.columns(), ["a", "b", "avg_v", "max_v"]);
}

/// Groups by the parity of an integer column
#[derive(Debug)]
struct ParityGroupBy;

impl GroupByProvider for ParityGroupBy {
    fn group_key(&self, row: &Row) -> GroupKey {
        let even = row
            .get("parity")
            .and_then(|v| v.as_str())
            .map(|s| s == "even")
            .or_else(|| row.get("n").and_then(|v| v.as_int64()).map(|n| n % 2 == 0))
            .unwrap_or(false);
        let label = if even { "even" } else { "odd" };
        GroupKey::new(label, [("parity".to_string(), Value::text(label))])
    }
}

/// Test a custom provider that recomputes keys from output rows
#[test]
fn test_custom_provider() {
    let rows: Vec<Row> = (1..=5i64).map(|n| Row::new().with("n", n)).collect();
    let mut exprs = grouped("SUM(n) AS total, COUNT(n)", Arc::new(ParityGroupBy));
    let result = run(&mut exprs, &rows);

    assert_eq!(result.len(), 2);
    assert_eq!(
        result[0],
        Row::new()
            .with("parity", "odd")
            .with("total", 9i64)
            .with("count_n", 3i64)
    );
    assert_eq!(
        result[1],
        Row::new()
            .with("parity", "even")
            .with("total", 6i64)
            .with("count_n", 2i64)
    );
}

/// Test grouped results merge into rows that already exist
#[test]
fn test_merge_into_existing_rows() {
    let provider: Arc<dyn GroupByProvider> = Arc::new(ColumnGroupBy::new(["region"]));
    let mut exprs = grouped("MIN(amount)", provider);

    let mut result = ResultSet::from_rows(vec![Row::new().with("region", "south").with("seen", true)]);
    exprs[0].start(&mut result);
    let mut partial = Row::new();
    for row in sales() {
        exprs[0].process(&row, &mut partial).unwrap();
    }
    exprs[0].end(&mut result);

    assert_eq!(result.len(), 2);
    assert_eq!(
        result[0],
        Row::new()
            .with("region", "south")
            .with("seen", true)
            .with("min_amount", 5i64)
    );
    assert_eq!(result[1].get("min_amount"), Some(&Value::integer(10)));
}
