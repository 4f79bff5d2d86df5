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

//! Select List Parser Tests
//!
//! Tests parsing of select lists through the public API

use rowsql::{
    parse_select_list, parse_select_list_with_config, Error, SelectConfig, SelectExpression,
    SelectParser,
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn kinds(exprs: &[SelectExpression]) -> Vec<&'static str> {
    exprs.iter().map(|e| e.kind()).collect()
}

/// Test a list mixing columns and aggregates
#[test]
fn test_parse_mixed_list() {
    init();
    let exprs = parse_select_list("name, AVG(age), COUNT(*) AS total, SUM(DISTINCT amount)")
        .expect("Failed to parse select list");

    assert_eq!(kinds(&exprs), ["COLUMN", "AVG", "COUNT", "SUM"]);
    assert_eq!(exprs[2].column_name(), "*");
    assert_eq!(exprs[2].output_property(), "total");
    assert!(exprs[3].is_distinct());
    assert!(!exprs[1].is_distinct());
}

/// Test that rendering and parsing again gives the same expressions
#[test]
fn test_round_trip() {
    init();
    let inputs = [
        "name, AVG(age), COUNT(*) AS total, SUM(DISTINCT amount)",
        "[First Name] AS [Given Name], MAX([unit price]), min(x) as y",
        "CONCAT(first, ' ', last) AS full, COUNT(DISTINCT id)",
        "\"odd]name\", 'plain'",
    ];
    for input in inputs {
        let first = parse_select_list(input).expect("Failed to parse");
        let rendered = first
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let second = parse_select_list(&rendered).expect("Failed to parse rendered list");

        assert_eq!(kinds(&first), kinds(&second), "{}", input);
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.column_name(), b.column_name(), "{}", rendered);
            assert_eq!(a.alias(), b.alias(), "{}", rendered);
            assert_eq!(a.is_distinct(), b.is_distinct(), "{}", rendered);
            assert_eq!(a.output_property(), b.output_property(), "{}", rendered);
        }
    }
}

/// Test that keyword prefixes fall back to column names
#[test]
fn test_keyword_disambiguation() {
    init();
    let exprs = parse_select_list("Sum1, MAX(price)").unwrap();
    assert_eq!(kinds(&exprs), ["COLUMN", "MAX"]);
    assert_eq!(exprs[0].column_name(), "Sum1");
    assert_eq!(exprs[1].column_name(), "price");

    let exprs = parse_select_list("Age, Counter, Minimum, Concatenated, MAXX(a)").unwrap();
    assert_eq!(kinds(&exprs), ["COLUMN"; 5]);
    assert_eq!(exprs[4].column_name(), "MAXX(a)");
}

/// Test that a missing AS clause does not consume input
#[test]
fn test_alias_lookahead() {
    init();
    let exprs = parse_select_list("price AS cost").unwrap();
    assert_eq!(exprs.len(), 1);
    assert_eq!(exprs[0].output_property(), "cost");

    let exprs = parse_select_list("price ASCII").unwrap();
    assert_eq!(exprs.len(), 2);
    assert_eq!(exprs[0].alias(), "");
    assert_eq!(exprs[0].output_property(), "price");
    assert_eq!(exprs[1].column_name(), "ASCII");

    let exprs = parse_select_list("price AS").unwrap();
    assert_eq!(exprs[0].alias(), "");
    assert_eq!(exprs[1].column_name(), "AS");
}

/// Test the three identifier quoting styles
#[test]
fn test_quoting_equivalence() {
    init();
    for input in ["[First Name]", "\"First Name\"", "'First Name'"] {
        let exprs = parse_select_list(input).unwrap();
        assert_eq!(exprs.len(), 1);
        assert_eq!(exprs[0].kind(), "COLUMN");
        assert_eq!(exprs[0].column_name(), "First Name");
    }
}

/// Test commas inside quotes and calls
#[test]
fn test_commas_do_not_split_inside_quotes_or_calls() {
    init();
    let exprs = parse_select_list("[a,b], \"c,d\", CONCAT(x, ',', y)").unwrap();
    assert_eq!(exprs.len(), 3);
    assert_eq!(exprs[0].column_name(), "a,b");
    assert_eq!(exprs[1].column_name(), "c,d");
    assert_eq!(exprs[2].kind(), "CONCAT");
}

/// Test repeated calls on one parser
#[test]
fn test_next_select_expression() {
    init();
    let mut parser = SelectParser::new("a, SUM(b)");
    let first = parser.next_select_expression().unwrap().unwrap();
    assert_eq!(first.column_name(), "a");
    let second = parser.next_select_expression().unwrap().unwrap();
    assert_eq!(second.kind(), "SUM");
    assert!(parser.next_select_expression().unwrap().is_none());
    assert!(parser.next_select_expression().unwrap().is_none());

    parser.init("COUNT(*)");
    assert_eq!(parser.count(), 1);
}

/// Test recovery from malformed input in the default mode
#[test]
fn test_permissive_recovery() {
    init();
    let exprs = parse_select_list("AVG(price").unwrap();
    assert_eq!(exprs.len(), 1);
    assert_eq!(exprs[0].kind(), "AVG");
    assert_eq!(exprs[0].column_name(), "price");

    let exprs = parse_select_list("SUM(a b)").unwrap();
    assert_eq!(exprs[0].column_name(), "a b");

    let exprs = parse_select_list("x, 'unterminated").unwrap();
    assert_eq!(exprs[1].column_name(), "unterminated");
}

/// Test parse errors in strict mode
#[test]
fn test_strict_mode() {
    init();
    let config = SelectConfig::new().with_strict(true);
    let err = parse_select_list_with_config("name, AVG(price", config).unwrap_err();
    assert!(err.is_parse_error());
    assert_eq!(
        err.to_string(),
        "parse error: unterminated function call at line 1, column 10"
    );

    let Error::Parse(parse_error) = parse_select_list_with_config("a b", config).unwrap_err() else {
        panic!("expected parse error");
    };
    assert_eq!(parse_error.format_error(), "expected ',' or end of input at line 1, column 3\na b\n  ^");
}

/// Test invalid function arguments
#[test]
fn test_illegal_arguments() {
    init();
    for input in ["AVG(*)", "SUM(*)", "MAX(*)", "MIN()", "SUM()", "CONCAT()"] {
        let err = parse_select_list(input).unwrap_err();
        assert!(err.is_illegal_argument(), "{}: {}", input, err);
    }
}
