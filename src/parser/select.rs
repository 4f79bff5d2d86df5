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

//! Select list parser
//!
//! A character-level state machine that turns `name, AVG(age) AS avg_age`
//! into [`SelectExpression`]s, one per call. There is no tokenizer pass:
//! function keywords are matched letter by letter, and a mismatch in the
//! middle of a keyword replays the letters read so far as an identifier,
//! which is what separates `Sum1` or `Age` from `SUM(` and `AVG(`.

use crate::config::SelectConfig;
use crate::core::Result;
use crate::expression::{ColumnExpression, SelectExpression};
use crate::functions::aggregate::{
    AvgFunction, CountFunction, MaxFunction, MinFunction, SumFunction,
};
use crate::functions::scalar::{ConcatFunction, ConcatOperand};

use super::cursor::Cursor;
use super::error::{ParseError, Position};

/// Function names recognized before `(`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    Avg,
    Count,
    Max,
    Min,
    Sum,
    Concat,
}

impl Keyword {
    const ALL: [Keyword; 6] = [
        Keyword::Avg,
        Keyword::Count,
        Keyword::Max,
        Keyword::Min,
        Keyword::Sum,
        Keyword::Concat,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Keyword::Avg => "AVG",
            Keyword::Count => "COUNT",
            Keyword::Max => "MAX",
            Keyword::Min => "MIN",
            Keyword::Sum => "SUM",
            Keyword::Concat => "CONCAT",
        }
    }

    /// Keyword spelled exactly by `matched`, ignoring case
    fn exact(matched: &str) -> Option<Keyword> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(matched))
    }

    /// Returns true if `matched` followed by `next` still begins a keyword
    ///
    /// `matched` only ever holds ASCII letters accepted by this function.
    fn continues(matched: &str, next: char) -> bool {
        let len = matched.len();
        next.is_ascii()
            && Self::ALL.into_iter().any(|k| {
                let name = k.as_str();
                name.len() > len
                    && name[..len].eq_ignore_ascii_case(matched)
                    && name.as_bytes()[len].eq_ignore_ascii_case(&(next as u8))
            })
    }
}

/// Parser for a comma-separated select list
///
/// # Example
///
/// ```
/// use rowsql::parser::SelectParser;
///
/// let mut parser = SelectParser::new("name, COUNT(*) AS total");
/// let name = parser.next_select_expression().unwrap().unwrap();
/// assert_eq!(name.column_name(), "name");
/// let count = parser.next_select_expression().unwrap().unwrap();
/// assert_eq!(count.output_property(), "total");
/// assert!(parser.next_select_expression().unwrap().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct SelectParser {
    cursor: Cursor,
    source: String,
    config: SelectConfig,
    /// Position of a separating comma not yet followed by an expression
    pending_comma: Option<Position>,
    /// Set once the iterator has yielded an error
    failed: bool,
}

impl SelectParser {
    /// Create a permissive parser over `input`
    pub fn new(input: &str) -> Self {
        Self::with_config(input, SelectConfig::default())
    }

    /// Create a parser over `input` with `config`
    pub fn with_config(input: &str, config: SelectConfig) -> Self {
        Self {
            cursor: Cursor::new(input),
            source: input.to_string(),
            config,
            pending_comma: None,
            failed: false,
        }
    }

    /// Replace the input and restart from its beginning
    pub fn init(&mut self, input: &str) {
        self.cursor.reset(input);
        self.source = input.to_string();
        self.pending_comma = None;
        self.failed = false;
    }

    /// The parser configuration
    pub fn config(&self) -> &SelectConfig {
        &self.config
    }

    /// Current read position
    pub fn position(&self) -> Position {
        self.cursor.position()
    }

    /// Parse the next expression of the list
    ///
    /// Returns `Ok(None)` once the input is exhausted.
    pub fn next_select_expression(&mut self) -> Result<Option<SelectExpression>> {
        loop {
            self.cursor.skip_whitespace();
            match self.cursor.peek() {
                None => {
                    if let Some(comma) = self.pending_comma.take() {
                        self.recover(comma, "expected expression after ','")?;
                    }
                    return Ok(None);
                }
                Some(',') => {
                    let position = self.cursor.position();
                    self.recover(position, "empty expression")?;
                    self.cursor.advance();
                }
                Some(_) => break,
            }
        }
        self.pending_comma = None;

        let mut expression = self.parse_term()?;
        if let Some(alias) = self.parse_alias()? {
            expression.set_alias(alias);
        }
        self.finish_expression()?;

        log::debug!(
            "Parsed {} expression: {}",
            expression.kind(),
            expression
        );
        Ok(Some(expression))
    }

    /// Column, aggregate call or CONCAT call
    fn parse_term(&mut self) -> Result<SelectExpression> {
        if let Some(open @ ('[' | '"' | '\'')) = self.cursor.peek() {
            let name = self.read_quoted(open)?;
            return Ok(ColumnExpression::new(name)?.into());
        }

        let mut matched = String::new();
        while let Some(ch) = self.cursor.peek() {
            if ch == '(' {
                if let Some(keyword) = Keyword::exact(&matched) {
                    let open = self.cursor.position();
                    self.cursor.advance();
                    return self.parse_call(keyword, open);
                }
                break;
            }
            if !Keyword::continues(&matched, ch) {
                break;
            }
            matched.push(ch);
            self.cursor.advance();
        }

        if !matched.is_empty() {
            log::trace!("'{}' is not a function call, reading a column name", matched);
        }
        let mut name = matched;
        name.push_str(&self.read_bare(false));
        Ok(ColumnExpression::new(name)?.into())
    }

    /// Arguments and closing parenthesis of a call; `(` is consumed
    fn parse_call(&mut self, keyword: Keyword, open: Position) -> Result<SelectExpression> {
        let policy = self.config.numeric_policy;
        let expression = match keyword {
            Keyword::Concat => SelectExpression::Concat(self.parse_concat_arguments(open)?),
            Keyword::Avg => {
                let (column, distinct) = self.parse_aggregate_argument(open)?;
                SelectExpression::Avg(AvgFunction::new(column, distinct)?.with_numeric_policy(policy))
            }
            Keyword::Count => {
                let (column, distinct) = self.parse_aggregate_argument(open)?;
                SelectExpression::Count(CountFunction::new(column, distinct)?)
            }
            Keyword::Max => {
                let (column, distinct) = self.parse_aggregate_argument(open)?;
                SelectExpression::Max(MaxFunction::new(column, distinct)?)
            }
            Keyword::Min => {
                let (column, distinct) = self.parse_aggregate_argument(open)?;
                SelectExpression::Min(MinFunction::new(column, distinct)?)
            }
            Keyword::Sum => {
                let (column, distinct) = self.parse_aggregate_argument(open)?;
                SelectExpression::Sum(SumFunction::new(column, distinct)?.with_numeric_policy(policy))
            }
        };
        Ok(expression)
    }

    /// `[DISTINCT] column )` of an aggregate call
    ///
    /// A call that does not close right after its argument is recovered by
    /// reading up to the next `)` or the end of input and using everything
    /// since `(` as the column name.
    fn parse_aggregate_argument(&mut self, open: Position) -> Result<(String, bool)> {
        let args_start = self.cursor.position().offset;
        self.cursor.skip_whitespace();
        let distinct = self.parse_distinct();
        self.cursor.skip_whitespace();

        let column = match self.cursor.peek() {
            Some(quote @ ('[' | '"' | '\'')) => self.read_quoted(quote)?,
            Some('*') => {
                self.cursor.advance();
                "*".to_string()
            }
            _ => self.read_bare(true),
        };
        self.cursor.skip_whitespace();

        if self.cursor.peek() == Some(')') {
            self.cursor.advance();
            return Ok((column, distinct));
        }

        let unexpected = self.cursor.position();
        let mut end = args_start;
        let mut closed = false;
        while let Some(ch) = self.cursor.advance() {
            if ch == ')' {
                closed = true;
                break;
            }
            end = self.cursor.position().offset;
        }
        if closed {
            self.recover(unexpected, "unexpected characters in function call")?;
        } else {
            end = self.cursor.position().offset;
            self.recover(open, "unterminated function call")?;
        }
        let raw = self.cursor.slice(args_start, end);
        Ok((raw.trim().to_string(), false))
    }

    /// Optional `DISTINCT` followed by whitespace
    fn parse_distinct(&mut self) -> bool {
        let mark = self.cursor.mark();
        let cursor = &mut self.cursor;
        if "DISTINCT".chars().all(|c| cursor.eat_ignore_case(c)) && cursor.skip_whitespace() {
            return true;
        }
        self.cursor.rewind(mark);
        false
    }

    /// Comma-separated CONCAT operands and the closing parenthesis
    fn parse_concat_arguments(&mut self, open: Position) -> Result<ConcatFunction> {
        let mut operands = Vec::new();
        let mut after_comma = false;
        loop {
            self.cursor.skip_whitespace();
            let Some(ch) = self.cursor.peek() else {
                self.recover(open, "unterminated function call")?;
                break;
            };
            match ch {
                ')' => {
                    if after_comma {
                        let position = self.cursor.position();
                        self.recover(position, "empty function argument")?;
                    }
                    self.cursor.advance();
                    break;
                }
                ',' => {
                    let position = self.cursor.position();
                    self.recover(position, "empty function argument")?;
                    self.cursor.advance();
                    after_comma = true;
                    continue;
                }
                '\'' => operands.push(ConcatOperand::Literal(self.read_string_literal()?)),
                '[' | '"' => operands.push(ConcatOperand::column(self.read_quoted(ch)?)),
                _ => operands.push(ConcatOperand::column(self.read_bare(true))),
            }

            after_comma = false;
            self.cursor.skip_whitespace();
            match self.cursor.peek() {
                Some(',') => {
                    self.cursor.advance();
                    after_comma = true;
                }
                Some(')') | None => {}
                Some(_) => {
                    let position = self.cursor.position();
                    self.recover(position, "expected ',' or ')' in function call")?;
                }
            }
        }
        ConcatFunction::new(operands)
    }

    /// Optional `AS alias` clause
    ///
    /// The clause is looked ahead from a mark; anything that is not `AS`,
    /// whitespace and an alias rewinds to the mark.
    fn parse_alias(&mut self) -> Result<Option<String>> {
        let mark = self.cursor.mark();
        self.cursor.skip_whitespace();
        if self.cursor.eat_ignore_case('A')
            && self.cursor.eat_ignore_case('S')
            && self.cursor.skip_whitespace()
        {
            match self.cursor.peek() {
                Some(quote @ ('[' | '"' | '\'')) => return self.read_quoted(quote).map(Some),
                Some(ch) if ch != ',' => return Ok(Some(self.read_bare(false))),
                _ => {}
            }
        }
        self.cursor.rewind(mark);
        Ok(None)
    }

    /// Consume the separating comma, if any
    ///
    /// Anything else is left for the next call.
    fn finish_expression(&mut self) -> Result<()> {
        self.cursor.skip_whitespace();
        match self.cursor.peek() {
            None => Ok(()),
            Some(',') => {
                self.pending_comma = Some(self.cursor.position());
                self.cursor.advance();
                Ok(())
            }
            Some(_) => {
                let position = self.cursor.position();
                self.recover(position, "expected ',' or end of input")
            }
        }
    }

    /// Identifier up to whitespace, a comma, the end of input, and when
    /// `in_call` also a closing parenthesis
    fn read_bare(&mut self, in_call: bool) -> String {
        let mut text = String::new();
        while let Some(ch) = self.cursor.peek() {
            if ch.is_whitespace() || ch == ',' || (in_call && ch == ')') {
                break;
            }
            text.push(ch);
            self.cursor.advance();
        }
        text
    }

    /// `[...]`, `"..."` or `'...'` identifier, quotes stripped
    fn read_quoted(&mut self, open: char) -> Result<String> {
        let start = self.cursor.position();
        self.cursor.advance();
        let close = if open == '[' { ']' } else { open };
        let mut text = String::new();
        loop {
            match self.cursor.advance() {
                Some(ch) if ch == close => return Ok(text),
                Some(ch) => text.push(ch),
                None => {
                    self.recover(start, "unterminated quoted identifier")?;
                    return Ok(text);
                }
            }
        }
    }

    /// `'...'` string literal where `''` is an escaped quote
    fn read_string_literal(&mut self) -> Result<String> {
        let start = self.cursor.position();
        self.cursor.advance();
        let mut text = String::new();
        loop {
            match self.cursor.advance() {
                Some('\'') if self.cursor.peek() == Some('\'') => {
                    self.cursor.advance();
                    text.push('\'');
                }
                Some('\'') => return Ok(text),
                Some(ch) => text.push(ch),
                None => {
                    self.recover(start, "unterminated string literal")?;
                    return Ok(text);
                }
            }
        }
    }

    /// Fail in strict mode, otherwise note the recovery and go on
    fn recover(&self, position: Position, message: &str) -> Result<()> {
        if self.config.strict {
            return Err(ParseError::with_context(message, position, self.source.as_str()).into());
        }
        log::trace!("Recovered from {} at {}", message, position);
        Ok(())
    }
}

impl Iterator for SelectParser {
    type Item = Result<SelectExpression>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_select_expression() {
            Ok(Some(expression)) => Some(Ok(expression)),
            Ok(None) => None,
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

/// Parse a whole select list with the default configuration
pub fn parse_select_list(input: &str) -> Result<Vec<SelectExpression>> {
    SelectParser::new(input).collect()
}

/// Parse a whole select list with `config`
pub fn parse_select_list_with_config(
    input: &str,
    config: SelectConfig,
) -> Result<Vec<SelectExpression>> {
    SelectParser::with_config(input, config).collect()
}
