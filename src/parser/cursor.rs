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

//! Character cursor with mark/rewind for speculative lookahead

use super::error::Position;

/// Saved cursor state, restored by [`Cursor::rewind`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark(Position);

/// Read cursor over the characters of one input string
#[derive(Debug, Clone, Default)]
pub struct Cursor {
    input: Vec<char>,
    pos: Position,
}

impl Cursor {
    /// Create a cursor at the start of `input`
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            pos: Position::start(),
        }
    }

    /// Replace the input and move to its start
    pub fn reset(&mut self, input: &str) {
        self.input = input.chars().collect();
        self.pos = Position::start();
    }

    /// Current character, `None` at end of input
    pub fn peek(&self) -> Option<char> {
        self.input.get(self.pos.offset).copied()
    }

    /// Consume and return the current character
    pub fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos.offset += 1;
        if ch == '\n' {
            self.pos.line += 1;
            self.pos.column = 1;
        } else {
            self.pos.column += 1;
        }
        Some(ch)
    }

    /// Consume the current character if it equals `expected`, ignoring
    /// ASCII case
    pub fn eat_ignore_case(&mut self, expected: char) -> bool {
        match self.peek() {
            Some(ch) if ch.eq_ignore_ascii_case(&expected) => {
                self.advance();
                true
            }
            _ => false,
        }
    }

    /// Skip whitespace; returns true if any was skipped
    pub fn skip_whitespace(&mut self) -> bool {
        let start = self.pos.offset;
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
        self.pos.offset > start
    }

    /// Save the current position
    pub fn mark(&self) -> Mark {
        Mark(self.pos)
    }

    /// Restore a saved position
    pub fn rewind(&mut self, mark: Mark) {
        self.pos = mark.0;
    }

    /// Current position
    pub fn position(&self) -> Position {
        self.pos
    }

    /// Characters between two offsets
    pub fn slice(&self, from: usize, to: usize) -> String {
        let to = to.min(self.input.len());
        let from = from.min(to);
        self.input[from..to].iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_tracks_lines() {
        let mut cursor = Cursor::new("a\nbc");
        assert_eq!(cursor.advance(), Some('a'));
        assert_eq!(cursor.advance(), Some('\n'));
        assert_eq!(cursor.position(), Position::new(2, 2, 1));
        assert_eq!(cursor.advance(), Some('b'));
        assert_eq!(cursor.position().column, 2);
        assert_eq!(cursor.advance(), Some('c'));
        assert_eq!(cursor.advance(), None);
        assert_eq!(cursor.peek(), None);
    }

    #[test]
    fn test_mark_and_rewind() {
        let mut cursor = Cursor::new("price ASCII");
        cursor.advance();
        let mark = cursor.mark();
        cursor.skip_whitespace();
        cursor.advance();
        cursor.advance();
        cursor.rewind(mark);
        assert_eq!(cursor.mark(), mark);
        assert_eq!(cursor.position().offset, 1);
        assert_eq!(cursor.peek(), Some('r'));
    }

    #[test]
    fn test_eat_ignore_case() {
        let mut cursor = Cursor::new("As");
        assert!(cursor.eat_ignore_case('a'));
        assert!(!cursor.eat_ignore_case('x'));
        assert!(cursor.eat_ignore_case('S'));
        assert_eq!(cursor.peek(), None);
    }

    #[test]
    fn test_slice_and_multibyte() {
        let cursor = Cursor::new("héllo, wörld");
        assert_eq!(cursor.slice(0, 5), "héllo");
        assert_eq!(cursor.slice(7, 100), "wörld");
    }
}
