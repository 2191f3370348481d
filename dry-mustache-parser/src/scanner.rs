// MIT License
//
// Copyright (c) 2024 Jerome Johnson
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

//! Cursor over an immutable template string
//!
//! The scanner knows nothing about Mustache. It moves a byte position forward
//! by matching regular expressions either exactly at the cursor
//! ([`Scanner::scan_while`]) or at the first match at or after it
//! ([`Scanner::scan_until`]).

use regex::Regex;

/// A forward-only cursor over `input`
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner positioned at the start of `input`
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    /// Current byte offset
    pub fn position(&self) -> usize {
        self.position
    }

    /// Whether every byte of the input has been consumed
    pub fn at_end(&self) -> bool {
        self.position == self.input.len()
    }

    /// Input not consumed yet
    pub fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    /// Consumes and returns the text `pattern` matches exactly at the cursor.
    ///
    /// Returns an empty string without moving when the pattern does not match
    /// at the cursor.
    pub fn scan_while(&mut self, pattern: &Regex) -> &'a str {
        let rest = self.rest();
        match pattern.find(rest) {
            Some(found) if found.start() == 0 => {
                self.position += found.end();
                &rest[..found.end()]
            }
            _ => "",
        }
    }

    /// Consumes and returns everything before the first match of `pattern`.
    ///
    /// The match itself is left in place. Without a match the remaining input
    /// is consumed.
    pub fn scan_until(&mut self, pattern: &Regex) -> &'a str {
        let rest = self.rest();
        let end = pattern.find(rest).map_or(rest.len(), |found| found.start());
        self.position += end;
        &rest[..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_while_only_matches_at_cursor() {
        let digits = Regex::new(r"\d+").unwrap();
        let mut scanner = Scanner::new("ab12");
        assert_eq!(scanner.scan_while(&digits), "");
        assert_eq!(scanner.position(), 0);

        let letters = Regex::new(r"[a-z]+").unwrap();
        assert_eq!(scanner.scan_while(&letters), "ab");
        assert_eq!(scanner.scan_while(&digits), "12");
        assert!(scanner.at_end());
    }

    #[test]
    fn scan_until_stops_before_match() {
        let open = Regex::new(r"\{\{").unwrap();
        let mut scanner = Scanner::new("Hello {{name}}");
        assert_eq!(scanner.scan_until(&open), "Hello ");
        assert_eq!(scanner.position(), 6);
        assert_eq!(scanner.scan_until(&open), "");
        assert_eq!(scanner.position(), 6);
    }

    #[test]
    fn scan_until_without_match_consumes_rest() {
        let open = Regex::new(r"\{\{").unwrap();
        let mut scanner = Scanner::new("no tags here");
        assert_eq!(scanner.scan_until(&open), "no tags here");
        assert!(scanner.at_end());
        assert_eq!(scanner.scan_until(&open), "");
    }

    #[test]
    fn empty_input_is_at_end() {
        assert!(Scanner::new("").at_end());
    }
}
