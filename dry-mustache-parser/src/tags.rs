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

//! Delimiter pairs
//!
//! A template starts out with `{{`/`}}` and may switch to any other pair with
//! a `{{=<% %>=}}` tag.

use std::fmt::{Display, Write};

/// An open/close delimiter pair
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tags {
    open: String,
    close: String,
}

impl Tags {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    /// Reads the value of a delimiter-change tag, e.g. `<% %>`.
    ///
    /// Returns `None` unless the value splits into exactly two delimiters.
    pub fn from_value(value: &str) -> Option<Self> {
        let mut parts = value.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(open), Some(close), None) => Some(Self::new(open, close)),
            _ => None,
        }
    }

    pub fn open(&self) -> &str {
        &self.open
    }

    pub fn close(&self) -> &str {
        &self.close
    }
}

impl Default for Tags {
    fn default() -> Self {
        Self::new("{{", "}}")
    }
}

/// Canonical `"open close"` form, used as the delimiter cache key
impl Display for Tags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.open)?;
        f.write_char(' ')?;
        f.write_str(&self.close)
    }
}

/// Escapes `text` so it matches literally inside a generated pattern
pub fn escape_for_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() * 2);
    for c in text.chars() {
        match c {
            '-' | '[' | ']' | '{' | '}' | '(' | ')' | '*' | '+' | '?' | '.' | ',' | '^' | '$'
            | '|' | '#' | '\\' => {
                escaped.push('\\');
                escaped.push(c);
            }
            c if c.is_whitespace() => {
                let _ = write!(escaped, "\\x{{{:x}}}", c as u32);
            }
            c => escaped.push(c),
        }
    }
    escaped
}
