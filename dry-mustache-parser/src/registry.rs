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

//! Token-type registry
//!
//! Maps the sigil that follows an open delimiter to the kind of token it
//! produces and the capabilities that kind declares. The built-in Mustache
//! sigils are always present; callers can [`register`](TokenRegistry::register)
//! more, e.g. `$` for block parents.
//!
//! ```rust
//! use dry_mustache_parser::{Capabilities, Parser, TokenRegistry};
//!
//! let mut registry = TokenRegistry::new();
//! registry.register("$", Capabilities::SECTION);
//!
//! let tree = Parser::new().with_registry(&registry).parse("{{$body}}x{{/body}}").unwrap();
//! assert_eq!(tree[0].tag_type(), "$");
//! assert_eq!(tree[0].children[0].value, "x");
//! ```

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    tags::{Tags, escape_for_pattern},
    token::{Capabilities, NAME, Token, TokenKind},
};

/// The sigil that opens a `{{{name}}}` tag; it produces an unescaped token
pub const TRIPLE: &str = "{";

struct Entry {
    sigil: String,
    kind: TokenKind,
    capabilities: Capabilities,
}

/// Sigil to token kind mapping
pub struct TokenRegistry {
    entries: Vec<Entry>,
    sigils: Regex,
}

lazy_static! {
    static ref GLOBAL: TokenRegistry = TokenRegistry::new();
}

fn builtins() -> Vec<Entry> {
    [
        (NAME, TokenKind::Variable, Capabilities::NON_SPACE),
        ("#", TokenKind::Section, Capabilities::SECTION),
        ("^", TokenKind::Inverted, Capabilities::SECTION),
        ("/", TokenKind::Close, Capabilities::NONE),
        ("!", TokenKind::Comment, Capabilities::NONE),
        ("&", TokenKind::Unescaped, Capabilities::NON_SPACE),
        (TRIPLE, TokenKind::Unescaped, Capabilities::NON_SPACE),
        ("=", TokenKind::Delimiters, Capabilities::NONE),
        (">", TokenKind::Partial, Capabilities::NONE),
    ]
    .into_iter()
    .map(|(sigil, kind, capabilities)| Entry {
        sigil: sigil.to_string(),
        kind,
        capabilities,
    })
    .collect()
}

/// Builds a pattern matching any registered sigil at the start of its input
fn sigil_pattern(entries: &[Entry]) -> Regex {
    let mut sigils: Vec<&str> = entries
        .iter()
        .map(|entry| entry.sigil.as_str())
        .filter(|sigil| *sigil != NAME)
        .collect();
    sigils.sort_by(|a, b| b.len().cmp(&a.len()));
    let alternatives: Vec<String> = sigils.into_iter().map(escape_for_pattern).collect();
    Regex::new(&format!(r"\A(?:{})", alternatives.join("|")))
        .expect("escaped sigils always form a valid pattern")
}

impl TokenRegistry {
    /// Creates a registry holding the built-in Mustache sigils
    pub fn new() -> Self {
        let entries = builtins();
        let sigils = sigil_pattern(&entries);
        Self { entries, sigils }
    }

    /// The process-wide registry used by [`crate::parse`]
    pub fn global() -> &'static TokenRegistry {
        &GLOBAL
    }

    /// Registers `sigil` as an [`TokenKind::Other`] kind with `capabilities`.
    ///
    /// Registering an existing sigil replaces its capabilities.
    pub fn register(&mut self, sigil: &str, capabilities: Capabilities) {
        match self.entries.iter_mut().find(|entry| entry.sigil == sigil) {
            Some(entry) => entry.capabilities = capabilities,
            None => self.entries.push(Entry {
                sigil: sigil.to_string(),
                kind: TokenKind::Other(sigil.to_string()),
                capabilities,
            }),
        }
        self.sigils = sigil_pattern(&self.entries);
    }

    /// Pattern matching a registered sigil right after an open delimiter
    pub fn sigils(&self) -> &Regex {
        &self.sigils
    }

    /// Creates an empty token for `tag_type` read under `tags`.
    ///
    /// Unknown types produce [`TokenKind::Other`] with no capabilities.
    pub fn create(&self, tag_type: &str, tags: &Tags) -> Token {
        match self.entries.iter().find(|entry| entry.sigil == tag_type) {
            Some(entry) => Token::new(entry.kind.clone(), entry.capabilities, tags),
            None => Token::new(
                TokenKind::Other(tag_type.to_string()),
                Capabilities::NONE,
                tags,
            ),
        }
    }
}

impl Default for TokenRegistry {
    fn default() -> Self {
        Self::new()
    }
}
