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

//! Parse entry points
//!
//! # Examples
//!
//! ```rust
//! use dry_mustache_parser::{parse, TokenKind};
//!
//! let tree = parse("Hello {{name}}!").unwrap();
//! assert_eq!(tree.len(), 3);
//! assert_eq!(tree[0].value, "Hello ");
//! assert_eq!(tree[1].kind, TokenKind::Variable);
//! assert_eq!(tree[2].value, "!");
//! ```
//!
//! A parser with its own delimiter cache:
//!
//! ```rust
//! use dry_mustache_parser::{DelimiterCache, Parser, Tags};
//!
//! let cache = DelimiterCache::with_capacity(2);
//! let parser = Parser::new()
//!     .with_cache(&cache)
//!     .with_tags(Tags::new("<%", "%>"));
//! let tree = parser.parse("<%#items%><%.%><%/items%>").unwrap();
//! assert_eq!(tree[0].children[0].value, ".");
//! assert_eq!(cache.len(), 2);
//! ```

use crate::{
    cache::DelimiterCache,
    error::Result,
    nest::nest,
    registry::TokenRegistry,
    squish::squish,
    tags::Tags,
    token::Token,
    tokenizer::Tokenizer,
};

/// Turns template source into a token tree
#[derive(Clone)]
pub struct Parser<'c> {
    cache: &'c DelimiterCache,
    registry: &'c TokenRegistry,
    tags: Tags,
}

impl Parser<'static> {
    /// Creates a parser using the process-wide cache and registry
    pub fn new() -> Self {
        Self {
            cache: DelimiterCache::global(),
            registry: TokenRegistry::global(),
            tags: Tags::default(),
        }
    }
}

impl Default for Parser<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'c> Parser<'c> {
    /// Uses `cache` for delimiter patterns
    pub fn with_cache<'n>(self, cache: &'n DelimiterCache) -> Parser<'n>
    where
        'c: 'n,
    {
        Parser {
            cache,
            registry: self.registry,
            tags: self.tags,
        }
    }

    /// Uses `registry` to classify tags
    pub fn with_registry<'n>(self, registry: &'n TokenRegistry) -> Parser<'n>
    where
        'c: 'n,
    {
        Parser {
            cache: self.cache,
            registry,
            tags: self.tags,
        }
    }

    /// Starts every parse with `tags` instead of `{{ }}`
    pub fn with_tags(self, tags: Tags) -> Self {
        Self { tags, ..self }
    }

    /// Parses `template` into a tree of tokens
    pub fn parse(&self, template: &str) -> Result<Vec<Token>> {
        if template.is_empty() {
            return Ok(Vec::new());
        }
        let tokens = Tokenizer::new(template, &self.tags, self.cache, self.registry).tokenize()?;
        nest(squish(tokens))
    }
}

/// Parses `template` with the default delimiters
pub fn parse(template: &str) -> Result<Vec<Token>> {
    Parser::new().parse(template)
}

/// Parses `template` starting with `tags` as delimiters
pub fn parse_with_tags(template: &str, tags: &Tags) -> Result<Vec<Token>> {
    Parser::new().with_tags(tags.clone()).parse(template)
}
