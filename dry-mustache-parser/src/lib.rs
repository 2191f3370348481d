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

//! Mustache template tokenizer
//!
//! This crate turns Mustache template source into a tree of typed tokens for
//! a renderer to walk. It handles:
//!
//! - Interpolation, sections, inverted sections, comments, partials
//! - Unescaped output: `{{&name}}` and `{{{name}}}`
//! - Delimiter switching: `{{=<% %>=}}`
//! - Standalone lines: a line holding only a section, comment, partial or
//!   delimiter tag contributes no text
//! - Section balance checks
//!
//! # Example
//!
//! ```rust
//! use dry_mustache_parser::{parse, TokenKind};
//!
//! let tree = parse("{{#items}}\n  <li>{{name}}</li>\n{{/items}}\n").unwrap();
//! assert_eq!(tree.len(), 1);
//! assert_eq!(tree[0].kind, TokenKind::Section);
//! assert_eq!(tree[0].children[0].value, "  <li>");
//! ```
//!
//! # Module Structure
//!
//! - `parser.rs`: Entry points
//! - `tokenizer.rs`: The main scan loop and standalone-line handling
//! - `scanner.rs`: Regex-driven cursor over the source
//! - `cache.rs`: Bounded cache of compiled delimiter patterns
//! - `registry.rs`: Sigil to token kind mapping
//! - `squish.rs`: Merges adjacent text tokens
//! - `nest.rs`: Builds the tree
//! - `error.rs`: Error types

pub mod cache;
pub mod error;
pub mod nest;
pub mod parser;
pub mod registry;
pub mod scanner;
pub mod squish;
pub mod tags;
pub mod token;
mod tokenizer;

pub use cache::{DelimiterCache, DelimiterRegexes, cache_capacity, set_cache_capacity};
pub use error::{ParseError, Result};
pub use parser::{Parser, parse, parse_with_tags};
pub use registry::TokenRegistry;
pub use tags::{Tags, escape_for_pattern};
pub use token::{Capabilities, Token, TokenKind};
