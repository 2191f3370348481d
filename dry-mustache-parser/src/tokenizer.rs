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

//! The main scan loop
//!
//! Produces a flat token sequence: one text token per character of literal
//! text, one token per tag. Literal text is split per character so the
//! standalone-line rule can drop exactly the whitespace around a tag that
//! sits alone on its line.

use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    cache::{DelimiterCache, DelimiterRegexes},
    error::{ParseError, Result},
    registry::{TRIPLE, TokenRegistry},
    scanner::Scanner,
    tags::Tags,
    token::{NAME, Token, TokenKind},
};

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\A\s+").unwrap();
    static ref EQUALS: Regex = Regex::new("=").unwrap();
    static ref TRIPLE_BRACE: Regex = Regex::new(r"\A\s*\}").unwrap();
}

/// State of a single parse
pub(crate) struct Tokenizer<'a, 'c> {
    scanner: Scanner<'a>,
    registry: &'c TokenRegistry,
    cache: &'c DelimiterCache,
    tags: Tags,
    regexes: Arc<DelimiterRegexes>,
    /// Values of the open sections, innermost last
    sections: Vec<String>,
    tokens: Vec<Token>,
    /// Indices of whitespace text tokens on the current line
    whitespace: Vec<usize>,
    /// Index of the first token on the current line
    line_start: usize,
    has_tag: bool,
    non_space: bool,
}

impl<'a, 'c> Tokenizer<'a, 'c> {
    pub(crate) fn new(
        input: &'a str,
        tags: &Tags,
        cache: &'c DelimiterCache,
        registry: &'c TokenRegistry,
    ) -> Self {
        Self {
            scanner: Scanner::new(input),
            registry,
            cache,
            tags: tags.clone(),
            regexes: cache.get_or_build(tags),
            sections: Vec::new(),
            tokens: Vec::new(),
            whitespace: Vec::new(),
            line_start: 0,
            has_tag: false,
            non_space: false,
        }
    }

    /// Scans the whole input into a flat token sequence
    pub(crate) fn tokenize(mut self) -> Result<Vec<Token>> {
        while !self.scanner.at_end() {
            let start = self.scanner.position();
            let text = self.scanner.scan_until(&self.regexes.open);
            self.push_text(start, text);

            let tag_start = self.scanner.position();
            if self.scanner.scan_while(&self.regexes.open).is_empty() {
                break;
            }
            self.has_tag = true;
            let token = self.read_tag(tag_start)?;
            self.dispatch(token)?;
        }
        self.end_line();

        match self.sections.pop() {
            Some(name) => Err(ParseError::UnclosedSection {
                name,
                offset: self.scanner.position(),
            }),
            None => Ok(self.tokens),
        }
    }

    /// Emits one text token per character of `text`
    fn push_text(&mut self, start: usize, text: &str) {
        for (offset, c) in text.char_indices() {
            let start = start + offset;
            let index = self.tokens.len();
            self.tokens
                .push(Token::text(c, start, start + c.len_utf8(), &self.tags));
            if c.is_whitespace() {
                self.whitespace.push(index);
            } else {
                self.non_space = true;
            }
            if c == '\n' {
                self.end_line();
            }
        }
    }

    /// Applies the standalone rule to the line just finished.
    ///
    /// A line holding tags and nothing but whitespace contributes no text.
    fn end_line(&mut self) {
        if self.has_tag && !self.non_space {
            self.indent_partials();
            for index in self.whitespace.drain(..).rev() {
                self.tokens.remove(index);
            }
        } else {
            self.whitespace.clear();
        }
        self.has_tag = false;
        self.non_space = false;
        self.line_start = self.tokens.len();
    }

    /// Records the leading whitespace of a standalone line on its partials
    fn indent_partials(&mut self) {
        let mut indent = String::new();
        for token in &mut self.tokens[self.line_start..] {
            match token.kind {
                TokenKind::Text => indent.push_str(&token.value),
                TokenKind::Partial => token.indent = indent.clone(),
                _ => {}
            }
        }
    }

    /// Reads the tag whose open delimiter has just been consumed
    fn read_tag(&mut self, tag_start: usize) -> Result<Token> {
        let tags = self.tags.clone();
        let sigil = self.scanner.scan_while(self.registry.sigils());
        self.scanner.scan_while(&WHITESPACE);

        let (tag_type, value) = match sigil {
            "=" => {
                let value = self.scanner.scan_until(&EQUALS);
                self.scanner.scan_while(&EQUALS);
                self.scanner.scan_until(&self.regexes.close);
                ("=", value)
            }
            TRIPLE => {
                let value = self.scanner.scan_until(&self.regexes.triple_close);
                self.scanner.scan_while(&TRIPLE_BRACE);
                ("&", value)
            }
            "" => (NAME, self.scanner.scan_until(&self.regexes.close)),
            sigil => (sigil, self.scanner.scan_until(&self.regexes.close)),
        };
        if self.scanner.scan_while(&self.regexes.close).is_empty() {
            return Err(ParseError::UnclosedTag {
                offset: self.scanner.position(),
            });
        }

        let mut token = self.registry.create(tag_type, &tags);
        token.value = value.trim().to_string();
        token.start = tag_start;
        token.end = self.scanner.position();
        Ok(token)
    }

    /// Tracks sections and delimiter switches, then emits `token`
    fn dispatch(&mut self, token: Token) -> Result<()> {
        if token.is_section() {
            self.sections.push(token.value.clone());
        } else if token.is_non_space() {
            self.non_space = true;
        } else if token.is_close() {
            let name = self
                .sections
                .pop()
                .ok_or_else(|| ParseError::UnopenedSection {
                    name: token.value.clone(),
                    offset: token.start,
                })?;
            if name != token.value {
                return Err(ParseError::UnclosedSection {
                    name,
                    offset: token.start,
                });
            }
        } else if token.kind == TokenKind::Delimiters {
            let tags = Tags::from_value(&token.value).ok_or_else(|| {
                ParseError::InvalidDelimiters {
                    value: token.value.clone(),
                    offset: token.start,
                }
            })?;
            self.regexes = self.cache.get_or_build(&tags);
            self.tags = tags;
        }
        self.tokens.push(token);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(src: &str) -> Result<Vec<Token>> {
        Tokenizer::new(
            src,
            &Tags::default(),
            DelimiterCache::global(),
            TokenRegistry::global(),
        )
        .tokenize()
    }

    fn types(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(Token::tag_type).collect()
    }

    #[test]
    fn emits_a_token_per_character() {
        let tokens = tokenize("Hi {{name}}").unwrap();
        assert_eq!(types(&tokens), vec!["text", "text", "text", "name"]);
        assert_eq!(tokens[3].value, "name");
        assert_eq!((tokens[3].start, tokens[3].end), (3, 11));
    }

    #[test]
    fn offsets_never_decrease() {
        let tokens = tokenize("a{{#b}} c {{/b}}\n{{! x }}d").unwrap();
        for pair in tokens.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
    }

    #[test]
    fn tag_values_are_trimmed() {
        let tokens = tokenize("{{  # a  }}{{/ a }}").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Section);
        assert_eq!(tokens[0].value, "a");
        assert_eq!(tokens[1].kind, TokenKind::Close);
        assert_eq!(tokens[1].value, "a");
    }

    #[test]
    fn triple_mustache_is_unescaped() {
        let tokens = tokenize("{{{ html }}}").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Unescaped);
        assert_eq!(tokens[0].tag_type(), "&");
        assert_eq!(tokens[0].value, "html");
        assert_eq!(tokens[0].end, 12);
    }

    #[test]
    fn standalone_lines_drop_whitespace() {
        let tokens = tokenize("  {{#a}}  \nx\n{{/a}}\n").unwrap();
        assert_eq!(types(&tokens), vec!["#", "text", "text", "/"]);
    }

    #[test]
    fn interpolation_lines_keep_whitespace() {
        let tokens = tokenize("  {{a}}\n").unwrap();
        assert_eq!(types(&tokens), vec!["text", "text", "name", "text"]);
    }

    #[test]
    fn standalone_last_line_without_newline() {
        let tokens = tokenize("x\n  {{! c }}  ").unwrap();
        assert_eq!(types(&tokens), vec!["text", "text", "!"]);
    }

    #[test]
    fn crlf_is_part_of_a_standalone_line() {
        let tokens = tokenize("|\r\n{{#a}}\r\n{{/a}}\r\n|").unwrap();
        let text: String = tokens
            .iter()
            .filter(|t| t.is_text())
            .map(|t| t.value.as_str())
            .collect();
        assert_eq!(text, "|\r\n|");
    }

    #[test]
    fn standalone_partials_keep_their_indent() {
        let tokens = tokenize("  {{> item }}\n").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Partial);
        assert_eq!(tokens[0].indent, "  ");
    }

    #[test]
    fn inline_partials_have_no_indent() {
        let tokens = tokenize("x {{> item }}\n").unwrap();
        assert_eq!(tokens[2].kind, TokenKind::Partial);
        assert_eq!(tokens[2].indent, "");
    }

    #[test]
    fn delimiter_switch_applies_to_later_tags() {
        let tokens = tokenize("{{=<% %>=}}<% name %>{{x}}").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Delimiters);
        assert_eq!(tokens[0].value, "<% %>");
        assert_eq!(tokens[0].tags, Tags::default());
        assert_eq!(tokens[1].kind, TokenKind::Variable);
        assert_eq!(tokens[1].value, "name");
        assert_eq!(tokens[1].tags, Tags::new("<%", "%>"));
        let text: String = tokens[2..].iter().map(|t| t.value.as_str()).collect();
        assert_eq!(text, "{{x}}");
    }

    #[test]
    fn delimiters_can_switch_back() {
        let tokens = tokenize("{{=| |=}}|a||={{ }}=|{{b}}").unwrap();
        assert_eq!(types(&tokens), vec!["=", "name", "=", "name"]);
        assert_eq!(tokens[3].value, "b");
    }

    #[test]
    fn invalid_delimiters_fail() {
        assert_eq!(
            tokenize("{{=<%=}}").unwrap_err(),
            ParseError::InvalidDelimiters {
                value: "<%".to_string(),
                offset: 0
            }
        );
    }

    #[test]
    fn unclosed_tag_reports_scan_position() {
        assert_eq!(
            tokenize("{{name").unwrap_err(),
            ParseError::UnclosedTag { offset: 6 }
        );
    }

    #[test]
    fn unopened_section() {
        assert_eq!(
            tokenize("x{{/a}}").unwrap_err(),
            ParseError::UnopenedSection {
                name: "a".to_string(),
                offset: 1
            }
        );
    }

    #[test]
    fn mismatched_section_names_the_open_one() {
        assert_eq!(
            tokenize("{{#a}}{{/b}}").unwrap_err(),
            ParseError::UnclosedSection {
                name: "a".to_string(),
                offset: 6
            }
        );
    }

    #[test]
    fn section_left_open_at_end() {
        assert_eq!(
            tokenize("{{#a}}{{^b}}{{/b}}").unwrap_err(),
            ParseError::UnclosedSection {
                name: "a".to_string(),
                offset: 18
            }
        );
    }
}
