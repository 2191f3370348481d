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

//! Tokens produced by the tokenizer
//!
//! A finished parse is a tree: section tokens (`{{#name}}`, `{{^name}}` and any
//! caller-registered section sigils) own the tokens between them and their
//! closing tag as `children`.

use crate::tags::Tags;

/// Sigil reported by raw text tokens
pub const TEXT: &str = "text";

/// Sigil reported by plain interpolation tags, `{{name}}`
pub const NAME: &str = "name";

/// Concrete token kinds
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Literal template text
    Text,
    /// `{{name}}`
    Variable,
    /// `{{#name}}`
    Section,
    /// `{{^name}}`
    Inverted,
    /// `{{/name}}`
    Close,
    /// `{{! comment }}`
    Comment,
    /// `{{&name}}` or `{{{name}}}`
    Unescaped,
    /// `{{=<% %>=}}`
    Delimiters,
    /// `{{>partial}}`
    Partial,
    /// A caller-registered or unrecognized sigil
    Other(String),
}

impl TokenKind {
    /// The sigil this kind is written with
    pub fn sigil(&self) -> &str {
        match self {
            Self::Text => TEXT,
            Self::Variable => NAME,
            Self::Section => "#",
            Self::Inverted => "^",
            Self::Close => "/",
            Self::Comment => "!",
            Self::Unescaped => "&",
            Self::Delimiters => "=",
            Self::Partial => ">",
            Self::Other(sigil) => sigil,
        }
    }
}

/// Capabilities a kind declares to the tokenizer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// Opens a section that needs a matching `/` closer
    pub section: bool,
    /// Renders content, so its line is never standalone
    pub non_space: bool,
}

impl Capabilities {
    pub const NONE: Self = Self {
        section: false,
        non_space: false,
    };
    pub const SECTION: Self = Self {
        section: true,
        non_space: false,
    };
    pub const NON_SPACE: Self = Self {
        section: false,
        non_space: true,
    };
}

/// One unit of a parsed template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Literal text, or the trimmed inner text of a tag
    pub value: String,
    /// Byte offset of the first byte of the token
    pub start: usize,
    /// Byte offset just past the token
    pub end: usize,
    /// Delimiters active when the tag was read
    pub tags: Tags,
    /// Tokens between a section and its closer
    pub children: Vec<Token>,
    /// Offset of the section's closing tag
    pub section_end: Option<usize>,
    /// Whitespace removed in front of a standalone partial
    pub indent: String,
    capabilities: Capabilities,
}

impl Token {
    pub fn new(kind: TokenKind, capabilities: Capabilities, tags: &Tags) -> Self {
        Self {
            kind,
            value: String::new(),
            start: 0,
            end: 0,
            tags: tags.clone(),
            children: Vec::new(),
            section_end: None,
            indent: String::new(),
            capabilities,
        }
    }

    /// A single run of literal text
    pub fn text(value: impl Into<String>, start: usize, end: usize, tags: &Tags) -> Self {
        Self {
            value: value.into(),
            start,
            end,
            ..Self::new(TokenKind::Text, Capabilities::NON_SPACE, tags)
        }
    }

    /// The sigil of this token's kind, `"text"` for literal text
    pub fn tag_type(&self) -> &str {
        self.kind.sigil()
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn is_section(&self) -> bool {
        self.capabilities.section
    }

    pub fn is_non_space(&self) -> bool {
        self.capabilities.non_space
    }

    pub fn is_text(&self) -> bool {
        self.kind == TokenKind::Text
    }

    pub fn is_close(&self) -> bool {
        self.kind == TokenKind::Close
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_tokens_report_text_type() {
        let token = Token::text("Hi", 0, 2, &Tags::default());
        assert_eq!(token.tag_type(), "text");
        assert!(token.is_text());
        assert!(!token.is_section());
        assert_eq!(token.section_end, None);
    }

    #[test]
    fn other_kinds_report_their_sigil() {
        assert_eq!(TokenKind::Other("$".to_string()).sigil(), "$");
        assert_eq!(TokenKind::Variable.sigil(), "name");
        assert_eq!(TokenKind::Unescaped.sigil(), "&");
    }
}
