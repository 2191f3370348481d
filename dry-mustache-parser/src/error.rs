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

//! Error handling for the Mustache tokenizer
//!
//! Every failure is structural: the template itself is malformed. Each error
//! carries the offending tag value (where there is one) and the byte offset
//! at which the problem was detected.

use thiserror::Error;

/// Error type for template parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// An open delimiter was consumed but its close delimiter never showed up
    #[error("unclosed tag at offset {offset}")]
    UnclosedTag { offset: usize },

    /// A `{{/name}}` tag with no section open
    #[error("closing tag \"{name}\" at offset {offset} has no open section")]
    UnopenedSection { name: String, offset: usize },

    /// A section still open at a mismatched closer or at end of input
    #[error("unclosed section \"{name}\" at offset {offset}")]
    UnclosedSection { name: String, offset: usize },

    /// A `{{=...=}}` tag whose value is not exactly two delimiters
    #[error("invalid delimiters \"{value}\" at offset {offset}")]
    InvalidDelimiters { value: String, offset: usize },
}

impl ParseError {
    /// Byte offset into the template where the failure was detected
    pub fn offset(&self) -> usize {
        match self {
            Self::UnclosedTag { offset }
            | Self::UnopenedSection { offset, .. }
            | Self::UnclosedSection { offset, .. }
            | Self::InvalidDelimiters { offset, .. } => *offset,
        }
    }

    /// The section name involved, if any
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::UnopenedSection { name, .. } | Self::UnclosedSection { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// Result type for template parsing operations
pub type Result<T> = std::result::Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_section() {
        let err = ParseError::UnclosedSection {
            name: "a".to_string(),
            offset: 6,
        };
        assert_eq!(err.to_string(), "unclosed section \"a\" at offset 6");
        assert_eq!(err.name(), Some("a"));
        assert_eq!(err.offset(), 6);
    }

    #[test]
    fn unclosed_tag_has_no_name() {
        let err = ParseError::UnclosedTag { offset: 6 };
        assert_eq!(err.name(), None);
        assert_eq!(err.to_string(), "unclosed tag at offset 6");
    }
}
