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

//! Builds the token tree
//!
//! Every token between a section and its closer moves into the section's
//! `children`. Closing tags do not appear in the tree; the section records
//! where its closer started in `section_end` instead.

use crate::{
    error::{ParseError, Result},
    token::Token,
};

/// Nests a flat, squished token sequence into a tree.
///
/// The tokenizer already rejects unbalanced templates; hand-built sequences
/// are checked again here.
pub fn nest<I: IntoIterator<Item = Token>>(tokens: I) -> Result<Vec<Token>> {
    let mut root = Vec::new();
    let mut open: Vec<Token> = Vec::new();
    for token in tokens {
        if token.is_section() {
            open.push(token);
        } else if token.is_close() {
            let mut section = open.pop().ok_or_else(|| ParseError::UnopenedSection {
                name: token.value.clone(),
                offset: token.start,
            })?;
            if section.value != token.value {
                return Err(ParseError::UnclosedSection {
                    name: section.value,
                    offset: token.start,
                });
            }
            section.section_end = Some(token.start);
            collector(&mut open, &mut root).push(section);
        } else {
            collector(&mut open, &mut root).push(token);
        }
    }
    match open.pop() {
        Some(section) => Err(ParseError::UnclosedSection {
            offset: section.end,
            name: section.value,
        }),
        None => Ok(root),
    }
}

/// Children of the innermost open section, or the top level
fn collector<'a>(open: &'a mut [Token], root: &'a mut Vec<Token>) -> &'a mut Vec<Token> {
    match open.last_mut() {
        Some(section) => &mut section.children,
        None => root,
    }
}
