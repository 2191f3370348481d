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

//! Merges runs of adjacent text tokens

use std::iter::Peekable;

use crate::token::Token;

/// Lazy adapter yielding each run of text tokens as a single token.
///
/// The first token of a run accumulates the values of the rest and takes the
/// `end` of the last one. Tag tokens pass through untouched.
pub struct Squish<I: Iterator<Item = Token>> {
    tokens: Peekable<I>,
}

impl<I: Iterator<Item = Token>> Iterator for Squish<I> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let mut token = self.tokens.next()?;
        if token.is_text() {
            while let Some(next) = self.tokens.next_if(Token::is_text) {
                token.value.push_str(&next.value);
                token.end = next.end;
            }
            token.value.shrink_to_fit();
        }
        Some(token)
    }
}

/// Squishes `tokens`
pub fn squish<I: IntoIterator<Item = Token>>(tokens: I) -> Squish<I::IntoIter> {
    Squish {
        tokens: tokens.into_iter().peekable(),
    }
}
