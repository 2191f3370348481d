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

//! Compiled delimiter patterns and their bounded cache
//!
//! Every distinct [`Tags`] pair compiles into three patterns. Templates rarely
//! switch delimiters, so a handful of entries covers almost every lookup. The
//! cache evicts in insertion order once it holds `capacity` entries.
//!
//! A process-wide instance is reachable through [`DelimiterCache::global`],
//! but a [`crate::Parser`] can be handed its own cache instead.

use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex, MutexGuard},
};

use lazy_static::lazy_static;
use regex::Regex;

use crate::tags::{Tags, escape_for_pattern};

/// Capacity of a freshly created cache
pub const DEFAULT_CAPACITY: usize = 4;

/// The three patterns the tokenizer needs for one delimiter pair
#[derive(Debug)]
pub struct DelimiterRegexes {
    /// Open delimiter plus any whitespace after it
    pub open: Regex,
    /// Any whitespace plus the close delimiter
    pub close: Regex,
    /// Any whitespace, `}` and the close delimiter, ending `{{{name}}}`
    pub triple_close: Regex,
}

impl DelimiterRegexes {
    pub fn new(tags: &Tags) -> Self {
        let open = escape_for_pattern(tags.open());
        let close = escape_for_pattern(tags.close());
        Self {
            open: compile(&format!(r"{open}\s*")),
            close: compile(&format!(r"\s*{close}")),
            triple_close: compile(&format!(r"\s*\}}{close}")),
        }
    }
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("escaped delimiters always form a valid pattern")
}

struct Entries {
    capacity: usize,
    map: HashMap<Tags, Arc<DelimiterRegexes>>,
    order: VecDeque<Tags>,
}

impl Entries {
    fn evict_to(&mut self, size: usize) {
        while self.map.len() > size {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.map.remove(&oldest);
                }
                None => break,
            }
        }
    }
}

/// Thread-safe, insertion-ordered cache of [`DelimiterRegexes`]
pub struct DelimiterCache {
    entries: Mutex<Entries>,
}

lazy_static! {
    static ref GLOBAL: DelimiterCache = DelimiterCache::new();
}

impl DelimiterCache {
    /// Creates a cache seeded with the default `{{ }}` entry
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a cache holding at most `capacity` entries (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        let tags = Tags::default();
        let regexes = Arc::new(DelimiterRegexes::new(&tags));
        let entries = Entries {
            capacity: capacity.max(1),
            map: HashMap::from([(tags.clone(), regexes)]),
            order: VecDeque::from([tags]),
        };
        Self {
            entries: Mutex::new(entries),
        }
    }

    /// The process-wide cache used by [`crate::parse`]
    pub fn global() -> &'static DelimiterCache {
        &GLOBAL
    }

    fn lock(&self) -> MutexGuard<'_, Entries> {
        // Entries are never left half-updated, so a poisoned lock is still usable
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Returns the patterns for `tags`, compiling and inserting them on a miss
    pub fn get_or_build(&self, tags: &Tags) -> Arc<DelimiterRegexes> {
        if let Some(found) = self.lock().map.get(tags) {
            return found.clone();
        }
        let built = Arc::new(DelimiterRegexes::new(tags));
        let mut entries = self.lock();
        // another parse may have inserted the same pair while we compiled
        if let Some(found) = entries.map.get(tags) {
            return found.clone();
        }
        let capacity = entries.capacity;
        entries.evict_to(capacity - 1);
        entries.order.push_back(tags.clone());
        entries.map.insert(tags.clone(), built.clone());
        built
    }

    pub fn capacity(&self) -> usize {
        self.lock().capacity
    }

    /// Changes the capacity, evicting the oldest entries down to it.
    ///
    /// Values below one are raised to one.
    pub fn set_capacity(&self, capacity: usize) {
        let mut entries = self.lock();
        entries.capacity = capacity.max(1);
        let capacity = entries.capacity;
        entries.evict_to(capacity);
    }

    pub fn len(&self) -> usize {
        self.lock().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, tags: &Tags) -> bool {
        self.lock().map.contains_key(tags)
    }
}

impl Default for DelimiterCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Capacity of the process-wide cache
pub fn cache_capacity() -> usize {
    DelimiterCache::global().capacity()
}

/// Sets the capacity of the process-wide cache, evicting down to it
pub fn set_cache_capacity(capacity: usize) {
    DelimiterCache::global().set_capacity(capacity)
}
