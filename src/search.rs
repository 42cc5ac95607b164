//! Free-text filtering of catalog entries.
//!
//! A query is a plain, case-insensitive substring test over an entry's title,
//! description and category (and optionally its command text). Results keep
//! catalog order; nothing is scored or re-ranked.
//!
//! Query and entry text go through the same folding: every char is
//! lowercased and each run of whitespace becomes a single space. A match
//! means the folded query occurs in the folded text.

use nucleo_matcher::{Config, Matcher, Utf32Str};

use crate::catalog::CommandEntry;

/// Which fields take part in matching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Also match against the literal command text.
    pub match_command: bool,
}

/// Text after case and whitespace folding. `origins[i]` is the char offset
/// in the source text that produced `chars[i]`.
struct Folded {
    chars: Vec<char>,
    origins: Vec<usize>,
}

fn fold(text: &str) -> Folded {
    let mut chars = Vec::with_capacity(text.len());
    let mut origins = Vec::with_capacity(text.len());
    let mut in_space = false;
    for (i, c) in text.chars().enumerate() {
        if c.is_whitespace() {
            if !in_space {
                chars.push(' ');
                origins.push(i);
            }
            in_space = true;
            continue;
        }
        in_space = false;
        for lower in c.to_lowercase() {
            chars.push(lower);
            origins.push(i);
        }
    }
    Folded { chars, origins }
}

/// Matcher doing exact char comparison; folding already happened.
fn exact_matcher() -> Matcher {
    let mut config = Config::DEFAULT;
    config.ignore_case = false;
    config.normalize = false;
    Matcher::new(config)
}

/// A compiled search query.
pub struct SearchQuery {
    text: String,
    needle: Vec<char>,
}

impl SearchQuery {
    /// Compile `raw`. Surrounding whitespace is ignored and inner runs of
    /// whitespace count as a single space.
    pub fn new(raw: &str) -> Self {
        let text = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        let needle = fold(&text).chars;
        Self { text, needle }
    }

    /// The normalized query text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Whether `text` contains the query. An empty query matches everything.
    pub fn matches_text(&self, text: &str, matcher: &mut Matcher) -> bool {
        if self.is_empty() {
            return true;
        }
        let haystack = fold(text);
        if haystack.chars.len() < self.needle.len() {
            return false;
        }
        matcher
            .substring_match(
                Utf32Str::Unicode(&haystack.chars),
                Utf32Str::Unicode(&self.needle),
            )
            .is_some()
    }

    pub fn matches(
        &self,
        entry: &CommandEntry,
        options: SearchOptions,
        matcher: &mut Matcher,
    ) -> bool {
        if self.is_empty() {
            return true;
        }
        self.matches_text(&entry.title, matcher)
            || self.matches_text(&entry.description, matcher)
            || self.matches_text(&entry.category, matcher)
            || (options.match_command && self.matches_text(&entry.command, matcher))
    }

    /// Char positions of the matched span in `text`, empty when it does not
    /// match or the query is empty.
    pub fn indices(&self, text: &str, matcher: &mut Matcher) -> Vec<usize> {
        if self.is_empty() {
            return Vec::new();
        }
        let haystack = fold(text);
        if haystack.chars.len() < self.needle.len() {
            return Vec::new();
        }
        let mut indices = Vec::new();
        if matcher
            .substring_indices(
                Utf32Str::Unicode(&haystack.chars),
                Utf32Str::Unicode(&self.needle),
                &mut indices,
            )
            .is_none()
        {
            return Vec::new();
        }
        let mut positions: Vec<usize> = indices
            .into_iter()
            .filter_map(|i| haystack.origins.get(i as usize).copied())
            .collect();
        positions.sort_unstable();
        positions.dedup();
        positions
    }
}

/// Entries matching `query`, in their original order.
pub fn filter<'a>(
    entries: &'a [CommandEntry],
    query: &str,
    options: SearchOptions,
) -> Vec<&'a CommandEntry> {
    let query = SearchQuery::new(query);
    if query.is_empty() {
        return entries.iter().collect();
    }
    let mut matcher = exact_matcher();
    let matched: Vec<&CommandEntry> = entries
        .iter()
        .filter(|entry| query.matches(entry, options, &mut matcher))
        .collect();
    tracing::trace!(query = query.as_str(), matched = matched.len(), "filtered catalog");
    matched
}

/// Char positions of `query` inside `text`, for highlighting.
pub fn match_indices(text: &str, query: &str) -> Vec<usize> {
    let query = SearchQuery::new(query);
    let mut matcher = exact_matcher();
    query.indices(text, &mut matcher)
}
