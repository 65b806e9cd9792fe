//! Engine — substring pass-filter over fully rendered lines.

use std::sync::atomic::{AtomicU64, Ordering};

use grep_matcher::Matcher;
use grep_regex::{RegexMatcher, RegexMatcherBuilder};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("invalid filter pattern: {0}")]
    InvalidPattern(String),
}

#[derive(Debug, Default)]
struct FilterStats {
    lines_scanned: AtomicU64,
    lines_matched: AtomicU64,
}

/// Case-sensitive substring allow-list.
///
/// The substrings are compiled into a single alternation of escaped
/// literals; an empty list accepts everything. Matching runs over the full
/// rendered line, band column included.
pub struct PassFilter {
    matcher: Option<RegexMatcher>,
    stats: FilterStats,
}

impl PassFilter {
    pub fn new(substrings: &[String]) -> Result<Self, FilterError> {
        let terms: Vec<String> = substrings
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| escape_literal(s))
            .collect();

        let matcher = if terms.is_empty() {
            None
        } else {
            let pattern = terms.join("|");
            let matcher = RegexMatcherBuilder::new()
                .case_insensitive(false)
                .multi_line(false)
                .build(&pattern)
                .map_err(|e| FilterError::InvalidPattern(e.to_string()))?;
            Some(matcher)
        };

        Ok(Self {
            matcher,
            stats: FilterStats::default(),
        })
    }

    #[inline]
    pub fn accept(&self, line: &str) -> bool {
        self.stats.lines_scanned.fetch_add(1, Ordering::Relaxed);

        let matched = match &self.matcher {
            None => true,
            Some(matcher) => matcher.is_match(line.as_bytes()).unwrap_or(false),
        };

        if matched {
            self.stats.lines_matched.fetch_add(1, Ordering::Relaxed);
        }

        matched
    }

    pub fn stats(&self) -> (u64, u64) {
        (
            self.stats.lines_scanned.load(Ordering::Relaxed),
            self.stats.lines_matched.load(Ordering::Relaxed),
        )
    }
}

/// Escape a filter term so it matches literally inside the alternation.
fn escape_literal(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if c.is_ascii_punctuation() {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
