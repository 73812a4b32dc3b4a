//! Character-set fuzzy matching.
//!
//! The query is reduced to the set of its lower-cased characters, so "moo"
//! and "mo" match identically. A title scores by its longest run of
//! consecutive matched characters, with fewer unmatched characters and a
//! shorter title breaking ties.

use std::collections::HashSet;
use std::ops::Range;
use std::sync::Arc;

use crate::domain::command::Command;

/// Lower-cased character set of a query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryChars(HashSet<char>);

impl QueryChars {
    pub fn new(query: &str) -> Self {
        Self(query.chars().flat_map(char::to_lowercase).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn matches(&self, c: char) -> bool {
        !self.0.is_empty() && c.to_lowercase().all(|lower| self.0.contains(&lower))
    }
}

/// Byte ranges of maximal runs of matched characters, in title order.
pub fn consecutive_spans(title: &str, chars: &QueryChars) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut start = None;

    for (idx, c) in title.char_indices() {
        match (chars.matches(c), start) {
            (true, None) => start = Some(idx),
            (false, Some(begin)) => {
                spans.push(begin..idx);
                start = None;
            }
            _ => {}
        }
    }

    if let Some(begin) = start {
        spans.push(begin..title.len());
    }

    spans
}

/// The longest span; the first one wins when several tie.
pub fn longest_span(title: &str, chars: &QueryChars) -> Option<Range<usize>> {
    let mut best: Option<(usize, Range<usize>)> = None;
    for span in consecutive_spans(title, chars) {
        let len = title[span.clone()].chars().count();
        if best.as_ref().map_or(true, |(best_len, _)| len > *best_len) {
            best = Some((len, span));
        }
    }
    best.map(|(_, span)| span)
}

/// Summary of how a title matched a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchStats {
    pub longest: usize,
    pub matched: usize,
    pub title_len: usize,
}

impl MatchStats {
    pub fn unmatched(&self) -> usize {
        self.title_len - self.matched
    }
}

pub fn match_stats(title: &str, chars: &QueryChars) -> MatchStats {
    let mut stats = MatchStats::default();
    let mut run = 0;

    for c in title.chars() {
        stats.title_len += 1;
        if chars.matches(c) {
            stats.matched += 1;
            run += 1;
            stats.longest = stats.longest.max(run);
        } else {
            run = 0;
        }
    }

    stats
}

pub fn score_title(title: &str, query: &str) -> f64 {
    score_stats(match_stats(title, &QueryChars::new(query)))
}

fn score_stats(stats: MatchStats) -> f64 {
    if stats.longest == 0 {
        return 0.0;
    }

    // Each tie-break term stays below 0.5, so one more character in the
    // longest run always outranks them.
    stats.longest as f64
        + 0.5 / (1.0 + stats.unmatched() as f64)
        + 0.5 / (1.0 + stats.title_len as f64)
}

pub fn score(command: &dyn Command, query: &str) -> f64 {
    score_title(command.title(), query)
}

#[derive(Debug, Clone)]
pub struct RankedCommand {
    pub command: Arc<dyn Command>,
    pub score: f64,
}

/// Sorts descending by score. Equal scores keep their input order.
pub fn rank(commands: Vec<Arc<dyn Command>>, query: &str) -> Vec<RankedCommand> {
    let chars = QueryChars::new(query);
    let mut ranked: Vec<RankedCommand> = commands
        .into_iter()
        .map(|command| {
            let score = score_stats(match_stats(command.title(), &chars));
            RankedCommand { command, score }
        })
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}
