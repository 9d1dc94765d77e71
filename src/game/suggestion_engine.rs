use std::ops::Range;

use crate::helpers::normalize;

pub const SUGGESTION_LIMIT: usize = 6;

/// An autocomplete candidate plus the span to emphasize, in `char` positions
/// of the original-cased text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub text: String,
    pub highlight: Option<Range<usize>>,
}

/// Candidates whose normalized form contains the normalized query, in
/// corpus order, at most `limit` of them. A query that normalizes to
/// nothing suggests nothing.
pub fn suggest<S: AsRef<str>>(query: &str, candidates: &[S], limit: usize) -> Vec<String> {
    let needle = normalize(query);
    if needle.is_empty() {
        return Vec::new();
    }
    candidates
        .iter()
        .map(|candidate| candidate.as_ref())
        .filter(|candidate: &&str| normalize(candidate).contains(&needle))
        .take(limit)
        .map(str::to_string)
        .collect()
}

/// Locates the normalized query inside the normalized candidate and reuses
/// that offset, with the raw query's length, against the original text. The
/// span is exact only when the query has nothing normalization strips.
pub fn highlight_span(query: &str, candidate: &str) -> Option<Range<usize>> {
    let needle = normalize(query);
    if needle.is_empty() {
        return None;
    }
    // normalized text is pure ASCII, so byte offsets equal char offsets
    let start = normalize(candidate).find(&needle)?;
    let candidate_len = candidate.chars().count();
    let end = (start + query.chars().count()).min(candidate_len);
    Some(start.min(end)..end)
}

pub fn suggestions<S: AsRef<str>>(query: &str, candidates: &[S], limit: usize) -> Vec<Suggestion> {
    suggest(query, candidates, limit)
        .into_iter()
        .map(|text| Suggestion {
            highlight: highlight_span(query, &text),
            text,
        })
        .collect()
}
