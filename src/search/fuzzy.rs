//! Fuzzy subsequence matching and ranking.
//!
//! Scoring is delegated to the Skim V2 matcher from `fuzzy-matcher`, which
//! already rewards consecutive runs and early matches. Ranking adds one tier
//! above the raw score: entries that contain the query as a contiguous
//! substring always sort ahead of entries where the characters are scattered,
//! whatever the word-boundary bonuses would say.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// An entry scored and annotated against the current query.
///
/// `matched_positions` are character (not byte) offsets into the entry's
/// searchable text, in ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub entry_index: usize,
    pub score: i64,
    pub matched_positions: Vec<usize>,
}

impl Match {
    /// A match that carries no annotation, used for the empty query.
    #[must_use]
    pub const fn unfiltered(entry_index: usize) -> Self {
        Self {
            entry_index,
            score: 0,
            matched_positions: Vec::new(),
        }
    }
}

/// Matches `query` against every item of `corpus` and returns the ranked hits.
///
/// - Empty query: one [`Match`] per item, original order, no positions.
/// - Otherwise: only items containing the query as a case-insensitive
///   subsequence, ordered by (contiguous substring first, score descending),
///   ties keeping corpus order.
///
/// # Examples
///
/// ```
/// use gopkg_search::search::match_entries;
///
/// let corpus = ["foo/bar", "foo/baz", "qux"];
/// let hits = match_entries("fbr", corpus);
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].entry_index, 0);
/// ```
pub fn match_entries<'a, I>(query: &str, corpus: I) -> Vec<Match>
where
    I: IntoIterator<Item = &'a str>,
{
    let corpus = corpus.into_iter();

    if query.is_empty() {
        return corpus
            .enumerate()
            .map(|(index, _)| Match::unfiltered(index))
            .collect();
    }

    let _span = tracing::trace_span!("match_entries", query_len = query.chars().count()).entered();

    let matcher = SkimMatcherV2::default().ignore_case();
    let needle = query.to_lowercase();

    let mut ranked: Vec<(bool, Match)> = corpus
        .enumerate()
        .filter_map(|(entry_index, text)| {
            let (score, matched_positions) = matcher.fuzzy_indices(text, query)?;
            let contiguous = text.to_lowercase().contains(&needle);
            Some((
                contiguous,
                Match {
                    entry_index,
                    score,
                    matched_positions,
                },
            ))
        })
        .collect();

    // sort_by is stable, so equal keys keep corpus order
    ranked.sort_by(|(a_contiguous, a), (b_contiguous, b)| {
        b_contiguous
            .cmp(a_contiguous)
            .then_with(|| b.score.cmp(&a.score))
    });

    ranked.into_iter().map(|(_, m)| m).collect()
}

/// Collapses ascending character positions into `(start, end)` ranges with an
/// exclusive end, e.g. `[0, 1, 2, 5]` becomes `[(0, 3), (5, 6)]`.
#[must_use]
pub fn coalesce_positions(positions: &[usize]) -> Vec<(usize, usize)> {
    let mut ranges: Vec<(usize, usize)> = Vec::new();

    for &idx in positions {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }

    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORPUS: [&str; 3] = ["foo/bar", "foo/baz", "qux"];

    fn ids(query: &str, corpus: &[&str]) -> Vec<String> {
        match_entries(query, corpus.iter().copied())
            .into_iter()
            .map(|m| corpus[m.entry_index].to_string())
            .collect()
    }

    #[test]
    fn empty_query_is_identity() {
        let hits = match_entries("", CORPUS);
        let indices: Vec<usize> = hits.iter().map(|m| m.entry_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert!(hits.iter().all(|m| m.matched_positions.is_empty()));
    }

    #[test]
    fn subsequence_filters_out_non_matches() {
        assert_eq!(ids("fbr", &CORPUS), vec!["foo/bar"]);
        assert_eq!(ids("zzz", &CORPUS), Vec::<String>::new());
    }

    #[test]
    fn scattered_subsequence_still_matches() {
        assert_eq!(ids("fb", &CORPUS), vec!["foo/bar", "foo/baz"]);
    }

    #[test]
    fn shared_prefix_keeps_load_order_on_ties() {
        assert_eq!(ids("foo", &CORPUS), vec!["foo/bar", "foo/baz"]);
    }

    #[test]
    fn matching_ignores_case() {
        assert_eq!(ids("FOO/BAR", &CORPUS), vec!["foo/bar"]);
    }

    #[test]
    fn contiguous_substring_ranks_above_scattered() {
        let corpus = ["a-b-c/x", "github.com/x/abc"];
        let hits = ids("abc", &corpus);
        assert_eq!(hits, vec!["github.com/x/abc", "a-b-c/x"]);
    }

    #[test]
    fn contiguous_ranking_holds_against_word_boundary_bonuses() {
        let corpus = ["t/e/m/p", "attempt"];
        assert_eq!(ids("temp", &corpus), vec!["attempt", "t/e/m/p"]);
    }

    #[test]
    fn narrowing_is_monotonic() {
        let corpus = [
            "golang.org/x/text",
            "golang.org/x/tools",
            "github.com/gorilla/mux",
            "gopkg.in/yaml.v3",
            "go.uber.org/zap",
        ];
        let query = "golang.org/x/to";
        for end in 1..=query.len() {
            let longer = &query[..end];
            let shorter = &query[..end - 1];
            let wide: Vec<usize> = match_entries(shorter, corpus)
                .iter()
                .map(|m| m.entry_index)
                .collect();
            for m in match_entries(longer, corpus) {
                assert!(
                    wide.contains(&m.entry_index),
                    "{longer:?} matched {} but {shorter:?} did not",
                    corpus[m.entry_index]
                );
            }
        }
    }

    #[test]
    fn positions_are_character_offsets() {
        let hits = match_entries("ü", ["aü"]);
        assert_eq!(hits[0].matched_positions, vec![1]);
    }

    #[test]
    fn coalesce_groups_runs() {
        assert_eq!(coalesce_positions(&[0, 1, 2, 5]), vec![(0, 3), (5, 6)]);
        assert_eq!(coalesce_positions(&[]), Vec::<(usize, usize)>::new());
        assert_eq!(coalesce_positions(&[4]), vec![(4, 5)]);
    }
}
