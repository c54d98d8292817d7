//! Meter inference: scores line scansions against a catalog of named
//! patterns and votes across the poem.

use crate::domain::model::{MeterMatch, MeterPattern, MeterVerdict, TieBreak};
use crate::utils::error::{Result, ScanError};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

pub const SCORE_EPSILON: f64 = 0.00001;

/// Marks a syllable whose stress could not be determined.
pub const INDETERMINATE_MARKER: char = '?';

/// How many of the most frequent line lengths take part in the vote.
pub const MAX_VOTED_LENGTHS: usize = 2;

/// Read-only catalog of meters grouped by pattern length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeterCatalog {
    by_length: BTreeMap<usize, Vec<MeterPattern>>,
}

impl MeterCatalog {
    pub fn new(entries: impl IntoIterator<Item = MeterPattern>) -> Result<Self> {
        let mut by_length: BTreeMap<usize, Vec<MeterPattern>> = BTreeMap::new();
        let mut seen = HashSet::new();

        for entry in entries {
            validate_pattern(&entry.pattern)?;
            if !seen.insert(entry.pattern.clone()) {
                return Err(ScanError::CatalogError {
                    pattern: entry.pattern,
                    reason: "pattern listed more than once".to_string(),
                });
            }
            by_length.entry(entry.len()).or_default().push(entry);
        }

        Ok(Self { by_length })
    }

    pub fn patterns_of_length(&self, length: usize) -> &[MeterPattern] {
        self.by_length.get(&length).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.by_length.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_length.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MeterPattern> {
        self.by_length.values().flatten()
    }
}

impl Default for MeterCatalog {
    fn default() -> Self {
        let by_length = BTreeMap::from([(
            4,
            vec![
                MeterPattern::new("1010", "trochaic bimeter"),
                MeterPattern::new("0101", "iambic bimeter"),
            ],
        )]);
        Self { by_length }
    }
}

fn validate_pattern(pattern: &str) -> Result<()> {
    let reason = if pattern.is_empty() {
        "pattern is empty"
    } else if pattern.chars().any(|c| c != '0' && c != '1') {
        "pattern may only contain '0' and '1'"
    } else if !pattern.contains('1') {
        "pattern needs at least one stressed syllable"
    } else {
        return Ok(());
    };

    Err(ScanError::CatalogError {
        pattern: pattern.to_string(),
        reason: reason.to_string(),
    })
}

/// Unstressed agreements plus the share of the pattern's stresses that the
/// scansion hits, less a small epsilon. `None` when lengths differ.
pub fn scansion_match_score(found: &str, known: &str) -> Option<f64> {
    if found.len() != known.len() {
        return None;
    }

    let mut matching_unstressed = 0usize;
    let mut matching_stressed = 0usize;
    for (f, k) in found.bytes().zip(known.bytes()) {
        match (f, k) {
            (b'0', b'0') => matching_unstressed += 1,
            (b'1', b'1') => matching_stressed += 1,
            _ => {}
        }
    }

    let known_stressed = known.bytes().filter(|&b| b == b'1').count();
    let stressed_ratio = if known_stressed == 0 {
        0.0
    } else {
        matching_stressed as f64 / known_stressed as f64
    };

    Some(matching_unstressed as f64 + stressed_ratio - SCORE_EPSILON)
}

pub struct MeterMatcher {
    catalog: Arc<MeterCatalog>,
    tie_break: TieBreak,
}

impl MeterMatcher {
    /// Accepts an owned catalog or one already shared with other matchers.
    pub fn new(catalog: impl Into<Arc<MeterCatalog>>, tie_break: TieBreak) -> Self {
        Self {
            catalog: catalog.into(),
            tie_break,
        }
    }

    pub fn catalog(&self) -> &MeterCatalog {
        &self.catalog
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Best catalog names for one scansion, or `None` when no catalog entry
    /// has its length.
    pub fn match_line(&self, scansion: &str) -> Option<MeterMatch> {
        let scored: Vec<(f64, &str)> = self
            .catalog
            .patterns_of_length(scansion.len())
            .iter()
            .filter_map(|entry| {
                scansion_match_score(scansion, &entry.pattern).map(|score| (score, entry.name.as_str()))
            })
            .collect();

        let best = scored.iter().map(|(score, _)| *score).reduce(f64::max)?;
        Some(MeterMatch {
            scansion_length: scansion.len(),
            score: best,
            names: scored
                .iter()
                .filter(|(score, _)| *score == best)
                .map(|(_, name)| name.to_string())
                .collect(),
        })
    }

    /// Per-line matches, skipping indeterminate scansions and lengths the
    /// catalog does not cover.
    pub fn match_lines<S: AsRef<str>>(&self, scansions: &[S]) -> Vec<MeterMatch> {
        scansions
            .iter()
            .map(|scansion| scansion.as_ref())
            .filter(|scansion| !scansion.contains(INDETERMINATE_MARKER))
            .filter_map(|scansion| self.match_line(scansion))
            .collect()
    }

    /// Votes over the two most common matched line lengths (each seen on more
    /// than one line) and returns the winning names sorted.
    pub fn infer_meter<S: AsRef<str>>(&self, scansions: &[S]) -> MeterVerdict {
        let matches = self.match_lines(scansions);

        // (length, line count) in discovery order
        let mut length_counts: Vec<(usize, usize)> = Vec::new();
        for m in &matches {
            match length_counts.iter_mut().find(|(length, _)| *length == m.scansion_length) {
                Some((_, count)) => *count += 1,
                None => length_counts.push((m.scansion_length, 1)),
            }
        }
        length_counts.retain(|(_, count)| *count > 1);
        // stable, so equal counts keep discovery order
        length_counts.sort_by(|a, b| b.1.cmp(&a.1));
        length_counts.truncate(MAX_VOTED_LENGTHS);

        if length_counts.is_empty() {
            tracing::debug!("No line length repeats among {} matched lines", matches.len());
            return MeterVerdict::Unknown;
        }

        let mut rng = match self.tie_break {
            TieBreak::Random { seed: Some(seed) } => Some(StdRng::seed_from_u64(seed)),
            TieBreak::Random { seed: None } => Some(StdRng::from_entropy()),
            _ => None,
        };

        let mut result: Vec<String> = length_counts
            .iter()
            .filter_map(|(length, _)| {
                let votes = matches
                    .iter()
                    .filter(|m| m.scansion_length == *length)
                    .flat_map(|m| m.names.iter().map(String::as_str));
                let winners = most_common(votes);
                tracing::debug!("Length {} vote leaders: {:?}", length, winners);
                self.break_tie(&winners, rng.as_mut())
            })
            .collect();

        result.sort();
        MeterVerdict::Known(result)
    }

    fn break_tie(&self, winners: &[&str], rng: Option<&mut StdRng>) -> Option<String> {
        let chosen = match (self.tie_break, rng) {
            (TieBreak::Random { .. }, Some(rng)) => winners.choose(rng).copied(),
            (TieBreak::First, _) => winners.first().copied(),
            _ => winners.iter().min().copied(),
        };
        chosen.map(str::to_string)
    }
}

/// Names with the highest vote count, in first-seen order.
fn most_common<'a>(votes: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for name in votes {
        let count = counts.entry(name).or_insert(0);
        if *count == 0 {
            order.push(name);
        }
        *count += 1;
    }

    let Some(max) = counts.values().copied().max() else {
        return Vec::new();
    };
    order.into_iter().filter(|name| counts[name] == max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(entries: &[(&str, &str)], tie_break: TieBreak) -> MeterMatcher {
        let catalog =
            MeterCatalog::new(entries.iter().map(|(p, n)| MeterPattern::new(*p, *n))).unwrap();
        MeterMatcher::new(catalog, tie_break)
    }

    #[test]
    fn test_score_counts_agreements() {
        // one unstressed agreement, one of two stresses hit
        let score = scansion_match_score("1001", "1010").unwrap();
        assert!((score - (1.0 + 0.5 - SCORE_EPSILON)).abs() < 1e-12);
    }

    #[test]
    fn test_score_self_comparison_is_maximum() {
        for pattern in ["1010", "0101", "0010010", "1"] {
            let own = scansion_match_score(pattern, pattern).unwrap();
            let zeros = pattern.matches('0').count() as f64;
            assert!((own - (zeros + 1.0 - SCORE_EPSILON)).abs() < 1e-12);
            for other in ["1010", "0101", "0010010", "1", "0000", "1111"] {
                if let Some(score) = scansion_match_score(other, pattern) {
                    assert!(score <= own, "{} vs {}", other, pattern);
                }
            }
        }
    }

    #[test]
    fn test_score_requires_equal_length() {
        assert_eq!(scansion_match_score("10", "1010"), None);
    }

    #[test]
    fn test_score_without_stresses_in_pattern() {
        let score = scansion_match_score("0000", "0000").unwrap();
        assert!((score - (4.0 - SCORE_EPSILON)).abs() < 1e-12);
    }

    #[test]
    fn test_catalog_rejects_bad_patterns() {
        for pattern in ["", "0000", "10x1"] {
            let result = MeterCatalog::new([MeterPattern::new(pattern, "bad")]);
            assert!(matches!(result, Err(ScanError::CatalogError { .. })), "{:?}", pattern);
        }

        let duplicate = MeterCatalog::new([
            MeterPattern::new("01", "a"),
            MeterPattern::new("01", "b"),
        ]);
        assert!(duplicate.is_err());
    }

    #[test]
    fn test_catalog_groups_by_length() {
        let catalog = MeterCatalog::new([
            MeterPattern::new("1010", "trochaic bimeter"),
            MeterPattern::new("01", "iamb"),
            MeterPattern::new("0101", "iambic bimeter"),
        ])
        .unwrap();
        assert_eq!(catalog.len(), 3);
        let names: Vec<&str> = catalog.patterns_of_length(4).iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["trochaic bimeter", "iambic bimeter"]);
        assert!(catalog.patterns_of_length(3).is_empty());
    }

    #[test]
    fn test_default_catalog() {
        let catalog = MeterCatalog::default();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.patterns_of_length(4).len(), 2);
    }

    #[test]
    fn test_match_line_collects_ties() {
        let matcher = matcher(&[("1010", "trochaic"), ("0101", "iambic")], TieBreak::Lexical);

        let m = matcher.match_line("1010").unwrap();
        assert_eq!(m.names, vec!["trochaic"]);

        // "1111" hits every stress of both patterns
        let m = matcher.match_line("1111").unwrap();
        assert_eq!(m.names, vec!["trochaic", "iambic"]);

        assert!(matcher.match_line("10").is_none());
    }

    #[test]
    fn test_indeterminate_scansions_are_ignored() {
        let matcher = matcher(&[("1010", "trochaic")], TieBreak::Lexical);
        let matches = matcher.match_lines(&["1010", "10?0", "1010"]);
        assert_eq!(matches.len(), 2);
        assert_eq!(
            matcher.infer_meter(&["1010", "10?0"]),
            MeterVerdict::Unknown
        );
    }

    #[test]
    fn test_length_gating_gives_unknown() {
        let matcher = MeterMatcher::new(MeterCatalog::default(), TieBreak::Lexical);
        assert_eq!(matcher.infer_meter(&["10", "01"]), MeterVerdict::Unknown);
    }

    #[test]
    fn test_single_line_length_cannot_establish_meter() {
        let matcher = MeterMatcher::new(MeterCatalog::default(), TieBreak::Lexical);
        assert_eq!(matcher.infer_meter(&["1010"]), MeterVerdict::Unknown);
        let empty: [&str; 0] = [];
        assert_eq!(matcher.infer_meter(&empty), MeterVerdict::Unknown);
    }

    #[test]
    fn test_majority_vote() {
        let matcher = MeterMatcher::new(MeterCatalog::default(), TieBreak::Lexical);
        let verdict = matcher.infer_meter(&["0101", "0101", "1010", "0001"]);
        assert_eq!(verdict, MeterVerdict::Known(vec!["iambic bimeter".to_string()]));
    }

    #[test]
    fn test_two_lengths_vote_separately_and_sort() {
        let matcher = matcher(
            &[
                ("1010", "trochaic bimeter"),
                ("0101", "iambic bimeter"),
                ("010", "amphibrach"),
                ("100", "dactyl"),
            ],
            TieBreak::Lexical,
        );
        let verdict = matcher.infer_meter(&["0101", "010", "0101", "010", "100"]);
        assert_eq!(
            verdict,
            MeterVerdict::Known(vec!["amphibrach".to_string(), "iambic bimeter".to_string()])
        );
    }

    #[test]
    fn test_only_two_most_frequent_lengths_vote() {
        let matcher = matcher(
            &[("01", "iamb"), ("010", "amphibrach"), ("0101", "iambic bimeter")],
            TieBreak::Lexical,
        );
        // lengths 4 and 3 appear three times, length 2 twice
        let verdict = matcher.infer_meter(&["01", "0101", "010", "0101", "010", "01", "0101", "010"]);
        assert_eq!(
            verdict,
            MeterVerdict::Known(vec!["amphibrach".to_string(), "iambic bimeter".to_string()])
        );
    }

    #[test]
    fn test_frequency_ties_keep_discovery_order() {
        let matcher = matcher(
            &[("01", "iamb"), ("010", "amphibrach"), ("0101", "iambic bimeter")],
            TieBreak::Lexical,
        );
        // every length appears twice; lengths 2 and 4 were seen first
        let verdict = matcher.infer_meter(&["01", "0101", "010", "01", "0101", "010"]);
        assert_eq!(
            verdict,
            MeterVerdict::Known(vec!["iamb".to_string(), "iambic bimeter".to_string()])
        );
    }

    #[test]
    fn test_tie_break_strategies() {
        let entries = [("1010", "trochaic bimeter"), ("0101", "iambic bimeter")];
        let scansions = ["1010", "0101"];

        let lexical = matcher(&entries, TieBreak::Lexical).infer_meter(&scansions);
        assert_eq!(lexical, MeterVerdict::Known(vec!["iambic bimeter".to_string()]));

        let first = matcher(&entries, TieBreak::First).infer_meter(&scansions);
        assert_eq!(first, MeterVerdict::Known(vec!["trochaic bimeter".to_string()]));

        let seeded = matcher(&entries, TieBreak::Random { seed: Some(7) });
        let a = seeded.infer_meter(&scansions);
        let b = seeded.infer_meter(&scansions);
        assert_eq!(a, b);
        assert_eq!(a.names().len(), 1);
        assert!(entries.iter().any(|(_, name)| *name == a.names()[0]));
    }
}
