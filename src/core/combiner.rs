//! Regroups short consecutive lines (hemistichs) into composite verses whose
//! syllable counts reach the poem's dominant line lengths.

use crate::domain::model::CombinedLine;

/// Consecutive group counts tried per target, smallest merge first.
pub const WINDOW_SIZES: [usize; 3] = [2, 3, 4];

/// How many of the largest distinct line lengths are pursued.
pub const MAX_TARGETS: usize = 2;

#[derive(Debug, Clone, Copy, Default)]
pub struct LineCombiner;

impl LineCombiner {
    pub fn new() -> Self {
        Self
    }

    /// Groups original line indices by repeatedly merging the earliest run of
    /// 2, 3 or 4 consecutive groups whose syllables add up to a target length,
    /// restarting the search after every merge.
    ///
    /// Lines without syllables are left out; their indices are not reused.
    pub fn combine<S: AsRef<str>>(&self, scansions: &[S]) -> Vec<CombinedLine> {
        let counts: Vec<usize> = scansions.iter().map(|s| s.as_ref().len()).collect();

        let mut groups: Vec<Vec<usize>> = counts
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(index, _)| vec![index])
            .collect();

        let targets = target_lengths(&counts);
        tracing::debug!("Combining {} lines towards {:?} syllables", groups.len(), targets);

        while let Some((start, size)) = find_merge(&group_totals(&groups, &counts), &targets) {
            let merged: Vec<usize> = groups.drain(start..start + size).flatten().collect();
            tracing::trace!("Merged groups {}..{} into {:?}", start, start + size, merged);
            groups.insert(start, merged);
        }

        groups
            .into_iter()
            .map(|indices| {
                let syllable_count = indices.iter().map(|&i| counts[i]).sum();
                CombinedLine {
                    indices,
                    syllable_count,
                }
            })
            .collect()
    }
}

/// Largest distinct non-zero line lengths, descending.
pub fn target_lengths(counts: &[usize]) -> Vec<usize> {
    let mut distinct: Vec<usize> = counts.iter().copied().filter(|&c| c > 0).collect();
    distinct.sort_unstable_by(|a, b| b.cmp(a));
    distinct.dedup();
    distinct.truncate(MAX_TARGETS);
    distinct
}

fn group_totals(groups: &[Vec<usize>], counts: &[usize]) -> Vec<usize> {
    groups
        .iter()
        .map(|group| group.iter().map(|&i| counts[i]).sum())
        .collect()
}

/// First `(start, size)` window matching a target, in target-then-size order.
fn find_merge(totals: &[usize], targets: &[usize]) -> Option<(usize, usize)> {
    for &target in targets {
        for size in WINDOW_SIZES {
            if size > totals.len() {
                continue;
            }
            if let Some(start) = totals
                .windows(size)
                .position(|window| window.iter().sum::<usize>() == target)
            {
                return Some((start, size));
            }
        }
    }
    None
}

/// Joins the texts of each combined line's constituents.
pub fn merge_lines<S: AsRef<str>>(lines: &[S], combined: &[CombinedLine], separator: &str) -> Vec<String> {
    combined
        .iter()
        .map(|group| {
            group
                .indices
                .iter()
                .filter_map(|&i| lines.get(i).map(|line| line.as_ref()))
                .collect::<Vec<_>>()
                .join(separator)
        })
        .collect()
}
