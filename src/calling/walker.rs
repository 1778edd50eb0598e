// Copyright 2020 Johannes Köster.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Greedy selection of active regions.
//!
//! Each call to the walker takes the previously emitted region and returns the next one.
//! Candidates overlapping the previous region form the pool of *indicators*, i.e. candidates
//! that are assembled again to carry phasing context. After them, the walker *includes* as many
//! new candidates as its limits and the read density allow, and finally pads the region
//! according to its expansion limit.

use std::cmp;

use anyhow::Result;
use derive_builder::Builder;

use crate::reads::{check_sorted_reads, ReadMap};
use crate::region::{GenomicRegion, Mappable};
use crate::utils::overlap_index::{overlap_range, rightmost_mappable, ReadIndex};
use crate::variants::check_candidates;

/// Which candidates of the previous region may be carried as indicators.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab_case")]
pub enum IndicatorLimit {
    /// Only candidates sharing reads with the first newly included candidate.
    SharedWithPreviousRegion,
    NoLimit,
}

/// Whether region growth is capped by the reads overlapping the first included candidate.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab_case")]
pub enum ExtensionLimit {
    WithinReadLengthOfFirstIncluded,
    NoLimit,
}

/// How far the emitted region is padded beyond the included candidates.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab_case")]
pub enum ExpansionLimit {
    /// Pad up to, but excluding, the neighbouring candidates covered by the same reads.
    UpToExcluded,
    /// Span the reads overlapping the first and last included candidate.
    WithinReadLength,
    /// Like `UpToExcluded`, but never beyond the reads overlapping the included candidates.
    UpToExcludedWithinReadLength,
    NoExpansion,
}

/// Walker configuration, e.g. loaded from a YAML or JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct WalkerConfig {
    pub max_indicators: usize,
    pub max_included: usize,
    pub indicator_limit: IndicatorLimit,
    pub extension_limit: ExtensionLimit,
    pub expansion_limit: ExpansionLimit,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        WalkerConfig {
            max_indicators: 3,
            max_included: 8,
            indicator_limit: IndicatorLimit::SharedWithPreviousRegion,
            extension_limit: ExtensionLimit::WithinReadLengthOfFirstIncluded,
            expansion_limit: ExpansionLimit::UpToExcluded,
        }
    }
}

impl From<WalkerConfig> for GenomeWalker {
    fn from(config: WalkerConfig) -> Self {
        GenomeWalker::new(
            config.max_indicators,
            config.max_included,
            config.indicator_limit,
            config.extension_limit,
            config.expansion_limit,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, CopyGetters, Builder)]
#[builder(build_fn(skip))]
#[getset(get_copy = "pub")]
pub struct GenomeWalker {
    max_indicators: usize,
    max_included: usize,
    indicator_limit: IndicatorLimit,
    extension_limit: ExtensionLimit,
    expansion_limit: ExpansionLimit,
}

impl GenomeWalkerBuilder {
    pub fn build(&self) -> GenomeWalker {
        let defaults = WalkerConfig::default();
        GenomeWalker::new(
            self.max_indicators.unwrap_or(defaults.max_indicators),
            self.max_included.unwrap_or(defaults.max_included),
            self.indicator_limit.unwrap_or(defaults.indicator_limit),
            self.extension_limit.unwrap_or(defaults.extension_limit),
            self.expansion_limit.unwrap_or(defaults.expansion_limit),
        )
    }
}

impl GenomeWalker {
    pub fn new(
        max_indicators: usize,
        max_included: usize,
        indicator_limit: IndicatorLimit,
        extension_limit: ExtensionLimit,
        expansion_limit: ExpansionLimit,
    ) -> Self {
        // indicators must leave room for at least one newly included candidate
        let max_indicators = if max_included > 0 && max_included <= max_indicators {
            max_included - 1
        } else {
            max_indicators
        };
        GenomeWalker {
            max_indicators,
            max_included,
            indicator_limit,
            extension_limit,
            expansion_limit,
        }
    }

    /// First active region of `contig`.
    pub fn start_walk<R, C>(
        &self,
        contig: &str,
        reads: &ReadMap<R>,
        candidates: &[C],
    ) -> Result<GenomicRegion>
    where
        R: Mappable,
        C: Mappable,
    {
        let origin = GenomicRegion::new(contig, 0, 0)?;
        self.walk(&origin, reads, candidates, false)
    }

    /// Active region following `previous_region`. A zero-length region at the end of
    /// `previous_region` signals that no candidates are left.
    pub fn continue_walk<R, C>(
        &self,
        previous_region: &GenomicRegion,
        reads: &ReadMap<R>,
        candidates: &[C],
    ) -> Result<GenomicRegion>
    where
        R: Mappable,
        C: Mappable,
    {
        self.walk(previous_region, reads, candidates, true)
    }

    /// Whether `region`, returned for `previous_region`, marks the end of the walk, i.e. it is
    /// the zero-length tail of `previous_region` and no candidate lies beyond.
    pub fn is_exhausted<C: Mappable>(
        &self,
        previous_region: &GenomicRegion,
        region: &GenomicRegion,
        candidates: &[C],
    ) -> bool {
        *region == previous_region.tail(0)
            && overlap_range(candidates, previous_region).end() == candidates.len()
    }

    fn walk<R, C>(
        &self,
        previous_region: &GenomicRegion,
        reads: &ReadMap<R>,
        candidates: &[C],
        has_previous: bool,
    ) -> Result<GenomicRegion>
    where
        R: Mappable,
        C: Mappable,
    {
        check_candidates(previous_region.contig(), candidates)?;
        check_sorted_reads(reads)?;

        let reads = ReadIndex::new(reads);
        let last = candidates.len();

        let (first_previous, mut included) = if has_previous {
            let previous = overlap_range(candidates, previous_region);
            (previous.start(), previous.end())
        } else {
            let start = candidates
                .iter()
                .position(|candidate| candidate.region().begin() >= previous_region.end())
                .unwrap_or(last);
            (start, start)
        };

        if included == last {
            debug!("no candidates left after {}", previous_region);
            return Ok(previous_region.tail(0));
        }

        if self.max_included == 0 {
            return Ok(previous_region.intervening(candidates[included].region()));
        }

        let mut num_indicators = cmp::min(self.max_indicators, included - first_previous);
        if self.indicator_limit == IndicatorLimit::SharedWithPreviousRegion {
            let first_shared = first_previous
                + reads.find_first_shared(
                    &candidates[first_previous..included],
                    candidates[included].region(),
                );
            num_indicators = cmp::min(num_indicators, included - first_shared);
        }

        let first_included = included - num_indicators;
        let num_remaining = last - included;

        let mut num_included = self.max_included - num_indicators;
        let mut num_excluded = 0;

        match self.extension_limit {
            ExtensionLimit::WithinReadLengthOfFirstIncluded => {
                let max_within_read_length =
                    reads.max_count_if_shared_with_first(&candidates[included..]);
                num_included = cmp::min(
                    num_included,
                    cmp::min(num_remaining, max_within_read_length + 1),
                );
                num_excluded = max_within_read_length.saturating_sub(num_included);
            }
            ExtensionLimit::NoLimit => {
                num_included = cmp::min(num_included, num_remaining);
            }
        }

        let first_excluded = included + num_included;

        loop {
            num_included -= 1;
            if num_included == 0
                || !is_optimal_to_extend(
                    candidates,
                    included + 1,
                    first_excluded,
                    &reads,
                    num_included + num_excluded,
                )
            {
                break;
            }
            included += 1;
        }

        // Never split candidates overlapping the included ones (e.g. multi-allelic sites)
        // across regions.
        let mut rightmost = rightmost_mappable(&candidates[first_included..=included])
            .map(|candidate| candidate.region().clone())
            .unwrap_or_else(|| candidates[included].region().clone());
        while included + 1 < last && candidates[included + 1].region().overlaps(&rightmost) {
            included += 1;
            if rightmost.ends_before(candidates[included].region()) {
                rightmost = candidates[included].region().clone();
            }
        }

        let first_excluded = included + 1;

        let region = match self.expansion_limit {
            ExpansionLimit::UpToExcluded => expand_around_included(
                candidates,
                first_previous,
                first_included,
                first_excluded,
                last,
                &reads,
            ),
            ExpansionLimit::WithinReadLength => {
                let lhs = leftmost_read_region(&reads, candidates[first_included].region());
                let rhs = rightmost_read_region(&reads, candidates[included].region());
                lhs.encompassing(&rhs)
            }
            ExpansionLimit::UpToExcludedWithinReadLength => {
                let lhs = leftmost_read_region(&reads, candidates[first_included].region());
                let mut first_previous = first_previous;
                while first_previous != first_included
                    && lhs.begins_before(candidates[first_previous].region())
                {
                    first_previous += 1;
                }

                let rhs = rightmost_read_region(&reads, candidates[included].region());
                let mut last = last;
                while last != first_excluded && rhs.ends_before(candidates[last - 1].region()) {
                    last -= 1;
                }

                expand_around_included(
                    candidates,
                    first_previous,
                    first_included,
                    first_excluded,
                    last,
                    &reads,
                )
            }
            ExpansionLimit::NoExpansion => candidates[first_included]
                .region()
                .encompassing(&rightmost),
        };

        debug!(
            "active region {} ({} indicators, {} included candidates)",
            region,
            num_indicators,
            first_excluded - (first_included + num_indicators)
        );

        Ok(region)
    }
}

/// Decide whether to include the candidate at `proposed`.
///
/// Extending is optimal if all remaining candidates fit, if the proposed candidate does not share
/// reads with more candidates than the budget allows, or if it lies at least as close to the
/// included ones as to the first excluded candidate.
fn is_optimal_to_extend<R, C>(
    candidates: &[C],
    proposed: usize,
    first_excluded: usize,
    reads: &ReadIndex<R>,
    max_density_increase: usize,
) -> bool
where
    R: Mappable,
    C: Mappable,
{
    let last = candidates.len();
    if proposed == last {
        return false;
    }
    if first_excluded == last {
        return true;
    }

    let increases_density =
        reads.max_count_if_shared_with_first(&candidates[proposed..]) >= max_density_increase;

    !increases_density
        || candidates[proposed - 1]
            .region()
            .inner_distance(candidates[proposed].region())
            <= candidates[proposed]
                .region()
                .inner_distance(candidates[first_excluded].region())
}

fn leftmost_read_region<R: Mappable>(reads: &ReadIndex<R>, region: &GenomicRegion) -> GenomicRegion {
    reads
        .leftmost_overlapped(region)
        .map(|read| read.region().clone())
        .unwrap_or_else(|| region.clone())
}

fn rightmost_read_region<R: Mappable>(reads: &ReadIndex<R>, region: &GenomicRegion) -> GenomicRegion {
    reads
        .rightmost_overlapped(region)
        .map(|read| read.region().clone())
        .unwrap_or_else(|| region.clone())
}

/// Pad the included candidates `[first_included, first_excluded)` to the extent of their reads,
/// but stop short of previous and excluded candidates those reads cover.
fn expand_around_included<R, C>(
    candidates: &[C],
    first_previous: usize,
    first_included: usize,
    first_excluded: usize,
    last: usize,
    reads: &ReadIndex<R>,
) -> GenomicRegion
where
    R: Mappable,
    C: Mappable,
{
    let first = candidates[first_included].region();
    let last_included = rightmost_mappable(&candidates[first_included..first_excluded])
        .map(|candidate| candidate.region())
        .unwrap_or_else(|| candidates[first_excluded - 1].region());

    let mut leftmost = leftmost_read_region(reads, first);
    let mut rightmost = rightmost_read_region(reads, last_included);

    let previous = &candidates[first_previous..first_included];
    if previous
        .iter()
        .any(|candidate| candidate.region().overlaps(&leftmost))
    {
        if let Some(rightmost_previous) = rightmost_mappable(previous) {
            let max_left_flank_size = first.inner_distance(rightmost_previous.region());
            leftmost = first.shift(max_left_flank_size);
            // the last previous candidate may be an insertion that still touches the flank
            if max_left_flank_size < 0
                && candidates[first_included - 1].region().overlaps(&leftmost)
            {
                leftmost = leftmost.shift(1);
            }
        }
    }

    if first_excluded != last && rightmost.overlaps(candidates[first_excluded].region()) {
        let max_right_flank_size =
            last_included.inner_distance(candidates[first_excluded].region());
        rightmost = last_included.shift(max_right_flank_size);
        // likewise, an excluded insertion touches the flank
        if max_right_flank_size > 0 && candidates[first_excluded].region().overlaps(&rightmost) {
            rightmost = rightmost.shift(-1);
        }
    }

    // included candidates always stay within the region
    let rightmost = rightmost.encompassing(&last_included.tail(0));
    leftmost.closed(&rightmost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn region(begin: u64, end: u64) -> GenomicRegion {
        GenomicRegion::new("chr1", begin, end).unwrap()
    }

    fn snvs(positions: &[u64]) -> Vec<GenomicRegion> {
        positions.iter().map(|&pos| region(pos, pos + 1)).collect()
    }

    fn reads(samples: &[&[(u64, u64)]]) -> ReadMap<GenomicRegion> {
        samples
            .iter()
            .enumerate()
            .map(|(i, intervals)| {
                (
                    format!("sample{}", i),
                    intervals.iter().map(|&(b, e)| region(b, e)).collect(),
                )
            })
            .collect()
    }

    fn walk_all(
        walker: &GenomeWalker,
        reads: &ReadMap<GenomicRegion>,
        candidates: &[GenomicRegion],
    ) -> Vec<GenomicRegion> {
        let mut regions = vec![walker.start_walk("chr1", reads, candidates).unwrap()];
        for _ in 0..=candidates.len() {
            let previous = regions.last().unwrap().clone();
            let next = walker.continue_walk(&previous, reads, candidates).unwrap();
            let done = walker.is_exhausted(&previous, &next, candidates);
            regions.push(next);
            if done {
                break;
            }
        }
        regions
    }

    #[test]
    fn test_max_indicators_leave_room_for_inclusion() {
        let walker = GenomeWalker::new(
            4,
            3,
            IndicatorLimit::NoLimit,
            ExtensionLimit::NoLimit,
            ExpansionLimit::NoExpansion,
        );
        assert_eq!(walker.max_indicators(), 2);
        let walker = GenomeWalker::new(
            4,
            0,
            IndicatorLimit::NoLimit,
            ExtensionLimit::NoLimit,
            ExpansionLimit::NoExpansion,
        );
        assert_eq!(walker.max_indicators(), 4);
    }

    #[test]
    fn test_builder_and_config() {
        let walker = GenomeWalkerBuilder::default()
            .max_included(2)
            .max_indicators(0)
            .expansion_limit(ExpansionLimit::NoExpansion)
            .build();
        assert_eq!(walker.max_included(), 2);
        assert_eq!(walker.indicator_limit(), IndicatorLimit::SharedWithPreviousRegion);

        let config: WalkerConfig = serde_json::from_str(
            r#"{"max-included": 2, "max-indicators": 0, "expansion-limit": "no-expansion"}"#,
        )
        .unwrap();
        assert_eq!(GenomeWalker::from(config), walker);
        assert_eq!(
            ExpansionLimit::from_str("up-to-excluded-within-read-length").unwrap(),
            ExpansionLimit::UpToExcludedWithinReadLength
        );
    }

    #[test]
    fn test_no_candidates() {
        let walker = GenomeWalkerBuilder::default().build();
        let reads = reads(&[&[(0, 100)]]);
        let candidates: Vec<GenomicRegion> = Vec::new();
        assert_eq!(
            walker.start_walk("chr1", &reads, &candidates).unwrap(),
            region(0, 0)
        );
        assert_eq!(
            walker
                .continue_walk(&region(10, 20), &reads, &candidates)
                .unwrap(),
            region(20, 20)
        );
    }

    #[test]
    fn test_golden_no_expansion() {
        let walker = GenomeWalker::new(
            0,
            2,
            IndicatorLimit::NoLimit,
            ExtensionLimit::NoLimit,
            ExpansionLimit::NoExpansion,
        );
        let reads = reads(&[&[(50, 150), (90, 190), (450, 550)]]);
        let candidates = snvs(&[100, 105, 110, 500]);
        assert_eq!(
            walk_all(&walker, &reads, &candidates),
            vec![region(100, 106), region(110, 501), region(501, 501)]
        );
    }

    #[test]
    fn test_golden_no_expansion_within_read_length() {
        let walker = GenomeWalker::new(
            0,
            2,
            IndicatorLimit::NoLimit,
            ExtensionLimit::WithinReadLengthOfFirstIncluded,
            ExpansionLimit::NoExpansion,
        );
        let reads = reads(&[&[(50, 150), (90, 190), (450, 550)]]);
        let candidates = snvs(&[100, 105, 110, 500]);
        assert_eq!(
            walk_all(&walker, &reads, &candidates),
            vec![
                region(100, 106),
                region(110, 111),
                region(500, 501),
                region(501, 501)
            ]
        );
    }

    #[test]
    fn test_golden_up_to_excluded() {
        let walker = GenomeWalker::new(
            0,
            2,
            IndicatorLimit::NoLimit,
            ExtensionLimit::WithinReadLengthOfFirstIncluded,
            ExpansionLimit::UpToExcluded,
        );
        let reads = reads(&[&[(50, 150), (90, 190), (450, 550)]]);
        let candidates = snvs(&[100, 105, 110, 500]);
        assert_eq!(
            walk_all(&walker, &reads, &candidates),
            vec![
                region(50, 110),
                region(106, 190),
                region(450, 550),
                region(550, 550)
            ]
        );
    }

    #[test]
    fn test_up_to_excluded_within_read_length() {
        let walker = GenomeWalker::new(
            0,
            2,
            IndicatorLimit::NoLimit,
            ExtensionLimit::WithinReadLengthOfFirstIncluded,
            ExpansionLimit::UpToExcludedWithinReadLength,
        );
        let reads = reads(&[&[(50, 150), (90, 190), (450, 550)]]);
        let candidates = snvs(&[100, 105, 110, 500]);
        assert_eq!(
            walker.start_walk("chr1", &reads, &candidates).unwrap(),
            region(50, 110)
        );
    }

    #[test]
    fn test_read_envelope_narrows_previous_and_excluded() {
        let reads = reads(&[&[(50, 150)]]);
        let candidates = vec![region(60, 61), region(110, 111), region(140, 160)];
        let previous = region(60, 61);
        let walker = |expansion_limit| {
            GenomeWalker::new(
                0,
                1,
                IndicatorLimit::NoLimit,
                ExtensionLimit::NoLimit,
                expansion_limit,
            )
        };

        assert_eq!(
            walker(ExpansionLimit::UpToExcluded)
                .continue_walk(&previous, &reads, &candidates)
                .unwrap(),
            region(61, 140)
        );
        // the previous SNV lies within the read and the excluded deletion reaches beyond it
        assert_eq!(
            walker(ExpansionLimit::UpToExcludedWithinReadLength)
                .continue_walk(&previous, &reads, &candidates)
                .unwrap(),
            region(50, 150)
        );
    }

    #[test]
    fn test_included_insertion_next_to_excluded_candidate() {
        let walker = GenomeWalker::new(
            0,
            2,
            IndicatorLimit::NoLimit,
            ExtensionLimit::NoLimit,
            ExpansionLimit::UpToExcluded,
        );
        let reads = reads(&[&[(50, 150)]]);
        let candidates = vec![region(90, 100), region(100, 100), region(100, 101)];
        let regions = walk_all(&walker, &reads, &candidates);
        assert_eq!(
            regions,
            vec![region(50, 100), region(100, 150), region(150, 150)]
        );
        assert!(regions[0].contains(&candidates[0]));
        assert!(regions[0].contains(&candidates[1]));
        assert!(regions[1].contains(&candidates[2]));
    }

    #[test]
    fn test_within_read_length_covers_later_candidates() {
        let walker = GenomeWalker::new(
            0,
            2,
            IndicatorLimit::NoLimit,
            ExtensionLimit::WithinReadLengthOfFirstIncluded,
            ExpansionLimit::WithinReadLength,
        );
        let reads = reads(&[&[(50, 150), (90, 190), (450, 550)]]);
        let candidates = snvs(&[100, 105, 110, 500]);
        // 110 is covered by the reads of the first region and thus never newly included
        assert_eq!(
            walk_all(&walker, &reads, &candidates),
            vec![region(50, 190), region(450, 550), region(550, 550)]
        );
    }

    #[test]
    fn test_within_read_length() {
        let walker = GenomeWalker::new(
            0,
            2,
            IndicatorLimit::NoLimit,
            ExtensionLimit::WithinReadLengthOfFirstIncluded,
            ExpansionLimit::WithinReadLength,
        );
        let reads = reads(&[&[(50, 150), (90, 190), (450, 550)]]);
        let candidates = snvs(&[100, 105, 110, 500]);
        assert_eq!(
            walker.start_walk("chr1", &reads, &candidates).unwrap(),
            region(50, 190)
        );
    }

    #[test]
    fn test_indicators_require_shared_reads() {
        let walker = GenomeWalker::new(
            1,
            3,
            IndicatorLimit::SharedWithPreviousRegion,
            ExtensionLimit::NoLimit,
            ExpansionLimit::NoExpansion,
        );
        let candidates = snvs(&[100, 105, 110, 500]);

        let unlinked = reads(&[&[(50, 150), (90, 190), (450, 550)]]);
        assert_eq!(
            walk_all(&walker, &unlinked, &candidates),
            vec![region(100, 111), region(500, 501), region(501, 501)]
        );

        // a long read links the candidate at 110 to the one at 500
        let linked = reads(&[&[(50, 150), (90, 190), (450, 550)], &[(105, 505)]]);
        assert_eq!(
            walk_all(&walker, &linked, &candidates),
            vec![region(100, 111), region(110, 501), region(501, 501)]
        );
    }

    #[test]
    fn test_same_position_candidates_are_not_split() {
        let walker = GenomeWalker::new(
            0,
            1,
            IndicatorLimit::NoLimit,
            ExtensionLimit::NoLimit,
            ExpansionLimit::NoExpansion,
        );
        let reads = reads(&[&[(50, 150)]]);
        let candidates = vec![region(100, 101), region(100, 101), region(120, 121)];
        assert_eq!(
            walker.start_walk("chr1", &reads, &candidates).unwrap(),
            region(100, 101)
        );
        assert_eq!(
            walker
                .continue_walk(&region(100, 101), &reads, &candidates)
                .unwrap(),
            region(120, 121)
        );
    }

    #[test]
    fn test_excluded_insertion_is_not_swallowed() {
        let walker = GenomeWalker::new(
            0,
            1,
            IndicatorLimit::NoLimit,
            ExtensionLimit::NoLimit,
            ExpansionLimit::UpToExcluded,
        );
        let reads = reads(&[&[(50, 150)]]);
        let candidates = vec![region(100, 101), region(110, 110)];
        let first = walker.start_walk("chr1", &reads, &candidates).unwrap();
        assert_eq!(first, region(50, 109));
        assert!(!first.overlaps(&candidates[1]));
        let second = walker.continue_walk(&first, &reads, &candidates).unwrap();
        assert!(second.overlaps(&candidates[1]));
    }

    #[test]
    fn test_degenerate_single_step() {
        let walker = GenomeWalker::new(
            0,
            0,
            IndicatorLimit::NoLimit,
            ExtensionLimit::NoLimit,
            ExpansionLimit::NoExpansion,
        );
        let reads = reads(&[&[(50, 150)]]);
        let candidates = snvs(&[100, 110]);
        assert_eq!(
            walker.start_walk("chr1", &reads, &candidates).unwrap(),
            region(0, 100)
        );
    }

    #[test]
    fn test_rejects_unsorted_input() {
        let walker = GenomeWalkerBuilder::default().build();
        let sorted_reads = reads(&[&[(50, 150)]]);
        let unsorted_candidates = snvs(&[110, 100]);
        assert!(walker
            .start_walk("chr1", &sorted_reads, &unsorted_candidates)
            .is_err());

        let unsorted_reads = reads(&[&[(60, 150), (50, 150)]]);
        assert!(walker
            .start_walk("chr1", &unsorted_reads, &snvs(&[100]))
            .is_err());

        assert!(walker
            .start_walk("chr2", &sorted_reads, &snvs(&[100]))
            .is_err());
    }

    #[test]
    fn test_walks_terminate_without_skipping() {
        let candidates = vec![
            region(10, 11),
            region(15, 15),
            region(15, 16),
            region(40, 45),
            region(42, 43),
            region(90, 91),
            region(95, 95),
            region(130, 131),
            region(131, 132),
            region(300, 310),
            region(310, 310),
            region(310, 311),
            region(400, 401),
            region(700, 702),
        ];
        let reads = reads(&[
            &[(0, 60), (5, 65), (30, 90), (60, 120), (100, 160), (280, 360), (380, 440)],
            &[(8, 108), (120, 220), (650, 750)],
        ]);
        let limits = [
            ExpansionLimit::NoExpansion,
            ExpansionLimit::UpToExcluded,
            ExpansionLimit::UpToExcludedWithinReadLength,
        ];
        for &expansion_limit in &limits {
            for &indicator_limit in &[IndicatorLimit::NoLimit, IndicatorLimit::SharedWithPreviousRegion] {
                for &extension_limit in &[
                    ExtensionLimit::NoLimit,
                    ExtensionLimit::WithinReadLengthOfFirstIncluded,
                ] {
                    for max_included in 1..5 {
                        for max_indicators in 0..3 {
                            let walker = GenomeWalker::new(
                                max_indicators,
                                max_included,
                                indicator_limit,
                                extension_limit,
                                expansion_limit,
                            );
                            let regions = walk_all(&walker, &reads, &candidates);
                            let terminal = regions.last().unwrap();
                            let previous = &regions[regions.len() - 2];
                            assert!(
                                walker.is_exhausted(previous, terminal, &candidates),
                                "{:?} did not terminate: {:?}",
                                walker,
                                regions
                            );
                            for candidate in &candidates {
                                assert!(
                                    regions.iter().any(|region| region.overlaps(candidate)),
                                    "{:?} skipped {}: {:?}",
                                    walker,
                                    candidate,
                                    regions
                                );
                            }
                        }
                    }
                }
            }
        }
    }
}
