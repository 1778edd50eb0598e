// Copyright 2020 Johannes Köster.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Overlap queries over sorted mappable items.
//!
//! Items are sorted by begin, not necessarily by end (e.g. a deletion spanning an SNV). Queries
//! are therefore bounded by the size of the largest item, as for the reads of each sample.

use std::cmp;
use std::ops::Range;

use crate::reads::{max_read_size, ReadMap};
use crate::region::{GenomicRegion, Mappable};

/// Contiguous index range `[start, end)` into a sorted slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, new, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct MappableRange {
    start: usize,
    end: usize,
}

impl MappableRange {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn indices(&self) -> Range<usize> {
        self.start..self.end
    }
}

fn is_after(item: &GenomicRegion, region: &GenomicRegion) -> bool {
    item.begin() >= region.end() && !item.overlaps(region)
}

fn max_mappable_size<T: Mappable>(items: &[T]) -> u64 {
    items
        .iter()
        .map(|item| item.region().size())
        .max()
        .unwrap_or(0)
}

/// Index range from the first to the last item overlapping `region`. Items nested in a larger
/// one may lie in between without overlapping `region` themselves. If nothing overlaps, the
/// range is empty and starts at the first item after `region`.
pub fn overlap_range<T: Mappable>(items: &[T], region: &GenomicRegion) -> MappableRange {
    let max_size = max_mappable_size(items);
    let window_start =
        items.partition_point(|item| item.region().begin() + max_size < region.begin());
    let window_end = window_start
        + items[window_start..].partition_point(|item| !is_after(item.region(), region));
    let window = &items[window_start..window_end];

    match window
        .iter()
        .position(|item| item.region().overlaps(region))
    {
        Some(first) => {
            let last = window
                .iter()
                .rposition(|item| item.region().overlaps(region))
                .unwrap_or(first);
            MappableRange::new(window_start + first, window_start + last + 1)
        }
        None => MappableRange::new(window_end, window_end),
    }
}

pub fn count_overlapped<T: Mappable>(items: &[T], region: &GenomicRegion) -> usize {
    items[overlap_range(items, region).indices()]
        .iter()
        .filter(|item| item.region().overlaps(region))
        .count()
}

/// The item with the smallest region.
pub fn leftmost_mappable<T: Mappable>(items: &[T]) -> Option<&T> {
    items.iter().min_by(|a, b| a.region().cmp(b.region()))
}

/// The item with the largest end. The first one wins ties.
pub fn rightmost_mappable<T: Mappable>(items: &[T]) -> Option<&T> {
    items.iter().fold(None, |best: Option<&T>, item| match best {
        Some(best) if !best.region().ends_before(item.region()) => Some(best),
        _ => Some(item),
    })
}

/// The reads of one sample together with the size of its longest read.
#[derive(Debug, Clone, Copy)]
pub struct SampleReads<'a, R> {
    reads: &'a [R],
    max_size: u64,
}

impl<'a, R: Mappable> SampleReads<'a, R> {
    pub fn new(reads: &'a [R]) -> Self {
        SampleReads {
            reads,
            max_size: max_read_size(reads),
        }
    }

    /// Index window of reads that may overlap `region`.
    fn window(&self, region: &GenomicRegion) -> MappableRange {
        let max_size = self.max_size;
        let start = self
            .reads
            .partition_point(|read| read.region().begin() + max_size < region.begin());
        let end = cmp::max(
            start,
            self.reads
                .partition_point(|read| read.region().begin() <= region.end()),
        );
        MappableRange::new(start, end)
    }

    pub fn overlapped<'b>(&self, region: &'b GenomicRegion) -> impl Iterator<Item = &'a R> + 'b
    where
        'a: 'b,
    {
        let reads: &'a [R] = self.reads;
        reads[self.window(region).indices()]
            .iter()
            .filter(move |read| read.region().overlaps(region))
    }

    pub fn count_overlapped(&self, region: &GenomicRegion) -> usize {
        self.overlapped(region).count()
    }

    /// Whether some read overlaps both regions.
    pub fn has_shared(&self, lhs: &GenomicRegion, rhs: &GenomicRegion) -> bool {
        self.overlapped(lhs).any(|read| read.region().overlaps(rhs))
    }

    /// Number of items following the first that overlap the longest-reaching read overlapping
    /// the first item, i.e. the items within one read length of it.
    pub fn count_if_shared_with_first<T: Mappable>(&self, items: &[T]) -> usize {
        let first = match items.first() {
            Some(first) => first,
            None => return 0,
        };
        let reach = self.overlapped(first.region()).fold(None, |best: Option<&R>, read| {
            match best {
                Some(best) if !best.region().ends_before(read.region()) => Some(best),
                _ => Some(read),
            }
        });
        match reach {
            Some(read) => items[1..]
                .iter()
                .take_while(|item| item.region().overlaps(read.region()))
                .count(),
            None => 0,
        }
    }
}

/// Read overlap queries across all samples of a `ReadMap`.
#[derive(Debug, Clone)]
pub struct ReadIndex<'a, R> {
    samples: Vec<SampleReads<'a, R>>,
}

impl<'a, R: Mappable> ReadIndex<'a, R> {
    pub fn new(reads: &'a ReadMap<R>) -> Self {
        ReadIndex {
            samples: reads
                .values()
                .map(|sample_reads| SampleReads::new(sample_reads))
                .collect(),
        }
    }

    pub fn samples(&self) -> &[SampleReads<'a, R>] {
        &self.samples
    }

    /// Overlapping read with the smallest region over all samples.
    pub fn leftmost_overlapped(&self, region: &GenomicRegion) -> Option<&'a R> {
        self.samples
            .iter()
            .filter_map(|sample| {
                sample
                    .overlapped(region)
                    .min_by(|a, b| a.region().cmp(b.region()))
            })
            .min_by(|a, b| a.region().cmp(b.region()))
    }

    /// Overlapping read reaching furthest to the right over all samples.
    pub fn rightmost_overlapped(&self, region: &GenomicRegion) -> Option<&'a R> {
        self.samples
            .iter()
            .flat_map(|sample| sample.overlapped(region))
            .fold(None, |best: Option<&'a R>, read| match best {
                Some(best) if !best.region().ends_before(read.region()) => Some(best),
                _ => Some(read),
            })
    }

    pub fn count_overlapped(&self, region: &GenomicRegion) -> usize {
        self.samples
            .iter()
            .map(|sample| sample.count_overlapped(region))
            .sum()
    }

    pub fn has_shared(&self, lhs: &GenomicRegion, rhs: &GenomicRegion) -> bool {
        self.samples.iter().any(|sample| sample.has_shared(lhs, rhs))
    }

    /// Maximum over samples of the number of items sharing a read with the first item.
    pub fn max_count_if_shared_with_first<T: Mappable>(&self, items: &[T]) -> usize {
        self.samples
            .iter()
            .map(|sample| sample.count_if_shared_with_first(items))
            .max()
            .unwrap_or(0)
    }

    /// Index of the first item sharing a read with `target`, `items.len()` if there is none.
    pub fn find_first_shared<T: Mappable>(&self, items: &[T], target: &GenomicRegion) -> usize {
        items
            .iter()
            .position(|item| self.has_shared(item.region(), target))
            .unwrap_or_else(|| items.len())
    }
}
