// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::cmp;
use std::convert::TryFrom;
use std::fmt;
use std::ops::Range;

use anyhow::Result;
use bio_types::genome::{AbstractInterval, Position};

use crate::errors::Error;

/// A half-open interval `[begin, end)` on a named contig.
///
/// Regions are immutable and ordered by contig, then begin, then end.
/// Empty regions (`begin == end`) are meaningful: insertions are represented as empty regions
/// located between two reference bases.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawGenomicRegion")]
pub struct GenomicRegion {
    contig: String,
    begin: u64,
    end: u64,
}

#[derive(Deserialize)]
struct RawGenomicRegion {
    contig: String,
    begin: u64,
    end: u64,
}

impl TryFrom<RawGenomicRegion> for GenomicRegion {
    type Error = Error;

    fn try_from(raw: RawGenomicRegion) -> std::result::Result<Self, Self::Error> {
        GenomicRegion::checked(raw.contig, raw.begin, raw.end)
    }
}

impl GenomicRegion {
    pub fn new<C: Into<String>>(contig: C, begin: u64, end: u64) -> Result<Self> {
        Ok(Self::checked(contig.into(), begin, end)?)
    }

    fn checked(contig: String, begin: u64, end: u64) -> std::result::Result<Self, Error> {
        if begin > end {
            Err(Error::InvalidRegion { contig, begin, end })
        } else {
            Ok(GenomicRegion { contig, begin, end })
        }
    }

    /// Internal constructor for operations that maintain `begin <= end` by construction.
    fn spanning(&self, begin: u64, end: u64) -> Self {
        debug_assert!(begin <= end);
        GenomicRegion {
            contig: self.contig.clone(),
            begin,
            end,
        }
    }

    pub fn contig(&self) -> &str {
        &self.contig
    }

    pub fn begin(&self) -> u64 {
        self.begin
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    pub fn size(&self) -> u64 {
        self.end - self.begin
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    pub fn is_same_contig(&self, other: &GenomicRegion) -> bool {
        self.contig == other.contig
    }

    /// Number of shared bases. Negative if the regions are apart.
    pub fn overlap_size(&self, other: &GenomicRegion) -> i64 {
        cmp::min(self.end, other.end) as i64 - cmp::max(self.begin, other.begin) as i64
    }

    /// Whether the regions share a base. An empty region also overlaps any region it touches,
    /// so an insertion overlaps both of its flanking bases.
    /// Regions on different contigs never overlap.
    pub fn overlaps(&self, other: &GenomicRegion) -> bool {
        if !self.is_same_contig(other) {
            return false;
        }
        let overlap = self.overlap_size(other);
        overlap > 0 || (overlap == 0 && (self.is_empty() || other.is_empty()))
    }

    pub fn contains(&self, other: &GenomicRegion) -> bool {
        self.is_same_contig(other) && self.begin <= other.begin && other.end <= self.end
    }

    pub fn begins_before(&self, other: &GenomicRegion) -> bool {
        self.begin < other.begin
    }

    pub fn ends_before(&self, other: &GenomicRegion) -> bool {
        self.end < other.end
    }

    /// Signed number of bases between the regions: positive if `other` lies right of `self`,
    /// negative if it lies left, zero if they overlap.
    pub fn inner_distance(&self, other: &GenomicRegion) -> i64 {
        if self.overlaps(other) {
            0
        } else if self.ends_before(other) {
            other.begin as i64 - self.end as i64
        } else {
            -(self.begin as i64 - other.end as i64)
        }
    }

    /// Move the region by `n` bases. Positions are clamped at the contig start.
    pub fn shift(&self, n: i64) -> Self {
        let move_pos = |pos: u64| {
            if n < 0 {
                pos.saturating_sub(n.unsigned_abs())
            } else {
                pos + n as u64
            }
        };
        self.spanning(move_pos(self.begin), move_pos(self.end))
    }

    /// The last `n` bases of the region (all of it if it is shorter).
    pub fn tail(&self, n: u64) -> Self {
        self.spanning(self.end - cmp::min(n, self.size()), self.end)
    }

    /// The gap between the end of `self` and the begin of `other`.
    /// Empty at `self.end()` if `other` does not begin after `self`.
    pub fn intervening(&self, other: &GenomicRegion) -> Self {
        self.spanning(self.end, cmp::max(self.end, other.begin))
    }

    /// The smallest region containing both regions.
    pub fn encompassing(&self, other: &GenomicRegion) -> Self {
        self.spanning(
            cmp::min(self.begin, other.begin),
            cmp::max(self.end, other.end),
        )
    }

    /// `[self.begin, other.end)`, collapsed to an empty region if `other` ends before `self` begins.
    pub fn closed(&self, other: &GenomicRegion) -> Self {
        self.spanning(self.begin, cmp::max(self.begin, other.end))
    }
}

impl fmt::Display for GenomicRegion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}-{}", self.contig, self.begin, self.end)
    }
}

impl AbstractInterval for GenomicRegion {
    fn contig(&self) -> &str {
        &self.contig
    }

    fn range(&self) -> Range<Position> {
        self.begin..self.end
    }
}

/// Anything that is located on the genome.
pub trait Mappable {
    fn region(&self) -> &GenomicRegion;
}

impl Mappable for GenomicRegion {
    fn region(&self) -> &GenomicRegion {
        self
    }
}

impl<'a, T: Mappable> Mappable for &'a T {
    fn region(&self) -> &GenomicRegion {
        (*self).region()
    }
}

/// Smallest region containing all given items, `None` if there are none.
pub fn encompassing_region<'a, T, I>(items: I) -> Option<GenomicRegion>
where
    T: Mappable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items
        .into_iter()
        .map(|item| item.region().clone())
        .fold(None, |acc: Option<GenomicRegion>, region| match acc {
            Some(acc) => Some(acc.encompassing(&region)),
            None => Some(region),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(begin: u64, end: u64) -> GenomicRegion {
        GenomicRegion::new("chr1", begin, end).unwrap()
    }

    #[test]
    fn test_invalid_region() {
        assert!(GenomicRegion::new("chr1", 10, 5).is_err());
        assert!(GenomicRegion::new("chr1", 5, 5).is_ok());
    }

    #[test]
    fn test_ordering() {
        let mut regions = vec![
            GenomicRegion::new("chr2", 0, 1).unwrap(),
            region(10, 20),
            region(10, 11),
            region(5, 30),
        ];
        regions.sort();
        assert_eq!(
            regions,
            vec![
                region(5, 30),
                region(10, 11),
                region(10, 20),
                GenomicRegion::new("chr2", 0, 1).unwrap()
            ]
        );
    }

    #[test]
    fn test_overlaps() {
        assert!(region(10, 20).overlaps(&region(19, 30)));
        assert!(!region(10, 20).overlaps(&region(20, 30)));
        // insertions overlap their flanking bases
        assert!(region(20, 20).overlaps(&region(19, 20)));
        assert!(region(20, 20).overlaps(&region(20, 21)));
        assert!(!region(20, 20).overlaps(&region(21, 22)));
        assert!(!region(10, 20).overlaps(&GenomicRegion::new("chr2", 10, 20).unwrap()));
    }

    #[test]
    fn test_contains() {
        assert!(region(10, 20).contains(&region(10, 20)));
        assert!(region(10, 20).contains(&region(15, 15)));
        assert!(!region(10, 20).contains(&region(15, 21)));
    }

    #[test]
    fn test_inner_distance() {
        assert_eq!(region(100, 101).inner_distance(&region(110, 111)), 9);
        assert_eq!(region(110, 111).inner_distance(&region(100, 101)), -9);
        assert_eq!(region(100, 110).inner_distance(&region(105, 106)), 0);
    }

    #[test]
    fn test_shift() {
        assert_eq!(region(100, 101).shift(9), region(109, 110));
        assert_eq!(region(100, 101).shift(-9), region(91, 92));
        assert_eq!(region(3, 5).shift(-10), region(0, 0));
    }

    #[test]
    fn test_derived_regions() {
        assert_eq!(region(100, 105).tail(0), region(105, 105));
        assert_eq!(region(100, 105).tail(2), region(103, 105));
        assert_eq!(region(100, 105).intervening(&region(110, 111)), region(105, 110));
        assert_eq!(region(100, 105).intervening(&region(103, 111)), region(105, 105));
        assert_eq!(region(100, 105).encompassing(&region(90, 101)), region(90, 105));
        assert_eq!(region(100, 105).closed(&region(200, 201)), region(100, 201));
    }

    #[test]
    fn test_abstract_interval() {
        let r = region(100, 105);
        assert_eq!(AbstractInterval::contig(&r), "chr1");
        assert_eq!(r.range(), 100..105);
        assert_eq!(format!("{}", r), "chr1:100-105");
    }

    #[test]
    fn test_encompassing_region() {
        let regions = vec![region(10, 12), region(5, 6), region(11, 30)];
        assert_eq!(encompassing_region(&regions), Some(region(5, 30)));
        assert_eq!(encompassing_region::<GenomicRegion, _>(&[]), None);
    }

    #[test]
    fn test_deserialize_rejects_inverted() {
        let ok: GenomicRegion =
            serde_json::from_str(r#"{"contig": "chr1", "begin": 1, "end": 2}"#).unwrap();
        assert_eq!(ok, region(1, 2));
        assert!(
            serde_json::from_str::<GenomicRegion>(r#"{"contig": "chr1", "begin": 3, "end": 2}"#)
                .is_err()
        );
    }
}
