// Copyright 2020 Johannes Köster.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::collections::BTreeMap;

use anyhow::Result;
use itertools::Itertools;

use crate::errors::Error;
use crate::region::{GenomicRegion, Mappable};

pub type SampleName = String;

/// Reads per sample, each sample's reads sorted by mapped region.
pub type ReadMap<R> = BTreeMap<SampleName, Vec<R>>;

/// Strand a read was sequenced from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    IntoStaticStr,
)]
pub enum Strand {
    #[serde(rename = "+")]
    #[strum(serialize = "+")]
    Forward,
    #[serde(rename = "-")]
    #[strum(serialize = "-")]
    Reverse,
}

impl Default for Strand {
    fn default() -> Self {
        Strand::Forward
    }
}

/// A read aligned to the reference. Qualities are PHRED scaled, one per base. Sequence and
/// qualities may be omitted when only the mapped region matters, e.g. for walking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, CopyGetters, new)]
pub struct AlignedRead {
    #[getset(get = "pub")]
    region: GenomicRegion,
    #[getset(get = "pub")]
    #[serde(with = "sequence", default)]
    sequence: Vec<u8>,
    #[getset(get = "pub")]
    #[serde(default)]
    qualities: Vec<u8>,
    #[serde(default)]
    #[getset(get_copy = "pub")]
    strand: Strand,
}

impl AlignedRead {
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn is_forward(&self) -> bool {
        self.strand == Strand::Forward
    }
}

impl Mappable for AlignedRead {
    fn region(&self) -> &GenomicRegion {
        &self.region
    }
}

/// Check that every sample's reads are sorted by region.
pub fn check_sorted_reads<R: Mappable>(reads: &ReadMap<R>) -> Result<()> {
    for (sample, sample_reads) in reads {
        if let Some((previous, current)) = sample_reads
            .iter()
            .tuple_windows()
            .find(|(previous, current)| previous.region() > current.region())
        {
            return Err(Error::UnsortedReads {
                sample: sample.to_owned(),
                previous: previous.region().to_string(),
                current: current.region().to_string(),
            }
            .into());
        }
    }
    Ok(())
}

/// Length of the longest read, used to bound overlap searches.
pub fn max_read_size<R: Mappable>(reads: &[R]) -> u64 {
    reads.iter().map(|read| read.region().size()).max().unwrap_or(0)
}

/// (De)serialize base sequences as plain strings.
pub(crate) mod sequence {
    use serde::{Deserialize, Deserializer, Serializer};

    pub(crate) fn serialize<S>(seq: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&String::from_utf8_lossy(seq))
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let seq = String::deserialize(deserializer)?;
        Ok(seq.into_bytes().to_ascii_uppercase())
    }
}
