// Copyright 2020 Johannes Köster.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use anyhow::Result;
use itertools::Itertools;

use crate::errors::Error;
use crate::reads::sequence;
use crate::region::{GenomicRegion, Mappable};

/// A candidate variant. The region covers the replaced reference bases, hence
/// insertions have empty regions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
#[getset(get = "pub")]
pub struct Variant {
    region: GenomicRegion,
    #[serde(with = "sequence")]
    ref_allele: Vec<u8>,
    #[serde(with = "sequence")]
    alt_allele: Vec<u8>,
}

impl Variant {
    pub fn is_snv(&self) -> bool {
        self.ref_allele.len() == 1 && self.alt_allele.len() == 1
    }

    pub fn is_insertion(&self) -> bool {
        self.ref_allele.is_empty() && !self.alt_allele.is_empty()
    }

    pub fn is_deletion(&self) -> bool {
        !self.ref_allele.is_empty() && self.alt_allele.is_empty()
    }
}

impl Mappable for Variant {
    fn region(&self) -> &GenomicRegion {
        &self.region
    }
}

/// Check that candidates are sorted and located on the given contig.
pub fn check_candidates<C: Mappable>(contig: &str, candidates: &[C]) -> Result<()> {
    if let Some(candidate) = candidates
        .iter()
        .find(|candidate| candidate.region().contig() != contig)
    {
        return Err(Error::ContigMismatch {
            lhs: contig.to_owned(),
            rhs: candidate.region().contig().to_owned(),
        }
        .into());
    }
    if let Some((previous, current)) = candidates
        .iter()
        .tuple_windows()
        .find(|(previous, current)| previous.region() > current.region())
    {
        return Err(Error::UnsortedCandidates {
            previous: previous.region().to_string(),
            current: current.region().to_string(),
        }
        .into());
    }
    Ok(())
}
