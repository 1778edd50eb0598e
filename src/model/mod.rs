// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

pub mod likelihood;

use crate::reads::sequence;
use crate::region::{GenomicRegion, Mappable};
use crate::utils::homopolymers;

pub use self::likelihood::HaplotypeLikelihoodModel;

/// A candidate haplotype: the sequence of one chromosome copy over `region`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
#[getset(get = "pub")]
pub struct Haplotype {
    region: GenomicRegion,
    #[serde(with = "sequence")]
    sequence: Vec<u8>,
}

impl Haplotype {
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Gap open penalties of the haplotype sequence, lowered within homopolymer runs.
    pub fn gap_open_penalties(&self) -> Vec<u8> {
        homopolymers::gap_open_penalties(&self.sequence)
    }
}

impl Mappable for Haplotype {
    fn region(&self) -> &GenomicRegion {
        &self.region
    }
}
