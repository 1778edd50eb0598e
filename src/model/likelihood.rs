// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use anyhow::Result;
use bio::stats::LogProb;
use rayon::prelude::*;

use crate::constants::BAND_CENTER_OFFSET;
use crate::errors::Error;
use crate::model::Haplotype;
use crate::pairhmm::{compute_log_probability, Model, IMPOSSIBLE};
use crate::reads::AlignedRead;
use crate::region::Mappable;

/// Likelihood of reads given haplotypes, based on the banded pair alignment.
#[derive(Debug, Clone, Default, PartialEq, Getters, new)]
#[getset(get = "pub")]
pub struct HaplotypeLikelihoodModel {
    model: Model,
}

impl HaplotypeLikelihoodModel {
    /// Log probability of `read` given `haplotype`.
    pub fn evaluate(&self, haplotype: &Haplotype, read: &AlignedRead) -> Result<LogProb> {
        self.evaluate_with_penalties(haplotype, &haplotype.gap_open_penalties(), read)
    }

    /// Log likelihood matrix, indexed by haplotype, then read.
    pub fn likelihoods(
        &self,
        haplotypes: &[Haplotype],
        reads: &[AlignedRead],
    ) -> Result<Vec<Vec<LogProb>>> {
        let likelihoods = haplotypes
            .par_iter()
            .map(|haplotype| {
                let penalties = haplotype.gap_open_penalties();
                reads
                    .iter()
                    .map(|read| self.evaluate_with_penalties(haplotype, &penalties, read))
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        debug!(
            "computed likelihoods of {} reads given {} haplotypes",
            reads.len(),
            haplotypes.len()
        );
        Ok(likelihoods)
    }

    /// The read is tried at its mapped position and, to leave room for insertions, a few bases
    /// further left. The better alignment wins.
    fn evaluate_with_penalties(
        &self,
        haplotype: &Haplotype,
        gap_open_penalties: &[u8],
        read: &AlignedRead,
    ) -> Result<LogProb> {
        if !haplotype.region().is_same_contig(read.region()) {
            return Err(Error::HaplotypeReadContigMismatch {
                haplotype: haplotype.region().to_string(),
                read: read.region().to_string(),
            }
            .into());
        }

        let mapping_position = read
            .region()
            .begin()
            .saturating_sub(haplotype.region().begin()) as usize;
        if mapping_position >= haplotype.len() {
            return Ok(IMPOSSIBLE);
        }

        let at = |offset| {
            compute_log_probability(
                haplotype.sequence(),
                read.sequence(),
                read.qualities(),
                gap_open_penalties,
                offset,
                &self.model,
            )
        };

        let mapped = at(mapping_position)?;
        if mapped == LogProb::ln_one() || mapping_position < BAND_CENTER_OFFSET {
            return Ok(mapped);
        }
        let shifted = at(mapping_position - BAND_CENTER_OFFSET)?;
        Ok(if shifted > mapped { shifted } else { mapped })
    }
}
