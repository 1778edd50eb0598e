// Copyright 2020 Johannes Köster.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Strand bias of the reads supporting the haplotypes of a call.
//!
//! For each heterozygous sample, the forward fraction of the reads supporting each haplotype is
//! modeled with a Beta distribution. The measure is the largest Monte-Carlo estimate, over all
//! pairs of haplotypes, of the probability that the forward fractions differ by more than
//! `min_difference`.

use anyhow::Result;
use rand::distributions::Distribution;
use rand::Rng;
use statrs::distribution::Beta;

use crate::reads::AlignedRead;

const SMALL_SAMPLE_SIZE: usize = 100;
const MEDIUM_SAMPLE_SIZE: usize = 1000;
const BIG_SAMPLE_SIZE: usize = 10000;

/// Number of forward and reverse reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, CopyGetters, new)]
#[getset(get_copy = "pub")]
pub struct DirectionCounts {
    forward: u32,
    reverse: u32,
}

impl DirectionCounts {
    pub fn from_reads<'a, I>(reads: I) -> Self
    where
        I: IntoIterator<Item = &'a AlignedRead>,
    {
        reads
            .into_iter()
            .fold(DirectionCounts::default(), |mut counts, read| {
                if read.is_forward() {
                    counts.forward += 1;
                } else {
                    counts.reverse += 1;
                }
                counts
            })
    }

    fn with_prior(self, prior: u32) -> Self {
        DirectionCounts {
            forward: self.forward + prior,
            reverse: self.reverse + prior,
        }
    }
}

/// Reads of one sample, assigned to the haplotypes they support.
#[derive(Debug, Clone, Getters, CopyGetters, new)]
pub struct SampleSupport<'a> {
    #[getset(get_copy = "pub")]
    is_heterozygous: bool,
    #[getset(get = "pub")]
    haplotype_support: Vec<Vec<&'a AlignedRead>>,
}

#[derive(Debug, Clone, Copy, PartialEq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct StrandBias {
    min_medium_trigger: f64,
    min_big_trigger: f64,
    use_resampling: bool,
    min_difference: f64,
    prior: u32,
}

impl StrandBias {
    pub fn new(critical_value: f64) -> Self {
        StrandBias {
            min_medium_trigger: critical_value / 2.0,
            min_big_trigger: critical_value / 8.0,
            use_resampling: true,
            min_difference: 0.25,
            prior: 1,
        }
    }

    /// Always draw the maximum number of samples.
    pub fn without_resampling(mut self) -> Self {
        self.use_resampling = false;
        self
    }

    /// Largest probability of differing forward fractions over all heterozygous samples, 0 if
    /// there is none.
    pub fn evaluate<R: Rng>(&self, samples: &[SampleSupport], rng: &mut R) -> Result<f64> {
        let mut result = 0.0f64;
        for sample in samples.iter().filter(|sample| sample.is_heterozygous()) {
            let counts: Vec<_> = sample
                .haplotype_support()
                .iter()
                .map(|reads| DirectionCounts::from_reads(reads.iter().copied()).with_prior(self.prior))
                .collect();
            let prob = if self.use_resampling {
                self.resampled_max_prob_different(&counts, rng)?
            } else {
                self.max_prob_different(&counts, BIG_SAMPLE_SIZE, rng)?
            };
            result = result.max(prob);
        }
        Ok(result)
    }

    fn resampled_max_prob_different<R: Rng>(
        &self,
        counts: &[DirectionCounts],
        rng: &mut R,
    ) -> Result<f64> {
        let mut prob = self.max_prob_different(counts, SMALL_SAMPLE_SIZE, rng)?;
        if prob >= self.min_big_trigger {
            prob = self.max_prob_different(counts, BIG_SAMPLE_SIZE, rng)?;
        } else if prob >= self.min_medium_trigger {
            prob = self.max_prob_different(counts, MEDIUM_SAMPLE_SIZE, rng)?;
            if prob >= self.min_big_trigger {
                prob = self.max_prob_different(counts, BIG_SAMPLE_SIZE, rng)?;
            }
        }
        Ok(prob)
    }

    fn max_prob_different<R: Rng>(
        &self,
        counts: &[DirectionCounts],
        num_samples: usize,
        rng: &mut R,
    ) -> Result<f64> {
        if counts.len() < 2 {
            return Ok(0.0);
        }
        let samples = counts
            .iter()
            .map(|counts| sample_beta(counts, num_samples, rng))
            .collect::<Result<Vec<_>>>()?;

        let mut result = 0.0f64;
        for (i, lhs) in samples.iter().enumerate() {
            for rhs in &samples[i + 1..] {
                result = result.max(prob_different(lhs, rhs, self.min_difference));
            }
        }
        Ok(result)
    }
}

fn sample_beta<R: Rng>(counts: &DirectionCounts, n: usize, rng: &mut R) -> Result<Vec<f64>> {
    let beta = Beta::new(counts.forward() as f64, counts.reverse() as f64)?;
    Ok((0..n).map(|_| beta.sample(rng)).collect())
}

fn prob_different(lhs: &[f64], rhs: &[f64], min_difference: f64) -> f64 {
    let n_different = lhs
        .iter()
        .zip(rhs)
        .filter(|(a, b)| (*a - *b).abs() > min_difference)
        .count();
    n_different as f64 / lhs.len() as f64
}
