// Copyright 2020 Johannes Köster.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Log probability of a target (read) sequence given a truth (haplotype) sequence.
//!
//! Exact matches and single mismatches are resolved without alignment. Everything else is
//! scored by a banded Viterbi alignment over `len(target) + 15` truth bases starting at the
//! offset hint.

mod banded;

use anyhow::Result;
use bio::stats::LogProb;

use crate::constants::{LN_10_DIV_10, MAX_PENALTY};
use crate::errors::Error;

pub use self::banded::BandedAlignment;
use self::banded::{flank_score, BandedAligner, BAND_PADDING};

/// Log probability signaling that the truth cannot explain the target.
pub const IMPOSSIBLE: LogProb = LogProb(f64::MIN);

lazy_static! {
    /// Natural log probability of each PHRED score.
    pub static ref PHRED_TO_LN_PROB: [LogProb; 256] = {
        let mut probs = [LogProb::ln_one(); 256];
        for (phred, prob) in probs.iter_mut().enumerate() {
            *prob = LogProb(-LN_10_DIV_10 * phred as f64);
        }
        probs
    };
}

/// Parameters of the alignment model. Penalties are PHRED scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Model {
    pub gap_extend_penalty: u8,
    /// Additional penalty of each inserted target base.
    pub insertion_bias: u8,
    /// Whether penalties within the truth flanks count like any other.
    pub flank_clear: bool,
    pub lhs_flank_size: usize,
    pub rhs_flank_size: usize,
}

impl Default for Model {
    fn default() -> Self {
        Model {
            gap_extend_penalty: 3,
            insertion_bias: 2,
            flank_clear: true,
            lhs_flank_size: 0,
            rhs_flank_size: 0,
        }
    }
}

fn phred_to_ln_prob(phred: u8) -> LogProb {
    PHRED_TO_LN_PROB[phred as usize]
}

fn saturate(values: &[u8]) -> Vec<u8> {
    values.iter().map(|&value| value.min(MAX_PENALTY)).collect()
}

/// Compute the log probability of `target` given `truth`, with the target expected to start
/// at `offset_hint` in the truth.
///
/// Returns `IMPOSSIBLE` if the truth is too short to align the target at the offset hint.
pub fn compute_log_probability(
    truth: &[u8],
    target: &[u8],
    target_qualities: &[u8],
    truth_gap_open_penalties: &[u8],
    offset_hint: usize,
    model: &Model,
) -> Result<LogProb> {
    if target.len() != target_qualities.len() {
        return Err(Error::TargetQualityLengthMismatch {
            target_len: target.len(),
            qualities_len: target_qualities.len(),
        }
        .into());
    }
    if truth.len() != truth_gap_open_penalties.len() {
        return Err(Error::TruthGapOpenLengthMismatch {
            truth_len: truth.len(),
            penalties_len: truth_gap_open_penalties.len(),
        }
        .into());
    }
    let bound = truth.len().max(target.len());
    if offset_hint >= bound {
        return Err(Error::InvalidOffsetHint {
            offset: offset_hint,
            bound,
        }
        .into());
    }

    if offset_hint + target.len() > truth.len() {
        return Ok(IMPOSSIBLE);
    }

    let hinted_truth = &truth[offset_hint..offset_hint + target.len()];
    let mismatch = match target
        .iter()
        .zip(hinted_truth)
        .position(|(target_base, truth_base)| target_base != truth_base)
    {
        Some(mismatch) => mismatch,
        None => return Ok(LogProb::ln_one()),
    };

    let num_mismatches = 1 + target[mismatch + 1..]
        .iter()
        .zip(&hinted_truth[mismatch + 1..])
        .filter(|(target_base, truth_base)| target_base != truth_base)
        .count();

    if num_mismatches == 1 {
        let quality = target_qualities[mismatch];
        let gap_open = truth_gap_open_penalties[offset_hint + mismatch];
        if quality <= gap_open {
            return Ok(phred_to_ln_prob(quality));
        }
        // An extra target base shifting the remainder by one explains the target as well.
        if target[mismatch + 1..] == hinted_truth[mismatch..target.len() - 1] {
            return Ok(phred_to_ln_prob(gap_open));
        }
        return Ok(phred_to_ln_prob(quality));
    }

    Ok(align(
        truth,
        target,
        target_qualities,
        truth_gap_open_penalties,
        offset_hint,
        model,
    ))
}

fn align(
    truth: &[u8],
    target: &[u8],
    target_qualities: &[u8],
    truth_gap_open_penalties: &[u8],
    offset_hint: usize,
    model: &Model,
) -> LogProb {
    let truth_alignment_size = target.len() + BAND_PADDING;
    if offset_hint + truth_alignment_size > truth.len() {
        debug!(
            "truth too short for banded alignment ({} bases from offset {}, {} needed)",
            truth.len() - offset_hint,
            offset_hint,
            truth_alignment_size
        );
        return IMPOSSIBLE;
    }

    let window = offset_hint..offset_hint + truth_alignment_size;
    let target_qualities = saturate(target_qualities);
    let gap_open_penalties = saturate(&truth_gap_open_penalties[window.clone()]);
    let gap_extend = model.gap_extend_penalty.min(MAX_PENALTY);
    let insertion_bias = model.insertion_bias.min(MAX_PENALTY);

    let aligner = BandedAligner::new(
        &truth[window],
        target,
        &target_qualities,
        &gap_open_penalties,
        gap_extend,
        insertion_bias,
    );

    if model.flank_clear {
        return LogProb(-LN_10_DIV_10 * aligner.score() as f64);
    }

    let alignment = aligner.align();
    let flank = flank_score(
        &alignment,
        offset_hint,
        truth.len(),
        &target_qualities,
        &gap_open_penalties,
        gap_extend,
        insertion_bias,
        model.lhs_flank_size,
        model.rhs_flank_size,
    );
    LogProb(-LN_10_DIV_10 * (alignment.score() - flank) as f64)
}
