// Copyright 2020 Johannes Köster.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use crate::constants::{DEFAULT_GAP_OPEN_PENALTY, HOMOPOLYMER_GAP_OPEN_PENALTIES};

pub(crate) fn extend_homopolymer_stretch(base: u8, seq: &mut dyn Iterator<Item = &u8>) -> usize {
    let base = base.to_ascii_uppercase();
    seq.take_while(|c| c.to_ascii_uppercase() == base).count()
}

/// Length of the homopolymer run each position of `seq` belongs to.
pub fn homopolymer_run_lengths(seq: &[u8]) -> Vec<usize> {
    let mut lengths = Vec::with_capacity(seq.len());
    while lengths.len() < seq.len() {
        let pos = lengths.len();
        let len = extend_homopolymer_stretch(seq[pos], &mut seq[pos..].iter());
        lengths.extend(std::iter::repeat(len).take(len));
    }
    lengths
}

/// Gap open penalty of a homopolymer run of the given length.
pub fn homopolymer_gap_open_penalty(run_length: usize) -> u8 {
    match run_length {
        0 => DEFAULT_GAP_OPEN_PENALTY,
        len => HOMOPOLYMER_GAP_OPEN_PENALTIES[(len - 1).min(HOMOPOLYMER_GAP_OPEN_PENALTIES.len() - 1)],
    }
}

/// Per position gap open penalties of a truth sequence. Indel errors are more likely within
/// long homopolymer runs, hence those get lower penalties.
pub fn gap_open_penalties(seq: &[u8]) -> Vec<u8> {
    homopolymer_run_lengths(seq)
        .into_iter()
        .map(homopolymer_gap_open_penalty)
        .collect()
}
