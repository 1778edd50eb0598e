// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

/// Conversion factor from PHRED scaled scores to natural log probabilities (ln(10) / 10).
pub const LN_10_DIV_10: f64 = std::f64::consts::LN_10 / 10.0;

/// Qualities and penalties are saturated at this value before banded alignment.
pub const MAX_PENALTY: u8 = i8::MAX as u8;

/// Gap open penalty of a position outside of any homopolymer run.
pub const DEFAULT_GAP_OPEN_PENALTY: u8 = 45;

/// Gap open penalties for homopolymer runs of length 1, 2, ... Longer runs use the last entry.
pub const HOMOPOLYMER_GAP_OPEN_PENALTIES: [u8; 10] = [45, 42, 41, 38, 35, 31, 27, 24, 20, 16];

/// Distance of the read start from the start of the banded truth window, leaves room for
/// insertions within the read.
pub const BAND_CENTER_OFFSET: usize = 7;
