// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("invalid region {contig}:{begin}-{end}: begin must not exceed end")]
    InvalidRegion { contig: String, begin: u64, end: u64 },
    #[error("regions on different contigs cannot be compared ({lhs} vs {rhs})")]
    ContigMismatch { lhs: String, rhs: String },
    #[error("candidates are not sorted: {previous} is followed by {current}")]
    UnsortedCandidates { previous: String, current: String },
    #[error("reads of sample {sample} are not sorted: {previous} is followed by {current}")]
    UnsortedReads {
        sample: String,
        previous: String,
        current: String,
    },
    #[error("target has {target_len} bases but {qualities_len} qualities")]
    TargetQualityLengthMismatch {
        target_len: usize,
        qualities_len: usize,
    },
    #[error("truth has {truth_len} bases but {penalties_len} gap open penalties")]
    TruthGapOpenLengthMismatch {
        truth_len: usize,
        penalties_len: usize,
    },
    #[error("offset hint {offset} must be smaller than {bound} (the longer of truth and target)")]
    InvalidOffsetHint { offset: usize, bound: usize },
    #[error("haplotype {haplotype} and read {read} are on different contigs")]
    HaplotypeReadContigMismatch { haplotype: String, read: String },
    #[error("invalid configuration: {msg}")]
    InvalidConfiguration { msg: String },
}

pub(crate) fn invalid_configuration(msg: &str) -> Error {
    Error::InvalidConfiguration {
        msg: msg.to_owned(),
    }
}
