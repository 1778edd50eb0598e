// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Active region walking and pair-HMM read likelihoods for haplotype-based variant calling.
//!
//! The genome walker partitions each contig into active regions, given sorted candidate
//! variants and the reads of one or more samples. Within a region, reads are scored against
//! candidate haplotypes with a banded pair alignment that uses base qualities and
//! homopolymer-aware gap open penalties.

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate derive_new;
#[macro_use]
extern crate getset;
#[macro_use]
extern crate strum_macros;
#[cfg(test)]
#[macro_use]
extern crate approx;

pub mod bias;
pub mod calling;
pub mod cli;
pub mod constants;
pub mod errors;
pub mod model;
pub mod pairhmm;
pub mod reads;
pub mod region;
pub mod utils;
pub mod variants;

pub use crate::calling::{walk_contig, walk_contigs, GenomeWalker};
pub use crate::pairhmm::compute_log_probability;
pub use crate::region::{GenomicRegion, Mappable};
