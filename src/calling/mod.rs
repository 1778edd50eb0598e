// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

pub mod active_regions;
pub mod walker;

pub use self::active_regions::{walk_contig, walk_contigs, ContigInput};
pub use self::walker::{
    ExpansionLimit, ExtensionLimit, GenomeWalker, GenomeWalkerBuilder, IndicatorLimit,
    WalkerConfig,
};
