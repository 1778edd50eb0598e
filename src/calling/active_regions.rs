// Copyright 2020 Johannes Köster.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use anyhow::Result;
use rayon::prelude::*;

use crate::calling::walker::GenomeWalker;
use crate::reads::{AlignedRead, ReadMap};
use crate::region::{GenomicRegion, Mappable};
use crate::variants::Variant;

/// Reads and candidates of one contig.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, new)]
#[getset(get = "pub")]
pub struct ContigInput {
    contig: String,
    #[serde(default)]
    reads: ReadMap<AlignedRead>,
    #[serde(default)]
    candidates: Vec<Variant>,
}

/// All active regions of `contig`, in walking order. The terminal zero-length region is not
/// part of the result.
pub fn walk_contig<R, C>(
    walker: &GenomeWalker,
    contig: &str,
    reads: &ReadMap<R>,
    candidates: &[C],
) -> Result<Vec<GenomicRegion>>
where
    R: Mappable,
    C: Mappable,
{
    let mut regions = Vec::new();
    if candidates.is_empty() {
        info!("{}: no candidates, nothing to walk", contig);
        return Ok(regions);
    }

    let mut region = walker.start_walk(contig, reads, candidates)?;
    loop {
        debug!("{}: active region {}", contig, region);
        let next = walker.continue_walk(&region, reads, candidates)?;
        if walker.is_exhausted(&region, &next, candidates) {
            regions.push(region);
            break;
        }
        if next == region {
            warn!(
                "{}: walk did not advance beyond {}, stopping",
                contig, region
            );
            regions.push(region);
            break;
        }
        regions.push(region);
        region = next;
    }

    info!(
        "{}: {} candidates in {} active regions",
        contig,
        candidates.len(),
        regions.len()
    );
    Ok(regions)
}

/// Walk several contigs in parallel. Results are in input order.
pub fn walk_contigs(
    walker: &GenomeWalker,
    inputs: &[ContigInput],
) -> Result<Vec<(String, Vec<GenomicRegion>)>> {
    inputs
        .par_iter()
        .map(|input| {
            walk_contig(walker, input.contig(), input.reads(), input.candidates())
                .map(|regions| (input.contig().to_owned(), regions))
        })
        .collect()
}
