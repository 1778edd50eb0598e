// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use itertools::Itertools;
use structopt::StructOpt;

use crate::calling::{walk_contigs, ContigInput, GenomeWalker, WalkerConfig};
use crate::errors;
use crate::model::{Haplotype, HaplotypeLikelihoodModel};
use crate::pairhmm::Model;
use crate::reads::AlignedRead;
use crate::region::GenomicRegion;
use crate::utils::read_config;

#[derive(Debug, StructOpt, Clone)]
#[structopt(
    name = "haplowalk",
    about = "Partition the genome into active regions and score reads against candidate haplotypes.",
    setting = structopt::clap::AppSettings::ColoredHelp
)]
pub struct Haplowalk {
    #[structopt(long, short = "v", help = "Print debug messages.")]
    pub verbose: bool,
    #[structopt(subcommand)]
    pub command: Command,
}

#[derive(Debug, StructOpt, Clone)]
pub enum Command {
    #[structopt(
        name = "walk",
        about = "Compute the active regions of each contig from reads and candidate variants.",
        setting = structopt::clap::AppSettings::ColoredHelp
    )]
    Walk {
        #[structopt(
            parse(from_os_str),
            help = "JSON file with a list of contigs, each with reads per sample and sorted candidates."
        )]
        input: PathBuf,
        #[structopt(
            long,
            parse(from_os_str),
            help = "YAML or JSON file with walker limits (max-included, max-indicators, \
                    indicator-limit, extension-limit, expansion-limit)."
        )]
        config: Option<PathBuf>,
        #[structopt(long, short = "t", default_value = "1", help = "Number of threads to use.")]
        threads: usize,
    },
    #[structopt(
        name = "likelihoods",
        about = "Compute the log likelihood of each read given each haplotype.",
        setting = structopt::clap::AppSettings::ColoredHelp
    )]
    Likelihoods {
        #[structopt(
            parse(from_os_str),
            help = "JSON file with haplotypes and reads."
        )]
        input: PathBuf,
        #[structopt(
            long,
            parse(from_os_str),
            help = "YAML or JSON file with alignment model parameters (gap-extend-penalty, \
                    insertion-bias, flank-clear, lhs-flank-size, rhs-flank-size)."
        )]
        config: Option<PathBuf>,
        #[structopt(long, short = "t", default_value = "1", help = "Number of threads to use.")]
        threads: usize,
    },
}

/// Haplotypes and reads to score against each other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikelihoodInput {
    pub haplotypes: Vec<Haplotype>,
    pub reads: Vec<AlignedRead>,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let reader = BufReader::new(
        File::open(path).with_context(|| format!("unable to open {}", path.display()))?,
    );
    serde_json::from_reader(reader).with_context(|| format!("invalid input {}", path.display()))
}

fn setup_threads(threads: usize) -> Result<()> {
    if threads == 0 {
        return Err(errors::invalid_configuration("number of threads must be at least 1").into());
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()?;
    Ok(())
}

pub fn run(opt: Haplowalk) -> Result<()> {
    match opt.command {
        Command::Walk {
            ref input,
            ref config,
            threads,
        } => {
            setup_threads(threads)?;
            let config: WalkerConfig = match config {
                Some(path) => read_config(path)?,
                None => WalkerConfig::default(),
            };
            let walker = GenomeWalker::from(config);
            let inputs: Vec<ContigInput> = read_json(input)?;

            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            write_regions(&mut out, &walk_contigs(&walker, &inputs)?)?;
            out.flush()?;
        }
        Command::Likelihoods {
            ref input,
            ref config,
            threads,
        } => {
            setup_threads(threads)?;
            let model: Model = match config {
                Some(path) => read_config(path)?,
                None => Model::default(),
            };
            let input: LikelihoodInput = read_json(input)?;
            let likelihoods = HaplotypeLikelihoodModel::new(model)
                .likelihoods(&input.haplotypes, &input.reads)?;

            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            writeln!(
                out,
                "haplotype\t{}",
                input.reads.iter().map(|read| read.region()).join("\t")
            )?;
            for (haplotype, row) in input.haplotypes.iter().zip(&likelihoods) {
                writeln!(
                    out,
                    "{}\t{}",
                    haplotype.region(),
                    row.iter().map(|p| **p).join("\t")
                )?;
            }
            out.flush()?;
        }
    }
    Ok(())
}

/// Write one tab separated line (`contig`, `begin`, `end`) per region.
pub fn write_regions<W: Write>(
    out: &mut W,
    regions: &[(String, Vec<GenomicRegion>)],
) -> Result<()> {
    for (_, contig_regions) in regions {
        for region in contig_regions {
            writeln!(out, "{}\t{}\t{}", region.contig(), region.begin(), region.end())?;
        }
    }
    Ok(())
}
