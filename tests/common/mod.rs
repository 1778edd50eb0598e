use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::Result;
use bio::stats::LogProb;

use haplowalk::calling::{walk_contigs, ContigInput, GenomeWalker, WalkerConfig};
use haplowalk::cli::LikelihoodInput;
use haplowalk::model::HaplotypeLikelihoodModel;
use haplowalk::pairhmm::Model;
use haplowalk::utils::read_config;
use haplowalk::GenomicRegion;

/// A testcase directory holds a `testcase.yaml` naming the input, an optional config and the
/// expected results.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub(crate) enum TestcaseKind {
    Walk {
        input: String,
        config: Option<String>,
        expected: Vec<(String, u64, u64)>,
    },
    Likelihoods {
        input: String,
        config: Option<String>,
        expected: Vec<Vec<f64>>,
    },
}

#[derive(Debug)]
pub(crate) struct Testcase {
    kind: TestcaseKind,
    path: PathBuf,
}

#[derive(Debug)]
pub(crate) enum Output {
    Regions(Vec<(String, Vec<GenomicRegion>)>),
    Likelihoods(Vec<Vec<LogProb>>),
}

pub(crate) fn load_testcase(path: impl AsRef<Path>) -> Result<Testcase> {
    let reader = File::open(path.as_ref().join("testcase.yaml"))?;
    Ok(Testcase {
        kind: serde_yaml::from_reader(reader)?,
        path: path.as_ref().to_owned(),
    })
}

impl Testcase {
    fn file(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }

    pub(crate) fn run(&self) -> Result<Output> {
        Ok(match &self.kind {
            TestcaseKind::Walk { input, config, .. } => {
                let config: WalkerConfig = match config {
                    Some(config) => read_config(self.file(config))?,
                    None => WalkerConfig::default(),
                };
                let inputs: Vec<ContigInput> = read_config(self.file(input))?;
                Output::Regions(walk_contigs(&GenomeWalker::from(config), &inputs)?)
            }
            TestcaseKind::Likelihoods { input, config, .. } => {
                let model: Model = match config {
                    Some(config) => read_config(self.file(config))?,
                    None => Model::default(),
                };
                let input: LikelihoodInput = read_config(self.file(input))?;
                Output::Likelihoods(
                    HaplotypeLikelihoodModel::new(model)
                        .likelihoods(&input.haplotypes, &input.reads)?,
                )
            }
        })
    }

    pub(crate) fn check(&self, output: &Output) {
        match (&self.kind, output) {
            (TestcaseKind::Walk { expected, .. }, Output::Regions(regions)) => {
                let regions: Vec<_> = regions
                    .iter()
                    .flat_map(|(_, regions)| regions)
                    .map(|region| (region.contig().to_owned(), region.begin(), region.end()))
                    .collect();
                assert_eq!(&regions, expected);
            }
            (TestcaseKind::Likelihoods { expected, .. }, Output::Likelihoods(likelihoods)) => {
                assert_eq!(likelihoods.len(), expected.len());
                for (row, expected_row) in likelihoods.iter().zip(expected) {
                    assert_eq!(row.len(), expected_row.len());
                    for (p, expected_p) in row.iter().zip(expected_row) {
                        assert_relative_eq!(**p, *expected_p, epsilon = 1e-9);
                    }
                }
            }
            _ => panic!("output does not match testcase kind"),
        }
    }
}
