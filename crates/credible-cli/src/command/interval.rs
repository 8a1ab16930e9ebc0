use std::{ops::Range, path::PathBuf};

use anyhow::Context as _;
use credible_stats::{BinsSpec, CredibleRegion, DEFAULT_LEVEL, DEFAULT_NUM_BINS};

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct IntervalArg {
    /// Sample file with one value per line
    input: PathBuf,
    /// Number of equal-width bins spanning the sample range
    #[arg(long, default_value_t = DEFAULT_NUM_BINS, conflicts_with = "edges")]
    bins: usize,
    /// Explicit comma-separated bin edges, in ascending order
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    edges: Option<Vec<f64>>,
    /// Probability mass the region must cover, in (0, 1)
    #[arg(long, default_value_t = DEFAULT_LEVEL)]
    level: f64,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

impl IntervalArg {
    pub(crate) fn bins_spec(&self) -> BinsSpec {
        match &self.edges {
            Some(edges) => BinsSpec::Edges(edges.clone()),
            None => BinsSpec::Count(self.bins),
        }
    }
}

/// How many samples the histogram actually saw.
///
/// With explicit edges, samples outside the edges are left out of the
/// histogram and therefore out of the credible mass.
#[derive(Debug, serde::Serialize)]
struct SampleCoverage {
    num_samples: usize,
    in_range: u64,
    out_of_range: u64,
}

#[derive(Debug, serde::Serialize)]
struct BinReport {
    start: f64,
    end: f64,
    count: u64,
    included: bool,
}

#[derive(Debug, serde::Serialize)]
struct IntervalReport {
    input: String,
    level: f64,
    samples: SampleCoverage,
    covered_mass: f64,
    intervals: Vec<Range<f64>>,
    edges: Vec<f64>,
    mask: Vec<bool>,
    bins: Vec<BinReport>,
}

impl IntervalReport {
    fn new(input: String, num_samples: usize, region: &CredibleRegion) -> Self {
        let histogram = region.histogram();
        let in_range = histogram.total();
        let bins = histogram
            .bins()
            .zip(region.mask())
            .map(|(bin, &included)| BinReport {
                start: bin.range.start,
                end: bin.range.end,
                count: bin.count,
                included,
            })
            .collect();

        Self {
            input,
            level: region.level(),
            samples: SampleCoverage {
                num_samples,
                in_range,
                out_of_range: num_samples as u64 - in_range,
            },
            covered_mass: region.covered_mass(),
            intervals: region.intervals(),
            edges: region.edges().to_vec(),
            mask: region.mask().to_vec(),
            bins,
        }
    }
}

pub(crate) fn run(arg: &IntervalArg) -> anyhow::Result<()> {
    eprintln!("Loading samples from {}...", arg.input.display());
    let samples = util::read_samples_file(&arg.input)?;
    eprintln!("Loaded {} samples", samples.len());

    let region = CredibleRegion::new(&samples, &arg.bins_spec(), arg.level).with_context(|| {
        format!(
            "Failed to compute credible region of {}",
            arg.input.display()
        )
    })?;

    let report = IntervalReport::new(arg.input.display().to_string(), samples.len(), &region);
    if report.samples.out_of_range > 0 {
        eprintln!(
            "{} of {} samples fall outside the bin edges and are ignored",
            report.samples.out_of_range, report.samples.num_samples
        );
    }
    eprintln!(
        "Credible region at level {} covers {:.4} of the mass in {} interval(s) over {} bins:",
        report.level,
        report.covered_mass,
        report.intervals.len(),
        region.histogram().num_bins()
    );
    for interval in &report.intervals {
        eprintln!("  [{}, {}]", interval.start, interval.end);
    }

    Output::save_json(&report, arg.output.clone())
}
