use std::path::PathBuf;

use anyhow::Context as _;
use credible_stats::mixture::Bimodal;
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg64;

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GenerateArg {
    /// Mean of the first mode
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    mu1: f64,
    /// Standard deviation of the first mode
    #[arg(long, default_value_t = 1.0)]
    sigma1: f64,
    /// Mean of the second mode
    #[arg(long, default_value_t = 5.0, allow_negative_numbers = true)]
    mu2: f64,
    /// Standard deviation of the second mode
    #[arg(long, default_value_t = 1.0)]
    sigma2: f64,
    /// Number of samples to generate
    #[arg(long, default_value_t = 10000)]
    num_samples: usize,
    /// Seed for reproducible output (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &GenerateArg) -> anyhow::Result<()> {
    let GenerateArg {
        mu1,
        sigma1,
        mu2,
        sigma2,
        num_samples,
        seed,
        output,
    } = arg;

    let bimodal = Bimodal::new(*mu1, *sigma1, *mu2, *sigma2)
        .context("Failed to set up the bimodal distribution")?;
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let [mean1, mean2] = bimodal.means();
    eprintln!("Generating {num_samples} samples around {mean1} and {mean2} (seed {seed})...");

    let mut rng = Pcg64::seed_from_u64(seed);
    let samples = bimodal.sample_n(*num_samples, &mut rng);

    let mut output = Output::from_output_path(output.clone())?;
    util::write_samples(&mut output, &samples)?;
    eprintln!("Wrote {} samples to {}", samples.len(), output.display_path());
    Ok(())
}
