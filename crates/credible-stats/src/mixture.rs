//! Synthetic bimodal samples for exercising credible-region estimation.
//!
//! The generator draws a fixed half of the samples from each of two normal
//! distributions, producing data whose credible region is typically split
//! into two disjoint intervals.

use rand::Rng;
use rand_distr::{Normal, NormalError};

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum MixtureError {
    #[display("Standard deviation of mode {mode} must not be negative, got {std_dev}")]
    NegativeStdDev { mode: usize, std_dev: f64 },
    #[display("Invalid parameters for mode {mode} (mean {mean}, std dev {std_dev}): {source}")]
    InvalidMode {
        mode: usize,
        mean: f64,
        std_dev: f64,
        source: NormalError,
    },
}

/// An equal-weight mixture of two normal distributions.
///
/// # Examples
///
/// ```
/// use credible_stats::mixture::Bimodal;
/// use rand::SeedableRng as _;
///
/// let bimodal = Bimodal::new(-2.0, 0.5, 3.0, 1.0).unwrap();
/// let mut rng = rand::rngs::StdRng::seed_from_u64(42);
/// let samples = bimodal.sample_n(1001, &mut rng);
/// assert_eq!(samples.len(), 1001);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Bimodal {
    modes: [Normal<f64>; 2],
}

impl Bimodal {
    /// Creates a mixture of `N(mu1, sigma1)` and `N(mu2, sigma2)`.
    ///
    /// Fails if either standard deviation is negative or not finite.
    pub fn new(mu1: f64, sigma1: f64, mu2: f64, sigma2: f64) -> Result<Self, MixtureError> {
        let mode = |mode, mean, std_dev: f64| {
            // `Normal::new` only rejects non-finite deviations
            if std_dev < 0.0 {
                return Err(MixtureError::NegativeStdDev { mode, std_dev });
            }
            Normal::new(mean, std_dev).map_err(|source| MixtureError::InvalidMode {
                mode,
                mean,
                std_dev,
                source,
            })
        };
        Ok(Self {
            modes: [mode(1, mu1, sigma1)?, mode(2, mu2, sigma2)?],
        })
    }

    /// Draws exactly `n` samples: the first `n / 2` from the first mode and the
    /// remaining `n - n / 2` from the second.
    pub fn sample_n<R>(&self, n: usize, rng: &mut R) -> Vec<f64>
    where
        R: Rng + ?Sized,
    {
        let [first, second] = self.modes;
        let first_count = n / 2;
        let mut samples = Vec::with_capacity(n);
        samples.extend((0..first_count).map(|_| rng.sample(first)));
        samples.extend((first_count..n).map(|_| rng.sample(second)));
        samples
    }

    /// Means of the two modes.
    #[must_use]
    pub fn means(&self) -> [f64; 2] {
        self.modes.map(|normal| normal.mean())
    }
}
