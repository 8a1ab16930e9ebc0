//! Greedy credible regions for one-dimensional samples.
//!
//! This crate provides:
//!
//! - **Histograms**: equal-width or explicit-edge binning of scalar samples
//! - **Credible regions**: the highest-density set of histogram bins covering
//!   at least a requested probability mass
//! - **Mock data**: a two-Gaussian mixture for generating bimodal samples
//!
//! # Modules
//!
//! - [`histogram`]: Histogram construction and bin specifications
//! - [`credible`]: Greedy credible-region estimation
//! - [`mixture`]: Bimodal sample generator
//! - [`error`]: Argument validation errors
//!
//! # Examples
//!
//! ## Estimating a credible region
//!
//! ```
//! use credible_stats::{credible::CredibleRegion, histogram::BinsSpec};
//!
//! let samples = [1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 3.0, 3.0, 4.0];
//! let region = CredibleRegion::new(&samples, &BinsSpec::Count(4), 0.68).unwrap();
//! assert_eq!(region.mask(), &[true, true, false, false]);
//! assert!(region.covered_mass() >= 0.68);
//! ```
//!
//! ## Bimodal samples give a split region
//!
//! ```
//! use credible_stats::{credible::CredibleRegion, histogram::BinsSpec, mixture::Bimodal};
//! use rand::SeedableRng as _;
//!
//! let bimodal = Bimodal::new(-4.0, 1.0, 4.0, 1.0).unwrap();
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//! let samples = bimodal.sample_n(5000, &mut rng);
//!
//! let region = CredibleRegion::new(&samples, &BinsSpec::default(), 0.68).unwrap();
//! assert!(region.intervals().len() >= 2);
//! ```

pub mod credible;
pub mod error;
pub mod histogram;
pub mod mixture;

pub use self::{
    credible::{CredibleRegion, DEFAULT_LEVEL, greedy_credible_1d},
    error::InvalidArgumentError,
    histogram::{BinsSpec, DEFAULT_NUM_BINS, Histogram},
};
