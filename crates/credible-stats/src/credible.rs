//! Greedy highest-density credible regions over a histogram.
//!
//! # Algorithm
//!
//! 1. Build a [`Histogram`] of the samples
//! 2. Order bin indices by ascending count; equal counts keep ascending bin
//!    index (stable sort)
//! 3. Accumulate counts along that order and divide by the histogram total,
//!    giving each bin the mass of itself plus every bin ranked below it
//! 4. Include a bin iff that cumulative mass is at least `1 - level`
//!
//! Low-count bins are consumed first, so the excluded bins are exactly the
//! longest prefix of the ordering whose mass stays below `1 - level`. The
//! remaining bins are the highest-density bins covering at least `level` of
//! the mass. When counts tie at the margin, the bin with the lower index is
//! the one left out.
//!
//! The region is not required to be contiguous: multi-modal samples produce
//! several disjoint [`CredibleRegion::intervals`].

use std::ops::Range;

use crate::{
    error::InvalidArgumentError,
    histogram::{BinsSpec, Histogram},
};

/// Credible level used when the caller does not choose (one sigma).
pub const DEFAULT_LEVEL: f64 = 0.68;

/// The set of histogram bins forming a greedy credible region.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CredibleRegion {
    level: f64,
    histogram: Histogram,
    mask: Vec<bool>,
}

impl CredibleRegion {
    /// Estimates the credible region of `samples` at the given `level`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgumentError`] if `level` is outside `(0, 1)`, if the
    /// histogram cannot be built, or if no sample falls within explicit edges.
    ///
    /// # Examples
    ///
    /// ```
    /// use credible_stats::{credible::CredibleRegion, histogram::BinsSpec};
    ///
    /// let samples = [1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 3.0, 3.0, 4.0];
    /// let region = CredibleRegion::new(&samples, &BinsSpec::Count(4), 0.68).unwrap();
    /// assert_eq!(region.mask(), &[true, true, false, false]);
    /// assert_eq!(region.intervals(), vec![1.0..2.5]);
    /// ```
    pub fn new(samples: &[f64], bins: &BinsSpec, level: f64) -> Result<Self, InvalidArgumentError> {
        check_level(level)?;
        let histogram = Histogram::new(samples, bins)?;
        Self::from_histogram(histogram, level)
    }

    /// Selects the credible bins of an existing histogram.
    pub fn from_histogram(histogram: Histogram, level: f64) -> Result<Self, InvalidArgumentError> {
        check_level(level)?;
        let total = histogram.total();
        if total == 0 {
            return Err(InvalidArgumentError::NoSamplesInRange);
        }

        let threshold = 1.0 - level;
        let mask = cumulative_mass(histogram.counts(), total)
            .into_iter()
            .map(|mass| mass >= threshold)
            .collect();

        Ok(Self {
            level,
            histogram,
            mask,
        })
    }

    #[must_use]
    pub fn level(&self) -> f64 {
        self.level
    }

    #[must_use]
    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }

    #[must_use]
    pub fn edges(&self) -> &[f64] {
        self.histogram.edges()
    }

    /// One flag per bin; `true` if the bin belongs to the region.
    #[must_use]
    pub fn mask(&self) -> &[bool] {
        &self.mask
    }

    /// Fraction of in-range samples that fall inside the region.
    ///
    /// Always at least [`Self::level`], up to floating-point rounding.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn covered_mass(&self) -> f64 {
        let covered = self
            .histogram
            .counts()
            .iter()
            .zip(&self.mask)
            .filter_map(|(&count, &included)| included.then_some(count))
            .sum::<u64>();
        covered as f64 / self.histogram.total() as f64
    }

    /// Merges runs of adjacent included bins into value ranges.
    ///
    /// Each range starts at the lower edge of its first bin and ends at the
    /// upper edge of its last bin. Ranges are returned in ascending order and
    /// never touch each other.
    #[must_use]
    pub fn intervals(&self) -> Vec<Range<f64>> {
        let edges = self.histogram.edges();
        let mut intervals = vec![];
        let mut run_start = None;
        for (idx, &included) in self.mask.iter().enumerate() {
            match (included, run_start) {
                (true, None) => run_start = Some(idx),
                (false, Some(start)) => {
                    intervals.push(edges[start]..edges[idx]);
                    run_start = None;
                }
                _ => {}
            }
        }
        if let Some(start) = run_start {
            intervals.push(edges[start]..edges[self.mask.len()]);
        }
        intervals
    }

    /// Returns `true` if `value` falls in a bin belonging to the region.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.histogram
            .bin_index(value)
            .is_some_and(|idx| self.mask[idx])
    }

    /// Consumes the region, returning the bin edges and the inclusion mask.
    #[must_use]
    pub fn into_edges_and_mask(self) -> (Vec<f64>, Vec<bool>) {
        let (edges, _counts) = self.histogram.into_parts();
        (edges, self.mask)
    }
}

/// Computes the greedy credible region of `samples` as raw `(edges, mask)`.
///
/// `edges` holds the `B + 1` histogram bin edges and `mask` one flag per bin.
///
/// # Examples
///
/// ```
/// use credible_stats::{credible::greedy_credible_1d, histogram::BinsSpec};
///
/// let samples = [0.2, 0.4, 0.5, 0.6, 1.5, 2.5, 2.6];
/// let bins = BinsSpec::Edges(vec![0.0, 1.0, 2.0, 3.0]);
/// let (edges, mask) = greedy_credible_1d(&samples, &bins, 0.5).unwrap();
/// assert_eq!(edges.len(), mask.len() + 1);
/// assert_eq!(mask, [true, false, false]);
/// ```
pub fn greedy_credible_1d(
    samples: &[f64],
    bins: &BinsSpec,
    level: f64,
) -> Result<(Vec<f64>, Vec<bool>), InvalidArgumentError> {
    CredibleRegion::new(samples, bins, level).map(CredibleRegion::into_edges_and_mask)
}

fn check_level(level: f64) -> Result<(), InvalidArgumentError> {
    // Written so that NaN is rejected
    if level > 0.0 && level < 1.0 {
        Ok(())
    } else {
        Err(InvalidArgumentError::LevelOutOfRange { level })
    }
}

/// Cumulative mass of each bin along the ascending-count order, scattered
/// back to the original bin positions.
#[expect(clippy::cast_precision_loss)]
fn cumulative_mass(counts: &[u64], total: u64) -> Vec<f64> {
    let mut order = (0..counts.len()).collect::<Vec<_>>();
    // Stable: ties keep ascending bin index
    order.sort_by_key(|&idx| counts[idx]);

    let mut mass = vec![0.0; counts.len()];
    let mut running = 0;
    for idx in order {
        running += counts[idx];
        mass[idx] = running as f64 / total as f64;
    }
    mass
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64;

    use super::*;
    use crate::mixture::Bimodal;

    const LEVELS: [f64; 7] = [0.05, 0.3, 0.5, 0.68, 0.9, 0.95, 0.99];

    fn bimodal_samples(seed: u64) -> Vec<f64> {
        let bimodal = Bimodal::new(-5.0, 1.0, 5.0, 1.0).unwrap();
        bimodal.sample_n(10_000, &mut Pcg64::seed_from_u64(seed))
    }

    #[expect(clippy::cast_precision_loss)]
    fn mass_of(region: &CredibleRegion, include: impl Fn(usize) -> bool) -> f64 {
        let counts = region.histogram().counts();
        let selected = (0..counts.len())
            .filter(|&idx| include(idx))
            .map(|idx| counts[idx])
            .sum::<u64>();
        selected as f64 / region.histogram().total() as f64
    }

    #[test]
    fn test_concrete_four_bin_scenario() {
        let samples = [1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 3.0, 3.0, 4.0];
        let region = CredibleRegion::new(&samples, &BinsSpec::Count(4), 0.68).unwrap();

        assert_eq!(region.histogram().counts(), &[4, 3, 2, 1]);
        assert_eq!(region.mask(), &[true, true, false, false]);
        assert!((region.covered_mass() - 0.7).abs() < 1e-12);
        assert_eq!(region.intervals(), vec![1.0..2.5]);
    }

    #[test]
    fn test_mask_matches_edges() {
        let samples = bimodal_samples(3);
        for num_bins in [1, 2, 17, 50, 200] {
            let (edges, mask) =
                greedy_credible_1d(&samples, &BinsSpec::Count(num_bins), DEFAULT_LEVEL).unwrap();
            assert_eq!(mask.len(), num_bins);
            assert_eq!(mask.len(), edges.len() - 1);
        }
    }

    #[test]
    fn test_region_covers_level_and_is_minimal() {
        let samples = bimodal_samples(11);
        for level in LEVELS {
            let region = CredibleRegion::new(&samples, &BinsSpec::Count(50), level).unwrap();
            let covered = region.covered_mass();
            assert!(covered >= level, "level {level}: covered {covered}");

            // Dropping the marginal bin (the lowest-count included bin, lowest
            // index among ties) must leave no more than `level` covered.
            let counts = region.histogram().counts();
            let marginal = (0..counts.len())
                .filter(|&idx| region.mask()[idx])
                .min_by_key(|&idx| counts[idx])
                .unwrap();
            let without = mass_of(&region, |idx| region.mask()[idx] && idx != marginal);
            assert!(without <= level + 1e-12, "level {level}: without {without}");
        }
    }

    #[test]
    fn test_included_bins_outweigh_excluded_bins() {
        let samples = bimodal_samples(5);
        let region = CredibleRegion::new(&samples, &BinsSpec::Count(40), 0.5).unwrap();
        let counts = region.histogram().counts();

        let min_included = (0..counts.len())
            .filter(|&idx| region.mask()[idx])
            .map(|idx| counts[idx])
            .min()
            .unwrap();
        let max_excluded = (0..counts.len())
            .filter(|&idx| !region.mask()[idx])
            .map(|idx| counts[idx])
            .max()
            .unwrap();
        assert!(min_included >= max_excluded);
    }

    #[test]
    fn test_higher_level_never_removes_bins() {
        let samples = bimodal_samples(21);
        let regions = LEVELS
            .iter()
            .map(|&level| CredibleRegion::new(&samples, &BinsSpec::Count(50), level).unwrap())
            .collect::<Vec<_>>();

        for pair in regions.windows(2) {
            let (lower, higher) = (&pair[0], &pair[1]);
            for (small, large) in lower.mask().iter().zip(higher.mask()) {
                assert!(!small || *large, "{} -> {}", lower.level(), higher.level());
            }
        }
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let samples = bimodal_samples(8);
        let first = greedy_credible_1d(&samples, &BinsSpec::Count(50), 0.68).unwrap();
        let second = greedy_credible_1d(&samples, &BinsSpec::Count(50), 0.68).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_identical_samples_fully_included() {
        let samples = [3.25; 12];
        for level in LEVELS {
            let region = CredibleRegion::new(&samples, &BinsSpec::default(), level).unwrap();
            assert_eq!(region.histogram().counts(), &[12]);
            assert!(region.mask().iter().all(|&included| included));
            assert!(region.contains(3.25));
        }
    }

    #[test]
    fn test_identical_large_samples_fully_included() {
        let region = CredibleRegion::new(&[1e17; 5], &BinsSpec::Count(50), 0.68).unwrap();
        assert_eq!(region.mask(), &[true]);
        assert!(region.contains(1e17));
    }

    #[test]
    fn test_samples_spanning_most_of_f64_range() {
        let region = CredibleRegion::new(&[-1e308, 1e308], &BinsSpec::Count(4), 0.68).unwrap();
        assert_eq!(region.mask().len(), 4);
        assert!(region.contains(-1e308));
        assert!(region.contains(1e308));
        assert_eq!(region.covered_mass(), 1.0);
    }

    #[test]
    fn test_ties_exclude_lower_index_first() {
        let samples = [0.5, 0.5, 1.5, 1.5, 2.5, 2.5, 3.5, 3.5, 4.5, 4.5];
        let bins = BinsSpec::Edges(vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        let region = CredibleRegion::new(&samples, &bins, 0.5).unwrap();

        assert_eq!(region.mask(), &[false, false, true, true, true]);
        assert_eq!(region.intervals(), vec![2.0..5.0]);
    }

    #[test]
    fn test_empty_bins_are_excluded() {
        let samples = [0.0, 0.0, 0.0, 10.0, 10.0, 10.0];
        let region = CredibleRegion::new(&samples, &BinsSpec::Count(10), 0.99).unwrap();

        let mut expected = vec![false; 10];
        expected[0] = true;
        expected[9] = true;
        assert_eq!(region.mask(), expected.as_slice());
        assert_eq!(region.intervals(), vec![0.0..1.0, 9.0..10.0]);
    }

    #[test]
    fn test_bimodal_region_is_disjoint() {
        let samples = bimodal_samples(2);
        let region = CredibleRegion::new(&samples, &BinsSpec::Count(50), 0.68).unwrap();

        let intervals = region.intervals();
        assert!(intervals.len() >= 2, "intervals: {intervals:?}");
        assert!(region.contains(-5.0));
        assert!(region.contains(5.0));
        assert!(!region.contains(0.0));
        for pair in intervals.windows(2) {
            assert!(pair[0].end < pair[1].start);
        }
    }

    #[test]
    fn test_explicit_edges_normalize_by_in_range_samples() {
        let samples = [-100.0, 0.1, 0.2, 0.3, 1.5, 100.0];
        let bins = BinsSpec::Edges(vec![0.0, 1.0, 2.0]);
        let region = CredibleRegion::new(&samples, &bins, 0.7).unwrap();

        assert_eq!(region.histogram().total(), 4);
        assert_eq!(region.mask(), &[true, false]);
        assert!((region.covered_mass() - 0.75).abs() < 1e-12);
        assert!(!region.contains(100.0));
    }

    #[test]
    fn test_rejects_level_out_of_range() {
        let samples = [1.0, 2.0, 3.0];
        for level in [0.0, 1.0, -0.1, 1.5, f64::NAN, f64::INFINITY] {
            let err = CredibleRegion::new(&samples, &BinsSpec::default(), level).unwrap_err();
            assert!(matches!(err, InvalidArgumentError::LevelOutOfRange { .. }));
        }
    }

    #[test]
    fn test_rejects_invalid_inputs() {
        assert_eq!(
            greedy_credible_1d(&[], &BinsSpec::default(), 0.68),
            Err(InvalidArgumentError::EmptySamples)
        );
        assert_eq!(
            greedy_credible_1d(&[1.0, 2.0], &BinsSpec::Count(0), 0.68),
            Err(InvalidArgumentError::ZeroBinCount)
        );
        assert_eq!(
            greedy_credible_1d(&[1.0, 2.0], &BinsSpec::Edges(vec![2.0, 1.0]), 0.68),
            Err(InvalidArgumentError::NonMonotonicEdges { index: 1 })
        );
        assert_eq!(
            greedy_credible_1d(&[5.0, 6.0], &BinsSpec::Edges(vec![0.0, 1.0]), 0.68),
            Err(InvalidArgumentError::NoSamplesInRange)
        );
    }

    #[test]
    fn test_serializes_region() {
        let region = CredibleRegion::new(&[0.0, 0.0, 1.0], &BinsSpec::Count(2), 0.5).unwrap();
        let json = serde_json::to_value(&region).unwrap();
        assert_eq!(json["level"], 0.5);
        assert_eq!(json["mask"], serde_json::json!([true, false]));
        assert_eq!(json["histogram"]["counts"], serde_json::json!([2, 1]));
    }
}
