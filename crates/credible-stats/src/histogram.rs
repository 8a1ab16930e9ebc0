use std::ops::Range;

use crate::error::InvalidArgumentError;

/// Number of equal-width bins used when the caller does not choose.
pub const DEFAULT_NUM_BINS: usize = 50;

/// How the sample range is divided into histogram bins.
///
/// # Examples
///
/// ```
/// use credible_stats::histogram::BinsSpec;
///
/// assert_eq!(BinsSpec::default(), BinsSpec::Count(50));
/// assert_eq!(BinsSpec::from(4), BinsSpec::Count(4));
/// assert_eq!(
///     BinsSpec::from(vec![0.0, 1.0, 2.0]),
///     BinsSpec::Edges(vec![0.0, 1.0, 2.0])
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum BinsSpec {
    /// A number of equal-width bins spanning `[min(samples), max(samples)]`.
    Count(usize),
    /// Explicit bin edges; must be finite and strictly increasing.
    Edges(Vec<f64>),
}

impl Default for BinsSpec {
    fn default() -> Self {
        Self::Count(DEFAULT_NUM_BINS)
    }
}

impl From<usize> for BinsSpec {
    fn from(count: usize) -> Self {
        Self::Count(count)
    }
}

impl From<Vec<f64>> for BinsSpec {
    fn from(edges: Vec<f64>) -> Self {
        Self::Edges(edges)
    }
}

/// A histogram of scalar samples over ascending bin edges.
///
/// Holds `B + 1` strictly increasing edges and `B` counts. Every bin is
/// half-open (`[lo, hi)`) except the last, which also includes its upper edge.
/// Samples outside `[edges[0], edges[B]]` are not counted, so [`Self::total`]
/// may be smaller than the number of samples when explicit edges are used.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Histogram {
    edges: Vec<f64>,
    counts: Vec<u64>,
}

/// A single bin in a histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    /// The range of values covered by this bin (inclusive start, exclusive end,
    /// except for the last bin whose end is inclusive).
    pub range: Range<f64>,
    /// The number of samples that fall within this bin.
    pub count: u64,
}

impl Histogram {
    /// Builds a histogram of `samples` according to `bins`.
    ///
    /// With [`BinsSpec::Count`], `n + 1` evenly spaced edges span the sample
    /// range and the last edge equals the sample maximum exactly. When all
    /// samples are equal to `x`, the range cannot be divided and a single bin
    /// `[x - 0.5, x + 0.5]` is produced instead, narrowed to the neighboring
    /// representable values where `x` is too large for half a unit to register.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgumentError`] if `samples` is empty or contains a
    /// non-finite value, if the bin count is zero, if the sample range is too
    /// narrow to hold the requested number of distinct edges, or if explicit
    /// edges are not finite and strictly increasing.
    ///
    /// # Examples
    ///
    /// ```
    /// use credible_stats::histogram::{BinsSpec, Histogram};
    ///
    /// let samples = [1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 3.0, 3.0, 4.0];
    /// let histogram = Histogram::new(&samples, &BinsSpec::Count(4)).unwrap();
    /// assert_eq!(histogram.edges(), &[1.0, 1.75, 2.5, 3.25, 4.0]);
    /// assert_eq!(histogram.counts(), &[4, 3, 2, 1]);
    /// ```
    pub fn new(samples: &[f64], bins: &BinsSpec) -> Result<Self, InvalidArgumentError> {
        if samples.is_empty() {
            return Err(InvalidArgumentError::EmptySamples);
        }
        if let Some((index, &value)) = samples.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(InvalidArgumentError::NonFiniteSample { index, value });
        }

        let edges = match bins {
            BinsSpec::Count(num_bins) => uniform_edges(samples, *num_bins)?,
            BinsSpec::Edges(edges) => {
                validate_edges(edges)?;
                edges.clone()
            }
        };

        Ok(Self::count_samples(samples, edges))
    }

    /// Counts `samples` into bins delimited by already validated `edges`.
    fn count_samples(samples: &[f64], edges: Vec<f64>) -> Self {
        let mut counts = vec![0; edges.len() - 1];
        for &val in samples {
            if let Some(idx) = locate(&edges, val) {
                counts[idx] += 1;
            }
        }

        Self { edges, counts }
    }

    /// Returns the index of the bin containing `value`, or `None` if it lies
    /// outside the histogram range.
    ///
    /// # Examples
    ///
    /// ```
    /// use credible_stats::histogram::{BinsSpec, Histogram};
    ///
    /// let histogram = Histogram::new(&[0.0, 4.0], &BinsSpec::Count(4)).unwrap();
    /// assert_eq!(histogram.bin_index(0.0), Some(0));
    /// assert_eq!(histogram.bin_index(1.0), Some(1));
    /// assert_eq!(histogram.bin_index(4.0), Some(3));
    /// assert_eq!(histogram.bin_index(4.5), None);
    /// ```
    #[must_use]
    pub fn bin_index(&self, value: f64) -> Option<usize> {
        locate(&self.edges, value)
    }

    /// The `B + 1` bin edges in ascending order.
    #[must_use]
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// The `B` bin counts, in bin order.
    #[must_use]
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    #[must_use]
    pub fn num_bins(&self) -> usize {
        self.counts.len()
    }

    /// Number of samples that fell inside the histogram range.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Consumes the histogram, returning its edges and counts.
    #[must_use]
    pub fn into_parts(self) -> (Vec<f64>, Vec<u64>) {
        (self.edges, self.counts)
    }

    /// Iterates over the bins with their value ranges.
    pub fn bins(&self) -> impl Iterator<Item = HistogramBin> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(edge, &count)| HistogramBin {
                range: edge[0]..edge[1],
                count,
            })
    }
}

fn locate(edges: &[f64], value: f64) -> Option<usize> {
    let num_bins = edges.len() - 1;
    // NaN fails both comparisons and is rejected here too
    if !(edges[0] <= value && value <= edges[num_bins]) {
        return None;
    }
    // The first edge strictly above `value` closes its bin; the upper edge
    // itself belongs to the last bin.
    let idx = edges.partition_point(|&edge| edge <= value) - 1;
    Some(idx.min(num_bins - 1))
}

#[expect(clippy::cast_precision_loss)]
fn uniform_edges(samples: &[f64], num_bins: usize) -> Result<Vec<f64>, InvalidArgumentError> {
    if num_bins == 0 {
        return Err(InvalidArgumentError::ZeroBinCount);
    }

    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max <= min {
        // Every sample is identical
        return Ok(degenerate_edges(min));
    }

    // Interpolate each edge from the endpoints: `max - min` itself may
    // overflow, and accumulating a width would drift.
    let n = num_bins as f64;
    let mut edges = (0..num_bins)
        .map(|idx| {
            let t = idx as f64 / n;
            min * (1.0 - t) + max * t
        })
        .collect::<Vec<_>>();
    edges.push(max);

    if !edges.is_sorted_by(|a, b| a < b) {
        return Err(InvalidArgumentError::RangeTooNarrow { min, max, num_bins });
    }
    Ok(edges)
}

/// Single bin around `value`, half a unit wide on each side where possible.
fn degenerate_edges(value: f64) -> Vec<f64> {
    let mut lower = value - 0.5;
    if lower >= value {
        lower = value.next_down();
    }
    let mut upper = value + 0.5;
    if upper <= value {
        upper = value.next_up();
    }
    // Stepping past `f64::MAX` overflows; the closed last bin still holds `value`
    if !lower.is_finite() {
        lower = value;
    }
    if !upper.is_finite() {
        upper = value;
    }
    vec![lower, upper]
}

fn validate_edges(edges: &[f64]) -> Result<(), InvalidArgumentError> {
    if edges.len() < 2 {
        return Err(InvalidArgumentError::TooFewEdges { len: edges.len() });
    }
    if let Some((index, &value)) = edges.iter().enumerate().find(|(_, edge)| !edge.is_finite()) {
        return Err(InvalidArgumentError::NonFiniteEdge { index, value });
    }
    if let Some(index) = edges.windows(2).position(|pair| pair[0] >= pair[1]) {
        return Err(InvalidArgumentError::NonMonotonicEdges { index: index + 1 });
    }
    Ok(())
}
