/// Malformed input to histogram construction or credible-region estimation.
///
/// Every variant is a flavor of "invalid argument": the computation itself is
/// pure and cannot fail once its inputs are well-formed.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum InvalidArgumentError {
    #[display("Sample set is empty")]
    EmptySamples,
    #[display("Sample at index {index} is not finite: {value}")]
    NonFiniteSample { index: usize, value: f64 },
    #[display("Number of bins must be positive")]
    ZeroBinCount,
    #[display("Explicit bin edges need at least 2 values, got {len}")]
    TooFewEdges { len: usize },
    #[display("Bin edge at index {index} is not finite: {value}")]
    NonFiniteEdge { index: usize, value: f64 },
    #[display("Bin edges must be strictly increasing (violated at index {index})")]
    NonMonotonicEdges { index: usize },
    #[display("Sample range [{min}, {max}] is too narrow to split into {num_bins} bins")]
    RangeTooNarrow { min: f64, max: f64, num_bins: usize },
    #[display("Credible level must lie in the open interval (0, 1), got {level}")]
    LevelOutOfRange { level: f64 },
    #[display("No samples fall within the histogram range")]
    NoSamplesInRange,
}
