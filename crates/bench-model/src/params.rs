//! Sampling parameters attached to every measurement.

/// Parameters controlling how a benchmark is sampled.
///
/// Every measurement type carries the parameters it was collected
/// under, so saved results remain interpretable on reload.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    /// Wall-clock budget for the sampling run, in seconds.
    pub seconds: f64,
    /// Maximum number of samples to collect.
    pub samples: u64,
    /// Evaluations per sample.
    pub evals: u64,
    /// Estimated per-evaluation harness overhead, in nanoseconds.
    pub overhead: f64,
    /// Run a garbage collection before the sampling run.
    pub gctrial: bool,
    /// Run a garbage collection before every sample.
    pub gcsample: bool,
    /// Relative tolerance when comparing times.
    pub time_tolerance: f64,
    /// Relative tolerance when comparing memory usage.
    pub memory_tolerance: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            seconds: 5.0,
            samples: 10_000,
            evals: 1,
            overhead: 0.0,
            gctrial: true,
            gcsample: false,
            time_tolerance: 0.05,
            memory_tolerance: 0.01,
        }
    }
}

impl Parameters {
    /// Create parameters with the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the wall-clock budget in seconds.
    pub fn with_seconds(mut self, seconds: f64) -> Self {
        self.seconds = seconds;
        self
    }

    /// Set the maximum number of samples.
    pub fn with_samples(mut self, samples: u64) -> Self {
        self.samples = samples;
        self
    }

    /// Set the number of evaluations per sample.
    pub fn with_evals(mut self, evals: u64) -> Self {
        self.evals = evals;
        self
    }

    /// Set the comparison tolerances for time and memory.
    pub fn with_tolerances(mut self, time_tolerance: f64, memory_tolerance: f64) -> Self {
        self.time_tolerance = time_tolerance;
        self.memory_tolerance = memory_tolerance;
        self
    }
}
