//! Measurement results: raw trials, point estimates, ratios, judgements.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::params::Parameters;

/// Raw results of a sampling run.
///
/// `times` and `gctimes` hold one entry per sample, in nanoseconds.
/// Memory figures are per-evaluation and constant across samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Trial {
    pub params: Parameters,
    pub times: Vec<f64>,
    pub gctimes: Vec<f64>,
    pub memory: u64,
    pub allocs: u64,
}

impl Trial {
    /// Create an empty trial for the given parameters.
    pub fn new(params: Parameters) -> Self {
        Self {
            params,
            times: Vec::new(),
            gctimes: Vec::new(),
            memory: 0,
            allocs: 0,
        }
    }

    /// Record one sample.
    pub fn push(&mut self, time: f64, gctime: f64) {
        self.times.push(time);
        self.gctimes.push(gctime);
    }

    /// Number of recorded samples.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether the trial holds no samples.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

/// A single-point summary of a [`Trial`].
#[derive(Debug, Clone, PartialEq)]
pub struct TrialEstimate {
    pub params: Parameters,
    pub time: f64,
    pub gctime: f64,
    pub memory: u64,
    pub allocs: u64,
}

/// The field-wise quotient of two [`TrialEstimate`]s.
///
/// Memory and allocation counts become fractions here, so all four
/// measurement fields are floats.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialRatio {
    pub params: Parameters,
    pub time: f64,
    pub gctime: f64,
    pub memory: f64,
    pub allocs: f64,
}

/// Classification of a ratio against its tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Improvement,
    Invariant,
    Regression,
}

impl Verdict {
    /// Canonical lowercase name, as carried in saved archives.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Improvement => "improvement",
            Self::Invariant => "invariant",
            Self::Regression => "regression",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognized verdict name.
#[derive(Debug, Error)]
#[error("unknown verdict: {0}")]
pub struct ParseVerdictError(pub String);

impl FromStr for Verdict {
    type Err = ParseVerdictError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "improvement" => Ok(Self::Improvement),
            "invariant" => Ok(Self::Invariant),
            "regression" => Ok(Self::Regression),
            other => Err(ParseVerdictError(other.to_owned())),
        }
    }
}

/// A [`TrialRatio`] classified against the tolerances it was collected
/// under.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialJudgement {
    pub ratio: TrialRatio,
    pub time: Verdict,
    pub memory: Verdict,
}

impl TrialJudgement {
    /// Classify a ratio using the tolerances recorded in its parameters.
    pub fn judge(ratio: TrialRatio) -> Self {
        let time = classify(ratio.time, ratio.params.time_tolerance);
        let memory = classify(ratio.memory, ratio.params.memory_tolerance);
        Self {
            ratio,
            time,
            memory,
        }
    }
}

fn classify(value: f64, tolerance: f64) -> Verdict {
    if value - 1.0 > tolerance {
        Verdict::Regression
    } else if 1.0 - value > tolerance {
        Verdict::Improvement
    } else {
        Verdict::Invariant
    }
}
