//! Data model for benchmark results.
//!
//! This crate defines the closed set of value types a benchmark run
//! produces: sampling [`Parameters`], raw [`Trial`] measurements,
//! [`TrialEstimate`] summaries, [`TrialRatio`] comparisons,
//! [`TrialJudgement`] classifications, and [`Group`] collections, all
//! unified under the [`BenchValue`] sum type. The companion
//! `bench-archive` crate persists these values as self-describing
//! text archives.
//!
//! [`Definition`] is the one deliberately in-memory-only type: it
//! carries the executable benchmark body and can never be archived.

pub mod definition;
pub mod group;
pub mod params;
pub mod trial;
pub mod value;

pub use definition::Definition;
pub use group::Group;
pub use params::Parameters;
pub use trial::{ParseVerdictError, Trial, TrialEstimate, TrialJudgement, TrialRatio, Verdict};
pub use value::{BenchMap, BenchValue};
