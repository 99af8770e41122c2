//! Self-describing text archives for benchmark results.
//!
//! This crate persists the `bench-model` value types as a generic
//! type-tagged tree rendered as JSON text, and reconstructs them on
//! load. Recognized domain types travel inside a tagged envelope:
//!
//! ```text
//! { "type_uuid": <32-hex magic constant>,
//!   "type":      <registered type name>,
//!   "versions":  { <component>: <version>, ... },
//!   "fields":    <field mapping, or a sequence for tuples> }
//! ```
//!
//! Scalars and sequences pass through unwrapped, and mappings store
//! self-describing `[key, value]` pairs under placeholder slots so
//! non-string keys survive the string-keyed tree format. Benchmark
//! definitions carry executable behavior and are rejected in both
//! directions.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use bench_archive::{load, save};
//! use bench_model::{BenchValue, Parameters, Trial};
//!
//! let mut trial = Trial::new(Parameters::default());
//! trial.push(10.0, 0.0);
//!
//! save(Path::new("results.benchmarks"), &BenchValue::Trial(trial)).unwrap();
//! let reloaded = load(Path::new("results.benchmarks")).unwrap();
//! ```

mod decode;
mod encode;
mod error;
mod io;
mod registry;

pub use decode::decode;
pub use encode::encode;
pub use error::{ArchiveError, Result};
pub use io::{load, read_archive, save, write_archive};
pub use registry::{
    FIELDS_KEY, FORMAT_MAGIC, FORMAT_TAG_KEY, TYPE_KEY, TypeTag, VERSIONS_KEY, version_info,
};
