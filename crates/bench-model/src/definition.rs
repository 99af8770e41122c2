//! Executable benchmark definitions.

use std::fmt;
use std::sync::Arc;

use crate::params::Parameters;
use crate::trial::Trial;

/// An executable benchmark specification.
///
/// A definition pairs a name with the closure that runs the benchmark
/// and produces a [`Trial`]. Because it carries executable behavior,
/// a definition can exist only in memory: the archive format rejects
/// it in both directions.
#[derive(Clone)]
pub struct Definition {
    name: String,
    run: Arc<dyn Fn(&Parameters) -> Trial + Send + Sync>,
}

impl Definition {
    /// Create a definition from a name and a benchmark body.
    pub fn new<F>(name: impl Into<String>, run: F) -> Self
    where
        F: Fn(&Parameters) -> Trial + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            run: Arc::new(run),
        }
    }

    /// The definition's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Execute the benchmark under the given parameters.
    pub fn run(&self, params: &Parameters) -> Trial {
        (self.run)(params)
    }
}

impl fmt::Debug for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Definition")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

// Two definitions with the same name are the same benchmark; the
// closure itself has no usable notion of equality.
impl PartialEq for Definition {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}
