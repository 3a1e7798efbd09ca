//! Error type for the mutator engine.

/// Failure modes exposed by the public API (spec.md §7).
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum MutatorError {
    /// `build()` computed a bias location but no input item sits exactly there.
    #[error("no master sample found at the computed bias location")]
    NoNeutral,

    /// A query was made before a neutral object was ever set.
    #[error("mutator was queried before its neutral object was set")]
    UninitialisedNeutral,

    /// `build()` was invoked with an empty item list.
    #[error("build() called with no input items")]
    EmptyInput,

    /// A `Location` coordinate was not finite (NaN or infinite).
    #[error("axis {axis:?} has a non-finite coordinate {value}")]
    NonFiniteCoordinate { axis: String, value: f64 },
}
