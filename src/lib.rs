//! Multivariate piecewise-linear interpolation over sparse, irregularly
//! placed design-space masters.
//!
//! Given samples ("masters") at known coordinates in an n-dimensional
//! design space, and a query coordinate, this crate produces a weighted
//! blend of the masters that reproduces each master exactly at its own
//! coordinate and interpolates (or extrapolates) linearly between them
//! along each axis. The blended object is opaque to the engine: it only
//! ever needs to support addition, subtraction, and scalar multiplication
//! (see [`Algebra`]).
//!
//! The moving parts, leaves first:
//! - [`Location`] — an axis-name-to-coordinate mapping with the algebra
//!   spec.md §4.1 requires (subtraction, `common`, `expand`, classification).
//! - [`bias::bias_from_locations`] — picks the master used as the
//!   coordinate system's origin.
//! - [`DeltaTable`] / [`AxisIndex`] — store and classify the masters,
//!   expressed as differences from the neutral.
//! - [`limits::compute_limits`] and [`factor`] — the weighting algorithm.
//! - [`Mutator`] / [`build`] — the public evaluator and its construction
//!   pipeline.

pub mod algebra;
pub mod axis;
pub mod bias;
pub mod builder;
pub mod delta;
pub mod error;
pub mod factor;
pub mod limits;
pub mod location;
pub mod mutator;
pub mod query;

pub use algebra::{Algebra, PairMask};
pub use builder::build;
pub use delta::{DeltaEntry, DeltaTable};
pub use error::MutatorError;
pub use location::{AxisClass, Location};
pub use mutator::{FactorRecord, Mutator};
pub use query::Query;
