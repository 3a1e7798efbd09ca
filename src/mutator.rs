//! The `Mutator` evaluator (spec.md §3 "Mutator", §4.6 tail, §4.7): ties the
//! delta table, axis index and factor engine together into the public
//! `make_instance`/`get_instance` entry points.

use crate::algebra::{Algebra, PairMask};
use crate::axis::AxisIndex;
use crate::delta::DeltaTable;
use crate::error::MutatorError;
use crate::factor;
use crate::limits;
use crate::location::{AxisClass, Location};
use crate::query::Query;

/// One surviving `(factor, name, location)` record from a `get_instance`
/// call, returned for diagnostics when the caller asks for factors
/// (spec.md §6 `getInstance(..., getFactors?)`).
#[derive(Debug, Clone)]
pub struct FactorRecord {
    pub factor: f64,
    pub name: Option<String>,
    pub location: Location,
}

/// Calculator for multi-dimensional interpolations (spec.md §3 "Mutator").
///
/// Built once — either through the stepwise [`Mutator::set_neutral`] /
/// [`Mutator::add_delta`] pair or in one shot via [`crate::builder::build`]
/// — then queried read-only. The axis index is rebuilt eagerly at the end
/// of construction (spec.md §9's "precompute at construction" redesign
/// note), not lazily on first query, so a built `Mutator` is safe to share
/// across threads behind an `Arc` without further synchronisation.
#[derive(Debug, Clone)]
pub struct Mutator<O> {
    neutral: Option<O>,
    bias: Location,
    deltas: DeltaTable<O>,
    axis_index: AxisIndex,
}

impl<O: Algebra> Default for Mutator<O> {
    fn default() -> Self {
        Mutator {
            neutral: None,
            bias: Location::origin(),
            deltas: DeltaTable::new(),
            axis_index: AxisIndex::default(),
        }
    }
}

impl<O: Algebra> Mutator<O> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The location of the neutral, used as the origin of the delta
    /// coordinate system.
    pub fn bias(&self) -> &Location {
        &self.bias
    }

    pub fn set_bias(&mut self, bias: Location) {
        self.bias = bias;
    }

    pub fn neutral(&self) -> Option<&O> {
        self.neutral.as_ref()
    }

    /// Set the neutral object and insert the synthetic origin delta
    /// (spec.md §3's Mutator invariant: "exactly one delta exists at the
    /// origin location; its object is the zero of the algebra").
    pub fn set_neutral(&mut self, object: O) {
        let zero = object.zero_like();
        self.neutral = Some(object);
        self.deltas
            .insert(Location::origin(), zero, Some("origin".to_string()));
        self.rebuild_axis_index();
    }

    /// All axis names mentioned by any stored delta (spec.md §6
    /// `getAxisNames`, confirmed against the original source to range over
    /// every delta, not just on-axis ones).
    pub fn axis_names(&self) -> std::collections::BTreeSet<String> {
        self.deltas
            .iter()
            .flat_map(|e| e.location.axis_names().map(str::to_string))
            .collect()
    }

    /// All stored delta locations (spec.md §6 `collectLocations`).
    pub fn collect_locations(&self) -> Vec<Location> {
        self.deltas.locations()
    }

    /// Rebuild the on-axis index from the current delta table. Callers who
    /// mutate the mutator after construction (stepwise `add_delta` calls
    /// outside the builder) are responsible for calling this before the
    /// next query, per spec.md §3's lifecycle note.
    pub fn rebuild_axis_index(&mut self) {
        self.axis_index = AxisIndex::build(&self.deltas);
    }

    /// Insert a delta at `location` (spec.md §4.3).
    ///
    /// * `punch = false` — store `object` as-is; the caller has already
    ///   subtracted the neutral.
    /// * `punch = true` — store `object - get_instance(location, axis_only)`
    ///   so that, once inserted, evaluation at `location` reproduces
    ///   `object` exactly. Fails with [`MutatorError::UninitialisedNeutral`]
    ///   if no neutral has been set yet.
    pub fn add_delta(
        &mut self,
        location: Location,
        object: O,
        name: Option<String>,
        punch: bool,
        axis_only: bool,
    ) -> Result<(), MutatorError> {
        if punch {
            let r = self.get_instance(&location, axis_only)?;
            self.deltas.insert(location, object - r, name);
        } else {
            self.deltas.insert(location, object, name);
        }
        Ok(())
    }

    /// The per-delta factor list for `query`, surviving deltas only, sorted
    /// by factor descending (spec.md §4.6 step 5). `axis_only` excludes
    /// off-axis contributions; the origin delta is omitted only when
    /// `axis_only=false` (the usual case, where the neutral is added back
    /// separately by [`Mutator::make_instance`]) — with `axis_only=true` it
    /// appears with factor 1, per spec.md §4.6's "the origin delta
    /// contributes factor 1 (unconditionally part of every blend) ... When
    /// axis-only=false, the origin delta is omitted from the active set".
    pub fn get_factors(&self, query: &Location, axis_only: bool) -> Result<Vec<FactorRecord>, MutatorError> {
        if self.neutral.is_none() {
            return Err(MutatorError::UninitialisedNeutral);
        }
        let axis_names: Vec<String> = self.axis_names().into_iter().collect();
        let axis_name_refs: Vec<&str> = axis_names.iter().map(String::as_str).collect();
        let query = query.expand(axis_name_refs.iter().copied());
        let locations = self.deltas.locations();
        let limits = limits::compute_limits(&locations, &query);

        let mut out = Vec::new();
        for entry in self.deltas.iter() {
            let delta_loc = entry.location.expand(axis_name_refs.iter().copied());
            let class = delta_loc.axis_class();
            let factor = match &class {
                AxisClass::Origin => {
                    if !axis_only {
                        // The neutral is added back separately by
                        // make_instance; folding a factor-1 zero-object
                        // entry into the active set here would be a no-op
                        // for get_instance's sum but would misrepresent the
                        // diagnostic factor list for the common query mode.
                        continue;
                    }
                    1.0
                }
                AxisClass::OnAxis(axis) => {
                    let f = query.get(axis);
                    let v = delta_loc.get(axis);
                    factor::on_axis_factor(f, v, self.axis_index.values_on(axis))
                }
                AxisClass::OffAxis => {
                    if axis_only {
                        0.0
                    } else {
                        factor::off_axis_factor(
                            |axis| query.get(axis),
                            |axis| delta_loc.get(axis),
                            &limits,
                        )
                    }
                }
            };
            if factor.abs() <= f64::EPSILON {
                continue;
            }
            out.push(FactorRecord {
                factor,
                name: entry.name.clone(),
                location: entry.location.clone(),
            });
        }
        out.sort_by(|a, b| {
            b.factor
                .partial_cmp(&a.factor)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.location.cmp(&b.location))
        });
        Ok(out)
    }

    /// The lower-level evaluator (spec.md §6 `getInstance`): the weighted
    /// sum of surviving deltas at `query`, without the neutral added back.
    /// Returns the algebra's zero if no delta survives.
    pub fn get_instance(&self, query: &Location, axis_only: bool) -> Result<O, MutatorError> {
        Ok(self.get_instance_with_factors(query, axis_only)?.0)
    }

    /// Like [`Mutator::get_instance`] but also returns the surviving factor
    /// list, for diagnostics (spec.md §6 `getInstance(..., getFactors=true)`).
    pub fn get_instance_with_factors(
        &self,
        query: &Location,
        axis_only: bool,
    ) -> Result<(O, Vec<FactorRecord>), MutatorError> {
        let neutral = self.neutral.as_ref().ok_or(MutatorError::UninitialisedNeutral)?;
        let factors = self.get_factors(query, axis_only)?;
        let mut total: Option<O> = None;
        for record in &factors {
            let entry = self
                .deltas
                .get(&record.location)
                .expect("get_factors only returns locations present in the delta table");
            let contribution = entry.object.clone() * record.factor;
            total = Some(match total {
                None => contribution,
                Some(acc) => acc + contribution,
            });
        }
        Ok((total.unwrap_or_else(|| neutral.zero_like()), factors))
    }

    /// The high-level entry point (spec.md §4.7, §6 `makeInstance`):
    /// interpolate at `query` (relative to the bias) and add the neutral
    /// back. Accepts anything convertible to [`Query`], so callers pass a
    /// plain [`Location`] for the ordinary case or a [`Query::Paired`] for
    /// an ambivalent, glyph-style two-axis query.
    pub fn make_instance(&self, query: impl Into<Query>) -> Result<O, MutatorError> {
        let neutral = self
            .neutral
            .as_ref()
            .ok_or(MutatorError::UninitialisedNeutral)?;
        let object = match query.into() {
            Query::Single(location) => {
                let relative = location.subtract(&self.bias);
                self.get_instance(&relative, false)?
            }
            Query::Paired(x, y) => {
                let rel_x = x.subtract(&self.bias);
                let rel_y = y.subtract(&self.bias);
                let ix = self.get_instance(&rel_x, false)?;
                let iy = self.get_instance(&rel_y, false)?;
                ix * PairMask::X + iy * PairMask::Y
            }
        };
        Ok(object + neutral.clone())
    }
}
