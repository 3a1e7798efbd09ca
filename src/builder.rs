//! The construction pipeline (spec.md §4.8): decomposes an arbitrary set of
//! `(location, object)` masters into a bias, a neutral, and a populated
//! [`Mutator`].

use crate::algebra::Algebra;
use crate::bias::bias_from_locations;
use crate::error::MutatorError;
use crate::location::{AxisClass, Location};
use crate::mutator::Mutator;

/// Build a mutator from `items`, determining the bias from the given
/// locations (spec.md §4.8, §6 `build`).
///
/// 1. Sort `items` by location for deterministic bias selection regardless
///    of input order (spec.md §8 property 6).
/// 2. Compute the bias.
/// 3. Find the item sitting exactly at the bias and use its object as the
///    neutral; fail with [`MutatorError::NoNeutral`] if none does.
/// 4. Subtract the neutral from every other item and shift its location by
///    `-bias`, classifying it on-axis or off-axis.
/// 5. Insert on-axis deltas first (`punch=false`), then off-axis deltas
///    (`punch=true`), so off-axis masters absorb only what the axis masters
///    don't already explain (confirmed against the original source's two
///    separate insertion loops — see DESIGN.md).
pub fn build<O: Algebra>(mut items: Vec<(Location, O)>) -> Result<(Location, Mutator<O>), MutatorError> {
    if items.is_empty() {
        return Err(MutatorError::EmptyInput);
    }
    items.sort_by(|(a, _), (b, _)| a.cmp(b));

    let locations: Vec<Location> = items.iter().map(|(l, _)| l.clone()).collect();
    let bias = bias_from_locations(&locations);

    let neutral_index = items
        .iter()
        .position(|(loc, _)| loc.subtract(&bias).is_origin())
        .ok_or(MutatorError::NoNeutral)?;
    let (_, neutral_object) = items.remove(neutral_index);

    let mut mutator = Mutator::new();
    mutator.set_bias(bias.clone());
    mutator.set_neutral(neutral_object.clone());

    let mut on_axis = Vec::new();
    let mut off_axis = Vec::new();
    for (loc, object) in items {
        let relative_loc = loc.subtract(&bias);
        let relative_object = object - neutral_object.clone();
        match relative_loc.axis_class() {
            AxisClass::Origin => continue,
            AxisClass::OnAxis(_) => on_axis.push((relative_loc, relative_object)),
            AxisClass::OffAxis => off_axis.push((relative_loc, relative_object)),
        }
    }

    let (on_axis_count, off_axis_count) = (on_axis.len(), off_axis.len());
    for (loc, object) in on_axis {
        mutator.add_delta(loc, object, None, false, true)?;
    }
    mutator.rebuild_axis_index();
    for (loc, object) in off_axis {
        mutator.add_delta(loc, object, None, true, true)?;
    }
    mutator.rebuild_axis_index();

    log::debug!(
        "built mutator: bias={:?}, {} on-axis master(s), {} off-axis master(s)",
        bias,
        on_axis_count,
        off_axis_count
    );

    Ok((bias, mutator))
}
