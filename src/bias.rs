//! The bias selector (spec.md §4.2): picks the master location used as the
//! origin of the delta coordinate system, so the remaining masters split
//! cleanly into axis and off-axis groups.

use crate::location::{AxisClass, Location};

/// Count how many of `locations`, once `candidate` is subtracted off, are
/// "clean" (on-axis or at the origin).
fn clean_residual_count(candidate: &Location, locations: &[Location]) -> usize {
    locations
        .iter()
        .filter(|other| {
            matches!(
                other.subtract(candidate).axis_class(),
                AxisClass::Origin | AxisClass::OnAxis(_)
            )
        })
        .count()
}

/// Choose the bias: the location that, subtracted from every other
/// location, maximises the number of clean residuals. Ties break first
/// toward the location closest to the geometric origin, then toward
/// lexicographic order on sorted axis names and coordinates, so selection
/// is deterministic regardless of input order.
///
/// Returns `Location::origin()` if `locations` is empty (the caller
/// — `build()` — is responsible for rejecting empty input before this
/// matters).
pub fn bias_from_locations(locations: &[Location]) -> Location {
    let mut best: Option<(&Location, usize, f64)> = None;
    for candidate in locations {
        let clean = clean_residual_count(candidate, locations);
        let dist = candidate.l2_norm();
        let replace = match &best {
            None => true,
            Some((current, best_clean, best_dist)) => {
                clean > *best_clean
                    || (clean == *best_clean
                        && (dist < *best_dist - f64::EPSILON
                            || ((dist - *best_dist).abs() <= f64::EPSILON && candidate < current)))
            }
        };
        if replace {
            best = Some((candidate, clean, dist));
        }
    }
    best.map(|(loc, _, _)| loc.clone()).unwrap_or_else(Location::origin)
}
