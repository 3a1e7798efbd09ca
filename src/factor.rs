//! The factor engine (spec.md §4.6): for a query and a delta, produces the
//! scalar weight that delta contributes to the blend.

use std::collections::BTreeMap;

use crate::limits::LimitsTriple;
use crate::location::EPSILON;

/// Piecewise-linear weight of a single on-axis delta at coordinate `v`,
/// given the query's coordinate `f` on the same axis and the sorted,
/// deduplicated list of all on-axis coordinates on that axis (including the
/// origin sentinel).
///
/// Shared shape with [`off_axis_factor`]: bucket the known coordinates into
/// below/at/above relative to `f`, then either snap to an exact match,
/// interpolate between the nearest bracket, or extrapolate off one side.
/// The two routines diverge in their endpoint handling (on-axis has a
/// single sorted value list per axis; off-axis consults the pre-computed
/// limits triple) as spec.md §9 notes, which is why this crate keeps them
/// as separate functions rather than forcing a single `bracket()` helper
/// that would otherwise need a case for every combination of the two.
pub fn on_axis_factor(f: f64, v: f64, axis_values: &[f64]) -> f64 {
    let mut below: Vec<f64> = axis_values.iter().copied().filter(|x| *x < f - EPSILON).collect();
    let mut above: Vec<f64> = axis_values.iter().copied().filter(|x| *x > f + EPSILON).collect();
    let at_mid = axis_values.iter().any(|x| (x - f).abs() <= EPSILON);
    below.sort_by(f64::total_cmp);
    above.sort_by(f64::total_cmp);

    if at_mid {
        return if (v - f).abs() <= EPSILON { 1.0 } else { 0.0 };
    }
    if let (Some(&m_b), Some(&m_a)) = (below.last(), above.first()) {
        if v < m_b - EPSILON || v > m_a + EPSILON {
            return 0.0;
        }
        return if (v - m_a).abs() <= EPSILON {
            (f - m_b) / (m_a - m_b)
        } else if (v - m_b).abs() <= EPSILON {
            (f - m_a) / (m_b - m_a)
        } else {
            0.0
        };
    }
    if below.is_empty() && above.len() >= 2 {
        return if (v - above[1]).abs() <= EPSILON {
            (f - above[0]) / (above[1] - above[0])
        } else if (v - above[0]).abs() <= EPSILON {
            (f - above[1]) / (above[0] - above[1])
        } else {
            0.0
        };
    }
    if above.is_empty() && below.len() >= 2 {
        let n = below.len();
        return if (v - below[n - 2]).abs() <= EPSILON {
            (f - below[n - 1]) / (below[n - 2] - below[n - 1])
        } else if (v - below[n - 1]).abs() <= EPSILON {
            (f - below[n - 2]) / (below[n - 1] - below[n - 2])
        } else {
            0.0
        };
    }
    // A single sample on this axis with the query extrapolating past it:
    // spec.md §7's DegenerateAxis — reported diagnostically, not an error.
    0.0
}

/// The off-axis factor for one delta: the product, over every axis in
/// `limits`, of that axis's sub-factor (spec.md §4.6 step 2, "Off-axis
/// delta").
pub fn off_axis_factor(
    query_at: impl Fn(&str) -> f64,
    delta_at: impl Fn(&str) -> f64,
    limits: &BTreeMap<String, LimitsTriple>,
) -> f64 {
    let mut product = 1.0;
    for (axis, triple) in limits {
        let f = query_at(axis);
        let v = delta_at(axis);
        let (m_b, m, m_a) = triple.as_mb_m_ma();

        if let Some(above) = m_a {
            if v > above {
                return 0.0;
            }
        }
        if let Some(below) = m_b {
            if v < below {
                return 0.0;
            }
        }

        let r = if f < v - EPSILON {
            match (m_b, m, m_a) {
                (None, Some(mid), Some(above)) => {
                    let ratio = (f.max(above) - f.min(above)) / (mid.max(above) - mid.min(above));
                    if (v - mid).abs() <= EPSILON {
                        ratio
                    } else {
                        -(ratio - 1.0)
                    }
                }
                (None, _, _) => 0.0,
                (Some(_), _, None) => 0.0,
                (Some(below), _, Some(above)) => (f - below) / (above - below),
            }
        } else if f > v + EPSILON {
            match (m_b, m, m_a) {
                (None, _, _) => 0.0,
                (Some(below), Some(mid), None) => {
                    let ratio = (f.max(below) - f.min(below)) / (below.max(mid) - below.min(mid));
                    if (v - mid).abs() <= EPSILON {
                        ratio
                    } else {
                        -(ratio - 1.0)
                    }
                }
                (_, _, None) => 0.0,
                (Some(below), _, Some(above)) => (above - f) / (above - below),
            }
        } else {
            1.0
        };
        product *= r;
    }
    product
}
