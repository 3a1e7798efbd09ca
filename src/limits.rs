//! The limits computer (spec.md §4.5): for a query location and the set of
//! all master locations, determines per-dimension the nearest bracketing
//! master coordinates that constrain the off-axis blend.

use std::collections::BTreeMap;

use crate::location::{Location, EPSILON};

/// The nearest `below`/`at`/`above` master coordinates bracketing a query
/// on one axis (spec.md GLOSSARY "Limits triple"). The four shapes below
/// mirror the four cases `MutatorMath`'s `getLimits` actually produces;
/// see DESIGN.md for how the positionally-overloaded `(below, at, above)`
/// tuple in the original source maps onto these named variants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LimitsTriple {
    /// A master sits exactly on the query's coordinate on this axis.
    ExactMatch(f64),
    /// The query lies strictly between two bracketing masters.
    Bracketed { below: f64, above: f64 },
    /// The query is below every master on this axis; extrapolate using the
    /// two nearest masters above it (`near` closest, `far` second-closest).
    ExtrapolateBelow { near: f64, far: f64 },
    /// The query is above every master on this axis; extrapolate using the
    /// two nearest masters below it (`near` closest, `far` second-closest).
    ExtrapolateAbove { near: f64, far: f64 },
}

impl LimitsTriple {
    /// The `(below, mid, above)` positional form the off-axis factor
    /// routine is written against, matching the original source's
    /// `mB, M, mA` unpacking.
    pub(crate) fn as_mb_m_ma(&self) -> (Option<f64>, Option<f64>, Option<f64>) {
        match *self {
            LimitsTriple::ExactMatch(at) => (None, Some(at), None),
            LimitsTriple::Bracketed { below, above } => (Some(below), None, Some(above)),
            LimitsTriple::ExtrapolateBelow { near, far } => (None, Some(near), Some(far)),
            LimitsTriple::ExtrapolateAbove { near, far } => (Some(far), Some(near), None),
        }
    }
}

#[derive(Debug, Default)]
struct RawLimit {
    below: Vec<f64>,
    at: Vec<f64>,
    above: Vec<f64>,
}

/// Sort and collapse values within `EPSILON` of each other, mirroring the
/// original source's value-keyed dicts (`limit[name]['>'][value]`): two
/// masters sharing a coordinate on an axis contribute one bucket, not two.
fn sorted_dedup(mut values: Vec<f64>) -> Vec<f64> {
    values.sort_by(f64::total_cmp);
    values.dedup_by(|a, b| (*a - *b).abs() <= EPSILON);
    values
}

impl RawLimit {
    fn into_triple(mut self) -> Option<LimitsTriple> {
        self.below = sorted_dedup(std::mem::take(&mut self.below));
        self.above = sorted_dedup(std::mem::take(&mut self.above));
        let lim_min = self.below.last().copied();
        let lim_max = self.above.first().copied();
        match (lim_min, lim_max) {
            (None, Some(_)) => {
                if let Some(&at) = self.at.first() {
                    Some(LimitsTriple::ExactMatch(at))
                } else if self.above.len() > 1 {
                    Some(LimitsTriple::ExtrapolateBelow {
                        near: self.above[0],
                        far: self.above[1],
                    })
                } else {
                    None
                }
            }
            (Some(_), None) => {
                if let Some(&at) = self.at.first() {
                    Some(LimitsTriple::ExactMatch(at))
                } else if self.below.len() > 1 {
                    let n = self.below.len();
                    Some(LimitsTriple::ExtrapolateAbove {
                        near: self.below[n - 1],
                        far: self.below[n - 2],
                    })
                } else {
                    None
                }
            }
            (Some(below), Some(above)) => {
                if let Some(&at) = self.at.first() {
                    Some(LimitsTriple::ExactMatch(at))
                } else {
                    Some(LimitsTriple::Bracketed { below, above })
                }
            }
            (None, None) => self.at.first().copied().map(LimitsTriple::ExactMatch),
        }
    }
}

/// For every axis shared (in the `Location::common` sense) between `query`
/// and at least one of `locations`, compute its bracketing triple. `query`
/// should already be expanded (`Location::expand`) to the full set of axis
/// names the mutator knows about, so that every master's own axes are seen
/// as shared — see `Location::common`'s docs. Axes no master mentions at
/// all are absent from the result.
pub fn compute_limits(locations: &[Location], query: &Location) -> BTreeMap<String, LimitsTriple> {
    let mut raw: BTreeMap<String, RawLimit> = BTreeMap::new();
    for l in locations {
        let (a, b) = match query.common(l) {
            Some(pair) => pair,
            None => continue,
        };
        for axis in b.axis_names().map(str::to_string).collect::<Vec<_>>() {
            let f = a.get(&axis);
            let value = b.get(&axis);
            let raw_limit = raw.entry(axis).or_insert_with(|| {
                let mut r = RawLimit::default();
                if f > EPSILON {
                    r.below.push(0.0);
                } else if f < -EPSILON {
                    r.above.push(0.0);
                } else {
                    r.at.push(0.0);
                }
                r
            });
            if f < value - EPSILON {
                raw_limit.above.push(value);
            } else if f > value + EPSILON {
                raw_limit.below.push(value);
            } else {
                raw_limit.at.push(value);
            }
        }
    }
    raw.into_iter()
        .filter_map(|(axis, r)| r.into_triple().map(|t| (axis, t)))
        .collect()
}
