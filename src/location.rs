//! `Location`: an immutable association from axis name to design-space
//! coordinate (spec.md §3, §4.1).

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::error::MutatorError;

/// Coordinate comparisons use `|a - b| <= EPSILON`, per spec.md §5.
pub const EPSILON: f64 = f64::EPSILON;

pub(crate) fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPSILON
}

/// The three outcomes of classifying a location relative to the axes
/// (spec.md §4.1: "three distinct values that drive classification
/// elsewhere").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AxisClass {
    /// Every coordinate is zero.
    Origin,
    /// Exactly one coordinate is non-zero, on the named axis.
    OnAxis(String),
    /// Two or more coordinates are non-zero.
    OffAxis,
}

/// A finite mapping from axis name to coordinate. Absent axes are
/// semantically equivalent to coordinate `0.0` for every operation below.
#[derive(Debug, Clone, Default)]
pub struct Location(BTreeMap<String, f64>);

impl Location {
    /// The origin: every axis at zero.
    pub fn origin() -> Self {
        Location(BTreeMap::new())
    }

    /// Build a location from `(axis, coordinate)` pairs. Rejects non-finite
    /// coordinates up front so every other operation can assume finiteness.
    pub fn new<I, S>(pairs: I) -> Result<Self, MutatorError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut map = BTreeMap::new();
        for (axis, value) in pairs {
            let axis = axis.into();
            if !value.is_finite() {
                return Err(MutatorError::NonFiniteCoordinate { axis, value });
            }
            map.insert(axis, value);
        }
        Ok(Location(map))
    }

    /// The coordinate on `axis`, or `0.0` if the axis is absent.
    pub fn get(&self, axis: &str) -> f64 {
        *self.0.get(axis).unwrap_or(&0.0)
    }

    /// The axis names this location explicitly mentions (zero or not).
    pub fn axis_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `true` if every coordinate is (within epsilon of) zero.
    pub fn is_origin(&self) -> bool {
        self.0.values().all(|v| v.abs() <= EPSILON)
    }

    /// Classify this location: origin, on a single axis, or off-axis.
    pub fn axis_class(&self) -> AxisClass {
        let mut nonzero = self.0.iter().filter(|(_, v)| v.abs() > EPSILON);
        match (nonzero.next(), nonzero.next()) {
            (None, _) => AxisClass::Origin,
            (Some((name, _)), None) => AxisClass::OnAxis(name.clone()),
            (Some(_), Some(_)) => AxisClass::OffAxis,
        }
    }

    /// Per-axis difference `self - other`, over the union of axes mentioned
    /// by either operand. Zero results are retained (not dropped) so
    /// downstream classifiers see the original axis set.
    pub fn subtract(&self, other: &Location) -> Location {
        let mut map = self.0.clone();
        for (axis, value) in &other.0 {
            let entry = map.entry(axis.clone()).or_insert(0.0);
            *entry -= value;
        }
        for axis in self.0.keys() {
            map.entry(axis.clone()).or_insert_with(|| self.get(axis));
        }
        Location(map)
    }

    /// Ensure every axis in `names` is present, inserting `0.0` where absent.
    pub fn expand<'a, I: IntoIterator<Item = &'a str>>(&self, names: I) -> Location {
        let mut map = self.0.clone();
        for name in names {
            map.entry(name.to_string()).or_insert(0.0);
        }
        Location(map)
    }

    /// Returns the axes `self` and `other` both explicitly mention, each
    /// projected onto those axes (spec.md §4.1). `None` if there is no such
    /// axis.
    ///
    /// Membership is by explicit key, not by non-zero value: a master built
    /// with an explicit zero coordinate on an axis (as `subtract` produces
    /// for every axis either operand mentions) still counts as mentioning
    /// that axis. This is what makes `getLimits`-style callers see "query
    /// pop=0 against a master at pop=0" as a relevant, exactly-matching
    /// axis rather than a blind spot — confirmed against
    /// `mutatorMath.objects.mutator`'s `test_getLimits` doctest, which
    /// would otherwise be unreachable (see spec.md §8 scenario 5 and
    /// DESIGN.md).
    pub fn common(&self, other: &Location) -> Option<(Location, Location)> {
        let mut a = BTreeMap::new();
        let mut b = BTreeMap::new();
        for axis in self.0.keys() {
            if let Some(&ov) = other.0.get(axis) {
                a.insert(axis.clone(), self.get(axis));
                b.insert(axis.clone(), ov);
            }
        }
        if a.is_empty() {
            None
        } else {
            Some((Location(a), Location(b)))
        }
    }

    /// Euclidean distance from the geometric origin, used by bias
    /// tie-breaking (spec.md §4.2).
    pub fn l2_norm(&self) -> f64 {
        self.0.values().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// A deterministic, totally-ordered canonical form: the location's
    /// non-zero `(axis, coordinate)` pairs in axis-name order. Used both as
    /// a `BTreeMap`-free equality/ordering key and as spec.md §4.2's
    /// "lexicographic order on sorted axis names then coordinates"
    /// tie-break.
    fn canonical(&self) -> Vec<(&str, f64)> {
        self.0
            .iter()
            .filter(|(_, v)| v.abs() > EPSILON)
            .map(|(k, v)| (k.as_str(), *v))
            .collect()
    }
}

/// Two locations are equal iff their non-zero coordinate sets are equal
/// (spec.md §3), not iff their underlying maps are identical.
impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}
impl Eq for Location {}

impl PartialOrd for Location {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Location {
    fn cmp(&self, other: &Self) -> Ordering {
        let a = self.canonical();
        let b = other.canonical();
        for (x, y) in a.iter().zip(b.iter()) {
            match x.0.cmp(y.0) {
                Ordering::Equal => {}
                ord => return ord,
            }
            match x.1.partial_cmp(&y.1).unwrap_or(Ordering::Equal) {
                Ordering::Equal => {}
                ord => return ord,
            }
        }
        a.len().cmp(&b.len())
    }
}
