//! End-to-end scenarios from spec.md §8: literal inputs and expected
//! outputs against a minimal `f64`-backed algebra, since the engine treats
//! the interpolated object as opaque.

use mutator::{build, Algebra, Location, Mutator, PairMask};
use pretty_assertions::assert_eq;
use std::ops::{Add, Mul, Sub};

/// A value with two independent slots, so `Mul<PairMask>` actually tracks
/// which half of an ambivalent query a contribution came from instead of
/// collapsing `PairMask::X` and `PairMask::Y` to the same result.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Value {
    x: f64,
    y: f64,
}

impl Value {
    /// A plain (non-ambivalent) value: both slots hold the same number.
    fn new(v: f64) -> Value {
        Value { x: v, y: v }
    }
}

impl Add for Value {
    type Output = Value;
    fn add(self, rhs: Value) -> Value {
        Value { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}
impl Sub for Value {
    type Output = Value;
    fn sub(self, rhs: Value) -> Value {
        Value { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}
impl Mul<f64> for Value {
    type Output = Value;
    fn mul(self, rhs: f64) -> Value {
        Value { x: self.x * rhs, y: self.y * rhs }
    }
}
impl Mul<PairMask> for Value {
    type Output = Value;
    fn mul(self, mask: PairMask) -> Value {
        Value { x: self.x * mask.0, y: self.y * mask.1 }
    }
}
impl Algebra for Value {
    fn zero_like(&self) -> Value {
        Value::new(0.0)
    }
}

fn loc(pairs: &[(&str, f64)]) -> Location {
    Location::new(pairs.iter().map(|&(a, v)| (a, v))).unwrap()
}

/// Asserts a non-ambivalent result: both slots should carry the same value.
fn assert_approx(actual: Value, expected: f64) {
    assert_approx_eq::assert_approx_eq!(actual.x, expected, 1e-9);
    assert_approx_eq::assert_approx_eq!(actual.y, expected, 1e-9);
}

/// Scenario 1: single axis `pop`, master `(pop=1) -> 100`.
#[test]
fn scenario_single_axis() {
    let mut m: Mutator<Value> = Mutator::new();
    m.set_neutral(Value::new(0.0));
    m.add_delta(loc(&[("pop", 1.0)]), Value::new(100.0), Some("master".into()), false, true)
        .unwrap();
    m.rebuild_axis_index();

    assert_approx(m.make_instance(loc(&[("pop", 0.5)])).unwrap(), 50.0);
    assert_approx(m.make_instance(loc(&[("pop", 1.0)])).unwrap(), 100.0);
    assert_approx(m.make_instance(loc(&[("pop", -1.0)])).unwrap(), -100.0);
    assert_approx(m.make_instance(loc(&[("pop", 2.0)])).unwrap(), 200.0);
}

/// Scenario 2: two axes `pop`, `snap`, masters `(pop=1)->100`,
/// `(snap=1)->-100`.
#[test]
fn scenario_two_axes() {
    let mut m: Mutator<Value> = Mutator::new();
    m.set_neutral(Value::new(0.0));
    m.add_delta(loc(&[("pop", 1.0)]), Value::new(100.0), Some("pop".into()), false, true)
        .unwrap();
    m.add_delta(loc(&[("snap", 1.0)]), Value::new(-100.0), Some("snap".into()), false, true)
        .unwrap();
    m.rebuild_axis_index();

    assert_approx(m.make_instance(loc(&[("pop", 1.0), ("snap", 1.0)])).unwrap(), 0.0);
    assert_approx(m.make_instance(loc(&[("pop", 2.0), ("snap", 0.0)])).unwrap(), 200.0);
    assert_approx(m.make_instance(loc(&[("pop", 0.0), ("snap", 2.0)])).unwrap(), -200.0);
}

/// Scenario 3: two axes with an off-axis punch master at
/// `(pop=1,snap=1)` of value `50` (punched).
#[test]
fn scenario_two_axes_off_axis_punch() {
    let mut m: Mutator<Value> = Mutator::new();
    m.set_neutral(Value::new(0.0));
    m.add_delta(loc(&[("pop", 1.0)]), Value::new(100.0), Some("pop".into()), false, true)
        .unwrap();
    m.add_delta(loc(&[("snap", 1.0)]), Value::new(-100.0), Some("snap".into()), false, true)
        .unwrap();
    m.rebuild_axis_index();
    m.add_delta(
        loc(&[("pop", 1.0), ("snap", 1.0)]),
        Value::new(50.0),
        Some("off-axis".into()),
        true,
        true,
    )
    .unwrap();
    m.rebuild_axis_index();

    assert_approx(m.make_instance(loc(&[("pop", 0.0), ("snap", 0.0)])).unwrap(), 0.0);
    assert_approx(m.make_instance(loc(&[("pop", 1.0), ("snap", 1.0)])).unwrap(), 50.0);
    assert_approx(m.make_instance(loc(&[("pop", 2.0), ("snap", 2.0)])).unwrap(), 200.0);
    assert_approx(m.make_instance(loc(&[("pop", 1.0), ("snap", 0.0)])).unwrap(), 100.0);
}

/// Scenario 4: builder with a 3x2 grid of masters. Run with
/// `RUST_LOG=debug` to see `build()`'s bias and delta-count log line.
#[test]
fn scenario_builder_grid() {
    let _ = env_logger::builder().is_test(true).try_init();
    let items = vec![
        (loc(&[("pop", 1.0), ("snap", 1.0)]), Value::new(1.0)),
        (loc(&[("pop", 2.0), ("snap", 1.0)]), Value::new(2.0)),
        (loc(&[("pop", 3.0), ("snap", 1.0)]), Value::new(3.0)),
        (loc(&[("pop", 1.0), ("snap", 2.0)]), Value::new(4.0)),
        (loc(&[("pop", 2.0), ("snap", 2.0)]), Value::new(5.0)),
        (loc(&[("pop", 3.0), ("snap", 2.0)]), Value::new(6.0)),
    ];
    let (bias, mutator) = build(items).unwrap();
    assert_eq!(bias, loc(&[("pop", 1.0), ("snap", 1.0)]));
    assert_approx(mutator.make_instance(loc(&[("pop", 1.0), ("snap", 1.0)])).unwrap(), 1.0);
    assert_approx(mutator.make_instance(loc(&[("pop", 3.0), ("snap", 2.0)])).unwrap(), 6.0);
    assert_approx(mutator.make_instance(loc(&[("pop", 3.0), ("snap", 1.5)])).unwrap(), 4.5);
}

/// Scenario 6: small-magnitude algebra — verifies the engine introduces no
/// precision artefacts beyond the algebra itself.
#[test]
fn scenario_small_magnitude() {
    let value = 1e-15_f64;
    let mut m: Mutator<Value> = Mutator::new();
    m.set_neutral(Value::new(0.0));
    m.add_delta(loc(&[("pop", 1.0)]), Value::new(value), Some("pop".into()), false, true)
        .unwrap();
    m.add_delta(loc(&[("snap", 1.0)]), Value::new(-value), Some("snap".into()), false, true)
        .unwrap();
    m.rebuild_axis_index();
    m.add_delta(
        loc(&[("pop", 1.0), ("snap", 1.0)]),
        Value::new(0.5 * value),
        Some("off-axis".into()),
        true,
        true,
    )
    .unwrap();
    m.rebuild_axis_index();

    assert_approx(m.make_instance(loc(&[("pop", 0.0), ("snap", 0.0)])).unwrap(), 0.0);
    assert_approx(m.make_instance(loc(&[("pop", 1.0), ("snap", 1.0)])).unwrap(), 5e-16);
    assert_approx(m.make_instance(loc(&[("pop", 2.0), ("snap", 2.0)])).unwrap(), 2e-15);
    assert_approx(m.make_instance(loc(&[("pop", 1.0), ("snap", 0.0)])).unwrap(), 1e-15);
    assert_approx(m.make_instance(loc(&[("pop", 0.0), ("snap", 1.0)])).unwrap(), -1e-15);
}

/// Invariant: making an instance at the bias reproduces the original
/// master exactly (spec.md §8 property 1), and reordering builder input
/// does not change outputs at any query (property 6).
#[test]
fn invariant_reproduction_and_determinism() {
    let items = vec![
        (loc(&[("pop", 1.0), ("snap", 1.0)]), Value::new(1.0)),
        (loc(&[("pop", 2.0), ("snap", 1.0)]), Value::new(2.0)),
        (loc(&[("pop", 3.0), ("snap", 1.0)]), Value::new(3.0)),
        (loc(&[("pop", 1.0), ("snap", 2.0)]), Value::new(4.0)),
        (loc(&[("pop", 2.0), ("snap", 2.0)]), Value::new(5.0)),
        (loc(&[("pop", 3.0), ("snap", 2.0)]), Value::new(6.0)),
    ];
    let (bias, mutator) = build(items.clone()).unwrap();
    for (location, expected) in &items {
        assert_approx(mutator.make_instance(location.clone()).unwrap(), expected.x);
    }
    assert_approx(mutator.make_instance(bias).unwrap(), 1.0);

    let mut reordered = items;
    reordered.reverse();
    let (_, mutator2) = build(reordered).unwrap();
    let q = loc(&[("pop", 3.0), ("snap", 1.5)]);
    assert_eq!(
        mutator.make_instance(q.clone()).unwrap(),
        mutator2.make_instance(q).unwrap()
    );
}

/// Invariant: an ambivalent (paired) query combines two independent
/// single-axis interpolations with the `(1,0)`/`(0,1)` pair-masks
/// (spec.md §4.7). The x-half must come only from the `pop` query and the
/// y-half only from the `snap` query; a mask swap in `make_instance` would
/// instead produce `{x: -100, y: 100}`.
#[test]
fn invariant_ambivalent_query_pair_masks() {
    let mut m: Mutator<Value> = Mutator::new();
    m.set_neutral(Value::new(0.0));
    m.add_delta(loc(&[("pop", 1.0)]), Value::new(100.0), Some("pop".into()), false, true)
        .unwrap();
    m.add_delta(loc(&[("snap", 1.0)]), Value::new(-100.0), Some("snap".into()), false, true)
        .unwrap();
    m.rebuild_axis_index();

    let paired = mutator::Query::Paired(loc(&[("pop", 1.0)]), loc(&[("snap", 1.0)]));
    assert_eq!(m.make_instance(paired).unwrap(), Value { x: 100.0, y: -100.0 });
}
