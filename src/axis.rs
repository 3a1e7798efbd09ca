//! The axis classifier: partitions stored deltas into on-axis sets (indexed
//! by axis name) and off-axis sets (spec.md §4.4).

use std::collections::BTreeMap;

use itertools::Itertools;

use crate::algebra::Algebra;
use crate::delta::DeltaTable;
use crate::location::{AxisClass, EPSILON};

/// For each axis name, the sorted, deduplicated list of coordinates at
/// which an on-axis master sits, plus the synthetic `(axis, 0)` sentinel
/// that represents the origin when evaluating that axis (spec.md §3's
/// Mutator invariant, §4.4).
///
/// Built once, eagerly, at the end of `build()` (spec.md §9's "precompute
/// this at construction" redesign note) rather than lazily on first query.
#[derive(Debug, Clone, Default)]
pub struct AxisIndex(BTreeMap<String, Vec<f64>>);

impl AxisIndex {
    /// Walk `table`, bucketing on-axis deltas by axis name. Off-axis and
    /// origin deltas are skipped here; origin deltas are handled separately
    /// via the synthetic sentinel below.
    pub fn build<O: Algebra>(table: &DeltaTable<O>) -> Self {
        let mut raw: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for entry in table.iter() {
            if let AxisClass::OnAxis(axis) = entry.location.axis_class() {
                raw.entry(axis.clone()).or_default().push(entry.location.get(&axis));
            }
        }
        let map = raw
            .into_iter()
            .map(|(axis, mut values)| {
                if !values.iter().any(|v| v.abs() <= EPSILON) {
                    values.push(0.0);
                }
                let values = values
                    .into_iter()
                    .sorted_by(f64::total_cmp)
                    .dedup_by(|a, b| (*a - *b).abs() <= EPSILON)
                    .collect();
                (axis, values)
            })
            .collect();
        AxisIndex(map)
    }

    /// The sorted on-axis coordinates for `axis`, including the origin
    /// sentinel. Empty if no delta lies on this axis at all.
    pub fn values_on(&self, axis: &str) -> &[f64] {
        self.0.get(axis).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All axis names carrying at least one on-axis delta.
    pub fn axis_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}
