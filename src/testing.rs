//! Test utilities for checking reductions.
//!
//! - Approximate comparisons for [`Summary`] and [`StatsAccumulator`], since
//!   additive fields may differ in the last bits between partitionings.
//! - [`split_at_points`] / [`even_partitions`] to cut an input into the
//!   partitions an engine might produce.
//! - [`reduce_partitioned`] to fold each partition and merge in a chosen order.
//! - Reference implementations ([`reference_summary`],
//!   [`reference_order_stats`]) computed the slow, obvious way.
//!
//! ```
//! use ironstats::testing::*;
//! use ironstats::{Describe, CombineFn};
//!
//! let xs = [1.0_f64, 2.0, 3.0, 4.0, 5.0];
//! let d = Describe::<f64>::new();
//! let parts = split_at_points(&xs, &[2, 3]);
//! let acc = reduce_partitioned(&d, &parts);
//! assert_summary_approx_eq(&d.finish(acc), &reference_summary(&xs), 1e-12);
//! ```

use crate::combine::{CombineFn, fold_slice, merge_all};
use crate::combiners::{OrderStats, StatsAccumulator, Summary};
use crate::real::Real;
use num_traits::Float;
use num_traits::float::FloatCore;
use ordered_float::OrderedFloat;

fn close<T: Real>(a: T, b: T, eps: T) -> bool {
    // exact match covers the infinite identity bounds
    a == b || (a - b).abs() <= eps * (T::one() + a.abs().max(b.abs()))
}

/// Assert two summaries match: counts exactly, floating fields within a
/// relative tolerance `eps`.
///
/// # Panics
///
/// Panics with both summaries printed when any field differs.
pub fn assert_summary_approx_eq<T: Real>(actual: &Summary<T>, expected: &Summary<T>, eps: T) {
    let ok = actual.count == expected.count
        && actual.non_zero_count == expected.non_zero_count
        && close(actual.sum, expected.sum, eps)
        && close(actual.mean, expected.mean, eps)
        && close(actual.std, expected.std, eps)
        && close(actual.min, expected.min, eps)
        && close(actual.max, expected.max, eps);
    assert!(
        ok,
        "Summary mismatch (eps = {eps:?}):\n  Expected: {expected:?}\n  Actual: {actual:?}"
    );
}

/// Accumulator counterpart of [`assert_summary_approx_eq`].
///
/// # Panics
///
/// Panics with both accumulators printed when any field differs.
pub fn assert_stats_approx_eq<T: Real>(
    actual: &StatsAccumulator<T>,
    expected: &StatsAccumulator<T>,
    eps: T,
) {
    let ok = actual.count == expected.count
        && actual.non_zero_count == expected.non_zero_count
        && close(actual.sum, expected.sum, eps)
        && close(actual.sum_of_squares, expected.sum_of_squares, eps)
        && close(actual.min, expected.min, eps)
        && close(actual.max, expected.max, eps);
    assert!(
        ok,
        "Accumulator mismatch (eps = {eps:?}):\n  Expected: {expected:?}\n  Actual: {actual:?}"
    );
}

/// Cut `values` at the given indices. Points are sorted and clamped, so any
/// list of indices gives a valid partitioning (possibly with empty parts).
#[must_use]
pub fn split_at_points<'a, V>(values: &'a [V], points: &[usize]) -> Vec<&'a [V]> {
    let mut cuts: Vec<usize> = points.iter().map(|&p| p.min(values.len())).collect();
    cuts.sort_unstable();
    let mut parts = Vec::with_capacity(cuts.len() + 1);
    let mut start = 0;
    for cut in cuts {
        parts.push(&values[start..cut]);
        start = cut;
    }
    parts.push(&values[start..]);
    parts
}

/// `n` contiguous partitions of near-equal length (`n` is raised to 1).
#[must_use]
pub fn even_partitions<V>(values: &[V], n: usize) -> Vec<&[V]> {
    let n = n.max(1);
    let points: Vec<usize> = (1..n).map(|i| i * values.len() / n).collect();
    split_at_points(values, &points)
}

/// Fold each partition from the identity, then merge the partials left to right.
pub fn reduce_partitioned<V, A, O, C>(comb: &C, parts: &[&[V]]) -> A
where
    V: Clone,
    C: CombineFn<V, A, O>,
{
    merge_all(comb, parts.iter().map(|p| fold_slice(comb, p)))
}

/// Two-pass summary: mean first, then the squared deviations.
#[must_use]
pub fn reference_summary<T: Real>(values: &[T]) -> Summary<T> {
    if values.is_empty() {
        return Summary::from_accumulator(StatsAccumulator::empty());
    }
    let n = T::from_count(values.len() as u64);
    let sum = values.iter().fold(T::zero(), |a, &v| a + v);
    let mean = sum / n;
    let std = if values.len() > 1 {
        let ss = values
            .iter()
            .fold(T::zero(), |a, &v| a + (v - mean) * (v - mean));
        (ss / (n - T::one())).sqrt()
    } else {
        T::zero()
    };
    Summary {
        sum,
        mean,
        std,
        min: values.iter().copied().fold(T::infinity(), T::min),
        max: values.iter().copied().fold(T::neg_infinity(), T::max),
        count: values.len() as u64,
        non_zero_count: values.iter().filter(|&&v| v != T::zero()).count() as u64,
    }
}

/// Order statistics from a full sort, with the same sentinels as the combiner.
#[must_use]
pub fn reference_order_stats<T: Real + FloatCore>(values: &[T]) -> OrderStats<T> {
    let mut sorted: Vec<OrderedFloat<T>> = values.iter().copied().map(OrderedFloat).collect();
    sorted.sort_unstable();
    let at = |i: usize| sorted.get(i).map(|v| v.0);
    let n = sorted.len();
    OrderStats {
        min1: at(0).unwrap_or_else(<T as Float>::infinity),
        min2: at(1).unwrap_or_else(<T as Float>::infinity),
        max1: n.checked_sub(2).and_then(at).unwrap_or_else(<T as Float>::neg_infinity),
        max2: n.checked_sub(1).and_then(at).unwrap_or_else(<T as Float>::neg_infinity),
        count: n as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_points_are_clamped_and_sorted() {
        let xs = [1, 2, 3, 4, 5];
        let parts = split_at_points(&xs, &[9, 2]);
        assert_eq!(parts, vec![&[1, 2][..], &[3, 4, 5][..], &[][..]]);
    }

    #[test]
    fn even_partitions_cover_everything() {
        let xs: Vec<u32> = (0..10).collect();
        let parts = even_partitions(&xs, 3);
        assert_eq!(parts.len(), 3);
        assert_eq!(parts.iter().map(|p| p.len()).sum::<usize>(), 10);
    }

    #[test]
    fn reference_order_stats_with_one_sample() {
        let o = reference_order_stats(&[2.0_f64]);
        assert_eq!(o.min1, 2.0);
        assert_eq!(o.min2, f64::INFINITY);
        assert_eq!(o.max1, f64::NEG_INFINITY);
        assert_eq!(o.max2, 2.0);
    }
}
