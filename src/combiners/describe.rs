//! Descriptive statistics in one pass: sum, mean, sample std, min, max,
//! count and non-zero count.

use crate::combine::{CombineFn, Combiner, LiftableCombiner};
use crate::real::Real;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/* ===================== StatsAccumulator<T> ===================== */

/// Partial state of a [`Describe`] reduction.
///
/// Invariant: when `count > 0`, `min <= max` and `non_zero_count <= count`.
/// The identity has `min = +inf` and `max = -inf` so that it loses every
/// comparison against real data.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "T: Real")]
pub struct StatsAccumulator<T> {
    pub sum: T,
    pub sum_of_squares: T,
    pub min: T,
    pub max: T,
    pub count: u64,
    pub non_zero_count: u64,
}

impl<T: Real> StatsAccumulator<T> {
    /// The identity accumulator.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            sum: T::zero(),
            sum_of_squares: T::zero(),
            min: T::infinity(),
            max: T::neg_infinity(),
            count: 0,
            non_zero_count: 0,
        }
    }

    /// The singleton accumulator for one sample.
    #[must_use]
    pub fn of(v: T) -> Self {
        Self {
            sum: v,
            sum_of_squares: v * v,
            min: v,
            max: v,
            count: 1,
            non_zero_count: u64::from(v != T::zero()),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Field-wise merge: add, add, min, max, add, add.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            sum: self.sum + other.sum,
            sum_of_squares: self.sum_of_squares + other.sum_of_squares,
            min: if self.min < other.min { self.min } else { other.min },
            max: if self.max > other.max { self.max } else { other.max },
            count: self.count + other.count,
            non_zero_count: self.non_zero_count + other.non_zero_count,
        }
    }
}

impl<T: Real> Default for StatsAccumulator<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/* ===================== Summary<T> ===================== */

/// Read-only result of a [`Describe`] reduction.
///
/// An empty input yields `sum = mean = std = 0`, `count = 0`, and the identity
/// bounds `min = +inf`, `max = -inf`; see [`Summary::is_empty`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "T: Real")]
pub struct Summary<T> {
    pub sum: T,
    pub mean: T,
    pub std: T,
    pub min: T,
    pub max: T,
    pub count: u64,
    pub non_zero_count: u64,
}

impl<T: Real> Summary<T> {
    /// Finalize an accumulator.
    ///
    /// Variance uses Bessel's correction and is clamped at zero before the
    /// square root, since nearly constant data can round it negative.
    #[must_use]
    pub fn from_accumulator(acc: StatsAccumulator<T>) -> Self {
        if acc.is_empty() {
            return Self {
                sum: acc.sum,
                mean: T::zero(),
                std: T::zero(),
                min: acc.min,
                max: acc.max,
                count: 0,
                non_zero_count: 0,
            };
        }

        let n = T::from_count(acc.count);
        let mean = acc.sum / n;
        Self {
            sum: acc.sum,
            mean,
            std: sample_std_dev(acc.count, acc.sum_of_squares, mean),
            min: acc.min,
            max: acc.max,
            count: acc.count,
            non_zero_count: acc.non_zero_count,
        }
    }

    /// `true` when the summary was produced from no samples.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Sample standard deviation from the running moments.
///
/// Returns zero for `n <= 1` and whenever the variance is not positive.
#[must_use]
pub fn sample_std_dev<T: Real>(n: u64, sum_of_squares: T, mean: T) -> T {
    if n <= 1 {
        return T::zero();
    }
    let nf = T::from_count(n);
    let variance = (sum_of_squares - nf * mean * mean) / T::from_count(n - 1);
    if variance > T::zero() {
        variance.sqrt()
    } else {
        T::zero()
    }
}

/* ===================== Describe<T> ===================== */

/// Single-pass descriptive statistics over `T` samples.
///
/// - Accumulator: [`StatsAccumulator<T>`]
/// - Output: [`Summary<T>`]
#[derive(Clone, Copy, Debug, Default)]
pub struct Describe<T>(PhantomData<T>);

impl<T> Describe<T> {
    /// Convenience constructor (same as `Default`).
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: Real> Combiner<StatsAccumulator<T>> for Describe<T> {
    fn identity(&self) -> StatsAccumulator<T> {
        StatsAccumulator::empty()
    }

    fn combine(&self, a: StatsAccumulator<T>, b: StatsAccumulator<T>) -> StatsAccumulator<T> {
        a.merge(b)
    }
}

impl<T: Real> CombineFn<T, StatsAccumulator<T>, Summary<T>> for Describe<T> {
    fn lift(&self, v: T) -> StatsAccumulator<T> {
        StatsAccumulator::of(v)
    }

    fn finish(&self, acc: StatsAccumulator<T>) -> Summary<T> {
        Summary::from_accumulator(acc)
    }
}

impl<T: Real> LiftableCombiner<T, StatsAccumulator<T>, Summary<T>> for Describe<T> {
    fn build_from_group(&self, values: &[T]) -> StatsAccumulator<T> {
        let mut acc = StatsAccumulator::empty();
        for &v in values {
            acc.sum = acc.sum + v;
            acc.sum_of_squares = acc.sum_of_squares + v * v;
            if v < acc.min {
                acc.min = v;
            }
            if v > acc.max {
                acc.max = v;
            }
            acc.count += 1;
            if v != T::zero() {
                acc.non_zero_count += 1;
            }
        }
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combine::fold_slice;

    #[test]
    fn lift_counts_zero_as_not_non_zero() {
        let a = StatsAccumulator::of(0.0_f64);
        assert_eq!(a.count, 1);
        assert_eq!(a.non_zero_count, 0);
        assert_eq!(StatsAccumulator::of(-2.5_f64).non_zero_count, 1);
    }

    #[test]
    fn identity_is_neutral_on_both_sides() {
        let d = Describe::<f64>::new();
        let a = fold_slice(&d, &[4.0, -1.0, 9.0]);
        assert_eq!(d.combine(d.identity(), a), a);
        assert_eq!(d.combine(a, d.identity()), a);
    }

    #[test]
    fn build_from_group_matches_fold() {
        let d = Describe::<f32>::new();
        let xs = [0.5_f32, 0.0, -3.0, 8.25, 1.0];
        assert_eq!(d.build_from_group(&xs), fold_slice(&d, &xs));
    }

    #[test]
    fn std_dev_is_zero_for_single_sample() {
        let s = Describe::<f64>::new().finish(StatsAccumulator::of(7.0));
        assert_eq!(s.std, 0.0);
        assert_eq!(s.mean, 7.0);
    }

    #[test]
    fn negative_rounding_variance_clamps_to_zero() {
        // sum_of_squares slightly below n * mean^2
        assert_eq!(sample_std_dev(3, 2.999_999_f64, 1.0), 0.0);
    }

    #[test]
    fn empty_accumulator_finishes_without_nan() {
        let s = Summary::from_accumulator(StatsAccumulator::<f64>::empty());
        assert!(s.is_empty());
        assert_eq!(s.mean, 0.0);
        assert_eq!(s.std, 0.0);
        assert_eq!(s.min, f64::INFINITY);
        assert_eq!(s.max, f64::NEG_INFINITY);
    }
}
