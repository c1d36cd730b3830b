//! Two smallest / two largest values via tournament merges.
//!
//! Each accumulator keeps a pair sorted ascending. Merging two pairs compares
//! only their boundary elements, so no four-way sort is ever needed, and the
//! merge is exact: folding over any partitioning yields the true order
//! statistics of the whole input.
//!
//! Slots that have not seen enough samples hold a sentinel: `+inf` for the
//! smallest side, `-inf` for the largest side. The bare pairs cannot tell a
//! sentinel from a real infinite sample; [`Extremes`] also counts samples so
//! [`OrderStats`] can.

use crate::combine::{CombineFn, Combiner};
use crate::real::Real;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/* ===================== MinPair<T> ===================== */

/// The two smallest values seen so far, `lo <= hi`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "T: Real")]
pub struct MinPair<T> {
    pub lo: T,
    pub hi: T,
}

impl<T: Real> MinPair<T> {
    #[must_use]
    pub fn empty() -> Self {
        Self { lo: T::infinity(), hi: T::infinity() }
    }

    #[must_use]
    pub fn of(v: T) -> Self {
        Self { lo: v, hi: T::infinity() }
    }

    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        if self.hi < other.lo {
            self
        } else if other.hi < self.lo {
            other
        } else if self.lo < other.lo {
            Self { lo: self.lo, hi: other.lo }
        } else {
            Self { lo: other.lo, hi: self.lo }
        }
    }
}

/* ===================== MaxPair<T> ===================== */

/// The two largest values seen so far, `lo <= hi` (`hi` is the maximum).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "T: Real")]
pub struct MaxPair<T> {
    pub lo: T,
    pub hi: T,
}

impl<T: Real> MaxPair<T> {
    #[must_use]
    pub fn empty() -> Self {
        Self { lo: T::neg_infinity(), hi: T::neg_infinity() }
    }

    #[must_use]
    pub fn of(v: T) -> Self {
        Self { lo: T::neg_infinity(), hi: v }
    }

    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        if self.lo > other.hi {
            self
        } else if other.lo > self.hi {
            other
        } else if self.hi > other.hi {
            Self { lo: other.hi, hi: self.hi }
        } else {
            Self { lo: self.hi, hi: other.hi }
        }
    }
}

/* ===================== Extremes<T> ===================== */

/// Both pairs at once; the halves are merged independently.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "T: Real")]
pub struct Extremes<T> {
    pub low: MinPair<T>,
    pub high: MaxPair<T>,
    /// Samples reduced so far.
    pub count: u64,
}

impl<T: Real> Extremes<T> {
    #[must_use]
    pub fn empty() -> Self {
        Self { low: MinPair::empty(), high: MaxPair::empty(), count: 0 }
    }

    #[must_use]
    pub fn of(v: T) -> Self {
        Self { low: MinPair::of(v), high: MaxPair::of(v), count: 1 }
    }

    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            low: self.low.merge(other.low),
            high: self.high.merge(other.high),
            count: self.count + other.count,
        }
    }
}

/// Output of [`MinMax2`]: `min1 <= min2` are the two smallest values,
/// `max1 <= max2` the two largest, out of `count` samples.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "T: Real")]
pub struct OrderStats<T> {
    pub min1: T,
    pub min2: T,
    pub max1: T,
    pub max2: T,
    pub count: u64,
}

impl<T: Real> OrderStats<T> {
    /// `None` until at least two samples were reduced. An infinite sample
    /// is still reported.
    #[must_use]
    pub fn second_smallest(&self) -> Option<T> {
        (self.count >= 2).then_some(self.min2)
    }

    /// `None` until at least two samples were reduced.
    #[must_use]
    pub fn second_largest(&self) -> Option<T> {
        (self.count >= 2).then_some(self.max1)
    }
}

impl<T: Real> From<Extremes<T>> for OrderStats<T> {
    fn from(e: Extremes<T>) -> Self {
        Self {
            min1: e.low.lo,
            min2: e.low.hi,
            max1: e.high.lo,
            max2: e.high.hi,
            count: e.count,
        }
    }
}

/* ===================== Combiners ===================== */

/// Two smallest values.
///
/// - Accumulator / Output: [`MinPair<T>`]
#[derive(Clone, Copy, Debug, Default)]
pub struct Smallest2<T>(PhantomData<T>);

impl<T> Smallest2<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: Real> Combiner<MinPair<T>> for Smallest2<T> {
    fn identity(&self) -> MinPair<T> {
        MinPair::empty()
    }

    fn combine(&self, a: MinPair<T>, b: MinPair<T>) -> MinPair<T> {
        a.merge(b)
    }
}

impl<T: Real> CombineFn<T, MinPair<T>, MinPair<T>> for Smallest2<T> {
    fn lift(&self, v: T) -> MinPair<T> {
        MinPair::of(v)
    }

    fn finish(&self, acc: MinPair<T>) -> MinPair<T> {
        acc
    }
}

/// Two largest values.
///
/// - Accumulator / Output: [`MaxPair<T>`]
#[derive(Clone, Copy, Debug, Default)]
pub struct Largest2<T>(PhantomData<T>);

impl<T> Largest2<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: Real> Combiner<MaxPair<T>> for Largest2<T> {
    fn identity(&self) -> MaxPair<T> {
        MaxPair::empty()
    }

    fn combine(&self, a: MaxPair<T>, b: MaxPair<T>) -> MaxPair<T> {
        a.merge(b)
    }
}

impl<T: Real> CombineFn<T, MaxPair<T>, MaxPair<T>> for Largest2<T> {
    fn lift(&self, v: T) -> MaxPair<T> {
        MaxPair::of(v)
    }

    fn finish(&self, acc: MaxPair<T>) -> MaxPair<T> {
        acc
    }
}

/// Two smallest and two largest values in one pass.
///
/// - Accumulator: [`Extremes<T>`]
/// - Output: [`OrderStats<T>`]
#[derive(Clone, Copy, Debug, Default)]
pub struct MinMax2<T>(PhantomData<T>);

impl<T> MinMax2<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: Real> Combiner<Extremes<T>> for MinMax2<T> {
    fn identity(&self) -> Extremes<T> {
        Extremes::empty()
    }

    fn combine(&self, a: Extremes<T>, b: Extremes<T>) -> Extremes<T> {
        a.merge(b)
    }
}

impl<T: Real> CombineFn<T, Extremes<T>, OrderStats<T>> for MinMax2<T> {
    fn lift(&self, v: T) -> Extremes<T> {
        Extremes::of(v)
    }

    fn finish(&self, acc: Extremes<T>) -> OrderStats<T> {
        acc.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combine::fold_slice;

    #[test]
    fn min_pair_cases() {
        let a = MinPair { lo: 1.0, hi: 2.0 };
        let b = MinPair { lo: 5.0, hi: 6.0 };
        assert_eq!(a.merge(b), a);
        assert_eq!(b.merge(a), a);

        let c = MinPair { lo: 1.0, hi: 5.0 };
        let d = MinPair { lo: 2.0, hi: 3.0 };
        assert_eq!(c.merge(d), MinPair { lo: 1.0, hi: 2.0 });
        assert_eq!(d.merge(c), MinPair { lo: 1.0, hi: 2.0 });
    }

    #[test]
    fn duplicates_are_kept() {
        let a = MinPair { lo: 1.0_f64, hi: 2.0 };
        let b = MinPair { lo: 1.0, hi: 3.0 };
        assert_eq!(a.merge(b), MinPair { lo: 1.0, hi: 1.0 });

        let c = MaxPair { lo: 3.0_f64, hi: 9.0 };
        let d = MaxPair { lo: 1.0, hi: 9.0 };
        assert_eq!(c.merge(d), MaxPair { lo: 9.0, hi: 9.0 });
    }

    #[test]
    fn max_pair_cases() {
        let a = MaxPair { lo: 4.0, hi: 5.0 };
        let b = MaxPair { lo: 2.0, hi: 3.0 };
        assert_eq!(a.merge(b), a);
        assert_eq!(b.merge(a), a);

        let c = MaxPair { lo: 1.0, hi: 5.0 };
        assert_eq!(c.merge(b), MaxPair { lo: 3.0, hi: 5.0 });
        assert_eq!(b.merge(c), MaxPair { lo: 3.0, hi: 5.0 });
    }

    #[test]
    fn singletons_fill_second_slot() {
        let s = Smallest2::<f64>::new();
        let out = s.combine(s.lift(3.0), s.lift(5.0));
        assert_eq!(out, MinPair { lo: 3.0, hi: 5.0 });

        let l = Largest2::<f64>::new();
        let out = l.combine(l.lift(3.0), l.lift(5.0));
        assert_eq!(out, MaxPair { lo: 3.0, hi: 5.0 });
    }

    #[test]
    fn identity_is_neutral() {
        let m = MinMax2::<f32>::new();
        let a = fold_slice(&m, &[2.0_f32, -4.0, 7.5]);
        assert_eq!(m.combine(m.identity(), a), a);
        assert_eq!(m.combine(a, m.identity()), a);
    }

    #[test]
    fn single_sample_leaves_sentinels() {
        let m = MinMax2::<f64>::new();
        let out = m.finish(m.lift(4.0));
        assert_eq!(out.min1, 4.0);
        assert_eq!(out.max2, 4.0);
        assert_eq!(out.second_smallest(), None);
        assert_eq!(out.second_largest(), None);
    }

    #[test]
    fn infinite_samples_are_not_sentinels() {
        let m = MinMax2::<f64>::new();
        let out = m.finish(fold_slice(&m, &[1.0, f64::INFINITY]));
        assert_eq!(out.count, 2);
        assert_eq!(out.second_smallest(), Some(f64::INFINITY));
        assert_eq!(out.second_largest(), Some(1.0));

        let out = m.finish(fold_slice(&m, &[f64::NEG_INFINITY, f64::NEG_INFINITY]));
        assert_eq!(out.second_smallest(), Some(f64::NEG_INFINITY));
        assert_eq!(out.second_largest(), Some(f64::NEG_INFINITY));
    }
}
