//! Single-field combiners: Sum, Min, Max, Count, NonZeroCount.
//!
//! These are the building blocks usually handed to the tuple composer when a
//! caller wants a few unrelated reductions in one pass.

use crate::combine::{CombineFn, Combiner, LiftableCombiner};
use std::marker::PhantomData;
use std::ops::Add;

/* ===================== Sum<T> ===================== */

/// Sum of values.
///
/// - Accumulator: `T`
/// - Output: `T`
///
/// Requires `T: Add<Output=T> + Default + Copy`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sum<T>(PhantomData<T>);

impl<T> Sum<T> {
    /// Convenience constructor (same as `Default`).
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Combiner<T> for Sum<T>
where
    T: Add<Output = T> + Default + Copy + Send + Sync,
{
    fn identity(&self) -> T {
        T::default()
    }

    fn combine(&self, a: T, b: T) -> T {
        a + b
    }
}

impl<T> CombineFn<T, T, T> for Sum<T>
where
    T: Add<Output = T> + Default + Copy + Send + Sync,
{
    fn lift(&self, v: T) -> T {
        v
    }

    fn finish(&self, acc: T) -> T {
        acc
    }
}

impl<T> LiftableCombiner<T, T, T> for Sum<T>
where
    T: Add<Output = T> + Default + Copy + Send + Sync,
{
    fn build_from_group(&self, values: &[T]) -> T {
        values.iter().copied().fold(T::default(), |a, v| a + v)
    }
}

/* ===================== Min<T> ===================== */

/// Minimum value (requires `PartialOrd`).
///
/// - Accumulator: `Option<T>`, `None` for the identity
/// - Output: `Option<T>`
#[derive(Clone, Copy, Debug, Default)]
pub struct Min<T>(PhantomData<T>);

impl<T> Min<T> {
    /// Convenience constructor (same as `Default`).
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Combiner<Option<T>> for Min<T>
where
    T: PartialOrd + Copy + Send + Sync,
{
    fn identity(&self) -> Option<T> {
        None
    }

    fn combine(&self, a: Option<T>, b: Option<T>) -> Option<T> {
        match (a, b) {
            (Some(x), Some(y)) => Some(if y < x { y } else { x }),
            (x, None) => x,
            (None, y) => y,
        }
    }
}

impl<T> CombineFn<T, Option<T>, Option<T>> for Min<T>
where
    T: PartialOrd + Copy + Send + Sync,
{
    fn lift(&self, v: T) -> Option<T> {
        Some(v)
    }

    fn finish(&self, acc: Option<T>) -> Option<T> {
        acc
    }
}

/* ===================== Max<T> ===================== */

/// Maximum value (requires `PartialOrd`).
///
/// - Accumulator: `Option<T>`, `None` for the identity
/// - Output: `Option<T>`
#[derive(Clone, Copy, Debug, Default)]
pub struct Max<T>(PhantomData<T>);

impl<T> Max<T> {
    /// Convenience constructor (same as `Default`).
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Combiner<Option<T>> for Max<T>
where
    T: PartialOrd + Copy + Send + Sync,
{
    fn identity(&self) -> Option<T> {
        None
    }

    fn combine(&self, a: Option<T>, b: Option<T>) -> Option<T> {
        match (a, b) {
            (Some(x), Some(y)) => Some(if y > x { y } else { x }),
            (x, None) => x,
            (None, y) => y,
        }
    }
}

impl<T> CombineFn<T, Option<T>, Option<T>> for Max<T>
where
    T: PartialOrd + Copy + Send + Sync,
{
    fn lift(&self, v: T) -> Option<T> {
        Some(v)
    }

    fn finish(&self, acc: Option<T>) -> Option<T> {
        acc
    }
}

/* ===================== Count ===================== */

/// Number of elements, whatever their type.
#[derive(Clone, Copy, Debug, Default)]
pub struct Count;

impl Combiner<u64> for Count {
    fn identity(&self) -> u64 {
        0
    }

    fn combine(&self, a: u64, b: u64) -> u64 {
        a + b
    }
}

impl<V> CombineFn<V, u64, u64> for Count {
    fn lift(&self, _v: V) -> u64 {
        1
    }

    fn finish(&self, acc: u64) -> u64 {
        acc
    }
}

impl<V: Clone> LiftableCombiner<V, u64, u64> for Count {
    fn build_from_group(&self, values: &[V]) -> u64 {
        values.len() as u64
    }
}

/* ===================== NonZeroCount<T> ===================== */

/// Number of elements that differ from `T::default()`.
#[derive(Clone, Copy, Debug, Default)]
pub struct NonZeroCount<T>(PhantomData<T>);

impl<T> NonZeroCount<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: Send + Sync> Combiner<u64> for NonZeroCount<T> {
    fn identity(&self) -> u64 {
        0
    }

    fn combine(&self, a: u64, b: u64) -> u64 {
        a + b
    }
}

impl<T> CombineFn<T, u64, u64> for NonZeroCount<T>
where
    T: PartialEq + Default + Send + Sync,
{
    fn lift(&self, v: T) -> u64 {
        u64::from(v != T::default())
    }

    fn finish(&self, acc: u64) -> u64 {
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combine::fold_slice;

    #[test]
    fn sum_min_max_over_floats() {
        let xs = [10.0_f64, 5.0, 8.0];
        assert_eq!(fold_slice(&Sum::<f64>::new(), &xs), 23.0);
        assert_eq!(fold_slice(&Min::<f64>::new(), &xs), Some(5.0));
        assert_eq!(fold_slice(&Max::<f64>::new(), &xs), Some(10.0));
    }

    #[test]
    fn min_max_of_nothing_is_none() {
        let empty: [i32; 0] = [];
        assert_eq!(fold_slice(&Min::<i32>::new(), &empty), None);
        assert_eq!(fold_slice(&Max::<i32>::new(), &empty), None);
    }

    #[test]
    fn count_and_non_zero_count() {
        let xs = [0_i64, 0, 3, 4];
        assert_eq!(Count.build_from_group(&xs), 4);
        assert_eq!(fold_slice(&NonZeroCount::<i64>::new(), &xs), 2);
    }
}
