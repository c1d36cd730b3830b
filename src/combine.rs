//! The combiner algebra shared by every reduction in this crate.
//!
//! A reduction is described by three pure functions:
//!
//! - **lift** turns one input element into a singleton accumulator,
//! - **combine** merges two accumulators of the same shape, and has an identity,
//! - **finish** turns a fully reduced accumulator into the output record.
//!
//! [`Combiner`] carries the identity and the merge; [`CombineFn`] adds lift and
//! finish on top. Keeping the merge on its own trait is what lets the tuple
//! composer in [`crate::combiners::compose`] reason about each slot
//! independently.
//!
//! `combine` must be associative and commutative (up to floating-point rounding
//! in additive fields) and `combine(identity(), a) == a`. Under those laws an
//! engine may group and order the merges any way it likes: tree reduction,
//! segmented reduction, or a plain left fold are all equivalent.
//!
//! # Example
//! ```
//! use ironstats::{CombineFn, Combiner, Describe, fold_slice};
//!
//! let comb = Describe::<f64>::new();
//! let left = fold_slice(&comb, &[1.0, 2.0, 3.0]);
//! let right = fold_slice(&comb, &[4.0, 5.0]);
//! let summary = comb.finish(comb.combine(left, right));
//! assert_eq!(summary.count, 5);
//! assert_eq!(summary.mean, 3.0);
//! ```

/// An associative, commutative merge with an identity element.
///
/// Accumulators are plain values: `combine` consumes both inputs and returns
/// a fresh one, so concurrent lanes never share mutable state.
pub trait Combiner<A>: Send + Sync {
    /// The neutral element: `combine(identity(), a) == a` for every `a`.
    fn identity(&self) -> A;

    /// Merge two partial results.
    fn combine(&self, a: A, b: A) -> A;
}

/// A complete reduction: lift each `V` into an `A`, combine, then finish into `O`.
pub trait CombineFn<V, A, O>: Combiner<A> {
    /// Map one element to its singleton accumulator.
    fn lift(&self, v: V) -> A;

    /// Convert a fully reduced accumulator into the output record.
    fn finish(&self, acc: A) -> O;
}

/// Combiners that can build an accumulator straight from a slice.
///
/// The runner uses this to reduce each partition in one call. The default
/// implementation is the plain lift-and-combine fold; implementors override it
/// when a tighter loop is available.
pub trait LiftableCombiner<V, A, O>: CombineFn<V, A, O>
where
    V: Clone,
{
    fn build_from_group(&self, values: &[V]) -> A {
        values
            .iter()
            .cloned()
            .fold(self.identity(), |acc, v| self.combine(acc, self.lift(v)))
    }
}

/// Sequentially fold `values` from the identity.
pub fn fold_slice<V, A, O, C>(comb: &C, values: &[V]) -> A
where
    V: Clone,
    C: CombineFn<V, A, O> + ?Sized,
{
    values
        .iter()
        .cloned()
        .fold(comb.identity(), |acc, v| comb.combine(acc, comb.lift(v)))
}

/// Merge already-built accumulators from the identity.
pub fn merge_all<A, C, I>(comb: &C, parts: I) -> A
where
    C: Combiner<A> + ?Sized,
    I: IntoIterator<Item = A>,
{
    parts
        .into_iter()
        .fold(comb.identity(), |acc, a| comb.combine(acc, a))
}
