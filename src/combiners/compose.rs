//! Slot-wise composition of independent combiners.
//!
//! A tuple of combiners `(C0, C1, ..., Ck)` is itself a combiner over tuples of
//! accumulators: slot `i` is lifted, merged and finished by `Ci` alone and no
//! slot ever reads another. If every component is associative, commutative and
//! has an identity, so is the tuple; the composed identity is the tuple of
//! component identities. Arities 2 through 9 are provided.
//!
//! When the number of slots is only known at runtime, [`DynCompose`] gives the
//! same contract over a `Vec` of boxed combiners sharing one accumulator type.
//!
//! # Example
//! ```
//! use ironstats::combiners::{Min, Sum};
//! use ironstats::{CombineFn, Combiner};
//!
//! let both = (Sum::<f64>::new(), Min::<f64>::new());
//! let acc = [(1.0, 10.0), (2.0, 5.0), (3.0, 8.0)]
//!     .into_iter()
//!     .fold(both.identity(), |acc, pair| both.combine(acc, both.lift(pair)));
//! assert_eq!(both.finish(acc), (6.0, Some(5.0)));
//! ```

use crate::combine::{CombineFn, Combiner};
use std::fmt;
use std::sync::Arc;

macro_rules! impl_tuple_combiner {
    ($($idx:tt),+) => {
        paste::paste! {
            impl<$([<C $idx>], [<A $idx>]),+> Combiner<($([<A $idx>],)+)> for ($([<C $idx>],)+)
            where
                $([<C $idx>]: Combiner<[<A $idx>]>,)+
            {
                fn identity(&self) -> ($([<A $idx>],)+) {
                    ($(self.$idx.identity(),)+)
                }

                fn combine(
                    &self,
                    a: ($([<A $idx>],)+),
                    b: ($([<A $idx>],)+),
                ) -> ($([<A $idx>],)+) {
                    ($(self.$idx.combine(a.$idx, b.$idx),)+)
                }
            }

            impl<$([<C $idx>], [<V $idx>], [<A $idx>], [<O $idx>]),+>
                CombineFn<($([<V $idx>],)+), ($([<A $idx>],)+), ($([<O $idx>],)+)>
                for ($([<C $idx>],)+)
            where
                $([<C $idx>]: CombineFn<[<V $idx>], [<A $idx>], [<O $idx>]>,)+
            {
                fn lift(&self, v: ($([<V $idx>],)+)) -> ($([<A $idx>],)+) {
                    ($(self.$idx.lift(v.$idx),)+)
                }

                fn finish(&self, acc: ($([<A $idx>],)+)) -> ($([<O $idx>],)+) {
                    ($(self.$idx.finish(acc.$idx),)+)
                }
            }
        }
    };
}

impl_tuple_combiner!(0, 1);
impl_tuple_combiner!(0, 1, 2);
impl_tuple_combiner!(0, 1, 2, 3);
impl_tuple_combiner!(0, 1, 2, 3, 4);
impl_tuple_combiner!(0, 1, 2, 3, 4, 5);
impl_tuple_combiner!(0, 1, 2, 3, 4, 5, 6);
impl_tuple_combiner!(0, 1, 2, 3, 4, 5, 6, 7);
impl_tuple_combiner!(0, 1, 2, 3, 4, 5, 6, 7, 8);

/* ===================== DynCompose ===================== */

/// Runtime-arity composition: one boxed [`CombineFn`] per slot.
///
/// - Input: `Vec<V>` with one element per slot
/// - Accumulator: `Vec<A>`
/// - Output: `Vec<O>`
///
/// All slots share `V`, `A` and `O`; use a tuple when they differ.
pub struct DynCompose<V, A, O> {
    slots: Vec<Arc<dyn CombineFn<V, A, O>>>,
}

impl<V, A, O> DynCompose<V, A, O> {
    #[must_use]
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Append a slot.
    #[must_use]
    pub fn with<C>(mut self, comb: C) -> Self
    where
        C: CombineFn<V, A, O> + 'static,
    {
        self.slots.push(Arc::new(comb));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Lift the same element into every slot.
    #[must_use]
    pub fn lift_each(&self, v: V) -> Vec<A>
    where
        V: Clone,
    {
        self.slots.iter().map(|c| c.lift(v.clone())).collect()
    }

    fn check_arity(&self, what: &str, len: usize) {
        assert_eq!(
            len,
            self.slots.len(),
            "DynCompose::{what}: expected {} slots, got {len}",
            self.slots.len()
        );
    }
}

impl<V, A, O> Default for DynCompose<V, A, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, A, O> Clone for DynCompose<V, A, O> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
        }
    }
}

impl<V, A, O> fmt::Debug for DynCompose<V, A, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynCompose")
            .field("slots", &self.slots.len())
            .finish()
    }
}

/// # Panics
///
/// `combine` panics when either accumulator has a different number of slots
/// than the composer.
impl<V, A, O> Combiner<Vec<A>> for DynCompose<V, A, O> {
    fn identity(&self) -> Vec<A> {
        self.slots.iter().map(|c| c.identity()).collect()
    }

    fn combine(&self, a: Vec<A>, b: Vec<A>) -> Vec<A> {
        self.check_arity("combine", a.len());
        self.check_arity("combine", b.len());
        self.slots
            .iter()
            .zip(a.into_iter().zip(b))
            .map(|(c, (x, y))| c.combine(x, y))
            .collect()
    }
}

/// # Panics
///
/// `lift` and `finish` panic on a slot count mismatch.
impl<V, A, O> CombineFn<Vec<V>, Vec<A>, Vec<O>> for DynCompose<V, A, O> {
    fn lift(&self, v: Vec<V>) -> Vec<A> {
        self.check_arity("lift", v.len());
        self.slots
            .iter()
            .zip(v)
            .map(|(c, x)| c.lift(x))
            .collect()
    }

    fn finish(&self, acc: Vec<A>) -> Vec<O> {
        self.check_arity("finish", acc.len());
        self.slots
            .iter()
            .zip(acc)
            .map(|(c, a)| c.finish(a))
            .collect()
    }
}
