//! Built-in combiners.
//!
//! Every combiner implements [`Combiner`](crate::Combiner) and
//! [`CombineFn`](crate::CombineFn); pick one and hand it to a
//! [`Runner`](crate::Runner), or fold it yourself.
//!
//! - [`Describe<T>`] -- sum, mean, sample std, min, max, count, non-zero count.
//! - [`Smallest2<T>`] / [`Largest2<T>`] -- two smallest / two largest values.
//! - [`MinMax2<T>`] -- both of the above in one accumulator.
//! - [`Sum<T>`], [`Min<T>`], [`Max<T>`], [`Count`], [`NonZeroCount<T>`] -- single-field
//!   reductions, mostly useful as components of a composed combiner.
//! - Tuples of combiners and [`DynCompose`] -- several independent reductions
//!   in one pass.
//!
//! # Examples
//! ```
//! use ironstats::*;
//! use ironstats::combiners::{Describe, MinMax2, Min, Sum};
//!
//! let r = Runner::default();
//! let xs = vec![5.0_f64, 1.0, 4.0, 2.0, 3.0];
//!
//! let summary = r.run(&xs, &Describe::<f64>::new())?;
//! assert_eq!(summary.sum, 15.0);
//!
//! let order = r.run(&xs, &MinMax2::<f64>::new())?;
//! assert_eq!((order.min1, order.min2, order.max1, order.max2), (1.0, 2.0, 4.0, 5.0));
//!
//! let pairs = vec![(1.0_f64, 10.0_f64), (2.0, 5.0), (3.0, 8.0)];
//! let both = r.run(&pairs, &(Sum::<f64>::new(), Min::<f64>::new()))?;
//! assert_eq!(both, (6.0, Some(5.0)));
//! # anyhow::Result::<()>::Ok(())
//! ```

mod basic;
pub mod compose;
mod describe;
mod order_stats;

// Re-export all public combiners
pub use basic::{Count, Max, Min, NonZeroCount, Sum};
pub use compose::DynCompose;
pub use describe::{Describe, StatsAccumulator, Summary, sample_std_dev};
pub use order_stats::{Extremes, Largest2, MaxPair, MinMax2, MinPair, OrderStats, Smallest2};
