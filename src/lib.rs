//! # Ironstats
//!
//! **Single-pass descriptive statistics** built as a parallel reduction algebra.
//! Every statistic is expressed as a combiner: a pure lift from element to
//! accumulator, an associative and commutative merge with an identity, and a
//! finish step. Because the merge does not care how the input was partitioned,
//! the same combiner gives the same answer sequentially, on a thread pool, or
//! folded by any other engine.
//!
//! ## Key Features
//!
//! - **Descriptive statistics** - sum, mean, sample standard deviation, min, max,
//!   count and non-zero count in one pass ([`Describe`])
//! - **Order statistics** - two smallest and two largest values via tournament
//!   merges, without sorting ([`MinMax2`], [`Smallest2`], [`Largest2`])
//! - **Composition** - tuples of combiners are combiners, so unrelated
//!   reductions share one pass ([`combiners::compose`])
//! - **Precision-parametric** - `f32` and `f64` through the [`Real`] trait
//! - **Parallel execution** - [`Runner`] partitions slices across rayon
//!
//! ## Quick Start
//!
//! ```
//! use ironstats::*;
//! # use anyhow::Result;
//!
//! # fn main() -> Result<()> {
//! let runner = Runner::default();
//! let summary = runner.run(&[1.0_f64, 2.0, 3.0, 4.0, 5.0], &Describe::<f64>::new())?;
//!
//! assert_eq!(summary.sum, 15.0);
//! assert_eq!(summary.mean, 3.0);
//! assert!((summary.std - 2.5_f64.sqrt()).abs() < 1e-12);
//! assert_eq!(summary.count, 5);
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Concepts
//!
//! ### Combiners
//!
//! [`Combiner<A>`] is the merge half: `identity()` and `combine(a, b)`.
//! [`CombineFn<V, A, O>`] adds `lift(v)` and `finish(acc)`. Accumulators are
//! values; nothing is mutated in place, so lanes never share state.
//!
//! ### Empty input
//!
//! Finishing an empty [`Describe`] reduction yields `mean = 0`, `std = 0`,
//! `count = 0` with the identity bounds `min = +inf`, `max = -inf`. Check
//! [`Summary::is_empty`] before trusting the bounds.
//!
//! ### Execution
//!
//! - **Sequential** - [`Runner::sequential`] folds on the calling thread.
//! - **Parallel** - [`Runner::parallel`] (or `Runner::default()`) reduces
//!   partitions on rayon, then merges the partials, optionally in bounded
//!   rounds ([`Runner::with_fanout`]).
//!
//! Both produce the same result, up to rounding in the additive fields.
//!
//! ## Feature Flags
//!
//! - `metrics` (default) - [`metrics::MetricsCollector`] and
//!   [`Runner::with_metrics`]
//!
//! ## Module Overview
//!
//! - [`combine`] - the combiner traits
//! - [`combiners`] - built-in combiners and tuple composition
//! - [`runner`] - sequential and parallel execution
//! - [`report`] - text, SI-prefixed and JSON rendering
//! - [`functional`] - elementwise helpers for map-before-lift
//! - [`helpers`] - one-call `describe_*` / `order_stats_*`
//! - [`testing`] - assertions and reference implementations for tests

pub mod combine;
pub mod combiners;
pub mod functional;
pub mod helpers;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod real;
pub mod report;
pub mod runner;
pub mod testing;

// General re-exports
pub use combine::{CombineFn, Combiner, LiftableCombiner, fold_slice, merge_all};
pub use combiners::{
    Count, Describe, DynCompose, Extremes, Largest2, Max, MaxPair, Min, MinMax2, MinPair,
    NonZeroCount, OrderStats, Smallest2, StatsAccumulator, Sum, Summary,
};
pub use helpers::{describe_f32, describe_f64, order_stats_f32, order_stats_f64};
pub use real::Real;
pub use report::si_format;
pub use runner::{ExecMode, Runner};
