//! Execution of reductions over in-memory slices.
//!
//! The combiners are pure value algebra; this module is the engine side. It
//! maps each element to an accumulator, folds every partition from the
//! identity, then merges the partials.
//!
//! - [`ExecMode::Sequential`] folds the whole slice on the calling thread.
//! - [`ExecMode::Parallel`] splits the slice into contiguous partitions,
//!   reduces them on the rayon pool, and merges the partial accumulators in
//!   rounds of at most `fanout` values (one round when `fanout` is `None`).
//!
//! Because `combine` is associative and commutative, both modes produce the
//! same result, up to rounding in additive fields.

use crate::combine::{CombineFn, Combiner, LiftableCombiner, merge_all};
#[cfg(feature = "metrics")]
use crate::metrics::MetricsCollector;
use anyhow::{Context, Result};
use rayon::ThreadPool;
use rayon::prelude::*;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;
use tracing::{debug, trace, warn};

/// How a [`Runner`] executes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecMode {
    Sequential,
    /// `threads: None` uses the global rayon pool; `partitions: None` uses
    /// [`Runner::default_partitions`].
    Parallel {
        threads: Option<usize>,
        partitions: Option<usize>,
    },
}

/// Drives a combiner over a slice.
#[derive(Clone)]
pub struct Runner {
    pub mode: ExecMode,
    pub default_partitions: usize,
    /// Maximum number of partial accumulators merged together per round.
    pub fanout: Option<usize>,
    #[cfg(feature = "metrics")]
    metrics: Option<MetricsCollector>,
    /// Dedicated pool for `threads: Some(_)`, built on first use and shared by clones.
    pool: Arc<Mutex<Option<(usize, Arc<ThreadPool>)>>>,
}

impl Default for Runner {
    fn default() -> Self {
        Self {
            mode: ExecMode::Parallel {
                threads: None,
                partitions: None,
            },
            default_partitions: 2 * num_cpus::get().max(2),
            fanout: None,
            #[cfg(feature = "metrics")]
            metrics: None,
            pool: Arc::default(),
        }
    }
}

/// What one execution did, for logging and metrics.
struct ExecStats {
    partitions: usize,
    merge_rounds: usize,
}

impl Runner {
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            mode: ExecMode::Sequential,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn parallel(threads: Option<usize>, partitions: Option<usize>) -> Self {
        Self {
            mode: ExecMode::Parallel {
                threads,
                partitions,
            },
            ..Default::default()
        }
    }

    /// Merge partial accumulators in rounds of at most `fanout` (minimum 2).
    #[must_use]
    pub fn with_fanout(mut self, fanout: usize) -> Self {
        self.fanout = Some(fanout);
        self
    }

    /// Record per-run counters and timings into `metrics`.
    #[cfg(feature = "metrics")]
    #[must_use]
    pub fn with_metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Lift every element and reduce to a single accumulator.
    ///
    /// # Errors
    ///
    /// Returns an error if a dedicated thread pool was requested and could
    /// not be built.
    pub fn reduce<V, A, O, C>(&self, values: &[V], comb: &C) -> Result<A>
    where
        V: Clone + Sync,
        A: Send,
        C: CombineFn<V, A, O>,
    {
        self.reduce_by(values, |v| comb.lift(v.clone()), comb)
    }

    /// Reduce with a caller-supplied map from element to accumulator.
    ///
    /// Use this to transform elements before lifting, or to feed a composed
    /// combiner from a row type.
    ///
    /// # Errors
    ///
    /// See [`Runner::reduce`].
    pub fn reduce_by<V, A, C, F>(&self, values: &[V], f: F, comb: &C) -> Result<A>
    where
        V: Sync,
        A: Send,
        C: Combiner<A>,
        F: Fn(&V) -> A + Sync,
    {
        let local = |chunk: &[V]| {
            chunk
                .iter()
                .fold(comb.identity(), |acc, v| comb.combine(acc, f(v)))
        };
        self.execute(values, &local, comb)
    }

    /// Reduce using [`LiftableCombiner::build_from_group`] per partition.
    ///
    /// # Errors
    ///
    /// See [`Runner::reduce`].
    pub fn reduce_lifted<V, A, O, C>(&self, values: &[V], comb: &C) -> Result<A>
    where
        V: Clone + Sync,
        A: Send,
        C: LiftableCombiner<V, A, O>,
    {
        let local = |chunk: &[V]| comb.build_from_group(chunk);
        self.execute(values, &local, comb)
    }

    /// Reduce, then finish into the combiner's output.
    ///
    /// # Errors
    ///
    /// See [`Runner::reduce`].
    pub fn run<V, A, O, C>(&self, values: &[V], comb: &C) -> Result<O>
    where
        V: Clone + Sync,
        A: Send,
        C: CombineFn<V, A, O>,
    {
        warn_if_empty(values.len());
        let acc = self.reduce(values, comb)?;
        Ok(comb.finish(acc))
    }

    /// Like [`Runner::run`], but through the lifted per-partition path.
    ///
    /// # Errors
    ///
    /// See [`Runner::reduce`].
    pub fn run_lifted<V, A, O, C>(&self, values: &[V], comb: &C) -> Result<O>
    where
        V: Clone + Sync,
        A: Send,
        C: LiftableCombiner<V, A, O>,
    {
        warn_if_empty(values.len());
        let acc = self.reduce_lifted(values, comb)?;
        Ok(comb.finish(acc))
    }

    /// Project each row to the combiner's input, then lift, reduce and finish.
    ///
    /// This is how a composed combiner is fed from a row type: the projection
    /// builds the tuple of slot inputs.
    ///
    /// # Errors
    ///
    /// See [`Runner::reduce`].
    pub fn run_by<R, V, A, O, C, F>(&self, rows: &[R], project: F, comb: &C) -> Result<O>
    where
        R: Sync,
        A: Send,
        C: CombineFn<V, A, O>,
        F: Fn(&R) -> V + Sync,
    {
        warn_if_empty(rows.len());
        let acc = self.reduce_by(rows, |r| comb.lift(project(r)), comb)?;
        Ok(comb.finish(acc))
    }

    fn execute<V, A, C, L>(&self, values: &[V], local: &L, comb: &C) -> Result<A>
    where
        V: Sync,
        A: Send,
        C: Combiner<A>,
        L: Fn(&[V]) -> A + Sync,
    {
        let started = Instant::now();
        let (acc, stats) = match self.mode {
            ExecMode::Sequential => {
                debug!(elements = values.len(), "sequential reduction");
                (
                    local(values),
                    ExecStats {
                        partitions: 1,
                        merge_rounds: 0,
                    },
                )
            }
            ExecMode::Parallel {
                threads,
                partitions,
            } => {
                let parts = partitions
                    .unwrap_or(self.default_partitions)
                    .max(1)
                    .min(values.len().max(1));
                debug!(
                    elements = values.len(),
                    partitions = parts,
                    threads = ?threads,
                    fanout = ?self.fanout,
                    "parallel reduction"
                );
                if let Some(t) = threads {
                    let pool = self.thread_pool(t)?;
                    pool.install(|| exec_parallel(values, parts, self.fanout, local, comb))
                } else {
                    exec_parallel(values, parts, self.fanout, local, comb)
                }
            }
        };

        #[cfg(feature = "metrics")]
        if let Some(m) = &self.metrics {
            m.add_counter("elements", values.len() as u64);
            m.add_counter("partitions", stats.partitions as u64);
            m.add_counter("merge_rounds", stats.merge_rounds as u64);
            m.add_counter("runs", 1);
            m.set_gauge("last_run_ms", started.elapsed().as_secs_f64() * 1e3);
        }
        debug!(
            partitions = stats.partitions,
            merge_rounds = stats.merge_rounds,
            elapsed_us = started.elapsed().as_micros() as u64,
            "reduction complete"
        );
        Ok(acc)
    }

    /// The cached pool for `threads`, rebuilt only if the requested count changed.
    fn thread_pool(&self, threads: usize) -> Result<Arc<ThreadPool>> {
        let mut slot = self.pool.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some((built_for, pool)) = slot.as_ref()
            && *built_for == threads
        {
            return Ok(Arc::clone(pool));
        }
        debug!(threads, "building dedicated rayon pool");
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map(Arc::new)
            .with_context(|| format!("building a rayon pool with {threads} threads"))?;
        *slot = Some((threads, Arc::clone(&pool)));
        Ok(pool)
    }
}

fn warn_if_empty(len: usize) {
    if len == 0 {
        warn!("finishing a reduction over empty input");
    }
}

/// Partition `values`, reduce each chunk with `local`, then merge.
fn exec_parallel<V, A, C, L>(
    values: &[V],
    parts: usize,
    fanout: Option<usize>,
    local: &L,
    comb: &C,
) -> (A, ExecStats)
where
    V: Sync,
    A: Send,
    C: Combiner<A>,
    L: Fn(&[V]) -> A + Sync,
{
    if values.is_empty() {
        return (
            comb.identity(),
            ExecStats {
                partitions: 0,
                merge_rounds: 0,
            },
        );
    }

    let chunk_len = values.len().div_ceil(parts);
    let partials: Vec<A> = values
        .par_chunks(chunk_len)
        .map(|chunk| {
            trace!(len = chunk.len(), "reducing partition");
            local(chunk)
        })
        .collect();
    let partitions = partials.len();
    let (acc, merge_rounds) = merge_rounds(partials, fanout, comb);
    (
        acc,
        ExecStats {
            partitions,
            merge_rounds,
        },
    )
}

/// Merge partial accumulators in rounds of at most `fanout` values each.
///
/// Returns the merged accumulator and the number of rounds taken.
pub(crate) fn merge_rounds<A, C>(mut parts: Vec<A>, fanout: Option<usize>, comb: &C) -> (A, usize)
where
    A: Send,
    C: Combiner<A>,
{
    let width = fanout.unwrap_or(usize::MAX).max(2);
    let mut rounds = 0usize;
    while parts.len() > 1 {
        rounds += 1;
        let mut batches: Vec<Vec<A>> = Vec::with_capacity(parts.len().div_ceil(width));
        let mut it = parts.into_iter().peekable();
        while it.peek().is_some() {
            batches.push(it.by_ref().take(width).collect());
        }
        parts = batches
            .into_par_iter()
            .map(|batch| merge_all(comb, batch))
            .collect();
        trace!(round = rounds, remaining = parts.len(), "merge round");
    }
    let acc = parts.pop().unwrap_or_else(|| comb.identity());
    (acc, rounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combiners::{Count, Sum};

    #[test]
    fn merge_rounds_respects_fanout() {
        let parts: Vec<u64> = vec![1; 16];
        let (acc, rounds) = merge_rounds(parts, Some(2), &Count);
        assert_eq!(acc, 16);
        assert_eq!(rounds, 4);

        let (acc, rounds) = merge_rounds(vec![1u64; 16], None, &Count);
        assert_eq!(acc, 16);
        assert_eq!(rounds, 1);
    }

    #[test]
    fn merge_rounds_of_nothing_is_identity() {
        let (acc, rounds) = merge_rounds(Vec::<i64>::new(), Some(4), &Sum::<i64>::new());
        assert_eq!(acc, 0);
        assert_eq!(rounds, 0);
    }

    #[test]
    fn dedicated_pool_is_built_once() -> Result<()> {
        let r = Runner::parallel(Some(2), Some(4));
        let xs: Vec<i64> = (1..=100).collect();
        assert_eq!(r.run(&xs, &Sum::<i64>::new())?, 5050);
        let first = r.thread_pool(2)?;
        assert_eq!(r.run(&xs, &Sum::<i64>::new())?, 5050);
        assert!(Arc::ptr_eq(&first, &r.thread_pool(2)?));
        assert!(Arc::ptr_eq(&first, &r.clone().thread_pool(2)?));
        assert_eq!(first.current_num_threads(), 2);

        let wider = r.thread_pool(3)?;
        assert_eq!(wider.current_num_threads(), 3);
        assert!(!Arc::ptr_eq(&first, &wider));
        Ok(())
    }

    #[test]
    fn partitions_are_capped_by_input_length() -> Result<()> {
        let r = Runner::parallel(None, Some(64));
        let xs = [1_i64, 2, 3];
        assert_eq!(r.run(&xs, &Sum::<i64>::new())?, 6);
        Ok(())
    }
}
