//! Metrics recorded while running reductions.
//!
//! Attach a [`MetricsCollector`] to a [`Runner`](crate::Runner) with
//! [`Runner::with_metrics`](crate::Runner::with_metrics) and every run adds to
//! these built-in metrics:
//!
//! - `runs` -- number of reductions executed
//! - `elements` -- total input elements
//! - `partitions` -- total partitions reduced
//! - `merge_rounds` -- total merge rounds over partial accumulators
//! - `last_run_ms` -- wall time of the most recent run
//!
//! Custom metrics can be registered through the [`Metric`] trait.
//!
//! # Example
//!
//! ```no_run
//! use ironstats::*;
//! use ironstats::metrics::MetricsCollector;
//!
//! # fn main() -> anyhow::Result<()> {
//! let metrics = MetricsCollector::new();
//! let r = Runner::default().with_metrics(metrics.clone());
//! let _ = r.run(&[1.0_f64, 2.0, 3.0], &Describe::<f64>::new())?;
//!
//! metrics.print();
//! metrics.save_to_file("metrics.json")?;
//! # Ok(())
//! # }
//! ```

use anyhow::Result;
use serde_json::{Map, Value, json};
use std::any::Any;
use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A named value that can be reported.
pub trait Metric: Send + Sync + Any {
    /// The name of this metric (e.g., `elements`, `last_run_ms`).
    fn name(&self) -> &str;

    /// The current value as JSON.
    fn value(&self) -> Value;

    fn description(&self) -> Option<&str> {
        None
    }

    /// Cast to Any for downcasting.
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// A monotonically increasing count.
#[derive(Clone, Debug)]
pub struct CounterMetric {
    name: String,
    count: u64,
    description: Option<String>,
}

impl CounterMetric {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_value(name, 0)
    }

    pub fn with_value(name: impl Into<String>, count: u64) -> Self {
        Self {
            name: name.into(),
            count,
            description: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn add(&mut self, delta: u64) {
        self.count = self.count.saturating_add(delta);
    }

    #[must_use]
    pub const fn get(&self) -> u64 {
        self.count
    }
}

impl Metric for CounterMetric {
    fn name(&self) -> &str {
        &self.name
    }

    fn value(&self) -> Value {
        json!(self.count)
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A value that is overwritten on each update.
#[derive(Clone, Debug)]
pub struct GaugeMetric {
    name: String,
    value: f64,
    description: Option<String>,
}

impl GaugeMetric {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            description: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn set(&mut self, value: f64) {
        self.value = value;
    }

    #[must_use]
    pub const fn get(&self) -> f64 {
        self.value
    }
}

impl Metric for GaugeMetric {
    fn name(&self) -> &str {
        &self.name
    }

    fn value(&self) -> Value {
        json!(self.value)
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Thread-safe, cheaply cloneable registry of metrics.
///
/// Clones share the same underlying registry.
#[derive(Clone, Default)]
pub struct MetricsCollector {
    inner: Arc<Mutex<HashMap<String, Box<dyn Metric>>>>,
}

impl MetricsCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Box<dyn Metric>>> {
        // metrics stay readable even if a recording thread panicked
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register (or replace) a metric under its own name.
    pub fn register(&self, metric: Box<dyn Metric>) {
        let name = metric.name().to_string();
        self.lock().insert(name, metric);
    }

    /// Add `delta` to the counter `name`, creating it if needed.
    ///
    /// A non-counter metric already registered under `name` is replaced.
    pub fn add_counter(&self, name: &str, delta: u64) {
        let mut metrics = self.lock();
        if let Some(c) = metrics
            .get_mut(name)
            .and_then(|m| m.as_any_mut().downcast_mut::<CounterMetric>())
        {
            c.add(delta);
            return;
        }
        metrics.insert(
            name.to_string(),
            Box::new(CounterMetric::with_value(name, delta)),
        );
    }

    /// Set the gauge `name`, creating it if needed.
    pub fn set_gauge(&self, name: &str, value: f64) {
        let mut metrics = self.lock();
        if let Some(g) = metrics
            .get_mut(name)
            .and_then(|m| m.as_any_mut().downcast_mut::<GaugeMetric>())
        {
            g.set(value);
            return;
        }
        metrics.insert(name.to_string(), Box::new(GaugeMetric::new(name, value)));
    }

    #[must_use]
    pub fn counter(&self, name: &str) -> Option<u64> {
        self.lock()
            .get(name)
            .and_then(|m| m.as_any().downcast_ref::<CounterMetric>())
            .map(CounterMetric::get)
    }

    #[must_use]
    pub fn gauge(&self, name: &str) -> Option<f64> {
        self.lock()
            .get(name)
            .and_then(|m| m.as_any().downcast_ref::<GaugeMetric>())
            .map(GaugeMetric::get)
    }

    /// Get a snapshot of all metric names and values.
    #[must_use]
    pub fn snapshot(&self) -> HashMap<String, Value> {
        self.lock()
            .iter()
            .map(|(name, metric)| (name.clone(), metric.value()))
            .collect()
    }

    /// All metrics as a JSON object, keys sorted.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut entries: Vec<_> = self.snapshot().into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Value::Object(entries.into_iter().collect::<Map<_, _>>())
    }

    /// Print all metrics to stdout in a human-readable format.
    pub fn print(&self) {
        println!("\n========== Reduction Metrics ==========");
        let metrics = self.lock();
        let mut sorted: Vec<_> = metrics.iter().collect();
        sorted.sort_by_key(|(name, _)| *name);
        for (name, metric) in sorted {
            if let Some(desc) = metric.description() {
                println!("{}: {} ({})", name, metric.value(), desc);
            } else {
                println!("{}: {}", name, metric.value());
            }
        }
        drop(metrics);
        println!("=======================================\n");
    }

    /// Save all metrics to a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written to.
    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let formatted = serde_json::to_string_pretty(&self.to_json())?;
        let mut file = File::create(path)?;
        file.write_all(formatted.as_bytes())?;
        Ok(())
    }
}
