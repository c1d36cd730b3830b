//! Text and JSON rendering of reduction results.
//!
//! Presentation only: nothing here feeds back into the algebra.
//!
//! ```
//! use ironstats::{Describe, Runner};
//!
//! let s = Runner::sequential().run(&[1500.0_f64, 2500.0], &Describe::<f64>::new())?;
//! println!("{s}");
//! println!("{}", s.to_si_string(2));
//! assert!(s.to_si_string(2).contains("4.00 k"));
//! # anyhow::Result::<()>::Ok(())
//! ```

use crate::combiners::{OrderStats, Summary};
use crate::real::Real;
use serde_json::Value;
use std::fmt;

const LABEL_WIDTH: usize = 16;
const VALUE_WIDTH: usize = 17;

const SI_PREFIXES: [&str; 17] = [
    "y", "z", "a", "f", "p", "n", "µ", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y",
];

/// Format `value` in engineering notation with an SI prefix, e.g.
/// `si_format(1234.0, 2) == "1.23 k"` and `si_format(0.5, 1) == "500.0 m"`.
///
/// Zero and non-finite values are printed without a prefix.
#[must_use]
pub fn si_format(value: f64, precision: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{value:.precision$}");
    }

    #[allow(clippy::cast_possible_truncation)]
    let mut exp3 = ((value.abs().log10() / 3.0).floor() as i32).clamp(-8, 8);
    let mut scaled = value / 10f64.powi(exp3 * 3);

    // 999.996 at precision 2 would print as "1000.00"
    let unit = 10f64.powi(i32::try_from(precision).unwrap_or(i32::MAX));
    if exp3 < 8 && (scaled.abs() * unit).round() / unit >= 1000.0 {
        exp3 += 1;
        scaled /= 1000.0;
    }

    #[allow(clippy::cast_sign_loss)]
    let prefix = SI_PREFIXES[(exp3 + 8) as usize];
    if prefix.is_empty() {
        format!("{scaled:.precision$}")
    } else {
        format!("{scaled:.precision$} {prefix}")
    }
}

fn table_rows<T: Real>(s: &Summary<T>) -> [(&'static str, String); 7] {
    [
        ("sum", s.sum.to_string()),
        ("mean", s.mean.to_string()),
        ("std", s.std.to_string()),
        ("min", s.min.to_string()),
        ("max", s.max.to_string()),
        ("count", s.count.to_string()),
        ("non-zero count", s.non_zero_count.to_string()),
    ]
}

#[allow(clippy::cast_precision_loss)]
fn si_rows<T: Real>(s: &Summary<T>, precision: usize) -> [(&'static str, String); 7] {
    [
        ("sum", si_format(s.sum.to_f64_lossy(), precision)),
        ("mean", si_format(s.mean.to_f64_lossy(), precision)),
        ("std", si_format(s.std.to_f64_lossy(), precision)),
        ("min", si_format(s.min.to_f64_lossy(), precision)),
        ("max", si_format(s.max.to_f64_lossy(), precision)),
        ("count", si_format(s.count as f64, precision)),
        ("non-zero count", si_format(s.non_zero_count as f64, precision)),
    ]
}

fn write_table(f: &mut impl fmt::Write, rows: &[(&str, String)]) -> fmt::Result {
    writeln!(f, "|{:<LABEL_WIDTH$} | {:<VALUE_WIDTH$}|", "Stat", "Value")?;
    writeln!(f, "|{}|{}:|", "-".repeat(LABEL_WIDTH + 1), "-".repeat(VALUE_WIDTH))?;
    for (label, value) in rows {
        writeln!(f, "|{label:>LABEL_WIDTH$} |{value:>VALUE_WIDTH$}|")?;
    }
    Ok(())
}

impl<T: Real> fmt::Display for Summary<T> {
    /// A two-column Markdown table.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_table(f, &table_rows(self))
    }
}

impl<T: Real> Summary<T> {
    /// The [`Display`](fmt::Display) table with every value SI-prefixed.
    #[must_use]
    pub fn to_si_string(&self, precision: usize) -> String {
        let mut out = String::new();
        // writing into a String cannot fail
        let _ = write_table(&mut out, &si_rows(self, precision));
        out
    }

    /// The summary as a JSON object.
    ///
    /// Infinite bounds (empty input) serialize as `null`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl<T: Real> fmt::Display for OrderStats<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "min1={} min2={} max1={} max2={}",
            self.min1, self.min2, self.max1, self.max2
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combiners::StatsAccumulator;

    #[test]
    fn si_prefixes() {
        assert_eq!(si_format(1234.0, 2), "1.23 k");
        assert_eq!(si_format(0.5, 1), "500.0 m");
        assert_eq!(si_format(-2.5e6, 1), "-2.5 M");
        assert_eq!(si_format(42.0, 0), "42");
        assert_eq!(si_format(0.0, 2), "0.00");
    }

    #[test]
    fn si_rounding_carries_into_next_prefix() {
        assert_eq!(si_format(999.999, 2), "1.00 k");
    }

    #[test]
    fn table_lists_every_field() {
        let s = Summary::from_accumulator(StatsAccumulator::of(3.0_f64));
        let text = s.to_string();
        for label in ["sum", "mean", "std", "min", "max", "count", "non-zero count"] {
            assert!(text.contains(label), "missing {label} in\n{text}");
        }
        assert_eq!(text.lines().count(), 9);
    }

    #[test]
    fn json_round_trips_fields() {
        let acc = StatsAccumulator::of(2.0_f64).merge(StatsAccumulator::of(4.0));
        let s = Summary::from_accumulator(acc);
        let v = s.to_json();
        assert_eq!(v["count"], 2);
        assert_eq!(v["mean"], 3.0);
    }
}
