//! One-call entry points for the common reductions.
//!
//! Each function runs the default (parallel) [`Runner`] over a slice:
//!
//! - `describe_f32` / `describe_f64` -- [`Summary`] of the values.
//! - `order_stats_f32` / `order_stats_f64` -- two smallest and two largest values.
//!
//! ```
//! use ironstats::helpers::{describe_f64, order_stats_f64};
//!
//! let s = describe_f64(&[1.0, 2.0, 3.0, 4.0, 5.0])?;
//! assert_eq!(s.mean, 3.0);
//!
//! let o = order_stats_f64(&[5.0, 1.0, 4.0, 2.0, 3.0])?;
//! assert_eq!((o.min1, o.min2, o.max1, o.max2), (1.0, 2.0, 4.0, 5.0));
//! # anyhow::Result::<()>::Ok(())
//! ```

use crate::Runner;
use crate::combiners::{Describe, MinMax2, OrderStats, Summary};
use anyhow::Result;

macro_rules! impl_entry_points {
    ($($t:ident),+ $(,)?) => {
        paste::paste! {
            $(
                #[doc = concat!("Descriptive statistics of a `", stringify!($t), "` slice.")]
                ///
                /// # Errors
                ///
                /// Propagates runner errors (thread pool construction).
                pub fn [<describe_ $t>](values: &[$t]) -> Result<Summary<$t>> {
                    Runner::default().run_lifted(values, &Describe::<$t>::new())
                }

                #[doc = concat!("Two smallest and two largest values of a `", stringify!($t), "` slice.")]
                ///
                /// # Errors
                ///
                /// Propagates runner errors (thread pool construction).
                pub fn [<order_stats_ $t>](values: &[$t]) -> Result<OrderStats<$t>> {
                    Runner::default().run(values, &MinMax2::<$t>::new())
                }
            )+
        }
    };
}

impl_entry_points!(f32, f64);
