//! Floating-point element types accepted by the statistics combiners.
//!
//! Every accumulator in this crate is generic over a [`Real`], so the same
//! algebra runs in single or double precision. Only `f32` and `f64` implement
//! it.

use num_traits::Float;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::{Debug, Display};

/// A floating-point sample type (`f32` or `f64`).
pub trait Real:
    Float + Default + Debug + Display + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// Convert an element count into this precision.
    fn from_count(n: u64) -> Self;

    /// Widen to `f64` for presentation.
    fn to_f64_lossy(self) -> f64;
}

macro_rules! impl_real {
    ($($t:ty),* $(,)?) => {
        $(
            impl Real for $t {
                #[inline]
                #[allow(clippy::cast_precision_loss)]
                fn from_count(n: u64) -> Self {
                    n as $t
                }

                #[inline]
                fn to_f64_lossy(self) -> f64 {
                    f64::from(self)
                }
            }
        )*
    };
}

impl_real!(f32, f64);
