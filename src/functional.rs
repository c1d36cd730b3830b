//! Small elementwise functions to pair with [`Runner::reduce_by`](crate::Runner::reduce_by)
//! or a plain `map` before lifting.
//!
//! They are ordinary generic functions, so they are statically dispatched and
//! inline into the reduction loop.
//!
//! ```
//! use ironstats::functional::square;
//! use ironstats::{CombineFn, Describe, Runner};
//!
//! let d = Describe::<f64>::new();
//! let acc = Runner::sequential().reduce_by(&[1.0, -2.0, 3.0], |&v| d.lift(square(v)), &d)?;
//! assert_eq!(acc.sum, 14.0);
//! # anyhow::Result::<()>::Ok(())
//! ```

use num_traits::{Float, Signed};
use std::ops::{Div, Mul};

#[inline]
pub fn square<T: Mul<Output = T> + Copy>(a: T) -> T {
    a * a
}

#[inline]
pub fn absolute<T: Signed>(a: T) -> T {
    a.abs()
}

#[inline]
pub fn square_root<T: Float>(a: T) -> T {
    a.sqrt()
}

#[inline]
pub fn power<T: Float>(a: T, b: T) -> T {
    a.powf(b)
}

/// `b / a`.
#[inline]
pub fn reverse_divides<T: Div<Output = T>>(a: T, b: T) -> T {
    b / a
}

#[inline]
pub fn duplicate<T: Clone>(a: T) -> (T, T) {
    (a.clone(), a)
}

/// The pair ordered ascending.
#[inline]
pub fn minmax<T: PartialOrd>(a: T, b: T) -> (T, T) {
    if b < a { (b, a) } else { (a, b) }
}

#[inline]
pub fn positive<T: PartialOrd + Default>(a: &T) -> bool {
    *a > T::default()
}

#[inline]
pub fn negative<T: PartialOrd + Default>(a: &T) -> bool {
    *a < T::default()
}

#[inline]
pub fn non_positive<T: PartialOrd + Default>(a: &T) -> bool {
    *a <= T::default()
}

#[inline]
pub fn non_negative<T: PartialOrd + Default>(a: &T) -> bool {
    *a >= T::default()
}

/// Predicate `v < constant`.
pub fn less_than<T: PartialOrd>(constant: T) -> impl Fn(&T) -> bool {
    move |v| *v < constant
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_helpers() {
        assert_eq!(square(-3), 9);
        assert_eq!(absolute(-2.5_f64), 2.5);
        assert_eq!(square_root(16.0_f32), 4.0);
        assert_eq!(power(2.0_f64, 10.0), 1024.0);
        assert_eq!(reverse_divides(4.0, 2.0), 0.5);
        assert_eq!(duplicate(7), (7, 7));
        assert_eq!(minmax(9, 1), (1, 9));
        assert_eq!(minmax(1, 9), (1, 9));
    }

    #[test]
    fn sign_predicates() {
        let xs = [-1.0, 0.0, 2.0];
        assert_eq!(xs.iter().filter(|v| positive(*v)).count(), 1);
        assert_eq!(xs.iter().filter(|v| negative(*v)).count(), 1);
        assert_eq!(xs.iter().filter(|v| non_positive(*v)).count(), 2);
        assert_eq!(xs.iter().filter(|v| non_negative(*v)).count(), 2);
    }

    #[test]
    fn less_than_closure() {
        let below = less_than(3);
        assert!(below(&2));
        assert!(!below(&3));
    }
}
