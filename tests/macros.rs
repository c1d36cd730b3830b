//! Assertion macros shared by the integration tests.

/// Assert that two floats (`f32` or `f64`) differ by at most an absolute
/// tolerance, `1e-10` unless given.
///
/// Use it for means, standard deviations and sums, whose last bits depend on
/// how the input was partitioned. Counts should use `assert_eq!`.
///
/// ```ignore
/// assert_approx_eq!(summary.mean, 3.0);
/// assert_approx_eq!(summary.std, 1.58114, 1e-5);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($actual:expr, $expected:expr) => {
        assert_approx_eq!($actual, $expected, 1e-10)
    };
    ($actual:expr, $expected:expr, $epsilon:expr) => {
        let actual = $actual;
        let expected = $expected;
        let epsilon = $epsilon;
        let diff = (actual - expected).abs();
        assert!(
            diff <= epsilon,
            "values differ by more than {:?}\n  actual: {:?}\nexpected: {:?}\n    diff: {:?}",
            epsilon,
            actual,
            expected,
            diff
        );
    };
}
