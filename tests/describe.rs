//! Descriptive statistics end to end.

use anyhow::Result;
use ironstats::testing::{assert_summary_approx_eq, reference_summary};
use ironstats::{
    CombineFn, Combiner, Describe, ExecMode, LiftableCombiner, Runner, StatsAccumulator,
    describe_f32, describe_f64,
};

#[macro_use]
mod macros;

fn runners() -> Vec<Runner> {
    vec![
        Runner::sequential(),
        Runner::parallel(None, Some(1)),
        Runner::parallel(None, Some(3)),
        Runner::parallel(Some(2), Some(7)),
        Runner::parallel(None, Some(16)).with_fanout(2),
    ]
}

#[test]
fn five_consecutive_integers() -> Result<()> {
    for r in runners() {
        let s = r.run(&[1.0_f64, 2.0, 3.0, 4.0, 5.0], &Describe::<f64>::new())?;
        assert_approx_eq!(s.sum, 15.0);
        assert_approx_eq!(s.mean, 3.0);
        assert_approx_eq!(s.std, 2.5_f64.sqrt());
        assert_approx_eq!(s.std, 1.58114, 1e-5);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 5.0);
        assert_eq!(s.count, 5);
        assert_eq!(s.non_zero_count, 5);
    }
    Ok(())
}

#[test]
fn empty_input_is_a_documented_degenerate_summary() -> Result<()> {
    for r in runners() {
        let s = r.run(&[] as &[f64], &Describe::<f64>::new())?;
        assert!(s.is_empty());
        assert_eq!(s.count, 0);
        assert_eq!(s.sum, 0.0);
        assert_eq!(s.mean, 0.0);
        assert_eq!(s.std, 0.0);
        assert!(!s.mean.is_nan());
        assert_eq!(s.min, f64::INFINITY);
        assert_eq!(s.max, f64::NEG_INFINITY);
    }
    Ok(())
}

#[test]
fn constant_input_has_exactly_zero_std() -> Result<()> {
    for r in runners() {
        let s = r.run(&[2.0_f64, 2.0, 2.0, 2.0], &Describe::<f64>::new())?;
        assert_eq!(s.std, 0.0);
    }
    // rounding in the running moments leaves at most a tiny spread
    let s = describe_f64(&vec![0.1_f64; 1000])?;
    assert!(s.std >= 0.0 && s.std < 1e-6, "std = {}", s.std);
    let s = describe_f32(&vec![0.3_f32; 777])?;
    assert!(s.std >= 0.0 && s.std < 1e-2, "std = {}", s.std);
    Ok(())
}

#[test]
fn zeros_are_not_counted_as_non_zero() -> Result<()> {
    for r in runners() {
        let s = r.run(&[0.0_f64, 0.0, 3.0, 4.0], &Describe::<f64>::new())?;
        assert_eq!(s.count, 4);
        assert_eq!(s.non_zero_count, 2);
    }
    Ok(())
}

#[test]
fn negative_zero_counts_as_zero() {
    let d = Describe::<f64>::new();
    let acc = d.combine(d.lift(-0.0), d.lift(0.0));
    assert_eq!(acc.non_zero_count, 0);
}

#[test]
fn single_precision_matches_double_within_tolerance() -> Result<()> {
    let xs64: Vec<f64> = (0..5000_i32).map(|i| f64::from(i % 97) * 0.25 - 7.0).collect();
    let xs32: Vec<f32> = xs64.iter().map(|&v| v as f32).collect();
    let s64 = describe_f64(&xs64)?;
    let s32 = describe_f32(&xs32)?;
    assert_eq!(s32.count, s64.count);
    assert_eq!(s32.non_zero_count, s64.non_zero_count);
    assert_approx_eq!(f64::from(s32.mean), s64.mean, 1e-3);
    assert_approx_eq!(f64::from(s32.std), s64.std, 1e-2);
    Ok(())
}

#[test]
fn all_execution_modes_agree_with_reference() -> Result<()> {
    let xs: Vec<f64> = (0..10_000)
        .map(|i| ((i * 7919) % 1013) as f64 / 17.0 - 20.0)
        .collect();
    let expected = reference_summary(&xs);
    for r in runners() {
        let classic = r.run(&xs, &Describe::<f64>::new())?;
        let lifted = r.run_lifted(&xs, &Describe::<f64>::new())?;
        assert_summary_approx_eq(&classic, &expected, 1e-9);
        assert_summary_approx_eq(&lifted, &expected, 1e-9);
    }
    Ok(())
}

#[test]
fn run_by_applies_a_transform_before_lifting() -> Result<()> {
    let d = Describe::<f64>::new();
    let xs = [1.0_f64, -2.0, 3.0];
    let s = Runner::default().run_by(&xs, |&v| v.abs(), &d)?;
    assert_eq!(s.min, 1.0);
    assert_eq!(s.sum, 6.0);
    Ok(())
}

#[test]
fn accumulators_merge_across_separate_runs() -> Result<()> {
    let d = Describe::<f64>::new();
    let r = Runner::default();
    let left = r.reduce(&[1.0_f64, 2.0, 3.0], &d)?;
    let right = r.reduce_lifted(&[4.0_f64, 5.0], &d)?;
    let s = d.finish(d.combine(left, right));
    assert_eq!(s.count, 5);
    assert_approx_eq!(s.mean, 3.0);
    Ok(())
}

#[test]
fn build_from_group_of_empty_slice_is_identity() {
    let d = Describe::<f32>::new();
    assert_eq!(d.build_from_group(&[]), StatsAccumulator::empty());
}

#[test]
fn accumulator_serializes_with_serde() -> Result<()> {
    let acc = StatsAccumulator::of(2.5_f64);
    let json = serde_json::to_string(&acc)?;
    let back: StatsAccumulator<f64> = serde_json::from_str(&json)?;
    assert_eq!(back, acc);
    Ok(())
}

#[test]
fn default_runner_is_parallel() {
    let r = Runner::default();
    assert!(matches!(r.mode, ExecMode::Parallel { .. }));
    assert!(r.default_partitions >= 4);
}
