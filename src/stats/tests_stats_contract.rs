// =========================================================================
// FALSIFY-STATS: correlation / simple-regression contracts
//
// Each test attempts to falsify one invariant of the pearson/OLS pair;
// assertion messages name the falsified contract.
//
// References:
//   - Freedman, Pisani, Purves (2007) "Statistics", ch. 8-12
// =========================================================================

use super::*;

/// FALSIFY-STATS-001: Self-correlation is 1 for any series with variance
#[test]
fn falsify_stats_001_self_correlation() {
    let series: [&[f32]; 3] = [
        &[1.0, 2.0],
        &[3.0, 1.0, 4.0, 1.0, 5.0],
        &[-7.5, 0.0, 12.25, 3.0],
    ];
    for x in series {
        let r = pearson(x, x);
        assert!(
            (r - 1.0).abs() < 1e-5,
            "FALSIFIED STATS-001: pearson(x, x) = {r}, expected 1"
        );
    }
}

/// FALSIFY-STATS-002: Correlation is symmetric in its arguments
#[test]
fn falsify_stats_002_symmetry() {
    let x = [1.0, 4.0, 2.0, 8.0, 5.0];
    let y = [3.0, 1.0, 7.0, 2.0, 9.0];
    let rxy = pearson(&x, &y);
    let ryx = pearson(&y, &x);
    assert!(
        (rxy - ryx).abs() < 1e-6,
        "FALSIFIED STATS-002: pearson(x, y) = {rxy} but pearson(y, x) = {ryx}"
    );
}

/// FALSIFY-STATS-003: Correlation lies in [-1, 1]
#[test]
fn falsify_stats_003_bounded() {
    let x = [0.5, 100.0, -3.0, 42.0, 7.0, 7.0];
    let y = [9.0, -2.0, 11.0, 0.0, 5.0, 6.0];
    let r = pearson(&x, &y);
    assert!(
        (-1.0 - 1e-6..=1.0 + 1e-6).contains(&r),
        "FALSIFIED STATS-003: pearson = {r} outside [-1, 1]"
    );
}

/// FALSIFY-STATS-004: Degenerate inputs yield NaN, never a finite lie
#[test]
fn falsify_stats_004_degenerate_is_nan() {
    assert!(
        pearson(&[1.0], &[1.0]).is_nan(),
        "FALSIFIED STATS-004: single observation produced a finite correlation"
    );
    assert!(
        pearson(&[2.0, 2.0, 2.0], &[1.0, 5.0, 9.0]).is_nan(),
        "FALSIFIED STATS-004: zero-variance x produced a finite correlation"
    );
}

/// FALSIFY-STATS-005: OLS recovers exact linear coefficients
#[test]
fn falsify_stats_005_ols_roundtrip() {
    let x: Vec<f32> = (0..20).map(|i| i as f32).collect();
    let y: Vec<f32> = x.iter().map(|&v| 3.0 + 2.0 * v).collect();
    let fit = linear_regression(&x, &y);
    assert!(fit.valid, "FALSIFIED STATS-005: exact line marked invalid");
    assert!(
        (fit.intercept - 3.0).abs() < 1e-3,
        "FALSIFIED STATS-005: intercept = {}, expected 3",
        fit.intercept
    );
    assert!(
        (fit.slope - 2.0).abs() < 1e-3,
        "FALSIFIED STATS-005: slope = {}, expected 2",
        fit.slope
    );
}

/// FALSIFY-STATS-006: Invalid fits always carry a defect reason
#[test]
fn falsify_stats_006_defect_iff_invalid() {
    let cases = [
        linear_regression(&[], &[]),
        linear_regression(&[1.0], &[1.0]),
        linear_regression(&[4.0, 4.0], &[1.0, 2.0]),
        linear_regression(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]),
    ];
    for fit in cases {
        assert_eq!(
            fit.valid,
            fit.defect.is_none(),
            "FALSIFIED STATS-006: valid = {} but defect = {:?}",
            fit.valid,
            fit.defect
        );
    }
}

/// FALSIFY-STATS-007: Degenerate flat fit passes through mean(y)
#[test]
fn falsify_stats_007_flat_fit_mean() {
    let fit = linear_regression(&[5.0, 5.0, 5.0], &[1.0, 2.0, 3.0]);
    assert!(
        (fit.intercept - 2.0).abs() < 1e-6,
        "FALSIFIED STATS-007: flat fit intercept = {}, expected mean(y) = 2",
        fit.intercept
    );
    assert_eq!(
        fit.slope, 0.0,
        "FALSIFIED STATS-007: flat fit has nonzero slope"
    );
}
