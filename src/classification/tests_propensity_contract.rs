// =========================================================================
// FALSIFY-PROP: category-propensity training contracts
//
// Each test attempts to falsify one invariant of the trainer/model pair;
// assertion messages name the falsified contract.
//
// References:
//   - Bishop (2006) "Pattern Recognition and Machine Learning", ch. 4.3
// =========================================================================

use super::*;
use crate::encoding::Category;

fn mixed_rows() -> Vec<LabeledRow> {
    let target = Category::Infrastructure;
    let cases: [(Category, PrevCategory, u32, u8); 10] = [
        (Category::Infrastructure, PrevCategory::Infrastructure, 4, 2),
        (Category::Infrastructure, PrevCategory::Infrastructure, 3, 4),
        (Category::Infrastructure, PrevCategory::None, 5, 3),
        (Category::Infrastructure, PrevCategory::Infrastructure, 2, 1),
        (Category::Equipment, PrevCategory::Equipment, 0, 5),
        (Category::Equipment, PrevCategory::Services, 1, 2),
        (Category::Services, PrevCategory::Other, 0, 3),
        (Category::Services, PrevCategory::None, 1, 4),
        (Category::Other, PrevCategory::Equipment, 2, 2),
        (Category::Other, PrevCategory::Other, 0, 1),
    ];
    cases
        .into_iter()
        .map(|(c, p, n, l)| LabeledRow::for_target(c, p, n, l, target))
        .collect()
}

/// FALSIFY-PROP-001: Below the row guard, no model is ever produced
#[test]
fn falsify_prop_001_row_guard() {
    let rows = mixed_rows();
    for take in 0..DEFAULT_MIN_ROWS {
        let result = LogisticTrainer::new().fit(&rows[..take]);
        assert!(
            result.is_err(),
            "FALSIFIED PROP-001: {take} rows produced a model"
        );
    }
}

/// FALSIFY-PROP-002: At the row guard, training succeeds
#[test]
fn falsify_prop_002_guard_boundary() {
    let rows = mixed_rows();
    let result = LogisticTrainer::new().fit(&rows[..DEFAULT_MIN_ROWS]);
    assert!(
        result.is_ok(),
        "FALSIFIED PROP-002: exactly {DEFAULT_MIN_ROWS} rows was rejected"
    );
}

/// FALSIFY-PROP-003: Same rows, same order => bit-identical weights
#[test]
fn falsify_prop_003_determinism() {
    let rows = mixed_rows();
    let trainer = LogisticTrainer::new();
    let a = trainer.fit(&rows).expect("10 rows");
    let b = trainer.fit(&rows).expect("10 rows");
    for (j, (wa, wb)) in a.weights().iter().zip(b.weights().iter()).enumerate() {
        assert!(
            wa.to_bits() == wb.to_bits(),
            "FALSIFIED PROP-003: weight {j} differs between runs ({wa} vs {wb})"
        );
    }
}

/// FALSIFY-PROP-004: Trained weights are finite
#[test]
fn falsify_prop_004_finite_weights() {
    let model = LogisticTrainer::new()
        .fit(&mixed_rows())
        .expect("10 rows");
    for (j, w) in model.weights().iter().enumerate() {
        assert!(
            w.is_finite(),
            "FALSIFIED PROP-004: weight {j} is not finite ({w})"
        );
    }
}

/// FALSIFY-PROP-005: Probabilities are probabilities
#[test]
fn falsify_prop_005_probability_range() {
    let model = LogisticTrainer::new()
        .fit(&mixed_rows())
        .expect("10 rows");
    for level in 1..=5_u8 {
        for prev in PrevCategory::ALL {
            let p = model.predict_proba(level, 3, prev);
            assert!(
                (0.0..=1.0).contains(&p),
                "FALSIFIED PROP-005: predict_proba = {p} for level {level}"
            );
        }
    }
}

/// FALSIFY-PROP-006: Prediction does not mutate the model
#[test]
fn falsify_prop_006_predict_is_pure() {
    let model = LogisticTrainer::new()
        .fit(&mixed_rows())
        .expect("10 rows");
    let before = *model.weights();
    let p1 = model.predict_proba(2, 4, PrevCategory::Infrastructure);
    let p2 = model.predict_proba(2, 4, PrevCategory::Infrastructure);
    assert_eq!(
        p1.to_bits(),
        p2.to_bits(),
        "FALSIFIED PROP-006: repeated prediction changed its own result"
    );
    assert_eq!(
        &before,
        model.weights(),
        "FALSIFIED PROP-006: prediction mutated the weights"
    );
}

/// FALSIFY-PROP-007: Prediction normalizes by the stored training constant
#[test]
fn falsify_prop_007_stored_normalizer() {
    let model = LogisticTrainer::new()
        .fit(&mixed_rows())
        .expect("10 rows");
    // Training priors peak at 5; a probe with prior 50 must be scaled by
    // the stored 5, not refitted to its own value, so the count feature
    // blows past 1 and the probability shifts accordingly.
    assert_eq!(model.max_prior_count(), 5);
    let p_in_range = model.predict_proba(3, 5, PrevCategory::Infrastructure);
    let p_beyond = model.predict_proba(3, 50, PrevCategory::Infrastructure);
    assert!(
        (p_in_range - p_beyond).abs() > 1e-6,
        "FALSIFIED PROP-007: a 10x prior count did not move the probability"
    );
}
