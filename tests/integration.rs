//! End-to-end tests: label rows, encode, train, predict, and run the
//! monthly-aggregate statistics the analytics views depend on.

use prever::prelude::*;

/// Ten synthetic history rows: six equipment incidents (positives against
/// the equipment target) whose reporters previously filed equipment
/// incidents, four others with different histories. Ordinal level is 3
/// throughout; prior counts range 0..=5.
fn training_rows() -> Vec<LabeledRow> {
    let target = Category::Equipment;
    let positives = [
        (PrevCategory::Equipment, 3_u32),
        (PrevCategory::Equipment, 4),
        (PrevCategory::Equipment, 5),
        (PrevCategory::Equipment, 3),
        (PrevCategory::Equipment, 4),
        (PrevCategory::Equipment, 5),
    ];
    let negatives = [
        (Category::Services, PrevCategory::None, 0_u32),
        (Category::Infrastructure, PrevCategory::Services, 1),
        (Category::Other, PrevCategory::None, 0),
        (Category::Services, PrevCategory::Services, 1),
    ];

    let mut rows = Vec::new();
    for (prev, prior) in positives {
        rows.push(LabeledRow::for_target(
            Category::Equipment,
            prev,
            prior,
            3,
            target,
        ));
    }
    for (category, prev, prior) in negatives {
        rows.push(LabeledRow::for_target(category, prev, prior, 3, target));
    }
    rows
}

#[test]
fn trained_model_separates_majority_pattern() {
    let rows = training_rows();
    let model = LogisticTrainer::new().fit(&rows).expect("10 rows");

    // Majority (equipment-like) pattern scores above 0.5.
    let p_majority = model.predict_proba(3, 4, PrevCategory::Equipment);
    assert!(p_majority > 0.5, "majority pattern scored {p_majority}");

    // Opposite pattern scores below 0.5.
    let p_opposite = model.predict_proba(3, 0, PrevCategory::None);
    assert!(p_opposite < 0.5, "opposite pattern scored {p_opposite}");
}

#[test]
fn model_is_reproducible_with_default_config() {
    let rows = training_rows();
    let trainer = LogisticTrainer::new();
    let a = trainer.fit(&rows).expect("10 rows");
    let b = trainer.fit(&rows).expect("10 rows");
    assert_eq!(a, b);
}

#[test]
fn model_reports_training_artifacts() {
    let rows = training_rows();
    let model = LogisticTrainer::new().fit(&rows).expect("10 rows");

    assert_eq!(model.weights().len(), FEATURE_LEN);
    assert_eq!(model.max_prior_count(), 5);
    // Equipment-history weight should exceed the no-history weight given
    // the training pattern.
    let w = model.weights();
    let w_prev_equipment = w[3 + PrevCategory::Equipment.one_hot_index()];
    let w_prev_none = w[3 + PrevCategory::None.one_hot_index()];
    assert!(w_prev_equipment > w_prev_none);
}

#[test]
fn insufficient_rows_never_produce_a_model() {
    let rows = training_rows();
    let err = LogisticTrainer::new()
        .fit(&rows[..7])
        .expect_err("7 rows is below the guard");
    assert!(matches!(
        err,
        PreverError::InsufficientData {
            needed: 8,
            actual: 7
        }
    ));
}

#[test]
fn trained_model_roundtrips_through_serde() {
    let rows = training_rows();
    let model = LogisticTrainer::new().fit(&rows).expect("10 rows");

    let json = serde_json::to_string(&model).expect("serializable");
    let back: CategoryModel = serde_json::from_str(&json).expect("deserializable");
    assert_eq!(back, model);

    let p_before = model.predict_proba(3, 2, PrevCategory::Equipment);
    let p_after = back.predict_proba(3, 2, PrevCategory::Equipment);
    assert_eq!(p_before.to_bits(), p_after.to_bits());
}

#[test]
fn monthly_series_flow_into_correlation_and_regression() {
    // Reports per month and active students per month, as the analytics
    // backend serves them; one month is missing from each series.
    let reports = [
        ("2025-01", 11.0),
        ("2025-02", 9.0),
        ("2025-03", 15.0),
        ("2025-04", 13.0),
        ("2025-05", 18.0),
    ];
    let students = [
        ("2025-02", 350.0),
        ("2025-03", 520.0),
        ("2025-04", 470.0),
        ("2025-05", 610.0),
        ("2025-06", 590.0),
    ];

    let (xs, ys) = align_by_key(&students, &reports);
    assert_eq!(xs.len(), 4);

    let r = pearson(&xs, &ys);
    assert!(r > 0.9, "strongly related series scored r = {r}");

    let fit = linear_regression(&xs, &ys);
    assert!(fit.valid);
    assert!(fit.slope > 0.0);
    // Fitted line predicts a plausible report count for a future month.
    let projected = fit.predict(700.0);
    assert!(projected > 15.0 && projected < 40.0, "projected {projected}");
}

#[test]
fn degenerate_monthly_series_stay_in_band() {
    // A single shared month: correlation undefined, regression invalid,
    // and neither panics.
    let reports = [("2025-01", 11.0)];
    let students = [("2025-01", 350.0)];
    let (xs, ys) = align_by_key(&students, &reports);

    assert!(pearson(&xs, &ys).is_nan());
    let fit = linear_regression(&xs, &ys);
    assert!(!fit.valid);
    assert_eq!(fit.defect, Some(FitDefect::TooFewPoints));
}
