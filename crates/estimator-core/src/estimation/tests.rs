use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn cutting(pipe_length: f64, pipe_cuts: &[f64], full: bool) -> CuttingEstimation {
    CuttingEstimation {
        pipe_length,
        pipe_cuts: pipe_cuts.to_vec(),
        wastage: pipe_length - pipe_cuts.iter().sum::<f64>(),
        full,
        partial: !full,
    }
}

fn track_material() -> MaterialRate {
    MaterialRate {
        pipe_type: "Domal 2 Track".to_string(),
        rate: 250.0,
        weights: PipeWeights::new(1.8, 1.92),
    }
}

fn request(categories: Vec<(Category, Vec<f64>)>) -> EstimationRequest {
    EstimationRequest {
        track_type: TrackType::TwoTrack,
        min_waste: DEFAULT_MIN_WASTE,
        stock: StockOptions::default(),
        categories: categories
            .into_iter()
            .map(|(category, cuts)| {
                (
                    category,
                    CategoryCuts {
                        required_cuts: cuts,
                        extra_sizes: vec![],
                    },
                )
            })
            .collect(),
        materials: RateTable::new()
            .with(Category::Track, track_material())
            .with(
                Category::Shutter,
                MaterialRate {
                    pipe_type: "Shutter 19mm".to_string(),
                    rate: 300.0,
                    weights: PipeWeights::new(1.0, 1.1),
                },
            ),
    }
}

#[test]
fn test_weight_scales_with_billed_inches() {
    let weights = PipeWeights::new(1.0, 1.1);

    assert!(approx(weights.pipe_weight(&cutting(192.0, &[150.0, 30.0], true)), 1.1));
    assert!(approx(weights.pipe_weight(&cutting(180.0, &[45.0, 45.0], false)), 0.5));
}

#[test]
fn test_extra_pipes_use_long_profile_weight() {
    let weights = PipeWeights::new(1.0, 1.92);
    assert!(approx(weights.pipe_weight(&cutting(100.0, &[96.0], true)), 1.0));

    let small_only = PipeWeights::new(1.8, 0.0);
    assert!(approx(small_only.pipe_weight(&cutting(100.0, &[96.0], true)), 1.0));
}

#[test]
fn test_zero_length_pipe_weighs_nothing() {
    let weights = PipeWeights::new(1.0, 1.1);
    assert_eq!(weights.pipe_weight(&cutting(0.0, &[], true)), 0.0);
}

#[test]
fn test_round_to_two_decimals_is_idempotent() {
    for value in [0.0, 1.234, 2.675, 10.005, 599.999, 123456.789] {
        let once = round_to_two_decimals(value);
        assert_eq!(round_to_two_decimals(once), once);
    }
    assert_eq!(round_to_two_decimals(1.234), 1.23);
    assert_eq!(round_to_two_decimals(1.235), 1.24);
    assert_eq!(round_to_two_decimals(599.999), 600.0);
}

#[test]
fn test_estimate_single_window_track() {
    let plan_request = PlanRequest {
        required_cuts: vec![48.0, 72.0, 48.0, 72.0],
        stock_sizes: StockOptions::default().sizes(),
        extra_sizes: vec![],
    };
    let material = track_material();
    let estimation = estimate(
        Category::Track,
        plan_request,
        Some(&material),
        DEFAULT_MIN_WASTE,
        &EstimatorConfig::default(),
    )
    .unwrap();

    assert_eq!(estimation.pipe_type, "Domal 2 Track");
    assert_eq!(estimation.rate, 250.0);
    assert_eq!(estimation.summary.large.full_pipes, 1);
    assert_eq!(estimation.summary.small.partial_pipes, 1);
    assert_eq!(estimation.summary.total_inches, 240.0);
    // 1.92 kg for the full 192" pipe plus 48" of the 1.8 kg 180" profile
    assert_eq!(estimation.total_weight, 2.4);
    assert_eq!(estimation.total_amount, 600.0);
    assert!(estimation.unassigned_cuts.is_empty());
}

#[test]
fn test_missing_material_prices_at_zero() {
    let plan_request = PlanRequest {
        required_cuts: vec![60.0, 60.0],
        stock_sizes: vec![180.0],
        extra_sizes: vec![],
    };
    let estimation = estimate(
        Category::Interlock,
        plan_request,
        None,
        DEFAULT_MIN_WASTE,
        &EstimatorConfig::default(),
    )
    .unwrap();

    assert_eq!(estimation.pipe_type, "Interlock");
    assert_eq!(estimation.total_weight, 0.0);
    assert_eq!(estimation.total_amount, 0.0);
    assert_eq!(estimation.summary.total_pipes(), 1);
}

#[test]
fn test_estimator_sums_categories() {
    let estimator = Estimator::new(
        request(vec![
            (Category::Track, vec![48.0, 72.0, 48.0, 72.0]),
            (Category::Shutter, vec![90.0, 90.0]),
        ]),
        EstimatorConfig::default(),
    )
    .unwrap();
    let bill = estimator.estimate();

    assert_eq!(bill.estimations.len(), 2);
    assert!(bill.failures.is_empty());

    // Shutter: one full 180" pipe at 1.0 kg, 300 per kg
    let shutter = &bill.estimations[&Category::Shutter];
    assert_eq!(shutter.total_weight, 1.0);
    assert_eq!(shutter.total_amount, 300.0);

    assert_eq!(bill.total_weight, 3.4);
    assert_eq!(bill.total_amount, 900.0);
    assert_eq!(bill.total_pipes(), 3);
}

#[test]
fn test_estimator_skips_categories_outside_track_type() {
    let estimator = Estimator::new(
        request(vec![
            (Category::Track, vec![96.0]),
            (Category::Dp, vec![96.0]),
        ]),
        EstimatorConfig::default(),
    )
    .unwrap();
    let bill = estimator.estimate();

    assert!(bill.estimations.contains_key(&Category::Track));
    assert!(!bill.estimations.contains_key(&Category::Dp));
    assert!(bill.failures.is_empty());
}

#[test]
fn test_failing_category_does_not_stop_others() {
    let estimator = Estimator::new(
        request(vec![
            (Category::Track, vec![72.0, 200.0]),
            (Category::Shutter, vec![90.0, 90.0]),
        ]),
        EstimatorConfig::default().with_strict(true),
    )
    .unwrap();
    let bill = estimator.estimate();

    assert!(bill.failures.contains_key(&Category::Track));
    assert!(bill.failures[&Category::Track].contains("200"));
    assert!(bill.estimations.contains_key(&Category::Shutter));
    assert_eq!(bill.total_amount, 300.0);
}

#[test]
fn test_unassigned_cuts_surface_in_bill() {
    let estimator = Estimator::new(
        request(vec![(Category::Track, vec![72.0, 200.0])]),
        EstimatorConfig::default(),
    )
    .unwrap();
    let bill = estimator.estimate();

    assert_eq!(
        bill.estimations[&Category::Track].unassigned_cuts,
        vec![200.0]
    );
    assert_eq!(bill.unassigned_cuts(), 1);
}

#[test]
fn test_estimator_rejects_invalid_requests() {
    let mut negative = request(vec![(Category::Track, vec![72.0])]);
    negative.min_waste = -1.0;
    assert!(matches!(
        Estimator::new(negative, EstimatorConfig::default()),
        Err(EstimatorError::InvalidInput(_))
    ));

    let mut no_stock = request(vec![(Category::Track, vec![72.0])]);
    no_stock.stock = StockOptions {
        small: false,
        large: false,
    };
    assert!(matches!(
        Estimator::new(no_stock, EstimatorConfig::default()),
        Err(EstimatorError::InvalidInput(_))
    ));
}

#[test]
fn test_track_types_list_their_categories() {
    assert!(TrackType::TwoTrack.uses(Category::Sp));
    assert!(!TrackType::TwoTrack.uses(Category::Dp));
    assert!(TrackType::ThreeTrack.uses(Category::Dp));
    assert!(TrackType::SplitTrack.uses(Category::TrackTop));
    assert!(!TrackType::SplitTrack.uses(Category::Track));
}
