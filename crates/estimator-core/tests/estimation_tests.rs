//! End-to-end estimation tests driven by serialized requests.

use estimator_core::{
    classify, Bill, Category, CuttingPlanner, EstimationRequest, Estimator, EstimatorConfig,
    PlanRequest, TrackType,
};
use pretty_assertions::assert_eq;

const TWO_TRACK_REQUEST: &str = r#"
track_type: two_track
min_waste: 36
stock:
  small: true
  large: true
categories:
  Track:
    required_cuts: [48, 72, 48, 72]
  Interlock:
    required_cuts: [60, 60]
    extra_sizes: [130]
  V Channel:
    required_cuts: [200, 24]
materials:
  Track:
    pipe_type: Domal 2 Track
    rate: 250
    weights: { small: 1.8, large: 1.92 }
  Interlock:
    pipe_type: Interlock 19mm
    rate: 260
    weights: { small: 0.9, large: 0.96 }
"#;

fn load_request(yaml: &str) -> EstimationRequest {
    serde_yaml::from_str(yaml).expect("request should parse")
}

fn run(yaml: &str) -> Bill {
    Estimator::new(load_request(yaml), EstimatorConfig::default())
        .unwrap()
        .estimate()
}

#[test]
fn parses_request_defaults() {
    let request = load_request(
        r#"
categories:
  Shutter:
    required_cuts: [90]
"#,
    );

    assert_eq!(request.track_type, TrackType::TwoTrack);
    assert_eq!(request.min_waste, 36.0);
    assert_eq!(request.stock.sizes(), vec![180.0, 192.0]);
    assert!(request.materials.is_empty());
}

#[test]
fn two_track_bill() {
    let bill = run(TWO_TRACK_REQUEST);

    assert_eq!(
        bill.estimations.keys().copied().collect::<Vec<_>>(),
        vec![Category::Track, Category::Interlock, Category::VChannel]
    );

    let track = &bill.estimations[&Category::Track];
    assert_eq!(track.total_weight, 2.4);
    assert_eq!(track.total_amount, 600.0);

    // Both interlock cuts fit the 130" offcut with 10" to spare
    let interlock = &bill.estimations[&Category::Interlock];
    assert_eq!(interlock.used_extra_sizes, vec![130.0]);
    assert_eq!(interlock.summary.extra.full_pipes, 1);
    assert_eq!(interlock.summary.total_inches, 130.0);
    assert_eq!(interlock.total_weight, 0.65);
    assert_eq!(interlock.total_amount, 169.0);

    let v_channel = &bill.estimations[&Category::VChannel];
    assert_eq!(v_channel.unassigned_cuts, vec![200.0]);
    assert_eq!(v_channel.total_amount, 0.0);

    assert_eq!(bill.total_amount, 769.0);
    assert_eq!(bill.total_weight, 3.05);
    assert_eq!(bill.unassigned_cuts(), 1);
}

#[test]
fn bill_serializes_category_labels() {
    let bill = run(TWO_TRACK_REQUEST);
    let json = serde_json::to_value(&bill).unwrap();

    let estimations = json["estimations"].as_object().unwrap();
    assert!(estimations.contains_key("V Channel"));
    assert_eq!(estimations["Track"]["pipe_type"], "Domal 2 Track");
    assert_eq!(estimations["Track"]["large"]["full_pipes"], 1);
    assert_eq!(estimations["Track"]["total_inches"], 240.0);
}

#[test]
fn every_cut_is_placed_or_reported() {
    let required = vec![
        62.5, 62.5, 62.5, 62.5, 41.0, 41.0, 41.0, 41.0, 190.0, 250.0, 12.0,
    ];
    let request = PlanRequest {
        required_cuts: required.clone(),
        stock_sizes: vec![180.0, 192.0],
        extra_sizes: vec![70.0],
    };
    let plan = CuttingPlanner::new(request, EstimatorConfig::default())
        .unwrap()
        .plan()
        .unwrap();

    let mut seen: Vec<f64> = plan
        .results
        .iter()
        .flat_map(|result| result.cuts.iter().copied())
        .chain(plan.unassigned_cuts.iter().copied())
        .collect();
    seen.sort_by(f64::total_cmp);

    let mut expected = required;
    expected.sort_by(f64::total_cmp);

    assert_eq!(seen, expected);
    assert_eq!(plan.unassigned_cuts, vec![250.0]);
    assert!(plan.used_extra_sizes.len() <= 1);

    for cutting in classify(&plan.results, 36.0) {
        assert_ne!(cutting.full, cutting.partial);
        assert!(cutting.wastage >= 0.0);
    }
}
