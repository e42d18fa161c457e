use rand::rngs::StdRng;
use rand::SeedableRng;

use kmrl_induction::config::engine_config::{EngineConfig, InductionConstraints, OptimizationWeights};
use kmrl_induction::core::induction::{check_constraints, optimize_fleet, optimize_train_induction};
use kmrl_induction::data::fleet_loader::read_fleet;
use kmrl_induction::data::mock_fleet::generate_mock_fleet;
use kmrl_induction::Bucket;

#[test]
fn uncleared_trains_never_enter_service() {
    let config = EngineConfig::default();
    for seed in 0..100 {
        let result = optimize_train_induction(&mut StdRng::seed_from_u64(seed), &config);
        for t in &result.service_trains {
            assert!(t.train.telecom_clearance && t.train.rolling_stock_clearance && t.train.signalling_clearance);
            assert!(t.score > config.service_score_threshold);
        }
    }
}

#[test]
fn every_train_lands_in_exactly_one_bucket() {
    let config = EngineConfig::default();
    let fleet = generate_mock_fleet(&mut StdRng::seed_from_u64(77), config.fleet_size);
    let result = optimize_fleet(&fleet, &config);

    assert_eq!(result.total_trains(), fleet.len());
    for train in &fleet {
        assert!(result.bucket_of(&train.id).is_some(), "{} was not assigned", train.id);
    }
}

#[test]
fn buckets_are_sorted_by_descending_score() {
    let result = optimize_train_induction(&mut StdRng::seed_from_u64(5), &EngineConfig::default());
    for bucket in [&result.service_trains, &result.standby_trains, &result.maintenance_trains] {
        for pair in bucket.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }
}

#[test]
fn default_weights_sum_to_one() {
    assert!((OptimizationWeights::default().sum() - 1.0).abs() < 1e-9);
}

#[test]
fn violations_match_bounds() {
    let constraints = InductionConstraints::default();
    for service in 0..30 {
        for maintenance in 0..10 {
            let violations = check_constraints(service, maintenance, &constraints);
            let in_bounds = (18..=22).contains(&service) && maintenance <= 6;
            assert_eq!(violations.is_empty(), in_bounds, "service {} maintenance {}", service, maintenance);
        }
    }
}

#[test]
fn small_fleet_reports_insufficient_service() {
    let config = EngineConfig { fleet_size: 10, ..EngineConfig::default() };
    let result = optimize_train_induction(&mut StdRng::seed_from_u64(1), &config);

    assert_eq!(result.total_trains(), 10);
    let expected = format!("Insufficient service trains: {} < 18", result.service_trains.len());
    assert_eq!(result.constraint_violations[0], expected);
    assert!(!result.recommendations.iter().any(|r| r.starts_with("All constraints satisfied")));
}

#[test]
fn loaded_fleet_plans_like_mock_fleet() {
    let csv = "\
id,name,currentBay,fitnessScore,jobCardStatus,brandingPriority,mileage,cleaningRequired,telecomClearance,rollingStockClearance,signallingClearance
KMRL-001,Trainset 1,2,22,closed,5,50000,false,true,true,true
KMRL-002,Trainset 2,7,18,open,1,58000,true,true,true,true
KMRL-003,Trainset 3,1,24,closed,4,49000,false,false,true,true
";
    let fleet = read_fleet(csv.as_bytes()).unwrap();
    let result = optimize_fleet(&fleet, &EngineConfig::default());

    // 0.25*22 + 0.2*20 + 0.15*20 + 0.15*20 + 0.1*15 + 0.15*20 = 20.0
    assert_eq!(result.bucket_of("KMRL-001"), Some(Bucket::Service));
    assert!((result.service_trains[0].score - 20.0).abs() < 1e-9);
    // open job card and far bay keep the score under the threshold
    assert_eq!(result.bucket_of("KMRL-002"), Some(Bucket::Maintenance));
    assert_eq!(result.bucket_of("KMRL-003"), Some(Bucket::Maintenance));
    assert_eq!(result.clearance_holds, 1);
}

#[test]
fn config_overrides_flow_through_planning() {
    let json = r#"{ "fleetSize": 12, "serviceScoreThreshold": 0.0, "constraints": { "minServiceTrains": 2, "maxServiceTrains": 5 } }"#;
    let config = EngineConfig::from_json_str(json).unwrap();
    let result = optimize_train_induction(&mut StdRng::seed_from_u64(9), &config);

    assert_eq!(result.total_trains(), 12);
    assert!(result.service_trains.len() <= 5);
}
