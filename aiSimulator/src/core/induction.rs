use std::time::Instant;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::ai::metrics::scoring::score_fleet;
use crate::config::constants::{HIGH_BRANDING_THRESHOLD, HIGH_MILEAGE_THRESHOLD};
use crate::config::engine_config::{EngineConfig, InductionConstraints};
use crate::data::mock_fleet::generate_mock_fleet;
use crate::models::train::{Bucket, ScoredTrain, TrainRecord};
use crate::utils::logging::{self, InductionStep, OperationCategory};

/// Outcome of one induction planning pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    pub service_trains: Vec<ScoredTrain>,
    pub standby_trains: Vec<ScoredTrain>,
    pub maintenance_trains: Vec<ScoredTrain>,
    /// Sum of the scores of the trains inducted into service
    pub total_score: f64,
    pub constraint_violations: Vec<String>,
    pub recommendations: Vec<String>,
    /// Trains sent to maintenance or standby because a clearance was missing
    pub clearance_holds: usize,
    pub execution_time_ms: u64,
}

impl OptimizationResult {
    pub fn total_trains(&self) -> usize {
        self.service_trains.len() + self.standby_trains.len() + self.maintenance_trains.len()
    }

    pub fn bucket_of(&self, train_id: &str) -> Option<Bucket> {
        let contains = |trains: &[ScoredTrain]| trains.iter().any(|t| t.train.id == train_id);
        if contains(&self.service_trains) {
            Some(Bucket::Service)
        } else if contains(&self.standby_trains) {
            Some(Bucket::Standby)
        } else if contains(&self.maintenance_trains) {
            Some(Bucket::Maintenance)
        } else {
            None
        }
    }

    pub fn is_feasible(&self) -> bool {
        self.constraint_violations.is_empty()
    }
}

/// Partitions produced by a single greedy pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BucketAssignment {
    pub service: Vec<ScoredTrain>,
    pub standby: Vec<ScoredTrain>,
    pub maintenance: Vec<ScoredTrain>,
    pub clearance_holds: usize,
}

/// Sorts by score (stable, descending) and assigns each train once.
///
/// Uncleared trains go to maintenance until its slots run out and then to
/// standby. Cleared trains scoring above `service_threshold` fill service up
/// to its maximum. Whatever is left goes to maintenance when it needs
/// cleaning and a slot is free, otherwise to standby.
pub fn assign_buckets(
    mut scored: Vec<ScoredTrain>,
    constraints: &InductionConstraints,
    service_threshold: f64,
) -> BucketAssignment {
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut assignment = BucketAssignment::default();

    for train in scored {
        let bucket = if !train.train.has_all_clearances() {
            assignment.clearance_holds += 1;
            if assignment.maintenance.len() < constraints.max_maintenance_slots {
                Bucket::Maintenance
            } else {
                Bucket::Standby
            }
        } else if assignment.service.len() < constraints.max_service_trains && train.score > service_threshold {
            Bucket::Service
        } else if train.train.cleaning_required && assignment.maintenance.len() < constraints.max_maintenance_slots {
            Bucket::Maintenance
        } else {
            Bucket::Standby
        };

        debug!(train = %train.train.id, score = train.score, %bucket, "assigned");

        match bucket {
            Bucket::Service => assignment.service.push(train),
            Bucket::Standby => assignment.standby.push(train),
            Bucket::Maintenance => assignment.maintenance.push(train),
        }
    }

    assignment
}

pub fn check_constraints(service_count: usize, maintenance_count: usize, constraints: &InductionConstraints) -> Vec<String> {
    let mut violations = Vec::new();

    if service_count < constraints.min_service_trains {
        violations.push(format!(
            "Insufficient service trains: {} < {}",
            service_count, constraints.min_service_trains
        ));
    }

    if service_count > constraints.max_service_trains {
        violations.push(format!(
            "Excess service trains: {} > {}",
            service_count, constraints.max_service_trains
        ));
    }

    if maintenance_count > constraints.max_maintenance_slots {
        violations.push(format!(
            "Maintenance capacity exceeded: {} > {}",
            maintenance_count, constraints.max_maintenance_slots
        ));
    }

    violations
}

pub fn generate_recommendations(
    service: &[ScoredTrain],
    violations: &[String],
    constraints: &InductionConstraints,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if violations.is_empty() {
        recommendations.push("All constraints satisfied - optimal solution found".to_string());
    }

    if service.len() == constraints.min_service_trains {
        recommendations.push("Operating at minimum service capacity - consider standby activation".to_string());
    }

    let high_mileage = service.iter().filter(|t| t.train.mileage > HIGH_MILEAGE_THRESHOLD).count();
    if high_mileage > 0 {
        recommendations.push(format!("{} trains approaching maintenance threshold", high_mileage));
    }

    let high_branding = service.iter().filter(|t| t.train.branding_priority > HIGH_BRANDING_THRESHOLD).count();
    if high_branding > 0 {
        recommendations.push(format!(
            "{} trains have high branding priority - monitor exposure hours",
            high_branding
        ));
    }

    recommendations
}

/// Scores, buckets and checks an explicit fleet.
#[instrument(skip_all, fields(fleet_size = fleet.len()))]
pub fn optimize_fleet(fleet: &[TrainRecord], config: &EngineConfig) -> OptimizationResult {
    let start = Instant::now();

    let scored = {
        let _timing = logging::start_timing("score_fleet",
            OperationCategory::Induction { subcategory: InductionStep::Scoring });
        score_fleet(fleet, &config.weights)
    };

    let assignment = {
        let _timing = logging::start_timing("assign_buckets",
            OperationCategory::Induction { subcategory: InductionStep::Bucketing });
        assign_buckets(scored, &config.constraints, config.service_score_threshold)
    };

    let (violations, recommendations) = {
        let _timing = logging::start_timing("check_constraints",
            OperationCategory::Induction { subcategory: InductionStep::ConstraintCheck });
        let violations = check_constraints(
            assignment.service.len(),
            assignment.maintenance.len(),
            &config.constraints,
        );
        let recommendations = generate_recommendations(&assignment.service, &violations, &config.constraints);
        (violations, recommendations)
    };

    for violation in &violations {
        warn!("{}", violation);
    }

    let total_score = assignment.service.iter().map(|t| t.score).sum();

    info!(
        service = assignment.service.len(),
        standby = assignment.standby.len(),
        maintenance = assignment.maintenance.len(),
        total_score,
        "induction plan ready"
    );

    OptimizationResult {
        service_trains: assignment.service,
        standby_trains: assignment.standby,
        maintenance_trains: assignment.maintenance,
        total_score,
        constraint_violations: violations,
        recommendations,
        clearance_holds: assignment.clearance_holds,
        execution_time_ms: start.elapsed().as_millis() as u64,
    }
}

/// Generates a fresh mock fleet and plans its induction.
pub fn optimize_train_induction<R: Rng + ?Sized>(rng: &mut R, config: &EngineConfig) -> OptimizationResult {
    let fleet = {
        let _timing = logging::start_timing("generate_mock_fleet",
            OperationCategory::Induction { subcategory: InductionStep::DataGeneration });
        generate_mock_fleet(rng, config.fleet_size)
    };
    optimize_fleet(&fleet, config)
}
