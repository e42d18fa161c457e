// Scoring module - Multi-Criteria Decision Analysis for train induction
use serde::{Deserialize, Serialize};

use crate::config::const_funcs::{calc_branding_score, calc_geometry_score, calc_mileage_score};
use crate::config::constants::*;
use crate::config::engine_config::OptimizationWeights;
use crate::models::train::{JobCardStatus, ScoredTrain, TrainRecord};

/// Unweighted sub-scores, each on a 0-20 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub fitness: f64,
    pub job_card: f64,
    pub branding: f64,
    pub mileage: f64,
    pub cleaning: f64,
    pub geometry: f64,
}

impl ScoreBreakdown {
    pub fn weighted_total(&self, weights: &OptimizationWeights) -> f64 {
        self.fitness * weights.fitness
            + self.job_card * weights.job_card
            + self.branding * weights.branding
            + self.mileage * weights.mileage
            + self.cleaning * weights.cleaning
            + self.geometry * weights.geometry
    }
}

/// Fitness counts for nothing unless every clearance is present.
pub fn fitness_score(train: &TrainRecord) -> f64 {
    if !train.has_all_clearances() {
        return 0.0;
    }
    train.fitness_score as f64
}

pub fn score_breakdown(train: &TrainRecord) -> ScoreBreakdown {
    ScoreBreakdown {
        fitness: fitness_score(train),
        job_card: match train.job_card_status {
            JobCardStatus::Closed => JOB_CARD_CLOSED_SCORE,
            JobCardStatus::Open => JOB_CARD_OPEN_SCORE,
        },
        branding: calc_branding_score(train.branding_priority),
        mileage: calc_mileage_score(train.mileage),
        cleaning: if train.cleaning_required { CLEANING_REQUIRED_SCORE } else { CLEANING_DONE_SCORE },
        geometry: calc_geometry_score(train.current_bay),
    }
}

pub fn score_train(train: &TrainRecord, weights: &OptimizationWeights) -> f64 {
    score_breakdown(train).weighted_total(weights)
}

pub fn score_fleet(fleet: &[TrainRecord], weights: &OptimizationWeights) -> Vec<ScoredTrain> {
    fleet
        .iter()
        .map(|train| ScoredTrain {
            train: train.clone(),
            score: score_train(train, weights),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_train() -> TrainRecord {
        TrainRecord {
            id: "KMRL-010".to_string(),
            name: "Train Set 10".to_string(),
            current_bay: 3,
            fitness_score: 20,
            job_card_status: JobCardStatus::Closed,
            branding_priority: 5,
            mileage: 50_000,
            cleaning_required: false,
            telecom_clearance: true,
            rolling_stock_clearance: true,
            signalling_clearance: true,
        }
    }

    #[test]
    fn test_best_case_score() {
        // 20*.25 + 20*.2 + 20*.15 + 20*.15 + 15*.1 + 20*.15
        let score = score_train(&ready_train(), &OptimizationWeights::default());
        assert!((score - 19.5).abs() < 1e-9);
    }

    #[test]
    fn test_missing_clearance_zeroes_fitness_only() {
        let mut train = ready_train();
        train.rolling_stock_clearance = false;

        let breakdown = score_breakdown(&train);
        assert_eq!(breakdown.fitness, 0.0);
        assert_eq!(breakdown.job_card, 20.0);

        let score = score_train(&train, &OptimizationWeights::default());
        assert!((score - 14.5).abs() < 1e-9);
    }

    #[test]
    fn test_open_job_card_far_bay_and_cleaning() {
        let mut train = ready_train();
        train.job_card_status = JobCardStatus::Open;
        train.current_bay = 7;
        train.cleaning_required = true;
        train.branding_priority = 1;
        train.mileage = 58_000;

        let b = score_breakdown(&train);
        assert_eq!(b.job_card, 0.0);
        assert_eq!(b.geometry, 10.0);
        assert_eq!(b.cleaning, 5.0);
        assert_eq!(b.branding, 4.0);
        assert_eq!(b.mileage, 12.0);
    }

    #[test]
    fn test_score_fleet_preserves_order() {
        let mut other = ready_train();
        other.id = "KMRL-011".to_string();
        let scored = score_fleet(&[ready_train(), other], &OptimizationWeights::default());
        assert_eq!(scored[0].train.id, "KMRL-010");
        assert_eq!(scored[1].train.id, "KMRL-011");
    }
}
