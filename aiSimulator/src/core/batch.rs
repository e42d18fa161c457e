use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use anyhow::{ensure, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::engine_config::EngineConfig;
use crate::core::induction::{optimize_train_induction, OptimizationResult};
use crate::utils::logging::{self, OperationCategory};

/// Headline numbers from a single induction run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRecord {
    pub run: usize,
    pub seed: u64,
    pub service_count: usize,
    pub standby_count: usize,
    pub maintenance_count: usize,
    pub total_score: f64,
    pub violations: usize,
    pub clearance_holds: usize,
}

impl RunRecord {
    fn from_result(run: usize, seed: u64, result: &OptimizationResult) -> Self {
        Self {
            run,
            seed,
            service_count: result.service_trains.len(),
            standby_count: result.standby_trains.len(),
            maintenance_count: result.maintenance_trains.len(),
            total_score: result.total_score,
            violations: result.constraint_violations.len(),
            clearance_holds: result.clearance_holds,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub runs: usize,
    pub mean_service: f64,
    pub min_service: usize,
    pub max_service: usize,
    pub mean_total_score: f64,
    /// Share of runs with no constraint violations, 0.0-1.0
    pub feasibility_rate: f64,
    pub mean_clearance_holds: f64,
}

impl BatchSummary {
    pub fn from_records(records: &[RunRecord]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }
        let n = records.len() as f64;

        Some(Self {
            runs: records.len(),
            mean_service: records.iter().map(|r| r.service_count as f64).sum::<f64>() / n,
            min_service: records.iter().map(|r| r.service_count).min().unwrap_or(0),
            max_service: records.iter().map(|r| r.service_count).max().unwrap_or(0),
            mean_total_score: records.iter().map(|r| r.total_score).sum::<f64>() / n,
            feasibility_rate: records.iter().filter(|r| r.violations == 0).count() as f64 / n,
            mean_clearance_holds: records.iter().map(|r| r.clearance_holds as f64).sum::<f64>() / n,
        })
    }
}

#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub records: Vec<RunRecord>,
    pub summary: BatchSummary,
}

fn seed_for_run(base_seed: Option<u64>, run: usize) -> u64 {
    match base_seed {
        Some(base) => base.wrapping_add(run as u64),
        None => rand::random(),
    }
}

/// Runs the mock induction optimizer `runs` times. Each run gets its own
/// `StdRng` so a base seed reproduces the whole batch, in parallel or not.
pub fn run_batch(config: &EngineConfig, runs: usize, parallel: bool, base_seed: Option<u64>) -> Result<BatchOutcome> {
    ensure!(runs > 0, "batch needs at least one run");
    let _timing = logging::start_timing("run_batch", OperationCategory::Batch);

    let start_time = Instant::now();
    let completed = AtomicUsize::new(0);
    let progress = ProgressBar::new(runs as u64);
    progress.set_style(
        ProgressStyle::with_template("{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} runs ({eta})")?
            .progress_chars("=>-"),
    );

    info!(runs, parallel, ?base_seed, "starting induction batch");

    let execute = |run: usize| -> RunRecord {
        let seed = seed_for_run(base_seed, run);
        let mut rng = StdRng::seed_from_u64(seed);
        let result = optimize_train_induction(&mut rng, config);
        completed.fetch_add(1, Ordering::Relaxed);
        progress.inc(1);
        RunRecord::from_result(run, seed, &result)
    };

    let records: Vec<RunRecord> = if parallel {
        (0..runs).into_par_iter().map(execute).collect()
    } else {
        (0..runs).map(execute).collect()
    };

    progress.finish_and_clear();

    let summary = BatchSummary::from_records(&records)
        .ok_or_else(|| anyhow::anyhow!("batch produced no runs"))?;

    info!(
        completed = completed.load(Ordering::Relaxed),
        mean_service = summary.mean_service,
        feasibility_rate = summary.feasibility_rate,
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "induction batch finished"
    );

    Ok(BatchOutcome { records, summary })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(service_count: usize, total_score: f64, violations: usize, clearance_holds: usize) -> RunRecord {
        RunRecord {
            run: 0,
            seed: 0,
            service_count,
            standby_count: 0,
            maintenance_count: 0,
            total_score,
            violations,
            clearance_holds,
        }
    }

    #[test]
    fn test_summary_aggregates() {
        let records = vec![record(18, 300.0, 0, 2), record(20, 340.0, 0, 4), record(16, 260.0, 1, 3)];
        let summary = BatchSummary::from_records(&records).unwrap();

        assert_eq!(summary.runs, 3);
        assert_eq!(summary.min_service, 16);
        assert_eq!(summary.max_service, 20);
        assert!((summary.mean_service - 18.0).abs() < 1e-9);
        assert!((summary.mean_total_score - 300.0).abs() < 1e-9);
        assert!((summary.feasibility_rate - 2.0 / 3.0).abs() < 1e-9);
        assert!((summary.mean_clearance_holds - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_summary_is_none() {
        assert!(BatchSummary::from_records(&[]).is_none());
    }

    #[test]
    fn test_seeded_batch_is_reproducible_across_modes() {
        let config = EngineConfig::default();
        let sequential = run_batch(&config, 6, false, Some(42)).unwrap();
        let parallel = run_batch(&config, 6, true, Some(42)).unwrap();

        assert_eq!(sequential.records, parallel.records);
        assert_eq!(sequential.records[3].seed, 45);
        assert_eq!(sequential.summary, parallel.summary);
    }

    #[test]
    fn test_zero_runs_rejected() {
        assert!(run_batch(&EngineConfig::default(), 0, false, Some(1)).is_err());
    }
}
