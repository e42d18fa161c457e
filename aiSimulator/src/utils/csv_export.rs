use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::core::batch::{BatchSummary, RunRecord};
use crate::core::induction::OptimizationResult;
use crate::engines::energy::EnergyProfile;
use crate::engines::maintenance::MaintenanceAlert;
use crate::models::train::{Bucket, ScoredTrain};
use crate::utils::logging::{self, FileIOType, OperationCategory};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanRow<'a> {
    bucket: Bucket,
    rank: usize,
    id: &'a str,
    score: f64,
    fitness_score: u32,
    job_card_status: String,
    branding_priority: u8,
    mileage: u32,
    current_bay: u32,
    cleaning_required: bool,
    all_clearances: bool,
}

impl<'a> PlanRow<'a> {
    fn new(bucket: Bucket, rank: usize, scored: &'a ScoredTrain) -> Self {
        let t = &scored.train;
        Self {
            bucket,
            rank,
            id: &t.id,
            score: scored.score,
            fitness_score: t.fitness_score,
            job_card_status: t.job_card_status.to_string(),
            branding_priority: t.branding_priority,
            mileage: t.mileage,
            current_bay: t.current_bay,
            cleaning_required: t.cleaning_required,
            all_clearances: t.has_all_clearances(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AlertRow<'a> {
    train_id: &'a str,
    component: &'a str,
    failure_probability: f64,
    severity: String,
    predicted_failure_at: String,
    estimated_cost: f64,
    current_health: f64,
    recommended_action: &'a str,
}

/// Writes run artifacts into `<output_dir>/<timestamp>/`.
pub struct CsvExporter {
    output_dir: PathBuf,
    timestamp: String,
}

impl CsvExporter {
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self, ExportError> {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        let full_path = output_dir.as_ref().join(&timestamp);
        fs::create_dir_all(&full_path)?;

        Ok(Self {
            output_dir: full_path,
            timestamp,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn writer(&self, file_name: &str) -> Result<(csv::Writer<File>, PathBuf), ExportError> {
        let path = self.output_dir.join(file_name);
        Ok((csv::Writer::from_path(&path)?, path))
    }

    /// One row per train, service first, each bucket in score order.
    pub fn export_induction_plan(&self, result: &OptimizationResult) -> Result<PathBuf, ExportError> {
        let _timing = logging::start_timing("export_induction_plan",
            OperationCategory::FileIO { subcategory: FileIOType::CsvExport });

        let (mut writer, path) = self.writer("induction_plan.csv")?;
        let buckets = [
            (Bucket::Service, &result.service_trains),
            (Bucket::Standby, &result.standby_trains),
            (Bucket::Maintenance, &result.maintenance_trains),
        ];
        for (bucket, trains) in buckets {
            for (rank, scored) in trains.iter().enumerate() {
                writer.serialize(PlanRow::new(bucket, rank + 1, scored))?;
            }
        }
        writer.flush()?;

        info!(path = %path.display(), rows = result.total_trains(), "exported induction plan");
        Ok(path)
    }

    pub fn export_maintenance_alerts(&self, alerts: &[MaintenanceAlert]) -> Result<PathBuf, ExportError> {
        let (mut writer, path) = self.writer("maintenance_alerts.csv")?;
        for alert in alerts {
            writer.serialize(AlertRow {
                train_id: &alert.train_id,
                component: &alert.component,
                failure_probability: alert.failure_probability,
                severity: alert.severity.to_string(),
                predicted_failure_at: alert.predicted_failure_at.format("%Y-%m-%d %H:%M").to_string(),
                estimated_cost: alert.estimated_cost,
                current_health: alert.current_health,
                recommended_action: &alert.recommended_action,
            })?;
        }
        writer.flush()?;
        Ok(path)
    }

    pub fn export_energy_profiles(&self, profiles: &[EnergyProfile]) -> Result<PathBuf, ExportError> {
        let (mut writer, path) = self.writer("energy_profiles.csv")?;
        for profile in profiles {
            writer.serialize(profile)?;
        }
        writer.flush()?;
        Ok(path)
    }

    /// Per-run rows go to `batch_runs.csv`; the aggregate goes to `batch_summary.csv`.
    pub fn export_batch(&self, records: &[RunRecord], summary: &BatchSummary) -> Result<PathBuf, ExportError> {
        let (mut writer, _) = self.writer("batch_runs.csv")?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        let summary_path = self.output_dir.join("batch_summary.csv");
        let mut summary_file = File::create(&summary_path)?;
        writeln!(summary_file, "Batch Summary")?;
        writeln!(summary_file, "Timestamp,{}", self.timestamp)?;
        writeln!(summary_file, "Runs,{}", summary.runs)?;
        writeln!(summary_file, "Mean Service Trains,{:.2}", summary.mean_service)?;
        writeln!(summary_file, "Min Service Trains,{}", summary.min_service)?;
        writeln!(summary_file, "Max Service Trains,{}", summary.max_service)?;
        writeln!(summary_file, "Mean Total Score,{:.2}", summary.mean_total_score)?;
        writeln!(summary_file, "Feasibility Rate (%),{:.1}", summary.feasibility_rate * 100.0)?;
        writeln!(summary_file, "Mean Clearance Holds,{:.2}", summary.mean_clearance_holds)?;

        info!(path = %summary_path.display(), runs = summary.runs, "exported batch summary");
        Ok(summary_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::engine_config::EngineConfig;
    use crate::core::induction::optimize_train_induction;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::TempDir;

    #[test]
    fn test_induction_plan_has_row_per_train() {
        let dir = TempDir::new().unwrap();
        let exporter = CsvExporter::new(dir.path()).unwrap();
        let result = optimize_train_induction(&mut StdRng::seed_from_u64(17), &EngineConfig::default());

        let path = exporter.export_induction_plan(&result).unwrap();
        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(&headers[0], "bucket");
        assert_eq!(&headers[2], "id");
        assert_eq!(reader.records().count(), 25);
    }

    #[test]
    fn test_batch_summary_file() {
        let dir = TempDir::new().unwrap();
        let exporter = CsvExporter::new(dir.path()).unwrap();
        let summary = BatchSummary {
            runs: 4,
            mean_service: 19.5,
            min_service: 18,
            max_service: 21,
            mean_total_score: 320.0,
            feasibility_rate: 0.75,
            mean_clearance_holds: 3.25,
        };

        let path = exporter.export_batch(&[], &summary).unwrap();
        let contents = fs::read_to_string(path).unwrap();
        assert!(contents.contains("Runs,4"));
        assert!(contents.contains("Feasibility Rate (%),75.0"));
        assert!(exporter.output_dir().join("batch_runs.csv").exists());
    }

    #[test]
    fn test_empty_alert_export_creates_file() {
        let dir = TempDir::new().unwrap();
        let exporter = CsvExporter::new(dir.path()).unwrap();
        let path = exporter.export_maintenance_alerts(&[]).unwrap();
        assert!(path.exists());
    }
}
