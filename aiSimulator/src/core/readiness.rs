use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::train::TrainRecord;
use crate::utils::logging::{self, EngineKind, OperationCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Readiness {
    ServiceReady,
    Standby,
    MaintenanceRequired,
}

impl fmt::Display for Readiness {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Readiness::ServiceReady => write!(f, "Service Ready"),
            Readiness::Standby => write!(f, "Standby"),
            Readiness::MaintenanceRequired => write!(f, "Maintenance Required"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainReadiness {
    pub train_id: String,
    pub readiness: Readiness,
    pub missing_clearances: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessSummary {
    pub service_ready: usize,
    pub standby: usize,
    pub maintenance_required: usize,
}

pub fn classify(train: &TrainRecord) -> Readiness {
    if !train.has_all_clearances() {
        Readiness::MaintenanceRequired
    } else if !train.is_job_card_closed() {
        Readiness::Standby
    } else {
        Readiness::ServiceReady
    }
}

pub fn fleet_readiness(fleet: &[TrainRecord]) -> Vec<TrainReadiness> {
    let _timing = logging::start_timing("fleet_readiness",
        OperationCategory::EngineAnalysis { subcategory: EngineKind::Readiness });
    fleet
        .iter()
        .map(|train| TrainReadiness {
            train_id: train.id.clone(),
            readiness: classify(train),
            missing_clearances: train.missing_clearances().into_iter().map(String::from).collect(),
        })
        .collect()
}

pub fn summarize(readiness: &[TrainReadiness]) -> ReadinessSummary {
    readiness.iter().fold(ReadinessSummary::default(), |mut summary, entry| {
        match entry.readiness {
            Readiness::ServiceReady => summary.service_ready += 1,
            Readiness::Standby => summary.standby += 1,
            Readiness::MaintenanceRequired => summary.maintenance_required += 1,
        }
        summary
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::mock_fleet::generate_mock_fleet;
    use crate::models::train::JobCardStatus;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_clearance_outranks_job_card() {
        let mut fleet = generate_mock_fleet(&mut StdRng::seed_from_u64(1), 1);
        let train = &mut fleet[0];
        train.telecom_clearance = true;
        train.rolling_stock_clearance = true;
        train.signalling_clearance = true;
        train.job_card_status = JobCardStatus::Closed;
        assert_eq!(classify(train), Readiness::ServiceReady);

        train.job_card_status = JobCardStatus::Open;
        assert_eq!(classify(train), Readiness::Standby);

        train.signalling_clearance = false;
        assert_eq!(classify(train), Readiness::MaintenanceRequired);
    }

    #[test]
    fn test_summary_counts_whole_fleet() {
        let fleet = generate_mock_fleet(&mut StdRng::seed_from_u64(9), 25);
        let summary = summarize(&fleet_readiness(&fleet));
        assert_eq!(summary.service_ready + summary.standby + summary.maintenance_required, 25);
    }
}
