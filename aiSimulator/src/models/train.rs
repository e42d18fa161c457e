use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobCardStatus {
    Open,
    Closed,
}

impl FromStr for JobCardStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(JobCardStatus::Open),
            "closed" => Ok(JobCardStatus::Closed),
            _ => Err(format!("Unknown job card status: {}", s)),
        }
    }
}

impl fmt::Display for JobCardStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            JobCardStatus::Open => write!(f, "open"),
            JobCardStatus::Closed => write!(f, "closed"),
        }
    }
}

/// Where a train is placed for the next operating day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Service,
    Standby,
    Maintenance,
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Bucket::Service => write!(f, "service"),
            Bucket::Standby => write!(f, "standby"),
            Bucket::Maintenance => write!(f, "maintenance"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainRecord {
    pub id: String,
    pub name: String,
    pub current_bay: u32,
    pub fitness_score: u32,
    pub job_card_status: JobCardStatus,
    pub branding_priority: u8,     // 1 (low) to 5 (contract critical)
    pub mileage: u32,              // km
    pub cleaning_required: bool,
    pub telecom_clearance: bool,
    pub rolling_stock_clearance: bool,
    pub signalling_clearance: bool,
}

impl TrainRecord {
    /// True only when telecom, rolling-stock and signalling have all signed off.
    pub fn has_all_clearances(&self) -> bool {
        self.telecom_clearance && self.rolling_stock_clearance && self.signalling_clearance
    }

    pub fn missing_clearances(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.telecom_clearance {
            missing.push("Telecom");
        }
        if !self.rolling_stock_clearance {
            missing.push("Rolling Stock");
        }
        if !self.signalling_clearance {
            missing.push("Signalling");
        }
        missing
    }

    pub fn is_job_card_closed(&self) -> bool {
        self.job_card_status == JobCardStatus::Closed
    }
}

/// A train record together with the MCDA score it was ranked by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredTrain {
    #[serde(flatten)]
    pub train: TrainRecord,
    pub score: f64,
}
