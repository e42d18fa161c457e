use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

use csv::ReaderBuilder;
use thiserror::Error;
use tracing::info;

use crate::config::constants::{MAX_BRANDING_PRIORITY, MIN_BRANDING_PRIORITY};
use crate::models::train::TrainRecord;

#[derive(Debug, Error)]
pub enum FleetLoadError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("Duplicate train id: {0}")]
    DuplicateId(String),
    #[error("Invalid bay position for {0}: bays start at 1")]
    InvalidBay(String),
    #[error("Invalid branding priority for {id}: {priority} (expected 1-5)")]
    InvalidBrandingPriority { id: String, priority: u8 },
    #[error("Fleet file contains no trains")]
    EmptyFleet,
}

fn validate_train(train: &TrainRecord) -> Result<(), FleetLoadError> {
    if train.current_bay == 0 {
        return Err(FleetLoadError::InvalidBay(train.id.clone()));
    }
    if !(MIN_BRANDING_PRIORITY..=MAX_BRANDING_PRIORITY).contains(&train.branding_priority) {
        return Err(FleetLoadError::InvalidBrandingPriority {
            id: train.id.clone(),
            priority: train.branding_priority,
        });
    }
    Ok(())
}

/// Reads a fleet from any CSV source whose headers match the camelCase
/// `TrainRecord` field names (`id,name,currentBay,...`).
pub fn read_fleet<R: std::io::Read>(reader: R) -> Result<Vec<TrainRecord>, FleetLoadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut fleet = Vec::new();
    let mut seen = HashSet::new();

    for result in reader.deserialize() {
        let train: TrainRecord = result?;
        validate_train(&train)?;
        if !seen.insert(train.id.clone()) {
            return Err(FleetLoadError::DuplicateId(train.id));
        }
        fleet.push(train);
    }

    if fleet.is_empty() {
        return Err(FleetLoadError::EmptyFleet);
    }
    Ok(fleet)
}

/// Loads a fleet snapshot exported by the depot instead of generating mock trains.
pub fn load_fleet(csv_path: impl AsRef<Path>) -> Result<Vec<TrainRecord>, FleetLoadError> {
    let file = File::open(csv_path.as_ref())?;
    let fleet = read_fleet(file)?;
    info!(path = %csv_path.as_ref().display(), trains = fleet.len(), "loaded fleet from CSV");
    Ok(fleet)
}
