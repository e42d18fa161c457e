use rand::Rng;
use tracing::debug;

use crate::config::const_funcs::train_id;
use crate::config::constants::*;
use crate::models::train::{JobCardStatus, TrainRecord};

/// Generates one randomized train record. Numbering starts at 1.
pub fn generate_mock_train<R: Rng + ?Sized>(rng: &mut R, number: u32) -> TrainRecord {
    TrainRecord {
        id: train_id(number),
        name: format!("Train Set {}", number),
        current_bay: rng.gen_range(MIN_BAY..=MAX_BAY),
        fitness_score: rng.gen_range(MIN_FITNESS..=MAX_FITNESS),
        job_card_status: if rng.gen_bool(JOB_CARD_CLOSED_PROBABILITY) {
            JobCardStatus::Closed
        } else {
            JobCardStatus::Open
        },
        branding_priority: rng.gen_range(MIN_BRANDING_PRIORITY..=MAX_BRANDING_PRIORITY),
        mileage: rng.gen_range(MIN_MILEAGE..=MAX_MILEAGE),
        cleaning_required: rng.gen_bool(CLEANING_REQUIRED_PROBABILITY),
        telecom_clearance: rng.gen_bool(TELECOM_CLEARANCE_PROBABILITY),
        rolling_stock_clearance: rng.gen_bool(ROLLING_STOCK_CLEARANCE_PROBABILITY),
        signalling_clearance: rng.gen_bool(SIGNALLING_CLEARANCE_PROBABILITY),
    }
}

/// Generates a fresh mock fleet of `fleet_size` trains, `KMRL-001` onwards.
pub fn generate_mock_fleet<R: Rng + ?Sized>(rng: &mut R, fleet_size: usize) -> Vec<TrainRecord> {
    let fleet: Vec<TrainRecord> = (1..=fleet_size as u32)
        .map(|number| generate_mock_train(rng, number))
        .collect();

    debug!(
        fleet_size,
        uncleared = fleet.iter().filter(|t| !t.has_all_clearances()).count(),
        "generated mock fleet"
    );
    fleet
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_mock_fleet_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let fleet = generate_mock_fleet(&mut rng, FLEET_SIZE);

        assert_eq!(fleet.len(), FLEET_SIZE);
        assert_eq!(fleet[0].id, "KMRL-001");
        assert_eq!(fleet[24].id, "KMRL-025");
        for train in &fleet {
            assert!((MIN_BAY..=MAX_BAY).contains(&train.current_bay));
            assert!((MIN_FITNESS..=MAX_FITNESS).contains(&train.fitness_score));
            assert!((MIN_BRANDING_PRIORITY..=MAX_BRANDING_PRIORITY).contains(&train.branding_priority));
            assert!((MIN_MILEAGE..=MAX_MILEAGE).contains(&train.mileage));
        }
    }

    #[test]
    fn test_same_seed_same_fleet() {
        let a = generate_mock_fleet(&mut StdRng::seed_from_u64(42), 10);
        let b = generate_mock_fleet(&mut StdRng::seed_from_u64(42), 10);
        assert_eq!(a, b);
    }
}
