use crate::config::constants::*;

/// Formats a fleet identifier, e.g. `KMRL-007`.
pub fn train_id(number: u32) -> String {
    format!("{}-{:03}", TRAIN_ID_PREFIX, number)
}

pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn calc_mileage_score(mileage: u32) -> f64 {
    let deviation = (mileage as f64 - TARGET_MILEAGE).abs();
    (MAX_SUB_SCORE - deviation / MILEAGE_DEVIATION_UNIT).max(0.0)
}

pub fn calc_geometry_score(bay: u32) -> f64 {
    // Near bays cut shunting time and energy
    if bay <= NEAR_BAY_LIMIT { NEAR_BAY_SCORE } else { FAR_BAY_SCORE }
}

pub fn calc_branding_score(priority: u8) -> f64 {
    (priority as f64 * BRANDING_SCORE_PER_PRIORITY).min(MAX_SUB_SCORE)
}

pub fn calc_failure_probability(temperature: f64, vibration: f64, pressure: f64, wear_level: f64) -> f64 {
    let temp_score = (temperature / 100.0).min(1.0) * TEMPERATURE_FACTOR;
    let vibration_score = (vibration / 3.0).min(1.0) * VIBRATION_FACTOR;
    let pressure_score = ((pressure - NOMINAL_PRESSURE).abs() / 100.0) * PRESSURE_FACTOR;
    let wear_score = (wear_level / MAX_WEAR_LEVEL) * WEAR_FACTOR;

    ((temp_score + vibration_score + pressure_score + wear_score) * 100.0).min(MAX_FAILURE_PROBABILITY)
}

pub fn calc_hours_to_failure(probability: f64) -> u32 {
    ((100.0 - probability) * 0.5 + 12.0).floor() as u32
}

pub fn calc_route_current_energy(distance_km: f64, stops: u32) -> f64 {
    distance_km * CURRENT_ENERGY_PER_KM + stops as f64 * CURRENT_ENERGY_PER_STOP
}

pub fn calc_route_optimized_energy(distance_km: f64, stops: u32) -> f64 {
    let base_energy = distance_km * OPTIMAL_ENERGY_PER_KM;
    let stop_penalty = stops as f64 * OPTIMAL_ENERGY_PER_STOP; // Re-acceleration after each stop
    (base_energy + stop_penalty) * SPEED_PROFILE_FACTOR
}

pub fn is_monsoon_month(month: u32) -> bool {
    MONSOON_MONTHS.contains(&month)
}

/// Hours 07:00-19:00 run the peak timetable.
pub fn is_peak_hour(hour: u32) -> bool {
    (7..=19).contains(&hour)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_train_id_is_zero_padded() {
        assert_eq!(train_id(1), "KMRL-001");
        assert_eq!(train_id(25), "KMRL-025");
    }

    #[test]
    fn test_mileage_score_on_target_and_floor() {
        assert_eq!(calc_mileage_score(50_000), 20.0);
        assert_eq!(calc_mileage_score(55_000), 15.0);
        assert_eq!(calc_mileage_score(45_000), 15.0);
        assert_eq!(calc_mileage_score(90_000), 0.0);
    }

    #[test]
    fn test_mileage_score_non_increasing_in_deviation() {
        let mut previous = f64::INFINITY;
        for deviation in (0..30_000).step_by(250) {
            let above = calc_mileage_score(50_000 + deviation);
            let below = calc_mileage_score(50_000 - deviation.min(50_000));
            assert!(above <= previous);
            assert!((above - below).abs() < 1e-9);
            previous = above;
        }
    }

    #[test]
    fn test_geometry_and_branding_scores() {
        assert_eq!(calc_geometry_score(4), 20.0);
        assert_eq!(calc_geometry_score(5), 10.0);
        assert_eq!(calc_branding_score(5), 20.0);
        assert_eq!(calc_branding_score(2), 8.0);
    }

    #[test]
    fn test_failure_probability_is_capped() {
        let p = calc_failure_probability(300.0, 10.0, 400.0, 100.0);
        assert_eq!(p, MAX_FAILURE_PROBABILITY);
        let nominal = calc_failure_probability(50.0, 1.5, 100.0, 0.0);
        assert!((nominal - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_hours_to_failure() {
        assert_eq!(calc_hours_to_failure(95.0), 14);
        assert_eq!(calc_hours_to_failure(21.0), 51);
    }

    #[test]
    fn test_monsoon_and_peak_windows() {
        assert!(is_monsoon_month(7));
        assert!(!is_monsoon_month(12));
        assert!(is_peak_hour(7) && is_peak_hour(19));
        assert!(!is_peak_hour(6) && !is_peak_hour(20));
    }
}
