use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::const_funcs::{is_peak_hour, round_to_tenth};
use crate::config::constants::*;
use crate::models::network::STATIONS;
use crate::utils::logging::{self, EngineKind, OperationCategory};

pub const DEMAND_WEATHER: [&str; 4] = ["Clear", "Rainy", "Cloudy", "Partly Cloudy"];

pub const EVENT_CALENDARS: [&[&str]; 5] = [
    &["Tech Conference at Infopark", "Cricket Match at Stadium"],
    &["Shopping Festival at Lulu Mall"],
    &[],
    &["College Fest at MG University"],
    &[],
];

// (slot label, base passengers); slots are two hours wide starting 06:00
pub const TIME_SLOTS: [(&str, f64); 8] = [
    ("06:00 - 08:00", 300.0),
    ("08:00 - 10:00", 800.0),
    ("10:00 - 12:00", 400.0),
    ("12:00 - 14:00", 350.0),
    ("14:00 - 16:00", 380.0),
    ("16:00 - 18:00", 750.0),
    ("18:00 - 20:00", 850.0),
    ("20:00 - 22:00", 400.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemandFactors {
    pub day_of_week: Weekday,
    pub weather: String,
    pub events: Vec<String>,
    pub holiday: bool,
    pub temperature: f64,
}

impl DemandFactors {
    pub fn is_weekend(&self) -> bool {
        matches!(self.day_of_week, Weekday::Sat | Weekday::Sun)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassengerDemand {
    pub station_name: String,
    pub current_load: u32,
    pub predicted_load: u32,
    pub peak_time: String,
    pub trend: Trend,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRecommendation {
    pub time_slot: String,
    pub current_frequency: u32,
    pub recommended_frequency: u32,
    pub expected_passengers: u32,
    pub reason: String,
    pub impact: Impact,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemandInsights {
    pub factors: DemandFactors,
    pub total_current_passengers: u32,
    pub total_predicted_passengers: u32,
    pub avg_confidence: f64,
    pub high_impact_changes: usize,
    pub demand_trend: Trend,
    pub optimization_potential: f64,
}

pub fn demand_multiplier(factors: &DemandFactors, hour: u32) -> f64 {
    let mut multiplier = match hour {
        7..=9 => MORNING_PEAK_MULTIPLIER,
        17..=19 => EVENING_PEAK_MULTIPLIER,
        10..=16 => MIDDAY_MULTIPLIER,
        _ => OFF_PEAK_MULTIPLIER,
    };

    if factors.is_weekend() {
        multiplier *= WEEKEND_MULTIPLIER;
    }
    if factors.holiday {
        multiplier *= HOLIDAY_MULTIPLIER;
    }
    if factors.weather == "Rainy" {
        multiplier *= RAIN_DEMAND_MULTIPLIER;
    }
    if factors.temperature > HEAT_TEMPERATURE_THRESHOLD {
        multiplier *= HEAT_DEMAND_MULTIPLIER;
    }
    if !factors.events.is_empty() {
        multiplier *= EVENT_DEMAND_MULTIPLIER;
    }

    multiplier
}

fn classify_trend(current: u32, predicted: u32) -> Trend {
    let current = current as f64;
    let predicted = predicted as f64;
    if predicted > current * 1.1 {
        Trend::Increasing
    } else if predicted < current * 0.9 {
        Trend::Decreasing
    } else {
        Trend::Stable
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DemandForecastingEngine;

impl DemandForecastingEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn demand_factors<R: Rng + ?Sized>(&self, rng: &mut R, now: NaiveDateTime) -> DemandFactors {
        let weather = DEMAND_WEATHER.choose(rng).copied().unwrap_or("Clear");
        let events = EVENT_CALENDARS.choose(rng).copied().unwrap_or(&[]);

        DemandFactors {
            day_of_week: now.weekday(),
            weather: weather.to_string(),
            events: events.iter().map(|e| e.to_string()).collect(),
            holiday: rng.gen_bool(HOLIDAY_PROBABILITY),
            temperature: 28.0 + rng.gen::<f64>() * 8.0,
        }
    }

    pub fn forecast_with_factors<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        factors: &DemandFactors,
        hour: u32,
    ) -> Vec<PassengerDemand> {
        let multiplier = demand_multiplier(factors, hour);
        let peak_time = if hour < 12 { "17:30 - 19:00" } else { "08:00 - 09:30" };

        STATIONS
            .iter()
            .map(|station| {
                let base_load = MIN_STATION_BASE_LOAD + rng.gen::<f64>() * STATION_BASE_LOAD_SPAN;
                let current_load = (base_load * multiplier).round() as u32;
                let predicted_load = (current_load as f64 * (0.9 + rng.gen::<f64>() * 0.3)).round() as u32;

                PassengerDemand {
                    station_name: station.to_string(),
                    current_load,
                    predicted_load,
                    peak_time: peak_time.to_string(),
                    trend: classify_trend(current_load, predicted_load),
                    confidence: 85.0 + rng.gen::<f64>() * 12.0,
                }
            })
            .collect()
    }

    #[instrument(skip_all)]
    pub fn forecast_station_demand<R: Rng + ?Sized>(&self, rng: &mut R, now: NaiveDateTime) -> Vec<PassengerDemand> {
        let _timing = logging::start_timing("forecast_station_demand",
            OperationCategory::EngineAnalysis { subcategory: EngineKind::Demand });
        let factors = self.demand_factors(rng, now);
        self.forecast_with_factors(rng, &factors, now.hour())
    }

    pub fn recommendations_with_factors(&self, factors: &DemandFactors) -> Vec<ScheduleRecommendation> {
        TIME_SLOTS
            .iter()
            .enumerate()
            .map(|(index, (label, base))| {
                let hour = 6 + index as u32 * 2;
                let expected_passengers = (base * demand_multiplier(factors, hour)).round() as u32;

                let current_frequency = if is_peak_hour(hour) { PEAK_FREQUENCY } else { OFF_PEAK_FREQUENCY };
                let optimal_frequency = (expected_passengers as f64 / PASSENGERS_PER_TRAIN).ceil() as u32;
                let recommended_frequency = optimal_frequency.clamp(MIN_RECOMMENDED_FREQUENCY, MAX_RECOMMENDED_FREQUENCY);

                let impact = match recommended_frequency.abs_diff(current_frequency) {
                    0 => Impact::Low,
                    1 => Impact::Medium,
                    _ => Impact::High,
                };

                let reason = if recommended_frequency > current_frequency {
                    match factors.events.first() {
                        Some(event) => format!("High demand due to: {}", event),
                        None => "Peak hour demand surge".to_string(),
                    }
                } else if recommended_frequency < current_frequency {
                    if factors.holiday {
                        "Holiday - reduced demand".to_string()
                    } else {
                        "Off-peak optimization".to_string()
                    }
                } else {
                    "Current frequency optimal".to_string()
                };

                ScheduleRecommendation {
                    time_slot: label.to_string(),
                    current_frequency,
                    recommended_frequency,
                    expected_passengers,
                    reason,
                    impact,
                }
            })
            .collect()
    }

    pub fn generate_schedule_recommendations<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        now: NaiveDateTime,
    ) -> Vec<ScheduleRecommendation> {
        let factors = self.demand_factors(rng, now);
        self.recommendations_with_factors(&factors)
    }

    /// Station forecast and frequency plan drawn from one set of demand factors.
    #[instrument(skip_all)]
    pub fn demand_insights<R: Rng + ?Sized>(&self, rng: &mut R, now: NaiveDateTime) -> DemandInsights {
        let _timing = logging::start_timing("demand_insights",
            OperationCategory::EngineAnalysis { subcategory: EngineKind::Demand });

        let factors = self.demand_factors(rng, now);
        let stations = self.forecast_with_factors(rng, &factors, now.hour());
        let recommendations = self.recommendations_with_factors(&factors);
        self.summarize(factors, &stations, &recommendations)
    }

    /// Rolls a station forecast and its frequency plan up into headline figures.
    pub fn summarize(
        &self,
        factors: DemandFactors,
        stations: &[PassengerDemand],
        recommendations: &[ScheduleRecommendation],
    ) -> DemandInsights {
        let total_current_passengers: u32 = stations.iter().map(|s| s.current_load).sum();
        let total_predicted_passengers: u32 = stations.iter().map(|s| s.predicted_load).sum();
        let avg_confidence = if stations.is_empty() {
            0.0
        } else {
            stations.iter().map(|s| s.confidence).sum::<f64>() / stations.len() as f64
        };
        let high_impact_changes = recommendations.iter().filter(|r| r.impact == Impact::High).count();

        debug!(total_current_passengers, total_predicted_passengers, high_impact_changes, "demand insights");

        DemandInsights {
            factors,
            total_current_passengers,
            total_predicted_passengers,
            avg_confidence: round_to_tenth(avg_confidence),
            high_impact_changes,
            demand_trend: if total_predicted_passengers > total_current_passengers {
                Trend::Increasing
            } else {
                Trend::Decreasing
            },
            optimization_potential: if recommendations.is_empty() {
                0.0
            } else {
                (high_impact_changes as f64 / recommendations.len() as f64 * 100.0).round()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn weekday_factors() -> DemandFactors {
        DemandFactors {
            day_of_week: Weekday::Wed,
            weather: "Clear".to_string(),
            events: Vec::new(),
            holiday: false,
            temperature: 30.0,
        }
    }

    #[test]
    fn test_multiplier_time_bands() {
        let f = weekday_factors();
        assert_eq!(demand_multiplier(&f, 8), 1.8);
        assert_eq!(demand_multiplier(&f, 18), 1.9);
        assert_eq!(demand_multiplier(&f, 12), 1.2);
        assert_eq!(demand_multiplier(&f, 22), 0.6);
    }

    #[test]
    fn test_multiplier_stacks_factors() {
        let f = DemandFactors {
            day_of_week: Weekday::Sun,
            weather: "Rainy".to_string(),
            events: vec!["Cricket Match at Stadium".to_string()],
            holiday: true,
            temperature: 35.0,
        };
        let expected = 1.8 * 0.7 * 0.5 * 1.3 * 1.15 * 1.4;
        assert!((demand_multiplier(&f, 8) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_recommendations_for_plain_weekday() {
        let recs = DemandForecastingEngine::new().recommendations_with_factors(&weekday_factors());
        assert_eq!(recs.len(), 8);

        // 06:00 slot: 300 * 0.6 = 180 -> ceil(1.5) = 2 -> clamped to 3, off-peak runs 4
        assert_eq!(recs[0].expected_passengers, 180);
        assert_eq!(recs[0].current_frequency, 4);
        assert_eq!(recs[0].recommended_frequency, 3);
        assert_eq!(recs[0].impact, Impact::Medium);
        assert_eq!(recs[0].reason, "Off-peak optimization");

        // 08:00 slot: 800 * 1.8 = 1440 -> 12 -> clamped to 10 against 6
        assert_eq!(recs[1].recommended_frequency, 10);
        assert_eq!(recs[1].impact, Impact::High);
        assert_eq!(recs[1].reason, "Peak hour demand surge");
    }

    #[test]
    fn test_event_reason_names_first_event() {
        let mut f = weekday_factors();
        f.events = vec!["Shopping Festival at Lulu Mall".to_string()];
        let recs = DemandForecastingEngine::new().recommendations_with_factors(&f);
        assert_eq!(recs[1].reason, "High demand due to: Shopping Festival at Lulu Mall");
    }

    #[test]
    fn test_station_forecast_covers_line() {
        let now = NaiveDate::from_ymd_opt(2025, 1, 8).unwrap().and_hms_opt(9, 0, 0).unwrap();
        let demand = DemandForecastingEngine::new().forecast_station_demand(&mut StdRng::seed_from_u64(5), now);

        assert_eq!(demand.len(), STATIONS.len());
        for station in &demand {
            assert_eq!(station.peak_time, "17:30 - 19:00");
            assert!(station.confidence >= 85.0 && station.confidence <= 97.0);
            assert_eq!(station.trend, classify_trend(station.current_load, station.predicted_load));
        }
    }

    #[test]
    fn test_insights_rollup() {
        let now = NaiveDate::from_ymd_opt(2025, 1, 8).unwrap().and_hms_opt(15, 0, 0).unwrap();
        let insights = DemandForecastingEngine::new().demand_insights(&mut StdRng::seed_from_u64(2), now);

        assert_eq!(insights.factors.day_of_week, Weekday::Wed);
        assert!(insights.high_impact_changes <= TIME_SLOTS.len());
        assert!(insights.optimization_potential >= 0.0 && insights.optimization_potential <= 100.0);
        let expected_trend = if insights.total_predicted_passengers > insights.total_current_passengers {
            Trend::Increasing
        } else {
            Trend::Decreasing
        };
        assert_eq!(insights.demand_trend, expected_trend);
    }
}
