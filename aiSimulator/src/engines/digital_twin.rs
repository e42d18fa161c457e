use clap::ValueEnum;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, instrument};

use crate::config::const_funcs::{round_to_tenth, train_id};
use crate::config::constants::*;
use crate::models::network::{next_station, STATIONS};
use crate::utils::logging::{self, EngineKind, OperationCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunningStatus {
    OnTime,
    Delayed,
    Early,
}

impl RunningStatus {
    pub fn from_delay(delay_minutes: i32) -> Self {
        if delay_minutes > DELAYED_THRESHOLD_MINUTES {
            RunningStatus::Delayed
        } else if delay_minutes < -1 {
            RunningStatus::Early
        } else {
            RunningStatus::OnTime
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformStatus {
    Clear,
    Occupied,
    Boarding,
}

const PLATFORM_STATUSES: [PlatformStatus; 3] = [PlatformStatus::Clear, PlatformStatus::Occupied, PlatformStatus::Boarding];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainPosition {
    pub train_id: String,
    pub current_station: String,
    pub next_station: String,
    pub progress: u32,      // percent of the way to the next station
    pub speed: u32,         // km/h
    pub status: RunningStatus,
    pub passengers: u32,
    pub delay: i32,         // minutes
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationStatus {
    pub name: String,
    pub position: usize,
    pub waiting_passengers: u32,
    pub platform_status: PlatformStatus,
    pub next_arrival: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkMetrics {
    pub active_trains: usize,
    pub total_passengers: u32,
    pub avg_speed: f64,
    pub on_time_performance: f64,
    pub network_load: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Scenario {
    Normal,
    Breakdown,
    EventSurge,
    WeatherDelay,
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Scenario::Normal => write!(f, "normal"),
            Scenario::Breakdown => write!(f, "breakdown"),
            Scenario::EventSurge => write!(f, "event-surge"),
            Scenario::WeatherDelay => write!(f, "weather-delay"),
        }
    }
}

impl FromStr for Scenario {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "normal" => Ok(Scenario::Normal),
            "breakdown" => Ok(Scenario::Breakdown),
            "event-surge" => Ok(Scenario::EventSurge),
            "weather-delay" => Ok(Scenario::WeatherDelay),
            other => Err(format!("Unknown scenario: {}", other)),
        }
    }
}

/// What-if result. Fields that a scenario does not speak to are left out of the JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioOutcome {
    pub scenario: String,
    pub impact: String,
    pub recommendation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_trains: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_increase: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passenger_impact: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_time: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub affected_stations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passenger_increase: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed_reduction: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_time_performance: Option<f64>,
}

impl ScenarioOutcome {
    fn new(scenario: &str, impact: &str, recommendation: &str) -> Self {
        Self {
            scenario: scenario.to_string(),
            impact: impact.to_string(),
            recommendation: recommendation.to_string(),
            affected_trains: None,
            delay_increase: None,
            passenger_impact: None,
            recovery_time: None,
            affected_stations: Vec::new(),
            passenger_increase: None,
            speed_reduction: None,
            on_time_performance: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DigitalTwinEngine;

impl DigitalTwinEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn train_positions<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<TrainPosition> {
        (1..=MONITORED_TRAINS)
            .map(|train_number| {
                let current = STATIONS.choose(rng).copied().unwrap_or(STATIONS[0]);
                let progress = rng.gen::<f64>() * 100.0;
                let speed = MIN_TRAIN_SPEED + rng.gen::<f64>() * TRAIN_SPEED_SPAN;
                let delay = if rng.gen_bool(ON_TIME_PROBABILITY) {
                    0
                } else {
                    rng.gen_range(0..=MAX_DELAY_MINUTES) as i32
                };

                TrainPosition {
                    train_id: train_id(train_number),
                    current_station: current.to_string(),
                    next_station: next_station(current).to_string(),
                    progress: progress.round() as u32,
                    speed: speed.round() as u32,
                    status: RunningStatus::from_delay(delay),
                    passengers: rng.gen_range(MIN_ONBOARD_PASSENGERS..MIN_ONBOARD_PASSENGERS + ONBOARD_PASSENGER_SPAN),
                    delay,
                }
            })
            .collect()
    }

    pub fn station_status<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<StationStatus> {
        STATIONS
            .iter()
            .enumerate()
            .map(|(position, name)| StationStatus {
                name: name.to_string(),
                position,
                waiting_passengers: rng.gen_range(0..MAX_WAITING_PASSENGERS),
                platform_status: PLATFORM_STATUSES.choose(rng).copied().unwrap_or(PlatformStatus::Clear),
                next_arrival: format!("{} min", rng.gen_range(2..10)),
            })
            .collect()
    }

    pub fn metrics_for(&self, trains: &[TrainPosition]) -> NetworkMetrics {
        let active_trains = trains.len();
        if active_trains == 0 {
            return NetworkMetrics {
                active_trains: 0,
                total_passengers: 0,
                avg_speed: 0.0,
                on_time_performance: 0.0,
                network_load: 0.0,
            };
        }

        let total_passengers: u32 = trains.iter().map(|t| t.passengers).sum();
        let avg_speed = trains.iter().map(|t| t.speed as f64).sum::<f64>() / active_trains as f64;
        let on_time = trains.iter().filter(|t| t.status == RunningStatus::OnTime).count();

        NetworkMetrics {
            active_trains,
            total_passengers,
            avg_speed: avg_speed.round(),
            on_time_performance: round_to_tenth(on_time as f64 / active_trains as f64 * 100.0),
            network_load: (total_passengers as f64 / (active_trains as f64 * TRAIN_CAPACITY) * 100.0).round(),
        }
    }

    #[instrument(skip_all)]
    pub fn network_metrics<R: Rng + ?Sized>(&self, rng: &mut R) -> NetworkMetrics {
        let _timing = logging::start_timing("network_metrics",
            OperationCategory::EngineAnalysis { subcategory: EngineKind::DigitalTwin });
        let trains = self.train_positions(rng);
        self.metrics_for(&trains)
    }

    pub fn outcome_for(&self, scenario: Scenario, base: &NetworkMetrics) -> ScenarioOutcome {
        match scenario {
            Scenario::Breakdown => ScenarioOutcome {
                affected_trains: Some(2),
                delay_increase: Some(15),
                passenger_impact: Some(800),
                recovery_time: Some("45 minutes".to_string()),
                ..ScenarioOutcome::new(
                    "Train Breakdown at Edapally",
                    "2 trains affected, 15 min avg delay",
                    "Deploy backup train, reroute passengers via bus",
                )
            },
            Scenario::EventSurge => ScenarioOutcome {
                affected_stations: ["JLN Stadium", "Kaloor", "Palarivattom"].iter().map(|s| s.to_string()).collect(),
                passenger_increase: Some(base.total_passengers * 2),
                ..ScenarioOutcome::new(
                    "Cricket Match at JLN Stadium",
                    "3x passenger surge expected",
                    "Increase frequency to 10 trains/hour, deploy crowd management",
                )
            },
            Scenario::WeatherDelay => ScenarioOutcome {
                affected_trains: Some(base.active_trains),
                speed_reduction: Some(25),
                delay_increase: Some(5),
                ..ScenarioOutcome::new(
                    "Heavy Rain Alert",
                    "Speed reduced to 60 km/h, 5 min delays",
                    "Activate weather protocol, increase headway time",
                )
            },
            Scenario::Normal => ScenarioOutcome {
                on_time_performance: Some(base.on_time_performance),
                ..ScenarioOutcome::new("Normal Operations", "All systems operational", "Continue monitoring")
            },
        }
    }

    pub fn simulate_scenario<R: Rng + ?Sized>(&self, rng: &mut R, scenario: Scenario) -> ScenarioOutcome {
        let base = self.network_metrics(rng);
        debug!(%scenario, passengers = base.total_passengers, "simulating scenario");
        self.outcome_for(scenario, &base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_positions_within_bounds() {
        let engine = DigitalTwinEngine::new();
        let trains = engine.train_positions(&mut StdRng::seed_from_u64(21));

        assert_eq!(trains.len(), 8);
        assert_eq!(trains[0].train_id, "KMRL-001");
        for t in &trains {
            assert!(t.speed >= 40 && t.speed <= 80);
            assert!(t.progress <= 100);
            assert!(t.passengers >= 150 && t.passengers < 400);
            assert!(t.delay >= 0 && t.delay <= 4);
            assert_eq!(t.next_station, next_station(&t.current_station));
            assert_eq!(t.status == RunningStatus::Delayed, t.delay > 2);
        }
    }

    #[test]
    fn test_station_status_covers_line() {
        let stations = DigitalTwinEngine::new().station_status(&mut StdRng::seed_from_u64(2));
        assert_eq!(stations.len(), STATIONS.len());
        assert_eq!(stations[22].name, "SN Junction");
        assert!(stations.iter().all(|s| s.waiting_passengers < 150));
    }

    #[test]
    fn test_metrics_for_known_trains() {
        let engine = DigitalTwinEngine::new();
        let mut trains = engine.train_positions(&mut StdRng::seed_from_u64(5));
        trains.truncate(2);
        trains[0].passengers = 200;
        trains[0].speed = 50;
        trains[0].status = RunningStatus::OnTime;
        trains[1].passengers = 400;
        trains[1].speed = 61;
        trains[1].status = RunningStatus::Delayed;

        let metrics = engine.metrics_for(&trains);
        assert_eq!(metrics.total_passengers, 600);
        assert_eq!(metrics.avg_speed, 56.0);
        assert_eq!(metrics.on_time_performance, 50.0);
        assert_eq!(metrics.network_load, 75.0);
    }

    #[test]
    fn test_scenario_outcomes() {
        let engine = DigitalTwinEngine::new();
        let base = NetworkMetrics {
            active_trains: 8,
            total_passengers: 2000,
            avg_speed: 60.0,
            on_time_performance: 87.5,
            network_load: 63.0,
        };

        let surge = engine.outcome_for(Scenario::EventSurge, &base);
        assert_eq!(surge.passenger_increase, Some(4000));
        assert_eq!(surge.affected_stations.len(), 3);

        let rain = engine.outcome_for(Scenario::WeatherDelay, &base);
        assert_eq!(rain.affected_trains, Some(8));

        let normal = engine.outcome_for(Scenario::Normal, &base);
        let json = serde_json::to_value(&normal).unwrap();
        assert_eq!(json["onTimePerformance"], 87.5);
        assert!(json.get("recoveryTime").is_none());
    }

    #[test]
    fn test_scenario_parses_cli_names() {
        assert_eq!("event-surge".parse::<Scenario>(), Ok(Scenario::EventSurge));
        assert_eq!("Breakdown".parse::<Scenario>(), Ok(Scenario::Breakdown));
        assert!("meteor".parse::<Scenario>().is_err());
    }
}
