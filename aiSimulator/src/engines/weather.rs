use chrono::{Datelike, NaiveDateTime};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, instrument};

use crate::config::const_funcs::{is_monsoon_month, round_to_tenth};
use crate::config::constants::*;
use crate::engines::maintenance::Severity;
use crate::utils::logging::{self, EngineKind, OperationCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherCondition {
    Clear,
    Rainy,
    #[serde(rename = "Heavy Rain")]
    HeavyRain,
    Fog,
    Thunderstorm,
    Cloudy,
    #[serde(rename = "Partly Cloudy")]
    PartlyCloudy,
}

impl WeatherCondition {
    pub fn is_rain(&self) -> bool {
        matches!(self, WeatherCondition::Rainy | WeatherCondition::HeavyRain)
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            WeatherCondition::Clear => "Clear",
            WeatherCondition::Rainy => "Rainy",
            WeatherCondition::HeavyRain => "Heavy Rain",
            WeatherCondition::Fog => "Fog",
            WeatherCondition::Thunderstorm => "Thunderstorm",
            WeatherCondition::Cloudy => "Cloudy",
            WeatherCondition::PartlyCloudy => "Partly Cloudy",
        };
        write!(f, "{}", label)
    }
}

const MONSOON_CONDITIONS: [WeatherCondition; 5] = [
    WeatherCondition::Rainy,
    WeatherCondition::HeavyRain,
    WeatherCondition::Cloudy,
    WeatherCondition::Thunderstorm,
    WeatherCondition::PartlyCloudy,
];

const DRY_SEASON_CONDITIONS: [WeatherCondition; 3] = [
    WeatherCondition::Clear,
    WeatherCondition::PartlyCloudy,
    WeatherCondition::Cloudy,
];

const FORECAST_CONDITIONS: [WeatherCondition; 5] = [
    WeatherCondition::Clear,
    WeatherCondition::PartlyCloudy,
    WeatherCondition::Cloudy,
    WeatherCondition::Rainy,
    WeatherCondition::HeavyRain,
];

const FORECAST_STEPS: [&str; 8] = ["Now", "1h", "2h", "3h", "4h", "6h", "12h", "24h"];

/// (time window, trains per hour) for the normal operating day.
pub const BASE_SCHEDULE: [(&str, u32); 8] = [
    ("06:00-08:00", 4),
    ("08:00-10:00", 6),
    ("10:00-12:00", 5),
    ("12:00-14:00", 4),
    ("14:00-16:00", 5),
    ("16:00-18:00", 6),
    ("18:00-20:00", 7),
    ("20:00-22:00", 4),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    None,
    Low,
    Medium,
    High,
}

impl ImpactLevel {
    pub fn for_forecast(condition: WeatherCondition, rainfall: f64) -> Self {
        if condition == WeatherCondition::HeavyRain || rainfall > 40.0 {
            ImpactLevel::High
        } else if condition == WeatherCondition::Rainy || rainfall > MODERATE_RAINFALL {
            ImpactLevel::Medium
        } else if condition == WeatherCondition::Cloudy {
            ImpactLevel::Low
        } else {
            ImpactLevel::None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Rain,
    Fog,
    Storm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationalStatus {
    Normal,
    Cautious,
    Restricted,
    Suspended,
}

impl fmt::Display for OperationalStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OperationalStatus::Normal => write!(f, "normal"),
            OperationalStatus::Cautious => write!(f, "cautious"),
            OperationalStatus::Restricted => write!(f, "restricted"),
            OperationalStatus::Suspended => write!(f, "suspended"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherForecast {
    pub time: String,
    pub condition: WeatherCondition,
    pub temperature: f64,
    pub rainfall: f64,
    pub impact: ImpactLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherAlert {
    pub kind: AlertKind,
    pub severity: Severity,
    pub message: String,
    pub recommendation: String,
    pub affected_lines: Vec<String>,
}

impl WeatherAlert {
    fn new(kind: AlertKind, severity: Severity, message: &str, recommendation: &str, lines: &[&str]) -> Self {
        Self {
            kind,
            severity,
            message: message.to_string(),
            recommendation: recommendation.to_string(),
            affected_lines: lines.iter().map(|l| l.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherData {
    pub condition: WeatherCondition,
    pub temperature: f64,   // °C
    pub humidity: f64,      // percent
    pub wind_speed: f64,    // km/h
    pub visibility: f64,    // m
    pub rainfall: f64,      // mm
    pub forecast: Vec<WeatherForecast>,
    pub alerts: Vec<WeatherAlert>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherImpact {
    pub speed_reduction: u32,       // percent
    pub frequency_adjustment: i32,  // trains per hour
    pub delay_prediction: u32,      // minutes
    pub safety_protocol: String,
    pub operational_status: OperationalStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptiveSlot {
    pub time: String,
    pub normal_frequency: u32,
    pub normal_speed: u32,
    pub adapted_frequency: u32,
    pub adapted_speed: u32,
    pub expected_delay: u32,
    pub status: OperationalStatus,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WeatherEngine;

impl WeatherEngine {
    pub fn new() -> Self {
        Self
    }

    #[instrument(skip_all)]
    pub fn get_current_weather<R: Rng + ?Sized>(&self, rng: &mut R, now: NaiveDateTime) -> WeatherData {
        let _timing = logging::start_timing("get_current_weather",
            OperationCategory::EngineAnalysis { subcategory: EngineKind::Weather });

        let monsoon = is_monsoon_month(now.month());
        let pool: &[WeatherCondition] = if monsoon { &MONSOON_CONDITIONS } else { &DRY_SEASON_CONDITIONS };
        let condition = pool.choose(rng).copied().unwrap_or(WeatherCondition::Clear);

        let temperature = if monsoon {
            26.0 + rng.gen::<f64>() * 6.0
        } else {
            28.0 + rng.gen::<f64>() * 8.0
        };
        let humidity = if condition.is_rain() {
            85.0 + rng.gen::<f64>() * 10.0
        } else {
            60.0 + rng.gen::<f64>() * 25.0
        };
        let rainfall = match condition {
            WeatherCondition::HeavyRain => 50.0 + rng.gen::<f64>() * 100.0,
            WeatherCondition::Rainy => 10.0 + rng.gen::<f64>() * 40.0,
            WeatherCondition::Thunderstorm => 30.0 + rng.gen::<f64>() * 80.0,
            _ => 0.0,
        };
        let wind_speed = if condition == WeatherCondition::Thunderstorm {
            40.0 + rng.gen::<f64>() * 30.0
        } else if condition.is_rain() {
            20.0 + rng.gen::<f64>() * 20.0
        } else {
            5.0 + rng.gen::<f64>() * 15.0
        };
        let visibility = match condition {
            WeatherCondition::Fog => 50.0 + rng.gen::<f64>() * 100.0,
            WeatherCondition::HeavyRain => 200.0 + rng.gen::<f64>() * 300.0,
            WeatherCondition::Rainy => 500.0 + rng.gen::<f64>() * 1000.0,
            _ => 5000.0 + rng.gen::<f64>() * 5000.0,
        };

        let forecast = self.generate_forecast(rng, condition, temperature);
        let alerts = self.generate_alerts(condition, rainfall, visibility, wind_speed);
        debug!(%condition, monsoon, alerts = alerts.len(), "weather sampled");

        WeatherData {
            condition,
            temperature: round_to_tenth(temperature),
            humidity: humidity.round(),
            wind_speed: wind_speed.round(),
            visibility: visibility.round(),
            rainfall: round_to_tenth(rainfall),
            forecast,
            alerts,
        }
    }

    pub fn generate_forecast<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        current: WeatherCondition,
        current_temperature: f64,
    ) -> Vec<WeatherForecast> {
        FORECAST_STEPS
            .iter()
            .enumerate()
            .map(|(index, time)| {
                let variation = (rng.gen::<f64>() - 0.5) * 4.0;
                let condition = if index == 0 {
                    current
                } else {
                    FORECAST_CONDITIONS.choose(rng).copied().unwrap_or(current)
                };
                let rainfall = if condition.is_rain() { rng.gen::<f64>() * 50.0 } else { 0.0 };

                WeatherForecast {
                    time: time.to_string(),
                    condition,
                    temperature: round_to_tenth(current_temperature + variation),
                    rainfall: round_to_tenth(rainfall),
                    impact: ImpactLevel::for_forecast(condition, rainfall),
                }
            })
            .collect()
    }

    pub fn generate_alerts(
        &self,
        condition: WeatherCondition,
        rainfall: f64,
        visibility: f64,
        wind_speed: f64,
    ) -> Vec<WeatherAlert> {
        let mut alerts = Vec::new();

        if condition == WeatherCondition::HeavyRain || rainfall > HEAVY_RAINFALL {
            let severity = if rainfall > EXTREME_RAINFALL { Severity::Critical } else { Severity::High };
            alerts.push(WeatherAlert::new(
                AlertKind::Rain,
                severity,
                "Heavy rainfall detected - Track flooding risk",
                "Reduce train speed to 40 km/h, increase headway by 2 minutes",
                &["Blue Line", "Green Line"],
            ));
        }

        if visibility < LOW_VISIBILITY {
            let severity = if visibility < CRITICAL_VISIBILITY { Severity::Critical } else { Severity::High };
            alerts.push(WeatherAlert::new(
                AlertKind::Fog,
                severity,
                "Low visibility conditions - Enhanced signaling required",
                "Activate fog protocol, reduce speed to 30 km/h",
                &["All Lines"],
            ));
        }

        if condition == WeatherCondition::Thunderstorm || wind_speed > STORM_WIND_SPEED {
            alerts.push(WeatherAlert::new(
                AlertKind::Storm,
                Severity::Critical,
                "Severe weather alert - Lightning and high winds",
                "Consider service suspension, ensure passenger safety",
                &["All Lines"],
            ));
        }

        if condition == WeatherCondition::Rainy && rainfall > MODERATE_RAINFALL && rainfall < HEAVY_RAINFALL {
            alerts.push(WeatherAlert::new(
                AlertKind::Rain,
                Severity::Medium,
                "Moderate rainfall - Monitor track conditions",
                "Reduce speed by 20%, monitor drainage systems",
                &["Blue Line"],
            ));
        }

        alerts
    }

    /// Operating restrictions for the observed weather. The condition ladder is
    /// evaluated first, then wind can tighten the result.
    pub fn weather_impact(&self, weather: &WeatherData) -> WeatherImpact {
        let (mut speed_reduction, frequency_adjustment, delay_prediction, safety_protocol, mut status) =
            if weather.condition == WeatherCondition::HeavyRain || weather.rainfall > HEAVY_RAINFALL {
                (40, -2, 8, "Heavy Rain Protocol - Enhanced Monitoring", OperationalStatus::Restricted)
            } else if weather.condition == WeatherCondition::Rainy || weather.rainfall > MODERATE_RAINFALL {
                (20, -1, 4, "Rain Protocol - Track Monitoring Active", OperationalStatus::Cautious)
            } else if weather.condition == WeatherCondition::Fog || weather.visibility < LOW_VISIBILITY {
                (50, -3, 12, "Fog Protocol - Enhanced Signaling", OperationalStatus::Restricted)
            } else if weather.condition == WeatherCondition::Thunderstorm {
                (60, -4, 15, "Storm Protocol - Service Evaluation Required", OperationalStatus::Suspended)
            } else if weather.condition == WeatherCondition::Cloudy {
                (5, 0, 1, "Standard Operations with Weather Monitoring", OperationalStatus::Cautious)
            } else {
                (0, 0, 0, "Standard Operations", OperationalStatus::Normal)
            };

        if weather.wind_speed > STORM_WIND_SPEED {
            speed_reduction = speed_reduction.max(50);
            status = OperationalStatus::Suspended;
        } else if weather.wind_speed > HIGH_WIND_SPEED {
            speed_reduction += 10;
            status = status.max(OperationalStatus::Cautious);
        }

        WeatherImpact {
            speed_reduction,
            frequency_adjustment,
            delay_prediction,
            safety_protocol: safety_protocol.to_string(),
            operational_status: status,
        }
    }

    pub fn adaptive_schedule(&self, weather: &WeatherData) -> Vec<AdaptiveSlot> {
        let impact = self.weather_impact(weather);
        let speed_factor = 1.0 - impact.speed_reduction as f64 / 100.0;

        BASE_SCHEDULE
            .iter()
            .map(|&(time, frequency)| AdaptiveSlot {
                time: time.to_string(),
                normal_frequency: frequency,
                normal_speed: BASE_LINE_SPEED,
                adapted_frequency: (frequency as i32 + impact.frequency_adjustment).max(MIN_ADAPTED_FREQUENCY) as u32,
                adapted_speed: (BASE_LINE_SPEED as f64 * speed_factor).round() as u32,
                expected_delay: impact.delay_prediction,
                status: impact.operational_status,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn at_month(month: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, month, 10).unwrap().and_hms_opt(9, 0, 0).unwrap()
    }

    fn observed(condition: WeatherCondition, rainfall: f64, visibility: f64, wind_speed: f64) -> WeatherData {
        WeatherData {
            condition,
            temperature: 29.0,
            humidity: 80.0,
            wind_speed,
            visibility,
            rainfall,
            forecast: Vec::new(),
            alerts: Vec::new(),
        }
    }

    #[test]
    fn test_dry_season_draws_dry_conditions() {
        let engine = WeatherEngine::new();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let weather = engine.get_current_weather(&mut rng, at_month(1));
            assert!(DRY_SEASON_CONDITIONS.contains(&weather.condition));
            assert_eq!(weather.rainfall, 0.0);
            assert!(weather.temperature >= 28.0 && weather.temperature <= 36.0);
            assert_eq!(weather.forecast.len(), 8);
            assert_eq!(weather.forecast[0].condition, weather.condition);
        }
    }

    #[test]
    fn test_monsoon_draws_monsoon_conditions() {
        let engine = WeatherEngine::new();
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..50 {
            let weather = engine.get_current_weather(&mut rng, at_month(7));
            assert!(MONSOON_CONDITIONS.contains(&weather.condition));
        }
    }

    #[test]
    fn test_forecast_impact_levels() {
        assert_eq!(ImpactLevel::for_forecast(WeatherCondition::HeavyRain, 5.0), ImpactLevel::High);
        assert_eq!(ImpactLevel::for_forecast(WeatherCondition::Rainy, 45.0), ImpactLevel::High);
        assert_eq!(ImpactLevel::for_forecast(WeatherCondition::Rainy, 5.0), ImpactLevel::Medium);
        assert_eq!(ImpactLevel::for_forecast(WeatherCondition::Cloudy, 0.0), ImpactLevel::Low);
        assert_eq!(ImpactLevel::for_forecast(WeatherCondition::Clear, 0.0), ImpactLevel::None);
    }

    #[test]
    fn test_alert_rules() {
        let engine = WeatherEngine::new();

        let heavy = engine.generate_alerts(WeatherCondition::HeavyRain, 120.0, 300.0, 30.0);
        assert_eq!(heavy.len(), 1);
        assert_eq!(heavy[0].kind, AlertKind::Rain);
        assert_eq!(heavy[0].severity, Severity::Critical);

        let fog = engine.generate_alerts(WeatherCondition::Fog, 0.0, 150.0, 10.0);
        assert_eq!(fog.len(), 1);
        assert_eq!(fog[0].severity, Severity::High);

        let storm = engine.generate_alerts(WeatherCondition::Thunderstorm, 40.0, 5000.0, 65.0);
        assert_eq!(storm.len(), 1);
        assert_eq!(storm[0].kind, AlertKind::Storm);

        let moderate = engine.generate_alerts(WeatherCondition::Rainy, 30.0, 800.0, 25.0);
        assert_eq!(moderate.len(), 1);
        assert_eq!(moderate[0].severity, Severity::Medium);

        assert!(engine.generate_alerts(WeatherCondition::Clear, 0.0, 8000.0, 10.0).is_empty());
    }

    #[test]
    fn test_impact_ladder_and_wind() {
        let engine = WeatherEngine::new();

        let clear = engine.weather_impact(&observed(WeatherCondition::Clear, 0.0, 8000.0, 10.0));
        assert_eq!(clear.operational_status, OperationalStatus::Normal);
        assert_eq!(clear.speed_reduction, 0);

        let windy = engine.weather_impact(&observed(WeatherCondition::Clear, 0.0, 8000.0, 45.0));
        assert_eq!(windy.operational_status, OperationalStatus::Cautious);
        assert_eq!(windy.speed_reduction, 10);

        let heavy = engine.weather_impact(&observed(WeatherCondition::HeavyRain, 80.0, 300.0, 30.0));
        assert_eq!(heavy.operational_status, OperationalStatus::Restricted);
        assert_eq!(heavy.frequency_adjustment, -2);

        let gale = engine.weather_impact(&observed(WeatherCondition::Rainy, 30.0, 800.0, 65.0));
        assert_eq!(gale.operational_status, OperationalStatus::Suspended);
        assert_eq!(gale.speed_reduction, 50);

        let storm = engine.weather_impact(&observed(WeatherCondition::Thunderstorm, 0.0, 5000.0, 30.0));
        assert_eq!(storm.operational_status, OperationalStatus::Suspended);
        assert_eq!(storm.delay_prediction, 15);
    }

    #[test]
    fn test_adaptive_schedule_floors_frequency() {
        let engine = WeatherEngine::new();
        let schedule = engine.adaptive_schedule(&observed(WeatherCondition::Fog, 0.0, 120.0, 10.0));

        assert_eq!(schedule.len(), 8);
        let frequencies: Vec<u32> = schedule.iter().map(|s| s.adapted_frequency).collect();
        assert_eq!(frequencies, vec![2, 3, 2, 2, 2, 3, 4, 2]);
        for slot in &schedule {
            assert_eq!(slot.adapted_speed, 40);
            assert_eq!(slot.status, OperationalStatus::Restricted);
        }
    }
}
