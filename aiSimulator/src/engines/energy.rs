use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::instrument;

use crate::config::const_funcs::{calc_route_current_energy, calc_route_optimized_energy, round_to_tenth, train_id};
use crate::config::constants::*;
use crate::models::network::{Route, ROUTES};
use crate::utils::logging::{self, EngineKind, OperationCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedProfile {
    #[serde(rename = "Eco Mode")]
    EcoMode,
    Balanced,
    Performance,
}

impl SpeedProfile {
    pub fn for_savings(savings_percentage: f64) -> Self {
        if savings_percentage > ECO_MODE_SAVINGS {
            SpeedProfile::EcoMode
        } else if savings_percentage > BALANCED_MODE_SAVINGS {
            SpeedProfile::Balanced
        } else {
            SpeedProfile::Performance
        }
    }
}

impl fmt::Display for SpeedProfile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SpeedProfile::EcoMode => write!(f, "Eco Mode"),
            SpeedProfile::Balanced => write!(f, "Balanced"),
            SpeedProfile::Performance => write!(f, "Performance"),
        }
    }
}

/// Daily energy picture for one train (kWh, kg CO2).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyProfile {
    pub train_id: String,
    pub current_consumption: f64,
    pub optimized_consumption: f64,
    pub savings: f64,
    pub efficiency: f64,
    pub carbon_footprint: f64,
    pub regenerative_braking: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteEnergyData {
    pub route: String,
    pub distance: f64,
    pub current_energy: f64,
    pub optimized_energy: f64,
    pub speed_profile: SpeedProfile,
    pub savings_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyMetrics {
    pub total_consumption: f64,
    pub total_savings: f64,
    pub avg_efficiency: f64,
    pub carbon_reduction: f64,
    pub cost_savings: f64,
    pub regenerative_energy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyProjection {
    pub energy_savings: f64,
    pub cost_savings: f64,
    pub carbon_reduction: f64,
    pub trees_equivalent: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EnergyOptimizationEngine;

impl EnergyOptimizationEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn profile_for(&self, train_number: u32, base_consumption: f64, optimization_rate: f64, regenerative_rate: f64) -> EnergyProfile {
        let optimized = base_consumption * (1.0 - optimization_rate);
        let savings = base_consumption - optimized;

        EnergyProfile {
            train_id: train_id(train_number),
            current_consumption: base_consumption.round(),
            optimized_consumption: optimized.round(),
            savings: savings.round(),
            efficiency: (optimized / base_consumption * 100.0).round(),
            carbon_footprint: (optimized * CARBON_PER_KWH).round(),
            regenerative_braking: (base_consumption * regenerative_rate).round(),
        }
    }

    /// Per-train profiles, largest savings first.
    #[instrument(skip_all)]
    pub fn analyze_fleet_energy<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<EnergyProfile> {
        let _timing = logging::start_timing("analyze_fleet_energy",
            OperationCategory::EngineAnalysis { subcategory: EngineKind::Energy });

        let mut profiles: Vec<EnergyProfile> = (1..=MONITORED_TRAINS)
            .map(|train_number| {
                let base = MIN_DAILY_CONSUMPTION + rng.gen::<f64>() * DAILY_CONSUMPTION_SPAN;
                let optimization_rate = MIN_OPTIMIZATION_RATE + rng.gen::<f64>() * OPTIMIZATION_RATE_SPAN;
                let regenerative_rate = MIN_REGENERATIVE_RATE + rng.gen::<f64>() * REGENERATIVE_RATE_SPAN;
                self.profile_for(train_number, base, optimization_rate, regenerative_rate)
            })
            .collect();

        profiles.sort_by(|a, b| b.savings.total_cmp(&a.savings));
        profiles
    }

    pub fn analyze_route(&self, route: &Route) -> RouteEnergyData {
        let current = calc_route_current_energy(route.distance_km, route.stops);
        let optimized = calc_route_optimized_energy(route.distance_km, route.stops);
        let savings = (current - optimized) / current * 100.0;

        RouteEnergyData {
            route: route.name.to_string(),
            distance: route.distance_km,
            current_energy: current.round(),
            optimized_energy: optimized.round(),
            speed_profile: SpeedProfile::for_savings(savings),
            savings_percentage: round_to_tenth(savings),
        }
    }

    pub fn analyze_route_energy(&self) -> Vec<RouteEnergyData> {
        ROUTES.iter().map(|route| self.analyze_route(route)).collect()
    }

    pub fn metrics_for(&self, profiles: &[EnergyProfile]) -> EnergyMetrics {
        let total_consumption: f64 = profiles.iter().map(|p| p.current_consumption).sum();
        let total_optimized: f64 = profiles.iter().map(|p| p.optimized_consumption).sum();
        let total_savings = total_consumption - total_optimized;
        let avg_efficiency = if profiles.is_empty() {
            0.0
        } else {
            profiles.iter().map(|p| p.efficiency).sum::<f64>() / profiles.len() as f64
        };

        EnergyMetrics {
            total_consumption: total_consumption.round(),
            total_savings: total_savings.round(),
            avg_efficiency: round_to_tenth(avg_efficiency),
            carbon_reduction: (total_savings * CARBON_PER_KWH).round(),
            cost_savings: (total_savings * ENERGY_COST_PER_KWH).round(),
            regenerative_energy: profiles.iter().map(|p| p.regenerative_braking).sum::<f64>().round(),
        }
    }

    pub fn energy_metrics<R: Rng + ?Sized>(&self, rng: &mut R) -> EnergyMetrics {
        let profiles = self.analyze_fleet_energy(rng);
        self.metrics_for(&profiles)
    }

    pub fn monthly_projections(&self, metrics: &EnergyMetrics) -> MonthlyProjection {
        let carbon = metrics.carbon_reduction * DAYS_PER_MONTH;
        MonthlyProjection {
            energy_savings: metrics.total_savings * DAYS_PER_MONTH,
            cost_savings: metrics.cost_savings * DAYS_PER_MONTH,
            carbon_reduction: carbon,
            trees_equivalent: (carbon / CO2_PER_TREE_KG).round(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_profile_for_rounds_fields() {
        let profile = EnergyOptimizationEngine::new().profile_for(2, 1000.0, 0.15, 0.25);
        assert_eq!(profile.train_id, "KMRL-002");
        assert_eq!(profile.current_consumption, 1000.0);
        assert_eq!(profile.optimized_consumption, 850.0);
        assert_eq!(profile.savings, 150.0);
        assert_eq!(profile.efficiency, 85.0);
        assert_eq!(profile.carbon_footprint, 697.0);
        assert_eq!(profile.regenerative_braking, 250.0);
    }

    #[test]
    fn test_fleet_profiles_sorted_by_savings() {
        let profiles = EnergyOptimizationEngine::new().analyze_fleet_energy(&mut StdRng::seed_from_u64(4));
        assert_eq!(profiles.len(), MONITORED_TRAINS as usize);
        for pair in profiles.windows(2) {
            assert!(pair[0].savings >= pair[1].savings);
        }
        for p in &profiles {
            assert!(p.efficiency >= 80.0 && p.efficiency <= 88.0);
        }
    }

    #[test]
    fn test_route_energy_for_full_line() {
        let data = EnergyOptimizationEngine::new().analyze_route(&ROUTES[0]);
        // current 13.4*2.8 + 11*18 = 235.52, optimized (33.5 + 165) * 0.85 = 168.725
        assert_eq!(data.current_energy, 236.0);
        assert_eq!(data.optimized_energy, 169.0);
        assert_eq!(data.savings_percentage, 28.4);
        assert_eq!(data.speed_profile, SpeedProfile::EcoMode);
    }

    #[test]
    fn test_speed_profile_bands() {
        assert_eq!(SpeedProfile::for_savings(15.1), SpeedProfile::EcoMode);
        assert_eq!(SpeedProfile::for_savings(15.0), SpeedProfile::Balanced);
        assert_eq!(SpeedProfile::for_savings(10.0), SpeedProfile::Performance);
    }

    #[test]
    fn test_monthly_projection() {
        let metrics = EnergyMetrics {
            total_consumption: 8000.0,
            total_savings: 1000.0,
            avg_efficiency: 85.0,
            carbon_reduction: 820.0,
            cost_savings: 8500.0,
            regenerative_energy: 2000.0,
        };
        let projection = EnergyOptimizationEngine::new().monthly_projections(&metrics);
        assert_eq!(projection.energy_savings, 30_000.0);
        assert_eq!(projection.cost_savings, 255_000.0);
        assert_eq!(projection.carbon_reduction, 24_600.0);
        assert_eq!(projection.trees_equivalent, 1171.0);
    }
}
