use chrono::NaiveDateTime;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::config::engine_config::EngineConfig;
use crate::core::induction::{optimize_fleet, OptimizationResult};
use crate::core::readiness::{fleet_readiness, summarize, ReadinessSummary};
use crate::data::mock_fleet::generate_mock_fleet;
use crate::engines::demand::{DemandForecastingEngine, DemandInsights};
use crate::engines::digital_twin::{DigitalTwinEngine, NetworkMetrics};
use crate::engines::energy::{EnergyMetrics, EnergyOptimizationEngine, MonthlyProjection};
use crate::engines::maintenance::{MaintenanceAlert, MaintenanceImpact, PredictiveMaintenanceEngine};
use crate::engines::weather::{WeatherData, WeatherEngine, WeatherImpact};

/// Everything the operations dashboard shows for one moment in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub generated_at: NaiveDateTime,
    pub induction: OptimizationResult,
    pub readiness: ReadinessSummary,
    pub maintenance_alerts: Vec<MaintenanceAlert>,
    pub maintenance_impact: MaintenanceImpact,
    pub demand: DemandInsights,
    pub energy: EnergyMetrics,
    pub energy_projection: MonthlyProjection,
    pub weather: WeatherData,
    pub weather_impact: WeatherImpact,
    pub network: NetworkMetrics,
}

#[instrument(skip_all)]
pub fn build_snapshot<R: Rng + ?Sized>(rng: &mut R, config: &EngineConfig, now: NaiveDateTime) -> DashboardSnapshot {
    let fleet = generate_mock_fleet(rng, config.fleet_size);
    let readiness = summarize(&fleet_readiness(&fleet));
    let induction = optimize_fleet(&fleet, config);

    let maintenance = PredictiveMaintenanceEngine::new();
    let maintenance_alerts = maintenance.analyze_fleet(rng, now);
    let maintenance_impact = maintenance.maintenance_impact(&maintenance_alerts);

    let demand = DemandForecastingEngine::new().demand_insights(rng, now);

    let energy_engine = EnergyOptimizationEngine::new();
    let energy = energy_engine.energy_metrics(rng);
    let energy_projection = energy_engine.monthly_projections(&energy);

    let weather_engine = WeatherEngine::new();
    let weather = weather_engine.get_current_weather(rng, now);
    let weather_impact = weather_engine.weather_impact(&weather);

    let network = DigitalTwinEngine::new().network_metrics(rng);

    DashboardSnapshot {
        generated_at: now,
        induction,
        readiness,
        maintenance_alerts,
        maintenance_impact,
        demand,
        energy,
        energy_projection,
        weather,
        weather_impact,
        network,
    }
}
