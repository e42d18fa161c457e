use crate::core::batch::BatchSummary;
use crate::core::induction::OptimizationResult;
use crate::core::readiness::{ReadinessSummary, TrainReadiness};
use crate::engines::demand::{DemandInsights, ScheduleRecommendation};
use crate::engines::digital_twin::{NetworkMetrics, ScenarioOutcome};
use crate::engines::energy::{EnergyMetrics, EnergyProfile, MonthlyProjection, RouteEnergyData};
use crate::engines::maintenance::{MaintenanceAlert, MaintenanceImpact};
use crate::engines::weather::{AdaptiveSlot, WeatherData, WeatherImpact};
use crate::models::train::ScoredTrain;

const RULE: &str = "----------------------------------------";

fn print_bucket(label: &str, trains: &[ScoredTrain]) {
    println!("{} ({}):", label, trains.len());
    for t in trains {
        println!("  {}  score {:.2}  bay {}  mileage {} km", t.train.id, t.score, t.train.current_bay, t.train.mileage);
    }
}

pub fn print_induction_summary(result: &OptimizationResult) {
    println!("\nInduction Plan");
    println!("{}", RULE);
    print_bucket("Service", &result.service_trains);
    print_bucket("Standby", &result.standby_trains);
    print_bucket("Maintenance", &result.maintenance_trains);
    println!("Total service score: {:.2}", result.total_score);
    println!("Clearance holds: {}", result.clearance_holds);
    println!("Planned in {} ms", result.execution_time_ms);

    if result.constraint_violations.is_empty() {
        println!("Constraint violations: none");
    } else {
        println!("Constraint violations:");
        for v in &result.constraint_violations {
            println!("  ! {}", v);
        }
    }
    println!("Recommendations:");
    for r in &result.recommendations {
        println!("  - {}", r);
    }
}

pub fn print_readiness(entries: &[TrainReadiness], summary: &ReadinessSummary) {
    println!("\nFleet Readiness");
    println!("{}", RULE);
    for entry in entries {
        if entry.missing_clearances.is_empty() {
            println!("{}: {}", entry.train_id, entry.readiness);
        } else {
            println!("{}: {} (missing: {})", entry.train_id, entry.readiness, entry.missing_clearances.join(", "));
        }
    }
    println!(
        "Service ready: {}  Standby: {}  Maintenance required: {}",
        summary.service_ready, summary.standby, summary.maintenance_required
    );
}

pub fn print_maintenance(alerts: &[MaintenanceAlert], impact: &MaintenanceImpact) {
    println!("\nPredictive Maintenance");
    println!("{}", RULE);
    for a in alerts {
        println!(
            "[{}] {} {}: {:.1}% failure risk in {} (est. ₹{:.0}) - {}",
            a.severity, a.train_id, a.component, a.failure_probability,
            a.predicted_failure_time, a.estimated_cost, a.recommended_action
        );
    }
    println!("Alerts: {} ({} critical)", impact.total_alerts, impact.critical_alerts);
    println!("Fleet health: {:.1}%", impact.fleet_health_score);
    println!("Estimated savings: ₹{:.0}", impact.estimated_savings);
    println!("Prevented breakdowns: {}", impact.prevented_breakdowns);
}

pub fn print_demand(insights: &DemandInsights, schedule: &[ScheduleRecommendation]) {
    println!("\nDemand Forecast");
    println!("{}", RULE);
    println!(
        "{:?}, {} at {:.1}°C{}",
        insights.factors.day_of_week,
        insights.factors.weather,
        insights.factors.temperature,
        if insights.factors.holiday { ", holiday" } else { "" }
    );
    if !insights.factors.events.is_empty() {
        println!("Events: {}", insights.factors.events.join(", "));
    }
    println!(
        "Passengers: {} now, {} predicted ({:?})",
        insights.total_current_passengers, insights.total_predicted_passengers, insights.demand_trend
    );
    println!("Average confidence: {:.1}%", insights.avg_confidence);
    println!("Schedule:");
    for slot in schedule {
        println!(
            "  {}: {} -> {} trains/h, ~{} passengers ({:?}) {}",
            slot.time_slot, slot.current_frequency, slot.recommended_frequency,
            slot.expected_passengers, slot.impact, slot.reason
        );
    }
    println!("Optimization potential: {:.0}%", insights.optimization_potential);
}

pub fn print_energy(profiles: &[EnergyProfile], routes: &[RouteEnergyData], metrics: &EnergyMetrics, projection: &MonthlyProjection) {
    println!("\nEnergy Optimization");
    println!("{}", RULE);
    for p in profiles {
        println!(
            "{}: {:.0} -> {:.0} kWh (saves {:.0}, efficiency {:.0}%)",
            p.train_id, p.current_consumption, p.optimized_consumption, p.savings, p.efficiency
        );
    }
    println!("Routes:");
    for r in routes {
        println!(
            "  {} ({:.1} km): {:.0} -> {:.0} kWh, {} ({:.1}%)",
            r.route, r.distance, r.current_energy, r.optimized_energy, r.speed_profile, r.savings_percentage
        );
    }
    println!("Daily savings: {:.0} kWh, ₹{:.0}, {:.0} kg CO2", metrics.total_savings, metrics.cost_savings, metrics.carbon_reduction);
    println!("Regenerative braking: {:.0} kWh", metrics.regenerative_energy);
    println!(
        "Monthly: {:.0} kWh, ₹{:.0}, {:.0} kg CO2 (~{:.0} trees)",
        projection.energy_savings, projection.cost_savings, projection.carbon_reduction, projection.trees_equivalent
    );
}

pub fn print_weather(weather: &WeatherData, impact: &WeatherImpact, schedule: &[AdaptiveSlot]) {
    println!("\nWeather Operations");
    println!("{}", RULE);
    println!(
        "{}: {:.1}°C, humidity {:.0}%, wind {:.0} km/h, visibility {:.0} m, rain {:.1} mm",
        weather.condition, weather.temperature, weather.humidity, weather.wind_speed, weather.visibility, weather.rainfall
    );
    for f in &weather.forecast {
        println!("  {:>4}: {} {:.1}°C ({:?})", f.time, f.condition, f.temperature, f.impact);
    }
    for alert in &weather.alerts {
        println!("  ! [{}] {} - {}", alert.severity, alert.message, alert.recommendation);
    }
    println!(
        "Status: {} ({}), speed -{}%, frequency {:+}, delay {} min",
        impact.operational_status, impact.safety_protocol, impact.speed_reduction,
        impact.frequency_adjustment, impact.delay_prediction
    );
    for slot in schedule {
        println!(
            "  {}: {} -> {} trains/h at {} km/h",
            slot.time, slot.normal_frequency, slot.adapted_frequency, slot.adapted_speed
        );
    }
}

pub fn print_network(metrics: &NetworkMetrics, outcome: &ScenarioOutcome) {
    println!("\nDigital Twin");
    println!("{}", RULE);
    println!("Active trains: {}", metrics.active_trains);
    println!("Passengers on board: {}", metrics.total_passengers);
    println!("Average speed: {:.0} km/h", metrics.avg_speed);
    println!("On-time performance: {:.1}%", metrics.on_time_performance);
    println!("Network load: {:.0}%", metrics.network_load);
    println!("Scenario: {} - {}", outcome.scenario, outcome.impact);
    println!("  Recommendation: {}", outcome.recommendation);
}

pub fn print_batch_summary(summary: &BatchSummary) {
    println!("\nBatch Summary");
    println!("{}", RULE);
    println!("Runs: {}", summary.runs);
    println!(
        "Service trains: mean {:.2}, min {}, max {}",
        summary.mean_service, summary.min_service, summary.max_service
    );
    println!("Mean total score: {:.2}", summary.mean_total_score);
    println!("Feasible plans: {:.1}%", summary.feasibility_rate * 100.0);
    println!("Mean clearance holds: {:.2}", summary.mean_clearance_holds);
}
