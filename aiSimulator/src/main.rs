use anyhow::{Context, Result};
use chrono::{Local, Timelike};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Map, Value};
use tracing::info;

use kmrl_induction::analysis::reporting;
use kmrl_induction::cli::cli::{Args, Report};
use kmrl_induction::config::engine_config::EngineConfig;
use kmrl_induction::core::batch::run_batch;
use kmrl_induction::core::induction::{optimize_fleet, OptimizationResult};
use kmrl_induction::core::readiness::{fleet_readiness, summarize};
use kmrl_induction::data::fleet_loader::load_fleet;
use kmrl_induction::data::mock_fleet::generate_mock_fleet;
use kmrl_induction::engines::demand::DemandForecastingEngine;
use kmrl_induction::engines::digital_twin::DigitalTwinEngine;
use kmrl_induction::engines::energy::EnergyOptimizationEngine;
use kmrl_induction::engines::maintenance::PredictiveMaintenanceEngine;
use kmrl_induction::engines::weather::WeatherEngine;
use kmrl_induction::models::train::TrainRecord;
use kmrl_induction::utils::csv_export::CsvExporter;
use kmrl_induction::utils::logging::{self, FileIOType, OperationCategory};

fn load_config(args: &Args) -> Result<EngineConfig> {
    let _timing = logging::start_timing("load_config",
        OperationCategory::FileIO { subcategory: FileIOType::ConfigLoad });

    match args.config() {
        Some(path) => EngineConfig::load_from_file(path)
            .with_context(|| format!("failed to load engine config from {}", path)),
        None => Ok(EngineConfig::default()),
    }
}

fn load_or_generate_fleet(args: &Args, config: &EngineConfig, rng: &mut StdRng) -> Result<Vec<TrainRecord>> {
    match args.fleet_csv() {
        Some(path) => {
            let _timing = logging::start_timing("load_fleet",
                OperationCategory::FileIO { subcategory: FileIOType::FleetLoad });
            load_fleet(path).with_context(|| format!("failed to load fleet from {}", path))
        }
        None => Ok(generate_mock_fleet(rng, config.fleet_size)),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_logging(args.enable_timing(), args.debug_logging())
        .context("failed to initialise logging")?;

    let config = load_config(&args)?;
    let mut rng = match args.seed() {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let now = Local::now().naive_local();
    let exporter = match args.csv_dir() {
        Some(dir) => Some(CsvExporter::new(dir).with_context(|| format!("failed to create export directory under {}", dir))?),
        None => None,
    };

    info!(report = ?args.report(), seed = ?args.seed(), runs = args.runs(), "starting");

    let mut sections = Map::new();

    if args.includes(Report::Induction) || args.includes(Report::Fleet) {
        let fleet = load_or_generate_fleet(&args, &config, &mut rng)?;

        if args.includes(Report::Fleet) {
            let entries = fleet_readiness(&fleet);
            let summary = summarize(&entries);
            if args.json() {
                sections.insert("fleet".into(), json!({ "trains": entries, "summary": summary }));
            } else {
                reporting::print_readiness(&entries, &summary);
            }
        }

        if args.includes(Report::Induction) {
            let result: OptimizationResult = optimize_fleet(&fleet, &config);
            if let Some(exporter) = &exporter {
                exporter.export_induction_plan(&result)?;
            }
            if args.json() {
                sections.insert("induction".into(), serde_json::to_value(&result)?);
            } else {
                reporting::print_induction_summary(&result);
            }

            if args.runs() > 1 {
                let batch = run_batch(&config, args.runs(), args.parallel(), args.seed())?;
                if let Some(exporter) = &exporter {
                    exporter.export_batch(&batch.records, &batch.summary)?;
                }
                if args.json() {
                    sections.insert("batch".into(), serde_json::to_value(&batch.summary)?);
                } else {
                    reporting::print_batch_summary(&batch.summary);
                }
            }
        }
    }

    if args.includes(Report::Maintenance) {
        let engine = PredictiveMaintenanceEngine::new();
        let alerts = engine.analyze_fleet(&mut rng, now);
        let impact = engine.maintenance_impact(&alerts);
        if let Some(exporter) = &exporter {
            exporter.export_maintenance_alerts(&alerts)?;
        }
        if args.json() {
            sections.insert("maintenance".into(), json!({ "alerts": alerts, "impact": impact }));
        } else {
            reporting::print_maintenance(&alerts, &impact);
        }
    }

    if args.includes(Report::Demand) {
        let engine = DemandForecastingEngine::new();
        let factors = engine.demand_factors(&mut rng, now);
        let stations = engine.forecast_with_factors(&mut rng, &factors, now.hour());
        let schedule = engine.recommendations_with_factors(&factors);
        let insights = engine.summarize(factors, &stations, &schedule);
        if args.json() {
            sections.insert(
                "demand".into(),
                json!({ "stations": stations, "schedule": schedule, "insights": insights }),
            );
        } else {
            reporting::print_demand(&insights, &schedule);
        }
    }

    if args.includes(Report::Energy) {
        let engine = EnergyOptimizationEngine::new();
        let profiles = engine.analyze_fleet_energy(&mut rng);
        let routes = engine.analyze_route_energy();
        let metrics = engine.metrics_for(&profiles);
        let projection = engine.monthly_projections(&metrics);
        if let Some(exporter) = &exporter {
            exporter.export_energy_profiles(&profiles)?;
        }
        if args.json() {
            sections.insert(
                "energy".into(),
                json!({ "profiles": profiles, "routes": routes, "metrics": metrics, "monthly": projection }),
            );
        } else {
            reporting::print_energy(&profiles, &routes, &metrics, &projection);
        }
    }

    if args.includes(Report::Weather) {
        let engine = WeatherEngine::new();
        let weather = engine.get_current_weather(&mut rng, now);
        let impact = engine.weather_impact(&weather);
        let schedule = engine.adaptive_schedule(&weather);
        if args.json() {
            sections.insert(
                "weather".into(),
                json!({ "current": weather, "impact": impact, "adaptiveSchedule": schedule }),
            );
        } else {
            reporting::print_weather(&weather, &impact, &schedule);
        }
    }

    if args.includes(Report::Twin) {
        let engine = DigitalTwinEngine::new();
        let trains = engine.train_positions(&mut rng);
        let stations = engine.station_status(&mut rng);
        let metrics = engine.metrics_for(&trains);
        let outcome = engine.outcome_for(args.scenario(), &metrics);
        if args.json() {
            sections.insert(
                "twin".into(),
                json!({ "trains": trains, "stations": stations, "metrics": metrics, "scenario": outcome }),
            );
        } else {
            reporting::print_network(&metrics, &outcome);
        }
    }

    if args.json() {
        println!("{}", serde_json::to_string_pretty(&Value::Object(sections))?);
    }

    if let Some(exporter) = &exporter {
        info!(dir = %exporter.output_dir().display(), "CSV export written");
    }

    logging::print_timing_report();
    Ok(())
}
