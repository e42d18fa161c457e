use clap::{Parser, ValueEnum};

use crate::engines::digital_twin::Scenario;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Report {
    Induction,
    Fleet,
    Maintenance,
    Demand,
    Energy,
    Weather,
    Twin,
    All,
}

#[derive(Parser)]
#[command(author, version, about = "KMRL train induction planner and operations simulator", long_about = None)]
pub struct Args {
    #[arg(short, long, value_enum, default_value_t = Report::Induction)]
    report: Report,

    #[arg(long, help = "Random seed for deterministic simulation")]
    seed: Option<u64>,

    #[arg(short = 'n', long, default_value_t = 1, help = "Number of induction runs to aggregate")]
    runs: usize,

    #[arg(short, long, default_value_t = false)]
    parallel: bool,

    #[arg(long, default_value_t = false, help = "Print results as JSON instead of text")]
    json: bool,

    #[arg(long, help = "Write CSV results into a timestamped folder under this directory")]
    csv_dir: Option<String>,

    #[arg(short, long, help = "JSON engine configuration (weights, constraints, fleet size)")]
    config: Option<String>,

    #[arg(long, help = "Plan induction for a fleet CSV instead of a mock fleet")]
    fleet_csv: Option<String>,

    #[arg(long, value_enum, default_value_t = Scenario::Normal)]
    scenario: Scenario,

    #[arg(long, default_value_t = false)]
    enable_timing: bool,

    #[arg(long, default_value_t = false)]
    debug_logging: bool,
}

impl Args {
    pub fn report(&self) -> Report {
        self.report
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn runs(&self) -> usize {
        self.runs
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }

    pub fn json(&self) -> bool {
        self.json
    }

    pub fn csv_dir(&self) -> Option<&str> {
        self.csv_dir.as_deref()
    }

    pub fn config(&self) -> Option<&str> {
        self.config.as_deref()
    }

    pub fn fleet_csv(&self) -> Option<&str> {
        self.fleet_csv.as_deref()
    }

    pub fn scenario(&self) -> Scenario {
        self.scenario
    }

    pub fn enable_timing(&self) -> bool {
        self.enable_timing
    }

    pub fn debug_logging(&self) -> bool {
        self.debug_logging
    }

    pub fn includes(&self, report: Report) -> bool {
        self.report == Report::All || self.report == report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["kmrl-induction"]);
        assert_eq!(args.report(), Report::Induction);
        assert_eq!(args.runs(), 1);
        assert!(!args.parallel());
        assert_eq!(args.scenario(), Scenario::Normal);
        assert!(args.csv_dir().is_none());
    }

    #[test]
    fn test_all_includes_every_report() {
        let args = Args::parse_from(["kmrl-induction", "--report", "all", "--scenario", "event-surge", "--seed", "7"]);
        assert!(args.includes(Report::Weather));
        assert!(args.includes(Report::Induction));
        assert_eq!(args.scenario(), Scenario::EventSurge);
        assert_eq!(args.seed(), Some(7));
    }
}
