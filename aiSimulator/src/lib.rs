// Main module declarations for the KMRL induction simulator

// Induction planning and fleet-level runs
pub mod core {
    pub mod induction;
    pub mod readiness;
    pub mod batch;
}

// Scoring
pub mod ai;

// Configuration modules
pub mod config {
    pub mod constants;
    pub mod const_funcs;
    pub mod engine_config;
}

// Model definitions
pub mod models {
    pub mod train;
    pub mod network;
}

// Data sources
pub mod data {
    pub mod mock_fleet;
    pub mod fleet_loader;
}

// Operational analytics engines
pub mod engines {
    pub mod maintenance;
    pub mod demand;
    pub mod energy;
    pub mod weather;
    pub mod digital_twin;
}

// Reporting and dashboard aggregation
pub mod analysis {
    pub mod dashboard;
    pub mod reporting;
}

// Utility functions
pub mod utils {
    pub mod logging;
    pub mod csv_export;
}

// CLI interface
pub mod cli {
    pub mod cli;
}

// Re-export commonly used modules
pub use crate::config::engine_config::EngineConfig;
pub use crate::core::induction::{optimize_fleet, optimize_train_induction, OptimizationResult};
pub use crate::models::train::{Bucket, ScoredTrain, TrainRecord};
