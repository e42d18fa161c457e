// Scoring layer for induction planning

// Metrics module - MCDA sub-scores and weighted fleet scoring
pub mod metrics {
    pub mod scoring;
}

// Re-export common types for convenience
pub use metrics::scoring::{score_breakdown, score_fleet, score_train, ScoreBreakdown};
