// src/lib.rs
// Public library surface for integration tests and host applications.

pub mod config;
pub mod engine;
pub mod error;
pub mod merger;
pub mod odds;
pub mod records;
pub mod scorer;
pub mod stats;
pub mod strength;
pub mod taxonomy;
pub mod telemetry;
pub mod trainer;

// ---- Re-exports for stable public API ----
pub use crate::config::{load_config_default, load_config_from, EngineConfig};
pub use crate::engine::{leaders, roster, PipelineInput, PipelineOutput, PredictionEngine};
pub use crate::error::EngineError;
pub use crate::merger::SignalMerger;
pub use crate::records::{
    CandidateRecord, HistoricalRecord, Prediction, ProbabilityRecord, SourceResult,
    VenueStrengthRow,
};
pub use crate::scorer::LikelihoodScorer;
pub use crate::strength::VenueStrengthAnalyzer;
pub use crate::taxonomy::{CategoryTaxonomyMapper, FallbackRule, Targets, TaxonomyConfig};
pub use crate::trainer::{HistoricalCorrelationTrainer, TrainedWeights, WeightTable};
