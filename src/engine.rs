//! # Prediction Engine
//! Pure, testable wiring of the four operations (train, score, merge,
//! analyze strength) behind one configured value. No I/O, no shared state:
//! every call builds fresh outputs from its inputs.
//!
//! Flow: history → weights → scored predictions → merged with betting/market
//! feeds. The strength report runs off history alone.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

use crate::config::EngineConfig;
use crate::error::Result;
use crate::merger::SignalMerger;
use crate::records::{
    CandidateRecord, HistoricalRecord, Prediction, ProbabilityRecord, SourceResult,
    VenueStrengthRow,
};
use crate::scorer::LikelihoodScorer;
use crate::strength::VenueStrengthAnalyzer;
use crate::trainer::{HistoricalCorrelationTrainer, TrainedWeights};

/// Everything one end-to-end run needs.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineInput<'a> {
    pub historical: &'a [HistoricalRecord],
    pub candidates: &'a [CandidateRecord],
    pub current_results: &'a [SourceResult],
    pub betting: &'a [ProbabilityRecord],
    pub market: &'a [ProbabilityRecord],
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    pub weights: TrainedWeights,
    pub predictions: Vec<Prediction>,
    pub strength: Vec<VenueStrengthRow>,
}

#[derive(Debug, Clone)]
pub struct PredictionEngine {
    recent_years: Option<u32>,
    trainer: HistoricalCorrelationTrainer,
    scorer: LikelihoodScorer,
    merger: SignalMerger,
    strength: VenueStrengthAnalyzer,
}

impl PredictionEngine {
    pub fn new(cfg: EngineConfig) -> Self {
        let cfg = cfg.sanitized();
        Self {
            recent_years: cfg.recent_years,
            trainer: HistoricalCorrelationTrainer::new(&cfg),
            scorer: LikelihoodScorer::new(&cfg),
            merger: SignalMerger::new(),
            strength: VenueStrengthAnalyzer::new(&cfg),
        }
    }

    /// Train weights; honors the configured recent-years window.
    pub fn train(&self, historical: &[HistoricalRecord]) -> Result<TrainedWeights> {
        match self.recent_years {
            Some(years) => self.trainer.train_recent(historical, years),
            None => self.trainer.train(historical),
        }
    }

    pub fn score(
        &self,
        candidates: &[CandidateRecord],
        current_results: &[SourceResult],
        weights: &TrainedWeights,
    ) -> Result<Vec<Prediction>> {
        self.scorer.score(candidates, current_results, weights)
    }

    pub fn merge(
        &self,
        predictions: &[Prediction],
        betting: &[ProbabilityRecord],
        market: &[ProbabilityRecord],
    ) -> Result<Vec<Prediction>> {
        self.merger.merge(predictions, betting, market)
    }

    pub fn analyze_strength(
        &self,
        historical: &[HistoricalRecord],
    ) -> Result<Vec<VenueStrengthRow>> {
        self.strength.analyze(historical)
    }

    /// Full run: train → score → merge, plus the strength report.
    pub fn run(&self, input: PipelineInput<'_>) -> Result<PipelineOutput> {
        let weights = self.train(input.historical)?;
        let scored = self.score(input.candidates, input.current_results, &weights)?;
        let predictions = self.merge(&scored, input.betting, input.market)?;
        let strength = self.analyze_strength(input.historical)?;

        info!(
            trained = weights.as_table().len(),
            skipped = weights.skipped().len(),
            predictions = predictions.len(),
            strength_rows = strength.len(),
            "pipeline finished"
        );

        Ok(PipelineOutput {
            weights,
            predictions,
            strength,
        })
    }
}

/// Highest-likelihood prediction per category; on ties the earliest row wins.
/// Input order does not matter, and on scorer output this is the first row of
/// each category group.
pub fn leaders(predictions: &[Prediction]) -> BTreeMap<&str, &Prediction> {
    let mut out: BTreeMap<&str, &Prediction> = BTreeMap::new();
    for p in predictions {
        let slot = out.entry(p.category.as_str()).or_insert(p);
        if p.model_likelihood > slot.model_likelihood {
            *slot = p;
        }
    }
    out
}

/// Candidate names per category, in the order they appear.
pub fn roster(predictions: &[Prediction]) -> BTreeMap<&str, Vec<&str>> {
    let mut out: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for p in predictions {
        out.entry(p.category.as_str())
            .or_default()
            .push(p.candidate_name.as_str());
    }
    out
}
