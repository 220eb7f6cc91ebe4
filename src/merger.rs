//! # Signal Merger
//!
//! Attaches betting and prediction-market probabilities to scored predictions.
//!
//! A feed row matches a prediction when:
//! - `category` is equal (canonical, case-sensitive), and
//! - the row's `nominee` contains the prediction's candidate name, case-insensitively.
//!
//! The first matching row wins. The containment is one-directional (feed
//! nominee is the haystack), so "Oppenheimer — IMAX release" matches
//! "Oppenheimer" but not the other way round. Short names can false-positive.

use strsim::jaro_winkler;
use tracing::{debug, Level};

use crate::error::Result;
use crate::records::{contains_ci, validate_identity, Prediction, ProbabilityRecord};
use crate::stats::clamp_pct;
use crate::telemetry;

#[derive(Debug, Clone, Copy, Default)]
pub struct SignalMerger;

impl SignalMerger {
    pub fn new() -> Self {
        Self
    }

    /// Return enriched copies of `predictions`; inputs are left untouched.
    /// Unmatched fields keep their incoming value (0 for fresh predictions).
    pub fn merge(
        &self,
        predictions: &[Prediction],
        betting: &[ProbabilityRecord],
        market: &[ProbabilityRecord],
    ) -> Result<Vec<Prediction>> {
        validate_identity(predictions)?;

        let out = predictions
            .iter()
            .map(|p| {
                let mut p = p.clone();
                if let Some(prob) = lookup(&p, betting, "betting") {
                    p.betting_probability = prob;
                }
                if let Some(prob) = lookup(&p, market, "market") {
                    p.market_probability = prob;
                }
                p
            })
            .collect();
        Ok(out)
    }
}

fn lookup(p: &Prediction, feed: &[ProbabilityRecord], feed_name: &'static str) -> Option<f64> {
    let hit = feed
        .iter()
        .find(|r| r.category == p.category && contains_ci(&r.nominee, &p.candidate_name));

    match hit {
        Some(r) => {
            telemetry::merge_match(feed_name);
            Some(clamp_pct(r.probability))
        }
        None => {
            if !feed.is_empty() && tracing::enabled!(Level::DEBUG) {
                log_near_miss(p, feed, feed_name);
            }
            None
        }
    }
}

/// Diagnostics only: report the most similar nominee in the same category.
fn log_near_miss(p: &Prediction, feed: &[ProbabilityRecord], feed_name: &str) {
    let needle = p.candidate_name.to_lowercase();
    let best = feed
        .iter()
        .filter(|r| r.category == p.category)
        .map(|r| (jaro_winkler(&needle, &r.nominee.to_lowercase()), r))
        .max_by(|a, b| a.0.total_cmp(&b.0));

    if let Some((similarity, r)) = best {
        debug!(
            target: "merger",
            feed = feed_name,
            category = %p.category,
            candidate = %p.candidate_name,
            closest = %r.nominee,
            similarity,
            "no probability row matched"
        );
    }
}
