//! # Likelihood Scorer
//! Pure scoring of current candidates against trained weights. No I/O.
//!
//! Trained category:
//!   score  = Σ w[s] · won(s)  (+ critics/audience terms)
//!   total  = Σ w[s]           (guarded to 1.0 when zero, + critics/audience shares)
//!   likelihood = round1(score / total · 100)
//!
//! Untrained category: share of configured sources the candidate won at,
//! or 50.0 when no sources are configured.

use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::error::Result;
use crate::records::{contains_ci, validate_identity, CandidateRecord, Prediction, SourceResult};
use crate::stats::{clamp_pct, round1};
use crate::taxonomy::CategoryTaxonomyMapper;
use crate::telemetry;
use crate::trainer::TrainedWeights;

/// Likelihood used when a category has neither weights nor applicable sources.
pub const NEUTRAL_LIKELIHOOD: f64 = 50.0;

/// A current-cycle venue win, resolved to canonical categories once per call.
struct ResolvedWin<'a> {
    source: &'a str,
    nominee: &'a str,
    categories: &'a [String],
}

#[derive(Debug, Clone)]
pub struct LikelihoodScorer {
    sources: Vec<String>,
    critics_share: f64,
    audience_share: f64,
    taxonomy: CategoryTaxonomyMapper,
}

impl LikelihoodScorer {
    pub fn new(cfg: &EngineConfig) -> Self {
        Self {
            sources: cfg.sources.clone(),
            critics_share: cfg.critics_share.clamp(0.0, 1.0),
            audience_share: cfg.audience_share.clamp(0.0, 1.0),
            taxonomy: CategoryTaxonomyMapper::new(cfg.taxonomy.clone()),
        }
    }

    /// Score every candidate. Output is sorted by category ascending, then
    /// likelihood descending; ties keep input order.
    pub fn score(
        &self,
        candidates: &[CandidateRecord],
        current: &[SourceResult],
        weights: &TrainedWeights,
    ) -> Result<Vec<Prediction>> {
        validate_identity(candidates)?;

        let wins = self.resolve_wins(current);
        let mut fallback: BTreeSet<&str> = BTreeSet::new();
        let mut fallback_rows = 0u64;

        let mut out = Vec::with_capacity(candidates.len());
        for c in candidates {
            let flags = self.source_flags(c, &wins);

            let likelihood = match weights.for_category(&c.category) {
                Some(row) => self.weighted_likelihood(c, &flags, row),
                None => {
                    fallback.insert(c.category.as_str());
                    fallback_rows += 1;
                    self.fallback_likelihood(&flags)
                }
            };

            let supporting_sources = self
                .sources
                .iter()
                .zip(&flags)
                .filter(|(_, won)| **won)
                .map(|(s, _)| s.clone())
                .collect();

            out.push(Prediction {
                category: c.category.clone(),
                candidate_name: c.candidate_name.clone(),
                film_or_work: c.film_or_work.clone(),
                model_likelihood: likelihood,
                supporting_sources,
                betting_probability: 0.0,
                market_probability: 0.0,
            });
        }

        if !fallback.is_empty() {
            info!(target: "scorer", categories = ?fallback, "untrained categories scored by win share");
            telemetry::fallback_scored(fallback_rows);
        }

        sort_predictions(&mut out);
        Ok(out)
    }

    /// Keep winning rows from configured sources whose label maps somewhere.
    fn resolve_wins<'a>(&'a self, current: &'a [SourceResult]) -> Vec<ResolvedWin<'a>> {
        let mut out = Vec::new();
        for r in current.iter().filter(|r| r.won) {
            if !self.sources.iter().any(|s| *s == r.source) {
                continue;
            }
            match self.taxonomy.resolve(&r.source, &r.category) {
                Some(categories) => out.push(ResolvedWin {
                    source: &r.source,
                    nominee: &r.nominee,
                    categories,
                }),
                None => {
                    debug!(target: "scorer", source = %r.source, label = %r.category, "unmapped venue result excluded");
                }
            }
        }
        out
    }

    /// One flag per configured source, in configured order.
    fn source_flags(&self, c: &CandidateRecord, wins: &[ResolvedWin<'_>]) -> Vec<bool> {
        self.sources
            .iter()
            .map(|s| {
                c.won_at(s)
                    || wins.iter().any(|w| {
                        w.source == s.as_str()
                            && w.categories.iter().any(|cat| *cat == c.category)
                            && contains_ci(w.nominee, &c.candidate_name)
                    })
            })
            .collect()
    }

    fn weighted_likelihood(
        &self,
        c: &CandidateRecord,
        flags: &[bool],
        row: &BTreeMap<String, f64>,
    ) -> f64 {
        let mut score = 0.0;
        let mut base = 0.0;
        for (s, &won) in self.sources.iter().zip(flags) {
            let w = row.get(s).copied().unwrap_or(0.0);
            base += w;
            if won {
                score += w;
            }
        }
        if base <= 0.0 {
            base = 1.0;
        }

        let mut total = base;
        if let Some(v) = c.critics_score {
            let w = self.critics_share * base;
            score += w * clamp_pct(v) / 100.0;
            total += w;
        }
        if let Some(v) = c.audience_score {
            let w = self.audience_share * base;
            score += w * clamp_pct(v) / 100.0;
            total += w;
        }

        clamp_pct(round1(score / total * 100.0))
    }

    fn fallback_likelihood(&self, flags: &[bool]) -> f64 {
        if flags.is_empty() {
            return NEUTRAL_LIKELIHOOD;
        }
        let won = flags.iter().filter(|&&f| f).count();
        clamp_pct(round1(won as f64 / flags.len() as f64 * 100.0))
    }
}

/// Category ascending, likelihood descending, stable.
pub fn sort_predictions(rows: &mut [Prediction]) {
    rows.sort_by(|a, b| {
        a.category
            .cmp(&b.category)
            .then_with(|| b.model_likelihood.total_cmp(&a.model_likelihood))
    });
}
