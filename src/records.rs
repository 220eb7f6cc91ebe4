//! # Records
//! Row types exchanged with the outside world: historical outcomes, current
//! candidates, current-cycle venue results, probability feeds, and the two
//! output tables (predictions and venue strength).
//!
//! All types are plain serde rows so any acquisition/persistence/presentation
//! layer can produce or consume them as JSON.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{collections::HashMap, fs, path::Path};

use crate::error::{EngineError, Result};
use crate::odds;

/// One historical nomination with its known outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalRecord {
    pub year: i32,
    pub category: String,
    pub candidate_name: String,
    #[serde(default)]
    pub film_or_work: String,
    /// Source id → did that source pick this candidate. Absent key = not won.
    #[serde(default)]
    pub source_win_flags: HashMap<String, bool>,
    #[serde(default)]
    pub critics_score: Option<f64>,
    #[serde(default)]
    pub audience_score: Option<f64>,
    #[serde(default)]
    pub is_winner: bool,
}

/// A current-cycle nomination (outcome not known yet).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub year: i32,
    pub category: String,
    pub candidate_name: String,
    #[serde(default)]
    pub film_or_work: String,
    #[serde(default)]
    pub source_win_flags: HashMap<String, bool>,
    #[serde(default)]
    pub critics_score: Option<f64>,
    #[serde(default)]
    pub audience_score: Option<f64>,
}

/// A current-cycle result published by a signal source, in that source's own
/// category vocabulary (e.g. `BAFTA` / `Leading Actor`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceResult {
    pub source: String,
    pub category: String,
    pub nominee: String,
    #[serde(default)]
    pub won: bool,
}

/// Probability-like row from a betting or prediction-market feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityRecord {
    pub category: String,
    pub nominee: String,
    /// Percentage in [0,100].
    pub probability: f64,
}

impl ProbabilityRecord {
    pub fn new(category: impl Into<String>, nominee: impl Into<String>, probability: f64) -> Self {
        Self {
            category: category.into(),
            nominee: nominee.into(),
            probability,
        }
    }

    /// Build a row from a bookmaker odds string ("5/2", "+150", "3.5").
    /// Malformed odds resolve to the neutral probability.
    pub fn from_odds(category: impl Into<String>, nominee: impl Into<String>, odds: &str) -> Self {
        Self::new(category, nominee, odds::to_probability(odds))
    }
}

/// Scored candidate, optionally enriched with external probabilities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub category: String,
    pub candidate_name: String,
    #[serde(default)]
    pub film_or_work: String,
    /// Engine likelihood in [0,100], one decimal.
    pub model_likelihood: f64,
    /// Sources that picked this candidate, in configured source order.
    #[serde(default)]
    pub supporting_sources: Vec<String>,
    #[serde(default)]
    pub betting_probability: f64,
    #[serde(default)]
    pub market_probability: f64,
}

/// Historical hit rate of one source within one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueStrengthRow {
    pub category: String,
    pub source_id: String,
    pub historical_accuracy: f64,
    pub sample_size: usize,
}

/// Rows that carry the two identity columns every operation relies on.
pub trait Identified {
    fn category(&self) -> &str;
    fn candidate_name(&self) -> &str;
}

impl Identified for HistoricalRecord {
    fn category(&self) -> &str {
        &self.category
    }
    fn candidate_name(&self) -> &str {
        &self.candidate_name
    }
}

impl Identified for CandidateRecord {
    fn category(&self) -> &str {
        &self.category
    }
    fn candidate_name(&self) -> &str {
        &self.candidate_name
    }
}

impl Identified for Prediction {
    fn category(&self) -> &str {
        &self.category
    }
    fn candidate_name(&self) -> &str {
        &self.candidate_name
    }
}

impl HistoricalRecord {
    /// Missing flag = source did not pick this candidate.
    pub fn won_at(&self, source: &str) -> bool {
        self.source_win_flags.get(source).copied().unwrap_or(false)
    }
}

impl CandidateRecord {
    pub fn won_at(&self, source: &str) -> bool {
        self.source_win_flags.get(source).copied().unwrap_or(false)
    }
}

/// Reject rows whose identity columns are blank. Whole-table check: a single
/// bad row fails the call, since no per-row fallback is meaningful.
pub fn validate_identity<T: Identified>(rows: &[T]) -> Result<()> {
    for (row, r) in rows.iter().enumerate() {
        if r.category().trim().is_empty() {
            return Err(EngineError::InvalidInputShape {
                row,
                reason: "empty `category`".to_string(),
            });
        }
        if r.candidate_name().trim().is_empty() {
            return Err(EngineError::InvalidInputShape {
                row,
                reason: "empty `candidate_name`".to_string(),
            });
        }
    }
    Ok(())
}

/// Case-insensitive containment: does `haystack` contain `needle`?
pub(crate) fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Load a JSON array of rows from disk.
pub fn load_table<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<Vec<T>> {
    let bytes = fs::read(path.as_ref())?;
    parse_table(&bytes)
}

/// Parse a JSON array of rows. Invalid JSON is a [`EngineError::Json`];
/// valid JSON that is not an array, or a row that does not fit `T` (missing
/// identity column, wrong type), is an input-shape failure.
pub fn parse_table<T: DeserializeOwned>(bytes: &[u8]) -> Result<Vec<T>> {
    let value: Value = serde_json::from_slice(bytes)?;
    let Value::Array(items) = value else {
        return Err(EngineError::InvalidInputShape {
            row: 0,
            reason: "expected a JSON array of rows".to_string(),
        });
    };

    items
        .into_iter()
        .enumerate()
        .map(|(row, item)| {
            serde_json::from_value(item).map_err(|e| EngineError::InvalidInputShape {
                row,
                reason: e.to_string(),
            })
        })
        .collect()
}
