// src/config.rs
//! Engine configuration: configured signal sources, thresholds, score shares
//! and the category taxonomy.
//!
//! Load order for [`load_config_default`]:
//! 1) $PREDICTOR_CONFIG_PATH (error if set but missing)
//! 2) config/predictor.toml
//! 3) config/predictor.json
//! 4) built-in [`EngineConfig::default_seed`]

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::taxonomy::{FallbackRule, Targets, TaxonomyConfig};

pub const ENV_CONFIG_PATH: &str = "PREDICTOR_CONFIG_PATH";
pub const DEFAULT_TOML_PATH: &str = "config/predictor.toml";
pub const DEFAULT_JSON_PATH: &str = "config/predictor.json";

fn default_min_training_samples() -> usize {
    10
}
fn default_min_strength_samples() -> usize {
    5
}
fn default_neutral_weight() -> f64 {
    0.5
}
fn default_critics_share() -> f64 {
    0.20
}
fn default_audience_share() -> f64 {
    0.10
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Ordered signal source ids. Order drives `supporting_sources` and output rows.
    #[serde(default)]
    pub sources: Vec<String>,
    /// Categories with fewer historical rows are left untrained.
    #[serde(default = "default_min_training_samples")]
    pub min_training_samples: usize,
    /// Categories with fewer historical rows are left out of the strength report.
    #[serde(default = "default_min_strength_samples")]
    pub min_strength_samples: usize,
    /// Weight assigned when a correlation is undefined.
    #[serde(default = "default_neutral_weight")]
    pub neutral_weight: f64,
    /// Critics score weight as a share of the summed source weights.
    #[serde(default = "default_critics_share")]
    pub critics_share: f64,
    /// Audience score weight as a share of the summed source weights.
    #[serde(default = "default_audience_share")]
    pub audience_share: f64,
    /// Train only on the latest N distinct years, if set.
    #[serde(default)]
    pub recent_years: Option<u32>,
    #[serde(default)]
    pub taxonomy: TaxonomyConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            min_training_samples: default_min_training_samples(),
            min_strength_samples: default_min_strength_samples(),
            neutral_weight: default_neutral_weight(),
            critics_share: default_critics_share(),
            audience_share: default_audience_share(),
            recent_years: None,
            taxonomy: TaxonomyConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Config with the given sources and no taxonomy; handy for synthetic setups.
    pub fn with_sources<I, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sources: sources.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Replace out-of-range values with defaults and drop blank/duplicate sources.
    pub fn sanitized(mut self) -> Self {
        if self.min_training_samples == 0 {
            self.min_training_samples = default_min_training_samples();
        }
        if self.min_strength_samples == 0 {
            self.min_strength_samples = default_min_strength_samples();
        }
        if !(0.0..=1.0).contains(&self.neutral_weight) {
            self.neutral_weight = default_neutral_weight();
        }
        if !(0.0..=1.0).contains(&self.critics_share) {
            self.critics_share = default_critics_share();
        }
        if !(0.0..=1.0).contains(&self.audience_share) {
            self.audience_share = default_audience_share();
        }
        if self.recent_years == Some(0) {
            self.recent_years = None;
        }

        let mut seen = std::collections::HashSet::new();
        self.sources = self
            .sources
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty() && seen.insert(s.clone()))
            .collect();
        self
    }

    /// Built-in award-season setup: the major precursor venues and how their
    /// category names line up with the canonical categories.
    pub fn default_seed() -> Self {
        let sources = [
            "BAFTA",
            "Golden Globes",
            "Critics Choice",
            "SAG",
            "PGA",
            "DGA",
            "WGA",
            "ACE",
            "ASC",
        ];

        let mut tables: HashMap<String, HashMap<String, Targets>> = HashMap::new();
        let mut put = |source: &str, rows: &[(&str, &str)]| {
            let t = tables.entry(source.to_string()).or_default();
            for (label, canon) in rows {
                t.insert(label.to_string(), Targets::One(canon.to_string()));
            }
        };

        put(
            "BAFTA",
            &[
                ("Best Film", "Best Picture"),
                ("Leading Actor", "Actor in a Leading Role"),
                ("Leading Actress", "Actress in a Leading Role"),
                ("Supporting Actor", "Actor in a Supporting Role"),
                ("Supporting Actress", "Actress in a Supporting Role"),
                ("Director", "Directing"),
                ("Original Screenplay", "Writing (Original Screenplay)"),
                ("Adapted Screenplay", "Writing (Adapted Screenplay)"),
                ("Cinematography", "Cinematography"),
                ("Film Editing", "Film Editing"),
            ],
        );
        put(
            "Golden Globes",
            &[
                ("Best Motion Picture – Drama", "Best Picture"),
                ("Best Motion Picture – Musical or Comedy", "Best Picture"),
                ("Best Director – Motion Picture", "Directing"),
                ("Best Actor – Motion Picture Drama", "Actor in a Leading Role"),
                ("Best Actress – Motion Picture Drama", "Actress in a Leading Role"),
                (
                    "Best Actor – Motion Picture Musical or Comedy",
                    "Actor in a Leading Role",
                ),
                (
                    "Best Actress – Motion Picture Musical or Comedy",
                    "Actress in a Leading Role",
                ),
                (
                    "Best Supporting Actor – Motion Picture",
                    "Actor in a Supporting Role",
                ),
                (
                    "Best Supporting Actress – Motion Picture",
                    "Actress in a Supporting Role",
                ),
            ],
        );
        put(
            "Critics Choice",
            &[
                ("Best Picture", "Best Picture"),
                ("Best Actor", "Actor in a Leading Role"),
                ("Best Actress", "Actress in a Leading Role"),
                ("Best Supporting Actor", "Actor in a Supporting Role"),
                ("Best Supporting Actress", "Actress in a Supporting Role"),
                ("Best Director", "Directing"),
                ("Best Original Screenplay", "Writing (Original Screenplay)"),
                ("Best Adapted Screenplay", "Writing (Adapted Screenplay)"),
                ("Best Cinematography", "Cinematography"),
                ("Best Editing", "Film Editing"),
            ],
        );
        put(
            "SAG",
            &[
                (
                    "Outstanding Performance by a Cast in a Motion Picture",
                    "Best Picture",
                ),
                (
                    "Outstanding Performance by a Male Actor in a Leading Role",
                    "Actor in a Leading Role",
                ),
                (
                    "Outstanding Performance by a Female Actor in a Leading Role",
                    "Actress in a Leading Role",
                ),
                (
                    "Outstanding Performance by a Male Actor in a Supporting Role",
                    "Actor in a Supporting Role",
                ),
                (
                    "Outstanding Performance by a Female Actor in a Supporting Role",
                    "Actress in a Supporting Role",
                ),
            ],
        );
        put(
            "PGA",
            &[(
                "Outstanding Producer of Theatrical Motion Pictures",
                "Best Picture",
            )],
        );
        put(
            "DGA",
            &[(
                "Outstanding Directorial Achievement in Motion Pictures",
                "Directing",
            )],
        );
        put(
            "WGA",
            &[
                ("Original Screenplay", "Writing (Original Screenplay)"),
                ("Adapted Screenplay", "Writing (Adapted Screenplay)"),
            ],
        );
        put(
            "ACE",
            &[
                ("Dramatic Feature", "Film Editing"),
                ("Comedy Feature", "Film Editing"),
            ],
        );
        put("ASC", &[("Feature Film", "Cinematography")]);

        tables.entry("Golden Globes".to_string()).or_default().insert(
            "Best Screenplay – Motion Picture".to_string(),
            Targets::Many(vec![
                "Writing (Original Screenplay)".to_string(),
                "Writing (Adapted Screenplay)".to_string(),
            ]),
        );

        // Specific before generic: "female" contains "male", "film editing" contains "film".
        let fallback_rules = vec![
            FallbackRule::new(&["director"], &[], "Directing"),
            FallbackRule::new(&["supporting", "actress"], &[], "Actress in a Supporting Role"),
            FallbackRule::new(&["supporting", "female"], &[], "Actress in a Supporting Role"),
            FallbackRule::new(&["supporting", "actor"], &[], "Actor in a Supporting Role"),
            FallbackRule::new(&["actress"], &[], "Actress in a Leading Role"),
            FallbackRule::new(&["female"], &[], "Actress in a Leading Role"),
            FallbackRule::new(&["actor"], &[], "Actor in a Leading Role"),
            FallbackRule::new(&["screenplay", "original"], &[], "Writing (Original Screenplay)"),
            FallbackRule::new(&["screenplay", "adapted"], &[], "Writing (Adapted Screenplay)"),
            FallbackRule::new(&["cinematography"], &[], "Cinematography"),
            FallbackRule::new(&["editing"], &[], "Film Editing"),
            FallbackRule::new(&[], &["picture", "best film"], "Best Picture"),
        ];

        Self {
            sources: sources.iter().map(|s| s.to_string()).collect(),
            taxonomy: TaxonomyConfig {
                tables,
                fallback_rules,
            },
            ..Self::default()
        }
    }
}

/// Load configuration from an explicit path. Supports TOML or JSON.
pub fn load_config_from(path: &Path) -> Result<EngineConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading predictor config from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let cfg = parse_config(&content, ext.as_str())
        .with_context(|| format!("parsing predictor config {}", path.display()))?;
    info!(path = %path.display(), sources = cfg.sources.len(), "predictor config loaded");
    Ok(cfg)
}

/// Load configuration using env var + fallbacks (see module docs).
pub fn load_config_default() -> Result<EngineConfig> {
    if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_config_from(&pb);
        } else {
            return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
        }
    }
    let toml_p = PathBuf::from(DEFAULT_TOML_PATH);
    if toml_p.exists() {
        return load_config_from(&toml_p);
    }
    let json_p = PathBuf::from(DEFAULT_JSON_PATH);
    if json_p.exists() {
        return load_config_from(&json_p);
    }
    warn!("no predictor config found, using built-in seed");
    Ok(EngineConfig::default_seed())
}

fn parse_config(s: &str, hint_ext: &str) -> Result<EngineConfig> {
    let cfg: EngineConfig = match hint_ext {
        "json" => serde_json::from_str(s)?,
        "toml" => toml::from_str(s)?,
        // Unknown extension: JSON if it looks like an object, otherwise TOML.
        _ if s.trim_start().starts_with('{') => serde_json::from_str(s)?,
        _ => toml::from_str(s)?,
    };
    Ok(cfg.sanitized())
}
