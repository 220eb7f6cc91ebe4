//! # Category Taxonomy
//!
//! Translates a signal source's own category label (e.g. BAFTA "Leading Actor")
//! into the canonical category the engine predicts for ("Actor in a Leading Role").
//!
//! - Exact lookup in a per-source table first.
//! - Then an ordered list of substring fallback rules; the first matching rule wins.
//! - Otherwise `None`: callers exclude the record, they never substitute a default.
//!
//! The tables are configuration, passed in at construction.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// One label may feed a single canonical category or several of them
/// (a combined "Best Screenplay" award counts for both screenplay categories).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Targets {
    One(String),
    Many(Vec<String>),
}

impl Targets {
    pub fn as_slice(&self) -> &[String] {
        match self {
            Targets::One(s) => std::slice::from_ref(s),
            Targets::Many(v) => v.as_slice(),
        }
    }
}

/// Substring rule applied to the lowercased label when no table entry exists.
///
/// Matches when the label contains every `all_of` needle and, if `any_of` is
/// non-empty, at least one `any_of` needle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackRule {
    #[serde(default)]
    pub all_of: Vec<String>,
    #[serde(default)]
    pub any_of: Vec<String>,
    pub category: String,
}

impl FallbackRule {
    pub fn new(all_of: &[&str], any_of: &[&str], category: &str) -> Self {
        Self {
            all_of: all_of.iter().map(|s| s.to_string()).collect(),
            any_of: any_of.iter().map(|s| s.to_string()).collect(),
            category: category.to_string(),
        }
    }

    fn matches(&self, lower_label: &str) -> bool {
        if self.all_of.is_empty() && self.any_of.is_empty() {
            return false;
        }
        let all = self
            .all_of
            .iter()
            .all(|n| lower_label.contains(&n.to_lowercase()));
        let any = self.any_of.is_empty()
            || self
                .any_of
                .iter()
                .any(|n| lower_label.contains(&n.to_lowercase()));
        all && any
    }
}

/// Serializable mapping tables: source → (label → target categories) + fallback rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyConfig {
    #[serde(default)]
    pub tables: HashMap<String, HashMap<String, Targets>>,
    #[serde(default)]
    pub fallback_rules: Vec<FallbackRule>,
}

#[derive(Debug, Clone)]
pub struct CategoryTaxonomyMapper {
    cfg: TaxonomyConfig,
}

impl CategoryTaxonomyMapper {
    pub fn new(cfg: TaxonomyConfig) -> Self {
        Self { cfg }
    }

    /// Canonical category for `(source, label)`, or `None` if nothing matches.
    /// For multi-target labels the first target is returned.
    pub fn map(&self, source: &str, label: &str) -> Option<&str> {
        self.resolve(source, label)
            .and_then(|t| t.first())
            .map(String::as_str)
    }

    /// True when `(source, label)` feeds `category` through any of its targets.
    pub fn maps_to(&self, source: &str, label: &str, category: &str) -> bool {
        self.resolve(source, label)
            .is_some_and(|t| t.iter().any(|c| c == category))
    }

    /// Every canonical category `(source, label)` feeds, or `None` if unmapped.
    pub fn resolve(&self, source: &str, label: &str) -> Option<&[String]> {
        if let Some(t) = self.cfg.tables.get(source).and_then(|tbl| tbl.get(label)) {
            return Some(t.as_slice());
        }

        let lower = label.to_lowercase();
        if let Some(rule) = self.cfg.fallback_rules.iter().find(|r| r.matches(&lower)) {
            debug!(target: "taxonomy", source, label, category = %rule.category, "fallback rule matched");
            return Some(std::slice::from_ref(&rule.category));
        }

        debug!(target: "taxonomy", source, label, "no canonical category");
        None
    }
}
