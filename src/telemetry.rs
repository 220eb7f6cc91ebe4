//! Counters emitted through the `metrics` facade.
//! No-ops unless the host installs a recorder (the `predict` binary installs Prometheus).

use metrics::counter;

pub const CATEGORIES_TRAINED: &str = "predictor_categories_trained_total";
pub const CATEGORIES_SKIPPED: &str = "predictor_categories_skipped_total";
pub const ZERO_VARIANCE: &str = "predictor_zero_variance_total";
pub const FALLBACK_SCORED: &str = "predictor_fallback_scored_total";
pub const MERGE_MATCHES: &str = "predictor_merge_matches_total";
pub const MALFORMED_ODDS: &str = "predictor_malformed_odds_total";

pub(crate) fn category_trained() {
    counter!(CATEGORIES_TRAINED).increment(1);
}

pub(crate) fn category_skipped() {
    counter!(CATEGORIES_SKIPPED).increment(1);
}

pub(crate) fn zero_variance() {
    counter!(ZERO_VARIANCE).increment(1);
}

pub(crate) fn fallback_scored(n: u64) {
    counter!(FALLBACK_SCORED).increment(n);
}

pub(crate) fn merge_match(feed: &'static str) {
    counter!(MERGE_MATCHES, "feed" => feed).increment(1);
}

pub(crate) fn malformed_odds() {
    counter!(MALFORMED_ODDS).increment(1);
}
