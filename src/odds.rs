//! Odds strings ↔ implied probability (percent).
//!
//! Accepted inputs:
//! - fractional `"5/2"`  → den / (num + den) * 100
//! - American `"+150"` / `"-200"`
//! - decimal `"3.5"`     → 100 / d
//!
//! Anything unparseable resolves to [`NEUTRAL_PROBABILITY`] with a warning.

use tracing::warn;

use crate::stats::{clamp_pct, round1};
use crate::telemetry;

/// Probability used when an odds string cannot be interpreted.
pub const NEUTRAL_PROBABILITY: f64 = 50.0;

/// Convert an odds string into a percentage in [0,100], one decimal.
pub fn to_probability(raw: &str) -> f64 {
    let s = raw.trim();

    if let Some((num, den)) = s.split_once('/') {
        let parsed = (num.trim().parse::<u64>(), den.trim().parse::<u64>());
        return match parsed {
            (Ok(n), Ok(d)) => match n.checked_add(d) {
                Some(total) if total > 0 => clamp_pct(round1(d as f64 / total as f64 * 100.0)),
                _ => malformed(raw),
            },
            _ => malformed(raw),
        };
    }

    if let Some(rest) = s.strip_prefix('-') {
        return match rest.parse::<u32>() {
            Ok(o) if o > 0 => {
                let o = f64::from(o);
                clamp_pct(round1(o / (o + 100.0) * 100.0))
            }
            _ => malformed(raw),
        };
    }

    if let Some(rest) = s.strip_prefix('+') {
        return match rest.parse::<u32>() {
            Ok(o) => clamp_pct(round1(100.0 / (f64::from(o) + 100.0) * 100.0)),
            Err(_) => malformed(raw),
        };
    }

    match s.parse::<f64>() {
        Ok(d) if d.is_finite() && d > 0.0 => clamp_pct(round1(100.0 / d)),
        _ => malformed(raw),
    }
}

/// Render a percentage as reduced fractional odds ("odds against" form).
/// Returns `"N/A"` outside the open interval (0, 100).
pub fn from_probability(probability: f64) -> String {
    if !(probability > 0.0 && probability < 100.0) {
        return "N/A".to_string();
    }
    let p = probability.round() as u64;
    if p == 0 || p >= 100 {
        return "N/A".to_string();
    }
    let (num, den) = (100 - p, p);
    let g = gcd(num, den);
    format!("{}/{}", num / g, den / g)
}

fn malformed(raw: &str) -> f64 {
    warn!(target: "merger", odds = raw, "malformed odds string, using neutral probability");
    telemetry::malformed_odds();
    NEUTRAL_PROBABILITY
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a.max(1)
}
