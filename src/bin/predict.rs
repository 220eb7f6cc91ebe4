//! Batch entrypoint: reads JSON tables, runs the full pipeline, prints JSON.
//!
//! Usage:
//!   predict <historical.json> <candidates.json> [current_results.json] [betting.json] [market.json]
//!
//! Config comes from $PREDICTOR_CONFIG_PATH, config/predictor.{toml,json},
//! or the built-in seed. Logs go to stderr; set PREDICT_LOG_JSON=1 for JSON logs
//! and PREDICT_METRICS=1 to dump Prometheus counters to stderr at the end.

use anyhow::{bail, Context, Result};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::path::Path;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use award_predictor::records::load_table;
use award_predictor::{
    leaders, load_config_default, CandidateRecord, HistoricalRecord, PipelineInput,
    PredictionEngine, ProbabilityRecord, SourceResult,
};

fn env_flag(name: &str) -> bool {
    std::env::var(name).ok().is_some_and(|v| v == "1")
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if env_flag("PREDICT_LOG_JSON") {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

fn init_metrics() -> Result<Option<PrometheusHandle>> {
    if !env_flag("PREDICT_METRICS") {
        return Ok(None);
    }
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .context("installing prometheus recorder")?;
    Ok(Some(handle))
}

/// Optional table: missing argument → empty table.
fn optional_table<T: serde::de::DeserializeOwned>(arg: Option<&String>) -> Result<Vec<T>> {
    match arg {
        Some(p) => load_table(Path::new(p)).with_context(|| format!("loading {p}")),
        None => Ok(Vec::new()),
    }
}

fn main() -> Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();
    let metrics = init_metrics()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 {
        bail!("usage: predict <historical.json> <candidates.json> [current_results.json] [betting.json] [market.json]");
    }

    let cfg = load_config_default()?;
    let engine = PredictionEngine::new(cfg);

    let historical: Vec<HistoricalRecord> =
        load_table(Path::new(&args[0])).with_context(|| format!("loading {}", args[0]))?;
    let candidates: Vec<CandidateRecord> =
        load_table(Path::new(&args[1])).with_context(|| format!("loading {}", args[1]))?;
    let current_results: Vec<SourceResult> = optional_table(args.get(2))?;
    let betting: Vec<ProbabilityRecord> = optional_table(args.get(3))?;
    let market: Vec<ProbabilityRecord> = optional_table(args.get(4))?;

    let out = engine.run(PipelineInput {
        historical: &historical,
        candidates: &candidates,
        current_results: &current_results,
        betting: &betting,
        market: &market,
    })?;

    for (category, p) in leaders(&out.predictions) {
        info!(category, leader = %p.candidate_name, likelihood = p.model_likelihood, "category leader");
    }

    serde_json::to_writer_pretty(std::io::stdout().lock(), &out).context("writing output")?;
    println!();

    if let Some(handle) = metrics {
        eprintln!("{}", handle.render());
    }
    Ok(())
}
