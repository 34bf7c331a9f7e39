//! analyze: Score one security from a JSON report request.
//!
//! Usage:
//!   analyze request.json
//!   cat request.json | analyze
//!   analyze request.json --compact

use std::io::Read;

use analysis_core::EngineConfig;
use analysis_orchestrator::{AnalysisEngine, ReportRequest};
use anyhow::Context;

fn read_input(path: Option<&str>) -> anyhow::Result<String> {
    match path {
        Some(path) if path != "-" => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))
        }
        _ => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read request from stdin")?;
            Ok(input)
        }
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "analysis_orchestrator=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let compact = args.iter().any(|a| a == "--compact");
    let path = args.iter().find(|a| !a.starts_with("--")).map(|s| s.as_str());

    let config = EngineConfig::from_env().context("Invalid ANALYSIS_* configuration")?;
    let engine = AnalysisEngine::with_config(config);

    let raw = read_input(path)?;
    let request: ReportRequest =
        serde_json::from_str(&raw).context("Failed to parse report request")?;

    tracing::info!(
        "Analyzing {} ({} bars, options: {}, commentary: {})",
        if request.snapshot.symbol.is_empty() { "<unnamed>" } else { request.snapshot.symbol.as_str() },
        request.bars.len(),
        request.options.is_some() || !request.option_chain.is_empty(),
        request.commentary.is_some()
    );

    let report = engine.build_report(&request);
    let output = if compact {
        serde_json::to_string(&report)?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    println!("{output}");

    tracing::info!(
        "{}: {} ({}% confidence), risk {}",
        report.symbol,
        report.signal.signal.as_str(),
        report.signal.confidence,
        report.risk.risk_level.as_str()
    );

    Ok(())
}
