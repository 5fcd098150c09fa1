//! find_gates - query railway level crossings along a driving route.

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use gate_core::models::GeoPoint;
use gate_overpass::{GateFinder, GateQueryError, GateReport, OverpassClient, ReportClient};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

#[derive(Parser)]
#[command(
    name = "find_gates",
    about = "Find railway level-crossing gates along a route"
)]
struct Args {
    /// Route file: JSON array of { "latitude": .., "longitude": .. }
    #[arg(long)]
    route: PathBuf,
    /// Cluster threshold in kilometers
    #[arg(long, default_value_t = gate_core::DEFAULT_CLUSTER_THRESHOLD_KM)]
    threshold_km: f64,
    /// Thin the candidate list with the route length tiers before clustering
    #[arg(long)]
    thin_candidates: bool,
    /// Print gates as JSON instead of a listing
    #[arg(long)]
    json: bool,
    /// Submit the result to the reporting backend, selecting this gate number
    #[arg(long)]
    select: Option<u32>,
    /// Reporting backend base URL (overrides GATE_BACKEND_URL)
    #[arg(long)]
    report_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = Config::from_env();

    let raw = std::fs::read_to_string(&args.route)
        .with_context(|| format!("Failed to read route file {}", args.route.display()))?;
    let route: Vec<GeoPoint> =
        serde_json::from_str(&raw).context("Failed to parse route file")?;

    let client = OverpassClient::with_endpoints(config.overpass_endpoints.clone());
    let mut finder = GateFinder::new(client);
    finder.set_cluster_threshold(args.threshold_km);
    finder.set_candidate_thinning(args.thin_candidates);

    let gates = match finder.find_gates(&route).await {
        Ok(gates) => gates,
        Err(GateQueryError::SourceUnavailable(_)) => {
            anyhow::bail!("Spatial data source unavailable, please try again later")
        }
        Err(err) => return Err(err.into()),
    };

    if gates.is_empty() {
        println!("No railway crossings found along this route.");
        return Ok(());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&gates)?);
    } else {
        for gate in &gates {
            println!(
                "{:>8}  ({:.6}, {:.6})  {} node(s)",
                gate.name, gate.latitude, gate.longitude, gate.node_count
            );
        }
    }

    if let Some(selected) = args.select {
        let backend_url = args
            .report_url
            .clone()
            .or(config.backend_url)
            .context("No reporting backend configured: pass --report-url or set GATE_BACKEND_URL")?;
        let report = GateReport {
            gates: &gates,
            route_coordinates: &route,
            selected_gate_id: Some(selected),
        };
        let records = ReportClient::new(backend_url).submit(&report).await?;
        let tracked = records
            .iter()
            .find(|record| record.gate_id == selected)
            .with_context(|| format!("Backend returned no record for gate {}", selected))?;
        println!(
            "Tracked gate {}: {}",
            tracked.gate_id,
            serde_json::to_string_pretty(&tracked.details)?
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_url_flag_overrides_are_parsed() {
        let args = Args::try_parse_from([
            "find_gates",
            "--route",
            "route.json",
            "--select",
            "2",
            "--report-url",
            "http://localhost:5000",
        ])
        .unwrap();
        assert_eq!(args.report_url.as_deref(), Some("http://localhost:5000"));
        assert_eq!(args.select, Some(2));
    }

    #[test]
    fn report_url_defaults_to_none() {
        let args = Args::try_parse_from(["find_gates", "--route", "route.json"]).unwrap();
        assert!(args.report_url.is_none());
        assert!(args.select.is_none());
    }
}
