//! Peak-shaving simulator entry point: CLI wiring and config-driven runs.

use std::process;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use peakshift::cli::{self, CliOptions};
use peakshift::config::ScenarioConfig;
use peakshift::devices::Season;
use peakshift::io::export::export_csv;
use peakshift::io::weather::read_irradiance_csv;
use peakshift::sim::engine::SeasonReport;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_target(false)
        .init();

    let cli = match cli::parse_args() {
        Ok(options) => options,
        Err(e) => {
            eprintln!("error: {e}");
            cli::print_usage();
            process::exit(2);
        }
    };

    // Load config: --scenario takes priority, then --preset, then baseline.
    let mut scenario = if let Some(ref path) = cli.scenario {
        match ScenarioConfig::from_toml_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match ScenarioConfig::from_preset(name) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        ScenarioConfig::baseline()
    };

    if let Some(threshold_kw) = cli.threshold_override {
        scenario.simulation.threshold_kw = threshold_kw;
    }

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let runs = match run_seasons(&scenario, &cli) {
        Ok(runs) => runs,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    for (season, report) in &runs {
        println!("--- {season} ---");
        println!("{report}");
        println!();
    }

    if let Some(ref path) = cli.telemetry_out {
        if let Err(e) = export_csv(&runs, path) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Telemetry written to {}", path.display());
    }
}

/// Runs the configured seasons, reading irradiance from the weather file
/// when one was given and synthesizing clear-sky profiles otherwise.
fn run_seasons(
    scenario: &ScenarioConfig,
    cli: &CliOptions,
) -> Result<Vec<(Season, SeasonReport)>, String> {
    let engine = scenario.engine().map_err(|e| e.to_string())?;

    let weather = match cli.weather {
        Some(ref path) => Some(read_irradiance_csv(path).map_err(|e| e.to_string())?),
        None => None,
    };

    let mut runs = Vec::new();
    for season in cli.season.seasons() {
        let loads = scenario.loads_for(season).map_err(|e| e.to_string())?;
        let irradiance = match weather {
            Some(ref table) => table.for_season(season).clone(),
            None => scenario.irradiance_for(season).map_err(|e| e.to_string())?,
        };
        // A fresh battery per season; SoC never carries across runs.
        let battery = scenario.battery().map_err(|e| e.to_string())?;
        let report = engine
            .run(&loads, &irradiance, battery)
            .map_err(|e| e.to_string())?;
        runs.push((season, report));
    }
    Ok(runs)
}
